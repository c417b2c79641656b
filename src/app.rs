use log::{debug, info};
use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::accrual::{write_accrual, write_history};
use crate::config::Settings;
use crate::errors::{LoanError, Result};
use crate::history::History;
use crate::prompt::{prompt_loan, Console};

pub const BANNER: &str = "Simple Interest Calculator";
pub const MENU: &str = "\
a: Add a new loan
u: Update an existing loan
l: List loan history
q: Quit";
pub const MENU_PROMPT: &str = "a/u/l/q: ";

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Command {
    Add,
    Update,
    List,
    Quit,
}

impl FromStr for Command {
    type Err = LoanError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "a" => Ok(Command::Add),
            "u" => Ok(Command::Update),
            "l" => Ok(Command::List),
            "q" => Ok(Command::Quit),
            other => Err(LoanError::UnrecognisedCommand(other.to_string())),
        }
    }
}

/// The interactive menu loop, owning the loan history for the session.
pub struct Application<R, W> {
    console: Console<R, W>,
    history: History,
    settings: Settings,
}

impl<R: BufRead, W: Write> Application<R, W> {
    pub fn new(console: Console<R, W>, settings: Settings) -> Self {
        Self {
            console,
            history: History::new(),
            settings,
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    /// Runs until the user quits. Only I/O failures (including the input
    /// closing) end the loop early.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.console.out(), "{}", BANNER)?;

        if self.settings.add_first {
            self.add_loan()?;
        }

        loop {
            match self.next_command()? {
                Command::Add => self.add_loan()?,
                Command::Update => self.update_loan()?,
                Command::List => write_history(self.console.out(), &self.history)?,
                Command::Quit => break,
            }
        }
        debug!("quit with {} entries in history", self.history.len());
        Ok(())
    }

    fn next_command(&mut self) -> Result<Command> {
        loop {
            writeln!(self.console.out(), "{}", MENU)?;
            let line = self.console.ask(MENU_PROMPT)?;
            match line.parse::<Command>() {
                Ok(command) => return Ok(command),
                Err(e) => {
                    info!("menu: {}", e);
                    writeln!(self.console.out(), "{}", e)?;
                }
            }
        }
    }

    fn add_loan(&mut self) -> Result<()> {
        let loan = prompt_loan(&mut self.console, None, self.settings.currency.as_deref())?;
        write_accrual(self.console.out(), &loan)?;
        self.history.append(loan);
        Ok(())
    }

    fn update_loan(&mut self) -> Result<()> {
        write_history(self.console.out(), &self.history)?;
        if self.history.is_empty() {
            return Ok(());
        }

        let Some(index) = self.select_index()? else {
            debug!("update cancelled");
            return Ok(());
        };

        let existing = self.history.get(index)?.clone();
        let loan = prompt_loan(&mut self.console, Some(&existing), None)?;
        write_accrual(self.console.out(), &loan)?;
        self.history.replace(index, loan)
    }

    /// Asks for an entry index until one is in range. `None` means the user
    /// cancelled with `q`.
    fn select_index(&mut self) -> Result<Option<usize>> {
        let prompt = format!(
            "Select an entry index between 0 & {} (or q to quit): ",
            self.history.len() - 1
        );

        loop {
            let line = self.console.ask(&prompt)?;
            if line == "q" {
                return Ok(None);
            }

            let message = match line.parse::<usize>() {
                Ok(index) => match self.history.get(index) {
                    Ok(_) => return Ok(Some(index)),
                    Err(e) => e,
                },
                Err(_) => LoanError::Parse {
                    input: line,
                    expected: "number",
                },
            };
            info!("update: {}", message);
            writeln!(self.console.out(), "{}", message)?;
        }
    }
}
