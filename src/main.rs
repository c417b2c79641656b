use clap::Parser;
use log::error;
use simple_interest::app::Application;
use simple_interest::config::Settings;
use simple_interest::errors::{LoanError, Result};
use simple_interest::prompt::Console;
use simple_logger::SimpleLogger;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run(Settings::parse()) {
        // end of input is as good as quitting
        Ok(()) | Err(LoanError::InputClosed) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(settings: Settings) -> Result<()> {
    SimpleLogger::new().with_level(settings.log_level).init()?;

    let console = Console::new(io::stdin().lock(), io::stdout());
    Application::new(console, settings).run()
}

// verifies that types can implement the gated traits below
#[cfg(test)]
fn is_normal<T: Sized + Send + Sync + Unpin>() {}

#[test]
fn normal_types() {
    is_normal::<simple_interest::loan::LoanRecord>();
    is_normal::<simple_interest::accrual::AccrualRow>();
    is_normal::<simple_interest::history::History>();
}
