use chrono::{Days, NaiveDate};
use log::{debug, trace, warn};
use prettytable::{row, Table};
use std::io::Write;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::history::History;
use crate::loan::{LoanRecord, DISPLAY_DATE_FORMAT};

pub const DAYS_IN_YEAR: f64 = 365.;
pub const EMPTY_HISTORY: &str = "No history to show!";

/// One day of simple interest accrual.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AccrualRow {
    pub date: NaiveDate,
    pub elapsed_days: i64,
    pub daily_interest_no_margin: f64,
    pub daily_interest: f64,
    pub total_interest: f64,
}

#[derive(Clone, PartialEq, Debug)]
pub struct AccrualSchedule {
    pub daily_interest_no_margin: f64,
    pub daily_interest: f64,
    pub rows: Vec<AccrualRow>,
}

impl AccrualSchedule {
    /// Day-by-day accrual from the start date up to, but not including, the
    /// end date. An end date on or before the start date gives no rows.
    pub fn for_loan(loan: &LoanRecord) -> Self {
        let daily_interest_no_margin = daily_interest(loan.principal, loan.base_rate);
        let daily_interest = daily_interest(loan.principal, loan.total_rate());

        let delta_days = loan.term_days();
        if delta_days < 0 {
            warn!(
                "end date {} precedes start date {}, nothing accrues",
                loan.end_date, loan.start_date
            );
        }

        let mut rows = Vec::with_capacity(delta_days.max(0) as usize);
        for day in 0..delta_days {
            let Some(date) = loan.start_date.checked_add_days(Days::new(day as u64)) else {
                warn!("accrual stopped at day {}: date out of range", day);
                break;
            };
            let total_interest = daily_interest * (day + 1) as f64;
            trace!("day {}, date {}, total interest {}", day, date, total_interest);

            rows.push(AccrualRow {
                date,
                elapsed_days: day,
                daily_interest_no_margin,
                daily_interest,
                total_interest,
            });
        }
        debug!("accrual: {} rows for {}", rows.len(), loan);

        Self {
            daily_interest_no_margin,
            daily_interest,
            rows,
        }
    }

    pub fn total_interest(&self) -> f64 {
        self.rows.last().map_or(0., |row| row.total_interest)
    }

    pub fn to_table(&self, loan: &LoanRecord) -> Table {
        let mut table = Table::new();
        table.set_titles(row![
            "Date",
            "Days",
            "Daily interest (base)",
            "Daily interest (total)",
            "Total interest"
        ]);
        for r in &self.rows {
            table.add_row(row![
                r.date.format(DISPLAY_DATE_FORMAT),
                r.elapsed_days,
                loan.money(r.daily_interest_no_margin),
                loan.money(r.daily_interest),
                loan.money(r.total_interest)
            ]);
        }
        table
    }
}

/// Simple interest earned in one day at an annual percentage `rate`.
pub fn daily_interest(principal: f64, rate: f64) -> f64 {
    principal * (rate / 100.) / DAYS_IN_YEAR
}

pub fn write_accrual<W: Write>(out: &mut W, loan: &LoanRecord) -> Result<()> {
    let schedule = AccrualSchedule::for_loan(loan);
    if schedule.rows.is_empty() {
        writeln!(
            out,
            "No interest accrues between {} and {}",
            loan.start_date.format(DISPLAY_DATE_FORMAT),
            loan.end_date.format(DISPLAY_DATE_FORMAT)
        )?;
        return Ok(());
    }
    schedule.to_table(loan).print(out)?;
    Ok(())
}

pub fn history_table(history: &History) -> Option<Table> {
    if history.is_empty() {
        return None;
    }
    let mut table = Table::new();
    table.set_titles(row!["Entry #", "Details"]);
    for (index, loan) in history.iter() {
        table.add_row(row![index, loan]);
    }
    Some(table)
}

pub fn write_history<W: Write>(out: &mut W, history: &History) -> Result<()> {
    match history_table(history) {
        Some(table) => {
            table.print(out)?;
        }
        None => writeln!(out, "{}", EMPTY_HISTORY)?,
    }
    Ok(())
}
