use chrono::NaiveDate;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Format used when reading dates from the console.
pub const INPUT_DATE_FORMAT: &str = "%d-%m-%Y";
/// Format used when showing dates in summaries and accrual tables.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// A simple-interest loan entry.
///
/// Rates are annual percentages, so a `base_rate` of `5.` means 5% a year.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LoanRecord {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub principal: f64,
    pub currency: String,
    pub base_rate: f64,
    pub margin: f64,
}

impl LoanRecord {
    pub fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        principal: f64,
        currency: impl Into<String>,
        base_rate: f64,
        margin: f64,
    ) -> Self {
        Self {
            start_date,
            end_date,
            principal,
            currency: currency.into(),
            base_rate,
            margin,
        }
    }

    pub fn total_rate(&self) -> f64 {
        self.base_rate + self.margin
    }

    /// Whole days from the start date to the end date. Negative when the
    /// end date precedes the start date.
    pub fn term_days(&self) -> i64 {
        self.end_date
            .signed_duration_since(self.start_date)
            .num_days()
    }

    pub fn money(&self, amount: f64) -> String {
        format!("{}{:.2}", self.currency, amount)
    }
}

impl fmt::Display for LoanRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} @ {}% ({}% + {}%) from {} to {}",
            self.money(self.principal),
            format_rate(self.total_rate()),
            format_rate(self.base_rate),
            format_rate(self.margin),
            self.start_date.format(DISPLAY_DATE_FORMAT),
            self.end_date.format(DISPLAY_DATE_FORMAT)
        )
    }
}

// percentages print without trailing zeros, so 5.0 shows as "5" and 2.50 as "2.5"
pub fn format_rate(rate: f64) -> String {
    let text = format!("{:.10}", rate);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "-0" => "0".to_string(),
        _ => text.to_string(),
    }
}
