//! Records simple-interest loans and reports the interest they accrue day by
//! day, through a small interactive menu.

pub mod accrual;
pub mod app;
pub mod config;
pub mod errors;
pub mod history;
pub mod loan;
pub mod prompt;
