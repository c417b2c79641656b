use log::debug;

use crate::errors::{LoanError, Result};
use crate::loan::LoanRecord;

/// In-memory, append-ordered list of loan records addressed by position.
/// Entries are never removed.
#[derive(Default, Debug)]
pub struct History {
    loans: Vec<LoanRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record and returns its index.
    pub fn append(&mut self, loan: LoanRecord) -> usize {
        let index = self.loans.len();
        debug!("history: appending entry {}: {}", index, loan);
        self.loans.push(loan);
        index
    }

    pub fn get(&self, index: usize) -> Result<&LoanRecord> {
        self.loans.get(index).ok_or(LoanError::OutOfRange {
            index,
            len: self.loans.len(),
        })
    }

    pub fn replace(&mut self, index: usize, loan: LoanRecord) -> Result<()> {
        let len = self.loans.len();
        let slot = self
            .loans
            .get_mut(index)
            .ok_or(LoanError::OutOfRange { index, len })?;
        debug!("history: replacing entry {}: {}", index, loan);
        *slot = loan;
        Ok(())
    }

    /// `(index, record)` pairs in insertion order. Call again to restart.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &LoanRecord)> + '_ {
        self.loans.iter().enumerate()
    }

    pub fn len(&self) -> usize {
        self.loans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loans.is_empty()
    }
}
