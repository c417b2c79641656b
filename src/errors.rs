use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoanError {
    #[error("'{input}' is not a valid {expected}")]
    Parse { input: String, expected: &'static str },

    #[error("'{0}' is negative; the loan amount must be zero or more")]
    NegativeAmount(String),

    #[error("Entry index {index} is out of range; there are {len} entries")]
    OutOfRange { index: usize, len: usize },

    #[error("Unrecognised input '{0}'")]
    UnrecognisedCommand(String),

    #[error("input closed while waiting for a response")]
    InputClosed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not start logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

pub type Result<T> = std::result::Result<T, LoanError>;
