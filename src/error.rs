//! .
//!
//! Everything fallible in this crate is either configuration validation or reading a
//! position file. The simulation loop itself never fails.

/// Errors produced while validating parameters or reading position files.
#[derive(thiserror::Error, Debug)]
pub enum Error {
  #[error("invalid parameter: {0}")]
  InvalidParam(String),

  #[error("line {line}: {message}")]
  Parse {
    line: usize,
    message: String
  },

  #[error(transparent)]
  Io(#[from] std::io::Error),
}

impl Error {
  pub fn invalid_param(msg: impl Into<String>) -> Self {
    Self::InvalidParam(msg.into())
  }

  pub fn parse(line: usize, message: impl Into<String>) -> Self {
    Self::Parse { line, message: message.into() }
  }
}

/// Convenient wrapper around `std::Result`.
pub type Result<T> = std::result::Result<T, Error>;
