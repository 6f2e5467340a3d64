//! Error types.
//!
//! Markup problems never fail a parse; only option access does.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("The option '{name}' does not exist")]
    InvalidConfiguration { name: String },

    #[error("The option '{name}' expects {expected}")]
    OptionType { name: String, expected: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failure reported by an [`HtmlRepair`](crate::repair::HtmlRepair) collaborator.
#[derive(Debug, Error)]
#[error("HTML repair failed: {message}")]
pub struct RepairError {
    pub message: String,
}

impl From<std::io::Error> for RepairError {
    fn from(err: std::io::Error) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

impl From<std::string::FromUtf8Error> for RepairError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}
