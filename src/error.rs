use thiserror::Error;

use crate::{protocols::error::ProtocolError, scpi::error::ScpiError};

/// Top-level error covering transport setup, line I/O and SCPI
/// formatting/parsing failures.
#[derive(Error, Debug)]
pub enum Error {
    #[error("transfer layer error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("serial protocol error: {0}")]
    SerialError(#[from] serial::Error),
    #[error("scpi error: {0}")]
    ScpiError(#[from] ScpiError),
    #[error("protocol error: {0}")]
    ProtocolError(#[from] ProtocolError),
}

impl Error {
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::IoError(e) => e.kind() == std::io::ErrorKind::TimedOut,
            Error::ScpiError(ScpiError::Io(e)) => e.kind() == std::io::ErrorKind::TimedOut,
            _ => false,
        }
    }
}
