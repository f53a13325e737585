use thiserror::Error;

use crate::protocols::error::ProtocolError;

/// Errors raised by command formatting, argument validation and
/// response parsing.
///
/// Validation variants (`OutOfRange`, `InvalidArgument`) are returned
/// before anything touches the link; `Response` is only possible after
/// a query has completed.
#[derive(Error, Debug)]
pub enum ScpiError {
    #[error("{command}: argument out of range: {detail}")]
    OutOfRange { command: String, detail: String },
    #[error("{command}: invalid argument: {detail}")]
    InvalidArgument { command: String, detail: String },
    #[error("{command}: malformed response: {detail}")]
    Response { command: String, detail: String },
    #[error("malformed block data: {0}")]
    Block(&'static str),
    #[error("protocol error: {0}")]
    Link(#[from] ProtocolError),
    #[error("transfer layer error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScpiError {
    pub(crate) fn out_of_range(command: impl Into<String>, detail: impl Into<String>) -> Self {
        ScpiError::OutOfRange {
            command: command.into(),
            detail: detail.into(),
        }
    }

    pub(crate) fn invalid(command: impl Into<String>, detail: impl Into<String>) -> Self {
        ScpiError::InvalidArgument {
            command: command.into(),
            detail: detail.into(),
        }
    }

    pub(crate) fn response(command: impl Into<String>, detail: impl Into<String>) -> Self {
        ScpiError::Response {
            command: command.into(),
            detail: detail.into(),
        }
    }
}
