use thiserror::Error;

use crate::types::CompletionCode;

/// Result type used across this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while handling an App network-function request.
///
/// Every variant maps onto exactly one IPMI completion code, see
/// [`Error::completion_code`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The request payload has the wrong size for the command.
    #[error("bad request length: expected {expected}, got {actual}")]
    BadRequestLength {
        /// Human-readable description of the accepted size.
        expected: &'static str,
        /// Payload length actually received.
        actual: usize,
    },

    /// A request field holds a value outside the command's accepted domain.
    #[error("invalid data field: {0}")]
    InvalidDataField(&'static str),

    /// A reference (channel number, user ID) does not resolve.
    #[error("parameter out of range: {0}")]
    ParameterOutOfRange(&'static str),

    /// Unknown command, or a command this BMC does not implement.
    #[error("invalid command: {cmd:#04x}")]
    InvalidCommand {
        /// Command number from the request.
        cmd: u8,
    },

    /// The response buffer could not be allocated.
    #[error("response buffer allocation failed")]
    AllocationFailure,

    /// The handler populated a success-shaped response but reports failure.
    #[error("response populated but not confirmed by handler")]
    UnconfirmedResponse,

    /// Invalid caller-supplied configuration.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Malformed LAN message or unusable handler state.
    #[error("protocol error: {0}")]
    Protocol(&'static str),
}

impl Error {
    /// Completion code written into the response for this error.
    pub fn completion_code(&self) -> CompletionCode {
        match self {
            Self::BadRequestLength { .. } => CompletionCode::RequestDataLengthInvalid,
            Self::InvalidDataField(_) => CompletionCode::InvalidDataField,
            Self::ParameterOutOfRange(_) => CompletionCode::ParameterOutOfRange,
            Self::InvalidCommand { .. } => CompletionCode::InvalidCommand,
            // The response already carries a normal completion code.
            Self::UnconfirmedResponse => CompletionCode::Ok,
            Self::AllocationFailure | Self::InvalidArgument(_) | Self::Protocol(_) => {
                CompletionCode::Unspecified
            }
        }
    }

    pub(crate) fn bad_length(expected: &'static str, actual: usize) -> Self {
        Self::BadRequestLength { expected, actual }
    }
}

/// C-style result code for a handler outcome: `0` on success, `-1` on failure.
pub fn result_code(result: &Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(_) => -1,
    }
}
