//! Error types for redpipe
//!
//! Provides a unified error type for all operations.

use std::io;

use thiserror::Error;

/// Result type alias using RespError
pub type Result<T> = std::result::Result<T, RespError>;

/// Unified error type for redpipe operations
#[derive(Debug, Error)]
pub enum RespError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[source] io::Error),

    /// The stream hit EOF in the middle of a frame.
    #[error("Stream ended unexpectedly")]
    StreamEnded,

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Protocol misuse: {0}")]
    ProtocolMisuse(String),

    // -------------------------------------------------------------------------
    // Value Access Errors
    // -------------------------------------------------------------------------
    /// An `Error` reply was used as data.
    #[error("Server error: {0}")]
    Server(String),

    #[error("Unexpected value type: expected {expected}, found {found}")]
    UnexpectedType {
        expected: &'static str,
        found: &'static str,
    },

    // -------------------------------------------------------------------------
    // Connection Errors
    // -------------------------------------------------------------------------
    #[error("Connection closed")]
    ConnectionClosed,

    /// A previous frame failed half way; the stream position is unknown.
    #[error("Connection broken by an earlier failure")]
    ConnectionBroken,

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<io::Error> for RespError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            RespError::StreamEnded
        } else {
            RespError::Io(err)
        }
    }
}

impl RespError {
    /// True for failures that leave the stream at an unknown position.
    ///
    /// `Server`, `UnexpectedType` and `ProtocolMisuse` are raised before or
    /// after I/O and never desynchronize the connection.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RespError::Io(_)
                | RespError::StreamEnded
                | RespError::InvalidData(_)
                | RespError::ConnectionBroken
        )
    }
}
