//! Error types for huffpack.

use std::io;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while compressing or decompressing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Packed input is empty, truncated, or its padding header is inconsistent.
    #[error("Malformed stream: {0}")]
    MalformedStream(String),

    /// A symbol has no entry in the active code table.
    #[error("Unknown symbol: {0} has no code")]
    UnknownSymbol(String),

    /// A persisted code table is not a usable prefix code.
    #[error("Invalid code table: {0}")]
    InvalidCodeTable(String),

    /// Archive was written by an incompatible format version.
    #[error("Unsupported archive version {found} (expected {expected})")]
    UnsupportedVersion { found: u8, expected: u8 },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// MessagePack serialization error.
    #[error("Archive encode error: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    /// MessagePack deserialization error.
    #[error("Archive decode error: {0}")]
    Decode(#[from] rmp_serde::decode::Error),
}

impl Error {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Error::MalformedStream(msg.into())
    }

    pub(crate) fn invalid_table(msg: impl Into<String>) -> Self {
        Error::InvalidCodeTable(msg.into())
    }
}
