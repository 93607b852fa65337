//! Client error taxonomy.
//!
//! Four classes of failure are distinguished for callers:
//!
//! - local validation errors, raised before any network call;
//! - transport errors (connection, timeout), surfaced as-is and never
//!   retried;
//! - service errors (non-2xx status), carrying the HTTP status and the error
//!   body;
//! - checksum mismatch after an upload that requested verification; the
//!   HTTP call itself succeeded, so this is neither a transport nor a
//!   service error.
//!
//! A 2xx response whose structured body fails to decode is its own variant
//! ([`StorageError::Decode`]); header parsing is permissive and never
//! produces an error.

use http::StatusCode;

/// Error returned by every storage operation.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A structural constraint on the arguments failed locally.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the arguments.
        message: String,
    },

    /// The archive format was not supplied and could not be inferred from
    /// the file name.
    #[error("unsupported archive format: {path}")]
    UnsupportedArchiveFormat {
        /// The file name that failed inference.
        path: String,
    },

    /// Reading a local file failed before the request was built.
    #[error("failed to read local file: {path}")]
    LocalFile {
        /// The path that could not be read.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The network call could not complete.
    #[error("transport error: {message}")]
    Transport {
        /// Description of the failure.
        message: String,
        /// The underlying transport error, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The service answered with a non-success status.
    #[error("service returned {status}: {message}")]
    Service {
        /// The HTTP status code.
        status: StatusCode,
        /// The error body, lossily decoded as text.
        message: String,
    },

    /// Post-upload checksum verification failed.
    #[error("checksum mismatch after upload: expected {expected}, received {actual}")]
    ChecksumMismatch {
        /// Locally computed MD5 of the uploaded bytes, hex-encoded.
        expected: String,
        /// ETag the service returned.
        actual: String,
    },

    /// A successful response carried a body that could not be decoded.
    #[error("failed to decode response body: {message}")]
    Decode {
        /// What failed to decode.
        message: String,
    },
}

impl StorageError {
    /// Create a local validation error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a transport error wrapping an underlying cause.
    #[must_use]
    pub fn transport(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Transport {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a service error from a status and error body.
    #[must_use]
    pub fn service(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Service {
            status,
            message: message.into(),
        }
    }

    /// Create a decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// The HTTP status of a service error, `None` for every other class.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Service { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// `true` when the service reported the resource missing (404).
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// `true` when the failure never left the local process.
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument { .. }
                | Self::UnsupportedArchiveFormat { .. }
                | Self::LocalFile { .. }
        )
    }
}
