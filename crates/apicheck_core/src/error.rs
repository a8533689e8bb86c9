//! Error types for apicheck_core operations.

use std::fmt;
use thiserror::Error;

/// Number of raw body characters kept for diagnostics on parse failures.
pub const RAW_EXCERPT_CHARS: usize = 200;

/// Where a failed request broke down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request did not complete within the client timeout.
    Timeout,
    /// The server could not be reached.
    Connection,
    /// The server answered with a body that is not a JSON object.
    InvalidJson,
    /// The server answered with a JSON body carrying an `error` field.
    Application,
    /// Any other transport-level failure.
    Other,
}

impl ErrorKind {
    /// Short stable label used in log lines and summaries.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Connection => "connection-failure",
            Self::InvalidJson => "invalid-json",
            Self::Application => "application",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized failure of a single HTTP call.
///
/// Transport, parse and application failures all collapse into this one
/// shape so callers have a single check regardless of where the call failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct RequestError {
    /// Failure category.
    pub kind: ErrorKind,
    /// Human readable reason.
    pub message: String,
    /// HTTP status, when a response was received.
    pub status: Option<u16>,
    /// Leading excerpt of the raw body for `InvalidJson` failures.
    pub raw: Option<String>,
}

impl RequestError {
    /// Creates an error without status or body excerpt.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            raw: None,
        }
    }

    /// Attaches the HTTP status the server answered with.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Attaches a truncated excerpt of the raw response body.
    pub fn with_raw(mut self, body: &str) -> Self {
        self.raw = Some(excerpt(body, RAW_EXCERPT_CHARS));
        self
    }

    /// Returns true for failures where no response was obtained.
    pub fn is_transport(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::Timeout | ErrorKind::Connection | ErrorKind::Other
        )
    }
}

/// Truncates `text` to at most `max_chars` characters on a char boundary.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Core error type for apicheck_core operations.
#[derive(Error, Debug)]
pub enum ApiCheckError {
    /// An HTTP call failed.
    #[error("request failed: {0}")]
    Request(#[from] RequestError),

    /// A response was well formed but lacked a field the case depends on.
    #[error("missing field `{field}` in {context}")]
    MissingField {
        /// The field that was expected.
        field: String,
        /// Which response it was expected in.
        context: String,
    },

    /// A response field could not be decoded into its typed record.
    #[error("malformed `{field}` in {context}: {reason}")]
    Malformed {
        /// The field being decoded.
        field: String,
        /// Which response it came from.
        context: String,
        /// Decoder message.
        reason: String,
    },

    /// A response carried a value other than the expected one.
    #[error("unexpected {field}: expected {expected:?}, got {actual:?}")]
    Mismatch {
        /// The field compared.
        field: String,
        /// The value the case expected.
        expected: String,
        /// The value the server returned.
        actual: String,
    },

    /// The server answered with a status the case did not accept.
    #[error("unexpected status for {path}: expected {expected}, got {actual}")]
    UnexpectedStatus {
        /// Request path.
        path: String,
        /// Status the case required.
        expected: u16,
        /// Status the server returned.
        actual: u16,
    },

    /// A test case could not run for a reason other than a failed call.
    #[error("case skipped: {0}")]
    Skipped(String),

    /// A test case panicked.
    #[error("case panicked: {0}")]
    Panicked(String),

    /// Login did not produce a usable session.
    #[error("login failed: {0}")]
    LoginFailed(String),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),

    /// Configuration error (loading, parsing, invalid values).
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiCheckError {
    /// Returns a user-friendly recovery suggestion for the error, if available.
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Request(err) if err.kind == ErrorKind::Connection => {
                Some("Is the backend running? Check --base-url or APICHECK_BASE_URL.")
            }
            Self::Request(err) if err.kind == ErrorKind::Timeout => {
                Some("The backend is slow to answer. Raise --timeout or APICHECK_TIMEOUT_SECS.")
            }
            Self::LoginFailed(_) => {
                Some("Check APICHECK_EMAIL and APICHECK_PASSWORD, or the [credentials] config section.")
            }
            Self::ConfigError(_) => Some("Fix the config file or unset the offending APICHECK_* variable."),
            _ => None,
        }
    }
}

/// Convenience Result type for apicheck_core operations.
pub type Result<T> = std::result::Result<T, ApiCheckError>;
