//! Error types for JPack format

use thiserror::Error;

/// JPack error types
#[derive(Debug, Error)]
pub enum JpackError {
    /// A named resource was registered or inserted twice.
    #[error("The {kind} {}already exists", quoted(.name))]
    AlreadyExists {
        /// Kind of resource (e.g. "file", "dictionary key")
        kind: String,
        /// Identifier of the resource
        name: String,
    },
    /// A named resource could not be found.
    #[error("The {kind} {}is missing", quoted(.name))]
    Missing {
        /// Kind of resource (e.g. "file", "dictionary")
        kind: String,
        /// Identifier of the resource, may be empty
        name: String,
    },
    /// An input line is not valid JSON.
    #[error(
        "Parse error (code {code}) at line {line}:\n{line_text}\n{}\n{message}",
        caret(.offset)
    )]
    Parse {
        /// Parser error category
        code: String,
        /// 1-based line number
        line: usize,
        /// 0-based byte offset of the first invalid character
        offset: usize,
        /// Raw text of the offending line
        line_text: String,
        /// Human-readable parser message
        message: String,
    },
    /// TLV input violates the expected record ordering or sizing.
    #[error("TLV input contains data in wrong format: {0}")]
    MalformedStream(String),
    /// A record carries a tag that has no JSON value mapping.
    #[error("Unknown data type")]
    UnknownDataType,
    /// A member value cannot be represented in the format.
    #[error("Unsupported value for key \"{key}\" at line {line}: only scalar values are allowed")]
    UnsupportedValue {
        /// 1-based line number
        line: usize,
        /// Key of the offending member
        key: String,
    },
    /// A configured security limit was exceeded.
    #[error("Limit exceeded: {0}")]
    LimitExceeded(String),
    /// I/O operation failed while reading or writing data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl JpackError {
    /// Build an [`JpackError::AlreadyExists`] error.
    pub fn already_exists(kind: impl Into<String>, name: impl Into<String>) -> Self {
        JpackError::AlreadyExists {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Build a [`JpackError::Missing`] error.
    pub fn missing(kind: impl Into<String>, name: impl Into<String>) -> Self {
        JpackError::Missing {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Build a [`JpackError::MalformedStream`] error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        JpackError::MalformedStream(reason.into())
    }
}

fn quoted(name: &str) -> String {
    if name.is_empty() {
        String::new()
    } else {
        format!("\"{}\" ", name)
    }
}

fn caret(offset: &usize) -> String {
    format!("{}^", " ".repeat(*offset))
}

/// Result type alias
pub type Result<T> = std::result::Result<T, JpackError>;
