//! Error types for persona-order
//!
//! Provides structured error handling with:
//! - Numeric error codes for machine parsing
//! - User-friendly messages with suggestions
//! - Exit codes for CLI

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::persona::PersonaId;

/// Result type alias for persona-order operations
pub type Result<T> = std::result::Result<T, Error>;

/// Numeric error codes for machine parsing and documentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ErrorCode {
    // Configuration errors (1xx)
    ConfigNotFound = 100,
    ConfigParseError = 101,
    ConfigValidation = 102,

    // IO errors (2xx)
    IoRead = 200,
    IoWrite = 201,
    IoPermission = 202,
    IoNotFound = 203,

    // Store errors (3xx)
    StoreUnreachable = 300,
    StoreTimeout = 301,
    StoreRejected = 302,

    // Data errors (4xx)
    MalformedRecords = 400,

    // Ordering errors (5xx)
    PersonaNotFound = 500,
    DuplicatePersonaId = 501,
    IncompleteOrder = 502,

    // Internal errors (9xx)
    InternalError = 900,
}

impl ErrorCode {
    /// Get the string code (e.g., "E100")
    pub fn as_str(&self) -> String {
        format!("E{}", *self as u16)
    }

    /// Get the exit code for CLI (maps to 1-125 range)
    pub fn exit_code(&self) -> i32 {
        match *self as u16 {
            100..=199 => 10,
            200..=299 => 20,
            300..=399 => 30,
            400..=499 => 40,
            500..=599 => 50,
            900..=999 => 90,
            _ => 1,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type
#[derive(Error, Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration parse error
    #[error("Failed to parse configuration: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<toml::de::Error>,
    },

    /// Configuration validation error
    #[error("Configuration validation failed: {message}")]
    ConfigValidation { message: String, field: Option<String> },

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    // ─────────────────────────────────────────────────────────────
    // IO Errors
    // ─────────────────────────────────────────────────────────────

    /// File read error
    #[error("Failed to read file: {path}")]
    IoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File write error
    #[error("Failed to write file: {path}")]
    IoWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    Toml(#[from] toml::ser::Error),

    // ─────────────────────────────────────────────────────────────
    // Store Errors
    // ─────────────────────────────────────────────────────────────

    /// HTTP transport failure talking to the persona store
    #[error("Failed to reach persona store at {url}: {message}")]
    StoreUnreachable { url: String, message: String },

    /// Store request timed out
    #[error("Persona store request to {url} timed out after {timeout_secs}s")]
    StoreTimeout { url: String, timeout_secs: u64 },

    /// Store answered with a non-success status
    #[error("Persona store rejected request ({status}): {message}")]
    StoreRejected { status: u16, message: String },

    // ─────────────────────────────────────────────────────────────
    // Data Errors
    // ─────────────────────────────────────────────────────────────

    /// Persona records could not be decoded
    #[error("Malformed persona records: {message}")]
    MalformedRecords {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // ─────────────────────────────────────────────────────────────
    // Ordering Errors
    // ─────────────────────────────────────────────────────────────

    /// Referenced persona is not in the list
    #[error("Persona not found: {id}")]
    PersonaNotFound { id: PersonaId },

    /// The same id appears twice in an ordering
    #[error("Persona {id} appears more than once in the requested order")]
    DuplicatePersonaId { id: PersonaId },

    /// A reorder left out ids the user can see
    #[error("Requested order is missing visible personas: {missing:?}")]
    IncompleteOrder { missing: Vec<PersonaId> },

    // ─────────────────────────────────────────────────────────────
    // Internal Errors
    // ─────────────────────────────────────────────────────────────

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Get the numeric error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::ConfigNotFound { .. } => ErrorCode::ConfigNotFound,
            Error::ConfigParse { .. } => ErrorCode::ConfigParseError,
            Error::ConfigValidation { .. } => ErrorCode::ConfigValidation,
            Error::Config(_) => ErrorCode::ConfigValidation,

            Error::IoRead { .. } => ErrorCode::IoRead,
            Error::IoWrite { .. } => ErrorCode::IoWrite,
            Error::Io(e) => match e.kind() {
                std::io::ErrorKind::NotFound => ErrorCode::IoNotFound,
                std::io::ErrorKind::PermissionDenied => ErrorCode::IoPermission,
                _ => ErrorCode::IoRead,
            },
            Error::Toml(_) => ErrorCode::ConfigParseError,

            Error::StoreUnreachable { .. } => ErrorCode::StoreUnreachable,
            Error::StoreTimeout { .. } => ErrorCode::StoreTimeout,
            Error::StoreRejected { .. } => ErrorCode::StoreRejected,

            Error::MalformedRecords { .. } => ErrorCode::MalformedRecords,

            Error::PersonaNotFound { .. } => ErrorCode::PersonaNotFound,
            Error::DuplicatePersonaId { .. } => ErrorCode::DuplicatePersonaId,
            Error::IncompleteOrder { .. } => ErrorCode::IncompleteOrder,

            Error::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Get the exit code for CLI
    pub fn exit_code(&self) -> i32 {
        self.code().exit_code()
    }

    /// Get a user-friendly suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Error::ConfigNotFound { .. } => Some(
                "Run 'persona-order config init' to create a default configuration file."
            ),
            Error::ConfigParse { .. } => Some(
                "Check your configuration file syntax. Run 'persona-order config validate' to see details."
            ),
            Error::ConfigValidation { .. } | Error::Config(_) => Some(
                "Review the configuration file and fix the invalid values."
            ),
            Error::StoreUnreachable { .. } | Error::StoreTimeout { .. } => Some(
                "Check that the backend is running and [store].base_url is correct."
            ),
            Error::StoreRejected { status: 401 | 403, .. } => Some(
                "Check [store].api_key. Reordering personas usually needs an admin key."
            ),
            Error::MalformedRecords { .. } => Some(
                "The persona source must be a JSON array of persona objects with an integer 'id'."
            ),
            Error::PersonaNotFound { .. } => Some(
                "Run 'persona-order list --all' to see the ids currently known to the store."
            ),
            Error::DuplicatePersonaId { .. } => Some(
                "List each persona id exactly once."
            ),
            Error::IncompleteOrder { .. } => Some(
                "Pass every id shown by 'persona-order list', or use --move to shift a single persona."
            ),
            _ => None,
        }
    }

    /// Format the error for terminal display with colors
    pub fn format_for_terminal(&self) -> String {
        let mut output = format!("\x1b[31mError [{}]\x1b[0m: {}\n", self.code().as_str(), self);

        if let Some(hint) = self.suggestion() {
            output.push_str(&format!("\n\x1b[33mHint\x1b[0m: {}\n", hint));
        }

        output
    }

    /// Format the error for logging (no colors)
    pub fn format_for_log(&self) -> String {
        format!("[{}] {}", self.code().as_str(), self)
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn config_not_found(path: impl Into<PathBuf>) -> Self {
        Error::ConfigNotFound { path: path.into() }
    }

    pub fn config_validation(message: impl Into<String>) -> Self {
        Error::ConfigValidation {
            message: message.into(),
            field: None,
        }
    }

    pub fn config_field_invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ConfigValidation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    pub fn malformed(message: impl Into<String>, source: serde_json::Error) -> Self {
        Error::MalformedRecords {
            message: message.into(),
            source: Some(source),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_format() {
        assert_eq!(ErrorCode::ConfigNotFound.as_str(), "E100");
        assert_eq!(ErrorCode::StoreUnreachable.as_str(), "E300");
        assert_eq!(ErrorCode::DuplicatePersonaId.as_str(), "E501");
    }

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(ErrorCode::ConfigNotFound.exit_code(), 10);
        assert_eq!(ErrorCode::IoRead.exit_code(), 20);
        assert_eq!(ErrorCode::StoreRejected.exit_code(), 30);
        assert_eq!(ErrorCode::MalformedRecords.exit_code(), 40);
        assert_eq!(ErrorCode::PersonaNotFound.exit_code(), 50);
        assert_eq!(ErrorCode::InternalError.exit_code(), 90);
    }

    #[test]
    fn test_error_display() {
        let err = Error::config_not_found("/path/to/config.toml");
        assert!(err.to_string().contains("/path/to/config.toml"));

        let err = Error::DuplicatePersonaId { id: -4 };
        assert!(err.to_string().contains("-4"));

        let err = Error::IncompleteOrder { missing: vec![-1, 6] };
        assert!(err.to_string().contains("[-1, 6]"));
        assert_eq!(err.code().as_str(), "E502");
        assert_eq!(err.exit_code(), 50);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::config_not_found("/x").code(), ErrorCode::ConfigNotFound);
        assert_eq!(Error::PersonaNotFound { id: 1 }.code(), ErrorCode::PersonaNotFound);
        assert_eq!(
            Error::config_field_invalid("store.kind", "bad").code(),
            ErrorCode::ConfigValidation
        );
    }

    #[test]
    fn test_rejected_auth_suggestion() {
        let err = Error::StoreRejected {
            status: 403,
            message: "forbidden".into(),
        };
        assert!(err.suggestion().unwrap().contains("api_key"));

        let err = Error::StoreRejected {
            status: 500,
            message: "boom".into(),
        };
        assert!(err.suggestion().is_none());
    }

    #[test]
    fn test_format_for_terminal() {
        let formatted = Error::config_not_found("/test/config.toml").format_for_terminal();
        assert!(formatted.contains("E100"));
        assert!(formatted.contains("\x1b[31m"));
        assert!(formatted.contains("Hint"));
    }

    #[test]
    fn test_format_for_log() {
        let formatted = Error::PersonaNotFound { id: 9 }.format_for_log();
        assert!(formatted.contains("[E500]"));
        assert!(!formatted.contains("\x1b["));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert_eq!(err.code(), ErrorCode::IoNotFound);
    }
}
