//! Error types for gbpcli operations.
//!
//! This module defines [`GbpError`], the error type that crosses every
//! boundary in the crate (client → subcommand → dispatcher), a [`Result`]
//! alias, and the process exit codes each error kind maps to.
//!
//! # Error Handling Strategy
//!
//! - Every client failure is one of the typed kinds below, never a bare string
//! - `GbpError::Other` wraps unexpected `anyhow` errors from plugin glue
//! - Messages are single-line and name the offending identifier

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes.
pub mod exit_code {
    /// Command completed successfully.
    pub const SUCCESS: i32 = 0;
    /// Generic failure.
    pub const FAILURE: i32 = 1;
    /// The command name is not registered.
    pub const UNKNOWN_COMMAND: i32 = 2;
    /// The remote service could not be reached.
    pub const UNAVAILABLE: i32 = 3;
    /// A referenced machine, build, tag or note does not exist.
    pub const NOT_FOUND: i32 = 4;
    /// Caller-supplied arguments are invalid or inconsistent.
    pub const INVALID_ARGUMENT: i32 = 5;
    /// The remote response did not have the expected shape.
    pub const PROTOCOL: i32 = 6;
    /// Configuration or plugin manifest is malformed.
    pub const CONFIGURATION: i32 = 7;
    /// Two subcommands were registered under the same name.
    pub const CONFLICT: i32 = 8;
}

/// Core error type for gbpcli operations.
#[derive(Debug, Error)]
pub enum GbpError {
    /// Referenced machine, build, tag or note does not exist remotely.
    #[error("Not found: {what}")]
    NotFound { what: String },

    /// Caller-supplied identifiers are malformed or inconsistent.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Transient transport failure (timeout, refused connection, 5xx).
    #[error("Service unavailable: {message}")]
    Unavailable { message: String },

    /// Response did not match the expected schema.
    #[error("Protocol error: {message}")]
    Protocol { message: String },

    /// The server understood the request and rejected it.
    #[error("Request rejected by server: {message}")]
    Remote { message: String },

    /// A subcommand name was registered twice.
    #[error("Conflicting subcommand '{name}': already registered by {existing}")]
    Conflict { name: String, existing: String },

    /// Malformed configuration or plugin manifest.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Configuration file given explicitly but not present.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GbpError {
    /// Build a [`GbpError::NotFound`].
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Build a [`GbpError::InvalidArgument`].
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Build a [`GbpError::Unavailable`].
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Build a [`GbpError::Protocol`].
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Build a [`GbpError::Configuration`].
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Exit status the dispatcher reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::InvalidArgument { .. } => exit_code::INVALID_ARGUMENT,
            Self::Unavailable { .. } => exit_code::UNAVAILABLE,
            Self::Protocol { .. } => exit_code::PROTOCOL,
            Self::Conflict { .. } => exit_code::CONFLICT,
            Self::Configuration { .. } | Self::ConfigNotFound { .. } => exit_code::CONFIGURATION,
            Self::Remote { .. } | Self::Io(_) | Self::Other(_) => exit_code::FAILURE,
        }
    }
}

/// Result type alias for gbpcli operations.
pub type Result<T> = std::result::Result<T, GbpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_displays_identifier() {
        let err = GbpError::not_found("build lighthouse.3226");
        assert_eq!(err.to_string(), "Not found: build lighthouse.3226");
    }

    #[test]
    fn conflict_displays_both_sources() {
        let err = GbpError::Conflict {
            name: "list".into(),
            existing: "builtin".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("list"));
        assert!(msg.contains("builtin"));
    }

    #[test]
    fn config_not_found_displays_path() {
        let err = GbpError::ConfigNotFound {
            path: PathBuf::from("/etc/gbpcli.yml"),
        };
        assert!(err.to_string().contains("/etc/gbpcli.yml"));
    }

    #[test]
    fn exit_codes_are_distinct_per_kind() {
        assert_eq!(GbpError::unavailable("timeout").exit_code(), 3);
        assert_eq!(GbpError::not_found("x").exit_code(), 4);
        assert_eq!(GbpError::invalid("x").exit_code(), 5);
        assert_eq!(GbpError::protocol("x").exit_code(), 6);
        assert_eq!(GbpError::configuration("x").exit_code(), 7);
        assert_eq!(
            GbpError::Remote {
                message: "denied".into()
            }
            .exit_code(),
            1
        );
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: GbpError = io_err.into();
        assert!(matches!(err, GbpError::Io(_)));
        assert_eq!(err.exit_code(), exit_code::FAILURE);
    }
}
