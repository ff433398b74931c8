//! Unified error types for the cfgkit core.
//!
//! Construction-time errors always abort construction: no partial [`Cfg`]
//! is ever handed to a caller. Operation-time failures from a device are
//! *not* errors here; they travel inside a [`Response`] with its `failed`
//! flag set and are only observed (logged) by the facade.
//!
//! [`Cfg`]: crate::cfg::Cfg
//! [`Response`]: crate::response::Response

use thiserror::Error;

// =============================================================================
// Driver Errors
// =============================================================================

/// Errors raised by the transport driver outside of a [`Response`].
///
/// The driver itself is an external collaborator; this type is the shape of
/// failure it reports into this crate (prepare hooks, raw command I/O).
///
/// [`Response`]: crate::response::Response
#[derive(Debug, Clone, Error)]
pub enum DriverError {
    /// I/O error on the underlying session.
    #[error("I/O error: {0}")]
    Io(String),

    /// A command was sent but the device rejected it.
    #[error("command failed: {command} - {reason}")]
    CommandFailed {
        /// The command that was sent.
        command: String,
        /// Reason reported by the driver.
        reason: String,
    },

    /// The session is no longer usable.
    #[error("connection closed: {reason}")]
    ConnectionClosed {
        /// Reason for closure.
        reason: String,
    },
}

impl From<std::io::Error> for DriverError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors raised during facade/platform construction and session lifecycle.
#[derive(Debug, Clone, Error)]
pub enum CfgError {
    /// After all options ran, the facade still had no configuration sources.
    #[error("no configuration sources provided, cannot continue")]
    NoConfigSourcesProvided,

    /// An option named an attribute the target platform does not expose.
    #[error("invalid platform attribute '{attribute}' for platform '{platform}'")]
    InvalidPlatformAttribute {
        /// The requested attribute name.
        attribute: String,
        /// Type name of the platform structure that was targeted.
        platform: &'static str,
    },

    /// An option carried a value whose shape does not fit the attribute slot.
    #[error(
        "platform attribute '{attribute}' on '{platform}' expects a {expected} value, got {actual}"
    )]
    AttributeTypeMismatch {
        /// The requested attribute name.
        attribute: String,
        /// Type name of the platform structure that was targeted.
        platform: &'static str,
        /// Kind the slot accepts.
        expected: &'static str,
        /// Kind the option carried.
        actual: &'static str,
    },

    /// A declared operation has no vendor implementation.
    #[error("operation '{operation}' is not supported by this platform")]
    UnsupportedOperation {
        /// The operation that was invoked.
        operation: &'static str,
    },

    /// A mutating operation was invoked before the session was prepared.
    #[error("operation '{operation}' requires a prepared session")]
    NotPrepared {
        /// The operation that was invoked.
        operation: &'static str,
    },

    /// The session was already cleaned up.
    #[error("configuration session is closed")]
    SessionClosed,

    /// Version retrieval failed or parsed empty while version checking was on.
    #[error("version check failed for {host}: device version missing or unparsed")]
    VersionCheckFailed {
        /// Host the check ran against.
        host: String,
    },

    /// A candidate-config placeholder had no value in the substitution map.
    #[error("unresolved substitution variable '{name}'")]
    UnresolvedVariable {
        /// The placeholder name.
        name: String,
    },

    /// Driver failure surfaced outside of a response (hooks, prepare).
    #[error(transparent)]
    Driver(#[from] DriverError),
}

/// Result type for configuration operations.
pub type CfgResult<T> = Result<T, CfgError>;
