//! Transport driver handle consumed by the facade and platforms.
//!
//! The driver is an external collaborator: it owns the actual device
//! session, its timeouts, and its cancellation. This crate only borrows it —
//! shared behind an `Arc`, never closed or otherwise invalidated here. When
//! a facade is built with `dedicated_connection == true` it expects to be
//! the session's sole user, but enforcing that exclusivity is the driver's
//! job, not ours.

use crate::error::DriverError;

/// Handle to an established device session.
///
/// Implementations are expected to block until the command completes; no
/// operation in this crate suspends or returns a future.
pub trait Driver: Send + Sync {
    /// Host this session is connected to, used for log context.
    fn host(&self) -> &str;

    /// Port this session is connected to, used for log context.
    fn port(&self) -> u16;

    /// Sends a command over the session and returns the raw output.
    fn send_command(&self, command: &str) -> Result<String, DriverError>;
}
