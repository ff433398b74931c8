//! Operation responses produced by platform implementations.
//!
//! A [`Response`] carries the device's answer plus enough context
//! (host, port, operation) to be useful in logs and tooling. A failed
//! operation is a response with `failed == true`, never an `Err` — the
//! facade logs it and hands it to the caller to inspect.

use serde::Serialize;

/// Result of a single delegated device operation.
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    /// Name of the operation that produced this response.
    pub op: &'static str,
    /// Host the operation ran against.
    pub host: String,
    /// Port the operation ran against.
    pub port: u16,
    /// Raw or parsed result text. Empty when nothing could be extracted.
    pub result: String,
    /// Whether the operation failed. Failure is observed, not raised.
    pub failed: bool,
}

impl Response {
    /// Creates a pending response for an operation against `host:port`.
    pub fn new(op: &'static str, host: impl Into<String>, port: u16) -> Self {
        Self {
            op,
            host: host.into(),
            port,
            result: String::new(),
            failed: false,
        }
    }

    /// Records a successful result.
    pub fn record(&mut self, result: impl Into<String>) {
        self.result = result.into();
    }

    /// Marks the operation as failed.
    pub fn record_failure(&mut self) {
        self.failed = true;
    }
}

/// Result of a `diff_config` operation.
///
/// Declared surface: no bundled platform produces one yet, but the shape is
/// fixed so vendor implementations agree on it.
#[derive(Debug, Clone, Serialize)]
pub struct DiffResponse {
    /// The underlying operation response.
    pub response: Response,
    /// Datastore the candidate was diffed against.
    pub source: String,
    /// Configuration currently on the device.
    pub device_config: String,
    /// Candidate configuration that was compared.
    pub candidate_config: String,
}
