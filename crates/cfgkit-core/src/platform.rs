//! Vendor platform capability trait.
//!
//! Each vendor implements [`Platform`] for its device family; the facade
//! holds one behind `Arc<dyn Platform>` and delegates every domain
//! operation to it. The trait declares the *full* capability surface up
//! front: `get_version` and `get_config` must be implemented, while the
//! config-workflow operations default to [`CfgError::UnsupportedOperation`]
//! until a vendor wires them through.

use crate::error::{CfgError, CfgResult};
use crate::response::{DiffResponse, Response};

/// The operation set every vendor platform exposes.
///
/// This is also the API surface callers see on the facade itself.
pub trait Platform: Send + Sync {
    /// Name of this platform, reported in attribute and log diagnostics.
    fn platform_name(&self) -> &'static str;

    /// Retrieves and parses the device's software version.
    ///
    /// A driver failure is reported as a failed [`Response`]; an output that
    /// did not match the version pattern is a successful response with an
    /// empty result.
    fn get_version(&self) -> Response;

    /// Retrieves the configuration of a named datastore (e.g. "running").
    fn get_config(&self, source: &str) -> Response;

    /// Loads a candidate configuration onto the device.
    fn load_config(&self, _config: &str, _replace: bool) -> CfgResult<Response> {
        Err(CfgError::UnsupportedOperation {
            operation: "load_config",
        })
    }

    /// Discards the currently loaded candidate configuration.
    fn abort_config(&self) -> CfgResult<Response> {
        Err(CfgError::UnsupportedOperation {
            operation: "abort_config",
        })
    }

    /// Commits the candidate configuration to a datastore.
    fn commit_config(&self, _source: &str) -> CfgResult<Response> {
        Err(CfgError::UnsupportedOperation {
            operation: "commit_config",
        })
    }

    /// Diffs the candidate configuration against a datastore.
    fn diff_config(&self, _source: &str) -> CfgResult<DiffResponse> {
        Err(CfgError::UnsupportedOperation {
            operation: "diff_config",
        })
    }
}
