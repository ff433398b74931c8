//! The vendor-agnostic configuration facade.
//!
//! A [`Cfg`] is constructed once per configuration session from a driver
//! handle, a platform instance, and a list of [`ConfigOption`]s. Options are
//! the only configuration channel; after they run, a facade with no
//! configuration sources is rejected outright.
//!
//! Domain operations delegate to the held [`Platform`]. The facade observes
//! and logs each [`Response`] but never alters it — failure decisions belong
//! to the caller.
//!
//! # Lifecycle
//!
//! ```text
//! Unprepared ──prepare()──▶ Prepared ──cleanup()──▶ Closed
//! ```
//!
//! Read operations (`get_version`, `get_config`) are deliberately allowed in
//! any non-closed state; the mutating config-workflow operations
//! (`load_config`, `commit_config`, ...) require `Prepared`.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::{debug, error, warn};

use crate::driver::Driver;
use crate::error::{CfgError, CfgResult};
use crate::options::{ConfigOption, PrepareHook, Target, apply_options};
use crate::platform::Platform;
use crate::response::{DiffResponse, Response};

/// Placeholder syntax for candidate-config rendering: `{{ name }}`.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z0-9_.-]+)\s*\}\}").expect("placeholder pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Unprepared,
    Prepared,
    Closed,
}

/// The configuration-session facade exposed to callers.
pub struct Cfg {
    /// Ordered datastore sources this session may act against. Never empty
    /// after construction.
    pub config_sources: Vec<String>,
    /// Optional callback invoked with the driver during [`Cfg::prepare`].
    pub on_prepare: Option<PrepareHook>,
    /// Whether this facade expects to be the sole user of its session.
    pub dedicated_connection: bool,
    /// Whether [`Cfg::prepare`] skips the version gate.
    pub ignore_version: bool,
    /// Candidate configuration used by rendering and load operations.
    pub candidate_config: String,
    /// Device version captured by the last successful prepare.
    pub version_string: String,

    state: SessionState,
    platform: Arc<dyn Platform>,
    driver: Arc<dyn Driver>,
}

impl std::fmt::Debug for Cfg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cfg")
            .field("config_sources", &self.config_sources)
            .field("on_prepare", &self.on_prepare.as_ref().map(|_| "<hook>"))
            .field("dedicated_connection", &self.dedicated_connection)
            .field("ignore_version", &self.ignore_version)
            .field("candidate_config", &self.candidate_config)
            .field("version_string", &self.version_string)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Cfg {
    /// Builds a facade bound to `driver` and `platform`, then applies
    /// `options` to it.
    ///
    /// Fails with [`CfgError::NoConfigSourcesProvided`] when the applied
    /// options leave the source list empty; no partial facade is returned.
    pub fn new(
        driver: Arc<dyn Driver>,
        platform: Arc<dyn Platform>,
        options: &[ConfigOption],
    ) -> CfgResult<Self> {
        let mut cfg = Self {
            config_sources: Vec::new(),
            on_prepare: None,
            dedicated_connection: false,
            ignore_version: false,
            candidate_config: String::new(),
            version_string: String::new(),
            state: SessionState::Unprepared,
            platform,
            driver,
        };

        apply_options(Target::Cfg(&mut cfg), options)?;

        if cfg.config_sources.is_empty() {
            // platforms seed this, so an empty list means a broken platform
            // or caller
            return Err(CfgError::NoConfigSourcesProvided);
        }

        Ok(cfg)
    }

    /// Whether [`Cfg::prepare`] has completed on this session.
    pub fn is_prepared(&self) -> bool {
        self.state == SessionState::Prepared
    }

    /// Name of the vendor platform backing this facade.
    pub fn platform_name(&self) -> &'static str {
        self.platform.platform_name()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Prepares the session for configuration work.
    ///
    /// Invokes the `on_prepare` hook when one is installed, then — unless
    /// `ignore_version` is set — fetches the device version and stores it in
    /// `version_string`, failing with [`CfgError::VersionCheckFailed`] when
    /// the fetch failed or parsed empty. A no-op when already prepared.
    pub fn prepare(&mut self) -> CfgResult<()> {
        match self.state {
            SessionState::Closed => return Err(CfgError::SessionClosed),
            SessionState::Prepared => return Ok(()),
            SessionState::Unprepared => {}
        }

        if let Some(hook) = self.on_prepare.clone() {
            hook(self.driver.as_ref())?;
        }

        if !self.ignore_version {
            let response = self.get_version();
            if response.failed || response.result.is_empty() {
                return Err(CfgError::VersionCheckFailed {
                    host: self.driver.host().to_string(),
                });
            }
            self.version_string = response.result;
        }

        self.state = SessionState::Prepared;
        debug!(
            host = %self.driver.host(),
            port = self.driver.port(),
            platform = self.platform.platform_name(),
            "configuration session prepared"
        );

        Ok(())
    }

    /// Closes the session's bookkeeping.
    ///
    /// The driver may be shared with other facades; it is never closed or
    /// invalidated here.
    pub fn cleanup(&mut self) -> CfgResult<()> {
        self.state = SessionState::Closed;
        debug!(
            host = %self.driver.host(),
            port = self.driver.port(),
            "configuration session closed"
        );
        Ok(())
    }

    // =========================================================================
    // Domain Operations
    // =========================================================================

    /// Retrieves the device's software version.
    ///
    /// The platform's response is returned unmodified; a failed response is
    /// logged at error level and an empty-but-successful result (version
    /// output that did not match the pattern) at warning level.
    pub fn get_version(&self) -> Response {
        let response = self.platform.get_version();

        if response.failed {
            error!(
                host = %self.driver.host(),
                port = self.driver.port(),
                "failed to fetch device version"
            );
        } else if response.result.is_empty() {
            warn!(
                host = %self.driver.host(),
                port = self.driver.port(),
                "failed to parse device version"
            );
        }

        response
    }

    /// Retrieves the configuration of a named datastore source.
    ///
    /// Allowed before `prepare`; see the module docs for the lifecycle
    /// policy. The response is returned unmodified.
    pub fn get_config(&self, source: &str) -> Response {
        let response = self.platform.get_config(source);

        if response.failed {
            error!(
                host = %self.driver.host(),
                port = self.driver.port(),
                source,
                "failed to fetch config from device"
            );
        }

        response
    }

    /// Loads a candidate configuration onto the device.
    pub fn load_config(&mut self, config: &str, replace: bool) -> CfgResult<Response> {
        self.require_prepared("load_config")?;
        let response = self.platform.load_config(config, replace)?;
        self.candidate_config = config.to_string();
        Ok(response)
    }

    /// Discards the currently loaded candidate configuration.
    pub fn abort_config(&mut self) -> CfgResult<Response> {
        self.require_prepared("abort_config")?;
        let response = self.platform.abort_config()?;
        self.candidate_config.clear();
        Ok(response)
    }

    /// Commits the candidate configuration to a datastore source.
    pub fn commit_config(&mut self, source: &str) -> CfgResult<Response> {
        self.require_prepared("commit_config")?;
        self.platform.commit_config(source)
    }

    /// Diffs the candidate configuration against a datastore source.
    pub fn diff_config(&mut self, source: &str) -> CfgResult<DiffResponse> {
        self.require_prepared("diff_config")?;
        self.platform.diff_config(source)
    }

    /// Renders the candidate configuration with `{{ name }}` placeholders
    /// replaced from `substitutions`.
    ///
    /// The first placeholder with no value in the map fails with
    /// [`CfgError::UnresolvedVariable`].
    pub fn render_substituted_config(
        &self,
        substitutions: &HashMap<String, String>,
    ) -> CfgResult<String> {
        render_template(&self.candidate_config, substitutions)
    }

    fn require_prepared(&self, operation: &'static str) -> CfgResult<()> {
        if self.state != SessionState::Prepared {
            return Err(CfgError::NotPrepared { operation });
        }
        Ok(())
    }
}

fn render_template(template: &str, substitutions: &HashMap<String, String>) -> CfgResult<String> {
    let mut rendered = String::with_capacity(template.len());
    let mut last = 0;

    for caps in PLACEHOLDER.captures_iter(template) {
        let Some(whole) = caps.get(0) else { continue };
        let name = &caps[1];

        let Some(value) = substitutions.get(name) else {
            return Err(CfgError::UnresolvedVariable {
                name: name.to_string(),
            });
        };

        rendered.push_str(&template[last..whole.start()]);
        rendered.push_str(value);
        last = whole.end();
    }
    rendered.push_str(&template[last..]);

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DriverError;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct MockDriver;

    impl Driver for MockDriver {
        fn host(&self) -> &str {
            "198.51.100.1"
        }

        fn port(&self) -> u16 {
            22
        }

        fn send_command(&self, command: &str) -> Result<String, DriverError> {
            Err(DriverError::CommandFailed {
                command: command.to_string(),
                reason: "mock driver has no device".to_string(),
            })
        }
    }

    /// Platform returning canned responses.
    struct MockPlatform {
        version: Response,
        config: Response,
    }

    impl MockPlatform {
        fn returning(result: &str, failed: bool) -> Self {
            let mut version = Response::new("get_version", "198.51.100.1", 22);
            version.record(result);
            version.failed = failed;
            let mut config = Response::new("get_config", "198.51.100.1", 22);
            config.record("hostname router1");
            Self { version, config }
        }
    }

    impl Platform for MockPlatform {
        fn platform_name(&self) -> &'static str {
            "mock"
        }

        fn get_version(&self) -> Response {
            self.version.clone()
        }

        fn get_config(&self, _source: &str) -> Response {
            self.config.clone()
        }
    }

    fn new_cfg(options: &[ConfigOption]) -> CfgResult<Cfg> {
        Cfg::new(
            Arc::new(MockDriver),
            Arc::new(MockPlatform::returning("15.1(4)M", false)),
            options,
        )
    }

    fn sourced(mut options: Vec<ConfigOption>) -> Vec<ConfigOption> {
        options.insert(0, ConfigOption::config_sources(["running", "startup"]));
        options
    }

    #[test]
    fn test_construction_without_sources_fails_deterministically() {
        let err = new_cfg(&[]).unwrap_err();
        assert!(matches!(err, CfgError::NoConfigSourcesProvided));
    }

    #[test]
    fn test_all_declining_options_still_hit_the_source_check() {
        // every option targets a platform, so none applies to the facade
        let options = vec![ConfigOption::version_pattern(Regex::new(r"\d+").unwrap())];
        let err = new_cfg(&options).unwrap_err();
        assert!(matches!(err, CfgError::NoConfigSourcesProvided));
    }

    #[test]
    fn test_config_sources_preserved_in_order() {
        let cfg = new_cfg(&[ConfigOption::config_sources(["startup", "running"])]).unwrap();
        assert_eq!(cfg.config_sources, vec!["startup", "running"]);
    }

    #[test]
    fn test_last_write_wins_for_dedicated_connection() {
        let cfg = new_cfg(&sourced(vec![
            ConfigOption::dedicated_connection(true),
            ConfigOption::dedicated_connection(false),
        ]))
        .unwrap();
        assert!(!cfg.dedicated_connection);
    }

    #[test]
    fn test_get_version_returns_failed_response_unmodified() {
        let cfg = Cfg::new(
            Arc::new(MockDriver),
            Arc::new(MockPlatform::returning("15.1", true)),
            &sourced(vec![]),
        )
        .unwrap();

        let response = cfg.get_version();
        assert_eq!(response.result, "15.1");
        assert!(response.failed);
    }

    #[test]
    fn test_get_version_returns_empty_response_unmodified() {
        let cfg = Cfg::new(
            Arc::new(MockDriver),
            Arc::new(MockPlatform::returning("", false)),
            &sourced(vec![]),
        )
        .unwrap();

        let response = cfg.get_version();
        assert_eq!(response.result, "");
        assert!(!response.failed);
    }

    #[test]
    fn test_prepare_runs_hook_and_captures_version() {
        let invoked = Arc::new(AtomicBool::new(false));
        let seen = invoked.clone();

        let mut cfg = new_cfg(&sourced(vec![ConfigOption::on_prepare(move |driver| {
            assert_eq!(driver.host(), "198.51.100.1");
            seen.store(true, Ordering::SeqCst);
            Ok(())
        })]))
        .unwrap();

        cfg.prepare().unwrap();
        assert!(invoked.load(Ordering::SeqCst));
        assert!(cfg.is_prepared());
        assert_eq!(cfg.version_string, "15.1(4)M");
    }

    #[test]
    fn test_prepare_version_gate_rejects_unparsed_version() {
        let mut cfg = Cfg::new(
            Arc::new(MockDriver),
            Arc::new(MockPlatform::returning("", false)),
            &sourced(vec![]),
        )
        .unwrap();

        let err = cfg.prepare().unwrap_err();
        assert!(matches!(err, CfgError::VersionCheckFailed { .. }));
        assert!(!cfg.is_prepared());
    }

    #[test]
    fn test_prepare_version_gate_skipped_when_ignored() {
        let mut cfg = Cfg::new(
            Arc::new(MockDriver),
            Arc::new(MockPlatform::returning("", false)),
            &sourced(vec![ConfigOption::ignore_version(true)]),
        )
        .unwrap();

        cfg.prepare().unwrap();
        assert!(cfg.is_prepared());
        assert!(cfg.version_string.is_empty());
    }

    #[test]
    fn test_prepare_after_cleanup_fails() {
        let mut cfg = new_cfg(&sourced(vec![])).unwrap();
        cfg.cleanup().unwrap();

        let err = cfg.prepare().unwrap_err();
        assert!(matches!(err, CfgError::SessionClosed));
    }

    #[test]
    fn test_mutating_operations_require_prepared_session() {
        let mut cfg = new_cfg(&sourced(vec![])).unwrap();

        let err = cfg.load_config("hostname router2", true).unwrap_err();
        assert!(matches!(
            err,
            CfgError::NotPrepared {
                operation: "load_config"
            }
        ));
    }

    #[test]
    fn test_declared_operations_report_unsupported_once_prepared() {
        let mut cfg = new_cfg(&sourced(vec![])).unwrap();
        cfg.prepare().unwrap();

        let err = cfg.commit_config("running").unwrap_err();
        assert!(matches!(
            err,
            CfgError::UnsupportedOperation {
                operation: "commit_config"
            }
        ));
    }

    #[test]
    fn test_render_substitutes_placeholders() {
        let cfg = new_cfg(&sourced(vec![ConfigOption::candidate_config(
            "hostname {{ name }}\nntp server {{ ntp-server }}\n",
        )]))
        .unwrap();

        let substitutions = HashMap::from([
            ("name".to_string(), "router1".to_string()),
            ("ntp-server".to_string(), "192.0.2.10".to_string()),
        ]);

        let rendered = cfg.render_substituted_config(&substitutions).unwrap();
        assert_eq!(rendered, "hostname router1\nntp server 192.0.2.10\n");
    }

    #[test]
    fn test_render_rejects_unresolved_placeholder() {
        let cfg = new_cfg(&sourced(vec![ConfigOption::candidate_config(
            "hostname {{ name }}",
        )]))
        .unwrap();

        let err = cfg
            .render_substituted_config(&HashMap::new())
            .unwrap_err();
        match err {
            CfgError::UnresolvedVariable { name } => assert_eq!(name, "name"),
            other => panic!("expected UnresolvedVariable, got {other:?}"),
        }
    }
}
