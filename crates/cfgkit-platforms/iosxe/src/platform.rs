//! IOS-XE platform implementation.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::warn;

use cfgkit_core::attrs::{AttrSlot, AttributeSink, PlatformArgs};
use cfgkit_core::cfg::Cfg;
use cfgkit_core::driver::Driver;
use cfgkit_core::error::CfgResult;
use cfgkit_core::options::{ConfigOption, Target, apply_options};
use cfgkit_core::platform::Platform;
use cfgkit_core::response::Response;

/// Command used to fetch version output.
const SHOW_VERSION_COMMAND: &str = "show version | i Version";

/// Matches IOS-XE style version strings, e.g. `16.12.3` or `15.1(4)M`.
static DEFAULT_VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.[a-zA-Z0-9().]+").expect("version pattern is valid"));

/// Datastore sources an IOS-XE session acts against by default.
const DEFAULT_CONFIG_SOURCES: [&str; 2] = ["running", "startup"];

fn default_command_map() -> HashMap<String, String> {
    HashMap::from([
        ("running".to_string(), "show running-config".to_string()),
        ("startup".to_string(), "show startup-config".to_string()),
    ])
}

/// The IOS-XE vendor platform.
///
/// Embeds the shared [`PlatformArgs`] attribute surface; options like
/// `ConfigOption::version_pattern` reach these fields through the attribute
/// injector rather than vendor-specific setters.
pub struct IosxePlatform {
    driver: Arc<dyn Driver>,
    args: PlatformArgs,
}

impl IosxePlatform {
    fn new(driver: Arc<dyn Driver>) -> Self {
        Self {
            driver,
            args: PlatformArgs {
                version_pattern: Some(DEFAULT_VERSION_PATTERN.clone()),
                config_command_map: default_command_map(),
            },
        }
    }
}

impl Platform for IosxePlatform {
    fn platform_name(&self) -> &'static str {
        "cisco_iosxe"
    }

    fn get_version(&self) -> Response {
        let mut response = Response::new("get_version", self.driver.host(), self.driver.port());

        match self.driver.send_command(SHOW_VERSION_COMMAND) {
            Ok(output) => {
                let version = self
                    .args
                    .version_pattern
                    .as_ref()
                    .and_then(|pattern| pattern.find(&output))
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default();
                response.record(version);
            }
            Err(err) => {
                warn!(
                    host = %self.driver.host(),
                    port = self.driver.port(),
                    error = %err,
                    "version command failed"
                );
                response.record_failure();
            }
        }

        response
    }

    fn get_config(&self, source: &str) -> Response {
        let mut response = Response::new("get_config", self.driver.host(), self.driver.port());

        let Some(command) = self.args.config_command_map.get(source) else {
            warn!(
                host = %self.driver.host(),
                port = self.driver.port(),
                source,
                "unknown configuration source"
            );
            response.record_failure();
            return response;
        };

        match self.driver.send_command(command) {
            Ok(output) => response.record(output),
            Err(err) => {
                warn!(
                    host = %self.driver.host(),
                    port = self.driver.port(),
                    source,
                    error = %err,
                    "config command failed"
                );
                response.record_failure();
            }
        }

        response
    }
}

impl AttributeSink for IosxePlatform {
    fn sink_name(&self) -> &'static str {
        "IosxePlatform"
    }

    fn attribute(&mut self, name: &str) -> Option<AttrSlot<'_>> {
        self.args.attribute(name)
    }
}

/// Builds a configuration facade bound to an IOS-XE device.
///
/// The caller's options run twice: first against the platform structure
/// (where vendor-targeted entries land and facade entries decline), then
/// against the facade with the IOS-XE default sources seeded ahead of them
/// so later caller options overwrite the defaults.
pub fn new_cfg(driver: Arc<dyn Driver>, options: &[ConfigOption]) -> CfgResult<Cfg> {
    let mut platform = IosxePlatform::new(driver.clone());
    apply_options(Target::Platform(&mut platform), options)?;

    let mut seeded = vec![ConfigOption::config_sources(DEFAULT_CONFIG_SOURCES)];
    seeded.extend_from_slice(options);

    Cfg::new(driver, Arc::new(platform), &seeded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfgkit_core::attrs::AttrValue;
    use cfgkit_core::error::{CfgError, DriverError};

    /// Driver answering from a canned command-to-output table.
    struct MockDriver {
        outputs: HashMap<&'static str, &'static str>,
    }

    impl MockDriver {
        fn with_version(version_line: &'static str) -> Arc<Self> {
            Arc::new(Self {
                outputs: HashMap::from([
                    (SHOW_VERSION_COMMAND, version_line),
                    ("show running-config", "hostname router1\n"),
                    ("show startup-config", "hostname router1-saved\n"),
                ]),
            })
        }
    }

    impl Driver for MockDriver {
        fn host(&self) -> &str {
            "198.51.100.1"
        }

        fn port(&self) -> u16 {
            22
        }

        fn send_command(&self, command: &str) -> Result<String, DriverError> {
            self.outputs
                .get(command)
                .map(|output| output.to_string())
                .ok_or_else(|| DriverError::CommandFailed {
                    command: command.to_string(),
                    reason: "no canned output".to_string(),
                })
        }
    }

    #[test]
    fn test_get_version_extracts_via_pattern() {
        let driver =
            MockDriver::with_version("Cisco IOS XE Software, Version 16.12.3, RELEASE SOFTWARE");
        let platform = IosxePlatform::new(driver);

        let response = platform.get_version();
        assert!(!response.failed);
        assert_eq!(response.result, "16.12.3");
    }

    #[test]
    fn test_get_version_unmatched_output_yields_empty_result() {
        let driver = MockDriver::with_version("no version text here");
        let platform = IosxePlatform::new(driver);

        let response = platform.get_version();
        assert!(!response.failed);
        assert!(response.result.is_empty());
    }

    #[test]
    fn test_get_config_unknown_source_fails() {
        let driver = MockDriver::with_version("Version 16.12.3");
        let platform = IosxePlatform::new(driver);

        let response = platform.get_config("candidate");
        assert!(response.failed);
        assert!(response.result.is_empty());
    }

    #[test]
    fn test_new_cfg_seeds_default_sources() {
        let driver = MockDriver::with_version("Version 16.12.3");
        let cfg = new_cfg(driver, &[]).unwrap();

        assert_eq!(cfg.config_sources, vec!["running", "startup"]);
        assert_eq!(cfg.platform_name(), "cisco_iosxe");
    }

    #[test]
    fn test_new_cfg_caller_options_override_defaults() {
        let driver = MockDriver::with_version("Version 16.12.3");
        let cfg = new_cfg(
            driver,
            &[
                ConfigOption::config_sources(["running"]),
                ConfigOption::dedicated_connection(true),
            ],
        )
        .unwrap();

        assert_eq!(cfg.config_sources, vec!["running"]);
        assert!(cfg.dedicated_connection);
    }

    #[test]
    fn test_version_pattern_option_reaches_the_platform() {
        let driver = MockDriver::with_version("build 7777 Version 16.12.3");
        let mut platform = IosxePlatform::new(driver);

        apply_options(
            Target::Platform(&mut platform),
            &[ConfigOption::version_pattern(Regex::new(r"\d{4}").unwrap())],
        )
        .unwrap();

        let response = platform.get_version();
        assert_eq!(response.result, "7777");
    }

    #[test]
    fn test_unknown_attribute_fails_construction() {
        let driver = MockDriver::with_version("Version 16.12.3");
        let err = new_cfg(
            driver,
            &[ConfigOption::platform_attr(
                "not_an_iosxe_field",
                AttrValue::Flag(true),
            )],
        )
        .unwrap_err();

        match err {
            CfgError::InvalidPlatformAttribute {
                attribute,
                platform,
            } => {
                assert_eq!(attribute, "not_an_iosxe_field");
                assert_eq!(platform, "IosxePlatform");
            }
            other => panic!("expected InvalidPlatformAttribute, got {other:?}"),
        }
    }

    #[test]
    fn test_end_to_end_prepare_and_get_config() {
        let driver = MockDriver::with_version("Cisco IOS XE Software, Version 16.12.3");
        let mut cfg = new_cfg(driver, &[]).unwrap();

        cfg.prepare().unwrap();
        assert_eq!(cfg.version_string, "16.12.3");

        let running = cfg.get_config("running");
        assert!(!running.failed);
        assert_eq!(running.result, "hostname router1\n");
    }
}
