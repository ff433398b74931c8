//! Declarative configuration options and the option applier.
//!
//! A [`ConfigOption`] is a deferred configuration step. One option list is
//! handed to a vendor constructor, which runs it first against the platform
//! structure and then against the facade — each option applies where it
//! belongs and reports [`ApplyOutcome::NotApplicable`] everywhere else, so a
//! single declarative list configures both halves of a session without the
//! caller caring which half each entry lands on.
//!
//! Dispatch is an exhaustive pattern match over a closed variant set plus a
//! [`ConfigOption::Custom`] escape hatch for vendor-defined option bodies.
//! Platform-targeted entries go through the attribute injector in
//! [`crate::attrs`] rather than per-vendor setter code.

use std::collections::HashMap;
use std::sync::Arc;

use regex::Regex;
use tracing::debug;

use crate::attrs::{AttrValue, AttributeSink, inject_attribute};
use crate::cfg::Cfg;
use crate::driver::Driver;
use crate::error::{CfgResult, DriverError};

// =============================================================================
// Outcomes & Targets
// =============================================================================

/// Outcome of applying one option to one target.
///
/// "Does not apply" is an explicit outcome, not an error: the applier skips
/// it and keeps going. Real failures travel through `Err` and abort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The option mutated the fields it claims ownership of.
    Applied,
    /// The option targets a different instance type; nothing was mutated.
    NotApplicable,
}

/// The two shapes of target an option can configure.
pub enum Target<'a> {
    /// The vendor-agnostic facade.
    Cfg(&'a mut Cfg),
    /// A vendor platform structure, reached through its attribute surface.
    Platform(&'a mut dyn AttributeSink),
}

impl Target<'_> {
    fn name(&self) -> &'static str {
        match self {
            Target::Cfg(_) => "Cfg",
            Target::Platform(sink) => sink.sink_name(),
        }
    }
}

// =============================================================================
// Options
// =============================================================================

/// Hook invoked with the driver during [`Cfg::prepare`].
pub type PrepareHook = Arc<dyn Fn(&dyn Driver) -> Result<(), DriverError> + Send + Sync>;

/// Body of a [`ConfigOption::Custom`] option.
pub type CustomOptionFn = Arc<dyn Fn(&mut Target<'_>) -> CfgResult<ApplyOutcome> + Send + Sync>;

/// A deferred configuration step applied at construction time.
///
/// Payloads are cloneable so the same option list can be applied to a
/// platform structure and then to the facade.
#[derive(Clone)]
pub enum ConfigOption {
    /// Replaces the facade's ordered list of configuration sources.
    ConfigSources(Vec<String>),
    /// Installs the prepare hook on the facade.
    OnPrepare(PrepareHook),
    /// Marks the facade as the sole user of its session.
    DedicatedConnection(bool),
    /// Disables the version gate in [`Cfg::prepare`].
    IgnoreVersion(bool),
    /// Seeds the facade's candidate configuration.
    CandidateConfig(String),
    /// Routes a typed value to a named attribute on a platform structure.
    PlatformAttr {
        /// Attribute name, matched exactly against the platform's slots.
        name: String,
        /// Value assigned into the slot.
        value: AttrValue,
    },
    /// Vendor-defined option body.
    Custom(CustomOptionFn),
}

impl ConfigOption {
    /// Replaces the default configuration sources for the facade.
    pub fn config_sources<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::ConfigSources(sources.into_iter().map(Into::into).collect())
    }

    /// Provides a callback invoked with the driver during `prepare`.
    pub fn on_prepare<F>(hook: F) -> Self
    where
        F: Fn(&dyn Driver) -> Result<(), DriverError> + Send + Sync + 'static,
    {
        Self::OnPrepare(Arc::new(hook))
    }

    /// Sets the dedicated-connection policy for the facade.
    pub fn dedicated_connection(dedicated: bool) -> Self {
        Self::DedicatedConnection(dedicated)
    }

    /// Sets whether the facade skips version checking during `prepare`.
    pub fn ignore_version(ignore: bool) -> Self {
        Self::IgnoreVersion(ignore)
    }

    /// Seeds the candidate configuration used for rendering.
    pub fn candidate_config(candidate: impl Into<String>) -> Self {
        Self::CandidateConfig(candidate.into())
    }

    /// Sets the version-extraction pattern on the platform instance.
    pub fn version_pattern(pattern: Regex) -> Self {
        Self::PlatformAttr {
            name: "version_pattern".to_string(),
            value: AttrValue::Pattern(pattern),
        }
    }

    /// Replaces the platform's datastore-source to command mapping.
    pub fn config_command_map(map: HashMap<String, String>) -> Self {
        Self::PlatformAttr {
            name: "config_command_map".to_string(),
            value: AttrValue::CommandMap(map),
        }
    }

    /// Routes an arbitrary typed value to a named platform attribute.
    ///
    /// This is the extension channel for vendor-specific fields the shared
    /// option set knows nothing about.
    pub fn platform_attr(name: impl Into<String>, value: AttrValue) -> Self {
        Self::PlatformAttr {
            name: name.into(),
            value,
        }
    }

    /// Wraps a vendor-defined option body.
    pub fn custom<F>(body: F) -> Self
    where
        F: Fn(&mut Target<'_>) -> CfgResult<ApplyOutcome> + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(body))
    }

    /// Name used when logging a skipped option.
    fn name(&self) -> &'static str {
        match self {
            Self::ConfigSources(_) => "config_sources",
            Self::OnPrepare(_) => "on_prepare",
            Self::DedicatedConnection(_) => "dedicated_connection",
            Self::IgnoreVersion(_) => "ignore_version",
            Self::CandidateConfig(_) => "candidate_config",
            Self::PlatformAttr { .. } => "platform_attr",
            Self::Custom(_) => "custom",
        }
    }

    fn apply(&self, target: &mut Target<'_>) -> CfgResult<ApplyOutcome> {
        if let Self::Custom(body) = self {
            return body(target);
        }

        match target {
            Target::Cfg(cfg) => self.apply_to_cfg(cfg),
            Target::Platform(sink) => self.apply_to_platform(&mut **sink),
        }
    }

    fn apply_to_cfg(&self, cfg: &mut Cfg) -> CfgResult<ApplyOutcome> {
        match self {
            Self::ConfigSources(sources) => cfg.config_sources = sources.clone(),
            Self::OnPrepare(hook) => cfg.on_prepare = Some(hook.clone()),
            Self::DedicatedConnection(dedicated) => cfg.dedicated_connection = *dedicated,
            Self::IgnoreVersion(ignore) => cfg.ignore_version = *ignore,
            Self::CandidateConfig(candidate) => cfg.candidate_config = candidate.clone(),
            // platform attributes never reach into the facade
            Self::PlatformAttr { .. } | Self::Custom(_) => return Ok(ApplyOutcome::NotApplicable),
        }
        Ok(ApplyOutcome::Applied)
    }

    fn apply_to_platform(&self, sink: &mut dyn AttributeSink) -> CfgResult<ApplyOutcome> {
        match self {
            Self::PlatformAttr { name, value } => {
                inject_attribute(sink, name, value.clone())?;
                Ok(ApplyOutcome::Applied)
            }
            _ => Ok(ApplyOutcome::NotApplicable),
        }
    }
}

// =============================================================================
// Applier
// =============================================================================

/// Applies `options` to `target` in order.
///
/// Options that do not target this instance type are skipped; any real
/// failure aborts immediately and propagates. Later options overwrite fields
/// written by earlier ones — no other ordering guarantee is made.
pub fn apply_options(mut target: Target<'_>, options: &[ConfigOption]) -> CfgResult<()> {
    for option in options {
        match option.apply(&mut target)? {
            ApplyOutcome::Applied => {}
            ApplyOutcome::NotApplicable => {
                debug!(
                    option = option.name(),
                    target = target.name(),
                    "option does not target this instance, skipping"
                );
            }
        }
    }

    Ok(())
}
