//! # cfgkit Platform for Cisco IOS-XE
//!
//! This crate provides the IOS-XE vendor platform for the cfgkit toolkit.
//!
//! The platform carries the vendor-specific pieces — the version-extraction
//! pattern and the datastore-to-command mapping — and is configured through
//! the same declarative option list as the facade: [`new_cfg`] runs the
//! caller's options first against the platform structure (via the shared
//! attribute injector) and then against the facade.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cfgkit_core::ConfigOption;
//! use cfgkit_platform_iosxe as iosxe;
//!
//! let mut cfg = iosxe::new_cfg(driver, &[ConfigOption::dedicated_connection(true)])?;
//! cfg.prepare()?;
//!
//! let running = cfg.get_config("running");
//! if !running.failed {
//!     println!("{}", running.result);
//! }
//! ```

mod platform;

pub use platform::{IosxePlatform, new_cfg};
