//! # cfgkit
//!
//! A declarative configuration-injection toolkit for network-device
//! configuration sessions.
//!
//! ## Overview
//!
//! cfgkit exposes one facade ([`Cfg`](cfgkit_core::Cfg)) over a family of
//! heterogeneous vendor platforms. Callers configure both through a single
//! declarative option list; each option lands on the instance it targets
//! and explicitly declines everywhere else, so shared option code never
//! needs to know a vendor structure's field layout.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐  options  ┌─────────────────┐  delegates  ┌────────────────────┐
//! │  Caller  │──────────▶│  Cfg (facade)   │────────────▶│  Platform (vendor) │
//! └──────────┘           │  logs/observes  │             │  iosxe, ...        │
//!                        └─────────────────┘             └─────────┬──────────┘
//!                                                                 ▼
//!                                                         Driver (external)
//! ```
//!
//! - **Core**: option applier, attribute injector, facade, error taxonomy
//! - **Platforms**: per-vendor implementations of the domain operation set
//! - **Driver**: external session handle, consumed but never owned
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cfgkit::prelude::*;
//!
//! let mut cfg = cfgkit::iosxe::new_cfg(
//!     driver,
//!     &[ConfigOption::dedicated_connection(true)],
//! )?;
//!
//! cfg.prepare()?;
//! let running = cfg.get_config("running");
//! ```

pub use cfgkit_core as core;
pub use cfgkit_platform_iosxe as iosxe;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use cfgkit_core::{
        ApplyOutcome, AttrValue, AttributeSink, Cfg, CfgError, CfgResult, ConfigOption, Driver,
        Platform, Response, apply_options,
    };
    pub use cfgkit_platform_iosxe::IosxePlatform;
}
