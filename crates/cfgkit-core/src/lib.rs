//! # cfgkit Core
//!
//! The configuration-injection engine of the cfgkit device-config toolkit.
//!
//! cfgkit lets one declarative option list configure both a vendor-agnostic
//! session facade and a family of structurally unrelated vendor platform
//! implementations, without the facade ever knowing the concrete platform
//! type it holds.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐  options   ┌─────────────┐  options   ┌──────────────────┐
//! │  Caller  │───────────▶│   Applier   │───────────▶│ Platform (vendor)│
//! └──────────┘            │             │            └──────────────────┘
//!                         │             │  options   ┌──────────────────┐
//!                         │             │───────────▶│   Cfg (facade)   │
//!                         └─────────────┘            └──────────────────┘
//! ```
//!
//! - **Options** ([`ConfigOption`]): deferred configuration steps. Each
//!   applies to the facade or to a platform structure and explicitly
//!   declines everywhere else.
//! - **Applier** ([`apply_options`]): runs an option list against one
//!   target, skipping inapplicable entries and aborting on real failures.
//! - **Attribute Injector** ([`inject_attribute`]): routes vendor-targeted
//!   options into named, typed slots ([`AttributeSink`]) on platform
//!   structures whose layout shared code does not know.
//! - **Facade** ([`Cfg`]): the session object callers hold; delegates
//!   domain operations to its [`Platform`] and observes each [`Response`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use cfgkit_core::{Cfg, ConfigOption};
//! use cfgkit_platform_iosxe as iosxe;
//!
//! let cfg = iosxe::new_cfg(
//!     driver,
//!     &[
//!         ConfigOption::dedicated_connection(true),
//!         ConfigOption::config_sources(["running"]),
//!     ],
//! )?;
//!
//! let version = cfg.get_version();
//! if !version.failed {
//!     println!("device runs {}", version.result);
//! }
//! ```

pub mod attrs;
pub mod cfg;
pub mod driver;
pub mod error;
pub mod options;
pub mod platform;
pub mod response;

pub use attrs::{AttrSlot, AttrValue, AttributeSink, PlatformArgs, inject_attribute};
pub use cfg::Cfg;
pub use driver::Driver;
pub use error::{CfgError, CfgResult, DriverError};
pub use options::{ApplyOutcome, ConfigOption, CustomOptionFn, PrepareHook, Target, apply_options};
pub use platform::Platform;
pub use response::{DiffResponse, Response};
