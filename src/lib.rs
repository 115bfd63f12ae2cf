//! `compute_baseline` - Baseline status computation engine
//!
//! # Features
//!
//! - **Tri-state support resolution**: collapses a BCD `__compat` record's raw
//!   `version_added`/`version_removed` statements into Supported/Unsupported/Unknown.
//! - **Calendar-aware status derivation**: keystone-date roll-up across the seven-browser
//!   core set, and the 30-calendar-month `false`/`low`/`high` Baseline mapping.
//! - **Ancestor expansion**: a feature's Baseline status folds in every named ancestor
//!   that carries its own `__compat` record.
//!
//! # Example
//!
//! ```rust
//! use compute_baseline::{Bcd, Compat, ComputeOptions, get_status};
//!
//! fn main() -> compute_baseline::Result<()> {
//! let bcd = Bcd::from_value(serde_json::json!({
//!     "__meta": {"timestamp": "2026-01-01T00:00:00Z"},
//!     "browsers": {
//!         "chrome": {"name": "Chrome", "releases": {
//!             "100": {"status": "current", "release_date": "2022-01-01"}
//!         }},
//!         "chrome_android": {"name": "Chrome Android", "releases": {
//!             "100": {"status": "current", "release_date": "2022-01-01"}
//!         }},
//!         "edge": {"name": "Edge", "releases": {
//!             "100": {"status": "current", "release_date": "2022-01-01"}
//!         }},
//!         "firefox": {"name": "Firefox", "releases": {
//!             "100": {"status": "current", "release_date": "2022-01-01"}
//!         }},
//!         "firefox_android": {"name": "Firefox Android", "releases": {
//!             "100": {"status": "current", "release_date": "2022-01-01"}
//!         }},
//!         "safari": {"name": "Safari", "releases": {
//!             "16": {"status": "current", "release_date": "2022-01-01"}
//!         }},
//!         "safari_ios": {"name": "Safari iOS", "releases": {
//!             "16": {"status": "current", "release_date": "2022-01-01"}
//!         }}
//!     },
//!     "javascript": {
//!         "builtins": {
//!             "Array": {
//!                 "flat": {"__compat": {"support": {
//!                     "chrome": {"version_added": "100"},
//!                     "chrome_android": {"version_added": "100"},
//!                     "edge": {"version_added": "100"},
//!                     "firefox": {"version_added": "100"},
//!                     "firefox_android": {"version_added": "100"},
//!                     "safari": {"version_added": "16"},
//!                     "safari_ios": {"version_added": "16"}
//!                 }}}
//!             }
//!         }
//!     }
//! }))?;
//! let compat = Compat::new(&bcd);
//! let options = ComputeOptions::new(bcd.cutoff_date());
//! let status = get_status("array-flat", "javascript.builtins.Array.flat", &compat, &options)?;
//! println!("{:?}", status.baseline());
//! Ok(())
//! }
//! ```

pub mod aggregate;
pub mod ancestor;
pub mod bcd;
pub mod browser;
pub mod compute;
pub mod context;
pub mod date;
pub mod error;
pub mod initial_support;
pub mod keystone;
pub mod support;
pub mod version;

pub use aggregate::{aggregate, SupportEntry, SupportMap};
pub use ancestor::expand_ancestors;
pub use bcd::{Bcd, CompatNode, CompatRecord, RawSupport, VersionValue};
pub use browser::{Browser, BrowserId, Release, ReleaseStatus, CORE_BROWSER_SET};
pub use compute::{compute_baseline, get_status, FeatureSelector};
pub use context::{Compat, ComputeOptions, MissingBrowserPolicy};
pub use date::{add_thirty_months, format_ranged_date, parse_ranged_date, RangedDate};
pub use error::{BaselineError, Result};
pub use initial_support::{find_initial_support, InitialSupport};
pub use keystone::{keystone_date, keystone_date_to_status, Baseline, BaselineLabel, BaselineStatus};
pub use support::{classify_release, resolve_statement, FeatureOutcome, Qualifications, SupportOutcome};
pub use version::{compare_version_strings, Version};

/// Version of compute_baseline
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
