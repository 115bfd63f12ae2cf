//! Crate-wide error taxonomy.
//!
//! Every variant here is a programming or data-integrity error — a malformed or
//! incomplete BCD tree, or a caller mixing up a release with the wrong browser. None
//! are retryable. Legitimate "we don't know" is encoded as [`crate::support::SupportOutcome::Unknown`]
//! or [`crate::aggregate::SupportEntry::Unknown`], never as an `Err`.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, BaselineError>;

#[derive(Debug, Error)]
pub enum BaselineError {
    /// An ancestor expansion or compat-tree query hit a path that doesn't exist.
    #[error("invalid compat path: {0}")]
    InvalidPath(String),

    /// A feature was addressed but its node carries no `__compat` record.
    #[error("no __compat record for {0}")]
    MissingCompatRecord(String),

    /// A browser id isn't present in BCD's top-level `browsers` catalog at all — distinct
    /// from [`BaselineError::MissingCompatRecord`], which is about a feature node.
    #[error("no catalog entry for browser {0} in `browsers`")]
    UnknownBrowser(String),

    /// A feature's `__compat.support` has no entry for a browser that was queried.
    #[error("no support entry for browser {browser} on {feature}")]
    MissingBrowserSupport { feature: String, browser: String },

    /// A support statement names a version not present in the browser's release list.
    #[error("unknown version {version:?} for browser {browser}")]
    UnknownVersion { browser: String, version: String },

    /// A browser has no release with status `current`.
    #[error("browser {0} has no current release")]
    NoCurrentRelease(String),

    /// A release was passed into a query for a different browser.
    #[error("release {release} belongs to {actual}, not {expected}")]
    BrowserReleaseMismatch {
        release: String,
        expected: String,
        actual: String,
    },

    /// The raw BCD JSON failed to parse or didn't match the expected shape.
    #[error("malformed BCD input: {0}")]
    Json(#[from] serde_json::Error),
}
