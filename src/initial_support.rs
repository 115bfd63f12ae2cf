//! Per-Feature Initial-Support Finder (spec §4.4).

use crate::browser::{Browser, Release};
use crate::bcd::SupportStatement;
use crate::error::Result;
use crate::support::{classify_release, FeatureOutcome};

/// The release that most recently introduced unbroken support for one (feature,
/// browser) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitialSupport {
    pub release: Release,
    /// `true` iff this was derived from a `≤` statement — the true introduction point
    /// may be earlier than `release`.
    pub ranged: bool,
}

impl InitialSupport {
    /// The display text: `V` or `≤V`.
    #[must_use]
    pub fn text(&self) -> String {
        if self.ranged {
            format!("≤{}", self.release.version)
        } else {
            self.release.version.clone()
        }
    }
}

/// Walk `browser`'s releases from `current()` down to the oldest, looking for the
/// release that most recently introduced unbroken support. Returns `None` if the
/// current release itself is not supported (or only ambiguously so).
pub fn find_initial_support(
    browser: &Browser,
    statements: &[SupportStatement],
) -> Result<Option<InitialSupport>> {
    let current = browser.current()?;
    let mut index = current.index;

    if classify_release(statements, browser, &browser.releases[index])? != FeatureOutcome::SupportedPlain {
        return Ok(None);
    }
    let mut last_initial = index;
    let mut ranged = false;

    while index > 0 {
        index -= 1;
        match classify_release(statements, browser, &browser.releases[index])? {
            FeatureOutcome::SupportedPlain => {
                last_initial = index;
                ranged = false;
            }
            FeatureOutcome::Unknown => {
                ranged = true;
                break;
            }
            FeatureOutcome::Unsupported => {
                ranged = false;
                break;
            }
        }
    }

    Ok(Some(InitialSupport {
        release: browser.releases[last_initial].clone(),
        ranged,
    }))
}
