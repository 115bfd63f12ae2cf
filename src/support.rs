//! Support Statement Resolver (spec §4.3).

use crate::bcd::{SupportStatement, VersionValue};
use crate::browser::{in_range, Browser, Release};
use crate::error::Result;

/// The non-plain caveats on a support statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Qualifications {
    pub prefix: bool,
    pub alternative_name: bool,
    pub flags: bool,
    pub partial_implementation: bool,
}

impl Qualifications {
    /// `true` iff none of the four caveats are present.
    #[must_use]
    pub fn is_plain(self) -> bool {
        !self.prefix && !self.alternative_name && !self.flags && !self.partial_implementation
    }

    fn from_statement(stmt: &SupportStatement) -> Self {
        Qualifications {
            prefix: stmt.prefix.is_some(),
            alternative_name: stmt.alternative_name.is_some(),
            flags: stmt.flags.as_ref().is_some_and(|f| !f.is_empty()),
            partial_implementation: stmt.partial_implementation.unwrap_or(false),
        }
    }
}

/// The tri-state outcome of resolving one statement against one release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportOutcome {
    Unsupported,
    Supported(Qualifications),
    Unknown,
}

/// Resolve one `version_added`/`version_removed` pair against `release`, per the four
/// cases of spec §4.3.
pub fn resolve_statement(
    stmt: &SupportStatement,
    browser: &Browser,
    release: &Release,
) -> Result<SupportOutcome> {
    release.check_browser(browser)?;

    let va = match &stmt.version_added {
        VersionValue::Never => return Ok(SupportOutcome::Unsupported),
        VersionValue::Value(v) => v,
    };
    let quals = Qualifications::from_statement(stmt);

    match &stmt.version_removed {
        Some(VersionValue::Value(vr)) if vr.ranged => {
            // Cases 2 and 3: version_removed is ranged.
            let start = browser.resolve_version(&va.raw)?;
            let removed_at = browser.resolve_version(&vr.raw)?;

            if release.index == start.index {
                Ok(SupportOutcome::Supported(quals))
            } else if release.index >= removed_at.index {
                Ok(SupportOutcome::Unsupported)
            } else if va.ranged {
                // Case 2: version_added is also ranged — the gap before `start` is
                // unknown, not unsupported.
                Ok(SupportOutcome::Unknown)
            } else if release.index < start.index {
                // Case 3: version_added is exact, so anything before it is a definite
                // Unsupported, not Unknown.
                Ok(SupportOutcome::Unsupported)
            } else {
                Ok(SupportOutcome::Unknown)
            }
        }
        other => {
            // Case 4: version_removed is absent, or an exact (non-ranged) version.
            let start = browser.resolve_version(&va.raw)?;
            let end = match other {
                Some(VersionValue::Value(vr)) => Some(browser.resolve_version(&vr.raw)?),
                Some(VersionValue::Never) | None => None,
            };

            if in_range(release.index, start, end) {
                Ok(SupportOutcome::Supported(quals))
            } else if va.ranged && release.index < start.index {
                Ok(SupportOutcome::Unknown)
            } else {
                Ok(SupportOutcome::Unsupported)
            }
        }
    }
}

/// The feature-level collapse of every statement recorded for a (feature, browser)
/// pair, evaluated at one release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureOutcome {
    SupportedPlain,
    Unknown,
    Unsupported,
}

/// Collapse every statement for a browser into one [`FeatureOutcome`] at `release`:
/// plain support wins if any statement reports it; otherwise unknown wins if any
/// statement is ambiguous; otherwise unsupported.
pub fn classify_release(
    statements: &[SupportStatement],
    browser: &Browser,
    release: &Release,
) -> Result<FeatureOutcome> {
    let mut saw_unknown = false;
    for stmt in statements {
        match resolve_statement(stmt, browser, release)? {
            SupportOutcome::Supported(quals) if quals.is_plain() => {
                return Ok(FeatureOutcome::SupportedPlain);
            }
            SupportOutcome::Unknown => saw_unknown = true,
            SupportOutcome::Supported(_) | SupportOutcome::Unsupported => {}
        }
    }
    Ok(if saw_unknown {
        FeatureOutcome::Unknown
    } else {
        FeatureOutcome::Unsupported
    })
}
