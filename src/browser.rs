//! Release Catalog (spec §4.2) and the core browser-set data model (spec §3).

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{BaselineError, Result};
use crate::version::compare_version_strings;

/// Identifier for one of the seven browsers in the Baseline core set.
///
/// The order of [`CORE_BROWSER_SET`] is part of the public surface: callers iterate it,
/// and the aggregated support map serializes browsers in this order rather than
/// whatever order a hash map happens to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrowserId {
    Chrome,
    ChromeAndroid,
    Edge,
    Firefox,
    FirefoxAndroid,
    Safari,
    SafariIos,
}

impl BrowserId {
    /// The BCD key for this browser, e.g. `"chrome_android"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            BrowserId::Chrome => "chrome",
            BrowserId::ChromeAndroid => "chrome_android",
            BrowserId::Edge => "edge",
            BrowserId::Firefox => "firefox",
            BrowserId::FirefoxAndroid => "firefox_android",
            BrowserId::Safari => "safari",
            BrowserId::SafariIos => "safari_ios",
        }
    }

    /// Parse a BCD browser key, if it names a core-set browser. Returns `None` for any
    /// other browser in the BCD tree (e.g. `ie`, `opera`, `nodejs`) — those are outside
    /// the Baseline core set and never participate in the computation.
    #[must_use]
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "chrome" => Some(BrowserId::Chrome),
            "chrome_android" => Some(BrowserId::ChromeAndroid),
            "edge" => Some(BrowserId::Edge),
            "firefox" => Some(BrowserId::Firefox),
            "firefox_android" => Some(BrowserId::FirefoxAndroid),
            "safari" => Some(BrowserId::Safari),
            "safari_ios" => Some(BrowserId::SafariIos),
            _ => None,
        }
    }
}

/// The fixed seven-browser quorum used as the Baseline core set, in the order callers
/// should iterate it.
pub const CORE_BROWSER_SET: [BrowserId; 7] = [
    BrowserId::Chrome,
    BrowserId::ChromeAndroid,
    BrowserId::Edge,
    BrowserId::Firefox,
    BrowserId::FirefoxAndroid,
    BrowserId::Safari,
    BrowserId::SafariIos,
];

/// Lifecycle status of one release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseStatus {
    Retired,
    Current,
    Beta,
    Nightly,
    Planned,
}

impl ReleaseStatus {
    /// `true` for `beta`, `nightly`, and `planned`.
    #[must_use]
    pub fn is_prerelease(self) -> bool {
        matches!(
            self,
            ReleaseStatus::Beta | ReleaseStatus::Nightly | ReleaseStatus::Planned
        )
    }
}

/// One release of one browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub browser: BrowserId,
    pub version: String,
    pub release_date: Option<NaiveDate>,
    pub status: ReleaseStatus,
    /// Position in the browser's ordered release list. Releases compare by index
    /// rather than re-parsing the version string every time.
    pub index: usize,
}

impl Release {
    /// Error out unless `self` belongs to `browser`.
    pub fn check_browser(&self, browser: &Browser) -> Result<()> {
        if self.browser == browser.id {
            Ok(())
        } else {
            Err(BaselineError::BrowserReleaseMismatch {
                release: self.version.clone(),
                expected: browser.id.as_str().to_string(),
                actual: self.browser.as_str().to_string(),
            })
        }
    }
}

/// Raw per-release fields as they appear in `browsers.<id>.releases.<version>`.
#[derive(Debug, Clone)]
pub struct RawRelease {
    pub status: ReleaseStatus,
    pub release_date: Option<NaiveDate>,
}

/// One browser and its ordered release history.
#[derive(Debug, Clone)]
pub struct Browser {
    pub id: BrowserId,
    pub name: String,
    pub releases: Vec<Release>,
}

impl Browser {
    /// Build a catalog entry from the raw `releases` map, sorting ascending by version
    /// and assigning each release its zero-based index. Appends a synthetic `preview`
    /// release with status `nightly` when `preview_name` is given.
    pub fn from_raw(
        id: BrowserId,
        name: String,
        raw_releases: BTreeMap<String, RawRelease>,
        preview_name: Option<String>,
    ) -> Self {
        let mut versions: Vec<&String> = raw_releases.keys().collect();
        versions.sort_by(|a, b| compare_version_strings(a, b));

        let mut releases: Vec<Release> = versions
            .into_iter()
            .enumerate()
            .map(|(index, version)| {
                let raw = &raw_releases[version];
                Release {
                    browser: id,
                    version: version.clone(),
                    release_date: raw.release_date,
                    status: raw.status,
                    index,
                }
            })
            .collect();

        if let Some(preview) = preview_name {
            let index = releases.len();
            releases.push(Release {
                browser: id,
                version: preview,
                release_date: None,
                status: ReleaseStatus::Nightly,
                index,
            });
        }

        Browser { id, name, releases }
    }

    /// The unique release with status `current`. Fatal if absent.
    pub fn current(&self) -> Result<&Release> {
        self.releases
            .iter()
            .find(|r| r.status == ReleaseStatus::Current)
            .ok_or_else(|| BaselineError::NoCurrentRelease(self.id.as_str().to_string()))
    }

    /// Look up a release by its exact, unnormalized version string.
    pub fn resolve_version(&self, version: &str) -> Result<&Release> {
        self.releases
            .iter()
            .find(|r| r.version == version)
            .ok_or_else(|| BaselineError::UnknownVersion {
                browser: self.id.as_str().to_string(),
                version: version.to_string(),
            })
    }
}

/// `index >= start.index && (end.is_none() || index < end.index)` — inclusive lower
/// bound, exclusive upper bound.
#[must_use]
pub fn in_range(index: usize, start: &Release, end: Option<&Release>) -> bool {
    index >= start.index && end.is_none_or(|e| index < e.index)
}
