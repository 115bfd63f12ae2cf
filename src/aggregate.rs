//! Aggregator / Collater (spec §4.6).

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::browser::BrowserId;
use crate::initial_support::InitialSupport;

/// One browser's entry in a [`SupportMap`]. `Unknown` means "we queried this browser
/// but couldn't identify a supporting release" — distinct from the browser simply not
/// being a key in the map at all (not queried).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupportEntry {
    Known(InitialSupport),
    Unknown,
}

/// Per-browser initial support for one feature (or one aggregation of features).
pub type SupportMap = HashMap<BrowserId, SupportEntry>;

/// Combine several per-key support maps into one: a browser's aggregate entry is
/// `Unknown` if any input map said `Unknown` for it, otherwise the most-recent
/// [`InitialSupport`] among the inputs that had one (higher release index wins; ties
/// go to the non-ranged value, since an exact version is strictly more recent than a
/// `≤V` one).
#[must_use]
pub fn aggregate(maps: &[SupportMap]) -> SupportMap {
    let mut browsers: HashSet<BrowserId> = HashSet::new();
    for map in maps {
        browsers.extend(map.keys().copied());
    }

    let mut result = SupportMap::new();
    for browser in browsers {
        let entries: Vec<&SupportEntry> = maps.iter().filter_map(|m| m.get(&browser)).collect();
        let any_unknown = entries.iter().any(|e| matches!(e, SupportEntry::Unknown));
        if any_unknown {
            result.insert(browser, SupportEntry::Unknown);
            continue;
        }
        let best = entries
            .into_iter()
            .filter_map(|e| match e {
                SupportEntry::Known(is) => Some(is),
                SupportEntry::Unknown => None,
            })
            .max_by(|a, b| compare_recency(a, b));
        if let Some(is) = best {
            result.insert(browser, SupportEntry::Known(is.clone()));
        }
    }
    result
}

fn compare_recency(a: &InitialSupport, b: &InitialSupport) -> Ordering {
    match a.release.index.cmp(&b.release.index) {
        Ordering::Equal => (!a.ranged).cmp(&(!b.ranged)),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::{BrowserId, Release, ReleaseStatus};

    fn initial(version: &str, index: usize, ranged: bool) -> InitialSupport {
        InitialSupport {
            release: Release {
                browser: BrowserId::Chrome,
                version: version.to_string(),
                release_date: None,
                status: ReleaseStatus::Retired,
                index,
            },
            ranged,
        }
    }

    #[test]
    fn idempotent_for_a_single_map() {
        let mut map = SupportMap::new();
        map.insert(BrowserId::Chrome, SupportEntry::Known(initial("100", 5, false)));
        map.insert(BrowserId::Firefox, SupportEntry::Unknown);
        let aggregated = aggregate(std::slice::from_ref(&map));
        assert_eq!(aggregated, map);
    }

    #[test]
    fn any_unknown_wins() {
        let mut a = SupportMap::new();
        a.insert(BrowserId::Chrome, SupportEntry::Known(initial("100", 5, false)));
        let mut b = SupportMap::new();
        b.insert(BrowserId::Chrome, SupportEntry::Unknown);
        let aggregated = aggregate(&[a, b]);
        assert_eq!(aggregated.get(&BrowserId::Chrome), Some(&SupportEntry::Unknown));
    }

    #[test]
    fn higher_release_index_wins() {
        let mut a = SupportMap::new();
        a.insert(BrowserId::Chrome, SupportEntry::Known(initial("100", 5, false)));
        let mut b = SupportMap::new();
        b.insert(BrowserId::Chrome, SupportEntry::Known(initial("125", 8, false)));
        let aggregated = aggregate(&[a, b]);
        match aggregated.get(&BrowserId::Chrome) {
            Some(SupportEntry::Known(is)) => assert_eq!(is.release.version, "125"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn exact_beats_ranged_on_tied_index() {
        let mut a = SupportMap::new();
        a.insert(BrowserId::Chrome, SupportEntry::Known(initial("100", 5, true)));
        let mut b = SupportMap::new();
        b.insert(BrowserId::Chrome, SupportEntry::Known(initial("100", 5, false)));
        let aggregated = aggregate(&[a, b]);
        match aggregated.get(&BrowserId::Chrome) {
            Some(SupportEntry::Known(is)) => assert!(!is.ranged),
            other => panic!("unexpected {other:?}"),
        }
    }
}
