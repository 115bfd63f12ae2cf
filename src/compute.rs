//! Top-level operations (spec §4.8, §4.9): `computeBaseline` and `getStatus`.

use tracing::debug;

use crate::aggregate::{aggregate, SupportEntry, SupportMap};
use crate::ancestor::expand_ancestors;
use crate::browser::CORE_BROWSER_SET;
use crate::context::{Compat, ComputeOptions, MissingBrowserPolicy};
use crate::error::{BaselineError, Result};
use crate::initial_support::find_initial_support;
use crate::keystone::{keystone_date, keystone_date_to_status, BaselineStatus};

/// Which compat keys to aggregate, and whether to roll up their ancestors.
#[derive(Debug, Clone)]
pub struct FeatureSelector {
    pub compat_keys: Vec<String>,
    pub check_ancestors: bool,
}

impl FeatureSelector {
    #[must_use]
    pub fn single(compat_key: impl Into<String>, check_ancestors: bool) -> Self {
        FeatureSelector {
            compat_keys: vec![compat_key.into()],
            check_ancestors,
        }
    }
}

/// Resolve the core-set support map for one compat key.
fn support_map_for_key(
    compat: &Compat<'_>,
    key: &str,
    options: &ComputeOptions,
) -> Result<SupportMap> {
    let record = compat.compat_record(key)?;
    let mut map = SupportMap::new();
    for browser_id in CORE_BROWSER_SET {
        let browser = compat.browser(browser_id)?;
        match record.statements_for(browser_id) {
            Some(statements) => {
                let initial = find_initial_support(&browser, statements)?;
                map.insert(
                    browser_id,
                    match initial {
                        Some(is) => SupportEntry::Known(is),
                        None => SupportEntry::Unknown,
                    },
                );
            }
            None => match options.missing_browser_support {
                MissingBrowserPolicy::Error => {
                    return Err(BaselineError::MissingBrowserSupport {
                        feature: key.to_string(),
                        browser: browser_id.as_str().to_string(),
                    });
                }
                MissingBrowserPolicy::TreatAsUnknown => {
                    map.insert(browser_id, SupportEntry::Unknown);
                }
            },
        }
    }
    Ok(map)
}

/// Expand `selector`'s compat keys (with ancestors, if requested), resolve each one's
/// support across the core browser set, aggregate, and derive the final status.
pub fn compute_baseline(
    selector: &FeatureSelector,
    compat: &Compat<'_>,
    options: &ComputeOptions,
) -> Result<BaselineStatus> {
    let mut keys = Vec::new();
    for key in &selector.compat_keys {
        if selector.check_ancestors {
            let expanded = expand_ancestors(&compat.bcd().tree, key)?;
            debug!(key, ancestors = expanded.len(), "expanded ancestor chain");
            keys.extend(expanded);
        } else {
            compat.compat_record(key)?;
            keys.push(key.clone());
        }
    }

    let mut maps = Vec::with_capacity(keys.len());
    let mut discouraged = false;
    for key in &keys {
        let record = compat.compat_record(key)?;
        if record.deprecated() {
            debug!(key, "feature is discouraged; forcing baseline to false");
            discouraged = true;
        }
        maps.push(support_map_for_key(compat, key, options)?);
    }

    let aggregated = aggregate(&maps);
    let keystone = keystone_date(&aggregated, &CORE_BROWSER_SET);
    let label = keystone_date_to_status(keystone, options.cutoff, discouraged);

    Ok(BaselineStatus {
        label,
        discouraged,
        support: aggregated,
    })
}

/// Convenience for a single compat key with ancestor roll-up enabled. `feature_id` is
/// carried through only for diagnostics — lookup is entirely by `compat_key`, since
/// mapping compat keys to externally published feature ids is the feature-YAML
/// publishing concern spec.md places out of scope.
pub fn get_status(
    feature_id: &str,
    compat_key: &str,
    compat: &Compat<'_>,
    options: &ComputeOptions,
) -> Result<BaselineStatus> {
    debug!(feature_id, compat_key, "computing baseline status");
    let selector = FeatureSelector::single(compat_key, true);
    compute_baseline(&selector, compat, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bcd::Bcd;
    use crate::keystone::Baseline;
    use chrono::NaiveDate;

    fn bcd_with(json: serde_json::Value) -> Bcd {
        serde_json::from_value(json).unwrap()
    }

    fn core_browsers() -> serde_json::Value {
        serde_json::json!({
            "chrome": {"name": "Chrome", "releases": {
                "99": {"status": "retired", "release_date": "2021-01-01"},
                "100": {"status": "current", "release_date": "2022-01-01"}
            }},
            "chrome_android": {"name": "Chrome Android", "releases": {
                "100": {"status": "current", "release_date": "2022-01-01"}
            }},
            "edge": {"name": "Edge", "releases": {
                "100": {"status": "current", "release_date": "2022-01-01"}
            }},
            "firefox": {"name": "Firefox", "releases": {
                "120": {"status": "current", "release_date": "2022-01-01"}
            }},
            "firefox_android": {"name": "Firefox Android", "releases": {
                "120": {"status": "current", "release_date": "2022-01-01"}
            }},
            "safari": {"name": "Safari", "releases": {
                "16": {"status": "current", "release_date": "2022-01-01"}
            }},
            "safari_ios": {"name": "Safari iOS", "releases": {
                "16": {"status": "current", "release_date": "2022-01-01"}
            }}
        })
    }

    fn all_supported_since(version_by_browser: &[(&str, &str)]) -> serde_json::Value {
        let mut support = serde_json::Map::new();
        for (browser, version) in version_by_browser {
            support.insert(
                (*browser).to_string(),
                serde_json::json!({"version_added": version}),
            );
        }
        serde_json::Value::Object(support)
    }

    #[test]
    fn all_supported_feature_reaches_high_when_cutoff_is_far_enough() {
        let bcd = bcd_with(serde_json::json!({
            "__meta": {"timestamp": "2026-01-01T00:00:00Z"},
            "browsers": core_browsers(),
            "api": {
                "Widget": {
                    "__compat": {
                        "support": all_supported_since(&[
                            ("chrome", "100"),
                            ("chrome_android", "100"),
                            ("edge", "100"),
                            ("firefox", "120"),
                            ("firefox_android", "120"),
                            ("safari", "16"),
                            ("safari_ios", "16"),
                        ])
                    }
                }
            }
        }));
        let compat = Compat::new(&bcd);
        let options = ComputeOptions::new(bcd.cutoff_date());
        let status = get_status("widget", "api.Widget", &compat, &options).unwrap();
        assert_eq!(status.baseline(), Baseline::High);
        assert!(status.label.baseline_high_date.is_some());
    }

    #[test]
    fn cutoff_too_recent_stays_low() {
        let bcd = bcd_with(serde_json::json!({
            "__meta": {"timestamp": "2022-06-01T00:00:00Z"},
            "browsers": core_browsers(),
            "api": {
                "Widget": {
                    "__compat": {
                        "support": all_supported_since(&[
                            ("chrome", "100"),
                            ("chrome_android", "100"),
                            ("edge", "100"),
                            ("firefox", "120"),
                            ("firefox_android", "120"),
                            ("safari", "16"),
                            ("safari_ios", "16"),
                        ])
                    }
                }
            }
        }));
        let compat = Compat::new(&bcd);
        let options = ComputeOptions::new(NaiveDate::from_ymd_opt(2022, 6, 1).unwrap());
        let status = get_status("widget", "api.Widget", &compat, &options).unwrap();
        assert_eq!(status.baseline(), Baseline::Low);
        assert!(status.label.baseline_high_date.is_none());
    }

    #[test]
    fn never_supported_browser_yields_false_with_null_dates() {
        let mut support = all_supported_since(&[
            ("chrome", "100"),
            ("chrome_android", "100"),
            ("edge", "100"),
            ("firefox_android", "120"),
            ("safari", "16"),
            ("safari_ios", "16"),
        ]);
        support
            .as_object_mut()
            .unwrap()
            .insert("firefox".to_string(), serde_json::json!({"version_added": false}));

        let bcd = bcd_with(serde_json::json!({
            "__meta": {"timestamp": "2026-01-01T00:00:00Z"},
            "browsers": core_browsers(),
            "api": {"Widget": {"__compat": {"support": support}}}
        }));
        let compat = Compat::new(&bcd);
        let options = ComputeOptions::new(bcd.cutoff_date());
        let status = get_status("widget", "api.Widget", &compat, &options).unwrap();
        assert_eq!(status.baseline(), Baseline::False);
        assert!(status.label.baseline_low_date.is_none());
        assert!(status.label.baseline_high_date.is_none());
    }

    #[test]
    fn discouraged_feature_is_always_false() {
        let bcd = bcd_with(serde_json::json!({
            "__meta": {"timestamp": "2026-01-01T00:00:00Z"},
            "browsers": core_browsers(),
            "api": {
                "Widget": {
                    "__compat": {
                        "status": {"deprecated": true},
                        "support": all_supported_since(&[
                            ("chrome", "100"),
                            ("chrome_android", "100"),
                            ("edge", "100"),
                            ("firefox", "120"),
                            ("firefox_android", "120"),
                            ("safari", "16"),
                            ("safari_ios", "16"),
                        ])
                    }
                }
            }
        }));
        let compat = Compat::new(&bcd);
        let options = ComputeOptions::new(bcd.cutoff_date());
        let status = get_status("widget", "api.Widget", &compat, &options).unwrap();
        assert_eq!(status.baseline(), Baseline::False);
        assert!(status.discouraged);
    }

    #[test]
    fn ancestor_rollup_uses_the_later_component() {
        let mut browsers = core_browsers();
        browsers["chrome"] = serde_json::json!({
            "name": "Chrome",
            "releases": {
                "100": {"status": "retired", "release_date": "2022-01-01"},
                "125": {"status": "current", "release_date": "2024-01-01"}
            }
        });

        let bcd = bcd_with(serde_json::json!({
            "__meta": {"timestamp": "2026-01-01T00:00:00Z"},
            "browsers": browsers,
            "api": {
                "Foo": {
                    "__compat": {
                        "support": all_supported_since(&[
                            ("chrome", "125"),
                            ("chrome_android", "100"),
                            ("edge", "100"),
                            ("firefox", "120"),
                            ("firefox_android", "120"),
                            ("safari", "16"),
                            ("safari_ios", "16"),
                        ])
                    },
                    "bar": {
                        "__compat": {
                            "support": all_supported_since(&[
                                ("chrome", "100"),
                                ("chrome_android", "100"),
                                ("edge", "100"),
                                ("firefox", "120"),
                                ("firefox_android", "120"),
                                ("safari", "16"),
                                ("safari_ios", "16"),
                            ])
                        }
                    }
                }
            }
        }));

        let compat = Compat::new(&bcd);
        let options = ComputeOptions::new(bcd.cutoff_date());
        let status = get_status("foo.bar", "api.Foo.bar", &compat, &options).unwrap();
        match status.support.get(&crate::browser::BrowserId::Chrome) {
            Some(SupportEntry::Known(is)) => assert_eq!(is.release.version, "125"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
