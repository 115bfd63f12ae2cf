//! Keystone & Status Deriver (spec §4.7).

use std::cmp::Ordering;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::aggregate::{SupportEntry, SupportMap};
use crate::browser::BrowserId;
use crate::date::{add_thirty_months, format_ranged_date, RangedDate};
use chrono::NaiveDate;

/// The tri-valued Baseline label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Baseline {
    False,
    Low,
    High,
}

impl Serialize for Baseline {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Baseline::False => serializer.serialize_bool(false),
            Baseline::Low => serializer.serialize_str("low"),
            Baseline::High => serializer.serialize_str("high"),
        }
    }
}

/// The result of [`keystone_date_to_status`]: the label and its two dates, with no
/// per-browser support map attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaselineLabel {
    pub baseline: Baseline,
    pub baseline_low_date: Option<RangedDate>,
    pub baseline_high_date: Option<RangedDate>,
}

impl Serialize for BaselineLabel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut fields = 1;
        if self.baseline_low_date.is_some() {
            fields += 1;
        }
        if self.baseline_high_date.is_some() {
            fields += 1;
        }
        let mut map = serializer.serialize_map(Some(fields))?;
        map.serialize_entry("baseline", &self.baseline)?;
        if let Some(low) = self.baseline_low_date {
            map.serialize_entry("baseline_low_date", &format_ranged_date(low))?;
        }
        if let Some(high) = self.baseline_high_date {
            map.serialize_entry("baseline_high_date", &format_ranged_date(high))?;
        }
        map.end()
    }
}

/// The full computed status for one feature: the label plus the per-browser support
/// map and the discouraged flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaselineStatus {
    pub label: BaselineLabel,
    pub discouraged: bool,
    pub support: SupportMap,
}

impl BaselineStatus {
    #[must_use]
    pub fn baseline(&self) -> Baseline {
        self.label.baseline
    }
}

impl Serialize for BaselineStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let known: std::collections::BTreeMap<&'static str, String> = crate::browser::CORE_BROWSER_SET
            .into_iter()
            .filter_map(|id| match self.support.get(&id) {
                Some(SupportEntry::Known(is)) => Some((id.as_str(), is.text())),
                _ => None,
            })
            .collect();

        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("baseline", &self.label.baseline)?;
        if let Some(low) = self.label.baseline_low_date {
            map.serialize_entry("baseline_low_date", &format_ranged_date(low))?;
        }
        if let Some(high) = self.label.baseline_high_date {
            map.serialize_entry("baseline_high_date", &format_ranged_date(high))?;
        }
        map.serialize_entry("support", &known)?;
        map.end()
    }
}

/// The latest initial-support date across the core browser set, or `None` if any
/// browser is `Unknown` or missing a release date.
#[must_use]
pub fn keystone_date(support: &SupportMap, core_set: &[BrowserId]) -> Option<RangedDate> {
    let mut candidates = Vec::with_capacity(core_set.len());
    for browser in core_set {
        match support.get(browser) {
            Some(SupportEntry::Known(is)) => {
                let date = is.release.release_date?;
                candidates.push(RangedDate {
                    date,
                    ranged: is.ranged,
                });
            }
            _ => return None,
        }
    }
    candidates.into_iter().max_by(|a, b| match a.date.cmp(&b.date) {
        Ordering::Equal => (!a.ranged).cmp(&(!b.ranged)),
        other => other,
    })
}

/// Map a keystone date, a cutoff clock, and a discouraged flag into the final Baseline
/// label (spec §4.7 status mapping).
#[must_use]
pub fn keystone_date_to_status(
    keystone: Option<RangedDate>,
    cutoff: NaiveDate,
    discouraged: bool,
) -> BaselineLabel {
    let Some(keystone) = (if discouraged { None } else { keystone }) else {
        return BaselineLabel {
            baseline: Baseline::False,
            baseline_low_date: None,
            baseline_high_date: None,
        };
    };

    let high_candidate = add_thirty_months(keystone.date);
    if high_candidate <= cutoff {
        BaselineLabel {
            baseline: Baseline::High,
            baseline_low_date: Some(keystone),
            baseline_high_date: Some(RangedDate {
                date: high_candidate,
                ranged: keystone.ranged,
            }),
        }
    } else {
        BaselineLabel {
            baseline: Baseline::Low,
            baseline_low_date: Some(keystone),
            baseline_high_date: None,
        }
    }
}
