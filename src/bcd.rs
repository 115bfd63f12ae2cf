//! Wire format: the raw BCD JSON tree (spec §6) and its deserialization into the types
//! the rest of the crate operates on.
//!
//! This module only models the *shape* of BCD. It performs no I/O — turning a file or
//! package into bytes is an ingestion concern left to the caller, who hands this module
//! a `&str` or `serde_json::Value` it already has in memory.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};

use crate::browser::{Browser, BrowserId, RawRelease, ReleaseStatus};
use crate::error::Result;
use crate::version::Version;

/// `version_added` / `version_removed`: never supported/removed, or a version value
/// that may itself be ranged (`≤V`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionValue {
    Never,
    Value(Version),
}

impl<'de> Deserialize<'de> for VersionValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct VersionValueVisitor;

        impl<'de> Visitor<'de> for VersionValueVisitor {
            type Value = VersionValue;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("`false` or a version string")
            }

            fn visit_bool<E>(self, v: bool) -> std::result::Result<VersionValue, E>
            where
                E: de::Error,
            {
                if v {
                    Err(E::custom("version_added/version_removed: `true` is not a valid BCD value"))
                } else {
                    Ok(VersionValue::Never)
                }
            }

            fn visit_str<E>(self, v: &str) -> std::result::Result<VersionValue, E>
            where
                E: de::Error,
            {
                Ok(VersionValue::Value(Version::parse(v)))
            }

            fn visit_string<E>(self, v: String) -> std::result::Result<VersionValue, E>
            where
                E: de::Error,
            {
                Ok(VersionValue::Value(Version::parse(&v)))
            }
        }

        deserializer.deserialize_any(VersionValueVisitor)
    }
}

/// One raw support statement for a (feature, browser) pair.
#[derive(Debug, Clone, Deserialize)]
pub struct SupportStatement {
    pub version_added: VersionValue,
    #[serde(default)]
    pub version_removed: Option<VersionValue>,
    #[serde(default)]
    pub flags: Option<Vec<String>>,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub alternative_name: Option<String>,
    #[serde(default)]
    pub partial_implementation: Option<bool>,
}

/// A BCD `support` entry: either a single statement or a list of them.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawSupport {
    Single(SupportStatement),
    Multiple(Vec<SupportStatement>),
}

impl RawSupport {
    /// The statements as a slice, regardless of whether BCD recorded one or many.
    #[must_use]
    pub fn statements(&self) -> &[SupportStatement] {
        match self {
            RawSupport::Single(stmt) => std::slice::from_ref(stmt),
            RawSupport::Multiple(stmts) => stmts,
        }
    }
}

/// `status.deprecated` on a `__compat` record.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FeatureStatus {
    #[serde(default)]
    pub deprecated: bool,
}

/// A `__compat` record: per-browser support plus the deprecated flag.
#[derive(Debug, Clone, Deserialize)]
pub struct CompatRecord {
    pub support: HashMap<String, RawSupport>,
    #[serde(default)]
    pub status: Option<FeatureStatus>,
}

impl CompatRecord {
    #[must_use]
    pub fn deprecated(&self) -> bool {
        self.status.as_ref().is_some_and(|s| s.deprecated)
    }

    /// Statements recorded for a core-set browser, if BCD has an entry for it.
    #[must_use]
    pub fn statements_for(&self, browser: BrowserId) -> Option<&[SupportStatement]> {
        self.support.get(browser.as_str()).map(RawSupport::statements)
    }
}

/// One node of the compat tree: an optional `__compat` record plus arbitrarily many
/// named children.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CompatNode {
    #[serde(rename = "__compat")]
    pub compat: Option<CompatRecord>,
    #[serde(flatten)]
    pub children: HashMap<String, CompatNode>,
}

impl CompatNode {
    /// Walk a dotted path (`a.b.c`) down the tree, returning the terminal node.
    pub fn get_path(&self, path: &str) -> Option<&CompatNode> {
        let mut node = self;
        for segment in path.split('.') {
            node = node.children.get(segment)?;
        }
        Some(node)
    }
}

/// `browsers.<id>` — name, releases, and an optional preview channel name.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBrowserNode {
    pub name: String,
    pub releases: BTreeMap<String, RawReleaseNode>,
    #[serde(default)]
    pub preview_name: Option<String>,
}

/// `browsers.<id>.releases.<version>`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawReleaseNode {
    pub status: ReleaseStatus,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
}

/// `__meta` — the clock BCD was generated at.
#[derive(Debug, Clone, Deserialize)]
pub struct Meta {
    pub timestamp: DateTime<Utc>,
}

/// The full BCD tree: feature categories, the browser catalog, and the generation
/// timestamp used as the default cutoff clock.
#[derive(Debug, Clone, Deserialize)]
pub struct Bcd {
    pub browsers: HashMap<String, RawBrowserNode>,
    #[serde(rename = "__meta")]
    pub meta: Meta,
    #[serde(flatten)]
    pub tree: CompatNode,
}

impl Bcd {
    /// Parse a BCD JSON document already in memory.
    pub fn from_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Parse a BCD document from an already-decoded `serde_json::Value`.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// The cutoff clock: `__meta.timestamp` projected to a UTC plain date.
    #[must_use]
    pub fn cutoff_date(&self) -> NaiveDate {
        self.meta.timestamp.date_naive()
    }

    /// Build the [`Browser`] catalog for a core-set browser, if BCD carries it.
    #[must_use]
    pub fn browser(&self, id: BrowserId) -> Option<Browser> {
        let raw = self.browsers.get(id.as_str())?;
        let releases = raw
            .releases
            .iter()
            .map(|(version, node)| {
                (
                    version.clone(),
                    RawRelease {
                        status: node.status,
                        release_date: node.release_date,
                    },
                )
            })
            .collect();
        Some(Browser::from_raw(
            id,
            raw.name.clone(),
            releases,
            raw.preview_name.clone(),
        ))
    }
}
