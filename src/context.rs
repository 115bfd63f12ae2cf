//! The `Compat` context (spec §5): per-computation caches over one BCD tree, plus the
//! configuration knobs Design Notes asks to thread through explicitly rather than read
//! from ambient/global state.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use chrono::NaiveDate;

use crate::bcd::{Bcd, CompatRecord};
use crate::browser::{Browser, BrowserId};
use crate::error::{BaselineError, Result};

/// How to handle a feature's `__compat.support` map having no entry at all for a
/// browser that was queried. The default is a hard error; a caller that wants to
/// tolerate sparse BCD data can opt into treating it as `Unknown` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingBrowserPolicy {
    #[default]
    Error,
    TreatAsUnknown,
}

/// Threaded-through configuration for `compute_baseline`/`get_status`.
#[derive(Debug, Clone, Copy)]
pub struct ComputeOptions {
    pub missing_browser_support: MissingBrowserPolicy,
    /// The cutoff clock. Ordinarily `Bcd::cutoff_date()` (`__meta.timestamp`).
    pub cutoff: NaiveDate,
}

impl ComputeOptions {
    #[must_use]
    pub fn new(cutoff: NaiveDate) -> Self {
        ComputeOptions {
            missing_browser_support: MissingBrowserPolicy::default(),
            cutoff,
        }
    }

    #[must_use]
    pub fn with_missing_browser_policy(mut self, policy: MissingBrowserPolicy) -> Self {
        self.missing_browser_support = policy;
        self
    }
}

/// A per-computation context over one BCD tree. Caches [`Browser`] catalogs by
/// identifier so repeated lookups for the same browser within one computation reuse
/// the same built catalog, rather than re-sorting its release list on every query.
///
/// Not `Sync`: the cache is a `RefCell`, matching spec §5's "exclusive access" option
/// for the context's sharing contract. A caller that wants to fan Baseline computations
/// out across threads should give each thread its own `Compat` over the same `Bcd`.
pub struct Compat<'a> {
    bcd: &'a Bcd,
    browsers: RefCell<HashMap<BrowserId, Rc<Browser>>>,
}

impl<'a> Compat<'a> {
    #[must_use]
    pub fn new(bcd: &'a Bcd) -> Self {
        Compat {
            bcd,
            browsers: RefCell::new(HashMap::new()),
        }
    }

    /// The underlying BCD tree.
    #[must_use]
    pub fn bcd(&self) -> &'a Bcd {
        self.bcd
    }

    /// The browser catalog for `id`, built once and cached for the lifetime of this
    /// context. Repeated calls return the same `Rc`.
    pub fn browser(&self, id: BrowserId) -> Result<Rc<Browser>> {
        if let Some(cached) = self.browsers.borrow().get(&id) {
            return Ok(Rc::clone(cached));
        }
        let built = self
            .bcd
            .browser(id)
            .ok_or_else(|| BaselineError::UnknownBrowser(id.as_str().to_string()))?;
        let built = Rc::new(built);
        self.browsers.borrow_mut().insert(id, Rc::clone(&built));
        Ok(built)
    }

    /// The `__compat` record addressed by a dotted key. The tree itself is owned by
    /// `Bcd` for the whole computation, so every call already returns a reference to
    /// the same record — no separate cache is needed to satisfy the "same object"
    /// contract for features.
    pub fn compat_record(&self, key: &str) -> Result<&'a CompatRecord> {
        let node = self
            .bcd
            .tree
            .get_path(key)
            .ok_or_else(|| BaselineError::InvalidPath(key.to_string()))?;
        node.compat
            .as_ref()
            .ok_or_else(|| BaselineError::MissingCompatRecord(key.to_string()))
    }
}
