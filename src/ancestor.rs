//! Ancestor Expansion (spec §4.5).

use crate::bcd::CompatNode;
use crate::error::{BaselineError, Result};

/// Expand a dotted compat key `p1.p2…pn` into the prefixes `p1.p2`, `p1.p2.p3`, …, `p`
/// that carry their own `__compat` record, root to leaf. `p1` alone is never yielded —
/// it's always a top-level category, never a feature. Fails if `key` doesn't exist in
/// the tree at all.
pub fn expand_ancestors(tree: &CompatNode, key: &str) -> Result<Vec<String>> {
    if tree.get_path(key).is_none() {
        return Err(BaselineError::InvalidPath(key.to_string()));
    }

    let segments: Vec<&str> = key.split('.').collect();
    let mut expanded = Vec::new();
    for end in 2..=segments.len() {
        let prefix = segments[..end].join(".");
        if let Some(node) = tree.get_path(&prefix) {
            if node.compat.is_some() {
                expanded.push(prefix);
            }
        }
    }
    Ok(expanded)
}
