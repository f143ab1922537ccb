//! The deduplication pass (§4.6): first occurrence per FQGN wins.

use std::collections::HashSet;

use crate::model::DefaultEntry;

/// Keeps every groupless entry, and the first occurrence of every grouped
/// entry's FQGN, in forward order.
pub(crate) fn dedup(list: Vec<DefaultEntry>) -> Vec<DefaultEntry> {
    let mut seen = HashSet::new();
    list.into_iter()
        .filter(|entry| match entry.fully_qualified_group_name() {
            Some(fqgn) => seen.insert(fqgn),
            None => true,
        })
        .collect()
}
