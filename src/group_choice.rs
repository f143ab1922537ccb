//! The group-choice table: FQGN → winning `config_name`, as expansion
//! proceeds. First write wins; callers are responsible for visiting entries
//! in the order that makes "first write" mean "last override" (§4.1, §4.3).

use std::collections::HashMap;

use crate::model::DefaultEntry;

/// Tracks the winning `config_name` per fully qualified group name
/// encountered so far during a single resolver invocation.
#[derive(Debug, Default)]
pub(crate) struct GroupChoiceTable(HashMap<String, String>);

impl GroupChoiceTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn get(&self, fqgn: &str) -> Option<&str> {
        self.0.get(fqgn).map(String::as_str)
    }

    /// Records `fqgn -> config_name` only if `fqgn` has no recorded choice
    /// yet.
    pub(crate) fn record_if_absent(&mut self, fqgn: String, config_name: String) {
        self.0.entry(fqgn).or_insert(config_name);
    }

    /// Seeds the table from a defaults list scanned in reverse: the last
    /// textual mention of a group is seen first and pins the choice,
    /// implementing last-override-wins (§4.1).
    pub(crate) fn seed_from_overrides(&mut self, defaults: &[DefaultEntry]) {
        for entry in defaults.iter().rev() {
            if let Some(fqgn) = entry.fully_qualified_group_name() {
                self.record_if_absent(fqgn, entry.config_name.clone());
            }
        }
    }
}
