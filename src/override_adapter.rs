//! Converts a parsed command-line override into a [`DefaultEntry`] (§6).
//!
//! The override grammar itself — tokenizing `group@p1:p2=value`,
//! `+group=value`, `~group` and so on — is upstream of this crate and out of
//! scope (`spec.md` §1). This module only covers the small, fully
//! determined last step: turning an already-parsed override record into the
//! `DefaultEntry` the resolver consumes.
//!
//! Deletion overrides (`~group` / `~group=value`) are intentionally not
//! modeled here; the parser/facade must remove matching entries from the
//! defaults list before it ever reaches this resolver (`spec.md` §9).

use crate::model::DefaultEntry;

/// An override record as produced by the (out-of-scope) override parser.
#[derive(Debug, Clone, Default)]
pub struct ParsedOverride {
    /// The group (or bare key) the override targets.
    pub key_or_group: String,
    /// The selected document name.
    pub value: String,
    /// `p1` in the `group@p1:p2=value` grammar: the package the selection
    /// occupies, or the rename's source package.
    pub pkg1: Option<String>,
    /// `p2` in the `group@p1:p2=value` grammar: present only for a package
    /// rename, naming the rename's target package.
    pub pkg2: Option<String>,
    /// Set for a `+group=value` addition.
    pub is_add: bool,
}

/// Converts a parsed override into the [`DefaultEntry`] the resolver
/// expects, per the grammar table in `spec.md` §6.
#[must_use]
pub fn override_to_default_entry(parsed: &ParsedOverride) -> DefaultEntry {
    DefaultEntry {
        config_group: Some(parsed.key_or_group.clone()),
        config_name: parsed.value.clone(),
        package: parsed.pkg1.clone(),
        package2: parsed.pkg2.clone(),
        optional: false,
        is_add_only: parsed.is_add,
        from_override: true,
    }
}
