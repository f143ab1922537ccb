//! The add-only conflict check (§4.5): `+group=name` must be a pure
//! addition, never a shadow of an existing selection.

use crate::error::ResolveError;
use crate::model::DefaultEntry;

/// Fails if any `is_add_only` entry's group already has an entry earlier in
/// `list`.
///
/// # Errors
///
/// Returns [`ResolveError::ConfigComposition`] naming the first conflicting
/// group found.
pub(crate) fn check_add_only_conflicts(list: &[DefaultEntry]) -> Result<(), ResolveError> {
    for (index, entry) in list.iter().enumerate() {
        if !entry.is_add_only {
            continue;
        }
        let Some(fqgn) = entry.fully_qualified_group_name() else {
            continue;
        };
        let prefix = list.get(..index).unwrap_or_default();
        let already_present = prefix
            .iter()
            .any(|earlier| earlier.fully_qualified_group_name().as_deref() == Some(fqgn.as_str()));
        if already_present {
            return Err(ResolveError::add_only_conflict(&fqgn, &entry.config_name));
        }
    }
    Ok(())
}
