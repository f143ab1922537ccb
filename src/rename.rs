//! The package-rename post-pass (§4.4): applied once, after expansion, so
//! renames see every entry the expansion produced.

use crate::error::ResolveError;
use crate::model::DefaultEntry;

/// Applies every package-rename directive in `list`, rightmost first, and
/// strips the directives from the output.
///
/// Each iteration removes exactly one rename directive and never
/// reintroduces one (a rename's subject package is never itself a rename),
/// so this terminates within `list.len()` iterations (§4.8, §9).
///
/// # Errors
///
/// Returns [`ResolveError::ConfigComposition`] if a rename directive has no
/// matching `group@package` entry left in the list.
pub(crate) fn apply_renames(mut list: Vec<DefaultEntry>) -> Result<Vec<DefaultEntry>, ResolveError> {
    loop {
        let Some(index) = list.iter().rposition(DefaultEntry::is_package_rename) else {
            return Ok(list);
        };

        let rename = list.remove(index);
        let source_package = rename.package.clone();
        let subject_package = rename.subject_package().map(str::to_string);

        let mut matched = false;
        for entry in &mut list {
            if entry.config_group == rename.config_group && entry.package == source_package {
                entry.package.clone_from(&subject_package);
                matched = true;
            }
        }

        if !matched {
            return Err(ResolveError::rename_no_match(
                rename.config_group.as_deref(),
                source_package.as_deref(),
            ));
        }
    }
}
