//! The recursive expander (§4.2) and the expansion kernel (§4.3): the
//! algorithmic heart of the resolver.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::error::ResolveError;
use crate::group_choice::GroupChoiceTable;
use crate::model::{DefaultEntry, KEEP_MARKER};
use crate::repo::ConfigRepository;

/// Per-entry dispatch state (§4.8): which of the four dispositions an entry
/// has, chosen once from its attributes.
enum Disposition {
    SelfMarker,
    Rename,
    Add,
    Normal,
}

fn classify(entry: &DefaultEntry) -> Disposition {
    if entry.is_self() {
        Disposition::SelfMarker
    } else if entry.is_package_rename() {
        Disposition::Rename
    } else if entry.is_add_only {
        Disposition::Add
    } else {
        Disposition::Normal
    }
}

/// Loads and expands a single element (§4.2): load its document, normalize
/// its embedded `_self_`, and recurse into the expansion kernel.
pub(crate) fn expand_element(
    element: &DefaultEntry,
    group_to_choice: &mut GroupChoiceTable,
    repo: &dyn ConfigRepository,
    in_progress: &mut HashSet<String>,
) -> Result<Vec<DefaultEntry>, ResolveError> {
    let config_path = element.config_path();
    trace!(config_path = %config_path, "expanding element");

    if !in_progress.insert(config_path.clone()) {
        return Err(ResolveError::cyclic_defaults(&config_path));
    }
    let result = expand_element_inner(element, &config_path, group_to_choice, repo, in_progress);
    in_progress.remove(&config_path);
    result
}

fn expand_element_inner(
    element: &DefaultEntry,
    config_path: &str,
    group_to_choice: &mut GroupChoiceTable,
    repo: &dyn ConfigRepository,
    in_progress: &mut HashSet<String>,
) -> Result<Vec<DefaultEntry>, ResolveError> {
    let loaded = repo.load_config(config_path, false)?;

    let (mut defaults, effective_package) = match loaded {
        Some(document) => {
            let package = element.package.clone().or_else(|| {
                if document.package.is_empty() {
                    None
                } else {
                    Some(document.package)
                }
            });
            (document.defaults_list, package)
        }
        None if element.optional => {
            debug!(config_path, "optional config not found, skipping");
            (Vec::new(), element.package.clone())
        }
        None => return Err(ResolveError::missing_config(repo, config_path, true)),
    };

    normalize_self(&mut defaults, element, &effective_package, config_path)?;

    expand_kernel(
        Some(element.config_name.as_str()),
        &defaults,
        group_to_choice,
        repo,
        in_progress,
    )
}

/// Ensures the loaded defaults list carries exactly one `_self_` entry,
/// rewritten to the enclosing element's group and resolved package (the
/// entry's own package, falling back to the loaded document's declared
/// package per the Data Model's `package` field semantics), inserting an
/// implicit one at the front if none was present (§4.2 steps 2–3).
fn normalize_self(
    defaults: &mut Vec<DefaultEntry>,
    element: &DefaultEntry,
    effective_package: &Option<String>,
    config_path: &str,
) -> Result<(), ResolveError> {
    let mut found = false;
    for entry in defaults.iter_mut() {
        if entry.config_name != crate::model::SELF_MARKER {
            continue;
        }
        if found {
            return Err(ResolveError::duplicate_self(config_path));
        }
        if entry.config_group.is_some() {
            return Err(ResolveError::self_requires_no_group(config_path));
        }
        found = true;
        entry.config_group = element.config_group.clone();
        entry.package.clone_from(effective_package);
    }

    if !found {
        let implicit = DefaultEntry {
            config_group: element.config_group.clone(),
            config_name: crate::model::SELF_MARKER.to_string(),
            package: effective_package.clone(),
            ..DefaultEntry::default()
        };
        defaults.insert(0, implicit);
    }

    Ok(())
}

/// The expansion kernel (§4.3): walks `defaults` in reverse so that the
/// textually-last mention of a group is seen first and pins the group's
/// choice for every earlier mention (last-override-wins for *which* member
/// is chosen; first-occurrence order is restored by the final reverse).
pub(crate) fn expand_kernel(
    self_name: Option<&str>,
    defaults: &[DefaultEntry],
    group_to_choice: &mut GroupChoiceTable,
    repo: &dyn ConfigRepository,
    in_progress: &mut HashSet<String>,
) -> Result<Vec<DefaultEntry>, ResolveError> {
    let mut sublists: Vec<Vec<DefaultEntry>> = Vec::with_capacity(defaults.len());

    for entry in defaults.iter().rev() {
        let sublist = match classify(entry) {
            Disposition::SelfMarker => {
                let Some(self_name) = self_name else {
                    return Err(ResolveError::dangling_self());
                };
                vec![resolve_self(entry, self_name, group_to_choice)]
            }
            Disposition::Rename | Disposition::Add => vec![entry.clone()],
            Disposition::Normal => {
                let resolved = resolve_group_override(entry, group_to_choice);
                expand_element(&resolved, group_to_choice, repo, in_progress)?
            }
        };

        record_group_choices(&sublist, group_to_choice);
        sublists.push(sublist);
    }

    sublists.reverse();
    Ok(sublists.into_iter().flatten().collect())
}

fn resolve_self(
    entry: &DefaultEntry,
    self_name: &str,
    group_to_choice: &GroupChoiceTable,
) -> DefaultEntry {
    let mut resolved = entry.clone();
    resolved.config_name = entry
        .fully_qualified_group_name()
        .and_then(|fqgn| group_to_choice.get(&fqgn).map(str::to_string))
        .unwrap_or_else(|| self_name.to_string());
    resolved
}

fn resolve_group_override(
    entry: &DefaultEntry,
    group_to_choice: &GroupChoiceTable,
) -> DefaultEntry {
    let Some(fqgn) = entry.fully_qualified_group_name() else {
        return entry.clone();
    };
    let mut resolved = entry.clone();
    if let Some(choice) = group_to_choice.get(&fqgn) {
        resolved.config_name = choice.to_string();
    }
    resolved
}

/// After a sublist is emitted, walk it in reverse and register every
/// grouped entry's choice unless it carries the [`KEEP_MARKER`] (§4.3).
fn record_group_choices(sublist: &[DefaultEntry], group_to_choice: &mut GroupChoiceTable) {
    for entry in sublist.iter().rev() {
        if entry.config_name == KEEP_MARKER {
            continue;
        }
        if let Some(fqgn) = entry.fully_qualified_group_name() {
            group_to_choice.record_if_absent(fqgn, entry.config_name.clone());
        }
    }
}
