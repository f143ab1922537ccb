//! Hierarchical defaults-list resolver for layered configuration
//! composition.
//!
//! A user authors named configuration documents, each of which may declare a
//! defaults list of other documents it depends on. Documents are grouped
//! into named config groups; within a group, exactly one member is
//! selected. This crate resolves one or more root entries plus a stream of
//! user-supplied overrides into a flat, ordered, deduplicated list of fully
//! qualified selections for a downstream merger to load and combine.
//!
//! The crate does not interpret document bodies, perform value-level
//! merging, locate documents on disk, or parse override strings — those are
//! the responsibility of the [`ConfigRepository`] implementation a caller
//! supplies, and of code upstream of [`override_adapter`].
//!
//! # Examples
//!
//! ```
//! use defaults_resolver::{
//!     ConfigRepository, DefaultEntry, LoadedDocument, ResolveError, Source,
//!     compute_element_defaults,
//! };
//!
//! struct InMemoryRepo(std::collections::HashMap<&'static str, LoadedDocument>);
//!
//! impl ConfigRepository for InMemoryRepo {
//!     fn load_config(
//!         &self,
//!         config_path: &str,
//!         _is_primary_config: bool,
//!     ) -> Result<Option<LoadedDocument>, ResolveError> {
//!         Ok(self.0.get(config_path).cloned())
//!     }
//!
//!     fn get_sources(&self) -> Vec<Source> {
//!         Vec::new()
//!     }
//! }
//!
//! let mut docs = std::collections::HashMap::new();
//! docs.insert(
//!     "no_defaults",
//!     LoadedDocument { defaults_list: Vec::new(), package: String::new() },
//! );
//! let repo = InMemoryRepo(docs);
//!
//! let resolved = compute_element_defaults(&DefaultEntry::new("no_defaults"), &repo)?;
//! assert_eq!(resolved, vec![DefaultEntry::new("no_defaults")]);
//! # Ok::<(), ResolveError>(())
//! ```

mod add_only;
mod dedup;
mod error;
mod expand;
mod group_choice;
mod model;
pub mod override_adapter;
mod rename;
mod repo;

use std::collections::HashSet;

pub use error::ResolveError;
pub use model::{DefaultEntry, KEEP_MARKER, SELF_MARKER};
pub use override_adapter::{ParsedOverride, override_to_default_entry};
pub use repo::{ConfigRepository, LoadedDocument, Source};

use group_choice::GroupChoiceTable;

/// Resolves a single root element (typically the primary config) into its
/// flattened, deduplicated defaults list.
///
/// # Errors
///
/// Returns a [`ResolveError`] if a non-optional document can't be located,
/// or if the defaults list violates a composition rule (duplicate/dangling
/// `_self_`, an unmatched package rename, an add-only collision, or a
/// cyclic document graph).
pub fn compute_element_defaults(
    element: &DefaultEntry,
    repo: &dyn ConfigRepository,
) -> Result<Vec<DefaultEntry>, ResolveError> {
    let mut group_to_choice = GroupChoiceTable::new();
    let mut in_progress = HashSet::new();
    let provisional = expand::expand_element(element, &mut group_to_choice, repo, &mut in_progress)?;
    finish(provisional)
}

/// Resolves a pre-built defaults list (typically
/// `[primary_root, ...overrides_converted_to_entries]`).
///
/// Before recursing, seeds the group-choice table by scanning `defaults` in
/// reverse so that the last textual override for a group pins its name
/// (§4.1's last-override-wins rule).
///
/// # Errors
///
/// See [`compute_element_defaults`].
pub fn expand_defaults(
    self_name: Option<&str>,
    defaults: &[DefaultEntry],
    repo: &dyn ConfigRepository,
) -> Result<Vec<DefaultEntry>, ResolveError> {
    let mut group_to_choice = GroupChoiceTable::new();
    group_to_choice.seed_from_overrides(defaults);
    let mut in_progress = HashSet::new();
    let provisional = expand::expand_kernel(self_name, defaults, &mut group_to_choice, repo, &mut in_progress)?;
    finish(provisional)
}

/// Applies the rename pass, the add-conflict check, and finally
/// deduplication to a provisional expansion (§2's data-flow, §4.4–§4.6).
fn finish(provisional: Vec<DefaultEntry>) -> Result<Vec<DefaultEntry>, ResolveError> {
    let renamed = rename::apply_renames(provisional)?;
    add_only::check_add_only_conflicts(&renamed)?;
    Ok(dedup::dedup(renamed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, anyhow, ensure};
    use std::collections::HashMap;

    struct MapRepo(HashMap<&'static str, LoadedDocument>);

    impl ConfigRepository for MapRepo {
        fn load_config(
            &self,
            config_path: &str,
            _is_primary_config: bool,
        ) -> Result<Option<LoadedDocument>, ResolveError> {
            Ok(self.0.get(config_path).cloned())
        }

        fn get_sources(&self) -> Vec<Source> {
            Vec::new()
        }
    }

    fn doc(defaults: Vec<DefaultEntry>) -> LoadedDocument {
        LoadedDocument {
            defaults_list: defaults,
            package: String::new(),
        }
    }

    /// E1 — no defaults.
    #[test]
    fn e1_no_defaults() -> Result<()> {
        let mut docs = HashMap::new();
        docs.insert("no_defaults", doc(Vec::new()));
        let repo = MapRepo(docs);

        let result = compute_element_defaults(&DefaultEntry::new("no_defaults"), &repo)?;
        ensure!(result == vec![DefaultEntry::new("no_defaults")]);
        Ok(())
    }

    /// E2 — duplicate self.
    #[test]
    fn e2_duplicate_self() -> Result<()> {
        let mut docs = HashMap::new();
        docs.insert(
            "duplicate_self",
            doc(vec![
                DefaultEntry::new(SELF_MARKER),
                DefaultEntry::new(SELF_MARKER),
            ]),
        );
        let repo = MapRepo(docs);

        let Err(err) = compute_element_defaults(&DefaultEntry::new("duplicate_self"), &repo)
        else {
            return Err(anyhow!("expected a duplicate _self_ error"));
        };
        ensure!(err.to_string() == "Duplicate _self_ defined in duplicate_self");
        Ok(())
    }

    /// E3 — trailing self.
    #[test]
    fn e3_trailing_self() -> Result<()> {
        let mut docs = HashMap::new();
        docs.insert("no_defaults", doc(Vec::new()));
        docs.insert(
            "trailing_self",
            doc(vec![
                DefaultEntry::new("no_defaults"),
                DefaultEntry::new(SELF_MARKER),
            ]),
        );
        let repo = MapRepo(docs);

        let result = compute_element_defaults(&DefaultEntry::new("trailing_self"), &repo)?;
        ensure!(
            result
                == vec![
                    DefaultEntry::new("no_defaults"),
                    DefaultEntry::new("trailing_self"),
                ]
        );
        Ok(())
    }

    /// E4 — grouped recursion with package propagation.
    #[test]
    fn e4_grouped_recursion_with_package_propagation() -> Result<()> {
        let mut docs = HashMap::new();
        docs.insert(
            "a/a2",
            LoadedDocument {
                defaults_list: vec![DefaultEntry::grouped("b", "b1")],
                package: "a".to_string(),
            },
        );
        docs.insert(
            "b/b1",
            LoadedDocument {
                defaults_list: Vec::new(),
                package: "b".to_string(),
            },
        );
        let repo = MapRepo(docs);

        let result = compute_element_defaults(&DefaultEntry::grouped("a", "a2"), &repo)?;

        let mut expected_a2 = DefaultEntry::grouped("a", "a2");
        expected_a2.package = Some("a".to_string());
        let mut expected_b1 = DefaultEntry::grouped("b", "b1");
        expected_b1.package = Some("b".to_string());
        ensure!(result == vec![expected_a2, expected_b1]);
        Ok(())
    }

    /// E5 — override wins.
    #[test]
    fn e5_override_wins() -> Result<()> {
        let mut docs = HashMap::new();
        docs.insert("a/a6", doc(Vec::new()));
        docs.insert("a/a1", doc(Vec::new()));
        docs.insert("c/c1", doc(Vec::new()));
        docs.insert(
            "test_overrides",
            doc(vec![
                DefaultEntry::grouped("a", "a1"),
                {
                    let mut with_pkg = DefaultEntry::grouped("a", "a1");
                    with_pkg.package = Some("pkg".to_string());
                    with_pkg
                },
                DefaultEntry::grouped("c", "c1"),
            ]),
        );
        let repo = MapRepo(docs);

        let defaults = vec![
            DefaultEntry::new("test_overrides"),
            DefaultEntry::grouped("a", "a6"),
        ];
        let result = expand_defaults(None, &defaults, &repo)?;

        let mut expected_pkg_a1 = DefaultEntry::grouped("a", "a1");
        expected_pkg_a1.package = Some("pkg".to_string());
        ensure!(
            result
                == vec![
                    DefaultEntry::new("test_overrides"),
                    DefaultEntry::grouped("a", "a6"),
                    expected_pkg_a1,
                    DefaultEntry::grouped("c", "c1"),
                ]
        );
        Ok(())
    }

    /// Generalizes E5 to more than two competing overrides for the same
    /// group: only the textually-last one should win.
    #[test]
    fn last_of_several_overrides_for_a_group_wins() -> Result<()> {
        let mut docs = HashMap::new();
        docs.insert("a/a1", doc(Vec::new()));
        docs.insert("a/a2", doc(Vec::new()));
        docs.insert("a/a3", doc(Vec::new()));
        docs.insert("a/a4", doc(Vec::new()));
        let repo = MapRepo(docs);

        let defaults = vec![
            DefaultEntry::grouped("a", "a1"),
            DefaultEntry::grouped("a", "a2"),
            DefaultEntry::grouped("a", "a3"),
            DefaultEntry::grouped("a", "a4"),
        ];
        let result = expand_defaults(None, &defaults, &repo)?;

        ensure!(result == vec![DefaultEntry::grouped("a", "a4")]);
        Ok(())
    }

    /// E6 — package rename.
    #[test]
    fn e6_package_rename() -> Result<()> {
        let mut docs = HashMap::new();
        docs.insert(
            "rename/r2",
            doc(vec![
                DefaultEntry {
                    config_group: Some("b".to_string()),
                    config_name: "b1".to_string(),
                    package: Some("p1".to_string()),
                    package2: Some("pkg2".to_string()),
                    ..DefaultEntry::default()
                },
                {
                    let mut b1 = DefaultEntry::grouped("b", "b1");
                    b1.package = Some("p1".to_string());
                    b1
                },
            ]),
        );
        docs.insert("b/b1", doc(Vec::new()));
        let repo = MapRepo(docs);

        let result = compute_element_defaults(&DefaultEntry::grouped("rename", "r2"), &repo)?;

        let mut expected_r2 = DefaultEntry::grouped("rename", "r2");
        expected_r2.package = None;
        let mut expected_b1 = DefaultEntry::grouped("b", "b1");
        expected_b1.package = Some("pkg2".to_string());
        ensure!(result == vec![expected_r2, expected_b1]);
        Ok(())
    }

    #[test]
    fn optional_missing_config_contributes_nothing() -> Result<()> {
        let repo = MapRepo(HashMap::new());
        let mut element = DefaultEntry::grouped("maybe", "absent");
        element.optional = true;

        let result = compute_element_defaults(&element, &repo)?;
        let mut expected = element;
        expected.optional = false;
        ensure!(result == vec![expected]);
        Ok(())
    }

    #[test]
    fn non_optional_missing_config_fails() -> Result<()> {
        let repo = MapRepo(HashMap::new());
        let element = DefaultEntry::grouped("required", "absent");

        let Err(err) = compute_element_defaults(&element, &repo) else {
            return Err(anyhow!("expected a missing-config error"));
        };
        ensure!(err.to_string().contains("Cannot find config"));
        Ok(())
    }

    #[test]
    fn dedup_totality_holds_across_a_diamond_dependency() -> Result<()> {
        let mut docs = HashMap::new();
        docs.insert(
            "root",
            doc(vec![
                DefaultEntry::grouped("left", "l1"),
                DefaultEntry::grouped("right", "r1"),
            ]),
        );
        docs.insert("left/l1", doc(vec![DefaultEntry::grouped("shared", "s1")]));
        docs.insert("right/r1", doc(vec![DefaultEntry::grouped("shared", "s2")]));
        docs.insert("shared/s1", doc(Vec::new()));
        docs.insert("shared/s2", doc(Vec::new()));
        let repo = MapRepo(docs);

        let result = compute_element_defaults(&DefaultEntry::new("root"), &repo)?;
        let shared_entries = result
            .iter()
            .filter(|entry| entry.config_group.as_deref() == Some("shared"))
            .count();
        ensure!(shared_entries == 1);
        Ok(())
    }
}
