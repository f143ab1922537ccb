//! The [`DefaultEntry`] value type and the notions derived from it.

use std::fmt;

/// Sentinel `config_name` marking "insert the enclosing document here".
pub const SELF_MARKER: &str = "_self_";

/// Sentinel `config_name` marking "do not claim this group in the
/// group-choice table".
pub const KEEP_MARKER: &str = "_keep_";

/// A single entry in a defaults list.
///
/// `DefaultEntry` values are immutable templates as loaded from a document;
/// the resolver clones an entry before mutating its `config_name` or
/// `package` so that the document's own embedded list is never altered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DefaultEntry {
    /// Config group this entry belongs to, e.g. `"db"` or `"db/driver"`.
    /// Absent for a free-standing document reference.
    pub config_group: Option<String>,
    /// Document name within the group, or the reserved sentinel
    /// [`SELF_MARKER`].
    pub config_name: String,
    /// Target package. Absent means the loaded document's declared package
    /// applies.
    pub package: Option<String>,
    /// Rename target. Presence turns this entry into a package-rename
    /// directive rather than a selection.
    pub package2: Option<String>,
    /// A missing document is silently dropped rather than raising.
    pub optional: bool,
    /// Demands that no other entry already occupy this entry's group.
    pub is_add_only: bool,
    /// Distinguishes user-supplied entries from document-embedded ones;
    /// affects only diagnostics.
    pub from_override: bool,
}

impl DefaultEntry {
    /// Builds a free-standing (groupless) entry for `config_name`.
    #[must_use]
    pub fn new(config_name: impl Into<String>) -> Self {
        Self {
            config_name: config_name.into(),
            ..Self::default()
        }
    }

    /// Builds a grouped selection entry.
    #[must_use]
    pub fn grouped(config_group: impl Into<String>, config_name: impl Into<String>) -> Self {
        Self {
            config_group: Some(config_group.into()),
            config_name: config_name.into(),
            ..Self::default()
        }
    }

    /// `"{group}/{name}"` when a group is present, else just `name`.
    #[must_use]
    pub fn config_path(&self) -> String {
        match &self.config_group {
            Some(group) => format!("{group}/{}", self.config_name),
            None => self.config_name.clone(),
        }
    }

    /// `"{group}@{package}"` when both a group and a package are set,
    /// `"{group}"` when only the group is set, and `None` for a
    /// free-standing document (no group to track a choice for).
    #[must_use]
    pub fn fully_qualified_group_name(&self) -> Option<String> {
        let group = self.config_group.as_ref()?;
        Some(match &self.package {
            Some(package) => format!("{group}@{package}"),
            None => group.clone(),
        })
    }

    /// `package2` if present, else `package`: the package a rename
    /// directive writes, or the package a selection otherwise occupies.
    #[must_use]
    pub fn subject_package(&self) -> Option<&str> {
        self.package2.as_deref().or(self.package.as_deref())
    }

    /// Whether this entry is the `_self_` placeholder.
    #[must_use]
    pub fn is_self(&self) -> bool {
        self.config_name == SELF_MARKER
    }

    /// Whether this entry is a package-rename directive.
    #[must_use]
    pub fn is_package_rename(&self) -> bool {
        self.package2.is_some()
    }
}

impl fmt::Display for DefaultEntry {
    /// Renders the entry the way the override grammar (`spec.md` §6) would
    /// write it: `group@package=name`, `@package=name`, `group=name`, or a
    /// bare `name`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.config_group, &self.package) {
            (None, None) => write!(f, "{}", self.config_name),
            (None, Some(package)) => write!(f, "@{package}={}", self.config_name),
            (Some(group), None) => write!(f, "{group}={}", self.config_name),
            (Some(group), Some(package)) => {
                write!(f, "{group}@{package}={}", self.config_name)
            }
        }
    }
}
