//! The config repository contract (§4.7): an injected capability, not a
//! process-global. The resolver never locates, parses or caches documents
//! itself; it only ever asks its `&dyn ConfigRepository` for the document at
//! a path.

use std::fmt;

use crate::error::ResolveError;
use crate::model::DefaultEntry;

/// A document as loaded by the repository: its own embedded defaults list
/// plus the package declared in its header.
#[derive(Debug, Clone, Default)]
pub struct LoadedDocument {
    /// The document's own defaults list, in source order, not yet expanded.
    pub defaults_list: Vec<DefaultEntry>,
    /// The package declared in the document's header. Empty means
    /// "root/none".
    pub package: String,
}

/// One entry of a repository's search path, used only to format
/// [`crate::ResolveError::missing_config`] diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    /// The provider that contributed this entry, e.g. `"file"`,
    /// `"package"`, or the internal `"schema"` provider, which is never
    /// surfaced to users.
    pub provider: String,
    /// Human-readable description of where this source looks for configs.
    pub path: String,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Provider={}, path={}", self.provider, self.path)
    }
}

/// External collaborator that maps a config path to its loaded document.
///
/// Implementations are responsible for locating, parsing and (optionally)
/// caching documents; the resolver treats every call as authoritative and
/// does not memoize across calls itself, beyond what a single recursive
/// expansion needs to detect cycles (see [`crate::compute_element_defaults`]).
pub trait ConfigRepository {
    /// Loads the document at `config_path`.
    ///
    /// Returns `Ok(None)` iff the document cannot be located at all. Any
    /// other failure (malformed document, I/O error, …) should be reported
    /// through the `Err` variant so it propagates as a [`ResolveError`]
    /// rather than being mistaken for a missing config.
    ///
    /// # Errors
    ///
    /// Returns an error if the document exists but cannot be read or parsed.
    fn load_config(
        &self,
        config_path: &str,
        is_primary_config: bool,
    ) -> Result<Option<LoadedDocument>, ResolveError>;

    /// Lists the repository's search path, for diagnostics only.
    fn get_sources(&self) -> Vec<Source>;
}
