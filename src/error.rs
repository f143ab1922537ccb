//! Errors produced while resolving a defaults list.

use thiserror::Error;

use crate::repo::ConfigRepository;

/// Errors that can occur while resolving a hierarchical defaults list.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ResolveError {
    /// A non-optional config could not be located.
    #[error("{message}")]
    MissingConfig {
        /// The config path that could not be loaded.
        path: String,
        /// Fully formatted diagnostic, including the search path when requested.
        message: String,
    },

    /// A structural violation of the defaults-list composition rules:
    /// duplicate `_self_`, dangling `_self_`, a rename with no match, or an
    /// add-only collision.
    #[error("{0}")]
    ConfigComposition(String),
}

impl ResolveError {
    /// Builds a [`ResolveError::MissingConfig`], optionally describing the
    /// repository's search path (entries whose provider is `"schema"` are
    /// suppressed, mirroring internal-only sources that aren't user-facing).
    #[must_use]
    pub fn missing_config(
        repo: &dyn ConfigRepository,
        config_path: &str,
        with_search_path: bool,
    ) -> Self {
        let base = format!(
            "Cannot find config : {config_path}, check that it's in your config search path"
        );
        let message = if with_search_path {
            let lines: Vec<String> = repo
                .get_sources()
                .iter()
                .filter(|source| source.provider != "schema")
                .map(|source| format!("\t{source}"))
                .collect();
            format!("{base}\nSearch path:\n{}", lines.join("\n"))
        } else {
            base
        };
        Self::MissingConfig {
            path: config_path.to_string(),
            message,
        }
    }

    pub(crate) fn duplicate_self(config_path: &str) -> Self {
        Self::ConfigComposition(format!("Duplicate _self_ defined in {config_path}"))
    }

    pub(crate) fn self_requires_no_group(config_path: &str) -> Self {
        Self::ConfigComposition(format!(
            "_self_ in {config_path} must not declare a config_group"
        ))
    }

    pub(crate) fn dangling_self() -> Self {
        Self::ConfigComposition(
            "_self_ used without an enclosing element to resolve it against".to_string(),
        )
    }

    pub(crate) fn cyclic_defaults(config_path: &str) -> Self {
        Self::ConfigComposition(format!(
            "Cyclic defaults list detected: '{config_path}' depends on itself"
        ))
    }

    pub(crate) fn rename_no_match(group: Option<&str>, package: Option<&str>) -> Self {
        let group = group.unwrap_or_default();
        let package = package.unwrap_or_default();
        Self::ConfigComposition(format!(
            "Could not rename package. No match for '{group}@{package}' in the defaults list"
        ))
    }

    pub(crate) fn add_only_conflict(fqgn: &str, config_name: &str) -> Self {
        Self::ConfigComposition(format!(
            "Could not add '{fqgn}={config_name}'. '{fqgn}' is already in the defaults list."
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::Source;
    use anyhow::{Result, anyhow, ensure};

    struct StubRepo(Vec<Source>);

    impl ConfigRepository for StubRepo {
        fn load_config(
            &self,
            _config_path: &str,
            _is_primary_config: bool,
        ) -> Result<Option<crate::repo::LoadedDocument>, ResolveError> {
            Ok(None)
        }

        fn get_sources(&self) -> Vec<Source> {
            self.0.clone()
        }
    }

    #[test]
    fn missing_config_filters_schema_sources_and_lists_the_rest() -> Result<()> {
        let repo = StubRepo(vec![
            Source {
                provider: "schema".to_string(),
                path: "pkg://schema".to_string(),
            },
            Source {
                provider: "file".to_string(),
                path: "/etc/app/conf.d".to_string(),
            },
        ]);
        let err = ResolveError::missing_config(&repo, "db/postgres", true);
        let ResolveError::MissingConfig { message, .. } = &err else {
            return Err(anyhow!("expected MissingConfig"));
        };
        ensure!(message.contains("Cannot find config : db/postgres"));
        ensure!(message.contains("/etc/app/conf.d"));
        ensure!(!message.contains("pkg://schema"));
        Ok(())
    }

    #[test]
    fn duplicate_self_message_matches_the_pinned_wording() -> Result<()> {
        let err = ResolveError::duplicate_self("duplicate_self");
        ensure!(err.to_string() == "Duplicate _self_ defined in duplicate_self");
        Ok(())
    }

    #[test]
    fn add_only_conflict_message_matches_the_pinned_wording() -> Result<()> {
        let err = ResolveError::add_only_conflict("c", "c1");
        ensure!(err.to_string() == "Could not add 'c=c1'. 'c' is already in the defaults list.");
        Ok(())
    }

    #[test]
    fn rename_no_match_message_matches_the_pinned_wording() -> Result<()> {
        let err = ResolveError::rename_no_match(Some("b"), Some("p1"));
        ensure!(
            err.to_string()
                == "Could not rename package. No match for 'b@p1' in the defaults list"
        );
        Ok(())
    }
}
