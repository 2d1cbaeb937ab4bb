//! Destination taxonomy tree and category matching.
//!
//! The storefront organizes products in a breadcrumb-style tree
//! (`Categories > Cosmetics > Hair Care > Combs`). The tree is declared in
//! `config/taxonomy.yaml` as a list of full root-to-leaf paths; a requested
//! category path is resolved by matching a contiguous *suffix* of segments,
//! not substring containment, so `Hair Care > Combs` matches the path above
//! while a lone middle segment does not.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// An ordered path of category names, root first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxonPath(pub Vec<String>);

impl TaxonPath {
    /// Parses a `>`-separated breadcrumb, trimming whitespace around segments.
    /// Empty segments are dropped.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        TaxonPath(
            input
                .split('>')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if this path's trailing segments equal `requested`
    /// in order. An empty request never matches.
    #[must_use]
    pub fn ends_with(&self, requested: &TaxonPath) -> bool {
        !requested.0.is_empty() && self.0.ends_with(&requested.0)
    }
}

impl std::fmt::Display for TaxonPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join(" > "))
    }
}

/// The full set of root-to-leaf paths available in the destination tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Taxonomy {
    pub taxons: Vec<TaxonPath>,
}

impl Taxonomy {
    /// Loads and validates the taxonomy from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` / `ConfigError::Yaml` for unreadable or
    /// unparsable files, and `ConfigError::InvalidTaxonomy` for empty paths,
    /// empty segments, or duplicate paths.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let taxonomy: Taxonomy =
            serde_yaml::from_str(&raw).map_err(|source| ConfigError::Yaml {
                path: path.to_path_buf(),
                source,
            })?;
        taxonomy.validate()?;
        Ok(taxonomy)
    }

    /// Validates structural invariants: no empty paths, no empty segments,
    /// no duplicate paths.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidTaxonomy` describing the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen: HashSet<&[String]> = HashSet::new();
        for taxon in &self.taxons {
            if taxon.0.is_empty() {
                return Err(ConfigError::InvalidTaxonomy(
                    "taxonomy contains an empty path".to_string(),
                ));
            }
            if taxon.0.iter().any(|s| s.trim().is_empty()) {
                return Err(ConfigError::InvalidTaxonomy(format!(
                    "path \"{taxon}\" contains an empty segment"
                )));
            }
            if !seen.insert(taxon.0.as_slice()) {
                return Err(ConfigError::InvalidTaxonomy(format!(
                    "duplicate path \"{taxon}\""
                )));
            }
        }
        Ok(())
    }

    /// Resolves a requested category path to a tree path whose trailing
    /// segments equal the request, in order.
    ///
    /// When several paths share the suffix, the first declared wins; the
    /// file order is the operator's priority order.
    #[must_use]
    pub fn resolve(&self, requested: &TaxonPath) -> Option<&TaxonPath> {
        self.taxons.iter().find(|t| t.ends_with(requested))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(segments: &[&str]) -> TaxonPath {
        TaxonPath(segments.iter().map(|s| (*s).to_string()).collect())
    }

    fn sample_taxonomy() -> Taxonomy {
        Taxonomy {
            taxons: vec![
                path(&["Categories", "Cosmetics", "Hair Care", "Combs"]),
                path(&["Categories", "Cosmetics", "Skin Care"]),
                path(&["Categories", "Home", "Kitchen", "Combs"]),
            ],
        }
    }

    #[test]
    fn parse_splits_on_angle_brackets_and_trims() {
        assert_eq!(
            TaxonPath::parse("Cosmetics > Hair Care>Combs"),
            path(&["Cosmetics", "Hair Care", "Combs"])
        );
    }

    #[test]
    fn parse_drops_empty_segments() {
        assert_eq!(TaxonPath::parse(" > Cosmetics > "), path(&["Cosmetics"]));
    }

    #[test]
    fn resolve_matches_contiguous_suffix() {
        let taxonomy = sample_taxonomy();
        let found = taxonomy
            .resolve(&path(&["Cosmetics", "Hair Care", "Combs"]))
            .expect("expected a match");
        assert_eq!(
            found,
            &path(&["Categories", "Cosmetics", "Hair Care", "Combs"])
        );
    }

    #[test]
    fn resolve_rejects_partial_middle_match() {
        // Only segment 2 of 3 appears in the second path; that must not match.
        let taxonomy = Taxonomy {
            taxons: vec![path(&["Categories", "Hair Care", "Brushes"])],
        };
        assert!(taxonomy
            .resolve(&path(&["Cosmetics", "Hair Care", "Combs"]))
            .is_none());
    }

    #[test]
    fn resolve_rejects_non_contiguous_segments() {
        let taxonomy = Taxonomy {
            taxons: vec![path(&["Cosmetics", "Travel", "Combs"])],
        };
        assert!(taxonomy.resolve(&path(&["Cosmetics", "Combs"])).is_none());
    }

    #[test]
    fn resolve_single_segment_matches_leaf() {
        let taxonomy = sample_taxonomy();
        let found = taxonomy
            .resolve(&path(&["Skin Care"]))
            .expect("expected a match");
        assert_eq!(found, &path(&["Categories", "Cosmetics", "Skin Care"]));
    }

    #[test]
    fn resolve_prefers_first_declared_on_ties() {
        let taxonomy = sample_taxonomy();
        // "Combs" is a leaf of both the cosmetics and the kitchen path.
        let found = taxonomy.resolve(&path(&["Combs"])).expect("match");
        assert_eq!(
            found,
            &path(&["Categories", "Cosmetics", "Hair Care", "Combs"])
        );
    }

    #[test]
    fn resolve_empty_request_matches_nothing() {
        let taxonomy = sample_taxonomy();
        assert!(taxonomy.resolve(&path(&[])).is_none());
    }

    #[test]
    fn validate_rejects_duplicate_paths() {
        let taxonomy = Taxonomy {
            taxons: vec![path(&["A", "B"]), path(&["A", "B"])],
        };
        let err = taxonomy.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidTaxonomy(ref reason) if reason.contains("duplicate")),
            "expected duplicate-path error, got: {err:?}"
        );
    }

    #[test]
    fn validate_rejects_empty_segment() {
        let taxonomy = Taxonomy {
            taxons: vec![path(&["A", " ", "B"])],
        };
        assert!(taxonomy.validate().is_err());
    }

    #[test]
    fn yaml_roundtrip() {
        let yaml = "taxons:\n  - [Categories, Cosmetics, Hair Care, Combs]\n  - [Categories, Home]\n";
        let taxonomy: Taxonomy = serde_yaml::from_str(yaml).expect("yaml parse failed");
        assert_eq!(taxonomy.taxons.len(), 2);
        assert_eq!(
            taxonomy.taxons[0],
            path(&["Categories", "Cosmetics", "Hair Care", "Combs"])
        );
        taxonomy.validate().expect("sample must validate");
    }
}
