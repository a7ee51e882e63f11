use super::descriptor::{GroupDescriptor, GroupId};
use crate::core::pattern::PatternError;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

const JOBACK_CATALOG: &str = include_str!("../../../data/joback_catalog.toml");

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum CatalogError {
    #[error("Group {group} has no patterns")]
    EmptyPatterns { group: GroupId },
    #[error("Group id {group} appears more than once")]
    DuplicateId { group: GroupId },
    #[error("Pattern {pattern} of group {group} is invalid: {source}")]
    InvalidPattern {
        group: GroupId,
        pattern: usize,
        source: PatternError,
    },
}

#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid catalog in '{path}': {source}")]
    Invalid { path: String, source: CatalogError },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    group: Vec<GroupDescriptor>,
}

/// An ordered, validated collection of group descriptors.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    groups: Vec<GroupDescriptor>,
}

impl Catalog {
    pub fn new(groups: Vec<GroupDescriptor>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for group in &groups {
            if group.patterns.is_empty() {
                return Err(CatalogError::EmptyPatterns { group: group.id });
            }
            if !seen.insert(group.id) {
                return Err(CatalogError::DuplicateId { group: group.id });
            }
            for (i, pattern) in group.patterns.iter().enumerate() {
                pattern
                    .validate()
                    .map_err(|source| CatalogError::InvalidPattern {
                        group: group.id,
                        pattern: i,
                        source,
                    })?;
            }
        }
        Ok(Self { groups })
    }

    pub fn load(path: &Path) -> Result<Self, CatalogLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::parse(&content, &path.to_string_lossy())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, CatalogLoadError> {
        Self::parse(content, "<string>")
    }

    /// The 41 Joback groups, as SMARTS-equivalent structural queries.
    pub fn joback() -> Result<Self, CatalogLoadError> {
        Self::parse(JOBACK_CATALOG, "<embedded joback catalog>")
    }

    fn parse(content: &str, origin: &str) -> Result<Self, CatalogLoadError> {
        let file: CatalogFile = toml::from_str(content).map_err(|e| CatalogLoadError::Toml {
            path: origin.to_string(),
            source: e,
        })?;
        Self::new(file.group).map_err(|e| CatalogLoadError::Invalid {
            path: origin.to_string(),
            source: e,
        })
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn groups(&self) -> &[GroupDescriptor] {
        &self.groups
    }

    pub fn iter(&self) -> impl Iterator<Item = &GroupDescriptor> {
        self.groups.iter()
    }

    pub fn get(&self, id: GroupId) -> Option<&GroupDescriptor> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn position(&self, id: GroupId) -> Option<usize> {
        self.groups.iter().position(|g| g.id == id)
    }

    /// Descriptor positions by descending priority; equal priorities keep catalog order.
    pub fn priority_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.groups.len()).collect();
        order.sort_by_key(|&i| std::cmp::Reverse(self.groups[i].priority));
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::descriptor::HydrogenPolicy;
    use crate::core::models::element::Element;
    use crate::core::pattern::query::{QueryAtom, QueryPattern};
    use std::fs;
    use tempfile::tempdir;

    fn carbon_group(id: u32, priority: i32) -> GroupDescriptor {
        GroupDescriptor::new(
            id,
            "carbon",
            vec![QueryPattern::single(QueryAtom::element(Element::C))],
        )
        .with_priority(priority)
    }

    #[test]
    fn new_rejects_group_without_patterns() {
        let result = Catalog::new(vec![GroupDescriptor::new(1, "empty", vec![])]);
        assert_eq!(
            result,
            Err(CatalogError::EmptyPatterns { group: GroupId(1) })
        );
    }

    #[test]
    fn new_rejects_duplicate_ids() {
        let result = Catalog::new(vec![carbon_group(1, 0), carbon_group(1, 2)]);
        assert_eq!(result, Err(CatalogError::DuplicateId { group: GroupId(1) }));
    }

    #[test]
    fn new_rejects_malformed_patterns() {
        let group = GroupDescriptor::new(4, "broken", vec![QueryPattern::default()]);
        assert!(matches!(
            Catalog::new(vec![group]),
            Err(CatalogError::InvalidPattern {
                pattern: 0,
                source: PatternError::Empty,
                ..
            })
        ));
    }

    #[test]
    fn priority_order_is_descending_and_stable() {
        let catalog = Catalog::new(vec![
            carbon_group(1, 0),
            carbon_group(2, 5),
            carbon_group(3, 0),
            carbon_group(4, 5),
        ])
        .unwrap();
        assert_eq!(catalog.priority_order(), vec![1, 3, 0, 2]);
    }

    #[test]
    fn get_and_position_look_up_by_id() {
        let catalog = Catalog::new(vec![carbon_group(10, 0), carbon_group(20, 0)]).unwrap();
        assert_eq!(catalog.position(GroupId(20)), Some(1));
        assert_eq!(catalog.get(GroupId(10)).map(|g| g.id), Some(GroupId(10)));
        assert!(catalog.get(GroupId(30)).is_none());
    }

    #[test]
    fn load_succeeds_with_valid_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("catalog.toml");
        fs::write(
            &file_path,
            r#"
            [[group]]
            id = 1
            name = "Methyl"
            symbol = "-CH3"
            priority = 2
            hydrogens = 3

            [[group.patterns]]
            atoms = [{ element = "C", aromatic = false, connectivity = 4, hydrogens = 3 }]

            [[group]]
            id = 2
            name = "Hydroxyl"
            hydrogens = 1
            hydrogen-policy = "fixed"

            [[group.patterns]]
            atoms = [{ element = "O", hydrogens = 1 }]
            "#,
        )
        .unwrap();

        let catalog = Catalog::load(&file_path).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.groups()[0].symbol, "-CH3");
        assert_eq!(catalog.groups()[1].hydrogen_policy, HydrogenPolicy::Fixed);
    }

    #[test]
    fn load_fails_for_missing_file() {
        let result = Catalog::load(Path::new("non_existent_catalog.toml"));
        assert!(matches!(result, Err(CatalogLoadError::Io { .. })));
    }

    #[test]
    fn load_fails_for_malformed_toml() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("bad.toml");
        fs::write(&file_path, "[[group]]\nid = \"one\"").unwrap();
        assert!(matches!(
            Catalog::load(&file_path),
            Err(CatalogLoadError::Toml { .. })
        ));
    }

    #[test]
    fn from_toml_str_reports_invalid_catalog() {
        let result = Catalog::from_toml_str("[[group]]\nid = 1\nname = \"x\"\npatterns = []");
        assert!(matches!(
            result,
            Err(CatalogLoadError::Invalid {
                source: CatalogError::EmptyPatterns { .. },
                ..
            })
        ));
    }

    #[test]
    fn embedded_joback_catalog_has_all_groups_in_order() {
        let catalog = Catalog::joback().unwrap();
        assert_eq!(catalog.len(), 41);
        let ids: Vec<u32> = catalog.iter().map(|g| g.id.0).collect();
        assert_eq!(ids, (1..=41).collect::<Vec<_>>());
        assert_eq!(catalog.groups()[0].symbol, "-CH3");
        assert_eq!(catalog.groups()[23].symbol, ">C=O (nonring)");
        assert_eq!(catalog.groups()[40].symbol, "-S- (ring)");
    }
}
