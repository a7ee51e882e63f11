use crate::core::pattern::query::QueryPattern;
use serde::Deserialize;
use std::fmt;

/// Stable identifier of a structural group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub u32);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for GroupId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Where the hydrogen count of an accepted occurrence comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HydrogenPolicy {
    /// Sum the hydrogens attached to the matched atoms.
    #[default]
    FromMatch,
    /// Use the descriptor's nominal hydrogen count.
    Fixed,
}

/// A structural group: its patterns, priority and nominal composition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct GroupDescriptor {
    pub id: GroupId,
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    /// Pattern variants whose matches are unioned.
    pub patterns: Vec<QueryPattern>,
    /// Higher priorities claim atoms first.
    #[serde(default)]
    pub priority: i32,
    /// Hydrogens in the group's nominal composition.
    #[serde(default)]
    pub hydrogens: u32,
    #[serde(default)]
    pub hydrogen_policy: HydrogenPolicy,
}

impl GroupDescriptor {
    pub fn new(id: impl Into<GroupId>, name: &str, patterns: Vec<QueryPattern>) -> Self {
        Self {
            id: id.into(),
            name: name.to_string(),
            symbol: String::new(),
            patterns,
            priority: 0,
            hydrogens: 0,
            hydrogen_policy: HydrogenPolicy::FromMatch,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_hydrogens(mut self, hydrogens: u32, policy: HydrogenPolicy) -> Self {
        self.hydrogens = hydrogens;
        self.hydrogen_policy = policy;
        self
    }

    pub fn with_symbol(mut self, symbol: &str) -> Self {
        self.symbol = symbol.to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::element::Element;
    use crate::core::pattern::query::QueryAtom;

    #[test]
    fn group_id_displays_inner_value() {
        assert_eq!(GroupId(24).to_string(), "24");
        assert!(GroupId(1) < GroupId(2));
    }

    #[test]
    fn builder_methods_set_fields() {
        let group = GroupDescriptor::new(
            7,
            "Hydroxyl",
            vec![QueryPattern::single(QueryAtom::aliphatic(Element::O))],
        )
        .with_priority(3)
        .with_hydrogens(1, HydrogenPolicy::Fixed)
        .with_symbol("-OH");
        assert_eq!(group.id, GroupId(7));
        assert_eq!(group.priority, 3);
        assert_eq!(group.hydrogens, 1);
        assert_eq!(group.hydrogen_policy, HydrogenPolicy::Fixed);
        assert_eq!(group.symbol, "-OH");
    }

    #[test]
    fn deserializes_with_defaults() {
        let text = r#"
            id = 3
            name = "Methyl"

            [[patterns]]
            atoms = [{ element = "C", hydrogens = 3 }]
        "#;
        let group: GroupDescriptor = toml::from_str(text).unwrap();
        assert_eq!(group.id, GroupId(3));
        assert_eq!(group.priority, 0);
        assert_eq!(group.hydrogen_policy, HydrogenPolicy::FromMatch);
        assert_eq!(group.patterns.len(), 1);
    }

    #[test]
    fn deserializes_fixed_hydrogen_policy() {
        let text = r#"
            id = 9
            name = "Aldimine"
            hydrogens = 1
            hydrogen-policy = "fixed"
            patterns = []
        "#;
        let group: GroupDescriptor = toml::from_str(text).unwrap();
        assert_eq!(group.hydrogen_policy, HydrogenPolicy::Fixed);
    }
}
