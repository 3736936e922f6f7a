//! Canonical classification tree types.
//!
//! The tree is strictly three levels deep: [`Area`] (level 1) owns
//! [`Level2`] sub-areas, which own [`Level3`] leaf items. Document
//! [`Template`]s attach to areas only. Children are owned inline — there are
//! no back-references, so the structure is acyclic by construction.
//!
//! Ordering is meaningful everywhere: areas are user-reorderable, sub-areas
//! and items keep their append order stable across edits.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::id::NodeId;

/// The closed set of template categories.
///
/// A template carries at most one tag; assigning a new one replaces the
/// previous choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateTag {
    General,
    Deficiencies,
    Violations,
}

impl TemplateTag {
    /// All legal tags, in display order.
    pub const ALL: [Self; 3] = [Self::General, Self::Deficiencies, Self::Violations];

    const fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Deficiencies => "deficiencies",
            Self::Violations => "violations",
        }
    }
}

impl fmt::Display for TemplateTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a template tag from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTagError {
    pub got: String,
}

impl fmt::Display for ParseTagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid template tag: '{}'", self.got)
    }
}

impl std::error::Error for ParseTagError {}

impl FromStr for TemplateTag {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "general" => Ok(Self::General),
            "deficiencies" => Ok(Self::Deficiencies),
            "violations" => Ok(Self::Violations),
            _ => Err(ParseTagError { got: s.to_string() }),
        }
    }
}

/// A reusable document fragment attached to an area.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Template {
    pub id: NodeId,
    pub name: String,
    /// Single-choice tag, stored as a list of at most one element.
    pub tags: Vec<TemplateTag>,
}

impl Template {
    /// Create a template with a fresh identifier.
    pub fn new(name: impl Into<String>, tag: TemplateTag) -> Self {
        Self {
            id: NodeId::generate(),
            name: name.into(),
            tags: vec![tag],
        }
    }

    /// The selected tag, if any.
    #[must_use]
    pub fn tag(&self) -> Option<TemplateTag> {
        self.tags.first().copied()
    }

    /// Replace the selected tag.
    pub fn set_tag(&mut self, tag: TemplateTag) {
        self.tags = vec![tag];
    }
}

/// Leaf item (level 3).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Level3 {
    pub id: NodeId,
    pub name: String,
}

impl Level3 {
    /// Create a leaf item with a fresh identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: NodeId::generate(),
            name: name.into(),
        }
    }
}

/// Sub-area (level 2). Owns its leaf items in append order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Level2 {
    pub id: NodeId,
    pub name: String,
    pub children: Vec<Level3>,
}

impl Level2 {
    /// Create an empty sub-area with a fresh identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: NodeId::generate(),
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Look up a leaf item by identifier.
    #[must_use]
    pub fn child(&self, id: &NodeId) -> Option<&Level3> {
        self.children.iter().find(|item| &item.id == id)
    }

    /// Mutable lookup of a leaf item by identifier.
    pub fn child_mut(&mut self, id: &NodeId) -> Option<&mut Level3> {
        self.children.iter_mut().find(|item| &item.id == id)
    }
}

/// Top-level classification category (level 1).
///
/// Owns sub-areas and templates. Deleting an area drops all descendants;
/// nothing is soft-deleted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Area {
    pub id: NodeId,
    pub name: String,
    pub children: Vec<Level2>,
    pub templates: Vec<Template>,
}

impl Area {
    /// Create an empty area with a fresh identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: NodeId::generate(),
            name: name.into(),
            children: Vec::new(),
            templates: Vec::new(),
        }
    }

    /// Look up a sub-area by identifier.
    #[must_use]
    pub fn child(&self, id: &NodeId) -> Option<&Level2> {
        self.children.iter().find(|item| &item.id == id)
    }

    /// Mutable lookup of a sub-area by identifier.
    pub fn child_mut(&mut self, id: &NodeId) -> Option<&mut Level2> {
        self.children.iter_mut().find(|item| &item.id == id)
    }

    /// Look up a template by identifier.
    #[must_use]
    pub fn template(&self, id: &NodeId) -> Option<&Template> {
        self.templates.iter().find(|template| &template.id == id)
    }

    /// Mutable lookup of a template by identifier.
    pub fn template_mut(&mut self, id: &NodeId) -> Option<&mut Template> {
        self.templates.iter_mut().find(|template| &template.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::{Area, Level2, Level3, Template, TemplateTag};
    use std::str::FromStr;

    #[test]
    fn tag_json_roundtrips() {
        assert_eq!(
            serde_json::to_string(&TemplateTag::General).expect("serialize"),
            "\"general\""
        );
        assert_eq!(
            serde_json::from_str::<TemplateTag>("\"violations\"").expect("deserialize"),
            TemplateTag::Violations
        );
    }

    #[test]
    fn tag_parse_is_trimmed_and_case_insensitive() {
        assert_eq!(
            TemplateTag::from_str("  General "),
            Ok(TemplateTag::General)
        );
        assert_eq!(
            TemplateTag::from_str("DEFICIENCIES"),
            Ok(TemplateTag::Deficiencies)
        );
        assert!(TemplateTag::from_str("remarks").is_err());
        assert!(TemplateTag::from_str("").is_err());
    }

    #[test]
    fn tag_display_parse_roundtrips() {
        for tag in TemplateTag::ALL {
            assert_eq!(TemplateTag::from_str(&tag.to_string()), Ok(tag));
        }
    }

    #[test]
    fn set_tag_replaces_instead_of_appending() {
        let mut template = Template::new("Акт осмотра", TemplateTag::General);
        template.set_tag(TemplateTag::Violations);
        assert_eq!(template.tags, vec![TemplateTag::Violations]);
        assert_eq!(template.tag(), Some(TemplateTag::Violations));
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let area: Area = serde_json::from_str("{\"name\":\"Охрана труда\"}").expect("deserialize");
        assert!(area.id.is_empty());
        assert_eq!(area.name, "Охрана труда");
        assert!(area.children.is_empty());
        assert!(area.templates.is_empty());

        let template: Template = serde_json::from_str("{\"id\":\"t1\"}").expect("deserialize");
        assert_eq!(template.tag(), None);
    }

    #[test]
    fn lookups_find_by_id_only() {
        let mut area = Area::new("Пожарная безопасность");
        let mut sub = Level2::new("Документация");
        let leaf = Level3::new("Журнал инструктажей");
        let leaf_id = leaf.id.clone();
        sub.children.push(leaf);
        let sub_id = sub.id.clone();
        area.children.push(sub);

        assert!(area.child(&sub_id).is_some());
        assert!(area.child(&leaf_id).is_none());
        assert!(
            area.child(&sub_id)
                .and_then(|sub| sub.child(&leaf_id))
                .is_some()
        );
    }
}
