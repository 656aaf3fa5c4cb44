/**
This module contains the `Entity` datastructure. Entities are the unit of comparison of the whole
library: the ground truth and the predictions of a model are both lists of entities.
*/
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt::Display;

/// An entity is a named object recognized in a text. It contains the surface form of the object
/// (i.e. the exact characters making it up in the source text), a tag naming its category (such as
/// `LOC`, `PER`, `Productname`, etc.) and the character offset at which the surface form starts.
/// Entities are immutable values compared field by field; two entities with the same content are
/// the same entity.
///
/// The tag is serialized under the name `type`, the name used in the JSON result files this
/// library consumes.
#[derive(Debug, Hash, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity<'a> {
    /// Surface form of the entity, as found in the source text.
    pub text: Cow<'a, str>,
    /// Category of the entity.
    #[serde(rename = "type")]
    pub tag: Cow<'a, str>,
    /// Character offset of the first character of `text` in the source text.
    pub start: usize,
}

impl<'a> Entity<'a> {
    pub fn new(text: impl Into<Cow<'a, str>>, tag: impl Into<Cow<'a, str>>, start: usize) -> Self {
        Entity {
            text: text.into(),
            tag: tag.into(),
            start,
        }
    }

    /// Offset one past the last character of the entity. Offsets count characters, not bytes, so
    /// an entity covers the half-open character range `start..end`. An entity with an empty
    /// surface form covers no characters at all.
    pub fn end(&self) -> usize {
        self.start + self.text.chars().count()
    }
}

impl<'a> Display for Entity<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.text, self.tag, self.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_fields() {
        let e = Entity::new("CILINDRISCHE PLUG", "Productname", 0);
        assert_eq!(e.text, "CILINDRISCHE PLUG");
        assert_eq!(e.tag, "Productname");
        assert_eq!(e.start, 0);
        assert_eq!(e.end(), 17);
    }

    #[test]
    fn test_end_counts_characters() {
        // é is two bytes long but a single character
        let e = Entity::new("café", "Productname", 10);
        assert_eq!(e.end(), 14);
    }

    #[test]
    fn test_empty_text_covers_nothing() {
        let e = Entity::new("", "Productname", 3);
        assert_eq!(e.end(), 3);
    }

    #[test]
    fn test_structural_equality() {
        let owned = Entity::new(String::from("DIN908"), String::from("Productname"), 18);
        let borrowed = Entity::new("DIN908", "Productname", 18);
        assert_eq!(owned, borrowed);
    }

    #[test]
    fn test_serde_uses_type_as_field_name() {
        let e = Entity::new("a", "NAME", 0);
        let serialized = serde_json::to_string(&e).unwrap();
        assert_eq!(serialized, r#"{"text":"a","type":"NAME","start":0}"#);
        let deserialized: Entity = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, e);
    }
}
