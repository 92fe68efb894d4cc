//! Core domain types for the financial-risk knowledge graph explorer.
//!
//! These are the request-scoped shapes returned by the search endpoints.
//! Nothing here is persisted; the triple store is the only system of record.

use serde::{Deserialize, Serialize};

// ── Search Term ───────────────────────────────────────────────────

/// A user-supplied search term.
///
/// The raw text is kept as entered; alias matching uses [`SearchTerm::normalized`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Parse an optional query parameter. Absent or blank input yields `None`.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        match raw {
            Some(s) if !s.trim().is_empty() => Some(Self(s.to_string())),
            _ => None,
        }
    }

    /// The term exactly as the user entered it.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Trimmed, lower-cased form used for keyword matching.
    pub fn normalized(&self) -> String {
        self.0.trim().to_lowercase()
    }
}

impl std::fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Results ───────────────────────────────────────────────────────

/// A literal-valued property attached to an entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PropertyValue {
    pub property: String,
    pub value: String,
}

/// An entity directly related to a search result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelatedEntity {
    pub name: String,
    /// Predicate IRI of the connecting relation.
    pub relation: String,
}

/// An entity matched by the primary search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntityResult {
    pub entity: String,
    pub name: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    pub properties: Vec<PropertyValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<RelatedEntity>>,
    /// The store bound `entity` to a blank node; its label only means
    /// something inside the response that produced it.
    #[serde(skip)]
    pub blank_node: bool,
}

impl EntityResult {
    pub fn new(
        entity: impl Into<String>,
        name: impl Into<String>,
        entity_type: impl Into<String>,
    ) -> Self {
        Self {
            entity: entity.into(),
            name: name.into(),
            entity_type: entity_type.into(),
            properties: Vec::new(),
            recommendations: None,
            blank_node: false,
        }
    }
}

/// An entity reached by two-hop exploration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExploreResult {
    pub entity: String,
    pub name: String,
    #[serde(rename = "type")]
    pub entity_type: String,
}

// ── Flattening Policy ─────────────────────────────────────────────

/// How lookup rows sharing an entity IRI are turned into results.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PropertyMode {
    /// One result per store row, each carrying at most one property.
    PerRow,
    /// One result per entity IRI with all of its literal properties.
    #[default]
    Aggregate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_term_rejects_missing_and_blank() {
        assert!(SearchTerm::parse(None).is_none());
        assert!(SearchTerm::parse(Some("")).is_none());
        assert!(SearchTerm::parse(Some("   ")).is_none());
    }

    #[test]
    fn search_term_keeps_raw_text() {
        let term = SearchTerm::parse(Some("  Bank ")).unwrap();
        assert_eq!(term.as_str(), "  Bank ");
        assert_eq!(term.normalized(), "bank");
    }

    #[test]
    fn entity_result_serializes_type_field() {
        let mut result = EntityResult::new(
            "http://www.semanticweb.org/financial_risk#FirstNational",
            "First National",
            "http://www.semanticweb.org/financial_risk#Bank",
        );
        result.properties.push(PropertyValue {
            property: "http://www.semanticweb.org/financial_risk#assets".to_string(),
            value: "1000000".to_string(),
        });

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["type"], "http://www.semanticweb.org/financial_risk#Bank");
        assert_eq!(json["properties"][0]["value"], "1000000");
        assert!(json.get("recommendations").is_none());
    }

    #[test]
    fn recommendations_serialize_when_attached() {
        let mut result = EntityResult::new("urn:a", "A", "urn:T");
        result.recommendations = Some(vec![]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["recommendations"], serde_json::json!([]));
    }

    #[test]
    fn blank_node_flag_is_not_serialized() {
        let mut result = EntityResult::new("b0", "Anonymous", "urn:T");
        result.blank_node = true;
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["entity"], "b0");
        assert!(json.get("blank_node").is_none());
    }

    #[test]
    fn property_mode_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&PropertyMode::PerRow).unwrap(),
            "\"per_row\""
        );
        assert_eq!(PropertyMode::default(), PropertyMode::Aggregate);
    }
}
