//! SPARQL 1.1 JSON results format (`application/sparql-results+json`).

use std::collections::HashMap;

use serde::Deserialize;

use crate::client::GraphError;

/// A decoded SELECT response.
#[derive(Debug, Clone, Deserialize)]
pub struct SparqlResults {
    #[serde(default)]
    pub head: ResultHead,
    pub results: ResultSet,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResultHead {
    #[serde(default)]
    pub vars: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResultSet {
    pub bindings: Vec<QueryRow>,
}

/// Kind of RDF term bound to a variable.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TermKind {
    Uri,
    Literal,
    TypedLiteral,
    Bnode,
    #[serde(other)]
    Other,
}

/// A single bound value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RdfTerm {
    #[serde(rename = "type", default)]
    pub kind: Option<TermKind>,
    pub value: String,
    #[serde(rename = "xml:lang", default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub datatype: Option<String>,
}

/// One result row: variable name to bound term. Unbound variables are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct QueryRow(HashMap<String, RdfTerm>);

impl QueryRow {
    pub fn term(&self, variable: &str) -> Option<&RdfTerm> {
        self.0.get(variable)
    }

    /// Lexical value of `variable`, if bound.
    pub fn get(&self, variable: &str) -> Option<&str> {
        self.0.get(variable).map(|t| t.value.as_str())
    }

    /// Lexical value of a variable the query always binds.
    pub fn require(&self, variable: &str) -> Result<&str, GraphError> {
        self.get(variable)
            .ok_or_else(|| GraphError::UnexpectedShape {
                variable: variable.to_string(),
            })
    }

    /// Whether `variable` is bound to a blank node.
    pub fn is_blank_node(&self, variable: &str) -> bool {
        self.term(variable)
            .is_some_and(|t| t.kind == Some(TermKind::Bnode))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
