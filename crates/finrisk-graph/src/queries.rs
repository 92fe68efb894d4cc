//! Read operations and SPARQL query builders for the knowledge graph.
//!
//! User input only ever reaches a query as an escaped string literal, and
//! entity IRIs are validated before they are spliced in as IRI references.

use oxrdf::{Literal, NamedNodeRef};

use finrisk_core::ontology::{
    resolve_type_alias, EX_NAMESPACE, OWL_NAMESPACE, RDFS_NAMESPACE, RDF_NAMESPACE,
};
use finrisk_core::{EntityResult, ExploreResult, PropertyMode, RelatedEntity, SearchTerm};

use crate::client::{GraphClient, GraphError};
use crate::flatten::flatten;
use crate::results::QueryRow;

/// Maximum number of entities returned by exploration.
pub const EXPLORE_LIMIT: usize = 10;

/// Which template a lookup resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    /// The term is a known keyword; match by class (and subclasses).
    Typed { class: &'static str },
    /// Substring match on name or type.
    Fuzzy,
}

/// A built entity lookup query.
#[derive(Debug, Clone)]
pub struct LookupQuery {
    pub kind: LookupKind,
    pub sparql: String,
}

fn prefixes() -> String {
    format!(
        "PREFIX ex: <{EX_NAMESPACE}>\n\
         PREFIX rdf: <{RDF_NAMESPACE}>\n\
         PREFIX rdfs: <{RDFS_NAMESPACE}>\n\
         PREFIX owl: <{OWL_NAMESPACE}>\n"
    )
}

/// Serialize `value` as an escaped SPARQL string literal, quotes included.
pub fn string_literal(value: &str) -> String {
    Literal::new_simple_literal(value).to_string()
}

/// Case-insensitive substring filter expression on `variable`.
fn contains_filter(variable: &str, needle: &str) -> String {
    format!(
        "CONTAINS(LCASE(STR({variable})), LCASE({}))",
        string_literal(needle)
    )
}

/// Pick the typed or fuzzy template for `term` and fill it in.
pub fn build_lookup_query(term: &SearchTerm) -> LookupQuery {
    match resolve_type_alias(&term.normalized()) {
        Some(class) => LookupQuery {
            kind: LookupKind::Typed { class },
            sparql: typed_lookup_query(NamedNodeRef::new_unchecked(class)),
        },
        None => LookupQuery {
            kind: LookupKind::Fuzzy,
            sparql: fuzzy_lookup_query(term.as_str()),
        },
    }
}

/// Entities whose type is `class` or one of its transitive subclasses.
pub fn typed_lookup_query(class: NamedNodeRef<'_>) -> String {
    format!(
        "{prefixes}\
         SELECT DISTINCT ?entity ?name ?type ?property ?value\n\
         WHERE {{\n\
         \x20   ?entity rdf:type ?type .\n\
         \x20   ?entity ex:hasName ?name .\n\
         \x20   ?type rdfs:subClassOf* {class} .\n\
         \x20   OPTIONAL {{\n\
         \x20       ?entity ?property ?value .\n\
         \x20       FILTER(isLiteral(?value))\n\
         \x20   }}\n\
         }}\n",
        prefixes = prefixes(),
    )
}

/// Entities whose name or type contains `term`, ignoring case.
pub fn fuzzy_lookup_query(term: &str) -> String {
    format!(
        "{prefixes}\
         SELECT DISTINCT ?entity ?name ?type ?property ?value\n\
         WHERE {{\n\
         \x20   ?entity rdf:type ?type .\n\
         \x20   ?entity ex:hasName ?name .\n\
         \x20   OPTIONAL {{\n\
         \x20       ?entity ?property ?value .\n\
         \x20       FILTER(isLiteral(?value))\n\
         \x20   }}\n\
         \x20   FILTER(\n\
         \x20       {name_match} ||\n\
         \x20       {type_match}\n\
         \x20   )\n\
         \x20   FILTER(?type != owl:NamedIndividual)\n\
         }}\n",
        prefixes = prefixes(),
        name_match = contains_filter("?name", term),
        type_match = contains_filter("?type", term),
    )
}

/// Named entities one outgoing hop away from `entity`.
pub fn recommendations_query(entity: NamedNodeRef<'_>) -> String {
    format!(
        "PREFIX ex: <{EX_NAMESPACE}>\n\
         SELECT DISTINCT ?related ?name ?relation\n\
         WHERE {{\n\
         \x20   {entity} ?relation ?related .\n\
         \x20   ?related ex:hasName ?name .\n\
         }}\n"
    )
}

/// Named, typed entities two outgoing hops from any entity whose name contains `term`.
pub fn explore_query(term: &str, limit: usize) -> String {
    format!(
        "{prefixes}\
         SELECT DISTINCT ?entity ?name ?type\n\
         WHERE {{\n\
         \x20   ?mainEntity ex:hasName ?mainName .\n\
         \x20   FILTER({name_match})\n\
         \x20   ?mainEntity ?p1 ?intermediate .\n\
         \x20   ?intermediate ?p2 ?entity .\n\
         \x20   ?entity ex:hasName ?name .\n\
         \x20   ?entity rdf:type ?type .\n\
         \x20   FILTER(?entity != ?mainEntity)\n\
         \x20   FILTER(?type != owl:NamedIndividual)\n\
         }}\n\
         LIMIT {limit}\n",
        prefixes = prefixes(),
        name_match = contains_filter("?mainName", term),
    )
}

impl GraphClient {
    // ── Entity Lookup ────────────────────────────────────────────

    /// Run the typed or fuzzy lookup for `term` and return the raw rows.
    pub async fn lookup(&self, term: &SearchTerm) -> Result<Vec<QueryRow>, GraphError> {
        let query = build_lookup_query(term);
        let rows = self.query_rows(&query.sparql).await?;
        tracing::debug!(term = %term, kind = ?query.kind, rows = rows.len(), "Entity lookup");
        Ok(rows)
    }

    /// Lookup followed by flattening into entity results.
    pub async fn search_entities(
        &self,
        term: &SearchTerm,
        mode: PropertyMode,
    ) -> Result<Vec<EntityResult>, GraphError> {
        let rows = self.lookup(term).await?;
        flatten(&rows, mode)
    }

    // ── Neighbor Queries ─────────────────────────────────────────

    /// Named entities directly related to `entity_uri`.
    pub async fn recommendations(
        &self,
        entity_uri: &str,
    ) -> Result<Vec<RelatedEntity>, GraphError> {
        let entity = NamedNodeRef::new(entity_uri).map_err(|_| GraphError::InvalidIri {
            value: entity_uri.to_string(),
        })?;

        let rows = self.query_rows(&recommendations_query(entity)).await?;
        let mut results = Vec::with_capacity(rows.len());
        for row in &rows {
            results.push(RelatedEntity {
                name: row.require("name")?.to_string(),
                relation: row.require("relation")?.to_string(),
            });
        }

        tracing::debug!(entity = %entity_uri, related = results.len(), "Recommendations");
        Ok(results)
    }

    // ── Two-Hop Exploration ──────────────────────────────────────

    /// Entities two hops from anything named like `term`, at most [`EXPLORE_LIMIT`].
    ///
    /// The query has no ORDER BY, so which entities make the cut is up to the store.
    pub async fn explore(&self, term: &SearchTerm) -> Result<Vec<ExploreResult>, GraphError> {
        let rows = self
            .query_rows(&explore_query(term.as_str(), EXPLORE_LIMIT))
            .await?;

        let mut results = Vec::with_capacity(rows.len().min(EXPLORE_LIMIT));
        for row in rows.iter().take(EXPLORE_LIMIT) {
            results.push(ExploreResult {
                entity: row.require("entity")?.to_string(),
                name: row.require("name")?.to_string(),
                entity_type: row.require("type")?.to_string(),
            });
        }

        tracing::debug!(term = %term, results = results.len(), "Exploration");
        Ok(results)
    }
}
