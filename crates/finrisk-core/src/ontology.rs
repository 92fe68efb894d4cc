//! Vocabulary of the financial-risk ontology.
//!
//! The keyword table is a compile-time map: it is read-only for the
//! lifetime of the process and never rebuilt per request.

use phf::phf_map;

/// Namespace of the financial-risk ontology (`ex:`).
pub const EX_NAMESPACE: &str = "http://www.semanticweb.org/financial_risk#";
pub const RDF_NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS_NAMESPACE: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const OWL_NAMESPACE: &str = "http://www.w3.org/2002/07/owl#";

/// Generic individual marker excluded from fuzzy and exploratory results.
pub const OWL_NAMED_INDIVIDUAL: &str = "http://www.w3.org/2002/07/owl#NamedIndividual";

/// Search keywords that map straight to an ontology class.
static TYPE_ALIASES: phf::Map<&'static str, &'static str> = phf_map! {
    "bank" => "http://www.semanticweb.org/financial_risk#Bank",
    "loan" => "http://www.semanticweb.org/financial_risk#Loan",
    "investment" => "http://www.semanticweb.org/financial_risk#Investment",
    "insurance" => "http://www.semanticweb.org/financial_risk#InsurancePolicy",
    "retirement" => "http://www.semanticweb.org/financial_risk#RetirementAccount",
    "risk" => "http://www.semanticweb.org/financial_risk#RiskCategory",
};

/// Resolve a search keyword to its class IRI.
///
/// The term is trimmed and lower-cased before lookup.
pub fn resolve_type_alias(term: &str) -> Option<&'static str> {
    TYPE_ALIASES.get(term.trim().to_lowercase().as_str()).copied()
}
