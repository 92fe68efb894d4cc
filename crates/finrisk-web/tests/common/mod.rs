//! Shared test utilities for finrisk-web integration harnesses.
//!
//! Import via `mod common; use common::*;` at the top of each harness file.

#![allow(dead_code)]

pub mod fake_sparql;
pub mod fixtures;

pub use fake_sparql::FakeSparqlStore;
pub use fixtures::*;
