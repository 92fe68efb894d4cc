//! Shaping lookup rows into entity results.
//!
//! A lookup row carries at most one `?property`/`?value` pair, so an entity
//! with N literal properties arrives as N rows. [`PropertyMode`] decides
//! whether those rows stay separate or merge by entity IRI.

use std::collections::HashMap;

use finrisk_core::{EntityResult, PropertyMode, PropertyValue};

use crate::client::GraphError;
use crate::results::QueryRow;

/// Convert lookup rows into entity results, preserving store order.
///
/// Fails with [`GraphError::UnexpectedShape`] if a row lacks `entity`, `name` or `type`.
pub fn flatten(rows: &[QueryRow], mode: PropertyMode) -> Result<Vec<EntityResult>, GraphError> {
    match mode {
        PropertyMode::PerRow => rows.iter().map(row_to_result).collect(),
        PropertyMode::Aggregate => aggregate(rows),
    }
}

fn row_to_result(row: &QueryRow) -> Result<EntityResult, GraphError> {
    let mut result = EntityResult::new(
        row.require("entity")?,
        row.require("name")?,
        row.require("type")?,
    );
    result.blank_node = row.is_blank_node("entity");
    if let Some(property) = row_property(row) {
        result.properties.push(property);
    }
    Ok(result)
}

fn row_property(row: &QueryRow) -> Option<PropertyValue> {
    match (row.get("property"), row.get("value")) {
        (Some(property), Some(value)) => Some(PropertyValue {
            property: property.to_string(),
            value: value.to_string(),
        }),
        _ => None,
    }
}

/// One result per entity IRI, positioned at its first row. The first row's
/// name and type win when an entity has several.
fn aggregate(rows: &[QueryRow]) -> Result<Vec<EntityResult>, GraphError> {
    let mut results: Vec<EntityResult> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let entity = row.require("entity")?;
        let slot = match index.get(entity) {
            Some(&i) => {
                // Still validate the rest of the row's shape.
                row.require("name")?;
                row.require("type")?;
                i
            }
            None => {
                let mut result =
                    EntityResult::new(entity, row.require("name")?, row.require("type")?);
                result.blank_node = row.is_blank_node("entity");
                results.push(result);
                index.insert(entity.to_string(), results.len() - 1);
                results.len() - 1
            }
        };

        if let Some(property) = row_property(row) {
            let properties = &mut results[slot].properties;
            if !properties.contains(&property) {
                properties.push(property);
            }
        }
    }

    Ok(results)
}
