//! Descriptor - the nine-field contract interface record
//!
//! Bundlers embed these records without any type tag; the only positive
//! signal that an object literal is a descriptor is the presence of the nine
//! field names in this exact order:
//!
//! `version, name, bytecode, codeHash, fieldsSig, eventsSig, functions, constants, enums`
//!
//! Any deviation in relative order voids the match for that candidate.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The canonical descriptor field names, in required order.
pub const DESCRIPTOR_FIELDS: [&str; 9] = [
    "version",
    "name",
    "bytecode",
    "codeHash",
    "fieldsSig",
    "eventsSig",
    "functions",
    "constants",
    "enums",
];

/// A recovered contract interface descriptor.
///
/// The first four fields are plain string literals in the bundle; the
/// remaining five are arbitrary JSON-compatible structures (signatures and
/// tables). Serialization emits fields in canonical order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Descriptor {
    pub version: String,
    pub name: String,
    pub bytecode: String,
    pub code_hash: String,
    pub fields_sig: Value,
    pub events_sig: Value,
    pub functions: Value,
    pub constants: Value,
    pub enums: Value,
}

impl Descriptor {
    /// Convert a parsed JSON value into a typed descriptor.
    ///
    /// Fails when the value is not an object, is not descriptor-shaped, or
    /// when one of the four literal fields is not a string.
    pub fn from_value(value: Value) -> Result<Self> {
        let shaped = value
            .as_object()
            .map(fields_in_canonical_order)
            .unwrap_or(false);
        if !shaped {
            return Err(Error::MalformedLiteral(
                "object does not expose the descriptor fields in order".to_string(),
            ));
        }
        let descriptor = serde_json::from_value(value)?;
        Ok(descriptor)
    }

    /// Number of entries in the function table, for display purposes.
    pub fn function_count(&self) -> usize {
        self.functions.as_array().map(|a| a.len()).unwrap_or(0)
    }

    /// Render as indented JSON for export.
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Check whether a JSON object exposes all nine descriptor fields with their
/// relative order equal to the canonical order.
///
/// Extra keys interleaved between the required ones do not void the match;
/// a missing field or any inversion does. Relies on `serde_json`'s
/// `preserve_order` feature so the map iterates in insertion order.
pub fn fields_in_canonical_order(map: &Map<String, Value>) -> bool {
    let keys: Vec<&str> = map.keys().map(String::as_str).collect();
    let mut last = None;
    for field in DESCRIPTOR_FIELDS {
        match keys.iter().position(|k| *k == field) {
            Some(idx) => {
                if let Some(prev) = last {
                    if idx < prev {
                        return false;
                    }
                }
                last = Some(idx);
            }
            None => return false,
        }
    }
    true
}
