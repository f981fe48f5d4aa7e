//! Field-level helpers for decoding structured maps
//!
//! Alias tolerance lives here and nowhere else: `normalize_fields` rewrites
//! lowercase variants to their canonical PascalCase name before any component
//! reads its fields, so decode logic only ever looks up canonical names.

use serde_json::{Map, Value};

use crate::domain::diagnostics::{Diagnostics, Warning};
use crate::domain::error::{DomainError, DomainResult};

/// Name of the discriminator field carried by every node and geometry map.
pub const TYPE_FIELD: &str = "Type";

/// Returns the `Type` discriminator of a map.
pub fn discriminator<'a>(map: &'a Map<String, Value>, context: &str) -> DomainResult<&'a str> {
    match map.get(TYPE_FIELD) {
        None => Err(DomainError::MissingDiscriminator {
            context: context.to_string(),
        }),
        Some(Value::String(tag)) => Ok(tag),
        Some(other) => Err(DomainError::invalid_field(
            TYPE_FIELD,
            format!("expected a string, got {}", other),
        )),
    }
}

/// Maps canonical and all-lowercase field names onto the canonical name.
///
/// Unknown fields are reported and dropped. A `Type`/`type` field is ignored.
/// When both spellings are present the canonical one wins.
pub fn normalize_fields(
    map: &Map<String, Value>,
    canonical: &[&str],
    component: &'static str,
    diag: &mut Diagnostics,
) -> Map<String, Value> {
    let mut out = Map::new();
    for (key, value) in map {
        if key == TYPE_FIELD || key == "type" {
            continue;
        }
        if let Some(name) = canonical.iter().find(|name| **name == key) {
            out.insert((*name).to_string(), value.clone());
        } else if let Some(name) = canonical
            .iter()
            .find(|name| name.to_ascii_lowercase() == *key)
        {
            if !map.contains_key(*name) {
                out.insert((*name).to_string(), value.clone());
            }
        } else {
            diag.push(Warning::UnrecognizedField {
                component,
                field: key.clone(),
            });
        }
    }
    out
}

/// Canonical-only variant: reports every field that is not listed verbatim.
pub fn check_fields(
    map: &Map<String, Value>,
    canonical: &[&str],
    component: &'static str,
    diag: &mut Diagnostics,
) {
    for key in map.keys() {
        if key != TYPE_FIELD && !canonical.contains(&key.as_str()) {
            diag.push(Warning::UnrecognizedField {
                component,
                field: key.clone(),
            });
        }
    }
}

pub fn read_string(map: &Map<String, Value>, field: &str) -> DomainResult<Option<String>> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(DomainError::invalid_field(
            field,
            format!("expected a string, got {}", other),
        )),
    }
}

pub fn read_bool(map: &Map<String, Value>, field: &str) -> DomainResult<Option<bool>> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        // numeric flags appear in older files
        Some(Value::Number(n)) => Ok(Some(n.as_f64().unwrap_or(0.0) != 0.0)),
        Some(other) => Err(DomainError::invalid_field(
            field,
            format!("expected a boolean, got {}", other),
        )),
    }
}

pub fn read_f64(map: &Map<String, Value>, field: &str) -> DomainResult<Option<f64>> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => as_f64(value).map(Some).ok_or_else(|| {
            DomainError::invalid_field(field, format!("expected a number, got {}", value))
        }),
    }
}

/// Reads a fixed-size numeric array such as `[min, max]` or `[r, g, b]`.
pub fn read_array<const N: usize>(
    map: &Map<String, Value>,
    field: &str,
) -> DomainResult<Option<[f64; N]>> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => to_array::<N>(value).map(Some).ok_or_else(|| {
            DomainError::invalid_field(field, format!("expected {} numbers, got {}", N, value))
        }),
    }
}

pub fn read_object<'a>(
    map: &'a Map<String, Value>,
    field: &str,
) -> DomainResult<Option<&'a Map<String, Value>>> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(obj)) => Ok(Some(obj)),
        Some(other) => Err(DomainError::invalid_field(
            field,
            format!("expected an object, got {}", other),
        )),
    }
}

/// Rejects encodings that cannot be read back.
///
/// Encoders never write `null`; one only appears when a NaN or infinite
/// number was serialized. The error names the innermost field holding it.
pub fn check_encodable(map: &Map<String, Value>) -> DomainResult<()> {
    for (key, value) in map {
        check_value(key, value)?;
    }
    Ok(())
}

fn check_value(field: &str, value: &Value) -> DomainResult<()> {
    match value {
        Value::Null => Err(DomainError::invalid_field(
            field,
            "non-finite number cannot be written",
        )),
        Value::Array(items) => items.iter().try_for_each(|item| check_value(field, item)),
        Value::Object(map) => check_encodable(map),
        _ => Ok(()),
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    value.as_f64()
}

fn to_array<const N: usize>(value: &Value) -> Option<[f64; N]> {
    let items = value.as_array()?;
    if items.len() != N {
        return None;
    }
    let mut out = [0.0; N];
    for (slot, item) in out.iter_mut().zip(items) {
        *slot = as_f64(item)?;
    }
    Some(out)
}
