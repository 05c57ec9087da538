//! # Untyped Tree Access
//!
//! Total accessors over the parsed YAML tree. The input is duck-shaped —
//! any key may be absent, empty, or of the wrong shape — so every accessor
//! returns a structured error instead of panicking.
//!
//! ## Emptiness
//!
//! A key whose value is null, an empty string, an empty sequence, or an
//! empty mapping counts as missing: a tenant with `vrfs: []` has not
//! declared its vrfs. Scalar values render leniently (numbers and booleans
//! are accepted where a name is expected), so `name: 42` is a legal if
//! unusual identifier.
//!
//! An entry of the wrong shape entirely (a scalar where an entity mapping
//! is expected) surfaces as that entity's `name` being missing — key lookup
//! on a non-mapping finds nothing.

use serde_yaml::Value;

use crate::error::{Breadcrumb, FlattenError};

/// Whether a present value still counts as undeclared.
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Sequence(seq) => seq.is_empty(),
        Value::Mapping(map) => map.is_empty(),
        _ => false,
    }
}

fn missing(field: &'static str, kind: &'static str, at: &Breadcrumb) -> FlattenError {
    FlattenError::MissingField {
        field,
        kind,
        at: at.clone(),
    }
}

/// A required scalar under `key`, rendered to a string.
///
/// # Errors
///
/// Returns [`FlattenError::MissingField`] if the key is absent, empty, or
/// not a scalar.
pub fn require_string(
    obj: &Value,
    key: &'static str,
    kind: &'static str,
    at: &Breadcrumb,
) -> Result<String, FlattenError> {
    let value = obj.get(key).ok_or_else(|| missing(key, kind, at))?;
    if is_empty(value) {
        return Err(missing(key, kind, at));
    }
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(missing(key, kind, at)),
    }
}

/// A required non-empty sequence under `key`, returned as its elements.
///
/// Element shape is not checked here: looking up a key on a non-mapping
/// element finds nothing, so a malformed element fails at its first
/// required field.
///
/// # Errors
///
/// Returns [`FlattenError::MissingField`] if the key is absent, the value
/// is not a sequence, or the sequence is empty.
pub fn require_entries<'a>(
    obj: &'a Value,
    key: &'static str,
    kind: &'static str,
    at: &Breadcrumb,
) -> Result<&'a [Value], FlattenError> {
    match obj.get(key) {
        Some(Value::Sequence(entries)) if !entries.is_empty() => Ok(entries.as_slice()),
        _ => Err(missing(key, kind, at)),
    }
}

/// A required prefix length under `key`. Accepts an integer scalar or a
/// digit string (YAML authors quote masks inconsistently).
///
/// # Errors
///
/// Returns [`FlattenError::MissingField`] if the key is absent or the value
/// does not fit a prefix length.
pub fn require_mask(
    obj: &Value,
    key: &'static str,
    kind: &'static str,
    at: &Breadcrumb,
) -> Result<u8, FlattenError> {
    let value = obj.get(key).ok_or_else(|| missing(key, kind, at))?;
    match value {
        Value::Number(n) => n
            .as_u64()
            .and_then(|raw| u8::try_from(raw).ok())
            .ok_or_else(|| missing(key, kind, at)),
        Value::String(s) => s.parse::<u8>().map_err(|_| missing(key, kind, at)),
        _ => Err(missing(key, kind, at)),
    }
}
