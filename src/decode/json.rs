//! Typed access to `serde_json::Value` trees
//!
//! Every accessor names the entity being decoded so that errors point at
//! the offending construct.

use crate::{Error, Result};
use serde_json::{Map, Value};

/// Short rendering of a value for error messages
pub(crate) fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {}", b),
        Value::Number(n) => format!("number {}", n),
        Value::String(s) if s.chars().count() > 40 => {
            let head: String = s.chars().take(40).collect();
            format!("string {:?}...", head)
        }
        Value::String(s) => format!("string {:?}", s),
        Value::Array(items) => format!("array of {} elements", items.len()),
        Value::Object(_) => "object".to_string(),
    }
}

fn mismatch(expected: &'static str, context: &'static str, got: &Value) -> Error {
    Error::ShapeMismatch {
        expected,
        context,
        got: describe(got),
    }
}

pub(crate) fn as_object<'a>(value: &'a Value, context: &'static str) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| mismatch("object", context, value))
}

/// Required key of an object
pub(crate) fn field<'a>(value: &'a Value, key: &'static str, context: &'static str) -> Result<&'a Value> {
    as_object(value, context)?
        .get(key)
        .ok_or_else(|| Error::missing(key, context))
}

/// Optional key of an object; an explicit `null` counts as absent
pub(crate) fn opt_field<'a>(
    value: &'a Value,
    key: &'static str,
    context: &'static str,
) -> Result<Option<&'a Value>> {
    Ok(as_object(value, context)?.get(key).filter(|v| !v.is_null()))
}

pub(crate) fn as_str<'a>(value: &'a Value, context: &'static str) -> Result<&'a str> {
    value.as_str().ok_or_else(|| mismatch("string", context, value))
}

pub(crate) fn as_bool(value: &Value, context: &'static str) -> Result<bool> {
    value.as_bool().ok_or_else(|| mismatch("boolean", context, value))
}

pub(crate) fn as_i64(value: &Value, context: &'static str) -> Result<i64> {
    value.as_i64().ok_or_else(|| mismatch("integer", context, value))
}

pub(crate) fn as_u64(value: &Value, context: &'static str) -> Result<u64> {
    value
        .as_u64()
        .ok_or_else(|| mismatch("non-negative integer", context, value))
}

pub(crate) fn as_i32(value: &Value, context: &'static str) -> Result<i32> {
    value
        .as_i64()
        .and_then(|n| i32::try_from(n).ok())
        .ok_or_else(|| mismatch("32-bit integer", context, value))
}

/// Integer in `i128` range, sent either as a JSON number or a digit string.
///
/// Unsigned 128-bit values above `i128::MAX` do not fit and are a shape error.
pub(crate) fn as_wide_int(value: &Value, context: &'static str) -> Result<i128> {
    let parsed = match value {
        Value::Number(n) => n
            .as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from))
            .or_else(|| n.to_string().parse::<i128>().ok()),
        Value::String(s) => s.trim().parse::<i128>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| mismatch("integer literal", context, value))
}

pub(crate) fn as_array<'a>(value: &'a Value, context: &'static str) -> Result<&'a [Value]> {
    value
        .as_array()
        .map(|items| items.as_slice())
        .ok_or_else(|| mismatch("array", context, value))
}

pub(crate) fn str_field<'a>(value: &'a Value, key: &'static str, context: &'static str) -> Result<&'a str> {
    as_str(field(value, key, context)?, context)
}

pub(crate) fn bool_field(value: &Value, key: &'static str, context: &'static str) -> Result<bool> {
    as_bool(field(value, key, context)?, context)
}

pub(crate) fn int_field(value: &Value, key: &'static str, context: &'static str) -> Result<i64> {
    as_i64(field(value, key, context)?, context)
}

pub(crate) fn array_field<'a>(
    value: &'a Value,
    key: &'static str,
    context: &'static str,
) -> Result<&'a [Value]> {
    as_array(field(value, key, context)?, context)
}

/// Decode every element of an array field with `f`, stopping at the first error
pub(crate) fn list_field<T>(
    value: &Value,
    key: &'static str,
    context: &'static str,
    f: impl FnMut(&Value) -> Result<T>,
) -> Result<Vec<T>> {
    array_field(value, key, context)?.iter().map(f).collect()
}
