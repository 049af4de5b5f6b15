//! Value classification, coercion and the tagged JSON wire format.
//!
//! Classification (`get_value_type`) and the wire operations
//! (`to_json`/`from_json`) fail hard; coercion (`set_value`) fails soft to
//! a caller-supplied default. The two policies are deliberate and must not
//! be unified.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use valise_common::b64;
use valise_common::logging::{Component, Logger};

use crate::error::{Result, SerialError};
use crate::value::{DataType, Value};

/// The tagged wire envelope: exactly two keys, `type` and `value`.
#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct Envelope {
    #[serde(rename = "type")]
    type_tag: String,
    value: JsonValue,
}

/// Classify `data` into its [`DataType`].
///
/// Classification is deterministic and depends only on the value's shape.
/// The boolean arm stays ahead of the numeric arms: a boolean is
/// integer-representable and must never come back as `int`.
///
/// With `json_only` the result is restricted to the kinds JSON carries
/// natively; anything else fails with [`SerialError::UnsupportedType`].
pub fn get_value_type(data: &Value, json_only: bool) -> Result<DataType> {
    let data_type = match data {
        Value::Bool(_) => DataType::Bool,
        Value::Int(_) => DataType::Int,
        Value::Float(_) => DataType::Float,
        Value::Str(_) => DataType::Str,
        Value::None => DataType::None,
        Value::Bytes(_) => DataType::Bytes,
        Value::Dict(_) => DataType::Dict,
        Value::List(_) => DataType::List,
        Value::Tuple(_) => DataType::Tuple,
        Value::Uuid(u) => match u.get_version_num() {
            1 => DataType::Uuid1,
            3 => DataType::Uuid3,
            4 => DataType::Uuid4,
            5 => DataType::Uuid5,
            version => {
                return Err(SerialError::UnsupportedType(format!(
                    "UUID version {version} has no wire tag"
                )))
            }
        },
    };

    if json_only && !data_type.is_json_native() {
        return Err(SerialError::UnsupportedType(format!(
            "'{data_type}' is not natively JSON-representable"
        )));
    }

    Ok(data_type)
}

/// Coerce `data` to the requested [`DataType`], returning `default` when
/// the conversion fails.
///
/// Passing `None` for `default` yields [`Value::None`] on failure; callers
/// that must tell a failed conversion apart from a legitimate `none` use
/// [`try_set_value`] instead.
pub fn set_value(data: &Value, target: DataType, default: Option<Value>) -> Value {
    match try_set_value(data, target) {
        Ok(value) => value,
        Err(_) => default.unwrap_or(Value::None),
    }
}

/// Fallible core of [`set_value`]: best-effort conversion of `data` to
/// `target` using the target kind's native construction rules.
pub fn try_set_value(data: &Value, target: DataType) -> Result<Value> {
    match target {
        DataType::None => Ok(Value::None),
        DataType::Int => coerce_int(data),
        DataType::Float => coerce_float(data),
        DataType::Str => Ok(Value::Str(data.to_string())),
        DataType::Bool => coerce_bool(data),
        DataType::Bytes => coerce_bytes(data),
        DataType::Dict => coerce_dict(data),
        DataType::List => coerce_sequence(data).map(Value::List),
        DataType::Tuple => coerce_sequence(data).map(Value::Tuple),
        DataType::Uuid1 => coerce_uuid(data, 1),
        DataType::Uuid3 => coerce_uuid(data, 3),
        DataType::Uuid4 => coerce_uuid(data, 4),
        DataType::Uuid5 => coerce_uuid(data, 5),
    }
}

fn coercion_failed(data: &Value, target: &str) -> SerialError {
    SerialError::UnsupportedType(format!("cannot convert {data:?} to {target}"))
}

fn coerce_int(data: &Value) -> Result<Value> {
    match data {
        Value::Int(i) => Ok(Value::Int(*i)),
        Value::Bool(b) => Ok(Value::Int(i64::from(*b))),
        Value::Float(f) => {
            let truncated = f.trunc();
            if f.is_finite() && truncated >= i64::MIN as f64 && truncated <= i64::MAX as f64 {
                Ok(Value::Int(truncated as i64))
            } else {
                Err(coercion_failed(data, "int"))
            }
        }
        Value::Str(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| coercion_failed(data, "int")),
        _ => Err(coercion_failed(data, "int")),
    }
}

fn coerce_float(data: &Value) -> Result<Value> {
    match data {
        Value::Float(f) => Ok(Value::Float(*f)),
        Value::Int(i) => Ok(Value::Float(*i as f64)),
        Value::Bool(b) => Ok(Value::Float(if *b { 1.0 } else { 0.0 })),
        Value::Str(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| coercion_failed(data, "float")),
        _ => Err(coercion_failed(data, "float")),
    }
}

fn coerce_bool(data: &Value) -> Result<Value> {
    match data {
        Value::Bool(b) => Ok(Value::Bool(*b)),
        Value::Int(i) => Ok(Value::Bool(*i != 0)),
        Value::Float(f) => Ok(Value::Bool(*f != 0.0)),
        Value::Str(s) => s
            .trim()
            .parse::<bool>()
            .map(Value::Bool)
            .map_err(|_| coercion_failed(data, "bool")),
        _ => Err(coercion_failed(data, "bool")),
    }
}

fn coerce_bytes(data: &Value) -> Result<Value> {
    match data {
        Value::Bytes(b) => Ok(Value::Bytes(b.clone())),
        Value::Str(s) => Ok(Value::Bytes(s.clone().into_bytes())),
        _ => Err(coercion_failed(data, "bytes")),
    }
}

fn coerce_dict(data: &Value) -> Result<Value> {
    match data {
        Value::Dict(map) => Ok(Value::Dict(map.clone())),
        Value::Str(s) => match from_json(s, false) {
            Ok(Value::Dict(map)) => Ok(Value::Dict(map)),
            _ => Err(coercion_failed(data, "dict")),
        },
        _ => Err(coercion_failed(data, "dict")),
    }
}

fn coerce_sequence(data: &Value) -> Result<Vec<Value>> {
    match data {
        Value::List(items) | Value::Tuple(items) => Ok(items.clone()),
        Value::Str(s) => match from_json(s, false) {
            Ok(Value::List(items)) => Ok(items),
            _ => Err(coercion_failed(data, "list")),
        },
        _ => Err(coercion_failed(data, "list")),
    }
}

fn coerce_uuid(data: &Value, version: usize) -> Result<Value> {
    let parsed = match data {
        Value::Uuid(u) => *u,
        Value::Str(s) => Uuid::parse_str(s.trim())
            .map_err(|_| coercion_failed(data, "uuid"))?,
        _ => return Err(coercion_failed(data, "uuid")),
    };

    if parsed.get_version_num() == version {
        Ok(Value::Uuid(parsed))
    } else {
        Err(SerialError::UnsupportedType(format!(
            "UUID version mismatch: expected {version}, found {}",
            parsed.get_version_num()
        )))
    }
}

/// Serialize `data` to JSON text.
///
/// Untagged form (`container = false`) carries only natively
/// JSON-representable values; a `bytes`, `tuple` or `uuid*` value anywhere
/// in the structure fails with [`SerialError::SerializationError`] unless
/// `skip_invalid` drops the offending dict entries / list elements.
///
/// Tagged form (`container = true`) wraps the payload as
/// `{"type": <tag>, "value": <payload>}` so the original semantic kind
/// survives the wire: bytes travel base64-encoded, UUIDs as hyphenated
/// text, tuples as arrays.
pub fn to_json(data: &Value, skip_invalid: bool, container: bool) -> Result<String> {
    if !container {
        // Surface the same error for top-level non-native values whether or
        // not skipping was requested; there is no member to drop.
        let payload = native_payload(data, skip_invalid)?;
        return serde_json::to_string(&payload)
            .map_err(|e| SerialError::SerializationError(e.to_string()));
    }

    let type_tag = get_value_type(data, false)?;
    let payload = transport_payload(data, skip_invalid)?;
    let envelope = Envelope {
        type_tag: type_tag.as_tag().to_string(),
        value: payload,
    };
    serde_json::to_string(&envelope).map_err(|e| SerialError::SerializationError(e.to_string()))
}

/// Deserialize JSON text back to a [`Value`].
///
/// Untagged form mirrors native JSON typing only: integral numbers become
/// `int`, other numbers `float`, objects `dict`, arrays `list`. Callers
/// needing richer kinds (`uuid*`, `tuple`, `bytes`) use the tagged form,
/// which reconstructs the payload with the named tag's own constructor.
pub fn from_json(data: &str, container: bool) -> Result<Value> {
    let parsed: JsonValue = serde_json::from_str(data)
        .map_err(|e| SerialError::DeserializationError(format!("invalid JSON: {e}")))?;

    if !container {
        return Ok(native_value(parsed));
    }

    let envelope: Envelope = serde_json::from_value(parsed)
        .map_err(|e| SerialError::DeserializationError(format!("malformed envelope: {e}")))?;

    let tag = DataType::from_tag(&envelope.type_tag).ok_or_else(|| {
        SerialError::DeserializationError(format!("unknown type tag '{}'", envelope.type_tag))
    })?;

    reconstruct(tag, envelope.value)
}

/// JSON projection limited to natively representable kinds.
fn native_payload(data: &Value, skip_invalid: bool) -> Result<JsonValue> {
    match data {
        Value::None => Ok(JsonValue::Null),
        Value::Bool(b) => Ok(JsonValue::Bool(*b)),
        Value::Int(i) => Ok(JsonValue::from(*i)),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(JsonValue::Number)
            .ok_or_else(|| {
                SerialError::SerializationError(format!("float {f} has no JSON representation"))
            }),
        Value::Str(s) => Ok(JsonValue::String(s.clone())),
        Value::Dict(map) => {
            let mut entries = serde_json::Map::new();
            for (key, value) in map {
                match native_payload(value, skip_invalid) {
                    Ok(json) => {
                        entries.insert(key.clone(), json);
                    }
                    Err(err) if skip_invalid => {
                        Logger::new(Component::Serializer)
                            .warn(format!("dropping dict entry '{key}': {err}"));
                    }
                    Err(err) => return Err(err),
                }
            }
            Ok(JsonValue::Object(entries))
        }
        Value::List(items) => {
            let mut entries = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                match native_payload(item, skip_invalid) {
                    Ok(json) => entries.push(json),
                    Err(err) if skip_invalid => {
                        Logger::new(Component::Serializer)
                            .warn(format!("dropping list element {index}: {err}"));
                    }
                    Err(err) => return Err(err),
                }
            }
            Ok(JsonValue::Array(entries))
        }
        Value::Bytes(_) | Value::Tuple(_) | Value::Uuid(_) => {
            Err(SerialError::SerializationError(format!(
                "'{}' values need container tagging to survive JSON",
                kind_name(data)
            )))
        }
    }
}

/// Payload for the tagged envelope: the top-level value is transported
/// losslessly even when JSON has no native form for it; nested members
/// follow the untagged rules, since only the top-level tag is recorded.
fn transport_payload(data: &Value, skip_invalid: bool) -> Result<JsonValue> {
    match data {
        Value::Bytes(bytes) => Ok(JsonValue::String(b64::encode(bytes))),
        Value::Uuid(u) => Ok(JsonValue::String(u.to_string())),
        Value::Tuple(items) => {
            let mut entries = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                match native_payload(item, skip_invalid) {
                    Ok(json) => entries.push(json),
                    Err(err) if skip_invalid => {
                        Logger::new(Component::Serializer)
                            .warn(format!("dropping tuple element {index}: {err}"));
                    }
                    Err(err) => return Err(err),
                }
            }
            Ok(JsonValue::Array(entries))
        }
        other => native_payload(other, skip_invalid),
    }
}

fn kind_name(data: &Value) -> &'static str {
    match data {
        Value::None => "none",
        Value::Int(_) => "int",
        Value::Float(_) => "float",
        Value::Str(_) => "str",
        Value::Bool(_) => "bool",
        Value::Bytes(_) => "bytes",
        Value::Dict(_) => "dict",
        Value::List(_) => "list",
        Value::Tuple(_) => "tuple",
        Value::Uuid(_) => "uuid",
    }
}

/// Map a decoded JSON value onto the native subset of [`Value`].
fn native_value(json: JsonValue) -> Value {
    match json {
        JsonValue::Null => Value::None,
        JsonValue::Bool(b) => Value::Bool(b),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            // Integers beyond i64 and all fractional numbers land here.
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        JsonValue::String(s) => Value::Str(s),
        JsonValue::Array(items) => Value::List(items.into_iter().map(native_value).collect()),
        JsonValue::Object(map) => {
            let entries: BTreeMap<String, Value> = map
                .into_iter()
                .map(|(k, v)| (k, native_value(v)))
                .collect();
            Value::Dict(entries)
        }
    }
}

/// Rebuild a value from an envelope payload using the tag's own
/// constructor. A payload that does not fit the tag fails with
/// [`SerialError::DeserializationError`].
fn reconstruct(tag: DataType, payload: JsonValue) -> Result<Value> {
    let mismatch = |payload: &JsonValue| {
        SerialError::DeserializationError(format!(
            "payload {payload} does not match tag '{tag}'"
        ))
    };

    match tag {
        DataType::None => match payload {
            JsonValue::Null => Ok(Value::None),
            other => Err(mismatch(&other)),
        },
        DataType::Int => payload
            .as_i64()
            .map(Value::Int)
            .ok_or_else(|| mismatch(&payload)),
        DataType::Float => match payload {
            JsonValue::Number(ref n) => n
                .as_f64()
                .map(Value::Float)
                .ok_or_else(|| mismatch(&payload)),
            other => Err(mismatch(&other)),
        },
        DataType::Str => match payload {
            JsonValue::String(s) => Ok(Value::Str(s)),
            other => Err(mismatch(&other)),
        },
        DataType::Bool => match payload {
            JsonValue::Bool(b) => Ok(Value::Bool(b)),
            other => Err(mismatch(&other)),
        },
        DataType::Bytes => match payload {
            JsonValue::String(text) => b64::decode(&text)
                .map(Value::Bytes)
                .map_err(|e| SerialError::DeserializationError(format!("bad bytes payload: {e}"))),
            other => Err(mismatch(&other)),
        },
        DataType::Dict => match payload {
            JsonValue::Object(_) => Ok(native_value(payload)),
            other => Err(mismatch(&other)),
        },
        DataType::List => match payload {
            JsonValue::Array(_) => Ok(native_value(payload)),
            other => Err(mismatch(&other)),
        },
        DataType::Tuple => match payload {
            JsonValue::Array(items) => {
                Ok(Value::Tuple(items.into_iter().map(native_value).collect()))
            }
            other => Err(mismatch(&other)),
        },
        DataType::Uuid1 => reconstruct_uuid(payload, 1),
        DataType::Uuid3 => reconstruct_uuid(payload, 3),
        DataType::Uuid4 => reconstruct_uuid(payload, 4),
        DataType::Uuid5 => reconstruct_uuid(payload, 5),
    }
}

fn reconstruct_uuid(payload: JsonValue, version: usize) -> Result<Value> {
    let text = match payload {
        JsonValue::String(s) => s,
        other => {
            return Err(SerialError::DeserializationError(format!(
                "payload {other} does not match tag 'uuid{version}'"
            )))
        }
    };

    let parsed = Uuid::parse_str(&text).map_err(|e| {
        SerialError::DeserializationError(format!("'{text}' is not a valid UUID: {e}"))
    })?;

    if parsed.get_version_num() != version {
        return Err(SerialError::DeserializationError(format!(
            "UUID version mismatch: tag says {version}, value is version {}",
            parsed.get_version_num()
        )));
    }

    Ok(Value::Uuid(parsed))
}
