//! The closed value model moved across the tagged wire format.

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use serde_json::Value as JsonValue;
use uuid::Uuid;

use valise_common::b64;

/// Semantic kind of a [`Value`]. The canonical lower-case name doubles as
/// the wire-format discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DataType {
    None,
    Int,
    Float,
    Str,
    Bool,
    Bytes,
    Dict,
    List,
    /// Shared kind for tuple- and set-shaped sequences; set-vs-tuple
    /// identity is not preserved across the wire.
    Tuple,
    Uuid1,
    Uuid3,
    Uuid4,
    Uuid5,
}

impl DataType {
    /// Canonical wire tag for this kind.
    pub fn as_tag(&self) -> &'static str {
        match self {
            DataType::None => "none",
            DataType::Int => "int",
            DataType::Float => "float",
            DataType::Str => "str",
            DataType::Bool => "bool",
            DataType::Bytes => "bytes",
            DataType::Dict => "dict",
            DataType::List => "list",
            DataType::Tuple => "tuple",
            DataType::Uuid1 => "uuid1",
            DataType::Uuid3 => "uuid3",
            DataType::Uuid4 => "uuid4",
            DataType::Uuid5 => "uuid5",
        }
    }

    /// Resolve a wire tag. Long-form aliases from older exports
    /// (`integer`, `string`, ...) map onto the same variants; emission
    /// always uses the canonical short tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "none" => Some(DataType::None),
            "int" | "integer" => Some(DataType::Int),
            "float" => Some(DataType::Float),
            "str" | "string" => Some(DataType::Str),
            "bool" | "boolean" => Some(DataType::Bool),
            "bytes" => Some(DataType::Bytes),
            "dict" | "dictionary" => Some(DataType::Dict),
            "list" => Some(DataType::List),
            "tuple" | "set" => Some(DataType::Tuple),
            "uuid1" => Some(DataType::Uuid1),
            "uuid3" => Some(DataType::Uuid3),
            "uuid4" => Some(DataType::Uuid4),
            "uuid5" => Some(DataType::Uuid5),
            _ => None,
        }
    }

    /// Whether JSON can carry this kind natively, without transport
    /// encoding.
    pub fn is_json_native(&self) -> bool {
        matches!(
            self,
            DataType::None
                | DataType::Int
                | DataType::Float
                | DataType::Str
                | DataType::Bool
                | DataType::Dict
                | DataType::List
        )
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}

/// A value of one of the closed set of semantic kinds.
///
/// Dict uses an ordered map so serialized output is deterministic.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    None,
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Bytes(Vec<u8>),
    Dict(BTreeMap<String, Value>),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    Uuid(Uuid),
}

impl Value {
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Dict(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            Value::Uuid(u) => Some(*u),
            _ => None,
        }
    }

    /// Lossy JSON projection used for string rendering: bytes become
    /// base64 text, UUIDs become hyphenated text, tuples become arrays.
    /// Floats JSON cannot carry (NaN, infinities) become null.
    fn display_json(&self) -> JsonValue {
        match self {
            Value::None => JsonValue::Null,
            Value::Int(i) => JsonValue::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Value::Str(s) => JsonValue::String(s.clone()),
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Bytes(bytes) => JsonValue::String(b64::encode(bytes)),
            Value::Dict(map) => {
                let entries = map
                    .iter()
                    .map(|(k, v)| (k.clone(), v.display_json()))
                    .collect();
                JsonValue::Object(entries)
            }
            Value::List(items) | Value::Tuple(items) => {
                JsonValue::Array(items.iter().map(Value::display_json).collect())
            }
            Value::Uuid(u) => JsonValue::String(u.to_string()),
        }
    }
}

/// String projection of a value, as produced by coercion to `str`:
/// scalars render directly, containers render as JSON text, bytes as
/// base64 text, and `none` as the empty string.
impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => Ok(()),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Bytes(bytes) => write!(f, "{}", b64::encode(bytes)),
            Value::Uuid(u) => write!(f, "{u}"),
            Value::Dict(_) | Value::List(_) | Value::Tuple(_) => {
                write!(f, "{}", self.display_json())
            }
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(value: BTreeMap<String, Value>) -> Self {
        Value::Dict(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<Uuid> for Value {
    fn from(value: Uuid) -> Self {
        Value::Uuid(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Value::None,
        }
    }
}
