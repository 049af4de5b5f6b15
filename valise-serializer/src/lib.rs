//! Typed value coercion and tagged JSON serialization.
//!
//! This crate provides:
//! - The closed [`DataType`]/[`Value`] model moved across serialization
//!   boundaries
//! - Deterministic type detection ([`get_value_type`])
//! - Fail-soft coercion between kinds ([`set_value`])
//! - The tagged `{"type", "value"}` wire envelope ([`to_json`]/[`from_json`])
//!   for lossless recovery of the original semantic type

pub mod convert;
pub mod error;
pub mod value;

pub use convert::{from_json, get_value_type, set_value, to_json, try_set_value};
pub use error::{Result, SerialError};
pub use value::{DataType, Value};
