//! Valise Common
//!
//! Shared utilities for the Valise stack.
//!
//! This crate provides:
//! - Component-based structured logging on top of the `log` facade
//! - The base64 transform shared by the tagged wire format and the vault
//! - Epoch timestamp generation

pub mod b64;
pub mod errors;
pub mod logging;
pub mod time;

pub use errors::CommonError;
pub use logging::{Component, Logger};
pub use time::timestamp;
