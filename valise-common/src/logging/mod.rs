// Logging utilities for the Valise crates
//
// Thin component-scoped wrapper over the `log` facade so every message
// carries the subsystem it came from. Secrets (keys, passwords, plaintext)
// must never be passed through these methods.

use log::{debug, error, info, warn};
use std::fmt::{self, Display, Formatter};

/// Predefined components for logging categorization
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Component {
    Serializer,
    Vault,
    Custom(&'static str),
}

impl Component {
    /// Get the string representation of the component
    pub fn as_str(&self) -> &str {
        match self {
            Component::Serializer => "Serializer",
            Component::Vault => "Vault",
            Component::Custom(name) => name,
        }
    }
}

// Lightweight Display helper to avoid prefix String allocations
struct PrefixDisplay<'a> {
    component: Component,
    scope: Option<&'a str>,
}

impl Display for PrefixDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.scope {
            Some(scope) => write!(f, "{}|{}", self.component.as_str(), scope),
            None => write!(f, "{}", self.component.as_str()),
        }
    }
}

/// A helper for creating component-specific loggers
#[derive(Clone)]
pub struct Logger {
    /// Component this logger is for
    component: Component,
    /// Optional operation scope, shown after the component
    scope: Option<String>,
}

impl Logger {
    /// Create a new logger for a specific component
    pub fn new(component: Component) -> Self {
        Self {
            component,
            scope: None,
        }
    }

    /// Create a logger scoped to a specific operation
    pub fn with_scope(&self, scope: impl Into<String>) -> Self {
        Self {
            component: self.component,
            scope: Some(scope.into()),
        }
    }

    fn prefix(&self) -> PrefixDisplay<'_> {
        PrefixDisplay {
            component: self.component,
            scope: self.scope.as_deref(),
        }
    }

    /// Log a debug message
    pub fn debug(&self, message: impl Into<String>) {
        if log::log_enabled!(log::Level::Debug) {
            debug!("[{}] {}", self.prefix(), message.into());
        }
    }

    /// Log an info message
    pub fn info(&self, message: impl Into<String>) {
        if log::log_enabled!(log::Level::Info) {
            info!("[{}] {}", self.prefix(), message.into());
        }
    }

    /// Log a warning message
    pub fn warn(&self, message: impl Into<String>) {
        if log::log_enabled!(log::Level::Warn) {
            warn!("[{}] {}", self.prefix(), message.into());
        }
    }

    /// Log an error message
    pub fn error(&self, message: impl Into<String>) {
        if log::log_enabled!(log::Level::Error) {
            error!("[{}] {}", self.prefix(), message.into());
        }
    }
}
