//! Host lifecycle hooks.

use serde::{Deserialize, Serialize};

/// Opaque handle identifying the host application.
///
/// Modules keep it for identification only; it never changes their behavior.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppContext(pub String);

impl AppContext {
    /// Create a context handle.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the host identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A component driven by the host's lifecycle.
///
/// The host calls `set_app` and then `init` once, before any other use.
pub trait Module {
    /// Hand the module its host context.
    fn set_app(&mut self, app: AppContext);

    /// Prepare the module for use.
    fn init(&mut self);
}
