//! Command implementations

pub mod broadcast;
pub mod register;
pub mod token;

use anyhow::{Context, Result};
use sso_registry::{AppContext, AppRegistry, Module, RegistryConfig, SsoApp, SsoError, SsoToken};
use std::path::Path;

/// Host identifier handed to the registry.
const HOST_ID: &str = "sso-demo";

/// Build and initialize a registry the way a host would.
pub fn new_registry(config: RegistryConfig) -> AppRegistry {
    let mut registry = AppRegistry::with_config(config);
    registry.set_app(AppContext::new(HOST_ID));
    registry.init();
    registry
}

/// Read a JSON manifest of applications.
pub fn load_manifest(path: &Path) -> Result<Vec<SsoApp>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid manifest {}", path.display()))
}

/// Register every application in order, keeping each outcome.
pub fn register_all(
    registry: &mut AppRegistry,
    apps: Vec<SsoApp>,
) -> Vec<(String, Result<SsoToken, SsoError>)> {
    apps.into_iter()
        .map(|app| {
            let name = app.name.clone();
            let outcome = registry.register(app);
            if let Err(err) = &outcome {
                tracing::debug!(%name, code = err.code().as_i32(), "registration rejected");
            }
            (name, outcome)
        })
        .collect()
}
