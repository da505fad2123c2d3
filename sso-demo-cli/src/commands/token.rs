//! Token command - derive the token for a single application

use anyhow::Result;
use sso_registry::{RegistryConfig, SsoApp};

use super::new_registry;
use crate::ui;

pub fn run(config: RegistryConfig, name: String, api_url: String, verbose: bool) -> Result<()> {
    let mut registry = new_registry(config);

    let token = registry
        .register(SsoApp::new(name.clone(), api_url))
        .map_err(|e| anyhow::anyhow!(e.coded_message()))?;

    if verbose {
        ui::key_value("Name", &name);
        if let Some(url) = registry.formatted_urls().first() {
            ui::key_value("Broadcast URL", url);
        }
    }
    println!("{}", token);

    Ok(())
}
