//! Broadcast command - print the callback URLs notified on login/logout

use anyhow::Result;
use sso_registry::RegistryConfig;
use std::path::Path;

use super::{load_manifest, new_registry, register_all};
use crate::ui;

pub fn run(config: RegistryConfig, manifest: &Path, json: bool, verbose: bool) -> Result<()> {
    let apps = load_manifest(manifest)?;
    let mut registry = new_registry(config);

    for (name, outcome) in register_all(&mut registry, apps) {
        if let Err(err) = outcome {
            tracing::warn!(%name, "skipping app: {}", err.coded_message());
        }
    }

    // Registry order is unspecified; sort for stable output.
    let mut urls = registry.formatted_urls().to_vec();
    urls.sort();

    if json {
        println!("{}", serde_json::to_string_pretty(&urls)?);
        return Ok(());
    }

    if urls.is_empty() {
        ui::info("No applications registered");
        return Ok(());
    }

    if verbose {
        ui::header("Broadcast URLs");
    }
    for url in urls {
        println!("{}", url);
    }

    Ok(())
}
