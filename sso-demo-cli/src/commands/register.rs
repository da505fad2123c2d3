//! Register command - load a manifest and report each registration

use anyhow::{bail, Result};
use sso_registry::RegistryConfig;
use std::path::Path;

use super::{load_manifest, new_registry, register_all};
use crate::ui;

pub fn run(config: RegistryConfig, manifest: &Path, verbose: bool) -> Result<()> {
    ui::header("Registering Applications");

    let apps = load_manifest(manifest)?;
    let mut registry = new_registry(config);
    let outcomes = register_all(&mut registry, apps);

    let mut failed = 0usize;
    for (name, outcome) in &outcomes {
        match outcome {
            Ok(token) => {
                ui::success(&format!("{} registered", name));
                if verbose {
                    ui::key_value("Token", token.as_str());
                }
            }
            Err(err) => {
                failed += 1;
                ui::error(&format!("{}: {}", name, err.coded_message()));
            }
        }
    }

    ui::info(&format!(
        "{} registered, {} rejected",
        registry.len(),
        failed
    ));

    if registry.is_empty() && failed > 0 {
        bail!("No application in {} could be registered", manifest.display());
    }

    Ok(())
}
