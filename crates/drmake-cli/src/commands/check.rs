//! `drmake check` — Validate every dependency and inheritance reference.

use drmake_common::config::DrmakeConfig;
use drmake_manifest::parser;

/// Executes the `check` command.
///
/// # Errors
///
/// Returns an error if the manifest cannot be parsed, references an unknown
/// target, or contains a cycle.
pub fn execute(config: &DrmakeConfig) -> anyhow::Result<()> {
    let registry = parser::load_manifest(&config.manifest)?;
    tracing::info!(manifest = %config.manifest.display(), "checking manifest");
    registry.validate()?;
    println!(
        "{}: {} target(s), default {}",
        config.manifest.display(),
        registry.len(),
        registry.default_target().unwrap_or("(none)")
    );
    Ok(())
}
