//! `drmake recipe` — Print the assembled recipe of a target.

use clap::Args;
use drmake_common::config::DrmakeConfig;
use drmake_manifest::parser;
use drmake_manifest::recipe::RecipeResolver;

/// Arguments for the `recipe` command.
#[derive(Args, Debug)]
pub struct RecipeArgs {
    /// Target whose recipe to print (defaults to the first target).
    pub target: Option<String>,
}

/// Executes the `recipe` command.
///
/// # Errors
///
/// Returns an error if parsing or recipe resolution fails.
pub fn execute(config: &DrmakeConfig, args: RecipeArgs) -> anyhow::Result<()> {
    let registry = parser::load_manifest(&config.manifest)?;
    let requested = super::requested_targets(&registry, args.target.into_iter().collect())?;
    let resolver = RecipeResolver::new(&registry, config.base_dir.clone());
    for name in &requested {
        tracing::info!(%name, "printing recipe");
        print!("{}", resolver.resolve_name(name)?);
    }
    Ok(())
}
