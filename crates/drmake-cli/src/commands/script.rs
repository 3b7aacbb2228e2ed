//! `drmake script` — Print the docker script that builds and runs targets.

use clap::Args;
use drmake_common::config::DrmakeConfig;
use drmake_manifest::recipe::RecipeResolver;
use drmake_manifest::{parser, plan};
use drmake_runtime::backend::script::ScriptRuntime;
use drmake_runtime::engine::Engine;

/// Arguments for the `script` command.
#[derive(Args, Debug)]
pub struct ScriptArgs {
    /// Targets to run (defaults to the first target in the manifest).
    pub targets: Vec<String>,

    /// Recreate the work volume before running.
    #[arg(long)]
    pub fresh: bool,

    /// Mount the base directory as the work volume.
    #[arg(long)]
    pub host: bool,
}

/// Executes the `script` command.
///
/// Plans the requested targets, then renders volume preparation, one
/// build and run per target, and artifact copies as a shell script on
/// stdout. Nothing is executed.
///
/// # Errors
///
/// Returns an error if parsing, planning, or recipe resolution fails.
pub fn execute(config: DrmakeConfig, args: ScriptArgs) -> anyhow::Result<()> {
    let config = DrmakeConfig {
        fresh: args.fresh,
        host_volume: args.host,
        ..config
    };
    let registry = parser::load_manifest(&config.manifest)?;
    let requested = super::requested_targets(&registry, args.targets)?;
    tracing::info!(
        targets = ?requested,
        fresh = config.fresh,
        host = config.host_volume,
        "rendering script"
    );
    let order = plan::execution_order(&registry, &requested)?;

    let resolver = RecipeResolver::new(&registry, config.base_dir.clone());
    let mut engine = Engine::new(resolver, config.image_name(), ScriptRuntime::new(&config));
    engine.run_plan(&order)?;

    print!("{}", engine.into_runtime().into_script());
    Ok(())
}
