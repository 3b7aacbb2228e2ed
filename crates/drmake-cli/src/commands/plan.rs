//! `drmake plan` — Show the execution order for targets.

use clap::Args;
use drmake_common::config::DrmakeConfig;
use drmake_manifest::{parser, plan};

use crate::output;

/// Arguments for the `plan` command.
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Targets to plan (defaults to the first target in the manifest).
    pub targets: Vec<String>,

    /// Print the plan as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Executes the `plan` command.
///
/// # Errors
///
/// Returns an error if parsing fails, a target is unknown, or dependencies
/// form a cycle.
pub fn execute(config: &DrmakeConfig, args: PlanArgs) -> anyhow::Result<()> {
    let registry = parser::load_manifest(&config.manifest)?;
    let requested = super::requested_targets(&registry, args.targets)?;
    tracing::info!(targets = ?requested, "planning targets");
    let order = plan::execution_order(&registry, &requested)?;
    let steps = output::plan_steps(&order);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&steps)?);
    } else {
        print!("{}", output::format_plan(&steps));
    }
    Ok(())
}
