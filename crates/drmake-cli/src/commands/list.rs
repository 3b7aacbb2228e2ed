//! `drmake list` — List described targets.

use clap::Args;
use drmake_common::config::DrmakeConfig;
use drmake_manifest::{listing, parser};

use crate::output;

/// Arguments for the `list` command.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print bare names instead of invocation lines.
    #[arg(long)]
    pub names: bool,
}

/// Executes the `list` command.
///
/// Targets without a `LABEL description=...` are not listed.
///
/// # Errors
///
/// Returns an error if the manifest cannot be read or parsed.
pub fn execute(config: &DrmakeConfig, args: &ListArgs) -> anyhow::Result<()> {
    tracing::info!(manifest = %config.manifest.display(), "listing targets");
    let registry = parser::load_manifest(&config.manifest)?;
    if args.names {
        for entry in listing::described(&registry) {
            println!("{}", entry.name);
        }
    } else {
        print!("{}", output::invocation_lines(&listing::render(&registry)));
    }
    Ok(())
}
