//! CLI command definitions and dispatch.

pub mod check;
pub mod list;
pub mod plan;
pub mod recipe;
pub mod script;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use drmake_common::config::DrmakeConfig;
use drmake_common::constants::DEFAULT_MANIFEST;
use drmake_manifest::registry::Registry;

/// drmake — build targets in containers, described by one manifest.
#[derive(Parser, Debug)]
#[command(name = "drmake", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Manifest to read targets from, relative to the base directory.
    #[arg(short = 'f', long = "file", global = true, default_value = DEFAULT_MANIFEST)]
    pub file: PathBuf,

    /// Base directory for relative recipes and artifact destinations
    /// (defaults to the current directory).
    #[arg(short = 'C', long = "directory", global = true, env = "DRMAKE_DIR")]
    pub directory: Option<PathBuf>,

    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List described targets.
    List(list::ListArgs),
    /// Show the execution order for targets.
    Plan(plan::PlanArgs),
    /// Print the assembled recipe of a target.
    Recipe(recipe::RecipeArgs),
    /// Validate every dependency and inheritance reference.
    Check,
    /// Print the shell script that builds and runs targets with docker.
    Script(script::ScriptArgs),
}

impl Cli {
    /// Builds the run configuration from global flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn config(&self) -> anyhow::Result<DrmakeConfig> {
        let base_dir = match &self.directory {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        Ok(DrmakeConfig {
            manifest: base_dir.join(&self.file),
            base_dir,
            ..DrmakeConfig::default()
        })
    }
}

/// Returns `targets`, or the manifest's default target when none are given.
///
/// # Errors
///
/// Returns an error if no targets are given and the manifest declares none.
pub fn requested_targets(registry: &Registry, targets: Vec<String>) -> anyhow::Result<Vec<String>> {
    if !targets.is_empty() {
        return Ok(targets);
    }
    registry
        .default_target()
        .map(|name| vec![name.to_string()])
        .ok_or_else(|| anyhow::anyhow!("manifest declares no targets"))
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = cli.config()?;
    match cli.command {
        Command::List(args) => list::execute(&config, &args),
        Command::Plan(args) => plan::execute(&config, args),
        Command::Recipe(args) => recipe::execute(&config, args),
        Command::Check => check::execute(&config),
        Command::Script(args) => script::execute(config, args),
    }
}

#[cfg(test)]
mod tests {
    use drmake_manifest::parser::parse_manifest;

    use super::*;

    #[test]
    fn explicit_targets_are_kept() {
        let registry = parse_manifest("FROM alpine AS a\nFROM alpine AS b").expect("parse");
        let targets = requested_targets(&registry, vec!["b".into()]).expect("targets");
        assert_eq!(targets, vec!["b"]);
    }

    #[test]
    fn default_target_when_none_requested() {
        let registry = parse_manifest("FROM alpine AS a\nFROM alpine AS b").expect("parse");
        let targets = requested_targets(&registry, Vec::new()).expect("targets");
        assert_eq!(targets, vec!["a"]);
    }

    #[test]
    fn empty_manifest_without_request_is_error() {
        let registry = parse_manifest("").expect("parse");
        assert!(requested_targets(&registry, Vec::new()).is_err());
    }

    #[test]
    fn config_resolves_manifest_under_directory() {
        let cli = Cli::parse_from(["drmake", "-C", "/ws", "-f", "build.phd", "check"]);
        let config = cli.config().expect("config");
        assert_eq!(config.base_dir, PathBuf::from("/ws"));
        assert_eq!(config.manifest, PathBuf::from("/ws/build.phd"));
    }

    fn workspace(manifest: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        std::fs::write(dir.path().join(DEFAULT_MANIFEST), manifest).expect("failed to write");
        dir
    }

    fn run(dir: &tempfile::TempDir, args: &[&str]) -> anyhow::Result<()> {
        let dir = dir.path().to_string_lossy().into_owned();
        let argv = ["drmake", "-C", dir.as_str()].into_iter().chain(args.iter().copied());
        execute(Cli::parse_from(argv))
    }

    #[test]
    fn commands_succeed_on_valid_manifest() {
        let dir = workspace(
            "FROM alpine AS app USING out\nLABEL description=App\nRUN make\n\
             FROM #out AS out\nARTIFACT dist/app dist/\n",
        );
        run(&dir, &["check"]).expect("check");
        run(&dir, &["list"]).expect("list");
        run(&dir, &["plan", "--json"]).expect("plan");
        run(&dir, &["recipe", "app"]).expect("recipe");
        run(&dir, &["script", "--fresh", "app"]).expect("script");
    }

    #[test]
    fn cycle_fails_check_and_plan() {
        let dir = workspace("FROM alpine AS a USING b\nFROM alpine AS b USING a\n");
        assert!(run(&dir, &["check"]).is_err());
        assert!(run(&dir, &["plan"]).is_err());
    }

    #[test]
    fn missing_manifest_fails() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let dir_str = dir.path().to_string_lossy().into_owned();
        let cli = Cli::parse_from(["drmake", "-C", dir_str.as_str(), "list"]);
        let err = execute(cli).unwrap_err();
        assert!(err.to_string().contains("failed to read manifest"), "got: {err}");
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
