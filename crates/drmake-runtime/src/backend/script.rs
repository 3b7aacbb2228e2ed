//! Backend that renders docker commands as a POSIX shell script.
//!
//! Nothing is executed. The rendered script performs, in order, the same
//! volume preparation, builds, runs, and artifact copies a live run would.

use std::fmt::Write as _;
use std::path::PathBuf;

use drmake_common::config::DrmakeConfig;
use drmake_common::constants::{COPY_HELPER_IMAGE, HOST_MOUNT, WORK_MOUNT};
use drmake_common::error::Result;

use super::{ArtifactCopy, ContainerRuntime};

/// Heredoc terminator feeding recipes to `docker build`.
const RECIPE_DELIMITER: &str = "DRMAKE_RECIPE";

/// Returns a heredoc terminator that no line of `recipe` equals.
fn delimiter_for(recipe: &str) -> String {
    let taken = |candidate: &str| recipe.lines().any(|line| line == candidate);
    let mut delimiter = RECIPE_DELIMITER.to_string();
    let mut suffix = 0_usize;
    while taken(&delimiter) {
        suffix += 1;
        delimiter = format!("{RECIPE_DELIMITER}_{suffix}");
    }
    delimiter
}

/// Quotes `s` for a POSIX shell.
fn quote(s: &str) -> String {
    if !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@%+,".contains(c))
    {
        return s.to_string();
    }
    format!("'{}'", s.replace('\'', r"'\''"))
}

/// Renders runtime operations as shell commands.
#[derive(Debug, Clone)]
pub struct ScriptRuntime {
    base_dir: PathBuf,
    volume: String,
    host_volume: bool,
    fresh: bool,
    script: String,
}

impl ScriptRuntime {
    /// Creates an empty script for one configuration.
    pub fn new(config: &DrmakeConfig) -> Self {
        Self {
            base_dir: config.base_dir.clone(),
            volume: config.volume_name(),
            host_volume: config.host_volume,
            fresh: config.fresh,
            script: String::from("#!/bin/sh\nset -e\n"),
        }
    }

    /// Returns the rendered script.
    pub fn script(&self) -> &str {
        &self.script
    }

    /// Consumes the runtime, returning the rendered script.
    pub fn into_script(self) -> String {
        self.script
    }

    fn line(&mut self, line: &str) {
        self.script.push_str(line);
        self.script.push('\n');
    }

    fn host_mount(&self) -> String {
        quote(&format!("{}:{HOST_MOUNT}", self.base_dir.display()))
    }

    fn work_mount(&self) -> String {
        quote(&format!("{}:{WORK_MOUNT}", self.volume))
    }
}

impl ContainerRuntime for ScriptRuntime {
    fn prepare_volume(&mut self) -> Result<()> {
        if self.host_volume {
            return Ok(());
        }
        let volume = quote(&self.volume);
        if self.fresh {
            self.line(&format!("docker volume rm -f {volume}"));
        }
        let seed = format!(
            "docker volume create {volume} && docker run --rm -v {} -v {} {COPY_HELPER_IMAGE} cp -R {HOST_MOUNT}/. {WORK_MOUNT}",
            self.host_mount(),
            self.work_mount(),
        );
        self.line(&seed);
        Ok(())
    }

    fn build(&mut self, tag: &str, recipe: &str) -> Result<()> {
        let delimiter = delimiter_for(recipe);
        let _ = writeln!(
            self.script,
            "docker build --rm -t {} - <<'{delimiter}'",
            quote(tag)
        );
        self.script.push_str(recipe);
        if !recipe.ends_with('\n') {
            self.script.push('\n');
        }
        self.line(&delimiter);
        Ok(())
    }

    fn run(&mut self, tag: &str) -> Result<()> {
        let command = format!(
            "docker run --rm -v {} -w {WORK_MOUNT} -it {}",
            self.work_mount(),
            quote(tag)
        );
        self.line(&command);
        Ok(())
    }

    fn copy_artifact(&mut self, copy: &ArtifactCopy) -> Result<()> {
        let host_dir = quote(&copy.host_dir().display().to_string());
        let host_path = quote(&copy.host_path.display().to_string());
        self.line(&format!("mkdir -p {host_dir}"));
        let command = format!(
            "docker run --rm -v {} -v {} {COPY_HELPER_IMAGE} cp -R {} {}",
            self.host_mount(),
            self.work_mount(),
            quote(&copy.container_source()),
            quote(&copy.container_destination()),
        );
        self.line(&command);
        self.line(&format!(r#"chown -R "$(id -u):$(id -g)" {host_path}"#));
        Ok(())
    }
}
