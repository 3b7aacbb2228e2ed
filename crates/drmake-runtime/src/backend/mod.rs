//! Container runtime abstraction.

pub mod script;

use std::path::{Path, PathBuf};

use drmake_common::constants::{HOST_MOUNT, WORK_MOUNT};
use drmake_common::error::Result;

/// One artifact to copy from the work volume back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactCopy {
    /// Source path relative to the work volume.
    pub source: String,
    /// Destination path relative to the base directory, as declared.
    pub destination: String,
    /// Destination resolved against the base directory.
    pub host_path: PathBuf,
}

impl ArtifactCopy {
    /// Creates a copy rule resolving `destination` under `base_dir`.
    pub fn new(base_dir: &Path, source: &str, destination: &str) -> Self {
        Self {
            source: source.to_string(),
            destination: destination.to_string(),
            host_path: base_dir.join(destination),
        }
    }

    /// Source path inside the build container.
    pub fn container_source(&self) -> String {
        format!("{WORK_MOUNT}/{}", self.source)
    }

    /// Destination path inside the copy helper, where the base directory is
    /// mounted on the host mount point.
    pub fn container_destination(&self) -> String {
        format!("{HOST_MOUNT}/{}", self.destination)
    }

    /// Host directory that must exist before copying.
    ///
    /// A destination ending in `/` names a directory; otherwise its parent.
    pub fn host_dir(&self) -> &Path {
        if self.destination.ends_with('/') {
            &self.host_path
        } else {
            self.host_path.parent().unwrap_or(&self.host_path)
        }
    }
}

/// Operations the engine needs from a container runtime.
///
/// Implementors decide how a step is carried out: executing a tool,
/// recording the step, or rendering it as text.
pub trait ContainerRuntime {
    /// Prepares the work volume shared by all targets of one run.
    ///
    /// # Errors
    ///
    /// Returns an error if the volume cannot be prepared.
    fn prepare_volume(&mut self) -> Result<()>;

    /// Builds an image tagged `tag` from recipe text.
    ///
    /// # Errors
    ///
    /// Returns an error if the build fails.
    fn build(&mut self, tag: &str, recipe: &str) -> Result<()>;

    /// Runs the image tagged `tag` with the work volume mounted.
    ///
    /// # Errors
    ///
    /// Returns an error if the container cannot be run.
    fn run(&mut self, tag: &str) -> Result<()>;

    /// Copies one artifact from the work volume to the host.
    ///
    /// # Errors
    ///
    /// Returns an error if the copy fails.
    fn copy_artifact(&mut self, copy: &ArtifactCopy) -> Result<()>;
}
