//! Run configuration for a drmake invocation.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_MANIFEST;
use crate::naming;

/// Root configuration for one drmake invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrmakeConfig {
    /// Path to the manifest file.
    pub manifest: PathBuf,
    /// Directory that `./path` references, workspace recipes, and artifact
    /// destinations resolve against.
    pub base_dir: PathBuf,
    /// Mount the base directory as the work volume instead of a named volume.
    pub host_volume: bool,
    /// Drop and recreate the work volume before running.
    pub fresh: bool,
}

impl DrmakeConfig {
    /// Returns the image namespace derived from the manifest path.
    pub fn image_name(&self) -> String {
        naming::image_namespace(&self.manifest)
    }

    /// Returns the volume mounted on the work directory.
    ///
    /// With `host_volume` this is the base directory itself.
    pub fn volume_name(&self) -> String {
        if self.host_volume {
            self.base_dir.to_string_lossy().into_owned()
        } else {
            self.image_name()
        }
    }
}

impl Default for DrmakeConfig {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from(DEFAULT_MANIFEST),
            base_dir: PathBuf::from("."),
            host_volume: false,
            fresh: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_reads_conventional_manifest() {
        let config = DrmakeConfig::default();
        assert_eq!(config.manifest, PathBuf::from("Makefile.phd"));
        assert!(!config.host_volume);
        assert!(!config.fresh);
    }

    #[test]
    fn volume_is_image_name_unless_host() {
        let mut config = DrmakeConfig {
            base_dir: PathBuf::from("/src/project"),
            ..DrmakeConfig::default()
        };
        assert_eq!(config.volume_name(), config.image_name());

        config.host_volume = true;
        assert_eq!(config.volume_name(), "/src/project");
    }

    #[test]
    fn config_serialization_roundtrip() {
        let config = DrmakeConfig {
            manifest: PathBuf::from("build/Makefile.phd"),
            base_dir: PathBuf::from("/tmp/ws"),
            host_volume: true,
            fresh: true,
        };
        let json = serde_json::to_string(&config).expect("serialize");
        let back: DrmakeConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, config);
    }
}
