//! Content-derived image and volume names.

use std::path::Path;

use sha2::{Digest, Sha256};

use crate::constants::APP_NAME;

/// Number of hex characters of the manifest digest kept in image names.
const DIGEST_PREFIX_LEN: usize = 16;

/// Returns the image namespace for a manifest: `drmake-<digest prefix>`.
///
/// The digest covers the manifest path as given, so two manifests in
/// different directories never share images or volumes.
pub fn image_namespace(manifest: &Path) -> String {
    let digest = Sha256::digest(manifest.to_string_lossy().as_bytes());
    format!("{APP_NAME}-{}", hex::encode(&digest[..DIGEST_PREFIX_LEN / 2]))
}

/// Returns the image tag for one target: `<namespace>/<target>`.
pub fn target_tag(namespace: &str, target: &str) -> String {
    format!("{namespace}/{target}")
}
