//! Line-oriented manifest parser.
//!
//! Transforms raw manifest text into a [`Registry`] in one pass. The only
//! state carried between lines is the target currently being filled: a
//! header line registers a new target and makes it current, and every
//! following body line belongs to it until the next header.

pub mod directive;
pub mod header;
pub mod lines;

use std::path::Path;

use drmake_common::constants::{
    ARGUMENT_KEYWORD, ARTIFACT_KEYWORD, HEADER_KEYWORD, METADATA_KEYWORD,
};
use drmake_common::error::{DrmakeError, Result};

use crate::registry::Registry;
use crate::target::{ImageRef, Target};

/// Reads and parses a manifest file.
///
/// # Errors
///
/// Returns `ManifestUnreadable` if the file cannot be read, or any error of
/// [`parse_manifest`].
pub fn load_manifest(path: &Path) -> Result<Registry> {
    tracing::info!(path = %path.display(), "loading manifest");
    let content = std::fs::read_to_string(path).map_err(|e| DrmakeError::ManifestUnreadable {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_manifest(&content)
}

/// Parses manifest text into a registry.
///
/// Lines before the first header are ignored. Blank lines and lines starting
/// with `#` are skipped. Dependencies may name targets declared later.
///
/// # Errors
///
/// Returns `MalformedArgumentDeclaration` if an `ARGENV` line does not carry
/// exactly one operand. No partial registry is returned.
pub fn parse_manifest(input: &str) -> Result<Registry> {
    tracing::info!("parsing manifest");
    let mut registry = Registry::new();
    let mut current: Option<String> = None;

    for logical in lines::logical_lines(input) {
        let line = logical.text.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        let Some((&keyword, operands)) = fields.split_first() else {
            continue;
        };

        if keyword.eq_ignore_ascii_case(HEADER_KEYWORD) {
            let Some(parsed) = header::parse_header(line) else {
                tracing::warn!(line = logical.number, "skipping malformed header");
                continue;
            };
            let target = Target::new(
                parsed.target_name(),
                ImageRef::parse(parsed.image),
                parsed.deps.iter().map(ToString::to_string).collect(),
            );
            tracing::debug!(line = logical.number, header = %target, "registered target");
            current = Some(target.name.clone());
            if registry.insert(target).is_some() {
                tracing::debug!(line = logical.number, "header replaced an earlier target");
            }
            continue;
        }

        let Some(target) = current.as_deref().and_then(|name| registry.get_mut(name)) else {
            continue;
        };

        if keyword.eq_ignore_ascii_case(ARTIFACT_KEYWORD) && !operands.is_empty() {
            let (source, destination) = directive::artifact(operands);
            tracing::debug!(name = %target.name, %source, %destination, "artifact");
            let _ = target.artifacts.insert(source, destination);
            continue;
        }

        if keyword.eq_ignore_ascii_case(ARGUMENT_KEYWORD) {
            let expanded = directive::argument(logical.number, operands)?;
            target.body.extend(expanded);
            continue;
        }

        if keyword.eq_ignore_ascii_case(METADATA_KEYWORD) && !operands.is_empty() {
            if let Some(description) = directive::description(operands) {
                target.description = Some(description);
            }
        }

        target.body.push(line.to_string());
    }

    tracing::info!(targets = registry.len(), "parsed manifest");
    Ok(registry)
}
