//! Recipe assembly by following inheritance references.
//!
//! A target's recipe is its inherited preface, a newline, then its body.
//! The preface comes from a literal base image, another target's resolved
//! recipe, a workspace recipe directory, or a path relative to the base
//! directory. Paths are joined explicitly; the process working directory is
//! never read or changed.

use std::path::{Path, PathBuf};

use drmake_common::constants::{HEADER_KEYWORD, RECIPE_FILE_NAME, WORKSPACE_TARGETS_DIR};
use drmake_common::error::{DrmakeError, Result};

use crate::registry::Registry;
use crate::target::{ImageRef, Target};

/// Trims the characters the preface boundary ignores: spaces, CR, and LF.
fn trim_blank(text: &str) -> &str {
    text.trim_matches(|c| matches!(c, ' ' | '\r' | '\n'))
}

/// Resolves recipes against one registry and base directory.
#[derive(Debug, Clone)]
pub struct RecipeResolver<'a> {
    registry: &'a Registry,
    base_dir: PathBuf,
}

impl<'a> RecipeResolver<'a> {
    /// Creates a resolver reading relative recipe files under `base_dir`.
    pub fn new(registry: &'a Registry, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            registry,
            base_dir: base_dir.into(),
        }
    }

    /// Directory that relative references resolve against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolves the recipe of the target named `name`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownTarget` if `name` is not registered, or any error of
    /// [`RecipeResolver::resolve`].
    pub fn resolve_name(&self, name: &str) -> Result<String> {
        self.resolve(self.registry.find(name)?)
    }

    /// Resolves the complete recipe text of `target`.
    ///
    /// A self-referencing target has an empty preface, so its recipe is a
    /// newline followed by its body.
    ///
    /// # Errors
    ///
    /// Returns `UnknownTarget` for a same-file reference to an absent target,
    /// `RecipeFileUnreadable` if a referenced recipe file cannot be read, or
    /// `DependencyCycle` if same-file references loop.
    pub fn resolve(&self, target: &Target) -> Result<String> {
        tracing::info!(name = %target.name, image = %target.image, "resolving recipe");
        let mut stack = Vec::new();
        self.resolve_with(target, &mut stack)
    }

    fn resolve_with(&self, target: &Target, stack: &mut Vec<String>) -> Result<String> {
        if stack.contains(&target.name) {
            let mut chain = stack.clone();
            chain.push(target.name.clone());
            return Err(DrmakeError::DependencyCycle { chain });
        }
        stack.push(target.name.clone());
        let preface = self.preface(target, stack)?;
        let _ = stack.pop();

        Ok(format!("{preface}\n{}", target.body_text()))
    }

    fn preface(&self, target: &Target, stack: &mut Vec<String>) -> Result<String> {
        match &target.image {
            ImageRef::Base(image) => Ok(format!("{HEADER_KEYWORD} {image}")),
            ImageRef::Target(_) if target.is_self_referencing() => Ok(String::new()),
            ImageRef::Target(parent) => {
                let parent = self.registry.find(parent)?;
                tracing::debug!(name = %target.name, parent = %parent.name, "inheriting recipe");
                let inherited = self.resolve_with(parent, stack)?;
                Ok(trim_blank(&inherited).to_string())
            }
            ImageRef::Workspace(name) => {
                let dir = self.base_dir.join(WORKSPACE_TARGETS_DIR).join(name);
                self.read_recipe(&target.image, &dir)
            }
            ImageRef::Path(path) => {
                let dir = self.base_dir.join(path);
                self.read_recipe(&target.image, &dir)
            }
        }
    }

    fn read_recipe(&self, reference: &ImageRef, dir: &Path) -> Result<String> {
        let path = dir.join(RECIPE_FILE_NAME);
        tracing::debug!(path = %path.display(), "reading recipe file");
        let content =
            std::fs::read_to_string(&path).map_err(|e| DrmakeError::RecipeFileUnreadable {
                reference: reference.to_string(),
                path,
                source: e,
            })?;
        Ok(trim_blank(&content).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_manifest;

    fn resolve(manifest: &str, name: &str) -> Result<String> {
        let registry = parse_manifest(manifest).expect("should parse");
        RecipeResolver::new(&registry, ".").resolve_name(name)
    }

    #[test]
    fn base_image_preface() {
        let recipe = resolve("FROM alpine:3.20 AS app\nRUN apk add make", "app").expect("resolve");
        assert_eq!(recipe, "FROM alpine:3.20\nRUN apk add make\n");
    }

    #[test]
    fn target_without_body() {
        let recipe = resolve("FROM alpine", "alpine").expect("resolve");
        assert_eq!(recipe, "FROM alpine\n");
    }

    #[test]
    fn same_file_inheritance_chains() {
        let manifest = "FROM alpine AS base\nRUN apk add gcc\n\
                        FROM #base AS build\nRUN make\n\
                        FROM #build AS test\nRUN make test";
        let recipe = resolve(manifest, "test").expect("resolve");
        assert_eq!(recipe, "FROM alpine\nRUN apk add gcc\nRUN make\nRUN make test\n");
    }

    #[test]
    fn self_reference_has_empty_preface() {
        let recipe = resolve("FROM #out AS out\nRUN true", "out").expect("resolve");
        assert_eq!(recipe, "\nRUN true\n");
    }

    #[test]
    fn inheriting_from_self_referencing_target() {
        let manifest = "FROM #out AS out\nRUN one\nFROM #out AS next\nRUN two";
        let recipe = resolve(manifest, "next").expect("resolve");
        assert_eq!(recipe, "RUN one\nRUN two\n");
    }

    #[test]
    fn unknown_parent_is_error() {
        let err = resolve("FROM #missing AS app", "app").unwrap_err();
        assert!(matches!(err, DrmakeError::UnknownTarget { ref name } if name == "missing"));
    }

    #[test]
    fn unknown_requested_target_is_error() {
        let err = resolve("FROM alpine", "nope").unwrap_err();
        assert!(matches!(err, DrmakeError::UnknownTarget { .. }));
    }

    #[test]
    fn inheritance_cycle_is_detected() {
        let err = resolve("FROM #b AS a\nFROM #a AS b", "a").unwrap_err();
        let DrmakeError::DependencyCycle { chain } = err else {
            panic!("expected cycle, got {err}");
        };
        assert_eq!(chain, vec!["a", "b", "a"]);
    }

    #[test]
    fn workspace_recipe_is_read_and_trimmed() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let recipe_dir = dir.path().join(".drmake/targets/toolchain");
        std::fs::create_dir_all(&recipe_dir).expect("failed to create dirs");
        std::fs::write(
            recipe_dir.join("Dockerfile"),
            "\n\nFROM rust:1.86\nRUN rustup component add clippy\n\n",
        )
        .expect("failed to write");

        let registry = parse_manifest("FROM &toolchain AS lint\nRUN cargo clippy").expect("parse");
        let recipe = RecipeResolver::new(&registry, dir.path())
            .resolve_name("lint")
            .expect("resolve");
        assert_eq!(
            recipe,
            "FROM rust:1.86\nRUN rustup component add clippy\nRUN cargo clippy\n"
        );
    }

    #[test]
    fn path_recipe_is_relative_to_base_dir() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let recipe_dir = dir.path().join("docker/dev");
        std::fs::create_dir_all(&recipe_dir).expect("failed to create dirs");
        std::fs::write(recipe_dir.join("Dockerfile"), "FROM debian:12\r\n").expect("write");

        let registry = parse_manifest("FROM ./docker/dev\nRUN make").expect("parse");
        let resolver = RecipeResolver::new(&registry, dir.path());
        assert_eq!(resolver.resolve_name("dev").expect("resolve"), "FROM debian:12\nRUN make\n");
    }

    #[test]
    fn missing_recipe_file_is_unreadable() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let registry = parse_manifest("FROM ./nowhere AS app").expect("parse");
        let err = RecipeResolver::new(&registry, dir.path())
            .resolve_name("app")
            .unwrap_err();
        let DrmakeError::RecipeFileUnreadable { reference, path, .. } = err else {
            panic!("expected unreadable recipe, got {err}");
        };
        assert_eq!(reference, "./nowhere");
        assert!(path.ends_with("nowhere/Dockerfile"));
    }

    #[test]
    fn body_is_not_trimmed() {
        let manifest = "FROM alpine AS app\nLABEL description=\"x\"\nARGENV V=1";
        let recipe = resolve(manifest, "app").expect("resolve");
        assert_eq!(
            recipe,
            "FROM alpine\nLABEL description=\"x\"\nARG V=1\nENV V=${V}\n"
        );
    }
}
