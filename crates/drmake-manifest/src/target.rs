//! Target records produced by the manifest parser.

use std::collections::BTreeMap;
use std::fmt;

use drmake_common::constants::{HEADER_KEYWORD, PATH_PREFIX, TARGET_SIGIL, WORKSPACE_SIGIL};
use serde::{Deserialize, Serialize};

/// Where a target's recipe preface comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ImageRef {
    /// A literal base image (`ubuntu:24.04`).
    Base(String),
    /// Another target in the same manifest (`#name`).
    Target(String),
    /// A recipe directory under the workspace (`&name`).
    Workspace(String),
    /// A directory holding a recipe file, relative to the base directory
    /// (`./path`). Stored without the `./` prefix.
    Path(String),
}

impl ImageRef {
    /// Classifies a raw reference by its sigil.
    pub fn parse(raw: &str) -> Self {
        if let Some(name) = raw.strip_prefix(WORKSPACE_SIGIL) {
            Self::Workspace(name.to_string())
        } else if let Some(name) = raw.strip_prefix(TARGET_SIGIL) {
            Self::Target(name.to_string())
        } else if let Some(path) = raw.strip_prefix(PATH_PREFIX) {
            Self::Path(path.to_string())
        } else {
            Self::Base(raw.to_string())
        }
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base(image) => write!(f, "{image}"),
            Self::Target(name) => write!(f, "{TARGET_SIGIL}{name}"),
            Self::Workspace(name) => write!(f, "{WORKSPACE_SIGIL}{name}"),
            Self::Path(path) => write!(f, "{PATH_PREFIX}{path}"),
        }
    }
}

/// One named build unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Unique name, keys the registry.
    pub name: String,
    /// Source of the recipe preface.
    pub image: ImageRef,
    /// Recipe lines following the header, without trailing newlines.
    pub body: Vec<String>,
    /// Value of a `LABEL description=...` line, quotes stripped.
    pub description: Option<String>,
    /// Dependencies in declaration order.
    pub deps: Vec<String>,
    /// Artifact copy rules: workspace source path to host destination path.
    pub artifacts: BTreeMap<String, String>,
}

impl Target {
    /// Creates a target with an empty body.
    pub fn new(name: impl Into<String>, image: ImageRef, deps: Vec<String>) -> Self {
        Self {
            name: name.into(),
            image,
            body: Vec::new(),
            description: None,
            deps,
            artifacts: BTreeMap::new(),
        }
    }

    /// Returns `true` when the target inherits from itself (`#own-name`).
    ///
    /// Such a target has no recipe preface and is never built or run; only
    /// its artifact copies are performed.
    pub fn is_self_referencing(&self) -> bool {
        matches!(&self.image, ImageRef::Target(name) if *name == self.name)
    }

    /// Returns the body as recipe text, one newline-terminated line each.
    pub fn body_text(&self) -> String {
        let mut text = String::new();
        for line in &self.body {
            text.push_str(line);
            text.push('\n');
        }
        text
    }

    /// Returns the non-empty description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{HEADER_KEYWORD} {} AS {}", self.image, self.name)?;
        if !self.deps.is_empty() {
            write!(f, " USING {}", self.deps.join(" "))?;
        }
        Ok(())
    }
}
