//! Name-keyed store of parsed targets.
//!
//! The registry is filled once by the parser and read-only afterwards.
//! Lookups of absent names are reported as [`DrmakeError::UnknownTarget`].

use std::collections::BTreeMap;

use drmake_common::error::{DrmakeError, Result};
use serde::Serialize;

use crate::graph::DependencyGraph;
use crate::target::{ImageRef, Target};

/// All targets of one manifest plus its default target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Registry {
    targets: BTreeMap<String, Target>,
    default_target: Option<String>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a target, replacing any previous target with the same name.
    ///
    /// The first target ever inserted becomes the default target and stays
    /// so even if a later header reuses its name.
    pub fn insert(&mut self, target: Target) -> Option<Target> {
        if self.default_target.is_none() {
            self.default_target = Some(target.name.clone());
        }
        self.targets.insert(target.name.clone(), target)
    }

    /// Looks up a target by name.
    ///
    /// # Errors
    ///
    /// Returns `DrmakeError::UnknownTarget` if no target has that name.
    pub fn find(&self, name: &str) -> Result<&Target> {
        self.targets
            .get(name)
            .ok_or_else(|| DrmakeError::unknown_target(name))
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Target> {
        self.targets.get_mut(name)
    }

    /// Returns `true` if a target with that name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.targets.contains_key(name)
    }

    /// Name of the first target declared in the manifest.
    pub fn default_target(&self) -> Option<&str> {
        self.default_target.as_deref()
    }

    /// Number of registered targets.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Returns `true` if the manifest declared no targets.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Iterates over targets sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.targets.values()
    }

    /// Checks that the registry can be planned and resolved as a whole.
    ///
    /// Every dependency and every same-file reference must name a registered
    /// target, and dependency plus inheritance edges must form no cycle.
    /// Self-references are not edges.
    ///
    /// # Errors
    ///
    /// Returns `UnknownTarget` for a dangling name or `DependencyCycle` for
    /// a cycle.
    pub fn validate(&self) -> Result<()> {
        tracing::info!(targets = self.len(), "validating registry");
        let mut graph = DependencyGraph::new();
        for target in self.iter() {
            let _ = graph.add_target(&target.name);
        }

        for target in self.iter() {
            for dep in &target.deps {
                if !self.contains(dep) {
                    return Err(DrmakeError::unknown_target(dep));
                }
                graph.add_dependency(&target.name, dep);
            }
            if let ImageRef::Target(parent) = &target.image {
                if !self.contains(parent) {
                    return Err(DrmakeError::unknown_target(parent));
                }
                if !target.is_self_referencing() {
                    graph.add_dependency(&target.name, parent);
                }
            }
        }

        graph.check_acyclic()
    }
}
