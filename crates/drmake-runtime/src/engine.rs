//! Engine that drives planned targets through a container runtime.

use drmake_common::error::Result;
use drmake_common::naming;
use drmake_manifest::recipe::RecipeResolver;
use drmake_manifest::target::Target;

use crate::backend::{ArtifactCopy, ContainerRuntime};

/// Coordinates recipe resolution and runtime operations for a plan.
pub struct Engine<'a, R> {
    resolver: RecipeResolver<'a>,
    namespace: String,
    runtime: R,
}

impl<'a, R: ContainerRuntime> Engine<'a, R> {
    /// Creates an engine tagging images under `namespace`.
    pub fn new(resolver: RecipeResolver<'a>, namespace: impl Into<String>, runtime: R) -> Self {
        Self {
            resolver,
            namespace: namespace.into(),
            runtime,
        }
    }

    /// Runs every target of `plan` in order after preparing the volume.
    ///
    /// Stops at the first failing target.
    ///
    /// # Errors
    ///
    /// Returns an error if recipe resolution or any runtime step fails.
    pub fn run_plan(&mut self, plan: &[&Target]) -> Result<()> {
        tracing::info!(targets = plan.len(), namespace = %self.namespace, "running plan");
        self.runtime.prepare_volume()?;
        for target in plan {
            self.run_target(target)?;
        }
        Ok(())
    }

    /// Builds and runs one target, then copies its artifacts.
    ///
    /// A self-referencing target is neither built nor run; its artifacts are
    /// still copied. Artifacts are copied in source-path order.
    ///
    /// # Errors
    ///
    /// Returns an error if recipe resolution or any runtime step fails.
    pub fn run_target(&mut self, target: &Target) -> Result<()> {
        if target.is_self_referencing() {
            tracing::info!(name = %target.name, "skipping build of self-referencing target");
        } else {
            let recipe = self.resolver.resolve(target)?;
            let tag = naming::target_tag(&self.namespace, &target.name);
            tracing::info!(name = %target.name, %tag, "building target");
            self.runtime.build(&tag, &recipe)?;
            self.runtime.run(&tag)?;
        }

        for (source, destination) in &target.artifacts {
            let copy = ArtifactCopy::new(self.resolver.base_dir(), source, destination);
            tracing::info!(
                name = %target.name,
                %source,
                destination = %copy.host_path.display(),
                "copying artifact"
            );
            self.runtime.copy_artifact(&copy)?;
        }
        Ok(())
    }

    /// Consumes the engine, returning its runtime.
    pub fn into_runtime(self) -> R {
        self.runtime
    }
}
