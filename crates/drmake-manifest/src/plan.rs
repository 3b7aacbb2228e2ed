//! Execution order planning.
//!
//! For each requested name, its dependencies are flattened depth-first in
//! declaration order, followed by the name itself. The per-request
//! sequences are concatenated in request order and only the first
//! occurrence of each name is kept.
//!
//! This is an insertion-order flatten, not a reordering sort. On an acyclic
//! registry every target lands after everything it transitively depends
//! on; a cycle is reported instead of recursing forever.

use std::collections::HashSet;

use drmake_common::error::{DrmakeError, Result};

use crate::registry::Registry;
use crate::target::Target;

/// Computes the de-duplicated execution order for `requested` names.
///
/// # Errors
///
/// Returns `UnknownTarget` if a requested name or a dependency is not
/// registered, or `DependencyCycle` if a dependency chain loops back to a
/// target still being expanded.
pub fn execution_order<'a, S: AsRef<str>>(
    registry: &'a Registry,
    requested: &[S],
) -> Result<Vec<&'a Target>> {
    tracing::info!(
        requested = ?requested.iter().map(AsRef::as_ref).collect::<Vec<_>>(),
        "planning execution order"
    );
    let mut planner = Planner {
        registry,
        stack: Vec::new(),
        emitted: HashSet::new(),
        order: Vec::new(),
    };
    for name in requested {
        planner.visit(name.as_ref())?;
    }
    tracing::debug!(
        order = ?planner.order.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
        "planned execution order"
    );
    Ok(planner.order)
}

struct Planner<'a> {
    registry: &'a Registry,
    /// Names currently being expanded, outermost first.
    stack: Vec<&'a str>,
    emitted: HashSet<&'a str>,
    order: Vec<&'a Target>,
}

impl<'a> Planner<'a> {
    fn visit(&mut self, name: &str) -> Result<()> {
        let target = self.registry.find(name)?;
        let name = target.name.as_str();

        if self.stack.contains(&name) {
            let mut chain: Vec<String> = self.stack.iter().map(ToString::to_string).collect();
            chain.push(name.to_string());
            return Err(DrmakeError::DependencyCycle { chain });
        }
        if self.emitted.contains(name) {
            return Ok(());
        }

        self.stack.push(name);
        for dep in &target.deps {
            self.visit(dep)?;
        }
        let _ = self.stack.pop();

        let _ = self.emitted.insert(name);
        self.order.push(target);
        Ok(())
    }
}
