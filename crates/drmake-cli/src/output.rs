//! Formatted output helpers for CLI commands.

use std::fmt::Write as _;

use drmake_common::constants::BIN_NAME;
use drmake_manifest::target::Target;
use serde::Serialize;

/// One step of a plan, as printed by `drmake plan --json`.
#[derive(Debug, Serialize)]
pub struct PlanStep<'a> {
    /// 1-based position in the execution order.
    pub step: usize,
    /// Target name.
    pub name: &'a str,
    /// Recipe reference as written in the manifest.
    pub image: String,
    /// Declared dependencies.
    pub deps: &'a [String],
    /// Whether the target is built and run, or only copies artifacts.
    pub builds: bool,
}

/// Converts an execution order into printable steps.
pub fn plan_steps<'a>(order: &[&'a Target]) -> Vec<PlanStep<'a>> {
    order
        .iter()
        .enumerate()
        .map(|(idx, target)| PlanStep {
            step: idx + 1,
            name: &target.name,
            image: target.image.to_string(),
            deps: &target.deps,
            builds: !target.is_self_referencing(),
        })
        .collect()
}

/// Renders plan steps as aligned text, one step per line.
pub fn format_plan(steps: &[PlanStep<'_>]) -> String {
    let width = steps.iter().map(|s| s.name.len()).max().unwrap_or(0);
    let mut out = String::new();
    for step in steps {
        let _ = write!(out, "{:>3}. {:<width$}  FROM {}", step.step, step.name, step.image);
        if !step.deps.is_empty() {
            let _ = write!(out, " USING {}", step.deps.join(" "));
        }
        if !step.builds {
            out.push_str("  (artifacts only)");
        }
        out.push('\n');
    }
    out
}

/// Prefixes every line with the binary name, the way targets are invoked.
pub fn invocation_lines(listing: &str) -> String {
    listing
        .lines()
        .map(|line| format!("{BIN_NAME} {line}\n"))
        .collect()
}

#[cfg(test)]
mod tests {
    use drmake_manifest::parser::parse_manifest;
    use drmake_manifest::plan::execution_order;

    use super::*;

    #[test]
    fn plan_text_marks_artifact_only_steps() {
        let registry = parse_manifest(
            "FROM alpine AS app USING out\nFROM #out AS out\nARTIFACT a b",
        )
        .expect("parse");
        let order = execution_order(&registry, &["app"]).expect("plan");
        let text = format_plan(&plan_steps(&order));
        assert_eq!(
            text,
            "  1. out  FROM #out  (artifacts only)\n  2. app  FROM alpine USING out\n"
        );
    }

    #[test]
    fn plan_steps_serialize_to_json() {
        let registry = parse_manifest("FROM alpine AS app").expect("parse");
        let order = execution_order(&registry, &["app"]).expect("plan");
        let json = serde_json::to_value(plan_steps(&order)).expect("serialize");
        assert_eq!(json[0]["name"], "app");
        assert_eq!(json[0]["image"], "alpine");
        assert_eq!(json[0]["builds"], true);
    }

    #[test]
    fn invocation_lines_prefix_binary_name() {
        assert_eq!(
            invocation_lines("a # one\nbb # two\n"),
            "drmake a # one\ndrmake bb # two\n"
        );
    }
}
