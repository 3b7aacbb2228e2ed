//! Name and description listing of described targets.

use std::fmt::Write as _;

use crate::registry::Registry;

/// One row of the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'a> {
    /// Target name.
    pub name: &'a str,
    /// Non-empty description.
    pub description: &'a str,
}

/// Returns described targets sorted by name. Targets without a description
/// are left out.
pub fn described(registry: &Registry) -> Vec<Entry<'_>> {
    let mut entries: Vec<Entry<'_>> = registry
        .iter()
        .filter_map(|target| {
            target.description().map(|description| Entry {
                name: &target.name,
                description,
            })
        })
        .collect();
    entries.sort_by(|a, b| a.name.cmp(b.name));
    entries
}

/// Renders the listing, one `name # description` line per described target
/// with names padded to the longest listed name.
pub fn render(registry: &Registry) -> String {
    let entries = described(registry);
    let width = entries.iter().map(|e| e.name.len()).max().unwrap_or(0);
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(out, "{:<width$} # {}", entry.name, entry.description);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_manifest;

    const MANIFEST: &str = "FROM alpine AS c\nLABEL description=\"desc C\"\n\
                            FROM alpine AS b\nLABEL description=\"\"\n\
                            FROM alpine AS a\nLABEL description=\"desc A\"\n\
                            FROM alpine AS undescribed\n";

    #[test]
    fn only_described_targets_sorted_by_name() {
        let registry = parse_manifest(MANIFEST).expect("should parse");
        let names: Vec<&str> = described(&registry).iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn render_pads_to_longest_listed_name() {
        let manifest = format!("{MANIFEST}FROM alpine AS release\nLABEL description=ship it\n");
        let registry = parse_manifest(&manifest).expect("should parse");
        assert_eq!(
            render(&registry),
            "a       # desc A\nc       # desc C\nrelease # ship it\n"
        );
    }

    #[test]
    fn render_empty_registry() {
        let registry = parse_manifest("").expect("should parse");
        assert!(render(&registry).is_empty());
    }
}
