//! Body directives interpreted at parse time.
//!
//! `ARTIFACT`, `ARGENV`, and `LABEL description=...` lines. Every other
//! body line is opaque recipe text.

use drmake_common::constants::DESCRIPTION_KEY;
use drmake_common::error::{DrmakeError, Result};

/// Splits artifact operands into `(source, destination)`.
///
/// Operands are rejoined with single spaces, then split on the first `=` if
/// present, else on the first space. With no delimiter the destination
/// equals the source.
pub fn artifact(operands: &[&str]) -> (String, String) {
    let joined = operands.join(" ");
    let delimiter = if joined.contains('=') { '=' } else { ' ' };
    match joined.split_once(delimiter) {
        Some((source, destination)) => (source.trim().to_string(), destination.trim().to_string()),
        None => (joined.clone(), joined),
    }
}

/// Expands `ARGENV KEY=VALUE` into a build argument and an environment
/// binding of the same key.
///
/// # Errors
///
/// Returns `MalformedArgumentDeclaration` unless exactly one operand is given.
pub fn argument(line: usize, operands: &[&str]) -> Result<[String; 2]> {
    let [payload] = operands else {
        return Err(DrmakeError::MalformedArgumentDeclaration {
            line,
            operands: operands.len(),
        });
    };
    let key = payload.split_once('=').map_or(*payload, |(key, _)| key);
    Ok([format!("ARG {payload}"), format!("ENV {key}=${{{key}}}")])
}

/// Returns the description carried by `LABEL` operands, if the first
/// key/value pair is a `description`.
pub fn description(operands: &[&str]) -> Option<String> {
    let joined = operands.join(" ");
    let (key, value) = joined.split_once('=')?;
    let key = strip_quotes(key);
    key.eq_ignore_ascii_case(DESCRIPTION_KEY)
        .then(|| strip_quotes(value).to_string())
}

fn strip_quotes(s: &str) -> &str {
    s.trim().trim_matches('"')
}
