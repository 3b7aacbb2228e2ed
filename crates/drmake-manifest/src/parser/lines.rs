//! Splits manifest text into logical lines, joining `\` continuations.

/// One logical line and the raw line number it starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// 1-based raw line number of the first joined line.
    pub number: usize,
    /// Joined text, continuation backslashes removed.
    pub text: String,
}

/// Returns the line with its continuation backslash removed, or `None` if
/// it does not continue.
///
/// Only a backslash that is the last character and follows a space
/// continues the line; the space is kept.
fn continued(line: &str) -> Option<&str> {
    line.strip_suffix('\\').filter(|body| body.ends_with(' '))
}

/// Joins continued raw lines into logical lines.
pub fn logical_lines(input: &str) -> Vec<LogicalLine> {
    let mut lines = Vec::new();
    let mut pending: Option<LogicalLine> = None;

    for (idx, raw) in input.split('\n').enumerate() {
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        let (segment, continues) = match continued(raw) {
            Some(segment) => (segment, true),
            None => (raw, false),
        };

        let line = pending.get_or_insert_with(|| LogicalLine {
            number: idx + 1,
            text: String::new(),
        });
        line.text.push_str(segment);

        if !continues {
            lines.extend(pending.take());
        }
    }

    lines.extend(pending);
    lines
}
