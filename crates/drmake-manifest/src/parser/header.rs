//! Header line grammar, built on `nom`.
//!
//! ```text
//! FROM <reference> [AS <name>] [USING <dep> <dep> ...]
//! ```
//!
//! All keywords are case-insensitive. Text after the last recognized clause
//! is ignored.

use drmake_common::constants::{DEPS_KEYWORD, HEADER_KEYWORD, NAME_KEYWORD};
use nom::{
    IResult, Parser,
    bytes::complete::{tag_no_case, take_till1},
    character::complete::multispace1,
    combinator::{opt, rest, value},
    sequence::preceded,
};

/// The captured parts of a header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header<'a> {
    /// Recipe reference, as written.
    pub image: &'a str,
    /// Explicit name from the `AS` clause.
    pub name: Option<&'a str>,
    /// Dependencies from the `USING` clause, in order.
    pub deps: Vec<&'a str>,
}

impl Header<'_> {
    /// Returns the explicit name, or the last word-boundary segment of the
    /// reference.
    pub fn target_name(&self) -> &str {
        self.name.unwrap_or_else(|| last_segment(self.image))
    }
}

/// A maximal run of non-whitespace characters.
fn word(input: &str) -> IResult<&str, &str> {
    take_till1(char::is_whitespace)(input)
}

/// Whitespace, a keyword, and the whitespace after it.
fn clause<'a>(
    keyword: &'static str,
) -> impl Parser<&'a str, Output = (), Error = nom::error::Error<&'a str>> {
    value((), (multispace1, tag_no_case(keyword), multispace1))
}

fn header(input: &str) -> IResult<&str, Header<'_>> {
    let (input, _) = tag_no_case(HEADER_KEYWORD)(input)?;
    let (input, _) = multispace1(input)?;
    let (input, image) = word(input)?;
    let (input, name) = opt(preceded(clause(NAME_KEYWORD), word)).parse(input)?;
    let (input, deps) = opt(preceded(clause(DEPS_KEYWORD), rest)).parse(input)?;

    let deps = deps.map_or_else(Vec::new, |list: &str| list.split_whitespace().collect());
    Ok((input, Header { image, name, deps }))
}

/// Parses a trimmed header line. Returns `None` if the line does not match
/// the grammar.
pub fn parse_header(line: &str) -> Option<Header<'_>> {
    match header(line) {
        Ok((trailing, parsed)) => {
            if !trailing.trim().is_empty() {
                tracing::debug!(trailing, "ignoring text after header clauses");
            }
            Some(parsed)
        }
        Err(_) => None,
    }
}

const fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Returns the final segment of `reference` when split at word boundaries,
/// i.e. its last maximal run of word or non-word characters.
///
/// `./build/app` yields `app`, `#base` yields `base`, `golang:1.22` yields `22`.
pub fn last_segment(reference: &str) -> &str {
    let Some(last) = reference.chars().next_back() else {
        return reference;
    };
    let class = is_word_char(last);
    let start = reference
        .char_indices()
        .rev()
        .find(|&(_, c)| is_word_char(c) != class)
        .map_or(0, |(idx, c)| idx + c.len_utf8());
    &reference[start..]
}
