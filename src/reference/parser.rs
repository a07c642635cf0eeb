use super::token::{ReferenceSet, ReferenceToken};
use itertools::Itertools;
use regex::Regex;
use std::sync::OnceLock;

/// `{{ ident(.ident)* }}` with optional inner whitespace.
const REFERENCE_PATTERN: &str =
    r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)*)\s*\}\}";

fn reference_regex() -> &'static Regex {
    static REFERENCE_REGEX: OnceLock<Regex> = OnceLock::new();
    REFERENCE_REGEX
        .get_or_init(|| Regex::new(REFERENCE_PATTERN).expect("reference pattern compiles"))
}

/// Extracts the template references from `text`.
///
/// The result keeps first-seen order and collapses duplicates. Anything between
/// the markers that is not a dotted identifier path is ignored, so this never
/// fails: malformed references are simply absent.
///
/// ```
/// use pipegraph::reference::parse;
///
/// let refs = parse("{{a}} {{ b.c }} {{a}} {{ not valid }}");
/// assert_eq!(refs.paths(), vec!["a", "b.c"]);
/// ```
pub fn parse(text: &str) -> ReferenceSet {
    let tokens = reference_regex()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unique()
        .map(ReferenceToken::new_unchecked)
        .collect();
    ReferenceSet::from_unique(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_whitespace_inside_markers() {
        assert_eq!(parse("{{   spaced   }}").paths(), vec!["spaced"]);
        assert_eq!(parse("{{\n\tnl\n}}").paths(), vec!["nl"]);
    }

    #[test]
    fn rejects_identifiers_starting_with_digit() {
        assert!(parse("{{1abc}}").is_empty());
        assert!(parse("{{a.1b}}").is_empty());
    }

    #[test]
    fn rejects_dangling_and_doubled_dots() {
        assert!(parse("{{a.}}").is_empty());
        assert!(parse("{{.a}}").is_empty());
        assert!(parse("{{a..b}}").is_empty());
    }
}
