//! Tests for reference extraction from template text.
use pipegraph::reference::parse;
use pretty_assertions::assert_eq;

#[test]
fn test_duplicates_collapse_in_first_seen_order() {
    assert_eq!(parse("{{a}} {{b}} {{a}}").paths(), vec!["a", "b"]);
    assert_eq!(parse("{{b}} {{a}} {{b}}").paths(), vec!["b", "a"]);
}

#[test]
fn test_dotted_paths_are_single_references() {
    let refs = parse("Summary: {{ llm.response.text }} by {{author}}");
    assert_eq!(refs.paths(), vec!["llm.response.text", "author"]);
    assert_eq!(refs.as_slice()[0].base(), "llm");
}

#[test]
fn test_malformed_content_is_skipped() {
    let refs = parse("{{}} {{ two words }} {{9lives}} {{ok}} {single} {{a-b}} {{tail.}}");
    assert_eq!(refs.paths(), vec!["ok"]);
}

#[test]
fn test_text_without_references_is_empty() {
    assert!(parse("").is_empty());
    assert!(parse("plain prose, no templates").is_empty());
}

#[test]
fn test_parse_is_idempotent() {
    let text = "{{x}} and {{ y.z }} and {{x}}";
    assert_eq!(parse(text), parse(text));
}

#[test]
fn test_same_path_with_different_spacing_is_one_reference() {
    assert_eq!(parse("{{a}} {{ a }} {{  a}}").paths(), vec!["a"]);
}
