//! Path grammar integration tests

use templar::path::{Path, Segment, parse_path};

#[test]
fn test_scenario_path_segments() {
    let segments = parse_path(r#"dict["k 1"].items[2].name"#);
    assert_eq!(
        segments,
        vec![
            Segment::Property("dict".to_string()),
            Segment::MapKey("k 1".to_string()),
            Segment::Property("items".to_string()),
            Segment::ListIndex(2),
            Segment::Property("name".to_string()),
        ]
    );
}

#[test]
fn test_interleaved_accessors() {
    let path: Path = r#"a[0].b["k"].c"#.parse().unwrap();
    assert_eq!(
        path.segments(),
        &[
            Segment::property("a"),
            Segment::ListIndex(0),
            Segment::property("b"),
            Segment::key("k"),
            Segment::property("c"),
        ]
    );
    assert_eq!(path.last(), Some(&Segment::property("c")));
}

#[test]
fn test_strict_and_lenient_agree_on_valid_input() {
    for text in ["", "a", "a.b.c", "a.b[3]", r#"a.b["k\"ey"]"#, r#"x["."].y[10]"#] {
        assert_eq!(Path::parse(text).unwrap(), Path::parse_lenient(text), "{text}");
    }
}

#[test]
fn test_lenient_parse_is_deterministic_on_garbage() {
    let inputs = ["a[b", "a]]b", "[[[", r#"a["x"y].z"#, "...", "a[1x].b"];
    for input in inputs {
        assert_eq!(parse_path(input), parse_path(input), "{input}");
        assert!(Path::parse(input).is_err(), "{input} should be rejected strictly");
    }
    assert_eq!(parse_path("a[1x].b"), vec![Segment::property("a"), Segment::property("b")]);
    assert_eq!(parse_path(r#"a["x"y].z"#), vec![Segment::property("a"), Segment::property("z")]);
}

#[test]
fn test_builder_matches_parser() {
    let built = Path::new().property("slots").key("main hand").property("item");
    assert_eq!(built, Path::parse(r#"slots["main hand"].item"#).unwrap());
    assert_eq!(built.len(), 3);
    assert_eq!(built.parent().unwrap().to_string(), r#"slots["main hand"]"#);
}

#[test]
fn test_canonical_display_normalizes_escapes() {
    // Escaping a character that needs none still parses to the same key
    let path = Path::parse(r#"m["\a"]"#).unwrap();
    assert_eq!(path.segments()[1], Segment::key("a"));
    assert_eq!(path.to_string(), r#"m["a"]"#);
}
