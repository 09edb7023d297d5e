//! Rendering and number resolution properties
//!
//! - Longest literal wins over its prefixes
//! - Segments always reassemble the line when nothing is bound
//! - Formatted metrics parse back within their precision

use proptest::prelude::*;

use spiral_verse::poem::render::visible_text;
use spiral_verse::poem::resolve::format_fixed;
use spiral_verse::poem::{
    render_line, resolve_stanza, InteractiveNumber, NumberKind, Segment, Stanza,
};
use spiral_verse::store::seed::sample_poem;

fn stanza(line: &str, literals: &[&str]) -> Stanza {
    Stanza {
        id: "prop".to_string(),
        lines: vec![line.to_string()],
        has_left_border: false,
        interactive_numbers: literals
            .iter()
            .map(|l| InteractiveNumber::literal(l, NumberKind::Other))
            .collect(),
    }
}

proptest! {
    #[test]
    fn prop_longest_match_never_split(prefix in "[a-z ]{0,12}", suffix in "[a-z ]{0,12}") {
        let poem = sample_poem();
        let line = format!("{}42{}", prefix, suffix);
        let stanza = stanza(&line, &["4", "2", "42"]);
        let resolved = resolve_stanza(&poem, &stanza);
        let segments = render_line(&line, &resolved, None);

        let numbers: Vec<&Segment> = segments
            .iter()
            .filter(|s| matches!(s, Segment::Interactive { .. }))
            .collect();
        prop_assert_eq!(numbers.len(), 1);
        prop_assert_eq!(numbers[0].text(), "42");
    }

    #[test]
    fn prop_unbound_segments_reassemble_line(line in "[a-z0-9 .,]{0,40}", literal in "[0-9]{1,3}") {
        let poem = sample_poem();
        let stanza = stanza(&line, &[literal.as_str()]);
        let resolved = resolve_stanza(&poem, &stanza);
        let segments = render_line(&line, &resolved, None);

        prop_assert_eq!(visible_text(&segments), line);
    }

    #[test]
    fn prop_two_decimal_round_trip(value in 0.0f64..=1.0) {
        let parsed: f64 = format_fixed(value, 2).parse().unwrap();
        prop_assert!((parsed - value).abs() <= 0.005 + 1e-12);
    }

    #[test]
    fn prop_three_decimal_round_trip(value in 0.0f64..=1.0) {
        let parsed: f64 = format_fixed(value, 3).parse().unwrap();
        prop_assert!((parsed - value).abs() <= 0.0005 + 1e-12);
    }
}

#[test]
fn test_bound_numbers_follow_record() {
    let mut poem = sample_poem();
    poem.beauty_value = 0.1;
    poem.godel_number = "99".to_string();

    let stanza = poem.content.stanzas[2].clone();
    let resolved = resolve_stanza(&poem, &stanza);
    let segments = render_line(&stanza.lines[1], &resolved, None);
    assert_eq!(visible_text(&segments), "Where beauty (0.10) in fractures gleams,");

    let stanza = poem.content.stanzas[1].clone();
    let resolved = resolve_stanza(&poem, &stanza);
    let segments = render_line(&stanza.lines[0], &resolved, None);
    assert_eq!(visible_text(&segments), "Gödel sings: 99, a shifted sum,");
}

#[test]
fn test_unbound_numbers_keep_literal() {
    let mut poem = sample_poem();
    poem.consciousness_value = 0.5;

    let stanza = poem.content.stanzas[3].clone();
    let resolved = resolve_stanza(&poem, &stanza);
    let segments = render_line(&stanza.lines[1], &resolved, None);
    assert_eq!(visible_text(&segments), "Gödel's spark ignites: 0.428, a flame,");

    let segments = render_line(&stanza.lines[5], &resolved, None);
    assert_eq!(visible_text(&segments), "Consciousness at 0.500—beyond all snares.");
}
