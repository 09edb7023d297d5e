//! Interactive number resolution
//!
//! A bound number displays the live value of its poem field; an unbound
//! number always displays its stored literal.

use super::{Binding, InteractiveNumber, Poem, Stanza};

/// An interactive number together with the text it currently displays
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedNumber<'a> {
    /// Position in the stanza's own descriptor list
    pub index: usize,
    pub number: &'a InteractiveNumber,
    pub display: String,
}

/// Format with a fixed number of fractional digits
pub fn format_fixed(value: f64, digits: usize) -> String {
    format!("{:.*}", digits, value)
}

/// Current display text of a bound field
pub fn display_value(poem: &Poem, binding: Binding) -> String {
    match binding {
        Binding::GodelNumber => poem.godel_number.clone(),
        Binding::ChaosValue => format_fixed(poem.chaos_value, 2),
        Binding::BeautyValue => format_fixed(poem.beauty_value, 2),
        Binding::ComplexityValue => format_fixed(poem.complexity_value, 2),
        Binding::CoherenceValue => format_fixed(poem.coherence_value, 2),
        Binding::ConsciousnessValue => format_fixed(poem.consciousness_value, 3),
        Binding::CycleStep => poem.cycle_step.to_string(),
        Binding::TotalCycles => poem.total_cycles.to_string(),
    }
}

/// Resolve every descriptor of a stanza, in descriptor order
pub fn resolve_stanza<'a>(poem: &Poem, stanza: &'a Stanza) -> Vec<ResolvedNumber<'a>> {
    stanza
        .interactive_numbers
        .iter()
        .enumerate()
        .map(|(index, number)| ResolvedNumber {
            index,
            number,
            display: match number.binding {
                Some(binding) => display_value(poem, binding),
                None => number.value.clone(),
            },
        })
        .collect()
}

/// Indices ordered by literal length, longest first; equal lengths keep document order
pub fn longest_first<T>(items: &[T], literal_len: impl Fn(&T) -> usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|&a, &b| literal_len(&items[b]).cmp(&literal_len(&items[a])));
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poem::NumberKind;
    use crate::store::seed::sample_poem;

    #[test]
    fn test_bound_numbers_track_fields() {
        let mut poem = sample_poem();
        poem.chaos_value = 0.5;
        poem.consciousness_value = 0.1234;
        poem.total_cycles = 7;

        let stanza = poem.content.stanzas[2].clone();
        let resolved = resolve_stanza(&poem, &stanza);
        assert_eq!(resolved[0].display, "0.50");

        let stanza = poem.content.stanzas[3].clone();
        let resolved = resolve_stanza(&poem, &stanza);
        assert_eq!(resolved[0].display, "7");
        assert_eq!(resolved[4].display, "0.123");
    }

    #[test]
    fn test_unbound_numbers_keep_literal() {
        let mut poem = sample_poem();
        poem.chaos_value = 0.01;
        poem.godel_number = "1".to_string();

        let stanza = poem.content.stanzas[3].clone();
        let resolved = resolve_stanza(&poem, &stanza);
        assert_eq!(resolved[1].display, "0.428");
        assert_eq!(resolved[2].display, "0.043");
        assert_eq!(resolved[3].display, "0.850");
    }

    #[test]
    fn test_longest_first_is_stable() {
        let numbers = vec![
            InteractiveNumber::literal("4", NumberKind::Other),
            InteractiveNumber::literal("42", NumberKind::Other),
            InteractiveNumber::literal("7", NumberKind::Other),
        ];
        assert_eq!(longest_first(&numbers, |n| n.value.len()), vec![1, 0, 2]);
    }

    #[test]
    fn test_integer_fields_have_no_fraction() {
        let poem = sample_poem();
        assert_eq!(display_value(&poem, Binding::CycleStep), "1");
        assert_eq!(display_value(&poem, Binding::GodelNumber), "42424284");
    }
}
