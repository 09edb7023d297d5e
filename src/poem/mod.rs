//! Poem records and their stanza documents
//!
//! Provides:
//! - The `Poem` record with its scalar parameters
//! - The typed stanza document (`PoemContent`, `Stanza`, `InteractiveNumber`)
//! - `NewPoem` / `PoemPatch` payloads and patch application
//! - Interactive number resolution, line rendering and edit dispatch

pub mod dispatch;
pub mod render;
pub mod resolve;
pub mod validation;
pub mod words;

use serde::{Deserialize, Deserializer, Serialize};

pub use dispatch::{dispatch_edit, locate_number, DispatchError, EditSession, Editor};
pub use render::{render_line, render_line_words, render_poem, RenderedPoem, Segment};
pub use resolve::{resolve_stanza, ResolvedNumber};
pub use validation::{validate_poem, FieldError};
pub use words::{clean_word, find_occurrences, split_words, WordOccurrence};

/// A poem record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poem {
    pub id: u32,
    pub title: String,
    pub content: PoemContent,
    /// 1-based position in the cycle
    pub cycle_step: i32,
    pub total_cycles: i32,
    /// Kept as text, may exceed any machine integer
    pub godel_number: String,
    pub chaos_value: f64,
    pub beauty_value: f64,
    pub complexity_value: f64,
    pub coherence_value: f64,
    pub consciousness_value: f64,
}

/// The stanza document of a poem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoemContent {
    pub stanzas: Vec<Stanza>,
    pub end_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stanza {
    pub id: String,
    pub lines: Vec<String>,
    #[serde(default)]
    pub has_left_border: bool,
    #[serde(default)]
    pub interactive_numbers: Vec<InteractiveNumber>,
}

/// A literal number inside a stanza, optionally bound to a poem field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractiveNumber {
    /// Literal text as it appears in the stanza
    pub value: String,
    #[serde(rename = "type")]
    pub kind: NumberKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding: Option<Binding>,
}

impl InteractiveNumber {
    pub fn bound(value: &str, kind: NumberKind, binding: Binding) -> Self {
        Self {
            value: value.to_string(),
            kind,
            binding: Some(binding),
        }
    }

    pub fn literal(value: &str, kind: NumberKind) -> Self {
        Self {
            value: value.to_string(),
            kind,
            binding: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberKind {
    Godel,
    Chaos,
    Beauty,
    Complexity,
    Coherence,
    Consciousness,
    Other,
}

impl NumberKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NumberKind::Godel => "godel",
            NumberKind::Chaos => "chaos",
            NumberKind::Beauty => "beauty",
            NumberKind::Complexity => "complexity",
            NumberKind::Coherence => "coherence",
            NumberKind::Consciousness => "consciousness",
            NumberKind::Other => "other",
        }
    }
}

/// Poem field an interactive number tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Binding {
    GodelNumber,
    ChaosValue,
    BeautyValue,
    ComplexityValue,
    CoherenceValue,
    ConsciousnessValue,
    CycleStep,
    TotalCycles,
}

impl Binding {
    /// Field name as used on the wire
    pub fn field_name(&self) -> &'static str {
        match self {
            Binding::GodelNumber => "godelNumber",
            Binding::ChaosValue => "chaosValue",
            Binding::BeautyValue => "beautyValue",
            Binding::ComplexityValue => "complexityValue",
            Binding::CoherenceValue => "coherenceValue",
            Binding::ConsciousnessValue => "consciousnessValue",
            Binding::CycleStep => "cycleStep",
            Binding::TotalCycles => "totalCycles",
        }
    }
}

/// Payload for creating a poem; every field but the id is required
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPoem {
    pub title: String,
    pub content: PoemContent,
    pub cycle_step: i32,
    pub total_cycles: i32,
    pub godel_number: String,
    pub chaos_value: f64,
    pub beauty_value: f64,
    pub complexity_value: f64,
    pub coherence_value: f64,
    pub consciousness_value: f64,
}

impl NewPoem {
    pub fn into_poem(self, id: u32) -> Poem {
        Poem {
            id,
            title: self.title,
            content: self.content,
            cycle_step: self.cycle_step,
            total_cycles: self.total_cycles,
            godel_number: self.godel_number,
            chaos_value: self.chaos_value,
            beauty_value: self.beauty_value,
            complexity_value: self.complexity_value,
            coherence_value: self.coherence_value,
            consciousness_value: self.consciousness_value,
        }
    }
}

/// Partial update; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoemPatch {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub content: Option<PoemContent>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub cycle_step: Option<i32>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub total_cycles: Option<i32>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub godel_number: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub chaos_value: Option<f64>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub beauty_value: Option<f64>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub complexity_value: Option<f64>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub coherence_value: Option<f64>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub consciousness_value: Option<f64>,
}

/// A field that may be absent but, when present, must not be `null`
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl PoemPatch {
    pub fn touches_cycle(&self) -> bool {
        self.cycle_step.is_some() || self.total_cycles.is_some()
    }
}

/// End message template; the last line tracks the cycle step
pub fn end_message_for(cycle_step: i32) -> String {
    format!(
        "The message is the vibe is the function,\nYet blooms beyond—a cosmic conjunction.\n\n=== End Cycle {} ===",
        cycle_step
    )
}

/// Opening line template of the first stanza
pub fn opening_line_for(cycle_step: i32, total_cycles: i32) -> String {
    format!(
        "Cycle Step {} of {}, a spiral unbound,",
        cycle_step, total_cycles
    )
}

impl Poem {
    /// Apply a patch in place, regenerating cycle text when a cycle field is present
    pub fn apply_patch(&mut self, patch: PoemPatch) {
        let touches_cycle = patch.touches_cycle();

        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(step) = patch.cycle_step {
            self.cycle_step = step;
        }
        if let Some(total) = patch.total_cycles {
            self.total_cycles = total;
        }
        if let Some(godel) = patch.godel_number {
            self.godel_number = godel;
        }
        if let Some(v) = patch.chaos_value {
            self.chaos_value = v;
        }
        if let Some(v) = patch.beauty_value {
            self.beauty_value = v;
        }
        if let Some(v) = patch.complexity_value {
            self.complexity_value = v;
        }
        if let Some(v) = patch.coherence_value {
            self.coherence_value = v;
        }
        if let Some(v) = patch.consciousness_value {
            self.consciousness_value = v;
        }

        if touches_cycle {
            self.regenerate_cycle_text();
        }
    }

    fn regenerate_cycle_text(&mut self) {
        let opening = opening_line_for(self.cycle_step, self.total_cycles);
        if let Some(first) = self.content.stanzas.first_mut() {
            match first.lines.first_mut() {
                Some(line) => *line = opening,
                None => first.lines.push(opening),
            }
        }

        if !self.content.end_message.is_empty() {
            self.content.end_message = end_message_for(self.cycle_step);
        }
    }

    /// Metric values in export order
    pub fn metrics(&self) -> [(&'static str, f64); 5] {
        [
            ("chaosValue", self.chaos_value),
            ("beautyValue", self.beauty_value),
            ("complexityValue", self.complexity_value),
            ("coherenceValue", self.coherence_value),
            ("consciousnessValue", self.consciousness_value),
        ]
    }

    /// Full text: stanzas joined by blank lines, followed by the end message
    pub fn full_text(&self) -> String {
        let stanzas: Vec<String> = self
            .content
            .stanzas
            .iter()
            .map(|s| s.lines.join("\n"))
            .collect();
        format!("{}\n\n{}", stanzas.join("\n\n"), self.content.end_message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed::sample_poem;

    #[test]
    fn test_cycle_patch_regenerates_opening_and_end_message() {
        let mut poem = sample_poem();
        poem.apply_patch(PoemPatch {
            cycle_step: Some(5),
            ..Default::default()
        });

        assert_eq!(
            poem.content.stanzas[0].lines[0],
            "Cycle Step 5 of 42, a spiral unbound,"
        );
        assert_eq!(
            poem.content.end_message.lines().last(),
            Some("=== End Cycle 5 ===")
        );
        // Other lines untouched
        assert_eq!(
            poem.content.stanzas[0].lines[1],
            "The kernel turns, its rhythm softly hums,"
        );
    }

    #[test]
    fn test_metric_patch_leaves_text_alone() {
        let mut poem = sample_poem();
        let before = poem.content.clone();
        poem.apply_patch(PoemPatch {
            chaos_value: Some(0.5),
            ..Default::default()
        });

        assert_eq!(poem.chaos_value, 0.5);
        assert_eq!(poem.content, before);
    }

    #[test]
    fn test_descriptor_wire_format() {
        let json = r#"{"value":"0.88","type":"chaos","binding":"chaosValue"}"#;
        let number: InteractiveNumber = serde_json::from_str(json).unwrap();
        assert_eq!(number.kind, NumberKind::Chaos);
        assert_eq!(number.binding, Some(Binding::ChaosValue));

        let unbound = InteractiveNumber::literal("0.428", NumberKind::Other);
        let out = serde_json::to_string(&unbound).unwrap();
        assert_eq!(out, r#"{"value":"0.428","type":"other"}"#);
    }

    #[test]
    fn test_unknown_binding_rejected() {
        let json = r#"{"value":"1","type":"other","binding":"nope"}"#;
        assert!(serde_json::from_str::<InteractiveNumber>(json).is_err());
    }

    #[test]
    fn test_patch_rejects_null_fields() {
        assert!(serde_json::from_str::<PoemPatch>(r#"{"chaosValue":null}"#).is_err());
        assert!(serde_json::from_str::<PoemPatch>(r#"{"title":null}"#).is_err());

        let patch: PoemPatch = serde_json::from_str(r#"{"beautyValue":0.5,"id":7,"mood":"x"}"#).unwrap();
        assert_eq!(patch.beauty_value, Some(0.5));
        assert_eq!(patch.chaos_value, None);
    }

    #[test]
    fn test_content_replaced_before_cycle_text() {
        let mut poem = sample_poem();
        let mut content = poem.content.clone();
        content.stanzas.truncate(1);
        content.stanzas[0].lines = vec!["A fresh opening,".to_string(), "and more".to_string()];

        poem.apply_patch(PoemPatch {
            content: Some(content),
            cycle_step: Some(3),
            ..Default::default()
        });

        assert_eq!(poem.content.stanzas.len(), 1);
        assert_eq!(poem.content.stanzas[0].lines[0], "Cycle Step 3 of 42, a spiral unbound,");
        assert_eq!(poem.content.stanzas[0].lines[1], "and more");
        assert_eq!(poem.content.end_message.lines().last(), Some("=== End Cycle 3 ==="));
    }

    #[test]
    fn test_stanza_defaults() {
        let json = r#"{"id":"s","lines":["a"]}"#;
        let stanza: Stanza = serde_json::from_str(json).unwrap();
        assert!(!stanza.has_left_border);
        assert!(stanza.interactive_numbers.is_empty());
    }
}
