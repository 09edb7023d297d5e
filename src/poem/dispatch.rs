//! Edit sessions and update dispatch
//!
//! Editing an interactive number produces at most one single-field patch.
//! Unbound numbers are display-only and never produce a patch.

use thiserror::Error;

use super::resolve::display_value;
use super::{Binding, InteractiveNumber, Poem, PoemContent, PoemPatch};

#[derive(Error, Debug, PartialEq)]
pub enum DispatchError {
    #[error("Invalid number for {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

fn parse_float(binding: Binding, raw: &str) -> Result<f64, DispatchError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| DispatchError::InvalidNumber {
            field: binding.field_name(),
            value: raw.to_string(),
        })
}

fn parse_int(binding: Binding, raw: &str) -> Result<i32, DispatchError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| DispatchError::InvalidNumber {
            field: binding.field_name(),
            value: raw.to_string(),
        })
}

/// Translate an edit of `number` to `raw` into a patch of its bound field.
///
/// Returns `Ok(None)` for unbound numbers.
pub fn dispatch_edit(
    number: &InteractiveNumber,
    raw: &str,
) -> Result<Option<PoemPatch>, DispatchError> {
    let Some(binding) = number.binding else {
        return Ok(None);
    };

    let mut patch = PoemPatch::default();
    match binding {
        Binding::GodelNumber => patch.godel_number = Some(raw.to_string()),
        Binding::ChaosValue => patch.chaos_value = Some(parse_float(binding, raw)?),
        Binding::BeautyValue => patch.beauty_value = Some(parse_float(binding, raw)?),
        Binding::ComplexityValue => patch.complexity_value = Some(parse_float(binding, raw)?),
        Binding::CoherenceValue => patch.coherence_value = Some(parse_float(binding, raw)?),
        Binding::ConsciousnessValue => {
            patch.consciousness_value = Some(parse_float(binding, raw)?)
        }
        Binding::CycleStep => patch.cycle_step = Some(parse_int(binding, raw)?),
        Binding::TotalCycles => patch.total_cycles = Some(parse_int(binding, raw)?),
    }

    Ok(Some(patch))
}

/// Find a descriptor by stanza id and position
pub fn locate_number<'a>(
    content: &'a PoemContent,
    stanza_id: &str,
    number_index: usize,
) -> Option<&'a InteractiveNumber> {
    content
        .stanzas
        .iter()
        .find(|s| s.id == stanza_id)
        .and_then(|s| s.interactive_numbers.get(number_index))
}

/// The number currently being edited and its draft text
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    pub stanza_id: String,
    pub number_index: usize,
    pub draft: String,
}

/// Holds at most one edit session across the whole poem
#[derive(Debug, Default)]
pub struct Editor {
    session: Option<EditSession>,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing a number, cancelling any edit in progress.
    ///
    /// The draft starts at the number's displayed value.
    pub fn begin(&mut self, poem: &Poem, stanza_id: &str, number_index: usize) -> Option<&EditSession> {
        let number = locate_number(&poem.content, stanza_id, number_index)?;
        let draft = match number.binding {
            Some(binding) => display_value(poem, binding),
            None => number.value.clone(),
        };

        self.session = Some(EditSession {
            stanza_id: stanza_id.to_string(),
            number_index,
            draft,
        });
        self.session.as_ref()
    }

    pub fn set_draft(&mut self, value: &str) {
        if let Some(session) = self.session.as_mut() {
            session.draft = value.to_string();
        }
    }

    pub fn cancel(&mut self) {
        self.session = None;
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    /// Edit state for one stanza, in the form the renderer takes
    pub fn editing_in(&self, stanza_id: &str) -> Option<(usize, &str)> {
        self.session
            .as_ref()
            .filter(|s| s.stanza_id == stanza_id)
            .map(|s| (s.number_index, s.draft.as_str()))
    }

    /// End the session and dispatch its draft.
    ///
    /// The session is discarded whether or not dispatch succeeds.
    pub fn commit(&mut self, poem: &Poem) -> Result<Option<PoemPatch>, DispatchError> {
        let Some(session) = self.session.take() else {
            return Ok(None);
        };
        match locate_number(&poem.content, &session.stanza_id, session.number_index) {
            Some(number) => dispatch_edit(number, &session.draft),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poem::NumberKind;
    use crate::store::seed::sample_poem;

    #[test]
    fn test_dispatch_coerces_by_binding() {
        let chaos = InteractiveNumber::bound("0.88", NumberKind::Chaos, Binding::ChaosValue);
        let patch = dispatch_edit(&chaos, " 0.42 ").unwrap().unwrap();
        assert_eq!(patch.chaos_value, Some(0.42));
        assert_eq!(patch.beauty_value, None);

        let step = InteractiveNumber::bound("1", NumberKind::Other, Binding::CycleStep);
        let patch = dispatch_edit(&step, "5").unwrap().unwrap();
        assert_eq!(patch.cycle_step, Some(5));

        let godel = InteractiveNumber::bound("1", NumberKind::Godel, Binding::GodelNumber);
        let patch = dispatch_edit(&godel, "99999999999999999999999").unwrap().unwrap();
        assert_eq!(patch.godel_number.as_deref(), Some("99999999999999999999999"));
    }

    #[test]
    fn test_unbound_edit_is_local() {
        let literal = InteractiveNumber::literal("0.428", NumberKind::Other);
        assert_eq!(dispatch_edit(&literal, "0.5"), Ok(None));
    }

    #[test]
    fn test_non_numeric_input_rejected() {
        let chaos = InteractiveNumber::bound("0.88", NumberKind::Chaos, Binding::ChaosValue);
        assert!(matches!(
            dispatch_edit(&chaos, "abc"),
            Err(DispatchError::InvalidNumber { field: "chaosValue", .. })
        ));
        assert!(dispatch_edit(&chaos, "NaN").is_err());

        let total = InteractiveNumber::bound("42", NumberKind::Other, Binding::TotalCycles);
        assert!(dispatch_edit(&total, "4.5").is_err());
    }

    #[test]
    fn test_editor_keeps_one_session() {
        let poem = sample_poem();
        let mut editor = Editor::new();

        editor.begin(&poem, "stanza1", 0).unwrap();
        editor.begin(&poem, "stanza3", 0).unwrap();

        assert!(editor.editing_in("stanza1").is_none());
        assert_eq!(editor.editing_in("stanza3"), Some((0, "0.88")));
    }

    #[test]
    fn test_editor_commit_and_cancel() {
        let poem = sample_poem();
        let mut editor = Editor::new();

        editor.begin(&poem, "stanza1", 1).unwrap();
        editor.set_draft("50");
        let patch = editor.commit(&poem).unwrap().unwrap();
        assert_eq!(patch.total_cycles, Some(50));
        assert!(editor.session().is_none());

        editor.begin(&poem, "stanza1", 1).unwrap();
        editor.cancel();
        assert_eq!(editor.commit(&poem), Ok(None));
    }

    #[test]
    fn test_begin_unknown_number() {
        let poem = sample_poem();
        let mut editor = Editor::new();
        assert!(editor.begin(&poem, "stanza6", 0).is_none());
        assert!(editor.begin(&poem, "missing", 0).is_none());
    }
}
