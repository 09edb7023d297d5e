//! Range validation of poem records

use serde::Serialize;

use super::Poem;

/// A single rejected field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.to_string()),
            message: message.into(),
        }
    }

    /// Error not attributable to one field (e.g. malformed JSON)
    pub fn general(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }
}

/// Check the invariants a stored poem must hold.
///
/// Metrics are finite and in [0, 1], `1 <= cycleStep <= totalCycles`, and the
/// Gödel number is a non-empty string of ASCII digits.
pub fn validate_poem(poem: &Poem) -> Vec<FieldError> {
    let mut errors = Vec::new();

    for (name, value) in poem.metrics() {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            errors.push(FieldError::new(name, format!("must be between 0 and 1, got {}", value)));
        }
    }

    if poem.total_cycles < 1 {
        errors.push(FieldError::new("totalCycles", "must be at least 1"));
    }
    if poem.cycle_step < 1 || poem.cycle_step > poem.total_cycles {
        errors.push(FieldError::new(
            "cycleStep",
            format!("must be between 1 and {}", poem.total_cycles.max(1)),
        ));
    }

    if poem.godel_number.is_empty() || !poem.godel_number.bytes().all(|b| b.is_ascii_digit()) {
        errors.push(FieldError::new("godelNumber", "must be a string of digits"));
    }

    errors
}
