//! Linked-data export
//!
//! Provides:
//! - Triple generation for poems, their interface components and visualization elements
//! - Turtle serialization with prefix shortening
//! - schema.org JSON-LD documents
//! - Predictable anchor ids for deep-linking

pub mod anchors;
pub mod catalogue;
pub mod jsonld;
pub mod triples;
pub mod turtle;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::poem::Poem;

pub use anchors::{SemanticAnchors, WordAnchorDocument};
pub use turtle::to_turtle;

/// Prefix table used for Turtle output, in declaration order
pub const PREFIXES: [(&str, &str); 9] = [
    ("schema", "https://schema.org/"),
    ("dc", "http://purl.org/dc/terms/"),
    ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
    ("xsd", "http://www.w3.org/2001/XMLSchema#"),
    ("foaf", "http://xmlns.com/foaf/0.1/"),
    ("poetry", "https://poetry.platform/vocab/"),
    ("math", "https://www.w3.org/2000/10/swap/math#"),
    ("consciousness", "https://consciousness.vocab/terms/"),
];

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write Turtle: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Object of a triple
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Object {
    /// A full URI or a prefixed name
    Resource(String),
    /// Lexical form of a literal, unquoted
    Literal(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: Object,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
}

impl Triple {
    pub fn resource(subject: &str, predicate: &str, object: &str) -> Self {
        Self {
            subject: subject.to_string(),
            predicate: predicate.to_string(),
            object: Object::Resource(object.to_string()),
            datatype: None,
        }
    }

    pub fn typed(subject: &str, predicate: &str, lexical: impl Into<String>, datatype: &str) -> Self {
        Self {
            subject: subject.to_string(),
            predicate: predicate.to_string(),
            object: Object::Literal(lexical.into()),
            datatype: Some(datatype.to_string()),
        }
    }

    pub fn string(subject: &str, predicate: &str, value: &str) -> Self {
        Self::typed(subject, predicate, value, "xsd:string")
    }

    pub fn integer(subject: &str, predicate: &str, value: impl ToString) -> Self {
        Self::typed(subject, predicate, value.to_string(), "xsd:integer")
    }

    pub fn decimal(subject: &str, predicate: &str, value: f64) -> Self {
        Self::typed(subject, predicate, value.to_string(), "xsd:decimal")
    }
}

/// Which triples an RDF export contains
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportMode {
    Poem,
    Interface,
    Visualization,
    #[default]
    All,
}

/// Exports poems under a base namespace
#[derive(Debug, Clone)]
pub struct Exporter {
    base_uri: String,
}

impl Exporter {
    pub fn new(base_uri: &str) -> Self {
        Self {
            base_uri: base_uri.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    pub fn poem_uri(&self, poem_id: u32) -> String {
        format!("{}/poems/{}", self.base_uri, poem_id)
    }

    pub fn export(&self, poem: &Poem, mode: ExportMode) -> Vec<Triple> {
        match mode {
            ExportMode::Poem => self.export_poem(poem),
            ExportMode::Interface => self.export_interface(poem.id),
            ExportMode::Visualization => self.export_visualization(poem),
            ExportMode::All => {
                let mut triples = self.export_poem(poem);
                triples.extend(self.export_interface(poem.id));
                triples.extend(self.export_visualization(poem));
                triples
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed::sample_poem;

    #[test]
    fn test_base_uri_trailing_slash() {
        let exporter = Exporter::new("https://example.org/");
        assert_eq!(exporter.poem_uri(3), "https://example.org/poems/3");
    }

    #[test]
    fn test_all_mode_concatenates() {
        let exporter = Exporter::new("https://poetry.platform");
        let poem = sample_poem();
        let all = exporter.export(&poem, ExportMode::All);
        let parts = exporter.export(&poem, ExportMode::Poem).len()
            + exporter.export(&poem, ExportMode::Interface).len()
            + exporter.export(&poem, ExportMode::Visualization).len();
        assert_eq!(all.len(), parts);
    }
}
