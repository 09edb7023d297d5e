//! Anchor ids for deep-linking into a rendered poem

use serde::Serialize;

use super::catalogue::{
    component_anchor, consciousness_field_anchor, dimension_point_anchor, godel_spiral_anchor,
    mesh_line_anchor, vibe_pattern_anchor, COMPONENTS, DIMENSIONS, MESH_LINE_COUNT,
    VIBE_PATTERN_COUNT,
};
use super::Exporter;
use crate::poem::words::{clean_word, line_anchor, split_words, stanza_anchor, word_anchor};
use crate::poem::Poem;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticAnchors {
    pub poem_id: u32,
    pub poem: String,
    pub stanzas: Vec<String>,
    pub components: Vec<String>,
    pub dimension_points: Vec<String>,
    pub vibe_patterns: Vec<String>,
    pub mesh_lines: Vec<String>,
    pub consciousness_field: String,
    pub godel_spiral: String,
    /// Template of word anchors
    pub word_pattern: String,
}

pub fn semantic_anchors(poem: &Poem) -> SemanticAnchors {
    let id = poem.id;
    SemanticAnchors {
        poem_id: id,
        poem: format!("#poem-{}", id),
        stanzas: (0..poem.content.stanzas.len())
            .map(|s| stanza_anchor(id, s))
            .collect(),
        components: COMPONENTS.iter().map(|(name, _)| component_anchor(name)).collect(),
        dimension_points: DIMENSIONS
            .iter()
            .map(|d| dimension_point_anchor(id, d))
            .collect(),
        vibe_patterns: (0..VIBE_PATTERN_COUNT)
            .map(|i| vibe_pattern_anchor(id, i))
            .collect(),
        mesh_lines: (0..MESH_LINE_COUNT).map(|i| mesh_line_anchor(id, i)).collect(),
        consciousness_field: consciousness_field_anchor(id),
        godel_spiral: godel_spiral_anchor(id),
        word_pattern: format!("word-{}-{{stanzaIndex}}-{{lineIndex}}-{{wordIndex}}", id),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordAnchorDocument {
    pub poem_id: u32,
    pub title: String,
    pub cycle_step: i32,
    pub total_cycles: i32,
    pub stanzas: Vec<StanzaWords>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StanzaWords {
    pub stanza_id: String,
    pub stanza_index: usize,
    pub anchor_id: String,
    pub lines: Vec<LineWords>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineWords {
    pub line_index: usize,
    pub anchor_id: String,
    pub text: String,
    pub words: Vec<WordEntry>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    pub word_index: usize,
    pub anchor_id: String,
    pub text: String,
    pub clean_text: String,
    /// Length in characters
    pub length: usize,
    pub uri: String,
}

impl Exporter {
    /// Per-word breakdown of the whole document
    pub fn word_anchors(&self, poem: &Poem) -> WordAnchorDocument {
        let poem_uri = self.poem_uri(poem.id);

        let stanzas = poem
            .content
            .stanzas
            .iter()
            .enumerate()
            .map(|(s, stanza)| StanzaWords {
                stanza_id: stanza.id.clone(),
                stanza_index: s,
                anchor_id: stanza_anchor(poem.id, s),
                lines: stanza
                    .lines
                    .iter()
                    .enumerate()
                    .map(|(l, line)| LineWords {
                        line_index: l,
                        anchor_id: line_anchor(poem.id, s, l),
                        text: line.clone(),
                        words: split_words(line)
                            .iter()
                            .enumerate()
                            .map(|(w, word)| WordEntry {
                                word_index: w,
                                anchor_id: word_anchor(poem.id, s, l, w),
                                text: word.text.to_string(),
                                clean_text: clean_word(word.text),
                                length: word.text.chars().count(),
                                uri: format!("{}/stanza/{}/line/{}/word/{}", poem_uri, s, l, w),
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect();

        WordAnchorDocument {
            poem_id: poem.id,
            title: poem.title.clone(),
            cycle_step: poem.cycle_step,
            total_cycles: poem.total_cycles,
            stanzas,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed::sample_poem;

    #[test]
    fn test_semantic_anchor_counts() {
        let anchors = semantic_anchors(&sample_poem());
        assert_eq!(anchors.stanzas.len(), 6);
        assert_eq!(anchors.components.len(), 5);
        assert_eq!(anchors.dimension_points.len(), 8);
        assert_eq!(anchors.vibe_patterns.len(), 16);
        assert_eq!(anchors.mesh_lines.len(), 10);
        assert_eq!(anchors.word_pattern, "word-1-{stanzaIndex}-{lineIndex}-{wordIndex}");
    }

    #[test]
    fn test_word_document() {
        let exporter = Exporter::new("https://poetry.platform");
        let doc = exporter.word_anchors(&sample_poem());

        let line = &doc.stanzas[1].lines[0];
        assert_eq!(line.anchor_id, "line-1-1-0");
        let first = &line.words[0];
        assert_eq!(first.text, "Gödel");
        assert_eq!(first.clean_text, "gdel");
        assert_eq!(first.length, 5);
        assert_eq!(
            first.uri,
            "https://poetry.platform/poems/1/stanza/1/line/0/word/0"
        );
    }
}
