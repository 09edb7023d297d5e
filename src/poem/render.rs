//! Line rendering
//!
//! Splits a stanza line into plain text and interactive number segments.
//! Descriptors claim spans longest literal first, each taking the first
//! occurrence that does not overlap an earlier claim, so "42" is never
//! split by a shorter "4". Claimed spans are emitted in text order.

use serde::Serialize;

use super::dispatch::Editor;
use super::resolve::{longest_first, resolve_stanza, ResolvedNumber};
use super::words::{line_anchor, split_words, stanza_anchor, word_anchor};
use super::{Binding, Poem};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Segment {
    /// Plain text (whitespace only, in word mode)
    Text { text: String },
    /// A word of plain text carrying its deep-link anchor
    #[serde(rename_all = "camelCase")]
    Word {
        text: String,
        anchor_id: String,
        word_index: usize,
    },
    #[serde(rename_all = "camelCase")]
    Interactive {
        index: usize,
        value: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        binding: Option<Binding>,
    },
    /// The one number currently being edited, showing the draft value
    #[serde(rename_all = "camelCase")]
    Editable { index: usize, value: String },
}

impl Segment {
    /// Visible text of the segment
    pub fn text(&self) -> &str {
        match self {
            Segment::Text { text } | Segment::Word { text, .. } => text,
            Segment::Interactive { value, .. } | Segment::Editable { value, .. } => value,
        }
    }
}

/// Concatenate the visible text of a segment list
pub fn visible_text(segments: &[Segment]) -> String {
    segments.iter().map(Segment::text).collect()
}

#[derive(Debug, Clone, Copy)]
struct Claim {
    start: usize,
    end: usize,
    index: usize,
}

fn claim_spans(line: &str, resolved: &[ResolvedNumber<'_>]) -> Vec<Claim> {
    let mut claims: Vec<Claim> = Vec::new();

    for idx in longest_first(resolved, |r| r.number.value.len()) {
        let literal = resolved[idx].number.value.as_str();
        if literal.is_empty() {
            continue;
        }

        let mut from = 0;
        while let Some(pos) = line[from..].find(literal) {
            let start = from + pos;
            let end = start + literal.len();
            if claims.iter().any(|c| start < c.end && c.start < end) {
                from = start + line[start..].chars().next().map_or(1, char::len_utf8);
                continue;
            }
            claims.push(Claim { start, end, index: resolved[idx].index });
            break;
        }
    }

    claims.sort_by_key(|c| c.start);
    claims
}

fn number_segment(resolved: &ResolvedNumber<'_>, editing: Option<(usize, &str)>) -> Segment {
    match editing {
        Some((index, draft)) if index == resolved.index => Segment::Editable {
            index,
            value: draft.to_string(),
        },
        _ => Segment::Interactive {
            index: resolved.index,
            value: resolved.display.clone(),
            binding: resolved.number.binding,
        },
    }
}

fn find_resolved<'r, 'a>(resolved: &'r [ResolvedNumber<'a>], index: usize) -> Option<&'r ResolvedNumber<'a>> {
    resolved.iter().find(|r| r.index == index)
}

/// Render a line into text and number segments.
///
/// `editing` names the descriptor index in edit mode and its draft value.
pub fn render_line(
    line: &str,
    resolved: &[ResolvedNumber<'_>],
    editing: Option<(usize, &str)>,
) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for claim in claim_spans(line, resolved) {
        if claim.start > cursor {
            segments.push(Segment::Text {
                text: line[cursor..claim.start].to_string(),
            });
        }
        if let Some(r) = find_resolved(resolved, claim.index) {
            segments.push(number_segment(r, editing));
        }
        cursor = claim.end;
    }
    if cursor < line.len() {
        segments.push(Segment::Text {
            text: line[cursor..].to_string(),
        });
    }

    segments
}

/// Position of a line within a poem, for word anchors
#[derive(Debug, Clone, Copy)]
pub struct LinePosition {
    pub poem_id: u32,
    pub stanza_index: usize,
    pub line_index: usize,
}

/// Like [`render_line`], with plain text further split into anchored words.
///
/// Word indices count whitespace-delimited words of the original line, so a
/// word partly covered by a number keeps the index the exporter gives it.
pub fn render_line_words(
    line: &str,
    resolved: &[ResolvedNumber<'_>],
    editing: Option<(usize, &str)>,
    position: LinePosition,
) -> Vec<Segment> {
    let words = split_words(line);
    let word_at = |offset: usize| {
        words
            .iter()
            .position(|w| w.start <= offset && offset < w.end)
            .unwrap_or(0)
    };

    let mut segments = Vec::new();
    let push_plain = |segments: &mut Vec<Segment>, start: usize, end: usize| {
        let gap = &line[start..end];
        let mut run_start = 0;
        let mut run_ws: Option<bool> = None;

        let flush = |segments: &mut Vec<Segment>, from: usize, to: usize, ws: bool| {
            let text = gap[from..to].to_string();
            if ws {
                segments.push(Segment::Text { text });
            } else {
                let word_index = word_at(start + from);
                segments.push(Segment::Word {
                    text,
                    anchor_id: word_anchor(
                        position.poem_id,
                        position.stanza_index,
                        position.line_index,
                        word_index,
                    ),
                    word_index,
                });
            }
        };

        for (i, c) in gap.char_indices() {
            let ws = c.is_whitespace();
            match run_ws {
                Some(prev) if prev != ws => {
                    flush(segments, run_start, i, prev);
                    run_start = i;
                    run_ws = Some(ws);
                }
                None => run_ws = Some(ws),
                _ => {}
            }
        }
        if let Some(ws) = run_ws {
            flush(segments, run_start, gap.len(), ws);
        }
    };

    let mut cursor = 0;
    for claim in claim_spans(line, resolved) {
        if claim.start > cursor {
            push_plain(&mut segments, cursor, claim.start);
        }
        if let Some(r) = find_resolved(resolved, claim.index) {
            segments.push(number_segment(r, editing));
        }
        cursor = claim.end;
    }
    if cursor < line.len() {
        push_plain(&mut segments, cursor, line.len());
    }

    segments
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedLine {
    pub anchor_id: String,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedStanza {
    pub id: String,
    pub anchor_id: String,
    pub has_left_border: bool,
    pub lines: Vec<RenderedLine>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedPoem {
    pub poem_id: u32,
    pub title: String,
    pub stanzas: Vec<RenderedStanza>,
    /// End message, one entry per line
    pub end_message: Vec<String>,
}

/// Render every stanza in word mode, honouring the editor's session
pub fn render_poem(poem: &Poem, editor: &Editor) -> RenderedPoem {
    let stanzas = poem
        .content
        .stanzas
        .iter()
        .enumerate()
        .map(|(s, stanza)| {
            let resolved = resolve_stanza(poem, stanza);
            let editing = editor.editing_in(&stanza.id);
            let lines = stanza
                .lines
                .iter()
                .enumerate()
                .map(|(l, line)| RenderedLine {
                    anchor_id: line_anchor(poem.id, s, l),
                    segments: render_line_words(
                        line,
                        &resolved,
                        editing,
                        LinePosition { poem_id: poem.id, stanza_index: s, line_index: l },
                    ),
                })
                .collect();

            RenderedStanza {
                id: stanza.id.clone(),
                anchor_id: stanza_anchor(poem.id, s),
                has_left_border: stanza.has_left_border,
                lines,
            }
        })
        .collect();

    RenderedPoem {
        poem_id: poem.id,
        title: poem.title.clone(),
        stanzas,
        end_message: poem.content.end_message.lines().map(str::to_string).collect(),
    }
}
