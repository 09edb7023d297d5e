//! Word splitting, cleaning and occurrence lookup

use serde::Serialize;

use super::PoemContent;

/// A whitespace-delimited word with its byte span in the line
#[derive(Debug, Clone, PartialEq)]
pub struct WordSpan<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

/// Split a line into whitespace-delimited words, keeping byte offsets
pub fn split_words(line: &str) -> Vec<WordSpan<'_>> {
    let mut words = Vec::new();
    let mut start = None;

    for (i, c) in line.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                words.push(WordSpan { text: &line[s..i], start: s, end: i });
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        words.push(WordSpan { text: &line[s..], start: s, end: line.len() });
    }

    words
}

/// Lowercase and drop everything except ASCII word characters and whitespace
pub fn clean_word(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// Anchor id of a word position
pub fn word_anchor(poem_id: u32, stanza: usize, line: usize, word: usize) -> String {
    format!("word-{}-{}-{}-{}", poem_id, stanza, line, word)
}

pub fn line_anchor(poem_id: u32, stanza: usize, line: usize) -> String {
    format!("line-{}-{}-{}", poem_id, stanza, line)
}

pub fn stanza_anchor(poem_id: u32, stanza: usize) -> String {
    format!("stanza-{}-{}", poem_id, stanza)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordOccurrence {
    pub stanza_index: usize,
    pub line_index: usize,
    pub word_index: usize,
    pub anchor_id: String,
    pub text: String,
}

/// Every position in the document whose cleaned word equals the cleaned query
pub fn find_occurrences(poem_id: u32, content: &PoemContent, word: &str) -> Vec<WordOccurrence> {
    let target = clean_word(word);
    if target.is_empty() {
        return Vec::new();
    }

    let mut found = Vec::new();
    for (s, stanza) in content.stanzas.iter().enumerate() {
        for (l, line) in stanza.lines.iter().enumerate() {
            for (w, span) in split_words(line).iter().enumerate() {
                if clean_word(span.text) == target {
                    found.push(WordOccurrence {
                        stanza_index: s,
                        line_index: l,
                        word_index: w,
                        anchor_id: word_anchor(poem_id, s, l, w),
                        text: span.text.to_string(),
                    });
                }
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed::sample_poem;

    #[test]
    fn test_split_words_offsets() {
        let words = split_words("  Delta: 42—the  leap ");
        let texts: Vec<&str> = words.iter().map(|w| w.text).collect();
        assert_eq!(texts, vec!["Delta:", "42—the", "leap"]);
        assert_eq!(words[0].start, 2);
        assert_eq!(&"  Delta: 42—the  leap "[words[1].start..words[1].end], "42—the");
    }

    #[test]
    fn test_clean_word() {
        assert_eq!(clean_word("Gödel's"), "gdels");
        assert_eq!(clean_word("Truth:"), "truth");
        assert_eq!(clean_word("0.88,"), "088");
        assert_eq!(clean_word("—"), "");
    }

    #[test]
    fn test_find_occurrences_case_insensitive() {
        let poem = sample_poem();
        let found = find_occurrences(poem.id, &poem.content, "SPIRAL");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].anchor_id, "word-1-0-0-6");
        assert_eq!(found[0].text, "spiral");

        let found = find_occurrences(poem.id, &poem.content, "the");
        assert!(found.len() > 3);
        assert!(found.iter().all(|o| clean_word(&o.text) == "the"));
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        let poem = sample_poem();
        assert!(find_occurrences(poem.id, &poem.content, "—").is_empty());
    }
}
