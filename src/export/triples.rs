//! Poem structure triples

use super::{Exporter, Triple};
use crate::poem::words::{clean_word, split_words, word_anchor};
use crate::poem::Poem;

/// `chaosValue` -> `consciousness:hasChaosValue`
fn metric_predicate(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => format!("consciousness:has{}{}", first.to_ascii_uppercase(), chars.as_str()),
        None => "consciousness:has".to_string(),
    }
}

fn push_metric(triples: &mut Vec<Triple>, poem_uri: &str, name: &str, value: f64) {
    let metric_uri = format!("{}/metric/{}", poem_uri, name);
    triples.extend([
        Triple::resource(&metric_uri, "rdf:type", "consciousness:Metric"),
        Triple::resource(poem_uri, &metric_predicate(name), &metric_uri),
        Triple::string(&metric_uri, "schema:name", name),
        Triple::decimal(&metric_uri, "schema:value", value),
        Triple::typed(&metric_uri, "consciousness:minValue", "0.0", "xsd:decimal"),
        Triple::typed(&metric_uri, "consciousness:maxValue", "1.0", "xsd:decimal"),
    ]);
}

impl Exporter {
    /// Metadata, metrics, stanza/line/word structure, interactive numbers and end message
    pub fn export_poem(&self, poem: &Poem) -> Vec<Triple> {
        let mut triples = Vec::new();
        let poem_uri = self.poem_uri(poem.id);
        let p = poem_uri.as_str();

        triples.extend([
            Triple::resource(p, "rdf:type", "schema:CreativeWork"),
            Triple::resource(p, "rdf:type", "poetry:InteractivePoem"),
            Triple::string(p, "schema:name", &poem.title),
            Triple::string(p, "dc:title", &poem.title),
            Triple::integer(p, "schema:position", poem.cycle_step),
            Triple::integer(p, "poetry:cycleStep", poem.cycle_step),
            Triple::integer(p, "poetry:totalCycles", poem.total_cycles),
            Triple::typed(p, "poetry:godelNumber", poem.godel_number.as_str(), "xsd:long"),
        ]);

        for (name, value) in poem.metrics() {
            push_metric(&mut triples, p, name, value);
        }

        for (s, stanza) in poem.content.stanzas.iter().enumerate() {
            let stanza_uri = format!("{}/stanza/{}", p, s);
            triples.extend([
                Triple::resource(&stanza_uri, "rdf:type", "poetry:Stanza"),
                Triple::resource(p, "poetry:hasStanza", &stanza_uri),
                Triple::integer(&stanza_uri, "schema:position", s),
            ]);

            for (l, line) in stanza.lines.iter().enumerate() {
                let line_uri = format!("{}/line/{}", stanza_uri, l);
                triples.extend([
                    Triple::resource(&line_uri, "rdf:type", "poetry:Line"),
                    Triple::resource(&stanza_uri, "poetry:hasLine", &line_uri),
                    Triple::integer(&line_uri, "schema:position", l),
                    Triple::string(&line_uri, "schema:text", line),
                ]);

                for (w, word) in split_words(line).iter().enumerate() {
                    let word_uri = format!("{}/word/{}", line_uri, w);
                    triples.extend([
                        Triple::resource(&word_uri, "rdf:type", "poetry:Word"),
                        Triple::resource(&line_uri, "poetry:hasWord", &word_uri),
                        Triple::integer(&word_uri, "schema:position", w),
                        Triple::string(&word_uri, "schema:text", word.text),
                        Triple::string(&word_uri, "poetry:cleanText", &clean_word(word.text)),
                        Triple::integer(&word_uri, "poetry:wordLength", word.text.chars().count()),
                        Triple::string(&word_uri, "poetry:anchorId", &word_anchor(poem.id, s, l, w)),
                    ]);
                }
            }
        }

        for (s, stanza) in poem.content.stanzas.iter().enumerate() {
            for (i, number) in stanza.interactive_numbers.iter().enumerate() {
                let number_uri = format!("{}/stanza/{}/interactive/{}", p, s, i);
                triples.extend([
                    Triple::resource(&number_uri, "rdf:type", "poetry:InteractiveNumber"),
                    Triple::resource(p, "poetry:hasInteractiveElement", &number_uri),
                    Triple::string(&number_uri, "schema:value", &number.value),
                    Triple::string(&number_uri, "poetry:type", number.kind.as_str()),
                    Triple::integer(&number_uri, "poetry:stanzaIndex", s),
                    Triple::integer(&number_uri, "poetry:interactiveIndex", i),
                ]);
                if let Some(binding) = number.binding {
                    triples.push(Triple::string(&number_uri, "poetry:boundTo", binding.field_name()));
                }
            }
        }

        if !poem.content.end_message.is_empty() {
            let end_uri = format!("{}/endMessage", p);
            triples.extend([
                Triple::resource(&end_uri, "rdf:type", "poetry:EndMessage"),
                Triple::resource(p, "poetry:hasEndMessage", &end_uri),
                Triple::string(&end_uri, "schema:text", &poem.content.end_message),
            ]);
        }

        triples
    }
}
