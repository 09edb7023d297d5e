//! Turtle serialization
//!
//! Triples are grouped by subject in first-seen order. Each subject block
//! lists `predicate object` pairs separated by ` ;` and ends with ` .`.

use std::collections::HashMap;
use std::fmt::Write;

use super::{ExportError, Object, Triple, PREFIXES};

/// Replace a known namespace with its prefix
pub fn shorten_uri(uri: &str) -> String {
    for (prefix, namespace) in PREFIXES {
        if let Some(local) = uri.strip_prefix(namespace) {
            return format!("{}:{}", prefix, local);
        }
    }
    uri.to_string()
}

fn escape_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

fn render_object(triple: &Triple) -> String {
    match &triple.object {
        Object::Literal(lexical) => match &triple.datatype {
            Some(datatype) => format!("\"{}\"^^{}", escape_literal(lexical), shorten_uri(datatype)),
            None => format!("\"{}\"", escape_literal(lexical)),
        },
        Object::Resource(uri) => {
            let short = shorten_uri(uri);
            if short == *uri && (uri.starts_with("http://") || uri.starts_with("https://")) {
                format!("<{}>", uri)
            } else {
                short
            }
        }
    }
}

/// Serialize triples as Turtle, prefix declarations first
pub fn to_turtle(triples: &[Triple]) -> Result<String, ExportError> {
    let mut out = String::new();

    for (prefix, namespace) in PREFIXES {
        writeln!(out, "@prefix {}: <{}> .", prefix, namespace)?;
    }
    writeln!(out)?;

    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&Triple>> = HashMap::new();
    for triple in triples {
        let subject = triple.subject.as_str();
        groups
            .entry(subject)
            .or_insert_with(|| {
                order.push(subject);
                Vec::new()
            })
            .push(triple);
    }

    for subject in order {
        let group = &groups[subject];
        writeln!(out, "<{}>", subject)?;
        for (i, triple) in group.iter().enumerate() {
            let terminator = if i + 1 == group.len() { " ." } else { " ;" };
            writeln!(
                out,
                "    {} {}{}",
                shorten_uri(&triple.predicate),
                render_object(triple),
                terminator
            )?;
        }
        writeln!(out)?;
    }

    Ok(out)
}
