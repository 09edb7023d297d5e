//! schema.org JSON-LD description of a poem

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::poem::Poem;

/// Gödel number modulo 100, from its leading digits.
///
/// Works on the decimal text so arbitrarily long numbers are exact.
pub fn spiral_iterations(godel_number: &str) -> Option<u64> {
    let digits: Vec<u64> = godel_number
        .trim_start()
        .chars()
        .map_while(|c| c.to_digit(10).map(u64::from))
        .collect();
    if digits.is_empty() {
        return None;
    }
    Some(digits.into_iter().fold(0, |acc, d| (acc * 10 + d) % 100))
}

fn metric_property(name: &str, value: f64, description: &str) -> Value {
    json!({
        "@type": "PropertyValue",
        "name": name,
        "value": value,
        "minValue": 0,
        "maxValue": 1,
        "description": description,
    })
}

pub fn poem_json_ld(poem: &Poem, generated_at: DateTime<Utc>) -> Value {
    let timestamp = generated_at.to_rfc3339();

    let author = json!({
        "@type": "Organization",
        "name": "Interactive Poetry System",
        "description": "An AI-powered interactive poetry platform exploring consciousness and mathematics",
    });

    let keywords = json!([
        "Gödel numbers",
        "consciousness",
        "mathematical poetry",
        "interactive literature",
        "chaos theory",
        "beauty metrics",
        "complexity theory",
        "coherence analysis",
    ]);

    let series = json!({
        "@type": "CreativeWorkSeries",
        "name": "Consciousness Cycles",
        "description": "A series of interactive poems exploring mathematical consciousness",
        "numberOfItems": poem.total_cycles,
    });

    let properties = json!([
        {
            "@type": "PropertyValue",
            "name": "Gödel Number",
            "value": poem.godel_number,
            "description": "Mathematical encoding representing the poem's logical structure",
        },
        metric_property("Chaos Value", poem.chaos_value, "Measure of unpredictability and dynamic complexity"),
        metric_property("Beauty Value", poem.beauty_value, "Aesthetic harmony and visual appeal metric"),
        metric_property("Complexity Value", poem.complexity_value, "Structural and conceptual complexity measurement"),
        metric_property("Coherence Value", poem.coherence_value, "Logical consistency and narrative flow metric"),
        metric_property("Consciousness Value", poem.consciousness_value, "Measure of self-awareness and meta-cognitive depth"),
    ]);

    let interaction = json!({
        "@type": "InteractionCounter",
        "interactionType": "https://schema.org/CommentAction",
        "userInteractionCount": 0,
        "description": "Interactive elements allowing real-time parameter modification",
    });

    let measured = json!([
        {
            "@type": "PropertyValue",
            "name": "Chaos Frequency",
            "value": poem.chaos_value * 10.0,
            "unitText": "Hz",
            "description": "Vibration frequency in the consciousness field",
        },
        {
            "@type": "PropertyValue",
            "name": "Consciousness Field Radius",
            "value": poem.consciousness_value * 80.0,
            "unitText": "pixels",
            "description": "Radius of consciousness visualization",
        },
        {
            "@type": "PropertyValue",
            "name": "Gödel Spiral Iterations",
            "value": spiral_iterations(&poem.godel_number),
            "unitText": "iterations",
            "description": "Number of iterations in the Gödel spiral visualization",
        },
    ]);

    let dataset = json!({
        "@type": "Dataset",
        "name": "Hyperdimensional Poetry Parameters",
        "description": "8-dimensional parameter space defining the poem's characteristics",
        "distribution": {
            "@type": "DataDownload",
            "contentUrl": format!("/api/poems/{}", poem.id),
            "encodingFormat": "application/json",
        },
        "variableMeasured": measured,
    });

    let actions = json!([
        {
            "@type": "InteractAction",
            "name": "Modify Poetry Parameters",
            "description": "Adjust chaos, beauty, complexity, coherence, and consciousness values",
            "target": {
                "@type": "EntryPoint",
                "urlTemplate": format!("/api/poems/{}", poem.id),
                "httpMethod": "PATCH",
            },
        },
        {
            "@type": "ReadAction",
            "name": "View Hyperdimensional Visualization",
            "description": "Explore 8D parameter space projected to 2D",
            "target": {
                "@type": "EntryPoint",
                "urlTemplate": format!("/#poem-{}", poem.id),
                "httpMethod": "GET",
            },
        },
    ]);

    let coverage = json!({
        "@type": "Place",
        "name": "8-Dimensional Parameter Space",
        "description": "Hyperdimensional space containing consciousness, chaos, beauty, complexity, coherence, cycles, Gödel numbers, and temporal dimensions",
    });

    json!({
        "@context": "https://schema.org",
        "@type": "CreativeWork",
        "@id": format!("#poem-{}", poem.id),
        "name": poem.title,
        "text": poem.full_text(),
        "author": author,
        "genre": ["Interactive Poetry", "Digital Literature", "Mathematical Poetry"],
        "keywords": keywords,
        "dateCreated": timestamp,
        "dateModified": timestamp,
        "inLanguage": "en-US",
        "isPartOf": series,
        "position": poem.cycle_step,
        "additionalProperty": properties,
        "interactionStatistic": interaction,
        "mainEntity": dataset,
        "potentialAction": actions,
        "spatialCoverage": coverage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed::sample_poem;

    #[test]
    fn test_spiral_iterations() {
        assert_eq!(spiral_iterations("42424284"), Some(84));
        assert_eq!(spiral_iterations("123456789012345678901234567890"), Some(90));
        assert_eq!(spiral_iterations("7abc"), Some(7));
        assert_eq!(spiral_iterations("abc"), None);
    }

    #[test]
    fn test_json_ld_shape() {
        let poem = sample_poem();
        let doc = poem_json_ld(&poem, Utc::now());

        assert_eq!(doc["@id"], "#poem-1");
        assert_eq!(doc["isPartOf"]["numberOfItems"], 42);
        assert_eq!(doc["position"], 1);
        assert_eq!(doc["additionalProperty"].as_array().unwrap().len(), 6);
        assert_eq!(doc["mainEntity"]["variableMeasured"][2]["value"], 84);
        assert!(doc["text"]
            .as_str()
            .unwrap()
            .ends_with("=== End Cycle 2 ==="));
    }
}
