//! Fixed catalogues of interface components and visualization elements
//!
//! Shared by the Turtle export and the semantic anchor listing so both name
//! the same elements.

use super::{Exporter, Triple};
use crate::poem::Poem;

/// Interface components and their RDF types
pub const COMPONENTS: [(&str, &str); 5] = [
    ("PoemDisplay", "poetry:PoemRenderer"),
    ("MetricsDashboard", "consciousness:MetricsVisualization"),
    ("InteractiveControls", "poetry:ParameterController"),
    ("VibeVisualization", "math:HyperdimensionalVisualization"),
    ("CycleNavigation", "poetry:NavigationController"),
];

/// Dimensions of the projection, one point each
pub const DIMENSIONS: [&str; 8] = [
    "chaos",
    "beauty",
    "complexity",
    "coherence",
    "consciousness",
    "cycle",
    "godel",
    "harmonic",
];

pub const VIBE_PATTERN_COUNT: usize = 16;
pub const MESH_LINE_COUNT: usize = 10;

pub fn component_anchor(name: &str) -> String {
    format!("#{}", name.to_lowercase())
}

pub fn dimension_point_anchor(poem_id: u32, dimension: &str) -> String {
    format!("#dimension-point-{}-{}", poem_id, dimension)
}

pub fn vibe_pattern_anchor(poem_id: u32, index: usize) -> String {
    format!("#vibe-pattern-{}-{}", poem_id, index)
}

pub fn mesh_line_anchor(poem_id: u32, index: usize) -> String {
    format!("#mesh-line-{}-{}", poem_id, index)
}

pub fn consciousness_field_anchor(poem_id: u32) -> String {
    format!("#consciousness-field-{}", poem_id)
}

pub fn godel_spiral_anchor(poem_id: u32) -> String {
    format!("#godel-spiral-{}", poem_id)
}

impl Exporter {
    /// Interface description; depends only on the poem id
    pub fn export_interface(&self, poem_id: u32) -> Vec<Triple> {
        let gui_uri = format!("{}/gui/poem/{}", self.base_uri, poem_id);
        let g = gui_uri.as_str();

        let mut triples = vec![
            Triple::resource(g, "rdf:type", "schema:UserInterface"),
            Triple::resource(g, "rdf:type", "poetry:InteractiveInterface"),
            Triple::string(g, "schema:name", "Interactive Poetry Interface"),
        ];

        for (name, kind) in COMPONENTS {
            let component_uri = format!("{}/component/{}", g, name);
            triples.extend([
                Triple::resource(&component_uri, "rdf:type", "schema:SoftwareApplication"),
                Triple::resource(&component_uri, "rdf:type", kind),
                Triple::resource(g, "schema:hasPart", &component_uri),
                Triple::string(&component_uri, "schema:name", name),
                Triple::string(&component_uri, "poetry:componentAnchor", &component_anchor(name)),
            ]);
        }

        triples
    }

    /// Visualization elements, carrying the live consciousness value and Gödel number
    pub fn export_visualization(&self, poem: &Poem) -> Vec<Triple> {
        let svg_uri = format!("{}/svg/poem/{}", self.base_uri, poem.id);
        let v = svg_uri.as_str();

        let mut triples = vec![
            Triple::resource(v, "rdf:type", "schema:VisualArtwork"),
            Triple::resource(v, "rdf:type", "math:HyperdimensionalVisualization"),
            Triple::string(v, "schema:name", "8D Vibe Projection"),
        ];

        for dimension in DIMENSIONS {
            let point_uri = format!("{}/dimension-point/{}", v, dimension);
            triples.extend([
                Triple::resource(&point_uri, "rdf:type", "math:DimensionalProjection"),
                Triple::resource(v, "math:hasProjection", &point_uri),
                Triple::string(&point_uri, "schema:name", &format!("{} dimension", dimension)),
                Triple::string(
                    &point_uri,
                    "poetry:semanticAnchor",
                    &dimension_point_anchor(poem.id, dimension),
                ),
                Triple::string(&point_uri, "consciousness:dimensionName", dimension),
            ]);
        }

        for i in 0..VIBE_PATTERN_COUNT {
            let pattern_uri = format!("{}/vibe-pattern/{}", v, i);
            triples.extend([
                Triple::resource(&pattern_uri, "rdf:type", "math:VibrationalPattern"),
                Triple::resource(v, "math:hasPattern", &pattern_uri),
                Triple::integer(&pattern_uri, "schema:position", i),
                Triple::string(&pattern_uri, "poetry:semanticAnchor", &vibe_pattern_anchor(poem.id, i)),
            ]);
        }

        for i in 0..MESH_LINE_COUNT {
            let mesh_uri = format!("{}/mesh-line/{}", v, i);
            triples.extend([
                Triple::resource(&mesh_uri, "rdf:type", "math:HyperdimensionalConnection"),
                Triple::resource(v, "math:hasConnection", &mesh_uri),
                Triple::integer(&mesh_uri, "schema:position", i),
                Triple::string(&mesh_uri, "poetry:semanticAnchor", &mesh_line_anchor(poem.id, i)),
            ]);
        }

        let field_uri = format!("{}/consciousness-field", v);
        triples.extend([
            Triple::resource(&field_uri, "rdf:type", "consciousness:Field"),
            Triple::resource(v, "consciousness:hasField", &field_uri),
            Triple::string(&field_uri, "schema:name", "Central Consciousness Field"),
            Triple::string(&field_uri, "poetry:semanticAnchor", &consciousness_field_anchor(poem.id)),
            Triple::decimal(&field_uri, "consciousness:value", poem.consciousness_value),
        ]);

        let spiral_uri = format!("{}/godel-spiral", v);
        triples.extend([
            Triple::resource(&spiral_uri, "rdf:type", "math:GodelSpiral"),
            Triple::resource(v, "math:hasSpiral", &spiral_uri),
            Triple::string(&spiral_uri, "schema:name", "Gödel Number Spiral"),
            Triple::string(&spiral_uri, "poetry:semanticAnchor", &godel_spiral_anchor(poem.id)),
            Triple::typed(&spiral_uri, "math:godelNumber", poem.godel_number.as_str(), "xsd:long"),
        ]);

        triples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed::sample_poem;

    #[test]
    fn test_interface_catalogue() {
        let exporter = Exporter::new("https://poetry.platform");
        let triples = exporter.export_interface(1);
        let parts = triples
            .iter()
            .filter(|t| t.predicate == "schema:hasPart")
            .count();
        assert_eq!(parts, 5);
        assert_eq!(triples.len(), 3 + 5 * 5);
    }

    #[test]
    fn test_visualization_counts() {
        let exporter = Exporter::new("https://poetry.platform");
        let triples = exporter.export_visualization(&sample_poem());
        let count = |predicate: &str| triples.iter().filter(|t| t.predicate == predicate).count();

        assert_eq!(count("math:hasProjection"), 8);
        assert_eq!(count("math:hasPattern"), 16);
        assert_eq!(count("math:hasConnection"), 10);
        assert_eq!(count("consciousness:hasField"), 1);
        assert_eq!(count("math:hasSpiral"), 1);
    }

    #[test]
    fn test_anchor_formats() {
        assert_eq!(component_anchor("PoemDisplay"), "#poemdisplay");
        assert_eq!(dimension_point_anchor(1, "godel"), "#dimension-point-1-godel");
        assert_eq!(godel_spiral_anchor(2), "#godel-spiral-2");
    }
}
