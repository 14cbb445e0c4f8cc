use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::GraphSpec;

pub fn load_graph_file(path: &Path) -> Result<GraphSpec> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read dataset file {}", path.display()))?;
    parse_graph_json(&raw).with_context(|| format!("invalid dataset file {}", path.display()))
}

fn parse_graph_json(raw: &str) -> Result<GraphSpec> {
    serde_json::from_str(raw).context("dataset is not valid graph JSON")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_shape() {
        let spec = parse_graph_json(
            r##"{
                "nodes": [
                    {"id": "J. Doe", "group": "person", "size": 20.0, "color": "#ff6b6b"},
                    {"id": "Fraud case 2023", "group": "case", "size": 15.0}
                ],
                "links": [
                    {"source": "J. Doe", "target": "Fraud case 2023", "relationship": "charged in"}
                ]
            }"##,
        )
        .unwrap();

        assert_eq!(spec.nodes.len(), 2);
        assert_eq!(spec.links.len(), 1);
        assert_eq!(spec.nodes[0].color.as_deref(), Some("#ff6b6b"));
        assert_eq!(spec.links[0].relationship, "charged in");
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let spec = parse_graph_json("{}").unwrap();
        assert!(spec.nodes.is_empty());
        assert!(spec.links.is_empty());
    }

    #[test]
    fn malformed_json_reports_context() {
        let error = parse_graph_json("not json").unwrap_err().to_string();
        assert!(error.contains("graph JSON"));
    }
}
