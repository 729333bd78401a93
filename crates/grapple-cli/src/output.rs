//! Output formatting for the CLI.
//!
//! Styling (colors, dashes, font sizes) is applied here, on top of the
//! derived graph; the graph itself carries no presentation fields.

use crate::commands::StatsReport;
use crate::config::OutputFormat;
use crate::error::{CliError, Result};
use colored::*;
use grapple_domain::{Advantage, TechniqueType};
use grapple_graph::{DerivedGraph, PositionNode, TechniqueEdge};
use serde_json::{json, Value};
use std::fmt::Write as _;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Fill color for a position node.
pub fn advantage_color(advantage: Option<Advantage>) -> &'static str {
    match advantage {
        Some(Advantage::Dominant) => "#4f46e5",
        Some(Advantage::Advantageous) => "#818cf8",
        Some(Advantage::Neutral) => "#a5b4fc",
        Some(Advantage::Disadvantageous) => "#e11d48",
        Some(Advantage::Inferior) => "#fb7185",
        None => "#6b7280",
    }
}

/// Stroke color for an outcome edge.
pub fn technique_type_color(technique_type: TechniqueType) -> &'static str {
    match technique_type {
        TechniqueType::Submission => "#dc2626",
        TechniqueType::Sweep => "#2563eb",
        TechniqueType::Escape => "#65a30d",
        TechniqueType::Transition => "#9333ea",
        TechniqueType::Control => "#0891b2",
        TechniqueType::Takedown => "#ea580c",
        TechniqueType::GuardPass => "#ca8a04",
        TechniqueType::GuardRecovery => "#059669",
    }
}

/// Stroke color for setup edges.
pub const SETUP_EDGE_COLOR: &str = "#aaaaaa";

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a derived graph.
    pub fn format_graph(&self, graph: &DerivedGraph) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&graph_json(graph))?),
            OutputFormat::Table => Ok(self.format_graph_table(graph)),
            OutputFormat::Dot => Ok(to_dot(graph)),
        }
    }

    /// Format knowledge base statistics.
    pub fn format_stats(&self, report: &StatsReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let by_type: serde_json::Map<String, Value> = report
                    .by_type
                    .iter()
                    .map(|(technique_type, count)| (technique_type.as_str().to_string(), json!(count)))
                    .collect();

                Ok(serde_json::to_string_pretty(&json!({
                    "positions": report.stats.positions,
                    "techniques": report.stats.techniques,
                    "submissions": report.stats.submissions,
                    "techniquesByType": by_type,
                }))?)
            }
            OutputFormat::Table => Ok(self.format_stats_table(report)),
            OutputFormat::Dot => Err(CliError::InvalidInput(
                "DOT output is only available for the graph command".to_string(),
            )),
        }
    }

    fn format_graph_table(&self, graph: &DerivedGraph) -> String {
        if graph.nodes.is_empty() {
            return self.colorize("No positions match the filters.", "yellow");
        }

        let mut nodes = Builder::default();
        nodes.push_record(["ID", "Label", "Advantage", "Variant", "X", "Y"]);
        for node in &graph.nodes {
            let (x, y) = match node.position {
                Some(point) => (format!("{:.1}", point.x), format!("{:.1}", point.y)),
                None => ("-".to_string(), "-".to_string()),
            };
            nodes.push_record([
                node.id.as_str(),
                node.label.as_str(),
                node.advantage.map(|a| a.as_str()).unwrap_or("-"),
                if node.is_variant { "yes" } else { "" },
                x.as_str(),
                y.as_str(),
            ]);
        }

        let mut out = format!(
            "{}\n{}\n",
            self.colorize(&format!("Positions ({})", graph.nodes.len()), "cyan"),
            styled(nodes)
        );

        if graph.edges.is_empty() {
            out.push_str(&self.colorize("No techniques connect these positions.", "yellow"));
            return out;
        }

        let mut edges = Builder::default();
        edges.push_record(["Source", "Target", "Label", "Kind", "Type"]);
        for edge in &graph.edges {
            edges.push_record([
                edge.source.as_str(),
                edge.target.as_str(),
                edge.data.label.as_str(),
                if edge.data.is_setup_edge { "setup" } else { "outcome" },
                edge.data.technique_type.as_str(),
            ]);
        }

        out.push_str(&format!(
            "\n{}\n{}",
            self.colorize(&format!("Techniques ({})", graph.edges.len()), "cyan"),
            styled(edges)
        ));
        out
    }

    fn format_stats_table(&self, report: &StatsReport) -> String {
        let mut totals = Builder::default();
        totals.push_record(["Metric", "Count"]);
        totals.push_record(["Positions".to_string(), report.stats.positions.to_string()]);
        totals.push_record(["Techniques".to_string(), report.stats.techniques.to_string()]);
        totals.push_record(["Submissions".to_string(), report.stats.submissions.to_string()]);

        let mut by_type = Builder::default();
        by_type.push_record(["Technique Type", "Count"]);
        for (technique_type, count) in &report.by_type {
            by_type.push_record([technique_type.as_str().to_string(), count.to_string()]);
        }

        format!(
            "{}\n{}\n\n{}\n{}",
            self.colorize("Knowledge Base", "cyan"),
            styled(totals),
            self.colorize("By Type", "cyan"),
            styled(by_type)
        )
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().bold().to_string(),
            _ => text.to_string(),
        }
    }
}

fn styled(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn node_json(node: &PositionNode) -> Value {
    json!({
        "id": node.id.as_str(),
        "label": node.label,
        "positionId": node.position_id.as_str(),
        "advantage": node.advantage.map(|a| a.as_str()),
        "isVariant": node.is_variant,
        "position": node.position.map(|p| json!({ "x": p.x, "y": p.y })),
    })
}

fn edge_json(edge: &TechniqueEdge) -> Value {
    json!({
        "id": edge.id.to_string(),
        "source": edge.source.as_str(),
        "target": edge.target.as_str(),
        "data": {
            "techniqueId": edge.data.technique_id.as_str(),
            "techniqueType": edge.data.technique_type.as_str(),
            "label": edge.data.label,
            "isSetupEdge": edge.data.is_setup_edge,
        },
    })
}

/// The graph as `{nodes, edges}` JSON.
pub fn graph_json(graph: &DerivedGraph) -> Value {
    json!({
        "nodes": graph.nodes.iter().map(node_json).collect::<Vec<_>>(),
        "edges": graph.edges.iter().map(edge_json).collect::<Vec<_>>(),
    })
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Render the graph as a Graphviz digraph.
///
/// Positioned nodes get pinned `pos` attributes so `neato -n` reproduces the
/// layout; unpositioned graphs are left to Graphviz.
pub fn to_dot(graph: &DerivedGraph) -> String {
    let mut out = String::from("digraph grapple {\n");
    out.push_str("  node [shape=box, style=\"rounded,filled\", fontcolor=\"#ffffff\", fontname=\"Helvetica\"];\n");
    out.push_str("  edge [fontname=\"Helvetica\"];\n");

    // Writing to a String cannot fail
    for node in &graph.nodes {
        let _ = write!(
            out,
            "  {} [label={}, fillcolor=\"{}\", fontsize={}",
            quote(node.id.as_str()),
            quote(&node.label),
            advantage_color(node.advantage),
            if node.is_variant { 12 } else { 14 },
        );
        if let Some(point) = node.position {
            let _ = write!(out, ", pos=\"{},{}!\"", point.x, point.y);
        }
        out.push_str("];\n");
    }

    for edge in &graph.edges {
        let _ = write!(
            out,
            "  {} -> {} [id={}, label={}, ",
            quote(edge.source.as_str()),
            quote(edge.target.as_str()),
            quote(&edge.id.to_string()),
            quote(&edge.data.label),
        );
        if edge.data.is_setup_edge {
            let _ = write!(
                out,
                "color=\"{0}\", fontcolor=\"#666666\", fontsize=9, penwidth=1, style=dashed",
                SETUP_EDGE_COLOR
            );
        } else {
            let _ = write!(
                out,
                "color=\"{}\", fontcolor=\"#333333\", fontsize=11, penwidth=2",
                technique_type_color(edge.data.technique_type)
            );
        }
        out.push_str("];\n");
    }

    out.push_str("}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use grapple_domain::{KnowledgeBaseStats, TechniqueType};
    use grapple_graph::{EdgeId, Point, TechniqueEdgeData};

    fn node(id: &str, advantage: Option<Advantage>, is_variant: bool) -> PositionNode {
        PositionNode {
            id: id.into(),
            label: format!("{} \"label\"", id),
            position_id: id.into(),
            advantage,
            is_variant,
            position: None,
        }
    }

    fn graph() -> DerivedGraph {
        let mut mount = node("mount-top", Some(Advantage::Dominant), false);
        mount.position = Some(Point::new(10.0, 20.5));

        DerivedGraph {
            nodes: vec![mount, node("mount-s-top", None, true)],
            edges: vec![
                TechniqueEdge {
                    id: EdgeId::Outcome {
                        start: "mount-top".into(),
                        technique: "mount-top-s-mount-transition".into(),
                        end: "mount-s-top".into(),
                        outcome_index: 0,
                    },
                    source: "mount-top".into(),
                    target: "mount-s-top".into(),
                    data: TechniqueEdgeData {
                        technique_id: "mount-top-s-mount-transition".into(),
                        technique_type: TechniqueType::Transition,
                        label: "S-Mount Transition".to_string(),
                        is_setup_edge: false,
                    },
                },
                TechniqueEdge {
                    id: EdgeId::Setup {
                        setup_technique: "mount-top-americana".into(),
                        technique: "mount-top-armbar".into(),
                    },
                    source: "mount-top".into(),
                    target: "mount-s-top".into(),
                    data: TechniqueEdgeData {
                        technique_id: "mount-top-americana".into(),
                        technique_type: TechniqueType::Submission,
                        label: "Setup: Americana".to_string(),
                        is_setup_edge: true,
                    },
                },
            ],
        }
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let value: Value = serde_json::from_str(&formatter.format_graph(&graph()).unwrap()).unwrap();

        assert_eq!(value["nodes"][0]["positionId"], "mount-top");
        assert_eq!(value["nodes"][0]["advantage"], "Dominant");
        assert_eq!(value["nodes"][0]["position"]["y"], 20.5);
        assert_eq!(value["nodes"][1]["isVariant"], true);
        assert!(value["nodes"][1]["position"].is_null());

        assert_eq!(value["edges"][0]["id"], "mount-top-via-mount-top-s-mount-transition-to-mount-s-top-0");
        assert_eq!(value["edges"][0]["data"]["techniqueType"], "Transition");
        assert_eq!(value["edges"][1]["id"], "setup-mount-top-americana-to-mount-top-armbar");
        assert_eq!(value["edges"][1]["data"]["isSetupEdge"], true);
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_graph(&graph()).unwrap();

        assert!(output.contains("Positions (2)"));
        assert!(output.contains("Techniques (2)"));
        assert!(output.contains("10.0"));
        assert!(output.contains("setup"));
        assert!(output.contains("Setup: Americana"));
    }

    #[test]
    fn test_empty_graph() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_graph(&DerivedGraph::default()).unwrap();
        assert!(output.contains("No positions match"));
    }

    #[test]
    fn test_dot_format() {
        let dot = to_dot(&graph());

        assert!(dot.starts_with("digraph grapple {"));
        assert!(dot.contains(r##""mount-top" [label="mount-top \"label\"", fillcolor="#4f46e5", fontsize=14, pos="10,20.5!"];"##));
        assert!(dot.contains(r##""mount-s-top" [label="mount-s-top \"label\"", fillcolor="#6b7280", fontsize=12];"##));
        assert!(dot.contains(r##"color="#9333ea""##));
        assert!(dot.contains("style=dashed"));
        assert!(dot.trim_end().ends_with('}'));
    }

    #[test]
    fn test_stats_formats() {
        let report = StatsReport {
            stats: KnowledgeBaseStats {
                positions: 4,
                techniques: 3,
                submissions: 1,
            },
            by_type: vec![(TechniqueType::Submission, 1), (TechniqueType::Sweep, 2)],
        };

        let table = Formatter::new(OutputFormat::Table, false).format_stats(&report).unwrap();
        assert!(table.contains("Submissions"));
        assert!(table.contains("Sweep"));

        let json: Value =
            serde_json::from_str(&Formatter::new(OutputFormat::Json, false).format_stats(&report).unwrap()).unwrap();
        assert_eq!(json["positions"], 4);
        assert_eq!(json["techniquesByType"]["Sweep"], 2);

        assert!(matches!(
            Formatter::new(OutputFormat::Dot, false).format_stats(&report),
            Err(CliError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.colorize("plain", "cyan"), "plain");
    }

    #[test]
    fn test_palettes() {
        assert_eq!(advantage_color(Some(Advantage::Inferior)), "#fb7185");
        assert_eq!(technique_type_color(TechniqueType::GuardRecovery), "#059669");
    }
}
