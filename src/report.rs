use crate::ports::Port;
use crate::submit::PipelineVerdict;
use crate::validation::ValidationReport;
use itertools::Itertools;

/// Formats ports, validation reports and verdicts into human-readable text.
pub struct ReportFormatter;

impl ReportFormatter {
    /// One line per port: kind, id, side and offset.
    pub fn format_ports(ports: &[Port]) -> String {
        ports
            .iter()
            .map(|port| {
                let mut line = format!(
                    "{:<6} {} ({:?} {}%)",
                    port.kind.to_string(),
                    port.id,
                    port.side(),
                    port.percent()
                );
                if let Some(token) = &port.derived_from {
                    line.push_str(&format!(" <- {{{{{}}}}}", token));
                }
                line
            })
            .join("\n")
    }

    /// Summarises a validation report. Consistent reports collapse to `OK`.
    pub fn format_report(report: &ValidationReport) -> String {
        if report.is_consistent() {
            return "OK".to_string();
        }
        let mut lines = Vec::new();
        if !report.invalid_references.is_empty() {
            lines.push(format!(
                "Invalid references: {}",
                report.invalid_references.iter().join(", ")
            ));
        }
        if !report.ambiguous_references.is_empty() {
            lines.push(format!(
                "Ambiguous references: {}",
                report.ambiguous_references.iter().join(", ")
            ));
        }
        if !report.unused_connections.is_empty() {
            lines.push(format!(
                "Unused connections: {}",
                report.unused_connections.join(", ")
            ));
        }
        lines.join("\n")
    }

    pub fn format_verdict(verdict: &PipelineVerdict) -> String {
        format!(
            "Pipeline Parsed\n\nNodes: {}\nEdges: {}\nDAG: {}",
            verdict.num_nodes, verdict.num_edges, verdict.is_dag
        )
    }
}
