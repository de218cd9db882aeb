//! Output formatting for the CLI.

use crate::commands::stats::GraphStats;
use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use patnet_domain::ProgressEvent;
use patnet_harvester::HarvestReport;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
#[derive(Debug, Clone, Copy)]
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

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format graph statistics.
    pub fn format_stats(&self, stats: &GraphStats) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(stats)?),
            OutputFormat::Table => Ok(self.format_stats_table(stats)),
        }
    }

    fn format_stats_table(&self, stats: &GraphStats) -> String {
        if stats.nodes == 0 {
            return self.colorize(&format!("{} is empty.", stats.name), "yellow");
        }

        let mut sections = vec![
            self.colorize(&stats.name, "cyan"),
            format!("Nodes: {}  Edges: {}", stats.nodes, stats.edges),
        ];

        if !stats.categories.is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["Category", "Edges"]);
            for (category, count) in &stats.categories {
                builder.push_record([category.clone(), count.to_string()]);
            }
            sections.push(Self::render(builder));
        }

        if !stats.top_companies.is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["#", "Company", "Degree"]);
            for (rank, company) in stats.top_companies.iter().enumerate() {
                builder.push_record([(rank + 1).to_string(), company.name.clone(), company.degree.to_string()]);
            }
            sections.push(Self::render(builder));
        }

        sections.join("\n")
    }

    /// Format the final report of a harvest run.
    pub fn format_report(&self, report: &HarvestReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "windows": report.windows,
                    "resumed_from": report.resumed_from,
                    "nodes": report.nodes,
                    "edges": report.edges,
                    "saved_to": report.saved_to,
                    "metrics": report.metrics,
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Table => {
                let headline = match &report.saved_to {
                    Some(path) => self.success(&format!(
                        "Harvested {} window(s): {} nodes, {} edges in {}",
                        report.windows,
                        report.nodes,
                        report.edges,
                        path.display()
                    )),
                    None => self.info(&format!(
                        "Nothing left to harvest: {} nodes, {} edges",
                        report.nodes, report.edges
                    )),
                };
                Ok(format!("{}\n\n{}", headline, report.metrics.summary()))
            }
        }
    }

    /// Console line for a progress event; `None` for events with no line.
    pub fn progress_line(&self, event: &ProgressEvent) -> Option<String> {
        match event {
            ProgressEvent::RunStarted {
                start,
                end,
                windows,
                resumed_from,
            } => {
                let mut line = format!("Parsing dates: {} - {} in {} window(s)", start, end, windows);
                if let Some(date) = resumed_from {
                    line.push_str(&format!(", resuming from {}", date));
                }
                Some(self.info(&line))
            }
            ProgressEvent::WindowStarted { index, total, window } => Some(format!(
                "{} {} ({}/{})",
                self.colorize("Parsing now:", "cyan"),
                window,
                index,
                total
            )),
            ProgressEvent::PublicationsListed { count, .. } => Some(format!("    {} publications found", count)),
            ProgressEvent::PublicationParsed { parsed, total } => {
                Some(format!("    {}/{} publications parsed", parsed, total))
            }
            ProgressEvent::WindowCompleted {
                nodes, edges, saved_to, ..
            } => Some(self.success(&format!(
                "Saved a graph with {} nodes and {} edges to {}",
                nodes,
                edges,
                saved_to.display()
            ))),
            ProgressEvent::RunCompleted { .. } => None,
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn render(builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}
