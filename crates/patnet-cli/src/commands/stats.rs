//! Stats command implementation.

use crate::cli::StatsArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use patnet_store::CollaborationGraph;
use serde::Serialize;
use std::collections::BTreeMap;

/// Summary of a saved collaboration graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    /// Graph name
    pub name: String,
    /// Node count
    pub nodes: usize,
    /// Edge count
    pub edges: usize,
    /// Edge count per category
    pub categories: BTreeMap<String, usize>,
    /// Best-connected companies, highest degree first
    pub top_companies: Vec<CompanyDegree>,
}

/// A company and its number of collaboration edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyDegree {
    /// Canonical company name
    pub name: String,
    /// Incident edges
    pub degree: usize,
}

impl GraphStats {
    /// Summarize `graph`, keeping the `top` best-connected companies.
    ///
    /// Ties in degree are ordered by name.
    pub fn from_graph(graph: &CollaborationGraph, top: usize) -> Self {
        let mut companies: Vec<CompanyDegree> = graph
            .nodes()
            .map(|name| CompanyDegree {
                name: name.to_string(),
                degree: graph.degree(name),
            })
            .collect();
        companies.sort_by(|a, b| b.degree.cmp(&a.degree).then_with(|| a.name.cmp(&b.name)));
        companies.truncate(top);

        Self {
            name: graph.name().to_string(),
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            categories: graph.category_counts(),
            top_companies: companies,
        }
    }
}

/// Execute the stats command.
pub fn execute_stats(args: StatsArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let path = args.path.unwrap_or_else(|| config.store.cleaned_path.clone());
    if !path.exists() {
        return Err(CliError::InvalidInput(format!("No graph file at {}", path.display())));
    }

    let graph = patnet_store::load_from(&path, &config.store.graph_name)?;
    let stats = GraphStats::from_graph(&graph, args.top);
    println!("{}", formatter.format_stats(&stats)?);
    Ok(())
}
