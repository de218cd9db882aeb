//! Metrics collection for harvesting runs

use serde::Serialize;
use std::collections::BTreeMap;

/// Counters collected during a run
///
/// Every skipped publication lands in exactly one of `fetch_failures`,
/// `malformed_records` or `degenerate_collaborations`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HarvestMetrics {
    /// Windows persisted
    pub windows_completed: usize,

    /// Publications returned by the listings
    pub publications_listed: usize,

    /// Publications whose record could not be fetched
    pub fetch_failures: usize,

    /// Publications without usable co-applicants or classification
    pub malformed_records: usize,

    /// Identifiers dropped during name resolution
    pub unresolved_identifiers: usize,

    /// Publications left with fewer than two entities
    pub degenerate_collaborations: usize,

    /// Collaborations written to the graph, per category
    pub collaborations: BTreeMap<char, usize>,

    /// Edges added to the graph
    pub edges_added: usize,

    /// Total runtime in seconds
    pub total_runtime_secs: u64,
}

impl HarvestMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a persisted window
    pub fn record_window(&mut self) {
        self.windows_completed += 1;
    }

    /// Record the size of a listing
    pub fn record_listing(&mut self, count: usize) {
        self.publications_listed += count;
    }

    /// Record a failed record fetch
    pub fn record_fetch_failure(&mut self) {
        self.fetch_failures += 1;
    }

    /// Record a record without usable data
    pub fn record_malformed(&mut self) {
        self.malformed_records += 1;
    }

    /// Record dropped identifiers
    pub fn record_unresolved(&mut self, count: usize) {
        self.unresolved_identifiers += count;
    }

    /// Record a publication that produced no edge
    pub fn record_degenerate(&mut self) {
        self.degenerate_collaborations += 1;
    }

    /// Record a collaboration written to the graph
    pub fn record_collaboration(&mut self, category: char, edges: usize) {
        *self.collaborations.entry(category).or_insert(0) += 1;
        self.edges_added += edges;
    }

    /// Total collaborations written
    pub fn total_collaborations(&self) -> usize {
        self.collaborations.values().sum()
    }

    /// Publications skipped for any reason
    pub fn total_skipped(&self) -> usize {
        self.fetch_failures + self.malformed_records + self.degenerate_collaborations
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Harvest Metrics Summary".to_string(),
            "=======================".to_string(),
            format!("Windows completed: {}", self.windows_completed),
            format!("Publications listed: {}", self.publications_listed),
            format!("Collaborations: {}", self.total_collaborations()),
            format!("Edges added: {}", self.edges_added),
            format!("Total runtime: {}s", self.total_runtime_secs),
            String::new(),
        ];

        if self.total_skipped() > 0 || self.unresolved_identifiers > 0 {
            lines.push("Skipped:".to_string());
            lines.push(format!("  Fetch failures: {}", self.fetch_failures));
            lines.push(format!("  Malformed records: {}", self.malformed_records));
            lines.push(format!("  Degenerate collaborations: {}", self.degenerate_collaborations));
            lines.push(format!("  Unresolved identifiers: {}", self.unresolved_identifiers));
            lines.push(String::new());
        }

        if !self.collaborations.is_empty() {
            lines.push("Collaborations by category:".to_string());
            for (category, count) in &self.collaborations {
                lines.push(format!("  {}: {}", category, count));
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = HarvestMetrics::new();
        assert_eq!(metrics.total_collaborations(), 0);
        assert_eq!(metrics.total_skipped(), 0);
    }

    #[test]
    fn test_record_collaboration() {
        let mut metrics = HarvestMetrics::new();
        metrics.record_collaboration('G', 1);
        metrics.record_collaboration('G', 3);
        metrics.record_collaboration('A', 1);

        assert_eq!(metrics.collaborations.get(&'G'), Some(&2));
        assert_eq!(metrics.total_collaborations(), 3);
        assert_eq!(metrics.edges_added, 5);
    }

    #[test]
    fn test_skips() {
        let mut metrics = HarvestMetrics::new();
        metrics.record_fetch_failure();
        metrics.record_malformed();
        metrics.record_malformed();
        metrics.record_degenerate();
        metrics.record_unresolved(4);

        assert_eq!(metrics.total_skipped(), 4);
        assert_eq!(metrics.unresolved_identifiers, 4);
    }

    #[test]
    fn test_summary() {
        let mut metrics = HarvestMetrics::new();
        metrics.record_window();
        metrics.record_listing(7);
        metrics.record_collaboration('H', 2);
        metrics.record_malformed();
        metrics.total_runtime_secs = 12;

        let summary = metrics.summary();
        assert!(summary.contains("Windows completed: 1"));
        assert!(summary.contains("Publications listed: 7"));
        assert!(summary.contains("Malformed records: 1"));
        assert!(summary.contains("  H: 1"));
        assert!(summary.contains("Total runtime: 12s"));
    }
}
