//! Persisted progress marker for resumable runs

use crate::{ensure_parent, temp_sibling, StoreError};
use chrono::NaiveDate;
use patnet_domain::RunConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Last completed window of a run
///
/// Written after the graph of a window has been saved and cleaned, so a
/// checkpoint never points past data that is on disk. The reverse can happen:
/// a crash between the two writes leaves a graph holding one more window than
/// the checkpoint. The recorded graph size lets a resumed run drop that
/// surplus before replaying the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Authority code of the run
    pub authority: String,

    /// First date of the run
    pub run_start: NaiveDate,

    /// First excluded date of the run
    pub run_end: NaiveDate,

    /// End (exclusive) of the last window that was persisted
    pub completed_through: NaiveDate,

    /// Windows persisted so far for this run
    pub windows_completed: usize,

    /// Node count of the graph saved with this checkpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph_nodes: Option<usize>,

    /// Edge count of the graph saved with this checkpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph_edges: Option<usize>,
}

impl Checkpoint {
    /// Checkpoint for `run` after a window ending at `completed_through`
    pub fn for_run(run: &RunConfig, completed_through: NaiveDate, windows_completed: usize) -> Self {
        Self {
            authority: run.authority().as_str().to_string(),
            run_start: run.start(),
            run_end: run.end(),
            completed_through,
            windows_completed,
            graph_nodes: None,
            graph_edges: None,
        }
    }

    /// Record the size of the graph persisted with this checkpoint
    pub fn with_graph_size(mut self, nodes: usize, edges: usize) -> Self {
        self.graph_nodes = Some(nodes);
        self.graph_edges = Some(edges);
        self
    }

    /// Recorded `(nodes, edges)`, when both are known
    pub fn graph_size(&self) -> Option<(usize, usize)> {
        self.graph_nodes.zip(self.graph_edges)
    }

    /// Whether this checkpoint was written by a run with the same parameters
    pub fn matches(&self, run: &RunConfig) -> bool {
        self.authority == run.authority().as_str()
            && self.run_start == run.start()
            && self.run_end == run.end()
    }

    /// Date a matching run should resume from, if any
    pub fn resume_point(&self, run: &RunConfig) -> Option<NaiveDate> {
        if !self.matches(run) {
            return None;
        }
        if self.completed_through > run.start() && self.completed_through <= run.end() {
            Some(self.completed_through)
        } else {
            None
        }
    }

    /// Read a checkpoint; `Ok(None)` when the file does not exist
    pub fn read(path: &Path) -> Result<Option<Self>, StoreError> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&contents)?))
    }

    /// Write the checkpoint through a temporary file and a rename
    pub fn write(&self, path: &Path) -> Result<(), StoreError> {
        ensure_parent(path)?;
        let tmp = temp_sibling(path);
        fs::write(&tmp, serde_json::to_string_pretty(self)?)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use patnet_domain::Authority;
    use tempfile::tempdir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn run() -> RunConfig {
        RunConfig::new(date(2023, 1, 1), date(2023, 2, 1), Authority::european()).unwrap()
    }

    #[test]
    fn test_resume_point_for_matching_run() {
        let checkpoint = Checkpoint::for_run(&run(), date(2023, 1, 15), 2);
        assert_eq!(checkpoint.resume_point(&run()), Some(date(2023, 1, 15)));
    }

    #[test]
    fn test_completed_run_resumes_at_end() {
        let checkpoint = Checkpoint::for_run(&run(), date(2023, 2, 1), 5);
        assert_eq!(checkpoint.resume_point(&run()), Some(date(2023, 2, 1)));
    }

    #[test]
    fn test_other_run_is_ignored() {
        let checkpoint = Checkpoint::for_run(&run(), date(2023, 1, 15), 2);
        let other = RunConfig::new(date(2023, 1, 1), date(2023, 2, 1), Authority::new("US").unwrap()).unwrap();
        assert!(!checkpoint.matches(&other));
        assert_eq!(checkpoint.resume_point(&other), None);
    }

    #[test]
    fn test_write_and_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data").join("progress.json");

        assert_eq!(Checkpoint::read(&path).unwrap(), None);

        let checkpoint = Checkpoint::for_run(&run(), date(2023, 1, 8), 1).with_graph_size(4, 6);
        checkpoint.write(&path).unwrap();
        assert_eq!(Checkpoint::read(&path).unwrap(), Some(checkpoint));
        assert!(!temp_sibling(&path).exists());
    }

    #[test]
    fn test_graph_size() {
        let bare = Checkpoint::for_run(&run(), date(2023, 1, 8), 1);
        assert_eq!(bare.graph_size(), None);
        assert_eq!(bare.with_graph_size(3, 5).graph_size(), Some((3, 5)));
    }

    #[test]
    fn test_checkpoint_without_graph_size_still_reads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(
            &path,
            r#"{"authority":"EP","run_start":"2023-01-01","run_end":"2023-02-01","completed_through":"2023-01-08","windows_completed":1}"#,
        )
        .unwrap();

        let checkpoint = Checkpoint::read(&path).unwrap().unwrap();
        assert_eq!(checkpoint.windows_completed, 1);
        assert_eq!(checkpoint.graph_size(), None);
    }

    #[test]
    fn test_corrupt_checkpoint_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(Checkpoint::read(&path), Err(StoreError::Json(_))));
    }
}
