//! Progress signals emitted while a run executes

use crate::Window;
use chrono::NaiveDate;
use std::path::PathBuf;

/// Progress of a harvesting run, in emission order
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// Run accepted; `windows` is the number of windows that will be processed
    RunStarted {
        /// First date of the run
        start: NaiveDate,
        /// First excluded date of the run
        end: NaiveDate,
        /// Windows to process
        windows: usize,
        /// Date the run resumes from when a checkpoint was honored
        resumed_from: Option<NaiveDate>,
    },

    /// A window is about to be queried (1-based index)
    WindowStarted {
        /// Window position, starting at 1
        index: usize,
        /// Total windows in this run
        total: usize,
        /// The window
        window: Window,
    },

    /// Publications listed for the current window
    PublicationsListed {
        /// Window position, starting at 1
        index: usize,
        /// Publications to process
        count: usize,
    },

    /// One publication of the current window was handled (1-based counter)
    PublicationParsed {
        /// Publications handled so far in this window
        parsed: usize,
        /// Publications in this window
        total: usize,
    },

    /// Window persisted
    WindowCompleted {
        /// Window position, starting at 1
        index: usize,
        /// Total windows in this run
        total: usize,
        /// Nodes in the saved graph
        nodes: usize,
        /// Edges in the saved graph
        edges: usize,
        /// Cleaned graph file the user should look at
        saved_to: PathBuf,
    },

    /// All windows processed
    RunCompleted {
        /// Windows processed in this invocation
        windows: usize,
        /// Final node count
        nodes: usize,
        /// Final edge count
        edges: usize,
    },
}

/// Receiver of progress events (a display, a log, a test recorder)
pub trait ProgressObserver {
    /// Handle one event
    fn on_event(&mut self, event: &ProgressEvent);
}

impl<F> ProgressObserver for F
where
    F: FnMut(&ProgressEvent),
{
    fn on_event(&mut self, event: &ProgressEvent) {
        self(event)
    }
}

/// Observer that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {
    fn on_event(&mut self, _event: &ProgressEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_observer() {
        let mut seen = Vec::new();
        {
            let mut observer = |event: &ProgressEvent| seen.push(event.clone());
            observer.on_event(&ProgressEvent::PublicationParsed { parsed: 1, total: 2 });
        }
        assert_eq!(seen, vec![ProgressEvent::PublicationParsed { parsed: 1, total: 2 }]);
    }

    #[test]
    fn test_noop_observer() {
        let mut observer = NoopObserver;
        observer.on_event(&ProgressEvent::PublicationsListed { index: 1, count: 0 });
    }
}
