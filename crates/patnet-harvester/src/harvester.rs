//! Core Harvester implementation - the window loop

use crate::category::select_category;
use crate::config::HarvestConfig;
use crate::error::HarvesterError;
use crate::extract::extract;
use crate::metrics::HarvestMetrics;
use crate::resolver::resolve_entities;
use chrono::NaiveDate;
use patnet_domain::traits::{NameService, QueryService};
use patnet_domain::{ProgressEvent, ProgressObserver, PublicationId, RunConfig, Window};
use patnet_store::{Checkpoint, CollaborationGraph, GraphStore, StoreError};
use std::fmt::Display;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};

/// What happened to one publication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicationOutcome {
    /// The record could not be fetched
    FetchFailed,
    /// No usable co-applicants or classification
    Malformed,
    /// Fewer than two entities after resolution; nodes kept, no edge
    Degenerate,
    /// Edges added to the graph
    Applied {
        /// Number of edges added
        edges: usize,
    },
}

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct HarvestReport {
    /// Windows processed by this invocation
    pub windows: usize,

    /// Date the run resumed from, if a checkpoint was honored
    pub resumed_from: Option<NaiveDate>,

    /// Final node count
    pub nodes: usize,

    /// Final edge count
    pub edges: usize,

    /// Cleaned graph file written last, if any window ran
    pub saved_to: Option<PathBuf>,

    /// Run counters
    pub metrics: HarvestMetrics,
}

/// Builds the collaboration graph for a run, one window at a time
///
/// Each window reloads the graph from the store, lists the window's
/// publications, turns each into at most one collaboration, then persists
/// the graph and writes a checkpoint. A failed listing aborts the run;
/// everything that goes wrong with a single publication only skips it.
///
/// # Examples
///
/// ```no_run
/// use patnet_domain::{Authority, NoopObserver, RunConfig};
/// use patnet_harvester::{HarvestConfig, Harvester};
/// use patnet_store::{GraphStore, StoreConfig};
/// use patnet_sparql::{ClientConfig, LinkedDataClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let run = RunConfig::new(
///     chrono::NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
///     chrono::NaiveDate::from_ymd_opt(2023, 2, 1).unwrap(),
///     Authority::european(),
/// )?;
/// let client = LinkedDataClient::new(ClientConfig::default())?;
/// let names = LinkedDataClient::new(ClientConfig::default())?;
/// let store = GraphStore::new(StoreConfig::default());
///
/// let mut harvester = Harvester::new(client, names, store, HarvestConfig::default());
/// let report = harvester.run(&run, &mut NoopObserver).await?;
/// println!("{}", report.metrics.summary());
/// # Ok(())
/// # }
/// ```
pub struct Harvester<Q, N> {
    query: Q,
    names: N,
    store: GraphStore,
    config: HarvestConfig,
}

impl<Q, N> Harvester<Q, N>
where
    Q: QueryService,
    Q::Error: std::error::Error + Send + Sync + 'static,
    N: NameService,
    N::Error: Display,
{
    /// Create a new Harvester
    pub fn new(query: Q, names: N, store: GraphStore, config: HarvestConfig) -> Self {
        Self {
            query,
            names,
            store,
            config,
        }
    }

    /// Harvester configuration
    pub fn config(&self) -> &HarvestConfig {
        &self.config
    }

    /// Graph store
    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    /// Execute a run
    ///
    /// Emits progress events to `observer` in order: run started, then per
    /// window started / listed / parsed... / completed, then run completed.
    pub async fn run(
        &mut self,
        run: &RunConfig,
        observer: &mut impl ProgressObserver,
    ) -> Result<HarvestReport, HarvesterError> {
        self.config.validate().map_err(HarvesterError::Config)?;
        self.store.config().validate().map_err(HarvesterError::Config)?;

        let started = Instant::now();
        let mut metrics = HarvestMetrics::new();

        let (resumed_from, already_completed) = match self.resume_point(run)? {
            Some((date, completed)) => (Some(date), completed),
            None => (None, 0),
        };
        let windows = run.windows_from(resumed_from.unwrap_or(run.start()), self.config.stride_days);
        let total = windows.len();

        info!(
            "Harvesting {} - {} at {} in {} window(s)",
            run.start(),
            run.end(),
            run.authority(),
            total
        );
        observer.on_event(&ProgressEvent::RunStarted {
            start: run.start(),
            end: run.end(),
            windows: total,
            resumed_from,
        });

        let mut saved_to = None;
        let mut counts = None;

        for (offset, window) in windows.enumerate() {
            let index = offset + 1;
            let graph = self
                .harvest_window(run, window, index, total, &mut metrics, observer)
                .await?;

            let path = self.store.persist(&graph)?;
            let checkpoint = Checkpoint::for_run(run, window.end, already_completed + index)
                .with_graph_size(graph.node_count(), graph.edge_count());
            self.store.write_checkpoint(&checkpoint)?;
            metrics.record_window();

            info!(
                "Saved a graph with {} nodes and {} edges to {}",
                graph.node_count(),
                graph.edge_count(),
                path.display()
            );
            observer.on_event(&ProgressEvent::WindowCompleted {
                index,
                total,
                nodes: graph.node_count(),
                edges: graph.edge_count(),
                saved_to: path.clone(),
            });

            counts = Some((graph.node_count(), graph.edge_count()));
            saved_to = Some(path);
        }

        let (nodes, edges) = match counts {
            Some(counts) => counts,
            None => {
                let graph = self.store.load()?;
                (graph.node_count(), graph.edge_count())
            }
        };

        metrics.total_runtime_secs = started.elapsed().as_secs();
        observer.on_event(&ProgressEvent::RunCompleted {
            windows: total,
            nodes,
            edges,
        });
        info!("Run complete: {} window(s), {} nodes, {} edges", total, nodes, edges);

        Ok(HarvestReport {
            windows: total,
            resumed_from,
            nodes,
            edges,
            saved_to,
            metrics,
        })
    }

    /// Load the graph and fold one window's publications into it
    async fn harvest_window(
        &self,
        run: &RunConfig,
        window: Window,
        index: usize,
        total: usize,
        metrics: &mut HarvestMetrics,
        observer: &mut impl ProgressObserver,
    ) -> Result<CollaborationGraph, HarvesterError> {
        observer.on_event(&ProgressEvent::WindowStarted { index, total, window });
        info!("Parsing window {} ({}/{})", window, index, total);

        let mut graph = self.store.load()?;

        let publications = self
            .query
            .list_publications(&window, run.authority())
            .await
            .map_err(|e| HarvesterError::WindowListing {
                window,
                source: Box::new(e),
            })?;
        metrics.record_listing(publications.len());
        observer.on_event(&ProgressEvent::PublicationsListed {
            index,
            count: publications.len(),
        });

        for (position, publication) in publications.iter().enumerate() {
            self.process_publication(publication, &mut graph, metrics).await;
            observer.on_event(&ProgressEvent::PublicationParsed {
                parsed: position + 1,
                total: publications.len(),
            });
        }

        Ok(graph)
    }

    /// Turn one publication into at most one collaboration on `graph`
    pub async fn process_publication(
        &self,
        publication: &PublicationId,
        graph: &mut CollaborationGraph,
        metrics: &mut HarvestMetrics,
    ) -> PublicationOutcome {
        let record = match self.query.fetch_record(publication).await {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping {}: {}", publication, e);
                metrics.record_fetch_failure();
                return PublicationOutcome::FetchFailed;
            }
        };

        let Some(extracted) = extract(&record) else {
            debug!("No usable data in {}", publication);
            metrics.record_malformed();
            return PublicationOutcome::Malformed;
        };
        let Some(category) = select_category(&extracted.codes) else {
            debug!("No class symbol in the codes of {}", publication);
            metrics.record_malformed();
            return PublicationOutcome::Malformed;
        };

        let resolution = resolve_entities(&self.names, &extracted.applicants).await;
        metrics.record_unresolved(resolution.unresolved);

        // Surviving entities become nodes even when no edge can be drawn
        let edges = graph.apply_collaboration(&resolution.entities, category);

        if resolution.is_degenerate() {
            debug!(
                "{} resolved to {} entity(ies), no edge added",
                publication,
                resolution.entities.len()
            );
            metrics.record_degenerate();
            return PublicationOutcome::Degenerate;
        }

        debug!("{}: {} entities, category {}", publication, resolution.entities.len(), category);
        metrics.record_collaboration(category.symbol(), edges);
        PublicationOutcome::Applied { edges }
    }

    /// Roll the stored graph back to the size recorded in `checkpoint`
    ///
    /// A graph larger than its checkpoint holds edges of a window that was
    /// saved but never checkpointed; replaying that window would add them twice.
    fn discard_uncheckpointed(&self, checkpoint: &Checkpoint) -> Result<(), HarvesterError> {
        let Some((nodes, edges)) = checkpoint.graph_size() else {
            return Ok(());
        };
        let mut graph = self.store.load()?;
        if graph.node_count() <= nodes && graph.edge_count() <= edges {
            return Ok(());
        }

        warn!(
            "Graph has {} nodes and {} edges past its checkpoint; discarding them",
            graph.node_count().saturating_sub(nodes),
            graph.edge_count().saturating_sub(edges)
        );
        graph.truncate(nodes, edges);
        self.store.persist(&graph)?;
        Ok(())
    }

    /// Resume date and windows already completed, from a matching checkpoint
    fn resume_point(&self, run: &RunConfig) -> Result<Option<(NaiveDate, usize)>, HarvesterError> {
        if !self.config.resume {
            return Ok(None);
        }

        let checkpoint = match self.store.read_checkpoint() {
            Ok(Some(checkpoint)) => checkpoint,
            Ok(None) => return Ok(None),
            Err(StoreError::Json(e)) => {
                warn!("Ignoring unreadable checkpoint: {}", e);
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        match checkpoint.resume_point(run) {
            Some(date) => {
                info!(
                    "Resuming from {} ({} window(s) already completed)",
                    date, checkpoint.windows_completed
                );
                self.discard_uncheckpointed(&checkpoint)?;
                Ok(Some((date, checkpoint.windows_completed)))
            }
            None => {
                info!(
                    "Ignoring checkpoint of run {} - {} at {}",
                    checkpoint.run_start, checkpoint.run_end, checkpoint.authority
                );
                Ok(None)
            }
        }
    }
}
