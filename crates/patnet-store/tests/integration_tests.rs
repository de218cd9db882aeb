//! Integration tests for patnet-store
//!
//! These tests verify the save, clean and reload cycle through the store facade.

use chrono::NaiveDate;
use patnet_domain::{Authority, Category, Entity, RunConfig};
use patnet_store::{Checkpoint, CollaborationGraph, GraphStore, StoreConfig, StoreError};
use std::fs;
use tempfile::tempdir;

fn entities(names: &[&str]) -> Vec<Entity> {
    names.iter().map(|n| Entity::new(*n).unwrap()).collect()
}

fn sample_graph() -> CollaborationGraph {
    let mut graph = CollaborationGraph::default();
    graph.apply_collaboration(&entities(&["Acme Co.", "Beta Ltd."]), Category::new('G'));
    graph.apply_collaboration(&entities(&["Acme Co.", "Beta Ltd."]), Category::new('G'));
    graph.apply_collaboration(&entities(&["Siemens AG", "Ö Mobility", "Acme Co."]), Category::new('H'));
    graph.apply_collaboration(&entities(&["Loner GmbH"]), Category::new('A'));
    graph
}

#[test]
fn test_missing_file_loads_empty_graph() {
    let dir = tempdir().unwrap();
    let store = GraphStore::new(StoreConfig::in_dir(dir.path()));

    let graph = store.load().unwrap();
    assert!(graph.is_empty());
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(graph.name(), "EPO Collaboration Graph");
}

#[test]
fn test_persist_and_reload_preserves_graph() {
    let dir = tempdir().unwrap();
    let store = GraphStore::new(StoreConfig::in_dir(dir.path().join("data")));
    let graph = sample_graph();

    let saved_to = store.persist(&graph).unwrap();
    assert_eq!(saved_to, store.cleaned_path());

    let reloaded = store.load().unwrap();
    let mut expected_nodes: Vec<_> = graph.nodes().collect();
    let mut actual_nodes: Vec<_> = reloaded.nodes().collect();
    expected_nodes.sort();
    actual_nodes.sort();
    assert_eq!(actual_nodes, expected_nodes);
    assert_eq!(reloaded.edge_multiset(), graph.edge_multiset());
    assert_eq!(reloaded.edges_between("Acme Co.", "Beta Ltd."), 2);
    assert!(reloaded.contains_node("Loner GmbH"));
}

#[test]
fn test_cleaned_file_has_no_render_artifact() {
    let dir = tempdir().unwrap();
    let config = StoreConfig::in_dir(dir.path());
    let store = GraphStore::new(config.clone());

    store.persist(&sample_graph()).unwrap();

    let raw = fs::read_to_string(&config.raw_path).unwrap();
    let cleaned = fs::read_to_string(&config.cleaned_path).unwrap();
    assert!(raw.contains(" 0.0 0.0 ellipse"));
    assert!(!cleaned.contains(" 0.0 0.0 ellipse"));
    assert_eq!(raw.lines().count(), cleaned.lines().count());
}

#[test]
fn test_repeated_persist_accumulates() {
    let dir = tempdir().unwrap();
    let store = GraphStore::new(StoreConfig::in_dir(dir.path()));

    let mut graph = store.load().unwrap();
    graph.apply_collaboration(&entities(&["X", "Y"]), Category::new('G'));
    store.persist(&graph).unwrap();

    let mut graph = store.load().unwrap();
    graph.apply_collaboration(&entities(&["Y", "Z"]), Category::new('F'));
    store.persist(&graph).unwrap();

    let graph = store.load().unwrap();
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 2);
}

#[test]
fn test_persist_replaces_files_whole() {
    let dir = tempdir().unwrap();
    let config = StoreConfig::in_dir(dir.path());
    let store = GraphStore::new(config.clone());
    store.persist(&sample_graph()).unwrap();

    // Leftover of a write that was cut short
    let mut stale = config.cleaned_path.clone().into_os_string();
    stale.push(".tmp");
    fs::write(&stale, "*vertices 9\n").unwrap();

    let mut graph = store.load().unwrap();
    graph.apply_collaboration(&entities(&["X", "Y"]), Category::new('G'));
    store.persist(&graph).unwrap();

    let mut files: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    files.sort();
    let mut expected = vec![
        config.raw_path.file_name().unwrap().to_os_string(),
        config.cleaned_path.file_name().unwrap().to_os_string(),
    ];
    expected.sort();
    assert_eq!(files, expected);
    assert_eq!(store.load().unwrap().edge_count(), graph.edge_count());
}

#[test]
fn test_corrupt_graph_file_is_reported() {
    let dir = tempdir().unwrap();
    let config = StoreConfig::in_dir(dir.path());
    fs::write(&config.cleaned_path, "*vertices 3\n1 A\n").unwrap();

    let result = GraphStore::new(config).load();
    assert!(matches!(result, Err(StoreError::InvalidData(_))));
}

#[test]
fn test_checkpoint_through_store() {
    let dir = tempdir().unwrap();
    let store = GraphStore::new(StoreConfig::in_dir(dir.path()));
    let run = RunConfig::new(
        NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2023, 1, 22).unwrap(),
        Authority::european(),
    )
    .unwrap();

    assert!(store.read_checkpoint().unwrap().is_none());

    let checkpoint = Checkpoint::for_run(&run, NaiveDate::from_ymd_opt(2023, 1, 8).unwrap(), 1);
    store.write_checkpoint(&checkpoint).unwrap();

    let read = store.read_checkpoint().unwrap().unwrap();
    assert_eq!(read.resume_point(&run), NaiveDate::from_ymd_opt(2023, 1, 8));
}

#[test]
fn test_validated_rejects_bad_config() {
    let mut config = StoreConfig::default();
    config.cleaned_path = config.raw_path.clone();
    assert!(matches!(GraphStore::validated(config), Err(StoreError::Config(_))));
}
