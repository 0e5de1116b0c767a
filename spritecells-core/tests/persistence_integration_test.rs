//! Integration tests for saving and restoring sessions

use kurbo::{Point, Size};
use spritecells_core::config::EditorConfig;
use spritecells_core::file_io::{JsonFileStore, MemoryStore, PersistedState, Persistence};
use spritecells_core::session::EditorSession;
use spritecells_core::tool::{InputMode, Modifiers};

fn session_with_cells() -> EditorSession {
    let mut session = EditorSession::new(Size::new(200.0, 100.0), EditorConfig::default());
    for (from, to) in [((10.0, 10.0), (60.0, 60.0)), ((70.0, 5.0), (190.0, 95.0))] {
        session.set_mode(InputMode::CreateCell);
        session.pointer_down(Point::from(from), Modifiers::NONE);
        session.pointer_up(Point::from(to), Modifiers::NONE);
    }
    session.zoom(0.5);
    session
}

#[test]
fn test_file_round_trip_restores_cells_and_view() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonFileStore::new(dir.path().join("session.json"));

    let original = session_with_cells();
    original.save_to(&mut store).unwrap();

    let mut restored = EditorSession::new(Size::new(200.0, 100.0), EditorConfig::default());
    restored.load_from(&mut store);

    assert_eq!(restored.mode(), Some(InputMode::ModifyCell));
    assert_eq!(restored.transform(), original.transform());
    assert_eq!(restored.export(), original.export());

    let labels: Vec<_> = restored.document().cells.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["cell-0", "cell-1"]);
    assert!(!restored.history().can_undo());
}

#[test]
fn test_corrupt_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, r#"{"mode": "sideways", "cells": []}"#).unwrap();

    let mut session = session_with_cells();
    session.load_from(&mut JsonFileStore::new(&path));

    assert!(session.document().is_empty());
    assert_eq!(session.mode(), Some(InputMode::Image));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
}

#[test]
fn test_memory_store_snapshot_matches_session() {
    let session = session_with_cells();
    let mut store = MemoryStore::default();
    session.save_to(&mut store).unwrap();

    let stored = PersistedState::from_json(&store.contents).unwrap().unwrap();
    assert_eq!(stored, session.snapshot());
    assert_eq!(stored.cells.len(), 2);
    assert_eq!(stored.cells[1].right, 190.0);
}
