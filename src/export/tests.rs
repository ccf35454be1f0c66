// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ontolens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ontolens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{TimeZone, Utc};

use super::{
    CaptureError, ExportData, ExportSink, FolderExportSink, MemoryExportSink,
    EXPORT_FILE_NAME, EXPORT_FORMAT_VERSION,
};
use crate::model::fixtures::{attr_key, block_id, edge_key, supply_chain_small};
use crate::state::Selection;

static TEMP_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

struct TempDir {
    path: std::path::PathBuf,
}

impl TempDir {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let counter = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut path = env::temp_dir();
        path.push(format!("ontolens-{prefix}-{}-{nanos}-{counter}", std::process::id()));
        Self { path }
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

fn selection() -> Selection {
    let mut selection = Selection::default();
    selection.blocks.insert(block_id("Material"));
    selection.edges.insert(edge_key("e1"));
    selection.attributes.insert(attr_key("circo:tariffRate"));
    selection
}

#[test]
fn export_contains_exactly_the_selected_entities() {
    let ontology = supply_chain_small();
    let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 0).unwrap();
    let data = ExportData::from_selection(&ontology, &selection(), at);

    let json = data.to_pretty_json().expect("serialize");
    let reread = ExportData::from_json(&json).expect("reread");

    let nodes = reread.nodes.iter().map(|b| b.id.as_str()).collect::<Vec<_>>();
    let edges = reread.edges.iter().map(|e| e.key.as_str()).collect::<Vec<_>>();
    let attrs = reread.attributes.iter().map(|a| a.key.as_str()).collect::<Vec<_>>();
    assert_eq!(nodes, vec!["Material"]);
    assert_eq!(edges, vec!["e1"]);
    assert_eq!(attrs, vec!["circo:tariffRate"]);
    assert_eq!(reread, data);
}

#[test]
fn export_meta_uses_iso_timestamp_and_fixed_version() {
    let ontology = supply_chain_small();
    let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 0).unwrap();
    let data = ExportData::from_selection(&ontology, &Selection::default(), at);

    assert_eq!(data.meta.exported_at, "2026-03-01T12:30:00.000Z");
    assert_eq!(data.meta.version, EXPORT_FORMAT_VERSION);
    assert_eq!(data.summary(), "Exported 0 nodes, 0 edges, 0 attributes");

    let value: serde_json::Value =
        serde_json::from_str(&data.to_pretty_json().expect("serialize")).expect("json");
    assert_eq!(value["meta"]["exportedAt"], "2026-03-01T12:30:00.000Z");
    assert!(value["nodes"].as_array().is_some_and(Vec::is_empty));
}

#[test]
fn folder_sink_writes_file() {
    let tmp = TempDir::new("export");
    let mut sink = FolderExportSink::new(tmp.path.join("out"));

    let location = sink.write_artifact(EXPORT_FILE_NAME, b"{}").expect("write");
    let written = std::fs::read_to_string(tmp.path.join("out").join(EXPORT_FILE_NAME))
        .expect("read artifact");
    assert_eq!(written, "{}");
    assert!(location.ends_with(EXPORT_FILE_NAME));
}

#[test]
fn memory_sink_returns_latest_artifact() {
    let mut sink = MemoryExportSink::default();
    sink.write_artifact(EXPORT_FILE_NAME, b"1").expect("write");
    sink.write_artifact(EXPORT_FILE_NAME, b"2").expect("write");
    assert_eq!(sink.latest(EXPORT_FILE_NAME), Some(&b"2"[..]));
    assert_eq!(sink.artifacts().len(), 2);
}

#[test]
fn capture_errors_are_distinguishable() {
    let missing = CaptureError::ElementNotFound { region_id: "graph-canvas".to_owned() };
    let failed =
        CaptureError::CaptureFailed { region_id: "graph-canvas".to_owned(), reason: "gpu".to_owned() };
    assert_eq!(missing.to_string(), "element with id \"graph-canvas\" not found");
    assert!(failed.to_string().contains("gpu"));
    assert_ne!(missing, failed);
}
