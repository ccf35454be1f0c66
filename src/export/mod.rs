// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ontolens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ontolens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Selection export and screenshot artifacts.
//!
//! Building the artifact is pure; delivering it ("downloading") goes through an [`ExportSink`]
//! and capturing a screenshot through a [`RegionCapture`], so hosts decide where bytes end up.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Attribute, Block, Edge, Ontology};
use crate::state::Selection;

pub const EXPORT_FORMAT_VERSION: &str = "1.0.0";
pub const EXPORT_FILE_NAME: &str = "selection.json";
pub const SCREENSHOT_FILE_NAME: &str = "graph-screenshot.png";
/// Region id of the graph view, the default screenshot target.
pub const GRAPH_REGION_ID: &str = "graph-canvas";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMeta {
    /// ISO-8601 UTC timestamp with millisecond precision.
    pub exported_at: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportData {
    pub nodes: Vec<Block>,
    pub edges: Vec<Edge>,
    pub attributes: Vec<Attribute>,
    pub meta: ExportMeta,
}

impl ExportData {
    /// Entities whose ids are in `selection`, in ontology order.
    pub fn from_selection(
        ontology: &Ontology,
        selection: &Selection,
        exported_at: DateTime<Utc>,
    ) -> Self {
        let nodes = ontology
            .blocks
            .iter()
            .filter(|block| selection.blocks.contains(&block.id))
            .cloned()
            .collect();
        let edges = ontology
            .edges
            .iter()
            .filter(|edge| selection.edges.contains(&edge.key))
            .cloned()
            .collect();
        let attributes = ontology
            .attributes
            .iter()
            .filter(|attr| selection.attributes.contains(&attr.key))
            .cloned()
            .collect();

        Self {
            nodes,
            edges,
            attributes,
            meta: ExportMeta {
                exported_at: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
                version: EXPORT_FORMAT_VERSION.to_owned(),
            },
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Exported {} nodes, {} edges, {} attributes",
            self.nodes.len(),
            self.edges.len(),
            self.attributes.len()
        )
    }

    pub fn to_pretty_json(&self) -> Result<String, ExportError> {
        serde_json::to_string_pretty(self).map_err(ExportError::Serialize)
    }

    pub fn from_json(raw: &str) -> Result<Self, ExportError> {
        serde_json::from_str(raw).map_err(ExportError::Serialize)
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize export: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("element with id \"{region_id}\" not found")]
    ElementNotFound { region_id: String },
    #[error("failed to capture \"{region_id}\": {reason}")]
    CaptureFailed { region_id: String, reason: String },
}

/// Destination for downloadable artifacts.
pub trait ExportSink: Send {
    /// Stores `bytes` under `file_name` and returns a human-readable location.
    fn write_artifact(&mut self, file_name: &str, bytes: &[u8]) -> Result<String, ExportError>;
}

/// Produces PNG bytes for a named visual region.
pub trait RegionCapture: Send {
    fn capture(&mut self, region_id: &str) -> Result<Vec<u8>, CaptureError>;
}

/// Writes artifacts as files inside one directory.
#[derive(Debug, Clone)]
pub struct FolderExportSink {
    dir: PathBuf,
}

impl FolderExportSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ExportSink for FolderExportSink {
    fn write_artifact(&mut self, file_name: &str, bytes: &[u8]) -> Result<String, ExportError> {
        fs::create_dir_all(&self.dir)
            .map_err(|source| ExportError::Io { path: self.dir.clone(), source })?;
        let path = self.dir.join(file_name);
        fs::write(&path, bytes).map_err(|source| ExportError::Io { path: path.clone(), source })?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "artifact written");
        Ok(path.display().to_string())
    }
}

/// Keeps artifacts in memory; useful for hosts that forward bytes elsewhere.
#[derive(Debug, Clone, Default)]
pub struct MemoryExportSink {
    artifacts: Vec<(String, Vec<u8>)>,
}

impl MemoryExportSink {
    pub fn artifacts(&self) -> &[(String, Vec<u8>)] {
        &self.artifacts
    }

    pub fn latest(&self, file_name: &str) -> Option<&[u8]> {
        self.artifacts
            .iter()
            .rev()
            .find(|(name, _)| name == file_name)
            .map(|(_, bytes)| bytes.as_slice())
    }
}

impl ExportSink for MemoryExportSink {
    fn write_artifact(&mut self, file_name: &str, bytes: &[u8]) -> Result<String, ExportError> {
        self.artifacts.push((file_name.to_owned(), bytes.to_vec()));
        Ok(format!("memory:{file_name}"))
    }
}

#[cfg(test)]
mod tests;
