// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ontolens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ontolens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use ontolens::command::ParsedCommand;
use ontolens::model::{
    demo_ontology, AttrKey, Attribute, AttributeType, Block, BlockId, Edge, EdgeKey, Ontology,
    OntologyMeta,
};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    pub fn new(prefix: &str) -> Self {
        let pid = std::process::id();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);

        let mut path = std::env::temp_dir();
        path.push(format!("ontolens_bench_{prefix}_{pid}_{nanos}_{counter}"));
        std::fs::create_dir_all(&path).expect("create temp dir");

        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

pub fn checksum_parsed(parsed: &ParsedCommand) -> u64 {
    let entities = &parsed.entities;
    let mut sum = parsed.action as u64;
    for id in &entities.blocks {
        sum = sum.wrapping_mul(31).wrapping_add(id.as_str().len() as u64);
    }
    for key in &entities.edges {
        sum = sum.wrapping_mul(31).wrapping_add(key.as_str().len() as u64);
    }
    for key in &entities.attributes {
        sum = sum.wrapping_mul(31).wrapping_add(key.as_str().len() as u64);
    }
    sum
}

const KINDS: [&str; 9] = [
    "Supplier",
    "Material",
    "Process",
    "Facility",
    "Product",
    "Order",
    "Shipment",
    "Inventory",
    "Market",
];

#[derive(Debug, Clone, Copy)]
pub enum Case {
    Demo,
    Medium,
    Large,
}

impl Case {
    pub const fn id(self) -> &'static str {
        match self {
            Self::Demo => "demo",
            Self::Medium => "medium_90_blocks",
            Self::Large => "large_900_blocks",
        }
    }

    const fn blocks_per_kind(self) -> usize {
        match self {
            Self::Demo => 1,
            Self::Medium => 10,
            Self::Large => 100,
        }
    }
}

/// Supply chain with `blocks_per_kind` blocks per column, each chained to the next kind and
/// carrying two attributes.
pub fn ontology(case: Case) -> Ontology {
    if matches!(case, Case::Demo) {
        return demo_ontology();
    }

    let per_kind = case.blocks_per_kind();
    let block_id = |kind: usize, idx: usize| {
        BlockId::new(format!("{}{idx:03}", KINDS[kind])).expect("block id")
    };

    let mut blocks = Vec::new();
    let mut attributes = Vec::new();
    let mut edges = Vec::new();
    for kind in 0..KINDS.len() {
        for idx in 0..per_kind {
            let id = block_id(kind, idx);
            blocks.push(Block::new(id.clone(), format!("{} {idx}", KINDS[kind])));
            attributes.push(Attribute::new(
                id.clone(),
                AttrKey::new(format!("bench:{id}:cost")).expect("attr key"),
                format!("{} {idx} Cost", KINDS[kind]),
                AttributeType::Currency,
            ));
            attributes.push(Attribute::new(
                id.clone(),
                AttrKey::new(format!("bench:{id}:leadTime")).expect("attr key"),
                format!("{} {idx} Lead Time", KINDS[kind]),
                AttributeType::Number,
            ));
            if kind + 1 < KINDS.len() {
                edges.push(Edge::new(
                    EdgeKey::new(format!("e:{id}")).expect("edge key"),
                    id,
                    block_id(kind + 1, idx),
                    "flows to",
                ));
            }
        }
    }

    let meta = OntologyMeta { source: case.id().to_owned(), version: "bench".to_owned(), notice: None };
    Ontology::new(meta, blocks, attributes, edges).expect("bench ontology")
}

/// Commands exercising each action and the main matching paths.
pub const COMMANDS: &[(&str, &str)] = &[
    ("highlight_label", "highlight supplier and material"),
    ("show_edge_pattern", "show edges from supplier to material"),
    ("add_synonym", "add tariff rate"),
    ("remove_pronoun", "remove it"),
    ("no_match", "make me a sandwich please"),
    ("reset", "reset"),
];
