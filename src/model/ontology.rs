// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ontolens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ontolens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ids::{AttrKey, BlockId, EdgeKey, IdError};

/// A named node of the explorable graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Block {
    pub fn new(id: BlockId, label: impl Into<String>) -> Self {
        Self { id, label: label.into(), description: None }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A directed, labeled relation between two blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub key: EdgeKey,
    pub from: BlockId,
    pub to: BlockId,
    pub label: String,
}

impl Edge {
    pub fn new(key: EdgeKey, from: BlockId, to: BlockId, label: impl Into<String>) -> Self {
        Self { key, from, to, label: label.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    Text,
    Number,
    Currency,
    Percent,
    Date,
}

impl AttributeType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Currency => "currency",
            Self::Percent => "percent",
            Self::Date => "date",
        }
    }
}

/// A typed property scoped to exactly one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    pub block_id: BlockId,
    pub key: AttrKey,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: AttributeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Attribute {
    pub fn new(
        block_id: BlockId,
        key: AttrKey,
        label: impl Into<String>,
        kind: AttributeType,
    ) -> Self {
        Self { block_id, key, label: label.into(), kind, unit: None }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OntologyMeta {
    pub source: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// The read-only universe of valid entities.
///
/// Loaded once and never mutated; every id a command can resolve to is defined relative to
/// this snapshot. Construct through [`Ontology::new`] or deserialize and call
/// [`Ontology::validate`] so the referential invariants hold.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Ontology {
    pub meta: OntologyMeta,
    pub blocks: Vec<Block>,
    pub attributes: Vec<Attribute>,
    pub edges: Vec<Edge>,
}

impl Ontology {
    pub fn new(
        meta: OntologyMeta,
        blocks: Vec<Block>,
        attributes: Vec<Attribute>,
        edges: Vec<Edge>,
    ) -> Result<Self, OntologyError> {
        let ontology = Self { meta, blocks, attributes, edges };
        ontology.validate()?;
        Ok(ontology)
    }

    pub fn validate(&self) -> Result<(), OntologyError> {
        let mut block_ids = HashSet::with_capacity(self.blocks.len());
        for block in &self.blocks {
            if !block_ids.insert(block.id.as_str()) {
                return Err(OntologyError::DuplicateBlock { id: block.id.clone() });
            }
        }

        let mut edge_keys = HashSet::with_capacity(self.edges.len());
        for edge in &self.edges {
            if !edge_keys.insert(edge.key.as_str()) {
                return Err(OntologyError::DuplicateEdge { key: edge.key.clone() });
            }
            for endpoint in [&edge.from, &edge.to] {
                if !block_ids.contains(endpoint.as_str()) {
                    return Err(OntologyError::DanglingEdge {
                        key: edge.key.clone(),
                        block_id: endpoint.clone(),
                    });
                }
            }
        }

        let mut attr_keys = HashSet::with_capacity(self.attributes.len());
        for attr in &self.attributes {
            if !attr_keys.insert(attr.key.as_str()) {
                return Err(OntologyError::DuplicateAttribute { key: attr.key.clone() });
            }
            if !block_ids.contains(attr.block_id.as_str()) {
                return Err(OntologyError::DanglingAttribute {
                    key: attr.key.clone(),
                    block_id: attr.block_id.clone(),
                });
            }
        }

        Ok(())
    }

    pub fn block(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|block| block.id.as_str() == id)
    }

    pub fn edge(&self, key: &str) -> Option<&Edge> {
        self.edges.iter().find(|edge| edge.key.as_str() == key)
    }

    pub fn attribute(&self, key: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.key.as_str() == key)
    }

    pub fn attributes_of<'a>(&'a self, block_id: &'a str) -> impl Iterator<Item = &'a Attribute> {
        self.attributes.iter().filter(move |attr| attr.block_id.as_str() == block_id)
    }

    pub fn edge_between(&self, from: &str, to: &str) -> Option<&Edge> {
        self.edges.iter().find(|edge| edge.from.as_str() == from && edge.to.as_str() == to)
    }

    /// Display label for a block id, falling back to the raw id for unknown blocks.
    pub fn block_label_or_id<'a>(&'a self, id: &'a str) -> &'a str {
        self.block(id).map(|block| block.label.as_str()).unwrap_or(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OntologyError {
    #[error("duplicate block id '{id}'")]
    DuplicateBlock { id: BlockId },
    #[error("duplicate edge key '{key}'")]
    DuplicateEdge { key: EdgeKey },
    #[error("duplicate attribute key '{key}'")]
    DuplicateAttribute { key: AttrKey },
    #[error("edge '{key}' references unknown block '{block_id}'")]
    DanglingEdge { key: EdgeKey, block_id: BlockId },
    #[error("attribute '{key}' references unknown block '{block_id}'")]
    DanglingAttribute { key: AttrKey, block_id: BlockId },
    #[error("invalid id: {0}")]
    InvalidId(#[from] IdError),
}
