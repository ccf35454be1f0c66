// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ontolens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ontolens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{ChatMessage, InteractionSnapshot, SelectionSnapshot};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CommandSubmitParams {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CommandSubmitResponse {
    /// `None` when the text was blank or the ontology is not ready.
    pub action: Option<String>,
    pub blocks: Vec<String>,
    pub edges: Vec<String>,
    pub attributes: Vec<String>,
    pub replies: Vec<String>,
    pub rev: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatusKind {
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StateReadResponse {
    pub status: LoadStatusKind,
    pub load_error: Option<String>,
    pub state: InteractionSnapshot,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ChatReadParams {
    /// Only return messages with a sequence number greater than this.
    #[serde(default)]
    pub since: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ChatReadResponse {
    pub messages: Vec<ChatMessage>,
    /// Pass back as `since` to read only newer messages.
    pub next_since: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BlockSummary {
    pub id: String,
    pub label: String,
    pub description: Option<String>,
    pub column: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EdgeSummary {
    pub key: String,
    pub from: String,
    pub to: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AttributeSummary {
    pub block_id: String,
    pub key: String,
    pub label: String,
    pub kind: String,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct OntologyReadResponse {
    pub source: String,
    pub version: String,
    pub notice: Option<String>,
    pub blocks: Vec<BlockSummary>,
    pub edges: Vec<EdgeSummary>,
    pub attributes: Vec<AttributeSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Block,
    Edge,
    Attribute,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SelectionToggleParams {
    pub kind: EntityKind,
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SelectionToggleResponse {
    /// Whether the entity is selected after the toggle.
    pub selected: bool,
    pub selection: SelectionSnapshot,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct FocusSetParams {
    /// Block to focus; omit to clear focus and close the drawer.
    #[serde(default)]
    pub block_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DrawerSetParams {
    pub open: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ViewUpdateResponse {
    pub changed: bool,
    pub state: InteractionSnapshot,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExportRunResponse {
    pub summary: String,
    pub payload: serde_json::Value,
}
