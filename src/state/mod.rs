// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ontolens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ontolens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Interaction state shared by every view surface.
//!
//! The state is an owned value mutated only through [`InteractionState::apply`] with a named
//! [`StateAction`]. Each action applies fully or not at all, and the revision counter moves
//! whenever something observable changed so surfaces can tell a stale snapshot from a fresh one.

use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::{AttrKey, BlockId, EdgeKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

/// Entities pinned by the user; the union is what gets exported.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    pub blocks: BTreeSet<BlockId>,
    pub edges: BTreeSet<EdgeKey>,
    pub attributes: BTreeSet<AttrKey>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.edges.is_empty() && self.attributes.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateAction {
    /// Focus a block (opens the attributes drawer) or clear focus (closes it).
    SetSelectedBlock(Option<BlockId>),
    /// Show or hide the drawer without touching the focused block. Opening requires a focused
    /// block and is ignored otherwise.
    SetAttributesDrawerOpen(bool),
    HighlightNodes(Vec<BlockId>),
    HighlightEdges(Vec<EdgeKey>),
    HighlightAttributes(Vec<AttrKey>),
    ClearHighlights,
    ToggleBlockSelection(BlockId),
    ToggleEdgeSelection(EdgeKey),
    ToggleAttributeSelection(AttrKey),
    ClearSelection,
    /// Drop an id from whichever selection set holds it.
    RemoveFromSelection(String),
    /// Clear every highlight and selection set in one step.
    ResetView,
    AddMessage { text: String, sender: Sender, timestamp: i64 },
    AddToCommandHistory(String),
    ClearMessages,
    ClearCommandHistory,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    rev: u64,
    selected_block: Option<BlockId>,
    attributes_drawer_open: bool,
    highlighted_nodes: BTreeSet<BlockId>,
    highlighted_edges: BTreeSet<EdgeKey>,
    highlighted_attributes: BTreeSet<AttrKey>,
    selection: Selection,
    messages: Vec<ChatMessage>,
    command_history: Vec<String>,
    next_message_seq: u64,
}

impl InteractionState {
    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn selected_block(&self) -> Option<&BlockId> {
        self.selected_block.as_ref()
    }

    pub fn attributes_drawer_open(&self) -> bool {
        self.attributes_drawer_open
    }

    pub fn highlighted_nodes(&self) -> &BTreeSet<BlockId> {
        &self.highlighted_nodes
    }

    pub fn highlighted_edges(&self) -> &BTreeSet<EdgeKey> {
        &self.highlighted_edges
    }

    pub fn highlighted_attributes(&self) -> &BTreeSet<AttrKey> {
        &self.highlighted_attributes
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn command_history(&self) -> &[String] {
        &self.command_history
    }

    pub fn last_command(&self) -> Option<&str> {
        self.command_history.last().map(String::as_str)
    }

    /// Applies one action and reports whether anything changed.
    pub fn apply(&mut self, action: StateAction) -> bool {
        let changed = match action {
            StateAction::SetSelectedBlock(block_id) => {
                let open = block_id.is_some();
                let changed =
                    self.selected_block != block_id || self.attributes_drawer_open != open;
                self.selected_block = block_id;
                self.attributes_drawer_open = open;
                changed
            }
            StateAction::SetAttributesDrawerOpen(open) => {
                if open && self.selected_block.is_none() {
                    false
                } else {
                    replace_flag(&mut self.attributes_drawer_open, open)
                }
            }
            StateAction::HighlightNodes(ids) => union_into(&mut self.highlighted_nodes, ids),
            StateAction::HighlightEdges(keys) => union_into(&mut self.highlighted_edges, keys),
            StateAction::HighlightAttributes(keys) => {
                union_into(&mut self.highlighted_attributes, keys)
            }
            StateAction::ClearHighlights => self.clear_highlights(),
            StateAction::ToggleBlockSelection(id) => toggle(&mut self.selection.blocks, id),
            StateAction::ToggleEdgeSelection(key) => toggle(&mut self.selection.edges, key),
            StateAction::ToggleAttributeSelection(key) => {
                toggle(&mut self.selection.attributes, key)
            }
            StateAction::ClearSelection => self.clear_selection(),
            StateAction::RemoveFromSelection(id) => {
                let blocks = self.selection.blocks.remove(id.as_str());
                let edges = self.selection.edges.remove(id.as_str());
                let attributes = self.selection.attributes.remove(id.as_str());
                blocks || edges || attributes
            }
            StateAction::ResetView => {
                let highlights = self.clear_highlights();
                let selection = self.clear_selection();
                highlights || selection
            }
            StateAction::AddMessage { text, sender, timestamp } => {
                self.next_message_seq += 1;
                self.messages.push(ChatMessage {
                    id: format!("m:{}", self.next_message_seq),
                    text,
                    sender,
                    timestamp,
                });
                true
            }
            StateAction::AddToCommandHistory(command) => {
                self.command_history.push(command);
                true
            }
            StateAction::ClearMessages => {
                let changed = !self.messages.is_empty();
                self.messages.clear();
                changed
            }
            StateAction::ClearCommandHistory => {
                let changed = !self.command_history.is_empty();
                self.command_history.clear();
                changed
            }
        };

        if changed {
            self.rev = self.rev.wrapping_add(1);
        }
        changed
    }

    pub fn snapshot(&self) -> InteractionSnapshot {
        InteractionSnapshot {
            rev: self.rev,
            selected_block: self.selected_block.as_ref().map(ToString::to_string),
            attributes_drawer_open: self.attributes_drawer_open,
            highlighted_nodes: strings(&self.highlighted_nodes),
            highlighted_edges: strings(&self.highlighted_edges),
            highlighted_attributes: strings(&self.highlighted_attributes),
            selection: SelectionSnapshot {
                blocks: strings(&self.selection.blocks),
                edges: strings(&self.selection.edges),
                attributes: strings(&self.selection.attributes),
            },
            message_count: self.messages.len(),
            last_command: self.last_command().map(str::to_owned),
        }
    }

    fn clear_highlights(&mut self) -> bool {
        let changed = !self.highlighted_nodes.is_empty()
            || !self.highlighted_edges.is_empty()
            || !self.highlighted_attributes.is_empty();
        self.highlighted_nodes.clear();
        self.highlighted_edges.clear();
        self.highlighted_attributes.clear();
        changed
    }

    fn clear_selection(&mut self) -> bool {
        let changed = !self.selection.is_empty();
        self.selection = Selection::default();
        changed
    }
}

/// Read-only, serializable view of [`InteractionState`] with ids in sorted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct InteractionSnapshot {
    pub rev: u64,
    pub selected_block: Option<String>,
    pub attributes_drawer_open: bool,
    pub highlighted_nodes: Vec<String>,
    pub highlighted_edges: Vec<String>,
    pub highlighted_attributes: Vec<String>,
    pub selection: SelectionSnapshot,
    pub message_count: usize,
    pub last_command: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct SelectionSnapshot {
    pub blocks: Vec<String>,
    pub edges: Vec<String>,
    pub attributes: Vec<String>,
}

fn replace_flag(flag: &mut bool, value: bool) -> bool {
    let changed = *flag != value;
    *flag = value;
    changed
}

fn union_into<T: Ord>(set: &mut BTreeSet<T>, items: Vec<T>) -> bool {
    let mut changed = false;
    for item in items {
        changed |= set.insert(item);
    }
    changed
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, item: T) -> bool {
    if !set.remove(&item) {
        set.insert(item);
    }
    true
}

fn strings<T: ToString>(set: &BTreeSet<T>) -> Vec<String> {
    set.iter().map(ToString::to_string).collect()
}
