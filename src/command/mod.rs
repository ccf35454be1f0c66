// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ontolens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ontolens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Free-text command interpretation.
//!
//! A command string is classified into one of six fixed actions and the ontology entities it
//! mentions are extracted with keyword, label and synonym matching. Parsing is pure and total:
//! every input produces a [`ParsedCommand`], ambiguity is reported separately as an
//! [`Advisory`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{AttrKey, BlockId, EdgeKey};

mod parser;
mod synonyms;

pub use parser::CommandParser;
pub use synonyms::{ACTION_KEYWORDS, SYNONYMS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Highlight,
    Show,
    Add,
    Remove,
    Export,
    Reset,
}

impl Action {
    pub const ALL: [Action; 6] =
        [Self::Highlight, Self::Show, Self::Add, Self::Remove, Self::Export, Self::Reset];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Highlight => "highlight",
            Self::Show => "show",
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Export => "export",
            Self::Reset => "reset",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entities a command refers to, deduplicated and in first-found order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Entities {
    pub blocks: Vec<BlockId>,
    pub edges: Vec<EdgeKey>,
    pub attributes: Vec<AttrKey>,
}

impl Entities {
    pub fn total(&self) -> usize {
        self.blocks.len() + self.edges.len() + self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCommand {
    pub action: Action,
    pub entities: Entities,
    /// The input exactly as submitted (not normalized).
    pub raw: String,
}

/// Advisory clarification for a parsed command.
///
/// This is text for the user, not a control-flow signal: an ambiguous command still runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    NoMatch,
    AmbiguousBlocks { count: usize, candidates: Vec<BlockId> },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMatch => {
                f.write_str("I couldn't find any matching entities. Try being more specific.")
            }
            Self::AmbiguousBlocks { count, candidates } => {
                let names = candidates.iter().map(BlockId::as_str).collect::<Vec<_>>();
                write!(f, "Found {count} blocks. Did you mean: {}?", names.join(", "))
            }
        }
    }
}

/// Number of block matches above which a command is considered ambiguous.
pub const AMBIGUOUS_BLOCK_LIMIT: usize = 3;

pub fn generate_disambiguation(entities: &Entities) -> Option<Advisory> {
    if entities.is_empty() {
        return Some(Advisory::NoMatch);
    }

    if entities.blocks.len() > AMBIGUOUS_BLOCK_LIMIT {
        return Some(Advisory::AmbiguousBlocks {
            count: entities.blocks.len(),
            candidates: entities.blocks.iter().take(AMBIGUOUS_BLOCK_LIMIT).cloned().collect(),
        });
    }

    None
}
