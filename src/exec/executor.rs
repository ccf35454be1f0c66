// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ontolens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ontolens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::command::{Action, Advisory, CommandParser, ParsedCommand};
use crate::export::{CaptureError, ExportData, ExportError, ExportSink, EXPORT_FILE_NAME};
use crate::model::{BlockId, Ontology};
use crate::state::{InteractionState, StateAction};

const CLOSEST_BLOCK_HINTS: usize = 3;
const PRONOUN_PHRASES: [&str; 2] = ["remove it", "delete it"];

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
    #[error("Screenshot failed: {0}")]
    Capture(#[from] CaptureError),
    #[error("Screenshot failed: no capture surface is attached")]
    NoCaptureSurface,
    #[error("Ontology not loaded yet. Please wait.")]
    NotReady,
}

pub(crate) struct ExecContext<'a> {
    pub(crate) ontology: &'a Ontology,
    pub(crate) parser: &'a CommandParser,
    pub(crate) sink: &'a mut dyn ExportSink,
    pub(crate) now: DateTime<Utc>,
}

/// Rewrites "remove it"/"delete it" into a removal of whatever the previous command matched.
///
/// Without a previous command the result is a removal of nothing.
pub fn resolve_pronoun(
    parser: &CommandParser,
    mut parsed: ParsedCommand,
    previous_command: Option<&str>,
) -> ParsedCommand {
    let lowered = parsed.raw.to_lowercase();
    if !PRONOUN_PHRASES.iter().any(|phrase| lowered.contains(phrase)) {
        return parsed;
    }

    parsed.action = Action::Remove;
    parsed.entities =
        previous_command.map(|previous| parser.parse(previous).entities).unwrap_or_default();
    parsed
}

/// Runs one parsed command against the state and returns the reply lines for the chat log.
pub(crate) fn execute(
    ctx: &mut ExecContext<'_>,
    state: &mut InteractionState,
    parsed: &ParsedCommand,
) -> Result<Vec<String>, ExecError> {
    let entities = &parsed.entities;
    let mut replies = Vec::new();

    match parsed.action {
        Action::Highlight => {
            if !entities.blocks.is_empty() {
                state.apply(StateAction::HighlightNodes(entities.blocks.clone()));
                replies.push(format!("Highlighted blocks: {}", join_ids(&entities.blocks)));
            }
            if !entities.edges.is_empty() {
                state.apply(StateAction::HighlightEdges(entities.edges.clone()));
                replies.push(format!("Highlighted edges: {}", join_ids(&entities.edges)));
            }
        }
        Action::Show => {
            if !entities.edges.is_empty() {
                state.apply(StateAction::HighlightEdges(entities.edges.clone()));
                let described = entities
                    .edges
                    .iter()
                    .map(|key| match ctx.ontology.edge(key.as_str()) {
                        Some(edge) => format!(
                            "{} → {}",
                            ctx.ontology.block_label_or_id(edge.from.as_str()),
                            ctx.ontology.block_label_or_id(edge.to.as_str())
                        ),
                        None => key.to_string(),
                    })
                    .collect::<Vec<_>>();
                replies.push(format!("Showing edges: {}", described.join(", ")));
            }
        }
        Action::Add => {
            let mut owners: Vec<&BlockId> = Vec::new();
            for key in &entities.attributes {
                if let Some(attr) = ctx.ontology.attribute(key.as_str()) {
                    if !owners.contains(&&attr.block_id) {
                        owners.push(&attr.block_id);
                    }
                }
            }

            if let Some(first) = owners.first() {
                let first = (*first).clone();
                let labels = entities
                    .attributes
                    .iter()
                    .map(|key| {
                        ctx.ontology
                            .attribute(key.as_str())
                            .map(|attr| attr.label.clone())
                            .unwrap_or_else(|| key.to_string())
                    })
                    .collect::<Vec<_>>();
                replies.push(format!(
                    "Opened attributes for {first} and highlighted: {}",
                    labels.join(", ")
                ));
                state.apply(StateAction::SetSelectedBlock(Some(first)));
                state.apply(StateAction::HighlightAttributes(entities.attributes.clone()));
            }
        }
        Action::Remove => {
            let ids = entities
                .blocks
                .iter()
                .map(|id| id.to_string())
                .chain(entities.edges.iter().map(|key| key.to_string()))
                .chain(entities.attributes.iter().map(|key| key.to_string()))
                .collect::<Vec<_>>();
            for id in &ids {
                state.apply(StateAction::RemoveFromSelection(id.clone()));
            }
            if !ids.is_empty() {
                replies.push(format!("Removed from selection: {}", ids.join(", ")));
            }
        }
        Action::Export => {
            let data = ExportData::from_selection(ctx.ontology, state.selection(), ctx.now);
            let json = data.to_pretty_json()?;
            ctx.sink.write_artifact(EXPORT_FILE_NAME, json.as_bytes())?;
            replies.push(format!("{}\n```json\n{json}\n```", data.summary()));
        }
        Action::Reset => {
            state.apply(StateAction::ResetView);
            replies.push(RESET_REPLY.to_owned());
        }
    }

    if matches!(parsed.action, Action::Highlight | Action::Show | Action::Add | Action::Remove) {
        if let Some(advisory) = ctx.parser.generate_disambiguation(entities) {
            replies.push(advisory.to_string());
            if advisory == Advisory::NoMatch {
                let closest = ctx.parser.closest_blocks(&parsed.raw, CLOSEST_BLOCK_HINTS);
                if !closest.is_empty() {
                    let labels = closest.iter().map(|b| b.label.as_str()).collect::<Vec<_>>();
                    replies.push(format!("Closest blocks: {}", labels.join(", ")));
                }
            }
        }
    }

    Ok(replies)
}

pub(crate) const RESET_REPLY: &str = "Reset all highlights and selections";

fn join_ids<T: ToString>(ids: &[T]) -> String {
    ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}
