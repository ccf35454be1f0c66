// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ontolens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ontolens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Command execution and the explorer session.
//!
//! [`Explorer`] owns the ontology load status, the command parser and the
//! [`InteractionState`]. Surfaces (TUI, MCP) hold it behind a shared lock and never touch the
//! state except through its methods, so every mutation is one of the named state actions.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::command::{CommandParser, ParsedCommand};
use crate::export::{
    ExportData, ExportSink, MemoryExportSink, RegionCapture, EXPORT_FILE_NAME,
    SCREENSHOT_FILE_NAME,
};
use crate::model::{AttrKey, BlockId, EdgeKey, Ontology};
use crate::state::{InteractionSnapshot, InteractionState, Sender, StateAction};
use crate::store::{load_ontology, LoadError, OntologySource};

mod executor;

pub use executor::{resolve_pronoun, ExecError};

use executor::{execute, ExecContext, RESET_REPLY};

const NOT_READY_REPLY: &str = "Ontology not loaded yet. Please wait.";

#[derive(Debug)]
pub enum LoadStatus {
    Loading,
    Ready { ontology: Arc<Ontology>, parser: CommandParser },
    Failed { reason: String },
}

/// What a single submission produced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmitOutcome {
    /// `None` when the input was empty or the ontology was not ready.
    pub parsed: Option<ParsedCommand>,
    pub replies: Vec<String>,
}

pub struct Explorer {
    status: LoadStatus,
    state: InteractionState,
    sink: Box<dyn ExportSink>,
    capture: Option<Box<dyn RegionCapture>>,
    clock: fn() -> DateTime<Utc>,
}

impl std::fmt::Debug for Explorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Explorer")
            .field("status", &self.status)
            .field("state", &self.state)
            .field("capture", &self.capture.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for Explorer {
    fn default() -> Self {
        Self::new(Box::new(MemoryExportSink::default()))
    }
}

impl Explorer {
    pub fn new(sink: Box<dyn ExportSink>) -> Self {
        Self {
            status: LoadStatus::Loading,
            state: InteractionState::default(),
            sink,
            capture: None,
            clock: Utc::now,
        }
    }

    pub fn with_ontology(ontology: Ontology, sink: Box<dyn ExportSink>) -> Self {
        let mut explorer = Self::new(sink);
        explorer.set_ontology(ontology);
        explorer
    }

    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn set_capture(&mut self, capture: Box<dyn RegionCapture>) {
        self.capture = Some(capture);
    }

    pub fn set_ontology(&mut self, ontology: Ontology) {
        let ontology = Arc::new(ontology);
        let parser = CommandParser::new(ontology.clone());
        self.status = LoadStatus::Ready { ontology, parser };
    }

    pub fn set_load_failed(&mut self, err: &LoadError) {
        tracing::warn!(error = %err, "ontology load failed");
        self.status = LoadStatus::Failed { reason: err.to_string() };
    }

    /// Marks a new load attempt; commands answer "not ready" until it resolves.
    pub fn begin_reload(&mut self) {
        self.status = LoadStatus::Loading;
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn ontology(&self) -> Option<&Arc<Ontology>> {
        match &self.status {
            LoadStatus::Ready { ontology, .. } => Some(ontology),
            _ => None,
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn snapshot(&self) -> InteractionSnapshot {
        self.state.snapshot()
    }

    /// Interprets one line from the command box.
    ///
    /// Never fails: every outcome, including internal errors, ends up as a system chat message.
    pub fn submit(&mut self, text: &str) -> SubmitOutcome {
        let command = text.trim();
        if command.is_empty() {
            return SubmitOutcome::default();
        }

        self.push_message(command.to_owned(), Sender::User);

        if let Some(reply) = self.not_ready_reply() {
            self.push_message(reply.clone(), Sender::System);
            return SubmitOutcome { parsed: None, replies: vec![reply] };
        }

        let now = (self.clock)();
        let previous = self.state.last_command().map(str::to_owned);
        self.state.apply(StateAction::AddToCommandHistory(command.to_owned()));

        let LoadStatus::Ready { ontology, parser } = &self.status else {
            return SubmitOutcome::default();
        };

        let parsed = resolve_pronoun(parser, parser.parse(command), previous.as_deref());
        tracing::debug!(
            action = %parsed.action,
            blocks = parsed.entities.blocks.len(),
            edges = parsed.entities.edges.len(),
            attributes = parsed.entities.attributes.len(),
            "command parsed"
        );

        let mut ctx = ExecContext { ontology, parser, sink: self.sink.as_mut(), now };
        let replies = match execute(&mut ctx, &mut self.state, &parsed) {
            Ok(replies) => replies,
            Err(err) => {
                tracing::warn!(error = %err, command, "command failed");
                vec![err.to_string()]
            }
        };

        for reply in &replies {
            self.push_message(reply.clone(), Sender::System);
        }
        SubmitOutcome { parsed: Some(parsed), replies }
    }

    /// Applies a state action coming from a view surface (clicks, key presses, tool calls).
    pub fn dispatch(&mut self, action: StateAction) -> bool {
        self.state.apply(action)
    }

    pub fn toggle_block_selection(&mut self, id: BlockId) -> bool {
        self.dispatch(StateAction::ToggleBlockSelection(id))
    }

    pub fn toggle_edge_selection(&mut self, key: EdgeKey) -> bool {
        self.dispatch(StateAction::ToggleEdgeSelection(key))
    }

    pub fn toggle_attribute_selection(&mut self, key: AttrKey) -> bool {
        self.dispatch(StateAction::ToggleAttributeSelection(key))
    }

    pub fn select_block(&mut self, id: Option<BlockId>) -> bool {
        self.dispatch(StateAction::SetSelectedBlock(id))
    }

    pub fn set_drawer_open(&mut self, open: bool) -> bool {
        self.dispatch(StateAction::SetAttributesDrawerOpen(open))
    }

    /// Hides the drawer but keeps the focused block, so it can be reopened.
    pub fn close_drawer(&mut self) -> bool {
        self.set_drawer_open(false)
    }

    pub fn clear_chat(&mut self) -> bool {
        let messages = self.dispatch(StateAction::ClearMessages);
        let history = self.dispatch(StateAction::ClearCommandHistory);
        messages || history
    }

    /// The reset button: clears highlights and selection and confirms in the chat.
    pub fn reset(&mut self) {
        self.state.apply(StateAction::ResetView);
        self.push_message(RESET_REPLY.to_owned(), Sender::System);
    }

    /// The export button: downloads the current selection without echoing the payload.
    pub fn export(&mut self) -> Result<ExportData, ExecError> {
        let Some(ontology) = self.ontology().cloned() else {
            let reply = self.not_ready_reply().unwrap_or_else(|| NOT_READY_REPLY.to_owned());
            self.push_message(reply, Sender::System);
            return Err(ExecError::NotReady);
        };

        let data = ExportData::from_selection(&ontology, self.state.selection(), (self.clock)());
        let result = data
            .to_pretty_json()
            .and_then(|json| self.sink.write_artifact(EXPORT_FILE_NAME, json.as_bytes()));
        match result {
            Ok(location) => {
                self.push_message(format!("{} to {location}", data.summary()), Sender::System);
                Ok(data)
            }
            Err(err) => {
                let err = ExecError::from(err);
                self.push_message(err.to_string(), Sender::System);
                Err(err)
            }
        }
    }

    /// The screenshot button: captures `region_id` and downloads it as a PNG.
    pub fn screenshot(&mut self, region_id: &str) -> Result<String, ExecError> {
        let result = match self.capture.as_mut() {
            Some(capture) => capture.capture(region_id).map_err(ExecError::from).and_then(|png| {
                self.sink.write_artifact(SCREENSHOT_FILE_NAME, &png).map_err(ExecError::from)
            }),
            None => Err(ExecError::NoCaptureSurface),
        };

        match result {
            Ok(location) => {
                self.push_message("Screenshot saved!".to_owned(), Sender::System);
                Ok(location)
            }
            Err(err) => {
                tracing::warn!(error = %err, region_id, "screenshot failed");
                self.push_message(err.to_string(), Sender::System);
                Err(err)
            }
        }
    }

    fn not_ready_reply(&self) -> Option<String> {
        match &self.status {
            LoadStatus::Ready { .. } => None,
            LoadStatus::Loading => Some(NOT_READY_REPLY.to_owned()),
            LoadStatus::Failed { reason } => Some(format!("Ontology failed to load: {reason}")),
        }
    }

    fn push_message(&mut self, text: String, sender: Sender) {
        let timestamp = (self.clock)().timestamp_millis();
        self.state.apply(StateAction::AddMessage { text, sender, timestamp });
    }
}

/// Loads `source` into the shared explorer, replacing any previous status.
///
/// The lock is only held to flip the status, never across the fetch.
pub async fn load_into(explorer: &tokio::sync::Mutex<Explorer>, source: &OntologySource) -> bool {
    explorer.lock().await.begin_reload();
    match load_ontology(source).await {
        Ok(ontology) => {
            explorer.lock().await.set_ontology(ontology);
            true
        }
        Err(err) => {
            explorer.lock().await.set_load_failed(&err);
            false
        }
    }
}
