// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ontolens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ontolens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::{Json, Parameters};
use rmcp::model::{ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ErrorData, ServerHandler, ServiceExt};
use tokio::sync::Mutex;

use crate::exec::{ExecError, Explorer, LoadStatus};
use crate::layout::Column;
use crate::model::{AttrKey, BlockId, EdgeKey, Ontology};
use crate::state::StateAction;

use super::types::*;

/// MCP view surface over a shared [`Explorer`].
///
/// The TUI holds a clone of the same `Arc`, so tool calls and key presses see one state.
#[derive(Clone)]
pub struct OntolensMcp {
    explorer: Arc<Mutex<Explorer>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl OntolensMcp {
    pub fn new(explorer: Explorer) -> Self {
        Self::with_shared(Arc::new(Mutex::new(explorer)))
    }

    pub fn with_shared(explorer: Arc<Mutex<Explorer>>) -> Self {
        Self { explorer, tool_router: Self::tool_router() }
    }

    pub fn explorer(&self) -> Arc<Mutex<Explorer>> {
        self.explorer.clone()
    }

    pub async fn serve_stdio(self) -> Result<(), rmcp::RmcpError> {
        let service = self.serve((tokio::io::stdin(), tokio::io::stdout())).await?;
        service.waiting().await?;
        Ok(())
    }

    /// Run a free-text command exactly as if it was typed into the chat box; the replies are
    /// also appended to the chat log.
    #[tool(name = "command.submit")]
    async fn command_submit(
        &self,
        params: Parameters<CommandSubmitParams>,
    ) -> Result<Json<CommandSubmitResponse>, ErrorData> {
        let CommandSubmitParams { text } = params.0;
        let mut explorer = self.explorer.lock().await;
        let outcome = explorer.submit(&text);

        let (action, blocks, edges, attributes) = match outcome.parsed {
            Some(parsed) => (
                Some(parsed.action.to_string()),
                strings(&parsed.entities.blocks),
                strings(&parsed.entities.edges),
                strings(&parsed.entities.attributes),
            ),
            None => (None, Vec::new(), Vec::new(), Vec::new()),
        };

        Ok(Json(CommandSubmitResponse {
            action,
            blocks,
            edges,
            attributes,
            replies: outcome.replies,
            rev: explorer.state().rev(),
        }))
    }

    /// Read load status plus highlights, selection, focus and drawer state.
    #[tool(name = "state.read")]
    async fn state_read(&self) -> Result<Json<StateReadResponse>, ErrorData> {
        let explorer = self.explorer.lock().await;
        let (status, load_error) = match explorer.status() {
            LoadStatus::Loading => (LoadStatusKind::Loading, None),
            LoadStatus::Ready { .. } => (LoadStatusKind::Ready, None),
            LoadStatus::Failed { reason } => (LoadStatusKind::Failed, Some(reason.clone())),
        };
        Ok(Json(StateReadResponse { status, load_error, state: explorer.snapshot() }))
    }

    /// Read the chat log; pass `since` from a previous response to page forward.
    #[tool(name = "chat.read")]
    async fn chat_read(
        &self,
        params: Parameters<ChatReadParams>,
    ) -> Result<Json<ChatReadResponse>, ErrorData> {
        let since = params.0.since.unwrap_or(0);
        let explorer = self.explorer.lock().await;

        let mut next_since = since;
        let messages = explorer
            .state()
            .messages()
            .iter()
            .filter(|message| message_seq(&message.id) > since)
            .inspect(|message| next_since = next_since.max(message_seq(&message.id)))
            .cloned()
            .collect::<Vec<_>>();

        Ok(Json(ChatReadResponse { messages, next_since }))
    }

    /// Read the loaded ontology with the graph column of every block.
    #[tool(name = "ontology.read")]
    async fn ontology_read(&self) -> Result<Json<OntologyReadResponse>, ErrorData> {
        let explorer = self.explorer.lock().await;
        let ontology = ready_ontology(&explorer)?;
        Ok(Json(ontology_response(ontology)))
    }

    /// Toggle one block, edge or attribute in the export selection.
    #[tool(name = "selection.toggle")]
    async fn selection_toggle(
        &self,
        params: Parameters<SelectionToggleParams>,
    ) -> Result<Json<SelectionToggleResponse>, ErrorData> {
        let SelectionToggleParams { kind, id } = params.0;
        let mut explorer = self.explorer.lock().await;
        let ontology = Arc::clone(ready_ontology(&explorer)?);

        let selected = match kind {
            EntityKind::Block => {
                let id = parse_block_id(&ontology, &id)?;
                explorer.toggle_block_selection(id.clone());
                explorer.state().selection().blocks.contains(&id)
            }
            EntityKind::Edge => {
                let key = parse_edge_key(&ontology, &id)?;
                explorer.toggle_edge_selection(key.clone());
                explorer.state().selection().edges.contains(&key)
            }
            EntityKind::Attribute => {
                let key = parse_attr_key(&ontology, &id)?;
                explorer.toggle_attribute_selection(key.clone());
                explorer.state().selection().attributes.contains(&key)
            }
        };

        Ok(Json(SelectionToggleResponse { selected, selection: explorer.snapshot().selection }))
    }

    /// Empty the export selection.
    #[tool(name = "selection.clear")]
    async fn selection_clear(&self) -> Result<Json<ViewUpdateResponse>, ErrorData> {
        self.view_update(StateAction::ClearSelection).await
    }

    /// Remove every highlight; selection, focus and chat stay as they are.
    #[tool(name = "highlight.clear")]
    async fn highlight_clear(&self) -> Result<Json<ViewUpdateResponse>, ErrorData> {
        self.view_update(StateAction::ClearHighlights).await
    }

    /// Focus a block (opens its attributes drawer) or clear focus with no `block_id`.
    #[tool(name = "focus.set")]
    async fn focus_set(
        &self,
        params: Parameters<FocusSetParams>,
    ) -> Result<Json<ViewUpdateResponse>, ErrorData> {
        let block_id = match params.0.block_id {
            Some(raw) => {
                let explorer = self.explorer.lock().await;
                Some(parse_block_id(ready_ontology(&explorer)?, &raw)?)
            }
            None => None,
        };
        self.view_update(StateAction::SetSelectedBlock(block_id)).await
    }

    /// Show or hide the attributes drawer; opening needs a focused block.
    #[tool(name = "drawer.set")]
    async fn drawer_set(
        &self,
        params: Parameters<DrawerSetParams>,
    ) -> Result<Json<ViewUpdateResponse>, ErrorData> {
        let open = params.0.open;
        {
            let explorer = self.explorer.lock().await;
            if open && explorer.state().selected_block().is_none() {
                return Err(ErrorData::invalid_params(
                    "cannot open the attributes drawer without a focused block",
                    None,
                ));
            }
        }
        self.view_update(StateAction::SetAttributesDrawerOpen(open)).await
    }

    /// Export the current selection through the configured sink and return the payload.
    #[tool(name = "export.run")]
    async fn export_run(&self) -> Result<Json<ExportRunResponse>, ErrorData> {
        let mut explorer = self.explorer.lock().await;
        let data = explorer.export().map_err(export_error)?;
        let payload = serde_json::to_value(&data).map_err(|err| {
            ErrorData::internal_error(format!("failed to encode export: {err}"), None)
        })?;
        Ok(Json(ExportRunResponse { summary: data.summary(), payload }))
    }

    async fn view_update(&self, action: StateAction) -> Result<Json<ViewUpdateResponse>, ErrorData> {
        let mut explorer = self.explorer.lock().await;
        let changed = explorer.dispatch(action);
        Ok(Json(ViewUpdateResponse { changed, state: explorer.snapshot() }))
    }
}

#[tool_handler]
impl ServerHandler for OntolensMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Ontology explorer server (tools: command.submit, state.read, chat.read, ontology.read, selection.toggle, selection.clear, highlight.clear, focus.set, drawer.set, export.run)"
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// Id parsing and response mapping for the tool handlers.
include!("server/helpers.rs");

#[cfg(test)]
mod tests;
