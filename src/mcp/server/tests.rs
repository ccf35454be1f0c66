// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ontolens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ontolens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::*;
use crate::export::MemoryExportSink;
use crate::model::fixtures::supply_chain_small;
use crate::model::demo_ontology;

fn demo_server() -> OntolensMcp {
    OntolensMcp::new(Explorer::with_ontology(demo_ontology(), Box::new(MemoryExportSink::default())))
}

fn small_server() -> OntolensMcp {
    OntolensMcp::new(Explorer::with_ontology(
        supply_chain_small(),
        Box::new(MemoryExportSink::default()),
    ))
}

fn toggle(kind: EntityKind, id: &str) -> Parameters<SelectionToggleParams> {
    Parameters(SelectionToggleParams { kind, id: id.to_owned() })
}

#[tokio::test]
async fn command_submit_reports_parse_and_replies() {
    let server = small_server();
    let Json(result) = server
        .command_submit(Parameters(CommandSubmitParams {
            text: "show edges from supplier to material".to_owned(),
        }))
        .await
        .expect("command.submit");

    assert_eq!(result.action.as_deref(), Some("show"));
    assert_eq!(result.edges, vec!["e1"]);
    assert_eq!(result.replies, vec!["Showing edges: Supplier → Material"]);

    let Json(state) = server.state_read().await.expect("state.read");
    assert_eq!(state.status, LoadStatusKind::Ready);
    assert_eq!(state.state.highlighted_edges, vec!["e1"]);
    assert_eq!(state.state.rev, result.rev);
}

#[tokio::test]
async fn command_submit_before_load_is_not_ready() {
    let server = OntolensMcp::new(Explorer::default());
    let Json(result) = server
        .command_submit(Parameters(CommandSubmitParams { text: "reset".to_owned() }))
        .await
        .expect("command.submit");

    assert_eq!(result.action, None);
    assert_eq!(result.replies, vec!["Ontology not loaded yet. Please wait."]);

    let Json(state) = server.state_read().await.expect("state.read");
    assert_eq!(state.status, LoadStatusKind::Loading);
    assert!(server.ontology_read().await.is_err());
}

#[tokio::test]
async fn chat_read_pages_with_since() {
    let server = small_server();
    server
        .command_submit(Parameters(CommandSubmitParams { text: "highlight supplier".to_owned() }))
        .await
        .expect("command.submit");

    let Json(first) = server.chat_read(Parameters(ChatReadParams::default())).await.expect("chat");
    let texts = first.messages.iter().map(|m| m.text.as_str()).collect::<Vec<_>>();
    assert_eq!(texts, vec!["highlight supplier", "Highlighted blocks: Supplier"]);
    assert_eq!(first.next_since, 2);

    server
        .command_submit(Parameters(CommandSubmitParams { text: "reset".to_owned() }))
        .await
        .expect("command.submit");
    let Json(next) = server
        .chat_read(Parameters(ChatReadParams { since: Some(first.next_since) }))
        .await
        .expect("chat");
    assert_eq!(next.messages.len(), 2);
    assert_eq!(next.messages[0].text, "reset");
    assert_eq!(next.next_since, 4);
}

#[tokio::test]
async fn ontology_read_includes_columns() {
    let server = demo_server();
    let Json(ontology) = server.ontology_read().await.expect("ontology.read");

    assert_eq!(ontology.blocks.len(), 9);
    let market = ontology.blocks.iter().find(|b| b.id == "Market").expect("market");
    assert_eq!(market.column, "Market");
    let tariff =
        ontology.attributes.iter().find(|a| a.key == "circo:tariffRate").expect("tariff rate");
    assert_eq!(tariff.kind, "percent");
    assert_eq!(tariff.block_id, "Supplier");
}

#[tokio::test]
async fn selection_toggle_round_trips_and_validates_ids() {
    let server = small_server();

    let Json(on) = server.selection_toggle(toggle(EntityKind::Edge, "e1")).await.expect("toggle");
    assert!(on.selected);
    assert_eq!(on.selection.edges, vec!["e1"]);

    let Json(off) = server.selection_toggle(toggle(EntityKind::Edge, "e1")).await.expect("toggle");
    assert!(!off.selected);
    assert!(off.selection.edges.is_empty());

    let unknown = server.selection_toggle(toggle(EntityKind::Block, "Ghost")).await;
    assert!(unknown.is_err(), "unknown block is rejected");
    let invalid = server.selection_toggle(toggle(EntityKind::Attribute, "bad/key")).await;
    assert!(invalid.is_err(), "invalid key is rejected");
}

#[tokio::test]
async fn focus_and_drawer_follow_the_drawer_rules() {
    let server = small_server();

    let refused = server.drawer_set(Parameters(DrawerSetParams { open: true })).await;
    assert!(refused.is_err(), "drawer needs focus");

    let Json(focused) = server
        .focus_set(Parameters(FocusSetParams { block_id: Some("Material".to_owned()) }))
        .await
        .expect("focus.set");
    assert_eq!(focused.state.selected_block.as_deref(), Some("Material"));
    assert!(focused.state.attributes_drawer_open);

    let Json(closed) =
        server.drawer_set(Parameters(DrawerSetParams { open: false })).await.expect("drawer.set");
    assert!(closed.changed);
    assert!(!closed.state.attributes_drawer_open);
    assert_eq!(closed.state.selected_block.as_deref(), Some("Material"));

    let Json(cleared) =
        server.focus_set(Parameters(FocusSetParams::default())).await.expect("focus.set");
    assert_eq!(cleared.state.selected_block, None);
}

#[tokio::test]
async fn clear_tools_leave_the_other_set_alone() {
    let server = small_server();
    server.selection_toggle(toggle(EntityKind::Block, "Supplier")).await.expect("toggle");
    server
        .command_submit(Parameters(CommandSubmitParams { text: "highlight material".to_owned() }))
        .await
        .expect("command.submit");

    let Json(result) = server.highlight_clear().await.expect("highlight.clear");
    assert!(result.changed);
    assert!(result.state.highlighted_nodes.is_empty());
    assert_eq!(result.state.selection.blocks, vec!["Supplier"]);

    let Json(result) = server.selection_clear().await.expect("selection.clear");
    assert!(result.changed);
    assert!(result.state.selection.blocks.is_empty());

    let Json(again) = server.selection_clear().await.expect("selection.clear");
    assert!(!again.changed);
}

#[tokio::test]
async fn export_run_returns_payload() {
    let server = small_server();
    server.selection_toggle(toggle(EntityKind::Attribute, "circo:unitCost")).await.expect("toggle");

    let Json(result) = server.export_run().await.expect("export.run");
    assert_eq!(result.summary, "Exported 0 nodes, 0 edges, 1 attributes");
    assert_eq!(result.payload["attributes"][0]["blockId"], "Material");
    assert_eq!(result.payload["meta"]["version"], "1.0.0");
}

#[test]
fn server_info_lists_tools() {
    let info = small_server().get_info();
    let instructions = info.instructions.unwrap_or_default();
    for tool in ["command.submit", "chat.read", "selection.toggle", "export.run"] {
        assert!(instructions.contains(tool), "missing {tool}");
    }
}
