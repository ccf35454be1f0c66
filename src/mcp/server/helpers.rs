// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ontolens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ontolens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// MCP server helper functions:
/// ontology mapping, id parsing against the loaded ontology, and error conversion.
fn ready_ontology(explorer: &Explorer) -> Result<&Arc<Ontology>, ErrorData> {
    match explorer.status() {
        LoadStatus::Ready { ontology, .. } => Ok(ontology),
        LoadStatus::Loading => {
            Err(ErrorData::invalid_request("ontology not loaded yet; retry shortly", None))
        }
        LoadStatus::Failed { reason } => Err(ErrorData::internal_error(
            format!("ontology failed to load: {reason}"),
            None,
        )),
    }
}

fn parse_block_id(ontology: &Ontology, value: &str) -> Result<BlockId, ErrorData> {
    let id = BlockId::new(value).map_err(|err| invalid_id("block_id", value, err))?;
    if ontology.block(id.as_str()).is_none() {
        return Err(ErrorData::resource_not_found(
            format!("unknown block: {value}"),
            Some(serde_json::json!({ "block_id": value })),
        ));
    }
    Ok(id)
}

fn parse_edge_key(ontology: &Ontology, value: &str) -> Result<EdgeKey, ErrorData> {
    let key = EdgeKey::new(value).map_err(|err| invalid_id("edge_key", value, err))?;
    if ontology.edge(key.as_str()).is_none() {
        return Err(ErrorData::resource_not_found(
            format!("unknown edge: {value}"),
            Some(serde_json::json!({ "edge_key": value })),
        ));
    }
    Ok(key)
}

fn parse_attr_key(ontology: &Ontology, value: &str) -> Result<AttrKey, ErrorData> {
    let key = AttrKey::new(value).map_err(|err| invalid_id("attribute_key", value, err))?;
    if ontology.attribute(key.as_str()).is_none() {
        return Err(ErrorData::resource_not_found(
            format!("unknown attribute: {value}"),
            Some(serde_json::json!({ "attribute_key": value })),
        ));
    }
    Ok(key)
}

fn invalid_id(field: &str, value: &str, err: crate::model::IdError) -> ErrorData {
    ErrorData::invalid_params(
        format!("invalid {field}: {err}"),
        Some(serde_json::json!({ field: value })),
    )
}

fn export_error(err: ExecError) -> ErrorData {
    match err {
        ExecError::NotReady => ErrorData::invalid_request(err.to_string(), None),
        other => ErrorData::internal_error(other.to_string(), None),
    }
}

fn ontology_response(ontology: &Ontology) -> OntologyReadResponse {
    OntologyReadResponse {
        source: ontology.meta.source.clone(),
        version: ontology.meta.version.clone(),
        notice: ontology.meta.notice.clone(),
        blocks: ontology
            .blocks
            .iter()
            .map(|block| BlockSummary {
                id: block.id.to_string(),
                label: block.label.clone(),
                description: block.description.clone(),
                column: Column::for_block(block.id.as_str()).label().to_owned(),
            })
            .collect(),
        edges: ontology
            .edges
            .iter()
            .map(|edge| EdgeSummary {
                key: edge.key.to_string(),
                from: edge.from.to_string(),
                to: edge.to.to_string(),
                label: edge.label.clone(),
            })
            .collect(),
        attributes: ontology
            .attributes
            .iter()
            .map(|attr| AttributeSummary {
                block_id: attr.block_id.to_string(),
                key: attr.key.to_string(),
                label: attr.label.clone(),
                kind: attr.kind.as_str().to_owned(),
                unit: attr.unit.clone(),
            })
            .collect(),
    }
}

/// Sequence number of a chat message id (`m:7` -> 7); unknown shapes sort first.
fn message_seq(id: &str) -> u64 {
    id.strip_prefix("m:").and_then(|seq| seq.parse().ok()).unwrap_or(0)
}

fn strings<T: ToString>(ids: &[T]) -> Vec<String> {
    ids.iter().map(ToString::to_string).collect()
}
