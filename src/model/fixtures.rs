// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ontolens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ontolens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![cfg(test)]

use super::ids::{AttrKey, BlockId, EdgeKey};
use super::ontology::{Attribute, AttributeType, Block, Edge, Ontology, OntologyMeta};

pub(crate) fn block_id(value: &str) -> BlockId {
    BlockId::new(value).expect("block id")
}

pub(crate) fn edge_key(value: &str) -> EdgeKey {
    EdgeKey::new(value).expect("edge key")
}

pub(crate) fn attr_key(value: &str) -> AttrKey {
    AttrKey::new(value).expect("attribute key")
}

/// Two blocks, one edge, three attributes.
pub(crate) fn supply_chain_small() -> Ontology {
    Ontology::new(
        OntologyMeta { source: "fixture".to_owned(), version: "0".to_owned(), notice: None },
        vec![
            Block::new(block_id("Supplier"), "Supplier"),
            Block::new(block_id("Material"), "Material"),
        ],
        vec![
            Attribute::new(
                block_id("Supplier"),
                attr_key("circo:tariffRate"),
                "Tariff Rate",
                AttributeType::Percent,
            ),
            Attribute::new(
                block_id("Supplier"),
                attr_key("circo:reliabilityScore"),
                "Reliability Score",
                AttributeType::Number,
            ),
            Attribute::new(
                block_id("Material"),
                attr_key("circo:unitCost"),
                "Unit Cost",
                AttributeType::Currency,
            )
            .with_unit("EUR"),
        ],
        vec![Edge::new(edge_key("e1"), block_id("Supplier"), block_id("Material"), "supplies")],
    )
    .expect("fixture ontology")
}

/// Blocks whose labels differ from their ids, for label-vs-id display checks.
pub(crate) fn relabeled_pair() -> Ontology {
    Ontology::new(
        OntologyMeta::default(),
        vec![
            Block::new(block_id("blk:vendor"), "Vendor Co"),
            Block::new(block_id("blk:plant"), "Plant"),
        ],
        Vec::new(),
        vec![Edge::new(edge_key("e:ships"), block_id("blk:vendor"), block_id("blk:plant"), "ships")],
    )
    .expect("fixture ontology")
}
