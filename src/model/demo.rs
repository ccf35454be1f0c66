// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ontolens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ontolens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Built-in supply-chain ontology used by `--demo` and the benches.

use super::ids::{AttrKey, BlockId, EdgeKey, IdError};
use super::ontology::{
    Attribute, AttributeType, Block, Edge, Ontology, OntologyError, OntologyMeta,
};

const BLOCKS: &[(&str, &str, &str)] = &[
    ("Supplier", "Supplier", "Upstream vendor of raw materials and components"),
    ("Material", "Material", "Raw material or purchased component"),
    ("Process", "Process", "Manufacturing step that transforms materials"),
    ("Facility", "Facility", "Plant or warehouse where processes run"),
    ("Product", "Product", "Finished good offered to the market"),
    ("Order", "Order", "Customer purchase order"),
    ("Shipment", "Shipment", "Physical delivery of goods"),
    ("Inventory", "Inventory", "Stock held between production and delivery"),
    ("Market", "Market", "Demand side and macro-economic context"),
];

const EDGES: &[(&str, &str, &str, &str)] = &[
    ("e1", "Supplier", "Material", "supplies"),
    ("e2", "Material", "Process", "feeds"),
    ("e3", "Process", "Facility", "runs at"),
    ("e4", "Facility", "Product", "produces"),
    ("e5", "Product", "Inventory", "stocked in"),
    ("e6", "Inventory", "Shipment", "dispatches"),
    ("e7", "Order", "Product", "requests"),
    ("e8", "Order", "Shipment", "fulfilled by"),
    ("e9", "Shipment", "Market", "delivers"),
    ("e10", "Market", "Order", "places"),
];

const ATTRIBUTES: &[(&str, &str, &str, AttributeType, Option<&str>)] = &[
    ("Supplier", "circo:tariffRate", "Tariff Rate", AttributeType::Percent, Some("%")),
    ("Supplier", "circo:reliabilityScore", "Reliability Score", AttributeType::Number, None),
    ("Supplier", "circo:leadTimeVariance", "Lead Time Variance", AttributeType::Number, Some("days")),
    ("Material", "circo:unitCost", "Unit Cost", AttributeType::Currency, Some("EUR")),
    ("Process", "circo:cycleTime", "Cycle Time", AttributeType::Number, Some("h")),
    ("Process", "circo:efficiency", "Efficiency", AttributeType::Percent, Some("%")),
    ("Facility", "circo:capacity", "Capacity", AttributeType::Number, Some("units/day")),
    (
        "Facility",
        "circo:energyPriceEURperMWh",
        "Energy Price",
        AttributeType::Currency,
        Some("EUR/MWh"),
    ),
    ("Product", "circo:sku", "SKU", AttributeType::Text, None),
    ("Order", "circo:orderDate", "Order Date", AttributeType::Date, None),
    ("Shipment", "circo:deliveryTime", "Delivery Time", AttributeType::Number, Some("days")),
    ("Inventory", "circo:stockLevel", "Stock Level", AttributeType::Number, Some("units")),
    ("Market", "circo:marketPrice", "Market Price", AttributeType::Currency, Some("EUR")),
    ("Market", "circo:inflationRate", "Inflation Rate", AttributeType::Percent, Some("%")),
];

/// The demo ontology for callers that cannot handle a failure (benches, UI fixtures).
///
/// A construction error is logged and yields an empty ontology; the `--demo` load path uses
/// [`try_demo_ontology`] so the failure surfaces as a load error instead.
pub fn demo_ontology() -> Ontology {
    try_demo_ontology().unwrap_or_else(|err| {
        tracing::error!(error = %err, "built-in demo ontology is invalid");
        Ontology::default()
    })
}

pub fn try_demo_ontology() -> Result<Ontology, OntologyError> {
    let blocks = BLOCKS
        .iter()
        .map(|(id, label, description)| {
            Ok::<_, IdError>(Block::new(BlockId::new(*id)?, *label).with_description(*description))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let edges = EDGES
        .iter()
        .map(|(key, from, to, label)| {
            Ok::<_, IdError>(Edge::new(
                EdgeKey::new(*key)?,
                BlockId::new(*from)?,
                BlockId::new(*to)?,
                *label,
            ))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let attributes = ATTRIBUTES
        .iter()
        .map(|(block_id, key, label, kind, unit)| {
            let attr = Attribute::new(BlockId::new(*block_id)?, AttrKey::new(*key)?, *label, *kind);
            Ok::<_, IdError>(match unit {
                Some(unit) => attr.with_unit(*unit),
                None => attr,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let meta = OntologyMeta {
        source: "ontolens demo".to_owned(),
        version: "1.0.0".to_owned(),
        notice: Some("Illustrative supply-chain ontology; values are not real data.".to_owned()),
    };

    Ontology::new(meta, blocks, attributes, edges)
}
