// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ontolens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ontolens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::Action;

/// Phrase → canonical block id or namespaced attribute key.
///
/// Order matters: it is the order synonym matches are appended to a command's entities.
/// Targets that do not exist in the loaded ontology contribute nothing.
pub const SYNONYMS: &[(&str, &str)] = &[
    // blocks
    ("factory", "Facility"),
    ("plant", "Facility"),
    ("warehouse", "Facility"),
    ("supplier", "Supplier"),
    ("vendor", "Supplier"),
    ("material", "Material"),
    ("component", "Material"),
    ("resource", "Material"),
    ("process", "Process"),
    ("manufacturing", "Process"),
    ("production", "Process"),
    ("product", "Product"),
    ("good", "Product"),
    ("item", "Product"),
    ("order", "Order"),
    ("purchase", "Order"),
    ("shipment", "Shipment"),
    ("delivery", "Shipment"),
    ("inventory", "Inventory"),
    ("stock", "Inventory"),
    ("market", "Market"),
    ("economy", "Market"),
    // attributes
    ("tariff", "circo:tariffRate"),
    ("tariff rate", "circo:tariffRate"),
    ("tax", "circo:tariffRate"),
    ("energy price", "circo:energyPriceEURperMWh"),
    ("power cost", "circo:energyPriceEURperMWh"),
    ("electricity price", "circo:energyPriceEURperMWh"),
    ("reliability", "circo:reliabilityScore"),
    ("cost", "circo:unitCost"),
    ("price", "circo:marketPrice"),
    ("capacity", "circo:capacity"),
    ("efficiency", "circo:efficiency"),
    ("cycle time", "circo:cycleTime"),
    ("lead time", "circo:leadTimeVariance"),
    ("delivery time", "circo:deliveryTime"),
    ("stock level", "circo:stockLevel"),
    ("inflation", "circo:inflationRate"),
];

/// Action classification table; the first row with a matching keyword wins.
///
/// Multi-word keywords match a contiguous run of tokens.
pub const ACTION_KEYWORDS: &[(Action, &[&str])] = &[
    (Action::Show, &["show edges", "show edge"]),
    (Action::Highlight, &["highlight", "show", "display", "focus"]),
    (Action::Add, &["add", "include", "select", "pin"]),
    (Action::Remove, &["remove", "delete", "unselect", "clear", "hide"]),
    (Action::Export, &["export", "download", "save"]),
    (Action::Reset, &["reset", "clear all", "start over"]),
];

pub(super) fn lookup(phrase: &str) -> Option<&'static str> {
    SYNONYMS.iter().find(|(key, _)| *key == phrase).map(|(_, target)| *target)
}
