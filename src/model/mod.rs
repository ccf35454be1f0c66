// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ontolens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ontolens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Ontology data model.
//!
//! An ontology is an immutable snapshot of blocks, edges and attributes that every command is
//! resolved against.

pub mod demo;
pub(crate) mod fixtures;
pub mod ids;
pub mod ontology;

pub use demo::{demo_ontology, try_demo_ontology};
pub use ids::{AttrKey, BlockId, EdgeKey, Id, IdError};
pub use ontology::{Attribute, AttributeType, Block, Edge, Ontology, OntologyError, OntologyMeta};
