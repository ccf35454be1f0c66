// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ontolens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ontolens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Ontology loading.
//!
//! An ontology document is read once, from disk or over HTTP, parsed and validated as a whole.
//! Any failure is terminal for that load attempt; there is no partial ontology.

pub mod loader;

pub use loader::{load_ontology, parse_ontology, LoadError, OntologySource};
