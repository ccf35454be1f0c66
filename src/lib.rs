// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ontolens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ontolens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Ontolens: a terminal ontology explorer driven by short natural-language commands.
//!
//! A loaded [`model::Ontology`] is explored through the [`exec::Explorer`], which parses chat
//! commands, applies them to the shared [`state::InteractionState`] and reports back in the chat
//! log. The TUI and the MCP tools are two views over the same explorer.

pub mod command;
pub mod exec;
pub mod export;
pub mod layout;
pub mod mcp;
pub mod model;
pub mod state;
pub mod store;
pub mod tui;
