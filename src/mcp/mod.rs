// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ontolens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ontolens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Model Context Protocol (MCP) server surface.
//!
//! Tools drive the same explorer session as the terminal UI: every call maps to one submission
//! or one named state action.

mod server;
mod types;

pub use server::OntolensMcp;
pub use types::{EntityKind, LoadStatusKind};
