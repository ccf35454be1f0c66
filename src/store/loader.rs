// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ontolens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ontolens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::{try_demo_ontology, Ontology, OntologyError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OntologySource {
    File(PathBuf),
    Http(String),
    Demo,
}

impl OntologySource {
    /// `http://` and `https://` arguments are fetched, anything else is a file path.
    pub fn from_arg(arg: &str) -> Self {
        let trimmed = arg.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Http(trimmed.to_owned())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for OntologySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Http(url) => f.write_str(url),
            Self::Demo => f.write_str("built-in demo"),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to fetch {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to load ontology from {url}: HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("invalid ontology JSON from {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("inconsistent ontology from {origin}: {source}")]
    Invalid {
        origin: String,
        #[source]
        source: OntologyError,
    },
}

pub async fn load_ontology(source: &OntologySource) -> Result<Ontology, LoadError> {
    tracing::debug!(%source, "loading ontology");
    let ontology = match source {
        OntologySource::Demo => try_demo_ontology()
            .map_err(|err| LoadError::Invalid { origin: source.to_string(), source: err })?,
        OntologySource::File(path) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .map_err(|source| LoadError::Io { path: path.clone(), source })?;
            parse_ontology(&path.display().to_string(), &raw)?
        }
        OntologySource::Http(url) => {
            let raw = fetch(url).await?;
            parse_ontology(url, &raw)?
        }
    };

    tracing::info!(
        %source,
        blocks = ontology.blocks.len(),
        edges = ontology.edges.len(),
        attributes = ontology.attributes.len(),
        "ontology loaded"
    );
    Ok(ontology)
}

async fn fetch(url: &str) -> Result<String, LoadError> {
    let http_err = |source| LoadError::Http { url: url.to_owned(), source };

    let response = reqwest::get(url).await.map_err(http_err)?;
    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status { url: url.to_owned(), status: status.as_u16() });
    }
    response.text().await.map_err(http_err)
}

/// Parses and validates a complete ontology document.
pub fn parse_ontology(origin: &str, raw: &str) -> Result<Ontology, LoadError> {
    let ontology: Ontology = serde_json::from_str(raw)
        .map_err(|source| LoadError::Json { origin: origin.to_owned(), source })?;
    ontology
        .validate()
        .map_err(|source| LoadError::Invalid { origin: origin.to_owned(), source })?;
    Ok(ontology)
}
