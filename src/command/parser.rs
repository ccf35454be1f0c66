// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ontolens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ontolens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use regex::{Regex, RegexBuilder};

use crate::model::{AttrKey, Block, BlockId, EdgeKey, Ontology};

use super::synonyms::{self, ACTION_KEYWORDS, SYNONYMS};
use super::{generate_disambiguation, Action, Advisory, Entities, ParsedCommand};

const FROM_TO_PATTERN: &str = r"from\s+([A-Za-z0-9_]+)\s+to\s+([A-Za-z0-9_]+)";
const CLOSEST_BLOCK_MIN_RATIO: f64 = 0.6;

/// Turns free text into a [`ParsedCommand`] against one ontology snapshot.
#[derive(Debug, Clone)]
pub struct CommandParser {
    ontology: Arc<Ontology>,
    from_to: Option<Regex>,
}

impl CommandParser {
    pub fn new(ontology: Arc<Ontology>) -> Self {
        let from_to = RegexBuilder::new(FROM_TO_PATTERN).case_insensitive(true).build().ok();
        Self { ontology, from_to }
    }

    pub fn ontology(&self) -> &Ontology {
        &self.ontology
    }

    pub fn parse(&self, input: &str) -> ParsedCommand {
        let normalized = input.to_lowercase().trim().to_owned();
        let tokens = tokenize(&normalized);

        let action = classify_action(&tokens);
        let entities = Entities {
            blocks: self.extract_blocks(&tokens, &normalized),
            edges: self.extract_edges(&tokens, &normalized),
            attributes: self.extract_attributes(&tokens, &normalized),
        };

        ParsedCommand { action, entities, raw: input.to_owned() }
    }

    pub fn generate_disambiguation(&self, entities: &Entities) -> Option<Advisory> {
        generate_disambiguation(entities)
    }

    /// Blocks whose labels are fuzzily closest to any token of `input`, best first.
    pub fn closest_blocks(&self, input: &str, limit: usize) -> Vec<&Block> {
        let tokens = tokenize(&input.to_lowercase());
        if tokens.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut scored = self
            .ontology
            .blocks
            .iter()
            .filter_map(|block| {
                let label = block.label.to_lowercase();
                let best = tokens
                    .iter()
                    .map(|token| rapidfuzz::fuzz::ratio(token.chars(), label.chars()))
                    .fold(0.0_f64, f64::max);
                (best >= CLOSEST_BLOCK_MIN_RATIO).then_some((best, block))
            })
            .collect::<Vec<_>>();

        scored.sort_by(|(score_a, block_a), (score_b, block_b)| {
            score_b.total_cmp(score_a).then_with(|| block_a.label.cmp(&block_b.label))
        });
        scored.into_iter().take(limit).map(|(_, block)| block).collect()
    }

    fn extract_blocks(&self, tokens: &[String], normalized: &str) -> Vec<BlockId> {
        let mut found = Vec::new();

        for block in &self.ontology.blocks {
            let name = block.label.to_lowercase();
            if tokens.iter().any(|token| *token == name) || normalized.contains(&name) {
                push_unique(&mut found, &block.id);
            }
        }

        for token in tokens {
            let Some(target) = synonyms::lookup(token) else {
                continue;
            };
            if let Some(block) = self.ontology.block(target) {
                push_unique(&mut found, &block.id);
            }
        }

        found
    }

    fn extract_edges(&self, tokens: &[String], normalized: &str) -> Vec<EdgeKey> {
        let mut found = Vec::new();

        if let Some(captures) = self.from_to.as_ref().and_then(|re| re.captures(normalized)) {
            let from = self.find_block_by_name(&captures[1]);
            let to = self.find_block_by_name(&captures[2]);
            if let (Some(from), Some(to)) = (from, to) {
                if let Some(edge) = self.ontology.edge_between(from, to) {
                    push_unique(&mut found, &edge.key);
                }
            }
        }

        for edge in &self.ontology.edges {
            let label = edge.label.to_lowercase();
            if tokens.iter().any(|token| label.contains(token.as_str())) {
                push_unique(&mut found, &edge.key);
            }
        }

        found
    }

    fn extract_attributes(&self, tokens: &[String], normalized: &str) -> Vec<AttrKey> {
        let mut found = Vec::new();

        for attr in &self.ontology.attributes {
            let label = attr.label.to_lowercase();
            if tokens.iter().any(|token| label.contains(token.as_str())) || normalized.contains(&label)
            {
                push_unique(&mut found, &attr.key);
            }
        }

        for (phrase, target) in SYNONYMS {
            if !normalized.contains(phrase) {
                continue;
            }
            if let Some(attr) = self.ontology.attribute(target) {
                push_unique(&mut found, &attr.key);
            }
        }

        found
    }

    /// Resolves a single word to a block id: exact label first, then the synonym table.
    ///
    /// A synonym target is returned even when no such block exists; the caller's edge lookup
    /// then simply finds nothing.
    fn find_block_by_name<'a>(&'a self, name: &str) -> Option<&'a str> {
        let name = name.to_lowercase();
        if let Some(block) = self.ontology.blocks.iter().find(|b| b.label.to_lowercase() == name) {
            return Some(block.id.as_str());
        }
        synonyms::lookup(&name)
    }
}

/// Lowercased input split into word, whitespace and `:` preserving tokens.
pub(super) fn tokenize(normalized: &str) -> Vec<String> {
    normalized
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '_' || ch == ':' || ch.is_whitespace() {
                ch
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

pub(super) fn classify_action(tokens: &[String]) -> Action {
    ACTION_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| contains_phrase(tokens, keyword)))
        .map(|(action, _)| *action)
        .unwrap_or(Action::Highlight)
}

fn contains_phrase(tokens: &[String], phrase: &str) -> bool {
    let words = phrase.split_whitespace().collect::<Vec<_>>();
    match words.len() {
        0 => false,
        1 => tokens.iter().any(|token| token == words[0]),
        n => tokens.windows(n).any(|window| window.iter().zip(&words).all(|(t, w)| t == w)),
    }
}

fn push_unique<T: Clone + PartialEq>(found: &mut Vec<T>, value: &T) {
    if !found.contains(value) {
        found.push(value.clone());
    }
}
