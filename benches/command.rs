// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ontolens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ontolens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use ontolens::command::CommandParser;

mod fixtures;
mod profiler;

// Benchmark identity (keep stable):
// - Group names in this file: `command.parse/<case>`, `command.closest_blocks`
// - Case IDs are `<ontology case>/<command id>`; do not rename them so results stay comparable.
fn benches_command(c: &mut Criterion) {
    for case in [fixtures::Case::Demo, fixtures::Case::Medium, fixtures::Case::Large] {
        let ontology = Arc::new(fixtures::ontology(case));
        let parser = CommandParser::new(ontology.clone());

        let mut group = c.benchmark_group(format!("command.parse/{}", case.id()));
        group.throughput(Throughput::Elements(ontology.blocks.len() as u64));
        for (command_id, text) in fixtures::COMMANDS {
            let parser = &parser;
            group.bench_function(*command_id, move |b| {
                b.iter(|| {
                    let parsed = parser.parse(black_box(text));
                    black_box(fixtures::checksum_parsed(&parsed))
                })
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("command.closest_blocks");
        for case in [fixtures::Case::Demo, fixtures::Case::Large] {
            let parser = CommandParser::new(Arc::new(fixtures::ontology(case)));
            group.bench_function(case.id(), move |b| {
                b.iter(|| black_box(parser.closest_blocks(black_box("highlight suplier"), 3).len()))
            });
        }
        group.finish();
    }
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_command
}
criterion_main!(benches);
