// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ontolens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ontolens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::str::FromStr;
use std::time::Duration;

use criterion::Criterion;
use pprof::criterion::{Output, PProfProfiler};

/// Reads `ONTOLENS_BENCH_<name>`, falling back to `default` when unset or unparsable.
fn bench_env<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(format!("ONTOLENS_BENCH_{name}"))
        .ok()
        .and_then(|raw| raw.trim().parse::<T>().ok())
        .unwrap_or(default)
}

/// Criterion config shared by all benches; parsing runs in microseconds, so samples are cheap.
pub fn criterion() -> Criterion {
    let frequency = bench_env::<i32>("PROFILE_FREQ", 250).clamp(1, 1000);
    let sample_size = bench_env::<usize>("SAMPLE_SIZE", 100).clamp(10, 500);
    let warmup_ms = bench_env::<u64>("WARMUP_MS", 500).clamp(100, 60_000);
    let measurement_secs = bench_env::<u64>("MEASUREMENT_SECS", 3).clamp(1, 120);

    Criterion::default()
        .sample_size(sample_size)
        .warm_up_time(Duration::from_millis(warmup_ms))
        .measurement_time(Duration::from_secs(measurement_secs))
        .with_profiler(PProfProfiler::new(frequency, Output::Flamegraph(None)))
}
