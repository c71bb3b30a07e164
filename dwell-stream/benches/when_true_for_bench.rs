// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use criterion::{BenchmarkId, Criterion, Throughput};
use dwell_core::OnOff;
use dwell_runtime::{Scheduler, VirtualScheduler};
use dwell_stream::prelude::*;
use dwell_test_utils::fixtures::{at, ticks};
use dwell_test_utils::{drain_now, test_channel, TestEntity};
use std::hint::black_box;

pub fn bench_when_true_for(c: &mut Criterion) {
    let mut group = c.benchmark_group("when_true_for_transitions");
    let sizes = [100usize, 1_000];

    for &size in &sizes {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bencher, &size| {
            bencher.iter(|| {
                let scheduler = VirtualScheduler::new();
                let entity = TestEntity::with_state(OnOff::Off, at(0));
                let (tx, transitions) = test_channel();
                let mut stream = transitions.when_true_for(ticks(2), entity.clone(), scheduler.clone());
                black_box(drain_now(&mut stream));

                for i in 0..size {
                    let value = if i % 2 == 0 { OnOff::On } else { OnOff::Off };
                    let _ = tx.send(entity.change(value, scheduler.now()));
                    black_box(drain_now(&mut stream));
                    scheduler.advance_by(ticks((i % 3) as u64));
                    black_box(drain_now(&mut stream));
                }
            });
        });
    }

    group.finish();
}
