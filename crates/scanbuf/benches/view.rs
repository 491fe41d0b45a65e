// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![expect(missing_docs, reason = "Benchmark code")]

use std::alloc::System;
use std::hint::black_box;

use alloc_tracker::{Allocator, Session};
use criterion::{Criterion, criterion_group, criterion_main};
use scanbuf::ByteView;

criterion_group!(benches, entrypoint);
criterion_main!(benches);

#[global_allocator]
static ALLOCATOR: Allocator<System> = Allocator::system();

const TEST_TEXT: &str = "    identifier_with_some_length = 1234567890; // trailing comment";

fn entrypoint(c: &mut Criterion) {
    let allocs = Session::new();

    let mut group = c.benchmark_group("ByteView");

    let allocs_op = allocs.operation("consume_while");
    group.bench_function("consume_while", |b| {
        b.iter(|| {
            let _span = allocs_op.measure_thread();

            let mut view = ByteView::from(black_box(TEST_TEXT));
            view.consume_while(|byte| byte == b' ');
            view.consume_while(|byte| byte.is_ascii_alphanumeric() || byte == b'_');

            view
        });
    });

    let allocs_op = allocs.operation("consume_prefix");
    group.bench_function("consume_prefix", |b| {
        b.iter(|| {
            let _span = allocs_op.measure_thread();

            let mut view = ByteView::from(black_box(TEST_TEXT));
            black_box(view.consume_prefix("    identifier"))
        });
    });

    let allocs_op = allocs.operation("compare");
    group.bench_function("compare", |b| {
        let left = ByteView::from(TEST_TEXT);
        let right = ByteView::from(&TEST_TEXT[..TEST_TEXT.len() - 1]);

        b.iter(|| {
            let _span = allocs_op.measure_thread();
            black_box(left).compare(black_box(right))
        });
    });

    let allocs_op = allocs.operation("scan_tokens");
    group.bench_function("scan_tokens", |b| {
        b.iter(|| {
            let _span = allocs_op.measure_thread();

            let mut view = ByteView::from(black_box(TEST_TEXT));
            let mut tokens = 0_usize;

            while !view.is_empty() {
                view.consume_while(|byte| byte.is_ascii_whitespace());

                let start = view;
                if view.consume_while(|byte| !byte.is_ascii_whitespace()) > 0 {
                    black_box(start.prefix(view));
                    tokens += 1;
                }
            }

            tokens
        });
    });

    group.finish();

    allocs.print_to_stdout();
}
