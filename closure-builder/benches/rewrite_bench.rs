//! Benchmarks for the entry-module rewrite.

use closure_builder::rewrite::{rewrite_entry_source, transpile_module, TranspileOptions};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const MAIN_TS: &str = r"import { enableProdMode } from '@angular/core';
import { platformBrowserDynamic } from '@angular/platform-browser-dynamic';

import { AppModule } from './app/app.module';
import { environment } from './environments/environment';

if (environment.production) {
  enableProdMode();
}

platformBrowserDynamic().bootstrapModule(AppModule)
  .catch((err: Error) => console.log(err));
";

fn rewrite_benchmark(c: &mut Criterion) {
    c.bench_function("rewrite_entry_source", |b| {
        b.iter(|| rewrite_entry_source(black_box(MAIN_TS)));
    });

    let rewritten = rewrite_entry_source(MAIN_TS);
    let options = TranspileOptions::default();
    c.bench_function("transpile_module", |b| {
        b.iter(|| transpile_module(black_box(&rewritten), &options));
    });
}

criterion_group!(benches, rewrite_benchmark);
criterion_main!(benches);
