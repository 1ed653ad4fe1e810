//! Benchmarks for prompt composition.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use noorix::core::{GenerationRequest, LengthPreference, Stage, StageResults};
use noorix::prompts::{compose_hashtags_prompt, compose_stage_prompt, compose_title_prompt};

fn prompt_benchmark(c: &mut Criterion) {
    c.bench_function("title_prompt", |b| {
        b.iter(|| compose_title_prompt(black_box("sustainable living blog")))
    });

    let description = "Discover practical habits that cut waste. ".repeat(20);
    c.bench_function("hashtags_prompt", |b| {
        b.iter(|| compose_hashtags_prompt(black_box(&description), black_box("sustainable living blog")))
    });

    let request = GenerationRequest::new("sustainable living blog", LengthPreference::Medium);
    let results = StageResults::default();
    c.bench_function("stage_prompt_missing_upstream", |b| {
        b.iter(|| compose_stage_prompt(black_box(Stage::Hashtags), &request, &results))
    });
}

criterion_group!(benches, prompt_benchmark);
criterion_main!(benches);
