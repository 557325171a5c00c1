//! Benchmarks for client-side leaderboard sorting and search
//!
//! Run with: cargo bench

use battler::api::dto::{LeaderboardEntry, SortBy, SortOrder};
use battler::leaderboard::{filter_entries, sort_entries};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};

const ORGS: [&str; 6] = ["OpenAI", "Anthropic", "Meta", "Google", "Mistral", "Alibaba"];

fn create_test_entries(count: usize) -> Vec<LeaderboardEntry> {
    (0..count)
        .map(|i| {
            let org = ORGS[i % ORGS.len()];
            LeaderboardEntry {
                rank: i as u32 + 1,
                model_id: format!("{}-model-{}", org.to_lowercase(), i),
                model_name: format!("{} Model {}", org, i),
                elo_score: 1800.0 - (i as f64) * 0.37,
                elo_ci: 10.0 + (i % 7) as f64,
                vote_count: ((i * 7919) % 5000) as u64,
                win_rate: 0.5,
                organization: org.to_string(),
                license: "Proprietary".to_string(),
            }
        })
        .collect()
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");

    for size in [100, 1000, 10000] {
        let entries = create_test_entries(size);

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("search_org_{}", size), |b| {
            b.iter(|| filter_entries(black_box(&entries), black_box("anthropic")).len())
        });

        group.bench_function(format!("search_miss_{}", size), |b| {
            b.iter(|| filter_entries(black_box(&entries), black_box("no-such-model")).len())
        });
    }

    group.finish();
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");

    for size in [100, 1000, 10000] {
        let entries = create_test_entries(size);

        group.throughput(Throughput::Elements(size as u64));

        for (name, sort_by) in [
            ("elo", SortBy::EloScore),
            ("votes", SortBy::VoteCount),
            ("org", SortBy::Organization),
        ] {
            group.bench_function(format!("{}_{}", name, size), |b| {
                b.iter_batched(
                    || entries.clone(),
                    |mut batch| sort_entries(black_box(&mut batch), sort_by, SortOrder::Desc),
                    BatchSize::LargeInput,
                )
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_filter, bench_sort);
criterion_main!(benches);
