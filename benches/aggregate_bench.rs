// Aggregation benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gitstats::aggregate::{AggregateConfig, Aggregator, AuthorKey};

fn numstat_history(commits: usize) -> String {
    let mut text = String::new();
    for i in 0..commits {
        text.push_str(&format!("{i:040x}|Author {}|{}\n\n", i % 50, 1_600_000_000 + i));
        for f in 0..4 {
            text.push_str(&format!("{}\t{}\tsrc/module_{}/file_{f}.rs\n", i % 17, i % 5, i % 30));
        }
    }
    text
}

fn bench_numstat_workers(c: &mut Criterion) {
    let text = numstat_history(20_000);
    let lines: Vec<&str> = text.lines().collect();

    let mut group = c.benchmark_group("numstat_aggregate");
    for workers in [1, 2, 4, 8] {
        let aggregator = Aggregator::new(&AggregateConfig {
            workers,
            author_key: AuthorKey::CaseInsensitive,
        })
        .unwrap();
        group.bench_with_input(BenchmarkId::new("workers", workers), &lines, |b, lines| {
            b.iter(|| black_box(aggregator.numstat_lines(lines)));
        });
    }
    group.finish();
}

fn bench_file_lines(c: &mut Criterion) {
    let paths: Vec<String> = (0..100_000)
        .map(|i| format!("src/module_{}/file_{}.rs", i % 40, i % 300))
        .collect();
    let lines: Vec<&str> = paths.iter().map(String::as_str).collect();
    let ignore = vec!["module_3".to_string()];
    let aggregator = Aggregator::new(&AggregateConfig::default()).unwrap();

    c.bench_function("file_lines_100k", |b| {
        b.iter(|| black_box(aggregator.file_lines(&lines, &ignore)));
    });
}

criterion_group!(benches, bench_numstat_workers, bench_file_lines);
criterion_main!(benches);
