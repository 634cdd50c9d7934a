use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ticketgrid_query::{compute_stats, match_records, reconstruct_spans, run, QueryState, SortDirection};
use ticketgrid_sheet::{CellValue, NormalizedTable, TableHeaders};

const WIDTH: usize = 12;

fn synthetic_table(rows: usize) -> NormalizedTable {
    let headers = TableHeaders {
        group_headers: (0..WIDTH)
            .map(|i| if i % 4 == 0 { format!("Group {}", i / 4) } else { String::new() })
            .collect(),
        column_headers: (0..WIDTH).map(|i| format!("Column {i}")).collect(),
    };

    let data = (0..rows)
        .map(|r| {
            (0..WIDTH)
                .map(|c| match c {
                    0 => CellValue::Number((rows - r) as f64),
                    1 => CellValue::Number(44562.0 + (r % 365) as f64),
                    5 => CellValue::Text(format!("Employee {}", r % 97)),
                    _ => CellValue::Text(format!("value {}-{}", r % 13, c)),
                })
                .collect()
        })
        .collect();

    NormalizedTable::new("In Progress", headers, data)
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");

    for size in [100, 1_000, 5_000] {
        let table = synthetic_table(size);
        let state = QueryState::new().with_search("employee 4");
        group.bench_with_input(BenchmarkId::from_parameter(size), &table, |b, table| {
            b.iter(|| run(black_box(table), black_box(&state)).len())
        });
    }

    group.finish();
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");

    for size in [100, 1_000, 5_000] {
        let table = synthetic_table(size);
        let numeric = QueryState::new().with_sort(0, SortDirection::Ascending);
        let text = QueryState::new().with_sort(5, SortDirection::Descending);

        group.bench_with_input(BenchmarkId::new("numeric", size), &table, |b, table| {
            b.iter(|| run(black_box(table), black_box(&numeric)).len())
        });
        group.bench_with_input(BenchmarkId::new("text", size), &table, |b, table| {
            b.iter(|| run(black_box(table), black_box(&text)).len())
        });
    }

    group.finish();
}

fn bench_lookups(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookups");
    let table = synthetic_table(5_000);

    group.bench_function("stats", |b| b.iter(|| compute_stats(black_box(&table), 5_000)));
    group.bench_function("records", |b| {
        b.iter(|| match_records(black_box(&table), black_box("employee 42")).records.len())
    });
    group.bench_function("spans", |b| b.iter(|| reconstruct_spans(black_box(table.group_headers()))));

    group.finish();
}

criterion_group!(benches, bench_filter, bench_sort, bench_lookups);
criterion_main!(benches);
