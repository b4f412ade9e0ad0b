use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tabela_table::Table;

fn build_grid(rows: usize) -> Vec<Vec<String>> {
    let mut grid = vec![vec![
        "Ime".to_string(),
        "PrvaKolona".to_string(),
        "DrugaKolona".to_string(),
        "Total".to_string(),
    ]];
    for i in 0..rows {
        grid.push(vec![
            format!("red{i}"),
            i.to_string(),
            format!("{}.5", i * 2),
            (i * 3).to_string(),
        ]);
    }
    grid
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construct");

    for size in [10, 100, 1000, 10000].iter() {
        let grid = build_grid(*size);
        group.bench_with_input(BenchmarkId::new("filter_columns", size), size, |b, _| {
            b.iter(|| Table::new(black_box(grid.clone())))
        });
    }

    group.finish();
}

fn bench_column_requests(c: &mut Criterion) {
    let mut group = c.benchmark_group("column_requests");

    for size in [10, 100, 1000, 10000].iter() {
        let table = Table::new(build_grid(*size));
        group.bench_with_input(BenchmarkId::new("sum", size), size, |b, _| {
            b.iter(|| {
                table
                    .aggregate_column(black_box("prvaKolona"))
                    .map(|column| column.sum())
            })
        });
        group.bench_with_input(BenchmarkId::new("avg", size), size, |b, _| {
            b.iter(|| {
                table
                    .aggregate_column(black_box("drugaKolona"))
                    .map(|column| column.avg())
            })
        });
    }

    group.finish();
}

fn bench_operators(c: &mut Criterion) {
    let mut group = c.benchmark_group("operators");

    for size in [10, 100, 1000].iter() {
        let left = Table::new(build_grid(*size));
        let right = Table::new(build_grid(*size));

        group.bench_with_input(BenchmarkId::new("add", size), size, |b, _| {
            b.iter(|| black_box(&left).add(black_box(&right)))
        });
        group.bench_with_input(BenchmarkId::new("subtract_elementwise", size), size, |b, _| {
            b.iter(|| black_box(&left).subtract_elementwise(black_box(&right)))
        });
        group.bench_with_input(BenchmarkId::new("subtract_rows", size), size, |b, _| {
            b.iter(|| black_box(&left).subtract_rows(black_box(&right)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_construction, bench_column_requests, bench_operators);
criterion_main!(benches);
