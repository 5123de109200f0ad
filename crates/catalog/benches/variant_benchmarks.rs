use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use maison_catalog::{ProductOption, VariantField, VariantMatrix, generate, update_variant_field};

fn options_with(values_per_axis: usize, axes: usize) -> Vec<ProductOption> {
    (0..axes)
        .map(|a| {
            let csv = (0..values_per_axis)
                .map(|v| format!("v{a}-{v}"))
                .collect::<Vec<_>>()
                .join(", ");
            ProductOption::from_csv(format!("Option {a}"), csv)
        })
        .collect()
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("variant_generate");
    for values in [3usize, 8, 20] {
        let options = options_with(values, 3);
        group.throughput(Throughput::Elements((values * values * values) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(values), &options, |b, opts| {
            b.iter(|| generate(black_box(opts)))
        });
    }
    group.finish();
}

fn bench_update_field(c: &mut Criterion) {
    let variants = generate(&options_with(8, 3));
    c.bench_function("variant_update_field_512", |b| {
        b.iter(|| update_variant_field(black_box(&variants), 256, VariantField::Price, "49.90"))
    });
}

fn bench_cosmetic_option_edit(c: &mut Criterion) {
    let options = options_with(8, 3);
    let mut matrix = VariantMatrix::with_options(options.clone());
    c.bench_function("variant_matrix_unchanged_options", |b| {
        b.iter(|| matrix.set_options(black_box(options.clone())))
    });
}

criterion_group!(benches, bench_generate, bench_update_field, bench_cosmetic_option_edit);
criterion_main!(benches);
