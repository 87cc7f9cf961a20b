use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use formwire_compiler::{ClassModel, FieldModel, ProcessingOptions, Rule};
use std::hint::black_box;

/// A host type with `size` fields cycling through single and paired rules.
fn sample_class(size: usize) -> ClassModel {
    let mut class = ClassModel::new("LargeForm", "on_valid")
        .with_validate_action("submit")
        .with_clear_action("reset");

    for i in 0..size {
        let rule = match i % 6 {
            0 => Rule::Required,
            1 => Rule::Email { required: true },
            2 => Rule::ConfirmEmail,
            3 => Rule::Length { min: 2, max: 64, required: true },
            4 => Rule::Password { min: 8, pattern: String::new() },
            _ => Rule::ConfirmPassword,
        };
        let field = FieldModel::new(format!("field_{}", i), rule)
            .with_error_message(format!("field {} is invalid", i));
        class = class.with_field(field);
    }

    class
}

fn benchmark_compile(c: &mut Criterion) {
    let options = ProcessingOptions::default();
    let mut group = c.benchmark_group("compile");

    for size in [6, 60, 600] {
        let class = sample_class(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("plan", size), &class, |b, class| {
            b.iter(|| black_box(formwire_compiler::plan(class, &options)))
        });

        group.bench_with_input(BenchmarkId::new("compile", size), &class, |b, class| {
            b.iter(|| black_box(formwire_compiler::compile(class, &options)))
        });

        group.bench_with_input(BenchmarkId::new("expand", size), &class, |b, class| {
            b.iter(|| black_box(formwire_compiler::expand(class, &options)))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_compile);
criterion_main!(benches);
