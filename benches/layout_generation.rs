//! Benchmarks for layout generation and blending.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hamlet::{
    generator_for_style, LayoutStyle, PatternBlender, Settlement, SettlementType,
    SettlementTypeRegistry,
};

fn bench_generation(c: &mut Criterion) {
    let registry = SettlementTypeRegistry::with_defaults();

    for kind in [SettlementType::Village, SettlementType::Metropolis] {
        let max_size = registry.get(kind).map(|p| p.max_size).unwrap_or(1);
        let Ok(settlement) = Settlement::with_size(kind, max_size, &registry) else {
            continue;
        };

        for style in [LayoutStyle::Clustered, LayoutStyle::Grid] {
            let generator = generator_for_style(style);
            c.bench_function(&format!("generate_{}_{}", style, kind), |b| {
                let mut rng = hamlet::utils::create_rng(42);
                b.iter(|| generator.generate(black_box(&settlement), &mut rng))
            });
        }
    }
}

fn bench_blend(c: &mut Criterion) {
    let registry = SettlementTypeRegistry::with_defaults();
    let Ok(settlement) = Settlement::with_size(SettlementType::City, 12, &registry) else {
        return;
    };
    let mut rng = hamlet::utils::create_rng(7);

    let layouts: Vec<_> = [LayoutStyle::Clustered, LayoutStyle::Grid, LayoutStyle::Clustered]
        .into_iter()
        .filter_map(|style| generator_for_style(style).generate(&settlement, &mut rng).ok())
        .collect();
    let weights = vec![1.0; layouts.len()];
    let blender = PatternBlender::new();

    c.bench_function("blend_three_city_layouts", |b| {
        b.iter(|| blender.blend(black_box(&layouts), black_box(&weights)))
    });
}

criterion_group!(benches, bench_generation, bench_blend);
criterion_main!(benches);
