use criterion::{black_box, criterion_group, criterion_main, Criterion};
use retitle_core::{normalize, RawRecord, Retitler};

const TYPES: &[&str] = &["Leggings", "Gym Shorts", "Sports Bra", "Yoga Pants", "Tote Bag"];
const COLORS: &[&str] = &["Black", "Khaki", "White-Green", "Leopard Print", "Beige"];

fn catalog(n: usize) -> Vec<RawRecord> {
    (0..n)
        .map(|i| {
            let ty = TYPES[i % TYPES.len()];
            let color = COLORS[(i / TYPES.len()) % COLORS.len()];
            RawRecord::new(
                format!("{}-{}-{}", ty.to_lowercase().replace(' ', "-"), color.to_lowercase(), i),
                format!("Women's {} {}", color, ty),
            )
        })
        .collect()
}

fn bench_normalize(c: &mut Criterion) {
    c.bench_function("normalize_standard", |b| {
        b.iter(|| normalize(black_box("Women's White-Green Leggings")))
    });
    c.bench_function("normalize_named", |b| {
        b.iter(|| normalize(black_box("Women's Yoga Pants Khaki - Alex")))
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let records = catalog(5_000);
    let retitler = Retitler::default();
    c.bench_function("retitle_5000", |b| {
        b.iter(|| retitler.run(black_box(records.clone())))
    });
}

criterion_group!(benches, bench_normalize, bench_pipeline);
criterion_main!(benches);
