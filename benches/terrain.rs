use criterion::{criterion_group, criterion_main, Criterion, black_box};

use hybrid_terrain::terrain::generator::{BaseHeightGenerator, BaseHeightParams};
use hybrid_terrain::terrain::heightfield::TerrainSize;
use hybrid_terrain::terrain::resample::resample;
use hybrid_terrain::voxel::edit::{BrushShape, EditOperation, SparseVoxelEditMap};
use hybrid_terrain::voxel::VoxelCoord;

fn bench_set_block_churn(c: &mut Criterion) {
    c.bench_function("set_block_dig_build_churn", |b| {
        b.iter(|| {
            let mut map = SparseVoxelEditMap::new();
            // Dig a 16^3 block, then build half of it back on the same layer
            for x in 0..16 {
                for y in 0..16 {
                    for z in 0..16 {
                        map.set_block(VoxelCoord::new(x, y, z), EditOperation::Dig, 0, BrushShape::Sphere, 1.0);
                    }
                }
            }
            for x in 0..8 {
                for y in 0..16 {
                    for z in 0..16 {
                        map.set_block(VoxelCoord::new(x, y, z), EditOperation::Build, 0, BrushShape::Sphere, 1.0);
                    }
                }
            }
            black_box(map.len())
        });
    });
}

fn bench_get_block(c: &mut Criterion) {
    let mut map = SparseVoxelEditMap::new();
    for i in 0..10_000 {
        map.set_block(VoxelCoord::new(i % 100, i / 100, 0), EditOperation::Dig, 1, BrushShape::Cube, 1.0);
    }

    c.bench_function("get_block_hit_and_miss", |b| {
        let mut i = 0i32;
        b.iter(|| {
            i = (i + 7) % 20_000;
            black_box(map.get_block(VoxelCoord::new(i % 100, i / 100, 0)))
        });
    });
}

fn bench_resample_513(c: &mut Criterion) {
    let generator = BaseHeightGenerator::new(BaseHeightParams::default());
    let field = generator.generate(300, 300, TerrainSize::new(500.0, 500.0, 64.0)).unwrap();

    c.bench_function("resample_300_to_513", |b| {
        b.iter(|| resample(black_box(&field), black_box(513)));
    });
}

fn bench_resample_1025(c: &mut Criterion) {
    let generator = BaseHeightGenerator::new(BaseHeightParams::default());
    let field = generator.generate(700, 700, TerrainSize::new(1000.0, 1000.0, 64.0)).unwrap();

    c.bench_function("resample_700_to_1025", |b| {
        b.iter(|| resample(black_box(&field), black_box(1025)));
    });
}

criterion_group!(
    benches,
    bench_set_block_churn,
    bench_get_block,
    bench_resample_513,
    bench_resample_1025,
);
criterion_main!(benches);
