use criterion::{Criterion, criterion_group, criterion_main};
use rand::{Rng, SeedableRng, rngs::SmallRng};

use voxstack::GrayVolume;

const SIZE: u32 = 128;

fn prepare_striped_volume() -> GrayVolume {
    let mut volume = GrayVolume::new(SIZE, SIZE);
    let mut rng = SmallRng::seed_from_u64(0x5eed);

    for z in 0..SIZE {
        let plane = vec![rng.random::<u8>(); (SIZE * SIZE) as usize];
        volume.set_plane(z, &plane).unwrap();
    }

    volume
}

fn benchmark_set_plane_uniform(c: &mut Criterion) {
    let white = vec![0xffu8; (SIZE * SIZE) as usize];

    c.bench_function("set_plane_uniform", |b| {
        let mut volume = GrayVolume::new(SIZE, SIZE);
        let mut z = 0;
        b.iter(|| {
            volume.set_plane(z % SIZE, &white).unwrap();
            z += 1;
        })
    });
}

fn benchmark_set_scattered(c: &mut Criterion) {
    c.bench_function("set_scattered", |b| {
        let mut volume = GrayVolume::new(SIZE, SIZE);
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        b.iter(|| {
            let x = rng.random_range(0..SIZE);
            let y = rng.random_range(0..SIZE);
            let z = rng.random_range(0..SIZE);
            volume.set(x, y, z, rng.random::<u8>()).unwrap();
        })
    });
}

fn benchmark_get_plane(c: &mut Criterion) {
    c.bench_function("get_plane", |b| {
        let mut volume = prepare_striped_volume();
        let mut z = 0;
        b.iter(|| {
            let plane = volume.get_plane(z % SIZE);
            z += 1;
            plane
        })
    });
}

fn benchmark_node_count(c: &mut Criterion) {
    let volume = prepare_striped_volume();

    c.bench_function("node_count", |b| b.iter(|| volume.node_count()));
}

criterion_group!(
    benches,
    benchmark_set_plane_uniform,
    benchmark_set_scattered,
    benchmark_get_plane,
    benchmark_node_count,
);
criterion_main!(benches);
