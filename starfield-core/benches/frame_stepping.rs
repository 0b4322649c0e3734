use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use starfield_core::{
    AnimationDriver, Backdrop, BackdropConfig, FrameState, PointerState, RenderTarget, Result,
    generate_seeded,
};

const POINT_COUNTS: [usize; 3] = [2_000, 20_000, 200_000];

struct NullTarget;

impl RenderTarget for NullTarget {
    fn resize(&mut self, _width: u32, _height: u32) {}

    fn draw(&mut self, frame: &FrameState) -> Result<()> {
        std::hint::black_box(frame);
        Ok(())
    }
}

fn generation(c: &mut Criterion) {
    let mut g = c.benchmark_group("starfield generation");

    for count in POINT_COUNTS {
        g.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| generate_seeded(Some(1), std::hint::black_box(count), 15.0));
        });
    }

    g.finish();
}

fn frame_stepping(c: &mut Criterion) {
    let config = BackdropConfig {
        seed: Some(1),
        ..Default::default()
    };
    let mut driver = AnimationDriver::new(Backdrop::new(&config, 1920, 1080), NullTarget);
    let pointer = PointerState::new(0.1, -0.2);

    c.bench_function("frame", |b| {
        b.iter(|| driver.frame(std::hint::black_box(pointer)));
    });
}

criterion_group!(benches, generation, frame_stepping);
criterion_main!(benches);
