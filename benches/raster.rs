use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_raster::core::{FrameBuffer, Palette};
use tui_raster::demo::DemoScene;
use tui_raster::term::encode_diff_into;
use tui_raster::types::{Color, IVec2, Rgb, Triangle, Vec2};

const W: u16 = 160;
const H: u16 = 50;

fn bench_reset(c: &mut Criterion) {
    let mut fb = FrameBuffer::with_size(W, H);

    c.bench_function("reset_160x50", |b| {
        b.iter(|| {
            fb.reset();
        })
    });
}

fn bench_quantize(c: &mut Criterion) {
    let palette = Palette::shared();
    let mut i = 0usize;

    c.bench_function("quantize", |b| {
        b.iter(|| {
            i = i.wrapping_add(0x9E37_79B9) & 0xFF_FFFF;
            black_box(palette.quantize(Rgb::from_cube_index(i)));
        })
    });
}

fn bench_lines(c: &mut Criterion) {
    let mut fb = FrameBuffer::with_size(W, H);

    c.bench_function("line_diagonal", |b| {
        b.iter(|| {
            fb.rasterizer()
                .draw_line(IVec2::new(0, 0), black_box(IVec2::new(159, 49)), Color::WHITE);
        })
    });
}

fn bench_triangle(c: &mut Criterion) {
    let mut fb = FrameBuffer::with_size(W, H);
    let tri = Triangle::new(
        Vec2::new(80.0, 25.0),
        [Vec2::new(-40.0, -20.0), Vec2::new(40.0, -20.0), Vec2::new(0.0, 22.0)],
    );

    c.bench_function("triangle_rotated", |b| {
        b.iter(|| {
            fb.rasterizer()
                .draw_triangle_shape(tri, black_box(0.4), Color::new(255, 0, 0, 128));
        })
    });
}

fn bench_oval(c: &mut Criterion) {
    let mut fb = FrameBuffer::with_size(W, H);

    c.bench_function("oval_thick", |b| {
        b.iter(|| {
            fb.rasterizer().draw_oval_line(
                Vec2::new(80.0, 25.0),
                Vec2::new(50.0, 18.0),
                black_box(0.3),
                Color::YELLOW,
                3,
            );
        })
    });
}

fn bench_demo_frame(c: &mut Criterion) {
    let mut fb = FrameBuffer::with_size(W, H);
    let scene = DemoScene::new();
    let mut t = 0.0f32;

    c.bench_function("demo_frame", |b| {
        b.iter(|| {
            t += 0.016;
            fb.reset();
            scene.draw(&mut fb.rasterizer(), t);
        })
    });
}

fn bench_encode_diff(c: &mut Criterion) {
    let mut fb = FrameBuffer::with_size(W, H);
    let scene = DemoScene::new();
    scene.draw(&mut fb.rasterizer(), 0.0);
    let prev = fb.flush().to_vec();
    fb.reset();
    scene.draw(&mut fb.rasterizer(), 0.5);
    let mut out = Vec::with_capacity(64 * 1024);

    c.bench_function("encode_diff", |b| {
        b.iter(|| {
            out.clear();
            encode_diff_into(&prev, &fb, &mut out).unwrap();
            black_box(out.len());
        })
    });
}

criterion_group!(
    benches,
    bench_reset,
    bench_quantize,
    bench_lines,
    bench_triangle,
    bench_oval,
    bench_demo_frame,
    bench_encode_diff
);
criterion_main!(benches);
