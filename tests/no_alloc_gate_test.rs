use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use tui_raster::core::FrameBuffer;
use tui_raster::demo::DemoScene;
use tui_raster::engine::{Engine, EngineConfig};
use tui_raster::types::{Color, IVec2, Triangle, Vec2};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

// A single test per binary: the counter is process-wide.
#[test]
fn drawing_is_allocation_free_after_warmup() {
    // Setup (outside counting) so the palette table and buffers are already built.
    let mut fb = FrameBuffer::with_size(120, 40);
    let mut engine = Engine::new(EngineConfig {
        width: 120,
        height: 40,
        ..EngineConfig::default()
    })
    .unwrap();
    let mut scene = DemoScene::new();
    let _ = engine.render_frame(&mut scene, Duration::ZERO);

    let allocs = with_alloc_counting(|| {
        for i in 0..20 {
            let t = i as f32 * 0.1;
            fb.reset();
            let mut r = fb.rasterizer();
            let c = Vec2::new(60.0, 20.0);
            r.set_pixel(IVec2::new(1, 1), Color::new(255, 0, 0, 90));
            r.draw_line(IVec2::new(0, 0), IVec2::new(119, 39), Color::WHITE);
            r.draw_line_ex(Vec2::new(3.0, 4.0), Vec2::new(80.0, 30.0), Color::GREEN, 3);
            r.draw_circle(c, 12.0, Color::CYAN);
            r.draw_circle_line(c, 15.0, Color::MAGENTA, 4);
            r.draw_oval_line(c, Vec2::new(30.0, 10.0), 0.3 + t, Color::YELLOW, 1);
            r.draw_oval_line(c, Vec2::new(20.0, 8.0), 0.7 + t, Color::ORANGE, 3);
            r.draw_rect(c, Vec2::new(20.0, 10.0), 0.0, Color::GRAY);
            r.draw_rect(c, Vec2::new(20.0, 10.0), t + 0.1, Color::RED);
            r.draw_rect_line(c, Vec2::new(40.0, 20.0), 0.0, Color::BLUE, 2);
            r.draw_rect_line(c, Vec2::new(40.0, 20.0), t + 0.2, Color::WHITE, 3);
            r.draw_triangle_shape(
                Triangle::new(c, [Vec2::new(-9.0, -5.0), Vec2::new(9.0, -5.0), Vec2::new(0.0, 9.0)]),
                t,
                Color::new(0, 0, 255, 128),
            );

            let _ = engine.render_frame(&mut scene, Duration::from_millis(i * 16));
        }
    });

    assert!(allocs == 0);
}
