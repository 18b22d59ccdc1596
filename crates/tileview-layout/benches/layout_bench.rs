//! Benchmarks for the viewport layout engine.
//!
//! Run with: cargo bench -p tileview-layout

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tileview_layout::{
    GapsAndMargins, GridElement, GridMode, GridSpec, ManualTabGeometry, MarginPercents, NoSpacers,
    Rect, SliceLayoutStyle, SliceQuadrantLayout, SpacerRegistry, Stretch, TabIndex, TabState,
    TileLayoutPolicy, ViewportLayoutEngine, WindowLayoutState, adjust_rect_for_aspect_ratio,
    solve_grid_sizes,
};

fn make_tabs(n: u32) -> Vec<TabState> {
    (0..n)
        .map(|i| {
            let tab = TabState::new(i).with_manual_geometry(
                ManualTabGeometry::new(
                    (i % 10) as f32 * 5.0,
                    50.0 + (i % 10) as f32 * 5.0,
                    (i % 7) as f32 * 5.0,
                    60.0 + (i % 7) as f32 * 5.0,
                )
                .with_stacking_order((i % 5) as i32),
            );
            if i % 3 == 0 { tab.with_aspect_lock(0.75) } else { tab }
        })
        .collect()
}

fn bench_grid_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/grid_sizes");
    let window = Rect::from_size(1920, 1080);

    for n in [2usize, 8, 32] {
        let mixed = |i: usize| match i % 3 {
            0 => GridElement::tab().with_stretch(Stretch::Percent(10.0)),
            1 => GridElement::tab().with_stretch(Stretch::Weight(2.0)),
            _ => GridElement::tab(),
        };
        let spec = GridSpec::new((0..n).map(mixed).collect(), (0..n).map(mixed).collect());
        group.bench_with_input(BenchmarkId::new("mixed", n), &spec, |b, spec| {
            b.iter(|| black_box(solve_grid_sizes(window, spec)))
        });
    }

    group.finish();
}

fn bench_layout_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/pass");
    let engine = ViewportLayoutEngine::default();
    let mut margins = GapsAndMargins::new();
    margins.set_all_tabs_margins(Some(MarginPercents::new(2.0, 2.0, 2.0, 2.0)));

    for n in [1u32, 4, 16, 49] {
        let window = WindowLayoutState::new(0, Rect::from_size(1920, 1080))
            .with_policy(TileLayoutPolicy::Grid(GridMode::Automatic))
            .with_highlighted_tab(Some(TabIndex(0)));
        let mut tabs = make_tabs(n);
        group.bench_function(BenchmarkId::new("automatic_grid", n), |b| {
            b.iter(|| black_box(engine.layout(&window, &mut tabs, &NoSpacers, &margins)))
        });

        let window = window.with_policy(TileLayoutPolicy::Manual);
        let mut tabs = make_tabs(n);
        group.bench_function(BenchmarkId::new("manual", n), |b| {
            b.iter(|| black_box(engine.layout(&window, &mut tabs, &NoSpacers, &margins)))
        });
    }

    let spec = GridSpec::new(
        vec![GridElement::tab(), GridElement::space(), GridElement::tab()],
        vec![GridElement::tab(), GridElement::space(), GridElement::tab()],
    );
    let mut spacers = SpacerRegistry::new();
    spacers.ensure_for_grid(0, &spec);
    let window = WindowLayoutState::new(0, Rect::from_size(1920, 1080))
        .with_policy(TileLayoutPolicy::Grid(GridMode::Custom(spec)));
    let mut tabs = make_tabs(4);
    group.bench_function("custom_grid_with_spacers", |b| {
        b.iter(|| black_box(engine.layout(&window, &mut tabs, &spacers, &margins)))
    });

    group.finish();
}

fn bench_hit_testing(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/hit_test");
    let engine = ViewportLayoutEngine::default();
    let window = WindowLayoutState::new(0, Rect::from_size(1920, 1080))
        .with_policy(TileLayoutPolicy::Manual);
    let mut tabs = make_tabs(32);
    let pass = engine
        .layout(&window, &mut tabs, &NoSpacers, &tileview_layout::NoMargins)
        .expect("valid layout");

    group.bench_function("manual_viewport_at", |b| {
        b.iter(|| {
            for y in (0..1080).step_by(60) {
                for x in (0..1920).step_by(80) {
                    black_box(pass.viewport_at(x, y));
                }
            }
        })
    });

    let slices = SliceQuadrantLayout::new(Rect::from_size(800, 800), SliceLayoutStyle::Grid);
    group.bench_function("slice_plane_at", |b| {
        b.iter(|| {
            for y in (0..800).step_by(25) {
                for x in (0..800).step_by(25) {
                    black_box(slices.plane_at(x, y));
                }
            }
        })
    });

    group.finish();
}

fn bench_aspect(c: &mut Criterion) {
    c.bench_function("layout/aspect_fit", |b| {
        b.iter(|| {
            for w in (100..2000).step_by(97) {
                black_box(adjust_rect_for_aspect_ratio(
                    Rect::from_size(w, 1080),
                    black_box(0.5625),
                ));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_grid_sizes,
    bench_layout_pass,
    bench_hit_testing,
    bench_aspect
);
criterion_main!(benches);
