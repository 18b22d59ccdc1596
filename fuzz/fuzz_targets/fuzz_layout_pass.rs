#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tileview_layout::{
    GridElement, GridMode, GridSpec, LayoutConfig, LayoutDebugger, ManualTabGeometry, NoSpacers,
    Rect, Sides, SliceLayoutStyle, SpacerRegistry, Stretch, TabIndex, TabState, TileLayoutPolicy,
    ViewportLayoutEngine, WindowLayoutState,
};

#[derive(Debug, Arbitrary)]
struct Element {
    spacer: bool,
    percent: bool,
    value: u8,
}

impl Element {
    fn to_grid(&self) -> GridElement {
        let base = if self.spacer {
            GridElement::space()
        } else {
            GridElement::tab()
        };
        let stretch = if self.percent {
            Stretch::Percent(f32::from(self.value % 101))
        } else {
            Stretch::Weight(f32::from(self.value) / 16.0)
        };
        base.with_stretch(stretch)
    }
}

#[derive(Debug, Arbitrary)]
struct Tab {
    lock: Option<u16>,
    bounds: [u8; 4],
    stacking_order: i8,
    displayed: bool,
    slices: Option<u8>,
}

#[derive(Debug, Arbitrary)]
struct Input {
    width: u16,
    height: u16,
    policy: u8,
    rows: Vec<Element>,
    columns: Vec<Element>,
    tabs: Vec<Tab>,
    lock_all: bool,
    centering: bool,
    margin: u8,
    register_spacers: bool,
}

fuzz_target!(|input: Input| {
    if input.rows.len() > 16 || input.columns.len() > 16 || input.tabs.len() > 64 {
        return;
    }
    let window_rect = Rect::from_size(
        i32::from(input.width % 4096),
        i32::from(input.height % 4096),
    );

    let mut tabs: Vec<TabState> = input
        .tabs
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let [x0, x1, y0, y1] = t.bounds.map(|b| f32::from(b % 101));
            let geometry = ManualTabGeometry::new(x0, x1, y0, y1)
                .with_stacking_order(i32::from(t.stacking_order))
                .with_displayed(t.displayed);
            let mut tab = TabState::new(i as u32).with_manual_geometry(geometry);
            if let Some(lock) = t.lock {
                tab = tab.with_aspect_lock(f32::from(lock.max(1)) / 1000.0);
            }
            if let Some(style) = t.slices {
                tab = tab.with_slice_layout(match style % 3 {
                    0 => SliceLayoutStyle::Column,
                    1 => SliceLayoutStyle::Row,
                    _ => SliceLayoutStyle::Grid,
                });
            }
            tab
        })
        .collect();

    let spec = GridSpec::new(
        input.rows.iter().map(Element::to_grid).collect(),
        input.columns.iter().map(Element::to_grid).collect(),
    );
    let mut spacers = SpacerRegistry::new();
    if input.register_spacers {
        spacers.ensure_for_grid(0, &spec);
    }
    let custom_is_valid = spec.validate().is_ok();
    let policy = match input.policy % 4 {
        0 => TileLayoutPolicy::Single,
        1 => TileLayoutPolicy::Grid(GridMode::Automatic),
        2 => TileLayoutPolicy::Grid(GridMode::Custom(spec)),
        _ => TileLayoutPolicy::Manual,
    };
    let expect_ok = custom_is_valid || input.policy % 4 != 2;

    let window = WindowLayoutState::new(0, window_rect)
        .with_policy(policy)
        .with_lock_all_tabs(input.lock_all);
    let margin = i32::from(input.margin);
    let margins = move |_: TabIndex, _: i32, _: i32| Sides::all(margin);
    let debugger = LayoutDebugger::new();
    debugger.set_enabled(true);
    let config = LayoutConfig::default().with_centering_correction(input.centering);
    let Ok(engine) = ViewportLayoutEngine::new(config) else {
        return;
    };
    let engine = engine.with_debugger(debugger.clone());

    let result = if input.register_spacers {
        engine.layout(&window, &mut tabs, &spacers, &margins)
    } else {
        engine.layout(&window, &mut tabs, &NoSpacers, &margins)
    };
    let pass = match result {
        Ok(pass) => pass,
        Err(err) => {
            assert!(!expect_ok, "unexpected layout error: {err}");
            return;
        }
    };

    // Post-conditions that must always hold:
    assert!(debugger.violations().is_empty(), "{}", debugger.report());
    for viewport in pass.viewports() {
        assert!(
            window_rect.contains_rect(&viewport.tab_viewport()),
            "tab viewport escapes window"
        );
        assert!(
            viewport.tab_viewport().contains_rect(&viewport.model_viewport()),
            "model viewport escapes tab viewport"
        );
        if let Some(slices) = viewport.slice_layout() {
            for (_, panel) in slices.iter() {
                assert!(viewport.model_viewport().contains_rect(&panel) || panel.is_empty());
            }
        }
    }
    let picks = pass.pick_table();
    for id in 1..=picks.len() as u32 {
        if let Some(target) = picks.resolve(id) {
            assert_eq!(picks.id_for(target.viewport, target.plane), Some(id));
        }
    }
});
