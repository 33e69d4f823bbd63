//! Benchmark profiles and utilities for waycost.
//!
//! - [`reference_layout`]: 100x100 grid (10K cells)
//! - [`stress_layout`]: 316x316 grid (~100K cells)
//! - [`populated_world`]: deterministic world with every contributor active
//! - [`stride_cells`]: deterministic distinct cell picks via seed
//! - [`ready_overlays`]: an engine with one computed, merged grid

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use waycost_arena::GridHandle;
use waycost_core::{
    AvoidLevel, CellIndex, DoorPriority, RoomInfo, TraversalCategory, WeatherState, ZoneKind,
};
use waycost_engine::{CostOverlays, EngineConfig};
use waycost_space::GridLayout;
use waycost_test_utils::MockWorld;

/// 100x100 grid (10K cells).
pub fn reference_layout() -> GridLayout {
    GridLayout::new(100, 100).expect("100x100 is a valid layout")
}

/// 316x316 grid (~100K cells).
pub fn stress_layout() -> GridLayout {
    GridLayout::new(316, 316).expect("316x316 is a valid layout")
}

/// Pick `n` distinct cells of `0..cell_count`, deterministically from `seed`.
///
/// Walks the cells with a stride coprime to `cell_count`, so the picks are
/// spread out and never repeat.
///
/// # Panics
///
/// Panics if `n > cell_count`.
pub fn stride_cells(cell_count: usize, n: usize, seed: u64) -> Vec<CellIndex> {
    assert!(n <= cell_count, "cannot pick {n} distinct cells of {cell_count}");
    if n == 0 {
        return Vec::new();
    }
    let start = (seed.wrapping_mul(6364136223846793005) % cell_count as u64) as usize;
    let mut stride = cell_count / 2 + 1 + (seed as usize % 7);
    while gcd(stride, cell_count) != 1 {
        stride += 1;
    }
    (0..n).map(|i| (start + i * stride) % cell_count).collect()
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// A world where every contributor has something to charge.
///
/// Roughly a tenth of the cells are filthy, a few are doors, two bands are
/// growing zones, one avoidance area of each level exists, the lower half
/// is roofed rooms, and the weather is bad.
pub fn populated_world(layout: GridLayout, seed: u64) -> MockWorld {
    let n = layout.cell_count();
    let mut world = MockWorld::new(n);
    for cell in stride_cells(n, n / 10, seed) {
        world.set_filthy(cell, true);
    }
    for (i, cell) in stride_cells(n, n / 100, seed ^ 1).into_iter().enumerate() {
        world.set_door(cell, Some(DoorPriority::ALL[i % DoorPriority::ALL.len()]));
    }
    let width = layout.width() as usize;
    for cell in (0..n).filter(|c| (c / width) % 10 == 3) {
        world.set_zone(cell, Some(ZoneKind::Growing));
    }
    for (i, level) in AvoidLevel::ALL.into_iter().enumerate() {
        world.create_area(level);
        for cell in stride_cells(n, n / 20, seed.wrapping_add(i as u64 + 2)) {
            world.set_area_cell(level, cell, true);
        }
    }
    for cell in n / 2..n {
        world.set_roofed(cell, true);
        world.set_room(
            cell,
            Some(RoomInfo {
                is_huge: false,
                is_doorway: false,
                psychologically_outdoors: cell % 3 == 0,
            }),
        );
    }
    world.set_weather(WeatherState {
        current_has_thought: true,
        ..WeatherState::CLEAR
    });
    world
}

/// An engine with one grid over `world`, fully computed, with the colony
/// and friendly merges already built.
pub fn ready_overlays(layout: GridLayout, world: &MockWorld) -> (CostOverlays, GridHandle) {
    let mut overlays = CostOverlays::new(EngineConfig::default()).expect("default config is valid");
    let grid = overlays.create_grid(layout);
    overlays
        .compute_all(grid, world)
        .expect("world matches layout");
    for category in [TraversalCategory::Colony, TraversalCategory::Friendly] {
        overlays
            .get_merged_grid(category, grid, None)
            .expect("grid is live");
    }
    (overlays, grid)
}
