//! End-to-end behaviour of `CostOverlays` across grid lifecycles.

use std::sync::Arc;

use waycost_arena::GridHandle;
use waycost_core::{Cost, CostSettings, Knob, TraversalCategory, WeatherState, MAX_COST};
use waycost_engine::{CostOverlays, EngineConfig, MutationKind, OverlayError};
use waycost_source::{CostSource, SourceKind, WrappedOverlay};
use waycost_space::GridLayout;
use waycost_test_utils::{const_source, CostTable, MockOverlay, MockWorld, TableSource};

const COLONY: TraversalCategory = TraversalCategory::Colony;
const FRIENDLY: TraversalCategory = TraversalCategory::Friendly;

fn engine() -> CostOverlays {
    CostOverlays::new(EngineConfig::default()).unwrap()
}

fn square(side: u32) -> GridLayout {
    GridLayout::new(side, side).unwrap()
}

fn boxed(source: TableSource) -> Box<dyn CostSource> {
    Box::new(source)
}

/// One engine with a custom source set, already computed.
fn custom(
    layout: GridLayout,
    sources: Vec<Box<dyn CostSource>>,
) -> (CostOverlays, GridHandle, MockWorld) {
    let mut overlays = engine();
    let grid = overlays.create_grid_with_sources(layout, sources);
    let world = MockWorld::new(layout.cell_count());
    overlays.compute_all(grid, &world).unwrap();
    (overlays, grid, world)
}

// ── Single-cell update ──────────────────────────────────────────

#[test]
fn single_cell_change_recomputes_one_cell() {
    let (terrain, table) = const_source(SourceKind::TerrainHazard, 100, 10);
    let (mut overlays, grid, world) = custom(square(10), vec![boxed(terrain)]);
    assert_eq!(
        overlays.get_merged_grid(COLONY, grid, None).unwrap().to_vec(),
        vec![10; 100]
    );

    table.set(5, 200);
    table.reset_evaluations();
    overlays
        .cell_changed(grid, MutationKind::TerrainChanged, 5)
        .unwrap();
    overlays.update_incrementally(grid, &world, &[]).unwrap();

    assert_eq!(table.evaluations(), 1);
    let merged = overlays.get_merged_grid(COLONY, grid, None).unwrap();
    let mut expected = vec![10; 100];
    expected[5] = 200;
    assert_eq!(merged.to_vec(), expected);
}

#[test]
fn single_cell_change_merges_one_cell_in_owned_mode() {
    let (terrain, table) = const_source(SourceKind::TerrainHazard, 100, 0);
    let (zone, _) = const_source(SourceKind::Zone(COLONY), 100, 1);
    let (mut overlays, grid, world) = custom(square(10), vec![boxed(terrain), boxed(zone)]);
    overlays.get_merged_grid(COLONY, grid, None).unwrap();
    let before = overlays.merge_metrics(COLONY, grid, None).unwrap();
    assert_eq!(before.full_merges, 1);

    table.set(5, 10);
    overlays
        .cell_changed(grid, MutationKind::TerrainChanged, 5)
        .unwrap();
    overlays.update_incrementally(grid, &world, &[]).unwrap();
    let merged = overlays.get_merged_grid(COLONY, grid, None).unwrap();

    let after = overlays.merge_metrics(COLONY, grid, None).unwrap();
    assert_eq!(after.partial_merges, 1);
    assert_eq!(after.cells_merged - before.cells_merged, 1);
    assert_eq!(merged.at(5), 11);
    assert_eq!(merged.at(6), 1);
}

#[test]
fn reported_cells_are_recomputed_without_marking() {
    let (terrain, table) = const_source(SourceKind::TerrainHazard, 9, 0);
    let (mut overlays, grid, world) = custom(square(3), vec![boxed(terrain)]);
    table.set(4, 3);
    let more = overlays.update_incrementally(grid, &world, &[4]).unwrap();
    assert!(!more);
    assert_eq!(overlays.get_merged_grid(COLONY, grid, None).unwrap().at(4), 3);
}

#[test]
fn marked_cells_beyond_the_report_are_flagged() {
    let (terrain, table) = const_source(SourceKind::TerrainHazard, 9, 0);
    let (mut overlays, grid, world) = custom(square(3), vec![boxed(terrain)]);
    table.set(7, 2);
    overlays
        .cell_changed(grid, MutationKind::TerrainChanged, 7)
        .unwrap();
    assert!(overlays.update_incrementally(grid, &world, &[1]).unwrap());
    assert_eq!(overlays.get_merged_grid(COLONY, grid, None).unwrap().at(7), 2);
}

// ── Merging ─────────────────────────────────────────────────────

#[test]
fn merged_grid_is_the_saturating_sum_of_relevant_sources() {
    let (terrain, _) = const_source(SourceKind::TerrainHazard, 4, 40_000);
    let (zone, _) = const_source(SourceKind::Zone(COLONY), 4, 40_000);
    let (rooms, _) = const_source(SourceKind::EnclosedSpace, 4, 7);
    let (mut overlays, grid, _) =
        custom(square(2), vec![boxed(terrain), boxed(zone), boxed(rooms)]);

    let colony = overlays.get_merged_grid(COLONY, grid, None).unwrap();
    assert_eq!(colony.to_vec(), vec![MAX_COST; 4]);
    // Rooms only cost visitors; the colony zone only costs colonists.
    let friendly = overlays.get_merged_grid(FRIENDLY, grid, None).unwrap();
    assert_eq!(friendly.to_vec(), vec![40_007; 4]);
}

#[test]
fn category_none_merges_to_zero() {
    let mut overlays = engine();
    let grid = overlays.create_grid(square(3));
    let mut world = MockWorld::new(9);
    world.set_filthy(0, true);
    overlays.compute_all(grid, &world).unwrap();
    let none = overlays
        .get_merged_grid(TraversalCategory::None, grid, None)
        .unwrap();
    assert!(none.iter().all(|c| c == 0));
    assert_eq!(
        overlays.get_merged_grid(COLONY, grid, None).unwrap().at(0),
        overlays.settings().dirty_cost
    );
}

#[test]
fn repeated_reads_are_identical_and_clean() {
    let (terrain, _) = const_source(SourceKind::TerrainHazard, 4, 3);
    let (zone, _) = const_source(SourceKind::Zone(COLONY), 4, 4);
    let (mut overlays, grid, _) = custom(square(2), vec![boxed(terrain), boxed(zone)]);
    let first = overlays.get_merged_grid(COLONY, grid, None).unwrap();
    let second = overlays.get_merged_grid(COLONY, grid, None).unwrap();
    assert!(first.ptr_eq(&second));
    assert_eq!(first.to_vec(), vec![7; 4]);
    let metrics = overlays.merge_metrics(COLONY, grid, None).unwrap();
    assert_eq!((metrics.full_merges, metrics.clean_reads), (1, 1));
}

#[test]
fn mark_all_matches_a_fresh_full_compute() {
    let (terrain, table) = const_source(SourceKind::TerrainHazard, 16, 0);
    let (zone, _) = const_source(SourceKind::Zone(COLONY), 16, 2);
    let (mut overlays, grid, world) = custom(square(4), vec![boxed(terrain), boxed(zone)]);
    overlays.get_merged_grid(COLONY, grid, None).unwrap();

    for cell in 0..16 {
        table.set(cell, (cell * 3) as Cost);
    }
    overlays
        .all_changed(grid, MutationKind::TerrainChanged)
        .unwrap();
    overlays
        .cell_changed(grid, MutationKind::TerrainChanged, 2)
        .unwrap();
    overlays.update_incrementally(grid, &world, &[]).unwrap();
    let incremental = overlays.get_merged_grid(COLONY, grid, None).unwrap().to_vec();

    let (fresh_terrain, fresh_table) = const_source(SourceKind::TerrainHazard, 16, 0);
    for cell in 0..16 {
        fresh_table.set(cell, table.get(cell));
    }
    let (fresh_zone, _) = const_source(SourceKind::Zone(COLONY), 16, 2);
    let (mut fresh, fresh_grid, _) =
        custom(square(4), vec![boxed(fresh_terrain), boxed(fresh_zone)]);
    assert_eq!(
        incremental,
        fresh.get_merged_grid(COLONY, fresh_grid, None).unwrap().to_vec()
    );
}

// ── Cache identity ──────────────────────────────────────────────

#[test]
fn aggregators_are_cached_per_key() {
    let mut overlays = engine();
    let a = overlays.create_grid(square(2));
    let b = overlays.create_grid(square(2));
    let world = MockWorld::new(4);
    overlays.compute_all(a, &world).unwrap();
    overlays.compute_all(b, &world).unwrap();
    let overlay: Arc<dyn WrappedOverlay> = MockOverlay::new(4, 0);

    let first = overlays.get_merged_grid(COLONY, a, None).unwrap();
    assert!(overlays.get_merged_grid(COLONY, a, None).unwrap().ptr_eq(&first));
    assert_eq!(overlays.aggregator_count(), 1);

    overlays.get_merged_grid(FRIENDLY, a, None).unwrap();
    overlays.get_merged_grid(COLONY, b, None).unwrap();
    overlays.get_merged_grid(COLONY, a, Some(&overlay)).unwrap();
    overlays.get_merged_grid(COLONY, a, Some(&overlay)).unwrap();
    assert_eq!(overlays.aggregator_count(), 4);
}

// ── Disposal ────────────────────────────────────────────────────

#[test]
fn destroyed_grid_retires_outstanding_views() {
    let mut overlays = engine();
    let grid = overlays.create_grid(square(3));
    let mut world = MockWorld::new(9);
    world.set_filthy(4, true);
    overlays.compute_all(grid, &world).unwrap();
    let held = overlays.get_merged_grid(COLONY, grid, None).unwrap();
    let source_view = overlays
        .registry()
        .get(grid)
        .unwrap()
        .source(SourceKind::TerrainHazard)
        .unwrap()
        .grid();

    overlays.grid_instance_destroyed(grid).unwrap();

    assert!(held.is_retired());
    assert!(source_view.is_retired());
    // Stale views stay readable.
    assert_eq!(held.at(4), overlays.settings().dirty_cost);
    assert_eq!(overlays.aggregator_count(), 0);
    assert_eq!(
        overlays.get_merged_grid(COLONY, grid, None).unwrap_err(),
        OverlayError::UnknownGrid { handle: grid }
    );
}

#[test]
fn reused_slot_does_not_resurrect_old_handle() {
    let mut overlays = engine();
    let old = overlays.create_grid(square(2));
    overlays.grid_instance_destroyed(old).unwrap();
    let new = overlays.create_grid(square(2));
    assert_ne!(old, new);
    assert!(overlays.layout(old).is_err());
    assert!(overlays.layout(new).is_ok());
}

#[test]
fn grid_reset_evicts_only_wrapping_aggregators() {
    let mut overlays = engine();
    let grid = overlays.create_grid(square(2));
    overlays.compute_all(grid, &MockWorld::new(4)).unwrap();
    let overlay: Arc<dyn WrappedOverlay> = MockOverlay::new(4, 1);
    overlays.get_merged_grid(COLONY, grid, None).unwrap();
    overlays.get_merged_grid(COLONY, grid, Some(&overlay)).unwrap();
    overlays.get_merged_grid(FRIENDLY, grid, Some(&overlay)).unwrap();

    assert_eq!(overlays.grid_reset(grid).unwrap(), 2);
    assert_eq!(overlays.aggregator_count(), 1);
    let id = Some(overlay.overlay_id());
    assert!(overlays.merge_metrics(COLONY, grid, id).is_none());
    assert!(overlays.merge_metrics(COLONY, grid, None).is_some());
}

// ── Wrapped overlays ────────────────────────────────────────────

#[test]
fn wrapped_overlay_version_bump_triggers_full_merge() {
    let (terrain, _) = const_source(SourceKind::TerrainHazard, 4, 1);
    let (mut overlays, grid, _) = custom(square(2), vec![boxed(terrain)]);
    let mock = MockOverlay::new(4, 2);
    let overlay: Arc<dyn WrappedOverlay> = mock.clone();
    let id = Some(overlay.overlay_id());

    assert_eq!(
        overlays.get_merged_grid(COLONY, grid, Some(&overlay)).unwrap().to_vec(),
        vec![3; 4]
    );

    // Unversioned edits are invisible until the next version bump.
    mock.set_silently(0, 10);
    assert_eq!(
        overlays.get_merged_grid(COLONY, grid, Some(&overlay)).unwrap().at(0),
        3
    );
    mock.set(1, 20);
    let merged = overlays.get_merged_grid(COLONY, grid, Some(&overlay)).unwrap();
    assert_eq!(merged.to_vec(), vec![11, 21, 3, 3]);
    let metrics = overlays.merge_metrics(COLONY, grid, id).unwrap();
    assert_eq!((metrics.full_merges, metrics.clean_reads), (2, 1));
}

#[test]
fn short_wrapped_overlay_contributes_zero_past_its_end() {
    let (terrain, _) = const_source(SourceKind::TerrainHazard, 4, 1);
    let (mut overlays, grid, _) = custom(square(2), vec![boxed(terrain)]);
    let overlay: Arc<dyn WrappedOverlay> = MockOverlay::new(2, 5);
    let merged = overlays.get_merged_grid(COLONY, grid, Some(&overlay)).unwrap();
    assert_eq!(merged.to_vec(), vec![6, 6, 1, 1]);
}

// ── Settings ────────────────────────────────────────────────────

#[test]
fn knob_change_reconfigures_in_place() {
    let mut overlays = engine();
    let grid = overlays.create_grid(square(2));
    let mut world = MockWorld::new(4);
    world.set_filthy(1, true);
    overlays.compute_all(grid, &world).unwrap();
    let before = overlays.get_merged_grid(COLONY, grid, None).unwrap();

    let mut settings = overlays.settings().clone();
    settings.set(Knob::Dirty.key(), 33).unwrap();
    overlays.apply_settings(settings);
    overlays.update_incrementally(grid, &world, &[]).unwrap();
    let after = overlays.get_merged_grid(COLONY, grid, None).unwrap();

    assert!(after.ptr_eq(&before));
    assert_eq!(after.at(1), 33);
    assert_eq!(after.at(0), 0);
}

#[test]
fn disabling_a_knob_rebuilds_the_source_set() {
    let mut overlays = engine();
    let grid = overlays.create_grid(square(2));
    let mut world = MockWorld::new(4);
    world.set_filthy(1, true);
    world.set_weather(WeatherState {
        current_has_thought: true,
        ..WeatherState::CLEAR
    });
    overlays.compute_all(grid, &world).unwrap();
    let before = overlays.get_merged_grid(COLONY, grid, None).unwrap();
    let weather = overlays.settings().weather_cost;
    assert_eq!(before.at(0), weather);

    let settings = CostSettings {
        dirty_cost: 0,
        ..overlays.settings().clone()
    };
    overlays.apply_settings(settings);
    assert!(!overlays
        .registry()
        .get(grid)
        .unwrap()
        .kinds()
        .contains(&SourceKind::TerrainHazard));
    assert_eq!(overlays.aggregator_count(), 0);
    assert!(before.is_retired());

    overlays.update_incrementally(grid, &world, &[]).unwrap();
    let after = overlays.get_merged_grid(COLONY, grid, None).unwrap();
    assert_eq!(after.to_vec(), vec![weather; 4]);
}

#[test]
fn custom_sources_survive_settings_changes() {
    let (terrain, _) = const_source(SourceKind::TerrainHazard, 4, 1);
    let (mut overlays, grid, _) = custom(square(2), vec![boxed(terrain)]);
    overlays.apply_settings(CostSettings::disabled());
    assert_eq!(
        overlays.registry().get(grid).unwrap().kinds(),
        vec![SourceKind::TerrainHazard]
    );
}

// ── Weather polling ─────────────────────────────────────────────

#[test]
fn polling_picks_up_unnotified_weather() {
    let mut overlays = engine();
    let grid = overlays.create_grid(square(2));
    let mut world = MockWorld::new(4);
    world.set_roofed(3, true);
    overlays.compute_all(grid, &world).unwrap();
    assert!(overlays
        .get_merged_grid(COLONY, grid, None)
        .unwrap()
        .iter()
        .all(|c| c == 0));

    world.set_weather(WeatherState {
        move_speed_multiplier: 0.5,
        ..WeatherState::CLEAR
    });
    overlays.poll(grid, &world).unwrap();
    overlays.update_incrementally(grid, &world, &[]).unwrap();
    let w = overlays.settings().weather_cost;
    assert_eq!(
        overlays.get_merged_grid(COLONY, grid, None).unwrap().to_vec(),
        vec![w, w, w, 0]
    );
}

#[test]
fn polling_clears_weather_cost_computed_in_bad_weather() {
    let mut overlays = engine();
    let grid = overlays.create_grid(square(2));
    let mut world = MockWorld::new(4);
    world.set_weather(WeatherState {
        current_has_thought: true,
        ..WeatherState::CLEAR
    });
    overlays.compute_all(grid, &world).unwrap();
    let w = overlays.settings().weather_cost;
    assert_eq!(
        overlays.get_merged_grid(COLONY, grid, None).unwrap().to_vec(),
        vec![w; 4]
    );

    world.set_weather(WeatherState::CLEAR);
    overlays.poll(grid, &world).unwrap();
    overlays.update_incrementally(grid, &world, &[]).unwrap();
    assert_eq!(
        overlays.get_merged_grid(COLONY, grid, None).unwrap().to_vec(),
        vec![0; 4]
    );
}

#[test]
fn polling_clears_weather_cost_after_notified_change() {
    let mut overlays = engine();
    let grid = overlays.create_grid(square(2));
    let mut world = MockWorld::new(4);
    overlays.compute_all(grid, &world).unwrap();

    world.set_weather(WeatherState {
        current_has_thought: true,
        ..WeatherState::CLEAR
    });
    overlays
        .all_changed(grid, MutationKind::WeatherChanged)
        .unwrap();
    overlays.update_incrementally(grid, &world, &[]).unwrap();
    let w = overlays.settings().weather_cost;
    assert_eq!(
        overlays.get_merged_grid(COLONY, grid, None).unwrap().to_vec(),
        vec![w; 4]
    );

    world.set_weather(WeatherState::CLEAR);
    overlays.poll(grid, &world).unwrap();
    overlays.update_incrementally(grid, &world, &[]).unwrap();
    assert_eq!(
        overlays.get_merged_grid(COLONY, grid, None).unwrap().to_vec(),
        vec![0; 4]
    );
}

// ── Parallel compute ────────────────────────────────────────────

#[test]
fn parallel_compute_matches_sequential() {
    let mut world = MockWorld::new(16);
    for cell in (0..16).step_by(3) {
        world.set_filthy(cell, true);
        world.set_roofed(cell, true);
    }
    world.set_weather(WeatherState {
        current_has_thought: true,
        ..WeatherState::CLEAR
    });

    let mut sequential = engine();
    let a = sequential.create_grid(square(4));
    sequential.compute_all(a, &world).unwrap();

    let mut parallel = engine();
    let b = parallel.create_grid(square(4));
    parallel.compute_all_parallel(b, &world).unwrap();

    for category in TraversalCategory::ALL {
        assert_eq!(
            sequential.get_merged_grid(category, a, None).unwrap().to_vec(),
            parallel.get_merged_grid(category, b, None).unwrap().to_vec()
        );
    }
}

// ── Notification inbox ──────────────────────────────────────────

#[test]
fn notifications_from_other_threads_are_routed_on_drain() {
    let (terrain, table) = const_source(SourceKind::TerrainHazard, 4, 0);
    let (mut overlays, grid, world) = custom(square(2), vec![boxed(terrain)]);
    let notifier = overlays.notifier();

    table.set(2, 9);
    std::thread::spawn(move || notifier.cell_changed(grid, MutationKind::TerrainChanged, 2))
        .join()
        .unwrap();

    let report = overlays.drain_notifications();
    assert_eq!((report.routed, report.stale, report.overflowed), (1, 0, false));
    overlays.update_incrementally(grid, &world, &[]).unwrap();
    assert_eq!(overlays.get_merged_grid(COLONY, grid, None).unwrap().at(2), 9);
}

#[test]
fn notifications_for_destroyed_grids_are_dropped() {
    let mut overlays = engine();
    let grid = overlays.create_grid(square(2));
    let notifier = overlays.notifier();
    overlays.grid_instance_destroyed(grid).unwrap();
    notifier.all_changed(grid, MutationKind::TopologyChanged);
    let report = overlays.drain_notifications();
    assert_eq!((report.routed, report.stale), (0, 1));
}

#[test]
fn inbox_overflow_dirties_every_grid() {
    let config = EngineConfig {
        notification_capacity: 1,
        ..EngineConfig::default()
    };
    let mut overlays = CostOverlays::new(config).unwrap();
    let table = CostTable::new(4, 0);
    let source = waycost_test_utils::table_source(SourceKind::TerrainHazard, Arc::clone(&table), 8);
    let grid = overlays.create_grid_with_sources(square(2), vec![boxed(source)]);
    let world = MockWorld::new(4);
    overlays.compute_all(grid, &world).unwrap();

    // Cell 3 changes, but the notification describing it is lost.
    table.set(3, 4);
    let notifier = overlays.notifier();
    notifier.cell_changed(grid, MutationKind::TerrainChanged, 0);
    notifier.cell_changed(grid, MutationKind::TerrainChanged, 3);

    let report = overlays.drain_notifications();
    assert!(report.overflowed);
    assert_eq!(report.routed, 1);
    overlays.update_incrementally(grid, &world, &[]).unwrap();
    assert_eq!(
        overlays.get_merged_grid(COLONY, grid, None).unwrap().to_vec(),
        vec![0, 0, 0, 4]
    );
    assert!(!overlays.drain_notifications().overflowed);
}
