//! Catalog-built sources against a mutable world: per-cell edits reported
//! through `mark_cell` converge to a fresh full compute.

use proptest::prelude::*;
use waycost_core::{AvoidLevel, CostSettings, DoorPriority, TraversalCategory, ZoneKind};
use waycost_source::{CostSource, SourceKind};
use waycost_sources::{build_sources, enabled_kinds, instantiate};
use waycost_test_utils::MockWorld;

const CELLS: usize = 20;

#[derive(Clone, Debug)]
enum Edit {
    Filth(usize, bool),
    Door(usize, u8),
    Zone(usize, bool),
    Area(usize, bool),
    Roof(usize, bool),
}

impl Edit {
    fn cell(&self) -> usize {
        match *self {
            Edit::Filth(c, _) | Edit::Door(c, _) | Edit::Zone(c, _) => c,
            Edit::Area(c, _) | Edit::Roof(c, _) => c,
        }
    }

    fn apply(&self, world: &mut MockWorld) {
        match *self {
            Edit::Filth(c, f) => world.set_filthy(c, f),
            Edit::Door(c, raw) => world.set_door(c, DoorPriority::try_from(raw).ok()),
            Edit::Zone(c, g) => world.set_zone(c, g.then_some(ZoneKind::Growing)),
            Edit::Area(c, inside) => world.set_area_cell(AvoidLevel::Medium, c, inside),
            Edit::Roof(c, r) => world.set_roofed(c, r),
        }
    }
}

fn edit() -> impl Strategy<Value = Edit> {
    let cell = 0..CELLS;
    prop_oneof![
        (cell.clone(), any::<bool>()).prop_map(|(c, f)| Edit::Filth(c, f)),
        // 3 is not a priority and clears the door.
        (cell.clone(), 0u8..4).prop_map(|(c, d)| Edit::Door(c, d)),
        (cell.clone(), any::<bool>()).prop_map(|(c, g)| Edit::Zone(c, g)),
        (cell.clone(), any::<bool>()).prop_map(|(c, i)| Edit::Area(c, i)),
        (cell, any::<bool>()).prop_map(|(c, r)| Edit::Roof(c, r)),
    ]
}

fn base_world() -> MockWorld {
    let mut world = MockWorld::new(CELLS);
    world.create_area(AvoidLevel::Medium);
    world.set_weather(waycost_core::WeatherState {
        current_has_thought: true,
        ..waycost_core::WeatherState::CLEAR
    });
    world
}

proptest! {
    #[test]
    fn marked_edits_converge_to_full_compute(
        batches in prop::collection::vec(prop::collection::vec(edit(), 0..6), 0..8)
    ) {
        let settings = CostSettings::default();
        let mut world = base_world();
        let mut sources = build_sources(&settings, CELLS, 4);
        for source in &mut sources {
            source.compute_all(&world);
        }

        for batch in &batches {
            for e in batch {
                e.apply(&mut world);
                for source in &mut sources {
                    source.mark_cell(e.cell());
                }
            }
            for source in &mut sources {
                source.update_incrementally(&world, &[]);
            }
        }

        for source in &sources {
            let mut fresh = instantiate(source.kind(), &settings, CELLS, 4);
            fresh.compute_all(&world);
            prop_assert_eq!(source.grid().to_vec(), fresh.grid().to_vec(), "{}", source.kind());
        }
    }
}

#[test]
fn disabled_settings_build_nothing() {
    assert!(build_sources(&CostSettings::disabled(), CELLS, 4).is_empty());
}

#[test]
fn each_zone_source_serves_only_its_category() {
    let settings = CostSettings {
        growing_zone_cost_friendly: 0,
        ..CostSettings::default()
    };
    let kinds = enabled_kinds(&settings);
    assert!(kinds.contains(&SourceKind::Zone(TraversalCategory::Colony)));
    assert!(!kinds.contains(&SourceKind::Zone(TraversalCategory::Friendly)));

    let mut world = MockWorld::new(2);
    world.set_zone(1, Some(ZoneKind::Growing));
    let mut zone = instantiate(SourceKind::Zone(TraversalCategory::Colony), &settings, 2, 4);
    zone.compute_all(&world);
    assert_eq!(zone.grid().to_vec(), vec![0, settings.growing_zone_cost_colony]);
    assert!(zone.kind().serves(TraversalCategory::Colony));
    assert!(!zone.kind().serves(TraversalCategory::Friendly));
}

#[test]
fn reconfigure_then_mark_all_applies_new_knobs() {
    let mut world = MockWorld::new(3);
    world.set_door(0, Some(DoorPriority::Side));
    world.set_door(2, Some(DoorPriority::Emergency));
    let mut source = instantiate(SourceKind::Obstacle, &CostSettings::default(), 3, 4);
    source.compute_all(&world);
    assert_eq!(source.grid().to_vec(), vec![200, 0, 500]);

    let settings = CostSettings {
        side_door_cost: 1,
        emergency_door_cost: 2,
        ..CostSettings::default()
    };
    source.reconfigure(&settings);
    source.mark_all();
    source.update_incrementally(&world, &[]);
    assert_eq!(source.grid().to_vec(), vec![1, 0, 2]);
}
