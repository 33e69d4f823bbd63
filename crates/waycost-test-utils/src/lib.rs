//! Test utilities and mock types for waycost development.
//!
//! Provides [`MockWorld`], a `Vec`-backed [`WorldView`] with setters for
//! every datum the contributors read, plus the cost-source and overlay
//! fixtures in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{const_source, table_source, CostTable, MockOverlay, TableRule, TableSource};

use waycost_core::{
    AvoidLevel, CellIndex, DoorPriority, RoomInfo, TerrainInfo, WeatherState, WorldView, ZoneKind,
};

/// Mutable in-memory world state for one grid instance.
///
/// Every per-cell datum defaults to "absent". Avoidance areas do not exist
/// until [`create_area`](MockWorld::create_area) is called.
#[derive(Clone, Debug)]
pub struct MockWorld {
    cell_count: usize,
    terrain: Vec<Option<TerrainInfo>>,
    doors: Vec<Option<DoorPriority>>,
    zones: Vec<Option<ZoneKind>>,
    areas: [Option<Vec<bool>>; 3],
    rooms: Vec<Option<RoomInfo>>,
    roofed: Vec<bool>,
    weather: WeatherState,
}

fn level_slot(level: AvoidLevel) -> usize {
    match level {
        AvoidLevel::Low => 0,
        AvoidLevel::Medium => 1,
        AvoidLevel::High => 2,
    }
}

impl MockWorld {
    pub fn new(cell_count: usize) -> Self {
        Self {
            cell_count,
            terrain: vec![None; cell_count],
            doors: vec![None; cell_count],
            zones: vec![None; cell_count],
            areas: [None, None, None],
            rooms: vec![None; cell_count],
            roofed: vec![false; cell_count],
            weather: WeatherState::CLEAR,
        }
    }

    pub fn set_terrain(&mut self, cell: CellIndex, terrain: Option<TerrainInfo>) {
        self.terrain[cell] = terrain;
    }

    /// Shorthand for defined terrain with the given filth flag.
    pub fn set_filthy(&mut self, cell: CellIndex, generates_filth: bool) {
        self.set_terrain(cell, Some(TerrainInfo { generates_filth }));
    }

    pub fn set_door(&mut self, cell: CellIndex, door: Option<DoorPriority>) {
        self.doors[cell] = door;
    }

    pub fn set_zone(&mut self, cell: CellIndex, zone: Option<ZoneKind>) {
        self.zones[cell] = zone;
    }

    /// Create an empty area for `level`. No-op if it exists.
    pub fn create_area(&mut self, level: AvoidLevel) {
        let n = self.cell_count;
        self.areas[level_slot(level)].get_or_insert_with(|| vec![false; n]);
    }

    pub fn has_area(&self, level: AvoidLevel) -> bool {
        self.areas[level_slot(level)].is_some()
    }

    pub fn delete_area(&mut self, level: AvoidLevel) {
        self.areas[level_slot(level)] = None;
    }

    /// Invert membership of every cell of an existing area.
    pub fn invert_area(&mut self, level: AvoidLevel) {
        if let Some(cells) = &mut self.areas[level_slot(level)] {
            for c in cells.iter_mut() {
                *c = !*c;
            }
        }
    }

    /// Paint or erase a cell. Ignored if the area does not exist.
    pub fn set_area_cell(&mut self, level: AvoidLevel, cell: CellIndex, inside: bool) {
        if let Some(cells) = &mut self.areas[level_slot(level)] {
            cells[cell] = inside;
        }
    }

    pub fn set_room(&mut self, cell: CellIndex, room: Option<RoomInfo>) {
        self.rooms[cell] = room;
    }

    pub fn set_roofed(&mut self, cell: CellIndex, roofed: bool) {
        self.roofed[cell] = roofed;
    }

    pub fn set_weather(&mut self, weather: WeatherState) {
        self.weather = weather;
    }
}

impl WorldView for MockWorld {
    fn cell_count(&self) -> usize {
        self.cell_count
    }

    fn terrain_at(&self, cell: CellIndex) -> Option<TerrainInfo> {
        self.terrain.get(cell).copied().flatten()
    }

    fn door_at(&self, cell: CellIndex) -> Option<DoorPriority> {
        self.doors.get(cell).copied().flatten()
    }

    fn zone_at(&self, cell: CellIndex) -> Option<ZoneKind> {
        self.zones.get(cell).copied().flatten()
    }

    fn in_avoid_area(&self, level: AvoidLevel, cell: CellIndex) -> bool {
        self.areas[level_slot(level)]
            .as_ref()
            .and_then(|cells| cells.get(cell).copied())
            .unwrap_or(false)
    }

    fn room_at(&self, cell: CellIndex) -> Option<RoomInfo> {
        self.rooms.get(cell).copied().flatten()
    }

    fn weather(&self) -> WeatherState {
        self.weather
    }

    fn is_roofed(&self, cell: CellIndex) -> bool {
        self.roofed.get(cell).copied().unwrap_or(false)
    }
}
