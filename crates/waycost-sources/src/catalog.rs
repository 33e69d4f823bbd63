//! Which contributors a grid instance gets, and how they are built.

use log::debug;
use waycost_core::{CostSettings, TraversalCategory};
use waycost_source::{CostSource, RuleSource, SourceKind};

use crate::{
    AvoidAreaRule, EnclosedSpaceRule, ObstacleRule, TerrainHazardRule, WeatherRule, ZoneRule,
};

/// Kinds switched on by `settings`, in canonical build order.
pub fn enabled_kinds(settings: &CostSettings) -> Vec<SourceKind> {
    SourceKind::CANONICAL
        .into_iter()
        .filter(|k| k.is_enabled(settings))
        .collect()
}

/// Build one source of `kind` for a grid of `cell_count` cells.
///
/// The source starts uninitialized; its first update is a full compute.
///
/// # Panics
///
/// Panics for `SourceKind::Zone(TraversalCategory::None)`, which no
/// settings can enable.
pub fn instantiate(
    kind: SourceKind,
    settings: &CostSettings,
    cell_count: usize,
    journal_capacity: usize,
) -> Box<dyn CostSource> {
    let n = cell_count;
    let cap = journal_capacity;
    match kind {
        SourceKind::TerrainHazard => {
            Box::new(RuleSource::new(TerrainHazardRule::new(settings), n, cap))
        }
        SourceKind::Obstacle => Box::new(RuleSource::new(ObstacleRule::new(settings), n, cap)),
        SourceKind::Zone(TraversalCategory::None) => {
            panic!("no zone source exists for traversal category none")
        }
        SourceKind::Zone(category) => {
            Box::new(RuleSource::new(ZoneRule::new(category, settings), n, cap))
        }
        SourceKind::AvoidArea => Box::new(RuleSource::new(AvoidAreaRule::new(settings), n, cap)),
        SourceKind::EnclosedSpace => {
            Box::new(RuleSource::new(EnclosedSpaceRule::new(settings), n, cap))
        }
        SourceKind::Weather => Box::new(RuleSource::new(WeatherRule::new(settings), n, cap)),
    }
}

/// Build every enabled source for a grid of `cell_count` cells.
pub fn build_sources(
    settings: &CostSettings,
    cell_count: usize,
    journal_capacity: usize,
) -> Vec<Box<dyn CostSource>> {
    let kinds = enabled_kinds(settings);
    debug!("building {} cost sources for {cell_count} cells", kinds.len());
    kinds
        .into_iter()
        .map(|k| instantiate(k, settings, cell_count, journal_capacity))
        .collect()
}
