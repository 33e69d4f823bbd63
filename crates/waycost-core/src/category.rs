//! Traversal categories: which avoidance policy a path request follows.

use std::fmt;

use crate::error::CostError;

/// Classification of a path request that decides which cost policy applies.
///
/// The category is part of every aggregator cache key, so two requests
/// with different avoidance policies never share a merged cost grid.
/// Mapping an inbound request to a category is the integration layer's
/// job; this crate only consumes the result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TraversalCategory {
    /// No extra costs apply (animals, raiders, drafted pawns, ...).
    None,
    /// Colony members following house rules.
    Colony,
    /// Visitors such as trade caravans.
    Friendly,
}

impl TraversalCategory {
    /// Number of categories.
    pub const COUNT: usize = 3;

    /// All categories in discriminant order.
    pub const ALL: [TraversalCategory; Self::COUNT] = [Self::None, Self::Colony, Self::Friendly];

    /// Dense index in `0..COUNT`, suitable for per-category tables.
    pub fn index(self) -> usize {
        match self {
            Self::None => 0,
            Self::Colony => 1,
            Self::Friendly => 2,
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Colony => "colony",
            Self::Friendly => "friendly",
        }
    }
}

impl fmt::Display for TraversalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for TraversalCategory {
    type Error = CostError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or(CostError::UnknownCategory { value })
    }
}
