//! The [`Cost`] value type and its saturating arithmetic.
//!
//! Costs are additive extra path costs on top of the host's base movement
//! model. Combination saturates at [`MAX_COST`] instead of wrapping, which
//! keeps every sum independent of summation order.

/// Extra movement cost for one cell. Zero means "no extra cost".
pub type Cost = u16;

/// Largest representable cost; every saturating sum is clamped here.
pub const MAX_COST: Cost = Cost::MAX;

/// Sum a sequence of costs, saturating at [`MAX_COST`].
///
/// ```
/// use waycost_core::{saturating_sum, MAX_COST};
///
/// assert_eq!(saturating_sum([10, 20, 30]), 60);
/// assert_eq!(saturating_sum([40_000, 40_000]), MAX_COST);
/// assert_eq!(saturating_sum(std::iter::empty()), 0);
/// ```
pub fn saturating_sum<I>(costs: I) -> Cost
where
    I: IntoIterator<Item = Cost>,
{
    costs.into_iter().fold(0, Cost::saturating_add)
}
