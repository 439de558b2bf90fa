//! Base stat total calculation.

/// Number of base stats every creature carries (HP, Atk, Def, SpA, SpD, Spe).
pub const STAT_COUNT: usize = 6;

/// Sum a creature's base stats.
///
/// The upstream data always has [`STAT_COUNT`] entries; other lengths are
/// summed as given. The sum saturates at `u32::MAX` instead of overflowing.
pub fn base_stat_total(values: &[u32]) -> u32 {
    values.iter().fold(0u32, |acc, v| acc.saturating_add(*v))
}
