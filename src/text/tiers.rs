//! Content-length size tiers for the long-form styles.
//!
//! Each table is sorted by descending threshold; the first row whose threshold the text length
//! exceeds wins, and the final row (threshold 0) catches everything else, including empty text.

/// One row of a tier table, in reference pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SizeTier {
    /// Applies when the character count is strictly greater than this.
    pub min_exclusive_len: usize,
    /// Font size.
    pub size: u32,
    /// Line height.
    pub line_height: u32,
}

const fn tier(min_exclusive_len: usize, size: u32, line_height: u32) -> SizeTier {
    SizeTier {
        min_exclusive_len,
        size,
        line_height,
    }
}

/// Verse excerpt tiers.
pub const VERSE_TIERS: &[SizeTier] = &[
    tier(300, 17, 24),
    tier(200, 19, 27),
    tier(100, 21, 29),
    tier(0, 22, 30),
];

/// Full narrative tiers.
pub const NARRATIVE_TIERS: &[SizeTier] = &[
    tier(1200, 14, 19),
    tier(1000, 15, 21),
    tier(800, 16, 22),
    tier(600, 17, 24),
    tier(400, 18, 25),
    tier(200, 19, 26),
    tier(0, 20, 28),
];

/// Pick the tier for a text of `len` characters.
pub fn select_tier(table: &[SizeTier], len: usize) -> SizeTier {
    table
        .iter()
        .copied()
        .find(|t| len > t.min_exclusive_len)
        .or_else(|| table.last().copied())
        .unwrap_or(tier(0, 20, 28))
}

#[cfg(test)]
#[path = "../../tests/unit/text/tiers.rs"]
mod tests;
