//! XP requirements per level.

/// Cumulative XP needed to reach each level. Index 0 is level 1.
pub const LEVEL_REQUIREMENTS: [u64; 20] = [
    0, 100, 250, 450, 700, 1_000, 1_400, 1_900, 2_500, 3_200, 4_000, 5_000, 6_200, 7_600, 9_200,
    11_000, 13_000, 15_500, 18_500, 22_000,
];

pub const MAX_LEVEL: u32 = LEVEL_REQUIREMENTS.len() as u32;

/// Highest level whose requirement `xp` meets.
pub fn level_for_xp(xp: u64) -> u32 {
    LEVEL_REQUIREMENTS.iter().filter(|&&req| xp >= req).count() as u32
}

/// Cumulative XP required for `level`, or `None` beyond the table.
pub fn xp_for_level(level: u32) -> Option<u64> {
    let index = level.checked_sub(1)? as usize;
    LEVEL_REQUIREMENTS.get(index).copied()
}

/// XP still needed to reach the next level, or `None` at max level.
pub fn xp_to_next_level(xp: u64) -> Option<u64> {
    let next = xp_for_level(level_for_xp(xp) + 1)?;
    Some(next.saturating_sub(xp))
}
