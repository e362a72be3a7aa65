//! Fish selection.
//!
//! Each species carries its tier's base weight. The level-derived rarity bias
//! scales those weights multiplicatively before a cumulative-weight roulette
//! picks the species.

use super::difficulty::level_to_difficulty;
use super::types::{FishCatalog, FishInstance, FishRarity, FishSpecies};
use crate::core::constants::{RARITY_BASE_WEIGHTS, RARITY_BIAS_FACTORS, RARITY_WEIGHT_FLOOR};
use rand::Rng;

/// Base roulette weight for a rarity tier.
pub fn base_weight(rarity: FishRarity) -> f64 {
    RARITY_BASE_WEIGHTS[rarity.index()]
}

/// Tier weight after applying `bias`.
///
/// `adjusted = base * max(1 + bias * k_tier, RARITY_WEIGHT_FLOOR)`, so a
/// negative tier factor (Common) shrinks but never reaches zero.
pub fn adjusted_weight(rarity: FishRarity, bias: f64) -> f64 {
    let factor = 1.0 + bias.max(0.0) * RARITY_BIAS_FACTORS[rarity.index()];
    base_weight(rarity) * factor.max(RARITY_WEIGHT_FLOOR)
}

/// Probability of each tier for a catalog at a given bias (for display and tests).
pub fn rarity_odds(catalog: &FishCatalog, bias: f64) -> [f64; 4] {
    let mut totals = [0.0; 4];
    for species in catalog.species() {
        totals[species.rarity.index()] += adjusted_weight(species.rarity, bias);
    }
    let sum: f64 = totals.iter().sum();
    if sum > 0.0 {
        for t in totals.iter_mut() {
            *t /= sum;
        }
    }
    totals
}

/// Picks a species by roulette over adjusted weights.
pub fn pick_species<'a>(catalog: &'a FishCatalog, bias: f64, rng: &mut impl Rng) -> &'a FishSpecies {
    let species = catalog.species();
    let total: f64 = species
        .iter()
        .map(|s| adjusted_weight(s.rarity, bias))
        .sum();

    let roll: f64 = rng.gen_range(0.0..total);
    let mut cumulative = 0.0;
    for s in species {
        cumulative += adjusted_weight(s.rarity, bias);
        if roll < cumulative {
            return s;
        }
    }

    // Floating point slack at the very top of the range
    &species[species.len() - 1]
}

/// Samples a fish instance of the given species.
pub fn spawn_fish(species: &FishSpecies, rng: &mut impl Rng) -> FishInstance {
    let raw_size = if species.max_size > species.min_size {
        rng.gen_range(species.min_size..=species.max_size)
    } else {
        species.min_size
    };
    // Unchecked bounds must not panic
    let size_inches = ((raw_size * 10.0).round() / 10.0)
        .max(species.min_size)
        .min(species.max_size);

    let id = uuid::Builder::from_random_bytes(rng.gen())
        .into_uuid()
        .to_string();

    FishInstance {
        id,
        species: species.name.clone(),
        rarity: species.rarity,
        size_inches,
        base_points: species.base_points,
        difficulty: species.difficulty,
        escape_rate: species.escape_rate,
        sale_value: species.sale_value,
        caught_at: None,
    }
}

/// Picks a fish using an explicit rarity bias (level bias plus any environment bonus).
pub fn pick_fish_with_bias(catalog: &FishCatalog, bias: f64, rng: &mut impl Rng) -> FishInstance {
    let species = pick_species(catalog, bias, rng);
    spawn_fish(species, rng)
}

/// Picks a fish for a player of `level`.
pub fn pick_fish(catalog: &FishCatalog, level: u32, rng: &mut impl Rng) -> FishInstance {
    pick_fish_with_bias(catalog, level_to_difficulty(level).rarity_bias, rng)
}
