//! Default species table.

use super::types::{FishRarity, FishSpecies};

/// (name, rarity, base_points, difficulty, escape_rate, min_size, max_size, sale_value)
type SpeciesRow = (&'static str, FishRarity, u32, f64, f64, f64, f64, u64);

const SPECIES_TABLE: [SpeciesRow; 12] = [
    // Common
    ("Bluegill", FishRarity::Common, 10, 0.10, 0.8, 4.0, 10.0, 5),
    ("Sunfish", FishRarity::Common, 10, 0.12, 0.8, 3.0, 8.0, 5),
    ("Perch", FishRarity::Common, 12, 0.15, 0.9, 5.0, 12.0, 6),
    ("Carp", FishRarity::Common, 15, 0.25, 1.0, 12.0, 30.0, 8),
    // Uncommon
    ("Largemouth Bass", FishRarity::Uncommon, 25, 0.35, 1.1, 10.0, 24.0, 15),
    ("Rainbow Trout", FishRarity::Uncommon, 25, 0.40, 1.2, 8.0, 20.0, 16),
    ("Catfish", FishRarity::Uncommon, 30, 0.45, 1.2, 12.0, 40.0, 18),
    // Rare
    ("Northern Pike", FishRarity::Rare, 50, 0.60, 1.4, 18.0, 40.0, 40),
    ("Salmon", FishRarity::Rare, 55, 0.65, 1.5, 20.0, 36.0, 45),
    ("Sturgeon", FishRarity::Rare, 60, 0.70, 1.5, 30.0, 60.0, 50),
    // Legendary
    ("Ghost Koi", FishRarity::Legendary, 120, 0.90, 1.7, 18.0, 36.0, 180),
    ("Golden Marlin", FishRarity::Legendary, 150, 0.95, 1.8, 60.0, 120.0, 200),
];

pub fn default_species() -> Vec<FishSpecies> {
    SPECIES_TABLE
        .iter()
        .map(
            |&(name, rarity, base_points, difficulty, escape_rate, min_size, max_size, sale_value)| {
                FishSpecies {
                    name: name.to_string(),
                    rarity,
                    base_points,
                    difficulty,
                    escape_rate,
                    min_size,
                    max_size,
                    sale_value,
                }
            },
        )
        .collect()
}
