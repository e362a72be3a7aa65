//! Fish species, caught-fish instances, and the species catalog.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Rarity tiers, ordered from most to least common.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FishRarity {
    Common = 0,
    Uncommon = 1,
    Rare = 2,
    Legendary = 3,
}

impl FishRarity {
    pub const ALL: [FishRarity; 4] = [
        FishRarity::Common,
        FishRarity::Uncommon,
        FishRarity::Rare,
        FishRarity::Legendary,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FishRarity::Common => "Common",
            FishRarity::Uncommon => "Uncommon",
            FishRarity::Rare => "Rare",
            FishRarity::Legendary => "Legendary",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Static description of a fish species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FishSpecies {
    pub name: String,
    pub rarity: FishRarity,
    pub base_points: u32,
    /// 0.0 (docile) to 1.0 (fighter); reduces reel power per tap
    pub difficulty: f64,
    /// Scales reel progress lost per decay tick
    pub escape_rate: f64,
    pub min_size: f64,
    pub max_size: f64,
    pub sale_value: u64,
}

/// A single fish drawn from a species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FishInstance {
    pub id: String,
    pub species: String,
    pub rarity: FishRarity,
    pub size_inches: f64,
    pub base_points: u32,
    pub difficulty: f64,
    pub escape_rate: f64,
    pub sale_value: u64,
    /// Unix timestamp, set once the fish is landed
    #[serde(default)]
    pub caught_at: Option<i64>,
}

/// Immutable species table injected into the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FishCatalog {
    species: Vec<FishSpecies>,
}

impl FishSpecies {
    /// Finite sizes with `0 <= min_size <= max_size`, difficulty in [0, 1],
    /// and a finite non-negative escape rate.
    pub fn is_valid(&self) -> bool {
        self.min_size.is_finite()
            && self.max_size.is_finite()
            && self.min_size >= 0.0
            && self.min_size <= self.max_size
            && (0.0..=1.0).contains(&self.difficulty)
            && self.escape_rate.is_finite()
            && self.escape_rate >= 0.0
    }
}

impl FishCatalog {
    /// Builds a catalog. Returns `None` for an empty species list or when any
    /// species fails `FishSpecies::is_valid`.
    pub fn new(species: Vec<FishSpecies>) -> Option<Self> {
        if species.is_empty() {
            return None;
        }
        if let Some(bad) = species.iter().find(|s| !s.is_valid()) {
            warn!(species = %bad.name, "rejecting catalog with invalid species");
            return None;
        }
        Some(Self { species })
    }

    pub fn species(&self) -> &[FishSpecies] {
        &self.species
    }

    pub fn find(&self, name: &str) -> Option<&FishSpecies> {
        self.species.iter().find(|s| s.name == name)
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }
}

impl Default for FishCatalog {
    fn default() -> Self {
        Self {
            species: super::data::default_species(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_ordering() {
        assert!(FishRarity::Common < FishRarity::Uncommon);
        assert!(FishRarity::Uncommon < FishRarity::Rare);
        assert!(FishRarity::Rare < FishRarity::Legendary);
    }

    #[test]
    fn test_rarity_index_matches_all_order() {
        for (i, rarity) in FishRarity::ALL.iter().enumerate() {
            assert_eq!(rarity.index(), i);
        }
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(FishCatalog::new(Vec::new()).is_none());
    }

    #[test]
    fn test_invalid_species_rejected() {
        let bluegill = FishCatalog::default().find("Bluegill").unwrap().clone();
        assert!(FishCatalog::new(vec![bluegill.clone()]).is_some());

        let inverted = FishSpecies {
            min_size: 10.0,
            max_size: 4.0,
            ..bluegill.clone()
        };
        let nan_size = FishSpecies {
            max_size: f64::NAN,
            ..bluegill.clone()
        };
        let nan_difficulty = FishSpecies {
            difficulty: f64::NAN,
            ..bluegill.clone()
        };
        let negative_escape = FishSpecies {
            escape_rate: -0.5,
            ..bluegill.clone()
        };
        for bad in [inverted, nan_size, nan_difficulty, negative_escape] {
            assert!(!bad.is_valid());
            assert!(FishCatalog::new(vec![bluegill.clone(), bad]).is_none());
        }
    }

    #[test]
    fn test_find_species_by_name() {
        let catalog = FishCatalog::default();
        let bluegill = catalog.find("Bluegill").expect("Bluegill in default catalog");
        assert_eq!(bluegill.rarity, FishRarity::Common);
        assert!(catalog.find("Kraken").is_none());
    }
}
