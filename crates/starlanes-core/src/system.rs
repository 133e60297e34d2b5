//! Procedural star system generation.
//!
//! Systems are never stored before discovery: their static properties are a
//! pure function of the galaxy seed and the coordinate, so the generator can
//! be re-run at any time to "peek" at undiscovered space. Discovery is peek
//! plus persistence, and persistence belongs to the caller.
//!
//! All randomized choices draw from a single coordinate-keyed stream in a
//! fixed, documented order: star type, name, planet count, hazard level,
//! per-planet minerals, base prices. Changing that order is a compatibility
//! break.

use crate::coord::Coordinate;
use crate::rng::SeededRng;
use crate::types::{AbundanceTier, Cents, Commodity, StarType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration for system generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SystemGenConfig {
    /// Galaxy seed; part of every coordinate hash.
    pub seed: String,
    /// The fixed tutorial-zone coordinate that bypasses generation.
    pub cradle: Coordinate,
    /// Minimum planets per system.
    pub min_planets: u32,
    /// Maximum planets per system.
    pub max_planets: u32,
    /// Maximum randomly-rolled hazard before the star bonus (0-100 scale).
    pub base_hazard_cap: u32,
    /// Base price jitter as a fraction (0.2 = prices vary +/-20%).
    pub price_jitter: f32,
}

impl Default for SystemGenConfig {
    fn default() -> Self {
        Self {
            seed: "starlanes".to_string(),
            cradle: Coordinate::new(0, 0, 0),
            min_planets: 1,
            max_planets: 8,
            base_hazard_cap: 50,
            price_jitter: 0.2,
        }
    }
}

/// Mineral layout of a single planet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanetMinerals {
    /// Minerals present on this planet.
    pub minerals: Vec<Commodity>,
    /// How plentiful those minerals are.
    pub abundance: AbundanceTier,
}

/// Static properties of a star system.
///
/// Immutable after creation; regenerating from the same seed and coordinate
/// yields an identical record, which callers rely on for peek semantics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SystemProperties {
    /// Location, which is also the system's identity.
    pub coordinate: Coordinate,
    /// Generated display name.
    pub name: String,
    /// Classification of the primary star.
    pub star_type: StarType,
    /// Number of planets (within the configured range).
    pub planet_count: u32,
    /// Hazard level, 0-100.
    pub hazard_level: u32,
    /// Planet index -> mineral layout. BTreeMap keeps iteration deterministic.
    pub mineral_distribution: BTreeMap<u32, PlanetMinerals>,
    /// Per-commodity base prices in cents.
    pub base_prices: BTreeMap<Commodity, Cents>,
}

impl SystemProperties {
    /// The best (most plentiful) abundance tier for a commodity across all
    /// planets, or `None` when the commodity is absent from the system.
    pub fn abundance_of(&self, commodity: Commodity) -> Option<AbundanceTier> {
        self.mineral_distribution
            .values()
            .filter(|planet| planet.minerals.contains(&commodity))
            .map(|planet| planet.abundance)
            .min()
    }

    /// Base price for a commodity, if the system trades it.
    pub fn base_price(&self, commodity: Commodity) -> Option<Cents> {
        self.base_prices.get(&commodity).copied()
    }
}

/// Generates star systems from a galaxy seed.
pub struct SystemGenerator {
    config: SystemGenConfig,
}

// Name syllables; paired draws keep names pronounceable.
const NAME_ONSETS: &[&str] = &[
    "Vel", "Tar", "Kes", "Ori", "Zan", "Hel", "Myr", "Dra", "Ena", "Sol", "Qir", "Lum",
];
const NAME_MIDDLES: &[&str] = &[
    "a", "e", "i", "o", "u", "ath", "en", "or", "ys", "ara",
];
const NAME_CODAS: &[&str] = &[
    "prime", "minor", "reach", "gate", "fall", "haven", "spire", "drift",
];

impl SystemGenerator {
    /// Create a generator with the given configuration.
    pub fn new(config: SystemGenConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SystemGenConfig {
        &self.config
    }

    /// Generate the system at a coordinate.
    ///
    /// Pure: identical seed and coordinate always produce an identical
    /// record. The cradle coordinate returns the fixed tutorial record
    /// without touching the RNG.
    pub fn generate(&self, coord: Coordinate) -> SystemProperties {
        if coord == self.config.cradle {
            return self.cradle_properties();
        }

        let mut rng = SeededRng::for_coordinate(&self.config.seed, &coord).derive("system");

        // Draw order is fixed: star, name, planets, hazard, minerals, prices.
        let star_type = StarType::all()[rng.pick_weighted(StarType::weights())];
        let name = self.generate_name(&mut rng);
        let planet_count =
            rng.next_range_inclusive(self.config.min_planets, self.config.max_planets);
        let hazard_level =
            (rng.next_range_inclusive(0, self.config.base_hazard_cap) + star_type.hazard_bonus())
                .min(100);

        let mineral_distribution = self.generate_minerals(&mut rng, planet_count);
        let base_prices = self.generate_base_prices(&mut rng);

        SystemProperties {
            coordinate: coord,
            name,
            star_type,
            planet_count,
            hazard_level,
            mineral_distribution,
            base_prices,
        }
    }

    /// Alias for [`SystemGenerator::generate`] making peek semantics
    /// explicit at call sites: peeking never has side effects, and
    /// discovery is peek plus persistence by the caller.
    pub fn peek(&self, coord: Coordinate) -> SystemProperties {
        self.generate(coord)
    }

    /// The fixed, non-procedural origin system.
    pub fn cradle_properties(&self) -> SystemProperties {
        let mut mineral_distribution = BTreeMap::new();
        mineral_distribution.insert(
            0,
            PlanetMinerals {
                minerals: vec![Commodity::Iron, Commodity::Silicates],
                abundance: AbundanceTier::VeryHigh,
            },
        );
        mineral_distribution.insert(
            1,
            PlanetMinerals {
                minerals: vec![Commodity::Copper, Commodity::WaterIce],
                abundance: AbundanceTier::High,
            },
        );
        mineral_distribution.insert(
            2,
            PlanetMinerals {
                minerals: vec![Commodity::Hydrocarbons],
                abundance: AbundanceTier::Medium,
            },
        );

        // The tutorial market trades everything at book value
        let base_prices = Commodity::all()
            .iter()
            .map(|c| (*c, c.base_price_cents()))
            .collect();

        SystemProperties {
            coordinate: self.config.cradle,
            name: "The Cradle".to_string(),
            star_type: StarType::YellowDwarf,
            planet_count: 3,
            hazard_level: 0,
            mineral_distribution,
            base_prices,
        }
    }

    fn generate_name(&self, rng: &mut SeededRng) -> String {
        let onset = NAME_ONSETS[rng.next_range(NAME_ONSETS.len() as u32) as usize];
        let middle = NAME_MIDDLES[rng.next_range(NAME_MIDDLES.len() as u32) as usize];
        // A third of systems get a coda word, the rest a numeric designation
        if rng.chance(0.33) {
            let coda = NAME_CODAS[rng.next_range(NAME_CODAS.len() as u32) as usize];
            format!("{}{} {}", onset, middle, capitalize(coda))
        } else {
            let designation = rng.next_range_inclusive(2, 9);
            format!("{}{}-{}", onset, middle, designation)
        }
    }

    fn generate_minerals(
        &self,
        rng: &mut SeededRng,
        planet_count: u32,
    ) -> BTreeMap<u32, PlanetMinerals> {
        let mut distribution = BTreeMap::new();
        // Medium is the common case; extremes are rare
        let tier_weights = [10, 20, 40, 20, 10];

        for planet in 0..planet_count {
            // Barren planets carry no minerals and no market entry
            if rng.chance(0.25) {
                continue;
            }

            let mineral_count = rng.next_range_inclusive(1, 3) as usize;
            let mut minerals = Vec::with_capacity(mineral_count);
            for _ in 0..mineral_count {
                let pick = Commodity::all()[rng.next_range(Commodity::all().len() as u32) as usize];
                if !minerals.contains(&pick) {
                    minerals.push(pick);
                }
            }

            let abundance = AbundanceTier::all()[rng.pick_weighted(&tier_weights)];
            distribution.insert(planet, PlanetMinerals { minerals, abundance });
        }

        distribution
    }

    fn generate_base_prices(&self, rng: &mut SeededRng) -> BTreeMap<Commodity, Cents> {
        let jitter = self.config.price_jitter;
        Commodity::all()
            .iter()
            .map(|commodity| {
                let book = commodity.base_price_cents() as f64;
                // Uniform jitter in [-jitter, +jitter]
                let factor = 1.0 + (rng.next_f32() * 2.0 - 1.0) as f64 * jitter as f64;
                let price = (book * factor).round() as Cents;
                (*commodity, price.max(1))
            })
            .collect()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> SystemGenerator {
        SystemGenerator::new(SystemGenConfig::default())
    }

    #[test]
    fn test_generation_determinism() {
        let gen = generator();
        let coord = Coordinate::new(4, 7, 2);
        let a = gen.generate(coord);
        let b = gen.generate(coord);
        assert_eq!(a, b);

        let json_a = serde_json::to_string(&a).unwrap();
        let json_b = serde_json::to_string(&b).unwrap();
        assert_eq!(json_a, json_b);
    }

    #[test]
    fn test_peek_matches_generate() {
        let gen = generator();
        let coord = Coordinate::new(1, 2, 3);
        assert_eq!(gen.peek(coord), gen.generate(coord));
    }

    #[test]
    fn test_different_coordinates_differ() {
        let gen = generator();
        let a = gen.generate(Coordinate::new(1, 0, 0));
        let b = gen.generate(Coordinate::new(2, 0, 0));
        // Names or prices could theoretically collide, but the full record
        // should not
        assert_ne!(a, b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let coord = Coordinate::new(3, 3, 3);
        let gen_a = generator();
        let gen_b = SystemGenerator::new(SystemGenConfig {
            seed: "other-galaxy".to_string(),
            ..SystemGenConfig::default()
        });
        assert_ne!(gen_a.generate(coord), gen_b.generate(coord));
    }

    #[test]
    fn test_cradle_is_fixed() {
        let gen = generator();
        let cradle = gen.generate(Coordinate::new(0, 0, 0));
        assert_eq!(cradle.name, "The Cradle");
        assert_eq!(cradle.star_type, StarType::YellowDwarf);
        assert_eq!(cradle.hazard_level, 0);
        assert_eq!(
            cradle.base_price(Commodity::Iron),
            Some(Commodity::Iron.base_price_cents())
        );
    }

    #[test]
    fn test_generated_values_in_range() {
        let gen = generator();
        let config = gen.config().clone();
        for x in 0..5 {
            for y in 0..5 {
                let props = gen.generate(Coordinate::new(x, y, 1));
                assert!(props.planet_count >= config.min_planets);
                assert!(props.planet_count <= config.max_planets);
                assert!(props.hazard_level <= 100);
                assert!(!props.name.is_empty());
                for planet in props.mineral_distribution.keys() {
                    assert!(*planet < props.planet_count);
                }
                for price in props.base_prices.values() {
                    assert!(*price >= 1);
                }
            }
        }
    }

    #[test]
    fn test_abundance_of_picks_most_plentiful() {
        let mut distribution = BTreeMap::new();
        distribution.insert(
            0,
            PlanetMinerals {
                minerals: vec![Commodity::Iron],
                abundance: AbundanceTier::Low,
            },
        );
        distribution.insert(
            1,
            PlanetMinerals {
                minerals: vec![Commodity::Iron],
                abundance: AbundanceTier::VeryHigh,
            },
        );
        let props = SystemProperties {
            coordinate: Coordinate::new(1, 1, 1),
            name: "Test".to_string(),
            star_type: StarType::RedDwarf,
            planet_count: 2,
            hazard_level: 10,
            mineral_distribution: distribution,
            base_prices: BTreeMap::new(),
        };
        assert_eq!(props.abundance_of(Commodity::Iron), Some(AbundanceTier::VeryHigh));
        assert_eq!(props.abundance_of(Commodity::Gold), None);
    }

    #[test]
    fn test_serde_roundtrip() {
        let gen = generator();
        let props = gen.generate(Coordinate::new(6, 1, 8));
        let json = serde_json::to_string(&props).unwrap();
        let restored: SystemProperties = serde_json::from_str(&json).unwrap();
        assert_eq!(props, restored);
    }
}
