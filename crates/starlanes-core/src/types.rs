//! Core enums and type aliases used throughout the crate.

use serde::{Deserialize, Serialize};

/// Money amounts, in integer cents.
pub type Cents = i64;

/// Tradeable commodities mined and sold across the galaxy.
///
/// The table of base prices here is the static fallback the pricing engine
/// uses when a system's generated price table has no entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Commodity {
    Iron,
    Copper,
    Silicates,
    WaterIce,
    Hydrocarbons,
    Titanium,
    RareEarths,
    Helium3,
    Deuterium,
    Uranium,
    Platinum,
    Gold,
}

impl Commodity {
    /// Static base price in cents.
    pub const fn base_price_cents(&self) -> Cents {
        match self {
            Commodity::Iron => 800,
            Commodity::Copper => 1_200,
            Commodity::Silicates => 600,
            Commodity::WaterIce => 500,
            Commodity::Hydrocarbons => 1_500,
            Commodity::Titanium => 3_500,
            Commodity::RareEarths => 6_000,
            Commodity::Helium3 => 9_000,
            Commodity::Deuterium => 4_500,
            Commodity::Uranium => 12_000,
            Commodity::Platinum => 20_000,
            Commodity::Gold => 15_000,
        }
    }

    /// All commodity variants, in fixed order.
    pub const fn all() -> &'static [Commodity] {
        &[
            Commodity::Iron,
            Commodity::Copper,
            Commodity::Silicates,
            Commodity::WaterIce,
            Commodity::Hydrocarbons,
            Commodity::Titanium,
            Commodity::RareEarths,
            Commodity::Helium3,
            Commodity::Deuterium,
            Commodity::Uranium,
            Commodity::Platinum,
            Commodity::Gold,
        ]
    }
}

impl std::fmt::Display for Commodity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Commodity::Iron => write!(f, "Iron"),
            Commodity::Copper => write!(f, "Copper"),
            Commodity::Silicates => write!(f, "Silicates"),
            Commodity::WaterIce => write!(f, "Water Ice"),
            Commodity::Hydrocarbons => write!(f, "Hydrocarbons"),
            Commodity::Titanium => write!(f, "Titanium"),
            Commodity::RareEarths => write!(f, "Rare Earths"),
            Commodity::Helium3 => write!(f, "Helium-3"),
            Commodity::Deuterium => write!(f, "Deuterium"),
            Commodity::Uranium => write!(f, "Uranium"),
            Commodity::Platinum => write!(f, "Platinum"),
            Commodity::Gold => write!(f, "Gold"),
        }
    }
}

/// Classification of a system's primary star.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StarType {
    YellowDwarf,
    RedDwarf,
    BlueGiant,
    YellowGiant,
    RedGiant,
    NeutronStar,
    BlackHoleProximity,
    BinarySystem,
}

impl StarType {
    /// All star types, in the fixed order the generator draws from.
    pub const fn all() -> &'static [StarType] {
        &[
            StarType::YellowDwarf,
            StarType::RedDwarf,
            StarType::BlueGiant,
            StarType::YellowGiant,
            StarType::RedGiant,
            StarType::NeutronStar,
            StarType::BlackHoleProximity,
            StarType::BinarySystem,
        ]
    }

    /// Relative generation weights, aligned with [`StarType::all`].
    ///
    /// Dwarfs dominate; exotic stars are rare.
    pub const fn weights() -> &'static [u32] {
        &[30, 30, 8, 8, 10, 5, 2, 7]
    }

    /// Extra hazard contributed by the star itself (0-100 scale).
    pub const fn hazard_bonus(&self) -> u32 {
        match self {
            StarType::YellowDwarf | StarType::RedDwarf => 0,
            StarType::YellowGiant | StarType::RedGiant => 10,
            StarType::BlueGiant => 15,
            StarType::BinarySystem => 20,
            StarType::NeutronStar => 35,
            StarType::BlackHoleProximity => 50,
        }
    }
}

impl std::fmt::Display for StarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StarType::YellowDwarf => write!(f, "Yellow Dwarf"),
            StarType::RedDwarf => write!(f, "Red Dwarf"),
            StarType::BlueGiant => write!(f, "Blue Giant"),
            StarType::YellowGiant => write!(f, "Yellow Giant"),
            StarType::RedGiant => write!(f, "Red Giant"),
            StarType::NeutronStar => write!(f, "Neutron Star"),
            StarType::BlackHoleProximity => write!(f, "Black Hole Proximity"),
            StarType::BinarySystem => write!(f, "Binary System"),
        }
    }
}

/// How plentiful a mineral is on a planet.
///
/// Abundance drives the price multiplier: plentiful minerals are cheap
/// locally, scarce ones command a premium.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AbundanceTier {
    VeryHigh,
    High,
    Medium,
    Low,
    VeryLow,
}

impl AbundanceTier {
    /// Price multiplier for commodities at this abundance.
    pub const fn price_multiplier(&self) -> f64 {
        match self {
            AbundanceTier::VeryHigh => 0.7,
            AbundanceTier::High => 0.8,
            AbundanceTier::Medium => 1.0,
            AbundanceTier::Low => 1.2,
            AbundanceTier::VeryLow => 1.5,
        }
    }

    /// All tiers in ascending scarcity.
    pub const fn all() -> &'static [AbundanceTier] {
        &[
            AbundanceTier::VeryHigh,
            AbundanceTier::High,
            AbundanceTier::Medium,
            AbundanceTier::Low,
            AbundanceTier::VeryLow,
        ]
    }

    /// Look up a tier from its 1-5 index.
    ///
    /// Returns `None` for indices outside 1..=5; passing one is a caller
    /// contract violation, not an expected state.
    pub const fn from_index(index: u8) -> Option<AbundanceTier> {
        match index {
            1 => Some(AbundanceTier::VeryHigh),
            2 => Some(AbundanceTier::High),
            3 => Some(AbundanceTier::Medium),
            4 => Some(AbundanceTier::Low),
            5 => Some(AbundanceTier::VeryLow),
            _ => None,
        }
    }
}

impl std::fmt::Display for AbundanceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AbundanceTier::VeryHigh => write!(f, "Very High"),
            AbundanceTier::High => write!(f, "High"),
            AbundanceTier::Medium => write!(f, "Medium"),
            AbundanceTier::Low => write!(f, "Low"),
            AbundanceTier::VeryLow => write!(f, "Very Low"),
        }
    }
}

/// Kinds of buildings players construct in a system.
///
/// Price effects are computed by the pure function
/// [`Building::price_modifier`], keyed on kind and tier - there is no
/// per-building subtype dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingKind {
    MiningStation,
    Refinery,
    FuelDepot,
    TradeHub,
    OrbitalShipyard,
    ResearchOutpost,
}

impl BuildingKind {
    /// All building kinds, in fixed order.
    pub const fn all() -> &'static [BuildingKind] {
        &[
            BuildingKind::MiningStation,
            BuildingKind::Refinery,
            BuildingKind::FuelDepot,
            BuildingKind::TradeHub,
            BuildingKind::OrbitalShipyard,
            BuildingKind::ResearchOutpost,
        ]
    }
}

impl std::fmt::Display for BuildingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildingKind::MiningStation => write!(f, "Mining Station"),
            BuildingKind::Refinery => write!(f, "Refinery"),
            BuildingKind::FuelDepot => write!(f, "Fuel Depot"),
            BuildingKind::TradeHub => write!(f, "Trade Hub"),
            BuildingKind::OrbitalShipyard => write!(f, "Orbital Shipyard"),
            BuildingKind::ResearchOutpost => write!(f, "Research Outpost"),
        }
    }
}

/// Snapshot of a constructed building, as supplied by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub kind: BuildingKind,
    /// Upgrade tier, 1-3. Higher tiers deepen the price effect.
    pub tier: u8,
    /// Only operational buildings affect prices.
    pub operational: bool,
}

impl Building {
    /// Create an operational building at the given tier.
    pub const fn new(kind: BuildingKind, tier: u8) -> Self {
        Self {
            kind,
            tier,
            operational: true,
        }
    }

    /// Price multiplier this building applies to a commodity.
    ///
    /// Returns 1.0 when the building has no effect on the commodity or is
    /// not operational. Each tier past the first deepens the base effect
    /// by half of its distance from 1.0.
    pub fn price_modifier(&self, commodity: Commodity) -> f64 {
        if !self.operational {
            return 1.0;
        }
        let base = match (self.kind, commodity) {
            // Local extraction floods the market
            (BuildingKind::MiningStation, Commodity::Iron)
            | (BuildingKind::MiningStation, Commodity::Copper)
            | (BuildingKind::MiningStation, Commodity::Silicates)
            | (BuildingKind::MiningStation, Commodity::Titanium) => 0.90,
            // Refining raises demand for raw ore, lowers refined metals
            (BuildingKind::Refinery, Commodity::Iron) => 1.10,
            (BuildingKind::Refinery, Commodity::Titanium)
            | (BuildingKind::Refinery, Commodity::RareEarths) => 0.92,
            // Fuel production
            (BuildingKind::FuelDepot, Commodity::Helium3)
            | (BuildingKind::FuelDepot, Commodity::Deuterium) => 0.88,
            // Trade hubs compress margins across the board
            (BuildingKind::TradeHub, _) => 0.97,
            // Shipyards consume structural metals
            (BuildingKind::OrbitalShipyard, Commodity::Iron)
            | (BuildingKind::OrbitalShipyard, Commodity::Titanium) => 1.08,
            // Research consumes exotics
            (BuildingKind::ResearchOutpost, Commodity::RareEarths)
            | (BuildingKind::ResearchOutpost, Commodity::Uranium) => 1.06,
            _ => 1.0,
        };
        let extra_tiers = self.tier.saturating_sub(1) as f64;
        1.0 + (base - 1.0) * (1.0 + 0.5 * extra_tiers)
    }
}
