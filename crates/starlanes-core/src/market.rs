//! Market stock tracking and deterministic initial inventory.
//!
//! Each (system, commodity) pair has one bounded stock ledger. Every
//! mutation clamps to `0 <= quantity <= max_quantity`; a failed decrease
//! leaves the ledger untouched. Restocking is driven by an external
//! scheduler calling [`MarketInventory::restock`] on a tick.

use crate::coord::Coordinate;
use crate::rng::SeededRng;
use crate::system::SystemProperties;
use crate::types::Commodity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bounded stock level for one commodity in one system's market.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketInventory {
    /// Units currently in stock.
    pub quantity: u32,
    /// Stock ceiling; always > 0.
    pub max_quantity: u32,
    /// Units added per restock tick.
    pub restock_rate: u32,
}

impl MarketInventory {
    /// Create an inventory clamped into its invariant range.
    pub fn new(quantity: u32, max_quantity: u32, restock_rate: u32) -> Self {
        let max_quantity = max_quantity.max(1);
        Self {
            quantity: quantity.min(max_quantity),
            max_quantity,
            restock_rate,
        }
    }

    /// Is at least `amount` in stock?
    pub fn available(&self, amount: u32) -> bool {
        self.quantity >= amount
    }

    /// Remove stock for a purchase.
    ///
    /// All-or-nothing: returns `false` and leaves the ledger untouched when
    /// stock is insufficient.
    pub fn decrease_stock(&mut self, amount: u32) -> bool {
        if !self.available(amount) {
            return false;
        }
        self.quantity -= amount;
        true
    }

    /// Add stock from a sale, capped at `max_quantity`.
    ///
    /// Returns the amount actually added, which may be less than requested.
    pub fn increase_stock(&mut self, amount: u32) -> u32 {
        let room = self.max_quantity - self.quantity;
        let added = amount.min(room);
        self.quantity += added;
        added
    }

    /// Units the market can still absorb.
    pub fn remaining_capacity(&self) -> u32 {
        self.max_quantity - self.quantity
    }

    /// Scheduled replenishment: one tick adds `restock_rate`, capped.
    ///
    /// Returns the amount actually added.
    pub fn restock(&mut self) -> u32 {
        self.increase_stock(self.restock_rate)
    }
}

/// Configuration for initial market stock generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketGenConfig {
    /// Galaxy seed; must match the system generator's seed.
    pub seed: String,
    /// Origin used for the distance falloff.
    pub cradle: Coordinate,
    /// Stock ceiling for a zero-hazard market at the cradle.
    pub base_max_quantity: u32,
    /// Floor on generated stock ceilings.
    pub min_max_quantity: u32,
    /// Restock rate as a fraction of the ceiling.
    pub restock_fraction: f32,
    /// How much each point of hazard suppresses stock (fraction per point).
    pub hazard_falloff: f32,
    /// How much each unit of Manhattan distance suppresses stock.
    pub distance_falloff: f32,
}

impl Default for MarketGenConfig {
    fn default() -> Self {
        Self {
            seed: "starlanes".to_string(),
            cradle: Coordinate::new(0, 0, 0),
            base_max_quantity: 1_000,
            min_max_quantity: 20,
            restock_fraction: 0.05,
            hazard_falloff: 0.006,
            distance_falloff: 0.02,
        }
    }
}

/// Generates the starting inventory table for a newly discovered system.
pub struct MarketGenerator {
    config: MarketGenConfig,
}

impl MarketGenerator {
    pub fn new(config: MarketGenConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MarketGenConfig {
        &self.config
    }

    /// Deterministically generate initial stock for every commodity the
    /// system trades.
    ///
    /// Remote and hazardous systems carry thinner markets: the stock
    /// ceiling shrinks with hazard level and Manhattan distance from the
    /// cradle, never below the configured floor. Starting quantity is
    /// 50-100% of the ceiling.
    pub fn generate_initial(
        &self,
        props: &SystemProperties,
    ) -> BTreeMap<Commodity, MarketInventory> {
        let mut rng =
            SeededRng::for_coordinate(&self.config.seed, &props.coordinate).derive("market");

        let distance = props.coordinate.manhattan_distance(&self.config.cradle);
        let hazard_scale = 1.0 - self.config.hazard_falloff * props.hazard_level as f32;
        let distance_scale = 1.0 - self.config.distance_falloff * distance as f32;
        let scale = hazard_scale.max(0.0) * distance_scale.max(0.0);

        // BTreeMap iteration keeps the draw order fixed per commodity
        props
            .base_prices
            .keys()
            .map(|commodity| {
                // Each commodity gets its own size roll in [0.5, 1.0]
                let size_roll = 0.5 + rng.next_f32() * 0.5;
                let max_quantity = ((self.config.base_max_quantity as f32 * scale * size_roll)
                    as u32)
                    .max(self.config.min_max_quantity);

                let fill_roll = 0.5 + rng.next_f32() * 0.5;
                let quantity = ((max_quantity as f32 * fill_roll) as u32).min(max_quantity);

                let restock_rate =
                    ((max_quantity as f32 * self.config.restock_fraction) as u32).max(1);

                (*commodity, MarketInventory::new(quantity, max_quantity, restock_rate))
            })
            .collect()
    }
}
