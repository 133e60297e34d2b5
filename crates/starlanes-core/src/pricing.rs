//! Commodity pricing and trade execution.
//!
//! The current price of a commodity in a system is a pure function applied
//! in a fixed order:
//!
//! 1. system base price (absent commodity -> not traded)
//! 2. x abundance multiplier from the mineral distribution
//! 3. x every operational building's modifier, each exactly once
//! 4. + the accumulated supply/demand delta in cents
//! 5. clamp to a minimum of 1 cent
//!
//! Trades are exposed as a single transactional function returning the full
//! tuple of mutations (new delta, stock change, credit change, owner tax) so
//! the caller can apply everything atomically under its own lock. Nothing in
//! this module touches storage.

use crate::market::MarketInventory;
use crate::system::SystemProperties;
use crate::types::{Building, Cents, Commodity};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tunable pricing parameters. All injectable; defaults match the live game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Delta added per unit bought, as a fraction of current price.
    pub demand_factor: f64,
    /// Delta removed per unit sold, as a fraction of current price.
    pub supply_factor: f64,
    /// Markup a non-owner pays when buying (0.10 = +10%).
    pub buy_markup: f64,
    /// Markdown a non-owner receives when selling (0.10 = -10%).
    pub sell_markdown: f64,
    /// Share of the spread credited to the system owner as tax.
    pub owner_tax_share: f64,
    /// |delta| above this many cents classifies the trend as up/down.
    pub trend_threshold_cents: Cents,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            demand_factor: 0.005,
            supply_factor: 0.005,
            buy_markup: 0.10,
            sell_markdown: 0.10,
            owner_tax_share: 0.10,
            trend_threshold_cents: 10,
        }
    }
}

/// Direction of recent price pressure on a commodity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceTrend {
    Up,
    Down,
    Stable,
}

impl std::fmt::Display for PriceTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceTrend::Up => write!(f, "rising"),
            PriceTrend::Down => write!(f, "falling"),
            PriceTrend::Stable => write!(f, "stable"),
        }
    }
}

/// Which side of the market the trader is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeSide {
    Buy,
    Sell,
}

/// Errors that can fail a trade.
///
/// These are expected business-rule outcomes surfaced to the player, not
/// exceptional conditions.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TradeError {
    #[error("{0} is not traded in this system")]
    CommodityNotTraded(Commodity),
    #[error("market has {available} units in stock, {requested} requested")]
    InsufficientStock { requested: u32, available: u32 },
    #[error("trade costs {required} cents but only {available} available")]
    InsufficientFunds { required: Cents, available: Cents },
    #[error("cargo hold has room for {available} units, {requested} requested")]
    InsufficientCargoSpace { requested: u32, available: u32 },
    #[error("cargo hold contains {available} units, {requested} offered")]
    InsufficientCargo { requested: u32, available: u32 },
    #[error("market cannot absorb any more {0}")]
    MarketSaturated(Commodity),
    #[error("trade quantity must be at least 1")]
    ZeroQuantity,
}

/// A trader's relevant state, snapshotted by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraderState {
    /// Credits on hand, in cents.
    pub credits: Cents,
    /// Free cargo space, in units.
    pub cargo_space: u32,
    /// Units of the traded commodity already held.
    pub cargo_held: u32,
    /// Owners trade at the computed price with no spread or tax.
    pub is_owner: bool,
}

/// The complete, atomically-applicable result of a trade.
///
/// The caller persists all fields in one transaction: the new delta row,
/// the stock adjustment, the trader's credit change, and the owner's tax
/// credit either all land or none do.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TradeOutcome {
    pub side: TradeSide,
    pub commodity: Commodity,
    /// Units actually traded (a sell may be partially absorbed).
    pub quantity: u32,
    /// Unit price paid or received, after any spread.
    pub unit_price: Cents,
    /// Signed credit change for the trader (negative for a buy).
    pub credits_change: Cents,
    /// Tax credited to the system owner (zero for owner trades).
    pub owner_tax: Cents,
    /// Signed stock change to apply to the market inventory.
    pub stock_change: i64,
    /// Signed adjustment to the stored price delta.
    pub delta_change: Cents,
    /// The delta after this trade.
    pub new_delta: Cents,
}

/// Computes prices and trade outcomes for one system's market.
#[derive(Clone, Debug, Default)]
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Current price of a commodity, or `None` when the system does not
    /// trade it.
    ///
    /// `delta_cents` is the stored accumulated buy/sell pressure (0 when no
    /// row exists yet). All operational buildings must be passed exactly
    /// once; order does not matter.
    pub fn current_price(
        &self,
        props: &SystemProperties,
        buildings: &[Building],
        commodity: Commodity,
        delta_cents: Cents,
    ) -> Option<Cents> {
        let base = props.base_price(commodity)?;

        let abundance = props
            .abundance_of(commodity)
            .map(|tier| tier.price_multiplier())
            .unwrap_or(1.0);
        let mut price = base as f64 * abundance;

        for building in buildings {
            price *= building.price_modifier(commodity);
        }

        let price = price.round() as Cents + delta_cents;
        Some(price.max(1))
    }

    /// Delta increase caused by buying `quantity` units at `current_price`.
    pub fn simulate_buy(&self, current_price: Cents, quantity: u32) -> Cents {
        (current_price as f64 * self.config.demand_factor * quantity as f64).round() as Cents
    }

    /// Delta decrease caused by selling `quantity` units at `current_price`.
    ///
    /// Returned as a negative adjustment.
    pub fn simulate_sell(&self, current_price: Cents, quantity: u32) -> Cents {
        -((current_price as f64 * self.config.supply_factor * quantity as f64).round() as Cents)
    }

    /// Unit price a trader pays when buying: owners trade at the computed
    /// price, everyone else pays the markup.
    pub fn buy_quote(&self, current_price: Cents, is_owner: bool) -> Cents {
        if is_owner {
            current_price
        } else {
            (current_price as f64 * (1.0 + self.config.buy_markup)).round() as Cents
        }
    }

    /// Unit price a trader receives when selling.
    pub fn sell_quote(&self, current_price: Cents, is_owner: bool) -> Cents {
        if is_owner {
            current_price
        } else {
            (current_price as f64 * (1.0 - self.config.sell_markdown)).round() as Cents
        }
    }

    /// Per-unit tax credited to the system owner on a non-owner trade:
    /// the configured share of the spread.
    fn owner_tax_per_unit(&self, current_price: Cents, spread: f64) -> Cents {
        (current_price as f64 * spread * self.config.owner_tax_share).round() as Cents
    }

    /// Classify the price trend from the stored delta. Pure read.
    pub fn trend(&self, delta_cents: Cents) -> PriceTrend {
        if delta_cents > self.config.trend_threshold_cents {
            PriceTrend::Up
        } else if delta_cents < -self.config.trend_threshold_cents {
            PriceTrend::Down
        } else {
            PriceTrend::Stable
        }
    }

    /// Execute a trade against snapshots of the market state.
    ///
    /// Nothing is mutated here; the returned [`TradeOutcome`] carries every
    /// change the caller must apply atomically. Sells may be partially
    /// absorbed when the market is near its stock ceiling; buys are
    /// all-or-nothing.
    pub fn execute_trade(
        &self,
        props: &SystemProperties,
        buildings: &[Building],
        inventory: &MarketInventory,
        commodity: Commodity,
        side: TradeSide,
        quantity: u32,
        trader: &TraderState,
        delta_cents: Cents,
    ) -> Result<TradeOutcome, TradeError> {
        if quantity == 0 {
            return Err(TradeError::ZeroQuantity);
        }

        let price = self
            .current_price(props, buildings, commodity, delta_cents)
            .ok_or(TradeError::CommodityNotTraded(commodity))?;

        match side {
            TradeSide::Buy => {
                self.execute_buy(inventory, commodity, quantity, trader, price, delta_cents)
            }
            TradeSide::Sell => {
                self.execute_sell(inventory, commodity, quantity, trader, price, delta_cents)
            }
        }
    }

    fn execute_buy(
        &self,
        inventory: &MarketInventory,
        commodity: Commodity,
        quantity: u32,
        trader: &TraderState,
        price: Cents,
        delta_cents: Cents,
    ) -> Result<TradeOutcome, TradeError> {
        if !inventory.available(quantity) {
            return Err(TradeError::InsufficientStock {
                requested: quantity,
                available: inventory.quantity,
            });
        }
        if trader.cargo_space < quantity {
            return Err(TradeError::InsufficientCargoSpace {
                requested: quantity,
                available: trader.cargo_space,
            });
        }

        let unit_price = self.buy_quote(price, trader.is_owner);
        let total = unit_price * quantity as Cents;
        if trader.credits < total {
            return Err(TradeError::InsufficientFunds {
                required: total,
                available: trader.credits,
            });
        }

        let owner_tax = if trader.is_owner {
            0
        } else {
            self.owner_tax_per_unit(price, self.config.buy_markup) * quantity as Cents
        };

        let delta_change = self.simulate_buy(price, quantity);
        Ok(TradeOutcome {
            side: TradeSide::Buy,
            commodity,
            quantity,
            unit_price,
            credits_change: -total,
            owner_tax,
            stock_change: -(quantity as i64),
            delta_change,
            new_delta: delta_cents + delta_change,
        })
    }

    fn execute_sell(
        &self,
        inventory: &MarketInventory,
        commodity: Commodity,
        quantity: u32,
        trader: &TraderState,
        price: Cents,
        delta_cents: Cents,
    ) -> Result<TradeOutcome, TradeError> {
        if trader.cargo_held < quantity {
            return Err(TradeError::InsufficientCargo {
                requested: quantity,
                available: trader.cargo_held,
            });
        }

        // Partial absorption: sell whatever the market still has room for
        let absorbed = quantity.min(inventory.remaining_capacity());
        if absorbed == 0 {
            return Err(TradeError::MarketSaturated(commodity));
        }

        let unit_price = self.sell_quote(price, trader.is_owner);
        let total = unit_price * absorbed as Cents;

        let owner_tax = if trader.is_owner {
            0
        } else {
            self.owner_tax_per_unit(price, self.config.sell_markdown) * absorbed as Cents
        };

        let delta_change = self.simulate_sell(price, absorbed);
        Ok(TradeOutcome {
            side: TradeSide::Sell,
            commodity,
            quantity: absorbed,
            unit_price,
            credits_change: total,
            owner_tax,
            stock_change: absorbed as i64,
            delta_change,
            new_delta: delta_cents + delta_change,
        })
    }
}
