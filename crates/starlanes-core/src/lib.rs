//! Starlanes Core Library
//!
//! This crate contains the procedural galaxy economy and exploration engine
//! for Starlanes, a browser-based incremental space-trading game. The
//! surrounding application (web handlers, persistence, schedulers) consumes
//! these functions and owns all storage.
//!
//! # Design Principles
//!
//! - **No UI or I/O dependencies**: This crate is purely game logic
//! - **Deterministic**: Same seed and inputs always produce same outputs,
//!   so undiscovered space can be peeked without persisting anything
//! - **Stateless**: Callers pass in snapshots and apply returned mutations
//!   atomically under their own transactions
//! - **Serializable**: All state can be saved/loaded via serde

// Spatial foundation
pub mod coord;
pub mod rng;
pub mod types;

// Procedural generation
pub mod system;

// Economy
pub mod market;
pub mod pricing;

// Navigation
pub mod exploration;
pub mod warp;

// Re-exports for convenience
pub use coord::{CoordBounds, Coordinate, Direction};
pub use exploration::{
    all_explored, closest_unexplored, closest_unexplored_in_direction,
    closest_unexplored_orbital, explored_count, progress_percentage, shell_coordinates,
    total_coordinates,
};
pub use market::{MarketGenConfig, MarketGenerator, MarketInventory};
pub use pricing::{
    PriceTrend, PricingConfig, PricingEngine, TradeError, TradeOutcome, TradeSide, TraderState,
};
pub use rng::SeededRng;
pub use system::{PlanetMinerals, SystemGenConfig, SystemGenerator, SystemProperties};
pub use types::{AbundanceTier, Building, BuildingKind, Cents, Commodity, StarType};
pub use warp::{
    classify_pyramid, GateChange, GateStatus, Pyramid, Route, WarpConfig, WarpGraph,
};
