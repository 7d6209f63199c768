//! Council Simulator Core - Rust Engine
//!
//! Deterministic simulation of a council funding mechanism: members
//! allocate voting power to grantees each month, and the council
//! distributes a fixed fraction of its funding pool proportionally to
//! the aggregated votes.
//!
//! # Architecture
//!
//! - **models**: Domain types (Member, Grantee, Council)
//! - **strategy**: Allocation strategies (random, merit, popularity, coalition)
//! - **population**: Member/grantee generation and coalition setup
//! - **orchestrator**: Single-run driver, parameter sweeps, batches
//! - **table**: Columnar time series of a run's history
//! - **metrics**: Gini coefficient and concentration ratio
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. All voting power is i64; funds are f64
//! 2. All randomness is deterministic (seeded RNG)
//! 3. Per-member allocations sum exactly to the member's voting power

// Module declarations
pub mod metrics;
pub mod models;
pub mod orchestrator;
pub mod population;
pub mod rng;
pub mod strategy;
pub mod table;

// Re-exports for convenience
pub use models::{Council, Grantee, Member, MonthRecord};
pub use orchestrator::{
    create_parameter_variations, run_batch_simulations, run_simulation, BatchResult,
    SimulationConfig, SimulationError, SimulationRun, SweepParameter,
};
pub use population::{
    generate_grantees, generate_members, setup_coalitions, QualityDistribution,
    VotingPowerDistribution,
};
pub use rng::RngManager;
pub use strategy::AllocationStrategy;
pub use table::TimeSeriesTable;
