//! Single-run simulation driver
//!
//! Orchestrates one run end to end:
//!
//! ```text
//! 1. Validate the configuration (boundary check; the engine itself
//!    never fails on in-range input)
//! 2. Generate the member and grantee populations
//! 3. If the global strategy is coalition, set up coalitions first;
//!    then apply the global strategy to every member not already
//!    recruited into a coalition
//! 4. For each month: clear allocations, sample the active members,
//!    record each active member's allocation, distribute funds
//! 5. Flatten the council history into the time-series table
//! ```
//!
//! # Determinism
//!
//! All randomness flows through one seeded `RngManager` created from
//! `config.rng_seed`. Same config + same seed = identical run.

use crate::models::Council;
use crate::population::{
    generate_grantees, generate_members, setup_coalitions, QualityDistribution,
    VotingPowerDistribution,
};
use crate::rng::RngManager;
use crate::strategy::AllocationStrategy;
use crate::table::TimeSeriesTable;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Simulation error types
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimulationError {
    /// Configuration field outside its documented range
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Complete configuration for one simulation run
///
/// Defaults mirror the reference scenario: 100 members with equal
/// voting power, 10 grantees with uniform quality, a 100 000 pool
/// distributing 5% per month for 12 months at 80% participation.
///
/// # Example
/// ```
/// use council_simulator_core_rs::{AllocationStrategy, SimulationConfig};
///
/// let config = SimulationConfig {
///     allocation_strategy: AllocationStrategy::Merit,
///     duration_months: 24,
///     ..SimulationConfig::default()
/// };
/// assert_eq!(config.num_members, 100);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of council members to generate
    pub num_members: usize,

    /// Voting-power distribution across members
    pub voting_power_distribution: VotingPowerDistribution,

    /// Skew parameter for the custom distribution, in [0, 1]
    pub power_skew: f64,

    /// Total voting power shared by the cohort (exact integer sum)
    pub total_voting_power: i64,

    /// Initial funding pool
    pub initial_pool: f64,

    /// Fraction of the pool distributed each month, in (0, 1]
    pub distribution_rate: f64,

    /// Amount added to the pool every 12th month (0 disables)
    pub annual_funding_addition: f64,

    /// Number of grantees to generate
    pub num_grantees: usize,

    /// Quality distribution across grantees
    pub quality_distribution: QualityDistribution,

    /// Quality-popularity correlation, in [-1, 1]
    pub popularity_correlation: f64,

    /// Base viability threshold, scaled per grantee by quality
    pub min_funding_threshold: f64,

    /// Global allocation strategy applied to non-coalition members
    pub allocation_strategy: AllocationStrategy,

    /// Fraction of members recruited into coalitions, in (0, 1]
    pub coalition_size: f64,

    /// Number of grantees each coalition supports
    pub coalition_focus: usize,

    /// Fraction of members voting each month, in (0, 1]
    pub participation_rate: f64,

    /// Number of months to simulate
    pub duration_months: usize,

    /// Seed for the run's deterministic RNG
    pub rng_seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_members: 100,
            voting_power_distribution: VotingPowerDistribution::Equal,
            power_skew: 0.5,
            total_voting_power: 100_000,
            initial_pool: 100_000.0,
            distribution_rate: 0.05,
            annual_funding_addition: 0.0,
            num_grantees: 10,
            quality_distribution: QualityDistribution::Uniform,
            popularity_correlation: 0.5,
            min_funding_threshold: 1000.0,
            allocation_strategy: AllocationStrategy::Random,
            coalition_size: 0.3,
            coalition_focus: 2,
            participation_rate: 0.8,
            duration_months: 12,
            rng_seed: 42,
        }
    }
}

impl SimulationConfig {
    /// Validate every field against its documented range
    ///
    /// Degenerate populations (zero members or grantees) are valid
    /// engine input and pass validation; only out-of-range numeric
    /// parameters are rejected here, at the configuration boundary.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.duration_months == 0 {
            return Err(SimulationError::InvalidConfig(
                "duration_months must be > 0".to_string(),
            ));
        }

        if !(self.distribution_rate > 0.0 && self.distribution_rate <= 1.0) {
            return Err(SimulationError::InvalidConfig(
                "distribution_rate must be in (0, 1]".to_string(),
            ));
        }

        if !(self.participation_rate > 0.0 && self.participation_rate <= 1.0) {
            return Err(SimulationError::InvalidConfig(
                "participation_rate must be in (0, 1]".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.power_skew) {
            return Err(SimulationError::InvalidConfig(
                "power_skew must be in [0, 1]".to_string(),
            ));
        }

        if !(-1.0..=1.0).contains(&self.popularity_correlation) {
            return Err(SimulationError::InvalidConfig(
                "popularity_correlation must be in [-1, 1]".to_string(),
            ));
        }

        if !(self.initial_pool > 0.0) {
            return Err(SimulationError::InvalidConfig(
                "initial_pool must be > 0".to_string(),
            ));
        }

        if self.annual_funding_addition < 0.0 {
            return Err(SimulationError::InvalidConfig(
                "annual_funding_addition must be >= 0".to_string(),
            ));
        }

        if self.total_voting_power <= 0 {
            return Err(SimulationError::InvalidConfig(
                "total_voting_power must be > 0".to_string(),
            ));
        }

        if self.min_funding_threshold < 0.0 {
            return Err(SimulationError::InvalidConfig(
                "min_funding_threshold must be >= 0".to_string(),
            ));
        }

        if !(self.coalition_size > 0.0 && self.coalition_size <= 1.0) {
            return Err(SimulationError::InvalidConfig(
                "coalition_size must be in (0, 1]".to_string(),
            ));
        }

        Ok(())
    }
}

/// Result of one simulation run
///
/// The council carries the full entity state and month-by-month
/// history; the table is the flattened time series consumed by
/// external collaborators. Both are read-only from the caller's side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationRun {
    /// Terminal council state including history
    pub council: Council,

    /// Flattened per-month time series
    pub table: TimeSeriesTable,
}

/// Run a single simulation
///
/// # Example
/// ```
/// use council_simulator_core_rs::{run_simulation, SimulationConfig};
///
/// let config = SimulationConfig {
///     num_members: 20,
///     num_grantees: 5,
///     duration_months: 6,
///     ..SimulationConfig::default()
/// };
///
/// let run = run_simulation(&config).unwrap();
/// assert_eq!(run.council.history().len(), 6);
/// assert_eq!(run.table.num_rows(), 6);
/// assert!(run.council.pool_balance() < 100_000.0);
/// ```
pub fn run_simulation(config: &SimulationConfig) -> Result<SimulationRun, SimulationError> {
    config.validate()?;

    let mut rng = RngManager::new(config.rng_seed);

    let mut members = generate_members(
        config.num_members,
        config.voting_power_distribution,
        config.power_skew,
        config.total_voting_power,
        &mut rng,
    );

    let grantees = generate_grantees(
        config.num_grantees,
        config.quality_distribution,
        config.popularity_correlation,
        config.min_funding_threshold,
        &mut rng,
    );

    if config.allocation_strategy == AllocationStrategy::Coalition {
        setup_coalitions(
            &mut members,
            &grantees,
            config.coalition_size,
            config.coalition_focus,
            &mut rng,
        );
    }

    // Apply the global strategy without overriding coalition
    // recruitment.
    for member in &mut members {
        if member.strategy() != AllocationStrategy::Coalition {
            member.set_strategy(config.allocation_strategy);
        }
    }

    let mut council = Council::new(
        config.initial_pool,
        config.distribution_rate,
        members,
        grantees,
        config.annual_funding_addition,
    );

    for month in 0..config.duration_months {
        council.clear_allocations();

        let active = council.active_member_indices(config.participation_rate, &mut rng);
        for idx in active {
            let (member_id, allocation) = {
                let member = &council.members()[idx];
                (
                    member.id().to_string(),
                    member.allocate(council.grantees(), &mut rng),
                )
            };
            council.record_allocations(&member_id, allocation);
        }

        council.distribute_funds(month);
    }

    let grantee_ids: Vec<String> = council
        .grantees()
        .iter()
        .map(|g| g.id().to_string())
        .collect();
    let table = TimeSeriesTable::from_history(council.history(), &grantee_ids);

    Ok(SimulationRun { council, table })
}
