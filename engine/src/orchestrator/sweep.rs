//! Parameter sweeps and batch execution
//!
//! A batch either replicates one configuration n times (Monte Carlo
//! over population generation) or sweeps exactly one parameter
//! linearly between fixed bounds. Every run in a batch receives an
//! independently derived seed, so runs are order-independent and can
//! be executed in parallel without shared state; the whole batch is
//! still reproducible from the base seed.
//!
//! # Failure policy
//!
//! Fail fast: the first run returning an error aborts the batch. Sweep
//! values all lie inside documented ranges, so a batch over a valid
//! base configuration cannot partially fail.

use super::engine::{run_simulation, SimulationConfig, SimulationError, SimulationRun};
use serde::{Deserialize, Serialize};

/// Which configuration parameter a batch sweeps
///
/// `None` is the sentinel for pure replication (Monte Carlo).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepParameter {
    /// Replicate the base configuration unchanged
    None,

    /// Member count from 10 to min(60 000, 10 × base)
    NumMembers,

    /// Monthly distribution rate from 0.01 to 0.1
    DistributionRate,

    /// Participation rate from 0.1 to 1.0
    ParticipationRate,

    /// Annual funding addition from 10 000 to 1 000 000
    AnnualFundingAddition,
}

impl SweepParameter {
    /// Parse a parameter name; unrecognized names degrade to `None`
    /// (pure replication), never an error
    ///
    /// # Example
    /// ```
    /// use council_simulator_core_rs::SweepParameter;
    ///
    /// assert_eq!(SweepParameter::from_name("distribution_rate"), SweepParameter::DistributionRate);
    /// assert_eq!(SweepParameter::from_name("Number of Members"), SweepParameter::NumMembers);
    /// assert_eq!(SweepParameter::from_name("none"), SweepParameter::None);
    /// assert_eq!(SweepParameter::from_name("gibberish"), SweepParameter::None);
    /// ```
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "num_members" | "number of members" => Self::NumMembers,
            "distribution_rate" | "distribution rate" => Self::DistributionRate,
            "participation_rate" | "participation rate" => Self::ParticipationRate,
            "annual_funding_addition" | "annual funding addition" => Self::AnnualFundingAddition,
            _ => Self::None,
        }
    }

    /// Canonical snake_case name
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::NumMembers => "num_members",
            Self::DistributionRate => "distribution_rate",
            Self::ParticipationRate => "participation_rate",
            Self::AnnualFundingAddition => "annual_funding_addition",
        }
    }
}

/// Result of a batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    /// The configurations actually run, in order (per-run seeds
    /// already applied)
    pub configs: Vec<SimulationConfig>,

    /// One result per configuration, same order
    pub results: Vec<SimulationRun>,

    /// The parameter that was varied
    pub parameter_varied: SweepParameter,
}

/// Build `n` configurations varying one parameter linearly
///
/// `SweepParameter::None` replicates the base configuration. Bounds
/// are fixed: members 10 → min(60 000, 10 × base), distribution rate
/// 0.01 → 0.1, participation 0.1 → 1.0, annual addition 10 000 →
/// 1 000 000. A single-point sweep takes the lower bound.
pub fn create_parameter_variations(
    base_config: &SimulationConfig,
    parameter: SweepParameter,
    num_variations: usize,
) -> Vec<SimulationConfig> {
    match parameter {
        SweepParameter::None => vec![base_config.clone(); num_variations],
        SweepParameter::NumMembers => {
            let max_members = 60_000.min(base_config.num_members.saturating_mul(10));
            linspace(10.0, max_members as f64, num_variations)
                .into_iter()
                .map(|v| SimulationConfig {
                    num_members: v as usize,
                    ..base_config.clone()
                })
                .collect()
        }
        SweepParameter::DistributionRate => linspace(0.01, 0.1, num_variations)
            .into_iter()
            .map(|v| SimulationConfig {
                distribution_rate: v,
                ..base_config.clone()
            })
            .collect(),
        SweepParameter::ParticipationRate => linspace(0.1, 1.0, num_variations)
            .into_iter()
            .map(|v| SimulationConfig {
                participation_rate: v,
                ..base_config.clone()
            })
            .collect(),
        SweepParameter::AnnualFundingAddition => linspace(10_000.0, 1_000_000.0, num_variations)
            .into_iter()
            .map(|v| SimulationConfig {
                annual_funding_addition: (v as i64) as f64,
                ..base_config.clone()
            })
            .collect(),
    }
}

/// Run `n` simulations sweeping one parameter (or replicating the base
/// configuration when `parameter` is `None`)
///
/// Each run receives a seed derived from the base seed and its index:
/// replicated configurations draw independent populations, and any run
/// can be reproduced in isolation.
///
/// # Example
/// ```
/// use council_simulator_core_rs::{run_batch_simulations, SimulationConfig, SweepParameter};
///
/// let base = SimulationConfig {
///     num_members: 10,
///     num_grantees: 3,
///     duration_months: 2,
///     ..SimulationConfig::default()
/// };
///
/// let batch = run_batch_simulations(&base, SweepParameter::DistributionRate, 4).unwrap();
/// assert_eq!(batch.configs.len(), 4);
/// assert_eq!(batch.results.len(), 4);
/// assert!(batch.configs[0].distribution_rate < batch.configs[3].distribution_rate);
/// ```
pub fn run_batch_simulations(
    base_config: &SimulationConfig,
    parameter: SweepParameter,
    num_simulations: usize,
) -> Result<BatchResult, SimulationError> {
    let mut configs = create_parameter_variations(base_config, parameter, num_simulations);
    for (index, config) in configs.iter_mut().enumerate() {
        config.rng_seed = derive_run_seed(base_config.rng_seed, index as u64);
    }

    // Runs share no mutable state; sequential here, but safe to farm
    // out per-config since every seed is independently derived.
    let results = configs
        .iter()
        .map(run_simulation)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(BatchResult {
        configs,
        results,
        parameter_varied: parameter,
    })
}

/// `n` evenly spaced values from `start` to `end` inclusive
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Mix the base seed and run index into an independent per-run seed
/// (splitmix64 finalizer)
fn derive_run_seed(base_seed: u64, index: u64) -> u64 {
    let mut z = base_seed
        .wrapping_add(1)
        .wrapping_mul(0x9E3779B97F4A7C15)
        .wrapping_add(index);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}
