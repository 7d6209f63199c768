//! Simulation orchestration
//!
//! `engine` holds the configuration type and the single-run driver;
//! `sweep` holds parameter sweeps and batch (Monte Carlo) execution.

mod engine;
mod sweep;

pub use engine::{run_simulation, SimulationConfig, SimulationError, SimulationRun};
pub use sweep::{create_parameter_variations, run_batch_simulations, BatchResult, SweepParameter};
