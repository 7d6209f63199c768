//! Grantee model
//!
//! Represents a project receiving funding from the council pool. Each
//! grantee carries two fixed scores in [0, 1]:
//! - `quality`: intrinsic merit, targeted by the merit strategy
//! - `popularity`: perceived popularity, targeted by the popularity
//!   strategy
//!
//! Funding state (`received_funds`, `monthly_funding`) is mutated only
//! by the council's distribution step, once per month, in month order.

use serde::{Deserialize, Serialize};

/// A funded project
///
/// # Example
/// ```
/// use council_simulator_core_rs::Grantee;
///
/// let mut grantee = Grantee::new(
///     "g1".to_string(),
///     "Open Commons".to_string(),
///     0.8,
///     0.4,
///     1000.0,
/// );
///
/// grantee.receive_funds(600.0);
/// grantee.receive_funds(500.0);
/// assert_eq!(grantee.received_funds(), 1100.0);
/// assert!(grantee.is_viable());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grantee {
    /// Unique grantee identifier (e.g., "g1")
    id: String,

    /// Project name (cosmetic, generated from word lists)
    name: String,

    /// Intrinsic quality score in [0, 1], fixed at generation time
    quality: f64,

    /// Perceived popularity score in [0, 1], fixed at generation time
    popularity: f64,

    /// Minimum cumulative funding for the project to be viable
    min_funding_threshold: f64,

    /// Cumulative funds received; monotonically non-decreasing
    received_funds: f64,

    /// Per-month amounts received, append-only, one entry per simulated
    /// month (zero months included)
    monthly_funding: Vec<f64>,
}

impl Grantee {
    /// Create a new grantee with no funding history
    pub fn new(
        id: String,
        name: String,
        quality: f64,
        popularity: f64,
        min_funding_threshold: f64,
    ) -> Self {
        Self {
            id,
            name,
            quality,
            popularity,
            min_funding_threshold,
            received_funds: 0.0,
            monthly_funding: Vec::new(),
        }
    }

    /// Get grantee ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get project name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get quality score
    pub fn quality(&self) -> f64 {
        self.quality
    }

    /// Get popularity score
    pub fn popularity(&self) -> f64 {
        self.popularity
    }

    /// Get minimum funding threshold
    pub fn min_funding_threshold(&self) -> f64 {
        self.min_funding_threshold
    }

    /// Get cumulative funds received
    pub fn received_funds(&self) -> f64 {
        self.received_funds
    }

    /// Per-month funding amounts, in month order
    pub fn monthly_funding(&self) -> &[f64] {
        &self.monthly_funding
    }

    /// Record funds received for one month
    ///
    /// Called exactly once per month by the council's distribution
    /// step. Zero amounts are recorded too, so the history length
    /// equals the number of simulated months.
    pub fn receive_funds(&mut self, amount: f64) {
        self.received_funds += amount;
        self.monthly_funding.push(amount);
    }

    /// Whether cumulative funding has reached the viability threshold
    pub fn is_viable(&self) -> bool {
        self.received_funds >= self.min_funding_threshold
    }

    /// Coefficient of variation of monthly funding (lower = more stable)
    ///
    /// Returns 0 when no funding was recorded or every month was zero.
    ///
    /// # Example
    /// ```
    /// use council_simulator_core_rs::Grantee;
    ///
    /// let mut grantee = Grantee::new("g1".into(), "P".into(), 0.5, 0.5, 0.0);
    /// grantee.receive_funds(100.0);
    /// grantee.receive_funds(100.0);
    /// assert_eq!(grantee.funding_stability(), 0.0); // perfectly stable
    /// ```
    pub fn funding_stability(&self) -> f64 {
        if self.monthly_funding.is_empty() || self.monthly_funding.iter().sum::<f64>() == 0.0 {
            return 0.0;
        }

        let n = self.monthly_funding.len() as f64;
        let mean = self.monthly_funding.iter().sum::<f64>() / n;
        let variance = self
            .monthly_funding
            .iter()
            .map(|v| (v - mean) * (v - mean))
            .sum::<f64>()
            / n;

        variance.sqrt() / mean
    }
}
