//! Council model — the funding pool state machine
//!
//! The council owns the member and grantee populations for the lifetime
//! of a simulation run, the shared monetary pool, this month's pending
//! allocations, and the append-only per-month history.
//!
//! # Month transition
//!
//! For month `i` the runner drives:
//! 1. `clear_allocations` — drop the previous month's entries
//! 2. `active_member_indices` — participation sample without replacement
//! 3. per-member allocation, recorded via `record_allocations`
//! 4. `distribute_funds(i)` — debit the pool, pay grantees
//!    proportionally to votes, apply the annual addition on every 12th
//!    month, append a `MonthRecord`
//!
//! # Invariants
//!
//! - `history` holds exactly one record per simulated month, in month
//!   order, never mutated after append.
//! - The pool is debited by `pool_balance * distribution_rate` every
//!   month, even when aggregate votes are zero; the withheld amount is
//!   not returned (preserved reference behavior).

use crate::models::{Grantee, Member};
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Snapshot of one simulated month, appended to `Council::history`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthRecord {
    /// Month index, 0-based
    pub month: usize,

    /// Pool balance after this month's distribution and any annual
    /// addition
    pub pool_balance: f64,

    /// Funds distributed this month, per grantee id
    pub distribution: BTreeMap<String, f64>,

    /// Aggregated votes this month, per grantee id
    pub allocations: BTreeMap<String, i64>,

    /// Annual funding added this month (0 outside 12th months)
    pub annual_funding_added: f64,
}

/// The council: pool, populations, pending allocations, history
///
/// # Example
/// ```
/// use council_simulator_core_rs::{Council, Grantee, Member};
///
/// let members = vec![Member::new("m1".to_string(), 100)];
/// let grantees = vec![Grantee::new("g1".into(), "P".into(), 0.5, 0.5, 0.0)];
/// let council = Council::new(10_000.0, 0.05, members, grantees, 0.0);
///
/// assert_eq!(council.pool_balance(), 10_000.0);
/// assert!(council.history().is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Council {
    /// Current pool balance
    pool_balance: f64,

    /// Fraction of the pool distributed each month, in (0, 1]
    distribution_rate: f64,

    /// Amount added to the pool at the end of every 12th month
    annual_funding_addition: f64,

    /// Member population, fixed at construction
    members: Vec<Member>,

    /// Grantee population, fixed at construction
    grantees: Vec<Grantee>,

    /// Current month's pending allocations: member id → grantee id →
    /// amount. Cleared at the start of every month, so it holds exactly
    /// one entry per member who allocated this month.
    allocations: BTreeMap<String, BTreeMap<String, i64>>,

    /// Append-only per-month history
    history: Vec<MonthRecord>,
}

impl Council {
    /// Create a new council wrapping a generated population
    pub fn new(
        initial_pool: f64,
        distribution_rate: f64,
        members: Vec<Member>,
        grantees: Vec<Grantee>,
        annual_funding_addition: f64,
    ) -> Self {
        Self {
            pool_balance: initial_pool,
            distribution_rate,
            annual_funding_addition,
            members,
            grantees,
            allocations: BTreeMap::new(),
            history: Vec::new(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Current pool balance
    pub fn pool_balance(&self) -> f64 {
        self.pool_balance
    }

    /// Monthly distribution rate
    pub fn distribution_rate(&self) -> f64 {
        self.distribution_rate
    }

    /// Annual funding addition
    pub fn annual_funding_addition(&self) -> f64 {
        self.annual_funding_addition
    }

    /// Member population
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Grantee population
    pub fn grantees(&self) -> &[Grantee] {
        &self.grantees
    }

    /// Current month's pending allocations (member id → grantee id →
    /// amount)
    pub fn allocations(&self) -> &BTreeMap<String, BTreeMap<String, i64>> {
        &self.allocations
    }

    /// Full per-month history
    pub fn history(&self) -> &[MonthRecord] {
        &self.history
    }

    // ========================================================================
    // Month transition
    // ========================================================================

    /// Select this month's active members, without replacement
    ///
    /// Returns `floor(member_count * participation_rate)` member
    /// indices, with a minimum of 1 whenever members exist and the rate
    /// is positive.
    pub fn active_member_indices(
        &self,
        participation_rate: f64,
        rng: &mut RngManager,
    ) -> Vec<usize> {
        let mut num_active = (self.members.len() as f64 * participation_rate) as usize;
        if num_active == 0 && !self.members.is_empty() && participation_rate > 0.0 {
            num_active = 1;
        }
        rng.sample_indices(self.members.len(), num_active)
    }

    /// Drop the previous month's allocations
    ///
    /// Members inactive in a given month hold no allocation for that
    /// month and count as zero in aggregation.
    pub fn clear_allocations(&mut self) {
        self.allocations.clear();
    }

    /// Record one member's allocation for the current month
    ///
    /// Overwrites any allocation already recorded for that member this
    /// month.
    pub fn record_allocations(&mut self, member_id: &str, allocations: BTreeMap<String, i64>) {
        self.allocations.insert(member_id.to_string(), allocations);
    }

    /// Aggregate the current allocations into per-grantee vote totals
    ///
    /// Every grantee id appears in the result (zero default). Amounts
    /// recorded against unknown grantee ids are ignored.
    pub fn aggregate_allocations(&self) -> BTreeMap<String, i64> {
        let mut totals: BTreeMap<String, i64> = self
            .grantees
            .iter()
            .map(|g| (g.id().to_string(), 0))
            .collect();

        for member_allocations in self.allocations.values() {
            for (grantee_id, amount) in member_allocations {
                if let Some(total) = totals.get_mut(grantee_id) {
                    *total += amount;
                }
            }
        }

        totals
    }

    /// Distribute this month's funds and append the month record
    ///
    /// Debits `pool_balance * distribution_rate` from the pool
    /// unconditionally, then pays each grantee its vote-proportional
    /// share. With zero total votes every grantee receives 0 and the
    /// debited amount is not returned to the pool. The annual funding
    /// addition is applied after distribution on every 12th month.
    ///
    /// Returns the per-grantee distribution.
    pub fn distribute_funds(&mut self, month: usize) -> BTreeMap<String, f64> {
        let total_allocations = self.aggregate_allocations();
        let total_votes: i64 = total_allocations.values().sum();

        let distribution_amount = self.pool_balance * self.distribution_rate;
        self.pool_balance -= distribution_amount;

        let mut distribution = BTreeMap::new();
        for (grantee_id, votes) in &total_allocations {
            let share = if total_votes > 0 {
                (*votes as f64 / total_votes as f64) * distribution_amount
            } else {
                0.0
            };
            distribution.insert(grantee_id.clone(), share);
        }

        for grantee in &mut self.grantees {
            if let Some(share) = distribution.get(grantee.id()) {
                grantee.receive_funds(*share);
            }
        }

        let mut annual_funding_added = 0.0;
        if (month + 1) % 12 == 0 && self.annual_funding_addition > 0.0 {
            self.pool_balance += self.annual_funding_addition;
            annual_funding_added = self.annual_funding_addition;
        }

        self.history.push(MonthRecord {
            month,
            pool_balance: self.pool_balance,
            distribution: distribution.clone(),
            allocations: total_allocations,
            annual_funding_added,
        });

        distribution
    }
}
