//! Council member model
//!
//! Represents a voting member of the funding council. Each member holds
//! a fixed, non-transferable amount of voting power and allocates all
//! of it across the grantee set once per month, using one of the
//! closed set of allocation strategies.
//!
//! Voting power is an integral quantity (i64) fixed at population
//! generation time. Only the strategy/coalition assignment may change
//! afterwards, and only during coalition setup.

use crate::models::grantee::Grantee;
use crate::rng::RngManager;
use crate::strategy::{self, AllocationStrategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A council member with voting power and an allocation strategy
///
/// # Example
/// ```
/// use council_simulator_core_rs::{AllocationStrategy, Member};
///
/// let member = Member::new("m1".to_string(), 1000);
/// assert_eq!(member.voting_power(), 1000);
/// assert_eq!(member.strategy(), AllocationStrategy::Random);
/// assert!(member.coalition().is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// Unique member identifier (e.g., "m1")
    id: String,

    /// Fixed voting power, fully allocated every month the member
    /// participates
    voting_power: i64,

    /// Allocation strategy used when the member votes
    strategy: AllocationStrategy,

    /// Grantee ids this member's coalition supports, in declared order.
    /// Only present when `strategy` is `Coalition`. Ids, never owning
    /// references: the grantee collection is regenerated independently.
    coalition: Option<Vec<String>>,
}

impl Member {
    /// Create a new member with the default (random) strategy
    pub fn new(id: String, voting_power: i64) -> Self {
        Self {
            id,
            voting_power,
            strategy: AllocationStrategy::Random,
            coalition: None,
        }
    }

    /// Create a member with an explicit strategy
    pub fn with_strategy(id: String, voting_power: i64, strategy: AllocationStrategy) -> Self {
        Self {
            id,
            voting_power,
            strategy,
            coalition: None,
        }
    }

    /// Get member ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get voting power
    pub fn voting_power(&self) -> i64 {
        self.voting_power
    }

    /// Get the member's allocation strategy
    pub fn strategy(&self) -> AllocationStrategy {
        self.strategy
    }

    /// Set the member's allocation strategy
    ///
    /// The runner uses this to apply the configured global strategy.
    /// Members already recruited into a coalition keep their coalition
    /// strategy (the runner skips them).
    pub fn set_strategy(&mut self, strategy: AllocationStrategy) {
        self.strategy = strategy;
    }

    /// Grantee ids of the member's coalition, in declared order
    pub fn coalition(&self) -> Option<&[String]> {
        self.coalition.as_deref()
    }

    /// Join a coalition supporting the given grantee ids
    ///
    /// Switches the member to the coalition strategy.
    ///
    /// # Example
    /// ```
    /// use council_simulator_core_rs::{AllocationStrategy, Member};
    ///
    /// let mut member = Member::new("m1".to_string(), 500);
    /// member.join_coalition(vec!["g2".to_string(), "g5".to_string()]);
    /// assert_eq!(member.strategy(), AllocationStrategy::Coalition);
    /// assert_eq!(member.coalition().unwrap(), ["g2", "g5"]);
    /// ```
    pub fn join_coalition(&mut self, coalition_grantees: Vec<String>) {
        self.coalition = Some(coalition_grantees);
        self.strategy = AllocationStrategy::Coalition;
    }

    /// Leave any coalition and revert to the random strategy
    pub fn leave_coalition(&mut self) {
        self.coalition = None;
        self.strategy = AllocationStrategy::Random;
    }

    /// Allocate the member's full voting power across `grantees`
    ///
    /// Delegates to the strategy module; the returned amounts sum
    /// exactly to `voting_power` whenever `grantees` is non-empty.
    pub fn allocate(&self, grantees: &[Grantee], rng: &mut RngManager) -> BTreeMap<String, i64> {
        strategy::allocate(self, grantees, rng)
    }
}
