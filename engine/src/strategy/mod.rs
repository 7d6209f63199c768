//! Allocation strategies
//!
//! A strategy maps `(member, grantee set)` to per-grantee vote amounts.
//! The closed set of strategies is a tagged enum dispatched at
//! allocation time; no open extensibility is needed.
//!
//! # Contract
//!
//! For a non-empty grantee set the returned amounts sum exactly to the
//! member's voting power. Each strategy first computes a raw integer
//! allocation (which may under- or over-shoot from truncation), then a
//! single uniform reconciliation step applies regardless of strategy:
//! any excess is subtracted from the first-largest entry, any positive
//! remainder is added to the first-smallest entry. "First" means
//! earliest in computation order — grantee order for most strategies,
//! the coalition's declared order for the coalition strategy, which is
//! how rounding residue lands on the first coalition grantee.
//!
//! An empty grantee set yields an empty allocation.

use crate::models::{Grantee, Member};
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Member allocation policy
///
/// # Example
/// ```
/// use council_simulator_core_rs::AllocationStrategy;
///
/// assert_eq!(AllocationStrategy::from_name("merit"), AllocationStrategy::Merit);
/// // Unknown names degrade to the documented default, never an error.
/// assert_eq!(AllocationStrategy::from_name("quadratic"), AllocationStrategy::Random);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllocationStrategy {
    /// Independent uniform weights per grantee, normalized to the
    /// member's voting power
    Random,

    /// Proportional to grantee quality (equal floor-split when total
    /// quality is zero)
    Merit,

    /// Proportional to grantee popularity (equal floor-split when total
    /// popularity is zero)
    Popularity,

    /// Equal floor-split over the member's coalition grantees; falls
    /// back to `Random` over the full set when the member has no
    /// coalition or none of its grantees are present
    Coalition,
}

impl AllocationStrategy {
    /// Parse a strategy name, degrading unknown names to `Random`
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "random" => Self::Random,
            "merit" => Self::Merit,
            "popularity" => Self::Popularity,
            "coalition" => Self::Coalition,
            _ => Self::Random,
        }
    }

    /// Canonical lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Merit => "merit",
            Self::Popularity => "popularity",
            Self::Coalition => "coalition",
        }
    }
}

/// Allocate a member's full voting power across `grantees`
///
/// # Example
/// ```
/// use council_simulator_core_rs::strategy::allocate;
/// use council_simulator_core_rs::{AllocationStrategy, Grantee, Member, RngManager};
///
/// let member = Member::with_strategy("m1".into(), 100, AllocationStrategy::Merit);
/// let grantees = vec![
///     Grantee::new("g1".into(), "A".into(), 0.9, 0.2, 0.0),
///     Grantee::new("g2".into(), "B".into(), 0.1, 0.8, 0.0),
/// ];
/// let mut rng = RngManager::new(42);
///
/// let allocation = allocate(&member, &grantees, &mut rng);
/// assert_eq!(allocation.values().sum::<i64>(), 100);
/// assert!(allocation["g1"] > allocation["g2"]);
/// ```
pub fn allocate(
    member: &Member,
    grantees: &[Grantee],
    rng: &mut RngManager,
) -> BTreeMap<String, i64> {
    if grantees.is_empty() {
        return BTreeMap::new();
    }

    let mut raw = match member.strategy() {
        AllocationStrategy::Random => random_allocation(member, grantees, rng),
        AllocationStrategy::Merit => {
            weighted_allocation(member, grantees, |g| g.quality())
        }
        AllocationStrategy::Popularity => {
            weighted_allocation(member, grantees, |g| g.popularity())
        }
        AllocationStrategy::Coalition => coalition_allocation(member, grantees, rng),
    };

    reconcile(&mut raw, member.voting_power());
    raw.into_iter().collect()
}

/// Uniform random weights, normalized and truncated to integers
fn random_allocation(
    member: &Member,
    grantees: &[Grantee],
    rng: &mut RngManager,
) -> Vec<(String, i64)> {
    let weights: Vec<f64> = grantees.iter().map(|_| rng.next_f64()).collect();
    let total: f64 = weights.iter().sum();

    if total == 0.0 {
        // All-zero draw; split evenly instead of dividing by zero.
        let equal = member.voting_power() / grantees.len() as i64;
        return grantees
            .iter()
            .map(|g| (g.id().to_string(), equal))
            .collect();
    }

    grantees
        .iter()
        .zip(weights)
        .map(|(g, w)| {
            let amount = (w / total * member.voting_power() as f64) as i64;
            (g.id().to_string(), amount)
        })
        .collect()
}

/// Score-proportional allocation (merit and popularity share this
/// shape); zero total score degrades to an equal floor-split
fn weighted_allocation<F>(
    member: &Member,
    grantees: &[Grantee],
    score: F,
) -> Vec<(String, i64)>
where
    F: Fn(&Grantee) -> f64,
{
    let total_score: f64 = grantees.iter().map(&score).sum();

    if total_score > 0.0 {
        grantees
            .iter()
            .map(|g| {
                let amount = (score(g) / total_score * member.voting_power() as f64) as i64;
                (g.id().to_string(), amount)
            })
            .collect()
    } else {
        let equal = member.voting_power() / grantees.len() as i64;
        grantees
            .iter()
            .map(|g| (g.id().to_string(), equal))
            .collect()
    }
}

/// Equal floor-split over the member's coalition grantees, in the
/// coalition's declared order; random fallback when no coalition
/// grantee is present in the current set
fn coalition_allocation(
    member: &Member,
    grantees: &[Grantee],
    rng: &mut RngManager,
) -> Vec<(String, i64)> {
    let Some(coalition) = member.coalition() else {
        return random_allocation(member, grantees, rng);
    };

    let present: Vec<&str> = coalition
        .iter()
        .map(String::as_str)
        .filter(|id| grantees.iter().any(|g| g.id() == *id))
        .collect();

    if present.is_empty() {
        return random_allocation(member, grantees, rng);
    }

    // Non-coalition grantees hold no entry, which aggregation treats
    // as zero.
    let equal = member.voting_power() / present.len() as i64;
    present
        .into_iter()
        .map(|id| (id.to_string(), equal))
        .collect()
}

/// The uniform reconciliation step
///
/// Subtracts any excess over `voting_power` from the first-largest
/// entry, then adds any positive remainder to the first-smallest entry,
/// so the final sum equals `voting_power` exactly.
fn reconcile(allocations: &mut [(String, i64)], voting_power: i64) {
    if allocations.is_empty() {
        return;
    }

    let total: i64 = allocations.iter().map(|(_, a)| a).sum();
    if total > voting_power {
        let idx = index_of_first_max(allocations);
        allocations[idx].1 -= total - voting_power;
    }

    let total: i64 = allocations.iter().map(|(_, a)| a).sum();
    let remaining = voting_power - total;
    if remaining > 0 {
        let idx = index_of_first_min(allocations);
        allocations[idx].1 += remaining;
    }
}

fn index_of_first_max(allocations: &[(String, i64)]) -> usize {
    let mut idx = 0;
    for (i, (_, amount)) in allocations.iter().enumerate().skip(1) {
        if *amount > allocations[idx].1 {
            idx = i;
        }
    }
    idx
}

fn index_of_first_min(allocations: &[(String, i64)]) -> usize {
    let mut idx = 0;
    for (i, (_, amount)) in allocations.iter().enumerate().skip(1) {
        if *amount < allocations[idx].1 {
            idx = i;
        }
    }
    idx
}
