//! Allocation Strategy Tests
//!
//! Each strategy maps a member's voting power onto the grantee set; the
//! contract is that every allocation over a non-empty set sums exactly
//! to the member's voting power, whatever the strategy or rounding.

use council_simulator_core_rs::strategy::allocate;
use council_simulator_core_rs::{AllocationStrategy, Grantee, Member, RngManager};

// ============================================================================
// Test Helpers
// ============================================================================

fn grantee(id: &str, quality: f64, popularity: f64) -> Grantee {
    Grantee::new(id.to_string(), format!("Project {}", id), quality, popularity, 0.0)
}

fn grantee_set() -> Vec<Grantee> {
    vec![
        grantee("g1", 0.9, 0.2),
        grantee("g2", 0.5, 0.5),
        grantee("g3", 0.2, 0.9),
    ]
}

// ============================================================================
// Exact-Sum Contract
// ============================================================================

#[test]
fn test_every_strategy_sums_to_voting_power() {
    let grantees = grantee_set();

    for strategy in [
        AllocationStrategy::Random,
        AllocationStrategy::Merit,
        AllocationStrategy::Popularity,
        AllocationStrategy::Coalition,
    ] {
        let member = Member::with_strategy("m1".to_string(), 1013, strategy);
        let mut rng = RngManager::new(42);

        for _ in 0..50 {
            let allocation = allocate(&member, &grantees, &mut rng);
            assert_eq!(
                allocation.values().sum::<i64>(),
                1013,
                "strategy {:?} missed the total",
                strategy
            );
            assert!(allocation.values().all(|&v| v >= 0));
        }
    }
}

#[test]
fn test_awkward_voting_powers_still_exact() {
    let grantees = grantee_set();
    // Powers chosen to not divide evenly by 3.
    for power in [1, 2, 7, 100, 999, 12_347] {
        let member = Member::with_strategy("m1".to_string(), power, AllocationStrategy::Merit);
        let mut rng = RngManager::new(42);
        let allocation = allocate(&member, &grantees, &mut rng);
        assert_eq!(allocation.values().sum::<i64>(), power);
    }
}

#[test]
fn test_empty_grantee_set_yields_empty_allocation() {
    let member = Member::new("m1".to_string(), 100);
    let mut rng = RngManager::new(42);
    assert!(allocate(&member, &[], &mut rng).is_empty());
}

// ============================================================================
// Strategy Shape
// ============================================================================

#[test]
fn test_merit_proportional_to_quality() {
    let member = Member::with_strategy("m1".to_string(), 1600, AllocationStrategy::Merit);
    let grantees = grantee_set(); // qualities 0.9, 0.5, 0.2 (sum 1.6)
    let mut rng = RngManager::new(42);

    let allocation = allocate(&member, &grantees, &mut rng);
    assert_eq!(allocation["g1"], 900);
    assert_eq!(allocation["g2"], 500);
    assert_eq!(allocation["g3"], 200);
}

#[test]
fn test_popularity_mirrors_merit_on_popularity_scores() {
    let member =
        Member::with_strategy("m1".to_string(), 1600, AllocationStrategy::Popularity);
    let grantees = grantee_set(); // popularities 0.2, 0.5, 0.9
    let mut rng = RngManager::new(42);

    let allocation = allocate(&member, &grantees, &mut rng);
    assert_eq!(allocation["g3"], 900);
    assert_eq!(allocation["g1"], 200);
}

#[test]
fn test_random_allocation_varies_between_draws() {
    let member = Member::new("m1".to_string(), 1000);
    let grantees = grantee_set();
    let mut rng = RngManager::new(42);

    let first = allocate(&member, &grantees, &mut rng);
    let second = allocate(&member, &grantees, &mut rng);
    assert_ne!(first, second, "consecutive random draws identical");
}

#[test]
fn test_random_allocation_deterministic_per_seed() {
    let member = Member::new("m1".to_string(), 1000);
    let grantees = grantee_set();

    let mut rng1 = RngManager::new(7);
    let mut rng2 = RngManager::new(7);
    assert_eq!(
        allocate(&member, &grantees, &mut rng1),
        allocate(&member, &grantees, &mut rng2)
    );
}

// ============================================================================
// Coalition Behavior
// ============================================================================

#[test]
fn test_coalition_concentrates_on_assigned_grantees() {
    let mut member = Member::new("m1".to_string(), 900);
    member.join_coalition(vec!["g1".to_string(), "g3".to_string()]);
    assert_eq!(member.strategy(), AllocationStrategy::Coalition);

    let grantees = grantee_set();
    let mut rng = RngManager::new(42);
    let allocation = allocate(&member, &grantees, &mut rng);

    assert_eq!(allocation["g1"], 450);
    assert_eq!(allocation["g3"], 450);
    assert!(!allocation.contains_key("g2"));
}

#[test]
fn test_coalition_ignores_absent_grantee_ids() {
    let mut member = Member::new("m1".to_string(), 100);
    member.join_coalition(vec!["g1".to_string(), "g99".to_string()]);

    let grantees = grantee_set();
    let mut rng = RngManager::new(42);
    let allocation = allocate(&member, &grantees, &mut rng);

    // Only g1 survives the presence filter, so it takes everything.
    assert_eq!(allocation["g1"], 100);
    assert_eq!(allocation.len(), 1);
}

#[test]
fn test_leave_coalition_restores_random_behavior() {
    let mut member = Member::new("m1".to_string(), 500);
    member.join_coalition(vec!["g1".to_string()]);
    member.leave_coalition();

    assert!(member.coalition().is_none());
    assert_eq!(member.strategy(), AllocationStrategy::Random);
}
