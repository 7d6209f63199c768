//! Population generation
//!
//! Builds the member cohort (voting-power distribution), the grantee
//! cohort (quality/popularity distributions), and optional coalitions,
//! all deterministically from an explicit `RngManager`.
//!
//! # Key Principles
//!
//! 1. **Determinism**: same seed + same parameters → same population
//! 2. **Exact totals**: member voting power is renormalized, rounded,
//!    and residue-corrected so it sums exactly to the requested total
//! 3. **Graceful degradation**: unknown distribution names parse to the
//!    documented defaults; zero counts yield empty cohorts

use crate::models::{Grantee, Member};
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};

/// Voting-power distribution across the member cohort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VotingPowerDistribution {
    /// Every member receives `total / count`
    Equal,

    /// Normal around the equal share (σ = 0.5·mean), clipped to
    /// [0.1·mean, 3·mean]
    Normal,

    /// Pareto with shape 1.5, shifted by +1
    Pareto,

    /// Exponential whose rate follows the skew parameter
    /// (`5·(1−skew) + 0.1`); skew ≤ 0.01 behaves as `Equal`
    Custom,
}

impl VotingPowerDistribution {
    /// Parse a distribution name, degrading unknown names to `Equal`
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "equal" => Self::Equal,
            "normal" => Self::Normal,
            "pareto" => Self::Pareto,
            "custom" => Self::Custom,
            _ => Self::Equal,
        }
    }
}

/// Quality distribution across the grantee cohort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityDistribution {
    /// U(0.1, 1.0)
    Uniform,

    /// N(0.5, 0.15) clipped to [0.1, 1.0]
    Normal,

    /// Two groups at N(0.25, 0.1) and N(0.75, 0.1), shuffled together
    /// and clipped
    Bimodal,
}

impl QualityDistribution {
    /// Parse a distribution name, degrading unknown names to `Uniform`
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "uniform" => Self::Uniform,
            "normal" => Self::Normal,
            "bimodal" => Self::Bimodal,
            _ => Self::Uniform,
        }
    }
}

// ============================================================================
// Member generation
// ============================================================================

/// Generate the member cohort
///
/// Members are ids `m1..mN` in order. Raw voting-power draws from the
/// chosen distribution are renormalized to sum to
/// `total_voting_power`, rounded to integers, and the rounding residue
/// is applied to the single largest entry so the integer sum is exact.
///
/// `count == 0` yields an empty cohort.
///
/// # Example
/// ```
/// use council_simulator_core_rs::population::{generate_members, VotingPowerDistribution};
/// use council_simulator_core_rs::RngManager;
///
/// let mut rng = RngManager::new(42);
/// let members = generate_members(
///     10,
///     VotingPowerDistribution::Pareto,
///     0.5,
///     100_000,
///     &mut rng,
/// );
///
/// assert_eq!(members.len(), 10);
/// assert_eq!(members.iter().map(|m| m.voting_power()).sum::<i64>(), 100_000);
/// ```
pub fn generate_members(
    count: usize,
    distribution: VotingPowerDistribution,
    power_skew: f64,
    total_voting_power: i64,
    rng: &mut RngManager,
) -> Vec<Member> {
    if count == 0 {
        return Vec::new();
    }

    let mean = total_voting_power as f64 / count as f64;

    let raw: Vec<f64> = match distribution {
        VotingPowerDistribution::Equal => vec![mean; count],
        VotingPowerDistribution::Normal => {
            let std_dev = mean * 0.5;
            (0..count)
                .map(|_| (mean + std_dev * standard_normal(rng)).clamp(mean * 0.1, mean * 3.0))
                .collect()
        }
        VotingPowerDistribution::Pareto => {
            // Lomax draw (inverse CDF) shifted by +1; no total target
            // before the renormalization below.
            let shape = 1.5;
            (0..count)
                .map(|_| (1.0 - rng.next_f64()).powf(-1.0 / shape))
                .collect()
        }
        VotingPowerDistribution::Custom => {
            if power_skew <= 0.01 {
                vec![mean; count]
            } else {
                // Higher rate = more equal; skew toward 1 flattens the
                // rate and stretches the tail.
                let rate = 5.0 * (1.0 - power_skew) + 0.1;
                (0..count).map(|_| exponential(rate, rng)).collect()
            }
        }
    };

    let voting_power = normalize_to_integer_total(&raw, total_voting_power);

    voting_power
        .into_iter()
        .enumerate()
        .map(|(i, power)| Member::new(format!("m{}", i + 1), power))
        .collect()
}

/// Renormalize raw draws to sum to `total`, round to integers, and put
/// the rounding residue on the single largest entry
fn normalize_to_integer_total(raw: &[f64], total: i64) -> Vec<i64> {
    let raw_sum: f64 = raw.iter().sum();
    let mut values: Vec<i64> = raw
        .iter()
        .map(|v| (v / raw_sum * total as f64).round() as i64)
        .collect();

    let diff = total - values.iter().sum::<i64>();
    if diff != 0 {
        let mut idx = 0;
        for (i, v) in values.iter().enumerate().skip(1) {
            if *v > values[idx] {
                idx = i;
            }
        }
        values[idx] += diff;
    }

    values
}

// ============================================================================
// Grantee generation
// ============================================================================

/// Generate the grantee cohort
///
/// Grantees are ids `g1..gN` with cosmetic names drawn from fixed word
/// lists. Quality follows the chosen distribution; popularity derives
/// from quality, the correlation parameter in [-1, 1], and N(0, 0.2)
/// noise, clipped to [0.1, 1.0]. Each grantee's viability threshold is
/// `base_threshold × (0.8 + 0.4·quality)`, so higher-quality projects
/// need proportionally more funding to be viable.
///
/// `count == 0` yields an empty cohort.
pub fn generate_grantees(
    count: usize,
    quality_distribution: QualityDistribution,
    popularity_correlation: f64,
    base_threshold: f64,
    rng: &mut RngManager,
) -> Vec<Grantee> {
    if count == 0 {
        return Vec::new();
    }

    let names: Vec<String> = (0..count).map(|_| generate_project_name(rng)).collect();

    let mut quality: Vec<f64> = match quality_distribution {
        QualityDistribution::Uniform => {
            (0..count).map(|_| 0.1 + 0.9 * rng.next_f64()).collect()
        }
        QualityDistribution::Normal => (0..count)
            .map(|_| 0.5 + 0.15 * standard_normal(rng))
            .collect(),
        QualityDistribution::Bimodal => {
            let low = count / 2;
            let mut values: Vec<f64> = (0..low)
                .map(|_| 0.25 + 0.1 * standard_normal(rng))
                .collect();
            values.extend((low..count).map(|_| 0.75 + 0.1 * standard_normal(rng)));
            rng.shuffle(&mut values);
            values
        }
    };
    for q in &mut quality {
        *q = q.clamp(0.1, 1.0);
    }

    let popularity: Vec<f64> = quality
        .iter()
        .map(|&q| {
            let noise = 0.2 * standard_normal(rng);
            let p = if popularity_correlation >= 0.0 {
                q * popularity_correlation + noise * (1.0 - popularity_correlation)
            } else {
                let c = popularity_correlation.abs();
                (1.0 - q) * c + noise * (1.0 - c)
            };
            p.clamp(0.1, 1.0)
        })
        .collect();

    (0..count)
        .map(|i| {
            let threshold = base_threshold * (0.8 + 0.4 * quality[i]);
            Grantee::new(
                format!("g{}", i + 1),
                names[i].clone(),
                quality[i],
                popularity[i],
                threshold,
            )
        })
        .collect()
}

const NAME_ADJECTIVES: [&str; 15] = [
    "Decentralized",
    "Autonomous",
    "Open",
    "Distributed",
    "Transparent",
    "Sustainable",
    "Innovative",
    "Community",
    "Global",
    "Resilient",
    "Inclusive",
    "Regenerative",
    "Collaborative",
    "Ethical",
    "Adaptive",
];

const NAME_NOUNS: [&str; 15] = [
    "Protocol",
    "Network",
    "DAO",
    "Platform",
    "Ecosystem",
    "Commons",
    "Initiative",
    "Collective",
    "Foundation",
    "Project",
    "System",
    "Framework",
    "Alliance",
    "Guild",
    "Venture",
];

/// Generate a cosmetic project name ("<Adjective> <Noun>")
fn generate_project_name(rng: &mut RngManager) -> String {
    let adjective = NAME_ADJECTIVES[rng.range(0, NAME_ADJECTIVES.len() as i64) as usize];
    let noun = NAME_NOUNS[rng.range(0, NAME_NOUNS.len() as i64) as usize];
    format!("{} {}", adjective, noun)
}

// ============================================================================
// Coalition setup
// ============================================================================

/// Group a fraction of the members into grantee-focused coalitions
///
/// No-op when members or grantees are empty, or when
/// `coalition_size`/`coalition_focus` are non-positive. Otherwise:
/// `max(1, member_count / 10)` coalitions are formed; `⌊member_count ×
/// coalition_size⌋` members are drawn without replacement; each
/// coalition is assigned `min(coalition_focus, grantee_count)` grantee
/// ids without replacement; members are spread evenly across
/// coalitions, the first `remainder` coalitions taking one extra.
/// Assigned members switch to the coalition strategy.
pub fn setup_coalitions(
    members: &mut [Member],
    grantees: &[Grantee],
    coalition_size: f64,
    coalition_focus: usize,
    rng: &mut RngManager,
) {
    if members.is_empty() || grantees.is_empty() || coalition_size <= 0.0 || coalition_focus == 0 {
        return;
    }

    let num_coalitions = (members.len() / 10).max(1);
    let num_coalition_members = (members.len() as f64 * coalition_size) as usize;

    let member_indices = rng.sample_indices(members.len(), num_coalition_members);

    let focus = coalition_focus.min(grantees.len());
    let coalitions: Vec<Vec<String>> = (0..num_coalitions)
        .map(|_| {
            rng.sample_indices(grantees.len(), focus)
                .into_iter()
                .map(|i| grantees[i].id().to_string())
                .collect()
        })
        .collect();

    let base = num_coalition_members / num_coalitions;
    let remainder = num_coalition_members % num_coalitions;

    let mut member_cursor = 0;
    for (i, coalition) in coalitions.iter().enumerate() {
        let count = base + usize::from(i < remainder);
        for _ in 0..count {
            if let Some(&idx) = member_indices.get(member_cursor) {
                members[idx].join_coalition(coalition.clone());
                member_cursor += 1;
            }
        }
    }
}

// ============================================================================
// Sampling helpers
// ============================================================================

/// Sample from the standard normal distribution (Box-Muller transform)
fn standard_normal(rng: &mut RngManager) -> f64 {
    let u1 = rng.next_f64().max(f64::MIN_POSITIVE); // ln(0) guard
    let u2 = rng.next_f64();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

/// Sample from an exponential distribution with the given rate
fn exponential(rate: f64, rng: &mut RngManager) -> f64 {
    let u = rng.next_f64();
    -(1.0 - u).ln() / rate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::AllocationStrategy;

    #[test]
    fn test_zero_count_yields_empty_cohorts() {
        let mut rng = RngManager::new(42);
        assert!(generate_members(0, VotingPowerDistribution::Equal, 0.5, 1000, &mut rng).is_empty());
        assert!(generate_grantees(0, QualityDistribution::Uniform, 0.5, 1000.0, &mut rng).is_empty());
    }

    #[test]
    fn test_member_ids_sequential() {
        let mut rng = RngManager::new(42);
        let members = generate_members(3, VotingPowerDistribution::Equal, 0.5, 300, &mut rng);
        let ids: Vec<&str> = members.iter().map(|m| m.id()).collect();
        assert_eq!(ids, vec!["m1", "m2", "m3"]);
    }

    #[test]
    fn test_equal_distribution_exact_shares() {
        let mut rng = RngManager::new(42);
        let members = generate_members(4, VotingPowerDistribution::Equal, 0.5, 1000, &mut rng);
        assert_eq!(
            members.iter().map(|m| m.voting_power()).collect::<Vec<_>>(),
            vec![250, 250, 250, 250]
        );
    }

    #[test]
    fn test_all_distributions_hit_exact_total() {
        for (seed, distribution) in [
            (1, VotingPowerDistribution::Equal),
            (2, VotingPowerDistribution::Normal),
            (3, VotingPowerDistribution::Pareto),
            (4, VotingPowerDistribution::Custom),
        ] {
            let mut rng = RngManager::new(seed);
            let members = generate_members(17, distribution, 0.9, 100_000, &mut rng);
            assert_eq!(
                members.iter().map(|m| m.voting_power()).sum::<i64>(),
                100_000,
                "distribution {:?} missed the total",
                distribution
            );
        }
    }

    #[test]
    fn test_custom_low_skew_behaves_as_equal() {
        let mut rng = RngManager::new(42);
        let members = generate_members(5, VotingPowerDistribution::Custom, 0.0, 500, &mut rng);
        assert!(members.iter().all(|m| m.voting_power() == 100));
    }

    #[test]
    fn test_custom_high_skew_more_unequal_than_low_skew() {
        let mut rng = RngManager::new(42);
        let high = generate_members(200, VotingPowerDistribution::Custom, 0.95, 100_000, &mut rng);
        let low = generate_members(200, VotingPowerDistribution::Custom, 0.1, 100_000, &mut rng);

        let spread = |members: &[Member]| {
            let max = members.iter().map(|m| m.voting_power()).max().unwrap();
            let min = members.iter().map(|m| m.voting_power()).min().unwrap();
            max - min
        };
        assert!(spread(&high) > spread(&low));
    }

    #[test]
    fn test_unknown_names_fall_back() {
        assert_eq!(
            VotingPowerDistribution::from_name("zipf"),
            VotingPowerDistribution::Equal
        );
        assert_eq!(
            QualityDistribution::from_name("beta"),
            QualityDistribution::Uniform
        );
    }

    #[test]
    fn test_grantee_scores_within_bounds() {
        for distribution in [
            QualityDistribution::Uniform,
            QualityDistribution::Normal,
            QualityDistribution::Bimodal,
        ] {
            let mut rng = RngManager::new(42);
            let grantees = generate_grantees(50, distribution, 0.5, 1000.0, &mut rng);
            assert_eq!(grantees.len(), 50);
            for g in &grantees {
                assert!((0.1..=1.0).contains(&g.quality()));
                assert!((0.1..=1.0).contains(&g.popularity()));
            }
        }
    }

    #[test]
    fn test_grantee_thresholds_scale_with_quality() {
        let mut rng = RngManager::new(42);
        let grantees = generate_grantees(30, QualityDistribution::Uniform, 0.5, 1000.0, &mut rng);
        for g in &grantees {
            let expected = 1000.0 * (0.8 + 0.4 * g.quality());
            assert!((g.min_funding_threshold() - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_full_positive_correlation_tracks_quality() {
        let mut rng = RngManager::new(42);
        let grantees = generate_grantees(40, QualityDistribution::Uniform, 1.0, 1000.0, &mut rng);
        // corr = 1.0 leaves no room for noise: popularity == quality
        // (up to clipping).
        for g in &grantees {
            assert!((g.popularity() - g.quality().clamp(0.1, 1.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_full_negative_correlation_inverts_quality() {
        let mut rng = RngManager::new(42);
        let grantees = generate_grantees(40, QualityDistribution::Uniform, -1.0, 1000.0, &mut rng);
        for g in &grantees {
            assert!((g.popularity() - (1.0 - g.quality()).clamp(0.1, 1.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_generation_deterministic() {
        let mut rng1 = RngManager::new(42);
        let mut rng2 = RngManager::new(42);

        let a = generate_grantees(10, QualityDistribution::Bimodal, 0.3, 500.0, &mut rng1);
        let b = generate_grantees(10, QualityDistribution::Bimodal, 0.3, 500.0, &mut rng2);

        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.name(), y.name());
            assert_eq!(x.quality(), y.quality());
            assert_eq!(x.popularity(), y.popularity());
        }
    }

    #[test]
    fn test_setup_coalitions_noop_on_degenerate_input() {
        let mut rng = RngManager::new(42);
        let grantees = generate_grantees(5, QualityDistribution::Uniform, 0.5, 1000.0, &mut rng);
        let mut members = generate_members(10, VotingPowerDistribution::Equal, 0.5, 1000, &mut rng);

        setup_coalitions(&mut members, &grantees, 0.0, 2, &mut rng);
        setup_coalitions(&mut members, &grantees, 0.5, 0, &mut rng);
        setup_coalitions(&mut members, &[], 0.5, 2, &mut rng);
        assert!(members.iter().all(|m| m.coalition().is_none()));
    }

    #[test]
    fn test_setup_coalitions_assigns_expected_fraction() {
        let mut rng = RngManager::new(42);
        let grantees = generate_grantees(10, QualityDistribution::Uniform, 0.5, 1000.0, &mut rng);
        let mut members = generate_members(40, VotingPowerDistribution::Equal, 0.5, 4000, &mut rng);

        setup_coalitions(&mut members, &grantees, 0.5, 3, &mut rng);

        let assigned: Vec<&Member> =
            members.iter().filter(|m| m.coalition().is_some()).collect();
        assert_eq!(assigned.len(), 20); // 40 * 0.5

        for member in &assigned {
            assert_eq!(member.strategy(), AllocationStrategy::Coalition);
            let coalition = member.coalition().unwrap();
            assert_eq!(coalition.len(), 3);

            // Grantee ids are distinct and real.
            let mut sorted = coalition.to_vec();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), 3);
            for id in coalition {
                assert!(grantees.iter().any(|g| g.id() == id));
            }
        }
    }

    #[test]
    fn test_setup_coalitions_focus_capped_at_grantee_count() {
        let mut rng = RngManager::new(42);
        let grantees = generate_grantees(2, QualityDistribution::Uniform, 0.5, 1000.0, &mut rng);
        let mut members = generate_members(10, VotingPowerDistribution::Equal, 0.5, 1000, &mut rng);

        setup_coalitions(&mut members, &grantees, 1.0, 5, &mut rng);

        for member in members.iter().filter(|m| m.coalition().is_some()) {
            assert_eq!(member.coalition().unwrap().len(), 2);
        }
    }
}
