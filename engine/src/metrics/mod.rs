//! Distribution metrics
//!
//! Pure post-hoc computations over funding snapshots: the Gini
//! coefficient of a value distribution and the concentration ratio
//! (share of funds flowing to the top-n grantees). Neither mutates any
//! simulation state; both degrade to 0 on empty or all-zero input
//! instead of faulting.

use std::collections::BTreeMap;

/// Gini coefficient of a value distribution
///
/// 0 means perfect equality; values approach 1 as the distribution
/// concentrates. Empty or all-zero input yields 0. Uses the standard
/// rank-weighted formula over the ascending sort:
/// `(2·Σ rank·value) / (n·Σ value) − (n+1)/n`.
///
/// # Example
/// ```
/// use council_simulator_core_rs::metrics::gini;
///
/// assert_eq!(gini(&[]), 0.0);
/// assert_eq!(gini(&[5.0, 5.0, 5.0]), 0.0);
/// assert!(gini(&[0.0, 0.0, 100.0]) > 0.6);
/// ```
pub fn gini(values: &[f64]) -> f64 {
    let total: f64 = values.iter().sum();
    if values.is_empty() || total == 0.0 {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len() as f64;
    let rank_weighted: f64 = sorted
        .iter()
        .enumerate()
        .map(|(i, v)| (i + 1) as f64 * v)
        .sum();

    (2.0 * rank_weighted) / (n * total) - (n + 1.0) / n
}

/// Percentage of total funds received by the top `n` grantees
///
/// Returns a value in [0, 100]; 0 for an empty map or zero total. With
/// fewer than `n` grantees the ratio covers all of them (100%).
///
/// # Example
/// ```
/// use council_simulator_core_rs::metrics::concentration_ratio;
/// use std::collections::BTreeMap;
///
/// let mut distribution = BTreeMap::new();
/// distribution.insert("g1".to_string(), 80.0);
/// distribution.insert("g2".to_string(), 15.0);
/// distribution.insert("g3".to_string(), 5.0);
///
/// let ratio = concentration_ratio(&distribution, 2);
/// assert!((ratio - 95.0).abs() < 1e-9);
/// ```
pub fn concentration_ratio(distribution: &BTreeMap<String, f64>, n: usize) -> f64 {
    if distribution.is_empty() {
        return 0.0;
    }

    let total: f64 = distribution.values().sum();
    if total == 0.0 {
        return 0.0;
    }

    let mut amounts: Vec<f64> = distribution.values().copied().collect();
    amounts.sort_by(|a, b| b.total_cmp(a));

    let top: f64 = amounts.iter().take(n).sum();
    top / total * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distribution(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_gini_empty_and_zero() {
        assert_eq!(gini(&[]), 0.0);
        assert_eq!(gini(&[0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_gini_equal_values_zero() {
        assert!(gini(&[7.0, 7.0, 7.0, 7.0]).abs() < 1e-12);
    }

    #[test]
    fn test_gini_known_value() {
        // [1, 3]: (2*(1*1 + 2*3)) / (2*4) - 3/2 = 14/8 - 1.5 = 0.25
        assert!((gini(&[1.0, 3.0]) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_gini_order_independent() {
        let a = gini(&[1.0, 5.0, 3.0, 9.0]);
        let b = gini(&[9.0, 1.0, 3.0, 5.0]);
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn test_gini_pigou_dalton_transfer() {
        // Moving value from a poorer to a richer entry never decreases
        // the coefficient.
        let before = gini(&[10.0, 20.0, 30.0]);
        let after = gini(&[5.0, 20.0, 35.0]);
        assert!(after >= before);
    }

    #[test]
    fn test_concentration_empty_and_zero() {
        assert_eq!(concentration_ratio(&BTreeMap::new(), 3), 0.0);
        assert_eq!(
            concentration_ratio(&distribution(&[("g1", 0.0), ("g2", 0.0)]), 3),
            0.0
        );
    }

    #[test]
    fn test_concentration_top_n_covers_all() {
        let d = distribution(&[("g1", 10.0), ("g2", 20.0)]);
        assert!((concentration_ratio(&d, 5) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_concentration_top_one() {
        let d = distribution(&[("g1", 50.0), ("g2", 30.0), ("g3", 20.0)]);
        assert!((concentration_ratio(&d, 1) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_concentration_within_bounds() {
        let d = distribution(&[("g1", 1.0), ("g2", 2.0), ("g3", 3.0), ("g4", 4.0)]);
        for n in 0..6 {
            let ratio = concentration_ratio(&d, n);
            assert!((0.0..=100.0).contains(&ratio));
        }
    }
}
