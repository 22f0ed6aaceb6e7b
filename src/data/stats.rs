//! Summary statistics over distance sequences.

use super::models::Stats;

/// Compute total, mean, median and sample standard deviation.
///
/// Empty input yields all zeros; a single value has a standard deviation of
/// zero. The median is taken over the values sorted ascending, so input
/// order does not matter.
pub fn compute_stats(values: &[f64]) -> Stats {
    match values {
        [] => Stats::default(),
        [v] => Stats {
            total: *v,
            mean: *v,
            median: *v,
            stdev: 0.0,
        },
        _ => {
            let n = values.len() as f64;
            let total: f64 = values.iter().sum();
            let mean = total / n;
            Stats {
                total,
                mean,
                median: median(values),
                stdev: sample_stdev(values, mean),
            }
        }
    }
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Bessel-corrected standard deviation; degenerate results collapse to 0
fn sample_stdev(values: &[f64], mean: f64) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let sd = variance.sqrt();
    if sd.is_finite() {
        sd
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_empty_is_all_zero() {
        let stats = compute_stats(&[]);
        assert_eq!(
            stats,
            Stats {
                total: 0.0,
                mean: 0.0,
                median: 0.0,
                stdev: 0.0
            }
        );
    }

    #[test]
    fn test_single_value() {
        let stats = compute_stats(&[5.0]);
        assert_eq!(
            stats,
            Stats {
                total: 5.0,
                mean: 5.0,
                median: 5.0,
                stdev: 0.0
            }
        );
    }

    #[test]
    fn test_four_values() {
        let stats = compute_stats(&[1.0, 2.0, 3.0, 4.0]);
        assert!(approx(stats.total, 10.0));
        assert!(approx(stats.mean, 2.5));
        assert!(approx(stats.median, 2.5));
        assert!(approx(stats.stdev, 1.2910));
    }

    #[test]
    fn test_even_median_ignores_input_order() {
        let a = compute_stats(&[4.0, 1.0, 10.0, 2.0]);
        let b = compute_stats(&[10.0, 2.0, 1.0, 4.0]);
        assert!(approx(a.median, 3.0));
        assert!(approx(b.median, 3.0));
    }

    #[test]
    fn test_odd_median() {
        let stats = compute_stats(&[7.0, 1.0, 3.0]);
        assert!(approx(stats.median, 3.0));
    }

    #[test]
    fn test_identical_values_have_zero_stdev() {
        let stats = compute_stats(&[3.0, 3.0, 3.0]);
        assert_eq!(stats.stdev, 0.0);
        assert!(approx(stats.mean, 3.0));
    }

    #[test]
    fn test_overflowing_input_falls_back_to_zero_stdev() {
        let stats = compute_stats(&[f64::MAX, f64::MAX]);
        assert_eq!(stats.stdev, 0.0);
    }
}
