//! Statistical helpers used by the calibration stage

/// Arithmetic mean of a slice, `0.0` for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation around a known mean
///
/// Population (not sample) form, dividing by `n`, to match the statistics
/// used when the calibration window was recorded. A window of identical
/// values legitimately yields `0.0`.
pub fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance =
        values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Sliding median filter over a signal
///
/// For each element, takes the median of a window of `taps` elements
/// centered on it, clamped at the signal edges. Used to knock outlier
/// spikes out of a calibration column before computing its statistics.
///
/// # Arguments
/// * `values` - Input signal
/// * `taps` - Window width; must be odd
pub fn sliding_median(values: &[f64], taps: usize) -> Vec<f64> {
    debug_assert!(taps % 2 == 1, "median window must be odd");
    let half = taps / 2;
    let mut window = Vec::with_capacity(taps);
    let mut filtered = Vec::with_capacity(values.len());

    for i in 0..values.len() {
        let start = i.saturating_sub(half);
        let end = (i + half + 1).min(values.len());
        window.clear();
        window.extend_from_slice(&values[start..end]);
        window.sort_by(|a, b| a.total_cmp(b));

        let mid = window.len() / 2;
        let median = if window.len() % 2 == 1 {
            window[mid]
        } else {
            (window[mid - 1] + window[mid]) * 0.5
        };
        filtered.push(median);
    }

    filtered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_basic() {
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), 2.5);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_population_std_dev() {
        // Classic example: {2, 4, 4, 4, 5, 5, 7, 9} has population stddev 2
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let m = mean(&values);
        assert_eq!(m, 5.0);
        assert!((population_std_dev(&values, m) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_std_dev_of_constant_signal_is_zero() {
        let values = [3.3; 100];
        assert_eq!(population_std_dev(&values, mean(&values)), 0.0);
    }

    #[test]
    fn test_sliding_median_suppresses_spike() {
        let mut values = vec![1.0; 21];
        values[10] = 50.0; // single outlier
        let filtered = sliding_median(&values, 7);
        assert_eq!(filtered, vec![1.0; 21]);
    }

    #[test]
    fn test_sliding_median_preserves_length_and_edges() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let filtered = sliding_median(&values, 3);
        assert_eq!(filtered.len(), values.len());
        // First window is [1, 2], even length, averaged
        assert_eq!(filtered[0], 1.5);
        assert_eq!(filtered[2], 3.0);
    }
}
