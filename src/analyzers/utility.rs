/// Computes the median of a sample of per-date totals. Returns 0.0 for
/// empty input; even-length samples average the two middle values.
pub fn median(values: &[u64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid] as f64
    } else {
        (sorted[mid - 1] + sorted[mid]) as f64 / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_empty() {
        assert_eq!(median(&[]), 0.0);
    }

    #[test]
    fn test_median_single_value() {
        assert_eq!(median(&[15]), 15.0);
    }

    #[test]
    fn test_median_odd_length() {
        assert_eq!(median(&[9, 1, 5]), 5.0);
    }

    #[test]
    fn test_median_even_length_averages_middles() {
        assert_eq!(median(&[4, 1, 3, 2]), 2.5);
    }
}
