//! Utility functions for radar-lead.

/// Arithmetic mean of a sequence.
///
/// # Panics
/// Panics if the sequence is empty; the mean of nothing is undefined and
/// callers must never ask for it.
pub fn mean<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    assert!(count > 0, "mean of an empty sequence");
    sum / count as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean() {
        assert_relative_eq!(mean([1.0, 2.0, 3.0, 6.0]), 3.0);
        assert_relative_eq!(mean(vec![-4.5]), -4.5);
    }

    #[test]
    #[should_panic(expected = "mean of an empty sequence")]
    fn test_mean_empty_panics() {
        mean(Vec::<f64>::new());
    }
}
