pub struct MseLoss;

impl MseLoss {
    /// Scalar MSE: mean((predicted - expected)²). Zero for empty slices.
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        if predicted.is_empty() {
            return 0.0;
        }
        let n = predicted.len() as f64;
        predicted.iter().zip(expected.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>() / n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn mean_of_squared_differences() {
        assert_relative_eq!(MseLoss::loss(&[1.0, 0.0], &[0.0, 0.0]), 0.5);
        assert_relative_eq!(MseLoss::loss(&[0.5, -0.5], &[0.5, 0.5]), 0.5);
        assert_eq!(MseLoss::loss(&[], &[]), 0.0);
    }
}
