use rand::Rng;
use tracing::info;

use crate::error::{NetworkError, Result};
use crate::loss::mse::MseLoss;
use crate::network::network::NeuralNetwork;

/// One training example.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub input: Vec<f64>,
    pub target: Vec<f64>,
}

impl Sample {
    pub fn new(input: Vec<f64>, target: Vec<f64>) -> Sample {
        Sample { input, target }
    }
}

/// The four XOR pairs.
pub fn xor_dataset() -> Vec<Sample> {
    vec![
        Sample::new(vec![0.0, 1.0], vec![1.0]),
        Sample::new(vec![1.0, 0.0], vec![1.0]),
        Sample::new(vec![1.0, 1.0], vec![0.0]),
        Sample::new(vec![0.0, 0.0], vec![0.0]),
    ]
}

/// Runs `iterations` training steps, each on a sample drawn uniformly (with
/// replacement) from `samples`. Returns the mean loss over `samples` afterwards.
pub fn train_sampled<R: Rng + ?Sized>(
    network: &mut NeuralNetwork,
    samples: &[Sample],
    iterations: usize,
    log_every: usize,
    rng: &mut R,
) -> Result<f64> {
    if samples.is_empty() {
        return Err(NetworkError::InvalidArgument("training set is empty".into()));
    }

    for step in 1..=iterations {
        let sample = &samples[rng.gen_range(0..samples.len())];
        network.train(&sample.input, &sample.target)?;

        if log_every > 0 && step % log_every == 0 {
            let loss = evaluate(network, samples)?;
            info!("step {step}/{iterations}: loss = {loss:.6}");
        }
    }

    evaluate(network, samples)
}

/// Mean squared error of `network` over `samples`.
pub fn evaluate(network: &NeuralNetwork, samples: &[Sample]) -> Result<f64> {
    if samples.is_empty() {
        return Ok(0.0);
    }
    let mut total = 0.0;
    for sample in samples {
        let output = network.predict(&sample.input)?;
        total += MseLoss::loss(&output, &sample.target);
    }
    Ok(total / samples.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn xor_dataset_order() {
        let data = xor_dataset();
        let pairs: Vec<(Vec<f64>, f64)> =
            data.into_iter().map(|s| (s.input, s.target[0])).collect();
        assert_eq!(
            pairs,
            vec![
                (vec![0.0, 1.0], 1.0),
                (vec![1.0, 0.0], 1.0),
                (vec![1.0, 1.0], 0.0),
                (vec![0.0, 0.0], 0.0),
            ]
        );
    }

    #[test]
    fn empty_training_set_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut net = NeuralNetwork::with_rng(2, 2, 1, &mut rng);
        let err = train_sampled(&mut net, &[], 10, 0, &mut rng).unwrap_err();
        assert!(matches!(err, NetworkError::InvalidArgument(_)));
    }

    #[test]
    fn malformed_sample_surfaces_error() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut net = NeuralNetwork::with_rng(2, 2, 1, &mut rng);
        let bad = [Sample::new(vec![1.0], vec![1.0])];
        assert!(train_sampled(&mut net, &bad, 1, 0, &mut rng).is_err());
    }

    #[test]
    fn zero_iterations_only_evaluates() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut net = NeuralNetwork::with_rng(2, 3, 1, &mut rng);
        let before = net.weights_ih().clone();
        let data = xor_dataset();
        let loss = train_sampled(&mut net, &data, 0, 0, &mut rng).unwrap();
        assert_eq!(net.weights_ih(), &before);
        assert_eq!(loss, evaluate(&net, &data).unwrap());
    }

    #[test]
    fn sampled_training_lowers_dataset_loss() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut net = NeuralNetwork::with_rng(2, 4, 1, &mut rng);
        let data = xor_dataset();
        let initial = evaluate(&net, &data).unwrap();
        let trained = train_sampled(&mut net, &data, 5_000, 1_000, &mut rng).unwrap();
        assert!(trained < initial, "{trained} >= {initial}");
    }
}
