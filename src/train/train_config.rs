use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::activation::activation::ActivationFunction;
use crate::error::{NetworkError, Result};
use crate::network::network::{NeuralNetwork, DEFAULT_LEARNING_RATE};

/// Configuration for one training run of the driver.
///
/// Every field has a default, so a JSON file only needs the keys it changes:
///
/// ```json
/// { "hidden_nodes": 8, "iterations": 50000, "seed": 3 }
/// ```
///
/// This describes how to build and train a network; it never carries weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub input_nodes: usize,
    pub hidden_nodes: usize,
    pub output_nodes: usize,
    pub learning_rate: f64,
    pub activation: ActivationFunction,
    /// Number of single-sample training steps.
    pub iterations: usize,
    /// Log the dataset loss every this many steps; `0` disables progress logs.
    pub log_every: usize,
    /// Seed for weight initialisation and sampling. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            input_nodes: 2,
            hidden_nodes: 4,
            output_nodes: 1,
            learning_rate: DEFAULT_LEARNING_RATE,
            activation: ActivationFunction::Tanh,
            iterations: 20_000,
            log_every: 2_000,
            seed: None,
        }
    }
}

impl TrainConfig {
    pub fn load_json(path: impl AsRef<Path>) -> Result<TrainConfig> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| NetworkError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|source| NetworkError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let writer = std::io::BufWriter::new(file);
        Ok(serde_json::to_writer_pretty(writer, self)?)
    }

    /// RNG for this run: seeded when `seed` is set, entropy-seeded otherwise.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    pub fn build_network<R: Rng + ?Sized>(&self, rng: &mut R) -> NeuralNetwork {
        let mut network =
            NeuralNetwork::with_rng(self.input_nodes, self.hidden_nodes, self.output_nodes, rng);
        network.set_learning_rate(self.learning_rate);
        network.set_activation_function(self.activation);
        network
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: TrainConfig =
            serde_json::from_str(r#"{ "hidden_nodes": 8, "activation": "sigmoid", "seed": 3 }"#)
                .unwrap();
        assert_eq!(config.input_nodes, 2);
        assert_eq!(config.hidden_nodes, 8);
        assert_eq!(config.iterations, 20_000);
        assert_eq!(config.learning_rate, 0.1);
        assert_eq!(config.seed, Some(3));
        assert!(matches!(config.activation, ActivationFunction::Sigmoid));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        let config = TrainConfig { iterations: 10, seed: Some(11), ..TrainConfig::default() };

        config.save_json(&path).unwrap();
        let loaded = TrainConfig::load_json(&path).unwrap();
        assert_eq!(loaded.iterations, 10);
        assert_eq!(loaded.seed, Some(11));
        assert!(matches!(loaded.activation, ActivationFunction::Tanh));
    }

    #[test]
    fn missing_and_malformed_files_are_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = TrainConfig::load_json(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(missing, NetworkError::Io { .. }));

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{ \"iterations\": \"many\" }").unwrap();
        assert!(matches!(TrainConfig::load_json(&bad), Err(NetworkError::Config(_))));
    }

    #[test]
    fn build_network_applies_hyper_parameters() {
        let config = TrainConfig {
            hidden_nodes: 6,
            learning_rate: 0.05,
            activation: ActivationFunction::ReLU,
            seed: Some(1),
            ..TrainConfig::default()
        };
        let network = config.build_network(&mut config.rng());
        assert_eq!(network.hidden_nodes(), 6);
        assert_eq!(network.learning_rate(), 0.05);
        assert!(matches!(network.activation_function(), ActivationFunction::ReLU));
    }
}
