pub mod error;
pub mod math;
pub mod activation;
pub mod network;
pub mod loss;
pub mod train;

// Convenience re-exports
pub use error::{NetworkError, Result};
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use network::network::NeuralNetwork;
pub use loss::mse::MseLoss;
pub use train::train_config::TrainConfig;
pub use train::trainer::{evaluate, train_sampled, xor_dataset, Sample};
