pub mod network;

pub use network::{NeuralNetwork, DEFAULT_LEARNING_RATE};
