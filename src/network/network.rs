use rand::Rng;
use tracing::debug;

use crate::activation::activation::ActivationFunction;
use crate::error::{NetworkError, Result};
use crate::math::matrix::Matrix;

pub const DEFAULT_LEARNING_RATE: f64 = 0.1;

/// Feedforward network with a single hidden layer.
///
/// Weights are stored as `(to, from)` matrices and biases as column matrices,
/// so a layer is evaluated as `activation(W · x + b)` on column vectors.
#[derive(Debug)]
pub struct NeuralNetwork {
    input_nodes: usize,
    hidden_nodes: usize,
    output_nodes: usize,
    weights_ih: Matrix,
    weights_ho: Matrix,
    hidden_bias: Matrix,
    output_bias: Matrix,
    learning_rate: f64,
    activation: ActivationFunction,
}

/// Activated layers of one forward pass, all as column matrices.
struct ForwardPass {
    input: Matrix,
    hidden: Matrix,
    output: Matrix,
}

impl NeuralNetwork {
    /// Builds a network with weights and biases drawn uniformly from [-1, 1).
    pub fn new(input_nodes: usize, hidden_nodes: usize, output_nodes: usize) -> NeuralNetwork {
        NeuralNetwork::with_rng(input_nodes, hidden_nodes, output_nodes, &mut rand::thread_rng())
    }

    /// Same as `new`, drawing the initial parameters from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(
        input_nodes: usize,
        hidden_nodes: usize,
        output_nodes: usize,
        rng: &mut R,
    ) -> NeuralNetwork {
        let mut weights_ih = Matrix::zeros(hidden_nodes, input_nodes);
        let mut weights_ho = Matrix::zeros(output_nodes, hidden_nodes);
        weights_ih.randomize_with(rng);
        weights_ho.randomize_with(rng);

        let mut hidden_bias = Matrix::zeros(hidden_nodes, 1);
        let mut output_bias = Matrix::zeros(output_nodes, 1);
        hidden_bias.randomize_with(rng);
        output_bias.randomize_with(rng);

        let mut network = NeuralNetwork {
            input_nodes,
            hidden_nodes,
            output_nodes,
            weights_ih,
            weights_ho,
            hidden_bias,
            output_bias,
            learning_rate: DEFAULT_LEARNING_RATE,
            activation: ActivationFunction::default(),
        };
        network.set_activation_function(ActivationFunction::Tanh);

        debug!(input_nodes, hidden_nodes, output_nodes, "created network");
        network
    }

    /// Copies topology, weights and biases of `other` into independent storage.
    /// Learning rate and activation start from the defaults again.
    pub fn from_network(other: &NeuralNetwork) -> NeuralNetwork {
        let mut network = NeuralNetwork {
            input_nodes: other.input_nodes,
            hidden_nodes: other.hidden_nodes,
            output_nodes: other.output_nodes,
            weights_ih: other.weights_ih.clone(),
            weights_ho: other.weights_ho.clone(),
            hidden_bias: other.hidden_bias.clone(),
            output_bias: other.output_bias.clone(),
            learning_rate: DEFAULT_LEARNING_RATE,
            activation: ActivationFunction::default(),
        };
        network.set_activation_function(ActivationFunction::Tanh);

        debug!(
            input_nodes = network.input_nodes,
            hidden_nodes = network.hidden_nodes,
            output_nodes = network.output_nodes,
            "copied network"
        );
        network
    }

    pub fn set_learning_rate(&mut self, learning_rate: f64) {
        debug!(learning_rate, "learning rate changed");
        self.learning_rate = learning_rate;
    }

    pub fn set_activation_function(&mut self, activation: ActivationFunction) {
        debug!(activation = activation.name(), "activation changed");
        self.activation = activation;
    }

    pub fn input_nodes(&self) -> usize {
        self.input_nodes
    }

    pub fn hidden_nodes(&self) -> usize {
        self.hidden_nodes
    }

    pub fn output_nodes(&self) -> usize {
        self.output_nodes
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn activation_function(&self) -> ActivationFunction {
        self.activation
    }

    pub fn weights_ih(&self) -> &Matrix {
        &self.weights_ih
    }

    pub fn weights_ho(&self) -> &Matrix {
        &self.weights_ho
    }

    pub fn hidden_bias(&self) -> &Matrix {
        &self.hidden_bias
    }

    pub fn output_bias(&self) -> &Matrix {
        &self.output_bias
    }

    /// Runs the forward pass and returns the `output_nodes` activations.
    pub fn predict(&self, input: &[f64]) -> Result<Vec<f64>> {
        check_len("input", input, self.input_nodes)?;
        Ok(self.forward(input)?.output.to_array())
    }

    /// One step of stochastic gradient descent on a single `(input, target)` pair.
    ///
    /// The hidden-layer error is propagated through `weights_ho` *after* that
    /// matrix has been updated in this same step.
    pub fn train(&mut self, input: &[f64], target: &[f64]) -> Result<()> {
        check_len("input", input, self.input_nodes)?;
        check_len("target", target, self.output_nodes)?;

        let ForwardPass { input, hidden, output } = self.forward(input)?;

        let targets = Matrix::from_array(target);
        let output_errors = targets.subtract(&output)?;

        let mut gradients = output.map(|y| self.activation.derivative(y));
        gradients.multiply(&output_errors)?;
        gradients.multiply_scalar(self.learning_rate);

        let delta_weights_ho = gradients.product(&hidden.transpose())?;
        self.weights_ho.add(&delta_weights_ho)?;
        self.output_bias.add(&gradients)?;

        let hidden_errors = self.weights_ho.transpose().product(&output_errors)?;

        let mut hidden_gradients = hidden.map(|y| self.activation.derivative(y));
        hidden_gradients.multiply(&hidden_errors)?;
        hidden_gradients.multiply_scalar(self.learning_rate);

        let delta_weights_ih = hidden_gradients.product(&input.transpose())?;
        self.weights_ih.add(&delta_weights_ih)?;
        self.hidden_bias.add(&hidden_gradients)?;

        Ok(())
    }

    fn forward(&self, input: &[f64]) -> Result<ForwardPass> {
        let input = Matrix::from_array(input);

        let mut hidden = self.weights_ih.product(&input)?;
        hidden.add(&self.hidden_bias)?;
        let hidden = hidden.map(|x| self.activation.function(x));

        let mut output = self.weights_ho.product(&hidden)?;
        output.add(&self.output_bias)?;
        let output = output.map(|x| self.activation.function(x));

        Ok(ForwardPass { input, hidden, output })
    }
}

fn check_len(name: &str, values: &[f64], expected: usize) -> Result<()> {
    if values.len() != expected {
        return Err(NetworkError::InvalidArgument(format!(
            "{name} has {} values, network expects {expected}",
            values.len()
        )));
    }
    Ok(())
}
