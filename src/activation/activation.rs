use serde::{Deserialize, Serialize};
use std::f64::consts::E;

/// Element-wise nonlinearity paired with its derivative.
///
/// `derivative` is expressed in terms of the activation's **output**: it is
/// called on values that already went through `function`, never on the
/// pre-activation sums. For sigmoid that is `y * (1 - y)`, for tanh `1 - y²`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationFunction {
    #[default]
    Sigmoid,
    Tanh,
    #[serde(rename = "relu")]
    ReLU,
    /// Caller-supplied pair. `derivative` must follow the output-domain
    /// convention described above.
    #[serde(skip)]
    Custom {
        function: fn(f64) -> f64,
        derivative: fn(f64) -> f64,
    },
}

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => 1.0 / (1.0 + E.powf(-x)),
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::ReLU => if x > 0.0 { x } else { 0.0 },
            ActivationFunction::Custom { function, .. } => function(x),
        }
    }

    /// Derivative evaluated at `y = function(x)`.
    pub fn derivative(&self, y: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => y * (1.0 - y),
            ActivationFunction::Tanh => 1.0 - y * y,
            ActivationFunction::ReLU => if y > 0.0 { 1.0 } else { 0.0 },
            ActivationFunction::Custom { derivative, .. } => derivative(y),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ActivationFunction::Sigmoid => "sigmoid",
            ActivationFunction::Tanh => "tanh",
            ActivationFunction::ReLU => "relu",
            ActivationFunction::Custom { .. } => "custom",
        }
    }
}
