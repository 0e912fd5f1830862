use crate::{activation::ActivationFunction, math::matrix::Matrix, random::RandomSource};

/// One weighted layer: the incoming weights, biases and activation of every neuron in it.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub(crate) weights: Matrix,
    pub(crate) biases: Vec<f64>,
    pub(crate) activation: ActivationFunction,
}

impl Layer {
    /// Zero-initialized layer of `size` neurons fed by `input_size` values.
    pub fn new(size: usize, input_size: usize, activation: ActivationFunction) -> Layer {
        Layer {
            weights: Matrix::zeros(size, input_size),
            biases: vec![0.0; size],
            activation,
        }
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    pub fn biases(&self) -> &[f64] {
        &self.biases
    }

    pub fn activation(&self) -> ActivationFunction {
        self.activation
    }

    /// Weighted sums `z = W·x + b`, before the activation.
    pub fn pre_activate(&self, input: &[f64]) -> Vec<f64> {
        let mut z = self.weights.mul_vec(input);
        for (zj, b) in z.iter_mut().zip(&self.biases) {
            *zj += b;
        }
        z
    }

    pub fn activate(&self, z: &[f64]) -> Vec<f64> {
        z.iter().map(|&x| self.activation.eval(x)).collect()
    }

    pub fn randomize(&mut self, rng: &mut RandomSource, weight_range: (f64, f64), bias_range: (f64, f64)) {
        self.weights.for_each_mut(|w| *w = rng.uniform_real(weight_range.0, weight_range.1));
        for b in &mut self.biases {
            *b = rng.uniform_real(bias_range.0, bias_range.1);
        }
    }

    /// Adds an independent sample of `[-max_delta, max_delta)` to every parameter.
    pub fn vary(&mut self, rng: &mut RandomSource, max_delta: f64) {
        self.weights.for_each_mut(|w| *w += rng.uniform_real(-max_delta, max_delta));
        for b in &mut self.biases {
            *b += rng.uniform_real(-max_delta, max_delta);
        }
    }

    /// Applies pre-computed gradients scaled by lr.
    pub fn apply_gradients(&mut self, weights_grad: &Matrix, biases_grad: &[f64], lr: f64) {
        self.weights.sub_scaled(weights_grad, lr);
        for (b, g) in self.biases.iter_mut().zip(biases_grad) {
            *b -= lr * g;
        }
    }
}
