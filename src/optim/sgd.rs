use crate::{network::Network, train::backprop::Gradients};

/// Plain stochastic gradient descent with a fixed learning rate.
///
/// The learning rate is not validated; a non-positive value is a caller error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Applies one descent step: every parameter moves by `-learning_rate * gradient`.
    pub fn step(&self, network: &mut Network, gradients: &Gradients) {
        for ((layer, w_grad), b_grad) in network
            .layers_mut()
            .iter_mut()
            .zip(&gradients.weights)
            .zip(&gradients.biases)
        {
            layer.apply_gradients(w_grad, b_grad, self.learning_rate);
        }
    }
}
