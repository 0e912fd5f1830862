use crate::{
    error::{NetError, Result},
    math::matrix::Matrix,
    network::Network,
    optim::sgd::Sgd,
};

/// Cost gradients for every weighted layer, indexed like the network's layers.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradients {
    pub weights: Vec<Matrix>,
    pub biases: Vec<Vec<f64>>,
}

/// Everything one backward pass produces for a single example.
#[derive(Debug, Clone, PartialEq)]
pub struct Backprop {
    pub cost: f64,
    pub output: Vec<f64>,
    pub gradients: Gradients,
}

/// Outcome of one [`learn`] call: the cost and output measured before the update.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub cost: f64,
    pub output: Vec<f64>,
}

/// Sum of squared differences.
pub fn squared_error(output: &[f64], target: &[f64]) -> f64 {
    output.iter().zip(target).map(|(o, t)| (o - t).powi(2)).sum()
}

/// Forward pass plus reverse-mode gradients of the squared-error cost for one example.
/// The network is not modified.
pub fn compute_gradients(network: &Network, input: &[f64], target: &[f64]) -> Result<Backprop> {
    NetError::check_len("target", network.output_size(), target.len())?;

    let pass = network.run(input, true, true)?;
    let (Some(outputs), Some(pre_activations)) = (pass.layer_outputs, pass.pre_activations) else {
        unreachable!("run was asked to capture both traces");
    };
    let output = pass.output;
    let cost = squared_error(&output, target);

    // ∂cost/∂output
    let mut delta: Vec<f64> = output.iter().zip(target).map(|(o, t)| 2.0 * (o - t)).collect();

    let layers = network.layers();
    let mut weights_grad = Vec::with_capacity(layers.len());
    let mut biases_grad = Vec::with_capacity(layers.len());

    for i in (1..=layers.len()).rev() {
        let layer = &layers[i - 1];
        for (d, &z) in delta.iter_mut().zip(&pre_activations[i]) {
            *d *= layer.activation().derivative(z);
        }
        weights_grad.push(Matrix::outer(&delta, &outputs[i - 1]));
        let next_delta = layer.weights().transpose_mul_vec(&delta);
        biases_grad.push(delta);
        delta = next_delta;
    }

    weights_grad.reverse();
    biases_grad.reverse();

    Ok(Backprop {
        cost,
        output,
        gradients: Gradients {
            weights: weights_grad,
            biases: biases_grad,
        },
    })
}

/// One step of single-example gradient descent.  Returns the cost and output from
/// before the parameters were updated.
pub fn learn(network: &mut Network, input: &[f64], target: &[f64], learning_rate: f64) -> Result<Step> {
    let Backprop { cost, output, gradients } = compute_gradients(network, input, target)?;
    Sgd::new(learning_rate).step(network, &gradients);
    Ok(Step { cost, output })
}
