use serde::{Serialize, Deserialize};

use crate::{
    activation::ActivationFunction,
    error::{NetError, Result},
    layers::dense::Layer,
    math::matrix::Matrix,
    random::RandomSource,
};

/// How the raw input vector becomes layer 0's output.
///
/// The historical behaviour runs the input through the first activation before any weighted
/// layer sees it; `PassThrough` feeds it in untouched.  Which one a given model was trained
/// with is part of the model, so it is stored alongside the weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputPolicy {
    #[default]
    Activate,
    PassThrough,
}

/// Result of one forward pass.
///
/// `layer_outputs` and `pre_activations` are only filled when requested; both hold one entry
/// per layer including layer 0 (the possibly-activated input, and the raw input respectively).
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardPass {
    pub output: Vec<f64>,
    pub layer_outputs: Option<Vec<Vec<f64>>>,
    pub pre_activations: Option<Vec<Vec<f64>>>,
}

/// Fully connected feed-forward network.
///
/// `layers[i]` holds the incoming weights, biases and activation of layer `i + 1`.
/// Cloning yields an independent deep copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    layer_sizes: Vec<usize>,
    layers: Vec<Layer>,
    input_policy: InputPolicy,
}

impl Network {
    /// Builds a zero-initialized network.  `activations[i]` drives layer `i + 1`.
    pub fn new(layer_sizes: &[usize], activations: &[ActivationFunction]) -> Result<Network> {
        validate_topology(layer_sizes, activations)?;
        let layers = layer_sizes
            .windows(2)
            .zip(activations)
            .map(|(pair, &activation)| Layer::new(pair[1], pair[0], activation))
            .collect();
        Ok(Network {
            layer_sizes: layer_sizes.to_vec(),
            layers,
            input_policy: InputPolicy::default(),
        })
    }

    /// Reassembles a network from its exposed parts, checking every shape.
    pub fn from_parts(
        layer_sizes: Vec<usize>,
        weights: Vec<Matrix>,
        biases: Vec<Vec<f64>>,
        activations: Vec<ActivationFunction>,
    ) -> Result<Network> {
        validate_topology(&layer_sizes, &activations)?;
        let expected = layer_sizes.len() - 1;
        NetError::check_len("weight matrices", expected, weights.len())?;
        NetError::check_len("bias vectors", expected, biases.len())?;

        let mut layers = Vec::with_capacity(expected);
        for (i, ((w, b), activation)) in weights.into_iter().zip(biases).zip(activations).enumerate() {
            NetError::check_len("weight rows", layer_sizes[i + 1], w.rows)?;
            NetError::check_len("weight rows", layer_sizes[i + 1], w.data.len())?;
            NetError::check_len("weight columns", layer_sizes[i], w.cols)?;
            for row in &w.data {
                NetError::check_len("weight row", layer_sizes[i], row.len())?;
            }
            NetError::check_len("biases", layer_sizes[i + 1], b.len())?;
            layers.push(Layer { weights: w, biases: b, activation });
        }

        Ok(Network {
            layer_sizes,
            layers,
            input_policy: InputPolicy::default(),
        })
    }

    pub fn with_input_policy(mut self, policy: InputPolicy) -> Network {
        self.input_policy = policy;
        self
    }

    pub fn input_policy(&self) -> InputPolicy {
        self.input_policy
    }

    pub fn layer_sizes(&self) -> &[usize] {
        &self.layer_sizes
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub(crate) fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }

    pub fn weights(&self) -> impl Iterator<Item = &Matrix> + '_ {
        self.layers.iter().map(Layer::weights)
    }

    pub fn biases(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.layers.iter().map(Layer::biases)
    }

    pub fn activations(&self) -> impl Iterator<Item = ActivationFunction> + '_ {
        self.layers.iter().map(Layer::activation)
    }

    pub fn input_size(&self) -> usize {
        self.layer_sizes[0]
    }

    pub fn output_size(&self) -> usize {
        self.layer_sizes[self.layer_sizes.len() - 1]
    }

    /// Draws every weight from `weight_range` and every bias from `bias_range`, both `[min, max)`.
    pub fn randomize(&mut self, rng: &mut RandomSource, weight_range: (f64, f64), bias_range: (f64, f64)) {
        for layer in &mut self.layers {
            layer.randomize(rng, weight_range, bias_range);
        }
    }

    /// Perturbs every weight and bias by an independent uniform sample of
    /// `[-max_delta, max_delta)`.
    pub fn vary(&mut self, rng: &mut RandomSource, max_delta: f64) {
        for layer in &mut self.layers {
            layer.vary(rng, max_delta);
        }
    }

    /// Output of the network for `input`.
    pub fn forward(&self, input: &[f64]) -> Result<Vec<f64>> {
        Ok(self.run(input, false, false)?.output)
    }

    /// Forward pass, optionally recording every layer's activated outputs and
    /// pre-activation sums for backpropagation or rendering.
    pub fn run(
        &self,
        input: &[f64],
        capture_layer_outputs: bool,
        capture_pre_activations: bool,
    ) -> Result<ForwardPass> {
        NetError::check_len("input", self.input_size(), input.len())?;

        let mut current: Vec<f64> = match self.input_policy {
            InputPolicy::Activate => self.layers[0].activate(input),
            InputPolicy::PassThrough => input.to_vec(),
        };

        let mut layer_outputs = capture_layer_outputs.then(|| vec![current.clone()]);
        let mut pre_activations = capture_pre_activations.then(|| vec![input.to_vec()]);

        for layer in &self.layers {
            let z = layer.pre_activate(&current);
            current = layer.activate(&z);
            if let Some(pre) = pre_activations.as_mut() {
                pre.push(z);
            }
            if let Some(outs) = layer_outputs.as_mut() {
                outs.push(current.clone());
            }
        }

        Ok(ForwardPass {
            output: current,
            layer_outputs,
            pre_activations,
        })
    }
}

fn validate_topology(layer_sizes: &[usize], activations: &[ActivationFunction]) -> Result<()> {
    if layer_sizes.len() < 2 {
        return Err(NetError::config(format!(
            "a network needs at least 2 layers, got {}",
            layer_sizes.len()
        )));
    }
    if let Some(i) = layer_sizes.iter().position(|&s| s == 0) {
        return Err(NetError::config(format!("layer {i} has size 0")));
    }
    if activations.len() != layer_sizes.len() - 1 {
        return Err(NetError::config(format!(
            "{} layers need {} activations, got {}",
            layer_sizes.len(),
            layer_sizes.len() - 1,
            activations.len()
        )));
    }
    Ok(())
}
