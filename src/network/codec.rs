use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::{
    activation::ActivationFunction,
    error::{NetError, Result},
    math::matrix::Matrix,
    network::network::{InputPolicy, Network},
};

/// Plain-data form of a [`Network`]: layer sizes, weights, biases and activation tags.
///
/// Activations serialize as their numeric tags.  `input_policy` is optional on disk so that
/// records written without it load with the default policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkRecord {
    pub layer_sizes: Vec<usize>,
    pub weights: Vec<Vec<Vec<f64>>>,
    pub biases: Vec<Vec<f64>>,
    pub activations: Vec<ActivationFunction>,
    #[serde(default)]
    pub input_policy: InputPolicy,
}

impl From<&Network> for NetworkRecord {
    fn from(network: &Network) -> Self {
        NetworkRecord {
            layer_sizes: network.layer_sizes().to_vec(),
            weights: network.weights().map(|w| w.data.clone()).collect(),
            biases: network.biases().map(<[f64]>::to_vec).collect(),
            activations: network.activations().collect(),
            input_policy: network.input_policy(),
        }
    }
}

impl TryFrom<NetworkRecord> for Network {
    type Error = NetError;

    fn try_from(record: NetworkRecord) -> Result<Network> {
        let weights = record
            .weights
            .into_iter()
            .map(Matrix::from_data)
            .collect::<Result<Vec<_>>>()?;
        Ok(Network::from_parts(record.layer_sizes, weights, record.biases, record.activations)?
            .with_input_policy(record.input_policy))
    }
}

impl Network {
    pub fn to_record(&self) -> NetworkRecord {
        NetworkRecord::from(self)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_record())?)
    }

    pub fn from_json(s: &str) -> Result<Network> {
        let record: NetworkRecord = serde_json::from_str(s)?;
        Network::try_from(record)
    }

    /// Serializes the network to a pretty-printed JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &self.to_record())?;
        Ok(())
    }

    /// Deserializes a network from a JSON file previously written by `save_json`.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Network> {
        let reader = BufReader::new(File::open(path)?);
        let record: NetworkRecord = serde_json::from_reader(reader)?;
        Network::try_from(record)
    }
}
