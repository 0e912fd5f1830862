use serde::{Serialize, Deserialize};

use crate::error::{NetError, Result};
use crate::network::Network;
use crate::samples::{argmax, Sample};
use crate::train::backprop::squared_error;

/// What a population is ranked by.
///
/// Ranking works on a normalized key (cost as-is, accuracy negated) so both
/// objectives share one ordering; NaN scores always rank last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    /// Mean over samples of the summed squared error.  Lower is better.
    #[default]
    MinimizeCost,
    /// Fraction of samples whose output argmax matches the target argmax.  Higher is better.
    MaximizeAccuracy,
}

impl Objective {
    pub fn score(&self, network: &Network, samples: &[Sample]) -> Result<f64> {
        if samples.is_empty() {
            return Err(NetError::config("cannot score a network on zero samples"));
        }
        let mut total = 0.0;
        for sample in samples {
            NetError::check_len("target", network.output_size(), sample.target.len())?;
            let output = network.forward(&sample.input)?;
            total += match self {
                Objective::MinimizeCost => squared_error(&output, &sample.target),
                Objective::MaximizeAccuracy => (argmax(&output) == argmax(&sample.target)) as u8 as f64,
            };
        }
        Ok(total / samples.len() as f64)
    }

    fn key(&self, score: f64) -> f64 {
        let key = match self {
            Objective::MinimizeCost => score,
            Objective::MaximizeAccuracy => -score,
        };
        if key.is_nan() {
            f64::INFINITY
        } else {
            key
        }
    }

    /// Whether `a` is strictly better than `b`.
    pub fn is_better(&self, a: f64, b: f64) -> bool {
        self.key(a) < self.key(b)
    }

    /// Indices of `scores`, best first.  Ties keep their original order.
    pub fn rank(&self, scores: &[f64]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..scores.len()).collect();
        order.sort_by(|&a, &b| self.key(scores[a]).total_cmp(&self.key(scores[b])));
        order
    }
}
