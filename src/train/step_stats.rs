use std::collections::VecDeque;

use serde::{Serialize, Deserialize};

/// Per-step diagnostics emitted by `train_loop`, ready for a cost plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepStats {
    /// 0-based step number.
    pub step: usize,
    /// Squared-error cost of this step's example, measured before the update.
    pub cost: f64,
    /// Mean cost over the most recent `cost_window` steps, this one included.
    pub avg_cost: f64,
}

/// Mean over a sliding window of the most recent values.
#[derive(Debug, Clone)]
pub struct RollingMean {
    window: usize,
    values: VecDeque<f64>,
}

impl RollingMean {
    /// A window of 0 is treated as 1.
    pub fn new(window: usize) -> RollingMean {
        let window = window.max(1);
        RollingMean {
            window,
            values: VecDeque::with_capacity(window),
        }
    }

    pub fn push(&mut self, value: f64) -> f64 {
        if self.values.len() == self.window {
            self.values.pop_front();
        }
        self.values.push_back(value);
        self.mean()
    }

    /// Summed afresh over the window, so a non-finite value stops counting once it leaves.
    pub fn mean(&self) -> f64 {
        if self.values.is_empty() {
            0.0
        } else {
            self.values.iter().sum::<f64>() / self.values.len() as f64
        }
    }
}
