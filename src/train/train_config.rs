/// Configuration for a [`train_loop`](crate::train::train_loop) run.
///
/// # Fields
/// - `steps`         — number of single-example descent steps
/// - `learning_rate` — fixed step size; not validated, must be positive
/// - `cost_window`   — how many recent costs the rolling average covers
/// - `report_every`  — log the rolling average every this many steps (0 disables)
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    pub steps: usize,
    pub learning_rate: f64,
    pub cost_window: usize,
    pub report_every: usize,
}

impl TrainConfig {
    pub fn new(steps: usize, learning_rate: f64) -> Self {
        TrainConfig {
            steps,
            learning_rate,
            ..TrainConfig::default()
        }
    }

    pub fn with_cost_window(mut self, cost_window: usize) -> Self {
        self.cost_window = cost_window;
        self
    }

    pub fn with_report_every(mut self, report_every: usize) -> Self {
        self.report_every = report_every;
        self
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            steps: 100_000,
            learning_rate: 0.02,
            cost_window: 1_000,
            report_every: 1_000,
        }
    }
}
