pub mod backprop;
pub mod loop_fn;
pub mod step_stats;
pub mod train_config;

pub use backprop::{compute_gradients, learn, Backprop, Gradients, Step};
pub use loop_fn::train_loop;
pub use step_stats::{RollingMean, StepStats};
pub use train_config::TrainConfig;
