//! Population-based training: score, keep the best, clone and mutate.

pub mod config;
pub mod objective;
pub mod trainer;

pub use config::EvolutionConfig;
pub use objective::Objective;
pub use trainer::{Champion, EvolutionaryTrainer, GenerationStats};
