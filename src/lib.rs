pub mod activation;
pub mod error;
pub mod evolve;
pub mod layers;
pub mod math;
pub mod network;
pub mod optim;
pub mod random;
pub mod samples;
pub mod train;

// Convenience re-exports
pub use activation::ActivationFunction;
pub use error::{NetError, Result};
pub use evolve::{EvolutionConfig, EvolutionaryTrainer, Objective};
pub use layers::Layer;
pub use math::Matrix;
pub use network::{ForwardPass, InputPolicy, Network, NetworkRecord};
pub use optim::Sgd;
pub use random::RandomSource;
pub use samples::{Sample, SampleProvider};
pub use train::{learn, train_loop, TrainConfig};
