pub mod codec;
pub mod network;

pub use codec::NetworkRecord;
pub use network::{ForwardPass, InputPolicy, Network};
