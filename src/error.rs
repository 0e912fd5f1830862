use thiserror::Error;

/// Everything the network, its trainers and the demo collaborators can fail with.
///
/// All core failures are caller-supplied configuration or data errors; none of them are
/// transient, so nothing in the crate retries.
#[derive(Error, Debug)]
pub enum NetError {
    /// A vector or matrix length disagrees with the declared topology.
    #[error("dimension mismatch for {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Invalid layer sizes, activation counts, population or sample settings.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("unknown activation tag {0}")]
    UnknownActivation(u8),

    #[error("malformed dataset: {0}")]
    Dataset(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl NetError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        NetError::Configuration(msg.into())
    }

    /// Returns `Err(DimensionMismatch)` unless `actual == expected`.
    pub(crate) fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(NetError::DimensionMismatch { what, expected, actual })
        }
    }
}

pub type Result<T> = std::result::Result<T, NetError>;
