use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the simulation engine and its configuration layer.
///
/// None of these are fatal to the tick loop: the engine logs them, drops the
/// offending request and keeps running.
#[derive(Debug, Error)]
pub enum Error {
    /// Rejected body creation (non-positive mass, non-finite state, or
    /// out of bounds in a bounded space).
    #[error("invalid spawn: {0}")]
    InvalidSpawn(String),

    /// Invalid parameter value or configuration.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// `set_parameter_by_name` got a name it does not know.
    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    /// A fragment came out with non-positive or non-finite mass/speed.
    #[error("degenerate fragment: {0}")]
    DegenerateFragment(String),

    /// Scenario file could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Scenario file could not be parsed.
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}
