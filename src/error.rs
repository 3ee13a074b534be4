use thiserror::Error;

/// Top-level error type for the planar arrangement kernel.
///
/// Only the construction of validated inputs can fail. The algorithms
/// themselves treat geometric degeneracies as ordinary input.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while building geometric primitives.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("coordinate is not finite")]
    NonFinite,

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors raised by invalid configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("tolerance must be finite and positive, got {0}")]
    InvalidTolerance(f64),
}

/// Convenience type alias for results using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
