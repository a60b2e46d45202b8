//! Animation error types

use thiserror::Error;

/// Errors raised while assembling or loading animations
#[derive(Error, Debug)]
pub enum AnimationError {
    /// The animation is mutably borrowed elsewhere, typically a set being
    /// added to itself
    #[error("animation is already borrowed and cannot be added as a member")]
    MemberBusy,

    /// The animation already contains the set it is being added to
    #[error("animation already contains this set and cannot be added as a member")]
    Cycle,

    /// Failed to read a description file
    #[error("failed to read animation description: {0}")]
    Io(#[from] std::io::Error),

    /// Description is not valid TOML or does not match the schema
    #[error("invalid animation description: {0}")]
    Config(#[from] toml::de::Error),

    /// A size value that is not `N`, `N%` or `N%p`
    #[error("invalid dimension `{0}` (expected `N`, `N%` or `N%p`)")]
    InvalidDimension(String),

    #[error("unknown interpolator `{0}`")]
    UnknownInterpolator(String),

    #[error("unknown repeat mode `{0}` (expected `restart` or `reverse`)")]
    UnknownRepeatMode(String),
}

/// Result type for animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;
