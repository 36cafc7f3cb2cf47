// SPDX-License-Identifier: MIT

//! Application error types.
//!
//! "No data yet" is not an error here: computations that can legitimately
//! produce an unknown result (e.g. a class with no scored assignments)
//! return `Option` instead.

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Weights must be non-negative and sum to exactly 100.
    #[error("weights must be non-negative and sum to 100")]
    InvalidWeights,

    /// Assignment scores are percentages in [0, 100].
    #[error("score must be between 0 and 100")]
    InvalidScore,

    /// Period grades are percentages in [0, 100].
    #[error("grades must be between 0 and 100")]
    OutOfRange,

    /// Projection requires fully assigned weights (summative + formative = 100).
    #[error("weights are not fully assigned; set them to sum to 100 first")]
    WeightsNotFull,

    /// Projection requires at least one existing score in either category.
    #[error("no existing scores to extrapolate from")]
    NoBaseline,

    /// A next summative score cannot move the grade when its weight is zero.
    #[error("summative weight is zero, so a next summative score has no effect")]
    ZeroSummativeWeight,

    /// Operation only works against a shared hub data source.
    #[error("a shared hub is required for this operation")]
    SharedSourceRequired,

    /// Operation requires a signed-in identity.
    #[error("sign-in required")]
    IdentityRequired,

    #[error("hub not found: {0}")]
    HubNotFound(String),

    /// Only the host may end a live session.
    #[error("only the host can end this live session")]
    NotHost,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    Validation(String),

    #[error("remote store error: {0}")]
    Remote(String),

    #[error("local storage error: {0}")]
    Storage(String),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
