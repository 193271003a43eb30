//! Error taxonomy for the quote engine.
//!
//! Only two kinds of error ever cross the engine boundary.  Bad job
//! parameters are rejected up front as [`EngineError::InvalidInput`];
//! a formula producing a negative or non-finite value is an internal
//! invariant violation reported as [`EngineError::InvalidCalculation`].
//! Everything else is recovered locally: an unknown paper size falls
//! back to the default imposition factor and a missing rate key zeroes
//! the affected line item, so neither surfaces as an error.

use thiserror::Error;

/// Errors returned by [`crate::engine::calculate`].
#[derive(Debug, Error)]
pub enum EngineError {
    /// The job specification is unusable: non-positive quantity or GSM,
    /// too few pages for a bound product, or a finishing/binding choice
    /// the product or stock does not permit.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A formula produced a negative or non-finite value.  This should
    /// never happen given non-negative inputs and rates; when it does
    /// the whole calculation is aborted rather than clamped.
    #[error("invalid calculation: {0}")]
    InvalidCalculation(String),
}

impl EngineError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        EngineError::InvalidInput(msg.into())
    }

    pub fn invalid_calculation(msg: impl Into<String>) -> Self {
        EngineError::InvalidCalculation(msg.into())
    }
}
