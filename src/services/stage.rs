//! Probability-to-stage resolution.
//!
//! The bucket table is fixed; 1-9 and 96-99 are deliberate gaps and resolve
//! to an error, never to a neighboring stage.

use crate::error::ApiError;

/// Map a probability percentage (0-100) to its sales-stage label.
pub fn resolve_stage(probability: i32) -> Result<&'static str, ApiError> {
    match probability {
        0 => Ok("Closed Lost"),
        10..=20 => Ok("Prospecting"),
        21..=40 => Ok("Qualification"),
        41..=60 => Ok("Needs Analysis"),
        61..=70 => Ok("Value Proposition"),
        71..=80 => Ok("Decision Makers"),
        81..=85 => Ok("Perception Analysis"),
        86..=90 => Ok("Proposal/Price Quote"),
        91..=95 => Ok("Negotiation/Review"),
        100 => Ok("Closed Won"),
        _ => Err(ApiError::InvalidProbability(probability)),
    }
}
