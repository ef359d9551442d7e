//! Error types for quirk registration

use thiserror::Error;

/// Errors raised while validating or registering a quirk
#[derive(Error, Debug, PartialEq, Eq)]
pub enum QuirkError {
    /// Signature does not name any manufacturer/model
    #[error("Quirk {0} has no manufacturer/model info")]
    EmptyModelInfo(String),

    /// Replacement declares an endpoint the signature does not have
    #[error("Quirk {quirk}: replacement endpoint {endpoint} is not in the signature")]
    EndpointMismatch { quirk: String, endpoint: u8 },

    /// Custom handler placed over a different cluster
    #[error(
        "Quirk {quirk}: endpoint {endpoint} slot {index} expects cluster {expected:#06x}, handler serves {actual:#06x}"
    )]
    ClusterMismatch {
        quirk: String,
        endpoint: u8,
        index: usize,
        expected: u16,
        actual: u16,
    },

    /// Signature lists the same manufacturer/model more than once
    #[error("Quirk {quirk} lists {manufacturer} {model} more than once")]
    RepeatedModelInfo {
        quirk: String,
        manufacturer: String,
        model: String,
    },

    /// A quirk with this name is already registered
    #[error("Quirk {0} is already registered")]
    Duplicate(String),
}
