//! Error types for the Shipment actor.

use crate::model::ShipmentStatus;
use thiserror::Error;

/// Errors that can occur during shipment operations.
///
/// Unknown ids and refused cancellations are not errors; the tracker answers
/// those with a sentinel snapshot and `false`.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ShipmentError {
    /// The requested shipment was not found.
    #[error("Shipment not found: {0}")]
    NotFound(String),

    /// A route was already stored for this shipment.
    #[error("Route already resolved for shipment {0}")]
    RouteAlreadyResolved(String),

    /// A route needs at least one waypoint.
    #[error("Empty route for shipment {0}")]
    EmptyRoute(String),

    /// The step does not apply to the shipment's current status.
    #[error("Cannot {step} a shipment that is {status}")]
    InvalidTransition {
        step: &'static str,
        status: ShipmentStatus,
    },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for ShipmentError {
    fn from(msg: String) -> Self {
        ShipmentError::ActorCommunicationError(msg)
    }
}
