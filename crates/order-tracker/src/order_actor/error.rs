//! Error types for the Order actor.

use crate::product_actor::ProductError;
use crate::shipment_actor::ShipmentError;
use crate::user_actor::UserError;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The user placing the order does not exist.
    #[error("Invalid user: {0}")]
    InvalidUser(String),

    /// A line refers to a product that does not exist.
    #[error("Invalid product: {0}")]
    InvalidProduct(String),

    /// The order data provided is invalid.
    #[error("Order validation error: {0}")]
    ValidationError(String),

    /// The order already has a shipment.
    #[error("Order {order} already shipped as {shipment}")]
    AlreadyShipped { order: String, shipment: String },

    /// The order has no shipment to track or cancel.
    #[error("Order not shipped: {0}")]
    NotShipped(String),

    #[error(transparent)]
    User(#[from] UserError),

    #[error(transparent)]
    Product(#[from] ProductError),

    #[error(transparent)]
    Shipment(#[from] ShipmentError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::ActorCommunicationError(msg)
    }
}
