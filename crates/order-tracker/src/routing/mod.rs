//! # Route Provider
//!
//! The seam between the simulation engine and whatever answers "where is this
//! address" and "how do I drive from A to B". The engine only consumes it.
//!
//! Failure shapes differ on purpose: an unknown address is an error, while a
//! failed route lookup is an empty polyline. The engine treats both as a
//! stall of that one shipment.
//!
//! [`StaticRouteProvider`] is the offline implementation shipped with the
//! crate.

pub mod static_provider;

pub use static_provider::*;

use crate::model::Coordinates;
use async_trait::async_trait;
use thiserror::Error;

/// Errors from a [`RouteProvider`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RouteError {
    /// The address could not be resolved to coordinates.
    #[error("Could not geocode address: {0}")]
    NotFound(String),
}

#[async_trait]
pub trait RouteProvider: Send + Sync {
    /// Resolve a street address.
    async fn geocode(&self, address: &str) -> Result<Coordinates, RouteError>;

    /// Ordered waypoints from `origin` to `destination`. Empty on failure.
    async fn route(&self, origin: Coordinates, destination: Coordinates) -> Vec<Coordinates>;
}
