//! # Product Actor
//!
//! The catalog and its inventory. Beyond CRUD it exposes stock actions that
//! the Order actor calls while an order is being created:
//!
//! ```rust,ignore
//! let stock = product_client.check_stock(product_id).await?;
//! let reservation = product_client.reserve_stock(product_id, 2).await?;
//! product_client.release_stock(product_id, 2).await?;
//! ```
//!
//! A reservation is a single action, so the stock check and the decrement
//! can't be interleaved with another order's reservation.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](tracker_actor::ActorEntity) implementation for [`Product`]
//! - [`error`] - [`ProductError`]
//! - [`actions`] - [`ProductAction`] and [`ProductActionResult`]
//! - [`new()`] - Factory function that creates the actor and client

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Product;
use tracker_actor::{ResourceActor, ResourceClient};

/// Creates a new Product actor and its client.
pub fn new() -> (ResourceActor<Product>, ResourceClient<Product>) {
    ResourceActor::new(32)
}
