//! # Order Actor
//!
//! Orders depend on two other actors: creating one checks the user and
//! reserves stock for every line. Those clients are injected through
//! `run((UserClient, ProductClient))`, so the actor itself is built without
//! dependencies:
//!
//! ```rust,ignore
//! let (order_actor, order_client) = order_actor::new();
//! tokio::spawn(order_actor.run((user_client.clone(), product_client.clone())));
//! ```
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](tracker_actor::ActorEntity) implementation for [`Order`]
//! - [`error`] - [`OrderError`]
//! - [`actions`] - [`OrderAction`] and [`OrderActionResult`]

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Order;
use tracker_actor::{ResourceActor, ResourceClient};

/// Creates a new Order actor and its client.
pub fn new() -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(32)
}
