//! # System Lifecycle & Orchestration
//!
//! Starts the four actors, wires their dependencies through context
//! injection, and owns the [`ShipmentTracker`](crate::tracker::ShipmentTracker)
//! whose simulations run alongside them.
//!
//! ```rust,ignore
//! let system = OrderSystem::new(config, routes, notifier);
//! let products = system.seed_catalog().await?;
//! let placed = system.place_order(order, destination).await?;
//! let snapshot = system.track_order(placed.order_id).await?;
//! system.shutdown().await?;
//! ```
//!
//! The Order actor receives `(UserClient, ProductClient)` as its context, so
//! it can validate the user and reserve stock inside its `on_create` hook.
//! The Shipment actor needs no context; the tracker drives it from outside.
//!
//! Shutdown runs in reverse: simulations are aborted first, then every client
//! is dropped, which closes the actor channels and lets each request loop
//! exit.

pub mod order_system;

pub use order_system::*;
