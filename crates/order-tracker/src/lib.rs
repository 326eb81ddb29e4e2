//! # Order Tracker Library
//!
//! An automotive-parts store whose orders ship through a simulated delivery
//! network. Every record lives in a [`ResourceActor`](tracker_actor::ResourceActor);
//! every placed shipment is walked from warehouse to door by its own tokio
//! task.
//!
//! - **[model]**: `User`, `Product`, `Order` and `Shipment`, plus the tracking
//!   snapshot returned to pollers.
//! - **[estimator]**: delivery time from item count and order value.
//! - **[routing]** / **[notify]**: the seams to geocoding and e-mail.
//! - **[tracker]**: `place`, `get_status`, `get_route`, `cancel`.
//! - **[lifecycle]**: starts, wires and stops the whole system.

pub mod clients;
pub mod config;
pub mod estimator;
pub mod lifecycle;
pub mod model;
pub mod notify;
pub mod order_actor;
pub mod product_actor;
pub mod routing;
pub mod shipment_actor;
mod simulation;
pub mod tracker;
pub mod user_actor;
