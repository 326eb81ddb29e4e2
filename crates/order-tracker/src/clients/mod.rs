//! Type-safe wrappers around [`ResourceClient`](tracker_actor::ResourceClient).
//!
//! Each wrapper maps [`FrameworkError`](tracker_actor::FrameworkError) back to
//! its actor's own error type, so an `InsufficientStock` raised inside the
//! Product actor arrives at the caller as `ProductError::InsufficientStock`
//! and not as an opaque string.

pub mod order_client;
pub mod product_client;
pub mod shipment_client;
pub mod user_client;

pub use order_client::*;
pub use product_client::*;
pub use shipment_client::*;
pub use user_client::*;
