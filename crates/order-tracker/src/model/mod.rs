//! Pure data structures (DTOs) for the resources managed by the actors.
//!
//! Entity trait implementations live next to each actor
//! ([`user_actor`](crate::user_actor), [`shipment_actor`](crate::shipment_actor), ...);
//! this module only holds the data and its plain-Rust behaviour.

pub mod geo;
pub mod order;
pub mod product;
pub mod shipment;
pub mod user;

pub use geo::*;
pub use order::*;
pub use product::*;
pub use shipment::*;
pub use user::*;
