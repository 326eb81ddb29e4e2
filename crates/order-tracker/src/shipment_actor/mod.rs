//! # Shipment Actor (the Tracking Registry)
//!
//! Holds every shipment ever placed, keyed by a random six-digit tracking
//! number. Entries are never removed, so finished shipments stay queryable
//! for the life of the process.
//!
//! The actor's request loop is the registry's only lock. Each
//! [`ShipmentAction`] is one atomic commit of all the fields it touches, and
//! every `Get` returns a fully committed shipment. The simulation task sleeps
//! outside the actor and sends one short action per step.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](tracker_actor::ActorEntity) implementation and the state machine
//! - [`error`] - [`ShipmentError`]
//! - [`actions`] - [`ShipmentAction`], [`ShipmentActionResult`], [`Transition`]

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Shipment;
use std::ops::RangeInclusive;
use tracker_actor::{IdSource, RandomIds, ResourceActor, ResourceClient};

/// Tracking numbers are drawn uniformly from this range.
pub const SHIPMENT_IDS: RangeInclusive<u32> = 100_000..=999_999;

/// Creates a new Shipment actor and its client.
pub fn new() -> (ResourceActor<Shipment>, ResourceClient<Shipment>) {
    with_ids(RandomIds::new(SHIPMENT_IDS))
}

/// Creates a Shipment actor that draws tracking numbers from `ids`.
pub fn with_ids(ids: impl IdSource) -> (ResourceActor<Shipment>, ResourceClient<Shipment>) {
    ResourceActor::with_ids(64, ids)
}
