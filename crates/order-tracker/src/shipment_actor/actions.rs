//! Custom actions for the Shipment actor.
//!
//! One action per simulation step. Every action except `Cancel` answers
//! [`Transition::Halted`] on a cancelled shipment without writing anything,
//! which is how a running simulation learns it should stop.

use crate::model::{Coordinates, ShipmentStatus, StallReason};
use chrono::{DateTime, Local};

#[derive(Debug, Clone)]
pub enum ShipmentAction {
    /// Stores the route and the delivery estimate; the shipment sits at the
    /// origin, still processing. Fails if a route is already set.
    Resolve {
        origin: Coordinates,
        route: Vec<Coordinates>,
        expected_arrival: DateTime<Local>,
    },
    /// Processing -> In Transit.
    Depart,
    /// Moves to `waypoint` and derives the status from `progress`.
    Advance { waypoint: Coordinates, progress: f64 },
    /// Final drop-off at `destination`.
    Deliver {
        destination: Coordinates,
        at: DateTime<Local>,
    },
    /// Marks a processing shipment as stuck.
    Stall(StallReason),
    /// Processing -> Cancelled.
    Cancel,
}

/// Results from ShipmentActions - variants match 1:1 with ShipmentAction
#[derive(Debug, Clone, PartialEq)]
pub enum ShipmentActionResult {
    Resolve(Transition),
    Depart(Transition),
    Advance(Advanced),
    Deliver(Transition),
    Stall(Transition),
    /// Whether this call did the cancelling.
    Cancel(bool),
}

/// What a committed step did to the status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Committed; the shipment is now in this status.
    Changed(ShipmentStatus),
    /// Committed; status unchanged.
    Unchanged,
    /// The shipment is cancelled. Nothing was written.
    Halted,
}

impl Transition {
    pub fn is_halted(&self) -> bool {
        matches!(self, Transition::Halted)
    }
}

/// Outcome of an `Advance` step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advanced {
    pub transition: Transition,
    /// True only for the step that first reached the halfway mark.
    pub halfway: bool,
}
