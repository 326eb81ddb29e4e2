use crate::model::{Coordinates, OrderId};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Tracking number handed out by the simulated carrier.
///
/// Drawn at random from `100000..=999999`; see
/// [`shipment_actor::new`](crate::shipment_actor::new).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShipmentId(pub u32);

impl From<u32> for ShipmentId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ShipmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a shipment is in its lifecycle.
///
/// Variants are declared in lifecycle order, so `Ord` gives the forward
/// direction. `Cancelled` is only reachable from `Processing` and is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ShipmentStatus {
    Processing,
    InTransit,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl ShipmentStatus {
    /// The location label shown while a shipment sits in this status.
    pub fn location_label(&self) -> &'static str {
        match self {
            ShipmentStatus::Processing => PROCESSING_CENTER,
            ShipmentStatus::InTransit => "In Transit",
            ShipmentStatus::OutForDelivery => "Out for Delivery",
            ShipmentStatus::Delivered => "Delivered",
            ShipmentStatus::Cancelled => "Cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ShipmentStatus::Delivered | ShipmentStatus::Cancelled)
    }

    /// In-motion status for a route progress fraction.
    pub fn for_progress(progress: f64) -> Self {
        if progress < OUT_FOR_DELIVERY_AT {
            ShipmentStatus::InTransit
        } else {
            ShipmentStatus::OutForDelivery
        }
    }
}

impl Display for ShipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ShipmentStatus::Processing => "Processing",
            ShipmentStatus::InTransit => "In Transit",
            ShipmentStatus::OutForDelivery => "Out for Delivery",
            ShipmentStatus::Delivered => "Delivered",
            ShipmentStatus::Cancelled => "Cancelled",
        };
        f.write_str(label)
    }
}

/// Location label of a shipment that has not left the warehouse.
pub const PROCESSING_CENTER: &str = "Processing Center";

/// Progress fraction from which a shipment counts as out for delivery.
pub const OUT_FOR_DELIVERY_AT: f64 = 0.75;

/// Progress fraction that triggers the one-time halfway notification.
pub const HALFWAY_AT: f64 = 0.5;

/// Rendering used for every timestamp shown to a customer.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A tracking timestamp, or the placeholder shown before one exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingTime {
    /// The shipment itself is unknown.
    Unknown,
    /// Not delivered yet.
    Tbd,
    /// Delivery estimate not computed yet.
    Calculating,
    At(DateTime<Local>),
}

impl TrackingTime {
    pub fn timestamp(&self) -> Option<DateTime<Local>> {
        match self {
            TrackingTime::At(at) => Some(*at),
            _ => None,
        }
    }
}

impl Display for TrackingTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackingTime::Unknown => f.write_str("Unknown"),
            TrackingTime::Tbd => f.write_str("TBD"),
            TrackingTime::Calculating => f.write_str("Calculating..."),
            TrackingTime::At(at) => write!(f, "{}", at.format(TIMESTAMP_FORMAT)),
        }
    }
}

/// Why a shipment stopped progressing before leaving `Processing`.
///
/// A stalled shipment keeps its status; the reason is what tells a caller it
/// is stuck rather than slow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StallReason {
    GeocodeFailed { address: String },
    RouteUnavailable,
}

impl Display for StallReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StallReason::GeocodeFailed { address } => {
                write!(f, "could not geocode address: {address}")
            }
            StallReason::RouteUnavailable => f.write_str("no route between origin and destination"),
        }
    }
}

/// One simulated delivery, as stored in the tracking registry.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](tracker_actor::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](tracker_actor::ResourceActor).
///
/// See [`impl ActorEntity for Shipment`](#impl-ActorEntity-for-Shipment) for details on:
/// - Creation parameters ([`ShipmentCreate`])
/// - Custom actions ([`ShipmentAction`](crate::shipment_actor::ShipmentAction))
///
/// Fields are only ever written by those actions, each of which commits as a
/// unit. `route` is empty until resolved and never changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Shipment {
    pub id: ShipmentId,
    pub order_id: OrderId,
    pub recipient: Option<String>,
    pub origin_address: String,
    pub destination_address: String,
    pub item_count: u32,
    pub total_cost: f64,

    pub status: ShipmentStatus,
    pub location: String,
    pub coordinates: Option<Coordinates>,
    pub route: Vec<Coordinates>,
    pub expected_arrival: TrackingTime,
    pub arrival_date: TrackingTime,
    pub halfway_reached: bool,
    pub stall: Option<StallReason>,
}

/// Payload for placing a new shipment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipmentCreate {
    pub order_id: OrderId,
    /// E-mail address for notifications; `None` sends nothing.
    pub recipient: Option<String>,
    pub origin_address: String,
    pub destination_address: String,
    pub item_count: u32,
    pub total_cost: f64,
}

impl Shipment {
    /// A freshly placed shipment: processing, unrouted, estimate pending.
    pub fn placed(id: ShipmentId, params: ShipmentCreate) -> Self {
        Self {
            id,
            order_id: params.order_id,
            recipient: params.recipient,
            origin_address: params.origin_address,
            destination_address: params.destination_address,
            item_count: params.item_count,
            total_cost: params.total_cost,
            status: ShipmentStatus::Processing,
            location: PROCESSING_CENTER.to_string(),
            coordinates: None,
            route: Vec::new(),
            expected_arrival: TrackingTime::Calculating,
            arrival_date: TrackingTime::Tbd,
            halfway_reached: false,
            stall: None,
        }
    }

    pub fn is_routed(&self) -> bool {
        !self.route.is_empty()
    }
}

/// What a polling caller sees for one shipment.
///
/// Built from a single registry read, so every field belongs to the same
/// committed state.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingSnapshot {
    /// `None` only for an unknown shipment.
    pub status: Option<ShipmentStatus>,
    pub location: String,
    pub arrival_date: TrackingTime,
    pub coordinates: Option<Coordinates>,
    pub expected_arrival: TrackingTime,
    pub stall: Option<StallReason>,
}

impl TrackingSnapshot {
    /// The sentinel returned for an id the registry has never seen.
    pub fn unknown() -> Self {
        Self {
            status: None,
            location: "Unknown".to_string(),
            arrival_date: TrackingTime::Unknown,
            coordinates: None,
            expected_arrival: TrackingTime::Unknown,
            stall: None,
        }
    }

    pub fn is_known(&self) -> bool {
        self.status.is_some()
    }

    pub fn is_stalled(&self) -> bool {
        self.stall.is_some()
    }
}

impl From<&Shipment> for TrackingSnapshot {
    fn from(shipment: &Shipment) -> Self {
        Self {
            status: Some(shipment.status),
            location: shipment.location.clone(),
            arrival_date: shipment.arrival_date,
            coordinates: shipment.coordinates,
            expected_arrival: shipment.expected_arrival,
            stall: shipment.stall.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn status_order_follows_the_lifecycle() {
        assert!(ShipmentStatus::Processing < ShipmentStatus::InTransit);
        assert!(ShipmentStatus::InTransit < ShipmentStatus::OutForDelivery);
        assert!(ShipmentStatus::OutForDelivery < ShipmentStatus::Delivered);
    }

    #[test]
    fn progress_thresholds() {
        assert_eq!(ShipmentStatus::for_progress(0.0), ShipmentStatus::InTransit);
        assert_eq!(ShipmentStatus::for_progress(0.74), ShipmentStatus::InTransit);
        assert_eq!(ShipmentStatus::for_progress(0.75), ShipmentStatus::OutForDelivery);
    }

    #[test]
    fn tracking_time_placeholders_render_as_shown_to_customers() {
        assert_eq!(TrackingTime::Unknown.to_string(), "Unknown");
        assert_eq!(TrackingTime::Tbd.to_string(), "TBD");
        assert_eq!(TrackingTime::Calculating.to_string(), "Calculating...");

        let at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(TrackingTime::At(at).to_string(), "2024-03-09 14:05:07");
    }

    #[test]
    fn placed_shipment_starts_unrouted() {
        let shipment = Shipment::placed(
            ShipmentId(123456),
            ShipmentCreate {
                order_id: OrderId(1),
                recipient: None,
                origin_address: "a".into(),
                destination_address: "b".into(),
                item_count: 1,
                total_cost: 10.0,
            },
        );

        let snapshot = TrackingSnapshot::from(&shipment);
        assert_eq!(snapshot.status, Some(ShipmentStatus::Processing));
        assert_eq!(snapshot.location, "Processing Center");
        assert_eq!(snapshot.coordinates, None);
        assert_eq!(snapshot.expected_arrival, TrackingTime::Calculating);
        assert_eq!(snapshot.arrival_date, TrackingTime::Tbd);
        assert!(!shipment.is_routed());
    }

    #[test]
    fn unknown_sentinel() {
        let snapshot = TrackingSnapshot::unknown();
        assert!(!snapshot.is_known());
        assert_eq!(snapshot.location, "Unknown");
        assert_eq!(snapshot.arrival_date.to_string(), "Unknown");
        assert_eq!(snapshot.expected_arrival.to_string(), "Unknown");
        assert_eq!(snapshot.coordinates, None);
    }
}
