//! Custom actions for the Order actor.

use crate::model::{ShipmentId, ShipmentStatus};

#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Links the order to its shipment. Allowed once.
    AttachShipment(ShipmentId),
    /// Records the latest status reported by the shipment tracker. Never
    /// moves backwards and never leaves `Delivered` or `Cancelled`.
    SyncStatus(ShipmentStatus),
}

/// Results from OrderActions - variants match 1:1 with OrderAction
#[derive(Debug, Clone, PartialEq)]
pub enum OrderActionResult {
    AttachShipment(()),
    /// The status the order held before the sync. Equal to the current
    /// status when the report was ignored.
    SyncStatus(ShipmentStatus),
}
