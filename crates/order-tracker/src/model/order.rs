use crate::model::{ProductId, ShipmentId, ShipmentStatus, UserId};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// One requested line of a new order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// One line of a stored order, priced at the moment its stock was reserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: f64,
    pub quantity: u32,
}

impl OrderItem {
    pub fn total_price(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

impl Display for OrderItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} x{} (${:.2})", self.name, self.quantity, self.total_price())
    }
}

/// A customer order.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](tracker_actor::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](tracker_actor::ResourceActor).
///
/// See [`impl ActorEntity for Order`](#impl-ActorEntity-for-Order) for details on:
/// - Creation parameters ([`OrderCreate`])
/// - Custom actions ([`OrderAction`](crate::order_actor::OrderAction))
///
/// `status` is the last status synced from the shipment tracker, not a live
/// value; [`OrderSystem::track_order`](crate::lifecycle::OrderSystem::track_order)
/// refreshes it.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub items: Vec<OrderItem>,
    pub status: ShipmentStatus,
    pub shipment_id: Option<ShipmentId>,
}

/// Payload for creating a new order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub user_id: UserId,
    pub lines: Vec<OrderLine>,
}

impl OrderCreate {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            lines: Vec::new(),
        }
    }

    /// Adds a line to the order.
    pub fn line(mut self, product_id: ProductId, quantity: u32) -> Self {
        self.lines.push(OrderLine {
            product_id,
            quantity,
        });
        self
    }
}

impl Order {
    pub fn total_price(&self) -> f64 {
        self.items.iter().map(OrderItem::total_price).sum()
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}
