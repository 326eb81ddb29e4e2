//! # Notifications
//!
//! Customer-facing messages emitted by the simulation engine: every status
//! change, the halfway mark, delivery and cancellation.
//!
//! Delivery goes through the [`Notifier`] trait. The engine awaits each send
//! under a timeout and only logs failures; a broken notifier never changes
//! shipment state or stops a simulation.

use crate::model::{OrderId, ShipmentId, ShipmentStatus};
use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::info;

/// What happened to the shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationEvent {
    StatusChanged(ShipmentStatus),
    HalfwayProgress,
    Delivered,
    Cancelled,
}

/// One message for one recipient.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub recipient: String,
    pub shipment_id: ShipmentId,
    pub order_id: OrderId,
    pub event: NotificationEvent,
}

impl Notification {
    pub fn subject(&self) -> String {
        match self.event {
            NotificationEvent::StatusChanged(_) => "Order Status Update".to_string(),
            NotificationEvent::HalfwayProgress => format!("Order {} Update", self.shipment_id),
            NotificationEvent::Delivered => format!("Order {} Delivered", self.shipment_id),
            NotificationEvent::Cancelled => "Order Cancellation".to_string(),
        }
    }

    pub fn body(&self) -> String {
        match self.event {
            NotificationEvent::StatusChanged(status) => format!(
                "Update on your order!\nOrder ID: {}\nExternal Order ID: {}\n\nCurrent Status: {}",
                self.order_id, self.shipment_id, status
            ),
            NotificationEvent::HalfwayProgress => format!(
                "Your order {} is halfway to the destination.",
                self.shipment_id
            ),
            NotificationEvent::Delivered => {
                format!("Your order {} has been delivered.", self.shipment_id)
            }
            NotificationEvent::Cancelled => format!(
                "Your order {} has been cancelled successfully.",
                self.shipment_id
            ),
        }
    }
}

/// Errors a [`Notifier`] may report.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum NotifyError {
    #[error("Notification channel closed")]
    ChannelClosed,

    #[error("Notification delivery failed: {0}")]
    DeliveryFailed(String),
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: &Notification) -> Result<(), NotifyError>;
}

/// Writes every notification to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        info!(
            recipient = %notification.recipient,
            shipment_id = %notification.shipment_id,
            subject = %notification.subject(),
            "Notification"
        );
        Ok(())
    }
}

/// Forwards notifications into a channel, for a UI or a test to consume.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: mpsc::Sender<Notification>,
}

impl ChannelNotifier {
    pub fn new(buffer_size: usize) -> (Self, mpsc::Receiver<Notification>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl Notifier for ChannelNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        self.sender
            .send(notification.clone())
            .await
            .map_err(|_| NotifyError::ChannelClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification(event: NotificationEvent) -> Notification {
        Notification {
            recipient: "alice@example.com".into(),
            shipment_id: ShipmentId(482913),
            order_id: OrderId(7),
            event,
        }
    }

    #[test]
    fn status_update_names_both_ids() {
        let n = notification(NotificationEvent::StatusChanged(ShipmentStatus::OutForDelivery));
        assert_eq!(n.subject(), "Order Status Update");
        assert!(n.body().contains("Order ID: order_7"));
        assert!(n.body().contains("External Order ID: 482913"));
        assert!(n.body().ends_with("Current Status: Out for Delivery"));
    }

    #[test]
    fn one_off_events_use_the_tracking_number() {
        let halfway = notification(NotificationEvent::HalfwayProgress);
        assert_eq!(halfway.subject(), "Order 482913 Update");
        assert_eq!(halfway.body(), "Your order 482913 is halfway to the destination.");

        let delivered = notification(NotificationEvent::Delivered);
        assert_eq!(delivered.subject(), "Order 482913 Delivered");

        let cancelled = notification(NotificationEvent::Cancelled);
        assert_eq!(cancelled.subject(), "Order Cancellation");
        assert_eq!(cancelled.body(), "Your order 482913 has been cancelled successfully.");
    }

    #[tokio::test]
    async fn channel_notifier_reports_a_closed_receiver() {
        let (notifier, receiver) = ChannelNotifier::new(1);
        drop(receiver);

        let err = notifier
            .notify(&notification(NotificationEvent::Delivered))
            .await
            .unwrap_err();
        assert_eq!(err, NotifyError::ChannelClosed);
    }
}
