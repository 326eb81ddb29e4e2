//! # Order Simulation Engine
//!
//! One tokio task per placed shipment, walking it from `Processing` to
//! `Delivered`:
//!
//! 1. Wait the processing delay.
//! 2. Geocode origin and destination. Failure stalls the shipment.
//! 3. Fetch the route. An empty route stalls the shipment.
//! 4. Estimate delivery time and commit route, origin and ETA together.
//! 5. Wait the processing delay again, then depart.
//! 6. For each waypoint, wait `delivery / n` and advance to it.
//! 7. Deliver at the destination.
//!
//! Every wait is a tokio timer scaled by
//! [`SimulationConfig::time_scale`](crate::config::SimulationConfig::time_scale);
//! nothing is held while sleeping. Each step is a single action on the
//! Shipment actor, and a [`Transition::Halted`] answer (the shipment was
//! cancelled) ends the task without further writes.

use crate::clients::ShipmentClient;
use crate::config::SimulationConfig;
use crate::estimator::estimate;
use crate::model::{OrderId, ShipmentCreate, ShipmentId, StallReason};
use crate::notify::{Notification, NotificationEvent, Notifier};
use crate::routing::RouteProvider;
use crate::shipment_actor::{ShipmentError, Transition};
use chrono::Local;
use std::sync::Arc;
use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, warn};

/// The engine's external collaborators and timing, shared by every task.
pub(crate) struct Collaborators {
    pub(crate) routes: Arc<dyn RouteProvider>,
    pub(crate) notifier: Arc<dyn Notifier>,
    pub(crate) config: SimulationConfig,
}

impl Collaborators {
    /// Sends one notification. Never fails: errors and timeouts are logged.
    pub(crate) async fn notify(
        &self,
        recipient: Option<&str>,
        shipment_id: ShipmentId,
        order_id: OrderId,
        event: NotificationEvent,
    ) {
        let Some(recipient) = recipient else {
            debug!(%shipment_id, ?event, "No recipient, notification skipped");
            return;
        };
        let notification = Notification {
            recipient: recipient.to_string(),
            shipment_id,
            order_id,
            event,
        };

        match timeout(
            self.config.notify_timeout(),
            self.notifier.notify(&notification),
        )
        .await
        {
            Ok(Ok(())) => debug!(%shipment_id, ?event, "Notification sent"),
            Ok(Err(e)) => warn!(%shipment_id, ?event, error = %e, "Notification failed"),
            Err(_) => warn!(%shipment_id, ?event, "Notification timed out"),
        }
    }
}

/// How a simulation ended.
#[derive(Debug)]
enum Outcome {
    Delivered,
    Cancelled,
    Stalled(StallReason),
}

struct Simulation {
    id: ShipmentId,
    params: ShipmentCreate,
    shipments: ShipmentClient,
    env: Arc<Collaborators>,
}

/// Entry point of a shipment's task.
pub(crate) async fn run(
    id: ShipmentId,
    params: ShipmentCreate,
    shipments: ShipmentClient,
    env: Arc<Collaborators>,
) {
    let simulation = Simulation {
        id,
        params,
        shipments,
        env,
    };

    match simulation.drive().await {
        Ok(Outcome::Delivered) => info!(shipment_id = %id, "Delivered"),
        Ok(Outcome::Cancelled) => info!(shipment_id = %id, "Cancelled, simulation stopped"),
        Ok(Outcome::Stalled(reason)) => warn!(shipment_id = %id, %reason, "Shipment stalled"),
        Err(e) => error!(shipment_id = %id, error = %e, "Simulation aborted"),
    }
}

impl Simulation {
    async fn drive(&self) -> Result<Outcome, ShipmentError> {
        let config = &self.env.config;
        let processing = config.processing_delay();

        sleep(config.scaled(processing)).await;

        let origin = match self.env.routes.geocode(&self.params.origin_address).await {
            Ok(origin) => origin,
            Err(e) => {
                warn!(shipment_id = %self.id, error = %e, "Geocoding failed");
                return self
                    .stall(StallReason::GeocodeFailed {
                        address: self.params.origin_address.clone(),
                    })
                    .await;
            }
        };
        let destination = match self
            .env
            .routes
            .geocode(&self.params.destination_address)
            .await
        {
            Ok(destination) => destination,
            Err(e) => {
                warn!(shipment_id = %self.id, error = %e, "Geocoding failed");
                return self
                    .stall(StallReason::GeocodeFailed {
                        address: self.params.destination_address.clone(),
                    })
                    .await;
            }
        };

        let route = self.env.routes.route(origin, destination).await;
        if route.is_empty() {
            warn!(shipment_id = %self.id, "Route provider returned no waypoints");
            return self.stall(StallReason::RouteUnavailable).await;
        }

        let delivery = estimate(self.params.item_count, self.params.total_cost);
        let eta = chrono::Duration::from_std(config.scaled(processing + delivery))
            .unwrap_or_else(|_| chrono::Duration::zero());
        let waypoints = route.len();

        let resolved = self
            .shipments
            .resolve(self.id, origin, route.clone(), Local::now() + eta)
            .await?;
        if resolved.is_halted() {
            return Ok(Outcome::Cancelled);
        }
        info!(
            shipment_id = %self.id,
            waypoints,
            delivery_secs = delivery.as_secs(),
            "Route resolved"
        );

        sleep(config.scaled(processing)).await;

        let departed = self.shipments.depart(self.id).await?;
        if !self.on_transition(departed).await {
            return Ok(Outcome::Cancelled);
        }

        let interval = config.scaled(delivery).div_f64(waypoints as f64);
        for (i, waypoint) in route.into_iter().enumerate() {
            sleep(interval).await;

            let progress = i as f64 / waypoints as f64;
            let step = self.shipments.advance(self.id, waypoint, progress).await?;
            if !self.on_transition(step.transition).await {
                return Ok(Outcome::Cancelled);
            }
            if step.halfway {
                self.notify(NotificationEvent::HalfwayProgress).await;
            }
        }

        let delivered = self
            .shipments
            .deliver(self.id, destination, Local::now())
            .await?;
        if !self.on_transition(delivered).await {
            return Ok(Outcome::Cancelled);
        }
        self.notify(NotificationEvent::Delivered).await;

        Ok(Outcome::Delivered)
    }

    /// Announces a status change. Returns false if the shipment was halted.
    async fn on_transition(&self, transition: Transition) -> bool {
        match transition {
            Transition::Halted => false,
            Transition::Unchanged => true,
            Transition::Changed(status) => {
                info!(shipment_id = %self.id, %status, "Status changed");
                self.notify(NotificationEvent::StatusChanged(status)).await;
                true
            }
        }
    }

    async fn stall(&self, reason: StallReason) -> Result<Outcome, ShipmentError> {
        match self.shipments.stall(self.id, reason.clone()).await? {
            Transition::Halted => Ok(Outcome::Cancelled),
            _ => Ok(Outcome::Stalled(reason)),
        }
    }

    async fn notify(&self, event: NotificationEvent) {
        self.env
            .notify(
                self.params.recipient.as_deref(),
                self.id,
                self.params.order_id,
                event,
            )
            .await;
    }
}
