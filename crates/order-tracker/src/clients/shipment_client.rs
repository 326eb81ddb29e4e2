//! # Shipment Client
//!
//! One method per simulation step. The simulation engine is the only writer;
//! pollers use the read methods from [`ActorClient`].
use crate::model::{Coordinates, Shipment, ShipmentCreate, ShipmentId, StallReason};
use crate::shipment_actor::{
    Advanced, ShipmentAction, ShipmentActionResult, ShipmentError, Transition,
};
use async_trait::async_trait;
use chrono::{DateTime, Local};
use tracing::{debug, instrument};
use tracker_actor::{ActorClient, FrameworkError, ResourceClient};

/// Client for interacting with the Shipment actor.
#[derive(Clone)]
pub struct ShipmentClient {
    inner: ResourceClient<Shipment>,
}

impl ShipmentClient {
    pub fn new(inner: ResourceClient<Shipment>) -> Self {
        Self { inner }
    }

    async fn act(
        &self,
        id: ShipmentId,
        action: ShipmentAction,
    ) -> Result<ShipmentActionResult, ShipmentError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }

    /// Registers a new shipment and returns its tracking number.
    #[instrument(skip(self))]
    pub async fn place(&self, params: ShipmentCreate) -> Result<ShipmentId, ShipmentError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self, route))]
    pub async fn resolve(
        &self,
        id: ShipmentId,
        origin: Coordinates,
        route: Vec<Coordinates>,
        expected_arrival: DateTime<Local>,
    ) -> Result<Transition, ShipmentError> {
        debug!(waypoints = route.len(), "Sending request");
        let action = ShipmentAction::Resolve {
            origin,
            route,
            expected_arrival,
        };
        match self.act(id, action).await? {
            ShipmentActionResult::Resolve(transition) => Ok(transition),
            _ => unreachable!("Resolve action must return Resolve result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn depart(&self, id: ShipmentId) -> Result<Transition, ShipmentError> {
        match self.act(id, ShipmentAction::Depart).await? {
            ShipmentActionResult::Depart(transition) => Ok(transition),
            _ => unreachable!("Depart action must return Depart result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn advance(
        &self,
        id: ShipmentId,
        waypoint: Coordinates,
        progress: f64,
    ) -> Result<Advanced, ShipmentError> {
        match self
            .act(id, ShipmentAction::Advance { waypoint, progress })
            .await?
        {
            ShipmentActionResult::Advance(advanced) => Ok(advanced),
            _ => unreachable!("Advance action must return Advance result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn deliver(
        &self,
        id: ShipmentId,
        destination: Coordinates,
        at: DateTime<Local>,
    ) -> Result<Transition, ShipmentError> {
        match self
            .act(id, ShipmentAction::Deliver { destination, at })
            .await?
        {
            ShipmentActionResult::Deliver(transition) => Ok(transition),
            _ => unreachable!("Deliver action must return Deliver result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn stall(
        &self,
        id: ShipmentId,
        reason: StallReason,
    ) -> Result<Transition, ShipmentError> {
        match self.act(id, ShipmentAction::Stall(reason)).await? {
            ShipmentActionResult::Stall(transition) => Ok(transition),
            _ => unreachable!("Stall action must return Stall result"),
        }
    }

    /// True if this call moved the shipment from Processing to Cancelled.
    #[instrument(skip(self))]
    pub async fn cancel(&self, id: ShipmentId) -> Result<bool, ShipmentError> {
        match self.act(id, ShipmentAction::Cancel).await? {
            ShipmentActionResult::Cancel(cancelled) => Ok(cancelled),
            _ => unreachable!("Cancel action must return Cancel result"),
        }
    }
}

#[async_trait]
impl ActorClient<Shipment> for ShipmentClient {
    type Error = ShipmentError;

    fn inner(&self) -> &ResourceClient<Shipment> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<ShipmentError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => ShipmentError::NotFound(id),
            Err(other) => ShipmentError::ActorCommunicationError(other.to_string()),
        }
    }
}
