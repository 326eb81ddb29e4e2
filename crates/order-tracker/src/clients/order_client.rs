//! # Order Client
//!
//! High-level API for the `Order` actor. User validation and stock
//! reservation happen inside the actor's `on_create` hook, not here.
use crate::model::{Order, OrderCreate, OrderId, ShipmentId, ShipmentStatus, UserId};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError};
use async_trait::async_trait;
use tracing::{debug, info, instrument};
use tracker_actor::{ActorClient, FrameworkError, ResourceClient};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        debug!("create_order called");
        info!("Sending create_order to actor");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn attach_shipment(
        &self,
        id: OrderId,
        shipment_id: ShipmentId,
    ) -> Result<(), OrderError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, OrderAction::AttachShipment(shipment_id))
            .await
        {
            Ok(OrderActionResult::AttachShipment(())) => Ok(()),
            Ok(_) => unreachable!("AttachShipment action must return AttachShipment result"),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Records `status`, returning the status the order held before.
    #[instrument(skip(self))]
    pub async fn sync_status(
        &self,
        id: OrderId,
        status: ShipmentStatus,
    ) -> Result<ShipmentStatus, OrderError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, OrderAction::SyncStatus(status))
            .await
        {
            Ok(OrderActionResult::SyncStatus(previous)) => Ok(previous),
            Ok(_) => unreachable!("SyncStatus action must return SyncStatus result"),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Every order placed by `user_id`, oldest first.
    #[instrument(skip(self))]
    pub async fn orders_for_user(&self, user_id: UserId) -> Result<Vec<Order>, OrderError> {
        let mut orders: Vec<Order> = self
            .list()
            .await?
            .into_iter()
            .filter(|order| order.user_id == user_id)
            .collect();
        orders.sort_by_key(|order| order.id);
        Ok(orders)
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<OrderError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => OrderError::NotFound(id),
            Err(other) => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
