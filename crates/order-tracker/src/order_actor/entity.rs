//! [`ActorEntity`] implementation for [`Order`].
//!
//! Creation is where the cross-actor work happens: `from_create_params`
//! checks the shape of the request, then `on_create` confirms the user and
//! reserves stock line by line. If any line fails, the lines already reserved
//! are released before the error is returned, so a rejected order leaves
//! inventory as it found it.

use super::actions::{OrderAction, OrderActionResult};
use super::OrderError;
use crate::clients::{ProductClient, UserClient};
use crate::model::{Order, OrderCreate, OrderId, OrderItem, ProductId, ShipmentStatus};
use crate::product_actor::ProductError;
use async_trait::async_trait;
use tracing::{debug, warn};
use tracker_actor::{ActorClient, ActorEntity};

/// Gives back every reservation in `reserved`. Failures are logged only.
async fn release_all(products: &ProductClient, reserved: &[(ProductId, u32)]) {
    for (product_id, quantity) in reserved {
        if let Err(e) = products.release_stock(*product_id, *quantity).await {
            warn!(%product_id, quantity, error = %e, "Failed to release reservation");
        }
    }
}

impl Order {
    /// Moves the recorded status forward to `status`, returning the status
    /// held before. Older reports and anything after a terminal status are
    /// ignored, so a late poll cannot undo a cancellation or a delivery.
    fn sync_status(&mut self, status: ShipmentStatus) -> ShipmentStatus {
        let previous = self.status;
        if previous.is_terminal() || status <= previous {
            if status != previous {
                debug!(order_id = %self.id, %previous, %status, "Ignoring stale status");
            }
            return previous;
        }
        self.status = status;
        previous
    }
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = ();
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Context = (UserClient, ProductClient);
    type Error = OrderError;

    /// Lines become unpriced items; `on_create` fills in name and price.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        if params.lines.is_empty() {
            return Err(OrderError::ValidationError("order has no items".into()));
        }
        if let Some(line) = params.lines.iter().find(|line| line.quantity == 0) {
            return Err(OrderError::ValidationError(format!(
                "quantity for {} must be positive",
                line.product_id
            )));
        }

        let items = params
            .lines
            .into_iter()
            .map(|line| OrderItem {
                product_id: line.product_id,
                name: String::new(),
                unit_price: 0.0,
                quantity: line.quantity,
            })
            .collect();

        Ok(Self {
            id,
            user_id: params.user_id,
            items,
            status: ShipmentStatus::Processing,
            shipment_id: None,
        })
    }

    async fn on_create(&mut self, ctx: &Self::Context) -> Result<(), Self::Error> {
        let (users, products) = ctx;

        if users.get(self.user_id).await?.is_none() {
            return Err(OrderError::InvalidUser(self.user_id.to_string()));
        }

        let mut reserved = Vec::with_capacity(self.items.len());
        for item in &mut self.items {
            match products.reserve_stock(item.product_id, item.quantity).await {
                Ok(reservation) => {
                    debug!(product_id = %item.product_id, quantity = item.quantity, "Reserved");
                    item.name = reservation.name;
                    item.unit_price = reservation.unit_price;
                    reserved.push((item.product_id, item.quantity));
                }
                Err(e) => {
                    release_all(products, &reserved).await;
                    return Err(match e {
                        ProductError::NotFound(id) => OrderError::InvalidProduct(id),
                        other => other.into(),
                    });
                }
            }
        }
        Ok(())
    }

    async fn on_update(&mut self, _update: (), _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        _ctx: &Self::Context,
    ) -> Result<OrderActionResult, Self::Error> {
        match action {
            OrderAction::AttachShipment(shipment_id) => {
                if let Some(existing) = self.shipment_id {
                    return Err(OrderError::AlreadyShipped {
                        order: self.id.to_string(),
                        shipment: existing.to_string(),
                    });
                }
                self.shipment_id = Some(shipment_id);
                Ok(OrderActionResult::AttachShipment(()))
            }
            OrderAction::SyncStatus(status) => {
                Ok(OrderActionResult::SyncStatus(self.sync_status(status)))
            }
        }
    }
}
