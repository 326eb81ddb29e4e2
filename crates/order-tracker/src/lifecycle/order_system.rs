use crate::clients::{OrderClient, ProductClient, ShipmentClient, UserClient};
use crate::config::TrackerConfig;
use crate::model::{
    default_catalog, Order, OrderCreate, OrderId, ProductId, ShipmentCreate, ShipmentId,
    ShipmentStatus, TrackingSnapshot, UserId,
};
use crate::notify::Notifier;
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use crate::routing::RouteProvider;
use crate::shipment_actor::SHIPMENT_IDS;
use crate::tracker::ShipmentTracker;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use tracker_actor::{ActorClient, IdSource, RandomIds};

/// Identifiers handed back when an order is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedOrder {
    pub order_id: OrderId,
    pub shipment_id: ShipmentId,
}

/// The runtime orchestrator for the order tracker.
///
/// `OrderSystem` is responsible for:
/// - **Lifecycle Management**: starting and stopping every actor
/// - **Dependency Wiring**: the Order actor gets the User and Product clients
/// - **Shipping**: turning a stored order into a tracked shipment
pub struct OrderSystem {
    /// Client for interacting with the User actor
    pub user_client: UserClient,

    /// Client for interacting with the Product actor
    pub product_client: ProductClient,

    /// Client for interacting with the Order actor
    pub order_client: OrderClient,

    /// Places shipments and answers tracking queries
    pub tracker: ShipmentTracker,

    config: TrackerConfig,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl OrderSystem {
    /// Creates and starts every actor.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(
        config: TrackerConfig,
        routes: Arc<dyn RouteProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self::with_shipment_ids(config, routes, notifier, RandomIds::new(SHIPMENT_IDS))
    }

    /// Like [`new`](Self::new), with tracking numbers drawn from `ids`.
    pub fn with_shipment_ids(
        config: TrackerConfig,
        routes: Arc<dyn RouteProvider>,
        notifier: Arc<dyn Notifier>,
        ids: impl IdSource,
    ) -> Self {
        // 1. Create actors (no dependencies)
        let (user_actor, user_client) = crate::user_actor::new();
        let (product_actor, product_client) = crate::product_actor::new();
        let (order_actor, order_client) = crate::order_actor::new();
        let (shipment_actor, shipment_client) = crate::shipment_actor::with_ids(ids);

        let user_client = UserClient::new(user_client);
        let product_client = ProductClient::new(product_client);
        let order_client = OrderClient::new(order_client);
        let shipment_client = ShipmentClient::new(shipment_client);

        // 2. Start actors with injected context
        let user_handle = tokio::spawn(user_actor.run(()));
        let product_handle = tokio::spawn(product_actor.run(()));
        let order_handle = tokio::spawn(
            order_actor.run((user_client.clone(), product_client.clone())),
        );
        let shipment_handle = tokio::spawn(shipment_actor.run(()));

        let tracker = ShipmentTracker::new(
            shipment_client,
            routes,
            notifier,
            config.simulation.clone(),
        );

        Self {
            user_client,
            product_client,
            order_client,
            tracker,
            config,
            handles: vec![user_handle, product_handle, order_handle, shipment_handle],
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Creates the default parts catalog, unless `store.seed_catalog` is off.
    #[instrument(skip(self))]
    pub async fn seed_catalog(&self) -> Result<Vec<ProductId>, ProductError> {
        if !self.config.store.seed_catalog {
            return Ok(Vec::new());
        }
        let mut ids = Vec::new();
        for product in default_catalog() {
            ids.push(self.product_client.create_product(product).await?);
        }
        info!(products = ids.len(), "Catalog seeded");
        Ok(ids)
    }

    /// Stores the order, then ships it to `destination_address`.
    ///
    /// Stock is reserved when the order is created. The user's e-mail, if
    /// any, becomes the shipment's notification recipient. If the shipment
    /// cannot be placed or attached, the order is cancelled and its stock
    /// released before the error is returned.
    #[instrument(skip(self, params, destination_address), fields(user_id = %params.user_id))]
    pub async fn place_order(
        &self,
        params: OrderCreate,
        destination_address: impl Into<String>,
    ) -> Result<PlacedOrder, OrderError> {
        let order_id = self.order_client.create_order(params).await?;
        let order = self.order(order_id).await?;

        let shipment_id = match self.ship(&order, destination_address.into()).await {
            Ok(shipment_id) => shipment_id,
            Err(e) => {
                warn!(%order_id, error = %e, "Shipping failed, rolling back order");
                self.withdraw(&order).await;
                return Err(e);
            }
        };

        info!(%order_id, %shipment_id, total = order.total_price(), "Order placed");
        Ok(PlacedOrder {
            order_id,
            shipment_id,
        })
    }

    /// Places the order's shipment and links it to the order.
    async fn ship(&self, order: &Order, destination_address: String) -> Result<ShipmentId, OrderError> {
        let recipient = self
            .user_client
            .get(order.user_id)
            .await?
            .and_then(|user| user.notification_address());

        let shipment_id = self
            .tracker
            .place(ShipmentCreate {
                order_id: order.id,
                recipient,
                origin_address: self.config.routing.origin_address.clone(),
                destination_address,
                item_count: order.item_count(),
                total_cost: order.total_price(),
            })
            .await?;

        if let Err(e) = self
            .order_client
            .attach_shipment(order.id, shipment_id)
            .await
        {
            // Still processing, so this stops the simulation.
            if let Err(cancel) = self.tracker.cancel(shipment_id).await {
                warn!(%shipment_id, error = %cancel, "Failed to cancel orphaned shipment");
            }
            return Err(e);
        }
        Ok(shipment_id)
    }

    /// Marks the order cancelled and returns every line's stock.
    /// Failures are logged only.
    async fn withdraw(&self, order: &Order) {
        if let Err(e) = self
            .order_client
            .sync_status(order.id, ShipmentStatus::Cancelled)
            .await
        {
            warn!(order_id = %order.id, error = %e, "Failed to mark order cancelled");
        }
        for item in &order.items {
            if let Err(e) = self
                .product_client
                .release_stock(item.product_id, item.quantity)
                .await
            {
                warn!(product_id = %item.product_id, error = %e, "Failed to restock");
            }
        }
    }

    /// Live tracking snapshot for an order's shipment. The order's stored
    /// status is brought up to date as a side effect.
    #[instrument(skip(self))]
    pub async fn track_order(&self, order_id: OrderId) -> Result<TrackingSnapshot, OrderError> {
        let order = self.order(order_id).await?;
        let shipment_id = order
            .shipment_id
            .ok_or_else(|| OrderError::NotShipped(order_id.to_string()))?;

        let snapshot = self.tracker.get_status(shipment_id).await?;
        if let Some(status) = snapshot.status {
            if status != order.status {
                self.order_client.sync_status(order_id, status).await?;
            }
        }
        Ok(snapshot)
    }

    /// Cancels an order whose shipment is still processing.
    ///
    /// On success the order is marked cancelled and its stock is returned.
    /// Returns `false` once the shipment has left processing.
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, order_id: OrderId) -> Result<bool, OrderError> {
        let order = self.order(order_id).await?;
        let shipment_id = order
            .shipment_id
            .ok_or_else(|| OrderError::NotShipped(order_id.to_string()))?;

        if !self.tracker.cancel(shipment_id).await? {
            info!(%order_id, "Order can no longer be cancelled");
            return Ok(false);
        }

        self.withdraw(&order).await;
        info!(%order_id, "Order cancelled");
        Ok(true)
    }

    /// Every order the user has placed, oldest first.
    pub async fn order_history(&self, user_id: UserId) -> Result<Vec<Order>, OrderError> {
        self.order_client.orders_for_user(user_id).await
    }

    async fn order(&self, order_id: OrderId) -> Result<Order, OrderError> {
        self.order_client
            .get(order_id)
            .await?
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Running simulations are aborted, then dropping the clients closes the
    /// actor channels and each actor leaves its loop.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if all actors shut down cleanly
    /// - `Err(String)` if any actor task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        self.tracker.shutdown().await;

        drop(self.tracker);
        drop(self.order_client);
        drop(self.user_client);
        drop(self.product_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
