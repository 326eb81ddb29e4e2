//! # Product Client
//!
//! Domain API for the Product actor: catalog CRUD plus the stock actions.
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError, Reservation};
use async_trait::async_trait;
use tracing::{debug, instrument};
use tracker_actor::{ActorClient, FrameworkError, ResourceClient};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<ProductError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => ProductError::NotFound(id),
            Err(other) => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl ProductClient {
    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Current stock level.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId) -> Result<u32, ProductError> {
        debug!("Checking stock for product {}", id);
        match self
            .inner
            .perform_action(id, ProductAction::CheckStock)
            .await
        {
            Ok(ProductActionResult::CheckStock(level)) => Ok(level),
            Ok(_) => unreachable!("CheckStock action must return CheckStock result"),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Takes `quantity` units out of stock, returning the name and price they
    /// were reserved at.
    #[instrument(skip(self))]
    pub async fn reserve_stock(
        &self,
        id: ProductId,
        quantity: u32,
    ) -> Result<Reservation, ProductError> {
        debug!("Reserving {} units for product {}", quantity, id);
        match self
            .inner
            .perform_action(id, ProductAction::ReserveStock(quantity))
            .await
        {
            Ok(ProductActionResult::ReserveStock(reservation)) => Ok(reservation),
            Ok(_) => unreachable!("ReserveStock action must return ReserveStock result"),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Puts `quantity` units back, returning the new stock level.
    #[instrument(skip(self))]
    pub async fn release_stock(&self, id: ProductId, quantity: u32) -> Result<u32, ProductError> {
        debug!("Releasing {} units for product {}", quantity, id);
        match self
            .inner
            .perform_action(id, ProductAction::ReleaseStock(quantity))
            .await
        {
            Ok(ProductActionResult::ReleaseStock(level)) => Ok(level),
            Ok(_) => unreachable!("ReleaseStock action must return ReleaseStock result"),
            Err(e) => Err(Self::map_error(e)),
        }
    }
}
