//! [`ActorEntity`] implementation for [`Product`], including the stock
//! actions.

use super::actions::{ProductAction, ProductActionResult, Reservation};
use super::ProductError;
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use async_trait::async_trait;
use tracker_actor::ActorEntity;

fn validate_price(price: f64) -> Result<(), ProductError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ProductError::ValidationError(format!("invalid price: {price}")));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Context = ();
    type Error = ProductError;

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, Self::Error> {
        if params.name.trim().is_empty() {
            return Err(ProductError::ValidationError("name must not be empty".into()));
        }
        validate_price(params.price)?;
        Ok(Self {
            id,
            name: params.name,
            price: params.price,
            inventory: params.inventory,
        })
    }

    /// # Fields Updated
    /// - `price`: Product price
    /// - `inventory`: Available stock quantity
    async fn on_update(&mut self, update: ProductUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(price) = update.price {
            validate_price(price)?;
            self.price = price;
        }
        if let Some(inventory) = update.inventory {
            self.inventory = inventory;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &(),
    ) -> Result<ProductActionResult, Self::Error> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::CheckStock(self.inventory)),
            ProductAction::ReserveStock(0) | ProductAction::ReleaseStock(0) => {
                Err(ProductError::InvalidQuantity(0))
            }
            ProductAction::ReserveStock(quantity) => {
                if self.inventory < quantity {
                    return Err(ProductError::InsufficientStock {
                        requested: quantity,
                        available: self.inventory,
                    });
                }
                self.inventory -= quantity;
                Ok(ProductActionResult::ReserveStock(Reservation {
                    name: self.name.clone(),
                    unit_price: self.price,
                    remaining: self.inventory,
                }))
            }
            ProductAction::ReleaseStock(quantity) => {
                self.inventory = self.inventory.saturating_add(quantity);
                Ok(ProductActionResult::ReleaseStock(self.inventory))
            }
        }
    }
}
