//! Custom actions for the Product actor.

/// Stock operations on a [`Product`](crate::model::Product).
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Reads the current stock level.
    CheckStock,
    /// Takes `u32` units out of stock.
    ///
    /// # Errors
    /// [`ProductError::InsufficientStock`](super::ProductError::InsufficientStock)
    /// if fewer units are available; stock is left untouched.
    ReserveStock(u32),
    /// Puts `u32` previously reserved units back.
    ReleaseStock(u32),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    /// Current stock level.
    CheckStock(u32),
    ReserveStock(Reservation),
    /// Stock level after the release.
    ReleaseStock(u32),
}

/// What an order line needs to know about the units it just reserved.
#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    pub name: String,
    pub unit_price: f64,
    pub remaining: u32,
}
