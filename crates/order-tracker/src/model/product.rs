use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

/// A catalog entry with its remaining stock.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](tracker_actor::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](tracker_actor::ResourceActor).
///
/// See [`impl ActorEntity for Product`](#impl-ActorEntity-for-Product) for details on:
/// - Creation parameters ([`ProductCreate`])
/// - Update parameters ([`ProductUpdate`])
/// - Custom actions ([`ProductAction`](crate::product_actor::ProductAction))
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub inventory: u32,
}

/// Payload for creating a new product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub price: f64,
    pub inventory: u32,
}

/// Payload for updating an existing product.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub price: Option<f64>,
    pub inventory: Option<u32>,
}

impl ProductCreate {
    pub fn new(name: impl Into<String>, price: f64, inventory: u32) -> Self {
        Self {
            name: name.into(),
            price,
            inventory,
        }
    }
}

/// The parts every fresh store starts with.
pub fn default_catalog() -> Vec<ProductCreate> {
    vec![
        ProductCreate::new("Brake Pads", 29.99, 100),
        ProductCreate::new("Oil Filter", 9.99, 200),
        ProductCreate::new("Spark Plug", 4.99, 150),
        ProductCreate::new("Air Filter", 19.99, 120),
        ProductCreate::new("Headlight Bulb", 14.99, 80),
        ProductCreate::new("Fuel Pump", 89.99, 60),
        ProductCreate::new("Alternator", 149.99, 40),
        ProductCreate::new("Battery", 119.99, 50),
        ProductCreate::new("Radiator", 199.99, 30),
        ProductCreate::new("Clutch Kit", 249.99, 20),
        ProductCreate::new("Brake Disc", 39.99, 90),
        ProductCreate::new("Suspension Spring", 59.99, 70),
        ProductCreate::new("Shock Absorber", 79.99, 65),
        ProductCreate::new("Catalytic Converter", 299.99, 25),
        ProductCreate::new("Muffler", 99.99, 55),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_has_fifteen_priced_parts() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 15);
        assert!(catalog.iter().all(|p| p.price > 0.0 && p.inventory > 0));
        assert_eq!(catalog[0].name, "Brake Pads");
        assert_eq!(catalog[14].name, "Muffler");
    }
}
