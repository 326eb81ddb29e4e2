use super::{RouteError, RouteProvider};
use crate::model::Coordinates;
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::debug;

/// The store's warehouse, where every shipment starts by default.
pub const WAREHOUSE_ADDRESS: &str = "3000 E Grand Blvd, Detroit, MI 48202";

/// The delivery address used by the demo.
pub const DEMO_DESTINATION: &str = "14601 E 12 Mile Rd, Warren, MI 48088";

/// Waypoints per route unless configured otherwise.
pub const DEFAULT_WAYPOINTS: usize = 12;

/// Offline stand-in for a geocoding and routing service.
///
/// Addresses are looked up in an in-memory gazetteer, matched without regard
/// to case or surrounding whitespace. Routes are straight lines split into a
/// fixed number of evenly spaced waypoints, both endpoints included.
#[derive(Debug, Clone)]
pub struct StaticRouteProvider {
    gazetteer: HashMap<String, Coordinates>,
    waypoints: usize,
}

impl StaticRouteProvider {
    /// An empty gazetteer producing routes of `waypoints` points.
    pub fn new(waypoints: usize) -> Self {
        Self {
            gazetteer: HashMap::new(),
            waypoints,
        }
    }

    /// Registers (or replaces) an address.
    pub fn with_address(mut self, address: &str, coordinates: Coordinates) -> Self {
        self.gazetteer.insert(normalize(address), coordinates);
        self
    }

    /// The gazetteer seeded with the warehouse and the demo destination.
    pub fn detroit(waypoints: usize) -> Self {
        Self::new(waypoints)
            .with_address(WAREHOUSE_ADDRESS, Coordinates::new(42.3717, -83.0590))
            .with_address(DEMO_DESTINATION, Coordinates::new(42.5069, -82.9895))
    }

    pub fn waypoints(&self) -> usize {
        self.waypoints
    }
}

impl Default for StaticRouteProvider {
    fn default() -> Self {
        Self::detroit(DEFAULT_WAYPOINTS)
    }
}

fn normalize(address: &str) -> String {
    address.trim().to_lowercase()
}

#[async_trait]
impl RouteProvider for StaticRouteProvider {
    async fn geocode(&self, address: &str) -> Result<Coordinates, RouteError> {
        self.gazetteer
            .get(&normalize(address))
            .copied()
            .ok_or_else(|| RouteError::NotFound(address.to_string()))
    }

    async fn route(&self, origin: Coordinates, destination: Coordinates) -> Vec<Coordinates> {
        if self.waypoints < 2 {
            debug!(waypoints = self.waypoints, "Route needs at least two waypoints");
            return Vec::new();
        }
        let last = (self.waypoints - 1) as f64;
        (0..self.waypoints)
            .map(|i| origin.interpolate(&destination, i as f64 / last))
            .collect()
    }
}
