//! # Order Tracker Demo
//!
//! Seeds the parts catalog, registers a customer, places one order to the
//! demo address in Warren, MI and polls its shipment until it arrives.
//!
//! ```bash
//! cargo run -p order-tracker                       # real time, about 21 minutes
//! ORDER_TRACKER_SIMULATION__TIME_SCALE=0.01 cargo run -p order-tracker
//! cargo run -p order-tracker -- tracker.toml       # layered config file
//! ```

use anyhow::{Context, Result};
use order_tracker::config::TrackerConfig;
use order_tracker::lifecycle::OrderSystem;
use order_tracker::model::{OrderCreate, UserCreate};
use order_tracker::notify::TracingNotifier;
use order_tracker::routing::{StaticRouteProvider, DEMO_DESTINATION};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, Instrument};
use tracker_actor::tracing::setup_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing();

    let config = TrackerConfig::load(std::env::args().nth(1).map(PathBuf::from))?;
    info!(
        time_scale = config.simulation.time_scale,
        origin = %config.routing.origin_address,
        "Starting order tracker"
    );

    let routes = Arc::new(StaticRouteProvider::detroit(config.routing.waypoints));
    let poll_interval = config.simulation.scaled(Duration::from_secs(5));
    let system = OrderSystem::new(config, routes, Arc::new(TracingNotifier));

    let products = system.seed_catalog().await?;

    let user_id = system
        .user_client
        .create_user(UserCreate {
            username: "jdoe".to_string(),
            email: Some("jdoe@example.com".to_string()),
        })
        .instrument(tracing::info_span!("user_creation"))
        .await?;
    info!(%user_id, "User created");

    let mut order = OrderCreate::new(user_id);
    for (product_id, quantity) in products.iter().zip([2, 1, 4]) {
        order = order.line(*product_id, quantity);
    }

    let placed = system
        .place_order(order, DEMO_DESTINATION)
        .instrument(tracing::info_span!("order_processing"))
        .await?;

    let route = system
        .tracker
        .get_route(placed.shipment_id)
        .await?
        .map_or(0, |route| route.len());
    info!(shipment_id = %placed.shipment_id, waypoints = route, "Tracking shipment");

    let tracking = async {
        loop {
            tokio::time::sleep(poll_interval).await;
            let snapshot = system.track_order(placed.order_id).await?;
            let status = snapshot
                .status
                .context("shipment disappeared from the registry")?;
            info!(
                %status,
                location = %snapshot.location,
                eta = %snapshot.expected_arrival,
                "Polled"
            );
            if status.is_terminal() || snapshot.is_stalled() {
                return anyhow::Ok(snapshot);
            }
        }
    };
    let snapshot = tracking
        .instrument(tracing::info_span!("tracking", order_id = %placed.order_id))
        .await?;

    info!(
        arrived = %snapshot.arrival_date,
        stall = ?snapshot.stall,
        "Tracking finished"
    );

    system.shutdown().await.map_err(anyhow::Error::msg)?;
    info!("Application completed successfully");
    Ok(())
}
