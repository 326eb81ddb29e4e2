//! # Observability
//!
//! Every actor logs through `tracing` with structured fields (`entity_type`,
//! `id`, `size`), and client wrappers add `#[instrument]` spans. The
//! simulation engine logs each committed shipment transition at `info`.
//!
//! ```bash
//! RUST_LOG=info cargo run            # lifecycle and transitions
//! RUST_LOG=debug cargo run           # every request with its payload
//! RUST_LOG=order_tracker=debug,tracker_actor=info cargo run
//! ```
//!
//! With `RUST_LOG=info` a delivery reads roughly:
//!
//! ```text
//! INFO Created entity_type="Shipment" id=482913 size=1
//! INFO place{order_id=order_1}: Shipment placed shipment_id=482913
//! INFO Route resolved shipment_id=482913 waypoints=12 delivery_secs=636
//! INFO Status changed shipment_id=482913 status=In Transit
//! INFO Status changed shipment_id=482913 status=Out for Delivery
//! INFO Delivered shipment_id=482913
//! ```

/// Installs the global subscriber.
///
/// Filtering comes from `RUST_LOG`, defaulting to `info`. Module paths are
/// hidden because every event already carries an `entity_type` or
/// `shipment_id` field.
///
/// # Panics
/// Panics if a global subscriber has already been installed.
pub fn setup_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
