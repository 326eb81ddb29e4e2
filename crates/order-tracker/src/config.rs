//! Layered configuration for the order tracker.
//!
//! Configuration is loaded in layers with increasing priority:
//! 1. Compiled-in defaults (30 s processing, real-time clock, Detroit warehouse)
//! 2. TOML configuration file (if provided)
//! 3. Environment variable overrides (prefix `ORDER_TRACKER_`, nested with `__`)
//!
//! ```bash
//! # Run the demo sixty times faster than real time
//! ORDER_TRACKER_SIMULATION__TIME_SCALE=0.0166 cargo run
//! ```

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;

use crate::routing::{DEFAULT_WAYPOINTS, WAREHOUSE_ADDRESS};

// ── Default value functions ────────────────────────────────────────────

/// Default processing delay: 30 000 ms.
fn default_processing_delay_ms() -> u64 {
    30_000
}

/// Default time scale: real time.
fn default_time_scale() -> f64 {
    1.0
}

/// Default notification timeout: 5 000 ms.
fn default_notify_timeout_ms() -> u64 {
    5_000
}

fn default_origin_address() -> String {
    WAREHOUSE_ADDRESS.to_string()
}

fn default_waypoints() -> usize {
    DEFAULT_WAYPOINTS
}

fn default_seed_catalog() -> bool {
    true
}

// ── Configuration structs ──────────────────────────────────────────────

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct TrackerConfig {
    /// Timing of the shipment simulation.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Where shipments start and how routes are drawn.
    #[serde(default)]
    pub routing: RoutingConfig,
    /// Initial store contents.
    #[serde(default)]
    pub store: StoreConfig,
}

/// Timing of the shipment simulation.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SimulationConfig {
    /// Order-intake latency, waited once before routing and once before
    /// departure.
    #[serde(default = "default_processing_delay_ms")]
    pub processing_delay_ms: u64,
    /// Multiplier applied to every simulated delay. `0.5` runs twice as fast.
    #[serde(default = "default_time_scale")]
    pub time_scale: f64,
    /// Upper bound on a single notification send.
    #[serde(default = "default_notify_timeout_ms")]
    pub notify_timeout_ms: u64,
}

/// Route generation settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RoutingConfig {
    /// Address every shipment leaves from.
    #[serde(default = "default_origin_address")]
    pub origin_address: String,
    /// Waypoints per generated route, endpoints included.
    #[serde(default = "default_waypoints")]
    pub waypoints: usize,
}

/// Initial store contents.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// Create the default parts catalog at startup.
    #[serde(default = "default_seed_catalog")]
    pub seed_catalog: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            processing_delay_ms: default_processing_delay_ms(),
            time_scale: default_time_scale(),
            notify_timeout_ms: default_notify_timeout_ms(),
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            origin_address: default_origin_address(),
            waypoints: default_waypoints(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed_catalog: default_seed_catalog(),
        }
    }
}

impl SimulationConfig {
    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }

    /// Not scaled: this bounds real I/O, not simulated time.
    pub fn notify_timeout(&self) -> Duration {
        Duration::from_millis(self.notify_timeout_ms)
    }

    /// `duration` in simulated time. An unusable scale leaves it unscaled.
    pub fn scaled(&self, duration: Duration) -> Duration {
        Duration::try_from_secs_f64(duration.as_secs_f64() * self.time_scale).unwrap_or(duration)
    }
}

impl TrackerConfig {
    /// Load configuration using layered sources.
    ///
    /// 1. Compiled-in defaults.
    /// 2. TOML file at `config_path` (if `Some`).
    /// 3. Environment variable overrides with prefix `ORDER_TRACKER_` and
    ///    `__` as the nesting separator (e.g.
    ///    `ORDER_TRACKER_ROUTING__WAYPOINTS=20`).
    ///
    /// The result is validated before it is returned.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Self::defaults()?;

        // ── Layer 2: TOML file ─────────────────────────────────────
        if let Some(path) = config_path {
            let path_str = path.to_str().context("config path is not valid UTF-8")?;
            builder = builder.add_source(File::with_name(path_str).required(true));
        }

        Self::finish(builder)
    }

    /// Layer 1: compiled-in defaults.
    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        let builder = Config::builder()
            .set_default(
                "simulation.processing_delay_ms",
                default_processing_delay_ms() as i64,
            )?
            .set_default("simulation.time_scale", default_time_scale())?
            .set_default(
                "simulation.notify_timeout_ms",
                default_notify_timeout_ms() as i64,
            )?
            .set_default("routing.origin_address", default_origin_address())?
            .set_default("routing.waypoints", default_waypoints() as i64)?
            .set_default("store.seed_catalog", default_seed_catalog())?;
        Ok(builder)
    }

    /// Layer 3 (environment), then deserialize and validate.
    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        // The prefix separator is set explicitly; `config` otherwise reuses
        // the nesting separator and would expect `ORDER_TRACKER__`.
        let builder = builder.add_source(
            Environment::with_prefix("ORDER_TRACKER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let cfg: TrackerConfig = builder
            .build()
            .context("failed to build configuration")?
            .try_deserialize()
            .context("failed to deserialize configuration")?;

        cfg.validate()?;
        Ok(cfg)
    }

    /// Validate configuration invariants.
    pub fn validate(&self) -> Result<()> {
        let scale = self.simulation.time_scale;
        if !scale.is_finite() || scale <= 0.0 {
            bail!("simulation.time_scale must be a positive number, got {scale}");
        }
        if self.routing.waypoints < 2 {
            bail!(
                "routing.waypoints must be at least 2, got {}",
                self.routing.waypoints
            );
        }
        if self.routing.origin_address.trim().is_empty() {
            bail!("routing.origin_address must not be empty");
        }
        Ok(())
    }
}
