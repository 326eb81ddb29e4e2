//! # Shipment Tracker
//!
//! The public face of the simulation engine: `place`, `get_status`,
//! `get_route` and `cancel`. Reads go straight to the Shipment actor and
//! never wait on a running simulation.
use crate::clients::ShipmentClient;
use crate::config::SimulationConfig;
use crate::model::{Coordinates, Shipment, ShipmentCreate, ShipmentId, TrackingSnapshot};
use crate::notify::{NotificationEvent, Notifier};
use crate::routing::RouteProvider;
use crate::shipment_actor::ShipmentError;
use crate::simulation::{self, Collaborators};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};
use tracker_actor::ActorClient;

/// Places shipments and answers tracking queries.
///
/// Cheap to clone; every clone shares the same Shipment actor and the same
/// set of running simulations.
#[derive(Clone)]
pub struct ShipmentTracker {
    shipments: ShipmentClient,
    env: Arc<Collaborators>,
    tasks: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl ShipmentTracker {
    pub fn new(
        shipments: ShipmentClient,
        routes: Arc<dyn RouteProvider>,
        notifier: Arc<dyn Notifier>,
        config: SimulationConfig,
    ) -> Self {
        Self {
            shipments,
            env: Arc::new(Collaborators {
                routes,
                notifier,
                config,
            }),
            tasks: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Registers a shipment in `Processing` and starts its simulation.
    ///
    /// Returns as soon as the shipment is stored; routing happens in the
    /// background after the processing delay.
    #[instrument(skip(self, params), fields(order_id = %params.order_id))]
    pub async fn place(&self, params: ShipmentCreate) -> Result<ShipmentId, ShipmentError> {
        let id = self.shipments.place(params.clone()).await?;
        info!(shipment_id = %id, "Shipment placed");

        let task = tokio::spawn(simulation::run(
            id,
            params,
            self.shipments.clone(),
            self.env.clone(),
        ));

        let mut tasks = self.tasks.lock().await;
        tasks.retain(|task| !task.is_finished());
        tasks.push(task);
        Ok(id)
    }

    /// Current tracking snapshot. Unknown ids answer with
    /// [`TrackingSnapshot::unknown`] rather than an error.
    pub async fn get_status(&self, id: ShipmentId) -> Result<TrackingSnapshot, ShipmentError> {
        let shipment = self.shipments.get(id).await?;
        Ok(shipment
            .as_ref()
            .map_or_else(TrackingSnapshot::unknown, TrackingSnapshot::from))
    }

    /// The shipment's full waypoint list, or `None` until it is resolved.
    pub async fn get_route(
        &self,
        id: ShipmentId,
    ) -> Result<Option<Vec<Coordinates>>, ShipmentError> {
        let shipment = self.shipments.get(id).await?;
        Ok(shipment
            .filter(Shipment::is_routed)
            .map(|shipment| shipment.route))
    }

    /// Cancels a shipment that is still `Processing`.
    ///
    /// Returns `false` for unknown ids and for shipments past processing.
    /// A successful cancel notifies the recipient and stops the simulation
    /// at its next step.
    #[instrument(skip(self))]
    pub async fn cancel(&self, id: ShipmentId) -> Result<bool, ShipmentError> {
        match self.shipments.cancel(id).await {
            Ok(true) => {}
            Ok(false) => {
                debug!("Shipment is past processing");
                return Ok(false);
            }
            Err(ShipmentError::NotFound(_)) => return Ok(false),
            Err(e) => return Err(e),
        }
        info!(shipment_id = %id, "Shipment cancelled");

        if let Some(shipment) = self.shipments.get(id).await? {
            self.env
                .notify(
                    shipment.recipient.as_deref(),
                    id,
                    shipment.order_id,
                    NotificationEvent::Cancelled,
                )
                .await;
        }
        Ok(true)
    }

    /// Number of simulations that have not finished yet.
    pub async fn active_simulations(&self) -> usize {
        let mut tasks = self.tasks.lock().await;
        tasks.retain(|task| !task.is_finished());
        tasks.len()
    }

    /// Aborts every running simulation and waits for the tasks to unwind.
    pub async fn shutdown(&self) {
        let tasks: Vec<JoinHandle<()>> = self.tasks.lock().await.drain(..).collect();
        let running = tasks.len();
        for task in &tasks {
            task.abort();
        }
        for task in tasks {
            let _ = task.await;
        }
        debug!(running, "Simulations stopped");
    }
}
