use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::id::{IdSource, SequentialIds, MAX_ID_ATTEMPTS};
use crate::message::ResourceRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The server half of a registry: owns the entities and the request receiver.
///
/// # Concurrency Model
/// Requests are handled one at a time in [`run`](Self::run). That loop is the
/// exclusion scope for the whole registry: an action applies all of its field
/// writes before the next request is even received, so a `Get` can only ever
/// observe a fully committed entity. No `Mutex` guards `store`.
///
/// Callers never wait on anything but the loop itself. A task that is asleep
/// between two actions holds nothing, so it cannot starve readers.
///
/// # Usage Pattern
///
/// ```rust
/// use tracker_actor::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Parcel { id: u32 }
/// #[derive(Debug)] struct ParcelCreate;
/// #[derive(Debug)] struct ParcelUpdate;
/// #[derive(Debug)] enum ParcelAction {}
/// #[derive(Debug, thiserror::Error)] #[error("parcel error")] struct ParcelError;
///
/// #[async_trait]
/// impl ActorEntity for Parcel {
///     type Id = u32;
///     type Create = ParcelCreate;
///     type Update = ParcelUpdate;
///     type Action = ParcelAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = ParcelError;
///
///     fn from_create_params(id: u32, _: ParcelCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
///     async fn on_update(&mut self, _: ParcelUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: ParcelAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Parcel>::new(10);
///     tokio::spawn(actor.run(()));
///     let id = client.create(ParcelCreate).await.unwrap();
///     assert!(client.get(id).await.unwrap().is_some());
/// }
/// ```
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    ids: Box<dyn IdSource>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates an actor with sequential ids and its client.
    ///
    /// `buffer_size` is the capacity of the request channel; senders wait when
    /// it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        Self::with_ids(buffer_size, SequentialIds::new())
    }

    /// Creates an actor that draws ids from `ids`.
    pub fn with_ids(buffer_size: usize, ids: impl IdSource) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            ids: Box::new(ids),
        };
        (actor, ResourceClient::new(sender))
    }

    /// Draws candidates until one is not in the store.
    fn allocate_id(&mut self) -> Result<T::Id, FrameworkError> {
        for attempt in 1..=MAX_ID_ATTEMPTS {
            let id = T::Id::from(self.ids.next_id());
            if !self.store.contains_key(&id) {
                return Ok(id);
            }
            debug!(%id, attempt, "Id collision, drawing again");
        }
        Err(FrameworkError::IdSpaceExhausted {
            attempts: MAX_ID_ATTEMPTS,
        })
    }

    /// Runs the request loop until every client has been dropped.
    ///
    /// `context` is handed to every entity hook, which lets an actor depend on
    /// clients that were created after it.
    pub async fn run(mut self, context: T::Context) {
        // "Shipment" rather than "order_tracker::model::shipment::Shipment"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = match self.allocate_id() {
                        Ok(id) => id,
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(e));
                            continue;
                        }
                    };

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => {
                            if let Err(e) = item.on_create(&context).await {
                                warn!(entity_type, error = %e, "on_create failed");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            self.store.insert(id.clone(), item);
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "List");
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    if let Some(item) = self.store.get_mut(&id) {
                        if let Err(e) = item.on_update(update, &context).await {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        info!(entity_type, %id, "Updated");
                        let _ = respond_to.send(Ok(item.clone()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if let Some(item) = self.store.get_mut(&id) {
                        let result = item
                            .handle_action(action, &context)
                            .await
                            .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                        match &result {
                            Ok(outcome) => debug!(entity_type, %id, ?outcome, "Action ok"),
                            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
