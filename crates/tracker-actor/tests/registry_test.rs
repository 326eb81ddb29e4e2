use async_trait::async_trait;
use tracker_actor::{ActorClient, ActorEntity, FrameworkError, RandomIds, ResourceActor, ResourceClient};

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Warehouse {
    id: u32,
    city: String,
    open: bool,
}

#[derive(Debug)]
struct WarehouseCreate {
    city: String,
}

#[derive(Debug)]
struct WarehouseUpdate {
    city: Option<String>,
}

#[derive(Debug)]
enum WarehouseAction {
    Close,
}

#[derive(Debug, thiserror::Error)]
enum WarehouseError {
    #[error("city must not be empty")]
    EmptyCity,
    #[error("{0}")]
    Communication(String),
}

impl From<String> for WarehouseError {
    fn from(msg: String) -> Self {
        WarehouseError::Communication(msg)
    }
}

#[async_trait]
impl ActorEntity for Warehouse {
    type Id = u32;
    type Create = WarehouseCreate;
    type Update = WarehouseUpdate;
    type Action = WarehouseAction;
    type ActionResult = bool;
    type Context = ();
    type Error = WarehouseError;

    fn from_create_params(id: u32, params: WarehouseCreate) -> Result<Self, Self::Error> {
        if params.city.is_empty() {
            return Err(WarehouseError::EmptyCity);
        }
        Ok(Self {
            id,
            city: params.city,
            open: true,
        })
    }

    async fn on_update(&mut self, update: WarehouseUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(city) = update.city {
            self.city = city;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: WarehouseAction, _ctx: &()) -> Result<bool, Self::Error> {
        match action {
            // Reports whether this call did the closing.
            WarehouseAction::Close => Ok(std::mem::replace(&mut self.open, false)),
        }
    }
}

struct WarehouseClient {
    inner: ResourceClient<Warehouse>,
}

#[async_trait]
impl ActorClient<Warehouse> for WarehouseClient {
    type Error = WarehouseError;

    fn inner(&self) -> &ResourceClient<Warehouse> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        WarehouseError::Communication(e.to_string())
    }
}

// --- Tests ---

#[tokio::test]
async fn test_registry_full_lifecycle() {
    let (actor, client) = ResourceActor::<Warehouse>::new(10);
    let handle = tokio::spawn(actor.run(()));

    let id: u32 = client
        .create(WarehouseCreate {
            city: "Detroit".into(),
        })
        .await
        .unwrap();
    assert_eq!(id, 1);

    assert!(client.perform_action(id, WarehouseAction::Close).await.unwrap());
    assert!(!client.perform_action(id, WarehouseAction::Close).await.unwrap());

    let updated = client
        .update(
            id,
            WarehouseUpdate {
                city: Some("Warren".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.city, "Warren");
    assert!(!updated.open);

    let wrapper = WarehouseClient {
        inner: client.clone(),
    };
    let all = wrapper.list().await.unwrap();
    assert_eq!(all, vec![updated]);

    drop(wrapper);
    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_failed_create_stores_nothing() {
    let (actor, client) = ResourceActor::<Warehouse>::new(10);
    tokio::spawn(actor.run(()));

    let err = client
        .create(WarehouseCreate { city: String::new() })
        .await
        .unwrap_err();
    assert!(matches!(err, FrameworkError::EntityError(_)));
    assert!(err.to_string().contains("city must not be empty"));
    assert!(client.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let (actor, client) = ResourceActor::<Warehouse>::new(10);
    tokio::spawn(actor.run(()));

    assert!(client.get(42).await.unwrap().is_none());
    let err = client
        .perform_action(42, WarehouseAction::Close)
        .await
        .unwrap_err();
    assert!(matches!(err, FrameworkError::NotFound(ref id) if id == "42"));
}

#[tokio::test]
async fn test_random_ids_are_unique_under_concurrency() {
    let (actor, client) = ResourceActor::<Warehouse>::with_ids(64, RandomIds::new(100_000..=999_999));
    tokio::spawn(actor.run(()));

    let mut handles = Vec::new();
    for i in 0..50 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client
                .create(WarehouseCreate {
                    city: format!("city-{i}"),
                })
                .await
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        let id = handle.await.unwrap().unwrap();
        assert!((100_000..=999_999).contains(&id));
        ids.push(id);
    }
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 50);
}

#[tokio::test]
async fn test_closed_actor_is_reported() {
    let (actor, client) = ResourceActor::<Warehouse>::new(1);
    drop(actor);

    let err = client.get(1).await.unwrap_err();
    assert!(matches!(err, FrameworkError::ActorClosed));
}
