use order_tracker::config::TrackerConfig;
use order_tracker::lifecycle::OrderSystem;
use order_tracker::model::{OrderCreate, ProductId, ShipmentStatus, UserCreate, UserId};
use order_tracker::notify::{ChannelNotifier, Notification, NotificationEvent};
use order_tracker::order_actor::OrderError;
use order_tracker::product_actor::ProductError;
use order_tracker::routing::{StaticRouteProvider, DEMO_DESTINATION};
use order_tracker::shipment_actor::ShipmentError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracker_actor::{ActorClient, RandomIds};

struct Store {
    system: OrderSystem,
    notifications: mpsc::Receiver<Notification>,
    products: Vec<ProductId>,
    customer: UserId,
}

/// Full system with the default catalog and one customer who has an e-mail.
async fn open_store() -> Store {
    let (notifier, notifications) = ChannelNotifier::new(64);
    let system = OrderSystem::new(
        TrackerConfig::default(),
        Arc::new(StaticRouteProvider::detroit(4)),
        Arc::new(notifier),
    );
    let products = system.seed_catalog().await.expect("Failed to seed catalog");
    let customer = system
        .user_client
        .create_user(UserCreate {
            username: "alice".into(),
            email: Some("alice@example.com".into()),
        })
        .await
        .expect("Failed to create user");

    Store {
        system,
        notifications,
        products,
        customer,
    }
}

async fn stock(system: &OrderSystem, id: ProductId) -> u32 {
    system
        .product_client
        .check_stock(id)
        .await
        .expect("Failed to check stock")
}

/// Full end-to-end run: order, reservation, simulated delivery, status sync.
#[tokio::test(start_paused = true)]
async fn test_order_is_delivered_and_synced() {
    let mut store = open_store().await;
    let system = &store.system;
    assert_eq!(store.products.len(), 15);

    let brake_pads = store.products[0];
    let spark_plugs = store.products[2];
    let order = OrderCreate::new(store.customer)
        .line(brake_pads, 2)
        .line(spark_plugs, 4);

    let placed = system
        .place_order(order, DEMO_DESTINATION)
        .await
        .expect("Failed to place order");

    // Stock is reserved as soon as the order exists.
    assert_eq!(stock(system, brake_pads).await, 98);
    assert_eq!(stock(system, spark_plugs).await, 146);

    let stored = system
        .order_client
        .get(placed.order_id)
        .await
        .expect("Failed to get order")
        .expect("Order not found");
    assert_eq!(stored.shipment_id, Some(placed.shipment_id));
    assert_eq!(stored.items[0].name, "Brake Pads");
    assert_eq!(stored.item_count(), 6);
    assert!((stored.total_price() - 79.94).abs() < 1e-9);

    let shipment = system
        .tracker
        .get_status(placed.shipment_id)
        .await
        .expect("Failed to get shipment");
    assert_eq!(shipment.status, Some(ShipmentStatus::Processing));

    // Wait for the delivery e-mail, then poll once more to sync the order.
    loop {
        let notification = store.notifications.recv().await.expect("notifier open");
        assert_eq!(notification.recipient, "alice@example.com");
        assert_eq!(notification.order_id, placed.order_id);
        if notification.event == NotificationEvent::Delivered {
            break;
        }
    }
    let snapshot = system
        .track_order(placed.order_id)
        .await
        .expect("Failed to track order");
    assert_eq!(snapshot.status, Some(ShipmentStatus::Delivered));

    let history = system
        .order_history(store.customer)
        .await
        .expect("Failed to list orders");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status, ShipmentStatus::Delivered);

    // Too late to cancel.
    assert!(!system.cancel_order(placed.order_id).await.unwrap());

    store.system.shutdown().await.expect("Failed to shut down");
}

#[tokio::test(start_paused = true)]
async fn test_cancel_order_restocks_and_notifies() {
    let mut store = open_store().await;
    let system = &store.system;
    let battery = store.products[7];

    let placed = system
        .place_order(OrderCreate::new(store.customer).line(battery, 3), DEMO_DESTINATION)
        .await
        .expect("Failed to place order");
    assert_eq!(stock(system, battery).await, 47);

    assert!(system.cancel_order(placed.order_id).await.unwrap());
    assert_eq!(stock(system, battery).await, 50);

    let notification = store.notifications.recv().await.expect("notifier open");
    assert_eq!(notification.event, NotificationEvent::Cancelled);
    assert_eq!(notification.shipment_id, placed.shipment_id);

    tokio::time::sleep(Duration::from_secs(3600)).await;
    let snapshot = system.track_order(placed.order_id).await.unwrap();
    assert_eq!(snapshot.status, Some(ShipmentStatus::Cancelled));

    let order = system.order_client.get(placed.order_id).await.unwrap().unwrap();
    assert_eq!(order.status, ShipmentStatus::Cancelled);

    // Cancelling twice neither succeeds nor restocks again.
    assert!(!system.cancel_order(placed.order_id).await.unwrap());
    assert_eq!(stock(system, battery).await, 50);

    store.system.shutdown().await.expect("Failed to shut down");
}

#[tokio::test(start_paused = true)]
async fn test_late_status_report_cannot_undo_cancellation() {
    let store = open_store().await;
    let system = &store.system;

    let placed = system
        .place_order(
            OrderCreate::new(store.customer).line(store.products[7], 1),
            DEMO_DESTINATION,
        )
        .await
        .expect("Failed to place order");
    assert!(system.cancel_order(placed.order_id).await.unwrap());

    // A poll that read the shipment before the cancel lands afterwards.
    let previous = system
        .order_client
        .sync_status(placed.order_id, ShipmentStatus::Processing)
        .await
        .expect("Failed to sync status");
    assert_eq!(previous, ShipmentStatus::Cancelled);

    let order = system.order_client.get(placed.order_id).await.unwrap().unwrap();
    assert_eq!(order.status, ShipmentStatus::Cancelled);
    let snapshot = system.track_order(placed.order_id).await.unwrap();
    assert_eq!(snapshot.status, Some(ShipmentStatus::Cancelled));
}

#[tokio::test(start_paused = true)]
async fn test_failed_shipment_placement_releases_stock() {
    // Room for exactly one tracking number.
    let (notifier, _notifications) = ChannelNotifier::new(64);
    let system = OrderSystem::with_shipment_ids(
        TrackerConfig::default(),
        Arc::new(StaticRouteProvider::detroit(4)),
        Arc::new(notifier),
        RandomIds::seeded(100_000..=100_000, 1),
    );
    let products = system.seed_catalog().await.expect("Failed to seed catalog");
    let customer = system
        .user_client
        .create_user(UserCreate {
            username: "alice".into(),
            email: Some("alice@example.com".into()),
        })
        .await
        .expect("Failed to create user");
    let battery = products[7];
    let radiator = products[8];

    let first = system
        .place_order(OrderCreate::new(customer).line(battery, 2), DEMO_DESTINATION)
        .await
        .expect("Failed to place first order");
    assert_eq!(first.shipment_id.0, 100_000);
    assert_eq!(stock(&system, battery).await, 48);

    let result = system
        .place_order(
            OrderCreate::new(customer)
                .line(battery, 3)
                .line(radiator, 4),
            DEMO_DESTINATION,
        )
        .await;
    assert!(matches!(
        result,
        Err(OrderError::Shipment(ShipmentError::ActorCommunicationError(_)))
    ));

    // Only the first order keeps its reservation.
    assert_eq!(stock(&system, battery).await, 48);
    assert_eq!(stock(&system, radiator).await, 30);

    let history = system.order_history(customer).await.unwrap();
    assert_eq!(history.len(), 2);
    let failed = history
        .iter()
        .find(|order| order.id != first.order_id)
        .expect("Failed order not stored");
    assert_eq!(failed.status, ShipmentStatus::Cancelled);
    assert_eq!(failed.shipment_id, None);

    let shipped = history
        .iter()
        .find(|order| order.id == first.order_id)
        .unwrap();
    assert_eq!(shipped.shipment_id, Some(first.shipment_id));
    assert_eq!(shipped.status, ShipmentStatus::Processing);

    system.shutdown().await.expect("Failed to shut down");
}

#[tokio::test(start_paused = true)]
async fn test_rejected_orders_leave_stock_untouched() {
    let store = open_store().await;
    let system = &store.system;
    let radiator = store.products[8];
    let muffler = store.products[14];

    // Second line cannot be filled; the first reservation is rolled back.
    let result = system
        .place_order(
            OrderCreate::new(store.customer)
                .line(muffler, 5)
                .line(radiator, 31),
            DEMO_DESTINATION,
        )
        .await;
    assert_eq!(
        result,
        Err(OrderError::Product(ProductError::InsufficientStock {
            requested: 31,
            available: 30
        }))
    );
    assert_eq!(stock(system, muffler).await, 55);
    assert_eq!(stock(system, radiator).await, 30);

    let result = system
        .place_order(OrderCreate::new(UserId(99)).line(muffler, 1), DEMO_DESTINATION)
        .await;
    assert!(matches!(result, Err(OrderError::InvalidUser(_))));

    let result = system
        .place_order(
            OrderCreate::new(store.customer).line(ProductId(404), 1),
            DEMO_DESTINATION,
        )
        .await;
    assert!(matches!(result, Err(OrderError::InvalidProduct(_))));

    let result = system
        .place_order(OrderCreate::new(store.customer), DEMO_DESTINATION)
        .await;
    assert!(matches!(result, Err(OrderError::ValidationError(_))));

    assert!(system
        .order_history(store.customer)
        .await
        .unwrap()
        .is_empty());
    assert_eq!(stock(system, muffler).await, 55);
}

#[tokio::test(start_paused = true)]
async fn test_customer_without_email_gets_no_notifications() {
    let mut store = open_store().await;
    let system = &store.system;
    let quiet = system
        .user_client
        .create_user(UserCreate {
            username: "bob".into(),
            email: None,
        })
        .await
        .unwrap();

    let placed = system
        .place_order(
            OrderCreate::new(quiet).line(store.products[1], 1),
            DEMO_DESTINATION,
        )
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_secs(3600)).await;
    let snapshot = system.track_order(placed.order_id).await.unwrap();
    assert_eq!(snapshot.status, Some(ShipmentStatus::Delivered));
    assert!(store.notifications.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_unknown_order_is_not_found() {
    let store = open_store().await;
    let system = &store.system;
    let missing = order_tracker::model::OrderId(42);

    assert!(matches!(
        system.track_order(missing).await,
        Err(OrderError::NotFound(_))
    ));
    assert!(matches!(
        system.cancel_order(missing).await,
        Err(OrderError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_seeding_can_be_disabled() {
    let mut config = TrackerConfig::default();
    config.store.seed_catalog = false;
    let (notifier, _notifications) = ChannelNotifier::new(1);
    let system = OrderSystem::new(
        config,
        Arc::new(StaticRouteProvider::default()),
        Arc::new(notifier),
    );

    assert!(system.seed_catalog().await.unwrap().is_empty());
    assert!(system.product_client.list().await.unwrap().is_empty());
    system.shutdown().await.expect("Failed to shut down");
}
