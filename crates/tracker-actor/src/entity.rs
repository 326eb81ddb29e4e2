//! # Registry Entities
//!
//! The [`ActorEntity`] trait is the contract between a resource type and the
//! generic [`ResourceActor`](crate::ResourceActor) that stores it.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource must implement to live inside a [`ResourceActor`](crate::ResourceActor).
///
/// # Architecture Note
/// Users, products, orders and shipments all satisfy this one contract, so the
/// request loop, id allocation and snapshot semantics are written once.
///
/// Every hook runs inside the owning actor's message loop. While a hook runs no
/// other request for that actor is processed, which makes each hook an atomic
/// commit from the point of view of every reader.
///
/// # Async & Context
/// Hooks are `#[async_trait]` so they can call other actors (an order reserving
/// stock, for instance). The `Context` type is injected through
/// [`ResourceActor::run`](crate::ResourceActor::run) rather than at construction.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Unique identifier. Must be convertible from the `u32` produced by the
    /// actor's [`IdSource`](crate::IdSource).
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload required to create a new instance.
    type Create: Send + Sync + Debug;

    /// Payload required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Resource-specific operations (e.g. `ReserveStock`, `Depart`).
    type Action: Send + Sync + Debug;

    /// Result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// Runtime dependencies injected into every hook. Use `()` if none.
    type Context: Send + Sync;

    /// Per-actor error type.
    ///
    /// One enum covers every hook of the resource. A client matches on a
    /// single `OrderError` instead of one error type per action.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the entity from its freshly allocated id and the create payload.
    /// Called synchronously, before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Called after construction and before the entity is stored.
    /// Returning an error aborts the create; nothing is inserted.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply an update payload.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Handle a resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
