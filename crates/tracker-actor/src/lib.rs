//! # Tracker Actor
//!
//! Resource registries built on the actor model. Each registry is a
//! [`ResourceActor`] that owns a map of entities and serves requests one at a
//! time from a channel; callers talk to it through a cloneable
//! [`ResourceClient`].
//!
//! ## Why an actor per registry?
//!
//! - **Atomic commits without locks.** The request loop is the only code that
//!   touches the map, so a multi-field action is applied in full before the
//!   next request is looked at. Readers cannot see torn state.
//! - **Readers never wait on writers' timers.** Long-running work (a shipment
//!   sleeping between waypoints) happens outside the actor and only sends a
//!   short action when it is ready to commit.
//! - **One loop, many resources.** Users, products, orders and shipments all
//!   implement [`ActorEntity`]; the loop, id allocation and error plumbing
//!   are written once.
//!
//! ## Building Blocks
//!
//! - [`ActorEntity`]: the contract a resource implements (create, update,
//!   custom actions, injected context).
//! - [`ResourceActor`]: the server loop. Create, Get, List, Update, Action.
//! - [`ResourceClient`] and [`ActorClient`]: the calling side.
//! - [`IdSource`]: sequential or random ids; the actor re-draws on collision.
//! - [`mock`]: test doubles for clients.
//! - [`tracing::setup_tracing`]: subscriber setup shared by binaries.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod id;
pub mod message;
pub mod mock;
pub mod tracing;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use id::{IdSource, RandomIds, SequentialIds, MAX_ID_ATTEMPTS};
pub use message::{ResourceRequest, Response};
