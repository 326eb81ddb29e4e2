//! User-specific resource logic and entity implementation.

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::User;
use tracker_actor::{ResourceActor, ResourceClient};

/// Creates a new User actor and its client.
pub fn new() -> (ResourceActor<User>, ResourceClient<User>) {
    ResourceActor::new(32)
}
