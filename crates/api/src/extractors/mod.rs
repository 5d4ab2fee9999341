//! Request extractors.

pub mod admin_actor;

pub use admin_actor::AdminActor;
