//! Trait definitions for the collaborators the core consumes.

pub mod store;

pub use store::{NotificationStore, UserStore};
