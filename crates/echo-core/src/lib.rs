//! # echo-core
//!
//! Core crate for Vocal Echo. Contains typed identifiers, configuration
//! schemas, the domain records exchanged with the real-time engine,
//! moderation workflow events, the collaborator store traits, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other Vocal Echo crates.

pub mod config;
pub mod entity;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
