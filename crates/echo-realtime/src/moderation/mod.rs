//! Moderation workflow fan-out.

pub mod emitter;

pub use emitter::ModerationEventEmitter;
