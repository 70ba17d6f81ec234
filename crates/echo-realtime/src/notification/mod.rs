//! Notification formatting and durable-then-live dispatch.

pub mod dispatcher;
pub mod formatter;

pub use dispatcher::NotificationDispatcher;
pub use formatter::NotificationFormatter;
