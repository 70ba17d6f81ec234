//! Collaborator store contracts consumed by the real-time engine.
//!
//! Persistence lives outside this workspace; the document-store backed
//! implementations are provided by the REST service.

use async_trait::async_trait;

use crate::entity::notification::{NewNotification, NotificationRecord};
use crate::entity::user::UserProfile;
use crate::result::AppResult;
use crate::types::UserId;

/// Read access to user accounts.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find a user by id. `Ok(None)` when the account does not exist.
    async fn find_by_id(&self, id: &UserId) -> AppResult<Option<UserProfile>>;
}

/// Durable notification persistence, independent of real-time delivery.
#[async_trait]
pub trait NotificationStore: Send + Sync + 'static {
    /// Persist a notification and return the stored record.
    async fn create(&self, notification: NewNotification) -> AppResult<NotificationRecord>;
}
