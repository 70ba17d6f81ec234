//! Notification dispatcher: persists notifications, then delivers them in
//! real time to online users.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, error, warn};

use echo_core::AppResult;
use echo_core::entity::{ActorSummary, NewNotification, NotificationKind, NotificationRecord};
use echo_core::events::ModerationEvent;
use echo_core::traits::{NotificationStore, UserStore};
use echo_core::types::{PostId, UserId};

use crate::message::builder::NotificationBuilder;
use crate::moderation::ModerationEventEmitter;

use super::formatter::NotificationFormatter;

/// Backs real-time notifications with durable records.
///
/// The store is the system of record: offline users read their
/// notifications from it later, online users also get the live event.
pub struct NotificationDispatcher {
    /// Actor lookup for `fromUser`
    users: Arc<dyn UserStore>,
    /// Durable persistence
    store: Arc<dyn NotificationStore>,
    /// Best-effort live delivery
    emitter: ModerationEventEmitter,
}

impl fmt::Debug for NotificationDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationDispatcher")
            .field("emitter", &self.emitter)
            .finish_non_exhaustive()
    }
}

impl NotificationDispatcher {
    /// Create a new dispatcher
    pub fn new(
        users: Arc<dyn UserStore>,
        store: Arc<dyn NotificationStore>,
        emitter: ModerationEventEmitter,
    ) -> Self {
        Self {
            users,
            store,
            emitter,
        }
    }

    /// Persist a notification and push it to the recipient if online.
    ///
    /// Self-notifications are skipped and return `Ok(None)`. A store
    /// failure is logged and returned; nothing is delivered live then.
    pub async fn dispatch(
        &self,
        notification: NewNotification,
    ) -> AppResult<Option<NotificationRecord>> {
        if notification.from_user.as_ref() == Some(&notification.user) {
            debug!(user_id = %notification.user, "Self-notification skipped");
            return Ok(None);
        }

        let record = match self.store.create(notification).await {
            Ok(record) => record,
            Err(e) => {
                error!(error = %e, "Failed to persist notification");
                return Err(e);
            }
        };

        self.deliver_record(&record, None).await;
        Ok(Some(record))
    }

    /// `follower` started following `followed`.
    pub async fn notify_follow(
        &self,
        follower: &UserId,
        followed: &UserId,
    ) -> AppResult<Option<NotificationRecord>> {
        self.dispatch(social(NotificationKind::Follow, follower, followed, None))
            .await
    }

    /// `liker` liked a post written by `author`.
    pub async fn notify_like(
        &self,
        liker: &UserId,
        author: &UserId,
        post: &PostId,
    ) -> AppResult<Option<NotificationRecord>> {
        self.dispatch(social(NotificationKind::Like, liker, author, Some(post)))
            .await
    }

    /// `commenter` commented on a post written by `author`.
    pub async fn notify_comment(
        &self,
        commenter: &UserId,
        author: &UserId,
        post: &PostId,
    ) -> AppResult<Option<NotificationRecord>> {
        self.dispatch(social(NotificationKind::Comment, commenter, author, Some(post)))
            .await
    }

    /// `mentioner` mentioned `mentioned` in a post.
    pub async fn notify_mention(
        &self,
        mentioner: &UserId,
        mentioned: &UserId,
        post: &PostId,
    ) -> AppResult<Option<NotificationRecord>> {
        self.dispatch(social(NotificationKind::Mention, mentioner, mentioned, Some(post)))
            .await
    }

    /// Persist the notifications a moderation outcome implies and deliver
    /// each stored record live, then run the forced logout and dashboard
    /// pushes. A record that fails to persist is not delivered. Returns the
    /// records that were stored.
    pub async fn apply(&self, event: &ModerationEvent) -> Vec<NotificationRecord> {
        let actor = match event {
            ModerationEvent::UserStatusChanged(change) => Some(&change.changed_by),
            _ => None,
        };

        let mut stored = Vec::new();
        for notification in NotificationFormatter::records_for(event) {
            let user_id = notification.user.clone();
            match self.store.create(notification).await {
                Ok(record) => {
                    self.deliver_record(&record, actor).await;
                    stored.push(record);
                }
                Err(e) => error!(
                    user_id = %user_id,
                    error = %e,
                    "Failed to persist moderation notification, live delivery skipped"
                ),
            }
        }

        self.emitter.apply_side_effects(event);
        stored
    }

    /// The emitter used for live delivery.
    pub fn emitter(&self) -> &ModerationEventEmitter {
        &self.emitter
    }

    /// Pushes a stored record to its recipient. `known` is used as the
    /// actor when it matches the record's `from_user`.
    async fn deliver_record(&self, record: &NotificationRecord, known: Option<&ActorSummary>) {
        let actor = match (&record.from_user, known) {
            (Some(id), Some(actor)) if &actor.id == id => Some(actor.clone()),
            (Some(id), _) => self.resolve_actor(id).await,
            (None, _) => None,
        };
        let payload = NotificationBuilder::from_record(record)
            .from_user(actor)
            .build();
        self.emitter.deliver_notification(&record.user, payload);
    }

    async fn resolve_actor(&self, user_id: &UserId) -> Option<ActorSummary> {
        match self.users.find_by_id(user_id).await {
            Ok(Some(user)) => Some(user.actor()),
            Ok(None) => {
                debug!(user_id = %user_id, "Notification actor not found");
                None
            }
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "Failed to load notification actor");
                None
            }
        }
    }
}

fn social(
    kind: NotificationKind,
    actor: &UserId,
    recipient: &UserId,
    post: Option<&PostId>,
) -> NewNotification {
    NewNotification {
        user: recipient.clone(),
        from_user: Some(actor.clone()),
        kind,
        message: NotificationFormatter::message_for(kind).to_string(),
        post: post.cloned(),
    }
}
