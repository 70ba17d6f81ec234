//! User account view consumed by the real-time engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;
use crate::types::{Role, UserId};

/// Moderation status of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// Account in good standing.
    #[default]
    Active,
    /// Account received an administrator warning.
    Warning,
    /// Account is banned.
    Banned,
}

impl UserStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Warning => "warning",
            Self::Banned => "banned",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "warning" => Ok(Self::Warning),
            "banned" => Ok(Self::Banned),
            _ => Err(AppError::validation("Statut invalide")),
        }
    }
}

/// The subset of a stored user the real-time engine needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// User id.
    pub id: UserId,
    /// Display name.
    pub username: String,
    /// Absolute avatar URL.
    pub avatar: String,
    /// Administrator flag.
    pub is_admin: bool,
    /// Moderation status.
    #[serde(default)]
    pub status: UserStatus,
}

impl UserProfile {
    /// Role derived from the administrator flag.
    pub fn role(&self) -> Role {
        Role::from_admin_flag(self.is_admin)
    }

    /// Public identity used as the `fromUser` of notifications.
    pub fn actor(&self) -> ActorSummary {
        ActorSummary {
            id: self.id.clone(),
            username: self.username.clone(),
            avatar: self.avatar.clone(),
        }
    }
}

/// Public identity of whoever caused a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorSummary {
    /// User id.
    pub id: UserId,
    /// Display name.
    pub username: String,
    /// Absolute avatar URL.
    pub avatar: String,
}
