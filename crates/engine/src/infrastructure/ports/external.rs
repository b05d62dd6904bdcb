//! External service ports: notification delivery and the user directory.

use async_trait::async_trait;
use tutorbook_domain::{UserId, UserInfo};

use super::error::{DirectoryError, NotifyError};
use super::types::Notification;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationPort: Send + Sync {
    async fn notify(&self, notification: Notification) -> Result<(), NotifyError>;
}

/// Resolves contact data for tutors and students owned by the auth service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn get_user(&self, id: UserId) -> Result<UserInfo, DirectoryError>;
}
