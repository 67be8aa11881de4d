use uuid::Uuid;

use crate::domain::repository::NotificationRepository;
use crate::domain::types::{Caller, Notification};
use crate::error::BookingServiceError;

pub struct ListNotificationsUseCase<N: NotificationRepository> {
    pub repo: N,
}

impl<N: NotificationRepository> ListNotificationsUseCase<N> {
    pub async fn execute(&self, caller: Caller) -> Result<Vec<Notification>, BookingServiceError> {
        self.repo.list_for_user(caller.id).await
    }
}

/// Ownership is a filter, not a permission check: a foreign or missing id
/// matches nothing and reads as not found.
pub struct MarkNotificationReadUseCase<N: NotificationRepository> {
    pub repo: N,
}

impl<N: NotificationRepository> MarkNotificationReadUseCase<N> {
    pub async fn execute(
        &self,
        caller: Caller,
        notification_id: Uuid,
    ) -> Result<(), BookingServiceError> {
        if self.repo.mark_read(notification_id, caller.id).await? {
            Ok(())
        } else {
            Err(BookingServiceError::NotificationNotFound)
        }
    }
}

pub struct DeleteNotificationUseCase<N: NotificationRepository> {
    pub repo: N,
}

impl<N: NotificationRepository> DeleteNotificationUseCase<N> {
    pub async fn execute(
        &self,
        caller: Caller,
        notification_id: Uuid,
    ) -> Result<(), BookingServiceError> {
        if self.repo.delete_one(notification_id, caller.id).await? {
            Ok(())
        } else {
            Err(BookingServiceError::NotificationNotFound)
        }
    }
}

pub struct DeleteAllNotificationsUseCase<N: NotificationRepository> {
    pub repo: N,
}

impl<N: NotificationRepository> DeleteAllNotificationsUseCase<N> {
    /// Returns the number of rows removed; zero is a success.
    pub async fn execute(&self, caller: Caller) -> Result<u64, BookingServiceError> {
        self.repo.delete_all(caller.id).await
    }
}
