use chrono::Utc;
use uuid::Uuid;

use stayline_domain::events::AccountEvent;
use stayline_domain::user::UserRole;

use crate::domain::repository::UserRepository;
use crate::domain::types::{Caller, User};
use crate::error::BookingServiceError;

// ── RegisterUser ─────────────────────────────────────────────────────────────

pub struct RegisterUserInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: UserRole,
}

/// Signup. The handler decides which roles are creatable per endpoint; this
/// usecase enforces email uniqueness and fans out the welcome notification.
pub struct RegisterUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> RegisterUserUseCase<R> {
    pub async fn execute(&self, input: RegisterUserInput) -> Result<User, BookingServiceError> {
        if self.repo.find_by_email(&input.email).await?.is_some() {
            return Err(BookingServiceError::UserAlreadyExists);
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            role: input.role,
            blocked: false,
            created_at: now,
            updated_at: now,
        };
        let event = if user.role == UserRole::Admin {
            AccountEvent::AdminRegistered
        } else {
            AccountEvent::Registered
        };
        let welcome = event.notification(&user.first_name, user.id);
        self.repo.create_with_effects(&user, &[welcome]).await?;
        Ok(user)
    }
}

// ── GetMe ────────────────────────────────────────────────────────────────────

pub struct GetMeUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetMeUseCase<R> {
    pub async fn execute(&self, caller_id: Uuid) -> Result<User, BookingServiceError> {
        let user = self
            .repo
            .find_by_id(caller_id)
            .await?
            .ok_or(BookingServiceError::UserNotFound)?;
        if user.blocked {
            return Err(BookingServiceError::Blocked);
        }
        Ok(user)
    }
}

// ── UpdateUser ───────────────────────────────────────────────────────────────

pub struct UpdateUserInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

pub struct UpdateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> UpdateUserUseCase<R> {
    pub async fn execute(
        &self,
        caller: Caller,
        user_id: Uuid,
        input: UpdateUserInput,
    ) -> Result<User, BookingServiceError> {
        if !caller.is_self_or_admin(user_id) {
            return Err(BookingServiceError::Forbidden);
        }
        if input.first_name.is_none() && input.last_name.is_none() && input.email.is_none() {
            return Err(BookingServiceError::MissingData);
        }
        let mut user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(BookingServiceError::UserNotFound)?;
        if user.blocked && !caller.is_admin() {
            return Err(BookingServiceError::Blocked);
        }
        if let Some(first_name) = input.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = input.last_name {
            user.last_name = last_name;
        }
        if let Some(email) = input.email {
            user.email = email;
        }
        user.updated_at = Utc::now();
        let updated = AccountEvent::ProfileUpdated.notification(&user.first_name, user.id);
        self.repo
            .update_profile_with_effects(&user, &[updated])
            .await?;
        Ok(user)
    }
}

// ── DeleteUser ───────────────────────────────────────────────────────────────

pub struct DeleteUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> DeleteUserUseCase<R> {
    pub async fn execute(&self, caller: Caller, user_id: Uuid) -> Result<(), BookingServiceError> {
        if !caller.is_self_or_admin(user_id) {
            return Err(BookingServiceError::Forbidden);
        }
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(BookingServiceError::UserNotFound)?;
        if self.repo.has_bookings(user_id).await? {
            return Err(BookingServiceError::UserHasBookings);
        }
        self.repo.delete(user_id).await
    }
}

// ── Block / Unblock ──────────────────────────────────────────────────────────

/// Admin moderation. The admin role gate lives in the handler.
pub struct SetUserBlockedUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> SetUserBlockedUseCase<R> {
    pub async fn execute(&self, user_id: Uuid, blocked: bool) -> Result<(), BookingServiceError> {
        let user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(BookingServiceError::UserNotFound)?;
        let event = if blocked {
            AccountEvent::Blocked
        } else {
            AccountEvent::Unblocked
        };
        let notice = event.notification(&user.first_name, user.id);
        self.repo
            .set_blocked_with_effects(user_id, blocked, &[notice])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use stayline_domain::events::NotificationDraft;
    use stayline_domain::notification::NotificationKind;

    struct MockUserRepo {
        users: Mutex<Vec<User>>,
        notifications: Mutex<Vec<NotificationDraft>>,
        has_bookings: bool,
    }

    impl MockUserRepo {
        fn with(users: Vec<User>) -> Self {
            Self {
                users: Mutex::new(users),
                notifications: Mutex::new(Vec::new()),
                has_bookings: false,
            }
        }
    }

    impl UserRepository for MockUserRepo {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, BookingServiceError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.id == id)
                .cloned())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, BookingServiceError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.email == email)
                .cloned())
        }

        async fn has_bookings(&self, _user_id: Uuid) -> Result<bool, BookingServiceError> {
            Ok(self.has_bookings)
        }

        async fn create_with_effects(
            &self,
            user: &User,
            notifications: &[NotificationDraft],
        ) -> Result<(), BookingServiceError> {
            self.users.lock().unwrap().push(user.clone());
            self.notifications
                .lock()
                .unwrap()
                .extend_from_slice(notifications);
            Ok(())
        }

        async fn update_profile_with_effects(
            &self,
            user: &User,
            notifications: &[NotificationDraft],
        ) -> Result<(), BookingServiceError> {
            let mut users = self.users.lock().unwrap();
            if let Some(existing) = users.iter_mut().find(|u| u.id == user.id) {
                *existing = user.clone();
            }
            self.notifications
                .lock()
                .unwrap()
                .extend_from_slice(notifications);
            Ok(())
        }

        async fn set_blocked_with_effects(
            &self,
            user_id: Uuid,
            blocked: bool,
            notifications: &[NotificationDraft],
        ) -> Result<(), BookingServiceError> {
            let mut users = self.users.lock().unwrap();
            if let Some(existing) = users.iter_mut().find(|u| u.id == user_id) {
                existing.blocked = blocked;
            }
            self.notifications
                .lock()
                .unwrap()
                .extend_from_slice(notifications);
            Ok(())
        }

        async fn delete(&self, user_id: Uuid) -> Result<(), BookingServiceError> {
            self.users.lock().unwrap().retain(|u| u.id != user_id);
            Ok(())
        }
    }

    fn test_user(role: UserRole) -> User {
        let now = Utc::now();
        User {
            id: Uuid::now_v7(),
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            email: "ann@example.com".into(),
            role,
            blocked: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn guest_caller(id: Uuid) -> Caller {
        Caller {
            id,
            role: UserRole::Guest,
        }
    }

    #[tokio::test]
    async fn should_create_user_with_welcome_notification() {
        let usecase = RegisterUserUseCase {
            repo: MockUserRepo::with(Vec::new()),
        };
        let user = usecase
            .execute(RegisterUserInput {
                first_name: "Ann".into(),
                last_name: "Lee".into(),
                email: "ann@example.com".into(),
                role: UserRole::Guest,
            })
            .await
            .unwrap();

        let notifications = usecase.repo.notifications.lock().unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].user_id, user.id);
        assert_eq!(notifications[0].kind, NotificationKind::Success);
        assert!(notifications[0].message.starts_with("Welcome to Stayline, Ann!"));
    }

    #[tokio::test]
    async fn should_reject_duplicate_email() {
        let usecase = RegisterUserUseCase {
            repo: MockUserRepo::with(vec![test_user(UserRole::Guest)]),
        };
        let result = usecase
            .execute(RegisterUserInput {
                first_name: "Bob".into(),
                last_name: "Roe".into(),
                email: "ann@example.com".into(),
                role: UserRole::Guest,
            })
            .await;
        assert!(matches!(result, Err(BookingServiceError::UserAlreadyExists)));
    }

    #[tokio::test]
    async fn should_use_admin_welcome_for_admin_registration() {
        let usecase = RegisterUserUseCase {
            repo: MockUserRepo::with(Vec::new()),
        };
        usecase
            .execute(RegisterUserInput {
                first_name: "Ada".into(),
                last_name: "Ops".into(),
                email: "ada@example.com".into(),
                role: UserRole::Admin,
            })
            .await
            .unwrap();
        let notifications = usecase.repo.notifications.lock().unwrap();
        assert!(notifications[0].message.contains("Stayline Admin"));
    }

    #[tokio::test]
    async fn should_block_blocked_user_from_get_me() {
        let mut user = test_user(UserRole::Guest);
        user.blocked = true;
        let id = user.id;
        let usecase = GetMeUseCase {
            repo: MockUserRepo::with(vec![user]),
        };
        let result = usecase.execute(id).await;
        assert!(matches!(result, Err(BookingServiceError::Blocked)));
    }

    #[tokio::test]
    async fn should_forbid_updating_someone_elses_profile() {
        let user = test_user(UserRole::Guest);
        let target = user.id;
        let usecase = UpdateUserUseCase {
            repo: MockUserRepo::with(vec![user]),
        };
        let result = usecase
            .execute(
                guest_caller(Uuid::now_v7()),
                target,
                UpdateUserInput {
                    first_name: Some("Eve".into()),
                    last_name: None,
                    email: None,
                },
            )
            .await;
        assert!(matches!(result, Err(BookingServiceError::Forbidden)));
    }

    #[tokio::test]
    async fn should_return_missing_data_when_no_fields_provided() {
        let user = test_user(UserRole::Guest);
        let caller = guest_caller(user.id);
        let target = user.id;
        let usecase = UpdateUserUseCase {
            repo: MockUserRepo::with(vec![user]),
        };
        let result = usecase
            .execute(
                caller,
                target,
                UpdateUserInput {
                    first_name: None,
                    last_name: None,
                    email: None,
                },
            )
            .await;
        assert!(matches!(result, Err(BookingServiceError::MissingData)));
    }

    #[tokio::test]
    async fn should_update_profile_with_info_notification() {
        let user = test_user(UserRole::Guest);
        let caller = guest_caller(user.id);
        let target = user.id;
        let usecase = UpdateUserUseCase {
            repo: MockUserRepo::with(vec![user]),
        };
        let updated = usecase
            .execute(
                caller,
                target,
                UpdateUserInput {
                    first_name: Some("Anna".into()),
                    last_name: None,
                    email: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.first_name, "Anna");
        let notifications = usecase.repo.notifications.lock().unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].kind, NotificationKind::Info);
        assert_eq!(
            notifications[0].message,
            "Your profile has been successfully updated."
        );
    }

    #[tokio::test]
    async fn should_conflict_deleting_user_with_bookings() {
        let user = test_user(UserRole::Guest);
        let caller = guest_caller(user.id);
        let target = user.id;
        let mut repo = MockUserRepo::with(vec![user]);
        repo.has_bookings = true;
        let usecase = DeleteUserUseCase { repo };
        let result = usecase.execute(caller, target).await;
        assert!(matches!(result, Err(BookingServiceError::UserHasBookings)));
    }

    #[tokio::test]
    async fn should_delete_user_without_bookings() {
        let user = test_user(UserRole::Guest);
        let caller = guest_caller(user.id);
        let target = user.id;
        let usecase = DeleteUserUseCase {
            repo: MockUserRepo::with(vec![user]),
        };
        usecase.execute(caller, target).await.unwrap();
        assert!(usecase.repo.users.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_block_user_with_error_notification() {
        let user = test_user(UserRole::Guest);
        let target = user.id;
        let usecase = SetUserBlockedUseCase {
            repo: MockUserRepo::with(vec![user]),
        };
        usecase.execute(target, true).await.unwrap();

        assert!(usecase.repo.users.lock().unwrap()[0].blocked);
        let notifications = usecase.repo.notifications.lock().unwrap();
        assert_eq!(notifications[0].kind, NotificationKind::Error);
        assert!(notifications[0].message.contains("temporarily blocked"));
    }

    #[tokio::test]
    async fn should_unblock_user_with_success_notification() {
        let mut user = test_user(UserRole::Guest);
        user.blocked = true;
        let target = user.id;
        let usecase = SetUserBlockedUseCase {
            repo: MockUserRepo::with(vec![user]),
        };
        usecase.execute(target, false).await.unwrap();

        assert!(!usecase.repo.users.lock().unwrap()[0].blocked);
        let notifications = usecase.repo.notifications.lock().unwrap();
        assert_eq!(notifications[0].kind, NotificationKind::Success);
    }

    #[tokio::test]
    async fn should_return_user_not_found_when_blocking_missing_user() {
        let usecase = SetUserBlockedUseCase {
            repo: MockUserRepo::with(Vec::new()),
        };
        let result = usecase.execute(Uuid::now_v7(), true).await;
        assert!(matches!(result, Err(BookingServiceError::UserNotFound)));
    }
}
