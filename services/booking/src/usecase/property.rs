use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use stayline_domain::events::PropertyEvent;
use stayline_domain::pagination::PageRequest;

use crate::domain::repository::{PropertyRepository, UserRepository};
use crate::domain::types::{AvailabilityPeriod, Caller, Property};
use crate::error::BookingServiceError;

pub struct PeriodInput {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

fn build_periods(
    property_id: Uuid,
    inputs: &[PeriodInput],
) -> Result<Vec<AvailabilityPeriod>, BookingServiceError> {
    inputs
        .iter()
        .map(|p| {
            if p.start_date > p.end_date {
                return Err(BookingServiceError::InvalidDates);
            }
            Ok(AvailabilityPeriod {
                id: Uuid::now_v7(),
                property_id,
                start_date: p.start_date,
                end_date: p.end_date,
            })
        })
        .collect()
}

// ── CreateProperty ───────────────────────────────────────────────────────────

pub struct CreatePropertyInput {
    pub name: String,
    pub description: Option<String>,
    pub nightly_rate_cents: i64,
    pub availability_periods: Vec<PeriodInput>,
}

pub struct CreatePropertyUseCase<P: PropertyRepository, U: UserRepository> {
    pub property_repo: P,
    pub user_repo: U,
}

impl<P: PropertyRepository, U: UserRepository> CreatePropertyUseCase<P, U> {
    pub async fn execute(
        &self,
        caller: Caller,
        input: CreatePropertyInput,
    ) -> Result<Property, BookingServiceError> {
        let owner = self
            .user_repo
            .find_by_id(caller.id)
            .await?
            .ok_or(BookingServiceError::UserNotFound)?;
        if owner.blocked {
            return Err(BookingServiceError::Blocked);
        }
        let now = Utc::now();
        let property = Property {
            id: Uuid::now_v7(),
            owner_id: caller.id,
            name: input.name,
            description: input.description,
            nightly_rate_cents: input.nightly_rate_cents,
            created_at: now,
            updated_at: now,
        };
        let periods = build_periods(property.id, &input.availability_periods)?;
        let created = PropertyEvent::Created.notification(&property.name, caller.id);
        self.property_repo
            .create_with_effects(&property, &periods, &[created])
            .await?;
        Ok(property)
    }
}

// ── Reads ────────────────────────────────────────────────────────────────────

pub struct ListPropertiesUseCase<P: PropertyRepository> {
    pub repo: P,
}

impl<P: PropertyRepository> ListPropertiesUseCase<P> {
    pub async fn execute(&self, page: PageRequest) -> Result<Vec<Property>, BookingServiceError> {
        self.repo.list(page).await
    }
}

pub struct ListAvailablePropertiesUseCase<P: PropertyRepository> {
    pub repo: P,
}

impl<P: PropertyRepository> ListAvailablePropertiesUseCase<P> {
    pub async fn execute(
        &self,
        page: PageRequest,
    ) -> Result<Vec<(Property, Vec<AvailabilityPeriod>)>, BookingServiceError> {
        self.repo.list_available(page).await
    }
}

pub struct ListMyPropertiesUseCase<P: PropertyRepository> {
    pub repo: P,
}

impl<P: PropertyRepository> ListMyPropertiesUseCase<P> {
    pub async fn execute(&self, caller: Caller) -> Result<Vec<Property>, BookingServiceError> {
        self.repo.list_by_owner(caller.id).await
    }
}

pub struct GetPropertyUseCase<P: PropertyRepository> {
    pub repo: P,
}

impl<P: PropertyRepository> GetPropertyUseCase<P> {
    pub async fn execute(&self, property_id: Uuid) -> Result<Property, BookingServiceError> {
        self.repo
            .find_by_id(property_id)
            .await?
            .ok_or(BookingServiceError::PropertyNotFound)
    }
}

pub struct GetAvailabilityUseCase<P: PropertyRepository> {
    pub repo: P,
}

impl<P: PropertyRepository> GetAvailabilityUseCase<P> {
    pub async fn execute(
        &self,
        property_id: Uuid,
    ) -> Result<Vec<AvailabilityPeriod>, BookingServiceError> {
        self.repo
            .find_by_id(property_id)
            .await?
            .ok_or(BookingServiceError::PropertyNotFound)?;
        self.repo.list_availability(property_id).await
    }
}

// ── UpdateProperty ───────────────────────────────────────────────────────────

pub struct UpdatePropertyInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub nightly_rate_cents: Option<i64>,
    pub availability_periods: Option<Vec<PeriodInput>>,
}

pub struct UpdatePropertyUseCase<P: PropertyRepository> {
    pub repo: P,
}

impl<P: PropertyRepository> UpdatePropertyUseCase<P> {
    pub async fn execute(
        &self,
        caller: Caller,
        property_id: Uuid,
        input: UpdatePropertyInput,
    ) -> Result<Property, BookingServiceError> {
        let mut property = self
            .repo
            .find_by_id(property_id)
            .await?
            .ok_or(BookingServiceError::PropertyNotFound)?;
        if property.owner_id != caller.id && !caller.is_admin() {
            return Err(BookingServiceError::Forbidden);
        }
        if let Some(name) = input.name {
            property.name = name;
        }
        if let Some(description) = input.description {
            property.description = Some(description);
        }
        if let Some(rate) = input.nightly_rate_cents {
            property.nightly_rate_cents = rate;
        }
        property.updated_at = Utc::now();
        let periods = input
            .availability_periods
            .as_deref()
            .map(|inputs| build_periods(property.id, inputs))
            .transpose()?;
        let updated = PropertyEvent::Updated.notification(&property.name, property.owner_id);
        self.repo
            .update_with_effects(&property, periods.as_deref(), &[updated])
            .await?;
        Ok(property)
    }
}

// ── DeleteProperty ───────────────────────────────────────────────────────────

pub struct DeletePropertyUseCase<P: PropertyRepository> {
    pub repo: P,
}

impl<P: PropertyRepository> DeletePropertyUseCase<P> {
    pub async fn execute(
        &self,
        caller: Caller,
        property_id: Uuid,
    ) -> Result<Property, BookingServiceError> {
        let property = self
            .repo
            .find_by_id(property_id)
            .await?
            .ok_or(BookingServiceError::PropertyNotFound)?;
        if property.owner_id != caller.id && !caller.is_admin() {
            return Err(BookingServiceError::Forbidden);
        }
        let deleted = PropertyEvent::Deleted.notification(&property.name, property.owner_id);
        self.repo
            .delete_with_effects(property_id, &[deleted])
            .await?;
        Ok(property)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use stayline_domain::events::NotificationDraft;
    use stayline_domain::notification::NotificationKind;
    use stayline_domain::user::UserRole;

    use crate::domain::types::User;

    struct MockPropertyRepo {
        properties: Mutex<Vec<Property>>,
        periods: Mutex<Vec<AvailabilityPeriod>>,
        notifications: Mutex<Vec<NotificationDraft>>,
    }

    impl MockPropertyRepo {
        fn with(properties: Vec<Property>) -> Self {
            Self {
                properties: Mutex::new(properties),
                periods: Mutex::new(Vec::new()),
                notifications: Mutex::new(Vec::new()),
            }
        }
    }

    impl PropertyRepository for MockPropertyRepo {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<Property>, BookingServiceError> {
            Ok(self
                .properties
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.id == id)
                .cloned())
        }

        async fn list(&self, _page: PageRequest) -> Result<Vec<Property>, BookingServiceError> {
            Ok(self.properties.lock().unwrap().clone())
        }

        async fn list_available(
            &self,
            _page: PageRequest,
        ) -> Result<Vec<(Property, Vec<AvailabilityPeriod>)>, BookingServiceError> {
            let properties = self.properties.lock().unwrap().clone();
            let periods = self.periods.lock().unwrap();
            Ok(properties
                .into_iter()
                .filter_map(|p| {
                    let mine: Vec<_> = periods
                        .iter()
                        .filter(|period| period.property_id == p.id)
                        .copied()
                        .collect();
                    (!mine.is_empty()).then_some((p, mine))
                })
                .collect())
        }

        async fn list_by_owner(
            &self,
            owner_id: Uuid,
        ) -> Result<Vec<Property>, BookingServiceError> {
            Ok(self
                .properties
                .lock()
                .unwrap()
                .iter()
                .filter(|p| p.owner_id == owner_id)
                .cloned()
                .collect())
        }

        async fn list_availability(
            &self,
            property_id: Uuid,
        ) -> Result<Vec<AvailabilityPeriod>, BookingServiceError> {
            Ok(self
                .periods
                .lock()
                .unwrap()
                .iter()
                .filter(|p| p.property_id == property_id)
                .copied()
                .collect())
        }

        async fn create_with_effects(
            &self,
            property: &Property,
            periods: &[AvailabilityPeriod],
            notifications: &[NotificationDraft],
        ) -> Result<(), BookingServiceError> {
            self.properties.lock().unwrap().push(property.clone());
            self.periods.lock().unwrap().extend_from_slice(periods);
            self.notifications
                .lock()
                .unwrap()
                .extend_from_slice(notifications);
            Ok(())
        }

        async fn update_with_effects(
            &self,
            property: &Property,
            periods: Option<&[AvailabilityPeriod]>,
            notifications: &[NotificationDraft],
        ) -> Result<(), BookingServiceError> {
            let mut properties = self.properties.lock().unwrap();
            if let Some(existing) = properties.iter_mut().find(|p| p.id == property.id) {
                *existing = property.clone();
            }
            if let Some(periods) = periods {
                let mut stored = self.periods.lock().unwrap();
                stored.retain(|p| p.property_id != property.id);
                stored.extend_from_slice(periods);
            }
            self.notifications
                .lock()
                .unwrap()
                .extend_from_slice(notifications);
            Ok(())
        }

        async fn delete_with_effects(
            &self,
            property_id: Uuid,
            notifications: &[NotificationDraft],
        ) -> Result<(), BookingServiceError> {
            self.properties
                .lock()
                .unwrap()
                .retain(|p| p.id != property_id);
            self.notifications
                .lock()
                .unwrap()
                .extend_from_slice(notifications);
            Ok(())
        }
    }

    struct MockUserRepo {
        user: Option<User>,
    }

    impl UserRepository for MockUserRepo {
        async fn find_by_id(&self, _id: Uuid) -> Result<Option<User>, BookingServiceError> {
            Ok(self.user.clone())
        }
        async fn find_by_email(&self, _email: &str) -> Result<Option<User>, BookingServiceError> {
            Ok(None)
        }
        async fn has_bookings(&self, _user_id: Uuid) -> Result<bool, BookingServiceError> {
            Ok(false)
        }
        async fn create_with_effects(
            &self,
            _user: &User,
            _notifications: &[NotificationDraft],
        ) -> Result<(), BookingServiceError> {
            Ok(())
        }
        async fn update_profile_with_effects(
            &self,
            _user: &User,
            _notifications: &[NotificationDraft],
        ) -> Result<(), BookingServiceError> {
            Ok(())
        }
        async fn set_blocked_with_effects(
            &self,
            _user_id: Uuid,
            _blocked: bool,
            _notifications: &[NotificationDraft],
        ) -> Result<(), BookingServiceError> {
            Ok(())
        }
        async fn delete(&self, _user_id: Uuid) -> Result<(), BookingServiceError> {
            Ok(())
        }
    }

    fn test_owner(blocked: bool) -> User {
        let now = Utc::now();
        User {
            id: Uuid::now_v7(),
            first_name: "Olla".into(),
            last_name: "Own".into(),
            email: "olla@example.com".into(),
            role: UserRole::Owner,
            blocked,
            created_at: now,
            updated_at: now,
        }
    }

    fn test_property(owner_id: Uuid) -> Property {
        let now = Utc::now();
        Property {
            id: Uuid::now_v7(),
            owner_id,
            name: "Sea Loft".into(),
            description: None,
            nightly_rate_cents: 12_000,
            created_at: now,
            updated_at: now,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn should_create_property_with_periods_and_success_notification() {
        let owner = test_owner(false);
        let caller = Caller {
            id: owner.id,
            role: UserRole::Owner,
        };
        let usecase = CreatePropertyUseCase {
            property_repo: MockPropertyRepo::with(Vec::new()),
            user_repo: MockUserRepo { user: Some(owner) },
        };
        let property = usecase
            .execute(
                caller,
                CreatePropertyInput {
                    name: "Sea Loft".into(),
                    description: Some("By the water".into()),
                    nightly_rate_cents: 12_000,
                    availability_periods: vec![PeriodInput {
                        start_date: date(2026, 5, 1),
                        end_date: date(2026, 5, 31),
                    }],
                },
            )
            .await
            .unwrap();

        assert_eq!(property.owner_id, caller.id);
        assert_eq!(usecase.property_repo.periods.lock().unwrap().len(), 1);
        let notifications = usecase.property_repo.notifications.lock().unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].kind, NotificationKind::Success);
        assert!(notifications[0].message.contains("now available for booking"));
    }

    #[tokio::test]
    async fn should_block_blocked_owner_from_creating() {
        let owner = test_owner(true);
        let caller = Caller {
            id: owner.id,
            role: UserRole::Owner,
        };
        let usecase = CreatePropertyUseCase {
            property_repo: MockPropertyRepo::with(Vec::new()),
            user_repo: MockUserRepo { user: Some(owner) },
        };
        let result = usecase
            .execute(
                caller,
                CreatePropertyInput {
                    name: "Sea Loft".into(),
                    description: None,
                    nightly_rate_cents: 12_000,
                    availability_periods: Vec::new(),
                },
            )
            .await;
        assert!(matches!(result, Err(BookingServiceError::Blocked)));
    }

    #[tokio::test]
    async fn should_reject_inverted_availability_period() {
        let owner = test_owner(false);
        let caller = Caller {
            id: owner.id,
            role: UserRole::Owner,
        };
        let usecase = CreatePropertyUseCase {
            property_repo: MockPropertyRepo::with(Vec::new()),
            user_repo: MockUserRepo { user: Some(owner) },
        };
        let result = usecase
            .execute(
                caller,
                CreatePropertyInput {
                    name: "Sea Loft".into(),
                    description: None,
                    nightly_rate_cents: 12_000,
                    availability_periods: vec![PeriodInput {
                        start_date: date(2026, 5, 31),
                        end_date: date(2026, 5, 1),
                    }],
                },
            )
            .await;
        assert!(matches!(result, Err(BookingServiceError::InvalidDates)));
    }

    #[tokio::test]
    async fn should_forbid_update_by_non_owner() {
        let property = test_property(Uuid::now_v7());
        let property_id = property.id;
        let usecase = UpdatePropertyUseCase {
            repo: MockPropertyRepo::with(vec![property]),
        };
        let result = usecase
            .execute(
                Caller {
                    id: Uuid::now_v7(),
                    role: UserRole::Owner,
                },
                property_id,
                UpdatePropertyInput {
                    name: Some("Taken Over".into()),
                    description: None,
                    nightly_rate_cents: None,
                    availability_periods: None,
                },
            )
            .await;
        assert!(matches!(result, Err(BookingServiceError::Forbidden)));
    }

    #[tokio::test]
    async fn should_allow_admin_update_with_owner_notification() {
        let owner_id = Uuid::now_v7();
        let property = test_property(owner_id);
        let property_id = property.id;
        let usecase = UpdatePropertyUseCase {
            repo: MockPropertyRepo::with(vec![property]),
        };
        let updated = usecase
            .execute(
                Caller {
                    id: Uuid::now_v7(),
                    role: UserRole::Admin,
                },
                property_id,
                UpdatePropertyInput {
                    name: None,
                    description: None,
                    nightly_rate_cents: Some(15_000),
                    availability_periods: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.nightly_rate_cents, 15_000);
        let notifications = usecase.repo.notifications.lock().unwrap();
        // the property owner is notified, not the admin
        assert_eq!(notifications[0].user_id, owner_id);
        assert_eq!(notifications[0].kind, NotificationKind::Info);
    }

    #[tokio::test]
    async fn should_delete_property_with_warning_notification() {
        let owner_id = Uuid::now_v7();
        let property = test_property(owner_id);
        let property_id = property.id;
        let usecase = DeletePropertyUseCase {
            repo: MockPropertyRepo::with(vec![property]),
        };
        usecase
            .execute(
                Caller {
                    id: owner_id,
                    role: UserRole::Owner,
                },
                property_id,
            )
            .await
            .unwrap();
        assert!(usecase.repo.properties.lock().unwrap().is_empty());
        let notifications = usecase.repo.notifications.lock().unwrap();
        assert_eq!(notifications[0].kind, NotificationKind::Warning);
        assert_eq!(
            notifications[0].message,
            "Your property 'Sea Loft' has been deleted."
        );
    }

    #[tokio::test]
    async fn should_return_not_found_for_missing_property_availability() {
        let usecase = GetAvailabilityUseCase {
            repo: MockPropertyRepo::with(Vec::new()),
        };
        let result = usecase.execute(Uuid::now_v7()).await;
        assert!(matches!(result, Err(BookingServiceError::PropertyNotFound)));
    }
}
