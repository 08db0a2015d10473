use std::sync::Arc;

use models::{UserInput, UserPatch, UserRecord};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::errors::ServiceError;
use crate::storage::OrderedMap;
use crate::user::repository::UserRepository;
use crate::user::sort::{SortField, SortOrder};

/// User registry operations independent of web framework.
///
/// Each call loads the full user set from the repository; mutations save it
/// back. Mutations in this process are serialised so that concurrent
/// load-modify-save cycles cannot overwrite each other.
pub struct UserService<R: UserRepository> {
    repo: Arc<R>,
    write_lock: Mutex<()>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo, write_lock: Mutex::new(()) } }

    pub fn repository(&self) -> &Arc<R> { &self.repo }

    /// Every user keyed by id, in file order, with derived fields.
    pub async fn list(&self) -> Result<OrderedMap<UserRecord>, ServiceError> {
        let users = self.repo.load().await?;
        Ok(users.map_values(|id, u| u.to_record(id)))
    }

    /// Exact id lookup.
    pub async fn get(&self, id: &str) -> Result<UserRecord, ServiceError> {
        let users = self.repo.load().await?;
        users
            .get(id)
            .map(|u| u.to_record(id))
            .ok_or_else(|| ServiceError::not_found("user"))
    }

    /// Parse `field` / `order` then sort. Bad arguments fail before any I/O.
    pub async fn sort(&self, field: &str, order: &str) -> Result<Vec<UserRecord>, ServiceError> {
        let field: SortField = field.parse()?;
        let order: SortOrder = order.parse()?;
        self.sort_by(field, order).await
    }

    /// Stable sort on one numeric field; ties keep file order in both directions.
    #[instrument(skip(self))]
    pub async fn sort_by(&self, field: SortField, order: SortOrder) -> Result<Vec<UserRecord>, ServiceError> {
        let users = self.repo.load().await?;
        let mut keyed: Vec<(f64, UserRecord)> = users
            .iter()
            .map(|(id, u)| (field.key(u), u.to_record(id)))
            .collect();
        keyed.sort_by(|a, b| order.compare(a.0, b.0));
        debug!(count = keyed.len(), "users sorted");
        Ok(keyed.into_iter().map(|(_, r)| r).collect())
    }

    /// Validate and insert a new user; `AlreadyExists` if the id is taken.
    ///
    /// # Examples
    /// ```
    /// use service::user::{repository::mock::MockUserRepository, UserService};
    /// use models::{Gender, UserInput, Verdict};
    /// use std::sync::Arc;
    /// let svc = UserService::new(Arc::new(MockUserRepository::default()));
    /// let input = UserInput { id: "P001".into(), name: "Asha".into(), city: "Pune".into(), age: 30, gender: Gender::Female, height: 1.60, weight: 55.0 };
    /// let user = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert_eq!(user.bmi, Some(21.48));
    /// assert_eq!(user.verdict, Some(Verdict::Normal));
    /// ```
    #[instrument(skip(self, input), fields(user_id = %input.id))]
    pub async fn create(&self, input: UserInput) -> Result<UserRecord, ServiceError> {
        let (id, user) = input.into_parts()?;

        let _guard = self.write_lock.lock().await;
        let mut users = self.repo.load().await?;
        if users.contains_key(&id) {
            return Err(ServiceError::already_exists("user"));
        }
        let record = user.to_record(&id);
        users.insert(id, user);
        self.repo.save(&users).await?;
        info!(bmi = ?record.bmi, "user_created");
        Ok(record)
    }

    /// Merge only the supplied fields, re-validate the merged user, persist.
    #[instrument(skip(self, patch), fields(user_id = %id))]
    pub async fn update(&self, id: &str, patch: UserPatch) -> Result<UserRecord, ServiceError> {
        let _guard = self.write_lock.lock().await;
        let mut users = self.repo.load().await?;
        let existing = users.get_mut(id).ok_or_else(|| ServiceError::not_found("user"))?;

        let merged = patch.apply_to(existing);
        merged.validate()?;
        *existing = merged;
        let record = existing.to_record(id);

        self.repo.save(&users).await?;
        info!(bmi = ?record.bmi, fields_set = !patch.is_empty(), "user_updated");
        Ok(record)
    }

    /// Remove a user; `NotFound` if absent.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let _guard = self.write_lock.lock().await;
        let mut users = self.repo.load().await?;
        if users.remove(id).is_none() {
            return Err(ServiceError::not_found("user"));
        }
        self.repo.save(&users).await?;
        info!("user_deleted");
        Ok(())
    }
}
