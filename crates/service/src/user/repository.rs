use async_trait::async_trait;
use models::StoredUser;

use crate::errors::ServiceError;
use crate::storage::OrderedMap;

/// Backing store for the user set: whole-snapshot load and save.
///
/// `load` fails with `StorageUnavailable` or `CorruptData`; `save` fails with
/// `StorageUnavailable`. Implementations keep no state between calls.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn load(&self) -> Result<OrderedMap<StoredUser>, ServiceError>;
    async fn save(&self, users: &OrderedMap<StoredUser>) -> Result<(), ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockUserRepository {
        users: Mutex<OrderedMap<StoredUser>>,
        fail_saves: Mutex<bool>,
    }

    impl MockUserRepository {
        pub fn with_users(users: OrderedMap<StoredUser>) -> Self {
            Self { users: Mutex::new(users), fail_saves: Mutex::new(false) }
        }

        /// Make every following `save` fail with `StorageUnavailable`.
        pub fn fail_saves(&self) {
            if let Ok(mut flag) = self.fail_saves.lock() { *flag = true; }
        }

        pub fn snapshot(&self) -> OrderedMap<StoredUser> {
            self.users.lock().map(|u| u.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn load(&self) -> Result<OrderedMap<StoredUser>, ServiceError> {
            self.users
                .lock()
                .map(|u| u.clone())
                .map_err(|e| ServiceError::StorageUnavailable(e.to_string()))
        }

        async fn save(&self, users: &OrderedMap<StoredUser>) -> Result<(), ServiceError> {
            if self.fail_saves.lock().map(|f| *f).unwrap_or(false) {
                return Err(ServiceError::StorageUnavailable("mock save failure".into()));
            }
            let mut guard = self
                .users
                .lock()
                .map_err(|e| ServiceError::StorageUnavailable(e.to_string()))?;
            *guard = users.clone();
            Ok(())
        }
    }
}
