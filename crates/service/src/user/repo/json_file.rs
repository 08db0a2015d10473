use std::path::{Path, PathBuf};

use async_trait::async_trait;
use models::StoredUser;

use crate::errors::ServiceError;
use crate::storage::{JsonMapStore, OrderedMap};
use crate::user::repository::UserRepository;

/// JSON-file-backed repository: `{ "<id>": {name, city, age, gender, height, weight} }`.
#[derive(Clone)]
pub struct JsonFileUserRepository {
    store: JsonMapStore<StoredUser>,
}

impl JsonFileUserRepository {
    /// Use `path` as is; a missing file surfaces on the first call.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { store: JsonMapStore::new(path) }
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }
}

#[async_trait]
impl UserRepository for JsonFileUserRepository {
    async fn load(&self) -> Result<OrderedMap<StoredUser>, ServiceError> {
        self.store.load().await
    }

    async fn save(&self, users: &OrderedMap<StoredUser>) -> Result<(), ServiceError> {
        self.store.save(users).await
    }
}
