use std::sync::Arc;

use service::user::{repo::JsonFileUserRepository, UserService};

pub type Users = UserService<JsonFileUserRepository>;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<Users>,
}

impl AppState {
    pub fn new(repo: JsonFileUserRepository) -> Self {
        Self { users: Arc::new(UserService::new(Arc::new(repo))) }
    }
}
