//! User registry: three-layer layout (repository, repo implementations, service).
//!
//! Every operation reads the whole users file and mutations write it back.

pub mod repository;
pub mod repo;
pub mod service;
pub mod sort;

pub use repository::UserRepository;
pub use service::UserService;
pub use sort::{SortField, SortOrder};
