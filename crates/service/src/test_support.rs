#![cfg(test)]
use std::path::PathBuf;

use models::{Gender, StoredUser, UserInput};

/// Unique users file path under the system temp dir.
pub fn tmp_users_file() -> PathBuf {
    std::env::temp_dir().join(format!("svc_users_{}.json", uuid::Uuid::new_v4()))
}

/// Unique users file seeded with `{}` the way startup seeds it.
pub async fn seeded_users_file() -> anyhow::Result<PathBuf> {
    let path = tmp_users_file();
    crate::runtime::ensure_env(&path, true).await?;
    Ok(path)
}

pub fn stored(name: &str, age: i64, gender: Gender, height: f64, weight: f64) -> StoredUser {
    StoredUser { name: name.into(), city: "Pune".into(), age, gender, height, weight }
}

pub fn input(id: &str, name: &str, height: f64, weight: f64) -> UserInput {
    UserInput {
        id: id.into(),
        name: name.into(),
        city: "Pune".into(),
        age: 30,
        gender: Gender::Female,
        height,
        weight,
    }
}
