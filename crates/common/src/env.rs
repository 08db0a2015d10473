//! Environment/runtime helpers
//!
//! Sanity checks to ensure the data file and its directory exist at startup.

use std::path::Path;
use tracing::{info, warn};

/// Ensure the parent directory of `data_file` exists.
/// When `create_if_missing` is set and the file is absent, seed it with an empty JSON object.
pub async fn ensure_data_file(data_file: &Path, create_if_missing: bool) -> anyhow::Result<()> {
    if let Some(parent) = data_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    }

    if tokio::fs::metadata(data_file).await.is_ok() {
        return Ok(());
    }

    if create_if_missing {
        tokio::fs::write(data_file, b"{}")
            .await
            .map_err(|e| anyhow::anyhow!("cannot seed {}: {e}", data_file.display()))?;
        info!(path = %data_file.display(), "seeded empty users file");
    } else {
        warn!(path = %data_file.display(), "users file not found; reads will fail until it exists");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeds_missing_file_with_empty_object() -> anyhow::Result<()> {
        let dir = std::env::temp_dir().join(format!("common_env_{}", uuid::Uuid::new_v4()));
        let file = dir.join("nested").join("users.json");

        ensure_data_file(&file, true).await?;
        assert_eq!(tokio::fs::read_to_string(&file).await?, "{}");

        // existing content is left alone
        tokio::fs::write(&file, br#"{"P001":{}}"#).await?;
        ensure_data_file(&file, true).await?;
        assert_eq!(tokio::fs::read_to_string(&file).await?, r#"{"P001":{}}"#);

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn leaves_missing_file_absent_without_create_flag() -> anyhow::Result<()> {
        let dir = std::env::temp_dir().join(format!("common_env_{}", uuid::Uuid::new_v4()));
        let file = dir.join("users.json");

        ensure_data_file(&file, false).await?;
        assert!(tokio::fs::metadata(&dir).await.is_ok());
        assert!(tokio::fs::metadata(&file).await.is_err());

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }
}
