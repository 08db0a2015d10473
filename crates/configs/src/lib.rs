use std::io;
use std::path::{Path, PathBuf};

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub worker_threads: Option<usize>,
    /// Address of the admin listener (`/healthz`, `/metrics`); disabled when absent.
    pub admin_addr: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8000, worker_threads: Some(4), admin_addr: None }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_users_file")]
    pub users_file: PathBuf,
    #[serde(default = "default_create_if_missing")]
    pub create_if_missing: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { users_file: default_users_file(), create_if_missing: default_create_if_missing() }
    }
}

fn default_users_file() -> PathBuf { PathBuf::from("data/users.json") }
fn default_create_if_missing() -> bool { true }

fn config_path() -> PathBuf {
    PathBuf::from(std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string()))
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Config file if present, otherwise defaults filled from env vars.
    pub fn load_or_env() -> Result<Self> {
        Self::load_or_env_from(config_path())
    }

    /// Only a missing file falls back to env vars; unreadable or malformed
    /// files are errors.
    pub fn load_or_env_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut cfg = match std::fs::read_to_string(path) {
            Ok(content) => parse(&content).map_err(|e| anyhow!("invalid config {}: {e}", path.display()))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Self::from_env(),
            Err(e) => return Err(anyhow!("cannot read {}: {e}", path.display())),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        if let Some(w) = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()) {
            cfg.server.worker_threads = Some(w);
        }
        if let Ok(addr) = std::env::var("ADMIN_ADDR") {
            cfg.server.admin_addr = Some(addr);
        }
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        // 归一化 server
        self.server.normalize()?;
        // 归一化 storage（支持从环境变量 USERS_FILE 覆盖路径）
        self.storage.normalize_from_env();
        self.storage.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        if let Some(addr) = &self.admin_addr {
            if addr.trim().is_empty() { self.admin_addr = None; }
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl StorageConfig {
    pub fn normalize_from_env(&mut self) {
        if let Ok(path) = std::env::var("USERS_FILE") {
            if !path.trim().is_empty() {
                self.users_file = PathBuf::from(path);
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.users_file.as_os_str().is_empty() {
            return Err(anyhow!("storage.users_file is empty"));
        }
        if self.users_file.is_dir() {
            return Err(anyhow!("storage.users_file points to a directory: {}", self.users_file.display()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_uses_defaults() {
        let cfg = parse("").unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.storage.users_file, PathBuf::from("data/users.json"));
        assert!(cfg.storage.create_if_missing);
    }

    #[test]
    fn parses_server_and_storage_sections() {
        let mut cfg = parse(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000
            worker_threads = 0
            admin_addr = "127.0.0.1:9100"

            [storage]
            users_file = "/var/lib/users.json"
            create_if_missing = false
            "#,
        )
        .unwrap();
        cfg.server.normalize().unwrap();
        assert_eq!(cfg.server.bind_addr(), "0.0.0.0:9000");
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.server.admin_addr.as_deref(), Some("127.0.0.1:9100"));
        assert_eq!(cfg.storage.users_file, PathBuf::from("/var/lib/users.json"));
        assert!(!cfg.storage.create_if_missing);
    }

    #[test]
    fn rejects_zero_port() {
        let mut cfg = parse("[server]\nhost = \"localhost\"\nport = 0\n").unwrap();
        assert!(cfg.server.normalize().is_err());
    }

    #[test]
    fn rejects_empty_users_file() {
        let cfg = StorageConfig { users_file: PathBuf::new(), create_if_missing: true };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn partial_server_section_keeps_other_defaults() {
        let cfg = parse("[server]\nport = 9000\n").unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.worker_threads, Some(4));
    }

    fn tmp_config() -> PathBuf {
        std::env::temp_dir().join(format!("configs_{}.toml", uuid::Uuid::new_v4()))
    }

    #[test]
    fn malformed_file_is_an_error_not_a_fallback() {
        let path = tmp_config();
        std::fs::write(&path, "[server]\nport = \"nine thousand\"\n").unwrap();
        let res = AppConfig::load_or_env_from(&path);
        let _ = std::fs::remove_file(&path);
        let err = res.unwrap_err().to_string();
        assert!(err.contains("invalid config"), "{err}");
    }

    #[test]
    fn file_values_win_over_defaults() {
        let path = tmp_config();
        std::fs::write(&path, "[server]\nport = 9123\n").unwrap();
        let res = AppConfig::load_or_env_from(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(res.unwrap().server.port, 9123);
    }

    #[test]
    fn missing_file_falls_back_to_env_defaults() {
        let path = std::env::temp_dir().join(format!("configs_{}", uuid::Uuid::new_v4())).join("config.toml");
        let cfg = AppConfig::load_or_env_from(&path).unwrap();
        assert!(cfg.server.port > 0);
    }

    #[test]
    fn blank_admin_addr_is_disabled() {
        let mut s = ServerConfig { admin_addr: Some("  ".into()), ..ServerConfig::default() };
        s.normalize().unwrap();
        assert!(s.admin_addr.is_none());
    }
}
