use std::env;
use std::path::PathBuf;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const PORT: &str = "SEARCHLOG_PORT";
    pub const HOST: &str = "SEARCHLOG_HOST";
    /// Directory holding sites.csv, logs.csv, memos.csv and records.csv
    pub const DATA_DIR: &str = "SEARCHLOG_DATA_DIR";
    /// Prebuilt frontend to serve at `/`. Unset disables static serving.
    pub const FRONTEND_DIR: &str = "SEARCHLOG_FRONTEND_DIR";
}

/// Default values
pub mod defaults {
    /// 5000 is often taken by other local dev servers
    pub const PORT: u16 = 5001;
    pub const HOST: &str = "127.0.0.1";
    pub const DATA_DIR: &str = "csv";
}

/// Returns the absolute path to the searchlog-backend directory.
pub fn backend_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Default data directory (searchlog-backend/csv)
pub fn default_data_dir() -> PathBuf {
    backend_dir().join(defaults::DATA_DIR)
}

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub frontend_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup (the process environment in production)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let port = match lookup(env_vars::PORT) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e| format!("{} must be a valid port number, got {:?}: {}", env_vars::PORT, raw, e))?,
            None => defaults::PORT,
        };

        Ok(Self {
            host: lookup(env_vars::HOST).unwrap_or_else(|| defaults::HOST.to_string()),
            port,
            data_dir: lookup(env_vars::DATA_DIR)
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(default_data_dir),
            frontend_dir: lookup(env_vars::FRONTEND_DIR)
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
