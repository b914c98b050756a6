//! Server Configuration
//!
//! Environment-driven settings for the server binary. CLI flags take
//! precedence over the environment.

use std::path::PathBuf;

pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_DB_FILE: &str = "museboard.db";

const ADDR_ENV: &str = "MUSEBOARD_ADDR";
const DB_ENV: &str = "MUSEBOARD_DB";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: String,
    pub db_path: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let addr = std::env::var(ADDR_ENV).unwrap_or_else(|_| DEFAULT_ADDR.to_string());
        let db_path = std::env::var(DB_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DB_FILE));
        Self { addr, db_path }
    }

    pub fn with_overrides(mut self, addr: Option<String>, db_path: Option<PathBuf>) -> Self {
        if let Some(addr) = addr {
            self.addr = addr;
        }
        if let Some(db_path) = db_path {
            self.db_path = db_path;
        }
        self
    }
}
