//! Database connection settings loaded via OrthoConfig.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use super::pool::PoolConfig;

const DEFAULT_USER: &str = "postgres";
const DEFAULT_NAME: &str = "postgres";

/// Connection and pool sizing, read from `DATABASE_*` variables.
///
/// `url` wins when set; otherwise a URL is assembled from `host` and the
/// remaining parts. With neither, the server runs on fixtures.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DATABASE")]
pub struct DatabaseSettings {
    /// Full PostgreSQL connection URL.
    pub url: Option<String>,
    pub host: Option<String>,
    #[ortho_config(default = 5432)]
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    /// Maximum pooled connections.
    pub max_connections: Option<u32>,
    /// Idle connections kept warm.
    pub min_idle: Option<u32>,
    /// Seconds to wait for a free connection.
    pub connect_timeout_secs: Option<u64>,
}

impl DatabaseSettings {
    /// Connection URL, if the settings name a database at all.
    pub fn connection_url(&self) -> Option<String> {
        if let Some(url) = self.url.as_deref().filter(|url| !url.trim().is_empty()) {
            return Some(url.to_owned());
        }
        let host = self.host.as_deref().filter(|host| !host.trim().is_empty())?;
        let user = self.user.as_deref().unwrap_or(DEFAULT_USER);
        let credentials = match self.password.as_deref() {
            Some(password) => format!("{user}:{password}"),
            None => user.to_owned(),
        };
        let port = self.port;
        let name = self.name.as_deref().unwrap_or(DEFAULT_NAME);
        Some(format!("postgres://{credentials}@{host}:{port}/{name}"))
    }

    /// Pool configuration for [`connection_url`](Self::connection_url) with
    /// any sizing overrides applied.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let mut config = PoolConfig::new(self.connection_url()?);
        if let Some(max_size) = self.max_connections {
            config = config.with_max_size(max_size);
        }
        if let Some(min_idle) = self.min_idle {
            config = config.with_min_idle(Some(min_idle));
        }
        if let Some(secs) = self.connect_timeout_secs {
            config = config.with_connection_timeout(Duration::from_secs(secs));
        }
        Some(config)
    }
}
