//! Server Configuration
//!
//! Read once at start-up from the process environment (after `.env`).

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, bail};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub debug: bool,
    pub database_url: String,
    pub max_connections: u32,
    pub bind_addr: SocketAddr,
    pub jwt_private_key_path: PathBuf,
    pub jwt_public_key_path: PathBuf,
    pub password_pepper: Option<Vec<u8>>,
    pub frontend_origins: Vec<String>,
    pub bootstrap_owner: Option<BootstrapOwner>,
}

/// Credentials for the first owner account
#[derive(Clone)]
pub struct BootstrapOwner {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for BootstrapOwner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapOwner")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| get(key).with_context(|| format!("{} must be set", key));

        let debug = get("DEBUG").is_some_and(|v| parse_flag(&v));

        let database_url = match get("DATABASE_URL") {
            Some(url) => url,
            None => format!(
                "postgres://{}:{}@{}:{}/{}",
                require("POSTGRESQL_USER")?,
                require("POSTGRESQL_PASSWORD")?,
                get("POSTGRESQL_HOST").unwrap_or_else(|| "localhost".to_string()),
                get("POSTGRESQL_PORT").unwrap_or_else(|| "5432".to_string()),
                require("POSTGRESQL_DATABASE")?,
            ),
        };

        let max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v
                .parse()
                .with_context(|| format!("DATABASE_MAX_CONNECTIONS is not a number: {}", v))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        if max_connections == 0 {
            bail!("DATABASE_MAX_CONNECTIONS must be at least 1");
        }

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR is not a socket address")?;

        let frontend_origins = get("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let bootstrap_owner = match (get("BOOTSTRAP_OWNER_EMAIL"), get("BOOTSTRAP_OWNER_PASSWORD")) {
            (Some(email), Some(password)) => Some(BootstrapOwner { email, password }),
            (None, None) => None,
            _ => bail!("BOOTSTRAP_OWNER_EMAIL and BOOTSTRAP_OWNER_PASSWORD must be set together"),
        };

        Ok(Self {
            debug,
            database_url,
            max_connections,
            bind_addr,
            jwt_private_key_path: require("JWT_PRIVATE_KEY_PATH")?.into(),
            jwt_public_key_path: require("JWT_PUBLIC_KEY_PATH")?.into(),
            password_pepper: get("PASSWORD_PEPPER").map(String::into_bytes),
            frontend_origins,
            bootstrap_owner,
        })
    }

    /// Default `EnvFilter` directives when `RUST_LOG` is unset
    pub fn default_log_filter(&self) -> &'static str {
        if self.debug {
            "api=debug,auth=debug,shops=debug,items=debug,sqlx=debug,tower_http=debug"
        } else {
            "api=info,auth=info,shops=info,items=info,tower_http=info"
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
