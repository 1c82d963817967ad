use std::time::Duration;

use anyhow::{Result, anyhow};
use catalog::config::{catalog_url, read_secret_or, try_load, var};

use crate::credentials::AdminUser;

pub struct Config {
    pub port: u16,
    pub catalog_url: String,
    pub catalog_timeout: Duration,
    pub admins: Vec<AdminUser>,
    pub token_ttl: Duration,
    pub secure_cookies: bool,
}

impl Config {
    pub fn load() -> Result<Self> {
        let ttl_hours: u64 = try_load("TOKEN_TTL_HOURS", "24").map_err(|e| anyhow!(e))?;
        let timeout_secs: u64 = try_load("CATALOG_TIMEOUT_SECS", "10").map_err(|e| anyhow!(e))?;

        Ok(Self {
            port: try_load("RUST_PORT", "3000").map_err(|e| anyhow!(e))?,
            catalog_url: catalog_url(),
            catalog_timeout: Duration::from_secs(timeout_secs),
            admins: vec![AdminUser {
                id: 1,
                email: var("ADMIN_EMAIL").unwrap_or_else(|| "admin@budaya.com".to_string()),
                password: read_secret_or("ADMIN_PASSWORD", "admin123"),
                name: var("ADMIN_NAME").unwrap_or_else(|| "Admin User".to_string()),
            }],
            token_ttl: Duration::from_secs(ttl_hours * 60 * 60),
            secure_cookies: var("APP_ENV").is_some_and(|env| env == "production"),
        })
    }
}
