//! Environment loading shared by the server and the console.
//!
//! Every value has a default so a bare environment still starts; secrets are
//! read from `/run/secrets/<NAME>` first, then from the environment.
use std::{env, fmt::Display, fs::read_to_string, str::FromStr};

use tracing::{info, warn};

pub const DEFAULT_CATALOG_URL: &str = "http://localhost:8000/api/v1";

pub fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

pub fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, String>
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
            format!("Invalid {key} value: {e}")
        })
}

pub fn read_secret_or(secret_name: &str, default: &str) -> String {
    let path = format!("/run/secrets/{secret_name}");

    match read_to_string(&path) {
        Ok(secret) => secret.trim().to_string(),
        Err(_) => var(secret_name).unwrap_or_else(|| {
            warn!("{secret_name} not found in secrets or environment, using default");
            default.to_string()
        }),
    }
}

/// Base URL of the catalog REST API, without a trailing slash.
pub fn catalog_url() -> String {
    var("CATALOG_API_URL")
        .or_else(|| var("NEXT_PUBLIC_API_URL"))
        .unwrap_or_else(|| {
            info!("CATALOG_API_URL not set, using default: {DEFAULT_CATALOG_URL}");
            DEFAULT_CATALOG_URL.to_string()
        })
        .trim_end_matches('/')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::try_load;

    #[test]
    fn test_default_used_when_unset() {
        let port: u16 = try_load("CATALOG_TEST_SURELY_UNSET_PORT", "4321").unwrap();
        assert_eq!(port, 4321);
    }

    #[test]
    fn test_invalid_default_reported() {
        let parsed: Result<u16, String> = try_load("CATALOG_TEST_SURELY_UNSET_PORT", "nope");
        assert!(parsed.unwrap_err().contains("CATALOG_TEST_SURELY_UNSET_PORT"));
    }
}
