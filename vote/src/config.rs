use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

pub struct Config {
    pub api_base_url: String,
    pub poll_seconds: u64,
    pub identity_url: String,
    pub identity_client_id: String,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl Config {
    pub fn load() -> Self {
        Self {
            api_base_url: try_load("VOTE_API_URL", "http://localhost:3000"),
            poll_seconds: try_load("VOTE_POLL_SECONDS", "3"),
            identity_url: try_load(
                "VOTE_IDENTITY_URL",
                "https://cognito-idp.us-east-1.amazonaws.com",
            ),
            identity_client_id: try_load("VOTE_IDENTITY_CLIENT_ID", ""),
            email: env::var("VOTE_EMAIL").ok(),
            password: env::var("VOTE_PASSWORD").ok(),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
