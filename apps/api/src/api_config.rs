use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use rolecast_core::AppError;
use rolecast_infrastructure::HelixConfig;
use tracing_subscriber::EnvFilter;
use url::Url;

const DEFAULT_TWITCH_API_BASE_URL: &str = "https://api.twitch.tv/helix";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub data_dir: PathBuf,
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub helix: HelixConfig,
    pub refresh_interval: Option<Duration>,
    pub updates_poll_timeout: Duration,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let data_dir =
            PathBuf::from(lookup("ROLECAST_DATA_DIR").unwrap_or_else(|| "./data".to_owned()));
        let frontend_url =
            lookup("FRONTEND_URL").unwrap_or_else(|| "http://localhost:3000".to_owned());
        let api_host = lookup("API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = parse_env_or(&lookup, "API_PORT", 3001_u16)?;

        let base_url = lookup("TWITCH_API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_TWITCH_API_BASE_URL.to_owned());
        let base_url = Url::parse(base_url.as_str()).map_err(|error| {
            AppError::Validation(format!("invalid TWITCH_API_BASE_URL '{base_url}': {error}"))
        })?;
        let helix = HelixConfig {
            base_url,
            client_id: required_non_empty_env(&lookup, "TWITCH_CLIENT_ID")?,
            access_token: required_non_empty_env(&lookup, "TWITCH_ACCESS_TOKEN")?,
            broadcaster_id: required_non_empty_env(&lookup, "TWITCH_BROADCASTER_ID")?,
        };

        let refresh_seconds = parse_env_or(&lookup, "ROLE_REFRESH_INTERVAL_SECONDS", 3600_u64)?;
        let refresh_interval = (refresh_seconds > 0).then(|| Duration::from_secs(refresh_seconds));
        let poll_seconds = parse_env_or(&lookup, "ROLE_UPDATES_POLL_TIMEOUT_SECONDS", 25_u64)?;

        Ok(Self {
            data_dir,
            frontend_url,
            api_host,
            api_port,
            helix,
            refresh_interval,
            updates_poll_timeout: Duration::from_secs(poll_seconds),
        })
    }

    pub fn custom_roles_path(&self) -> PathBuf {
        self.data_dir.join("roles").join("custom-roles.json")
    }

    pub fn legacy_custom_roles_path(&self) -> PathBuf {
        self.data_dir.join("roles").join("customroles.json")
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<String, AppError> {
    lookup(name).ok_or_else(|| AppError::Validation(format!("{name} is required")))
}

fn required_non_empty_env(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Result<String, AppError> {
    let value = required_env(lookup, name)?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}

fn parse_env_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name).filter(|value| !value.trim().is_empty()) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|error| AppError::Validation(format!("invalid {name}: {error}"))),
        None => Ok(default),
    }
}
