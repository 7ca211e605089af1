use std::env;
use std::fmt::Formatter;
use std::io;
use std::time::Duration;

use dotenv::dotenv;

const DEFAULT_CIVICRM_INTERVAL_SECS: u64 = 60 * 5;
const DEFAULT_CIVICRM_TIMEOUT_SECS: u64 = 30;
const DEFAULT_USPS_TIMEOUT_SECS: u64 = 10;
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str, String)
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            ConfigError::Missing(name) => write!(f, "{} must be set", name),
            ConfigError::Invalid(name, value) => {
                write!(f, "{} must be a positive number of seconds, got {:?}", name, value)
            }
        }
    }
}

impl From<ConfigError> for io::Error {
    fn from(error: ConfigError) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, error.to_string())
    }
}

/// Settings of the CiviCRM job trigger.
#[derive(Debug, Clone)]
pub struct CivicrmConfig {
    pub url: String,
    pub api_key: String,
    pub site_key: String,
    pub interval: Duration,
    pub timeout: Duration
}

impl CivicrmConfig {
    pub fn from_env() -> Result<CivicrmConfig, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<CivicrmConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(CivicrmConfig {
            url: required(&lookup, "CIVICRM_URL")?,
            api_key: required(&lookup, "CIVICRM_API_KEY")?,
            site_key: required(&lookup, "CIVICRM_SITE_KEY")?,
            interval: seconds_or(&lookup, "CIVICRM_INTERVAL_SECS", DEFAULT_CIVICRM_INTERVAL_SECS)?,
            timeout: seconds_or(&lookup, "CIVICRM_TIMEOUT_SECS", DEFAULT_CIVICRM_TIMEOUT_SECS)?
        })
    }
}

/// Settings of the USPS address validation service.
#[derive(Debug, Clone)]
pub struct UspsConfig {
    pub api_url: String,
    pub user_id: String,
    pub bind_address: String,
    pub timeout: Duration
}

impl UspsConfig {
    pub fn from_env() -> Result<UspsConfig, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<UspsConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(UspsConfig {
            api_url: required(&lookup, "USPS_API_URL")?,
            user_id: required(&lookup, "USPS_USER_ID")?,
            bind_address: lookup("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            timeout: seconds_or(&lookup, "USPS_TIMEOUT_SECS", DEFAULT_USPS_TIMEOUT_SECS)?
        })
    }
}

fn required<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).ok_or(ConfigError::Missing(name))
}

fn seconds_or<F>(lookup: &F, name: &'static str, default: u64) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .ok_or(ConfigError::Invalid(name, value)),
        None => Ok(Duration::from_secs(default)),
    }
}
