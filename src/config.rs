use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const LISTEN_ADDR_VAR: &str = "SCRAPER_LISTEN_ADDR";
const FETCH_TIMEOUT_VAR: &str = "SCRAPER_FETCH_TIMEOUT_SECS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("SCRAPER_LISTEN_ADDR is not a socket address: {0}")]
    ListenAddr(String),
    #[error("SCRAPER_FETCH_TIMEOUT_SECS must be a positive number of seconds: {0}")]
    FetchTimeout(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub listen_addr: SocketAddr,
    /// `None` leaves outbound fetches without a deadline.
    pub fetch_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let listen_addr = lookup(LISTEN_ADDR_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = listen_addr
            .trim()
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::ListenAddr(listen_addr.clone()))?;

        let fetch_timeout = match lookup(FETCH_TIMEOUT_VAR).filter(|v| !v.trim().is_empty()) {
            None => None,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => return Err(ConfigError::FetchTimeout(raw)),
            },
        };

        Ok(Config {
            listen_addr,
            fetch_timeout,
        })
    }
}
