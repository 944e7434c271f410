use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use thiserror::Error;

use crate::stats::service::MAX_LEADERBOARD;

pub const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 3000));
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Server settings read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Fixed seed for reproducible tables, OS entropy when unset
    pub deck_seed: Option<u64>,
    pub leaderboard_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = parse_var(&lookup, "BIND_ADDR")?.unwrap_or(DEFAULT_BIND_ADDR);
        let deck_seed = parse_var(&lookup, "DECK_SEED")?;
        let leaderboard_limit =
            parse_var(&lookup, "LEADERBOARD_LIMIT")?.unwrap_or(DEFAULT_LEADERBOARD_LIMIT);
        if !(1..=MAX_LEADERBOARD).contains(&leaderboard_limit) {
            return Err(ConfigError::InvalidValue {
                name: "LEADERBOARD_LIMIT",
                value: leaderboard_limit.to_string(),
            });
        }

        Ok(Self {
            bind_addr,
            deck_seed,
            leaderboard_limit,
        })
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { name, value }),
    }
}
