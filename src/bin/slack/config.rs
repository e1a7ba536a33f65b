use anyhow::{anyhow, Result};
use std::env;
use tracing::Level;

#[derive(PartialEq, Eq, Debug)]
pub struct Config {
    pub log_level: Level,
    pub channel: String,
    pub insert_dividers: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let log_level = match var("LOG_LEVEL") {
            Some(level) => level
                .parse()
                .map_err(|_| anyhow!("invalid LOG_LEVEL: {}", level))?,
            None => Level::INFO,
        };

        let insert_dividers = match var("SLACK_DIVIDERS") {
            Some(flag) => flag
                .parse()
                .map_err(|_| anyhow!("invalid SLACK_DIVIDERS: {}", flag))?,
            None => true,
        };

        Ok(Self {
            log_level,
            channel: var("SLACK_CHANNEL").unwrap_or_else(|| "lipwig".to_string()),
            insert_dividers,
        })
    }
}
