use std::{env, str::FromStr};

use crate::analytics::leaderboard::DEFAULT_LEADERBOARD_SIZE;
use crate::analytics::types::OrderStatus;
use crate::error::AnalyticsError;

/// Which orders take part in the rollups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderFilter {
    /// Every order in the store counts, whatever its status.
    #[default]
    All,
    CompletedOnly,
}

impl OrderFilter {
    pub fn admits(&self, status: OrderStatus) -> bool {
        match self {
            OrderFilter::All => true,
            OrderFilter::CompletedOnly => status == OrderStatus::Completed,
        }
    }
}

impl FromStr for OrderFilter {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "completed" => Ok(Self::CompletedOnly),
            other => Err(AnalyticsError::Config(format!(
                "unknown order filter '{other}', expected 'all' or 'completed'"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalyticsConfig {
    pub mongo_uri: Option<String>,
    pub database: String,
    pub leaderboard_size: usize,
    pub order_filter: OrderFilter,
    pub log_dir: String,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            mongo_uri: None,
            database: "test".to_string(),
            leaderboard_size: DEFAULT_LEADERBOARD_SIZE,
            order_filter: OrderFilter::All,
            log_dir: "logs".to_string(),
        }
    }
}

impl AnalyticsConfig {
    /// Reads the process environment, after merging in a `.env` file if one exists.
    pub fn from_env() -> Result<Self, AnalyticsError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(AnalyticsError::Config(format!("failed to load .env: {e}")));
            }
        }

        let defaults = Self::default();
        let leaderboard_size: usize = try_load("LEADERBOARD_SIZE", defaults.leaderboard_size)?;
        if leaderboard_size == 0 {
            return Err(AnalyticsError::Config(
                "LEADERBOARD_SIZE must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            mongo_uri: var("MONGO_URI"),
            database: var("MONGO_DATABASE").unwrap_or(defaults.database),
            leaderboard_size,
            order_filter: try_load("ANALYTICS_ORDER_FILTER", defaults.order_filter)?,
            log_dir: var("ANALYTICS_LOG_DIR").unwrap_or(defaults.log_dir),
        })
    }

    pub fn mongo_uri(&self) -> Result<&str, AnalyticsError> {
        self.mongo_uri
            .as_deref()
            .ok_or_else(|| AnalyticsError::Config("MONGO_URI is not set".to_string()))
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn try_load<T>(key: &str, default: T) -> Result<T, AnalyticsError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match var(key) {
        Some(raw) => raw
            .parse()
            .map_err(|e| AnalyticsError::Config(format!("invalid {key} '{raw}': {e}"))),
        None => Ok(default),
    }
}
