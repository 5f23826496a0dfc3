pub mod analytics;
pub mod config;
pub mod error;
pub mod store;
pub mod ui;

pub use analytics::SnackAnalytics;
pub use config::AnalyticsConfig;
pub use error::AnalyticsError;
