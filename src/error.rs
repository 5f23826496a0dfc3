#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Query on {collection} failed: {message}")]
    Query {
        collection: &'static str,
        message: String,
    },

    #[error("Failed to decode {collection} document: {message}")]
    Decode {
        collection: &'static str,
        message: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}
