use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Bson, Document},
    error::{Error as MongoError, ErrorKind},
    Client, Collection, Database,
};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::AnalyticsStore;
use crate::analytics::types::{Order, Reference, Snack, User};
use crate::config::AnalyticsConfig;
use crate::error::AnalyticsError;

const USERS: &str = "users";
const SNACKS: &str = "snacks";
const ORDERS: &str = "orders";

/// Read-only handle on the marketplace database, opened once per process.
#[derive(Debug, Clone)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Connects and pings the server so an unreachable store fails here,
    /// before any view is computed.
    pub async fn connect(config: &AnalyticsConfig) -> Result<Self, AnalyticsError> {
        let uri = config.mongo_uri()?;
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| AnalyticsError::StoreUnavailable(e.to_string()))?;
        let database = client.database(&config.database);

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| AnalyticsError::StoreUnavailable(e.to_string()))?;

        info!("Connected to MongoDB database '{}'", config.database);
        Ok(Self { database })
    }

    async fn scan<T>(&self, name: &'static str, filter: Document) -> Result<Vec<T>, AnalyticsError>
    where
        T: DeserializeOwned + Unpin + Send + Sync,
    {
        let collection: Collection<T> = self.database.collection(name);
        let cursor = collection
            .find(filter)
            .await
            .map_err(|e| classify(name, e))?;
        let records: Vec<T> = cursor.try_collect().await.map_err(|e| classify(name, e))?;

        debug!("Fetched {} documents from {}", records.len(), name);
        Ok(records)
    }
}

#[async_trait]
impl AnalyticsStore for MongoStore {
    async fn fetch_users(&self) -> Result<Vec<User>, AnalyticsError> {
        self.scan(USERS, doc! {}).await
    }

    async fn fetch_snacks(&self) -> Result<Vec<Snack>, AnalyticsError> {
        self.scan(SNACKS, doc! {}).await
    }

    async fn fetch_orders(&self) -> Result<Vec<Order>, AnalyticsError> {
        self.scan(ORDERS, doc! {}).await
    }

    async fn find_user(&self, id: &Reference) -> Result<Option<User>, AnalyticsError> {
        let collection: Collection<User> = self.database.collection(USERS);
        collection
            .find_one(doc! { "_id": reference_filter(id) })
            .await
            .map_err(|e| classify(USERS, e))
    }

    async fn fetch_orders_by_seller(&self, seller: &Reference) -> Result<Vec<Order>, AnalyticsError> {
        self.scan(ORDERS, doc! { "seller": reference_filter(seller) }).await
    }
}

/// References may be stored as ObjectIds or as their hex strings.
fn reference_filter(reference: &Reference) -> Bson {
    match reference.as_object_id() {
        Some(oid) => Bson::Document(doc! { "$in": [oid, reference.as_str()] }),
        None => Bson::String(reference.as_str().to_string()),
    }
}

fn classify(collection: &'static str, error: MongoError) -> AnalyticsError {
    match *error.kind {
        ErrorKind::BsonDeserialization(ref e) => AnalyticsError::Decode {
            collection,
            message: e.to_string(),
        },
        _ => AnalyticsError::Query {
            collection,
            message: error.to_string(),
        },
    }
}
