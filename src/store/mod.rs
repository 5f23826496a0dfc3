pub mod de;
pub mod memory;
pub mod mongo;

use async_trait::async_trait;

use crate::analytics::types::{Order, Reference, Snack, User};
use crate::error::AnalyticsError;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// Read access to the three marketplace collections.
#[async_trait]
pub trait AnalyticsStore: Send + Sync {
    async fn fetch_users(&self) -> Result<Vec<User>, AnalyticsError>;
    async fn fetch_snacks(&self) -> Result<Vec<Snack>, AnalyticsError>;
    async fn fetch_orders(&self) -> Result<Vec<Order>, AnalyticsError>;
    async fn find_user(&self, id: &Reference) -> Result<Option<User>, AnalyticsError>;

    async fn fetch_orders_by_seller(&self, seller: &Reference) -> Result<Vec<Order>, AnalyticsError> {
        let mut orders = self.fetch_orders().await?;
        orders.retain(|order| &order.seller == seller);
        Ok(orders)
    }
}
