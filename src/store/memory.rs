use async_trait::async_trait;

use super::AnalyticsStore;
use crate::analytics::types::{Order, Reference, Snack, User};
use crate::error::AnalyticsError;

/// Store backed by plain vectors, for fixtures and offline runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub users: Vec<User>,
    pub snacks: Vec<Snack>,
    pub orders: Vec<Order>,
}

impl MemoryStore {
    pub fn new(users: Vec<User>, snacks: Vec<Snack>, orders: Vec<Order>) -> Self {
        Self { users, snacks, orders }
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.users.push(user);
        self
    }

    pub fn with_snack(mut self, snack: Snack) -> Self {
        self.snacks.push(snack);
        self
    }

    pub fn with_order(mut self, order: Order) -> Self {
        self.orders.push(order);
        self
    }
}

#[async_trait]
impl AnalyticsStore for MemoryStore {
    async fn fetch_users(&self) -> Result<Vec<User>, AnalyticsError> {
        Ok(self.users.clone())
    }

    async fn fetch_snacks(&self) -> Result<Vec<Snack>, AnalyticsError> {
        Ok(self.snacks.clone())
    }

    async fn fetch_orders(&self) -> Result<Vec<Order>, AnalyticsError> {
        Ok(self.orders.clone())
    }

    async fn find_user(&self, id: &Reference) -> Result<Option<User>, AnalyticsError> {
        Ok(self.users.iter().find(|user| &user.id == id).cloned())
    }
}
