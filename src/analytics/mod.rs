pub mod detail;
pub mod display;
pub mod leaderboard;
pub mod seller;
pub mod snack;
pub mod types;

#[cfg(test)]
mod tests;

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::config::{AnalyticsConfig, OrderFilter};
use crate::error::AnalyticsError;
use crate::store::AnalyticsStore;
use types::{AnalyticsReport, Order, Reference, SellerDetail, Snack, User};

/// Recomputes every view from a full scan of the store on each call.
pub struct SnackAnalytics {
    store: Arc<dyn AnalyticsStore>,
    config: AnalyticsConfig,
}

impl SnackAnalytics {
    pub fn new(store: Arc<dyn AnalyticsStore>, config: AnalyticsConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    pub async fn compute(&self) -> Result<AnalyticsReport, AnalyticsError> {
        let started = Instant::now();

        let users = self.store.fetch_users().await?;
        let snacks = self.store.fetch_snacks().await?;
        let orders = self.store.fetch_orders().await?;
        info!(
            "Loaded {} users, {} snacks, {} orders",
            users.len(),
            snacks.len(),
            orders.len()
        );

        let report = build_report(
            &users,
            &snacks,
            orders,
            self.config.order_filter,
            self.config.leaderboard_size,
        );

        info!("Analytics computed in {:?}", started.elapsed());
        Ok(report)
    }

    /// Dashboard for a single seller, or `None` if the reference does not
    /// resolve to a user.
    pub async fn seller_detail(&self, seller: &Reference) -> Result<Option<SellerDetail>, AnalyticsError> {
        let Some(user) = self.store.find_user(seller).await? else {
            debug!("Seller {} not found", seller);
            return Ok(None);
        };

        let snacks = self.store.fetch_snacks().await?;
        let orders = admitted(self.store.fetch_orders_by_seller(seller).await?, self.config.order_filter);

        Ok(Some(detail::build_seller_detail(&user, &snacks, &orders)))
    }
}

fn admitted(mut orders: Vec<Order>, filter: OrderFilter) -> Vec<Order> {
    orders.retain(|order| filter.admits(order.status));
    orders
}

/// Builds all three views from already-fetched records.
pub fn build_report(
    users: &[User],
    snacks: &[Snack],
    orders: Vec<Order>,
    filter: OrderFilter,
    leaderboard_size: usize,
) -> AnalyticsReport {
    let fetched = orders.len();
    let orders = admitted(orders, filter);
    if orders.len() != fetched {
        debug!("Order filter {:?} kept {} of {} orders", filter, orders.len(), fetched);
    }

    let sellers = seller::build_seller_summaries(users, &orders);

    let stats = snack::accumulate_snack_stats(&orders);
    let names = snack::user_names(users);
    for s in snacks.iter().filter(|s| !names.contains_key(&s.enlisted_by)) {
        debug!("Lister {} of snack {} does not resolve to a user", s.enlisted_by, s.id);
    }
    let snack_rows = snack::build_snack_summaries(snacks, &stats, &names);

    let orphaned_snack_refs = snack::orphaned_references(&stats, snacks);
    if !orphaned_snack_refs.is_empty() {
        warn!(
            "{} snack reference(s) have recorded sales but no snack record",
            orphaned_snack_refs.len()
        );
    }

    let leaderboard = leaderboard::build_leaderboard(&sellers, leaderboard_size);

    AnalyticsReport {
        generated_at: Utc::now(),
        sellers,
        snacks: snack_rows,
        leaderboard,
        orphaned_snack_refs,
    }
}
