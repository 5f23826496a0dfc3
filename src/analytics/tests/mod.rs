#[cfg(test)]
mod aggregation_tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};

    use crate::analytics::types::{LineItem, Order, OrderStatus, Reference, Snack, User};
    use crate::analytics::display::LeaderboardRow;
    use crate::analytics::{build_report, SnackAnalytics};
    use crate::config::{AnalyticsConfig, OrderFilter};
    use crate::error::AnalyticsError;
    use crate::store::{AnalyticsStore, MemoryStore};

    fn user(id: &str, room_no: Option<&str>) -> User {
        User {
            id: id.into(),
            name: format!("user {id}"),
            email: format!("{id}@example.com"),
            room_no: room_no.map(str::to_string),
            created_at: None,
        }
    }

    fn snack(id: &str, lister: &str) -> Snack {
        Snack {
            id: id.into(),
            name: format!("snack {id}"),
            price: 10.0,
            created_at: Some(Utc.with_ymd_and_hms(2025, 1, 20, 9, 0, 0).unwrap()),
            enlisted_by: lister.into(),
            quantity: 1,
            deliverable: true,
            image_url: None,
        }
    }

    fn order(id: &str, seller: &str, buyer: &str, items: &[(&str, i64, f64)], total: f64) -> Order {
        Order {
            id: id.into(),
            buyer: buyer.into(),
            seller: seller.into(),
            items: items
                .iter()
                .map(|&(snack, quantity, price)| LineItem {
                    snack: snack.into(),
                    quantity,
                    price,
                })
                .collect(),
            total_amount: total,
            status: OrderStatus::Completed,
            created_at: None,
        }
    }

    fn analytics(store: MemoryStore) -> SnackAnalytics {
        SnackAnalytics::new(Arc::new(store), AnalyticsConfig::default())
    }

    #[tokio::test]
    async fn seller_without_orders_gets_zero_row() {
        let store = MemoryStore::default().with_user(user("u1", None));
        let report = analytics(store).compute().await.unwrap();

        let row = &report.sellers[0];
        assert_eq!(row.total_sales_line_items, 0);
        assert_eq!(row.total_earnings, 0.0);
        assert!(!row.total_earnings.is_sign_negative());
        assert_eq!(row.completed_orders, 0);
        assert_eq!(row.unique_buyers, 0);
        assert_eq!(row.room_no, "N/A");
    }

    #[tokio::test]
    async fn single_order_feeds_seller_and_snack_views() {
        let store = MemoryStore::default()
            .with_user(user("u2", Some("C-204")))
            .with_snack(snack("s1", "u2"))
            .with_snack(snack("s2", "u2"))
            .with_order(order("o1", "u2", "b1", &[("s1", 3, 10.0), ("s2", 1, 5.0)], 15.0));

        let report = analytics(store).compute().await.unwrap();

        let seller = &report.sellers[0];
        assert_eq!(seller.total_sales_line_items, 2);
        assert_eq!(seller.total_earnings, 15.0);
        assert_eq!(seller.room_no, "C-204");

        let s1 = report.snacks.iter().find(|s| s.snack == Reference::from("s1")).unwrap();
        assert_eq!((s1.units_sold, s1.revenue), (3, 10.0));
        let s2 = report.snacks.iter().find(|s| s.snack == Reference::from("s2")).unwrap();
        assert_eq!((s2.units_sold, s2.revenue), (1, 5.0));
        assert_eq!(s1.listed_by, "user u2");
        assert_eq!(s1.created_at, "2025-01-20");
    }

    #[tokio::test]
    async fn repeat_buyer_counts_once() {
        let store = MemoryStore::default()
            .with_user(user("u3", None))
            .with_order(order("o1", "u3", "b1", &[("s1", 1, 2.0)], 2.0))
            .with_order(order("o2", "u3", "b1", &[("s1", 1, 2.0)], 2.0));

        let report = analytics(store).compute().await.unwrap();
        assert_eq!(report.sellers[0].unique_buyers, 1);
        assert_eq!(report.sellers[0].completed_orders, 2);
    }

    #[tokio::test]
    async fn unsold_snack_reports_zeros() {
        let store = MemoryStore::default()
            .with_user(user("u1", None))
            .with_snack(snack("s3", "u1"));

        let report = analytics(store).compute().await.unwrap();
        assert_eq!(report.snacks[0].units_sold, 0);
        assert_eq!(report.snacks[0].revenue, 0.0);
    }

    #[tokio::test]
    async fn leaderboard_keeps_top_ten() {
        let mut store = MemoryStore::default();
        for i in 0..15 {
            let id = format!("seller{i}");
            store = store
                .with_user(user(&id, None))
                .with_order(order(&format!("o{i}"), &id, "b1", &[("s1", 1, 1.0)], 100.0 + i as f64));
        }

        let report = analytics(store).compute().await.unwrap();
        assert_eq!(report.sellers.len(), 15);
        assert_eq!(report.leaderboard.len(), 10);
        assert_eq!(
            report.leaderboard.iter().map(|e| e.rank).collect::<Vec<_>>(),
            (1..=10).collect::<Vec<_>>()
        );
        assert!(report
            .leaderboard
            .windows(2)
            .all(|w| w[0].total_earnings > w[1].total_earnings));
        assert_eq!(report.leaderboard[0].total_earnings, 114.0);
    }

    #[tokio::test]
    async fn orphaned_sales_are_reported_but_not_listed() {
        let store = MemoryStore::default()
            .with_user(user("u1", None))
            .with_snack(snack("s1", "u1"))
            .with_order(order("o1", "u1", "b1", &[("s1", 1, 4.0), ("deleted", 2, 8.0)], 12.0));

        let report = analytics(store).compute().await.unwrap();
        assert_eq!(report.snacks.len(), 1);
        assert_eq!(report.orphaned_snack_refs, vec![Reference::from("deleted")]);
    }

    #[tokio::test]
    async fn completed_filter_drops_open_orders() {
        let mut pending = order("o2", "u1", "b2", &[("s1", 5, 50.0)], 50.0);
        pending.status = OrderStatus::Pending;
        let store = MemoryStore::default()
            .with_user(user("u1", None))
            .with_snack(snack("s1", "u1"))
            .with_order(order("o1", "u1", "b1", &[("s1", 1, 4.0)], 4.0))
            .with_order(pending);

        let all = analytics(store.clone()).compute().await.unwrap();
        assert_eq!(all.sellers[0].completed_orders, 2);
        assert_eq!(all.snacks[0].units_sold, 6);

        let config = AnalyticsConfig {
            order_filter: OrderFilter::CompletedOnly,
            ..AnalyticsConfig::default()
        };
        let completed = SnackAnalytics::new(Arc::new(store), config).compute().await.unwrap();
        assert_eq!(completed.sellers[0].completed_orders, 1);
        assert_eq!(completed.sellers[0].unique_buyers, 1);
        assert_eq!(completed.snacks[0].units_sold, 1);
    }

    #[tokio::test]
    async fn seller_detail_resolves_known_sellers_only() {
        let store = MemoryStore::default()
            .with_user(user("u1", None))
            .with_snack(snack("s1", "u1"))
            .with_order(order("o1", "u1", "b1", &[("s1", 2, 20.0)], 20.0))
            .with_order(order("o2", "u9", "b1", &[("s1", 1, 10.0)], 10.0));
        let analytics = analytics(store);

        let detail = analytics.seller_detail(&"u1".into()).await.unwrap().unwrap();
        assert_eq!(detail.sold.len(), 1);
        assert_eq!(detail.total_amount, 20.0);
        assert_eq!(detail.active_listings.len(), 1);

        assert!(analytics.seller_detail(&"nobody".into()).await.unwrap().is_none());
    }

    #[test]
    fn idle_seller_ties_with_zero_total_seller_at_plain_zero() {
        let users = vec![user("idle", None), user("freebie", None)];
        let orders = vec![order("o1", "freebie", "b1", &[("s1", 1, 0.0)], 0.0)];

        let report = build_report(&users, &[], orders, OrderFilter::All, 10);

        let idle = &report.sellers[0];
        assert!(!idle.total_earnings.is_sign_negative());

        let names: Vec<_> = report.leaderboard.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["user idle", "user freebie"]);

        let row = LeaderboardRow::from(&report.leaderboard[0]);
        assert_eq!(row.earnings, "₹0.00");
    }

    struct UnreachableStore;

    #[async_trait]
    impl AnalyticsStore for UnreachableStore {
        async fn fetch_users(&self) -> Result<Vec<User>, AnalyticsError> {
            Err(AnalyticsError::StoreUnavailable("connection refused".to_string()))
        }

        async fn fetch_snacks(&self) -> Result<Vec<Snack>, AnalyticsError> {
            Ok(Vec::new())
        }

        async fn fetch_orders(&self) -> Result<Vec<Order>, AnalyticsError> {
            Ok(Vec::new())
        }

        async fn find_user(&self, _id: &Reference) -> Result<Option<User>, AnalyticsError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn store_failure_aborts_the_run() {
        let analytics = SnackAnalytics::new(Arc::new(UnreachableStore), AnalyticsConfig::default());
        let result = analytics.compute().await;
        assert!(matches!(result, Err(AnalyticsError::StoreUnavailable(_))));
    }
}
