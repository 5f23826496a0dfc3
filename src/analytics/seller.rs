use std::collections::{HashMap, HashSet};

use super::types::{Order, Reference, SellerSummary, User, NOT_AVAILABLE};

/// Groups orders by seller reference in a single pass.
pub fn index_by_seller<'a>(orders: &'a [Order]) -> HashMap<&'a Reference, Vec<&'a Order>> {
    let mut index: HashMap<&Reference, Vec<&Order>> = HashMap::new();
    for order in orders {
        index.entry(&order.seller).or_default().push(order);
    }
    index
}

/// One row per user, in user order. Users without orders get an all-zero row.
pub fn build_seller_summaries(users: &[User], orders: &[Order]) -> Vec<SellerSummary> {
    let index = index_by_seller(orders);
    users
        .iter()
        .map(|user| {
            let sold = index.get(&user.id).map(Vec::as_slice).unwrap_or(&[]);
            summarize_seller(user, sold)
        })
        .collect()
}

pub fn summarize_seller(user: &User, orders: &[&Order]) -> SellerSummary {
    let total_sales_line_items = orders.iter().map(|o| o.items.len() as u64).sum();
    let total_earnings = orders.iter().fold(0.0, |acc, o| acc + o.total_amount);
    let unique_buyers = orders.iter().map(|o| &o.buyer).collect::<HashSet<_>>().len() as u64;

    SellerSummary {
        seller: user.id.clone(),
        name: user.name.clone(),
        email: user.email.clone(),
        total_sales_line_items,
        total_earnings,
        completed_orders: orders.len() as u64,
        unique_buyers,
        room_no: user
            .room_no
            .clone()
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::types::{LineItem, OrderStatus};

    fn user(id: &str) -> User {
        User {
            id: id.into(),
            name: id.to_string(),
            email: format!("{id}@example.com"),
            room_no: None,
            created_at: None,
        }
    }

    fn order(seller: &str, buyer: &str, quantities: &[i64], total: f64) -> Order {
        Order {
            id: format!("{seller}-{buyer}-{total}").as_str().into(),
            buyer: buyer.into(),
            seller: seller.into(),
            items: quantities
                .iter()
                .map(|&quantity| LineItem {
                    snack: "s".into(),
                    quantity,
                    price: 1.0,
                })
                .collect(),
            total_amount: total,
            status: OrderStatus::Completed,
            created_at: None,
        }
    }

    #[test]
    fn counts_line_items_not_quantities() {
        let orders = vec![order("u2", "b1", &[3, 1], 15.0), order("u2", "b2", &[7], 4.0)];
        let rows = build_seller_summaries(&[user("u2")], &orders);

        assert_eq!(rows[0].total_sales_line_items, 3);
        assert_eq!(rows[0].total_earnings, 19.0);
        assert_eq!(rows[0].completed_orders, 2);
        assert_eq!(rows[0].unique_buyers, 2);
    }

    #[test]
    fn orders_of_other_sellers_are_ignored() {
        let orders = vec![order("u1", "b1", &[1], 5.0), order("u9", "b1", &[1, 1], 50.0)];
        let rows = build_seller_summaries(&[user("u1"), user("u2")], &orders);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].total_earnings, 5.0);
        assert_eq!(rows[1].total_earnings, 0.0);
        assert_eq!(rows[1].room_no, "N/A");
    }

    #[test]
    fn index_groups_orders_once() {
        let orders = vec![
            order("u1", "b1", &[1], 1.0),
            order("u2", "b1", &[1], 1.0),
            order("u1", "b2", &[1], 1.0),
        ];
        let index = index_by_seller(&orders);
        assert_eq!(index[&Reference::from("u1")].len(), 2);
        assert_eq!(index[&Reference::from("u2")].len(), 1);
    }
}
