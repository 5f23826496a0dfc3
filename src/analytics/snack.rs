use std::collections::{HashMap, HashSet};

use super::types::{format_date, Order, Reference, Snack, SnackStats, SnackSummary, User, UNKNOWN_NAME};

/// Units sold and revenue per snack reference, over every line item of every
/// order, whether or not the reference still resolves to a snack.
pub fn accumulate_snack_stats(orders: &[Order]) -> HashMap<Reference, SnackStats> {
    let mut stats: HashMap<Reference, SnackStats> = HashMap::new();
    for order in orders {
        for item in &order.items {
            let entry = stats.entry(item.snack.clone()).or_default();
            entry.units_sold += item.quantity;
            entry.revenue += item.price;
        }
    }
    stats
}

pub fn user_names(users: &[User]) -> HashMap<&Reference, &str> {
    users.iter().map(|u| (&u.id, u.name.as_str())).collect()
}

/// Joins snack metadata with accumulated stats. Snacks with no sales report zeros.
pub fn build_snack_summaries(
    snacks: &[Snack],
    stats: &HashMap<Reference, SnackStats>,
    names: &HashMap<&Reference, &str>,
) -> Vec<SnackSummary> {
    snacks
        .iter()
        .map(|snack| {
            let sold = stats.get(&snack.id).copied().unwrap_or_default();
            SnackSummary {
                snack: snack.id.clone(),
                name: snack.name.clone(),
                listed_by: names
                    .get(&snack.enlisted_by)
                    .copied()
                    .unwrap_or(UNKNOWN_NAME)
                    .to_string(),
                price: snack.price,
                units_sold: sold.units_sold,
                revenue: sold.revenue,
                created_at: format_date(snack.created_at),
            }
        })
        .collect()
}

/// Sold references the snack join can never reach, sorted.
pub fn orphaned_references(stats: &HashMap<Reference, SnackStats>, snacks: &[Snack]) -> Vec<Reference> {
    let known: HashSet<&Reference> = snacks.iter().map(|s| &s.id).collect();
    let mut orphans: Vec<Reference> = stats.keys().filter(|r| !known.contains(r)).cloned().collect();
    orphans.sort();
    orphans
}
