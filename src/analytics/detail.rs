use std::collections::HashMap;

use super::types::{
    format_date, ListingRow, Order, Reference, SellerDetail, Snack, SoldRow, User, DEFAULT_IMAGE,
    UNKNOWN_NAME,
};

fn image_of(snack: &Snack) -> String {
    snack
        .image_url
        .clone()
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_IMAGE.to_string())
}

/// Per-seller dashboard: listings still in stock and every line item sold.
/// `orders` must already be restricted to this seller.
pub fn build_seller_detail(user: &User, snacks: &[Snack], orders: &[Order]) -> SellerDetail {
    let by_id: HashMap<&Reference, &Snack> = snacks.iter().map(|s| (&s.id, s)).collect();

    let active_listings = snacks
        .iter()
        .filter(|s| s.enlisted_by == user.id && s.quantity > 0)
        .map(|s| ListingRow {
            name: s.name.clone(),
            price: s.price,
            image: image_of(s),
            deliverable: s.deliverable,
            date_added: format_date(s.created_at),
        })
        .collect();

    let sold = orders
        .iter()
        .flat_map(|order| {
            let by_id = &by_id;
            order.items.iter().map(move |item| {
                let snack = by_id.get(&item.snack).copied();
                SoldRow {
                    name: snack.map_or(UNKNOWN_NAME, |s| s.name.as_str()).to_string(),
                    price: item.price,
                    quantity: item.quantity,
                    image: snack.map_or_else(|| DEFAULT_IMAGE.to_string(), image_of),
                    deliverable: snack.map(|s| s.deliverable),
                    date_added: format_date(snack.and_then(|s| s.created_at)),
                    buyer: order.buyer.to_string(),
                    sold_date: format_date(order.created_at),
                }
            })
        })
        .collect();

    SellerDetail {
        name: user.name.clone(),
        email: user.email.clone(),
        joined: format_date(user.created_at),
        total_sales_line_items: orders.iter().map(|o| o.items.len() as u64).sum(),
        total_amount: orders.iter().fold(0.0, |acc, o| acc + o.total_amount),
        active_listings,
        sold,
    }
}
