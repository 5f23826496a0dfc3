use std::io::{self, Write};

use serde::{Serialize, Serializer};

use super::types::{AnalyticsReport, LeaderboardEntry, SellerDetail};

pub const CURRENCY: &str = "₹";
pub const RISING: &str = "↑";

/// Leaderboard entry as shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardRow {
    pub rank: usize,
    pub display_name: String,
    pub earnings: String,
    pub room_badge: String,
}

impl From<&LeaderboardEntry> for LeaderboardRow {
    fn from(entry: &LeaderboardEntry) -> Self {
        Self {
            rank: entry.rank,
            display_name: capitalize(&entry.name),
            earnings: earnings_label(entry.total_earnings),
            room_badge: entry.room_no.clone(),
        }
    }
}

/// Emits leaderboard entries in their display form.
pub fn serialize_leaderboard<S>(entries: &[LeaderboardEntry], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(entries.iter().map(LeaderboardRow::from))
}

pub fn format_currency(amount: f64) -> String {
    format!("{CURRENCY}{amount:.2}")
}

/// Positive earnings carry the rising marker.
pub fn earnings_label(amount: f64) -> String {
    if amount > 0.0 {
        format!("{RISING} {}", format_currency(amount))
    } else {
        format_currency(amount)
    }
}

/// First character upper-cased, the rest lower-cased.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

pub fn print_report(report: &AnalyticsReport) -> io::Result<()> {
    let mut out = io::stdout().lock();

    writeln!(out, "Top Seller Leaderboard")?;
    writeln!(out, "{:-<64}", "")?;
    for row in report.leaderboard.iter().map(LeaderboardRow::from) {
        writeln!(
            out,
            "{:>3}. {:<28} [{:^8}] {:>18}",
            row.rank, row.display_name, row.room_badge, row.earnings
        )?;
    }

    writeln!(out, "\nSeller Analytics")?;
    writeln!(
        out,
        "{:<20} {:<28} {:>11} {:>15} {:>16} {:>13} {:>8}",
        "Name", "Email", "Total Sales", "Total Earnings", "Completed Orders", "Unique Buyers", "Room No"
    )?;
    writeln!(out, "{:-<117}", "")?;
    for s in &report.sellers {
        writeln!(
            out,
            "{:<20} {:<28} {:>11} {:>15.2} {:>16} {:>13} {:>8}",
            s.name, s.email, s.total_sales_line_items, s.total_earnings, s.completed_orders, s.unique_buyers, s.room_no
        )?;
    }

    writeln!(out, "\nSnack Analytics")?;
    writeln!(
        out,
        "{:<24} {:<20} {:>9} {:>10} {:>10} {:>11}",
        "Name", "Listed By", "Price", "Units Sold", "Revenue", "Created At"
    )?;
    writeln!(out, "{:-<89}", "")?;
    for s in &report.snacks {
        writeln!(
            out,
            "{:<24} {:<20} {:>9.2} {:>10} {:>10.2} {:>11}",
            s.name, s.listed_by, s.price, s.units_sold, s.revenue, s.created_at
        )?;
    }

    if !report.orphaned_snack_refs.is_empty() {
        writeln!(
            out,
            "\n{} sold snack reference(s) have no snack record and are not shown.",
            report.orphaned_snack_refs.len()
        )?;
    }

    out.flush()
}

fn delivery_label(deliverable: Option<bool>) -> &'static str {
    match deliverable {
        Some(true) => "deliverable",
        Some(false) => "pickup only",
        None => "N/A",
    }
}

pub fn format_seller_detail(detail: &SellerDetail) -> String {
    let mut output = String::new();

    output.push_str(&format!("Name: {}\n", detail.name));
    output.push_str(&format!("Email: {}\n", detail.email));
    output.push_str(&format!("Joined: {}\n", detail.joined));
    output.push_str(&format!("Total Sales: {}\n", detail.total_sales_line_items));
    output.push_str(&format!("Total Amount: {}\n", format_currency(detail.total_amount)));

    output.push_str(&format!("\nActive Listings ({})\n", detail.active_listings.len()));
    for listing in &detail.active_listings {
        output.push_str(&format!(
            "  {:<24} {:>10} {:<14} added {} [{}]\n",
            listing.name,
            format_currency(listing.price),
            delivery_label(Some(listing.deliverable)),
            listing.date_added,
            listing.image
        ));
    }

    output.push_str(&format!("\nSold ({})\n", detail.sold.len()));
    for sold in &detail.sold {
        output.push_str(&format!(
            "  {:<24} x{:<3} {:>10} {:<14} added {} to {:<24} on {}\n",
            sold.name,
            sold.quantity,
            format_currency(sold.price),
            delivery_label(sold.deliverable),
            sold.date_added,
            sold.buyer,
            sold.sold_date
        ));
    }

    output
}
