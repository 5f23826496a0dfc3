use std::fmt;

use chrono::{DateTime, Utc};
use mongodb::bson::{oid::ObjectId, Bson};
use serde::{Deserialize, Deserializer, Serialize};

use crate::store::de;

pub const UNKNOWN_NAME: &str = "Unknown";
pub const NOT_AVAILABLE: &str = "N/A";
pub const DEFAULT_IMAGE: &str = "/default.jpg";

/// Identifier of another record in the store, normalized to its string form
/// so ObjectId and plain-string references compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Reference(String);

impl Reference {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_object_id(&self) -> Option<ObjectId> {
        ObjectId::parse_str(&self.0).ok()
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Reference {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<ObjectId> for Reference {
    fn from(oid: ObjectId) -> Self {
        Self(oid.to_hex())
    }
}

impl From<Bson> for Reference {
    fn from(value: Bson) -> Self {
        match value {
            Bson::ObjectId(oid) => oid.into(),
            Bson::String(s) => Self(s),
            other => Self(other.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for Reference {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Bson::deserialize(deserializer)?.into())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Reference,
    pub name: String,
    pub email: String,
    #[serde(rename = "roomNo", default, deserialize_with = "de::optional_text")]
    pub room_no: Option<String>,
    #[serde(rename = "createdAt", default, deserialize_with = "de::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Snack {
    #[serde(rename = "_id")]
    pub id: Reference,
    pub name: String,
    #[serde(deserialize_with = "de::number")]
    pub price: f64,
    #[serde(rename = "createdAt", default, deserialize_with = "de::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "enlistedBy")]
    pub enlisted_by: Reference,
    /// Stock still on offer.
    #[serde(default, deserialize_with = "de::whole_number")]
    pub quantity: i64,
    #[serde(default = "default_deliverable")]
    pub deliverable: bool,
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
}

fn default_deliverable() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LineItem {
    pub snack: Reference,
    #[serde(deserialize_with = "de::whole_number")]
    pub quantity: i64,
    /// Price paid at transaction time.
    #[serde(deserialize_with = "de::number")]
    pub price: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: Reference,
    pub buyer: Reference,
    pub seller: Reference,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(rename = "totalAmount", deserialize_with = "de::number")]
    pub total_amount: f64,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(rename = "createdAt", default, deserialize_with = "de::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// One row of the Seller Summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SellerSummary {
    #[serde(skip)]
    pub seller: Reference,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Email")]
    pub email: String,
    /// Count of line-item entries, not quantities.
    #[serde(rename = "Total Sales")]
    pub total_sales_line_items: u64,
    #[serde(rename = "Total Earnings")]
    pub total_earnings: f64,
    #[serde(rename = "Completed Orders")]
    pub completed_orders: u64,
    #[serde(rename = "Unique Buyers")]
    pub unique_buyers: u64,
    #[serde(rename = "Room No")]
    pub room_no: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SnackStats {
    /// Sum of line-item quantities.
    pub units_sold: i64,
    pub revenue: f64,
}

/// One row of the Snack Summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnackSummary {
    #[serde(skip)]
    pub snack: Reference,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Listed By")]
    pub listed_by: String,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "Units Sold")]
    pub units_sold: i64,
    #[serde(rename = "Revenue")]
    pub revenue: f64,
    #[serde(rename = "Created At")]
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    #[serde(skip)]
    pub seller: Reference,
    pub name: String,
    pub total_earnings: f64,
    pub room_no: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsReport {
    pub generated_at: DateTime<Utc>,
    pub sellers: Vec<SellerSummary>,
    pub snacks: Vec<SnackSummary>,
    #[serde(serialize_with = "crate::analytics::display::serialize_leaderboard")]
    pub leaderboard: Vec<LeaderboardEntry>,
    /// Snack references with recorded sales but no snack record.
    pub orphaned_snack_refs: Vec<Reference>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingRow {
    pub name: String,
    pub price: f64,
    pub image: String,
    pub deliverable: bool,
    pub date_added: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoldRow {
    pub name: String,
    /// Price paid on the order line, not the listing's current price, so the
    /// row agrees with the order total.
    pub price: f64,
    pub quantity: i64,
    pub image: String,
    /// `None` when the snack record no longer exists.
    pub deliverable: Option<bool>,
    pub date_added: String,
    pub buyer: String,
    pub sold_date: String,
}

/// Everything the per-seller dashboard shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SellerDetail {
    pub name: String,
    pub email: String,
    pub joined: String,
    pub total_sales_line_items: u64,
    pub total_amount: f64,
    pub active_listings: Vec<ListingRow>,
    pub sold: Vec<SoldRow>,
}

pub fn format_date(timestamp: Option<DateTime<Utc>>) -> String {
    timestamp
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
