use std::cmp::Ordering;

use super::types::{LeaderboardEntry, SellerSummary};

pub const DEFAULT_LEADERBOARD_SIZE: usize = 10;

/// Top `size` sellers by total earnings, ranked from 1. The sort is stable, so
/// sellers with equal earnings keep their summary order.
pub fn build_leaderboard(sellers: &[SellerSummary], size: usize) -> Vec<LeaderboardEntry> {
    let mut ranked: Vec<&SellerSummary> = sellers.iter().collect();
    ranked.sort_by(|a, b| {
        b.total_earnings
            .partial_cmp(&a.total_earnings)
            .unwrap_or(Ordering::Equal)
    });

    ranked
        .into_iter()
        .take(size)
        .enumerate()
        .map(|(idx, seller)| LeaderboardEntry {
            rank: idx + 1,
            seller: seller.seller.clone(),
            name: seller.name.clone(),
            total_earnings: seller.total_earnings,
            room_no: seller.room_no.clone(),
        })
        .collect()
}
