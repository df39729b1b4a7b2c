//! Tournament-level aggregates: prize pool, rebuy totals, ordered results.

use crate::domain::{Decimal, Participation, PlayerProfile, Tournament};
use serde::Serialize;

/// One entrant of a tournament: identity plus their participation record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TournamentEntry {
    pub player: PlayerProfile,
    pub record: Participation,
}

/// Aggregates over one tournament's entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TournamentSummary {
    pub entrants: u32,
    /// An explicit prize pool (e.g. a guarantee) wins over the derived
    /// buy_in x entrants + rebuy spend.
    pub effective_prize_pool: Decimal,
    pub total_rebuys: u32,
    pub total_rebuy_spent: Decimal,
}

/// Compute the tournament aggregates from its entries.
pub fn summarize(tournament: &Tournament, entries: &[TournamentEntry]) -> TournamentSummary {
    let entrants = entries.len() as u32;

    let mut total_rebuys = 0u32;
    let mut total_rebuy_spent = Decimal::zero();
    for entry in entries {
        total_rebuys += entry.record.rebuy_count;
        total_rebuy_spent = total_rebuy_spent + entry.record.rebuy_spent;
    }

    let effective_prize_pool = match tournament.prize_pool {
        Some(pool) if pool.is_positive() => pool,
        _ => tournament.buy_in * Decimal::from_count(entrants) + total_rebuy_spent,
    };

    TournamentSummary {
        entrants,
        effective_prize_pool,
        total_rebuys,
        total_rebuy_spent,
    }
}

/// Entries in result order: ranked entrants first by finishing position,
/// unranked entrants appended in their incoming order.
pub fn ordered_results(entries: &[TournamentEntry]) -> Vec<&TournamentEntry> {
    let mut ranked: Vec<&TournamentEntry> = entries
        .iter()
        .filter(|e| e.record.position.is_some())
        .collect();
    ranked.sort_by_key(|e| e.record.position);

    let unranked = entries.iter().filter(|e| e.record.position.is_none());
    ranked.extend(unranked);
    ranked
}
