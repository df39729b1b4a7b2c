//! Tournament value type.

use crate::domain::{Decimal, TournamentId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single tournament event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub tournament_date: NaiveDate,
    /// Entry cost charged to every entrant.
    pub buy_in: Decimal,
    /// Explicit prize pool override (e.g. a guarantee). When absent the
    /// effective pool is derived from entries and rebuys.
    pub prize_pool: Option<Decimal>,
    pub location: Option<String>,
}
