//! Participation record: one player's entry in one tournament.

use crate::domain::{Decimal, PlayerId, TournamentId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A participation record violates an invariant the upstream write path was
/// supposed to enforce. The engine never normalizes bad data; it reports it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataIntegrityError {
    #[error("{field} is negative for player {player} in tournament {tournament}")]
    NegativeAmount {
        field: &'static str,
        player: PlayerId,
        tournament: TournamentId,
    },
    #[error("finishing position must be >= 1 for player {player} in tournament {tournament}")]
    PositionOutOfRange {
        player: PlayerId,
        tournament: TournamentId,
    },
}

/// One player's participation in one tournament.
///
/// A (tournament, player) pair is unique. `buy_in` is denormalized from the
/// tournament so the stats engine sees a self-contained ledger record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participation {
    /// Tournament this record belongs to.
    pub tournament_id: TournamentId,
    /// Player this record belongs to.
    pub player_id: PlayerId,
    /// Entry cost charged to this player.
    pub buy_in: Decimal,
    /// Number of rebuys taken.
    pub rebuy_count: u32,
    /// Total money spent on rebuys. Trusted as stored; the engine never
    /// assumes a fixed per-rebuy price.
    pub rebuy_spent: Decimal,
    /// Money won (0 if out of the money).
    pub prize: Decimal,
    /// Finishing place, 1 = winner. None if unranked or unrecorded.
    pub position: Option<u32>,
}

impl Participation {
    /// Check the non-negativity and position invariants.
    ///
    /// # Errors
    /// Returns `DataIntegrityError` on the first violated invariant.
    pub fn validate(&self) -> Result<(), DataIntegrityError> {
        for (field, value) in [
            ("buy_in", self.buy_in),
            ("rebuy_spent", self.rebuy_spent),
            ("prize", self.prize),
        ] {
            if value.is_negative() {
                return Err(DataIntegrityError::NegativeAmount {
                    field,
                    player: self.player_id,
                    tournament: self.tournament_id,
                });
            }
        }

        if self.position == Some(0) {
            return Err(DataIntegrityError::PositionOutOfRange {
                player: self.player_id,
                tournament: self.tournament_id,
            });
        }

        Ok(())
    }

    /// Gross cost of this entry: buy-in plus all rebuy spend.
    pub fn total_cost(&self) -> Decimal {
        self.buy_in + self.rebuy_spent
    }

    /// Net result of this entry: prize minus gross cost. Negative on a loss.
    pub fn net_result(&self) -> Decimal {
        self.prize - self.total_cost()
    }

    /// Whether this entry finished in the money (returned a non-zero prize).
    pub fn in_the_money(&self) -> bool {
        self.prize.is_positive()
    }
}
