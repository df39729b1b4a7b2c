//! Per-player metric calculation.
//!
//! All metrics are pure functions of one player's participation records.
//! Every ratio has a defined zero-denominator result so a player with no
//! tournaments (or no cashes) always produces a complete, sortable bundle.
//!
//! Units: `roi` is a percentage; `win_rate`, `itm_rate`, `rebuy_frequency`,
//! and `win_to_itm_ratio` are unscaled fractions. Scaling fractions for
//! display belongs to clients, not to the calculator.

use crate::domain::{DataIntegrityError, Decimal, Participation};
use serde::Serialize;

/// All derived metrics for one player, computed in one pass.
///
/// A bundle is ephemeral: computed from a snapshot of the ledger, never
/// persisted, never mutated. Two computations over the same records yield
/// identical bundles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsBundle {
    /// Number of tournaments entered.
    pub tournaments_played: u32,
    /// Gross winnings: sum of prizes, entry costs not subtracted.
    pub total_winnings: Decimal,
    /// Sum of entry buy-ins only.
    pub total_buyin_spent: Decimal,
    /// Sum of rebuy spend only.
    pub total_rebuy_spent: Decimal,
    /// Total invested: buy-ins plus rebuys.
    pub total_spent: Decimal,
    /// Winnings minus total spent. Negative on a losing record.
    pub net_profit: Decimal,
    /// Return on investment as a percentage of total spent. 0 when nothing
    /// was spent.
    pub roi: Decimal,
    /// Outright wins (finishing position 1).
    pub wins: u32,
    /// Fraction of tournaments won.
    pub win_rate: Decimal,
    /// Finishes in the money (non-zero prize).
    pub itm_count: u32,
    /// Fraction of tournaments cashed.
    pub itm_rate: Decimal,
    /// Historical expected value per entry.
    pub avg_profit_per_tournament: Decimal,
    /// Total rebuys taken across all tournaments.
    pub total_rebuys: u32,
    /// Mean rebuys per tournament.
    pub avg_rebuy_per_tournament: Decimal,
    /// Fraction of tournaments with at least one rebuy.
    pub rebuy_frequency: Decimal,
    /// Conversion rate from reaching the money to winning outright.
    pub win_to_itm_ratio: Decimal,
    /// Average entry cost (ABI).
    pub avg_buy_in: Decimal,
    /// Cost per cash (CPC): total spent per in-the-money finish.
    pub cost_per_cash: Decimal,
    /// Tournaments played on the initial buy-in alone.
    pub tournaments_no_rebuy: u32,
    /// Average prize conditioned on cashing.
    pub avg_prize_itm: Decimal,
}

/// Zero-denominator policy: ratios over an empty denominator are 0, never an
/// error or a NaN-like value.
fn div_or_zero(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        Decimal::zero()
    } else {
        numerator / denominator
    }
}

impl MetricsBundle {
    /// Compute the full bundle from one player's participation records.
    ///
    /// # Errors
    /// Returns `DataIntegrityError` if any record carries a negative amount
    /// or a zero finishing position. Bad data is reported, never repaired.
    pub fn compute(participations: &[Participation]) -> Result<Self, DataIntegrityError> {
        for p in participations {
            p.validate()?;
        }
        Ok(Self::from_validated(participations))
    }

    /// Compute from records already checked by `Participation::validate`.
    pub(crate) fn from_validated(participations: &[Participation]) -> Self {
        let tournaments_played = participations.len() as u32;

        let mut total_winnings = Decimal::zero();
        let mut total_buyin_spent = Decimal::zero();
        let mut total_rebuy_spent = Decimal::zero();
        let mut wins = 0u32;
        let mut itm_count = 0u32;
        let mut total_rebuys = 0u32;
        let mut tournaments_no_rebuy = 0u32;

        for p in participations {
            total_winnings = total_winnings + p.prize;
            total_buyin_spent = total_buyin_spent + p.buy_in;
            total_rebuy_spent = total_rebuy_spent + p.rebuy_spent;
            total_rebuys += p.rebuy_count;

            if p.position == Some(1) {
                wins += 1;
            }
            if p.in_the_money() {
                itm_count += 1;
            }
            if p.rebuy_count == 0 {
                tournaments_no_rebuy += 1;
            }
        }

        let total_spent = total_buyin_spent + total_rebuy_spent;
        let net_profit = total_winnings - total_spent;

        let played = Decimal::from_count(tournaments_played);
        let cashed = Decimal::from_count(itm_count);
        let rebuy_tournaments = Decimal::from_count(tournaments_played - tournaments_no_rebuy);

        MetricsBundle {
            tournaments_played,
            total_winnings,
            total_buyin_spent,
            total_rebuy_spent,
            total_spent,
            net_profit,
            roi: div_or_zero(net_profit, total_spent) * Decimal::hundred(),
            wins,
            win_rate: div_or_zero(Decimal::from_count(wins), played),
            itm_count,
            itm_rate: div_or_zero(cashed, played),
            avg_profit_per_tournament: div_or_zero(net_profit, played),
            total_rebuys,
            avg_rebuy_per_tournament: div_or_zero(Decimal::from_count(total_rebuys), played),
            rebuy_frequency: div_or_zero(rebuy_tournaments, played),
            win_to_itm_ratio: div_or_zero(Decimal::from_count(wins), cashed),
            avg_buy_in: div_or_zero(total_buyin_spent, played),
            cost_per_cash: div_or_zero(total_spent, cashed),
            tournaments_no_rebuy,
            avg_prize_itm: div_or_zero(total_winnings, cashed),
        }
    }
}
