//! Metric registry: the closed set of sortable metrics plus their display
//! metadata.
//!
//! Sorting dispatches through `MetricKey` accessors rather than field-name
//! lookup, so an unknown metric name is a typed error at parse time and can
//! never silently fall back to a default column.

use crate::domain::Decimal;
use crate::stats::MetricsBundle;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Requested sort-by name is not a registered metric.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown metric: {0}")]
pub struct UnknownMetricError(pub String);

/// How the presentation layer should render a metric's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    /// A money amount in the league's (single) currency.
    Currency,
    /// A fraction or percent; fractions are scaled by the client.
    Percentage,
    /// A plain count.
    Integer,
    /// A dimensionless quotient.
    Ratio,
}

/// Display metadata for one registered metric.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MetricInfo {
    pub name: &'static str,
    pub label: &'static str,
    pub unit: UnitKind,
    pub description: &'static str,
}

/// A registered, sortable metric of the per-player bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    TournamentsPlayed,
    TotalWinnings,
    TotalBuyinSpent,
    TotalRebuySpent,
    TotalSpent,
    NetProfit,
    Roi,
    Wins,
    WinRate,
    ItmCount,
    ItmRate,
    AvgProfitPerTournament,
    TotalRebuys,
    AvgRebuyPerTournament,
    RebuyFrequency,
    WinToItmRatio,
    AvgBuyIn,
    CostPerCash,
    TournamentsNoRebuy,
    AvgPrizeItm,
}

impl MetricKey {
    /// Every registered metric, in presentation order.
    pub const ALL: [MetricKey; 20] = [
        MetricKey::NetProfit,
        MetricKey::Roi,
        MetricKey::TournamentsPlayed,
        MetricKey::Wins,
        MetricKey::WinRate,
        MetricKey::ItmCount,
        MetricKey::ItmRate,
        MetricKey::WinToItmRatio,
        MetricKey::TotalWinnings,
        MetricKey::TotalSpent,
        MetricKey::TotalBuyinSpent,
        MetricKey::TotalRebuySpent,
        MetricKey::AvgProfitPerTournament,
        MetricKey::AvgBuyIn,
        MetricKey::AvgPrizeItm,
        MetricKey::CostPerCash,
        MetricKey::TotalRebuys,
        MetricKey::AvgRebuyPerTournament,
        MetricKey::RebuyFrequency,
        MetricKey::TournamentsNoRebuy,
    ];

    /// The metric's registered name (also its JSON field name in a bundle).
    pub fn name(&self) -> &'static str {
        self.info().name
    }

    /// Display metadata for this metric.
    pub fn info(&self) -> MetricInfo {
        match self {
            MetricKey::TournamentsPlayed => MetricInfo {
                name: "tournaments_played",
                label: "Played",
                unit: UnitKind::Integer,
                description: "Tournaments entered",
            },
            MetricKey::TotalWinnings => MetricInfo {
                name: "total_winnings",
                label: "Winnings",
                unit: UnitKind::Currency,
                description: "Gross prize money won, costs not subtracted",
            },
            MetricKey::TotalBuyinSpent => MetricInfo {
                name: "total_buyin_spent",
                label: "Buy-ins",
                unit: UnitKind::Currency,
                description: "Total spent on initial entries",
            },
            MetricKey::TotalRebuySpent => MetricInfo {
                name: "total_rebuy_spent",
                label: "Rebuy spend",
                unit: UnitKind::Currency,
                description: "Total spent on rebuys",
            },
            MetricKey::TotalSpent => MetricInfo {
                name: "total_spent",
                label: "Invested",
                unit: UnitKind::Currency,
                description: "Total invested: buy-ins plus rebuys",
            },
            MetricKey::NetProfit => MetricInfo {
                name: "net_profit",
                label: "Profit",
                unit: UnitKind::Currency,
                description: "Winnings minus total invested",
            },
            MetricKey::Roi => MetricInfo {
                name: "roi",
                label: "ROI",
                unit: UnitKind::Percentage,
                description: "Net profit as a percentage of total invested",
            },
            MetricKey::Wins => MetricInfo {
                name: "wins",
                label: "Wins",
                unit: UnitKind::Integer,
                description: "First-place finishes",
            },
            MetricKey::WinRate => MetricInfo {
                name: "win_rate",
                label: "Win rate",
                unit: UnitKind::Percentage,
                description: "Fraction of tournaments won",
            },
            MetricKey::ItmCount => MetricInfo {
                name: "itm_count",
                label: "Cashes",
                unit: UnitKind::Integer,
                description: "Finishes that returned prize money",
            },
            MetricKey::ItmRate => MetricInfo {
                name: "itm_rate",
                label: "ITM rate",
                unit: UnitKind::Percentage,
                description: "Fraction of tournaments cashed",
            },
            MetricKey::AvgProfitPerTournament => MetricInfo {
                name: "avg_profit_per_tournament",
                label: "Avg profit",
                unit: UnitKind::Currency,
                description: "Mean net result per tournament",
            },
            MetricKey::TotalRebuys => MetricInfo {
                name: "total_rebuys",
                label: "Rebuys",
                unit: UnitKind::Integer,
                description: "Rebuys taken across all tournaments",
            },
            MetricKey::AvgRebuyPerTournament => MetricInfo {
                name: "avg_rebuy_per_tournament",
                label: "Avg rebuys",
                unit: UnitKind::Ratio,
                description: "Mean rebuys per tournament",
            },
            MetricKey::RebuyFrequency => MetricInfo {
                name: "rebuy_frequency",
                label: "Rebuy freq.",
                unit: UnitKind::Percentage,
                description: "Fraction of tournaments with at least one rebuy",
            },
            MetricKey::WinToItmRatio => MetricInfo {
                name: "win_to_itm_ratio",
                label: "Closer rate",
                unit: UnitKind::Ratio,
                description: "Wins per in-the-money finish",
            },
            MetricKey::AvgBuyIn => MetricInfo {
                name: "avg_buy_in",
                label: "ABI",
                unit: UnitKind::Currency,
                description: "Average buy-in across entered tournaments",
            },
            MetricKey::CostPerCash => MetricInfo {
                name: "cost_per_cash",
                label: "CPC",
                unit: UnitKind::Currency,
                description: "Total invested per in-the-money finish",
            },
            MetricKey::TournamentsNoRebuy => MetricInfo {
                name: "tournaments_no_rebuy",
                label: "Clean entries",
                unit: UnitKind::Integer,
                description: "Tournaments played on the initial buy-in alone",
            },
            MetricKey::AvgPrizeItm => MetricInfo {
                name: "avg_prize_itm",
                label: "Avg cash",
                unit: UnitKind::Currency,
                description: "Average prize when finishing in the money",
            },
        }
    }

    /// Read this metric's value out of a bundle, lifted to Decimal so every
    /// column sorts under one comparison.
    pub fn value(&self, bundle: &MetricsBundle) -> Decimal {
        match self {
            MetricKey::TournamentsPlayed => Decimal::from_count(bundle.tournaments_played),
            MetricKey::TotalWinnings => bundle.total_winnings,
            MetricKey::TotalBuyinSpent => bundle.total_buyin_spent,
            MetricKey::TotalRebuySpent => bundle.total_rebuy_spent,
            MetricKey::TotalSpent => bundle.total_spent,
            MetricKey::NetProfit => bundle.net_profit,
            MetricKey::Roi => bundle.roi,
            MetricKey::Wins => Decimal::from_count(bundle.wins),
            MetricKey::WinRate => bundle.win_rate,
            MetricKey::ItmCount => Decimal::from_count(bundle.itm_count),
            MetricKey::ItmRate => bundle.itm_rate,
            MetricKey::AvgProfitPerTournament => bundle.avg_profit_per_tournament,
            MetricKey::TotalRebuys => Decimal::from_count(bundle.total_rebuys),
            MetricKey::AvgRebuyPerTournament => bundle.avg_rebuy_per_tournament,
            MetricKey::RebuyFrequency => bundle.rebuy_frequency,
            MetricKey::WinToItmRatio => bundle.win_to_itm_ratio,
            MetricKey::AvgBuyIn => bundle.avg_buy_in,
            MetricKey::CostPerCash => bundle.cost_per_cash,
            MetricKey::TournamentsNoRebuy => Decimal::from_count(bundle.tournaments_no_rebuy),
            MetricKey::AvgPrizeItm => bundle.avg_prize_itm,
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for MetricKey {
    type Err = UnknownMetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        MetricKey::ALL
            .into_iter()
            .find(|key| key.name() == wanted)
            .ok_or_else(|| UnknownMetricError(wanted.to_string()))
    }
}
