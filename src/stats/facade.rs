//! Per-player stats facade with computation-cycle memoization.
//!
//! One `PlayerStats` is built per computation cycle (one leaderboard build,
//! one detail view) and discarded with it. The first metric access computes
//! the full bundle; every later access within the cycle returns the cached
//! bundle. The facade never watches for ledger changes; a caller that edits
//! results must build a fresh facade.

use crate::domain::{DataIntegrityError, Participation, PlayerProfile};
use crate::stats::MetricsBundle;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

/// One player's participation snapshot plus a lazily computed metrics bundle.
#[derive(Debug)]
pub struct PlayerStats {
    player: PlayerProfile,
    participations: Vec<Participation>,
    bundle: OnceLock<MetricsBundle>,
    computations: AtomicUsize,
}

impl PlayerStats {
    /// Build a facade over a snapshot of one player's records.
    ///
    /// Records are validated up front so that metric access is infallible.
    ///
    /// # Errors
    /// Returns `DataIntegrityError` if any record violates the ledger
    /// invariants.
    pub fn new(
        player: PlayerProfile,
        participations: Vec<Participation>,
    ) -> Result<Self, DataIntegrityError> {
        for p in &participations {
            p.validate()?;
        }
        Ok(PlayerStats {
            player,
            participations,
            bundle: OnceLock::new(),
            computations: AtomicUsize::new(0),
        })
    }

    /// The player this facade belongs to.
    pub fn player(&self) -> &PlayerProfile {
        &self.player
    }

    /// The participation snapshot this facade was built over.
    pub fn participations(&self) -> &[Participation] {
        &self.participations
    }

    /// Whether this player has entered any tournament at all.
    pub fn has_participations(&self) -> bool {
        !self.participations.is_empty()
    }

    /// The metrics bundle, computed at most once per facade.
    pub fn bundle(&self) -> &MetricsBundle {
        self.bundle.get_or_init(|| {
            self.computations.fetch_add(1, Ordering::Relaxed);
            MetricsBundle::from_validated(&self.participations)
        })
    }

    /// Consume the facade, yielding the bundle without recomputation if it
    /// was already materialized.
    pub fn into_bundle(self) -> MetricsBundle {
        self.bundle();
        self.bundle.into_inner().unwrap_or_else(|| {
            MetricsBundle::from_validated(&self.participations)
        })
    }

    /// Number of times the bundle has actually been computed. Stays at most 1
    /// for the lifetime of the facade.
    pub fn computations(&self) -> usize {
        self.computations.load(Ordering::Relaxed)
    }
}
