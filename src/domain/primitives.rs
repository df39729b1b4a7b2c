//! Domain primitives: PlayerId, TournamentId.

use serde::{Deserialize, Serialize};

/// Row identifier of a registered player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub i64);

impl PlayerId {
    /// Create a PlayerId from a raw id.
    pub fn new(id: i64) -> Self {
        PlayerId(id)
    }

    /// Get the underlying id value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Row identifier of a tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TournamentId(pub i64);

impl TournamentId {
    /// Create a TournamentId from a raw id.
    pub fn new(id: i64) -> Self {
        TournamentId(id)
    }

    /// Get the underlying id value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TournamentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
