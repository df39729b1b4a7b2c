//! Player identity as seen by the stats engine.

use crate::domain::PlayerId;
use serde::{Deserialize, Serialize};

/// A registered player: identity plus display name.
///
/// Authentication, contact details, and avatars live outside this service;
/// the engine only needs something to rank and label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub id: PlayerId,
    pub display_name: String,
}

impl PlayerProfile {
    /// Create a profile from an id and display name.
    pub fn new(id: PlayerId, display_name: impl Into<String>) -> Self {
        PlayerProfile {
            id,
            display_name: display_name.into(),
        }
    }
}
