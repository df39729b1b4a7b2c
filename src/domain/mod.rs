//! Domain types for the tournament ledger.
//!
//! This module provides:
//! - Exact numeric handling via the Decimal wrapper
//! - Id newtypes: PlayerId, TournamentId
//! - Participation ledger records with integrity validation
//! - Player and Tournament value types

pub mod decimal;
pub mod participation;
pub mod player;
pub mod primitives;
pub mod tournament;

pub use decimal::Decimal;
pub use participation::{DataIntegrityError, Participation};
pub use player::PlayerProfile;
pub use primitives::{PlayerId, TournamentId};
pub use tournament::Tournament;
