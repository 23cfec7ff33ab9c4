//! Battle modes and the shared turn-resolution machinery.

pub mod boss;
pub mod duel;
pub mod effects;
pub mod engine;
pub mod npc;
pub mod royale;
pub mod team;
pub mod types;

pub use engine::BattleCore;
pub use types::{ActionError, BattleEvent, BattleParticipant, BattlePhase, PlayerAction};
