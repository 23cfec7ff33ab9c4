//! Rootbrawl - Creature Collection Battle Engine
//!
//! Gacha pulls, creature progression, the rank ladder, and four battle
//! modes (tug-of-war duel, solo royale, team royale, boss raid). No
//! rendering or input handling lives here; a presentation layer drives the
//! engine through these modules.

pub mod catalog;
pub mod collection;
pub mod combat;
pub mod core;
pub mod gacha;
pub mod progression;
pub mod rank;
pub mod save_manager;
