//! Gacha engine: weighted draws, paid pulls, and evolution.

mod logic;

pub use logic::{can_evolve, draw, evolve, pull_batch, pull_single, PullResult};
