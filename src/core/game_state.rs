use crate::collection::{find_in_collection, find_in_collection_mut, CollectedCreature};
use crate::rank::{rank_from_points, RankInfo};
use serde::{Deserialize, Serialize};

/// Which competitive ladder a battle reports into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankMode {
    Duel,
    Royale,
    TeamRoyale,
}

/// Main game state containing all player progress.
///
/// There is no ambient singleton: every engine function takes this (or a
/// narrower borrow) explicitly, and the persistence collaborator round-trips
/// it as a plain record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub record_id: String,
    pub player_name: String,
    #[serde(default)]
    pub player_title: String,
    pub coins: u64,
    pub collection: Vec<CollectedCreature>,
    #[serde(default)]
    pub selected_creature_id: Option<u32>,
    #[serde(default)]
    pub battle_rank_points: u32,
    #[serde(default)]
    pub royale_rank_points: u32,
    #[serde(default)]
    pub team_royale_rank_points: u32,
    pub last_save_time: i64,
    #[serde(default)]
    pub play_time_seconds: u64,
}

/// Current unix timestamp for save bookkeeping.
pub fn now_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

impl GameState {
    /// Creates a new game state with starting currency and an empty
    /// collection.
    pub fn new(player_name: String, current_time: i64) -> Self {
        use uuid::Uuid;

        Self {
            record_id: Uuid::new_v4().to_string(),
            player_name,
            player_title: String::new(),
            coins: 1000,
            collection: Vec::new(),
            selected_creature_id: None,
            battle_rank_points: 0,
            royale_rank_points: 0,
            team_royale_rank_points: 0,
            last_save_time: current_time,
            play_time_seconds: 0,
        }
    }

    /// Rank points for a ladder.
    pub fn rank_points(&self, mode: RankMode) -> u32 {
        match mode {
            RankMode::Duel => self.battle_rank_points,
            RankMode::Royale => self.royale_rank_points,
            RankMode::TeamRoyale => self.team_royale_rank_points,
        }
    }

    pub fn set_rank_points(&mut self, mode: RankMode, points: u32) {
        match mode {
            RankMode::Duel => self.battle_rank_points = points,
            RankMode::Royale => self.royale_rank_points = points,
            RankMode::TeamRoyale => self.team_royale_rank_points = points,
        }
    }

    /// Derived rank for a ladder.
    pub fn rank(&self, mode: RankMode) -> RankInfo {
        rank_from_points(self.rank_points(mode))
    }

    /// The currently selected creature, if any.
    pub fn selected_creature(&self) -> Option<&CollectedCreature> {
        let id = self.selected_creature_id?;
        find_in_collection(&self.collection, id)
    }

    pub fn selected_creature_mut(&mut self) -> Option<&mut CollectedCreature> {
        let id = self.selected_creature_id?;
        find_in_collection_mut(&mut self.collection, id)
    }

    /// Spends coins if the balance covers it. Returns false (no mutation)
    /// on insufficient funds.
    pub fn spend_coins(&mut self, cost: u64) -> bool {
        if self.coins < cost {
            return false;
        }
        self.coins -= cost;
        true
    }

    pub fn add_coins(&mut self, amount: u64) {
        self.coins = self.coins.saturating_add(amount);
    }

    /// Stamps the record with the current time before a save.
    pub fn touch_save_time(&mut self) {
        self.last_save_time = now_timestamp();
    }
}
