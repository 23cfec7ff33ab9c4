//! Fixed engine constants that are not balance-tuning knobs.

/// Save format version magic. Bump when the binary layout changes.
pub const SAVE_VERSION_MAGIC: u64 = 0x524F_4F54_0000_0001;

/// Duplicates consumed by one evolution.
pub const EVOLUTION_COST: u32 = 10;

/// Cap on the evolution and skill bonus tracks.
pub const BONUS_TRACK_CAP: u32 = 3;

/// Maximum creature level.
pub const MAX_LEVEL: u32 = 10;

/// Default target cap for aoe skills that do not declare one.
pub const DEFAULT_AOE_TARGETS: u32 = 3;

/// Participants in a solo battle royale.
pub const ROYALE_PARTICIPANTS: usize = 8;

/// Teams and members-per-team in a team royale.
pub const TEAM_COUNT: usize = 4;
pub const TEAM_SIZE: usize = 3;

/// Party size for a boss raid.
pub const RAID_PARTY_SIZE: usize = 5;

/// Buff name that grants a one-hit perfect dodge.
pub const PERFECT_GUARD_NAME: &str = "all-father-guard";

/// Buff name carrying the counter damage paired with the perfect guard.
pub const COUNTER_READY_NAME: &str = "counter-ready";
