use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common = 0,
    Uncommon = 1,
    Rare = 2,
    Epic = 3,
    Legendary = 4,
    Cosmic = 5,
}

impl Rarity {
    pub fn all() -> [Rarity; 6] {
        [
            Rarity::Common,
            Rarity::Uncommon,
            Rarity::Rare,
            Rarity::Epic,
            Rarity::Legendary,
            Rarity::Cosmic,
        ]
    }

    /// Returns the display name for this rarity tier.
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
            Rarity::Cosmic => "Cosmic",
        }
    }

    /// Zero-based tier index (Common = 0 .. Cosmic = 5).
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// The next rarity up, if any.
    pub fn next(&self) -> Option<Rarity> {
        match self {
            Rarity::Common => Some(Rarity::Uncommon),
            Rarity::Uncommon => Some(Rarity::Rare),
            Rarity::Rare => Some(Rarity::Epic),
            Rarity::Epic => Some(Rarity::Legendary),
            Rarity::Legendary => Some(Rarity::Cosmic),
            Rarity::Cosmic => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Water,
    Wind,
    Light,
    Dark,
    Divine,
}

impl Element {
    pub fn all() -> [Element; 6] {
        [
            Element::Fire,
            Element::Water,
            Element::Wind,
            Element::Light,
            Element::Dark,
            Element::Divine,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Element::Fire => "Fire",
            Element::Water => "Water",
            Element::Wind => "Wind",
            Element::Light => "Light",
            Element::Dark => "Dark",
            Element::Divine => "Divine",
        }
    }
}

/// What a skill fundamentally does. Detailed behavior for `Special` skills
/// lives in the effect table (combat::effects).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillKind {
    Attack,
    Defense,
    Special,
    Aoe,
    TeamHeal,
    Dot,
    Dodge,
}

/// Damage-over-time payload attached to a dot skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DotPayload {
    pub name: &'static str,
    pub damage: u32,
    pub duration: u32,
}

/// A skill as defined in the catalog. Immutable static data.
#[derive(Debug, Clone, Copy)]
pub struct Skill {
    pub id: u32,
    pub name: &'static str,
    /// Base damage; 0 for non-damaging skills.
    pub damage: u32,
    /// Cooldown in turns after use.
    pub cooldown: u32,
    pub kind: SkillKind,
    /// Maximum targets for aoe skills (None falls back to 3).
    pub max_targets: Option<u32>,
    /// Dot applied on hit for dot skills.
    pub dot: Option<DotPayload>,
}

impl Skill {
    /// Effective aoe target cap.
    pub fn target_cap(&self) -> u32 {
        self.max_targets.unwrap_or(crate::core::constants::DEFAULT_AOE_TARGETS)
    }
}

/// Base stat block shared by definitions and derived values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub power: u32,
    pub speed: u32,
    pub grip: u32,
}

impl Stats {
    pub fn total(&self) -> u32 {
        self.power + self.speed + self.grip
    }
}

/// A creature definition as shipped in the catalog. Immutable static data;
/// owned instances reference these by id.
#[derive(Debug, Clone)]
pub struct CreatureDefinition {
    pub id: u32,
    pub name: &'static str,
    pub rarity: Rarity,
    pub element: Element,
    pub base_stats: Stats,
    pub skill_ids: Vec<u32>,
    /// Definition this creature evolves into, if any.
    pub evolution_target_id: Option<u32>,
    /// Boss-exclusive creatures never appear in the gacha pool but remain
    /// resolvable by id for raid encounters.
    pub boss_exclusive: bool,
}
