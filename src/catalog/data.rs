//! Static creature and skill definitions.
//!
//! The catalog is read-only: battle modes and the gacha resolve ids against
//! these tables and never mutate them.

use super::types::{CreatureDefinition, DotPayload, Element, Rarity, Skill, SkillKind, Stats};

/// Skill id of the only team heal that restores 100% of max hp.
pub const FULL_TEAM_HEAL_SKILL: u32 = 10;

/// Returns every skill in the game.
pub fn get_all_skills() -> Vec<Skill> {
    vec![
        Skill {
            id: 1,
            name: "Root Strike",
            damage: 80,
            cooldown: 0,
            kind: SkillKind::Attack,
            max_targets: None,
            dot: None,
        },
        Skill {
            id: 2,
            name: "Tangle Lash",
            damage: 100,
            cooldown: 1,
            kind: SkillKind::Attack,
            max_targets: None,
            dot: None,
        },
        Skill {
            id: 3,
            name: "Follicle Guard",
            damage: 0,
            cooldown: 2,
            kind: SkillKind::Defense,
            max_targets: None,
            dot: None,
        },
        Skill {
            id: 4,
            name: "Iron Scalp",
            damage: 0,
            cooldown: 3,
            kind: SkillKind::Defense,
            max_targets: None,
            dot: None,
        },
        Skill {
            id: 5,
            name: "Splitting Ends",
            damage: 60,
            cooldown: 2,
            kind: SkillKind::Aoe,
            max_targets: Some(3),
            dot: None,
        },
        Skill {
            id: 6,
            name: "Static Shock",
            damage: 120,
            cooldown: 2,
            kind: SkillKind::Attack,
            max_targets: None,
            dot: None,
        },
        Skill {
            id: 7,
            name: "Scorch Coil",
            damage: 40,
            cooldown: 3,
            kind: SkillKind::Dot,
            max_targets: None,
            dot: Some(DotPayload {
                name: "Burn",
                damage: 15,
                duration: 3,
            }),
        },
        Skill {
            id: 8,
            name: "Venom Root",
            damage: 30,
            cooldown: 3,
            kind: SkillKind::Dot,
            max_targets: None,
            dot: Some(DotPayload {
                name: "Poison",
                damage: 20,
                duration: 2,
            }),
        },
        Skill {
            id: 9,
            name: "Soothing Balm",
            damage: 0,
            cooldown: 4,
            kind: SkillKind::TeamHeal,
            max_targets: None,
            dot: None,
        },
        Skill {
            id: FULL_TEAM_HEAL_SKILL,
            name: "Blessed Spring",
            damage: 0,
            cooldown: 5,
            kind: SkillKind::TeamHeal,
            max_targets: None,
            dot: None,
        },
        Skill {
            id: 11,
            name: "Adrenal Surge",
            damage: 0,
            cooldown: 3,
            kind: SkillKind::Special,
            max_targets: None,
            dot: None,
        },
        Skill {
            id: 12,
            name: "Gale Step",
            damage: 0,
            cooldown: 3,
            kind: SkillKind::Special,
            max_targets: None,
            dot: None,
        },
        Skill {
            id: 13,
            name: "Binding Coil",
            damage: 0,
            cooldown: 4,
            kind: SkillKind::Special,
            max_targets: None,
            dot: None,
        },
        Skill {
            id: 14,
            name: "Nether Grip",
            damage: 0,
            cooldown: 5,
            kind: SkillKind::Special,
            max_targets: None,
            dot: None,
        },
        Skill {
            id: 15,
            name: "Second Wind",
            damage: 0,
            cooldown: 4,
            kind: SkillKind::Special,
            max_targets: None,
            dot: None,
        },
        Skill {
            id: 16,
            name: "Divine Mend",
            damage: 0,
            cooldown: 5,
            kind: SkillKind::Special,
            max_targets: None,
            dot: None,
        },
        Skill {
            id: 17,
            name: "Wildfire Bloom",
            damage: 0,
            cooldown: 4,
            kind: SkillKind::Special,
            max_targets: Some(3),
            dot: None,
        },
        Skill {
            id: 18,
            name: "Creeping Rot",
            damage: 0,
            cooldown: 4,
            kind: SkillKind::Special,
            max_targets: Some(3),
            dot: None,
        },
        Skill {
            id: 19,
            name: "All-Father Guard",
            damage: 0,
            cooldown: 6,
            kind: SkillKind::Dodge,
            max_targets: None,
            dot: None,
        },
        Skill {
            id: 20,
            name: "Reaper's Scythe",
            damage: 0,
            cooldown: 8,
            kind: SkillKind::Special,
            max_targets: None,
            dot: None,
        },
        Skill {
            id: 21,
            name: "Crushing Vice",
            damage: 150,
            cooldown: 3,
            kind: SkillKind::Attack,
            max_targets: None,
            dot: None,
        },
        Skill {
            id: 22,
            name: "Tempest Crown",
            damage: 90,
            cooldown: 4,
            kind: SkillKind::Aoe,
            max_targets: Some(4),
            dot: None,
        },
        Skill {
            id: 23,
            name: "Abyssal Chorus",
            damage: 70,
            cooldown: 3,
            kind: SkillKind::Aoe,
            max_targets: Some(3),
            dot: None,
        },
        Skill {
            id: 24,
            name: "Solar Lance",
            damage: 130,
            cooldown: 2,
            kind: SkillKind::Attack,
            max_targets: None,
            dot: None,
        },
        Skill {
            id: 25,
            name: "Umbral Fang",
            damage: 130,
            cooldown: 2,
            kind: SkillKind::Attack,
            max_targets: None,
            dot: None,
        },
    ]
}

/// Looks up a skill by id.
pub fn find_skill(id: u32) -> Option<Skill> {
    get_all_skills().into_iter().find(|s| s.id == id)
}

/// Returns every creature definition, boss-exclusive entries included.
pub fn get_all_creatures() -> Vec<CreatureDefinition> {
    fn def(
        id: u32,
        name: &'static str,
        rarity: Rarity,
        element: Element,
        (power, speed, grip): (u32, u32, u32),
        skill_ids: Vec<u32>,
        evolution_target_id: Option<u32>,
    ) -> CreatureDefinition {
        CreatureDefinition {
            id,
            name,
            rarity,
            element,
            base_stats: Stats { power, speed, grip },
            skill_ids,
            evolution_target_id,
            boss_exclusive: false,
        }
    }

    let mut defs = vec![
        // Commons
        def(1, "Sproutling", Rarity::Common, Element::Fire, (20, 15, 18), vec![1, 3, 7], Some(7)),
        def(2, "Dewdrop", Rarity::Common, Element::Water, (18, 18, 20), vec![1, 3, 9], Some(8)),
        def(3, "Whiskwind", Rarity::Common, Element::Wind, (16, 24, 14), vec![1, 12, 5], Some(9)),
        def(4, "Glimmer", Rarity::Common, Element::Light, (19, 17, 17), vec![1, 3, 15], Some(10)),
        def(5, "Soot Sprite", Rarity::Common, Element::Dark, (21, 14, 16), vec![1, 8, 3], Some(11)),
        def(6, "Mossback", Rarity::Common, Element::Water, (22, 12, 22), vec![2, 3, 9], None),
        // Uncommons
        def(7, "Emberwhisk", Rarity::Uncommon, Element::Fire, (28, 20, 22), vec![2, 7, 11], Some(12)),
        def(8, "Ripplemane", Rarity::Uncommon, Element::Water, (25, 24, 26), vec![2, 9, 3], Some(13)),
        def(9, "Zephyrtail", Rarity::Uncommon, Element::Wind, (23, 32, 18), vec![2, 12, 5], Some(14)),
        def(10, "Lumen Sprig", Rarity::Uncommon, Element::Light, (26, 22, 23), vec![2, 15, 3], Some(15)),
        def(11, "Duskvine", Rarity::Uncommon, Element::Dark, (29, 19, 21), vec![2, 8, 13], Some(16)),
        // Rares
        def(12, "Pyreclaw", Rarity::Rare, Element::Fire, (38, 27, 29), vec![6, 7, 17, 4], Some(17)),
        def(13, "Tidebinder", Rarity::Rare, Element::Water, (34, 30, 34), vec![21, 9, 13], Some(18)),
        def(14, "Galecrest", Rarity::Rare, Element::Wind, (31, 42, 25), vec![22, 12, 5], Some(19)),
        def(15, "Dawnpetal", Rarity::Rare, Element::Light, (35, 30, 30), vec![24, 15, 3], None),
        def(16, "Nightshade Coil", Rarity::Rare, Element::Dark, (39, 26, 28), vec![25, 8, 13], Some(20)),
        // Epics
        def(17, "Infernal Mane", Rarity::Epic, Element::Fire, (50, 36, 38), vec![6, 17, 21, 4], None),
        def(18, "Maelstrom Crown", Rarity::Epic, Element::Water, (45, 40, 45), vec![21, 9, 13, 16], None),
        def(19, "Stormveil", Rarity::Epic, Element::Wind, (42, 55, 33), vec![22, 12, 14], Some(23)),
        def(20, "Nocturne Bloom", Rarity::Epic, Element::Dark, (52, 34, 37), vec![25, 18, 16], Some(22)),
        // Legendaries
        def(21, "Solaris Yggdra", Rarity::Legendary, Element::Light, (64, 46, 48), vec![24, 10, 19], Some(24)),
        def(22, "Abysswalker", Rarity::Legendary, Element::Dark, (68, 42, 46), vec![25, 23, 20, 14], Some(25)),
        def(23, "Tempest Sovereign", Rarity::Legendary, Element::Wind, (58, 66, 40), vec![22, 6, 19, 4], None),
        // Cosmics
        def(24, "All-Father Root", Rarity::Cosmic, Element::Divine, (82, 58, 62), vec![24, 19, 20, 10], None),
        def(25, "Primordial Strand", Rarity::Cosmic, Element::Divine, (78, 64, 58), vec![21, 22, 16, 19], None),
    ];

    // Raid bosses: resolvable by id, absent from every gacha pool.
    defs.push(CreatureDefinition {
        id: 100,
        name: "Scalp Devourer",
        rarity: Rarity::Legendary,
        element: Element::Dark,
        base_stats: Stats {
            power: 90,
            speed: 35,
            grip: 70,
        },
        skill_ids: vec![5, 22, 13, 4],
        evolution_target_id: None,
        boss_exclusive: true,
    });
    defs.push(CreatureDefinition {
        id: 101,
        name: "Follicle Titan",
        rarity: Rarity::Cosmic,
        element: Element::Divine,
        base_stats: Stats {
            power: 105,
            speed: 40,
            grip: 85,
        },
        skill_ids: vec![21, 22, 14, 16],
        evolution_target_id: None,
        boss_exclusive: true,
    });

    defs
}

/// Looks up a creature definition by id. Boss-exclusive ids resolve here.
pub fn find(id: u32) -> Option<CreatureDefinition> {
    get_all_creatures().into_iter().find(|c| c.id == id)
}

/// All non-boss definitions of the given rarity.
pub fn filter_by_rarity(rarity: Rarity) -> Vec<CreatureDefinition> {
    get_all_creatures()
        .into_iter()
        .filter(|c| c.rarity == rarity && !c.boss_exclusive)
        .collect()
}

/// Every definition, boss-exclusive included.
pub fn all() -> Vec<CreatureDefinition> {
    get_all_creatures()
}

/// The gacha-eligible pool for a rarity (never boss-exclusive).
pub fn gacha_pool(rarity: Rarity) -> Vec<CreatureDefinition> {
    filter_by_rarity(rarity)
}

/// Boss-exclusive definitions, for raid encounter setup.
pub fn raid_bosses() -> Vec<CreatureDefinition> {
    get_all_creatures()
        .into_iter()
        .filter(|c| c.boss_exclusive)
        .collect()
}
