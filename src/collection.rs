//! Owned creature instances and collection bookkeeping.

use crate::catalog;
use crate::catalog::types::CreatureDefinition;
use serde::{Deserialize, Serialize};

/// A creature the player owns. References its catalog definition by id;
/// level, exp, and duplicate count are the mutable parts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectedCreature {
    pub definition_id: u32,
    pub level: u32,
    pub exp: u32,
    /// Duplicate copies owned. Evolution drains this; a row drained to 0
    /// is retained rather than removed.
    pub count: u32,
    /// Flat stat bonus track earned by evolving into this creature (0-3).
    #[serde(default)]
    pub evolution_bonus: u32,
    /// Skill power bonus track earned by evolving into this creature (0-3).
    #[serde(default)]
    pub skill_bonus: u32,
}

impl CollectedCreature {
    /// A fresh level-1 holding of the given definition.
    pub fn new(definition_id: u32) -> Self {
        Self {
            definition_id,
            level: 1,
            exp: 0,
            count: 1,
            evolution_bonus: 0,
            skill_bonus: 0,
        }
    }

    /// Resolves the catalog definition backing this instance.
    pub fn definition(&self) -> Option<CreatureDefinition> {
        catalog::find(self.definition_id)
    }
}

/// Finds a holding by definition id.
pub fn find_in_collection(
    collection: &[CollectedCreature],
    definition_id: u32,
) -> Option<&CollectedCreature> {
    collection.iter().find(|c| c.definition_id == definition_id)
}

pub fn find_in_collection_mut(
    collection: &mut [CollectedCreature],
    definition_id: u32,
) -> Option<&mut CollectedCreature> {
    collection
        .iter_mut()
        .find(|c| c.definition_id == definition_id)
}

/// Adds one copy of the definition: increments an existing row or inserts
/// a fresh level-1 instance.
pub fn add_copy(collection: &mut Vec<CollectedCreature>, definition_id: u32) {
    match find_in_collection_mut(collection, definition_id) {
        Some(owned) => owned.count += 1,
        None => collection.push(CollectedCreature::new(definition_id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_holding_defaults() {
        let c = CollectedCreature::new(1);
        assert_eq!(c.level, 1);
        assert_eq!(c.exp, 0);
        assert_eq!(c.count, 1);
        assert_eq!(c.evolution_bonus, 0);
        assert_eq!(c.skill_bonus, 0);
    }

    #[test]
    fn test_add_copy_inserts_then_increments() {
        let mut collection = Vec::new();
        add_copy(&mut collection, 3);
        add_copy(&mut collection, 3);
        add_copy(&mut collection, 5);

        assert_eq!(collection.len(), 2);
        assert_eq!(find_in_collection(&collection, 3).unwrap().count, 2);
        assert_eq!(find_in_collection(&collection, 5).unwrap().count, 1);
    }

    #[test]
    fn test_definition_resolves() {
        let c = CollectedCreature::new(1);
        assert_eq!(c.definition().unwrap().name, "Sproutling");
    }

    #[test]
    fn test_serde_defaults_for_bonus_tracks() {
        // Older saves lack the bonus tracks.
        let json = r#"{"definition_id": 2, "level": 4, "exp": 30, "count": 6}"#;
        let c: CollectedCreature = serde_json::from_str(json).unwrap();
        assert_eq!(c.evolution_bonus, 0);
        assert_eq!(c.skill_bonus, 0);
    }
}
