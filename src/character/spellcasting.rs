//! Spellcasting block: slot counters and fixed-size spell lists

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Attribute;

/// Highest spell level
pub const MAX_SPELL_LEVEL: u8 = 9;

/// Number of spell-name lines on the sheet for a level (0 = cantrips)
pub fn spell_capacity(level: u8) -> usize {
    match level {
        0 => 8,
        1..=4 => 12,
        5..=7 => 11,
        _ => 8,
    }
}

/// Slot counters for one spell level, both free text
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotCounter {
    pub total: String,
    pub expended: String,
}

/// Spellcasting section of the sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spellcasting {
    /// Spellcasting class, free text
    pub class: String,
    /// Governing attribute for save DC and spell attacks
    pub ability: Attribute,
    /// Slot counters for levels 1..=9
    pub slots: BTreeMap<u8, SlotCounter>,
    /// Spell names for levels 0..=9, each exactly `spell_capacity(level)` long
    pub spells: BTreeMap<u8, Vec<String>>,
}

impl Default for Spellcasting {
    fn default() -> Self {
        let mut block = Self {
            class: String::new(),
            ability: Attribute::Intelligence,
            slots: BTreeMap::new(),
            spells: BTreeMap::new(),
        };
        block.normalize();
        block
    }
}

impl Spellcasting {
    /// Restore the fixed layout: slots 1..=9, spell lists 0..=9 at capacity
    ///
    /// Missing levels are added blank, out-of-range levels dropped, and each
    /// list padded with blanks or truncated to its capacity.
    pub fn normalize(&mut self) {
        self.slots.retain(|level, _| (1..=MAX_SPELL_LEVEL).contains(level));
        for level in 1..=MAX_SPELL_LEVEL {
            self.slots.entry(level).or_default();
        }

        self.spells.retain(|level, _| *level <= MAX_SPELL_LEVEL);
        for level in 0..=MAX_SPELL_LEVEL {
            let list = self.spells.entry(level).or_default();
            list.resize(spell_capacity(level), String::new());
        }
    }

    /// Named spells at a level, skipping blank lines
    pub fn known_spells(&self, level: u8) -> impl Iterator<Item = &str> {
        self.spells
            .get(&level)
            .into_iter()
            .flatten()
            .map(String::as_str)
            .filter(|name| !name.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacities() {
        let expected = [8, 12, 12, 12, 12, 11, 11, 11, 8, 8];
        for (level, cap) in expected.iter().enumerate() {
            assert_eq!(spell_capacity(level as u8), *cap, "level {}", level);
        }
    }

    #[test]
    fn test_default_layout() {
        let block = Spellcasting::default();
        assert_eq!(block.ability, Attribute::Intelligence);
        assert_eq!(block.slots.len(), 9);
        assert!(!block.slots.contains_key(&0));
        assert_eq!(block.spells.len(), 10);
        assert_eq!(block.spells[&0].len(), 8);
        assert_eq!(block.spells[&3].len(), 12);
        assert_eq!(block.spells[&9].len(), 8);
    }

    #[test]
    fn test_normalize_pads_and_truncates() {
        let mut block = Spellcasting::default();
        block.spells.insert(0, vec!["Luz".to_string()]);
        block.spells.insert(5, vec!["x".to_string(); 20]);
        block.spells.insert(12, vec![]);
        block.slots.insert(0, SlotCounter::default());

        block.normalize();

        assert_eq!(block.spells[&0].len(), 8);
        assert_eq!(block.spells[&0][0], "Luz");
        assert_eq!(block.spells[&5].len(), 11);
        assert!(!block.spells.contains_key(&12));
        assert!(!block.slots.contains_key(&0));
    }

    #[test]
    fn test_json_level_keys() {
        let block = Spellcasting::default();
        let json = serde_json::to_value(&block).unwrap();
        assert!(json["slots"].get("1").is_some());
        assert!(json["slots"].get("9").is_some());
        assert!(json["spells"].get("0").is_some());
        assert_eq!(json["ability"], "intelligence");

        let back: Spellcasting = serde_json::from_value(json).unwrap();
        assert_eq!(back, block);
    }

    #[test]
    fn test_known_spells() {
        let mut block = Spellcasting::default();
        if let Some(list) = block.spells.get_mut(&1) {
            list[0] = "Mísseis Mágicos".to_string();
            list[3] = "Escudo".to_string();
        }
        let names: Vec<&str> = block.known_spells(1).collect();
        assert_eq!(names, vec!["Mísseis Mágicos", "Escudo"]);
        assert_eq!(block.known_spells(2).count(), 0);
    }
}
