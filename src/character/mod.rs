//! Character data model
//!
//! The character-state store: everything the sheet holds, in the shape of
//! the exported JSON document (`{"profile": ..., "stats": ...}`).
//! Numeric-looking fields the user types into stay strings; the rules module
//! coerces them when computing.

mod attribute;
mod profile;
mod skill;
mod spellcasting;
mod stats;

pub use attribute::{Attribute, AttributeMap};
pub use profile::Profile;
pub use skill::{Skill, SkillState};
pub use spellcasting::{spell_capacity, SlotCounter, Spellcasting, MAX_SPELL_LEVEL};
pub use stats::{Attack, Combat, DeathSaves, HitDice, HitPoints, Money, SaveState, Stats};

use serde::{Deserialize, Serialize};

use crate::rules;

/// A full character sheet
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Character {
    pub profile: Profile,
    pub stats: Stats,
}

impl Character {
    /// A blank character named `name`
    pub fn named(name: impl Into<String>) -> Self {
        let mut character = Self::default();
        character.profile.name = name.into();
        character
    }

    /// Proficiency bonus as a number (0 when blank or not numeric)
    pub fn proficiency_bonus(&self) -> i32 {
        rules::parse_int_or_default(&self.stats.proficiency_bonus, 0)
    }

    /// Score of an attribute
    pub fn score(&self, attr: Attribute) -> i32 {
        *self.stats.attributes.get(attr)
    }

    /// Modifier of an attribute
    pub fn modifier(&self, attr: Attribute) -> i32 {
        rules::modifier(self.score(attr))
    }
}
