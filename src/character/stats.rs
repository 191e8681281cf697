//! Game statistics: scores, proficiencies, combat block and inventory

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Attribute, AttributeMap, Skill, SkillState, Spellcasting};

/// Saving throw row for one attribute
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveState {
    pub proficient: bool,
    /// Raw override text; blank means computed
    #[serde(rename = "override")]
    pub override_value: String,
}

/// Hit points, all free text
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HitPoints {
    pub current: String,
    pub max: String,
    pub temp: String,
}

/// Hit dice, e.g. total "1d8", current "1"
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HitDice {
    pub total: String,
    pub current: String,
}

/// Death saving throw marks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeathSaves {
    pub successes: [bool; 3],
    pub failures: [bool; 3],
}

/// Armor class, initiative override and speed
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Combat {
    pub ac: String,
    /// Blank means the Dexterity modifier
    pub initiative: String,
    pub speed: String,
}

/// Coins by denomination, free text
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Money {
    pub cp: String,
    pub sp: String,
    pub ep: String,
    pub gp: String,
    pub pp: String,
}

/// One row of the attacks table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Attack {
    pub id: String,
    pub name: String,
    /// Attack bonus override; blank means computed
    pub bonus: String,
    /// Damage in dice notation ("1d8", "2d6+3") or a flat number
    pub damage: String,
    /// Damage type, free text
    #[serde(rename = "type")]
    pub damage_type: String,
    /// Governing attribute
    pub stat: Attribute,
    pub is_proficient: bool,
}

impl Default for Attack {
    fn default() -> Self {
        Self::blank("")
    }
}

impl Attack {
    /// Empty row with the sheet defaults (Strength, proficient)
    pub fn blank(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            bonus: String::new(),
            damage: String::new(),
            damage_type: String::new(),
            stat: Attribute::Strength,
            is_proficient: true,
        }
    }
}

/// Everything on the sheet except the profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Stats {
    pub attributes: AttributeMap<i32>,
    /// Free text, coerced to an integer (0 when blank) for calculations
    pub proficiency_bonus: String,
    pub inspiration: bool,
    pub saving_throws: AttributeMap<SaveState>,
    pub skills: BTreeMap<Skill, SkillState>,
    /// Override; blank means 10 + perception
    pub passive_perception: String,
    pub hp: HitPoints,
    pub hit_dice: HitDice,
    pub death_saves: DeathSaves,
    pub combat: Combat,
    pub attacks: Vec<Attack>,
    pub equipment: String,
    pub money: Money,
    pub traits: String,
    pub ideals: String,
    pub bonds: String,
    pub flaws: String,
    pub features: String,
    pub proficiencies_languages: String,
    pub spellcasting: Spellcasting,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            attributes: AttributeMap::from_fn(|_| 10),
            proficiency_bonus: "2".to_string(),
            inspiration: false,
            saving_throws: AttributeMap::default(),
            skills: Skill::ALL
                .into_iter()
                .map(|skill| (skill, SkillState::default()))
                .collect(),
            passive_perception: String::new(),
            hp: HitPoints {
                current: "10".to_string(),
                max: "10".to_string(),
                temp: String::new(),
            },
            hit_dice: HitDice {
                total: "1d8".to_string(),
                current: "1".to_string(),
            },
            death_saves: DeathSaves::default(),
            combat: Combat {
                ac: "10".to_string(),
                initiative: String::new(),
                speed: "9m".to_string(),
            },
            attacks: (1..=3).map(|n| Attack::blank(n.to_string())).collect(),
            equipment: String::new(),
            money: Money::default(),
            traits: String::new(),
            ideals: String::new(),
            bonds: String::new(),
            flaws: String::new(),
            features: String::new(),
            proficiencies_languages: String::new(),
            spellcasting: Spellcasting::default(),
        }
    }
}

impl Stats {
    /// Skill row, blank if the file did not carry it
    pub fn skill(&self, skill: Skill) -> SkillState {
        self.skills.get(&skill).cloned().unwrap_or_default()
    }

    /// Mutable skill row, created blank if missing
    pub fn skill_mut(&mut self, skill: Skill) -> &mut SkillState {
        self.skills.entry(skill).or_default()
    }

    /// Attack row by id
    pub fn attack(&self, id: &str) -> Option<&Attack> {
        self.attacks.iter().find(|a| a.id == id)
    }

    /// Mutable attack row by id
    pub fn attack_mut(&mut self, id: &str) -> Option<&mut Attack> {
        self.attacks.iter_mut().find(|a| a.id == id)
    }
}
