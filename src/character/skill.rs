//! Skill catalogue and per-skill state

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Attribute;
use crate::error::SheetError;
use crate::rules::ProficiencyLevel;

/// The eighteen sheet skills
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    Acrobatics,
    AnimalHandling,
    Arcana,
    Athletics,
    Deception,
    History,
    Insight,
    Intimidation,
    Investigation,
    Medicine,
    Nature,
    Perception,
    Performance,
    Persuasion,
    Religion,
    SleightOfHand,
    Stealth,
    Survival,
}

impl Skill {
    /// All skills in sheet order
    pub const ALL: [Skill; 18] = [
        Skill::Acrobatics,
        Skill::AnimalHandling,
        Skill::Arcana,
        Skill::Athletics,
        Skill::Deception,
        Skill::History,
        Skill::Insight,
        Skill::Intimidation,
        Skill::Investigation,
        Skill::Medicine,
        Skill::Nature,
        Skill::Perception,
        Skill::Performance,
        Skill::Persuasion,
        Skill::Religion,
        Skill::SleightOfHand,
        Skill::Stealth,
        Skill::Survival,
    ];

    /// Key used in the character file
    pub fn key(&self) -> &'static str {
        match self {
            Skill::Acrobatics => "acrobatics",
            Skill::AnimalHandling => "animal_handling",
            Skill::Arcana => "arcana",
            Skill::Athletics => "athletics",
            Skill::Deception => "deception",
            Skill::History => "history",
            Skill::Insight => "insight",
            Skill::Intimidation => "intimidation",
            Skill::Investigation => "investigation",
            Skill::Medicine => "medicine",
            Skill::Nature => "nature",
            Skill::Perception => "perception",
            Skill::Performance => "performance",
            Skill::Persuasion => "persuasion",
            Skill::Religion => "religion",
            Skill::SleightOfHand => "sleight_of_hand",
            Skill::Stealth => "stealth",
            Skill::Survival => "survival",
        }
    }

    /// Governing attribute
    pub fn attribute(&self) -> Attribute {
        match self {
            Skill::Athletics => Attribute::Strength,
            Skill::Acrobatics | Skill::SleightOfHand | Skill::Stealth => Attribute::Dexterity,
            Skill::Arcana
            | Skill::History
            | Skill::Investigation
            | Skill::Nature
            | Skill::Religion => Attribute::Intelligence,
            Skill::AnimalHandling
            | Skill::Insight
            | Skill::Medicine
            | Skill::Perception
            | Skill::Survival => Attribute::Wisdom,
            Skill::Deception | Skill::Intimidation | Skill::Performance | Skill::Persuasion => {
                Attribute::Charisma
            }
        }
    }

    /// Display name on the sheet
    pub fn label(&self) -> &'static str {
        match self {
            Skill::Acrobatics => "Acrobacia",
            Skill::AnimalHandling => "Adestrar Animais",
            Skill::Arcana => "Arcanismo",
            Skill::Athletics => "Atletismo",
            Skill::Deception => "Enganação",
            Skill::History => "História",
            Skill::Insight => "Intuição",
            Skill::Intimidation => "Intimidação",
            Skill::Investigation => "Investigação",
            Skill::Medicine => "Medicina",
            Skill::Nature => "Natureza",
            Skill::Perception => "Percepção",
            Skill::Performance => "Performance",
            Skill::Persuasion => "Persuasão",
            Skill::Religion => "Religião",
            Skill::SleightOfHand => "Prestidigitação",
            Skill::Stealth => "Furtividade",
            Skill::Survival => "Sobrevivência",
        }
    }
}

impl FromStr for Skill {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace([' ', '-'], "_");
        Skill::ALL
            .into_iter()
            .find(|skill| skill.key() == key)
            .ok_or_else(|| SheetError::UnknownSkill(s.to_string()))
    }
}

impl std::fmt::Display for Skill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Training and override for one skill row
///
/// Stored in the file as `{proficient, expertise, override}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "SkillRecord", into = "SkillRecord")]
pub struct SkillState {
    pub level: ProficiencyLevel,
    /// Raw override text; blank means computed
    pub override_value: String,
}

#[derive(Default, Serialize, Deserialize)]
#[serde(default)]
struct SkillRecord {
    proficient: bool,
    expertise: bool,
    #[serde(rename = "override")]
    override_value: String,
}

impl From<SkillRecord> for SkillState {
    fn from(r: SkillRecord) -> Self {
        Self {
            level: ProficiencyLevel::from_flags(r.proficient, r.expertise),
            override_value: r.override_value,
        }
    }
}

impl From<SkillState> for SkillRecord {
    fn from(s: SkillState) -> Self {
        Self {
            proficient: s.level.is_proficient(),
            expertise: s.level.is_expertise(),
            override_value: s.override_value,
        }
    }
}
