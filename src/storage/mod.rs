//! Character file export and import
//!
//! The file is the pretty-printed JSON document `{"profile": ..., "stats": ...}`.
//! Import replaces each top-level section wholesale when present and leaves
//! the in-memory character untouched when the document is rejected.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::character::{Character, Profile, Stats};
use crate::error::{Result, SheetError};

/// File name used when the character has no name
pub const DEFAULT_FILE_STEM: &str = "personagem";

/// Extension of exported files
pub const EXTENSION: &str = "json";

/// Sections found in an imported document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportedDocument {
    pub profile: Option<Profile>,
    pub stats: Option<Stats>,
}

impl ImportedDocument {
    /// Replace the sections present in the document; others stay as they are
    pub fn apply_to(self, character: &mut Character) {
        if let Some(profile) = self.profile {
            character.profile = profile;
        }
        if let Some(stats) = self.stats {
            character.stats = stats;
        }
    }

    /// Whether the document carried neither section
    pub fn is_empty(&self) -> bool {
        self.profile.is_none() && self.stats.is_none()
    }
}

/// Serialize a character as the pretty-printed (2-space) file body
pub fn to_json(character: &Character) -> Result<String> {
    Ok(serde_json::to_string_pretty(character)?)
}

/// Parse a character file body
///
/// Any valid JSON is accepted. A present, non-null `profile` or `stats` must
/// match the sheet layout or the whole document is rejected.
pub fn parse_document(text: &str) -> Result<ImportedDocument> {
    let value: Value = serde_json::from_str(text)?;

    let Value::Object(mut map) = value else {
        debug!("Character document is not an object; nothing to import");
        return Ok(ImportedDocument::default());
    };

    let profile = match map.remove("profile") {
        Some(Value::Null) | None => None,
        Some(v) => Some(serde_json::from_value::<Profile>(v)?),
    };

    let stats = match map.remove("stats") {
        Some(Value::Null) | None => None,
        Some(v) => {
            let mut stats: Stats = serde_json::from_value(v)?;
            stats.spellcasting.normalize();
            Some(stats)
        }
    };

    Ok(ImportedDocument { profile, stats })
}

/// Export file name for a character name
///
/// Path separators and control characters are dropped; a blank name falls
/// back to `fallback`.
pub fn export_filename(name: &str, fallback: &str) -> String {
    let stem: String = name
        .chars()
        .filter(|c| !matches!(c, '/' | '\\') && !c.is_control())
        .collect();
    let stem = stem.trim();

    let stem = if stem.is_empty() || stem.chars().all(|c| c == '.') {
        fallback
    } else {
        stem
    };
    format!("{}.{}", stem, EXTENSION)
}

/// Write a character to `path`
pub fn save_to(character: &Character, path: &Path) -> Result<()> {
    let body = to_json(character)?;
    fs::write(path, body).map_err(|source| SheetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Saved character {:?} to {}", character.profile.name, path.display());
    Ok(())
}

/// Export a character into `dir` under its derived file name
pub fn export(character: &Character, dir: &Path, fallback: &str) -> Result<PathBuf> {
    let path = dir.join(export_filename(&character.profile.name, fallback));
    save_to(character, &path)?;
    Ok(path)
}

/// Read and parse a character file
pub fn read_document(path: &Path) -> Result<ImportedDocument> {
    let text = fs::read_to_string(path).map_err(|source| SheetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_document(&text).inspect_err(|e| {
        warn!("Rejected character file {}: {}", path.display(), e);
    })
}

/// Load a character file on top of a blank character
pub fn load(path: &Path) -> Result<Character> {
    let document = read_document(path)?;
    let mut character = Character::default();
    document.apply_to(&mut character);
    info!("Loaded character {:?} from {}", character.profile.name, path.display());
    Ok(character)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{Attribute, Skill};
    use crate::rules::ProficiencyLevel;

    fn populated() -> Character {
        let mut c = Character::named("Aria Vento");
        c.profile.class_level = "Maga 3".to_string();
        c.profile.backstory = "Nasceu numa tempestade.\nFugiu.".to_string();
        c.stats.attributes.intelligence = 17;
        c.stats.proficiency_bonus = "2".to_string();
        c.stats.saving_throws.get_mut(Attribute::Wisdom).proficient = true;
        c.stats.skill_mut(Skill::Arcana).level = ProficiencyLevel::Expertise;
        c.stats.skill_mut(Skill::Stealth).override_value = "+7".to_string();
        c.stats.passive_perception = "14".to_string();
        c.stats.death_saves.failures = [true, false, false];
        c.stats.attacks[0].name = "Adaga".to_string();
        c.stats.attacks[0].damage = "1d4".to_string();
        c.stats.attacks[0].stat = Attribute::Dexterity;
        c.stats.spellcasting.ability = Attribute::Intelligence;
        c.stats.spellcasting.class = "Mago".to_string();
        if let Some(slot) = c.stats.spellcasting.slots.get_mut(&1) {
            slot.total = "4".to_string();
            slot.expended = "1".to_string();
        }
        if let Some(list) = c.stats.spellcasting.spells.get_mut(&0) {
            list[0] = "Raio de Fogo".to_string();
        }
        c
    }

    #[test]
    fn test_round_trip() {
        let original = populated();
        let json = to_json(&original).unwrap();

        let mut restored = Character::default();
        parse_document(&json).unwrap().apply_to(&mut restored);
        assert_eq!(restored, original);
    }

    #[test]
    fn test_pretty_two_space_indent() {
        let json = to_json(&Character::default()).unwrap();
        assert!(json.starts_with("{\n  \"profile\": {\n    \"name\""));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = parse_document("{ not json").unwrap_err();
        assert!(matches!(err, SheetError::InvalidDocument(_)));
    }

    #[test]
    fn test_wrong_shape_rejected() {
        let err = parse_document(r#"{"profile": {"name": 5}}"#).unwrap_err();
        assert!(matches!(err, SheetError::InvalidDocument(_)));
    }

    #[test]
    fn test_partial_document() {
        let doc = parse_document(r#"{"profile": {"name": "Só Perfil"}}"#).unwrap();
        assert!(doc.stats.is_none());

        let mut c = populated();
        let stats_before = c.stats.clone();
        doc.apply_to(&mut c);
        assert_eq!(c.profile.name, "Só Perfil");
        assert_eq!(c.profile.class_level, "");
        assert_eq!(c.stats, stats_before);
    }

    #[test]
    fn test_non_object_is_empty() {
        assert!(parse_document("[1, 2]").unwrap().is_empty());
        assert!(parse_document(r#"{"profile": null}"#).unwrap().is_empty());
    }

    #[test]
    fn test_import_normalizes_spell_lists() {
        let doc = parse_document(r#"{"stats": {"spellcasting": {"spells": {"1": ["Sono"]}}}}"#)
            .unwrap();
        let stats = doc.stats.unwrap();
        assert_eq!(stats.spellcasting.spells[&1].len(), 12);
        assert_eq!(stats.spellcasting.spells[&1][0], "Sono");
        assert_eq!(stats.spellcasting.spells[&0].len(), 8);
    }

    #[test]
    fn test_unknown_skill_key_rejected() {
        let err = parse_document(r#"{"stats": {"skills": {"juggling": {"proficient": true}}}}"#)
            .unwrap_err();
        assert!(matches!(err, SheetError::InvalidDocument(_)));
    }

    #[test]
    fn test_expertise_flag_alone_loads_as_expertise() {
        let doc = parse_document(
            r#"{"stats": {"skills": {"arcana": {"proficient": false, "expertise": true}}}}"#,
        )
        .unwrap();
        let stats = doc.stats.unwrap();
        assert_eq!(stats.skill(Skill::Arcana).level, ProficiencyLevel::Expertise);

        let mut c = Character::default();
        c.stats = stats;
        let json: Value = serde_json::from_str(&to_json(&c).unwrap()).unwrap();
        assert_eq!(json["stats"]["skills"]["arcana"]["proficient"], true);
        assert_eq!(json["stats"]["skills"]["arcana"]["expertise"], true);
    }

    #[test]
    fn test_inspiration_round_trip() {
        let mut c = populated();
        c.stats.inspiration = true;
        let json = to_json(&c).unwrap();

        let doc = parse_document(&json).unwrap();
        assert!(doc.stats.unwrap().inspiration);

        // files without the flag still import
        let doc = parse_document(r#"{"stats": {"proficiencyBonus": "3"}}"#).unwrap();
        assert!(!doc.stats.unwrap().inspiration);
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename("Aria", DEFAULT_FILE_STEM), "Aria.json");
        assert_eq!(export_filename("", DEFAULT_FILE_STEM), "personagem.json");
        assert_eq!(export_filename("   ", DEFAULT_FILE_STEM), "personagem.json");
        assert_eq!(export_filename("../x", DEFAULT_FILE_STEM), "..x.json");
        assert_eq!(export_filename("..", DEFAULT_FILE_STEM), "personagem.json");
        assert_eq!(export_filename("a/b\\c", DEFAULT_FILE_STEM), "abc.json");
    }
}
