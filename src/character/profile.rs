//! Character profile: identity and background text

use serde::{Deserialize, Serialize};

use crate::error::{Result, SheetError};

/// Free-text identity and background fields
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub class_level: String,
    pub background: String,
    pub player_name: String,
    pub race: String,
    pub alignment: String,
    pub xp: String,
    pub age: String,
    pub height: String,
    pub weight: String,
    pub eyes: String,
    pub skin: String,
    pub hair: String,
    pub appearance: String,
    pub backstory: String,
    pub allies_and_orgs: String,
    pub org_symbol: String,
    pub org_name: String,
    pub treasure: String,
    pub additional_features: String,
}

impl Profile {
    /// Field keys as they appear in the character file
    pub const FIELDS: [&'static str; 20] = [
        "name",
        "classLevel",
        "background",
        "playerName",
        "race",
        "alignment",
        "xp",
        "age",
        "height",
        "weight",
        "eyes",
        "skin",
        "hair",
        "appearance",
        "backstory",
        "alliesAndOrgs",
        "orgSymbol",
        "orgName",
        "treasure",
        "additionalFeatures",
    ];

    fn field_mut(&mut self, key: &str) -> Option<&mut String> {
        let field = match key {
            "name" => &mut self.name,
            "classLevel" => &mut self.class_level,
            "background" => &mut self.background,
            "playerName" => &mut self.player_name,
            "race" => &mut self.race,
            "alignment" => &mut self.alignment,
            "xp" => &mut self.xp,
            "age" => &mut self.age,
            "height" => &mut self.height,
            "weight" => &mut self.weight,
            "eyes" => &mut self.eyes,
            "skin" => &mut self.skin,
            "hair" => &mut self.hair,
            "appearance" => &mut self.appearance,
            "backstory" => &mut self.backstory,
            "alliesAndOrgs" => &mut self.allies_and_orgs,
            "orgSymbol" => &mut self.org_symbol,
            "orgName" => &mut self.org_name,
            "treasure" => &mut self.treasure,
            "additionalFeatures" => &mut self.additional_features,
            _ => return None,
        };
        Some(field)
    }

    /// Set a field by its file key
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        let field = self
            .field_mut(key)
            .ok_or_else(|| SheetError::UnknownProfileField(key.to_string()))?;
        *field = value.into();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_by_key() {
        let mut profile = Profile::default();
        profile.set("name", "Thorin").unwrap();
        profile.set("alliesAndOrgs", "Companhia").unwrap();
        assert_eq!(profile.name, "Thorin");
        assert_eq!(profile.allies_and_orgs, "Companhia");
        assert!(profile.set("shoeSize", "42").is_err());
    }

    #[test]
    fn test_fields_match_json_keys() {
        let json = serde_json::to_value(Profile::default()).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), Profile::FIELDS.len());
        for key in Profile::FIELDS {
            assert!(object.contains_key(key), "missing {}", key);
            assert!(Profile::default().set(key, "x").is_ok());
        }
    }
}
