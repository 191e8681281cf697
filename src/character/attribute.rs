//! The six ability scores

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SheetError;

/// An ability score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Attribute {
    /// All attributes in sheet order
    pub const ALL: [Attribute; 6] = [
        Attribute::Strength,
        Attribute::Dexterity,
        Attribute::Constitution,
        Attribute::Intelligence,
        Attribute::Wisdom,
        Attribute::Charisma,
    ];

    /// Key used in the character file
    pub fn key(&self) -> &'static str {
        match self {
            Attribute::Strength => "strength",
            Attribute::Dexterity => "dexterity",
            Attribute::Constitution => "constitution",
            Attribute::Intelligence => "intelligence",
            Attribute::Wisdom => "wisdom",
            Attribute::Charisma => "charisma",
        }
    }

    /// Display name on the sheet
    pub fn label(&self) -> &'static str {
        match self {
            Attribute::Strength => "Força",
            Attribute::Dexterity => "Destreza",
            Attribute::Constitution => "Constituição",
            Attribute::Intelligence => "Inteligência",
            Attribute::Wisdom => "Sabedoria",
            Attribute::Charisma => "Carisma",
        }
    }

    /// Three-letter abbreviation on the sheet
    pub fn short_label(&self) -> &'static str {
        match self {
            Attribute::Strength => "FOR",
            Attribute::Dexterity => "DES",
            Attribute::Constitution => "CON",
            Attribute::Intelligence => "INT",
            Attribute::Wisdom => "SAB",
            Attribute::Charisma => "CAR",
        }
    }
}

impl FromStr for Attribute {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strength" | "str" | "for" => Ok(Attribute::Strength),
            "dexterity" | "dex" | "des" => Ok(Attribute::Dexterity),
            "constitution" | "con" => Ok(Attribute::Constitution),
            "intelligence" | "int" => Ok(Attribute::Intelligence),
            "wisdom" | "wis" | "sab" => Ok(Attribute::Wisdom),
            "charisma" | "cha" | "car" => Ok(Attribute::Charisma),
            _ => Err(SheetError::UnknownAttribute(s.to_string())),
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// One value per attribute; all six are always present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttributeMap<T> {
    pub strength: T,
    pub dexterity: T,
    pub constitution: T,
    pub intelligence: T,
    pub wisdom: T,
    pub charisma: T,
}

impl<T> AttributeMap<T> {
    /// Build by calling `f` for each attribute
    pub fn from_fn(mut f: impl FnMut(Attribute) -> T) -> Self {
        Self {
            strength: f(Attribute::Strength),
            dexterity: f(Attribute::Dexterity),
            constitution: f(Attribute::Constitution),
            intelligence: f(Attribute::Intelligence),
            wisdom: f(Attribute::Wisdom),
            charisma: f(Attribute::Charisma),
        }
    }

    /// Value for an attribute
    pub fn get(&self, attr: Attribute) -> &T {
        match attr {
            Attribute::Strength => &self.strength,
            Attribute::Dexterity => &self.dexterity,
            Attribute::Constitution => &self.constitution,
            Attribute::Intelligence => &self.intelligence,
            Attribute::Wisdom => &self.wisdom,
            Attribute::Charisma => &self.charisma,
        }
    }

    /// Mutable value for an attribute
    pub fn get_mut(&mut self, attr: Attribute) -> &mut T {
        match attr {
            Attribute::Strength => &mut self.strength,
            Attribute::Dexterity => &mut self.dexterity,
            Attribute::Constitution => &mut self.constitution,
            Attribute::Intelligence => &mut self.intelligence,
            Attribute::Wisdom => &mut self.wisdom,
            Attribute::Charisma => &mut self.charisma,
        }
    }

    /// Iterate in sheet order
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, &T)> {
        Attribute::ALL.into_iter().map(move |a| (a, self.get(a)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_parsing() {
        assert_eq!("strength".parse::<Attribute>().unwrap(), Attribute::Strength);
        assert_eq!("DEX".parse::<Attribute>().unwrap(), Attribute::Dexterity);
        assert_eq!("sab".parse::<Attribute>().unwrap(), Attribute::Wisdom);
        assert!("luck".parse::<Attribute>().is_err());
    }

    #[test]
    fn test_attribute_map_access() {
        let mut scores = AttributeMap::from_fn(|_| 10);
        *scores.get_mut(Attribute::Wisdom) = 16;
        assert_eq!(*scores.get(Attribute::Wisdom), 16);
        assert_eq!(scores.wisdom, 16);

        let order: Vec<Attribute> = scores.iter().map(|(a, _)| a).collect();
        assert_eq!(order, Attribute::ALL.to_vec());
    }

    #[test]
    fn test_attribute_map_json_keys() {
        let scores = AttributeMap::from_fn(|a| a as i32);
        let json = serde_json::to_value(scores).unwrap();
        for attr in Attribute::ALL {
            assert!(json.get(attr.key()).is_some(), "missing {}", attr);
        }
    }
}
