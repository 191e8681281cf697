//! Three-state skill proficiency

use serde::{Deserialize, Serialize};

/// Training level of a skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProficiencyLevel {
    /// Untrained
    #[default]
    None,
    /// Proficiency bonus applies once
    Proficient,
    /// Proficiency bonus applies twice
    Expertise,
}

impl ProficiencyLevel {
    /// Next state of the row toggle: none, proficient, expertise, none, ...
    pub fn cycle(self) -> Self {
        match self {
            ProficiencyLevel::None => ProficiencyLevel::Proficient,
            ProficiencyLevel::Proficient => ProficiencyLevel::Expertise,
            ProficiencyLevel::Expertise => ProficiencyLevel::None,
        }
    }

    /// How many times the proficiency bonus is added
    pub fn multiplier(self) -> i32 {
        match self {
            ProficiencyLevel::None => 0,
            ProficiencyLevel::Proficient => 1,
            ProficiencyLevel::Expertise => 2,
        }
    }

    /// Build from the persisted flag pair; expertise wins over the proficient flag
    pub fn from_flags(proficient: bool, expertise: bool) -> Self {
        if expertise {
            ProficiencyLevel::Expertise
        } else if proficient {
            ProficiencyLevel::Proficient
        } else {
            ProficiencyLevel::None
        }
    }

    /// Persisted `proficient` flag (true for expertise as well)
    pub fn is_proficient(self) -> bool {
        self != ProficiencyLevel::None
    }

    /// Persisted `expertise` flag
    pub fn is_expertise(self) -> bool {
        self == ProficiencyLevel::Expertise
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_period_three() {
        let start = ProficiencyLevel::default();
        assert_eq!(start, ProficiencyLevel::None);

        let one = start.cycle();
        let two = one.cycle();
        let three = two.cycle();
        assert_eq!(one, ProficiencyLevel::Proficient);
        assert_eq!(two, ProficiencyLevel::Expertise);
        assert_eq!(three, ProficiencyLevel::None);
    }

    #[test]
    fn test_flags() {
        assert_eq!(ProficiencyLevel::from_flags(false, false), ProficiencyLevel::None);
        assert_eq!(ProficiencyLevel::from_flags(true, false), ProficiencyLevel::Proficient);
        assert_eq!(ProficiencyLevel::from_flags(true, true), ProficiencyLevel::Expertise);
        assert_eq!(ProficiencyLevel::from_flags(false, true), ProficiencyLevel::Expertise);

        for level in [
            ProficiencyLevel::None,
            ProficiencyLevel::Proficient,
            ProficiencyLevel::Expertise,
        ] {
            let back = ProficiencyLevel::from_flags(level.is_proficient(), level.is_expertise());
            assert_eq!(back, level);
        }
    }

    #[test]
    fn test_multiplier() {
        assert_eq!(ProficiencyLevel::None.multiplier(), 0);
        assert_eq!(ProficiencyLevel::Proficient.multiplier(), 1);
        assert_eq!(ProficiencyLevel::Expertise.multiplier(), 2);
    }
}
