//! Dice notation
//!
//! Parses and rolls notation like "2d6+3", "1d20", "4d6-2". Input is
//! case-insensitive and all whitespace is ignored, so "2 D6 + 3" is valid.

use std::str::FromStr;
use std::sync::LazyLock;

use rand::Rng;
use regex::{Captures, Regex};
use thiserror::Error;

/// Most dice a single expression may roll
pub const MAX_DICE: u32 = 1000;

/// Most sides a single die may have
pub const MAX_SIDES: u32 = 10_000;

/// `NdM` followed by a signed modifier
static WITH_MODIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)d([0-9]+)([+-][0-9]+)$").expect("valid dice regex")
});

/// Bare `NdM`
static BARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)d([0-9]+)$").expect("valid dice regex"));

/// Dice notation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    #[error("not dice notation: {0:?}")]
    Invalid(String),

    #[error("die sides must be at least 1")]
    ZeroSides,

    #[error("too many dice ({0} > {MAX_DICE})")]
    TooManyDice(u32),

    #[error("too many sides ({0} > {MAX_SIDES})")]
    TooManySides(u32),

    #[error("result out of range")]
    Overflow,
}

/// A parsed dice roll specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiceRoll {
    /// Number of dice to roll
    pub count: u32,
    /// Number of sides per die
    pub sides: u32,
    /// Signed modifier term, `None` when the notation had none
    pub modifier: Option<i32>,
}

impl DiceRoll {
    /// Create a new dice roll
    pub fn new(count: u32, sides: u32, modifier: Option<i32>) -> Self {
        Self {
            count,
            sides,
            modifier,
        }
    }

    /// Roll with the given RNG and return individual die results plus the dice sum
    ///
    /// The sum excludes the modifier.
    pub fn roll_detailed_with<R: Rng + ?Sized>(&self, rng: &mut R) -> (Vec<u32>, i32) {
        let mut results = Vec::with_capacity(self.count as usize);

        for _ in 0..self.count {
            results.push(rng.random_range(1..=self.sides));
        }

        // bounded by MAX_DICE * MAX_SIDES at parse time
        let sum: u32 = results.iter().sum();
        (results, sum as i32)
    }
}

impl FromStr for DiceRoll {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_dice(s)
    }
}

impl std::fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.modifier {
            Some(m) if m >= 0 => write!(f, "{}d{}+{}", self.count, self.sides, m),
            Some(m) => write!(f, "{}d{}{}", self.count, self.sides, m),
            None => write!(f, "{}d{}", self.count, self.sides),
        }
    }
}

/// Lowercase and drop every whitespace character
pub fn normalize(notation: &str) -> String {
    notation
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn group<'h>(caps: &Captures<'h>, index: usize) -> &'h str {
    caps.get(index).map_or("", |m| m.as_str())
}

/// Parse a dice notation string like "2d6+3"
///
/// The form with a modifier is tried first, then bare `NdM`.
pub fn parse_dice(notation: &str) -> Result<DiceRoll, DiceError> {
    let clean = normalize(notation);

    let (count, sides, modifier) = if let Some(caps) = WITH_MODIFIER.captures(&clean) {
        (group(&caps, 1), group(&caps, 2), Some(group(&caps, 3)))
    } else if let Some(caps) = BARE.captures(&clean) {
        (group(&caps, 1), group(&caps, 2), None)
    } else {
        return Err(DiceError::Invalid(notation.to_string()));
    };

    let count: u32 = count
        .parse()
        .map_err(|_| DiceError::Invalid(notation.to_string()))?;
    let sides: u32 = sides
        .parse()
        .map_err(|_| DiceError::Invalid(notation.to_string()))?;
    let modifier: Option<i32> = modifier
        .map(|m| m.parse().map_err(|_| DiceError::Overflow))
        .transpose()?;

    if sides == 0 {
        return Err(DiceError::ZeroSides);
    }
    if count > MAX_DICE {
        return Err(DiceError::TooManyDice(count));
    }
    if sides > MAX_SIDES {
        return Err(DiceError::TooManySides(sides));
    }

    // The dice sum fits; make sure adding the modifier does too
    let ceiling = (count * sides) as i32;
    ceiling
        .checked_add(modifier.unwrap_or(0))
        .ok_or(DiceError::Overflow)?;

    Ok(DiceRoll::new(count, sides, modifier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_parse_basic() {
        let roll = parse_dice("2d6").unwrap();
        assert_eq!(roll.count, 2);
        assert_eq!(roll.sides, 6);
        assert_eq!(roll.modifier, None);
    }

    #[test]
    fn test_parse_with_plus() {
        let roll = parse_dice("1d20+5").unwrap();
        assert_eq!(roll.count, 1);
        assert_eq!(roll.sides, 20);
        assert_eq!(roll.modifier, Some(5));
    }

    #[test]
    fn test_parse_with_minus() {
        let roll = parse_dice("3d8-2").unwrap();
        assert_eq!(roll.count, 3);
        assert_eq!(roll.sides, 8);
        assert_eq!(roll.modifier, Some(-2));
    }

    #[test]
    fn test_parse_inner_whitespace() {
        let roll = parse_dice("  2 d 10 + 3  ").unwrap();
        assert_eq!(roll, DiceRoll::new(2, 10, Some(3)));
    }

    #[test]
    fn test_parse_case_insensitive() {
        let roll = parse_dice("2D6+1").unwrap();
        assert_eq!(roll.count, 2);
        assert_eq!(roll.sides, 6);
    }

    #[test]
    fn test_parse_zero_count() {
        let roll = parse_dice("0d6+2").unwrap();
        assert_eq!(roll, DiceRoll::new(0, 6, Some(2)));
        let (dice, sum) = roll.roll_detailed_with(&mut StdRng::seed_from_u64(1));
        assert!(dice.is_empty());
        assert_eq!(sum, 0);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(parse_dice("abc"), Err(DiceError::Invalid(_))));
        assert!(parse_dice("2d").is_err());
        assert!(parse_dice("d6").is_err());
        assert!(parse_dice("1d6+1d4").is_err());
        assert!(parse_dice("1d20 adv").is_err());
        assert!(parse_dice("d%").is_err());
        assert!(parse_dice("").is_err());
        assert_eq!(parse_dice("2d0"), Err(DiceError::ZeroSides));
    }

    #[test]
    fn test_parse_limits() {
        assert_eq!(parse_dice("1001d6"), Err(DiceError::TooManyDice(1001)));
        assert_eq!(parse_dice("1d10001"), Err(DiceError::TooManySides(10001)));
        assert!(matches!(parse_dice("99999999999d6"), Err(DiceError::Invalid(_))));
        assert_eq!(
            parse_dice("1d99999999999"),
            Err(DiceError::Invalid("1d99999999999".to_string()))
        );
        assert_eq!(parse_dice("1d6+2147483647"), Err(DiceError::Overflow));
        assert_eq!(parse_dice("1d6+99999999999"), Err(DiceError::Overflow));
    }

    #[test]
    fn test_display() {
        assert_eq!(DiceRoll::new(2, 6, None).to_string(), "2d6");
        assert_eq!(DiceRoll::new(2, 6, Some(0)).to_string(), "2d6+0");
        assert_eq!(DiceRoll::new(1, 20, Some(5)).to_string(), "1d20+5");
        assert_eq!(DiceRoll::new(3, 8, Some(-2)).to_string(), "3d8-2");
    }

    #[test]
    fn test_detailed_roll() {
        let mut rng = StdRng::seed_from_u64(7);
        let roll = DiceRoll::new(3, 6, Some(2));
        let (dice, sum) = roll.roll_detailed_with(&mut rng);

        assert_eq!(dice.len(), 3);
        for d in &dice {
            assert!(*d >= 1 && *d <= 6);
        }
        assert_eq!(sum, dice.iter().sum::<u32>() as i32);
    }
}
