//! Dice rolling
//!
//! - Dice notation parsing (e.g., "2d6+3")
//! - Expression rolls with a readable breakdown
//! - d20 checks with critical / critical-failure flags
//! - Damage rolls combining a damage field with a stat bonus
//!
//! Every roll has a `*_with` form taking an explicit RNG.

mod notation;
mod roll;

pub use notation::{normalize, parse_dice, DiceError, DiceRoll, MAX_DICE, MAX_SIDES};
pub use roll::{
    roll_check, roll_check_with, roll_damage, roll_damage_with, roll_expression,
    roll_expression_with, RollOutcome, RollResult, CHECK_DIE, PARSE_ERROR,
};
