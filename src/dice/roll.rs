//! Roll actions and the "last roll" record
//!
//! Three entry points:
//! - `roll_expression`: any dice notation, silent "Erro" sentinel on failure
//! - `roll_check`: one d20 plus a modifier, with critical flags
//! - `roll_damage`: a weapon/spell damage field plus the stat bonus

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use tracing::debug;

use super::notation::{normalize, parse_dice, DiceRoll};
use crate::rules::format_signed;

/// Breakdown text of an expression that could not be parsed
pub const PARSE_ERROR: &str = "Erro";

/// Sides of the check die
pub const CHECK_DIE: u32 = 20;

/// Outcome of rolling a dice expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollOutcome {
    /// Dice sum plus modifier
    pub total: i32,
    /// Dice sum alone
    pub die_roll: i32,
    /// "[dice] +K", "[dice]" or "Erro"
    pub breakdown: String,
}

impl RollOutcome {
    /// The sentinel for unparseable input
    pub fn parse_error() -> Self {
        Self {
            total: 0,
            die_roll: 0,
            breakdown: PARSE_ERROR.to_string(),
        }
    }

    /// Whether this is the parse-failure sentinel
    pub fn is_error(&self) -> bool {
        self.breakdown == PARSE_ERROR
    }
}

/// The most recent roll, as shown by the roll notification
///
/// Never persisted; each roll action replaces the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollResult {
    pub total: i32,
    /// Raw die face for checks, dice sum for expressions
    pub die_roll: i32,
    pub modifier: i32,
    /// What was rolled ("Iniciativa", "Dano (Espada)")
    pub label: String,
    /// Natural 20 on a check
    pub crit: bool,
    /// Natural 1 on a check
    pub crit_fail: bool,
    pub timestamp: DateTime<Utc>,
    pub breakdown: String,
}

impl RollResult {
    /// Record for a free-form expression roll
    pub fn from_outcome(outcome: RollOutcome, label: impl Into<String>) -> Self {
        Self {
            modifier: outcome.total - outcome.die_roll,
            total: outcome.total,
            die_roll: outcome.die_roll,
            label: label.into(),
            crit: false,
            crit_fail: false,
            timestamp: Utc::now(),
            breakdown: outcome.breakdown,
        }
    }

    /// Whether the breakdown is the parse-failure sentinel
    pub fn is_error(&self) -> bool {
        self.breakdown == PARSE_ERROR
    }
}

impl std::fmt::Display for RollResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.label)?;
        write!(f, "{}  {}", self.total, self.breakdown)?;
        if self.crit {
            write!(f, "\nCRÍTICO!")?;
        }
        if self.crit_fail {
            write!(f, "\nFALHA CRÍTICA!")?;
        }
        Ok(())
    }
}

/// Roll a dice expression with the thread RNG
pub fn roll_expression(expression: &str) -> RollOutcome {
    roll_expression_with(&mut rand::rng(), expression)
}

/// Roll a dice expression
///
/// Never fails: input that is not `NdM`, `NdM+K` or `NdM-K` yields the
/// [`PARSE_ERROR`] sentinel with a zero total.
pub fn roll_expression_with<R: Rng + ?Sized>(rng: &mut R, expression: &str) -> RollOutcome {
    match parse_dice(expression) {
        Ok(dice) => roll_parsed(rng, &dice),
        Err(e) => {
            debug!("Rejected dice expression {:?}: {}", expression, e);
            RollOutcome::parse_error()
        }
    }
}

fn roll_parsed<R: Rng + ?Sized>(rng: &mut R, dice: &DiceRoll) -> RollOutcome {
    let (_, dice_total) = dice.roll_detailed_with(rng);

    let outcome = match dice.modifier {
        Some(k) => RollOutcome {
            total: dice_total + k,
            die_roll: dice_total,
            breakdown: format!("[{}] {}", dice_total, format_signed(k)),
        },
        None => RollOutcome {
            total: dice_total,
            die_roll: dice_total,
            breakdown: format!("[{}]", dice_total),
        },
    };

    debug!("Rolled {} = {}", dice, outcome.total);
    outcome
}

/// Roll a d20 check with the thread RNG
pub fn roll_check(modifier: i32, label: impl Into<String>) -> RollResult {
    roll_check_with(&mut rand::rng(), modifier, label)
}

/// Roll one d20 and add `modifier`
///
/// `crit` is set on a natural 20 and `crit_fail` on a natural 1, whatever
/// the modifier.
pub fn roll_check_with<R: Rng + ?Sized>(
    rng: &mut R,
    modifier: i32,
    label: impl Into<String>,
) -> RollResult {
    let die = rng.random_range(1..=CHECK_DIE) as i32;
    let label = label.into();
    debug!("{}: d20 rolled {} ({})", label, die, format_signed(modifier));

    RollResult {
        total: die.saturating_add(modifier),
        die_roll: die,
        modifier,
        label,
        crit: die == CHECK_DIE as i32,
        crit_fail: die == 1,
        timestamp: Utc::now(),
        breakdown: format!("[{}] {}", die, format_signed(modifier)),
    }
}

/// Roll a damage field with the thread RNG
pub fn roll_damage(damage: &str, stat_bonus: i32, label: &str) -> RollResult {
    roll_damage_with(&mut rand::rng(), damage, stat_bonus, label)
}

/// Roll a weapon or spell damage field
///
/// A field without `+`/`-` is plain dice and gets `stat_bonus` added on
/// top. A field with a sign is taken as a complete expression and gets no
/// extra bonus. A plain field whose dice total is zero and which is a bare
/// integer ("7") is flat damage.
pub fn roll_damage_with<R: Rng + ?Sized>(
    rng: &mut R,
    damage: &str,
    stat_bonus: i32,
    label: &str,
) -> RollResult {
    let complete = damage.contains('+') || damage.contains('-');

    let outcome = if complete {
        roll_expression_with(rng, damage)
    } else {
        let dice = roll_expression_with(rng, damage);
        match flat_damage(damage) {
            Some(flat) if dice.total == 0 => RollOutcome {
                total: flat,
                die_roll: 0,
                breakdown: flat.to_string(),
            },
            _ => RollOutcome {
                total: dice.total.saturating_add(stat_bonus),
                die_roll: dice.total,
                breakdown: format!("[{}] {}", dice.total, format_signed(stat_bonus)),
            },
        }
    };

    RollResult {
        total: outcome.total,
        die_roll: outcome.die_roll,
        modifier: if complete { 0 } else { stat_bonus },
        label: format!("Dano ({})", label),
        crit: false,
        crit_fail: false,
        timestamp: Utc::now(),
        breakdown: outcome.breakdown,
    }
}

/// A damage field holding only an unsigned integer literal
fn flat_damage(damage: &str) -> Option<i32> {
    let clean = normalize(damage);
    if clean.is_empty() || !clean.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    clean.parse().ok()
}
