//! Derived-stat rules
//!
//! Pure functions that turn raw sheet data into displayed numbers:
//! - Ability modifiers and signed formatting
//! - Saving throws, skills and attack bonuses
//! - Passive perception, initiative
//! - Spell save DC and spell attack bonus
//!
//! Free-text numeric fields are coerced here and nowhere else. Sums saturate
//! at the `i32` bounds, since scores and bonuses come straight from user text.

mod derived;
mod proficiency;

pub use derived::Derived;
pub use proficiency::ProficiencyLevel;

/// Base value of a passive check
pub const PASSIVE_BASE: i32 = 10;

/// Base value of the spell save DC
pub const SPELL_DC_BASE: i32 = 8;

/// Ability modifier for a score: `floor((score - 10) / 2)`
///
/// Written as `floor(score / 2) - 5`, which cannot overflow for any score.
pub fn modifier(score: i32) -> i32 {
    score.div_euclid(2) - 5
}

/// Render a value with an explicit sign ("+0", "+5", "-3")
pub fn format_signed(n: i32) -> String {
    if n >= 0 {
        format!("+{}", n)
    } else {
        n.to_string()
    }
}

/// Saving throw value for an attribute score
pub fn saving_throw_value(score: i32, proficiency_bonus: i32, proficient: bool) -> i32 {
    modifier(score).saturating_add(if proficient { proficiency_bonus } else { 0 })
}

/// Skill value; expertise adds the proficiency bonus a second time
pub fn skill_value(score: i32, proficiency_bonus: i32, proficient: bool, expertise: bool) -> i32 {
    let prof = if proficient { proficiency_bonus } else { 0 };
    let exp = if expertise { proficiency_bonus } else { 0 };
    modifier(score).saturating_add(prof).saturating_add(exp)
}

/// Computed attack bonus for a weapon row
pub fn attack_bonus(score: i32, proficiency_bonus: i32, proficient: bool) -> i32 {
    saving_throw_value(score, proficiency_bonus, proficient)
}

/// Computed initiative (the Dexterity modifier)
pub fn initiative(dexterity: i32) -> i32 {
    modifier(dexterity)
}

/// Passive perception from the computed perception skill value
///
/// A non-empty override is used as-is, without the base of 10. An
/// override that does not parse falls back to the computed value.
pub fn passive_perception(override_value: &str, perception_skill_value: i32) -> Derived<i32> {
    Derived::new(PASSIVE_BASE.saturating_add(perception_skill_value), override_value)
}

/// Spell save DC: `8 + proficiency + spellcasting modifier`
pub fn spell_save_dc(proficiency_bonus: i32, spell_modifier: i32) -> i32 {
    SPELL_DC_BASE
        .saturating_add(proficiency_bonus)
        .saturating_add(spell_modifier)
}

/// Spell attack bonus: `proficiency + spellcasting modifier`
pub fn spell_attack_bonus(proficiency_bonus: i32, spell_modifier: i32) -> i32 {
    proficiency_bonus.saturating_add(spell_modifier)
}

/// Lenient integer parse for free-text numeric fields
///
/// Skips leading whitespace, accepts an optional sign and reads the leading
/// run of digits ("12abc" is 12, "+3" is 3). Returns `None` when no digits
/// are found or the value does not fit in an `i32`.
pub fn parse_int(text: &str) -> Option<i32> {
    let s = text.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude: i64 = digits[..end].parse().ok()?;
    let value = if negative { -magnitude } else { magnitude };
    i32::try_from(value).ok()
}

/// Coerce a free-text numeric field, falling back to `default`
pub fn parse_int_or_default(text: &str, default: i32) -> i32 {
    parse_int(text).unwrap_or(default)
}
