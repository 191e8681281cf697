//! Editing session
//!
//! A `SheetSession` owns one character for the length of an editing session
//! and applies discrete user events to it: field edits, proficiency toggles
//! and roll actions. Each call runs to completion; the derived values and
//! dice are computed from the current state on every call and never cached.
//! The most recent roll is kept for the roll notification and is never saved.

use rand::rngs::ThreadRng;
use rand::Rng;
use tracing::{debug, info};
use uuid::Uuid;

use crate::character::{spell_capacity, Attack, Attribute, Character, Skill, MAX_SPELL_LEVEL};
use crate::dice::{self, RollResult};
use crate::error::{Result, SheetError};
use crate::rules::{self, Derived, ProficiencyLevel};
use crate::storage;

/// One editing session over a character
#[derive(Debug)]
pub struct SheetSession<R = ThreadRng> {
    character: Character,
    last_roll: Option<RollResult>,
    rng: R,
}

impl SheetSession<ThreadRng> {
    /// Start a session rolling with the thread RNG
    pub fn new(character: Character) -> Self {
        Self::with_rng(character, rand::rng())
    }
}

impl Default for SheetSession<ThreadRng> {
    fn default() -> Self {
        Self::new(Character::default())
    }
}

impl<R: Rng> SheetSession<R> {
    /// Start a session with a specific RNG
    pub fn with_rng(character: Character, rng: R) -> Self {
        Self {
            character,
            last_roll: None,
            rng,
        }
    }

    /// The character being edited
    pub fn character(&self) -> &Character {
        &self.character
    }

    /// End the session and hand back the character
    pub fn into_character(self) -> Character {
        self.character
    }

    /// The most recent roll, if any
    pub fn last_roll(&self) -> Option<&RollResult> {
        self.last_roll.as_ref()
    }

    // --- Edits ---

    /// Set an ability score (not clamped)
    pub fn set_attribute(&mut self, attr: Attribute, score: i32) {
        debug!("Set {} to {}", attr, score);
        *self.character.stats.attributes.get_mut(attr) = score;
    }

    /// Set the proficiency bonus text
    pub fn set_proficiency_bonus(&mut self, text: impl Into<String>) {
        self.character.stats.proficiency_bonus = text.into();
    }

    /// Flip saving throw proficiency; returns the new state
    pub fn toggle_save_proficiency(&mut self, attr: Attribute) -> bool {
        let save = self.character.stats.saving_throws.get_mut(attr);
        save.proficient = !save.proficient;
        debug!("Saving throw {} proficient: {}", attr, save.proficient);
        save.proficient
    }

    /// Set the saving throw override text (blank clears it)
    pub fn set_save_override(&mut self, attr: Attribute, text: impl Into<String>) {
        self.character.stats.saving_throws.get_mut(attr).override_value = text.into();
    }

    /// Advance a skill's proficiency: none, proficient, expertise, none
    pub fn cycle_skill(&mut self, skill: Skill) -> ProficiencyLevel {
        let state = self.character.stats.skill_mut(skill);
        state.level = state.level.cycle();
        debug!("Skill {} now {:?}", skill, state.level);
        state.level
    }

    /// Set the skill override text (blank clears it)
    pub fn set_skill_override(&mut self, skill: Skill, text: impl Into<String>) {
        self.character.stats.skill_mut(skill).override_value = text.into();
    }

    /// Set the passive perception override text (blank clears it)
    pub fn set_passive_perception_override(&mut self, text: impl Into<String>) {
        self.character.stats.passive_perception = text.into();
    }

    /// Set the initiative override text (blank clears it)
    pub fn set_initiative_override(&mut self, text: impl Into<String>) {
        self.character.stats.combat.initiative = text.into();
    }

    /// Set or clear the inspiration mark
    pub fn set_inspiration(&mut self, inspired: bool) {
        self.character.stats.inspiration = inspired;
    }

    /// Edit an attack row in place
    pub fn update_attack(&mut self, id: &str, edit: impl FnOnce(&mut Attack)) -> Result<()> {
        let attack = self
            .character
            .stats
            .attack_mut(id)
            .ok_or_else(|| SheetError::AttackNotFound(id.to_string()))?;
        edit(attack);
        Ok(())
    }

    /// Append a blank attack row; returns its id
    pub fn add_attack(&mut self) -> String {
        let id = Uuid::new_v4().to_string();
        self.character.stats.attacks.push(Attack::blank(id.clone()));
        id
    }

    /// Remove an attack row
    pub fn remove_attack(&mut self, id: &str) -> Result<Attack> {
        let index = self
            .character
            .stats
            .attacks
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| SheetError::AttackNotFound(id.to_string()))?;
        Ok(self.character.stats.attacks.remove(index))
    }

    /// Set the spellcasting attribute
    pub fn set_spellcasting_ability(&mut self, attr: Attribute) {
        self.character.stats.spellcasting.ability = attr;
    }

    /// Set slot counters for a spell level (1..=9)
    pub fn set_spell_slot(
        &mut self,
        level: u8,
        total: impl Into<String>,
        expended: impl Into<String>,
    ) -> Result<()> {
        if !(1..=MAX_SPELL_LEVEL).contains(&level) {
            return Err(SheetError::InvalidSpellLevel(level));
        }
        let slot = self.character.stats.spellcasting.slots.entry(level).or_default();
        slot.total = total.into();
        slot.expended = expended.into();
        Ok(())
    }

    /// Write a spell name into a fixed line of a level's list
    pub fn set_spell(&mut self, level: u8, index: usize, name: impl Into<String>) -> Result<()> {
        if level > MAX_SPELL_LEVEL {
            return Err(SheetError::InvalidSpellLevel(level));
        }
        let capacity = spell_capacity(level);
        if index >= capacity {
            return Err(SheetError::InvalidSpellSlot { level, index });
        }

        let list = self.character.stats.spellcasting.spells.entry(level).or_default();
        list.resize(capacity, String::new());
        list[index] = name.into();
        Ok(())
    }

    /// Set a profile field by its file key
    pub fn set_profile_field(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        self.character.profile.set(key, value)
    }

    // --- Derived values ---

    /// Ability modifier
    pub fn ability_modifier(&self, attr: Attribute) -> i32 {
        self.character.modifier(attr)
    }

    /// Saving throw, with its override
    pub fn saving_throw(&self, attr: Attribute) -> Derived<i32> {
        let save = self.character.stats.saving_throws.get(attr);
        let computed = rules::saving_throw_value(
            self.character.score(attr),
            self.character.proficiency_bonus(),
            save.proficient,
        );
        Derived::new(computed, &save.override_value)
    }

    /// Skill value, with its override
    pub fn skill(&self, skill: Skill) -> Derived<i32> {
        let state = self.character.stats.skill(skill);
        let computed = rules::skill_value(
            self.character.score(skill.attribute()),
            self.character.proficiency_bonus(),
            state.level.is_proficient(),
            state.level.is_expertise(),
        );
        Derived::new(computed, &state.override_value)
    }

    /// Passive perception, with its override
    ///
    /// Built on the computed perception value; a perception skill override
    /// does not carry into it.
    pub fn passive_perception(&self) -> Derived<i32> {
        let perception = self.skill(Skill::Perception).computed;
        rules::passive_perception(&self.character.stats.passive_perception, perception)
    }

    /// Initiative, with its override
    pub fn initiative(&self) -> Derived<i32> {
        let computed = rules::initiative(self.character.score(Attribute::Dexterity));
        Derived::new(computed, &self.character.stats.combat.initiative)
    }

    /// Attack bonus of a row, with its override
    pub fn attack_bonus(&self, id: &str) -> Result<Derived<i32>> {
        let attack = self.find_attack(id)?;
        Ok(self.attack_bonus_of(attack))
    }

    fn attack_bonus_of(&self, attack: &Attack) -> Derived<i32> {
        let computed = rules::attack_bonus(
            self.character.score(attack.stat),
            self.character.proficiency_bonus(),
            attack.is_proficient,
        );
        Derived::new(computed, &attack.bonus)
    }

    /// Spell save DC
    pub fn spell_save_dc(&self) -> i32 {
        rules::spell_save_dc(self.character.proficiency_bonus(), self.spell_modifier())
    }

    /// Spell attack bonus
    pub fn spell_attack_bonus(&self) -> i32 {
        rules::spell_attack_bonus(self.character.proficiency_bonus(), self.spell_modifier())
    }

    fn spell_modifier(&self) -> i32 {
        self.character.modifier(self.character.stats.spellcasting.ability)
    }

    fn find_attack(&self, id: &str) -> Result<&Attack> {
        self.character
            .stats
            .attack(id)
            .ok_or_else(|| SheetError::AttackNotFound(id.to_string()))
    }

    // --- Rolls ---

    /// Roll an ability check
    pub fn roll_ability(&mut self, attr: Attribute) -> &RollResult {
        let modifier = self.ability_modifier(attr);
        self.check(modifier, format!("Teste de {}", attr.label()))
    }

    /// Roll a saving throw using its effective value
    pub fn roll_save(&mut self, attr: Attribute) -> &RollResult {
        let modifier = self.saving_throw(attr).effective();
        self.check(modifier, format!("Resistência de {}", attr.label()))
    }

    /// Roll a skill check using its effective value
    pub fn roll_skill(&mut self, skill: Skill) -> &RollResult {
        let modifier = self.skill(skill).effective();
        self.check(modifier, format!("Perícia: {}", skill.label()))
    }

    /// Roll initiative using its effective value
    pub fn roll_initiative(&mut self) -> &RollResult {
        let modifier = self.initiative().effective();
        self.check(modifier, "Iniciativa".to_string())
    }

    /// Roll to hit with an attack row
    pub fn roll_attack(&mut self, id: &str) -> Result<&RollResult> {
        let attack = self.find_attack(id)?;
        let modifier = self.attack_bonus_of(attack).effective();
        let label = format!("Ataque ({})", or_default(&attack.name, "Desarmado"));
        Ok(self.check(modifier, label))
    }

    /// Roll damage for an attack row; the stat bonus is the row attribute's modifier
    pub fn roll_damage(&mut self, id: &str) -> Result<&RollResult> {
        let attack = self.find_attack(id)?;
        let stat_bonus = self.character.modifier(attack.stat);
        let damage = attack.damage.clone();
        let label = or_default(&attack.name, "Ataque").to_string();

        let result = dice::roll_damage_with(&mut self.rng, &damage, stat_bonus, &label);
        Ok(self.record(result))
    }

    /// Roll a spell attack
    pub fn roll_spell_attack(&mut self, spell: &str) -> &RollResult {
        let modifier = self.spell_attack_bonus();
        self.check(modifier, format!("Ataque Mágico: {}", or_default(spell, "Magia")))
    }

    /// Roll a free-form dice expression
    pub fn roll_expression(&mut self, expression: &str) -> &RollResult {
        let outcome = dice::roll_expression_with(&mut self.rng, expression);
        self.record(RollResult::from_outcome(outcome, expression.trim()))
    }

    fn check(&mut self, modifier: i32, label: String) -> &RollResult {
        let result = dice::roll_check_with(&mut self.rng, modifier, label);
        self.record(result)
    }

    fn record(&mut self, result: RollResult) -> &RollResult {
        debug!("{}: {} ({})", result.label, result.total, result.breakdown);
        self.last_roll.insert(result)
    }

    // --- File ---

    /// Current character as the export file body
    pub fn export_json(&self) -> Result<String> {
        storage::to_json(&self.character)
    }

    /// Replace the character from an imported file body
    ///
    /// A rejected document leaves the character untouched.
    pub fn import_json(&mut self, text: &str) -> Result<()> {
        let document = storage::parse_document(text)?;
        info!(
            "Importing character (profile: {}, stats: {})",
            document.profile.is_some(),
            document.stats.is_some()
        );
        document.apply_to(&mut self.character);
        Ok(())
    }
}

fn or_default<'a>(text: &'a str, fallback: &'a str) -> &'a str {
    if text.is_empty() {
        fallback
    } else {
        text
    }
}
