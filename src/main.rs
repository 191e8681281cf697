//! sheetd - character sheet editor
//!
//! Each subcommand is one editing event against a character file: the file
//! is loaded into a session, the event applied, and edits written back.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use sheetd::character::{Attribute, Skill};
use sheetd::dice::RollResult;
use sheetd::rules::format_signed;
use sheetd::{storage, Config, SheetSession};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Character sheet editor
#[derive(Parser, Debug)]
#[command(name = "sheetd", version, about = "Edit character sheets and roll dice")]
struct Args {
    /// Config file (default: ./sheetd.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print roll results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a blank character file
    New {
        /// Character name (also the file name)
        #[arg(short, long, default_value = "")]
        name: String,
        /// Output path (default: <sheet_dir>/<name>.json)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Show derived values of a character
    Show { file: PathBuf },
    /// Roll a dice expression such as 2d6+3
    Roll { expression: String },
    /// Roll from the sheet: ability:ATTR, save:ATTR, skill:SKILL,
    /// initiative, attack:ID, damage:ID, spell[:NAME]
    Check { file: PathBuf, target: RollTarget },
    /// Set an ability score
    SetAttr {
        file: PathBuf,
        attribute: Attribute,
        #[arg(allow_negative_numbers = true)]
        score: i32,
    },
    /// Advance a skill: none, proficient, expertise
    CycleSkill { file: PathBuf, skill: Skill },
    /// Toggle saving throw proficiency
    ToggleSave { file: PathBuf, attribute: Attribute },
    /// Set an override (empty value clears it): save:ATTR, skill:SKILL,
    /// passive, initiative, attack:ID
    Override {
        file: PathBuf,
        field: OverrideField,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}

/// What a `check` rolls
#[derive(Debug, Clone)]
enum RollTarget {
    Ability(Attribute),
    Save(Attribute),
    Skill(Skill),
    Initiative,
    Attack(String),
    Damage(String),
    Spell(String),
}

impl FromStr for RollTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, arg) = s.split_once(':').unwrap_or((s, ""));
        let target = match kind {
            "ability" => RollTarget::Ability(arg.parse().map_err(|e| format!("{}", e))?),
            "save" => RollTarget::Save(arg.parse().map_err(|e| format!("{}", e))?),
            "skill" => RollTarget::Skill(arg.parse().map_err(|e| format!("{}", e))?),
            "initiative" => RollTarget::Initiative,
            "attack" => RollTarget::Attack(arg.to_string()),
            "damage" => RollTarget::Damage(arg.to_string()),
            "spell" => RollTarget::Spell(arg.to_string()),
            _ => return Err(format!("unknown roll target: {}", s)),
        };
        Ok(target)
    }
}

/// Which override an `override` sets
#[derive(Debug, Clone)]
enum OverrideField {
    Save(Attribute),
    Skill(Skill),
    PassivePerception,
    Initiative,
    Attack(String),
}

impl FromStr for OverrideField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, arg) = s.split_once(':').unwrap_or((s, ""));
        let field = match kind {
            "save" => OverrideField::Save(arg.parse().map_err(|e| format!("{}", e))?),
            "skill" => OverrideField::Skill(arg.parse().map_err(|e| format!("{}", e))?),
            "passive" => OverrideField::PassivePerception,
            "initiative" => OverrideField::Initiative,
            "attack" => OverrideField::Attack(arg.to_string()),
            _ => return Err(format!("unknown override field: {}", s)),
        };
        Ok(field)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load(args.config.as_deref()).context("Failed to load config")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match args.command {
        Command::New { name, out } => {
            let character = sheetd::Character::named(name);
            let path = match out {
                Some(path) => {
                    storage::save_to(&character, &path)?;
                    path
                }
                None => storage::export(&character, &config.sheet_dir, &config.default_name)?,
            };
            println!("{}", path.display());
        }
        Command::Show { file } => {
            let session = open(&file)?;
            print_sheet(&session);
        }
        Command::Roll { expression } => {
            let mut session = SheetSession::default();
            let result = session.roll_expression(&expression);
            print_roll(result, args.json)?;
        }
        Command::Check { file, target } => {
            let mut session = open(&file)?;
            let result = match target {
                RollTarget::Ability(attr) => session.roll_ability(attr),
                RollTarget::Save(attr) => session.roll_save(attr),
                RollTarget::Skill(skill) => session.roll_skill(skill),
                RollTarget::Initiative => session.roll_initiative(),
                RollTarget::Attack(id) => session.roll_attack(&id)?,
                RollTarget::Damage(id) => session.roll_damage(&id)?,
                RollTarget::Spell(name) => session.roll_spell_attack(&name),
            };
            print_roll(result, args.json)?;
        }
        Command::SetAttr {
            file,
            attribute,
            score,
        } => {
            let mut session = open(&file)?;
            session.set_attribute(attribute, score);
            println!(
                "{} {} ({})",
                attribute.label(),
                score,
                format_signed(session.ability_modifier(attribute))
            );
            save(session, &file)?;
        }
        Command::CycleSkill { file, skill } => {
            let mut session = open(&file)?;
            let level = session.cycle_skill(skill);
            println!(
                "{}: {:?} ({})",
                skill.label(),
                level,
                session.skill(skill).display()
            );
            save(session, &file)?;
        }
        Command::ToggleSave { file, attribute } => {
            let mut session = open(&file)?;
            let proficient = session.toggle_save_proficiency(attribute);
            println!(
                "Resistência de {}: {} ({})",
                attribute.label(),
                if proficient { "proficiente" } else { "sem proficiência" },
                session.saving_throw(attribute).display()
            );
            save(session, &file)?;
        }
        Command::Override { file, field, value } => {
            let mut session = open(&file)?;
            match field {
                OverrideField::Save(attr) => session.set_save_override(attr, value),
                OverrideField::Skill(skill) => session.set_skill_override(skill, value),
                OverrideField::PassivePerception => session.set_passive_perception_override(value),
                OverrideField::Initiative => session.set_initiative_override(value),
                OverrideField::Attack(id) => session.update_attack(&id, |a| a.bonus = value)?,
            }
            save(session, &file)?;
        }
    }

    Ok(())
}

fn open(file: &Path) -> Result<SheetSession> {
    if !file.exists() {
        bail!("Character file not found: {}", file.display());
    }
    let character = storage::load(file)
        .with_context(|| format!("Erro ao ler arquivo: {}", file.display()))?;
    Ok(SheetSession::new(character))
}

fn save(session: SheetSession, file: &Path) -> Result<()> {
    storage::save_to(&session.into_character(), file)
        .with_context(|| format!("Failed to write {}", file.display()))
}

fn print_roll(result: &RollResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        println!("{}", result);
    }
    Ok(())
}

fn print_sheet(session: &SheetSession) {
    let c = session.character();
    let name = if c.profile.name.is_empty() {
        "(sem nome)"
    } else {
        &c.profile.name
    };
    println!("{}  {}", name, c.profile.class_level);
    println!("Bônus de proficiência: {}", format_signed(c.proficiency_bonus()));
    println!();

    for attr in Attribute::ALL {
        println!(
            "{} {:>3} {:>3}   Resistência {:>3}",
            attr.short_label(),
            c.score(attr),
            format_signed(session.ability_modifier(attr)),
            session.saving_throw(attr).display()
        );
    }
    println!();

    for skill in Skill::ALL {
        let marker = match c.stats.skill(skill).level.multiplier() {
            0 => ' ',
            1 => '*',
            _ => '#',
        };
        println!(
            "{} {:>3} {} ({})",
            marker,
            session.skill(skill).display(),
            skill.label(),
            skill.attribute().short_label()
        );
    }
    println!();

    println!("Percepção passiva: {}", session.passive_perception().effective());
    println!("Iniciativa: {}", session.initiative().display());
    println!("CA: {}  Deslocamento: {}", c.stats.combat.ac, c.stats.combat.speed);
    println!(
        "PV: {}/{} (temp {})",
        c.stats.hp.current, c.stats.hp.max, c.stats.hp.temp
    );
    println!();

    for attack in &c.stats.attacks {
        if attack.name.is_empty() && attack.damage.is_empty() {
            continue;
        }
        let bonus = session
            .attack_bonus(&attack.id)
            .map(|d| d.display())
            .unwrap_or_default();
        println!(
            "[{}] {} {} {} {}",
            attack.id, attack.name, bonus, attack.damage, attack.damage_type
        );
    }

    let spellcasting = &c.stats.spellcasting;
    println!(
        "Magia ({}): CD {}  Ataque {}",
        spellcasting.ability.short_label(),
        session.spell_save_dc(),
        format_signed(session.spell_attack_bonus())
    );
    for level in spellcasting.spells.keys() {
        let names: Vec<&str> = spellcasting.known_spells(*level).collect();
        if !names.is_empty() {
            println!("  {}: {}", level, names.join(", "));
        }
    }
}
