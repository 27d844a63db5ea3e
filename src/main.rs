mod athlete;
mod config;
mod domain;
mod error;
mod excel;
mod formulas;
mod level;
mod outcome;
mod percentage;
mod planner;
mod prescription;
mod progression;
mod scheme;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use crate::athlete::AthleteFile;
use crate::config::{EngineConfig, WeightUnit};
use crate::domain::{Lift, UserTrainingProfile, usable_one_rm};
use crate::excel::load_sessions;
use crate::formulas::OneRmFormula;
use crate::level::{infer_experience_level, with_inferred_level};
use crate::percentage::{
    ProfileAdjustment, TrainingGoal, percentage_for_scheme, rep_range_table, training_max,
};
use crate::planner::plan_sessions;
use crate::prescription::{audit_table, prescribe_all, recovery_rest_seconds};
use crate::progression::WeightSource;
use crate::scheme::SetScheme;

/// Progressive load prescription for strength training.
#[derive(Parser, Debug)]
#[command(name = "liftplan")]
#[command(about = "Working weights, set outcomes and linear progression for the main lifts")]
#[command(version)]
struct Args {
    /// Path to the engine configuration (JSON).
    /// Can also be set via LIFTPLAN_CONFIG environment variable.
    #[arg(long, global = true, value_name = "FILE", env = "LIFTPLAN_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct AthleteArgs {
    /// Path to the athlete file (JSON).
    /// Can also be set via LIFTPLAN_ATHLETE environment variable.
    #[arg(long, value_name = "FILE", env = "LIFTPLAN_ATHLETE")]
    athlete: PathBuf,

    /// Replace the declared experience level with the one the 1RMs support.
    #[arg(long)]
    infer_level: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate a 1RM from one set.
    Estimate {
        #[arg(long)]
        weight: f64,
        #[arg(long)]
        reps: u32,
        /// Overrides the configured formula.
        #[arg(long)]
        formula: Option<OneRmFormula>,
    },

    /// Show what a set scheme resolves to.
    Scheme {
        /// 6x3, 10x5, 15x5, 5x5 or custom.
        name: String,
        #[arg(long)]
        sets: Option<u32>,
        #[arg(long)]
        reps: Option<u32>,
    },

    /// Recommend working weights for every main lift.
    Prescribe {
        #[command(flatten)]
        athlete: AthleteArgs,
    },

    /// Print weights for 1-15 reps.
    Table {
        #[command(flatten)]
        athlete: AthleteArgs,
        /// Use the stored 1RM of this lift.
        #[arg(long, conflicts_with = "one_rm")]
        lift: Option<Lift>,
        /// Use this 1RM directly.
        #[arg(long)]
        one_rm: Option<f64>,
        /// Print the unadjusted strength curve.
        #[arg(long)]
        raw: bool,
    },

    /// Show the declared and the strength-derived experience level.
    Level {
        #[command(flatten)]
        athlete: AthleteArgs,
    },

    /// Evaluate a workout log and plan the next session of each exercise.
    Plan {
        #[command(flatten)]
        athlete: AthleteArgs,
        /// Path to the Excel workout log.
        /// Can also be set via LIFTPLAN_LOG environment variable.
        #[arg(long, value_name = "FILE", env = "LIFTPLAN_LOG")]
        log: PathBuf,
        /// Write raised 1RMs back to the athlete file.
        #[arg(long)]
        save: bool,
    },

    /// Check every percentage table cell against the 1RM estimator.
    Audit {
        #[arg(long, default_value = "100")]
        one_rm: f64,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    match args.command {
        Command::Estimate {
            weight,
            reps,
            formula,
        } => run_estimate(&config, weight, reps, formula),
        Command::Scheme { name, sets, reps } => {
            run_scheme(&name, sets, reps);
            Ok(())
        }
        Command::Prescribe { athlete } => run_prescribe(&config, &athlete),
        Command::Table {
            athlete,
            lift,
            one_rm,
            raw,
        } => run_table(&config, &athlete, lift, one_rm, raw),
        Command::Level { athlete } => run_level(&athlete),
        Command::Plan { athlete, log, save } => run_plan(&config, &athlete, &log, save),
        Command::Audit { one_rm } => {
            run_audit(one_rm);
            Ok(())
        }
    }
}

/// Loads the engine configuration, or the defaults when no file is given.
fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

/// Loads the athlete file and the profile every computation should use.
fn load_athlete(args: &AthleteArgs) -> Result<(AthleteFile, UserTrainingProfile)> {
    let athlete = AthleteFile::load(&args.athlete)
        .with_context(|| format!("Failed to load athlete from {}", args.athlete.display()))?;

    let profile = if args.infer_level {
        with_inferred_level(&athlete.profile, &athlete.one_rep_maxes)
    } else {
        athlete.profile.clone()
    };

    Ok((athlete, profile))
}

fn format_weight(weight: Option<f64>, unit: WeightUnit) -> String {
    match weight {
        Some(w) => format!("{} {}", w, unit.suffix()),
        None => "no recommendation yet".to_string(),
    }
}

fn run_estimate(
    config: &EngineConfig,
    weight: f64,
    reps: u32,
    formula: Option<OneRmFormula>,
) -> Result<()> {
    let formula = formula.unwrap_or(config.formula);

    match formula.estimate(weight, reps) {
        Some(one_rm) => println!(
            "Estimated 1RM ({:?}): {}",
            formula,
            format_weight(Some(one_rm), config.unit)
        ),
        None => println!("Outside estimation range (weight > 0, reps 1-36)"),
    }

    Ok(())
}

fn run_scheme(name: &str, sets: Option<u32>, reps: Option<u32>) {
    let scheme = SetScheme::resolve(name, sets, reps);
    let goal = TrainingGoal::for_scheme(&scheme);
    let (zone_low, zone_high) = goal.intensity_zone();

    println!("Scheme: {}", scheme);
    println!("Rest:   {} s between sets", recovery_rest_seconds(scheme.name));
    println!(
        "Goal:   {} ({:.0}-{:.0}% of 1RM)",
        goal.display_name(),
        zone_low * 100.0,
        zone_high * 100.0
    );
}

fn run_prescribe(config: &EngineConfig, args: &AthleteArgs) -> Result<()> {
    let (athlete, profile) = load_athlete(args)?;
    let scheme = athlete.scheme.resolve();

    println!();
    println!("=== Prescription ===");
    println!();
    println!(
        "Profile: {:?}, {} ({}), {}",
        profile.gender,
        profile.age,
        profile.age_band(),
        profile.experience_level
    );
    println!("Scheme:  {}", scheme);
    if let Some(fraction) = percentage_for_scheme(&profile, &scheme) {
        println!("Load:    {:.1}% of 1RM", fraction * 100.0);
    }
    println!();

    for prescription in prescribe_all(&athlete.one_rep_maxes, &profile, &scheme) {
        let base = athlete
            .one_rep_maxes
            .known(prescription.lift)
            .map(|one_rm| format!("(training max {:.0})", training_max(&profile, one_rm)))
            .unwrap_or_default();
        println!(
            "{:15} {:>22}  {}x{}  rest {} s  {}",
            prescription.lift.display_name(),
            format_weight(prescription.weight, config.unit),
            prescription.sets,
            prescription.reps,
            prescription.rest_seconds,
            base
        );
    }

    Ok(())
}

fn run_table(
    config: &EngineConfig,
    args: &AthleteArgs,
    lift: Option<Lift>,
    one_rm: Option<f64>,
    raw: bool,
) -> Result<()> {
    let (athlete, profile) = load_athlete(args)?;

    let one_rm = match (one_rm, lift) {
        (Some(value), _) => value,
        (None, Some(lift)) => athlete.one_rep_maxes.get(lift),
        (None, None) => bail!("either --lift or --one-rm is required"),
    };

    let Some(one_rm) = usable_one_rm(one_rm) else {
        println!("{}", format_weight(None, config.unit));
        return Ok(());
    };

    let scheme = athlete.scheme.resolve();
    let adjustment = if raw {
        ProfileAdjustment::none()
    } else {
        ProfileAdjustment::for_profile(&profile, scheme.name)
    };

    println!(
        "1RM {} adjusted by {:.3} for {}",
        format_weight(Some(one_rm), config.unit),
        adjustment.factor(),
        scheme.name
    );
    println!();
    for (reps, weight) in rep_range_table(one_rm, &adjustment) {
        println!("{:3} reps  {}", reps, format_weight(Some(weight), config.unit));
    }

    Ok(())
}

fn run_level(args: &AthleteArgs) -> Result<()> {
    let (athlete, _) = load_athlete(args)?;
    let inferred = infer_experience_level(&athlete.profile, &athlete.one_rep_maxes);

    println!("Declared level: {}", athlete.profile.experience_level);
    println!("Strength level: {}", inferred);
    if athlete.profile.bodyweight_kg.is_none() {
        println!("(bodyweight unknown, declared level kept)");
    }

    Ok(())
}

fn run_plan(config: &EngineConfig, args: &AthleteArgs, log: &Path, save: bool) -> Result<()> {
    let (mut athlete, profile) = load_athlete(args)?;
    let scheme = athlete.scheme.resolve();

    println!("Loading workout log from: {}", log.display());
    let sessions = load_sessions(log)
        .with_context(|| format!("Failed to load workout log from {}", log.display()))?;

    println!();
    println!("=== Session Plan ({}) ===", scheme);
    println!();
    println!("Sessions logged: {}", sessions.len());
    println!();

    let report = plan_sessions(&sessions, &profile, &scheme, &athlete.one_rep_maxes, config);

    for plan in &report.plans {
        let next = match plan.source {
            WeightSource::Progression | WeightSource::Prescription => {
                format_weight(Some(plan.next_weight), config.unit)
            }
            WeightSource::Unavailable => format_weight(None, config.unit),
        };
        let marker = if plan.all_met { "+" } else { "=" };
        println!(
            "{:30} {:3} sessions  last {}  {}/{} met {}  next {}",
            plan.key.to_string(),
            plan.sessions,
            plan.last_date,
            plan.met,
            plan.sets_logged,
            marker,
            next
        );
    }

    if report.raised.is_empty() {
        println!();
        println!("No 1RM changes");
        return Ok(());
    }

    println!();
    for lift in &report.raised {
        println!(
            "{} 1RM: {} -> {}",
            lift,
            format_weight(Some(athlete.one_rep_maxes.get(*lift)), config.unit),
            format_weight(Some(report.one_rep_maxes.get(*lift)), config.unit)
        );
    }

    if save {
        athlete.one_rep_maxes = report.one_rep_maxes;
        athlete
            .save(&args.athlete)
            .with_context(|| format!("Failed to save athlete to {}", args.athlete.display()))?;
        println!("Saved to {}", args.athlete.display());
    }

    Ok(())
}

fn run_audit(one_rm: f64) {
    let drifts = audit_table(one_rm);

    if drifts.is_empty() {
        println!("All table cells round-trip within 1 unit at 1RM {}", one_rm);
        return;
    }

    println!(
        "{} cells recover a 1RM more than 1 unit away from {}:",
        drifts.len(),
        one_rm
    );
    for drift in &drifts {
        println!(
            "{:?} {} {} {}: drift {:+}",
            drift.key.gender, drift.key.level, drift.key.band, drift.key.scheme, drift.drift
        );
    }
}
