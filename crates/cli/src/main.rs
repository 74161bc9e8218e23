//! Kroppsresa CLI - goal timeline and progress statistics.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use kroppsresa_core::{BodyProfile, Gender, GoalProfile, ProfileId, StoredProfile};
use kroppsresa_storage::{JsonProfileStore, ProfileStore};
use kroppsresa_timeline::{ProgressStats, RatePolicy, Timeline, TimelineError, Trend};

#[derive(Parser)]
#[command(name = "kroppsresa")]
#[command(about = "Estimate how long a body-composition goal will take", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory for saved profiles
    #[arg(long, global = true, default_value = ".kroppsresa")]
    store: PathBuf,

    /// JSON file overriding the default rate policy
    #[arg(long, global = true)]
    policy: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate time to goal from measurements or a saved profile
    Estimate {
        /// Use a saved profile instead of measurements
        #[arg(long, conflicts_with_all = ["weight", "goal_weight"])]
        profile: Option<String>,
        #[command(flatten)]
        body: BodyArgs,
        #[command(flatten)]
        goal: GoalArgs,
    },
    /// Save a profile
    Save {
        #[command(flatten)]
        body: BodyArgs,
        #[command(flatten)]
        goal: GoalArgs,
        /// Reference to the before photo
        #[arg(long)]
        image: Option<String>,
    },
    /// List saved profiles
    List,
    /// Show a saved profile with statistics and timeline
    Show {
        /// Profile ID
        id: String,
    },
    /// Delete a saved profile
    Delete {
        /// Profile ID
        id: String,
    },
}

/// Current measurements. Zero means not provided.
#[derive(Args, Debug, Clone)]
struct BodyArgs {
    /// Height in cm
    #[arg(long, default_value_t = 0.0)]
    height: f64,
    /// Weight in kg
    #[arg(long, default_value_t = 0.0)]
    weight: f64,
    /// Fat mass in kg (not percent)
    #[arg(long, default_value_t = 0.0)]
    body_fat: f64,
    /// Muscle mass in kg
    #[arg(long, default_value_t = 0.0)]
    muscle_mass: f64,
    /// female, male or other
    #[arg(long, default_value = "other")]
    gender: Gender,
    /// Age in years
    #[arg(long, default_value_t = 0)]
    age: u32,
}

impl From<BodyArgs> for BodyProfile {
    fn from(args: BodyArgs) -> Self {
        BodyProfile {
            height_cm: args.height,
            weight_kg: args.weight,
            body_fat_kg: args.body_fat,
            muscle_mass_kg: args.muscle_mass,
            gender: args.gender,
            age_years: args.age,
        }
    }
}

/// Targets. Zero means not provided.
#[derive(Args, Debug, Clone)]
struct GoalArgs {
    /// Target weight in kg
    #[arg(long, default_value_t = 0.0)]
    goal_weight: f64,
    /// Target fat mass in kg
    #[arg(long, default_value_t = 0.0)]
    goal_body_fat: f64,
    /// Target muscle mass in kg
    #[arg(long, default_value_t = 0.0)]
    goal_muscle_mass: f64,
}

impl From<GoalArgs> for GoalProfile {
    fn from(args: GoalArgs) -> Self {
        GoalProfile {
            goal_weight_kg: args.goal_weight,
            goal_body_fat_kg: args.goal_body_fat,
            goal_muscle_mass_kg: args.goal_muscle_mass,
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let timeline = Timeline::with_policy(load_policy(cli.policy.as_deref())?)?;

    match cli.command {
        Commands::Estimate { profile, body, goal } => {
            let (user, goal) = match profile {
                Some(id) => {
                    let store = JsonProfileStore::new(&cli.store).await?;
                    let stored = load(&store, &id).await?;
                    (stored.user, stored.goal)
                }
                None => (BodyProfile::from(body), GoalProfile::from(goal)),
            };
            print_report(&mut io::stdout(), &timeline, &user, &goal)?;
        }
        Commands::Save { body, goal, image } => {
            let mut store = JsonProfileStore::new(&cli.store).await?;
            let user = BodyProfile::from(body);
            let goal = GoalProfile::from(goal);
            user.validate()?;
            goal.validate()?;

            let mut profile = StoredProfile::new(user, goal);
            if let Some(image) = image {
                profile = profile.with_image(image);
            }
            store.save_profile(&mut profile).await?;
            println!("Saved profile: {}", profile.id);
        }
        Commands::List => {
            let store = JsonProfileStore::new(&cli.store).await?;
            let profiles = store.list_profiles().await?;

            println!("Profiles ({})", profiles.len());
            for profile in profiles {
                println!(
                    "  {} | {:.1} kg -> {:.1} kg | {}",
                    profile.id,
                    profile.user.weight_kg,
                    profile.goal.goal_weight_kg,
                    profile.updated_at.format("%Y-%m-%d %H:%M"),
                );
            }
        }
        Commands::Show { id } => {
            let store = JsonProfileStore::new(&cli.store).await?;
            let profile = load(&store, &id).await?;

            println!("Profile: {}", profile.id);
            println!("  Height: {:.0} cm", profile.user.height_cm);
            println!(
                "  Weight: {:.1} kg (goal {:.1} kg)",
                profile.user.weight_kg,
                profile.goal.goal_weight_kg,
            );
            println!(
                "  Fat mass: {:.1} kg (goal {:.1} kg)",
                profile.user.body_fat_kg,
                profile.goal.goal_body_fat_kg,
            );
            println!(
                "  Muscle mass: {:.1} kg (goal {:.1} kg)",
                profile.user.muscle_mass_kg,
                profile.goal.goal_muscle_mass_kg,
            );
            println!("  Gender: {}", profile.user.gender.as_str());
            println!("  Age: {}", profile.user.age_years);
            if let Some(image) = &profile.original_image {
                println!("  Photo: {}", image);
            }
            println!("  Created: {}", profile.created_at);
            println!();
            print_report(&mut io::stdout(), &timeline, &profile.user, &profile.goal)?;
        }
        Commands::Delete { id } => {
            let mut store = JsonProfileStore::new(&cli.store).await?;
            store.delete_profile(parse_id(&id)?).await?;
            println!("Deleted profile: {}", id);
        }
    }

    Ok(())
}

fn load_policy(path: Option<&Path>) -> Result<RatePolicy> {
    let Some(path) = path else {
        return Ok(RatePolicy::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read policy file {}", path.display()))?;
    let policy = RatePolicy::from_json(&json)
        .with_context(|| format!("Failed to load policy file {}", path.display()))?;
    info!("Loaded rate policy from {}", path.display());
    Ok(policy)
}

fn parse_id(id: &str) -> Result<ProfileId> {
    id.parse().map_err(|_| anyhow::anyhow!("Invalid profile ID: {}", id))
}

async fn load(store: &JsonProfileStore, id: &str) -> Result<StoredProfile> {
    store
        .load_profile(parse_id(id)?)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Profile not found: {}", id))
}

fn print_report(
    out: &mut impl Write,
    timeline: &Timeline,
    user: &BodyProfile,
    goal: &GoalProfile,
) -> Result<()> {
    let projection = timeline
        .plan(user, goal)
        .context("No estimate available")?;
    let estimate = projection.estimate;

    writeln!(out, "Timeline: about {}", estimate)?;
    writeln!(
        out,
        "  Weeks: {}-{} ({} model)",
        estimate.min_weeks,
        estimate.max_weeks,
        projection.model.as_str(),
    )?;

    match ProgressStats::compute(user, goal) {
        Ok(stats) => {
            writeln!(
                out,
                "  Weight change: {} kg{}",
                stats.weight.signed(),
                marker(stats.weight.trend),
            )?;
            if let Some(fat) = stats.body_fat {
                writeln!(out, "  Fat mass: {} kg{}", fat.signed(), marker(fat.trend))?;
            }
            if let Some(muscle) = stats.muscle_mass {
                writeln!(out, "  Muscle mass: {} kg{}", muscle.signed(), marker(muscle.trend))?;
            }
            writeln!(
                out,
                "  BMI: {:.1} -> {:.1} ({}){}",
                stats.current_bmi,
                stats.goal_bmi,
                stats.bmi.signed(),
                marker(stats.bmi.trend),
            )?;
        }
        Err(TimelineError::MissingHeight) => debug!("No height given, skipping statistics"),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn marker(trend: Trend) -> &'static str {
    match trend {
        Trend::Favorable => "",
        Trend::Unfavorable => " (!)",
    }
}
