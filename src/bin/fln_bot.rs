//! Play one FLN half-round on a fresh scenario and print the result as JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use colonial_twilight::bot::FlnBot;
use colonial_twilight::cards::card;
use colonial_twilight::core::{GameContext, GameOptions, Scenario};
use colonial_twilight::rules::{possible_actions, ActionChoice, Player};
use serde_json::json;
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

/// FLN bot for Colonial Twilight
#[derive(Parser, Debug)]
#[command(name = "fln-bot")]
#[command(about = "Let the FLN bot play one half-round and dump the turn log")]
struct Args {
    /// JSON file with game options; flags override it
    #[arg(long)]
    options: Option<PathBuf>,

    /// Random seed for dice and tie-breaks
    #[arg(long)]
    seed: Option<u64>,

    /// Scenario to set up
    #[arg(long, value_enum)]
    scenario: Option<ScenarioArg>,

    /// What the first eligible faction did; omit when the FLN is first
    #[arg(long, value_enum)]
    previous: Option<ChoiceArg>,

    /// Card in play
    #[arg(long)]
    card: Option<u8>,

    /// Debug logging unless RUST_LOG says otherwise
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ScenarioArg {
    Short,
    Medium,
    Full,
}

impl From<ScenarioArg> for Scenario {
    fn from(arg: ScenarioArg) -> Self {
        match arg {
            ScenarioArg::Short => Scenario::Short,
            ScenarioArg::Medium => Scenario::Medium,
            ScenarioArg::Full => Scenario::Full,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ChoiceArg {
    Event,
    OpSpecial,
    OpOnly,
    OpLimited,
    Pass,
}

impl From<ChoiceArg> for ActionChoice {
    fn from(arg: ChoiceArg) -> Self {
        match arg {
            ChoiceArg::Event => ActionChoice::Event,
            ChoiceArg::OpSpecial => ActionChoice::OpSpecial,
            ChoiceArg::OpOnly => ActionChoice::OpOnly,
            ChoiceArg::OpLimited => ActionChoice::OpLimited,
            ChoiceArg::Pass => ActionChoice::Pass,
        }
    }
}

fn load_options(args: &Args) -> Result<GameOptions, Box<dyn std::error::Error>> {
    let mut options = match &args.options {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => GameOptions::default(),
    };
    if let Some(seed) = args.seed {
        options = options.with_seed(seed);
    }
    if let Some(scenario) = args.scenario {
        options = options.with_scenario(scenario.into());
    }
    Ok(options)
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let options = load_options(args)?;
    let mut ctx = GameContext::new(options)?;
    if let Some(num) = args.card {
        ctx.card = Some(card(num)?);
    }

    let previous = args.previous.map(ActionChoice::from);
    if previous == Some(ActionChoice::Event) {
        ctx.card = None;
    }
    let possible = possible_actions(previous);
    let conducted = FlnBot.play(&mut ctx, previous, &possible)?;

    let report = json!({
        "conducted": conducted.to_string(),
        "cost": ctx.turn.cost(),
        "resources": ctx.board.fln_resources(),
        "actions": ctx.turn.actions().iter().map(ToString::to_string).collect::<Vec<_>>(),
        "snapshot": ctx.snapshot(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if args.verbose { "debug" } else { "info" }));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "half-round failed");
            ExitCode::FAILURE
        }
    }
}
