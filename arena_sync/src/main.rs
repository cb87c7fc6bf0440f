//! Command-line driver for the arena scheduling engine.
//!
//! Reads JSON records, runs the bracket builder or the slot synchronizers on
//! them and prints the result as JSON on stdout. Logs go to stderr.

mod config;
mod snapshot;

use std::io::Write;
use std::path::PathBuf;

use anyhow::Error;
use arena_scheduler::{
    BracketBuilder, BracketLayout, Participant, ReservationSlot, find_conflicts,
};
use config::{Overrides, SyncConfig};
use log::info;
use pico_args::Arguments;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use snapshot::{Snapshot, read_json};

const HELP: &str = "\
Generate tournament brackets and synchronize arena reservation slots

USAGE:
  arena_sync <COMMAND> [OPTIONS]

COMMANDS:
  bracket      Build a single-elimination bracket from a participant list
  sync         Synchronize classes, tournaments and events into a slot list
  conflicts    Report overlapping slots on the same court

OPTIONS:
  --input      PATH        JSON input file (all commands)
  --category   ID          Category of the bracket (bracket)
  --seed       N           Seed for a reproducible draw (bracket)  [default: random]
  --sub-slot-minutes N     Class sub-slot length (sync)  [default: env ARENA_SUB_SLOT_MINUTES or 60]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  ARENA_SUB_SLOT_MINUTES       Class sub-slot length in minutes
  ARENA_DEFAULT_MATCH_MINUTES  Match length when the court has none configured
  ARENA_HORIZON_MONTHS         Expansion horizon for classes without end date
  ARENA_PLACEHOLDER_LABEL      Label for a match side not decided yet
  RUST_LOG                     Log filter (e.g., info, debug)
";

enum Command {
    Bracket {
        input: PathBuf,
        category: String,
        seed: Option<u64>,
    },
    Sync {
        input: PathBuf,
        overrides: Overrides,
    },
    Conflicts {
        input: PathBuf,
    },
}

fn parse_args() -> Result<Command, Error> {
    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let command = match pargs.subcommand()?.as_deref() {
        Some("bracket") => Command::Bracket {
            input: pargs.value_from_str("--input")?,
            category: pargs.value_from_str("--category")?,
            seed: pargs.opt_value_from_str("--seed")?,
        },
        Some("sync") => Command::Sync {
            input: pargs.value_from_str("--input")?,
            overrides: Overrides {
                sub_slot_minutes: pargs.opt_value_from_str("--sub-slot-minutes")?,
            },
        },
        Some("conflicts") => Command::Conflicts {
            input: pargs.value_from_str("--input")?,
        },
        Some(other) => anyhow::bail!("Unknown command: {other}\n\n{HELP}"),
        None => anyhow::bail!("Missing command\n\n{HELP}"),
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        anyhow::bail!("Unexpected arguments: {remaining:?}");
    }

    Ok(command)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Error> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

fn run_bracket(input: PathBuf, category: String, seed: Option<u64>) -> Result<(), Error> {
    let participants: Vec<Participant> = read_json(&input)?;
    let rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

    if let Some(layout) = BracketLayout::for_entrants(
        participants.iter().filter(|p| !p.waitlisted).count(),
    ) {
        info!(
            "Drawing {} entrants into a bracket of {} ({} byes, {} rounds)",
            layout.entrants, layout.bracket_size, layout.bye_count, layout.rounds
        );
    }

    let bracket = BracketBuilder::with_rng(rng)
        .build_bracket(&participants, &category)
        .map_err(|e| anyhow::anyhow!("Failed to build bracket: {}", e))?;

    print_json(&bracket)
}

fn run_sync(input: PathBuf, overrides: Overrides) -> Result<(), Error> {
    let config = SyncConfig::from_env(&overrides)?;
    config.validate()?;

    let snapshot = Snapshot::load(&input)?;
    let report = snapshot.synchronize(config.scheduler);

    print_json(&report)
}

fn run_conflicts(input: PathBuf) -> Result<(), Error> {
    let slots: Vec<ReservationSlot> = read_json(&input)?;
    let conflicts = find_conflicts(&slots);
    info!(
        "Checked {} slots, found {} conflicts",
        slots.len(),
        conflicts.len()
    );

    print_json(&conflicts)
}

fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    env_logger::builder().format_target(false).init();

    match parse_args()? {
        Command::Bracket {
            input,
            category,
            seed,
        } => run_bracket(input, category, seed),
        Command::Sync { input, overrides } => run_sync(input, overrides),
        Command::Conflicts { input } => run_conflicts(input),
    }
}
