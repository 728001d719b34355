//! Command-line front end: reads the current match from stdin, applies one edit, prints the result.
//! Run with: cargo run --bin tracker -- <command> [args]
//! Empty stdin starts from a fresh match. Player and set numbers are 1-based.
//! Env: RUST_LOG (log filter, default info), TRACKER_PRETTY=0 for compact JSON.

use chrono::Local;
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser, Subcommand};
use padel_match_tracker::{
    compute_standings, create_initial_state, ensure_data_integrity, export_file_name,
    export_scoreboard_csv, reset_state, update_name, update_score, update_team, MatchError,
    MatchState, ScoreField, MAX_NAME_LEN,
};
use std::io::Read;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "tracker")]
#[command(about = "Padel match tracker: apply one edit to the match read from stdin")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a fresh match
    New,
    /// Discard all results
    Reset,
    /// Rename a player (at most 20 characters are kept)
    Name {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=4))]
        player: u8,
        #[arg(default_value = "")]
        text: String,
    },
    /// Enter the first player's won or lost count for a set
    Score {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=3))]
        set: u8,
        field: ScoreField,
        /// Anything that is not a non-negative number counts as 0
        #[arg(default_value = "", allow_hyphen_values = true)]
        value: String,
    },
    /// Check (on) or uncheck (off) a player's team box for a set
    Team {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=4))]
        player: u8,
        #[arg(value_parser = clap::value_parser!(u8).range(1..=3))]
        set: u8,
        #[arg(value_parser = BoolishValueParser::new(), action = ArgAction::Set)]
        on: bool,
    },
    /// Ranking, ties and movement as JSON
    Standings,
    /// Results table as CSV
    Csv,
    /// Default backup file name for today
    ExportName,
}

/// What to print on success.
enum Output {
    State(MatchState),
    Text(String),
}

fn pretty_output() -> bool {
    std::env::var("TRACKER_PRETTY").map(|v| v != "0").unwrap_or(true)
}

/// 1-based command-line position to 0-based index.
fn index(position: u8) -> usize {
    usize::from(position) - 1
}

/// Names are capped at the input boundary.
fn truncate_name(text: &str) -> String {
    text.chars().take(MAX_NAME_LEN).collect()
}

/// Current match from stdin; absent input means a new match.
fn load_state() -> Result<MatchState, String> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .map_err(|e| format!("could not read stdin: {}", e))?;
    if input.trim().is_empty() {
        log::info!("No saved match on stdin, starting fresh");
        return Ok(create_initial_state());
    }
    let value: serde_json::Value = serde_json::from_str(&input).map_err(|e| {
        log::error!("Saved match is not JSON: {}", e);
        format!("stdin is not JSON: {}", e)
    })?;
    ensure_data_integrity(value).map_err(|e| {
        log::error!("Saved match rejected: {}", e);
        e.to_string()
    })
}

fn rejected(e: MatchError) -> String {
    log::warn!("Edit rejected: {}", e);
    e.to_string()
}

fn run(command: Command) -> Result<Output, String> {
    match command {
        Command::New => Ok(Output::State(create_initial_state())),
        Command::Reset => {
            log::info!("Resetting all results");
            Ok(Output::State(reset_state()))
        }
        Command::Name { player, text } => {
            let state =
                update_name(&load_state()?, index(player), &truncate_name(&text)).map_err(rejected)?;
            log::info!("Player {} renamed", player);
            Ok(Output::State(state))
        }
        Command::Score { set, field, value } => {
            let state = update_score(&load_state()?, index(set), field, &value).map_err(rejected)?;
            log::info!("Set {} {:?} updated", set, field);
            Ok(Output::State(state))
        }
        Command::Team { player, set, on } => {
            let state =
                update_team(&load_state()?, index(player), index(set), on).map_err(rejected)?;
            log::info!(
                "Player {} {} team in set {}",
                player,
                if on { "joined" } else { "left" },
                set
            );
            Ok(Output::State(state))
        }
        Command::Standings => {
            let standings = compute_standings(&load_state()?);
            let text = if pretty_output() {
                serde_json::to_string_pretty(&standings)
            } else {
                serde_json::to_string(&standings)
            }
            .map_err(|e| e.to_string())?;
            Ok(Output::Text(text))
        }
        Command::Csv => {
            let csv = export_scoreboard_csv(&load_state()?).map_err(|e| e.to_string())?;
            Ok(Output::Text(csv.trim_end().to_string()))
        }
        Command::ExportName => Ok(Output::Text(export_file_name(Local::now().date_naive()))),
    }
}

fn main() -> ExitCode {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let cli = Cli::parse();
    let output = match run(cli.command) {
        Ok(output) => output,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::FAILURE;
        }
    };

    let text = match output {
        Output::Text(text) => text,
        Output::State(mut state) => {
            // Saved states always carry the time of the save.
            state.touch();
            let encoded = if pretty_output() {
                serde_json::to_string_pretty(&state)
            } else {
                serde_json::to_string(&state)
            };
            match encoded {
                Ok(text) => text,
                Err(e) => {
                    log::error!("Could not encode match: {}", e);
                    return ExitCode::FAILURE;
                }
            }
        }
    };
    println!("{}", text);
    ExitCode::SUCCESS
}
