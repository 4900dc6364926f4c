//! Command-line entry point for the Swiss Room tournament service
//!
//! Loads the match store from its JSON data file, runs one command against
//! it, and writes the store back when the command changed it.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use swiss_room::config::{AppConfig, FinalTieBreak};
use swiss_room::metrics::MetricsCollector;
use swiss_room::store::{InMemoryMatchStore, TournamentRegistry};
use swiss_room::types::{Pairing, PlayerId, StandingEntry, TournamentId};
use swiss_room::SwissTournament;
use tracing::{error, info};

/// Swiss Room - Swiss-system tournament standings and pairings
#[derive(Parser)]
#[command(
    name = "swiss-room",
    version,
    about = "Swiss-system tournament standings and pairing generator",
    long_about = "Swiss Room ranks tournament players by wins and opponent wins, and pairs \
                 rank-adjacent players for the next round, giving the top seed a bye when \
                 the player count is odd. State is kept in a JSON data file."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        global = true,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        global = true,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Data file override
    #[arg(long, global = true, value_name = "FILE", help = "Override store data file")]
    data: Option<PathBuf>,

    /// Final tie-break override
    #[arg(
        long,
        global = true,
        value_name = "RULE",
        help = "Order of fully tied players (player-id, name)"
    )]
    tie_break: Option<FinalTieBreak>,

    /// Print metrics after the command
    #[arg(long, global = true, help = "Print Prometheus metrics after the command")]
    print_metrics: bool,

    /// Enable debug mode
    #[arg(short, long, global = true, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate config and exit)
    #[arg(
        long,
        global = true,
        help = "Validate configuration and exit without touching the store"
    )]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Create a tournament, optionally enrolling registered players
    CreateTournament {
        #[arg(long)]
        name: String,
        #[arg(long = "player", value_name = "ID")]
        players: Vec<PlayerId>,
    },
    /// Register a player, optionally enrolling them in a tournament
    Register {
        #[arg(long)]
        name: String,
        #[arg(long, value_name = "ID")]
        tournament: Option<TournamentId>,
    },
    /// Enrol a registered player in a tournament
    Enroll {
        #[arg(long, value_name = "ID")]
        player: PlayerId,
        #[arg(long, value_name = "ID")]
        tournament: TournamentId,
    },
    /// Record a match outcome
    Report {
        #[arg(long, value_name = "ID")]
        tournament: TournamentId,
        #[arg(long, value_name = "ID")]
        winner: PlayerId,
        #[arg(long, value_name = "ID")]
        loser: PlayerId,
    },
    /// Show current standings
    Standings {
        #[arg(long, value_name = "ID")]
        tournament: TournamentId,
        #[arg(long, help = "Print as JSON")]
        json: bool,
    },
    /// Show next-round pairings
    Pairings {
        #[arg(long, value_name = "ID")]
        tournament: TournamentId,
        #[arg(long, help = "Print as JSON")]
        json: bool,
    },
    /// Count enrolled players
    Count {
        #[arg(long, value_name = "ID")]
        tournament: TournamentId,
    },
    /// Delete every match recorded for a tournament
    DeleteMatches {
        #[arg(long, value_name = "ID")]
        tournament: TournamentId,
    },
    /// Delete a tournament's players
    DeletePlayers {
        #[arg(long, value_name = "ID")]
        tournament: TournamentId,
    },
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from file or environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Some(data) = &args.data {
        config.store.data_file = data.clone();
    }

    if let Some(tie_break) = args.tie_break {
        config.standings.final_tie_break = tie_break;
    }

    swiss_room::config::validate_config(&config)?;
    Ok(config)
}

fn print_standings(standings: &[StandingEntry]) {
    println!(
        "{:>4}  {:>6}  {:<24} {:>4} {:>6} {:>7} {:>8}",
        "Rank", "ID", "Name", "Wins", "Losses", "Matches", "Opp wins"
    );
    for (rank, entry) in standings.iter().enumerate() {
        println!(
            "{:>4}  {:>6}  {:<24} {:>4} {:>6} {:>7} {:>8}",
            rank + 1,
            entry.player_id,
            entry.name,
            entry.wins,
            entry.losses(),
            entry.matches,
            entry.opponent_wins
        );
    }
}

fn print_pairings(pairings: &[Pairing]) {
    for (table, pairing) in pairings.iter().enumerate() {
        println!("Table {:>3}: {}", table + 1, pairing);
    }
}

/// Run one command; returns whether the store changed
fn run_command(
    command: Command,
    store: &InMemoryMatchStore,
    service: &SwissTournament,
) -> Result<bool> {
    match command {
        Command::CreateTournament { name, players } => {
            let tournament_id = store.create_tournament(&name, &players)?;
            println!("{}", tournament_id);
            Ok(true)
        }
        Command::Register { name, tournament } => {
            let player_id = store.register_player(&name)?;
            if let Some(tournament_id) = tournament {
                store.enroll_player(player_id, tournament_id)?;
            }
            println!("{}", player_id);
            Ok(true)
        }
        Command::Enroll { player, tournament } => {
            store.enroll_player(player, tournament)?;
            Ok(true)
        }
        Command::Report {
            tournament,
            winner,
            loser,
        } => {
            let record = service.record_match(tournament, winner, loser)?;
            println!("{}", record.id);
            Ok(true)
        }
        Command::Standings { tournament, json } => {
            let standings = service.compute_standings(tournament)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&standings)?);
            } else {
                print_standings(&standings);
            }
            Ok(false)
        }
        Command::Pairings { tournament, json } => {
            let pairings = service.generate_pairings(tournament)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&pairings)?);
            } else {
                print_pairings(&pairings);
            }
            Ok(false)
        }
        Command::Count { tournament } => {
            println!("{}", store.count_players(tournament)?);
            Ok(false)
        }
        Command::DeleteMatches { tournament } => {
            let removed = store.delete_matches(tournament)?;
            println!("{}", removed);
            Ok(true)
        }
        Command::DeletePlayers { tournament } => {
            let removed = store.delete_players(tournament)?;
            println!("{}", removed);
            Ok(true)
        }
    }
}

fn run(args: Args, config: AppConfig) -> Result<()> {
    let Some(command) = args.command else {
        bail!("No command given, see --help");
    };

    let data_file = &config.store.data_file;
    let store = Arc::new(InMemoryMatchStore::load(
        data_file,
        config.store.max_players_per_tournament,
    )?);
    let metrics = Arc::new(MetricsCollector::new()?);
    let service = SwissTournament::with_config(store.clone(), config.standings.clone())
        .with_metrics(metrics.clone());

    if run_command(command, &store, &service)? {
        store.save(data_file)?;
        info!("Saved store to {}", data_file.display());
    }

    if args.print_metrics {
        print!("{}", metrics.render()?);
    }

    Ok(())
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration (CLI args can override environment/config file)
    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if args.dry_run {
        info!("Configuration validation successful");
        info!("   Service: {}", config.service.name);
        info!("   Data file: {}", config.store.data_file.display());
        info!(
            "   Max players per tournament: {}",
            config.store.max_players_per_tournament
        );
        info!("   Final tie-break: {}", config.standings.final_tie_break);
        return Ok(());
    }

    if let Err(e) = run(args, config) {
        error!("{:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
