// Standalone replay tool for analyzing gomoku debug logs
//
// Usage:
//   cargo run --bin replay -- <log_file> [options]
//
// Options:
//   --all                  Replay all plies
//   --plies <p1,p2>        Replay specific plies (comma-separated)
//   --validate <spec>      Check logged moves against expected ones
//   --verbose              Show detailed output for each ply
//   --config <path>        Path to Gomoku.toml (default: Gomoku.toml)

use std::env;
use std::process;

use gomoku_engine::config::Config;
use gomoku_engine::replay::ReplayEngine;
use gomoku_engine::types::Move;

enum Mode {
    All,
    Plies(String),
    Validate(String),
}

fn print_usage() {
    eprintln!("Gomoku Replay Tool");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  replay <log_file> [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --all                      Replay all plies in the log");
    eprintln!("  --plies <P1,P2,...>        Replay specific plies (comma-separated)");
    eprintln!("  --validate <P:r,c;...>     Validate expected moves (alternatives separated by '|')");
    eprintln!("  --verbose                  Show detailed output for each ply");
    eprintln!("  --config <path>            Path to Gomoku.toml (default: Gomoku.toml)");
    eprintln!("  --help                     Show this help message");
    eprintln!();
    eprintln!("EXAMPLES:");
    eprintln!("  # Replay all plies");
    eprintln!("  replay gomoku_debug.jsonl --all");
    eprintln!();
    eprintln!("  # Replay specific plies");
    eprintln!("  replay gomoku_debug.jsonl --plies 3,8,12");
    eprintln!();
    eprintln!("  # Validate expected moves");
    eprintln!("  replay gomoku_debug.jsonl --validate \"0:7,7;5:6,8|8,6\"");
}

fn parse_plies(s: &str) -> Result<Vec<usize>, String> {
    s.split(',')
        .map(|p| {
            p.trim()
                .parse::<usize>()
                .map_err(|e| format!("Invalid ply number '{}': {}", p, e))
        })
        .collect()
}

fn parse_expected_moves(s: &str) -> Result<Vec<(usize, Vec<Move>)>, String> {
    s.split(';')
        .filter(|pair| !pair.trim().is_empty())
        .map(|pair| {
            let (ply, moves) = pair
                .trim()
                .split_once(':')
                .ok_or_else(|| format!("Invalid format '{}'. Expected 'ply:row,col'", pair))?;

            let ply = ply
                .trim()
                .parse::<usize>()
                .map_err(|e| format!("Invalid ply number '{}': {}", ply, e))?;

            // Several acceptable moves separated by '|'
            let moves: Result<Vec<Move>, String> =
                moves.split('|').map(|m| m.trim().parse::<Move>()).collect();

            Ok((ply, moves?))
        })
        .collect()
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.iter().any(|a| a == "--help") {
        print_usage();
        process::exit(if args.iter().any(|a| a == "--help") { 0 } else { 1 });
    }

    let log_file = &args[1];
    let mut config_path = "Gomoku.toml".to_string();
    let mut verbose = false;
    let mut mode = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--all" => {
                mode = Some(Mode::All);
            }
            "--plies" | "--validate" | "--config" => {
                let Some(value) = args.get(i + 1) else {
                    eprintln!("Error: {} requires an argument", args[i]);
                    process::exit(1);
                };
                match args[i].as_str() {
                    "--plies" => mode = Some(Mode::Plies(value.clone())),
                    "--validate" => mode = Some(Mode::Validate(value.clone())),
                    _ => config_path = value.clone(),
                }
                i += 1;
            }
            "--verbose" => {
                verbose = true;
            }
            _ => {
                eprintln!("Error: Unknown option '{}'", args[i]);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let Some(mode) = mode else {
        eprintln!("Error: Must specify --all, --plies, or --validate");
        print_usage();
        process::exit(1);
    };

    let config = Config::from_file(&config_path).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from '{}': {}", config_path, e);
        eprintln!("Using default configuration");
        Config::default_hardcoded()
    });

    println!("Loaded configuration from: {}", config_path);
    println!("Replay log file: {}", log_file);
    println!();

    let engine = ReplayEngine::new(config, verbose);

    let entries = match engine.load_log_file(log_file) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Error loading log file: {}", e);
            process::exit(1);
        }
    };

    if entries.is_empty() {
        eprintln!("Error: Log file is empty");
        process::exit(1);
    }

    println!("Loaded {} log entries\n", entries.len());

    match mode {
        Mode::All => {
            println!("Replaying all {} plies...\n", entries.len());
            let results = engine.replay_all(&entries);
            engine.print_report(&results);
        }
        Mode::Plies(arg) => {
            let plies = match parse_plies(&arg) {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("Error parsing plies: {}", e);
                    process::exit(1);
                }
            };

            println!("Replaying {} specific ply(s)...\n", plies.len());
            match engine.replay_plies(&entries, &plies) {
                Ok(results) => engine.print_report(&results),
                Err(e) => {
                    eprintln!("Error during replay: {}", e);
                    process::exit(1);
                }
            }
        }
        Mode::Validate(arg) => {
            let expected_moves = match parse_expected_moves(&arg) {
                Ok(m) => m,
                Err(e) => {
                    eprintln!("Error parsing expected moves: {}", e);
                    process::exit(1);
                }
            };

            println!("Validating {} expected move(s)...\n", expected_moves.len());
            match engine.validate_expected_moves(&entries, &expected_moves) {
                Ok(()) => println!("✓ All expected moves validated successfully!"),
                Err(e) => {
                    eprintln!("✗ Validation failed: {}", e);
                    process::exit(1);
                }
            }
        }
    }
}
