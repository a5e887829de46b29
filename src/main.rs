use log::info;
use std::env;
use std::time::Instant;

use gomoku_engine::config::Config;
use gomoku_engine::selfplay::{GameOutcome, SelfPlay};
use gomoku_engine::simple_profiler;

fn main() {
    // We default to 'info' level logging. But if the `RUST_LOG` environment variable is set,
    // we keep that value instead.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }

    env_logger::init();

    info!("Starting gomoku self-play...");

    // Load configuration once at startup
    let config = Config::load_or_default();
    let games = config.selfplay.games;
    let mut driver = SelfPlay::new(config);

    let start = Instant::now();
    for (game, record) in driver.run().iter().enumerate() {
        println!("Game {}/{}", game + 1, games);
        println!("{}", record.board);
        match record.outcome {
            GameOutcome::Win(player) => {
                println!("{} wins after {} plies\n", player, record.moves.len())
            }
            GameOutcome::Tie => println!("Tie after {} plies\n", record.moves.len()),
            GameOutcome::Unfinished => {
                println!("Stopped after {} plies with no result\n", record.moves.len())
            }
        }
    }

    simple_profiler::print_report(start.elapsed().as_millis() as u64);
}
