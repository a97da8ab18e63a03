//! Replay a move list from the opening and print where it ends up.
//!
//! Usage:
//!   cargo run --bin replay -- --moves "B3-A4 C6-B5 A4xC6"
//!   cargo run --bin replay -- --red-first --moves "C6-D5" --list
//!
//! Exits with status 1 on the first move that cannot be played.

use std::env;

use draughts_cli::{
    apply_side_flag, describe_moves, describe_outcome, describe_status, play_notation,
};
use draughts_core::{GameConfig, GameState};

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  replay --moves \"B3-A4 C6-B5 ...\" [--red-first | --white-first]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --moves <list>     Whitespace-separated moves to apply");
    eprintln!("  --quiet            Only print the final position");
    eprintln!("  --list             Also print the legal moves at the end");
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut config = GameConfig::from_env();
    let mut moves_str: Option<String> = None;
    let mut quiet = false;
    let mut list = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--moves" => {
                i += 1;
                moves_str = Some(args.get(i).cloned().unwrap_or_default());
            }
            "--quiet" => quiet = true,
            "--list" => list = true,
            "-h" | "--help" => {
                print_usage();
                return;
            }
            other if apply_side_flag(&mut config, other) => {}
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let Some(moves_str) = moves_str else {
        eprintln!("Error: specify --moves");
        print_usage();
        std::process::exit(1);
    };

    let mut game = GameState::setup_with(config);
    for (n, text) in moves_str.split_whitespace().enumerate() {
        match play_notation(&mut game, text) {
            Ok(outcome) => {
                if !quiet {
                    println!("{:>3}. {}", n + 1, describe_outcome(&outcome));
                }
            }
            Err(e) => {
                eprintln!("Move {} ({}): {}", n + 1, text, e);
                println!("{}", game.board());
                println!("{}", describe_status(&game.status()));
                std::process::exit(1);
            }
        }
    }

    println!("{}", game.board());
    println!("{}", describe_status(&game.status()));
    if list && !game.is_over() {
        println!("{}", describe_moves(&game));
    }
}
