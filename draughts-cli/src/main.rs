//! Draughts in the terminal
//!
//! Two players share the keyboard. Moves are typed in notation:
//!   B3-A4    quiet move
//!   B3xD5    capture (the separator is cosmetic; B3-D5 works too)
//!
//! Commands: `moves` lists legal moves, `help`, `quit`.
//!
//! Usage:
//!   cargo run --bin play -- [--red-first | --white-first]

use std::env;
use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use log::{info, warn};

use draughts_cli::{
    apply_side_flag, describe_moves, describe_outcome, describe_status, play_notation,
};
use draughts_core::{GameConfig, GameState};

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  play [--red-first | --white-first]");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  DRAUGHTS_STARTING_PLAYER   white or red (flags take precedence)");
    eprintln!("  RUST_LOG                   log level, e.g. debug");
}

fn print_help() {
    println!("Enter a move like B3-A4 or B3xD5.");
    println!("  moves   list legal moves");
    println!("  board   show the board again");
    println!("  quit    leave the game");
}

fn main() {
    env_logger::init();

    let mut config = GameConfig::from_env();
    for arg in env::args().skip(1) {
        match arg.as_str() {
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
    }

    // Ctrl-C reports how far the game got before leaving
    let moves_played = Arc::new(AtomicU32::new(0));
    let counter = moves_played.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        let played = counter.load(Ordering::SeqCst);
        println!("\n\nInterrupted after {played} moves.");
        std::process::exit(130);
    }) {
        warn!("could not install Ctrl-C handler: {e}");
    }

    let mut game = GameState::setup_with(config);
    info!("new game, {} moves first", config.starting_player);

    println!("Draughts");
    println!("========");
    println!("Type `help` for commands.\n");
    println!("{}", game.board());
    println!("{}", describe_status(&game.status()));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if game.is_over() {
            break;
        }
        if game.status().stalled {
            let player = game.current_player();
            println!("{player} has no legal moves. The game cannot continue.");
            break;
        }

        print!("{}> ", game.current_player());
        if io::stdout().flush().is_err() {
            break;
        }
        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                eprintln!("Error reading input: {}", e);
                break;
            }
            None => break,
        };

        match line.trim() {
            "" => continue,
            "q" | "quit" | "exit" => break,
            "help" | "?" => print_help(),
            "moves" => println!("{}", describe_moves(&game)),
            "board" => {
                println!("{}", game.board());
                println!("{}", describe_status(&game.status()));
            }
            text => match play_notation(&mut game, text) {
                Ok(outcome) => {
                    moves_played.store(game.move_count(), Ordering::SeqCst);
                    println!("{}\n", describe_outcome(&outcome));
                    println!("{}", game.board());
                    println!("{}", describe_status(&game.status()));
                }
                Err(e) => println!("{}", e),
            },
        }
    }

    println!("\nFinal: {}", describe_status(&game.status()));
}
