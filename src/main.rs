use anyhow::Result;
use clap::Parser;
use indicatif::ProgressBar;
use log::info;

use std::io::{stdin, stdout, Write};
use std::time::Instant;

use connect4_engine::board::Player;
use connect4_engine::search::{Engine, EngineConfig};
use connect4_engine::state::{GameState, Outcome};

mod display;
use display::*;

/// Play Connect 4 against the computer. You are player 1 (red).
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Player to move first (1 = you, 2 = computer), asked for when omitted
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=2))]
    first: Option<u8>,

    /// Computer lookahead depth, asked for when omitted
    #[arg(long)]
    depth: Option<u32>,

    /// Search worker threads (defaults to hardware threads minus one)
    #[arg(long)]
    workers: Option<usize>,

    /// Seed for the computer's tie breaks, for reproducible games
    #[arg(long)]
    seed: Option<u64>,
}

fn prompt(question: &str) -> Result<String> {
    print!("{}", question);
    stdout().flush()?;
    let mut buffer = String::new();
    stdin().read_line(&mut buffer)?;
    Ok(buffer)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("Welcome to Connect 4\n");

    let first = match args.first {
        Some(1) => Player::One,
        Some(_) => Player::Two,
        None => loop {
            match prompt("Who moves first? 1 = you, 2 = computer: ")?.trim() {
                "1" => break Player::One,
                "2" => break Player::Two,
                _ => println!("Unknown answer given"),
            }
        },
    };

    let depth = match args.depth {
        Some(depth) => depth,
        None => loop {
            let answer = prompt(&format!(
                "Computer lookahead depth [{}]: ",
                EngineConfig::DEFAULT_DEPTH
            ))?;
            let answer = answer.trim();
            if answer.is_empty() {
                break EngineConfig::DEFAULT_DEPTH;
            }
            match answer.parse::<u32>() {
                Ok(depth) => break depth,
                Err(_) => println!("Invalid number: {}", answer),
            }
        },
    };

    let mut config = EngineConfig {
        depth,
        seed: args.seed,
        ..EngineConfig::default()
    };
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    info!("engine config: {:?}", config);
    let engine = Engine::new(config)?;

    let mut state = GameState::new(first);

    // game loop
    loop {
        display(&state).expect("Failed to draw board!");

        match state.outcome() {
            Outcome::Playing => {
                let next_move = if state.turn() == Player::Two {
                    let spinner = ProgressBar::new_spinner();
                    spinner.set_message("Computer is thinking...");
                    spinner.enable_steady_tick(100);

                    let start = Instant::now();
                    let column = engine.choose_column(&state);
                    spinner.finish_and_clear();

                    let column = column? + 1;
                    println!(
                        "Computer plays {} ({:.0}ms)",
                        column,
                        start.elapsed().as_secs_f64() * 1000.0
                    );
                    column
                } else {
                    let input = prompt("Move input > ")?;
                    match input.trim().parse::<usize>() {
                        Err(_) => {
                            println!("Invalid number: {}", input.trim());
                            continue;
                        }
                        Ok(column) => column,
                    }
                };

                if let Err(err) = state.play_checked(next_move) {
                    println!("{}", err);
                    // try the move again
                    continue;
                }
            }

            // end states
            Outcome::Win(Player::One) => {
                println!("You win!");
                break;
            }
            Outcome::Win(Player::Two) => {
                println!("The computer wins!");
                break;
            }
            Outcome::Draw => {
                println!("Draw!");
                break;
            }
        }
    }
    Ok(())
}
