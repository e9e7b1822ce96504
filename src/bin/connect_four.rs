//! Console Connect Four against the alpha-beta engine.
//!
//! The engine plays X and moves first. Each turn it searches once without and
//! once with the transposition table and reports both, then the human enters
//! a column for O.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rust_negamax::core::Player;
use rust_negamax::games::connect_four::{Board, Column, COLUMNS, DEFAULT_SEED};
use rust_negamax::rules::GameState;
use rust_negamax::search::{AlphaBetaSearch, ReplacementPolicy, SearchConfig};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Search depth in plies
    #[arg(long, default_value_t = 12)]
    depth: u8,

    /// The table holds 2^N slots
    #[arg(long, default_value_t = 19)]
    table_exponent: u8,

    /// Replacement rule: negative always overwrites, N keeps entries deeper
    /// than the new one by more than N plies
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    replacement: i32,

    /// Seed for the Zobrist keys
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Skip the search with the transposition table
    #[arg(long)]
    no_table: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut board = Board::with_seed(args.seed);

    let plain_config = SearchConfig::default().with_depth(args.depth);
    let mut plain = AlphaBetaSearch::with_config(board.clone(), plain_config)
        .context("invalid search configuration")?;

    let mut cached = if args.no_table {
        None
    } else {
        let config = SearchConfig::default().with_depth(args.depth).with_table(
            args.table_exponent,
            ReplacementPolicy::from_param(args.replacement),
        );
        let search = AlphaBetaSearch::with_config(board.clone(), config)
            .context("invalid table configuration")?;
        Some(search)
    };

    info!(depth = args.depth, table = !args.no_table, "starting game");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while !board.is_terminal() && board.has_moves_left() {
        println!("{board}");
        println!("Thinking ...");

        *plain.state_mut() = board.clone();
        let start = Instant::now();
        let Some(mut mv) = plain.search() else {
            bail!("engine found no move on a board with moves left");
        };
        println!(
            "(No Memory) Putting token into {mv} expecting score of {}. It took {:?}.",
            plain.last_score(),
            start.elapsed()
        );

        if let Some(cached) = cached.as_mut() {
            *cached.state_mut() = board.clone();
            let start = Instant::now();
            if let Some(found) = cached.search() {
                mv = found;
            }
            println!(
                "(With Memory) Putting token into {mv} expecting score of {}. It took {:?}.",
                cached.last_score(),
                start.elapsed()
            );
        }

        board.play(mv.0)?;
        if board.is_terminal() || !board.has_moves_left() {
            break;
        }

        println!("{board}");
        let column = read_column(&mut lines, &board)?;
        board.play(column.0)?;
    }

    println!("{board}");
    match board.winner() {
        Some(Player::Two) => println!("You WON!!!"),
        Some(Player::One) => println!("You LOSE!!!"),
        None => println!("It's a tie"),
    }
    Ok(())
}

/// Prompt until the human enters a playable column.
fn read_column<B: BufRead>(lines: &mut io::Lines<B>, board: &Board) -> Result<Column> {
    loop {
        print!("Select column to insert token (0-{}): ", COLUMNS - 1);
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            bail!("input closed");
        };
        let line = line?;

        let Ok(column) = line.trim().parse::<u8>() else {
            println!("Not a column: {:?}", line.trim());
            continue;
        };

        let mut probe = board.clone();
        match probe.play(column) {
            Ok(()) => return Ok(Column(column)),
            Err(e) => println!("{e}"),
        }
    }
}
