use std::env;
use std::error::Error;
use std::fs;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use turkish_draughts::*;

/// Plies after which the demo gives up on reaching a result.
const MAX_PLIES: usize = 200;

/// First local piece with a legal move, and its first destination.
fn first_legal_move(board: &Board) -> Option<(Position, Position)> {
    Position::all()
        .filter(|&pos| board.piece_at(pos).is_some_and(|p| p.owner() == Seat::Local))
        .find_map(|pos| board.possible_moves(pos).first().map(|&to| (pos, to)))
}

/// Play out one turn on `board`, following capture chains to the end.
fn play_turn(board: &mut Board) -> Result<MoveRecord, Box<dyn Error>> {
    let (mut origin, mut destination) =
        first_legal_move(board).ok_or("side to move has no legal move")?;
    loop {
        match board.execute_move(origin, destination)? {
            MoveOutcome::Completed(record) => return Ok(record),
            MoveOutcome::Continue { at, destinations } => {
                origin = at;
                destination = *destinations
                    .first()
                    .ok_or("capture chain without destinations")?;
            }
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let rules = match env::args().nth(1) {
        Some(path) => RuleSet::from_json(&fs::read_to_string(path)?)?,
        None => RuleSet::default(),
    };

    println!("Turkish Draughts - two engines relaying moves");
    println!("==============================================\n");

    let players = [
        PlayerInfo::new("alice", "Alice"),
        PlayerInfo::new("bob", "Bob"),
    ];
    let mut boards = [Board::with_rules(rules.clone()), Board::with_rules(rules)];
    boards[0].start_match(&players, &players[0].id)?;
    boards[1].start_match(&players, &players[1].id)?;

    for ply in 1..=MAX_PLIES {
        let mover = if boards[0].status() == MatchStatus::WaitingLocalMove {
            0
        } else {
            1
        };
        let record = play_turn(&mut boards[mover])?;

        // Only the JSON text crosses between the two engines.
        let wire = record.to_json()?;
        println!("{:3}. {}: {}", ply, boards[mover].local_player().name(), wire);
        boards[1 - mover].receive_move(&MoveRecord::from_json(&wire)?)?;

        if boards[0].status().is_terminal() {
            break;
        }
    }

    println!("\n==============================================");
    for board in &boards {
        println!(
            "{} sees: {}",
            board.local_player().name(),
            board.status_message()
        );
    }
    if !boards[0].status().is_terminal() {
        warn!(plies = MAX_PLIES, "no result reached");
    }
    info!(
        alice = boards[0].local_player().living_count(),
        bob = boards[0].remote_player().living_count(),
        "pieces left"
    );
    Ok(())
}
