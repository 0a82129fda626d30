//! Terminal games: engine against engine, or against a human on stdin.
//!
//! Usage:
//!   cargo run --release --features cli --bin selfplay -- --white-depth 5 --black-depth 3
//!   cargo run --release --features cli --bin selfplay -- --scenario 9 --json
//!   cargo run --release --features cli --bin selfplay -- --white human

use clap::Parser;
use hydrodraughts_wasm::board::{PlayerColor, Square};
use hydrodraughts_wasm::error::EngineError;
use hydrodraughts_wasm::evaluation::{calculate_material, evaluate};
use hydrodraughts_wasm::game::GameState;
use hydrodraughts_wasm::moves::Move;
use hydrodraughts_wasm::scenarios::{load_scenario, scenario};
use hydrodraughts_wasm::settings::{GameSettings, PlayerType};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use serde::Serialize;
use std::io::{self, BufRead, Write};

#[derive(Parser, Debug)]
#[command(name = "selfplay", about = "Play checkers in the terminal")]
struct Args {
    /// Who plays white: human or engine
    #[arg(long, default_value = "engine", value_parser = PlayerType::from_str)]
    white: PlayerType,

    /// Who plays black: human or engine
    #[arg(long, default_value = "engine", value_parser = PlayerType::from_str)]
    black: PlayerType,

    /// Search depth for white, in turns
    #[arg(long, default_value_t = 3)]
    white_depth: u32,

    /// Search depth for black, in turns
    #[arg(long, default_value_t = 3)]
    black_depth: u32,

    /// Start from a built-in scenario (1-11) instead of the opening
    #[arg(long)]
    scenario: Option<u8>,

    /// Number of random moves played before the players take over
    #[arg(long, default_value_t = 0)]
    random_plies: u32,

    /// Seed for the random opening moves
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Stop after this many moves and call the game a draw
    #[arg(long, default_value_t = 300)]
    max_plies: u32,

    /// Print a JSON summary instead of the board after every move
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct GameSummary {
    scenario: Option<&'static str>,
    winner: Option<PlayerColor>,
    plies: u32,
    moves: Vec<Move>,
    final_eval: i32,
    material: i32,
    white_pieces: usize,
    black_pieces: usize,
}

/// Parse `r,c r,c` (any non-digit separators) into a source and destination.
fn parse_move_text(line: &str) -> Option<(Square, Square)> {
    let nums: Vec<i8> = line
        .split(|c: char| !c.is_ascii_digit())
        .filter(|t| !t.is_empty())
        .map(str::parse)
        .collect::<Result<_, _>>()
        .ok()?;
    match nums.as_slice() {
        &[fr, fc, tr, tc] => Some((Square::new(fr, fc), Square::new(tr, tc))),
        _ => None,
    }
}

/// Prompt until the human enters a legal move. `Ok(None)` on end of input.
fn read_human_move(game: &mut GameState, input: &mut impl BufRead) -> io::Result<Option<Move>> {
    let side = game.turn;
    loop {
        print!("{} to move (row,col row,col): ", side.to_str());
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let Some((from, to)) = parse_move_text(&line) else {
            println!("could not read a move from {:?}", line.trim());
            continue;
        };
        let Some(m) = game.is_legal(from, to, side) else {
            println!("illegal move");
            continue;
        };
        game.attempt_move(m.from, m.to, side);
        return Ok(Some(m));
    }
}

fn play(args: &Args) -> Result<GameSummary, EngineError> {
    let settings = GameSettings {
        white_player: args.white,
        black_player: args.black,
        white_depth: args.white_depth,
        black_depth: args.black_depth,
    }
    .validate()?;

    let (mut game, scenario_name) = match args.scenario {
        Some(id) => (load_scenario(id)?, Some(scenario(id)?.name)),
        None => (GameState::new_game(), None),
    };
    let mut rng = StdRng::seed_from_u64(args.seed);
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut moves = Vec::new();
    let mut winner = None;

    if !args.json {
        if let Some(name) = scenario_name {
            println!("scenario: {}", name);
        }
        println!("{}", game.board);
    }

    for ply in 0..args.max_plies {
        let side = game.turn;
        let played = if ply < args.random_plies {
            let candidates = game.legal_moves(side);
            let choice = candidates.choose(&mut rng).copied();
            if let Some(m) = choice {
                game.attempt_move(m.from, m.to, side);
            }
            choice
        } else if settings.is_engine(side) {
            game.play_engine_turn(settings.depth(side))
        } else if game.side_has_any_legal_move(side) {
            match read_human_move(&mut game, &mut input) {
                Ok(Some(m)) => Some(m),
                Ok(None) | Err(_) => break,
            }
        } else {
            None
        };

        let Some(m) = played else {
            winner = Some(side.opponent());
            break;
        };
        moves.push(m);

        if !args.json {
            println!("{} plays {}  (eval {})", side.to_str(), m, evaluate(&game.board));
            println!("{}", game.board);
        }
    }

    Ok(GameSummary {
        scenario: scenario_name,
        winner,
        plies: moves.len() as u32,
        moves,
        final_eval: evaluate(&game.board),
        material: calculate_material(&game.board),
        white_pieces: game.board.count(PlayerColor::White),
        black_pieces: game.board.count(PlayerColor::Black),
    })
}

fn main() {
    let args = Args::parse();

    let summary = match play(&args) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&summary) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        match summary.winner {
            Some(side) => println!("{} wins after {} moves", side.to_str(), summary.plies),
            None => println!("draw after {} moves", summary.plies),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_text_accepts_common_separators() {
        let expected = Some((Square::new(5, 2), Square::new(4, 3)));
        assert_eq!(parse_move_text("5,2 4,3"), expected);
        assert_eq!(parse_move_text("5 2 4 3\n"), expected);
        assert_eq!(parse_move_text("5,2-4,3"), expected);
        assert_eq!(parse_move_text("5,2"), None);
        assert_eq!(parse_move_text(""), None);
    }

    #[test]
    fn human_input_skips_illegal_moves() {
        let mut game = GameState::new_game();
        let mut input = io::Cursor::new("junk\n5,0 3,2\n5,0 4,1\n");
        let played = read_human_move(&mut game, &mut input).expect("stdin");
        assert_eq!(played, Some(Move::new(Square::new(5, 0), Square::new(4, 1), false)));
        assert_eq!(game.turn, PlayerColor::Black);
    }

    #[test]
    fn end_of_input_stops_the_game() {
        let mut game = GameState::new_game();
        let mut input = io::Cursor::new("");
        assert_eq!(read_human_move(&mut game, &mut input).expect("stdin"), None);
        assert_eq!(game, GameState::new_game());
    }

    #[test]
    fn control_flags_parse_through_player_type() {
        let args = Args::parse_from(["selfplay", "--white", "human", "--black", "AI"]);
        assert_eq!(args.white, PlayerType::Human);
        assert_eq!(args.black, PlayerType::Engine);
        assert!(Args::try_parse_from(["selfplay", "--white", "robot"]).is_err());
    }

    #[test]
    fn scenario_game_reports_its_name() {
        let args =
            Args::parse_from(["selfplay", "--scenario", "11", "--json", "--black-depth", "2"]);
        let summary = play(&args).expect("scenario 11");
        assert_eq!(summary.scenario, Some("engine wins by capture"));
        assert_eq!(summary.winner, Some(PlayerColor::Black));
        assert_eq!(summary.material, -100);
    }
}
