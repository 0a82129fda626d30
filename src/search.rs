use crate::board::PlayerColor;
use crate::evaluation::evaluate;
use crate::game::GameState;
use crate::moves::Move;

#[cfg(target_arch = "wasm32")]
use js_sys::Date;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

pub const INFINITY: i32 = 1_000_000;
/// Score of a side that cannot move, before distance adjustment.
pub const WIN_SCORE: i32 = 100_000;
/// Scores beyond this are decided games rather than evaluations.
pub const WIN_BOUND: i32 = 90_000;

#[cfg(target_arch = "wasm32")]
fn now_ms() -> f64 {
    Date::now()
}

/// Timer abstraction to handle platform differences
#[derive(Clone)]
pub struct Timer {
    #[cfg(target_arch = "wasm32")]
    start: f64,
    #[cfg(not(target_arch = "wasm32"))]
    start: Instant,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    pub fn new() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            Self { start: now_ms() }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Self {
                start: Instant::now(),
            }
        }
    }

    pub fn elapsed_ms(&self) -> u128 {
        #[cfg(target_arch = "wasm32")]
        {
            (now_ms() - self.start) as u128
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.start.elapsed().as_millis()
        }
    }
}

/// Optional caller-imposed budget. Hitting either limit makes the search
/// return early with the best root move completed so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    pub max_nodes: Option<u64>,
    pub time_limit_ms: Option<u128>,
}

impl SearchLimits {
    pub const NONE: SearchLimits = SearchLimits {
        max_nodes: None,
        time_limit_ms: None,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    /// Root score, positive favors white.
    pub score: i32,
    pub nodes: u64,
    /// False when a limit cut the search short.
    pub completed: bool,
}

/// Per-search bookkeeping.
pub struct Searcher {
    pub nodes: u64,
    pub timer: Timer,
    pub limits: SearchLimits,
    pub stopped: bool,
    pub silent: bool,
}

impl Searcher {
    pub fn new(limits: SearchLimits) -> Self {
        Searcher {
            nodes: 0,
            timer: Timer::new(),
            limits,
            stopped: false,
            silent: false,
        }
    }

    #[inline]
    fn check_limits(&mut self) -> bool {
        if let Some(max) = self.limits.max_nodes {
            if self.nodes >= max {
                self.stopped = true;
            }
        }

        // Time is checked every 1024 nodes to keep the hot path cheap.
        if let Some(limit) = self.limits.time_limit_ms {
            if self.nodes & 1023 == 0 && self.timer.elapsed_ms() >= limit {
                self.stopped = true;
            }
        }
        self.stopped
    }

    pub fn print_info(&self, depth: u32, score: i32, best: Option<Move>) {
        let time_ms = self.timer.elapsed_ms();
        let nps = if time_ms > 0 {
            (self.nodes as u128 * 1000) / time_ms
        } else {
            0
        };

        let score_str = format_score(score, !self.stopped);
        let pv = best.map(|m| m.to_string()).unwrap_or_else(|| "none".to_string());

        #[cfg(target_arch = "wasm32")]
        {
            use crate::log;
            log(&format!(
                "info depth {} score {} nodes {} nps {} time {} pv {}",
                depth, score_str, self.nodes, nps, time_ms, pv
            ));
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            eprintln!(
                "info depth {} score {} nodes {} nps {} time {} pv {}",
                depth, score_str, self.nodes, nps, time_ms, pv
            );
        }
    }
}

/// UCI-style score text. Only a finished search may report a decided game.
fn format_score(score: i32, completed: bool) -> String {
    if completed && score > WIN_BOUND {
        format!("win white {}", WIN_SCORE - score)
    } else if completed && score < -WIN_BOUND {
        format!("win black {}", WIN_SCORE + score)
    } else {
        format!("cp {}", score)
    }
}

/// Engine move for `side` searched `depth` turns deep, or `None` when `side`
/// has no legal move (game over).
pub fn best_move(game: &mut GameState, side: PlayerColor, depth: u32) -> Option<Move> {
    search_with_limits(game, side, depth, SearchLimits::NONE, true).best_move
}

/// Full search entry point with an optional node/time budget.
pub fn search_with_limits(
    game: &mut GameState,
    side: PlayerColor,
    depth: u32,
    limits: SearchLimits,
    silent: bool,
) -> SearchResult {
    let mut searcher = Searcher::new(limits);
    searcher.silent = silent;

    let moves = game.legal_moves(side);
    let Some(&first) = moves.first() else {
        return SearchResult {
            best_move: None,
            score: stuck_score(side, 0),
            nodes: 0,
            completed: true,
        };
    };

    #[cfg(feature = "parallel_search")]
    let (best, score) = if moves.len() > 1 {
        parallel_root(&mut searcher, game, side, depth, &moves)
    } else {
        search_root(&mut searcher, game, side, depth, &moves)
    };
    #[cfg(not(feature = "parallel_search"))]
    let (best, score) = search_root(&mut searcher, game, side, depth, &moves);

    // A budget that ran out before the first root move finished still
    // yields a playable move, scored statically.
    let (best_move, score) = match best {
        Some(m) => (m, score),
        None => (first, evaluate(&game.board)),
    };
    let best_move = Some(best_move);

    if !searcher.silent {
        searcher.print_info(depth, score, best_move);
    }

    SearchResult {
        best_move,
        score,
        nodes: searcher.nodes,
        completed: !searcher.stopped,
    }
}

/// Count nodes visited by a full-width search at `depth`, for benchmarks.
pub fn node_count_for_depth(game: &mut GameState, depth: u32) -> u64 {
    let side = game.turn;
    search_with_limits(game, side, depth, SearchLimits::NONE, true).nodes
}

#[inline]
fn stuck_score(side: PlayerColor, ply: u32) -> i32 {
    // Shorter wins are worth more, so subtract the distance from the root.
    let score = WIN_SCORE - ply as i32;
    match side {
        PlayerColor::White => -score,
        PlayerColor::Black => score,
    }
}

#[inline]
fn is_better(side: PlayerColor, score: i32, best: i32) -> bool {
    match side {
        PlayerColor::White => score > best,
        PlayerColor::Black => score < best,
    }
}

/// Search the child reached by `m`: same side and same depth while its combo
/// continues, otherwise the opponent one turn shallower.
#[allow(clippy::too_many_arguments)]
fn search_child(
    searcher: &mut Searcher,
    game: &mut GameState,
    m: Move,
    side: PlayerColor,
    depth: u32,
    ply: u32,
    alpha: i32,
    beta: i32,
) -> i32 {
    let record = game.apply_move(m, side);
    let score = if game.combo().is_active() {
        minimax(searcher, game, depth, ply + 1, alpha, beta, side)
    } else {
        minimax(searcher, game, depth - 1, ply + 1, alpha, beta, side.opponent())
    };
    game.undo_move(record);
    score
}

fn search_root(
    searcher: &mut Searcher,
    game: &mut GameState,
    side: PlayerColor,
    depth: u32,
    moves: &[Move],
) -> (Option<Move>, i32) {
    let depth = depth.max(1);
    let mut alpha = -INFINITY;
    let mut beta = INFINITY;
    let mut best: Option<Move> = None;
    let mut best_score = match side {
        PlayerColor::White => -INFINITY,
        PlayerColor::Black => INFINITY,
    };

    for &m in moves {
        let score = search_child(searcher, game, m, side, depth, 0, alpha, beta);
        if searcher.stopped {
            break;
        }

        if best.is_none() || is_better(side, score, best_score) {
            best_score = score;
            best = Some(m);
        }
        match side {
            PlayerColor::White => alpha = alpha.max(score),
            PlayerColor::Black => beta = beta.min(score),
        }
    }

    (best, best_score)
}

#[cfg(feature = "parallel_search")]
fn parallel_root(
    searcher: &mut Searcher,
    game: &GameState,
    side: PlayerColor,
    depth: u32,
    moves: &[Move],
) -> (Option<Move>, i32) {
    use rayon::prelude::*;

    let depth = depth.max(1);

    // The node budget is split evenly so the branches together stay within it.
    let mut limits = searcher.limits;
    limits.max_nodes = limits
        .max_nodes
        .map(|max| (max / moves.len() as u64).max(1));

    // Each branch works on its own copy of the position.
    let results: Vec<(Move, i32, u64, bool)> = moves
        .par_iter()
        .map(|&m| {
            let mut local = game.clone();
            let mut branch = Searcher::new(limits);
            let score = search_child(
                &mut branch,
                &mut local,
                m,
                side,
                depth,
                0,
                -INFINITY,
                INFINITY,
            );
            (m, score, branch.nodes, branch.stopped)
        })
        .collect();

    let mut best: Option<Move> = None;
    let mut best_score = 0;
    for (m, score, nodes, stopped) in results {
        searcher.nodes += nodes;
        if stopped {
            searcher.stopped = true;
            continue;
        }
        if best.is_none() || is_better(side, score, best_score) {
            best_score = score;
            best = Some(m);
        }
    }
    (best, best_score)
}

/// Minimax with alpha-beta pruning. White maximizes, black minimizes.
fn minimax(
    searcher: &mut Searcher,
    game: &mut GameState,
    depth: u32,
    ply: u32,
    mut alpha: i32,
    mut beta: i32,
    side: PlayerColor,
) -> i32 {
    searcher.nodes += 1;
    if searcher.check_limits() {
        return 0;
    }

    let moves = game.legal_moves(side);
    if moves.is_empty() {
        return stuck_score(side, ply);
    }
    if depth == 0 {
        return evaluate(&game.board);
    }

    let maximizing = side == PlayerColor::White;
    let mut best_eval = if maximizing { -INFINITY } else { INFINITY };

    for &m in &moves {
        let eval = search_child(searcher, game, m, side, depth, ply, alpha, beta);
        if searcher.stopped {
            return 0;
        }

        if maximizing {
            best_eval = best_eval.max(eval);
            alpha = alpha.max(eval);
        } else {
            best_eval = best_eval.min(eval);
            beta = beta.min(eval);
        }

        if beta <= alpha {
            break;
        }
    }

    best_eval
}
