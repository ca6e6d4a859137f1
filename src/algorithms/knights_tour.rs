//! Knight's tour by backtracking, trying moves in Warnsdorff order.
//!
//! Candidate squares are tried fewest-onward-moves first, which finds a tour
//! on most boards without backtracking. The search is still bounded by
//! [`InputLimits::search_budget`] so the trace stays scrubbable when the
//! heuristic has to backtrack heavily.

use serde::{Deserialize, Serialize};

use super::{board_input, AlgorithmInfo, AlgorithmInput, InputKind, InputLimits, InstrumentedAlgorithm};
use crate::error::VizResult;
use crate::trace::TraceRecorder;

const KNIGHT_MOVES: [(isize, isize); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

/// What the search just did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnightAction {
    /// Search begins.
    Start,
    /// Knight moved to a new square.
    Move,
    /// Square undone after a dead end.
    Backtrack,
    /// Search over.
    Done,
}

/// Snapshot of the tour search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnightFrame {
    /// Board side length.
    pub n: usize,
    /// Visit order per square (0 = unvisited).
    pub board: Vec<Vec<u32>>,
    /// Knight position.
    pub position: Option<(usize, usize)>,
    /// Number of the move just made.
    pub move_number: u32,
    /// Dead ends undone so far.
    pub backtracks: u64,
    /// Step kind.
    pub action: KnightAction,
    /// Every square visited exactly once.
    pub complete: bool,
    /// Search stopped by the step budget.
    pub budget_exhausted: bool,
    /// What happened in this step.
    pub narrative: String,
    /// Set on the terminal frame.
    pub finished: bool,
}

/// Open knight's tour from the top-left corner.
#[derive(Debug, Clone, Copy, Default)]
pub struct KnightsTour;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Complete,
    DeadEnd,
    Exhausted,
}

struct Tour<'r> {
    n: usize,
    board: Vec<Vec<u32>>,
    steps: u64,
    budget: u64,
    backtracks: u64,
    recorder: &'r mut TraceRecorder<KnightFrame>,
}

impl Tour<'_> {
    fn emit(&mut self, position: Option<(usize, usize)>, move_number: u32, action: KnightAction, narrative: String) {
        self.recorder.emit(KnightFrame {
            n: self.n,
            board: self.board.clone(),
            position,
            move_number,
            backtracks: self.backtracks,
            action,
            complete: false,
            budget_exhausted: false,
            narrative,
            finished: false,
        });
    }

    fn unvisited_moves(&self, (row, col): (usize, usize)) -> Vec<(usize, usize)> {
        KNIGHT_MOVES
            .iter()
            .filter_map(|&(dr, dc)| {
                let r = row.checked_add_signed(dr)?;
                let c = col.checked_add_signed(dc)?;
                (r < self.n && c < self.n && self.board[r][c] == 0).then_some((r, c))
            })
            .collect()
    }

    fn visit(&mut self, square: (usize, usize), move_number: u32) -> Outcome {
        let (row, col) = square;
        self.board[row][col] = move_number;
        self.steps += 1;
        self.emit(
            Some(square),
            move_number,
            KnightAction::Move,
            format!("Move {move_number}: knight to ({row}, {col})"),
        );

        if move_number as usize == self.n * self.n {
            return Outcome::Complete;
        }

        let mut candidates = self.unvisited_moves(square);
        candidates.sort_by_key(|&next| self.unvisited_moves(next).len());

        for next in candidates {
            if self.steps >= self.budget {
                return Outcome::Exhausted;
            }
            match self.visit(next, move_number + 1) {
                Outcome::DeadEnd => {}
                outcome => return outcome,
            }
        }

        self.board[row][col] = 0;
        self.backtracks += 1;
        self.steps += 1;
        self.emit(
            Some(square),
            move_number,
            KnightAction::Backtrack,
            format!("Dead end after move {move_number}; undo ({row}, {col})"),
        );
        Outcome::DeadEnd
    }
}

impl InstrumentedAlgorithm for KnightsTour {
    type Input = usize;
    type Payload = KnightFrame;

    fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            name: "knights_tour",
            description: "Visit every square once with a knight (Warnsdorff-ordered backtracking)",
            input_kind: InputKind::BoardSize,
            size_range: (5, 8),
        }
    }

    fn parse(&self, input: &AlgorithmInput, limits: &InputLimits) -> VizResult<usize> {
        board_input(&self.info(), input, limits)
    }

    fn run(&self, n: &usize, limits: &InputLimits, recorder: &mut TraceRecorder<KnightFrame>) {
        let n = *n;
        let mut tour = Tour {
            n,
            board: vec![vec![0; n]; n],
            steps: 0,
            budget: limits.search_budget,
            backtracks: 0,
            recorder,
        };
        tour.emit(None, 0, KnightAction::Start, format!("Tour a {n}×{n} board from (0, 0)"));
        let outcome = tour.visit((0, 0), 1);

        let complete = outcome == Outcome::Complete;
        let budget_exhausted = outcome == Outcome::Exhausted;
        let narrative = match outcome {
            Outcome::Complete => format!("Done: all {} squares visited", n * n),
            Outcome::Exhausted => format!("Stopped: search budget of {} steps used up", limits.search_budget),
            Outcome::DeadEnd => "Done: no tour exists from (0, 0)".to_string(),
        };

        let move_number = tour.board.iter().flatten().copied().max().unwrap_or(0);
        let Tour {
            board,
            backtracks,
            recorder,
            ..
        } = tour;
        recorder.emit(KnightFrame {
            n,
            board,
            position: None,
            move_number,
            backtracks,
            action: KnightAction::Done,
            complete,
            budget_exhausted,
            narrative,
            finished: true,
        });
    }
}
