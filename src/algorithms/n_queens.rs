//! N-Queens backtracking search counting every solution.

use serde::{Deserialize, Serialize};

use super::{board_input, AlgorithmInfo, AlgorithmInput, InputKind, InputLimits, InstrumentedAlgorithm};
use crate::error::VizResult;
use crate::trace::TraceRecorder;

/// What the search just did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueenAction {
    /// Search begins.
    Start,
    /// Square attacked by an earlier queen.
    Conflict,
    /// Queen placed.
    Place,
    /// Queen removed while backtracking.
    Remove,
    /// All rows filled.
    Solution,
    /// Search exhausted.
    Done,
}

/// Snapshot of the search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueensFrame {
    /// Board side length.
    pub n: usize,
    /// Column of the queen in each row, if placed.
    pub queens: Vec<Option<usize>>,
    /// Square under consideration.
    pub square: Option<(usize, usize)>,
    /// Step kind.
    pub action: QueenAction,
    /// Solutions found so far.
    pub solution_count: u64,
    /// First complete placement found.
    pub first_solution: Option<Vec<usize>>,
    /// What happened in this step.
    pub narrative: String,
    /// Set on the terminal frame.
    pub finished: bool,
}

/// Counts all placements of n non-attacking queens.
#[derive(Debug, Clone, Copy, Default)]
pub struct NQueens;

struct Search<'r> {
    n: usize,
    queens: Vec<Option<usize>>,
    solution_count: u64,
    first_solution: Option<Vec<usize>>,
    recorder: &'r mut TraceRecorder<QueensFrame>,
}

impl Search<'_> {
    fn emit(&mut self, square: Option<(usize, usize)>, action: QueenAction, narrative: String) {
        self.recorder.emit(QueensFrame {
            n: self.n,
            queens: self.queens.clone(),
            square,
            action,
            solution_count: self.solution_count,
            first_solution: self.first_solution.clone(),
            narrative,
            finished: false,
        });
    }

    fn is_safe(&self, row: usize, col: usize) -> bool {
        self.queens[..row].iter().enumerate().all(|(r, placed)| {
            placed.is_none_or(|c| c != col && row - r != col.abs_diff(c))
        })
    }

    fn place(&mut self, row: usize) {
        if row == self.n {
            self.solution_count += 1;
            if self.first_solution.is_none() {
                self.first_solution = Some(self.queens.iter().flatten().copied().collect());
            }
            let count = self.solution_count;
            self.emit(None, QueenAction::Solution, format!("All {} queens placed: solution #{count}", self.n));
            return;
        }

        for col in 0..self.n {
            if !self.is_safe(row, col) {
                self.emit(
                    Some((row, col)),
                    QueenAction::Conflict,
                    format!("({row}, {col}) is attacked; try the next column"),
                );
                continue;
            }

            self.queens[row] = Some(col);
            self.emit(Some((row, col)), QueenAction::Place, format!("Place a queen at ({row}, {col})"));
            self.place(row + 1);
            self.queens[row] = None;
            self.emit(
                Some((row, col)),
                QueenAction::Remove,
                format!("Backtrack: remove the queen from ({row}, {col})"),
            );
        }
    }
}

impl InstrumentedAlgorithm for NQueens {
    type Input = usize;
    type Payload = QueensFrame;

    fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            name: "n_queens",
            description: "Count all placements of n non-attacking queens by backtracking",
            input_kind: InputKind::BoardSize,
            size_range: (1, 8),
        }
    }

    fn parse(&self, input: &AlgorithmInput, limits: &InputLimits) -> VizResult<usize> {
        board_input(&self.info(), input, limits)
    }

    fn run(&self, n: &usize, _limits: &InputLimits, recorder: &mut TraceRecorder<QueensFrame>) {
        let n = *n;
        let mut search = Search {
            n,
            queens: vec![None; n],
            solution_count: 0,
            first_solution: None,
            recorder,
        };
        search.emit(None, QueenAction::Start, format!("Place {n} queens on a {n}×{n} board"));
        search.place(0);

        let Search {
            solution_count,
            first_solution,
            recorder,
            ..
        } = search;
        recorder.emit(QueensFrame {
            n,
            queens: vec![None; n],
            square: None,
            action: QueenAction::Done,
            solution_count,
            first_solution,
            narrative: format!("Done: {solution_count} solutions on a {n}×{n} board"),
            finished: true,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solutions(n: usize) -> u64 {
        let trace = NQueens
            .record(&AlgorithmInput::BoardSize { n }, &InputLimits::default())
            .unwrap();
        let last = trace.last().unwrap().payload();
        assert!(last.finished);
        last.solution_count
    }

    #[test]
    fn test_four_queens() {
        assert_eq!(solutions(4), 2);
    }

    #[test]
    fn test_known_counts() {
        let expected = [(1, 1), (2, 0), (3, 0), (5, 10), (6, 4)];
        for (n, count) in expected {
            assert_eq!(solutions(n), count, "n = {n}");
        }
    }

    #[test]
    fn test_eight_queens() {
        assert_eq!(solutions(8), 92);
    }

    #[test]
    fn test_first_solution_is_valid() {
        let trace = NQueens
            .record(&AlgorithmInput::BoardSize { n: 4 }, &InputLimits::default())
            .unwrap();
        let first = trace.last().unwrap().payload().first_solution.clone();
        assert_eq!(first, Some(vec![1, 3, 0, 2]));
    }

    #[test]
    fn test_places_and_removes_balance() {
        let trace = NQueens
            .record(&AlgorithmInput::BoardSize { n: 5 }, &InputLimits::default())
            .unwrap();
        let places = trace.iter().filter(|f| f.payload().action == QueenAction::Place).count();
        let removes = trace.iter().filter(|f| f.payload().action == QueenAction::Remove).count();
        assert_eq!(places, removes);
        assert!(trace.first().is_some_and(|f| f.payload().action == QueenAction::Start));
    }

    #[test]
    fn test_board_too_large() {
        let result = NQueens.record(&AlgorithmInput::BoardSize { n: 9 }, &InputLimits::default());
        assert!(result.is_err());
    }
}
