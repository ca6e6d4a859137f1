//! Shell sort with the halving gap sequence.

use serde::{Deserialize, Serialize};

use super::{array_input, AlgorithmInfo, AlgorithmInput, InputKind, InputLimits, InstrumentedAlgorithm};
use crate::error::VizResult;
use crate::trace::TraceRecorder;

/// Snapshot of the shell sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellSortFrame {
    /// Working array.
    pub array: Vec<i64>,
    /// Current gap (0 before the first pass and after the last).
    pub gap: usize,
    /// Pair of indices being compared.
    pub comparing: Option<(usize, usize)>,
    /// Value lifted out of the array while larger values shift right.
    pub held: Option<i64>,
    /// Comparisons so far.
    pub comparisons: u64,
    /// Shifts so far.
    pub shifts: u64,
    /// What happened in this step.
    pub narrative: String,
    /// Set on the terminal frame.
    pub finished: bool,
}

/// Shell sort (gap insertion sort, gaps n/2, n/4, ..., 1).
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellSort;

/// Mutable sort state, snapshotted into frames.
struct Pass<'r> {
    array: Vec<i64>,
    gap: usize,
    comparisons: u64,
    shifts: u64,
    recorder: &'r mut TraceRecorder<ShellSortFrame>,
}

impl Pass<'_> {
    fn emit(&mut self, comparing: Option<(usize, usize)>, held: Option<i64>, narrative: String) {
        let frame = ShellSortFrame {
            array: self.array.clone(),
            gap: self.gap,
            comparing,
            held,
            comparisons: self.comparisons,
            shifts: self.shifts,
            narrative,
            finished: false,
        };
        self.recorder.emit(frame);
    }
}

impl InstrumentedAlgorithm for ShellSort {
    type Input = Vec<i64>;
    type Payload = ShellSortFrame;

    fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            name: "shell_sort",
            description: "Sort with gap-insertion passes (Shell sort)",
            input_kind: InputKind::Array,
            size_range: (0, 0),
        }
    }

    fn parse(&self, input: &AlgorithmInput, limits: &InputLimits) -> VizResult<Vec<i64>> {
        array_input(&self.info(), input, limits)
    }

    fn run(&self, values: &Vec<i64>, _limits: &InputLimits, recorder: &mut TraceRecorder<ShellSortFrame>) {
        let n = values.len();
        let mut pass = Pass {
            array: values.clone(),
            gap: 0,
            comparisons: 0,
            shifts: 0,
            recorder,
        };
        pass.emit(None, None, format!("Sort {n} values with Shell sort"));

        let mut gap = n / 2;
        while gap > 0 {
            pass.gap = gap;
            pass.emit(None, None, format!("Start pass with gap {gap}"));

            for i in gap..n {
                let held = pass.array[i];
                let mut j = i;
                while j >= gap {
                    pass.comparisons += 1;
                    let left = pass.array[j - gap];
                    if left > held {
                        pass.emit(
                            Some((j - gap, j)),
                            Some(held),
                            format!("{left} > {held}: shift {left} right by {gap}"),
                        );
                        pass.array[j] = left;
                        pass.shifts += 1;
                        j -= gap;
                    } else {
                        pass.emit(
                            Some((j - gap, j)),
                            Some(held),
                            format!("{left} <= {held}: stop shifting"),
                        );
                        break;
                    }
                }
                if j != i {
                    pass.array[j] = held;
                    pass.emit(None, None, format!("Insert {held} at index {j}"));
                }
            }
            gap /= 2;
        }

        let Pass {
            array,
            comparisons,
            shifts,
            recorder,
            ..
        } = pass;
        recorder.emit(ShellSortFrame {
            array,
            gap: 0,
            comparing: None,
            held: None,
            comparisons,
            shifts,
            narrative: format!("Done: sorted with {comparisons} comparisons and {shifts} shifts"),
            finished: true,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(values: Vec<i64>) -> crate::trace::Trace<ShellSortFrame> {
        ShellSort
            .record(&AlgorithmInput::Array { values }, &InputLimits::default())
            .unwrap()
    }

    #[test]
    fn test_shell_sort_sorts() {
        let trace = record(vec![23, 5, -4, 17, 0, 5, 99, 1]);
        let last = trace.last().unwrap().payload();
        assert!(last.finished);
        assert_eq!(last.array, vec![-4, 0, 1, 5, 5, 17, 23, 99]);
        assert!(last.comparisons >= last.shifts);
    }

    #[test]
    fn test_shell_sort_sorted_input_never_shifts() {
        let trace = record(vec![1, 2, 3, 4]);
        let last = trace.last().unwrap().payload();
        assert_eq!(last.shifts, 0);
        assert!(trace.iter().all(|f| f.payload().held.is_none() || f.payload().comparing.is_some()));
    }

    #[test]
    fn test_shell_sort_single_value() {
        let trace = record(vec![42]);
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.last().unwrap().payload().array, vec![42]);
    }

    #[test]
    fn test_shell_sort_counters_monotonic() {
        let trace = record(vec![9, 8, 7, 6, 5, 4, 3, 2, 1]);
        let comparisons: Vec<u64> = trace.iter().map(|f| f.payload().comparisons).collect();
        assert!(comparisons.windows(2).all(|w| w[0] <= w[1]));
    }
}
