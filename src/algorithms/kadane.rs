//! Kadane's maximum subarray scan.

use serde::{Deserialize, Serialize};

use super::{array_input, AlgorithmInfo, AlgorithmInput, InputKind, InputLimits, InstrumentedAlgorithm};
use crate::error::VizResult;
use crate::trace::TraceRecorder;

/// Snapshot of Kadane's scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KadaneFrame {
    /// Input array.
    pub array: Vec<i64>,
    /// Index just visited (`None` on the terminal frame).
    pub index: Option<usize>,
    /// Best sum of a subarray ending at `index`.
    pub current_sum: i64,
    /// Start of the subarray behind `current_sum`.
    pub current_start: usize,
    /// Best subarray sum so far.
    pub best_sum: i64,
    /// Inclusive bounds of the best subarray.
    pub best_range: (usize, usize),
    /// What happened in this step.
    pub narrative: String,
    /// Set on the terminal frame.
    pub finished: bool,
}

/// Maximum-sum contiguous subarray.
#[derive(Debug, Clone, Copy, Default)]
pub struct Kadane;

impl InstrumentedAlgorithm for Kadane {
    type Input = Vec<i64>;
    type Payload = KadaneFrame;

    fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            name: "kadane",
            description: "Find the maximum-sum contiguous subarray (Kadane)",
            input_kind: InputKind::Array,
            size_range: (0, 0),
        }
    }

    fn parse(&self, input: &AlgorithmInput, limits: &InputLimits) -> VizResult<Vec<i64>> {
        array_input(&self.info(), input, limits)
    }

    fn run(&self, values: &Vec<i64>, _limits: &InputLimits, recorder: &mut TraceRecorder<KadaneFrame>) {
        let Some(&first) = values.first() else {
            return;
        };
        let mut current_sum = first;
        let mut current_start = 0;
        let mut best_sum = first;
        let mut best_range = (0, 0);

        for (i, &v) in values.iter().enumerate() {
            let mut narrative = if i == 0 {
                format!("Start a subarray at array[0] = {v}")
            } else if current_sum + v < v {
                current_sum = v;
                current_start = i;
                format!("Restart at array[{i}] = {v}; the previous run only hurt")
            } else {
                current_sum += v;
                format!("Extend with array[{i}] = {v}; current sum is {current_sum}")
            };

            if current_sum > best_sum {
                best_sum = current_sum;
                best_range = (current_start, i);
                narrative.push_str(&format!("; new best {best_sum} over [{current_start}, {i}]"));
            }

            recorder.emit(KadaneFrame {
                array: values.clone(),
                index: Some(i),
                current_sum,
                current_start,
                best_sum,
                best_range,
                narrative,
                finished: false,
            });
        }

        recorder.emit(KadaneFrame {
            array: values.clone(),
            index: None,
            current_sum,
            current_start,
            best_sum,
            best_range,
            narrative: format!(
                "Done: best sum {best_sum} over [{}, {}]",
                best_range.0, best_range.1
            ),
            finished: true,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn final_frame(values: Vec<i64>) -> KadaneFrame {
        let trace = Kadane
            .record(&AlgorithmInput::Array { values }, &InputLimits::default())
            .unwrap();
        trace.last().unwrap().payload().clone()
    }

    #[test]
    fn test_kadane_classic() {
        let last = final_frame(vec![-2, 1, -3, 4, -1, 2, 1, -5, 4]);
        assert!(last.finished);
        assert_eq!(last.best_sum, 6);
        assert_eq!(last.best_range, (3, 6));
    }

    #[test]
    fn test_kadane_all_negative() {
        let last = final_frame(vec![-8, -3, -6]);
        assert_eq!(last.best_sum, -3);
        assert_eq!(last.best_range, (1, 1));
    }

    #[test]
    fn test_kadane_frame_count() {
        let trace = Kadane
            .record(
                &AlgorithmInput::Array {
                    values: vec![1, 2, 3],
                },
                &InputLimits::default(),
            )
            .unwrap();
        assert_eq!(trace.len(), 4);
        assert_eq!(trace.last().unwrap().payload().best_sum, 6);
    }
}
