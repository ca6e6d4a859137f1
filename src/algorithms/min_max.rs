//! Single-pass minimum and maximum scan.

use serde::{Deserialize, Serialize};

use super::{array_input, AlgorithmInfo, AlgorithmInput, InputKind, InputLimits, InstrumentedAlgorithm};
use crate::error::VizResult;
use crate::trace::TraceRecorder;

/// Snapshot of the min/max scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinMaxFrame {
    /// Input array.
    pub array: Vec<i64>,
    /// Index just visited (`None` on the terminal frame).
    pub index: Option<usize>,
    /// Smallest value seen so far.
    pub min: i64,
    /// Position of `min`.
    pub min_index: usize,
    /// Largest value seen so far.
    pub max: i64,
    /// Position of `max`.
    pub max_index: usize,
    /// What happened in this step.
    pub narrative: String,
    /// Set on the terminal frame.
    pub finished: bool,
}

/// Finds the minimum and maximum of an array in one pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinMax;

impl InstrumentedAlgorithm for MinMax {
    type Input = Vec<i64>;
    type Payload = MinMaxFrame;

    fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            name: "min_max",
            description: "Track the minimum and maximum in one scan",
            input_kind: InputKind::Array,
            size_range: (0, 0),
        }
    }

    fn parse(&self, input: &AlgorithmInput, limits: &InputLimits) -> VizResult<Vec<i64>> {
        array_input(&self.info(), input, limits)
    }

    fn run(&self, values: &Vec<i64>, _limits: &InputLimits, recorder: &mut TraceRecorder<MinMaxFrame>) {
        let Some(&first) = values.first() else {
            return;
        };
        let (mut min, mut min_index) = (first, 0);
        let (mut max, mut max_index) = (first, 0);

        for (i, &v) in values.iter().enumerate() {
            let narrative = if i == 0 {
                format!("Start with array[0] = {v} as both min and max")
            } else if v < min {
                min = v;
                min_index = i;
                format!("array[{i}] = {v} is a new minimum")
            } else if v > max {
                max = v;
                max_index = i;
                format!("array[{i}] = {v} is a new maximum")
            } else {
                format!("array[{i}] = {v} lies within [{min}, {max}]")
            };

            recorder.emit(MinMaxFrame {
                array: values.clone(),
                index: Some(i),
                min,
                min_index,
                max,
                max_index,
                narrative,
                finished: false,
            });
        }

        recorder.emit(MinMaxFrame {
            array: values.clone(),
            index: None,
            min,
            min_index,
            max,
            max_index,
            narrative: format!("Done: min = {min} at {min_index}, max = {max} at {max_index}"),
            finished: true,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_max_one_frame_per_index_plus_finish() {
        let input = AlgorithmInput::Array {
            values: vec![5, 2, 9, 1],
        };
        let trace = MinMax.record(&input, &InputLimits::default()).unwrap();
        assert_eq!(trace.len(), 5);

        let last = trace.last().unwrap().payload();
        assert!(last.finished);
        assert_eq!((last.min, last.min_index), (1, 3));
        assert_eq!((last.max, last.max_index), (9, 2));

        let visited: Vec<Option<usize>> = trace.iter().map(|f| f.payload().index).collect();
        assert_eq!(visited, vec![Some(0), Some(1), Some(2), Some(3), None]);
    }

    #[test]
    fn test_min_max_single_element() {
        let input = AlgorithmInput::Array { values: vec![-7] };
        let trace = MinMax.record(&input, &InputLimits::default()).unwrap();
        assert_eq!(trace.len(), 2);
        let last = trace.last().unwrap().payload();
        assert_eq!((last.min, last.max), (-7, -7));
    }
}
