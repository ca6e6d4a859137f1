//! Running-total scan.

use serde::{Deserialize, Serialize};

use super::{array_input, AlgorithmInfo, AlgorithmInput, InputKind, InputLimits, InstrumentedAlgorithm};
use crate::error::VizResult;
use crate::trace::TraceRecorder;

/// Snapshot of the running-total scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SumFrame {
    /// Input array.
    pub array: Vec<i64>,
    /// Index just added (`None` on the terminal frame).
    pub index: Option<usize>,
    /// Sum of `array[..=index]`.
    pub total: i64,
    /// What happened in this step.
    pub narrative: String,
    /// Set on the terminal frame.
    pub finished: bool,
}

/// Sums an array left to right.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArraySum;

impl InstrumentedAlgorithm for ArraySum {
    type Input = Vec<i64>;
    type Payload = SumFrame;

    fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            name: "array_sum",
            description: "Sum an array with a running total",
            input_kind: InputKind::Array,
            size_range: (0, 0),
        }
    }

    fn parse(&self, input: &AlgorithmInput, limits: &InputLimits) -> VizResult<Vec<i64>> {
        array_input(&self.info(), input, limits)
    }

    fn run(&self, values: &Vec<i64>, _limits: &InputLimits, recorder: &mut TraceRecorder<SumFrame>) {
        let mut total = 0i64;
        for (i, &v) in values.iter().enumerate() {
            total += v;
            recorder.emit(SumFrame {
                array: values.clone(),
                index: Some(i),
                total,
                narrative: format!("Add array[{i}] = {v}; running total is {total}"),
                finished: false,
            });
        }
        recorder.emit(SumFrame {
            array: values.clone(),
            index: None,
            total,
            narrative: format!("Done: the sum is {total}"),
            finished: true,
        });
    }
}
