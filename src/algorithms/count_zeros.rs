//! Two-pointer zero scan.
//!
//! A read pointer walks the array while a write pointer compacts the
//! non-zero values to the front; zeros are counted on the way and written
//! back at the tail once the scan ends.

use serde::{Deserialize, Serialize};

use super::{array_input, AlgorithmInfo, AlgorithmInput, InputKind, InputLimits, InstrumentedAlgorithm};
use crate::error::VizResult;
use crate::trace::TraceRecorder;

/// Snapshot of the two-pointer scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZeroScanFrame {
    /// Working array (compacted prefix, untouched suffix).
    pub array: Vec<i64>,
    /// Read pointer (`None` on the terminal frame).
    pub read: Option<usize>,
    /// Write pointer: next slot for a non-zero value.
    pub write: usize,
    /// Zeros seen so far.
    pub zero_count: usize,
    /// What happened in this step.
    pub narrative: String,
    /// Set on the terminal frame.
    pub finished: bool,
}

/// Counts zeros while moving them to the end.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountZeros;

impl InstrumentedAlgorithm for CountZeros {
    type Input = Vec<i64>;
    type Payload = ZeroScanFrame;

    fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            name: "count_zeros",
            description: "Count zeros with read/write pointers, moving them to the end",
            input_kind: InputKind::Array,
            size_range: (0, 0),
        }
    }

    fn parse(&self, input: &AlgorithmInput, limits: &InputLimits) -> VizResult<Vec<i64>> {
        array_input(&self.info(), input, limits)
    }

    fn run(&self, values: &Vec<i64>, _limits: &InputLimits, recorder: &mut TraceRecorder<ZeroScanFrame>) {
        let mut working = values.clone();
        let mut write = 0;
        let mut zero_count = 0;

        for read in 0..working.len() {
            let v = working[read];
            let narrative = if v == 0 {
                zero_count += 1;
                format!("array[{read}] is zero; {zero_count} found so far")
            } else {
                working[write] = v;
                write += 1;
                format!("array[{read}] = {v} is kept; write pointer moves to {write}")
            };

            recorder.emit(ZeroScanFrame {
                array: working.clone(),
                read: Some(read),
                write,
                zero_count,
                narrative,
                finished: false,
            });
        }

        for slot in &mut working[write..] {
            *slot = 0;
        }

        recorder.emit(ZeroScanFrame {
            array: working,
            read: None,
            write,
            zero_count,
            narrative: format!("Done: {zero_count} zeros moved to the end"),
            finished: true,
        });
    }
}
