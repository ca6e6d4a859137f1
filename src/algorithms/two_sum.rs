//! One-pass hash lookup for a pair summing to a target.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{
    array_target_input, AlgorithmInfo, AlgorithmInput, InputKind, InputLimits, InstrumentedAlgorithm,
};
use crate::error::VizResult;
use crate::trace::TraceRecorder;

/// Snapshot of the two-sum scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwoSumFrame {
    /// Input array.
    pub array: Vec<i64>,
    /// Target sum.
    pub target: i64,
    /// Index just examined (`None` on the terminal frame).
    pub index: Option<usize>,
    /// `target - array[index]`.
    pub complement: Option<i64>,
    /// Values seen so far, mapped to their first index.
    pub seen: BTreeMap<i64, usize>,
    /// Indices of the matching pair, once found.
    pub pair: Option<(usize, usize)>,
    /// What happened in this step.
    pub narrative: String,
    /// Set on the terminal frame.
    pub finished: bool,
}

/// Finds two indices whose values sum to the target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoSum;

impl InstrumentedAlgorithm for TwoSum {
    type Input = (Vec<i64>, i64);
    type Payload = TwoSumFrame;

    fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            name: "two_sum",
            description: "Find two values that add up to a target using a lookup table",
            input_kind: InputKind::ArrayTarget,
            size_range: (0, 0),
        }
    }

    fn parse(&self, input: &AlgorithmInput, limits: &InputLimits) -> VizResult<(Vec<i64>, i64)> {
        array_target_input(&self.info(), input, limits)
    }

    fn run(&self, input: &(Vec<i64>, i64), _limits: &InputLimits, recorder: &mut TraceRecorder<TwoSumFrame>) {
        let (values, target) = (&input.0, input.1);
        let mut seen = BTreeMap::new();
        let mut pair = None;

        for (i, &v) in values.iter().enumerate() {
            let complement = target - v;
            let narrative = if let Some(&j) = seen.get(&complement) {
                pair = Some((j, i));
                format!("Need {complement}; seen at index {j}, so array[{j}] + array[{i}] = {target}")
            } else {
                seen.entry(v).or_insert(i);
                format!("Need {complement}; not seen yet, remember {v} at index {i}")
            };

            recorder.emit(TwoSumFrame {
                array: values.clone(),
                target,
                index: Some(i),
                complement: Some(complement),
                seen: seen.clone(),
                pair,
                narrative,
                finished: false,
            });

            if pair.is_some() {
                break;
            }
        }

        let narrative = match pair {
            Some((a, b)) => format!("Done: indices {a} and {b} sum to {target}"),
            None => format!("Done: no two values sum to {target}"),
        };
        recorder.emit(TwoSumFrame {
            array: values.clone(),
            target,
            index: None,
            complement: None,
            seen,
            pair,
            narrative,
            finished: true,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(values: Vec<i64>, target: i64) -> crate::trace::Trace<TwoSumFrame> {
        TwoSum
            .record(&AlgorithmInput::ArrayTarget { values, target }, &InputLimits::default())
            .unwrap()
    }

    #[test]
    fn test_two_sum_found_stops_early() {
        let trace = record(vec![2, 7, 11, 15], 9);
        assert_eq!(trace.len(), 3);
        let last = trace.last().unwrap().payload();
        assert!(last.finished);
        assert_eq!(last.pair, Some((0, 1)));
    }

    #[test]
    fn test_two_sum_not_found() {
        let trace = record(vec![1, 2, 3], 100);
        assert_eq!(trace.len(), 4);
        let last = trace.last().unwrap().payload();
        assert_eq!(last.pair, None);
        assert_eq!(last.seen.len(), 3);
    }

    #[test]
    fn test_two_sum_duplicate_values() {
        let trace = record(vec![3, 3], 6);
        assert_eq!(trace.last().unwrap().payload().pair, Some((0, 1)));
    }

    #[test]
    fn test_two_sum_payload_serializes() {
        let trace = record(vec![-4, 1, 4], 0);
        let json = serde_json::to_value(trace.last().unwrap().payload()).unwrap();
        assert_eq!(json["pair"], serde_json::json!([0, 2]));
        assert_eq!(json["seen"]["-4"], serde_json::json!(0));
    }
}
