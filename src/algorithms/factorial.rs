//! Recursive factorial with a visible call stack.

use serde::{Deserialize, Serialize};

use super::{number_input, AlgorithmInfo, AlgorithmInput, InputKind, InputLimits, InstrumentedAlgorithm};
use crate::error::VizResult;
use crate::trace::TraceRecorder;

/// One activation record on the visible call stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRecord {
    /// Argument of this call.
    pub arg: u64,
    /// Return value, once computed.
    pub returned: Option<u64>,
}

/// Snapshot of the recursion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorialFrame {
    /// Requested n.
    pub n: u64,
    /// Live call stack, outermost first.
    pub stack: Vec<CallRecord>,
    /// `n!`, set on the terminal frame.
    pub result: Option<u64>,
    /// What happened in this step.
    pub narrative: String,
    /// Set on the terminal frame.
    pub finished: bool,
}

/// `n!` computed recursively.
#[derive(Debug, Clone, Copy, Default)]
pub struct Factorial;

struct Calls<'r> {
    n: u64,
    stack: Vec<CallRecord>,
    recorder: &'r mut TraceRecorder<FactorialFrame>,
}

impl Calls<'_> {
    fn emit(&mut self, narrative: String) {
        self.recorder.emit(FactorialFrame {
            n: self.n,
            stack: self.stack.clone(),
            result: None,
            narrative,
            finished: false,
        });
    }

    fn factorial(&mut self, k: u64) -> u64 {
        self.stack.push(CallRecord {
            arg: k,
            returned: None,
        });
        self.emit(format!("Call factorial({k})"));

        let value = if k <= 1 {
            1
        } else {
            let inner = self.factorial(k - 1);
            k * inner
        };

        if let Some(top) = self.stack.last_mut() {
            top.returned = Some(value);
        }
        let narrative = if k <= 1 {
            format!("Base case: factorial({k}) = 1")
        } else {
            format!("factorial({k}) = {k} × factorial({}) = {value}", k - 1)
        };
        self.emit(narrative);
        self.stack.pop();
        value
    }
}

impl InstrumentedAlgorithm for Factorial {
    type Input = u64;
    type Payload = FactorialFrame;

    fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            name: "factorial",
            description: "Compute n! recursively, showing the call stack",
            input_kind: InputKind::Number,
            size_range: (0, 20),
        }
    }

    fn parse(&self, input: &AlgorithmInput, limits: &InputLimits) -> VizResult<u64> {
        number_input(&self.info(), input, limits.max_factorial)
    }

    fn run(&self, n: &u64, _limits: &InputLimits, recorder: &mut TraceRecorder<FactorialFrame>) {
        let n = *n;
        let mut calls = Calls {
            n,
            stack: Vec::new(),
            recorder,
        };
        let result = calls.factorial(n);

        calls.recorder.emit(FactorialFrame {
            n,
            stack: Vec::new(),
            result: Some(result),
            narrative: format!("Done: {n}! = {result}"),
            finished: true,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(n: u64) -> VizResult<crate::trace::Trace<FactorialFrame>> {
        Factorial.record(&AlgorithmInput::Number { n }, &InputLimits::default())
    }

    #[test]
    fn test_factorial_result() {
        let trace = record(5).unwrap();
        let last = trace.last().unwrap().payload();
        assert!(last.finished);
        assert_eq!(last.result, Some(120));
        assert!(last.stack.is_empty());
    }

    #[test]
    fn test_factorial_frame_count() {
        // One frame per call, one per return, one terminal.
        let trace = record(4).unwrap();
        assert_eq!(trace.len(), 4 * 2 + 1);
    }

    #[test]
    fn test_factorial_stack_depth() {
        let trace = record(6).unwrap();
        let deepest = trace.iter().map(|f| f.payload().stack.len()).max();
        assert_eq!(deepest, Some(6));

        let base = trace
            .iter()
            .find(|f| f.payload().stack.last().is_some_and(|c| c.arg == 1 && c.returned.is_some()));
        assert!(base.is_some());
    }

    #[test]
    fn test_factorial_zero() {
        let trace = record(0).unwrap();
        assert_eq!(trace.last().unwrap().payload().result, Some(1));
    }

    #[test]
    fn test_factorial_limit() {
        assert_eq!(record(12).unwrap().last().unwrap().payload().result, Some(479_001_600));
        assert!(record(13).is_err());
    }
}
