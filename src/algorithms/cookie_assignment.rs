//! Greedy cookie assignment: satisfy as many children as possible.
//!
//! Child `i` is content with a cookie of size at least `greed[i]`; each child
//! gets at most one cookie. Sorting both arrays and walking them with two
//! pointers is optimal: the smallest cookie that satisfies the least greedy
//! child is never better spent elsewhere.

use serde::{Deserialize, Serialize};

use super::{array_pair_input, AlgorithmInfo, AlgorithmInput, InputKind, InputLimits, InstrumentedAlgorithm};
use crate::error::{VizError, VizResult};
use crate::trace::TraceRecorder;

/// Snapshot of the greedy assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieFrame {
    /// Greed factors (sorted after the first frame).
    pub greed: Vec<i64>,
    /// Cookie sizes (sorted after the first frame).
    pub cookies: Vec<i64>,
    /// Child pointer.
    pub child: Option<usize>,
    /// Cookie pointer.
    pub cookie: Option<usize>,
    /// `(child, cookie)` pairs handed out so far.
    pub assignments: Vec<(usize, usize)>,
    /// Children satisfied so far.
    pub content_children: usize,
    /// What happened in this step.
    pub narrative: String,
    /// Set on the terminal frame.
    pub finished: bool,
}

/// Maximizes the number of content children.
#[derive(Debug, Clone, Copy, Default)]
pub struct CookieAssignment;

impl InstrumentedAlgorithm for CookieAssignment {
    type Input = (Vec<i64>, Vec<i64>);
    type Payload = CookieFrame;

    fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            name: "cookie_assignment",
            description: "Give cookies to children greedily to maximize how many are content",
            input_kind: InputKind::ArrayPair,
            size_range: (0, 0),
        }
    }

    fn parse(&self, input: &AlgorithmInput, limits: &InputLimits) -> VizResult<(Vec<i64>, Vec<i64>)> {
        let info = self.info();
        let (greed, cookies) = array_pair_input(&info, input, limits)?;
        if let Some(v) = greed.iter().chain(&cookies).find(|v| **v <= 0) {
            return Err(VizError::invalid_input(
                info.name,
                format!("greed factors and cookie sizes must be positive, got {v}"),
            ));
        }
        Ok((greed, cookies))
    }

    fn run(
        &self,
        input: &(Vec<i64>, Vec<i64>),
        _limits: &InputLimits,
        recorder: &mut TraceRecorder<CookieFrame>,
    ) {
        let mut greed = input.0.clone();
        let mut cookies = input.1.clone();
        greed.sort_unstable();
        cookies.sort_unstable();

        let mut frame = CookieFrame {
            greed,
            cookies,
            child: None,
            cookie: None,
            assignments: Vec::new(),
            content_children: 0,
            narrative: format!(
                "Sort {} greed factors and {} cookie sizes ascending",
                input.0.len(),
                input.1.len()
            ),
            finished: false,
        };
        recorder.emit(frame.clone());

        let (mut child, mut cookie) = (0, 0);
        while child < frame.greed.len() && cookie < frame.cookies.len() {
            let (want, size) = (frame.greed[child], frame.cookies[cookie]);
            frame.child = Some(child);
            frame.cookie = Some(cookie);
            if size >= want {
                frame.assignments.push((child, cookie));
                frame.content_children += 1;
                frame.narrative = format!("Cookie {size} satisfies child with greed {want}");
                child += 1;
            } else {
                frame.narrative = format!("Cookie {size} is too small for greed {want}; try a bigger cookie");
            }
            cookie += 1;
            recorder.emit(frame.clone());
        }

        frame.child = None;
        frame.cookie = None;
        frame.narrative = format!("Done: {} children content", frame.content_children);
        frame.finished = true;
        recorder.emit(frame);
    }
}
