//! Trace recording for instrumented algorithms.
//!
//! An algorithm run produces an ordered, append-only journal of [`Frame`]s:
//! - [`TraceRecorder::emit`] appends a snapshot and assigns its sequence number
//! - [`TraceRecorder::finish`] consumes the recorder and freezes the [`Trace`]
//!
//! # Snapshot contract
//!
//! The recorder stores exactly the payload it is handed and never copies it
//! defensively. An algorithm that keeps mutating a working buffer after
//! emitting must emit an owned copy of that buffer (`values.clone()`,
//! `board.to_vec()`), never a handle to it. In Rust the borrow checker
//! enforces most of this: `emit` takes the payload by value, so a payload
//! cannot borrow the algorithm's working storage. Shared-ownership types
//! (`Rc<RefCell<_>>`) inside a payload are the remaining way to break the
//! contract, and doing so is a bug in the algorithm.

use std::fmt;
use std::sync::Arc;

use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

use crate::error::VizResult;

/// One immutable snapshot of algorithm state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame<P> {
    /// Position in the trace, assigned at emission time.
    sequence: u64,
    /// Algorithm-defined snapshot.
    payload: P,
}

impl<P> Frame<P> {
    /// Sequence number (0-based, strictly increasing within a trace).
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// The algorithm-defined snapshot.
    #[must_use]
    pub const fn payload(&self) -> &P {
        &self.payload
    }
}

/// Collects frames during one synchronous algorithm execution.
#[derive(Debug)]
pub struct TraceRecorder<P> {
    /// Frames in emission order.
    frames: Vec<Frame<P>>,
    /// Next sequence number.
    sequence: u64,
}

impl<P> Default for TraceRecorder<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> TraceRecorder<P> {
    /// Create an empty recorder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            frames: Vec::new(),
            sequence: 0,
        }
    }

    /// Append a snapshot to the in-progress trace.
    ///
    /// Never fails and never influences the caller's control flow.
    pub fn emit(&mut self, payload: P) {
        self.frames.push(Frame {
            sequence: self.sequence,
            payload,
        });
        self.sequence += 1;
    }

    /// Number of frames emitted so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Check if nothing has been emitted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Freeze the recording.
    ///
    /// Consuming `self` guarantees nothing can be emitted into a finished trace.
    #[must_use]
    pub fn finish(self) -> Trace<P> {
        debug!(frames = self.frames.len(), "trace finished");
        Trace {
            frames: self.frames.into(),
        }
    }
}

/// The finished, read-only frame sequence of one algorithm run.
///
/// Cloning a trace shares the frames; it never copies them.
#[derive(Debug)]
pub struct Trace<P> {
    frames: Arc<[Frame<P>]>,
}

impl<P> Clone for Trace<P> {
    fn clone(&self) -> Self {
        Self {
            frames: Arc::clone(&self.frames),
        }
    }
}

impl<P: PartialEq> PartialEq for Trace<P> {
    fn eq(&self, other: &Self) -> bool {
        self.frames == other.frames
    }
}

impl<P> Trace<P> {
    /// Number of frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Check if the algorithm emitted nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Frame<P>> {
        self.frames.get(index)
    }

    /// All frames in order.
    #[must_use]
    pub fn frames(&self) -> &[Frame<P>] {
        &self.frames
    }

    /// First frame.
    #[must_use]
    pub fn first(&self) -> Option<&Frame<P>> {
        self.frames.first()
    }

    /// Last (terminal) frame.
    #[must_use]
    pub fn last(&self) -> Option<&Frame<P>> {
        self.frames.last()
    }

    /// Iterate frames in order.
    pub fn iter(&self) -> impl Iterator<Item = &Frame<P>> {
        self.frames.iter()
    }

    /// Build a new trace with every payload converted by `f`.
    ///
    /// Sequence numbers are preserved.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`.
    pub fn map_payload<Q, F>(&self, mut f: F) -> VizResult<Trace<Q>>
    where
        F: FnMut(&P) -> VizResult<Q>,
    {
        let frames = self
            .frames
            .iter()
            .map(|frame| {
                Ok(Frame {
                    sequence: frame.sequence,
                    payload: f(&frame.payload)?,
                })
            })
            .collect::<VizResult<Vec<_>>>()?;

        Ok(Trace {
            frames: frames.into(),
        })
    }
}

impl<P: Serialize> Trace<P> {
    /// Content digest over every frame.
    ///
    /// Two runs of the same algorithm on the same input produce the same
    /// fingerprint.
    ///
    /// # Errors
    ///
    /// Returns error if a payload cannot be serialized.
    pub fn fingerprint(&self) -> VizResult<TraceFingerprint> {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(self.frames.len() as u64).to_le_bytes());
        for frame in self.frames.iter() {
            let bytes = serde_json::to_vec(frame)?;
            hasher.update(&(bytes.len() as u64).to_le_bytes());
            hasher.update(&bytes);
        }
        Ok(TraceFingerprint(*hasher.finalize().as_bytes()))
    }
}

impl<P: Serialize> Serialize for Trace<P> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.frames.len()))?;
        for frame in self.frames.iter() {
            seq.serialize_element(frame)?;
        }
        seq.end()
    }
}

impl<'a, P> IntoIterator for &'a Trace<P> {
    type Item = &'a Frame<P>;
    type IntoIter = std::slice::Iter<'a, Frame<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

/// Blake3 digest of a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceFingerprint([u8; 32]);

impl TraceFingerprint {
    /// Raw digest bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for TraceFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every frame's sequence equals its index.
        #[test]
        fn prop_monotonic_sequencing(payloads in proptest::collection::vec(any::<i32>(), 0..200)) {
            let mut recorder = TraceRecorder::new();
            for p in &payloads {
                recorder.emit(*p);
            }
            let trace = recorder.finish();

            prop_assert_eq!(trace.len(), payloads.len());
            for (k, frame) in trace.iter().enumerate() {
                prop_assert_eq!(frame.sequence(), k as u64);
                prop_assert_eq!(*frame.payload(), payloads[k]);
            }
        }
    }
}
