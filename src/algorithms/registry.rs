//! Name-keyed catalog of algorithms with type-erased payloads.
//!
//! Each algorithm has its own payload type. Front ends that pick an
//! algorithm by name at runtime go through [`DynAlgorithm`], which records
//! the typed trace and converts every payload to a `serde_json::Value`.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info_span};

use super::array_sum::ArraySum;
use super::cookie_assignment::CookieAssignment;
use super::count_zeros::CountZeros;
use super::factorial::Factorial;
use super::kadane::Kadane;
use super::knights_tour::KnightsTour;
use super::min_max::MinMax;
use super::n_queens::NQueens;
use super::shell_sort::ShellSort;
use super::two_sum::TwoSum;
use super::{AlgorithmInfo, AlgorithmInput, InputLimits, InstrumentedAlgorithm};
use crate::error::{VizError, VizResult};
use crate::trace::Trace;

/// Object-safe view of an [`InstrumentedAlgorithm`].
pub trait DynAlgorithm: Send + Sync {
    /// Static description.
    fn describe(&self) -> AlgorithmInfo;

    /// Validate, run once, and return the trace with JSON payloads.
    ///
    /// # Errors
    ///
    /// Returns error if the input is rejected or a payload fails to serialize.
    fn record_json(&self, input: &AlgorithmInput, limits: &InputLimits) -> VizResult<Trace<serde_json::Value>>;
}

impl<A> DynAlgorithm for A
where
    A: InstrumentedAlgorithm + Send + Sync,
{
    fn describe(&self) -> AlgorithmInfo {
        self.info()
    }

    fn record_json(&self, input: &AlgorithmInput, limits: &InputLimits) -> VizResult<Trace<serde_json::Value>> {
        let trace = self.record(input, limits)?;
        trace.map_payload(|payload| Ok(serde_json::to_value(payload)?))
    }
}

/// Algorithms available by name.
#[derive(Clone, Default)]
pub struct AlgorithmRegistry {
    algorithms: BTreeMap<&'static str, Arc<dyn DynAlgorithm>>,
}

impl std::fmt::Debug for AlgorithmRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlgorithmRegistry")
            .field("algorithms", &self.names())
            .finish()
    }
}

impl AlgorithmRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in algorithm.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(ArraySum);
        registry.register(MinMax);
        registry.register(CountZeros);
        registry.register(TwoSum);
        registry.register(Kadane);
        registry.register(ShellSort);
        registry.register(Factorial);
        registry.register(NQueens);
        registry.register(KnightsTour);
        registry.register(CookieAssignment);
        registry
    }

    /// Add an algorithm under its `info().name`, replacing any previous entry.
    pub fn register<A>(&mut self, algorithm: A)
    where
        A: InstrumentedAlgorithm + Send + Sync + 'static,
    {
        let name = algorithm.info().name;
        if self.algorithms.insert(name, Arc::new(algorithm)).is_some() {
            debug!(name, "replaced registered algorithm");
        }
    }

    /// Look up an algorithm.
    ///
    /// # Errors
    ///
    /// Returns `VizError::UnknownAlgorithm` if nothing is registered under `name`.
    pub fn get(&self, name: &str) -> VizResult<&dyn DynAlgorithm> {
        self.algorithms
            .get(name)
            .map(Arc::as_ref)
            .ok_or_else(|| VizError::UnknownAlgorithm(name.to_string()))
    }

    /// Check if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.algorithms.contains_key(name)
    }

    /// Registered names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.algorithms.keys().copied().collect()
    }

    /// Descriptions in name order.
    #[must_use]
    pub fn infos(&self) -> Vec<AlgorithmInfo> {
        self.algorithms.values().map(|a| a.describe()).collect()
    }

    /// Number of registered algorithms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.algorithms.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.algorithms.is_empty()
    }

    /// Record a trace for the named algorithm.
    ///
    /// # Errors
    ///
    /// Returns error if the name is unknown or the input is rejected.
    pub fn record(
        &self,
        name: &str,
        input: &AlgorithmInput,
        limits: &InputLimits,
    ) -> VizResult<Trace<serde_json::Value>> {
        let span = info_span!("record", algorithm = name);
        let _guard = span.enter();
        let trace = self.get(name)?.record_json(input, limits)?;
        debug!(frames = trace.len(), "recorded");
        Ok(trace)
    }
}
