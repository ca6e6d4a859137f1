//! Deterministic random inputs.
//!
//! Backed by PCG so that a seed reproduces the same inputs on every platform
//! and every run. A generated input always passes the target algorithm's
//! validation under the limits it was generated for.

use rand::prelude::*;
use rand_pcg::Pcg64;

use super::{AlgorithmInfo, AlgorithmInput, InputKind, InputLimits};
use crate::config::GeneratorConfig;
use crate::error::{VizError, VizResult};

/// Seeded source of algorithm inputs.
#[derive(Debug, Clone)]
pub struct InputGenerator {
    /// Seed the stream started from.
    seed: u64,
    /// PCG state.
    rng: Pcg64,
}

impl InputGenerator {
    /// Create a generator from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg64::seed_from_u64(seed),
        }
    }

    /// Get the seed.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Produce an input of the shape `info` expects.
    ///
    /// # Errors
    ///
    /// Returns `VizError::InvalidInput` if the limits leave no size the
    /// algorithm accepts.
    pub fn generate(
        &mut self,
        info: &AlgorithmInfo,
        settings: &GeneratorConfig,
        limits: &InputLimits,
    ) -> VizResult<AlgorithmInput> {
        let len = settings.array_len.clamp(2, limits.max_array_len.max(2)).min(limits.max_array_len);
        let lo = settings.min_value.clamp(-limits.max_abs_value, limits.max_abs_value);
        let hi = settings.max_value.min(limits.max_abs_value).max(lo);

        let input = match info.input_kind {
            InputKind::Array => AlgorithmInput::Array {
                values: self.values(len, lo, hi),
            },
            InputKind::ArrayTarget => {
                let values = self.values(len, lo, hi);
                let target = self.pair_sum(&values);
                AlgorithmInput::ArrayTarget { values, target }
            }
            InputKind::ArrayPair => {
                let top = hi.max(1);
                let children = self.rng.gen_range(1..=len);
                let cookies = self.rng.gen_range(1..=len);
                AlgorithmInput::ArrayPair {
                    first: self.values(children, 1, top),
                    second: self.values(cookies, 1, top),
                }
            }
            InputKind::BoardSize => {
                let cap = u64::try_from(limits.max_board_size).unwrap_or(u64::MAX);
                let n = self.size_within(info, cap)?;
                AlgorithmInput::BoardSize {
                    n: usize::try_from(n).unwrap_or(limits.max_board_size),
                }
            }
            InputKind::Number => AlgorithmInput::Number {
                n: self.size_within(info, limits.max_factorial)?,
            },
        };
        Ok(input)
    }

    /// A size drawn from `info.size_range` with its upper end capped at `cap`.
    fn size_within(&mut self, info: &AlgorithmInfo, cap: u64) -> VizResult<u64> {
        let (min, max) = info.size_range;
        let max = max.min(cap);
        if max < min {
            return Err(VizError::invalid_input(
                info.name,
                format!("limits allow at most {cap}, but the smallest accepted size is {min}"),
            ));
        }
        Ok(self.rng.gen_range(min..=max))
    }

    /// `len` values uniformly drawn from `[lo, hi]`.
    fn values(&mut self, len: usize, lo: i64, hi: i64) -> Vec<i64> {
        (0..len).map(|_| self.rng.gen_range(lo..=hi)).collect()
    }

    /// Sum of two distinct random elements, so a matching pair exists.
    fn pair_sum(&mut self, values: &[i64]) -> i64 {
        if values.len() < 2 {
            return values.first().map_or(0, |v| v * 2);
        }
        let picks = rand::seq::index::sample(&mut self.rng, values.len(), 2);
        values[picks.index(0)] + values[picks.index(1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::AlgorithmRegistry;

    #[test]
    fn test_generator_reproducible() {
        let registry = AlgorithmRegistry::builtin();
        let settings = GeneratorConfig::default();
        let limits = InputLimits::default();

        let mut a = InputGenerator::new(42);
        let mut b = InputGenerator::new(42);
        for info in registry.infos() {
            assert_eq!(
                a.generate(&info, &settings, &limits).unwrap(),
                b.generate(&info, &settings, &limits).unwrap()
            );
        }
        assert_eq!(a.seed(), 42);
    }

    #[test]
    fn test_generator_seeds_differ() {
        let registry = AlgorithmRegistry::builtin();
        let info = registry.get("kadane").unwrap().describe();
        let settings = GeneratorConfig::default();
        let limits = InputLimits::default();

        let a = InputGenerator::new(1).generate(&info, &settings, &limits).unwrap();
        let b = InputGenerator::new(2).generate(&info, &settings, &limits).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_generated_inputs_always_accepted() {
        let registry = AlgorithmRegistry::builtin();
        let settings = GeneratorConfig::default();
        let limits = InputLimits {
            search_budget: 500,
            ..InputLimits::default()
        };
        let mut generator = InputGenerator::new(7);
        for _ in 0..5 {
            for info in registry.infos() {
                let input = generator.generate(&info, &settings, &limits).unwrap();
                let trace = registry.record(info.name, &input, &limits);
                assert!(trace.is_ok(), "{} rejected {input:?}", info.name);
            }
        }
    }

    #[test]
    fn test_generator_respects_limits() {
        let registry = AlgorithmRegistry::builtin();
        let info = registry.get("array_sum").unwrap().describe();
        let settings = GeneratorConfig {
            array_len: 100,
            min_value: -5_000_000,
            max_value: 5_000_000,
            ..GeneratorConfig::default()
        };
        let limits = InputLimits {
            max_array_len: 10,
            max_abs_value: 99,
            ..InputLimits::default()
        };
        let input = InputGenerator::new(3).generate(&info, &settings, &limits).unwrap();
        match input {
            AlgorithmInput::Array { values } => {
                assert_eq!(values.len(), 10);
                assert!(values.iter().all(|v| v.abs() <= 99));
            }
            other => panic!("unexpected input {other:?}"),
        }
    }

    #[test]
    fn test_board_below_minimum_size_is_an_error() {
        let registry = AlgorithmRegistry::builtin();
        let info = registry.get("knights_tour").unwrap().describe();
        let settings = GeneratorConfig::default();
        let limits = InputLimits {
            max_board_size: 4,
            ..InputLimits::default()
        };
        let mut generator = InputGenerator::new(9);
        for _ in 0..10 {
            assert!(matches!(
                generator.generate(&info, &settings, &limits),
                Err(VizError::InvalidInput { .. })
            ));
        }

        // A board algorithm whose range still fits keeps generating.
        let info = registry.get("n_queens").unwrap().describe();
        let input = generator.generate(&info, &settings, &limits).unwrap();
        assert!(matches!(input, AlgorithmInput::BoardSize { n } if (1..=4).contains(&n)));
        assert!(registry.record("n_queens", &input, &limits).is_ok());
    }

    #[test]
    fn test_two_sum_input_has_a_pair() {
        let registry = AlgorithmRegistry::builtin();
        let info = registry.get("two_sum").unwrap().describe();
        let settings = GeneratorConfig::default();
        let limits = InputLimits::default();
        let mut generator = InputGenerator::new(11);
        for _ in 0..20 {
            let input = generator.generate(&info, &settings, &limits).unwrap();
            let trace = registry.record("two_sum", &input, &limits).unwrap();
            assert!(!trace.last().unwrap().payload()["pair"].is_null());
        }
    }
}
