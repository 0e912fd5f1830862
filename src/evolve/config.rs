use crate::error::{NetError, Result};
use crate::evolve::objective::Objective;

/// Settings for an [`EvolutionaryTrainer`](crate::evolve::EvolutionaryTrainer) run.
///
/// # Fields
/// - `pool_size`          — individuals per generation
/// - `num_selected`       — survivors kept each generation; must divide `pool_size`
/// - `num_samples`        — fresh samples drawn per individual per generation
/// - `num_generations`    — generations performed by `run`
/// - `mutation_magnitude` — `vary` bound for mutated offspring; not clamped
/// - `weight_range`, `bias_range` — `[min, max)` for the initial randomization
/// - `objective`          — minimize cost or maximize accuracy
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionConfig {
    pub pool_size: usize,
    pub num_selected: usize,
    pub num_samples: usize,
    pub num_generations: usize,
    pub mutation_magnitude: f64,
    pub weight_range: (f64, f64),
    pub bias_range: (f64, f64),
    pub objective: Objective,
}

impl EvolutionConfig {
    pub fn new(pool_size: usize, num_selected: usize, num_samples: usize, num_generations: usize) -> Self {
        EvolutionConfig {
            pool_size,
            num_selected,
            num_samples,
            num_generations,
            ..EvolutionConfig::default()
        }
    }

    pub fn with_mutation_magnitude(mut self, mutation_magnitude: f64) -> Self {
        self.mutation_magnitude = mutation_magnitude;
        self
    }

    pub fn with_ranges(mut self, weight_range: (f64, f64), bias_range: (f64, f64)) -> Self {
        self.weight_range = weight_range;
        self.bias_range = bias_range;
        self
    }

    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    /// Offspring per survivor, the unmutated clone included.
    pub fn offspring_per_survivor(&self) -> usize {
        self.pool_size / self.num_selected
    }

    pub fn validate(&self) -> Result<()> {
        if self.pool_size == 0 {
            return Err(NetError::config("pool size must be positive"));
        }
        if self.num_selected == 0 || self.num_selected > self.pool_size {
            return Err(NetError::config(format!(
                "number selected must be in 1..={}, got {}",
                self.pool_size, self.num_selected
            )));
        }
        if self.pool_size % self.num_selected != 0 {
            return Err(NetError::config(format!(
                "pool size {} is not divisible by number selected {}",
                self.pool_size, self.num_selected
            )));
        }
        if self.num_samples == 0 {
            return Err(NetError::config("number of samples must be positive"));
        }
        Ok(())
    }
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        EvolutionConfig {
            pool_size: 100,
            num_selected: 50,
            num_samples: 50,
            num_generations: 3_000,
            mutation_magnitude: 0.1,
            weight_range: (-1.0, 1.0),
            bias_range: (-1.0, 1.0),
            objective: Objective::MinimizeCost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        EvolutionConfig::default().validate().unwrap();
        assert_eq!(EvolutionConfig::default().offspring_per_survivor(), 2);
    }

    #[test]
    fn rejects_indivisible_pool() {
        let err = EvolutionConfig::new(100, 7, 10, 1).validate().unwrap_err();
        assert!(matches!(err, NetError::Configuration(_)));
    }

    #[test]
    fn rejects_degenerate_counts() {
        for config in [
            EvolutionConfig::new(0, 1, 10, 1),
            EvolutionConfig::new(10, 0, 10, 1),
            EvolutionConfig::new(10, 20, 10, 1),
            EvolutionConfig::new(10, 5, 0, 1),
        ] {
            assert!(matches!(config.validate(), Err(NetError::Configuration(_))), "{config:?}");
        }
    }
}
