use log::{debug, info};
use serde::{Serialize, Deserialize};

use crate::activation::ActivationFunction;
use crate::error::Result;
use crate::evolve::config::EvolutionConfig;
use crate::network::Network;
use crate::random::RandomSource;
use crate::samples::{Sample, SampleProvider};

/// Best individual seen so far, kept as an independent copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Champion {
    pub network: Network,
    pub score: f64,
    /// Generation (0-based) in which it was evaluated.
    pub generation: usize,
}

/// Diagnostics for one evaluated generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub generation: usize,
    pub mean_score: f64,
    /// Best score within this generation.
    pub best_score: f64,
    /// Best score across every generation so far.
    pub best_ever: f64,
}

/// Truncation-selection population trainer.
///
/// Each generation every individual is scored on fresh samples, the top `num_selected`
/// survive, and each survivor contributes one unmutated clone followed by mutated clones
/// until the pool is full again.
#[derive(Debug)]
pub struct EvolutionaryTrainer {
    config: EvolutionConfig,
    population: Vec<Network>,
    best: Option<Champion>,
    generation: usize,
    rng: RandomSource,
}

impl EvolutionaryTrainer {
    /// Validates `config` and builds `pool_size` independently randomized networks.
    pub fn new(
        config: EvolutionConfig,
        layer_sizes: &[usize],
        activations: &[ActivationFunction],
        rng: RandomSource,
    ) -> Result<EvolutionaryTrainer> {
        let template = Network::new(layer_sizes, activations)?;
        EvolutionaryTrainer::from_template(config, &template, rng)
    }

    /// Like [`new`](Self::new) but copies topology, activations and input policy from
    /// `template`; its parameters are discarded.
    pub fn from_template(config: EvolutionConfig, template: &Network, mut rng: RandomSource) -> Result<EvolutionaryTrainer> {
        config.validate()?;
        let population = (0..config.pool_size)
            .map(|_| {
                let mut network = template.clone();
                network.randomize(&mut rng, config.weight_range, config.bias_range);
                network
            })
            .collect();

        Ok(EvolutionaryTrainer {
            config,
            population,
            best: None,
            generation: 0,
            rng,
        })
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    pub fn population(&self) -> &[Network] {
        &self.population
    }

    pub fn best(&self) -> Option<&Champion> {
        self.best.as_ref()
    }

    /// Number of generations completed.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn into_best(self) -> Option<Champion> {
        self.best
    }

    /// Runs `num_generations` generations and returns their diagnostics.
    pub fn run(&mut self, provider: &mut impl SampleProvider) -> Result<Vec<GenerationStats>> {
        info!(
            "evolution: pool {}, selecting {}, {} samples, {} generations, {:?}",
            self.config.pool_size,
            self.config.num_selected,
            self.config.num_samples,
            self.config.num_generations,
            self.config.objective
        );
        let history = (0..self.config.num_generations)
            .map(|_| self.step(provider))
            .collect::<Result<Vec<_>>>()?;
        if let Some(best) = &self.best {
            info!("best score {:.6} from generation {}", best.score, best.generation);
        }
        Ok(history)
    }

    /// One evaluate → select → reproduce cycle.
    pub fn step(&mut self, provider: &mut impl SampleProvider) -> Result<GenerationStats> {
        let batches: Vec<Vec<Sample>> = self
            .population
            .iter()
            .map(|_| (0..self.config.num_samples).map(|_| provider.sample()).collect())
            .collect();
        let scores = self.evaluate(&batches)?;

        let objective = self.config.objective;
        let ranked = objective.rank(&scores);
        let generation_best = ranked[0];

        let improved = self
            .best
            .as_ref()
            .map_or(true, |b| objective.is_better(scores[generation_best], b.score));
        if improved {
            info!("generation {}: new best score {:.6}", self.generation, scores[generation_best]);
            self.best = Some(Champion {
                network: self.population[generation_best].clone(),
                score: scores[generation_best],
                generation: self.generation,
            });
        }

        self.population = self.reproduce(&ranked[..self.config.num_selected]);

        let stats = GenerationStats {
            generation: self.generation,
            mean_score: scores.iter().sum::<f64>() / scores.len() as f64,
            best_score: scores[generation_best],
            best_ever: self.best.as_ref().map_or(scores[generation_best], |b| b.score),
        };
        debug!(
            "generation {} | mean {:.6} | best {:.6} | best ever {:.6}",
            stats.generation, stats.mean_score, stats.best_score, stats.best_ever
        );
        self.generation += 1;
        Ok(stats)
    }

    #[cfg(not(feature = "parallel"))]
    fn evaluate(&self, batches: &[Vec<Sample>]) -> Result<Vec<f64>> {
        self.population
            .iter()
            .zip(batches)
            .map(|(network, samples)| self.config.objective.score(network, samples))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn evaluate(&self, batches: &[Vec<Sample>]) -> Result<Vec<f64>> {
        use rayon::prelude::*;

        let objective = self.config.objective;
        self.population
            .par_iter()
            .zip(batches.par_iter())
            .map(|(network, samples)| objective.score(network, samples))
            .collect()
    }

    fn reproduce(&mut self, survivors: &[usize]) -> Vec<Network> {
        let offspring = self.config.offspring_per_survivor();
        let mut next = Vec::with_capacity(self.config.pool_size);
        for &i in survivors {
            let parent = &self.population[i];
            next.push(parent.clone());
            for _ in 1..offspring {
                let mut child = parent.clone();
                child.vary(&mut self.rng, self.config.mutation_magnitude);
                next.push(child);
            }
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::ActivationFunction::Sigmoid;
    use crate::error::NetError;
    use crate::evolve::Objective;
    use crate::samples::PointRegion;

    fn trainer(config: EvolutionConfig, seed: u64) -> EvolutionaryTrainer {
        EvolutionaryTrainer::new(config, &[2, 3, 2], &[Sigmoid, Sigmoid], RandomSource::seeded(seed)).unwrap()
    }

    #[test]
    fn initial_pool_is_randomized_independently() {
        let t = trainer(EvolutionConfig::new(6, 3, 5, 1), 1);
        assert_eq!(t.population().len(), 6);
        assert_ne!(t.population()[0], t.population()[1]);
        assert!(t.best().is_none());
    }

    #[test]
    fn indivisible_pool_fails_before_any_generation() {
        let err = EvolutionaryTrainer::new(
            EvolutionConfig::new(100, 7, 10, 5),
            &[2, 2],
            &[Sigmoid],
            RandomSource::seeded(0),
        )
        .unwrap_err();
        assert!(matches!(err, NetError::Configuration(_)));
    }

    #[test]
    fn survivors_lead_their_offspring_block_unmutated() {
        let mut t = trainer(EvolutionConfig::new(8, 2, 10, 1), 2);
        let before = t.population().to_vec();
        let mut points = PointRegion::new(RandomSource::seeded(3));
        t.step(&mut points).unwrap();

        let pop = t.population();
        assert_eq!(pop.len(), 8);
        for block in pop.chunks(4) {
            assert!(before.contains(&block[0]));
            for child in &block[1..] {
                assert!(!before.contains(child));
                assert_eq!(child.layer_sizes(), block[0].layer_sizes());
            }
        }
        // best of the generation heads the next pool
        assert_eq!(&pop[0], &t.best().unwrap().network);
    }

    #[test]
    fn best_ever_is_monotonic_and_detached() {
        let mut t = trainer(EvolutionConfig::new(10, 5, 20, 30), 4);
        let mut points = PointRegion::new(RandomSource::seeded(5));
        let history = t.run(&mut points).unwrap();
        assert_eq!(history.len(), 30);
        assert_eq!(t.generation(), 30);
        for pair in history.windows(2) {
            assert!(pair[1].best_ever <= pair[0].best_ever);
        }
        for stats in &history {
            assert!(stats.best_ever <= stats.best_score);
        }
        let best = t.best().unwrap();
        assert_eq!(best.score, history.last().unwrap().best_ever);
    }

    #[test]
    fn accuracy_objective_never_regresses() {
        let config = EvolutionConfig::new(12, 4, 25, 20).with_objective(Objective::MaximizeAccuracy);
        let mut t = trainer(config, 6);
        let mut points = PointRegion::new(RandomSource::seeded(7));
        let history = t.run(&mut points).unwrap();
        for pair in history.windows(2) {
            assert!(pair[1].best_ever >= pair[0].best_ever);
        }
        assert!(history.iter().all(|s| (0.0..=1.0).contains(&s.best_score)));
    }

    #[test]
    fn same_seeds_reproduce_the_run() {
        let run = |seed| {
            let mut t = trainer(EvolutionConfig::new(6, 2, 8, 5), seed);
            let mut points = PointRegion::new(RandomSource::seeded(seed + 100));
            t.run(&mut points).unwrap()
        };
        assert_eq!(run(9), run(9));
    }

    #[test]
    fn wrong_sample_shape_surfaces_as_error() {
        let mut t = trainer(EvolutionConfig::new(2, 1, 3, 1), 8);
        let mut provider = || Sample::new(vec![1.0, 2.0, 3.0], vec![0.0, 1.0]);
        assert!(matches!(t.step(&mut provider), Err(NetError::DimensionMismatch { .. })));
    }
}
