//! Bundled evolutionary algorithm.
//!
//! A generational population of [`Brain`] genomes: each generation is
//! evaluated by a caller-supplied callback, ranked by fitness, and replaced
//! by elites plus mutated offspring of the top fraction.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::simulation::brain::Brain;
use crate::simulation::network::{Genome, GenomeId};
use crate::simulation::params::EvolutionParams;

/// A genome carrying a brain and its fitness accumulator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrainGenome {
    /// Network weights.
    pub brain: Brain,
    /// Fitness of the last evaluation.
    pub fitness: f32,
}

impl BrainGenome {
    /// Wraps a brain with zero fitness.
    pub fn new(brain: Brain) -> Self {
        Self {
            brain,
            fitness: 0.0,
        }
    }
}

impl Genome for BrainGenome {
    type Network = Brain;

    fn build_network(&self) -> Brain {
        self.brain.clone()
    }

    fn fitness_mut(&mut self) -> &mut f32 {
        &mut self.fitness
    }
}

/// Fitness summary of one evaluated generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation index, starting at zero.
    pub generation: u32,
    /// Highest fitness in the generation.
    pub best_fitness: f32,
    /// Mean fitness of the generation.
    pub mean_fitness: f32,
    /// Genome that scored `best_fitness`.
    pub best_id: GenomeId,
}

/// Whether training should go on after a generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Breed the next generation.
    Continue,
    /// Stop training now.
    Stop,
}

/// A population of brain genomes.
#[derive(Debug, Clone)]
pub struct Population {
    genomes: Vec<(GenomeId, BrainGenome)>,
    next_id: GenomeId,
    generation: u32,
    params: EvolutionParams,
    best: Option<(GenomeId, BrainGenome)>,
    history: Vec<GenerationStats>,
}

impl Population {
    /// Seeds a population of random brains.
    pub fn new(params: &EvolutionParams) -> Self {
        let genomes: Vec<_> = (0..params.population_size)
            .map(|id| {
                (
                    id,
                    BrainGenome::new(Brain::new(&params.layer_sizes, params.init_scale)),
                )
            })
            .collect();

        Self {
            next_id: genomes.len(),
            genomes,
            generation: 0,
            params: params.clone(),
            best: None,
            history: Vec::new(),
        }
    }

    /// Genomes of the current generation.
    pub fn genomes(&self) -> &[(GenomeId, BrainGenome)] {
        &self.genomes
    }

    /// Mutable genomes of the current generation, as handed to the evaluator.
    pub fn genomes_mut(&mut self) -> &mut [(GenomeId, BrainGenome)] {
        &mut self.genomes
    }

    /// Index of the current generation.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Best genome seen across all recorded generations.
    pub fn best(&self) -> Option<&BrainGenome> {
        self.best.as_ref().map(|(_, genome)| genome)
    }

    /// Stats of every recorded generation.
    pub fn history(&self) -> &[GenerationStats] {
        &self.history
    }

    /// Whether the best genome reached the fitness threshold.
    pub fn reached_threshold(&self) -> bool {
        self.best()
            .is_some_and(|genome| genome.fitness >= self.params.fitness_threshold)
    }

    /// Records the fitness of the evaluated generation.
    ///
    /// Returns `None` for an empty population.
    pub fn record(&mut self) -> Option<GenerationStats> {
        let (best_id, best_genome) = self
            .genomes
            .iter()
            .max_by(|a, b| a.1.fitness.total_cmp(&b.1.fitness))
            .map(|(id, genome)| (*id, genome.clone()))?;

        let mean_fitness = self.genomes.iter().map(|(_, g)| g.fitness).sum::<f32>()
            / self.genomes.len() as f32;

        let stats = GenerationStats {
            generation: self.generation,
            best_fitness: best_genome.fitness,
            mean_fitness,
            best_id,
        };

        if self
            .best
            .as_ref()
            .is_none_or(|(_, best)| best_genome.fitness > best.fitness)
        {
            self.best = Some((best_id, best_genome));
        }

        info!(
            generation = stats.generation,
            best = stats.best_fitness,
            mean = stats.mean_fitness,
            best_id,
            "generation evaluated"
        );
        self.history.push(stats);
        Some(stats)
    }

    /// Replaces the population with the next generation.
    ///
    /// Elites survive unchanged (fitness reset); the rest are bred from the
    /// top `parent_fraction` by weighted crossover or cloning, then mutated.
    pub fn evolve<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.genomes.is_empty() {
            return;
        }
        let mut ranked = std::mem::take(&mut self.genomes);
        ranked.sort_by(|a, b| b.1.fitness.total_cmp(&a.1.fitness));

        let size = self.params.population_size;
        let parents = ((ranked.len() as f32 * self.params.parent_fraction).ceil() as usize)
            .clamp(1, ranked.len());

        let mut next: Vec<(GenomeId, BrainGenome)> = ranked
            .iter()
            .take(self.params.elitism.min(size))
            .map(|(id, genome)| (*id, BrainGenome::new(genome.brain.clone())))
            .collect();

        while next.len() < size {
            let parent_1_idx = rng.random_range(0..parents);
            let parent_1 = &ranked[parent_1_idx].1;

            let mut brain = if parents >= 2 && rng.random::<f32>() < self.params.crossover_prob {
                let mut parent_2_idx = rng.random_range(0..parents);
                while parent_2_idx == parent_1_idx {
                    parent_2_idx = rng.random_range(0..parents);
                }
                let parent_2 = &ranked[parent_2_idx].1;
                Brain::crossover_weighted(&parent_1.brain, &parent_2.brain, rng.random::<f32>())
            } else {
                parent_1.brain.clone()
            };
            brain.mutate(sample_mutation_scale(rng));

            next.push((self.next_id, BrainGenome::new(brain)));
            self.next_id += 1;
        }

        self.genomes = next;
        self.generation += 1;
    }

    /// Runs up to `max_generations` generations.
    ///
    /// `evaluate` is called once per generation with the full population and
    /// must leave every genome's fitness populated. Training stops early when
    /// it returns [`Control::Stop`] or the fitness threshold is reached.
    /// Returns the best genome seen.
    pub fn run<R, F, E>(
        &mut self,
        max_generations: u32,
        rng: &mut R,
        mut evaluate: F,
    ) -> Result<Option<BrainGenome>, E>
    where
        R: Rng + ?Sized,
        F: FnMut(&mut [(GenomeId, BrainGenome)], &mut R) -> Result<Control, E>,
    {
        for _ in 0..max_generations {
            let control = evaluate(self.genomes.as_mut_slice(), rng)?;
            self.record();
            if control == Control::Stop || self.reached_threshold() {
                break;
            }
            self.evolve(rng);
        }
        Ok(self.best().cloned())
    }
}

/// Samples a mutation scale log-uniformly.
fn sample_mutation_scale<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    let min = 0.01f32;
    let max = 0.5f32;
    let log_mutation_scale = rng.random_range(min.ln()..max.ln());
    log_mutation_scale.exp()
}
