use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::network::INPUT_SIZE;
use crate::error::ConfigError;

/// Game parameters shared by training and playback.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Playfield width; new obstacles spawn at this x.
    pub width: f32,
    /// Playfield height.
    pub height: f32,
    /// Top edge of the ground strip.
    pub floor_y: f32,
    /// Agent spawn x, fixed for the whole run.
    pub spawn_x: f32,
    /// Agent spawn y.
    pub spawn_y: f32,
    /// X of the first obstacle of a run.
    pub first_obstacle_x: f32,
    /// Vertical distance between the upper and lower pipe.
    pub obstacle_gap: f32,
    /// Scroll speed of obstacles and ground in pixels per tick.
    pub scroll_velocity: f32,
    /// Logical ticks per second when running in a window.
    pub tick_rate: f32,
    /// Network output above which the agent jumps.
    pub jump_threshold: f32,
    /// Fitness added to every surviving agent each tick.
    pub survival_bonus: f32,
    /// Fitness removed from an agent that hits an obstacle.
    pub collision_penalty: f32,
    /// Fitness added to every survivor when an obstacle is passed.
    pub passage_reward: f32,
    /// A generation ends early once the score exceeds this value.
    pub score_threshold: u32,
    /// Agents above this y have flown off the top.
    pub ceiling_y: f32,
    /// Pixels of the sprite's lower edge allowed to overlap the ground.
    pub ground_inset: f32,
    /// Where the best network is written on an early success exit.
    pub artifact_path: PathBuf,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 800.0,
            floor_y: 730.0,
            spawn_x: 230.0,
            spawn_y: 350.0,
            first_obstacle_x: 700.0,
            obstacle_gap: 200.0,
            scroll_velocity: 5.0,
            tick_rate: 30.0,
            jump_threshold: 0.5,
            survival_bonus: 0.1,
            collision_penalty: 1.0,
            passage_reward: 5.0,
            score_threshold: 20,
            ceiling_y: -50.0,
            ground_inset: 10.0,
            artifact_path: PathBuf::from("best_bird.bin"),
        }
    }
}

/// Parameters of the bundled evolutionary algorithm.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionParams {
    /// Genomes per generation.
    pub population_size: usize,
    /// Upper bound on generations per training run.
    pub max_generations: u32,
    /// Training stops once the best genome reaches this fitness.
    pub fitness_threshold: f32,
    /// Network layer dimensions, input first.
    pub layer_sizes: Vec<usize>,
    /// Half-width of the uniform distribution for initial weights.
    pub init_scale: f32,
    /// Number of top genomes copied unchanged into the next generation.
    pub elitism: usize,
    /// Fraction of the ranked population eligible as parents.
    pub parent_fraction: f32,
    /// Probability that a child is bred by crossover rather than cloned.
    pub crossover_prob: f32,
}

impl Default for EvolutionParams {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_generations: 50,
            fitness_threshold: 100.0,
            layer_sizes: vec![INPUT_SIZE, 1],
            init_scale: 1.0,
            elitism: 2,
            parent_fraction: 0.2,
            crossover_prob: 0.5,
        }
    }
}

/// Full configuration as read from disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Game parameters.
    pub simulation: Params,
    /// Evolutionary algorithm parameters.
    pub evolution: EvolutionParams,
}

impl Config {
    /// Loads and validates a JSON configuration file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration as pretty-printed JSON.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Rejects values the simulation or the algorithm cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sim = &self.simulation;
        let evo = &self.evolution;

        if sim.width <= 0.0 || sim.height <= 0.0 {
            return Err(ConfigError::Invalid("playfield must have a positive size".into()));
        }
        if sim.floor_y <= 0.0 || sim.floor_y > sim.height {
            return Err(ConfigError::Invalid("floor_y must lie inside the playfield".into()));
        }
        if sim.obstacle_gap <= 0.0 || sim.obstacle_gap >= sim.floor_y {
            return Err(ConfigError::Invalid(
                "obstacle_gap must be positive and smaller than floor_y".into(),
            ));
        }
        if sim.scroll_velocity <= 0.0 {
            return Err(ConfigError::Invalid("scroll_velocity must be positive".into()));
        }
        if sim.tick_rate <= 0.0 {
            return Err(ConfigError::Invalid("tick_rate must be positive".into()));
        }
        if evo.population_size == 0 {
            return Err(ConfigError::Invalid("population_size must be at least 1".into()));
        }
        if evo.layer_sizes.len() < 2 || evo.layer_sizes[0] != INPUT_SIZE {
            return Err(ConfigError::Invalid(format!(
                "layer_sizes must start with {INPUT_SIZE} inputs and name an output layer"
            )));
        }
        if evo.layer_sizes.contains(&0) {
            return Err(ConfigError::Invalid("layer_sizes must not contain zero".into()));
        }
        if evo.init_scale <= 0.0 {
            return Err(ConfigError::Invalid("init_scale must be positive".into()));
        }
        if evo.elitism > evo.population_size {
            return Err(ConfigError::Invalid("elitism exceeds population_size".into()));
        }
        if !(evo.parent_fraction > 0.0 && evo.parent_fraction <= 1.0) {
            return Err(ConfigError::Invalid("parent_fraction must be in (0, 1]".into()));
        }
        if !(0.0..=1.0).contains(&evo.crossover_prob) {
            return Err(ConfigError::Invalid("crossover_prob must be in [0, 1]".into()));
        }
        Ok(())
    }
}
