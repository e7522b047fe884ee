//! One generation of birds playing on a shared course.
//!
//! Every tick runs the same phases in a fixed order:
//!
//! 1. survival bonus for every surviving agent
//! 2. decision: each network looks at the course (evaluated in parallel)
//! 3. movement of agents, obstacles and ground
//! 4. elimination on collision or leaving the playfield
//! 5. at most one obstacle passage, which spawns one obstacle and rewards survivors
//! 6. retirement of off-screen obstacles and the termination check
//!
//! Agents, their networks and their genomes' fitness accumulators live in a
//! single [`Contestant`] record keyed by genome id, so an elimination
//! removes all three at once.

use std::collections::HashSet;

use rand::Rng;
use rayon::prelude::*;
use tracing::debug;

use super::agent::Agent;
use super::course::Course;
use super::events::{EventQueue, SimulationEvent};
use super::network::{Genome, GenomeId, Network};
use super::params::Params;
use super::sprites::SpriteSheet;

/// A genome's agent and network for the duration of one generation.
pub struct Contestant<'g, G: Genome> {
    /// Identifier of the genome.
    pub id: GenomeId,
    /// The bird.
    pub agent: Agent,
    /// Network built from the genome.
    pub network: G::Network,
    genome: &'g mut G,
}

impl<G: Genome> Contestant<'_, G> {
    fn reward(&mut self, amount: f32) {
        *self.genome.fitness_mut() += amount;
    }
}

/// Where a generation stands after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Agents are still flying.
    Running,
    /// Every agent has been eliminated.
    Extinct,
    /// The score exceeded the threshold while agents were still alive.
    ScoreReached,
}

/// What a single tick did.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Events applied during the tick, in order.
    pub events: Vec<SimulationEvent>,
    /// Status after the tick.
    pub status: Status,
}

/// Per-generation state: contestants, course and tick counter.
pub struct Generation<'g, G: Genome> {
    contestants: Vec<Contestant<'g, G>>,
    course: Course,
    params: Params,
    sheet: &'g SpriteSheet,
    tick: u64,
    status: Status,
}

impl<'g, G: Genome> Generation<'g, G> {
    /// Starts a generation on a fresh course.
    ///
    /// Every genome's fitness is reset to zero and every agent spawns at the
    /// configured spawn point.
    pub fn new<R: Rng + ?Sized>(
        genomes: &'g mut [(GenomeId, G)],
        params: &Params,
        sheet: &'g SpriteSheet,
        rng: &mut R,
    ) -> Self {
        let course = Course::new(params, rng);
        Self::with_course(genomes, params, sheet, course)
    }

    /// Starts a generation on a prepared course.
    pub fn with_course(
        genomes: &'g mut [(GenomeId, G)],
        params: &Params,
        sheet: &'g SpriteSheet,
        course: Course,
    ) -> Self {
        let contestants: Vec<_> = genomes
            .iter_mut()
            .map(|(id, genome)| {
                *genome.fitness_mut() = 0.0;
                Contestant {
                    id: *id,
                    agent: Agent::new(params.spawn_x, params.spawn_y),
                    network: genome.build_network(),
                    genome,
                }
            })
            .collect();

        let status = if contestants.is_empty() {
            Status::Extinct
        } else {
            Status::Running
        };

        Self {
            contestants,
            course,
            params: params.clone(),
            sheet,
            tick: 0,
            status,
        }
    }

    /// Surviving contestants in their original order.
    pub fn contestants(&self) -> &[Contestant<'g, G>] {
        &self.contestants
    }

    /// Number of surviving agents.
    pub fn alive(&self) -> usize {
        self.contestants.len()
    }

    /// The shared course.
    pub fn course(&self) -> &Course {
        &self.course
    }

    /// Obstacles passed so far.
    pub fn score(&self) -> u32 {
        self.course.score
    }

    /// Ticks simulated so far.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Current status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Whether no further ticks will run.
    pub fn is_finished(&self) -> bool {
        self.status != Status::Running
    }

    /// Parameters this generation runs with.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// The contestant at the head of the surviving set.
    ///
    /// This is the network persisted on an early success exit. It is not
    /// necessarily the fittest survivor.
    pub fn champion(&self) -> Option<&Contestant<'g, G>> {
        self.contestants.first()
    }

    /// Advances the generation by one tick.
    ///
    /// Does nothing once the generation has finished.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> TickReport {
        if self.is_finished() {
            return TickReport {
                events: Vec::new(),
                status: self.status,
            };
        }
        self.tick += 1;

        let bonus = self.params.survival_bonus;
        for contestant in &mut self.contestants {
            contestant.reward(bonus);
        }

        // decision phase only reads shared state
        let course = &self.course;
        let threshold = self.params.jump_threshold;
        let jumps: Vec<bool> = self
            .contestants
            .par_iter()
            .map(|contestant| {
                course
                    .sense(&contestant.agent)
                    .is_some_and(|inputs| contestant.network.wants_jump(&inputs, threshold))
            })
            .collect();

        for (contestant, jump) in self.contestants.iter_mut().zip(jumps) {
            if jump {
                contestant.agent.jump();
            }
            contestant.agent.advance();
        }
        self.course.advance();

        let mut queue = EventQueue::new();
        for contestant in &self.contestants {
            if self.course.collides(&contestant.agent, self.sheet) {
                queue.push(SimulationEvent::Collided { id: contestant.id });
            } else if self.course.out_of_bounds(&contestant.agent, &self.params) {
                queue.push(SimulationEvent::LeftBounds { id: contestant.id });
            }
        }
        let mut events = self.apply_events(&mut queue);

        let agent_xs = self.contestants.iter().map(|c| c.agent.x);
        if self.course.resolve_passage(agent_xs, rng) {
            queue.push(SimulationEvent::ObstaclePassed {
                score: self.course.score,
            });
            events.extend(self.apply_events(&mut queue));
        }

        self.course.retire_offscreen();

        self.status = if self.contestants.is_empty() {
            Status::Extinct
        } else if self.course.score > self.params.score_threshold {
            Status::ScoreReached
        } else {
            Status::Running
        };

        TickReport {
            events,
            status: self.status,
        }
    }

    /// Ticks until every agent is gone or the score threshold is exceeded.
    pub fn run_to_end<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Status {
        while !self.is_finished() {
            self.tick(rng);
        }
        self.status
    }

    fn apply_events(&mut self, queue: &mut EventQueue) -> Vec<SimulationEvent> {
        let mut removed = HashSet::new();
        let mut applied = Vec::new();

        for event in queue.drain() {
            match event {
                SimulationEvent::Collided { id } => {
                    let penalty = self.params.collision_penalty;
                    if let Some(contestant) = self.contestants.iter_mut().find(|c| c.id == id) {
                        contestant.reward(-penalty);
                    }
                    removed.insert(id);
                }
                SimulationEvent::LeftBounds { id } => {
                    removed.insert(id);
                }
                SimulationEvent::ObstaclePassed { .. } => {
                    let reward = self.params.passage_reward;
                    for contestant in &mut self.contestants {
                        contestant.reward(reward);
                    }
                }
            }
            debug!(tick = self.tick, ?event, "simulation event");
            applied.push(event);
        }

        if !removed.is_empty() {
            self.contestants.retain(|c| !removed.contains(&c.id));
        }
        applied
    }
}
