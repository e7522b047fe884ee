//! Replays a persisted network with a single bird.
//!
//! Same course rules as training, without fitness bookkeeping or
//! persistence.

use rand::Rng;

use super::agent::Agent;
use super::course::Course;
use super::network::Network;
use super::params::Params;
use super::sprites::SpriteSheet;

/// A single bird flown by a fixed network.
pub struct Playback<'s, N: Network> {
    agent: Agent,
    network: N,
    course: Course,
    params: Params,
    sheet: &'s SpriteSheet,
    tick: u64,
    alive: bool,
}

impl<'s, N: Network> Playback<'s, N> {
    /// Starts a run on a fresh course.
    pub fn new<R: Rng + ?Sized>(
        network: N,
        params: &Params,
        sheet: &'s SpriteSheet,
        rng: &mut R,
    ) -> Self {
        Self::with_course(network, params, sheet, Course::new(params, rng))
    }

    /// Starts a run on a prepared course.
    pub fn with_course(network: N, params: &Params, sheet: &'s SpriteSheet, course: Course) -> Self {
        Self {
            agent: Agent::new(params.spawn_x, params.spawn_y),
            network,
            course,
            params: params.clone(),
            sheet,
            tick: 0,
            alive: true,
        }
    }

    /// The bird.
    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    /// The course.
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

    /// Whether the bird is still flying.
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Advances one tick. Returns whether the bird is still alive.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if !self.alive {
            return false;
        }
        self.tick += 1;

        let jump = self
            .course
            .sense(&self.agent)
            .is_some_and(|inputs| self.network.wants_jump(&inputs, self.params.jump_threshold));
        if jump {
            self.agent.jump();
        }
        self.agent.advance();
        self.course.advance();

        if self.course.collides(&self.agent, self.sheet)
            || self.course.out_of_bounds(&self.agent, &self.params)
        {
            self.alive = false;
        } else {
            self.course.resolve_passage([self.agent.x], rng);
        }
        self.course.retire_offscreen();

        self.alive
    }
}
