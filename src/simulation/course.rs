//! The playfield every agent of a run shares: obstacles, ground and score.

use ndarray::Array1;
use rand::Rng;

use super::agent::Agent;
use super::ground::Ground;
use super::params::Params;
use super::sprites::{self, SpriteSheet};
use super::stream::ObstacleStream;

/// Shared per-run world state.
#[derive(Debug, Clone)]
pub struct Course {
    /// Obstacles in spawn order.
    pub stream: ObstacleStream,
    /// Scrolling ground strip.
    pub ground: Ground,
    /// Obstacles passed so far, shared by every agent.
    pub score: u32,
}

impl Course {
    /// Creates a fresh course with one obstacle at the configured start.
    pub fn new<R: Rng + ?Sized>(params: &Params, rng: &mut R) -> Self {
        let stream = ObstacleStream::new(
            params.first_obstacle_x,
            params.width,
            params.obstacle_gap,
            params.scroll_velocity,
            rng,
        );
        Self::with_stream(stream, params)
    }

    /// Creates a course around a prepared obstacle stream.
    pub fn with_stream(stream: ObstacleStream, params: &Params) -> Self {
        Self {
            stream,
            ground: Ground::new(
                params.floor_y,
                sprites::GROUND_WIDTH as f32,
                params.scroll_velocity,
            ),
            score: 0,
        }
    }

    /// Network inputs for `agent`: its height and the distances to the
    /// active obstacle's gap edges.
    ///
    /// Returns `None` when no obstacle is on the course.
    pub fn sense(&self, agent: &Agent) -> Option<Array1<f32>> {
        let obstacle = self.stream.active(agent.x)?;
        Some(Array1::from_vec(vec![
            agent.y,
            (agent.y - obstacle.height).abs(),
            (agent.y - obstacle.bottom).abs(),
        ]))
    }

    /// Scrolls obstacles and ground by one tick.
    pub fn advance(&mut self) {
        self.ground.advance();
        self.stream.advance();
    }

    /// Whether `agent` overlaps any obstacle.
    pub fn collides(&self, agent: &Agent, sheet: &SpriteSheet) -> bool {
        self.stream
            .obstacles()
            .iter()
            .any(|obstacle| obstacle.collides(agent, sheet))
    }

    /// Whether `agent` touched the ground or flew off the top.
    pub fn out_of_bounds(&self, agent: &Agent, params: &Params) -> bool {
        agent.bottom() - params.ground_inset >= self.ground.y || agent.y < params.ceiling_y
    }

    /// Handles at most one obstacle passage for the agents at `agent_xs`.
    ///
    /// On passage the obstacle is marked, one new obstacle is spawned and
    /// the score goes up by one.
    pub fn resolve_passage<R: Rng + ?Sized>(
        &mut self,
        agent_xs: impl IntoIterator<Item = f32>,
        rng: &mut R,
    ) -> bool {
        if !self.stream.mark_passage(agent_xs) {
            return false;
        }
        self.stream.spawn(rng);
        self.score += 1;
        true
    }

    /// Drops obstacles that scrolled off the left edge.
    pub fn retire_offscreen(&mut self) -> usize {
        self.stream.retire_offscreen()
    }
}
