//! Ordered stream of obstacles, earliest spawned first.

use rand::Rng;

use super::obstacle::Obstacle;

/// Manages spawning, scrolling and retiring obstacles.
#[derive(Debug, Clone)]
pub struct ObstacleStream {
    obstacles: Vec<Obstacle>,
    spawn_x: f32,
    gap: f32,
    velocity: f32,
}

impl ObstacleStream {
    /// Creates a stream holding a single obstacle at `first_x`.
    pub fn new<R: Rng + ?Sized>(
        first_x: f32,
        spawn_x: f32,
        gap: f32,
        velocity: f32,
        rng: &mut R,
    ) -> Self {
        Self::from_obstacles(vec![Obstacle::new(first_x, gap, rng)], spawn_x, gap, velocity)
    }

    /// Creates a stream from pre-placed obstacles.
    pub fn from_obstacles(obstacles: Vec<Obstacle>, spawn_x: f32, gap: f32, velocity: f32) -> Self {
        Self {
            obstacles,
            spawn_x,
            gap,
            velocity,
        }
    }

    /// All live obstacles in spawn order.
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Number of live obstacles.
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    /// Whether no obstacle is live.
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Index of the obstacle an agent at `agent_x` should steer for.
    ///
    /// The earliest obstacle is used until the agent has flown past its
    /// trailing edge and a second one exists.
    pub fn active_index(&self, agent_x: f32) -> usize {
        match self.obstacles.as_slice() {
            [first, _, ..] if agent_x > first.trailing_edge() => 1,
            _ => 0,
        }
    }

    /// The obstacle an agent at `agent_x` should steer for.
    pub fn active(&self, agent_x: f32) -> Option<&Obstacle> {
        self.obstacles.get(self.active_index(agent_x))
    }

    /// Scrolls every obstacle left.
    pub fn advance(&mut self) {
        for obstacle in &mut self.obstacles {
            obstacle.advance(self.velocity);
        }
    }

    /// Marks the lead unpassed obstacle as passed if it is left of any of
    /// `agent_xs`. At most one obstacle is marked per call.
    pub fn mark_passage(&mut self, agent_xs: impl IntoIterator<Item = f32>) -> bool {
        let Some(lead) = self.obstacles.iter_mut().find(|o| !o.passed) else {
            return false;
        };
        if agent_xs.into_iter().any(|x| lead.x < x) {
            lead.passed = true;
            return true;
        }
        false
    }

    /// Appends a new obstacle at the spawn position.
    pub fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.obstacles.push(Obstacle::new(self.spawn_x, self.gap, rng));
    }

    /// Removes obstacles whose trailing edge has left the playfield.
    ///
    /// Returns how many were removed.
    pub fn retire_offscreen(&mut self) -> usize {
        let before = self.obstacles.len();
        self.obstacles.retain(|o| !o.is_offscreen());
        before - self.obstacles.len()
    }
}
