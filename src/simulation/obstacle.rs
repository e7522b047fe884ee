//! A single pipe pair with a passable gap.

use rand::Rng;

use super::agent::Agent;
use super::sprites::{self, SpriteSheet};

/// Lowest gap-center height, inclusive.
pub const MIN_GAP_CENTER: i32 = 50;
/// Highest gap-center height, exclusive.
pub const MAX_GAP_CENTER: i32 = 450;

/// An obstacle: an upper and a lower pipe separated by a fixed gap.
///
/// `height` is where the upper pipe ends; the lower pipe starts `gap`
/// pixels below it.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    /// Left edge, decreasing every tick.
    pub x: f32,
    /// Gap-center height chosen at creation.
    pub height: f32,
    /// Top edge of the upper pipe sprite (usually negative).
    pub top: f32,
    /// Top edge of the lower pipe sprite.
    pub bottom: f32,
    /// Set once the lead agent has flown past; never reset.
    pub passed: bool,
}

impl Obstacle {
    /// Creates an obstacle at `x` with a random gap-center in `[50, 450)`.
    pub fn new<R: Rng + ?Sized>(x: f32, gap: f32, rng: &mut R) -> Self {
        let height = rng.random_range(MIN_GAP_CENTER..MAX_GAP_CENTER) as f32;
        Self::with_height(x, height, gap)
    }

    /// Creates an obstacle with a fixed gap-center.
    pub fn with_height(x: f32, height: f32, gap: f32) -> Self {
        Self {
            x,
            height,
            top: height - sprites::PIPE_HEIGHT as f32,
            bottom: height + gap,
            passed: false,
        }
    }

    /// Scrolls the obstacle left by `velocity` pixels.
    pub fn advance(&mut self, velocity: f32) {
        self.x -= velocity;
    }

    /// Right edge of the pipes.
    pub fn trailing_edge(&self) -> f32 {
        self.x + sprites::PIPE_WIDTH as f32
    }

    /// Whether the pipes have fully left the playfield.
    pub fn is_offscreen(&self) -> bool {
        self.trailing_edge() < 0.0
    }

    /// Pixel-accurate collision between the bird and either pipe.
    pub fn collides(&self, agent: &Agent, sheet: &SpriteSheet) -> bool {
        let bird = agent.mask(sheet);
        let dx = (self.x - agent.x).round() as i32;
        let agent_y = agent.y.round();
        let top_offset = (dx, (self.top - agent_y).round() as i32);
        let bottom_offset = (dx, (self.bottom - agent_y).round() as i32);

        bird.overlaps(sheet.pipe_bottom_mask(), bottom_offset)
            || bird.overlaps(sheet.pipe_top_mask(), top_offset)
    }
}
