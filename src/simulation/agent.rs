//! Bird physics: gravity, jump impulse and tilt.
//!
//! Motion is tick-based. Each tick the displacement is derived from the
//! velocity at the last impulse and the number of ticks since then, so a
//! jump always produces the same arc regardless of frame rate.

use super::mask::Mask;
use super::sprites::{self, SpriteSheet};

/// Upward velocity applied by a jump.
pub const JUMP_VELOCITY: f32 = -10.5;
/// Gravity coefficient applied to the squared tick count.
pub const GRAVITY: f32 = 1.5;
/// Maximum downward displacement per tick.
pub const TERMINAL_DISPLACEMENT: f32 = 16.0;
/// Extra lift applied while rising.
pub const ASCENT_BOOST: f32 = 2.0;
/// Maximum upward tilt in degrees.
pub const MAX_ROTATION: f32 = 25.0;
/// Maximum downward tilt in degrees.
pub const MIN_ROTATION: f32 = -90.0;
/// Tilt change per tick while diving, in degrees.
pub const ROTATION_VELOCITY: f32 = 20.0;
/// Distance below the launch height after which the bird starts to dive.
pub const DIVE_MARGIN: f32 = 50.0;

/// A bird controlled by a network decision each tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    /// Horizontal position, fixed for the whole run.
    pub x: f32,
    /// Vertical position of the sprite's top edge (screen coordinates, y down).
    pub y: f32,
    /// Visual tilt in degrees, positive is nose up.
    pub tilt: f32,
    /// Velocity set by the last impulse.
    pub velocity: f32,
    /// Ticks elapsed since the last impulse.
    pub tick_count: u32,
    /// Height recorded at the last impulse; drives the tilt policy.
    pub launch_height: f32,
}

impl Agent {
    /// Creates a resting bird at the spawn point.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            tilt: 0.0,
            velocity: 0.0,
            tick_count: 0,
            launch_height: y,
        }
    }

    /// Applies an upward impulse.
    pub fn jump(&mut self) {
        self.velocity = JUMP_VELOCITY;
        self.tick_count = 0;
        self.launch_height = self.y;
    }

    /// Advances the bird by one tick and returns the applied displacement.
    pub fn advance(&mut self) -> f32 {
        self.tick_count += 1;
        let t = self.tick_count as f32;

        let mut displacement = self.velocity * t + GRAVITY * t * t;
        if displacement >= TERMINAL_DISPLACEMENT {
            displacement = TERMINAL_DISPLACEMENT;
        }
        if displacement < 0.0 {
            displacement -= ASCENT_BOOST;
        }

        self.y += displacement;

        if displacement < 0.0 || self.y < self.launch_height + DIVE_MARGIN {
            if self.tilt < MAX_ROTATION {
                self.tilt = MAX_ROTATION;
            }
        } else if self.tilt > MIN_ROTATION {
            self.tilt = (self.tilt - ROTATION_VELOCITY).max(MIN_ROTATION);
        }

        displacement
    }

    /// Collision mask of the bird's current frame.
    #[allow(clippy::unused_self)]
    pub fn mask<'s>(&self, sheet: &'s SpriteSheet) -> &'s Mask {
        sheet.bird_mask()
    }

    /// Lower visual edge of the sprite.
    pub fn bottom(&self) -> f32 {
        self.y + sprites::BIRD_HEIGHT as f32
    }

    /// Centre of the sprite, used as the anchor for debug lines.
    pub fn center(&self) -> (f32, f32) {
        (
            self.x + sprites::BIRD_WIDTH as f32 / 2.0,
            self.y + sprites::BIRD_HEIGHT as f32 / 2.0,
        )
    }
}
