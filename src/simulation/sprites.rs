//! Procedurally painted sprite sheet.
//!
//! The sprites double as collision geometry: every opacity mask used by the
//! simulation is derived from the same pixels the renderer uploads.

use super::mask::Mask;

/// Bird sprite width in pixels.
pub const BIRD_WIDTH: usize = 68;
/// Bird sprite height in pixels.
pub const BIRD_HEIGHT: usize = 48;
/// Pipe sprite width in pixels.
pub const PIPE_WIDTH: usize = 104;
/// Pipe sprite height in pixels.
pub const PIPE_HEIGHT: usize = 640;
/// Ground tile width in pixels.
pub const GROUND_WIDTH: usize = 672;
/// Ground tile height in pixels.
pub const GROUND_HEIGHT: usize = 224;

/// Number of bird animation frames.
pub const BIRD_FRAMES: usize = 3;
/// Ticks each animation frame stays on screen.
pub const ANIMATION_TIME: u64 = 5;

const PIPE_LIP_HEIGHT: usize = 40;
const PIPE_BODY_INSET: usize = 6;

/// An RGBA8 image.
#[derive(Debug, Clone)]
pub struct Sprite {
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
    /// Tightly packed RGBA8 pixels, row-major.
    pub rgba: Vec<u8>,
}

impl Sprite {
    fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            rgba: vec![0; width * height * 4],
        }
    }

    fn paint(&mut self, color: [u8; 4], inside: impl Fn(f32, f32) -> bool) {
        for y in 0..self.height {
            for x in 0..self.width {
                // sample at pixel centres
                if inside(x as f32 + 0.5, y as f32 + 0.5) {
                    let i = (y * self.width + x) * 4;
                    self.rgba[i..i + 4].copy_from_slice(&color);
                }
            }
        }
    }

    fn flipped_vertically(&self) -> Self {
        let row = self.width * 4;
        let rgba = self
            .rgba
            .chunks_exact(row)
            .rev()
            .flatten()
            .copied()
            .collect();
        Self {
            width: self.width,
            height: self.height,
            rgba,
        }
    }

    /// Derives the opacity mask of this sprite.
    pub fn mask(&self) -> Mask {
        Mask::from_rgba(self.width, self.height, &self.rgba)
    }
}

fn ellipse(cx: f32, cy: f32, rx: f32, ry: f32) -> impl Fn(f32, f32) -> bool {
    move |x, y| ((x - cx) / rx).powi(2) + ((y - cy) / ry).powi(2) <= 1.0
}

fn paint_bird(wing_offset: f32) -> Sprite {
    let mut bird = Sprite::blank(BIRD_WIDTH, BIRD_HEIGHT);
    bird.paint([84, 56, 71, 255], ellipse(34.0, 24.0, 30.0, 20.0));
    bird.paint([247, 182, 44, 255], ellipse(34.0, 24.0, 27.0, 17.0));
    bird.paint([250, 250, 250, 255], ellipse(46.0, 16.0, 7.0, 7.0));
    bird.paint([30, 30, 30, 255], ellipse(48.0, 16.0, 3.0, 3.0));
    bird.paint([252, 120, 88, 255], |x, y| {
        (52.0..66.0).contains(&x) && (24.0..32.0).contains(&y)
    });
    // The wing stays inside the body outline so every frame shares one mask.
    bird.paint([250, 236, 200, 255], ellipse(20.0, 24.0 + wing_offset, 10.0, 6.0));
    bird
}

fn paint_pipe() -> Sprite {
    let mut pipe = Sprite::blank(PIPE_WIDTH, PIPE_HEIGHT);
    let body_end = (PIPE_WIDTH - PIPE_BODY_INSET) as f32;
    pipe.paint([84, 56, 71, 255], |x, _| {
        x >= PIPE_BODY_INSET as f32 && x < body_end
    });
    pipe.paint([116, 191, 46, 255], |x, _| {
        x >= (PIPE_BODY_INSET + 3) as f32 && x < body_end - 3.0
    });
    pipe.paint([158, 228, 89, 255], |x, _| {
        x >= (PIPE_BODY_INSET + 10) as f32 && x < (PIPE_BODY_INSET + 18) as f32
    });
    // lip at the open end
    pipe.paint([84, 56, 71, 255], |_, y| y < PIPE_LIP_HEIGHT as f32);
    pipe.paint([116, 191, 46, 255], |x, y| {
        y >= 3.0 && y < (PIPE_LIP_HEIGHT - 3) as f32 && x >= 3.0 && x < (PIPE_WIDTH - 3) as f32
    });
    pipe
}

fn paint_ground() -> Sprite {
    let mut ground = Sprite::blank(GROUND_WIDTH, GROUND_HEIGHT);
    ground.paint([222, 216, 149, 255], |_, _| true);
    ground.paint([115, 191, 46, 255], |_, y| y < 18.0);
    ground.paint([84, 56, 71, 255], |_, y| y < 3.0);
    ground.paint([158, 228, 89, 255], |x, y| {
        (3.0..15.0).contains(&y) && (x + y) % 24.0 < 12.0
    });
    ground
}

/// All sprites and their masks, built once and shared by reference.
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    /// Bird animation frames.
    pub bird_frames: [Sprite; BIRD_FRAMES],
    /// Upward-facing pipe (lip on top), used for the lower half of an obstacle.
    pub pipe_bottom: Sprite,
    /// Downward-facing pipe, used for the upper half of an obstacle.
    pub pipe_top: Sprite,
    /// One ground tile.
    pub ground: Sprite,
    bird_mask: Mask,
    pipe_bottom_mask: Mask,
    pipe_top_mask: Mask,
}

impl Default for SpriteSheet {
    fn default() -> Self {
        Self::new()
    }
}

impl SpriteSheet {
    /// Paints every sprite and derives the collision masks.
    pub fn new() -> Self {
        let bird_frames = [paint_bird(-6.0), paint_bird(0.0), paint_bird(6.0)];
        let pipe_bottom = paint_pipe();
        let pipe_top = pipe_bottom.flipped_vertically();
        let bird_mask = bird_frames[0].mask();
        let pipe_bottom_mask = pipe_bottom.mask();
        let pipe_top_mask = pipe_bottom_mask.flipped_vertically();

        Self {
            bird_frames,
            pipe_bottom,
            pipe_top,
            ground: paint_ground(),
            bird_mask,
            pipe_bottom_mask,
            pipe_top_mask,
        }
    }

    /// Collision mask of the bird, identical for every animation frame.
    pub fn bird_mask(&self) -> &Mask {
        &self.bird_mask
    }

    /// Collision mask of the upper obstacle half.
    pub fn pipe_top_mask(&self) -> &Mask {
        &self.pipe_top_mask
    }

    /// Collision mask of the lower obstacle half.
    pub fn pipe_bottom_mask(&self) -> &Mask {
        &self.pipe_bottom_mask
    }
}

/// Picks the animation frame for a bird. Purely cosmetic.
///
/// Frames cycle 0, 1, 2, 1 every [`ANIMATION_TIME`] ticks; a diving bird
/// holds its wings level.
pub fn bird_frame(tick: u64, tilt: f32) -> usize {
    if tilt <= -80.0 {
        return 1;
    }
    match (tick % (ANIMATION_TIME * 4)) / ANIMATION_TIME {
        0 => 0,
        2 => 2,
        _ => 1,
    }
}
