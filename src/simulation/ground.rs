//! Infinitely scrolling ground strip.

/// Two tiles leapfrogging each other to the left.
#[derive(Debug, Clone, PartialEq)]
pub struct Ground {
    /// Top edge of the strip; also the lower collision boundary.
    pub y: f32,
    /// Left edge of the first tile.
    pub x1: f32,
    /// Left edge of the second tile.
    pub x2: f32,
    width: f32,
    velocity: f32,
}

impl Ground {
    /// Creates the strip with the first tile at the left edge.
    pub fn new(y: f32, tile_width: f32, velocity: f32) -> Self {
        Self {
            y,
            x1: 0.0,
            x2: tile_width,
            width: tile_width,
            velocity,
        }
    }

    /// Scrolls both tiles, moving any tile that left the screen behind the other.
    pub fn advance(&mut self) {
        self.x1 -= self.velocity;
        self.x2 -= self.velocity;

        if self.x1 + self.width < 0.0 {
            self.x1 = self.x2 + self.width;
        }
        if self.x2 + self.width < 0.0 {
            self.x2 = self.x1 + self.width;
        }
    }

    /// Tile width in pixels.
    pub fn tile_width(&self) -> f32 {
        self.width
    }
}
