use flappy_evo::simulation::agent::Agent;
use flappy_evo::simulation::course::Course;
use flappy_evo::simulation::params::Params;
use flappy_evo::simulation::sprites::{self, Sprite, SpriteSheet};
use macroquad::prelude::*;

const SKY: Color = Color::new(0.31, 0.75, 0.79, 1.0);

trait ToScreen {
    type Output;
    fn to_screen(&self, params: &Params) -> Self::Output;
}

/// Uniform scale from playfield units to pixels. The playfield keeps its
/// aspect ratio and sits at the left edge of the window.
fn scale(params: &Params) -> f32 {
    screen_height() / params.height
}

impl ToScreen for (f32, f32) {
    type Output = Vec2;
    fn to_screen(&self, params: &Params) -> Vec2 {
        vec2(self.0, self.1) * scale(params)
    }
}

/// GPU copies of the sprite sheet.
pub struct Textures {
    birds: Vec<Texture2D>,
    pipe_top: Texture2D,
    pipe_bottom: Texture2D,
    ground: Texture2D,
}

fn upload(sprite: &Sprite) -> Texture2D {
    let texture = Texture2D::from_rgba8(sprite.width as u16, sprite.height as u16, &sprite.rgba);
    texture.set_filter(FilterMode::Nearest);
    texture
}

impl Textures {
    pub fn new(sheet: &SpriteSheet) -> Self {
        Self {
            birds: sheet.bird_frames.iter().map(upload).collect(),
            pipe_top: upload(&sheet.pipe_top),
            pipe_bottom: upload(&sheet.pipe_bottom),
            ground: upload(&sheet.ground),
        }
    }
}

fn draw_sprite(texture: &Texture2D, pos: (f32, f32), size: (f32, f32), rotation: f32, params: &Params) {
    let screen_pos = pos.to_screen(params);
    let screen_size = size.to_screen(params);
    draw_texture_ex(
        texture,
        screen_pos.x,
        screen_pos.y,
        WHITE,
        DrawTextureParams {
            dest_size: Some(screen_size),
            rotation,
            ..Default::default()
        },
    );
}

pub fn draw_course(textures: &Textures, course: &Course, params: &Params) {
    clear_background(SKY);

    let pipe_size = (sprites::PIPE_WIDTH as f32, sprites::PIPE_HEIGHT as f32);
    for obstacle in course.stream.obstacles() {
        draw_sprite(&textures.pipe_top, (obstacle.x, obstacle.top), pipe_size, 0.0, params);
        draw_sprite(&textures.pipe_bottom, (obstacle.x, obstacle.bottom), pipe_size, 0.0, params);
    }

    let ground_size = (course.ground.tile_width(), sprites::GROUND_HEIGHT as f32);
    for x in [course.ground.x1, course.ground.x2] {
        draw_sprite(&textures.ground, (x, course.ground.y), ground_size, 0.0, params);
    }
}

/// Draws a bird rotated about its centre by its tilt.
pub fn draw_bird(textures: &Textures, agent: &Agent, tick: u64, params: &Params) {
    let frame = sprites::bird_frame(tick, agent.tilt);
    let size = (sprites::BIRD_WIDTH as f32, sprites::BIRD_HEIGHT as f32);
    // positive tilt is nose up, macroquad rotates clockwise
    draw_sprite(
        &textures.birds[frame],
        (agent.x, agent.y),
        size,
        -agent.tilt.to_radians(),
        params,
    );
}

/// Lines from the bird to both gap edges of the obstacle it steers for.
pub fn draw_sensor_lines(agent: &Agent, course: &Course, params: &Params) {
    let Some(obstacle) = course.stream.active(agent.x) else {
        return;
    };
    let from = agent.center().to_screen(params);
    let pipe_mid = obstacle.x + sprites::PIPE_WIDTH as f32 / 2.0;
    for y in [obstacle.height, obstacle.bottom] {
        let to = (pipe_mid, y).to_screen(params);
        draw_line(from.x, from.y, to.x, to.y, 3.0, RED);
    }
}

/// Score in the top right, generation and survivor count in the top left.
pub fn draw_labels(score: u32, generation: Option<u32>, alive: Option<usize>, params: &Params) {
    let font_size = 40.0;
    let right_edge = params.width * scale(params);

    let score_text = format!("Score: {}", score);
    let score_size = measure_text(&score_text, None, font_size as u16, 1.0);
    draw_text(
        &score_text,
        right_edge - score_size.width - 15.0,
        40.0,
        font_size,
        WHITE,
    );

    if let Some(generation) = generation {
        draw_text(&format!("Gens: {}", generation), 10.0, 40.0, font_size, WHITE);
    }
    if let Some(alive) = alive {
        draw_text(&format!("Alive: {}", alive), 10.0, 80.0, font_size, WHITE);
    }
}
