#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use flappy_evo::simulation::agent::Agent;
use flappy_evo::simulation::ground::Ground;
use flappy_evo::simulation::obstacle::{MAX_GAP_CENTER, MIN_GAP_CENTER, Obstacle};
use flappy_evo::simulation::sprites::{self, SpriteSheet};
use flappy_evo::simulation::stream::ObstacleStream;
use rand::SeedableRng;
use rand::rngs::StdRng;

const GAP: f32 = 200.0;

fn stream_of(xs: &[f32]) -> ObstacleStream {
    let obstacles = xs
        .iter()
        .map(|&x| Obstacle::with_height(x, 300.0, GAP))
        .collect();
    ObstacleStream::from_obstacles(obstacles, 600.0, GAP, 5.0)
}

#[test]
fn test_random_placement_stays_in_range() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..1000 {
        let obstacle = Obstacle::new(700.0, GAP, &mut rng);
        assert!(obstacle.height >= MIN_GAP_CENTER as f32);
        assert!(obstacle.height < MAX_GAP_CENTER as f32);
        assert_eq!(obstacle.height.fract(), 0.0);
        assert_eq!(obstacle.bottom - obstacle.height, GAP);
        assert_eq!(obstacle.top, obstacle.height - sprites::PIPE_HEIGHT as f32);
        assert!(!obstacle.passed);
    }
}

#[test]
fn test_obstacle_scrolls_and_retires() {
    let mut obstacle = Obstacle::with_height(0.0, 300.0, GAP);

    obstacle.advance(5.0);
    assert_eq!(obstacle.x, -5.0);
    assert_eq!(obstacle.trailing_edge(), 99.0);
    assert!(!obstacle.is_offscreen());

    let edge = Obstacle::with_height(-104.0, 300.0, GAP);
    assert!(!edge.is_offscreen());
    let gone = Obstacle::with_height(-105.0, 300.0, GAP);
    assert!(gone.is_offscreen());
}

#[test]
fn test_bird_in_gap_does_not_collide() {
    let sheet = SpriteSheet::new();
    let obstacle = Obstacle::with_height(230.0, 300.0, GAP);
    let agent = Agent::new(230.0, 350.0);

    assert!(!obstacle.collides(&agent, &sheet));
}

#[test]
fn test_bird_hits_upper_pipe() {
    let sheet = SpriteSheet::new();
    let obstacle = Obstacle::with_height(230.0, 300.0, GAP);
    let agent = Agent::new(230.0, 250.0);

    assert!(obstacle.collides(&agent, &sheet));
}

#[test]
fn test_bird_hits_lower_pipe() {
    let sheet = SpriteSheet::new();
    let obstacle = Obstacle::with_height(230.0, 300.0, GAP);
    let agent = Agent::new(230.0, 470.0);

    assert!(obstacle.collides(&agent, &sheet));
}

#[test]
fn test_distant_obstacle_does_not_collide() {
    let sheet = SpriteSheet::new();
    let obstacle = Obstacle::with_height(600.0, 300.0, GAP);

    // level with the upper pipe, but far to the right
    let agent = Agent::new(230.0, 100.0);
    assert!(!obstacle.collides(&agent, &sheet));
}

#[test]
fn test_active_index() {
    let single = stream_of(&[100.0]);
    assert_eq!(single.active_index(500.0), 0);

    let pair = stream_of(&[100.0, 400.0]);
    // trailing edge of the first obstacle is at 204
    assert_eq!(pair.active_index(200.0), 0);
    assert_eq!(pair.active_index(204.0), 0);
    assert_eq!(pair.active_index(230.0), 1);
    assert_eq!(pair.active(230.0).map(|o| o.x), Some(400.0));

    let empty = stream_of(&[]);
    assert!(empty.active(230.0).is_none());
}

#[test]
fn test_mark_passage_marks_one_obstacle() {
    let mut stream = stream_of(&[100.0, 150.0]);

    assert!(stream.mark_passage([230.0]));
    assert!(stream.obstacles()[0].passed);
    assert!(!stream.obstacles()[1].passed);

    assert!(stream.mark_passage([230.0]));
    assert!(stream.obstacles()[1].passed);

    assert!(!stream.mark_passage([230.0]));
}

#[test]
fn test_mark_passage_needs_an_agent_past_it() {
    let mut stream = stream_of(&[300.0]);

    assert!(!stream.mark_passage([230.0, 250.0]));
    assert!(!stream.mark_passage(std::iter::empty()));
    assert!(stream.mark_passage([230.0, 310.0]));
    assert!(stream.obstacles()[0].passed);
}

#[test]
fn test_spawn_and_retire() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut stream = stream_of(&[-105.0, -104.0]);

    stream.spawn(&mut rng);
    assert_eq!(stream.len(), 3);
    assert_eq!(stream.obstacles()[2].x, 600.0);

    assert_eq!(stream.retire_offscreen(), 1);
    assert_eq!(stream.len(), 2);
    assert_eq!(stream.obstacles()[0].x, -104.0);
}

#[test]
fn test_stream_scrolls_every_obstacle() {
    let mut stream = stream_of(&[100.0, 400.0]);

    stream.advance();
    let xs: Vec<f32> = stream.obstacles().iter().map(|o| o.x).collect();
    assert_eq!(xs, vec![95.0, 395.0]);
}

#[test]
fn test_ground_leapfrogs() {
    let mut ground = Ground::new(730.0, 672.0, 5.0);

    for _ in 0..134 {
        ground.advance();
        assert_eq!((ground.x1 - ground.x2).abs(), 672.0);
    }
    assert_eq!(ground.x1, -670.0);

    ground.advance();
    assert_eq!(ground.x2, -3.0);
    assert_eq!(ground.x1, 669.0);
    assert_eq!(ground.y, 730.0);
}
