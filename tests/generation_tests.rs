#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use flappy_evo::simulation::course::Course;
use flappy_evo::simulation::events::SimulationEvent;
use flappy_evo::simulation::generation::{Generation, Status};
use flappy_evo::simulation::network::{Genome, GenomeId, Network};
use flappy_evo::simulation::obstacle::Obstacle;
use flappy_evo::simulation::params::Params;
use flappy_evo::simulation::sprites::SpriteSheet;
use flappy_evo::simulation::stream::ObstacleStream;
use ndarray::Array1;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Network that always answers the same value.
#[derive(Debug, Clone, Copy)]
struct Constant(f32);

impl Network for Constant {
    fn activate(&self, _inputs: &Array1<f32>) -> Array1<f32> {
        Array1::from_elem(1, self.0)
    }
}

#[derive(Debug, Clone)]
struct FixedGenome {
    output: f32,
    fitness: f32,
}

impl Genome for FixedGenome {
    type Network = Constant;

    fn build_network(&self) -> Constant {
        Constant(self.output)
    }

    fn fitness_mut(&mut self) -> &mut f32 {
        &mut self.fitness
    }
}

const FALLER: f32 = 0.0;
const JUMPER: f32 = 1.0;

fn genomes(outputs: &[(GenomeId, f32)]) -> Vec<(GenomeId, FixedGenome)> {
    outputs
        .iter()
        .map(|&(id, output)| {
            (
                id,
                FixedGenome {
                    output,
                    fitness: 42.0,
                },
            )
        })
        .collect()
}

fn fitness_of(genomes: &[(GenomeId, FixedGenome)], id: GenomeId) -> f32 {
    genomes
        .iter()
        .find(|(gid, _)| *gid == id)
        .map(|(_, g)| g.fitness)
        .unwrap()
}

fn course_with(obstacles: Vec<Obstacle>, params: &Params) -> Course {
    let stream = ObstacleStream::from_obstacles(
        obstacles,
        params.width,
        params.obstacle_gap,
        params.scroll_velocity,
    );
    Course::with_stream(stream, params)
}

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_fitness_is_reset_and_survival_bonus_applied() {
    let params = Params::default();
    let sheet = SpriteSheet::new();
    let mut rng = StdRng::seed_from_u64(1);
    let mut population = genomes(&[(0, FALLER), (1, FALLER)]);

    {
        let mut generation = Generation::new(&mut population, &params, &sheet, &mut rng);
        assert_eq!(generation.status(), Status::Running);
        assert_eq!(generation.alive(), 2);

        let report = generation.tick(&mut rng);
        assert!(report.events.is_empty());
        assert_eq!(report.status, Status::Running);
        assert_eq!(generation.tick_count(), 1);
    }

    assert_close(fitness_of(&population, 0), 0.1);
    assert_close(fitness_of(&population, 1), 0.1);
}

#[test]
fn test_fallers_hit_the_ground_together() {
    let params = Params::default();
    let sheet = SpriteSheet::new();
    let mut rng = StdRng::seed_from_u64(2);
    let mut population = genomes(&[(0, FALLER), (1, FALLER), (2, FALLER), (3, FALLER)]);

    {
        let mut generation = Generation::new(&mut population, &params, &sheet, &mut rng);
        for _ in 0..23 {
            generation.tick(&mut rng);
        }
        assert_eq!(generation.alive(), 4);

        // y reaches 707 on tick 24, past the 730 - 48 + 10 limit
        let report = generation.tick(&mut rng);
        assert_eq!(report.status, Status::Extinct);
        assert_eq!(generation.alive(), 0);
        assert!(generation.champion().is_none());

        let eliminated: Vec<_> = report.events.iter().filter_map(|e| e.eliminated()).collect();
        assert_eq!(eliminated, vec![0, 1, 2, 3]);
        assert!(
            report
                .events
                .iter()
                .all(|e| matches!(e, SimulationEvent::LeftBounds { .. }))
        );
    }

    for id in 0..4 {
        // leaving the playfield carries no penalty
        assert_close(fitness_of(&population, id), 2.4);
    }
}

#[test]
fn test_eliminations_keep_survivor_order() {
    let params = Params::default();
    let sheet = SpriteSheet::new();
    let mut rng = StdRng::seed_from_u64(3);
    let mut population = genomes(&[(10, JUMPER), (11, FALLER), (12, JUMPER)]);

    {
        let mut generation = Generation::new(&mut population, &params, &sheet, &mut rng);
        for _ in 0..24 {
            generation.tick(&mut rng);
        }

        let ids: Vec<_> = generation.contestants().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![10, 12]);
        assert_eq!(generation.champion().map(|c| c.id), Some(10));
        for contestant in generation.contestants() {
            assert_eq!(contestant.agent.y, 350.0 - 11.0 * 24.0);
        }

        // jumpers climb 11 px per tick and leave through the top on tick 37
        assert_eq!(generation.run_to_end(&mut rng), Status::Extinct);
        assert_eq!(generation.tick_count(), 37);
    }

    assert_close(fitness_of(&population, 11), 2.4);
    assert_close(fitness_of(&population, 10), 3.7);
    assert_close(fitness_of(&population, 12), 3.7);
}

#[test]
fn test_collision_costs_fitness() {
    let params = Params::default();
    let sheet = SpriteSheet::new();
    let mut rng = StdRng::seed_from_u64(4);
    let mut population = genomes(&[(0, FALLER)]);

    // lower pipe starts at y 300, right where the bird spawns
    let course = course_with(vec![Obstacle::with_height(230.0, 100.0, 200.0)], &params);
    {
        let mut generation = Generation::with_course(&mut population, &params, &sheet, course);
        let report = generation.tick(&mut rng);

        assert_eq!(report.events, vec![SimulationEvent::Collided { id: 0 }]);
        assert_eq!(report.status, Status::Extinct);
    }

    assert_close(fitness_of(&population, 0), 0.1 - 1.0);
}

#[test]
fn test_passage_rewards_every_survivor_once() {
    let params = Params::default();
    let sheet = SpriteSheet::new();
    let mut rng = StdRng::seed_from_u64(5);
    let mut population = genomes(&[(0, FALLER), (1, FALLER), (2, FALLER)]);

    // the obstacle scrolls to x 115, left of the birds, on the first tick
    let course = course_with(vec![Obstacle::with_height(120.0, 300.0, 200.0)], &params);
    {
        let mut generation = Generation::with_course(&mut population, &params, &sheet, course);
        let report = generation.tick(&mut rng);

        assert_eq!(
            report.events,
            vec![SimulationEvent::ObstaclePassed { score: 1 }]
        );
        assert_eq!(generation.score(), 1);
        assert_eq!(generation.alive(), 3);

        // exactly one obstacle spawned at the playfield edge
        let stream = &generation.course().stream;
        assert_eq!(stream.len(), 2);
        assert!(stream.obstacles()[0].passed);
        assert_eq!(stream.obstacles()[1].x, params.width);

        // the new obstacle is still far away
        let report = generation.tick(&mut rng);
        assert!(report.events.is_empty());
        assert_eq!(generation.score(), 1);
        assert_eq!(generation.course().stream.len(), 2);
    }

    for id in 0..3 {
        assert_close(fitness_of(&population, id), 0.1 + 5.0 + 0.1);
    }
}

#[test]
fn test_eliminated_agents_miss_the_passage_reward() {
    let params = Params {
        ceiling_y: 310.0,
        ..Params::default()
    };
    let sheet = SpriteSheet::new();
    let mut rng = StdRng::seed_from_u64(6);
    let mut population = genomes(&[(0, FALLER), (1, JUMPER)]);

    // the jumper leaves through the lowered ceiling on tick 4, the
    // obstacle is passed on tick 6
    let course = course_with(vec![Obstacle::with_height(256.0, 300.0, 200.0)], &params);
    {
        let mut generation = Generation::with_course(&mut population, &params, &sheet, course);
        for tick in 1..=6 {
            let report = generation.tick(&mut rng);
            match tick {
                4 => assert_eq!(report.events, vec![SimulationEvent::LeftBounds { id: 1 }]),
                6 => assert_eq!(
                    report.events,
                    vec![SimulationEvent::ObstaclePassed { score: 1 }]
                ),
                _ => assert!(report.events.is_empty()),
            }
        }
        assert_eq!(generation.score(), 1);
        assert_eq!(generation.contestants()[0].id, 0);
    }

    assert_close(fitness_of(&population, 0), 0.6 + 5.0);
    assert_close(fitness_of(&population, 1), 0.4);
}

#[test]
fn test_score_threshold_ends_generation() {
    let params = Params {
        score_threshold: 0,
        ..Params::default()
    };
    let sheet = SpriteSheet::new();
    let mut rng = StdRng::seed_from_u64(7);
    let mut population = genomes(&[(0, FALLER), (1, FALLER)]);

    let course = course_with(vec![Obstacle::with_height(120.0, 300.0, 200.0)], &params);
    let mut generation = Generation::with_course(&mut population, &params, &sheet, course);

    let report = generation.tick(&mut rng);
    assert_eq!(report.status, Status::ScoreReached);
    assert!(generation.is_finished());
    assert_eq!(generation.alive(), 2);

    // finished generations ignore further ticks
    let report = generation.tick(&mut rng);
    assert!(report.events.is_empty());
    assert_eq!(generation.tick_count(), 1);
}

/// Obstacles lined up 5 px apart from the bird's x, so one is passed per
/// tick. The gaps span 50 to 750 and never touch a falling bird.
fn lined_up_course(params: &Params, count: usize) -> Course {
    let obstacles = (0..count)
        .map(|i| Obstacle::with_height(params.spawn_x + 5.0 * i as f32, 50.0, 700.0))
        .collect();
    course_with(obstacles, params)
}

#[test]
fn test_default_threshold_needs_the_21st_passage() {
    let params = Params::default();
    assert_eq!(params.score_threshold, 20);
    let sheet = SpriteSheet::new();
    let mut rng = StdRng::seed_from_u64(10);
    let mut population = genomes(&[(0, FALLER)]);

    let course = lined_up_course(&params, 25);
    let mut generation = Generation::with_course(&mut population, &params, &sheet, course);
    for tick in 1..=20 {
        let report = generation.tick(&mut rng);
        assert_eq!(generation.score(), tick);
        assert_eq!(report.status, Status::Running, "score {tick}");
    }

    let report = generation.tick(&mut rng);
    assert_eq!(generation.score(), 21);
    assert_eq!(report.status, Status::ScoreReached);
    assert_eq!(generation.alive(), 1);
}

#[test]
fn test_empty_population_is_extinct() {
    let params = Params::default();
    let sheet = SpriteSheet::new();
    let mut rng = StdRng::seed_from_u64(8);
    let mut population: Vec<(GenomeId, FixedGenome)> = Vec::new();

    let mut generation = Generation::new(&mut population, &params, &sheet, &mut rng);
    assert_eq!(generation.status(), Status::Extinct);
    assert_eq!(generation.run_to_end(&mut rng), Status::Extinct);
    assert_eq!(generation.tick_count(), 0);
}

#[test]
fn test_course_senses_active_obstacle() {
    let params = Params::default();
    let course = course_with(
        vec![
            Obstacle::with_height(100.0, 250.0, 200.0),
            Obstacle::with_height(400.0, 150.0, 200.0),
        ],
        &params,
    );

    let agent = flappy_evo::simulation::agent::Agent::new(230.0, 300.0);
    let inputs = course.sense(&agent).unwrap();
    // the first obstacle is behind the bird, so the second is used
    assert_eq!(inputs.to_vec(), vec![300.0, 150.0, 50.0]);

    let empty = course_with(Vec::new(), &params);
    assert!(empty.sense(&agent).is_none());
}

#[test]
fn test_without_obstacles_nobody_jumps() {
    let params = Params::default();
    let sheet = SpriteSheet::new();
    let mut rng = StdRng::seed_from_u64(9);
    let mut population = genomes(&[(0, JUMPER)]);

    let course = course_with(Vec::new(), &params);
    let mut generation = Generation::with_course(&mut population, &params, &sheet, course);
    generation.tick(&mut rng);

    assert_eq!(generation.contestants()[0].agent.y, 351.5);
}
