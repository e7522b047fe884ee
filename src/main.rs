use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flappy_evo::artifact;
use flappy_evo::error::TrainingError;
use flappy_evo::evolution::{Control, Population};
use flappy_evo::simulation::brain::Brain;
use flappy_evo::simulation::clock::TickClock;
use flappy_evo::simulation::driver;
use flappy_evo::simulation::generation::Generation;
use flappy_evo::simulation::network::INPUT_SIZE;
use flappy_evo::simulation::params::{Config, Params};
use flappy_evo::simulation::playback::Playback;
use flappy_evo::simulation::sprites::SpriteSheet;
use macroquad::prelude::*;
use ::rand::SeedableRng;
use ::rand::rngs::StdRng;
use tracing::{error, info, warn};

mod graphics;
mod ui;

const PANEL_WIDTH: i32 = 300;
const MAX_TICKS_PER_FRAME: u32 = 200;

#[derive(Parser, Debug)]
#[command(name = "flappy-evo", about = "Neuroevolution of flappy birds", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evolve a population until a bird clears enough obstacles.
    Train {
        /// JSON configuration file. Defaults are used when omitted.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Override the configured generation limit.
        #[arg(long)]
        generations: Option<u32>,
        /// Train without opening a window.
        #[arg(long)]
        headless: bool,
        /// Seed for course and mutation randomness.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Fly a single bird with a saved network.
    Play {
        /// JSON configuration file. Defaults are used when omitted.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Network artifact. Defaults to the configured artifact path.
        #[arg(long)]
        artifact: Option<PathBuf>,
        /// Seed for obstacle placement.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Train {
            config,
            generations,
            headless,
            seed,
        } => {
            let config = load_config(config.as_deref())?;
            let generations = generations.unwrap_or(config.evolution.max_generations);
            let mut rng = make_rng(seed);
            if headless {
                train_headless(&config, generations, &mut rng)
            } else {
                let conf = window_conf(&config.simulation);
                macroquad::Window::from_config(conf, async move {
                    if let Err(err) = train_windowed(config, generations, rng).await {
                        error!("training stopped: {err:#}");
                    }
                });
                Ok(())
            }
        }
        Command::Play {
            config,
            artifact: artifact_path,
            seed,
        } => {
            let config = load_config(config.as_deref())?;
            let path = artifact_path.unwrap_or_else(|| config.simulation.artifact_path.clone());
            let brain: Brain = artifact::load(&path)
                .with_context(|| format!("loading network from {}", path.display()))?;
            brain
                .check_shape(INPUT_SIZE)
                .with_context(|| format!("checking network from {}", path.display()))?;
            info!(path = %path.display(), "loaded network");

            let params = config.simulation;
            let rng = make_rng(seed);
            macroquad::Window::from_config(window_conf(&params), play_windowed(params, brain, rng));
            Ok(())
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => {
            let config = Config::default();
            config.validate().context("default config")?;
            Ok(config)
        }
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64)
}

fn window_conf(params: &Params) -> Conf {
    Conf {
        window_title: "Flappy Evo".to_owned(),
        window_width: params.width as i32 + PANEL_WIDTH,
        window_height: params.height as i32,
        window_resizable: false,
        ..Default::default()
    }
}

fn train_headless(config: &Config, generations: u32, rng: &mut StdRng) -> Result<()> {
    let sheet = SpriteSheet::new();
    let mut population = Population::new(&config.evolution);
    info!(
        population = config.evolution.population_size,
        generations, "starting headless training"
    );

    let best = population.run(generations, rng, |genomes, rng| {
        let report = driver::evaluate_generation(genomes, &config.simulation, &sheet, rng)?;
        info!(
            ticks = report.ticks,
            score = report.score,
            survivors = report.survivors,
            "generation finished"
        );
        Ok::<_, TrainingError>(if report.artifact.is_some() {
            Control::Stop
        } else {
            Control::Continue
        })
    })?;

    match best {
        Some(best) => info!(fitness = best.fitness, "training finished"),
        None => warn!("training finished without evaluating a generation"),
    }
    Ok(())
}

fn quit_requested() -> bool {
    is_key_pressed(KeyCode::Escape)
}

async fn train_windowed(config: Config, generations: u32, mut rng: StdRng) -> Result<()> {
    let sheet = SpriteSheet::new();
    let textures = graphics::Textures::new(&sheet);
    let params = config.simulation.clone();
    let mut population = Population::new(&config.evolution);
    let mut ui_state = ui::UIState::new();
    let mut clock = TickClock::new(params.tick_rate, MAX_TICKS_PER_FRAME);

    for _ in 0..generations {
        let generation_index = population.generation();
        let mut generation = Generation::new(population.genomes_mut(), &params, &sheet, &mut rng);
        clock.reset();

        while !generation.is_finished() {
            if quit_requested() {
                info!("training interrupted");
                return Ok(());
            }

            let ticks = if ui_state.paused {
                0
            } else {
                clock.advance(get_frame_time(), ui_state.simulation_speed)
            };
            for _ in 0..ticks {
                if generation.is_finished() {
                    break;
                }
                generation.tick(&mut rng);
            }

            let course = generation.course();
            graphics::draw_course(&textures, course, &params);
            for contestant in generation.contestants() {
                if ui_state.show_sensor_lines {
                    graphics::draw_sensor_lines(&contestant.agent, course, &params);
                }
                graphics::draw_bird(&textures, &contestant.agent, generation.tick_count(), &params);
            }
            graphics::draw_labels(
                generation.score(),
                Some(generation_index),
                Some(generation.alive()),
                &params,
            );

            ui::draw_ui(
                &mut ui_state,
                &ui::PanelInfo {
                    generation: Some(generation_index),
                    alive: generation.alive(),
                    score: generation.score(),
                    ticks: generation.tick_count(),
                },
            );
            ui::process_egui();

            next_frame().await;
        }

        let report = driver::finish(&generation)?;
        if let Some(stats) = population.record() {
            ui_state.record(&stats);
        }
        if report.artifact.is_some() || population.reached_threshold() {
            break;
        }
        population.evolve(&mut rng);
    }

    if let Some(best) = population.best() {
        info!(fitness = best.fitness, "training finished");
    }
    Ok(())
}

async fn play_windowed(params: Params, brain: Brain, mut rng: StdRng) {
    let sheet = SpriteSheet::new();
    let textures = graphics::Textures::new(&sheet);
    let mut playback = Playback::new(brain, &params, &sheet, &mut rng);
    let mut ui_state = ui::UIState::new();
    let mut clock = TickClock::new(params.tick_rate, MAX_TICKS_PER_FRAME);

    while playback.is_alive() {
        if quit_requested() {
            break;
        }

        let ticks = if ui_state.paused {
            0
        } else {
            clock.advance(get_frame_time(), ui_state.simulation_speed)
        };
        for _ in 0..ticks {
            if !playback.tick(&mut rng) {
                break;
            }
        }

        let course = playback.course();
        graphics::draw_course(&textures, course, &params);
        if ui_state.show_sensor_lines {
            graphics::draw_sensor_lines(playback.agent(), course, &params);
        }
        graphics::draw_bird(&textures, playback.agent(), playback.tick_count(), &params);
        graphics::draw_labels(playback.score(), None, None, &params);

        ui::draw_ui(
            &mut ui_state,
            &ui::PanelInfo {
                generation: None,
                alive: usize::from(playback.is_alive()),
                score: playback.score(),
                ticks: playback.tick_count(),
            },
        );
        ui::process_egui();

        next_frame().await;
    }

    info!(
        score = playback.score(),
        ticks = playback.tick_count(),
        "playback finished"
    );
}
