//! # Flappy Evo - Neuroevolution Training Harness
//!
//! A population of birds, each flown by a small feed-forward network, plays
//! an obstacle-avoidance game. Birds that survive longer and clear more
//! obstacles earn more fitness, and the fittest networks are bred into the
//! next generation.
//!
//! ## Features
//!
//! - Tick-based bird physics with terminal velocity and tilt
//! - Procedurally placed obstacle stream with pixel-accurate collision
//! - Per-tick fitness scoring bridged to an evolutionary algorithm
//! - Generational neuroevolution of tanh MLP brains
//! - Binary persistence of the best network and playback
//!
//! ## Core Modules
//!
//! - [`simulation::agent`] - Bird physics
//! - [`simulation::stream`] - Obstacle spawning and retirement
//! - [`simulation::generation`] - The per-tick simulation step
//! - [`simulation::driver`] - Evaluation of a whole generation
//! - [`evolution`] - Population management

/// Binary persistence of trained networks.
pub mod artifact;
/// Error types.
pub mod error;
/// Bundled generational evolutionary algorithm.
pub mod evolution;

/// Core simulation logic and data structures.
pub mod simulation {
    /// Bird physics.
    pub mod agent;
    /// Tanh MLP used as the bird's brain.
    pub mod brain;
    /// Fixed-rate tick pacing.
    pub mod clock;
    /// Shared playfield: obstacles, ground and score.
    pub mod course;
    /// Evaluation driver for one generation.
    pub mod driver;
    /// Per-tick elimination and passage events.
    pub mod events;
    /// Generation state and the simulation step.
    pub mod generation;
    /// Scrolling ground strip.
    pub mod ground;
    /// Per-pixel opacity masks.
    pub mod mask;
    /// Contracts between simulation and evolutionary algorithm.
    pub mod network;
    /// A single obstacle.
    pub mod obstacle;
    /// Simulation and evolution parameters.
    pub mod params;
    /// Replay of a persisted network.
    pub mod playback;
    /// Procedural sprites and collision masks.
    pub mod sprites;
    /// Ordered obstacle stream.
    pub mod stream;
}
