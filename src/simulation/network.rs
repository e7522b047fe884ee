//! Contracts between the simulation and the evolutionary algorithm.
//!
//! The simulation never looks inside a genome: it asks it for a network,
//! feeds that network three numbers per tick and nudges the genome's
//! fitness up or down.

use ndarray::Array1;

/// Number of network inputs: agent height, distance to gap top, distance
/// to gap bottom.
pub const INPUT_SIZE: usize = 3;

/// Stable identifier of a genome within a population.
pub type GenomeId = usize;

/// A feed-forward network that decides whether to jump.
pub trait Network {
    /// Runs a forward pass. Only the first output is consulted.
    fn activate(&self, inputs: &Array1<f32>) -> Array1<f32>;

    /// Returns whether the first output exceeds `threshold`.
    fn wants_jump(&self, inputs: &Array1<f32>, threshold: f32) -> bool {
        self.activate(inputs)
            .first()
            .is_some_and(|&output| output > threshold)
    }
}

/// A genome owned by the evolutionary algorithm.
pub trait Genome: Send + Sync {
    /// Network built from this genome.
    type Network: Network + Send + Sync;

    /// Builds the network that plays on behalf of this genome.
    fn build_network(&self) -> Self::Network;

    /// Mutable access to the fitness accumulator.
    fn fitness_mut(&mut self) -> &mut f32;
}
