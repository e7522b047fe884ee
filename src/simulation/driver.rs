//! Evaluation driver: plays one generation and fills in fitness.
//!
//! Called by the evolutionary algorithm once per generation. On return every
//! genome's fitness reflects how long its bird survived and how many
//! obstacles it cleared.

use std::path::PathBuf;

use rand::Rng;
use serde::Serialize;
use tracing::info;

use super::generation::{Generation, Status};
use super::network::{Genome, GenomeId};
use super::params::Params;
use super::sprites::SpriteSheet;
use crate::artifact;
use crate::error::TrainingError;

/// Summary of a finished generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    /// How the generation ended.
    pub status: Status,
    /// Ticks simulated.
    pub ticks: u64,
    /// Obstacles passed.
    pub score: u32,
    /// Agents still alive at the end.
    pub survivors: usize,
    /// Genome whose network was persisted, if any.
    pub champion: Option<GenomeId>,
    /// Where that network was written.
    pub artifact: Option<PathBuf>,
}

/// Plays `genomes` on a fresh course until extinction or until the score
/// threshold is exceeded.
pub fn evaluate_generation<G, R>(
    genomes: &mut [(GenomeId, G)],
    params: &Params,
    sheet: &SpriteSheet,
    rng: &mut R,
) -> Result<GenerationReport, TrainingError>
where
    G: Genome,
    G::Network: Serialize,
    R: Rng + ?Sized,
{
    let mut generation = Generation::new(genomes, params, sheet, rng);
    generation.run_to_end(rng);
    finish(&generation)
}

/// Wraps up a finished generation.
///
/// When the score threshold was exceeded the network of the first surviving
/// contestant is written to the configured artifact path. The extinction
/// path persists nothing.
pub fn finish<G>(generation: &Generation<'_, G>) -> Result<GenerationReport, TrainingError>
where
    G: Genome,
    G::Network: Serialize,
{
    let mut report = GenerationReport {
        status: generation.status(),
        ticks: generation.tick_count(),
        score: generation.score(),
        survivors: generation.alive(),
        champion: None,
        artifact: None,
    };

    if generation.status() == Status::ScoreReached {
        if let Some(champion) = generation.champion() {
            let path = &generation.params().artifact_path;
            artifact::save(path, &champion.network)?;
            info!(
                genome = champion.id,
                score = report.score,
                path = %path.display(),
                "score threshold exceeded, network saved"
            );
            report.champion = Some(champion.id);
            report.artifact = Some(path.clone());
        }
    }

    Ok(report)
}
