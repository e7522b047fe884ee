//! Feed-forward network used as the bird's brain.
//!
//! A stack of fully connected tanh layers with the mutation and crossover
//! operators the bundled evolutionary algorithm relies on.

use ndarray::{Array1, Array2};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Uniform;
use serde::{Deserialize, Serialize};

use super::network::Network;
use crate::error::ArtifactError;

/// Fully connected layer. `weights` is shaped `(outputs, inputs)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// Connection weights.
    pub weights: Array2<f32>,
    /// One bias per output.
    pub biases: Array1<f32>,
}

impl Layer {
    /// Draws every parameter uniformly from `[-scale, scale)`.
    pub fn random(inputs: usize, outputs: usize, scale: f32) -> Self {
        let dist = Uniform::new(-scale, scale);
        Self {
            weights: Array2::random((outputs, inputs), dist),
            biases: Array1::random(outputs, dist),
        }
    }

    #[inline]
    fn forward(&self, inputs: &Array1<f32>) -> Array1<f32> {
        (self.weights.dot(inputs) + &self.biases).mapv_into(f32::tanh)
    }

    fn perturb(&mut self, scale: f32) {
        let noise = Uniform::new(-scale, scale);
        self.weights
            .zip_mut_with(&Array2::random(self.weights.raw_dim(), noise), |w, n| {
                *w += n;
            });
        self.biases
            .zip_mut_with(&Array1::random(self.biases.raw_dim(), noise), |b, n| {
                *b += n;
            });
    }

    fn blend(a: &Layer, b: &Layer, share: f32) -> Layer {
        let rest = 1.0 - share;
        Layer {
            weights: &a.weights * share + &b.weights * rest,
            biases: &a.biases * share + &b.biases * rest,
        }
    }

    /// Number of inputs the layer expects.
    pub fn inputs(&self) -> usize {
        self.weights.ncols()
    }

    /// Number of outputs the layer produces.
    pub fn outputs(&self) -> usize {
        self.biases.len()
    }
}

/// Multi-layer perceptron with tanh activation on every layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brain {
    /// Ordered layers from input to output.
    pub layers: Vec<Layer>,
}

impl Brain {
    /// Creates a brain with random weights.
    ///
    /// `layer_sizes` lists the width of every layer, input first.
    pub fn new(layer_sizes: &[usize], scale: f32) -> Self {
        let layers = layer_sizes
            .windows(2)
            .map(|pair| Layer::random(pair[0], pair[1], scale))
            .collect();

        Self { layers }
    }

    /// Runs a forward pass through all layers.
    pub fn think(&self, inputs: &Array1<f32>) -> Array1<f32> {
        self.layers
            .iter()
            .fold(inputs.clone(), |signal, layer| layer.forward(&signal))
    }

    /// Blends two parents layer by layer; `share` is the weight of `parent1`.
    ///
    /// Parents must share the same layer sizes.
    pub fn crossover_weighted(parent1: &Brain, parent2: &Brain, share: f32) -> Self {
        let layers = parent1
            .layers
            .iter()
            .zip(&parent2.layers)
            .map(|(a, b)| Layer::blend(a, b, share))
            .collect();
        Self { layers }
    }

    /// Adds uniform noise in `[-scale, scale)` to every parameter.
    pub fn mutate(&mut self, scale: f32) {
        for layer in &mut self.layers {
            layer.perturb(scale);
        }
    }

    /// Width of the output layer.
    pub fn output_size(&self) -> usize {
        self.layers.last().map_or(0, Layer::outputs)
    }

    /// Width of the input layer.
    pub fn input_size(&self) -> usize {
        self.layers.first().map_or(0, Layer::inputs)
    }

    /// Checks that the brain takes `inputs` values, every layer feeds the
    /// next and the last layer yields at least one output.
    ///
    /// [`Brain::think`] panics on a brain that fails this check.
    pub fn check_shape(&self, inputs: usize) -> Result<(), ArtifactError> {
        if self.layers.is_empty() {
            return Err(ArtifactError::Shape("no layers".into()));
        }
        if self.input_size() != inputs {
            return Err(ArtifactError::Shape(format!(
                "expects {} inputs, course provides {inputs}",
                self.input_size()
            )));
        }
        for (i, layer) in self.layers.iter().enumerate() {
            if layer.weights.nrows() != layer.outputs() {
                return Err(ArtifactError::Shape(format!(
                    "layer {i} has {} weight rows for {} biases",
                    layer.weights.nrows(),
                    layer.outputs()
                )));
            }
        }
        for (i, pair) in self.layers.windows(2).enumerate() {
            if pair[0].outputs() != pair[1].inputs() {
                return Err(ArtifactError::Shape(format!(
                    "layer {i} yields {} values, layer {} takes {}",
                    pair[0].outputs(),
                    i + 1,
                    pair[1].inputs()
                )));
            }
        }
        if self.output_size() == 0 {
            return Err(ArtifactError::Shape("empty output layer".into()));
        }
        Ok(())
    }
}

impl Network for Brain {
    fn activate(&self, inputs: &Array1<f32>) -> Array1<f32> {
        self.think(inputs)
    }
}
