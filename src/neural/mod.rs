pub mod activations;
pub mod config;
pub mod layer;

use crate::matrix::Matrix2;
use crate::prelude::*;
use rand::Rng;
use tracing::{debug, trace};

use self::{
    config::{Bounds, LayerConfig},
    layer::Layer,
};

/// An ordered chain of layers, input first.
///
/// Owns the call order of the single-step primitives on [`Layer`]: forward
/// from input to output, backward from output to input, then the update.
#[derive(Debug, Clone)]
pub struct Network {
    layers: Vec<Layer>,
}

/// Collects layer configs until [`NetworkBuilder::build`] creates the chain.
#[derive(Debug, Clone)]
pub struct NetworkBuilder {
    bounds: Bounds,
    configs: Vec<LayerConfig>,
}

impl NetworkBuilder {
    pub fn layer(mut self, config: LayerConfig) -> Self {
        self.configs.push(config);
        self
    }

    /// Creates the layers in order, drawing every weight from `rng`.
    pub fn build<R: Rng + ?Sized>(self, rng: &mut R) -> Result<Network> {
        if self.configs.len() < 2 {
            return Err(Error::TooFewLayers(self.configs.len()));
        }

        let mut layers: Vec<Layer> = Vec::with_capacity(self.configs.len());
        for config in self.configs {
            let layer = Layer::new(&self.bounds, config, layers.last_mut(), rng)?;
            layers.push(layer);
        }

        let net = Network { layers };
        debug!(
            layers = net.layers.len(),
            weights = net.num_weights(),
            "built network"
        );
        Ok(net)
    }
}

impl Network {
    pub fn builder(bounds: Bounds) -> NetworkBuilder {
        NetworkBuilder {
            bounds,
            configs: Vec::new(),
        }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, idx: usize) -> Option<&Layer> {
        self.layers.get(idx)
    }

    pub fn input(&self) -> &Layer {
        &self.layers[0]
    }

    pub fn output(&self) -> &Layer {
        &self.layers[self.layers.len() - 1]
    }

    /// Runs a batch of inputs through every layer and returns the output result.
    pub fn forward(&mut self, inputs: &Matrix2<f64>) -> Result<&Matrix2<f64>> {
        self.layers[0].set_input(inputs.clone())?;

        for i in 1..self.layers.len() {
            let (done, rest) = self.layers.split_at_mut(i);
            rest[0].propagate(done.last())?;
        }
        Ok(self.output().result())
    }

    /// Same as [`Network::forward`], but hands back an owned copy.
    pub fn predict(&mut self, inputs: &Matrix2<f64>) -> Result<Matrix2<f64>> {
        self.forward(inputs).cloned()
    }

    /// Back-propagates `targets` through the chain, staging a delta on every
    /// layer with outgoing weights. Returns the output error.
    ///
    /// Must follow a [`Network::forward`] on the matching inputs.
    pub fn backward(&mut self, targets: &Matrix2<f64>) -> Result<&Matrix2<f64>> {
        let (input, rest) = self.layers.split_at_mut(1);

        let mut signal = targets.clone();
        for layer in rest.iter_mut().rev() {
            signal = layer.back_propagate(&signal)?;
        }
        input[0].stage_delta(signal)?;

        self.output().error()
    }

    /// Applies the staged deltas of every layer.
    pub fn apply_delta_weights(&mut self) -> Result<()> {
        for layer in self.layers.iter_mut() {
            layer.apply_delta_weights()?;
        }
        Ok(())
    }

    /// One forward, backward and update cycle over a batch. Returns the mean
    /// squared error of the outputs before the update.
    pub fn train_step(&mut self, inputs: &Matrix2<f64>, targets: &Matrix2<f64>) -> Result<f64> {
        self.forward(inputs)?;
        let mse = mean_square(self.backward(targets)?);
        self.apply_delta_weights()?;
        trace!(mse, "train step");
        Ok(mse)
    }

    /// Mean-squared error
    pub fn mean_squared_error(
        &mut self,
        inputs: &Matrix2<f64>,
        targets: &Matrix2<f64>,
    ) -> Result<f64> {
        let outputs = self.forward(inputs)?;
        Ok(mean_square(&(targets - outputs)?))
    }

    pub fn num_weights(&self) -> usize {
        self.layers.iter().map(Layer::num_weights).sum()
    }

    /// Every weight of the chain, layer by layer in [`Layer::weights`] order.
    pub fn weights(&self) -> Vec<f64> {
        self.layers.iter().flat_map(Layer::weights).collect()
    }

    /// Restores weights produced by [`Network::weights`]. Returns whatever
    /// was left over. Fails without writing anything if `weights` is short.
    pub fn set_weights<'a>(&mut self, weights: &'a [f64]) -> Result<&'a [f64]> {
        let needed = self.num_weights();
        if weights.len() < needed {
            return Err(Error::NotEnoughWeights {
                needed,
                got: weights.len(),
            });
        }

        let mut rest = weights;
        for layer in self.layers.iter_mut() {
            rest = layer.set_weights(rest)?;
        }
        Ok(rest)
    }
}

fn mean_square(m: &Matrix2<f64>) -> f64 {
    let values = m.as_slice();
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|x| x * x).sum::<f64>() / values.len() as f64
}
