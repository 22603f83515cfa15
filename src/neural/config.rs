use std::sync::Arc;

use rand::distributions::Uniform;

use crate::prelude::*;

use super::activations::{Activation, Activations};

/// Half-open range `[min, max)` that new weights are drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    min: f64,
    max: f64,
}

impl Bounds {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !(min.is_finite() && max.is_finite() && min < max) {
            return Err(Error::InvalidBounds { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub(crate) fn distribution(&self) -> Uniform<f64> {
        Uniform::new(self.min, self.max)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min: -1.0,
            max: 1.0,
        }
    }
}

/// Settings for one layer. Everything except the size has a default.
#[derive(Debug, Clone)]
pub struct LayerConfig {
    pub(crate) size: usize,
    pub(crate) learning_rate: f64,
    pub(crate) bias: bool,
    pub(crate) label: String,
    pub(crate) activation: Arc<dyn Activation>,
}

impl LayerConfig {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            learning_rate: 1.0,
            bias: false,
            label: "Layer".to_string(),
            activation: Arc::new(Activations::Sigmoid),
        }
    }

    /// Step size for this layer's outgoing weights.
    pub fn learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Appends a constant unit to this layer's output when it feeds the next layer.
    pub fn bias(mut self, bias: bool) -> Self {
        self.bias = bias;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn activation(mut self, activation: impl Activation + 'static) -> Self {
        self.activation = Arc::new(activation);
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(Error::InvalidSize {
                label: self.label.clone(),
            });
        }
        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return Err(Error::InvalidLearningRate {
                label: self.label.clone(),
                rate: self.learning_rate,
            });
        }
        Ok(())
    }
}
