use std::{borrow::Cow, sync::Arc};

use rand::Rng;
use tracing::debug;

use crate::matrix::{
    ops::{Dot, Transpose},
    Matrix2,
};
use crate::prelude::*;

use super::{
    activations::Activation,
    config::{Bounds, LayerConfig},
};

/// Where a layer sits in its chain. Decides how it back-propagates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// First layer. Its result is written by the caller.
    Input,
    /// Has both a predecessor and outgoing weights.
    Hidden,
    /// Last layer. Has a predecessor and no outgoing weights.
    Output,
}

/// Outgoing weights of a layer plus the delta staged for their next update.
#[derive(Debug, Clone)]
struct Synapse {
    /// `[size + bias, next.size]`
    weights: Matrix2<f64>,
    delta: Option<Matrix2<f64>>,
}

#[derive(Debug, Clone)]
pub struct Layer {
    label: String,
    size: usize,
    learning_rate: f64,
    bias: bool,
    role: Role,
    activation: Arc<dyn Activation>,
    result: Matrix2<f64>,
    error: Option<Matrix2<f64>>,
    synapse: Option<Synapse>,
}

impl Layer {
    /// Creates a layer and, when `prev` is given, (re)initializes the weights
    /// connecting `prev` to it with samples from `bounds`.
    ///
    /// The config is checked before `prev` is touched.
    pub fn new<R: Rng + ?Sized>(
        bounds: &Bounds,
        config: LayerConfig,
        prev: Option<&mut Layer>,
        rng: &mut R,
    ) -> Result<Self> {
        config.validate()?;

        let role = match prev {
            Some(prev) => {
                prev.connect(config.size, bounds, rng);
                Role::Output
            }
            None => Role::Input,
        };

        debug!(
            label = %config.label,
            size = config.size,
            bias = config.bias,
            ?role,
            "created layer"
        );

        Ok(Self {
            result: Matrix2::new(1, config.size),
            label: config.label,
            size: config.size,
            learning_rate: config.learning_rate,
            bias: config.bias,
            role,
            activation: config.activation,
            error: None,
            synapse: None,
        })
    }

    fn connect<R: Rng + ?Sized>(&mut self, next_size: usize, bounds: &Bounds, rng: &mut R) {
        let weights = Matrix2::random(
            self.size + usize::from(self.bias),
            next_size,
            &bounds.distribution(),
            rng,
        );
        self.synapse = Some(Synapse {
            weights,
            delta: None,
        });
        if self.role == Role::Output {
            self.role = Role::Hidden;
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Number of units, not counting the bias unit.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn bias(&self) -> bool {
        self.bias
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn result(&self) -> &Matrix2<f64> {
        &self.result
    }

    /// Error term of the last backward step, before any bias column is stripped.
    pub fn error(&self) -> Result<&Matrix2<f64>> {
        self.error.as_ref().ok_or_else(|| self.unset("error"))
    }

    /// Delta staged for this layer's next weight update.
    pub fn delta_weights(&self) -> Result<&Matrix2<f64>> {
        self.synapse()?
            .delta
            .as_ref()
            .ok_or_else(|| self.unset("delta_weights"))
    }

    pub fn synapse_weights(&self) -> Option<&Matrix2<f64>> {
        self.synapse.as_ref().map(|s| &s.weights)
    }

    fn synapse(&self) -> Result<&Synapse> {
        self.synapse.as_ref().ok_or_else(|| Error::Unconnected {
            label: self.label.clone(),
        })
    }

    fn unset(&self, field: &'static str) -> Error {
        Error::Unset {
            label: self.label.clone(),
            field,
        }
    }

    /// The result as the next layer sees it: with a column of ones when this
    /// layer has a bias unit. Never stored.
    fn augmented_result(&self) -> Cow<'_, Matrix2<f64>> {
        if self.bias {
            Cow::Owned(self.result.add_bias())
        } else {
            Cow::Borrowed(&self.result)
        }
    }

    fn derivative(&self) -> Matrix2<f64> {
        self.result.map(|&y| self.activation.derivative(y))
    }

    /// Sets the result of an input layer.
    pub fn set_input(&mut self, input: Matrix2<f64>) -> Result<()> {
        if self.role != Role::Input {
            return Err(Error::NotInput {
                label: self.label.clone(),
            });
        }
        if input.cols() != self.size {
            return Err(Error::Dimension {
                op: "set_input",
                lhs: input.dim(),
                rhs: (input.rows(), self.size),
            });
        }
        self.result = input;
        Ok(())
    }

    /// Weighted input for the next layer, before its activation.
    pub fn project(&self) -> Result<Matrix2<f64>> {
        let synapse = self.synapse()?;
        self.augmented_result().dot(&synapse.weights)
    }

    /// Recomputes the result from `prev`, which must already hold its result
    /// for this pass. An input layer keeps the result it was given.
    pub fn propagate(&mut self, prev: Option<&Layer>) -> Result<&Matrix2<f64>> {
        if self.role == Role::Input {
            return Ok(&self.result);
        }
        let prev = prev.ok_or_else(|| Error::NoPredecessor {
            label: self.label.clone(),
        })?;

        let mut z = prev.project()?;
        if z.cols() != self.size {
            return Err(Error::Dimension {
                op: "propagate",
                lhs: z.dim(),
                rhs: (z.rows(), self.size),
            });
        }
        let activation = &self.activation;
        z.apply(|x| activation.call(x));
        self.result = z;
        Ok(&self.result)
    }

    /// Stores `target - result` as the error and returns the delta to stage
    /// on the predecessor.
    pub fn calculate_output_delta(&mut self, target: &Matrix2<f64>) -> Result<Matrix2<f64>> {
        let error = (target - &self.result)?;
        let delta = error.hadamard(&self.derivative())?;
        self.error = Some(error);
        Ok(delta)
    }

    /// One backward step. Returns the delta for the predecessor's weights.
    ///
    /// For the output layer `signal` is the training target. For a hidden
    /// layer it is the delta returned by the successor's step, which becomes
    /// this layer's staged delta.
    pub fn back_propagate(&mut self, signal: &Matrix2<f64>) -> Result<Matrix2<f64>> {
        match self.role {
            Role::Output => self.calculate_output_delta(signal),
            Role::Hidden => {
                let error = signal.dot(&self.synapse()?.weights.transpose())?;
                let error_units = if self.bias {
                    Cow::Owned(error.remove_bias()?)
                } else {
                    Cow::Borrowed(&error)
                };
                let delta = error_units.hadamard(&self.derivative())?;

                // nothing is written until every step above has succeeded
                self.stage_delta(signal.clone())?;
                self.error = Some(error);
                Ok(delta)
            }
            Role::Input => Err(Error::NoPredecessor {
                label: self.label.clone(),
            }),
        }
    }

    /// Stages the delta consumed by the next [`Layer::apply_delta_weights`].
    pub fn stage_delta(&mut self, delta: Matrix2<f64>) -> Result<()> {
        let rows = self.result.rows();
        let label = &self.label;
        let synapse = self.synapse.as_mut().ok_or_else(|| Error::Unconnected {
            label: label.clone(),
        })?;

        let expected = (rows, synapse.weights.cols());
        if delta.dim() != expected {
            return Err(Error::Dimension {
                op: "stage_delta",
                lhs: delta.dim(),
                rhs: expected,
            });
        }
        synapse.delta = Some(delta);
        Ok(())
    }

    /// `weights += learning_rate * result^T . delta`, consuming the staged
    /// delta. Does nothing on the output layer.
    pub fn apply_delta_weights(&mut self) -> Result<()> {
        if self.role == Role::Output {
            return Ok(());
        }

        let step = {
            let delta = self.delta_weights()?;
            self.augmented_result()
                .transpose()
                .dot(delta)?
                .scale(self.learning_rate)
        };

        if let Some(synapse) = self.synapse.as_mut() {
            synapse.weights = (&synapse.weights + &step)?;
            synapse.delta = None;
        }
        Ok(())
    }

    pub fn num_weights(&self) -> usize {
        self.synapse_weights()
            .map_or(0, |w| w.rows() * w.cols())
    }

    /// Outgoing weights flattened row by row. Empty for the output layer.
    pub fn weights(&self) -> Vec<f64> {
        self.synapse_weights()
            .map(|w| w.as_slice().to_vec())
            .unwrap_or_default()
    }

    /// Overwrites the outgoing weights from the front of `weights`, in the
    /// order [`Layer::weights`] yields them, and returns the rest.
    pub fn set_weights<'a>(&mut self, weights: &'a [f64]) -> Result<&'a [f64]> {
        let Some(synapse) = self.synapse.as_mut() else {
            return Ok(weights);
        };

        let (rows, cols) = synapse.weights.dim();
        if weights.len() < rows * cols {
            return Err(Error::NotEnoughWeights {
                needed: rows * cols,
                got: weights.len(),
            });
        }
        let (head, rest) = weights.split_at(rows * cols);
        synapse.weights = Matrix2::from_flat(rows, cols, head.to_vec())?;
        Ok(rest)
    }
}
