//! A minimal feedforward network built from a chain of dense layers.
//!
//! Layers are driven one step at a time: a forward pass from input to output,
//! a backward pass from output to input, then a weight update on every layer
//! that owns outgoing weights. [`neural::Network`] runs that order for you.

pub mod matrix;
pub mod neural;
pub mod prelude;

pub use neural::{
    activations::{Activation, Activations},
    config::{Bounds, LayerConfig},
    layer::{Layer, Role},
    Network, NetworkBuilder,
};
