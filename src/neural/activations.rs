use std::fmt::Debug;

pub trait Activation: Debug {
    /// Returns activation function at x
    fn call(&self, x: f64) -> f64;
    /// Returns derivative of activation function with respect to the function at x.
    /// For example, if our activation is sigmoid, then we would express the
    /// derivative as `a_x * (1-a_x)` instead of `sigmoid(a_x)(1-sigmoid(a_x))`.
    fn derivative(&self, a_x: f64) -> f64;
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Activations {
    Identity,
    #[default]
    Sigmoid,
    Tanh,
    Arctan,
    ReLU,
}

impl Activation for Activations {
    fn call(&self, x: f64) -> f64 {
        use Activations::*;
        match self {
            Identity => x,
            Sigmoid => 1.0 / (1.0 + (-x).exp()),
            Tanh => x.tanh(),
            Arctan => x.atan(),
            ReLU => x.max(0.0),
        }
    }

    fn derivative(&self, a_x: f64) -> f64 {
        use Activations::*;
        match self {
            Identity => 1.0,
            Sigmoid => a_x * (1.0 - a_x),
            Tanh => 1.0 - a_x * a_x,
            Arctan => 1.0 / (1.0 + a_x.tan() * a_x.tan()),
            ReLU => {
                if a_x > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Central difference of `call` at `x`, compared with `derivative` at `call(x)`.
    fn check_derivative(f: Activations, x: f64) {
        let h = 1e-6;
        let numeric = (f.call(x + h) - f.call(x - h)) / (2.0 * h);
        let analytic = f.derivative(f.call(x));
        assert!(
            (numeric - analytic).abs() < 1e-5,
            "{f:?} at {x}: {numeric} vs {analytic}"
        );
    }

    #[test]
    fn derivatives_take_outputs() {
        for f in [
            Activations::Identity,
            Activations::Sigmoid,
            Activations::Tanh,
            Activations::Arctan,
        ] {
            for x in [-2.0, -0.3, 0.0, 0.7, 1.9] {
                check_derivative(f, x);
            }
        }
        check_derivative(Activations::ReLU, 1.5);
        check_derivative(Activations::ReLU, -1.5);
    }

    #[test]
    fn sigmoid_is_default() {
        assert_eq!(Activations::default(), Activations::Sigmoid);
        assert_eq!(Activations::Sigmoid.call(0.0), 0.5);
    }
}
