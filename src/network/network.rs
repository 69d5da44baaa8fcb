use std::fmt;

use rand::Rng;

use crate::{activation::activation::ActivationFunction, layers::dense::Layer};

/// Feed-forward classifier: one sigmoid hidden layer and a softmax output.
#[derive(Debug, Clone)]
pub struct Network {
    pub layers: Vec<Layer>,
}

impl Network {
    pub fn new<R: Rng>(input_size: usize, hidden_size: usize, classes: usize, rng: &mut R) -> Network {
        Network {
            layers: vec![
                Layer::new(hidden_size, input_size, ActivationFunction::Sigmoid, rng),
                Layer::new(classes, hidden_size, ActivationFunction::Softmax, rng),
            ],
        }
    }

    pub fn input_size(&self) -> usize {
        self.layers.first().map_or(0, Layer::input_size)
    }

    pub fn parameter_count(&self) -> usize {
        self.layers.iter().map(Layer::parameter_count).sum()
    }

    /// Forward pass; stores activations in each layer for backprop.
    pub fn forward(&mut self, input: &[f64]) -> Vec<f64> {
        let mut current = input.to_vec();
        for layer in &mut self.layers {
            current = layer.feed_from(&current);
        }
        current
    }

    pub fn summary(&self) -> Summary<'_> {
        Summary(self)
    }
}

/// Layer table printed before training.
pub struct Summary<'a>(&'a Network);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "_".repeat(56);
        writeln!(f, "{rule}")?;
        writeln!(f, "{:<22}{:<16}{:>10}", "Layer (type)", "Output shape", "Param #")?;
        writeln!(f, "{}", "=".repeat(56))?;
        for (i, layer) in self.0.layers.iter().enumerate() {
            writeln!(
                f,
                "{:<22}{:<16}{:>10}",
                format!("dense_{} ({})", i + 1, layer.activator.name()),
                format!("[batch,{}]", layer.size),
                layer.parameter_count(),
            )?;
        }
        writeln!(f, "{}", "=".repeat(56))?;
        writeln!(f, "Total params: {}", self.0.parameter_count())?;
        write!(f, "{rule}")
    }
}
