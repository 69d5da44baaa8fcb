use std::f64::consts::E;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationFunction {
    Sigmoid,
    /// Softmax is a vector-valued activation; `apply()` normalizes the whole
    /// row, so `function()` and `derivative()` are not meaningful for it.
    Softmax,
}

impl ActivationFunction {
    /// Applies the activation to one layer's pre-activation row.
    pub fn apply(&self, z: &[f64]) -> Vec<f64> {
        match self {
            ActivationFunction::Sigmoid => z.iter().map(|&x| self.function(x)).collect(),
            ActivationFunction::Softmax => softmax(z),
        }
    }

    /// Element-wise activation. Softmax passes its input through unchanged.
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => 1.0 / (1.0 + E.powf(-x)),
            ActivationFunction::Softmax => x,
        }
    }

    /// Element-wise derivative of the activation.
    ///
    /// For `Softmax`, the layer pairs it with cross-entropy and the combined
    /// gradient is `predicted - expected` (already computed by
    /// `CrossEntropyLoss::derivative()`). Returning `1.0` here lets
    /// `compute_gradients()` pass that delta through unchanged without
    /// double-applying the Jacobian.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => {
                let fx = self.function(x);
                fx * (1.0 - fx)
            },
            ActivationFunction::Softmax => 1.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ActivationFunction::Sigmoid => "sigmoid",
            ActivationFunction::Softmax => "softmax",
        }
    }
}

/// Numerically stable softmax (max-shifted before exponentiation).
fn softmax(z: &[f64]) -> Vec<f64> {
    let max = z.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = z.iter().map(|&x| (x - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn sigmoid_at_zero_is_half() {
        assert_abs_diff_eq!(ActivationFunction::Sigmoid.function(0.0), 0.5);
        assert_abs_diff_eq!(ActivationFunction::Sigmoid.derivative(0.0), 0.25);
    }

    #[test]
    fn softmax_sums_to_one_and_keeps_order() {
        let out = ActivationFunction::Softmax.apply(&[1.0, 3.0, 2.0]);
        assert_abs_diff_eq!(out.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        assert!(out[1] > out[2] && out[2] > out[0]);
    }

    #[test]
    fn softmax_handles_large_logits() {
        let out = ActivationFunction::Softmax.apply(&[1000.0, 1000.0, -1000.0]);
        assert_abs_diff_eq!(out[0], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(out[2], 0.0, epsilon = 1e-12);
    }
}
