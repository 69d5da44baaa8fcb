use crate::{math::matrix::Matrix, layers::dense::Layer};

/// Adam optimizer with bias-corrected moment estimates.
///
/// m_t = β1 · m_{t-1} + (1 - β1) · g
/// v_t = β2 · v_{t-1} + (1 - β2) · g²
/// θ_t = θ_{t-1} - lr_t · m_t / (√v_t + ε),  lr_t = lr · √(1 - β2^t) / (1 - β1^t)
pub struct Adam {
    pub learning_rate: f64,
    beta1: f64,
    beta2: f64,
    epsilon: f64,
    t: u64,
    // One (weights, biases) moment pair per layer, created on the first step.
    m: Vec<(Matrix, Matrix)>,
    v: Vec<(Matrix, Matrix)>,
}

impl Adam {
    pub fn new(learning_rate: f64) -> Adam {
        Adam::with_params(learning_rate, 0.9, 0.999, 1e-7)
    }

    pub fn with_params(learning_rate: f64, beta1: f64, beta2: f64, epsilon: f64) -> Adam {
        Adam { learning_rate, beta1, beta2, epsilon, t: 0, m: Vec::new(), v: Vec::new() }
    }

    pub fn step_count(&self) -> u64 {
        self.t
    }

    /// Applies one update to every layer. `grads[i]` holds the
    /// (weights_grad, biases_grad) pair for `layers[i]`.
    pub fn step(&mut self, layers: &mut [Layer], grads: Vec<(Matrix, Matrix)>) {
        assert_eq!(layers.len(), grads.len(), "one gradient pair per layer");
        if self.m.len() != layers.len() {
            self.m = layers.iter().map(zero_moments).collect();
            self.v = layers.iter().map(zero_moments).collect();
        }

        self.t += 1;
        let t = self.t as i32;
        let lr_t = self.learning_rate
            * ((1.0 - self.beta2.powi(t)).sqrt() / (1.0 - self.beta1.powi(t)));

        for (i, (layer, (w_grad, b_grad))) in layers.iter_mut().zip(grads).enumerate() {
            let (m_w, m_b) = &mut self.m[i];
            let (v_w, v_b) = &mut self.v[i];
            layer.weights = update(&layer.weights, &w_grad, m_w, v_w, self.beta1, self.beta2, self.epsilon, lr_t);
            layer.biases = update(&layer.biases, &b_grad, m_b, v_b, self.beta1, self.beta2, self.epsilon, lr_t);
        }
    }
}

fn zero_moments(layer: &Layer) -> (Matrix, Matrix) {
    (
        Matrix::zeros(layer.weights.rows, layer.weights.cols),
        Matrix::zeros(layer.biases.rows, layer.biases.cols),
    )
}

#[allow(clippy::too_many_arguments)]
fn update(
    param: &Matrix,
    grad: &Matrix,
    m: &mut Matrix,
    v: &mut Matrix,
    beta1: f64,
    beta2: f64,
    epsilon: f64,
    lr_t: f64,
) -> Matrix {
    *m = m.zip_map(grad, |m, g| beta1 * m + (1.0 - beta1) * g);
    *v = v.zip_map(grad, |v, g| beta2 * v + (1.0 - beta2) * g * g);
    let step = m.zip_map(v, |m, v| lr_t * m / (v.sqrt() + epsilon));
    param.zip_map(&step, |p, s| p - s)
}
