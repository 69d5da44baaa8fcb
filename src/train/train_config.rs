use std::sync::{Arc, atomic::AtomicBool};

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`        — total number of full passes over the batches
/// - `learning_rate` — Adam step size
/// - `stop_flag`     — optional atomic flag; when set to `true` from another
///                     thread the loop stops before the next batch.
/// - `seed`          — optional seed for weight initialisation; `None` draws
///                     from OS entropy.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub epochs: usize,
    pub learning_rate: f64,
    pub stop_flag: Option<Arc<AtomicBool>>,
    pub seed: Option<u64>,
}

impl TrainConfig {
    /// Creates a minimal `TrainConfig` with no stop flag and no seed.
    pub fn new(epochs: usize, learning_rate: f64) -> Self {
        TrainConfig {
            epochs,
            learning_rate,
            stop_flag: None,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop_flag = Some(flag);
        self
    }
}
