use rand::{rngs::StdRng, SeedableRng};
use tracing::debug;

use crate::data::batcher::Batch;
use crate::data::label::ClassLabel;
use crate::error::{Error, Result};
use crate::network::network::Network;
use crate::optim::adam::Adam;
use crate::train::batch_stats::{BatchStats, TrainSummary};
use crate::train::loop_fn::train_loop;
use crate::train::train_config::TrainConfig;

/// The narrow seam between the data pipeline and a numerical backend.
///
/// The pipeline only ever builds a model for a known feature count, fits it
/// on batches, and asks for the class scores of one feature vector.
pub trait Classifier {
    /// Builds a fresh model taking `feature_count` inputs and returns a
    /// printable description of it.
    fn build(&mut self, feature_count: usize) -> Result<String>;

    /// Fits the model, calling `on_batch` after every optimizer step.
    fn fit(&mut self, batches: &[Batch], on_batch: &mut dyn FnMut(&BatchStats)) -> Result<TrainSummary>;

    /// One score per class, in `ClassLabel` index order.
    fn score(&mut self, features: &[f64]) -> Result<Vec<f64>>;
}

/// `Classifier` backed by the crate's own dense `Network` and `Adam`.
pub struct NetworkClassifier {
    hidden_size: usize,
    config: TrainConfig,
    network: Option<Network>,
}

impl NetworkClassifier {
    pub fn new(hidden_size: usize, config: TrainConfig) -> Self {
        NetworkClassifier { hidden_size, config, network: None }
    }

    pub fn network(&self) -> Option<&Network> {
        self.network.as_ref()
    }
}

impl Classifier for NetworkClassifier {
    fn build(&mut self, feature_count: usize) -> Result<String> {
        if feature_count == 0 {
            return Err(Error::Training("model needs at least one input feature".into()));
        }
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let network = Network::new(feature_count, self.hidden_size, ClassLabel::COUNT, &mut rng);
        debug!(inputs = feature_count, hidden = self.hidden_size, params = network.parameter_count(), "built network");
        let summary = network.summary().to_string();
        self.network = Some(network);
        Ok(summary)
    }

    fn fit(&mut self, batches: &[Batch], on_batch: &mut dyn FnMut(&BatchStats)) -> Result<TrainSummary> {
        let network = self
            .network
            .as_mut()
            .ok_or_else(|| Error::Training("model has not been built".into()))?;
        let mut optimizer = Adam::new(self.config.learning_rate);
        train_loop(network, batches, &mut optimizer, &self.config, on_batch)
    }

    fn score(&mut self, features: &[f64]) -> Result<Vec<f64>> {
        let network = self
            .network
            .as_mut()
            .ok_or_else(|| Error::Prediction("model has not been built".into()))?;
        if features.len() != network.input_size() {
            return Err(Error::Prediction(format!(
                "input has {} features, model expects {}",
                features.len(),
                network.input_size()
            )));
        }
        Ok(network.forward(features))
    }
}
