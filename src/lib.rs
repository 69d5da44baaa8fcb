pub mod error;
pub mod config;
pub mod data;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;
pub mod predict;
pub mod pipeline;

// Convenience re-exports
pub use error::{Error, Result};
pub use config::PipelineConfig;
pub use data::{Batch, ClassLabel, DatasetLoader, EncodedRecord, EncodingPolicy, LabelEncoder, Record, Schema};
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::dense::Layer;
pub use network::network::Network;
pub use optim::adam::Adam;
pub use train::{BatchStats, Classifier, NetworkClassifier, TrainConfig, TrainSummary};
pub use predict::{predict, Prediction};
pub use pipeline::{prepare, run, run_with, PipelineOutcome, PreparedData};
