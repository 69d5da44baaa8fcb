pub mod batch_stats;
pub mod train_config;
pub mod loop_fn;
pub mod classifier;

pub use batch_stats::{BatchStats, TrainSummary};
pub use train_config::TrainConfig;
pub use loop_fn::train_loop;
pub use classifier::{Classifier, NetworkClassifier};
