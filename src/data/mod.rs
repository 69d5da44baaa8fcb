pub mod record;
pub mod loader;
pub mod label;
pub mod batcher;

pub use record::{Record, EncodedRecord, Schema};
pub use loader::{DatasetLoader, Records, DEFAULT_LABEL_COLUMN};
pub use label::{ClassLabel, EncodingPolicy, LabelEncoder};
pub use batcher::{batch, Batch, Batches};
