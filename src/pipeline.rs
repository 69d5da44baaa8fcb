//! Load → encode → batch → train → predict, as one linear pass.

use std::io::Write;

use tracing::{info, instrument};

use crate::config::PipelineConfig;
use crate::data::batcher::{batch, Batch};
use crate::data::label::LabelEncoder;
use crate::data::loader::DatasetLoader;
use crate::data::record::Schema;
use crate::error::Result;
use crate::predict::predictor::{predict, Prediction};
use crate::train::batch_stats::TrainSummary;
use crate::train::classifier::{Classifier, NetworkClassifier};

/// The prepared training set: header layout plus batches in file order.
#[derive(Debug, Clone)]
pub struct PreparedData {
    pub schema: Schema,
    pub batches: Vec<Batch>,
}

impl PreparedData {
    pub fn feature_count(&self) -> usize {
        self.schema.feature_count()
    }

    pub fn record_count(&self) -> usize {
        self.batches.iter().map(Batch::len).sum()
    }
}

#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub schema: Schema,
    pub record_count: usize,
    pub batch_count: usize,
    pub training: TrainSummary,
    pub prediction: Prediction,
}

/// Reads, encodes and batches the dataset named by `config`.
#[instrument(skip_all, fields(path = %config.data_path.display()))]
pub fn prepare(config: &PipelineConfig) -> Result<PreparedData> {
    let records = DatasetLoader::new(config.label_column.as_str()).open(&config.data_path)?;
    let schema = records.schema().clone();

    let encoded = LabelEncoder::new(config.encoding).encode_all(records);
    let batches = batch(encoded, config.batch_size)?.collect::<Result<Vec<_>>>()?;

    let prepared = PreparedData { schema, batches };
    info!(
        records = prepared.record_count(),
        batches = prepared.batches.len(),
        features = prepared.feature_count(),
        "dataset prepared"
    );
    Ok(prepared)
}

/// Runs the whole pipeline with the dense network backend, sized and trained
/// from `config`.
pub fn run<W: Write>(config: &PipelineConfig, out: &mut W) -> Result<PipelineOutcome> {
    let mut model = NetworkClassifier::new(config.hidden_size, config.train_config());
    run_with(config, &mut model, out)
}

/// Runs the whole pipeline against `model`, writing the model summary, one
/// progress line per training batch and the predicted class to `out`.
///
/// Only the data and prediction settings of `config` are read here; how the
/// model trains is up to `model`.
pub fn run_with<C, W>(config: &PipelineConfig, model: &mut C, out: &mut W) -> Result<PipelineOutcome>
where
    C: Classifier + ?Sized,
    W: Write,
{
    config.validate()?;
    let data = prepare(config)?;

    let summary = model.build(data.feature_count())?;
    if !summary.is_empty() {
        writeln!(out, "{summary}")?;
    }

    // The progress callback cannot return an error, so keep the first
    // write failure and surface it once training returns.
    let mut write_error = None;
    let training = model.fit(&data.batches, &mut |stats| {
        if write_error.is_none() {
            if let Err(e) = writeln!(out, "{stats}") {
                write_error = Some(e);
            }
        }
    })?;
    if let Some(e) = write_error {
        return Err(e.into());
    }

    let prediction = predict(model, &config.test_input)?;
    writeln!(out, "{}", prediction.class)?;
    info!(class = %prediction.class, scores = ?prediction.scores, "prediction");

    Ok(PipelineOutcome {
        record_count: data.record_count(),
        batch_count: data.batches.len(),
        schema: data.schema,
        training,
        prediction,
    })
}
