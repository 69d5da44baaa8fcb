use std::sync::atomic::Ordering;
use std::time::Instant;

use tracing::{info, warn};

use crate::data::batcher::Batch;
use crate::error::{Error, Result};
use crate::loss::cross_entropy::CrossEntropyLoss;
use crate::math::matrix::Matrix;
use crate::network::network::Network;
use crate::optim::adam::Adam;
use crate::train::batch_stats::{BatchStats, TrainSummary};
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` for `config.epochs` epochs over `batches` in their given
/// order, applying one Adam step per batch.
///
/// `on_batch` is called once after every step with that batch's mean loss.
///
/// # Early termination
/// The loop stops before the next batch once `config.stop_flag` is set; the
/// returned summary then has `stopped == true`.
///
/// # Errors
/// `Error::Training` if there are no samples or a sample's width does not
/// match the network input.
pub fn train_loop(
    network: &mut Network,
    batches: &[Batch],
    optimizer: &mut Adam,
    config: &TrainConfig,
    on_batch: &mut dyn FnMut(&BatchStats),
) -> Result<TrainSummary> {
    validate(network, batches)?;

    let started = Instant::now();
    let mut summary = TrainSummary { epochs_completed: 0, last_loss: None, stopped: false };
    info!(epochs = config.epochs, batches = batches.len(), "training started");

    'epochs: for epoch in 1..=config.epochs {
        for (index, batch) in batches.iter().enumerate() {
            if stop_requested(config) {
                summary.stopped = true;
                break 'epochs;
            }

            let loss = run_one_batch(network, batch, optimizer);
            summary.last_loss = Some(loss);
            on_batch(&BatchStats { epoch, batch: index, total_epochs: config.epochs, loss });
        }
        summary.epochs_completed = epoch;
    }

    if summary.stopped {
        warn!(epochs_completed = summary.epochs_completed, "training stopped early");
    } else {
        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            last_loss = summary.last_loss.unwrap_or_default(),
            "training finished"
        );
    }
    Ok(summary)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn validate(network: &Network, batches: &[Batch]) -> Result<()> {
    if batches.iter().all(Batch::is_empty) {
        return Err(Error::Training("dataset contains no samples".into()));
    }
    let width = network.input_size();
    for input in batches.iter().flat_map(|b| b.inputs()) {
        if input.len() != width {
            return Err(Error::Training(format!(
                "sample has {} features, model expects {}",
                input.len(),
                width
            )));
        }
    }
    Ok(())
}

fn stop_requested(config: &TrainConfig) -> bool {
    config
        .stop_flag
        .as_ref()
        .is_some_and(|flag| flag.load(Ordering::Relaxed))
}

/// Accumulates gradients over one batch, applies their mean, and returns the
/// mean loss over the batch's samples.
fn run_one_batch(network: &mut Network, batch: &Batch, optimizer: &mut Adam) -> f64 {
    let mut total_loss = 0.0;

    // Zero-initialize accumulated gradient storage.
    let mut acc_grads: Vec<(Matrix, Matrix)> = network.layers.iter()
        .map(|layer| (
            Matrix::zeros(layer.weights.rows, layer.weights.cols),
            Matrix::zeros(layer.biases.rows, layer.biases.cols),
        ))
        .collect();

    for (input, expected) in batch.inputs().zip(batch.targets()) {
        let output = network.forward(input);

        total_loss += CrossEntropyLoss::loss(&output, expected);

        let error = CrossEntropyLoss::derivative(&output, expected);
        let mut delta = Matrix::row(&error);

        // Backward pass.
        for i in (0..network.layers.len()).rev() {
            let input_for_layer = if i == 0 {
                Matrix::row(input)
            } else {
                network.layers[i - 1].neurons.clone()
            };

            let (w_grad, b_grad) = network.layers[i].compute_gradients(&delta, &input_for_layer);

            if i > 0 {
                // Propagate δ_i through weights to get ∂L/∂a_{i-1}
                delta = b_grad.clone() * network.layers[i].weights.transpose();
            }

            let (w_acc, b_acc) = &mut acc_grads[i];
            *w_acc = w_acc.clone() + w_grad;
            *b_acc = b_acc.clone() + b_grad;
        }
    }

    // Average and apply.
    let inv_batch = 1.0 / batch.len() as f64;
    let averaged = acc_grads
        .into_iter()
        .map(|(w, b)| (w.map(|x| x * inv_batch), b.map(|x| x * inv_batch)))
        .collect();
    optimizer.step(&mut network.layers, averaged);

    total_loss * inv_batch
}
