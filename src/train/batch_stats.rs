use std::fmt;

/// Progress record emitted after every optimizer step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// 0-based index of the batch within its epoch.
    pub batch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Mean cross-entropy over the samples of this batch.
    pub loss: f64,
}

impl fmt::Display for BatchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Epoch: {}/{} Batch: {} Loss: {}", self.epoch, self.total_epochs, self.batch, self.loss)
    }
}

/// Result of a completed (or stopped) training run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainSummary {
    /// Number of epochs that ran to completion.
    pub epochs_completed: usize,
    /// Loss of the last batch processed, if any.
    pub last_loss: Option<f64>,
    /// `true` when the stop flag ended training early.
    pub stopped: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_one_progress_line() {
        let stats = BatchStats { epoch: 3, batch: 14, total_epochs: 100, loss: 0.25 };
        assert_eq!(stats.to_string(), "Epoch: 3/100 Batch: 14 Loss: 0.25");
    }
}
