//! Running means over batches

use std::collections::BTreeMap;

use crate::train::Logs;

/// Accumulates per-batch logs into sample-weighted running means
///
/// Batch-end logs report the mean over all batches seen so far in the
/// current epoch (or evaluation run); the epoch-end logs are the final means.
#[derive(Clone, Debug, Default)]
pub struct MetricsAggregator {
    totals: BTreeMap<String, f64>,
    samples: usize,
    batches: usize,
}

impl MetricsAggregator {
    /// Create an empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one batch's logs, weighted by the batch's sample count
    pub fn update(&mut self, batch_logs: &Logs, batch_size: usize) {
        let weight = batch_size.max(1);
        for (key, value) in batch_logs {
            *self.totals.entry(key.clone()).or_insert(0.0) += value * weight as f64;
        }
        self.samples += weight;
        self.batches += 1;
    }

    /// Current means; empty until the first update
    pub fn result(&self) -> Logs {
        if self.samples == 0 {
            return Logs::new();
        }
        self.totals
            .iter()
            .map(|(key, total)| (key.clone(), total / self.samples as f64))
            .collect()
    }

    /// Number of batches seen
    pub fn batches(&self) -> usize {
        self.batches
    }

    /// Number of samples seen
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Forget all accumulated values
    pub fn reset(&mut self) {
        self.totals.clear();
        self.samples = 0;
        self.batches = 0;
    }
}
