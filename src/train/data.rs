//! In-memory datasets and batching

use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::Batch;
use crate::{Error, Result};

/// Tabular dataset of feature rows and scalar targets
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    features: Vec<Vec<f64>>,
    targets: Vec<f64>,
}

impl Dataset {
    /// Create a dataset; every row needs a target
    pub fn new(features: Vec<Vec<f64>>, targets: Vec<f64>) -> Result<Self> {
        if features.len() != targets.len() {
            return Err(Error::ShapeMismatch {
                expected: features.len(),
                actual: targets.len(),
            });
        }
        if let Some(first) = features.first() {
            let width = first.len();
            if let Some(row) = features.iter().find(|r| r.len() != width) {
                return Err(Error::ShapeMismatch {
                    expected: width,
                    actual: row.len(),
                });
            }
        }
        Ok(Self { features, targets })
    }

    /// Generate `y = w·x + b + noise` with features drawn uniformly from [-1, 1)
    pub fn synthetic_linear(
        weights: &[f64],
        bias: f64,
        samples: usize,
        noise: f64,
        seed: u64,
    ) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut features = Vec::with_capacity(samples);
        let mut targets = Vec::with_capacity(samples);
        for _ in 0..samples {
            let row: Vec<f64> = weights
                .iter()
                .map(|_| rng.random_range(-1.0..1.0))
                .collect();
            let clean: f64 = row.iter().zip(weights).map(|(x, w)| x * w).sum::<f64>() + bias;
            let jitter = if noise > 0.0 {
                rng.random_range(-noise..noise)
            } else {
                0.0
            };
            features.push(row);
            targets.push(clean + jitter);
        }
        Self { features, targets }
    }

    /// Load a CSV file whose last column is the target
    pub fn from_csv(path: impl AsRef<Path>, has_headers: bool) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(has_headers)
            .trim(csv::Trim::All)
            .from_path(path)?;

        let mut features = Vec::new();
        let mut targets = Vec::new();
        for (line, record) in reader.records().enumerate() {
            let record = record?;
            let values = record
                .iter()
                .map(|field| {
                    field.parse::<f64>().map_err(|e| {
                        Error::Config(format!(
                            "{}: record {}: cannot parse '{field}': {e}",
                            path.display(),
                            line + 1
                        ))
                    })
                })
                .collect::<Result<Vec<f64>>>()?;
            let Some((target, row)) = values.split_last() else {
                continue;
            };
            features.push(row.to_vec());
            targets.push(*target);
        }
        Self::new(features, targets)
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether the dataset has no samples
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Number of features per row (0 for an empty dataset)
    pub fn num_features(&self) -> usize {
        self.features.first().map_or(0, Vec::len)
    }

    /// Feature rows
    pub fn features(&self) -> &[Vec<f64>] {
        &self.features
    }

    /// Targets
    pub fn targets(&self) -> &[f64] {
        &self.targets
    }

    /// Number of batches of `batch_size` needed to cover the dataset
    pub fn num_batches(&self, batch_size: usize) -> usize {
        if batch_size == 0 {
            return 0;
        }
        self.len().div_ceil(batch_size)
    }

    /// Split into consecutive batches; the last one may be smaller
    pub fn batches(&self, batch_size: usize) -> Vec<Batch> {
        if batch_size == 0 {
            return Vec::new();
        }
        self.features
            .chunks(batch_size)
            .zip(self.targets.chunks(batch_size))
            .map(|(x, y)| Batch::new(x.to_vec(), y.to_vec()))
            .collect()
    }

    /// Return a copy with rows permuted by a seeded RNG
    pub fn shuffled(&self, seed: u64) -> Self {
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.shuffle(&mut StdRng::seed_from_u64(seed));
        Self {
            features: order.iter().map(|&i| self.features[i].clone()).collect(),
            targets: order.iter().map(|&i| self.targets[i]).collect(),
        }
    }

    /// Hold out the last `fraction` of rows for validation
    ///
    /// Rows are taken before any shuffling, so the split is deterministic.
    pub fn split_validation(&self, fraction: f64) -> Result<(Self, Self)> {
        if !(fraction > 0.0 && fraction < 1.0) {
            return Err(Error::InvalidConfig(format!(
                "validation_split must be in (0, 1), got {fraction}"
            )));
        }
        let split_at = ((self.len() as f64) * (1.0 - fraction)).floor() as usize;
        if split_at == 0 || split_at == self.len() {
            return Err(Error::InvalidConfig(format!(
                "validation_split {fraction} leaves an empty partition of {} samples",
                self.len()
            )));
        }
        let (train_x, val_x) = self.features.split_at(split_at);
        let (train_y, val_y) = self.targets.split_at(split_at);
        Ok((
            Self {
                features: train_x.to_vec(),
                targets: train_y.to_vec(),
            },
            Self {
                features: val_x.to_vec(),
                targets: val_y.to_vec(),
            },
        ))
    }
}
