//! Monitored-quantity comparison shared by early stopping and checkpointing

use serde::{Deserialize, Serialize};

/// Direction in which a monitored quantity improves
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonitorMode {
    /// Lower is better
    Min,
    /// Higher is better
    Max,
    /// Infer from the key: `Max` for accuracy/AUC-like names, otherwise `Min`
    #[default]
    Auto,
}

impl MonitorMode {
    /// Resolve `Auto` against a log key
    pub fn resolve(self, key: &str) -> MonitorMode {
        match self {
            MonitorMode::Auto => {
                if key.contains("acc") || key.contains("auc") || key.ends_with("r2") {
                    MonitorMode::Max
                } else {
                    MonitorMode::Min
                }
            }
            other => other,
        }
    }

    /// Worst possible value, the starting point for "best so far"
    pub fn worst(self) -> f64 {
        match self {
            MonitorMode::Max => f64::NEG_INFINITY,
            _ => f64::INFINITY,
        }
    }

    /// Whether `current` beats `reference` by more than `min_delta`
    ///
    /// Must be called on a resolved mode.
    pub fn improves(self, current: f64, reference: f64, min_delta: f64) -> bool {
        match self {
            MonitorMode::Max => current - min_delta.abs() > reference,
            _ => current + min_delta.abs() < reference,
        }
    }
}
