//! Core Metric trait definition

/// Trait for per-batch evaluation metrics
pub trait Metric: Send + Sync {
    /// Compute the metric given predictions and targets
    fn compute(&self, predictions: &[f64], targets: &[f64]) -> f64;

    /// Key under which the metric appears in the logs
    fn name(&self) -> &'static str;

    /// Whether higher values are better (true) or lower (false)
    fn higher_is_better(&self) -> bool {
        false
    }
}
