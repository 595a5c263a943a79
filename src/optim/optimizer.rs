//! Optimizer trait

/// Trait for optimization algorithms
///
/// Parameters and gradients are flat slices owned by the model; the optimizer
/// keeps whatever per-parameter state it needs between steps.
pub trait Optimizer: Send {
    /// Apply one update to `params` given their gradients
    fn step(&mut self, params: &mut [f64], grads: &[f64]);

    /// Get learning rate
    fn lr(&self) -> f64;

    /// Set learning rate
    fn set_lr(&mut self, lr: f64);

    /// Optimizer name for logging
    fn name(&self) -> &'static str;
}
