//! Stochastic Gradient Descent optimizer

use super::Optimizer;

/// SGD optimizer with optional momentum
#[derive(Clone, Debug)]
pub struct Sgd {
    lr: f64,
    momentum: f64,
    velocity: Vec<f64>,
}

impl Sgd {
    /// Create a new SGD optimizer
    pub fn new(lr: f64, momentum: f64) -> Self {
        Self {
            lr,
            momentum,
            velocity: Vec::new(),
        }
    }

    /// Momentum coefficient
    pub fn momentum(&self) -> f64 {
        self.momentum
    }
}

impl Optimizer for Sgd {
    fn step(&mut self, params: &mut [f64], grads: &[f64]) {
        if self.momentum > 0.0 {
            if self.velocity.len() != params.len() {
                self.velocity = vec![0.0; params.len()];
            }
            // v = momentum * v - lr * grad; param += v
            for ((p, g), v) in params.iter_mut().zip(grads).zip(self.velocity.iter_mut()) {
                *v = self.momentum * *v - self.lr * g;
                *p += *v;
            }
        } else {
            for (p, g) in params.iter_mut().zip(grads) {
                *p -= self.lr * g;
            }
        }
    }

    fn lr(&self) -> f64 {
        self.lr
    }

    fn set_lr(&mut self, lr: f64) {
        self.lr = lr;
    }

    fn name(&self) -> &'static str {
        "SGD"
    }
}
