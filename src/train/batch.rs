//! Batch data structure

/// A batch containing input rows and targets
///
/// Prediction batches carry no targets.
#[derive(Clone, Debug, PartialEq)]
pub struct Batch {
    /// Input feature rows
    pub inputs: Vec<Vec<f64>>,
    /// Target values, one per row
    pub targets: Vec<f64>,
}

impl Batch {
    /// Create a new batch
    pub fn new(inputs: Vec<Vec<f64>>, targets: Vec<f64>) -> Self {
        Self { inputs, targets }
    }

    /// Create an input-only batch for inference
    pub fn inputs_only(inputs: Vec<Vec<f64>>) -> Self {
        Self {
            inputs,
            targets: Vec::new(),
        }
    }

    /// Get batch size (number of input rows)
    pub fn size(&self) -> usize {
        self.inputs.len()
    }
}
