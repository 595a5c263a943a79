//! Single-command training from YAML configuration

use std::fs;
use std::path::Path;

use serde::Serialize;

use super::builder::{build_datasets, build_trainer};
use super::schema::FitSpec;
use super::validate::validate_config;
use crate::error::{Error, Result};
use crate::train::{History, Logs};

/// Outcome of a configured fit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitReport {
    /// Per-epoch metrics of the run
    pub history: History,
    /// Final evaluation on the validation file, when one is configured
    pub evaluation: Option<Logs>,
    /// Model weights after training (and any restore by early stopping)
    pub weights: Vec<f64>,
}

/// Load, parse and validate a YAML configuration file
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<FitSpec> {
    let path = config_path.as_ref();
    let yaml_content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

    let spec: FitSpec = serde_yaml::from_str(&yaml_content)
        .map_err(|e| Error::Config(format!("Failed to parse YAML config: {e}")))?;

    validate_config(&spec)?;
    Ok(spec)
}

/// Train from an already validated spec
///
/// Loads the data, builds the model, optimizer and callbacks, runs `fit`
/// and, if a validation file is configured, a final `evaluate` on it.
pub fn fit_from_spec(spec: &FitSpec) -> Result<FitReport> {
    let (train, validation) = build_datasets(&spec.data)?;
    tracing::info!(
        samples = train.len(),
        features = train.num_features(),
        validation = validation.as_ref().map_or(0, |v| v.len()),
        "data loaded"
    );

    let mut trainer = build_trainer(spec, train.num_features())?;
    let history = trainer.fit(&train, validation.as_ref())?;
    let evaluation = validation
        .as_ref()
        .map(|data| trainer.evaluate(data))
        .transpose()?;

    Ok(FitReport {
        history,
        evaluation,
        weights: trainer.handle().weights(),
    })
}

/// Train a model from a YAML configuration file
///
/// # Example
///
/// ```no_run
/// use fitloop::config::fit_from_yaml;
///
/// let report = fit_from_yaml("fit.yaml")?;
/// println!("final loss: {:?}", report.history.last("loss"));
/// # Ok::<(), fitloop::Error>(())
/// ```
pub fn fit_from_yaml<P: AsRef<Path>>(config_path: P) -> Result<FitReport> {
    let spec = load_config(config_path)?;
    fit_from_spec(&spec)
}
