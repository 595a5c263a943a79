//! Validate command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{load_config, FitSpec, LrScheduleSpec, ValidateArgs};

/// Format model information as a string
pub fn format_model_info(spec: &FitSpec) -> String {
    let features = spec
        .model
        .features
        .map_or_else(|| "from data".to_string(), |n| n.to_string());
    let mut lines = vec![
        format!("  Model: {:?}", spec.model.kind),
        format!("  Features: {features}"),
    ];
    if let Some(weights) = &spec.model.weights {
        lines.push(format!("  Initial weights: {weights:?}"));
    }
    lines.join("\n")
}

/// Format data configuration as a string
pub fn format_data_info(spec: &FitSpec) -> String {
    let mut lines = Vec::new();
    if let Some(path) = &spec.data.path {
        lines.push(format!("  Training data: {}", path.display()));
    }
    if let Some(synthetic) = &spec.data.synthetic {
        lines.push(format!(
            "  Synthetic data: {} samples, weights {:?}, bias {}",
            synthetic.samples, synthetic.weights, synthetic.bias
        ));
    }
    if let Some(val) = &spec.data.validation_path {
        lines.push(format!("  Validation data: {}", val.display()));
    }
    lines.push(format!("  Batch size: {}", spec.training.batch_size));
    lines.join("\n")
}

/// Format optimizer configuration as a string
pub fn format_optimizer_info(spec: &FitSpec) -> String {
    let mut lines = vec![
        format!("  Optimizer: {}", spec.optimizer.name),
        format!("  Learning rate: {}", spec.optimizer.lr),
    ];
    let mut params: Vec<_> = spec.optimizer.params.iter().collect();
    params.sort_by(|a, b| a.0.cmp(b.0));
    for (name, value) in params {
        lines.push(format!("  {name}: {value}"));
    }
    lines.join("\n")
}

/// Format training configuration as a string
pub fn format_training_info(spec: &FitSpec) -> String {
    let t = &spec.training;
    let mut lines = vec![
        format!("  Epochs: {} (starting at {})", t.epochs, t.initial_epoch),
        format!("  Shuffle: {} (seed {})", t.shuffle, t.seed),
    ];
    if t.validation_split > 0.0 {
        lines.push(format!("  Validation split: {}", t.validation_split));
    }
    if t.validation_freq > 1 {
        lines.push(format!("  Validation every {} epochs", t.validation_freq));
    }
    if let Some(steps) = t.steps_per_epoch {
        lines.push(format!("  Steps per epoch: {steps}"));
    }
    lines.join("\n")
}

/// Format callback configuration as a string
pub fn format_callbacks_info(spec: &FitSpec) -> Option<String> {
    let cb = &spec.callbacks;
    let mut lines = vec!["  Callbacks:".to_string()];
    if cb.terminate_on_nan {
        lines.push("    Terminate on NaN".to_string());
    }
    if let Some(schedule) = &cb.lr_schedule {
        lines.push(match schedule {
            LrScheduleSpec::StepDecay { lr, step_size, gamma } => {
                format!("    LR schedule: step decay from {lr}, x{gamma} every {step_size} epochs")
            }
            LrScheduleSpec::Cosine { lr_max, lr_min, t_max } => {
                format!("    LR schedule: cosine {lr_max} -> {lr_min} over {t_max} epochs")
            }
            LrScheduleSpec::Piecewise { table } => {
                format!("    LR schedule: piecewise {table:?}")
            }
        });
    }
    if let Some(es) = &cb.early_stopping {
        lines.push(format!(
            "    Early stopping: {} (patience {}, min_delta {}, restore {})",
            es.monitor, es.patience, es.min_delta, es.restore_best_weights
        ));
    }
    if let Some(ckpt) = &cb.checkpoint {
        lines.push(format!("    Checkpoints: {}", ckpt.dir.display()));
    }
    if let Some(csv) = &cb.csv_log {
        lines.push(format!("    CSV log: {}", csv.path.display()));
    }
    (lines.len() > 1).then(|| lines.join("\n"))
}

/// Print detailed configuration summary
pub fn print_detailed_summary(spec: &FitSpec) {
    println!();
    println!("Configuration Summary:");
    println!("{}", format_model_info(spec));
    println!();
    println!("{}", format_data_info(spec));
    println!();
    println!("{}", format_optimizer_info(spec));
    println!();
    println!("{}", format_training_info(spec));

    if let Some(callbacks_info) = format_callbacks_info(spec) {
        println!();
        println!("{callbacks_info}");
    }
}

pub fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Validating config: {}", args.config.display()),
    );

    let spec = load_config(&args.config).map_err(|e| format!("Validation failed: {e}"))?;

    log(level, LogLevel::Normal, "Configuration is valid");

    if args.detailed {
        print_detailed_summary(&spec);
    }

    Ok(())
}
