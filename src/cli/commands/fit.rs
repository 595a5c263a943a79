//! Fit command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{apply_overrides, fit_from_spec, load_config, validate_config, FitArgs};

pub fn run_fit(args: FitArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("fitloop: Training from {}", args.config.display()),
    );

    // Load and validate config
    let mut spec = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;

    // Apply command-line overrides
    apply_overrides(&mut spec, &args);
    validate_config(&spec).map_err(|e| format!("Invalid override: {e}"))?;

    if level == LogLevel::Quiet {
        spec.training.verbose = 0;
    }

    if args.dry_run {
        log(
            level,
            LogLevel::Normal,
            "Dry run - config validated successfully",
        );
        log(
            level,
            LogLevel::Verbose,
            &format!(
                "  Optimizer: {} (lr={})",
                spec.optimizer.name, spec.optimizer.lr
            ),
        );
        log(
            level,
            LogLevel::Verbose,
            &format!("  Epochs: {}", spec.training.epochs),
        );
        log(
            level,
            LogLevel::Verbose,
            &format!("  Batch size: {}", spec.training.batch_size),
        );
        return Ok(());
    }

    let report = fit_from_spec(&spec).map_err(|e| format!("Training error: {e}"))?;

    log(
        level,
        LogLevel::Normal,
        &format!("Training complete after {} epochs", report.history.epochs().len()),
    );
    for key in ["loss", "val_loss"] {
        if let Some(value) = report.history.last(key) {
            log(level, LogLevel::Normal, &format!("  Final {key}: {value:.6}"));
        }
    }
    if let Some(evaluation) = &report.evaluation {
        log(
            level,
            LogLevel::Normal,
            &format!("  Evaluation: {}", evaluation.summary()),
        );
    }
    log(
        level,
        LogLevel::Verbose,
        &format!("  Weights: {:?}", report.weights),
    );

    if let Some(path) = &args.output {
        report
            .history
            .save_json(path)
            .map_err(|e| format!("Failed to write history: {e}"))?;
        log(
            level,
            LogLevel::Normal,
            &format!("History written to {}", path.display()),
        );
    }

    Ok(())
}
