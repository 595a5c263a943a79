//! Info command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{build_callbacks, load_config, InfoArgs, OutputFormat};

pub fn run_info(args: InfoArgs, level: LogLevel) -> Result<(), String> {
    let spec = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;

    match args.format {
        OutputFormat::Text => {
            log(level, LogLevel::Normal, "Configuration Info:");
            println!();
            let data = match (&spec.data.path, &spec.data.synthetic) {
                (Some(path), _) => path.display().to_string(),
                (None, Some(s)) => format!("synthetic ({} samples)", s.samples),
                (None, None) => "none".to_string(),
            };
            println!("Data: {data}");
            if let Some(val) = &spec.data.validation_path {
                println!("Validation data: {}", val.display());
            } else if spec.training.validation_split > 0.0 {
                println!("Validation split: {}", spec.training.validation_split);
            }
            println!("Model: {:?}", spec.model.kind);
            println!(
                "Optimizer: {} (lr={})",
                spec.optimizer.name, spec.optimizer.lr
            );
            println!(
                "Run: {} epochs, batch size {}",
                spec.training.epochs, spec.training.batch_size
            );

            let callbacks: Vec<&str> = build_callbacks(&spec.callbacks)
                .iter()
                .map(|cb| cb.name())
                .collect();
            if !callbacks.is_empty() {
                println!("Callbacks: {}", callbacks.join(", "));
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&spec)
                .map_err(|e| format!("JSON serialization error: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&spec)
                .map_err(|e| format!("YAML serialization error: {e}"))?;
            println!("{yaml}");
        }
    }

    Ok(())
}
