use crate::cli::{ForceFieldArgs, MinimizeArgs};
use crate::error::{CliError, Result};
use mmff94::core::forcefield::term::TermKind;
use mmff94::engine::config::{MinimizeConfig, OptionValue};
use std::path::Path;
use tracing::debug;

/// Loads the configuration file (or the defaults) and applies the command-line
/// overrides shared by every subcommand.
pub fn resolve(args: &ForceFieldArgs) -> Result<MinimizeConfig> {
    let mut config = match &args.config {
        Some(path) => from_file(path)?,
        None => MinimizeConfig::default(),
    };

    if let Some(variant) = &args.variant {
        config.variant = variant
            .parse()
            .map_err(|_| CliError::Argument(format!("Unknown variant '{}'", variant)))?;
    }
    let options = &mut config.forcefield;
    if let Some(cutoff) = args.cutoff {
        options.set("nonbonded-cutoff", cutoff).map_err(config_error)?;
    }
    if let Some(dielectric) = args.dielectric_constant {
        options
            .set("dielectric-constant", dielectric)
            .map_err(config_error)?;
    }
    if let Some(model) = &args.dielectric_model {
        options
            .set("dielectric-model", model.as_str())
            .map_err(config_error)?;
    }
    for name in &args.disabled_terms {
        let kind = TermKind::from_key(name)
            .ok_or_else(|| CliError::Argument(format!("Unknown term family '{}'", name)))?;
        options.set_enabled(kind, false);
    }
    apply_set_values(&mut config, &args.set_values)?;

    debug!("Resolved configuration: {:?}", config);
    Ok(config)
}

/// [`resolve`] plus the minimizer overrides of the `minimize` subcommand.
pub fn resolve_for_minimize(args: &MinimizeArgs) -> Result<MinimizeConfig> {
    let mut config = resolve(&args.forcefield)?;
    if let Some(iterations) = args.max_iterations {
        config.minimize.max_iterations = iterations;
    }
    if let Some(tolerance) = args.energy_tolerance {
        config.minimize.energy_tolerance = tolerance;
    }
    if let Some(tolerance) = args.gradient_tolerance {
        config.minimize.gradient_tolerance = tolerance;
    }
    config.validate().map_err(config_error)?;
    Ok(config)
}

fn from_file(path: &Path) -> Result<MinimizeConfig> {
    debug!("Loading configuration from file: {:?}", path);
    let content = std::fs::read_to_string(path)?;
    MinimizeConfig::from_toml_str(&content).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

fn config_error(e: impl std::fmt::Display) -> CliError {
    CliError::Config(e.to_string())
}

/// Applies `-S section.key=value` pairs. Values are read as booleans, then numbers,
/// then plain text.
fn apply_set_values(config: &mut MinimizeConfig, set_values: &[String]) -> Result<()> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let (key, value_str) = (key.trim(), value_str.trim());

        if let Some(option) = key.strip_prefix("forcefield.") {
            config
                .forcefield
                .set(option, parse_value(value_str))
                .map_err(config_error)?;
            continue;
        }
        match key {
            "variant" => {
                config.variant = value_str.parse().map_err(config_error)?;
            }
            "minimize.max-iterations" => {
                config.minimize.max_iterations = value_str.parse().map_err(|_| {
                    CliError::Config(format!("Invalid integer value for {}: {}", key, value_str))
                })?;
            }
            "minimize.energy-tolerance" => {
                config.minimize.energy_tolerance = value_str.parse().map_err(|_| {
                    CliError::Config(format!("Invalid float value for {}: {}", key, value_str))
                })?;
            }
            "minimize.gradient-tolerance" => {
                config.minimize.gradient_tolerance = value_str.parse().map_err(|_| {
                    CliError::Config(format!("Invalid float value for {}: {}", key, value_str))
                })?;
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(())
}

fn parse_value(text: &str) -> OptionValue {
    if let Ok(flag) = text.parse::<bool>() {
        OptionValue::Flag(flag)
    } else if let Ok(number) = text.parse::<f64>() {
        OptionValue::Number(number)
    } else {
        OptionValue::Text(text.to_string())
    }
}
