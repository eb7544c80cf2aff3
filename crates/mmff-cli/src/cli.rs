use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan",
    version,
    about = "MMFF94 CLI - Energies and geometry minimization of small molecules with the MMFF94/MMFF94s force field.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the energy of a molecule, split by term family.
    Energy(EnergyArgs),
    /// Minimize the geometry of a molecule and write the result.
    Minimize(MinimizeArgs),
}

/// Input and force-field options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct ForceFieldArgs {
    /// Path to the input molecule in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path to a configuration file with [forcefield] and [minimize] tables.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Parameter set to use: MMFF94, MMFF94s or MMFF94s+.
    #[arg(long, value_name = "NAME")]
    pub variant: Option<String>,

    /// Override the nonbonded cutoff in Angstroms.
    #[arg(long, value_name = "FLOAT")]
    pub cutoff: Option<f64>,

    /// Override the dielectric constant.
    #[arg(long, value_name = "FLOAT")]
    pub dielectric_constant: Option<f64>,

    /// Override the dielectric model: 'constant' or 'distance'.
    #[arg(long, value_name = "MODEL")]
    pub dielectric_model: Option<String>,

    /// Disable a term family (e.g. 'electrostatic', 'van-der-waals').
    /// Can be used multiple times.
    #[arg(long = "disable", value_name = "TERM")]
    pub disabled_terms: Vec<String>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S forcefield.nonbonded-cutoff=8.0
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}

/// Arguments for the `energy` subcommand.
#[derive(Args, Debug)]
pub struct EnergyArgs {
    #[command(flatten)]
    pub forcefield: ForceFieldArgs,
}

/// Arguments for the `minimize` subcommand.
#[derive(Args, Debug)]
pub struct MinimizeArgs {
    #[command(flatten)]
    pub forcefield: ForceFieldArgs,

    /// Path for the minimized molecule.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Override the maximum number of minimizer iterations.
    #[arg(long, value_name = "INT")]
    pub max_iterations: Option<usize>,

    /// Override the relative energy-change convergence threshold.
    #[arg(long, value_name = "FLOAT")]
    pub energy_tolerance: Option<f64>,

    /// Override the scaled-gradient convergence threshold.
    #[arg(long, value_name = "FLOAT")]
    pub gradient_tolerance: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn energy_command_parses_overrides() {
        let cli = Cli::parse_from([
            "mmff",
            "energy",
            "-i",
            "water.toml",
            "--variant",
            "MMFF94s",
            "--disable",
            "electrostatic",
            "--disable",
            "torsion-angle",
            "-vv",
        ]);
        assert_eq!(cli.verbose, 2);
        let Commands::Energy(args) = cli.command else {
            panic!("expected energy command");
        };
        assert_eq!(args.forcefield.input, PathBuf::from("water.toml"));
        assert_eq!(args.forcefield.variant.as_deref(), Some("MMFF94s"));
        assert_eq!(
            args.forcefield.disabled_terms,
            vec!["electrostatic".to_string(), "torsion-angle".to_string()]
        );
        assert!(args.forcefield.config.is_none());
    }

    #[test]
    fn minimize_command_requires_output() {
        assert!(Cli::try_parse_from(["mmff", "minimize", "-i", "in.toml"]).is_err());
        let cli = Cli::try_parse_from([
            "mmff",
            "minimize",
            "-i",
            "in.toml",
            "-o",
            "out.toml",
            "--max-iterations",
            "50",
            "--cutoff",
            "9.5",
        ])
        .unwrap();
        let Commands::Minimize(args) = cli.command else {
            panic!("expected minimize command");
        };
        assert_eq!(args.output, PathBuf::from("out.toml"));
        assert_eq!(args.max_iterations, Some(50));
        assert_eq!(args.forcefield.cutoff, Some(9.5));
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["mmff", "-q", "-v", "energy", "-i", "x.toml"]).is_err());
    }
}
