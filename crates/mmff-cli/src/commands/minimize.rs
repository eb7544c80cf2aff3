use crate::cli::MinimizeArgs;
use crate::config;
use crate::error::Result;
use crate::molecule_file::MoleculeDocument;
use crate::utils::progress::CliProgressHandler;
use crate::utils::report::energy_table;
use mmff94::engine::minimizer::MinimizeStatus;
use mmff94::engine::progress::ProgressReporter;
use mmff94::workflows::minimize::{self, MinimizeResult};
use tracing::{info, warn};

pub fn run(args: MinimizeArgs) -> Result<()> {
    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Starting geometry minimization...");
    let result = minimize_to_file(&args, &reporter)?;

    println!(
        "Energy: {:.4} -> {:.4} kcal/mol after {} iteration(s) ({:?})",
        result.initial_energy.total(),
        result.final_energy.total(),
        result.report.iterations,
        result.report.status
    );
    print!("{}", energy_table(&result.final_energy, &result.term_counts));
    println!("✓ Minimized molecule written to: {}", args.output.display());
    Ok(())
}

fn minimize_to_file(args: &MinimizeArgs, reporter: &ProgressReporter) -> Result<MinimizeResult> {
    let config = config::resolve_for_minimize(args)?;
    let input = &args.forcefield.input;

    info!("Loading input molecule from {:?}", input);
    let document = MoleculeDocument::read_from_path(input)?;
    let molecule = document.to_molecule(input)?;

    info!("Invoking the minimization workflow...");
    let result = minimize::run(&molecule, &config, reporter)?;
    if result.report.status != MinimizeStatus::Converged {
        warn!(
            status = ?result.report.status,
            iterations = result.report.iterations,
            "Minimizer stopped before convergence"
        );
    }

    let mut output = MoleculeDocument::from_molecule(&result.molecule, document.name.clone());
    output.rings = document.rings.clone();
    info!("Writing minimized molecule to {:?}", &args.output);
    output.write_to_path(&args.output)?;
    Ok(result)
}
