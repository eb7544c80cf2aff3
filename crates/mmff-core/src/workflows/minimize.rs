use crate::core::forcefield::term::{EnergyComponents, TermKind};
use crate::core::models::molecule::Molecule;
use crate::core::tables::registry::TableRegistry;
use crate::engine::config::MinimizeConfig;
use crate::engine::error::EngineError;
use crate::engine::forcefield::ForceField;
use crate::engine::minimizer::MinimizeReport;
use crate::engine::progress::{Progress, ProgressReporter};
use std::collections::BTreeMap;
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct MinimizeResult {
    /// The input molecule with minimized coordinates.
    pub molecule: Molecule,
    pub report: MinimizeReport,
    pub initial_energy: EnergyComponents,
    pub final_energy: EnergyComponents,
    pub term_counts: BTreeMap<TermKind, usize>,
}

/// Minimizes `molecule` with the tables of the process-wide registry.
#[instrument(skip_all, name = "minimize_workflow")]
pub fn run(
    molecule: &Molecule,
    config: &MinimizeConfig,
    reporter: &ProgressReporter,
) -> Result<MinimizeResult, EngineError> {
    run_with_registry(molecule, config, TableRegistry::global(), reporter)
}

pub fn run_with_registry(
    molecule: &Molecule,
    config: &MinimizeConfig,
    registry: &TableRegistry,
    reporter: &ProgressReporter,
) -> Result<MinimizeResult, EngineError> {
    config.validate()?;

    reporter.report(Progress::PhaseStart {
        name: "Preparation",
    });
    let tables = registry.get_variant(config.variant)?;
    let mut forcefield = ForceField::new(molecule, tables, config.forcefield.clone())?;
    let initial_energy = forcefield.energy_breakdown(forcefield.positions())?;
    reporter.report(Progress::PhaseFinish);

    let report = forcefield.minimise(&config.minimize, reporter)?;

    let final_energy = forcefield.energy_breakdown(forcefield.positions())?;
    let mut minimized = molecule.clone();
    minimized.set_positions_flat(forcefield.positions())?;
    info!(
        initial_energy = initial_energy.total(),
        final_energy = final_energy.total(),
        "Minimization workflow complete"
    );

    Ok(MinimizeResult {
        molecule: minimized,
        report,
        initial_energy,
        final_energy,
        term_counts: forcefield.term_counts(),
    })
}
