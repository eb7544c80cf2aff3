use crate::cli::EnergyArgs;
use crate::config;
use crate::error::Result;
use crate::molecule_file::MoleculeDocument;
use crate::utils::report::energy_table;
use mmff94::core::tables::registry::TableRegistry;
use mmff94::engine::error::EngineError;
use mmff94::engine::forcefield::ForceField;
use tracing::info;

pub fn run(args: EnergyArgs) -> Result<()> {
    let output = evaluate(&args)?;
    print!("{output}");
    Ok(())
}

fn evaluate(args: &EnergyArgs) -> Result<String> {
    let config = config::resolve(&args.forcefield)?;
    let input = &args.forcefield.input;

    info!("Loading input molecule from {:?}", input);
    let document = MoleculeDocument::read_from_path(input)?;
    let molecule = document.to_molecule(input)?;

    let tables = TableRegistry::global()
        .get_variant(config.variant)
        .map_err(EngineError::from)?;
    let forcefield = ForceField::new(&molecule, tables, config.forcefield)?;
    let energy = forcefield.energy_breakdown(forcefield.positions())?;

    let title = document.name.as_deref().unwrap_or("molecule");
    Ok(format!(
        "{} ({} atoms, {})\n{}",
        title,
        forcefield.atom_count(),
        config.variant,
        energy_table(&energy, &forcefield.term_counts())
    ))
}
