use super::config::{ForceFieldOptions, MinimizeOptions};
use super::error::EngineError;
use super::minimizer::{Bfgs, MinimizeReport, Objective};
use super::progress::{Progress, ProgressReporter};
use crate::core::forcefield::angle_bend::AngleBend;
use crate::core::forcefield::bond_stretch::BondStretch;
use crate::core::forcefield::electrostatic::Electrostatic;
use crate::core::forcefield::out_of_plane::OutOfPlane;
use crate::core::forcefield::stretch_bend::StretchBend;
use crate::core::forcefield::term::{EnergyComponents, EnergyTerm, TermKind};
use crate::core::forcefield::torsion::TorsionAngle;
use crate::core::forcefield::vdw::VanDerWaals;
use crate::core::models::molecule::Molecule;
use crate::core::tables::Tables;
use crate::core::tables::registry::TableRegistry;
use crate::core::typing::MmffMolecule;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, instrument};

/// Factor applied to every raw gradient component before it reaches the minimizer.
pub const GRADIENT_SCALE: f64 = 0.1;
/// Largest scaled gradient component allowed; the scale is halved until it holds.
pub const MAX_SCALED_COMPONENT: f64 = 10.0;

/// Scales `gradient` in place and returns the factor used.
///
/// The factor starts at [`GRADIENT_SCALE`] and is halved while the largest scaled
/// component would exceed [`MAX_SCALED_COMPONENT`], so it is always `0.1 / 2^k`.
pub fn rescale_gradient(gradient: &mut [f64]) -> f64 {
    let largest = gradient.iter().fold(0.0_f64, |m, g| m.max(g.abs()));
    let mut scale = GRADIENT_SCALE;
    while largest.is_finite() && largest * scale > MAX_SCALED_COMPONENT {
        scale *= 0.5;
    }
    for g in gradient.iter_mut() {
        *g *= scale;
    }
    scale
}

/// An MMFF94 force field instance for one molecule.
///
/// Construction types the molecule and resolves every term's constants once. After
/// that only positions change: [`energy`](Self::energy) and
/// [`gradient`](Self::gradient) evaluate the fixed term list against whatever
/// coordinates they are given. Nonbonded pairs are selected against the cutoff using
/// the positions at construction time.
#[derive(Debug, Clone)]
pub struct ForceField {
    molecule: MmffMolecule,
    tables: Arc<Tables>,
    options: ForceFieldOptions,
    terms: Vec<EnergyTerm>,
    positions: Vec<f64>,
    gradient: Vec<f64>,
    gradient_scale: f64,
}

impl ForceField {
    #[instrument(skip_all, name = "forcefield_build")]
    pub fn new(
        molecule: &Molecule,
        tables: Arc<Tables>,
        options: ForceFieldOptions,
    ) -> Result<Self, EngineError> {
        options.validate()?;
        let typed = MmffMolecule::new(molecule, &tables)?;
        let positions = molecule.positions_flat();
        let terms = build_terms(&typed, &tables, &positions, &options)?;

        let forcefield = Self {
            gradient: vec![0.0; positions.len()],
            molecule: typed,
            tables,
            options,
            terms,
            positions,
            gradient_scale: GRADIENT_SCALE,
        };
        let counts = forcefield.term_counts();
        info!(
            atoms = forcefield.atom_count(),
            variant = forcefield.tables.variant().name(),
            bond_stretch = counts[&TermKind::BondStretch],
            angle_bend = counts[&TermKind::AngleBend],
            stretch_bend = counts[&TermKind::StretchBend],
            out_of_plane = counts[&TermKind::OutOfPlane],
            torsion_angle = counts[&TermKind::TorsionAngle],
            van_der_waals = counts[&TermKind::VanDerWaals],
            electrostatic = counts[&TermKind::Electrostatic],
            "Built force field"
        );
        Ok(forcefield)
    }

    /// Builds a force field with the tables registered under `variant`, e.g. `"MMFF94s"`.
    pub fn from_registry(
        molecule: &Molecule,
        registry: &TableRegistry,
        variant: &str,
        options: ForceFieldOptions,
    ) -> Result<Self, EngineError> {
        let tables = registry.get(variant)?;
        Self::new(molecule, tables, options)
    }

    pub fn atom_count(&self) -> usize {
        self.molecule.atom_count()
    }

    pub fn molecule(&self) -> &MmffMolecule {
        &self.molecule
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    pub fn options(&self) -> &ForceFieldOptions {
        &self.options
    }

    pub fn terms(&self) -> &[EnergyTerm] {
        &self.terms
    }

    /// Number of terms per family, including families with no terms.
    pub fn term_counts(&self) -> BTreeMap<TermKind, usize> {
        let mut counts: BTreeMap<TermKind, usize> =
            TermKind::ALL.into_iter().map(|kind| (kind, 0)).collect();
        for term in &self.terms {
            *counts.entry(term.kind()).or_default() += 1;
        }
        counts
    }

    /// The instance's own coordinate buffer, `3 * atom_count` values.
    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    pub fn set_positions(&mut self, positions: &[f64]) -> Result<(), EngineError> {
        self.check_length(positions)?;
        self.positions.copy_from_slice(positions);
        Ok(())
    }

    /// Total energy in kcal/mol at `positions`.
    pub fn energy(&self, positions: &[f64]) -> Result<f64, EngineError> {
        self.check_length(positions)?;
        Ok(self.total_energy(positions))
    }

    /// Total energy at the instance's own positions.
    pub fn current_energy(&self) -> f64 {
        self.total_energy(&self.positions)
    }

    pub fn energy_breakdown(&self, positions: &[f64]) -> Result<EnergyComponents, EngineError> {
        self.check_length(positions)?;
        let mut components = EnergyComponents::default();
        for term in &self.terms {
            components.add_to(term.kind(), term.energy(positions));
        }
        Ok(components)
    }

    /// Unscaled analytic gradient, in kcal/mol/Å.
    pub fn raw_gradient(&mut self, positions: &[f64]) -> Result<&[f64], EngineError> {
        self.check_length(positions)?;
        accumulate_all(&self.terms, positions, &mut self.gradient);
        Ok(&self.gradient)
    }

    /// Analytic gradient passed through [`rescale_gradient`], as seen by the minimizer.
    pub fn gradient(&mut self, positions: &[f64]) -> Result<&[f64], EngineError> {
        self.check_length(positions)?;
        accumulate_all(&self.terms, positions, &mut self.gradient);
        self.gradient_scale = rescale_gradient(&mut self.gradient);
        Ok(&self.gradient)
    }

    /// Scale factor applied by the most recent [`gradient`](Self::gradient) call.
    pub fn gradient_scale(&self) -> f64 {
        self.gradient_scale
    }

    /// Minimizes the energy starting from, and writing back to, the instance's positions.
    #[instrument(skip_all, name = "forcefield_minimise")]
    pub fn minimise(
        &mut self,
        options: &MinimizeOptions,
        reporter: &ProgressReporter,
    ) -> Result<MinimizeReport, EngineError> {
        options.validate()?;
        reporter.report(Progress::PhaseStart { name: "Minimization" });
        info!(
            max_iterations = options.max_iterations,
            energy = self.current_energy(),
            "Starting minimization"
        );

        let mut x = self.positions.clone();
        let report = Bfgs::new(options).minimize(&*self, &mut x, reporter);
        self.positions = x;

        info!(
            status = ?report.status,
            iterations = report.iterations,
            energy = report.final_energy,
            "Minimization finished"
        );
        reporter.message(|| {
            format!(
                "{:?} after {} iteration(s): {:.4} -> {:.4} kcal/mol",
                report.status, report.iterations, report.initial_energy, report.final_energy
            )
        });
        reporter.report(Progress::PhaseFinish);
        Ok(report)
    }

    fn total_energy(&self, positions: &[f64]) -> f64 {
        self.terms.iter().map(|term| term.energy(positions)).sum()
    }

    fn check_length(&self, positions: &[f64]) -> Result<(), EngineError> {
        let expected = 3 * self.atom_count();
        if positions.len() != expected {
            return Err(EngineError::PositionLength {
                expected,
                actual: positions.len(),
            });
        }
        Ok(())
    }
}

impl Objective for ForceField {
    fn dimension(&self) -> usize {
        self.positions.len()
    }

    fn value(&self, x: &[f64]) -> f64 {
        self.total_energy(x)
    }

    fn gradient_into(&self, x: &[f64], gradient: &mut [f64]) -> f64 {
        accumulate_all(&self.terms, x, gradient);
        rescale_gradient(gradient)
    }
}

fn accumulate_all(terms: &[EnergyTerm], positions: &[f64], gradient: &mut [f64]) {
    gradient.fill(0.0);
    for term in terms {
        term.accumulate_gradient(positions, gradient);
    }
}

fn build_terms(
    molecule: &MmffMolecule,
    tables: &Tables,
    positions: &[f64],
    options: &ForceFieldOptions,
) -> Result<Vec<EnergyTerm>, EngineError> {
    let mut terms = Vec::new();
    if options.bond_stretch {
        terms.extend(BondStretch::find_in(molecule, tables)?.into_iter().map(EnergyTerm::from));
    }
    if options.angle_bend {
        terms.extend(AngleBend::find_in(molecule, tables)?.into_iter().map(EnergyTerm::from));
    }
    if options.stretch_bend {
        terms.extend(StretchBend::find_in(molecule, tables)?.into_iter().map(EnergyTerm::from));
    }
    if options.out_of_plane {
        terms.extend(OutOfPlane::find_in(molecule, tables)?.into_iter().map(EnergyTerm::from));
    }
    if options.torsion_angle {
        terms.extend(TorsionAngle::find_in(molecule, tables)?.into_iter().map(EnergyTerm::from));
    }
    if options.van_der_waals {
        terms.extend(
            VanDerWaals::find_in(molecule, tables, positions, options.nonbonded_cutoff)?
                .into_iter()
                .map(EnergyTerm::from),
        );
    }
    if options.electrostatic {
        terms.extend(
            Electrostatic::find_in(
                molecule,
                positions,
                options.nonbonded_cutoff,
                options.dielectric_constant,
                options.dielectric_model,
            )
            .into_iter()
            .map(EnergyTerm::from),
        );
    }
    Ok(terms)
}
