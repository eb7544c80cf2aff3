//! # MMFF94 Force Field Library
//!
//! Energies, analytic gradients and local minimization of small organic molecules
//! under the Merck Molecular Force Field (MMFF94 and MMFF94s).
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless building blocks: the input molecule model
//!   (`Molecule`), the parameter tables and their multi-column binary search, MMFF atom
//!   typing with the ring-aromaticity fixed point, topological separation, and the seven
//!   energy-term families with their analytic gradients.
//!
//! - **[`engine`]: The Logic Core.** The stateful `ForceField` instance that owns a
//!   position buffer and the immutable term list, aggregates energies and rescaled
//!   gradients, and drives the BFGS minimizer.
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures such as
//!   [`workflows::minimize::run`], which take a molecule and a configuration and return
//!   the optimized structure with an energy report.
//!
//! ```ignore
//! use mmff94::engine::config::MinimizeConfig;
//! use mmff94::engine::progress::ProgressReporter;
//! use mmff94::workflows::minimize;
//!
//! let config = MinimizeConfig::default();
//! let result = minimize::run(&molecule, &config, &ProgressReporter::new())?;
//! println!("{:.4} -> {:.4} kcal/mol", result.initial_energy.total(), result.final_energy.total());
//! ```

pub mod core;
pub mod engine;
pub mod workflows;
