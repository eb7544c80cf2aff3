//! # Engine Module
//!
//! The stateful half of the library: a [`forcefield::ForceField`] instance built once per
//! molecule, and the minimizer that moves its coordinates.
//!
//! ## Overview
//!
//! Building a force field types the molecule, resolves every term's constants from the
//! parameter tables and takes a snapshot of the coordinates. From then on only the flat
//! position buffer changes. Energies and gradients are recomputed from the immutable
//! term list on every call, which is what lets the minimizer move atoms freely between
//! evaluations.
//!
//! ## Architecture
//!
//! - **Force Field** ([`forcefield`]) - Term assembly, energy and gradient aggregation,
//!   gradient rescaling and the `minimise` entry point
//! - **Minimizer** ([`minimizer`]) - BFGS with a backtracking line search over any
//!   [`minimizer::Objective`]
//! - **Configuration** ([`config`]) - Force-field options, minimizer tolerances and their
//!   TOML form
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Error Handling** ([`error`]) - The top-level [`error::EngineError`]

pub mod config;
pub mod error;
pub mod forcefield;
pub mod minimizer;
pub mod progress;
