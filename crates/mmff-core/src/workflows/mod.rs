//! # Workflows Module
//!
//! Top-level entry points that take a molecule and a configuration and run a complete
//! procedure: parameter tables are fetched from the shared registry, the force field is
//! built, and the result comes back together with an energy report.
//!
//! - **Minimization Workflow** ([`minimize`]) - Local geometry optimization with a
//!   before/after energy breakdown

pub mod minimize;
