//! Quasi-Newton minimization over a flat coordinate vector.
//!
//! [`Bfgs`] keeps a dense inverse-Hessian estimate and moves along `-H g` with a
//! backtracking line search that only accepts points satisfying a sufficient-decrease
//! condition. A failed line search restores the previous point, so the objective never
//! increases from one iteration to the next.
//!
//! Objectives may hand out a rescaled gradient. The inverse Hessian starts as the
//! current scale times the identity, so the first step follows the scaled gradient,
//! while every BFGS update works on the unscaled one.

use super::config::MinimizeOptions;
use super::progress::{Progress, ProgressReporter};
use nalgebra::{DMatrix, DVector};
use tracing::{debug, trace};

const SUFFICIENT_DECREASE: f64 = 1e-4;
const MACHINE_EPS: f64 = 3.0e-8;
const STEP_TOLERANCE: f64 = 4.0 * MACHINE_EPS;
const MAX_STEP: f64 = 100.0;

/// A differentiable function of a flat coordinate vector.
pub trait Objective {
    fn dimension(&self) -> usize;

    fn value(&self, x: &[f64]) -> f64;

    /// Writes the (possibly rescaled) gradient at `x` into `gradient` and returns the
    /// nonzero scale factor that was applied to it.
    ///
    /// The scale may change from call to call. [`Bfgs`] divides it back out before
    /// forming curvature pairs, and uses it only to size the initial inverse Hessian
    /// and to test `gradient_tolerance`.
    fn gradient_into(&self, x: &[f64], gradient: &mut [f64]) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinimizeStatus {
    Converged,
    MaxIterations,
    LineSearchFailed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MinimizeReport {
    pub status: MinimizeStatus,
    pub iterations: usize,
    pub initial_energy: f64,
    pub final_energy: f64,
    /// Energy before the first iteration followed by the energy after each one.
    pub trace: Vec<f64>,
}

impl MinimizeReport {
    pub fn converged(&self) -> bool {
        self.status == MinimizeStatus::Converged
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Bfgs {
    max_iterations: usize,
    energy_tolerance: f64,
    gradient_tolerance: f64,
}

impl Bfgs {
    pub fn new(options: &MinimizeOptions) -> Self {
        Self {
            max_iterations: options.max_iterations,
            energy_tolerance: options.energy_tolerance,
            gradient_tolerance: options.gradient_tolerance,
        }
    }

    /// Minimizes `objective` starting from `x`, leaving the best point found in `x`.
    pub fn minimize<O: Objective + ?Sized>(
        &self,
        objective: &O,
        x: &mut [f64],
        reporter: &ProgressReporter,
    ) -> MinimizeReport {
        let n = objective.dimension();
        let mut energy = objective.value(x);
        let initial_energy = energy;
        let mut trace = vec![energy];

        // `scaled` is what the objective hands out; `g` is the true gradient of `value`,
        // used for line-search slopes and curvature pairs.
        let mut scaled = DVector::zeros(n);
        let mut scale = objective.gradient_into(x, scaled.as_mut_slice());
        let mut g = &scaled / scale;
        let mut hessian = DMatrix::<f64>::identity(n, n) * scale;
        let mut direction = -(&hessian * &g);
        let max_step = MAX_STEP * DVector::from_column_slice(x).norm().max(n as f64);

        let mut status = MinimizeStatus::MaxIterations;
        let mut iterations = 0;
        let mut reset = false;

        reporter.report(Progress::TaskStart {
            total_steps: self.max_iterations as u64,
        });

        while iterations < self.max_iterations {
            if max_abs(&scaled) < self.gradient_tolerance {
                status = MinimizeStatus::Converged;
                break;
            }

            let x_old = DVector::from_column_slice(x);
            let Some(new_energy) = line_search(objective, &x_old, energy, &g, &mut direction, max_step, x)
            else {
                // Retry once along the scaled steepest descent before giving up.
                if reset {
                    debug!(iterations, "Line search failed along steepest descent");
                    status = MinimizeStatus::LineSearchFailed;
                    break;
                }
                debug!(iterations, "Line search failed; resetting inverse Hessian");
                reset = true;
                hessian = DMatrix::identity(n, n) * scale;
                direction = -(&hessian * &g);
                continue;
            };
            reset = false;
            iterations += 1;

            let previous = energy;
            energy = new_energy;
            trace.push(energy);
            trace!(iteration = iterations, energy, scale, "Minimizer step");
            reporter.report(Progress::Iteration {
                iteration: iterations,
                energy,
            });
            reporter.report(Progress::TaskIncrement);

            let x_new = DVector::from_column_slice(x);
            let step = &x_new - &x_old;
            let relative_step = step
                .iter()
                .zip(x_new.iter())
                .map(|(dx, xi)| dx.abs() / xi.abs().max(1.0))
                .fold(0.0, f64::max);
            if relative_step < STEP_TOLERANCE {
                status = MinimizeStatus::Converged;
                break;
            }
            if 2.0 * (energy - previous).abs()
                <= self.energy_tolerance * (energy.abs() + previous.abs() + MACHINE_EPS)
            {
                status = MinimizeStatus::Converged;
                break;
            }

            let g_old = g.clone();
            scale = objective.gradient_into(x, scaled.as_mut_slice());
            g = &scaled / scale;
            update_inverse_hessian(&mut hessian, &step, &(&g - &g_old));
            direction = -(&hessian * &g);
        }

        reporter.report(Progress::TaskFinish);
        MinimizeReport {
            status,
            iterations,
            initial_energy,
            final_energy: energy,
            trace,
        }
    }
}

fn max_abs(v: &DVector<f64>) -> f64 {
    v.iter().fold(0.0, |m, g| m.max(g.abs()))
}

/// BFGS update of the inverse Hessian, skipped when the curvature condition is too weak
/// to keep the estimate positive definite.
fn update_inverse_hessian(hessian: &mut DMatrix<f64>, step: &DVector<f64>, dg: &DVector<f64>) {
    let hdg = &*hessian * dg;
    let fac = dg.dot(step);
    let fae = dg.dot(&hdg);
    if fac <= (MACHINE_EPS * dg.norm_squared() * step.norm_squared()).sqrt() {
        return;
    }
    let fac = 1.0 / fac;
    let fad = 1.0 / fae;
    let u = step * fac - &hdg * fad;
    *hessian += step * step.transpose() * fac - &hdg * hdg.transpose() * fad
        + &u * u.transpose() * fae;
}

/// Backtracking line search along `direction` from `x_old`.
///
/// On success `x` holds the accepted point and its energy is returned. On failure `x`
/// is restored to `x_old` and `None` is returned.
fn line_search<O: Objective + ?Sized>(
    objective: &O,
    x_old: &DVector<f64>,
    energy_old: f64,
    g: &DVector<f64>,
    direction: &mut DVector<f64>,
    max_step: f64,
    x: &mut [f64],
) -> Option<f64> {
    let length = direction.norm();
    if length > max_step {
        *direction *= max_step / length;
    }
    let slope = g.dot(direction);
    if slope.is_nan() || slope >= 0.0 {
        x.copy_from_slice(x_old.as_slice());
        return None;
    }
    let largest = direction
        .iter()
        .zip(x_old.iter())
        .map(|(p, xi)| p.abs() / xi.abs().max(1.0))
        .fold(0.0, f64::max);
    let min_lambda = STEP_TOLERANCE / largest;

    let mut lambda = 1.0;
    let mut previous: Option<(f64, f64)> = None;
    loop {
        for (xi, (x0, p)) in x.iter_mut().zip(x_old.iter().zip(direction.iter())) {
            *xi = x0 + lambda * p;
        }
        if lambda < min_lambda {
            x.copy_from_slice(x_old.as_slice());
            return None;
        }
        let energy = objective.value(x);
        if energy <= energy_old + SUFFICIENT_DECREASE * lambda * slope {
            return Some(energy);
        }

        let next = if !energy.is_finite() {
            0.1 * lambda
        } else {
            match previous {
                None => -slope / (2.0 * (energy - energy_old - slope)),
                Some((lambda2, energy2)) => {
                    cubic_step(lambda, energy, lambda2, energy2, energy_old, slope)
                }
            }
            .min(0.5 * lambda)
        };
        if energy.is_finite() {
            previous = Some((lambda, energy));
        }
        lambda = next.max(0.1 * lambda);
    }
}

fn cubic_step(lambda: f64, energy: f64, lambda2: f64, energy2: f64, energy0: f64, slope: f64) -> f64 {
    let rhs1 = energy - energy0 - lambda * slope;
    let rhs2 = energy2 - energy0 - lambda2 * slope;
    let a = (rhs1 / (lambda * lambda) - rhs2 / (lambda2 * lambda2)) / (lambda - lambda2);
    let b = (-lambda2 * rhs1 / (lambda * lambda) + lambda * rhs2 / (lambda2 * lambda2))
        / (lambda - lambda2);
    if a == 0.0 {
        return -slope / (2.0 * b);
    }
    let discriminant = b * b - 3.0 * a * slope;
    if discriminant < 0.0 {
        0.5 * lambda
    } else if b <= 0.0 {
        (-b + discriminant.sqrt()) / (3.0 * a)
    } else {
        -slope / (b + discriminant.sqrt())
    }
}
