use super::elements::ANGLE_ZC;
use super::error::ParameterError;
use super::table::KeyedRow;
use super::{AtomType, Tables};
use serde::Deserialize;
use tracing::debug;

/// Angle-bend parameters (MMFFANG), keyed by `(type_j, type_i, type_k, angle_type)` with
/// the vertex `j` first and `type_i <= type_k`. A zero `ka` marks a row whose rest angle
/// is tabulated but whose force constant comes from the empirical rule.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AngleRow {
    pub atom_type_i: AtomType,
    pub atom_type_j: AtomType,
    pub atom_type_k: AtomType,
    pub angle_type: u8,
    pub ka: f64,
    pub theta0: f64,
}

impl KeyedRow for AngleRow {
    const KEY_COLUMNS: usize = 4;
    fn key(&self, column: usize) -> i32 {
        match column {
            0 => i32::from(self.atom_type_j),
            1 => i32::from(self.atom_type_i),
            2 => i32::from(self.atom_type_k),
            _ => i32::from(self.angle_type),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleParams {
    /// Force constant in md·Å/rad².
    pub ka: f64,
    /// Rest angle in degrees.
    pub theta0: f64,
}

/// Equivalence levels tried for the outer atoms, in order.
const OUTER_LEVELS: [u8; 4] = [1, 2, 3, 5];
const EMPIRICAL_BETA: f64 = 1.75;

impl Tables {
    /// Angle-bend parameters for `ti-tj-tk` with vertex `tj`.
    ///
    /// `r_ij` and `r_jk` are the rest lengths of the two bonds, needed when the force
    /// constant has to be estimated empirically.
    pub fn angle_params(
        &self,
        ti: AtomType,
        tj: AtomType,
        tk: AtomType,
        angle_type: u8,
        r_ij: f64,
        r_jk: f64,
    ) -> Result<AngleParams, ParameterError> {
        for level in OUTER_LEVELS {
            let ei = self.equivalent(ti, level)?;
            let ek = self.equivalent(tk, level)?;
            let (a, b) = (ei.min(ek), ei.max(ek));
            let keys = [
                i32::from(tj),
                i32::from(a),
                i32::from(b),
                i32::from(angle_type),
            ];
            if let Some(row) = self.angles.lookup(&keys) {
                if row.ka > 0.0 {
                    return Ok(AngleParams {
                        ka: row.ka,
                        theta0: row.theta0,
                    });
                }
                let ka = self.empirical_angle_constant(ti, tj, tk, row.theta0, r_ij, r_jk)?;
                debug!(ti, tj, tk, level, ka, "Tabulated rest angle with empirical ka");
                return Ok(AngleParams {
                    ka,
                    theta0: row.theta0,
                });
            }
        }

        let theta0 = self.empirical_rest_angle(tj, angle_type)?;
        let ka = self.empirical_angle_constant(ti, tj, tk, theta0, r_ij, r_jk)?;
        debug!(ti, tj, tk, theta0, ka, "Using empirical angle-bend parameters");
        Ok(AngleParams { ka, theta0 })
    }

    fn empirical_rest_angle(&self, tj: AtomType, angle_type: u8) -> Result<f64, ParameterError> {
        match angle_type {
            3 | 5 | 6 => return Ok(60.0),
            4 | 7 | 8 => return Ok(90.0),
            _ => {}
        }
        let center = self.props(tj)?;
        let theta0 = if center.is_linear() {
            180.0
        } else {
            match (center.crd, center.atomic_number) {
                (4, _) => 109.47,
                (3, 7) if center.pilp != 0 && center.mltb == 0 && !center.is_aromatic() => 108.0,
                (3, _) => 120.0,
                (2, 8) | (2, 16) => 105.0,
                (2, 7) => 115.0,
                _ => 120.0,
            }
        };
        Ok(theta0)
    }

    fn empirical_angle_constant(
        &self,
        ti: AtomType,
        tj: AtomType,
        tk: AtomType,
        theta0: f64,
        r_ij: f64,
        r_jk: f64,
    ) -> Result<f64, ParameterError> {
        let zi = self.props(ti)?.atomic_number;
        let zj = self.props(tj)?.atomic_number;
        let zk = self.props(tk)?.atomic_number;
        let missing = || ParameterError::MissingElement {
            table: "empirical angle",
            elements: vec![zi, zj, zk],
        };
        let (z_i, _) = *ANGLE_ZC.get(&zi).ok_or_else(missing)?;
        let (_, c_j) = *ANGLE_ZC.get(&zj).ok_or_else(missing)?;
        let (z_k, _) = *ANGLE_ZC.get(&zk).ok_or_else(missing)?;

        let sum = r_ij + r_jk;
        let d = (r_ij - r_jk).powi(2) / (sum * sum);
        let theta_rad = theta0.to_radians();
        Ok(EMPIRICAL_BETA * z_i * c_j * z_k / (sum * theta_rad * theta_rad) * (-2.0 * d).exp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tables::Variant;

    fn tables() -> Tables {
        Tables::bundled(Variant::Mmff94).unwrap()
    }

    #[test]
    fn angle_params_returns_explicit_row() {
        let params = tables().angle_params(1, 1, 1, 0, 1.508, 1.508).unwrap();
        assert_eq!(params, AngleParams { ka: 0.851, theta0: 109.608 });
    }

    #[test]
    fn angle_params_is_symmetric_in_outer_atoms() {
        let tables = tables();
        assert_eq!(
            tables.angle_params(5, 1, 1, 0, 1.093, 1.508).unwrap(),
            tables.angle_params(1, 1, 5, 0, 1.508, 1.093).unwrap()
        );
    }

    #[test]
    fn angle_params_steps_down_equivalence_levels() {
        // HC-CR-CR4R has no row; at level 3 CR4R maps to CR, giving HC-CR-CR.
        let params = tables().angle_params(5, 1, 20, 0, 1.093, 1.508).unwrap();
        assert_eq!(params, AngleParams { ka: 0.636, theta0: 110.549 });
    }

    #[test]
    fn angle_params_uses_wildcard_rest_angle_with_empirical_constant() {
        let params = tables().angle_params(1, 8, 5, 0, 1.451, 1.093).unwrap();
        assert_eq!(params.theta0, 108.0);
        assert!(params.ka > 0.0);
    }

    #[test]
    fn angle_params_without_any_row_is_fully_empirical() {
        let params = tables().angle_params(2, 1, 2, 2, 1.482, 1.482).unwrap();
        assert_eq!(params.theta0, 109.47);
        let expected = 1.75 * 2.494 * 1.016 * 2.494
            / (2.0 * 1.482 * 109.47f64.to_radians().powi(2));
        assert!((params.ka - expected).abs() < 1e-12);
    }

    #[test]
    fn angle_params_small_ring_rest_angles() {
        let tables = tables();
        assert_eq!(tables.empirical_rest_angle(22, 3).unwrap(), 60.0);
        assert_eq!(tables.empirical_rest_angle(20, 4).unwrap(), 90.0);
        assert_eq!(tables.empirical_rest_angle(4, 0).unwrap(), 180.0);
        assert_eq!(tables.empirical_rest_angle(8, 0).unwrap(), 108.0);
        assert_eq!(tables.empirical_rest_angle(6, 0).unwrap(), 105.0);
    }
}
