use crate::core::tables::Tables;
use crate::core::tables::error::ParameterError;
use crate::core::tables::torsion::TorsionParams;
use crate::core::typing::MmffMolecule;
use crate::core::utils::geometry::{accumulate, cos_gradient, point_at};
use nalgebra::Vector3;

/// Below this length of either plane normal the dihedral is undefined and the term
/// contributes neither energy nor gradient.
const DEGENERATE_NORMAL: f64 = 1e-6;

/// Three-term Fourier torsion about the bond `j-k`.
#[derive(Debug, Clone, PartialEq)]
pub struct TorsionAngle {
    pub i: usize,
    pub j: usize,
    pub k: usize,
    pub l: usize,
    pub params: TorsionParams,
}

impl TorsionAngle {
    pub fn new(i: usize, j: usize, k: usize, l: usize, params: TorsionParams) -> Self {
        Self { i, j, k, l, params }
    }

    /// One term per bonded chain `i-j-k-l` with distinct end atoms, each chain once.
    pub fn find_in(molecule: &MmffMolecule, tables: &Tables) -> Result<Vec<Self>, ParameterError> {
        let graph = molecule.molecule();
        let mut terms = Vec::new();
        for bond in graph.bonds() {
            let (j, k) = (bond.i, bond.j);
            for &i in graph.neighbors(j).iter().filter(|&&i| i != k) {
                for &l in graph.neighbors(k).iter().filter(|&&l| l != j && l != i) {
                    let params = tables.torsion_params(
                        molecule.atom_type(i),
                        molecule.atom_type(j),
                        molecule.atom_type(k),
                        molecule.atom_type(l),
                        molecule.torsion_type(i, j, k, l),
                        molecule.effective_order(j, k),
                    )?;
                    terms.push(Self::new(i, j, k, l, params));
                }
            }
        }
        Ok(terms)
    }

    fn bond_vectors(&self, positions: &[f64]) -> [Vector3<f64>; 3] {
        [
            point_at(positions, self.j) - point_at(positions, self.i),
            point_at(positions, self.k) - point_at(positions, self.j),
            point_at(positions, self.l) - point_at(positions, self.k),
        ]
    }

    /// Plane normals of `i-j-k` and `j-k-l`, or `None` when either angle is collinear.
    fn normals(
        r1: &Vector3<f64>,
        r2: &Vector3<f64>,
        r3: &Vector3<f64>,
    ) -> Option<(Vector3<f64>, Vector3<f64>)> {
        let (t1, t2) = (r1.cross(r2), r2.cross(r3));
        (t1.norm() >= DEGENERATE_NORMAL && t2.norm() >= DEGENERATE_NORMAL).then_some((t1, t2))
    }

    pub fn energy(&self, positions: &[f64]) -> f64 {
        let TorsionParams { v1, v2, v3 } = self.params;
        let [r1, r2, r3] = self.bond_vectors(positions);
        let Some((t1, t2)) = Self::normals(&r1, &r2, &r3) else {
            return 0.0;
        };
        let c = (t1.dot(&t2) / (t1.norm() * t2.norm())).clamp(-1.0, 1.0);
        // cos 2phi = 2c^2 - 1, cos 3phi = 4c^3 - 3c
        0.5 * (v1 * (1.0 + c)
            + v2 * (2.0 - 2.0 * c * c)
            + v3 * (1.0 + 4.0 * c * c * c - 3.0 * c))
    }

    pub fn accumulate_gradient(&self, positions: &[f64], gradient: &mut [f64]) {
        let TorsionParams { v1, v2, v3 } = self.params;
        let [r1, r2, r3] = self.bond_vectors(positions);
        let Some((t1, t2)) = Self::normals(&r1, &r2, &r3) else {
            return;
        };
        let c = (t1.dot(&t2) / (t1.norm() * t2.norm())).clamp(-1.0, 1.0);
        let de_dcos = 0.5 * (v1 - 4.0 * v2 * c + v3 * (12.0 * c * c - 3.0));

        let x = cos_gradient(&t1, &t2);
        let y = cos_gradient(&t2, &t1);
        let d1 = r2.cross(&x) * de_dcos;
        let d2 = (x.cross(&r1) + r3.cross(&y)) * de_dcos;
        let d3 = y.cross(&r2) * de_dcos;

        accumulate(gradient, self.i, &-d1);
        accumulate(gradient, self.j, &(d1 - d2));
        accumulate(gradient, self.k, &(d2 - d3));
        accumulate(gradient, self.l, &d3);
    }
}
