use super::elements::TORSION_UV;
use super::error::ParameterError;
use super::table::KeyedRow;
use super::{AtomType, Tables};
use crate::core::models::topology::BondOrder;
use serde::Deserialize;
use tracing::warn;

/// Torsion constants (MMFFTOR / MMFF94s_TOR), keyed by `(type_j, type_k, type_i, type_l,
/// torsion_type)` in canonical order: `type_j <= type_k`, and `type_i <= type_l` when
/// the two central types are equal.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TorsionRow {
    pub atom_type_i: AtomType,
    pub atom_type_j: AtomType,
    pub atom_type_k: AtomType,
    pub atom_type_l: AtomType,
    pub torsion_type: u8,
    pub v1: f64,
    pub v2: f64,
    pub v3: f64,
}

impl KeyedRow for TorsionRow {
    const KEY_COLUMNS: usize = 5;
    fn key(&self, column: usize) -> i32 {
        match column {
            0 => i32::from(self.atom_type_j),
            1 => i32::from(self.atom_type_k),
            2 => i32::from(self.atom_type_i),
            3 => i32::from(self.atom_type_l),
            _ => i32::from(self.torsion_type),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TorsionParams {
    pub v1: f64,
    pub v2: f64,
    pub v3: f64,
}

/// Equivalence levels tried for the terminal atoms `(i, l)`, in order.
const TERMINAL_LEVELS: [(u8, u8); 5] = [(1, 1), (2, 2), (3, 5), (5, 3), (5, 5)];

fn canonical(
    ti: AtomType,
    tj: AtomType,
    tk: AtomType,
    tl: AtomType,
) -> (AtomType, AtomType, AtomType, AtomType) {
    if tj > tk || (tj == tk && ti > tl) {
        (tl, tk, tj, ti)
    } else {
        (ti, tj, tk, tl)
    }
}

impl Tables {
    /// Torsion constants for the chain `ti-tj-tk-tl`.
    ///
    /// Tries the terminal equivalence levels with `torsion_type`, then again with torsion
    /// type 0, then falls back to an empirical estimate from the central bond, so this
    /// lookup always produces constants once the atom types themselves are known.
    /// `central_order` should be [`BondOrder::Aromatic`] for bonds inside an aromatic ring.
    pub fn torsion_params(
        &self,
        ti: AtomType,
        tj: AtomType,
        tk: AtomType,
        tl: AtomType,
        torsion_type: u8,
        central_order: BondOrder,
    ) -> Result<TorsionParams, ParameterError> {
        let (ti, tj, tk, tl) = canonical(ti, tj, tk, tl);

        let mut torsion_types = vec![torsion_type];
        if torsion_type != 0 {
            torsion_types.push(0);
        }

        for tt in torsion_types {
            for (level_i, level_l) in TERMINAL_LEVELS {
                let mut ei = self.equivalent(ti, level_i)?;
                let mut el = self.equivalent(tl, level_l)?;
                if tj == tk && ei > el {
                    std::mem::swap(&mut ei, &mut el);
                }
                let keys = [
                    i32::from(tj),
                    i32::from(tk),
                    i32::from(ei),
                    i32::from(el),
                    i32::from(tt),
                ];
                if let Some(row) = self.torsions.lookup(&keys) {
                    return Ok(TorsionParams {
                        v1: row.v1,
                        v2: row.v2,
                        v3: row.v3,
                    });
                }
            }
        }

        let params = self.empirical_torsion(tj, tk, central_order)?;
        warn!(ti, tj, tk, tl, ?params, "Using empirical torsion constants");
        Ok(params)
    }

    fn empirical_torsion(
        &self,
        tj: AtomType,
        tk: AtomType,
        central_order: BondOrder,
    ) -> Result<TorsionParams, ParameterError> {
        let pj = self.props(tj)?;
        let pk = self.props(tk)?;
        if pj.is_linear() || pk.is_linear() {
            return Ok(TorsionParams::default());
        }

        let (Some(&(uj, vj)), Some(&(uk, vk))) = (
            TORSION_UV.get(&pj.atomic_number),
            TORSION_UV.get(&pk.atomic_number),
        ) else {
            warn!(
                tj,
                tk, "No empirical torsion constants for central elements, using zero barrier"
            );
            return Ok(TorsionParams::default());
        };

        let conjugation = (uj * uk).sqrt();
        let sp2 = |mltb: u8, aromatic: bool| mltb != 0 || aromatic;
        let j_sp2 = sp2(pj.mltb, pj.is_aromatic());
        let k_sp2 = sp2(pk.mltb, pk.is_aromatic());

        let params = match central_order {
            BondOrder::Triple => TorsionParams::default(),
            BondOrder::Double => TorsionParams {
                v2: 6.0 * conjugation,
                ..Default::default()
            },
            BondOrder::Aromatic => TorsionParams {
                v2: 3.0 * conjugation,
                ..Default::default()
            },
            BondOrder::Single => match (j_sp2, k_sp2) {
                (true, true) => TorsionParams {
                    v2: conjugation,
                    ..Default::default()
                },
                (true, false) if pk.pilp != 0 => TorsionParams {
                    v2: 2.5 * conjugation,
                    ..Default::default()
                },
                (false, true) if pj.pilp != 0 => TorsionParams {
                    v2: 2.5 * conjugation,
                    ..Default::default()
                },
                (true, false) | (false, true) => TorsionParams {
                    v3: 0.5,
                    ..Default::default()
                },
                (false, false) => TorsionParams {
                    v3: (vj * vk).sqrt() / 9.0,
                    ..Default::default()
                },
            },
        };
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tables::Variant;

    const TOLERANCE: f64 = 1e-12;

    fn tables(variant: Variant) -> Tables {
        Tables::bundled(variant).unwrap()
    }

    fn params(v1: f64, v2: f64, v3: f64) -> TorsionParams {
        TorsionParams { v1, v2, v3 }
    }

    #[test]
    fn torsion_params_returns_explicit_row() {
        let tables = tables(Variant::Mmff94);
        let found = tables
            .torsion_params(1, 1, 1, 1, 0, BondOrder::Single)
            .unwrap();
        assert_eq!(found, params(0.103, 0.681, 0.332));
    }

    #[test]
    fn torsion_params_is_symmetric_under_reversal() {
        let tables = tables(Variant::Mmff94);
        let forward = tables
            .torsion_params(5, 1, 1, 6, 0, BondOrder::Single)
            .unwrap();
        let backward = tables
            .torsion_params(6, 1, 1, 5, 0, BondOrder::Single)
            .unwrap();
        assert_eq!(forward, backward);
        assert_eq!(forward, params(0.0, 0.0, 0.297));
    }

    #[test]
    fn torsion_params_falls_back_to_wildcard_terminals() {
        let tables = tables(Variant::Mmff94);
        let found = tables
            .torsion_params(20, 1, 1, 21, 0, BondOrder::Single)
            .unwrap();
        assert_eq!(found, params(0.0, 0.0, 0.300));
    }

    #[test]
    fn torsion_params_retries_with_default_torsion_type() {
        let tables = tables(Variant::Mmff94);
        let found = tables
            .torsion_params(1, 1, 1, 1, 2, BondOrder::Single)
            .unwrap();
        assert_eq!(found, params(0.103, 0.681, 0.332));
    }

    #[test]
    fn torsion_params_uses_empirical_rule_when_no_row_matches() {
        let tables = tables(Variant::Mmff94);
        let sp3 = tables
            .torsion_params(1, 6, 6, 1, 0, BondOrder::Single)
            .unwrap();
        assert!((sp3.v3 - 0.2 / 9.0).abs() < TOLERANCE);
        assert_eq!(sp3.v2, 0.0);

        let aromatic = tables
            .torsion_params(5, 38, 38, 5, 0, BondOrder::Aromatic)
            .unwrap();
        assert!((aromatic.v2 - 6.0).abs() < TOLERANCE);
    }

    #[test]
    fn empirical_fallback_is_logged_as_a_warning() {
        use std::io;
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct Captured(Arc<Mutex<Vec<u8>>>);

        impl io::Write for Captured {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .finish();
        let tables = tables(Variant::Mmff94);
        tracing::subscriber::with_default(subscriber, || {
            tables
                .torsion_params(1, 6, 6, 1, 0, BondOrder::Single)
                .unwrap();
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"), "{output}");
        assert!(output.contains("Using empirical torsion constants"), "{output}");
    }

    #[test]
    fn empirical_torsion_is_zero_across_linear_center() {
        let tables = tables(Variant::Mmff94);
        let found = tables.empirical_torsion(4, 1, BondOrder::Single).unwrap();
        assert_eq!(found, TorsionParams::default());
    }

    #[test]
    fn variants_differ_in_amide_torsions() {
        let mmff94 = tables(Variant::Mmff94)
            .torsion_params(1, 3, 10, 28, 0, BondOrder::Single)
            .unwrap();
        let mmff94s = tables(Variant::Mmff94s)
            .torsion_params(1, 3, 10, 28, 0, BondOrder::Single)
            .unwrap();
        assert_eq!(mmff94, params(0.0, 5.4, 0.0));
        assert_eq!(mmff94s, params(0.0, 6.3, 0.0));
    }

    #[test]
    fn supplemented_variant_overrides_matching_rows() {
        let base = tables(Variant::Mmff94s)
            .torsion_params(5, 1, 6, 21, 0, BondOrder::Single)
            .unwrap();
        let plus = tables(Variant::Mmff94sPlus)
            .torsion_params(5, 1, 6, 21, 0, BondOrder::Single)
            .unwrap();
        assert_eq!(base, params(0.0, 0.0, 0.352));
        assert_eq!(plus, params(0.0, 0.0, 0.380));
    }
}
