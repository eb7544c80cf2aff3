use mmff94::core::forcefield::term::{EnergyComponents, TermKind};
use std::collections::BTreeMap;
use std::fmt::Write;

/// Formats one row per term family plus the total, in kcal/mol.
pub fn energy_table(energy: &EnergyComponents, counts: &BTreeMap<TermKind, usize>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<16} {:>7} {:>14}", "term", "count", "kcal/mol");
    for kind in TermKind::ALL {
        let _ = writeln!(
            out,
            "{:<16} {:>7} {:>14.4}",
            kind.key(),
            counts.get(&kind).copied().unwrap_or(0),
            energy.get(kind)
        );
    }
    let _ = writeln!(
        out,
        "{:<16} {:>7} {:>14.4}",
        "total",
        counts.values().sum::<usize>(),
        energy.total()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lists_every_family_and_the_total() {
        let energy = EnergyComponents {
            bond_stretch: 1.5,
            torsion_angle: -0.25,
            ..Default::default()
        };
        let counts: BTreeMap<_, _> = [(TermKind::BondStretch, 7), (TermKind::TorsionAngle, 9)]
            .into_iter()
            .collect();
        let table = energy_table(&energy, &counts);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 9);
        assert!(lines[1].starts_with("bond-stretch"));
        assert!(lines[1].ends_with("1.5000"));
        assert!(lines[5].starts_with("torsion-angle"));
        assert!(lines[5].ends_with("-0.2500"));
        assert!(lines[8].starts_with("total"));
        assert!(lines[8].contains(" 16 "));
        assert!(lines[8].ends_with("1.2500"));
    }
}
