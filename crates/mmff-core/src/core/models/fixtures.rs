//! Small test molecules with slightly perturbed, non-equilibrium geometries.

use super::atom::{Atom, Element};
use super::molecule::Molecule;
use super::topology::{Bond, BondOrder};
use nalgebra::Point3;

const HYDROGEN: Element = Element::HYDROGEN;
const CARBON: Element = Element::CARBON;
const NITROGEN: Element = Element::NITROGEN;
const OXYGEN: Element = Element::OXYGEN;
const CHLORINE: Element = Element::CHLORINE;

use BondOrder::{Aromatic, Double, Single};

pub fn build(atoms: &[(Element, [f64; 3])], bonds: &[(usize, usize, BondOrder)]) -> Molecule {
    let atoms = atoms
        .iter()
        .map(|&(element, [x, y, z])| Atom::new(element, Point3::new(x, y, z)))
        .collect();
    let bonds = bonds
        .iter()
        .map(|&(i, j, order)| Bond::new(i, j, order))
        .collect();
    Molecule::new(atoms, bonds).unwrap()
}

pub fn ethane() -> Molecule {
    build(
        &[
            (CARBON, [-0.0070, -0.0140, 0.0060]),
            (CARBON, [1.5229, 0.0014, -0.0054]),
            (HYDROGEN, [-0.3810, 1.0280, -0.0185]),
            (HYDROGEN, [-0.3660, -0.5310, -0.9064]),
            (HYDROGEN, [-0.3663, -0.5008, 0.8749]),
            (HYDROGEN, [1.8922, -1.0226, 0.0179]),
            (HYDROGEN, [1.9064, 0.5097, -0.8709]),
            (HYDROGEN, [1.8852, 0.5282, 0.8816]),
        ],
        &[
            (0, 1, Single),
            (0, 2, Single),
            (0, 3, Single),
            (0, 4, Single),
            (1, 5, Single),
            (1, 6, Single),
            (1, 7, Single),
        ],
    )
}

pub fn butane() -> Molecule {
    build(
        &[
            (CARBON, [-0.0142, -0.0153, -0.0077]),
            (CARBON, [1.5426, -0.0128, 0.0033]),
            (CARBON, [2.1087, -1.4237, 0.0019]),
            (CARBON, [1.7445, -2.1922, -1.2974]),
            (HYDROGEN, [-0.3561, -0.0029, -1.0351]),
            (HYDROGEN, [-0.3599, -0.8919, 0.5058]),
            (HYDROGEN, [-0.3515, 0.8979, 0.5036]),
            (HYDROGEN, [1.8848, 0.5225, 0.9051]),
            (HYDROGEN, [1.8910, 0.5131, -0.8709]),
            (HYDROGEN, [1.6760, -1.9677, 0.8591]),
            (HYDROGEN, [3.1734, -1.3604, 0.0781]),
            (HYDROGEN, [1.6877, -3.2294, -1.0672]),
            (HYDROGEN, [0.8284, -1.8180, -1.6725]),
            (HYDROGEN, [2.5523, -2.0086, -2.0242]),
        ],
        &[
            (0, 1, Single),
            (1, 2, Single),
            (2, 3, Single),
            (0, 4, Single),
            (0, 5, Single),
            (0, 6, Single),
            (1, 7, Single),
            (1, 8, Single),
            (2, 9, Single),
            (2, 10, Single),
            (3, 11, Single),
            (3, 12, Single),
            (3, 13, Single),
        ],
    )
}

pub fn cyclohexane_boat() -> Molecule {
    build(
        &[
            (CARBON, [1.2336, 0.0178, 0.7790]),
            (CARBON, [0.7766, -1.2676, 0.0081]),
            (CARBON, [-0.7641, -1.2303, 0.0129]),
            (CARBON, [-1.2286, -0.0046, 0.7867]),
            (CARBON, [-0.7891, 1.2485, -0.0133]),
            (CARBON, [0.7547, 1.2324, 0.0107]),
            (HYDROGEN, [2.2906, -0.0101, 0.8757]),
            (HYDROGEN, [0.7782, -0.0168, 1.7677]),
            (HYDROGEN, [1.1462, -2.1349, 0.5003]),
            (HYDROGEN, [1.1588, -1.2166, -1.0262]),
            (HYDROGEN, [-1.1499, -2.1348, 0.5058]),
            (HYDROGEN, [-1.1582, -1.2207, -1.0336]),
            (HYDROGEN, [-0.7740, -0.0006, 1.7733]),
            (HYDROGEN, [-2.3149, -0.0198, 0.8768]),
            (HYDROGEN, [-1.1495, 2.1529, 0.5056]),
            (HYDROGEN, [-1.1366, 1.2084, -1.0182]),
            (HYDROGEN, [1.1513, 2.1324, 0.5035]),
            (HYDROGEN, [1.1555, 1.2227, -1.0109]),
        ],
        &[
            (0, 1, Single),
            (1, 2, Single),
            (2, 3, Single),
            (3, 4, Single),
            (4, 5, Single),
            (5, 0, Single),
            (0, 6, Single),
            (0, 7, Single),
            (1, 8, Single),
            (1, 9, Single),
            (2, 10, Single),
            (2, 11, Single),
            (3, 12, Single),
            (3, 13, Single),
            (4, 14, Single),
            (4, 15, Single),
            (5, 16, Single),
            (5, 17, Single),
        ],
    )
}

pub fn benzene() -> Molecule {
    build(
        &[
            (CARBON, [1.3857, -0.0040, -0.0159]),
            (CARBON, [0.7004, 1.1863, -0.0173]),
            (CARBON, [-0.7066, 1.1903, -0.0064]),
            (CARBON, [-1.4079, -0.0200, -0.0139]),
            (CARBON, [-0.7109, -1.2092, -0.0190]),
            (CARBON, [0.7100, -1.1992, -0.0141]),
            (HYDROGEN, [2.4601, -0.0061, -0.0054]),
            (HYDROGEN, [1.2199, 2.1530, 0.0197]),
            (HYDROGEN, [-1.2364, 2.1384, -0.0166]),
            (HYDROGEN, [-2.4859, -0.0063, -0.0094]),
            (HYDROGEN, [-1.2218, -2.1526, -0.0191]),
            (HYDROGEN, [1.2530, -2.1380, -0.0141]),
        ],
        &[
            (0, 1, Aromatic),
            (1, 2, Aromatic),
            (2, 3, Aromatic),
            (3, 4, Aromatic),
            (4, 5, Aromatic),
            (5, 0, Aromatic),
            (0, 6, Single),
            (1, 7, Single),
            (2, 8, Single),
            (3, 9, Single),
            (4, 10, Single),
            (5, 11, Single),
        ],
    )
}

pub fn naphthalene() -> Molecule {
    build(
        &[
            (CARBON, [1.2137, 1.3811, 0.0011]),
            (CARBON, [2.4441, 0.7145, 0.0078]),
            (CARBON, [2.4154, -0.7053, -0.0133]),
            (CARBON, [1.2229, -1.3987, 0.0112]),
            (CARBON, [-0.0068, -0.7111, 0.0125]),
            (CARBON, [-1.1926, -1.3859, 0.0122]),
            (CARBON, [-2.4123, -0.6904, -0.0109]),
            (CARBON, [-2.4243, 0.6942, -0.0188]),
            (CARBON, [-1.2309, 1.3912, -0.0096]),
            (CARBON, [0.0077, 0.7183, -0.0021]),
            (HYDROGEN, [1.2293, 2.4995, 0.0182]),
            (HYDROGEN, [3.3548, 1.2289, -0.0109]),
            (HYDROGEN, [3.3481, -1.2519, 0.0050]),
            (HYDROGEN, [1.2278, -2.4664, -0.0008]),
            (HYDROGEN, [-1.2057, -2.4680, -0.0166]),
            (HYDROGEN, [-3.3538, -1.2237, 0.0113]),
            (HYDROGEN, [-3.3502, 1.2392, -0.0129]),
            (HYDROGEN, [-1.2002, 2.4733, 0.0120]),
        ],
        &[
            (0, 1, Single),
            (1, 2, Double),
            (2, 3, Single),
            (3, 4, Double),
            (4, 9, Single),
            (9, 0, Double),
            (4, 5, Single),
            (5, 6, Double),
            (6, 7, Single),
            (7, 8, Double),
            (8, 9, Single),
            (0, 10, Single),
            (1, 11, Single),
            (2, 12, Single),
            (3, 13, Single),
            (5, 14, Single),
            (6, 15, Single),
            (7, 16, Single),
            (8, 17, Single),
        ],
    )
}

pub fn ethanol() -> Molecule {
    build(
        &[
            (CARBON, [0.0189, -0.0042, -0.0039]),
            (CARBON, [1.5379, 0.0090, -0.0132]),
            (OXYGEN, [1.9706, -1.3660, 0.0162]),
            (HYDROGEN, [1.6628, -1.7954, -0.7776]),
            (HYDROGEN, [-0.3441, 0.0063, -1.0337]),
            (HYDROGEN, [-0.3614, -0.9047, 0.4944]),
            (HYDROGEN, [-0.3445, 0.8960, 0.5149]),
            (HYDROGEN, [1.9027, 0.5095, 0.9050]),
            (HYDROGEN, [1.8984, 0.5006, -0.9001]),
        ],
        &[
            (0, 1, Single),
            (1, 2, Single),
            (2, 3, Single),
            (0, 4, Single),
            (0, 5, Single),
            (0, 6, Single),
            (1, 7, Single),
            (1, 8, Single),
        ],
    )
}

pub fn methylamine() -> Molecule {
    build(
        &[
            (CARBON, [-0.0083, -0.0104, 0.0035]),
            (NITROGEN, [1.4604, -0.0032, -0.0148]),
            (HYDROGEN, [-0.3469, 1.0218, -0.0017]),
            (HYDROGEN, [-0.3600, -0.4977, -0.8932]),
            (HYDROGEN, [-0.3466, -0.5138, 0.8913]),
            (HYDROGEN, [1.8076, -0.9715, -0.0024]),
            (HYDROGEN, [1.7940, 0.4563, -0.8127]),
        ],
        &[
            (0, 1, Single),
            (0, 2, Single),
            (0, 3, Single),
            (0, 4, Single),
            (1, 5, Single),
            (1, 6, Single),
        ],
    )
}

pub fn acetamide() -> Molecule {
    build(
        &[
            (CARBON, [-0.0131, -0.0011, 0.0090]),
            (CARBON, [-1.5077, -0.0070, 0.0007]),
            (OXYGEN, [0.6357, 1.0657, -0.0158]),
            (NITROGEN, [0.5986, -1.2324, -0.0089]),
            (HYDROGEN, [-1.8624, 0.0003, 1.0301]),
            (HYDROGEN, [-1.8629, 0.9065, -0.5161]),
            (HYDROGEN, [-1.8688, -0.8898, -0.5133]),
            (HYDROGEN, [1.6114, -1.2947, 0.0013]),
            (HYDROGEN, [0.0305, -2.0420, 0.0080]),
        ],
        &[
            (0, 1, Single),
            (0, 2, Double),
            (0, 3, Single),
            (1, 4, Single),
            (1, 5, Single),
            (1, 6, Single),
            (3, 7, Single),
            (3, 8, Single),
        ],
    )
}

pub fn pyrrole() -> Molecule {
    build(
        &[
            (NITROGEN, [1.1951, 0.0177, -0.0096]),
            (CARBON, [0.3670, 1.1400, 0.0136]),
            (CARBON, [-0.9692, 0.6785, -0.0023]),
            (CARBON, [-0.9717, -0.7040, -0.0171]),
            (CARBON, [0.3714, -1.1109, 0.0159]),
            (HYDROGEN, [2.1762, 0.0086, 0.0064]),
            (HYDROGEN, [0.6841, 2.1647, 0.0187]),
            (HYDROGEN, [-1.8396, 1.3465, -0.0041]),
            (HYDROGEN, [-1.8289, -1.3088, 0.0133]),
            (HYDROGEN, [0.6848, -2.1521, 0.0006]),
        ],
        &[
            (0, 1, Single),
            (1, 2, Double),
            (2, 3, Single),
            (3, 4, Double),
            (4, 0, Single),
            (0, 5, Single),
            (1, 6, Single),
            (2, 7, Single),
            (3, 8, Single),
            (4, 9, Single),
        ],
    )
}

pub fn pyridine() -> Molecule {
    build(
        &[
            (NITROGEN, [1.3836, -0.0122, -0.0073]),
            (CARBON, [0.7039, 1.1846, 0.0022]),
            (CARBON, [-0.6974, 1.1845, -0.0067]),
            (CARBON, [-1.3850, 0.0005, -0.0174]),
            (CARBON, [-0.6756, -1.1922, 0.0189]),
            (CARBON, [0.6792, -1.2132, -0.0184]),
            (HYDROGEN, [1.2462, 2.1299, -0.0148]),
            (HYDROGEN, [-1.2381, 2.1555, 0.0128]),
            (HYDROGEN, [-2.4797, -0.0140, 0.0168]),
            (HYDROGEN, [-1.2322, -2.1311, -0.0164]),
            (HYDROGEN, [1.2173, -2.1316, -0.0030]),
        ],
        &[
            (0, 1, Double),
            (1, 2, Single),
            (2, 3, Double),
            (3, 4, Single),
            (4, 5, Double),
            (5, 0, Single),
            (1, 6, Single),
            (2, 7, Single),
            (3, 8, Single),
            (4, 9, Single),
            (5, 10, Single),
        ],
    )
}

pub fn ethylene() -> Molecule {
    build(
        &[
            (CARBON, [-0.0171, 0.0175, 0.0054]),
            (CARBON, [1.3421, -0.0167, 0.0142]),
            (HYDROGEN, [-0.5573, 0.9498, -0.0018]),
            (HYDROGEN, [-0.5464, -0.9332, 0.0171]),
            (HYDROGEN, [1.8607, 0.9205, 0.0011]),
            (HYDROGEN, [1.8595, -0.9509, -0.0135]),
        ],
        &[
            (0, 1, Double),
            (0, 2, Single),
            (0, 3, Single),
            (1, 4, Single),
            (1, 5, Single),
        ],
    )
}

pub fn chloromethane() -> Molecule {
    build(
        &[
            (CARBON, [-0.0180, -0.0119, -0.0075]),
            (CHLORINE, [1.7722, 0.0104, -0.0084]),
            (HYDROGEN, [-0.3633, -0.0129, -1.0338]),
            (HYDROGEN, [-0.3826, -0.9000, 0.4944]),
            (HYDROGEN, [-0.3540, 0.8920, 0.5014]),
        ],
        &[
            (0, 1, Single),
            (0, 2, Single),
            (0, 3, Single),
            (0, 4, Single),
        ],
    )
}

pub fn water() -> Molecule {
    build(
        &[
            (OXYGEN, [-0.0010, 0.0174, -0.0157]),
            (HYDROGEN, [0.9728, -0.0027, -0.0002]),
            (HYDROGEN, [-0.2270, 0.9251, 0.0003]),
        ],
        &[
            (0, 1, Single),
            (0, 2, Single),
        ],
    )
}
