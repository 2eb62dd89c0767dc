//! Reflector-strip blocks: a chain of tetrahedra with a single exposed
//! boundary annulus at one end, the rest of the chain folded shut onto
//! itself. Contributes a reflector boundary line to the base orbifold;
//! `twisted` records whether the fold reverses orientation.

use super::ring;
use super::{SatBlock, SatBlockKind};
use crate::annulus::SatAnnulus;
use crate::triangulation::{TetSet, Triangulation};

/// Lengths the starter set seeds with: 1 through 4, each tried both
/// untwisted and twisted.
pub const STARTER_LENGTHS: [u32; 4] = [1, 2, 3, 4];

const OPEN_GAPS: [usize; 1] = [0];

pub fn try_identify(annulus: &SatAnnulus, tri: &Triangulation, avoid: &mut TetSet) -> Option<SatBlock> {
    for length in STARTER_LENGTHS {
        for twisted in [false, true] {
            let n = length as usize;
            if let Some((tet_image, vertex_image)) =
                ring::try_identify_ring(annulus, tri, avoid, n, &OPEN_GAPS, twisted)
            {
                let a = ring::annulus_at(n, 0, &tet_image, &vertex_image);
                debug_assert_eq!(a, *annulus);
                for &t in &tet_image {
                    avoid.insert(t);
                }
                return Some(SatBlock::new(
                    SatBlockKind::ReflectorStrip { length, twisted },
                    vec![a],
                ));
            }
        }
    }
    None
}

pub fn template(length: u32, twisted: bool) -> Triangulation {
    ring::template(length as usize, &OPEN_GAPS, twisted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_starter_length_builds_a_valid_template() {
        for length in STARTER_LENGTHS {
            for twisted in [false, true] {
                let templ = template(length, twisted);
                assert_eq!(templ.n_tetrahedra(), length as usize);
                assert_eq!(templ.boundary_faces().len(), 2);
            }
        }
    }
}
