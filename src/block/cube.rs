//! Cube blocks: six tetrahedra arranged in a ring, four of whose six gaps
//! are exposed as boundary annuli (the remaining two gaps are the cube's
//! internal "top" and "bottom", folded shut). Contributes no exceptional
//! fibres — the cube's base-orbifold piece is an honest disc.

use super::ring;
use super::{SatBlock, SatBlockKind};
use crate::annulus::SatAnnulus;
use crate::triangulation::{TetSet, Triangulation};

const N: usize = 6;
const OPEN_GAPS: [usize; 4] = [0, 1, 2, 3];

pub fn try_identify(annulus: &SatAnnulus, tri: &Triangulation, avoid: &mut TetSet) -> Option<SatBlock> {
    let (tet_image, vertex_image) = ring::try_identify_ring(annulus, tri, avoid, N, &OPEN_GAPS, false)?;

    let annuli: Vec<SatAnnulus> = OPEN_GAPS
        .iter()
        .map(|&g| ring::annulus_at(N, g, &tet_image, &vertex_image))
        .collect();
    debug_assert_eq!(annuli[0], *annulus);

    for &t in &tet_image {
        avoid.insert(t);
    }

    Some(SatBlock::new(SatBlockKind::Cube, annuli))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_has_six_tetrahedra_and_four_open_gaps() {
        let templ = ring::template(N, &OPEN_GAPS, false);
        assert_eq!(templ.n_tetrahedra(), 6);
        assert_eq!(templ.boundary_faces().len(), 8);
    }
}
