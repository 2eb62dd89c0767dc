//! Triangular-prism blocks: three tetrahedra glued in a cycle, each pair
//! contributing one internal gluing and one exposed boundary annulus.

use super::ring;
use super::{SatBlock, SatBlockKind};
use crate::annulus::SatAnnulus;
use crate::triangulation::{TetSet, Triangulation};

const N: usize = 3;
const OPEN_GAPS: [usize; 3] = [0, 1, 2];

/// Tries the ring template directly; `major` on success.
fn try_major(annulus: &SatAnnulus, tri: &Triangulation, avoid: &mut TetSet) -> Option<SatBlock> {
    let (tet_image, vertex_image) = ring::try_identify_ring(annulus, tri, avoid, N, &OPEN_GAPS, false)?;

    let annuli: Vec<SatAnnulus> = OPEN_GAPS
        .iter()
        .map(|&g| ring::annulus_at(N, g, &tet_image, &vertex_image))
        .collect();
    debug_assert_eq!(annuli[0], *annulus);

    for &t in &tet_image {
        avoid.insert(t);
    }

    Some(SatBlock::new(SatBlockKind::TriPrism { major: true }, annuli))
}

/// A triangular prism is chiral: the ring template only matches one of
/// the two handednesses directly. If the direct match fails, retry
/// against the vertically reflected annulus and reflect every recovered
/// annulus back, exactly mirroring the way a genuine prism of the
/// opposite handedness is found.
pub fn try_identify(annulus: &SatAnnulus, tri: &Triangulation, avoid: &mut TetSet) -> Option<SatBlock> {
    if let Some(block) = try_major(annulus, tri, avoid) {
        return Some(block);
    }

    let reflected = annulus.reflect_vertical();
    let (tet_image, vertex_image) = ring::try_identify_ring(&reflected, tri, avoid, N, &OPEN_GAPS, false)?;

    let annuli: Vec<SatAnnulus> = OPEN_GAPS
        .iter()
        .map(|&g| ring::annulus_at(N, g, &tet_image, &vertex_image).reflect_vertical())
        .collect();
    debug_assert_eq!(annuli[0], *annulus);

    for &t in &tet_image {
        avoid.insert(t);
    }

    Some(SatBlock::new(SatBlockKind::TriPrism { major: false }, annuli))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perm::Perm4;
    use crate::triangulation::TetIdx;

    #[test]
    fn template_has_six_boundary_faces() {
        let templ = ring::template(N, &OPEN_GAPS, false);
        assert_eq!(templ.n_tetrahedra(), 3);
        assert_eq!(templ.boundary_faces().len(), 6);
    }

    fn canonical_ring() -> (Triangulation, Vec<TetIdx>, SatAnnulus) {
        let templ = ring::template(N, &OPEN_GAPS, false);
        let tet_image: Vec<TetIdx> = (0..N).collect();
        let vertex_image = vec![Perm4::IDENTITY; N];
        let annulus = ring::annulus_at(N, 0, &tet_image, &vertex_image);
        (templ, tet_image, annulus)
    }

    #[test]
    fn a_directly_embedded_ring_is_the_major_variant() {
        let (tri, _, annulus) = canonical_ring();
        let mut avoid = TetSet::new();
        let block = try_identify(&annulus, &tri, &mut avoid).expect("the canonical ring should be recognised");
        match block.kind {
            SatBlockKind::TriPrism { major } => assert!(major, "a direct embedding should pick the major variant"),
            other => panic!("expected TriPrism, got {other:?}"),
        }
    }

    #[test]
    fn a_vertically_reflected_ring_is_the_minor_variant() {
        let (tri, _, annulus) = canonical_ring();
        let reflected = annulus.reflect_vertical();
        let mut avoid = TetSet::new();
        let block =
            try_identify(&reflected, &tri, &mut avoid).expect("the reflected ring should still be recognised, via the minor branch");
        match block.kind {
            SatBlockKind::TriPrism { major } => assert!(!major, "a mirrored embedding should pick the minor variant"),
            other => panic!("expected TriPrism, got {other:?}"),
        }
    }
}
