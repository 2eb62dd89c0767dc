//! Single-tetrahedron layering blocks: one new tetrahedron glued across
//! both faces of the annulus at once, exposing a fresh annulus on its
//! two remaining faces. The degenerate, one-step case of the
//! [layering walker](crate::layering_walk).

use super::{SatBlock, SatBlockKind};
use crate::annulus::SatAnnulus;
use crate::triangulation::{TetSet, Triangulation};

pub fn try_identify(annulus: &SatAnnulus, tri: &Triangulation, avoid: &mut TetSet) -> Option<SatBlock> {
    let next = annulus.switch_sides(tri)?;
    // A genuine layering glues a single new tetrahedron across both
    // faces at once: both crossings must land on the same tetrahedron.
    if next.tet[0] != next.tet[1] {
        return None;
    }
    if avoid.contains(next.tet[0]) {
        return None;
    }

    let over_horizontal = next.roles[0].apply(0) == annulus.roles[0].apply(1);

    avoid.insert(next.tet[0]);
    Some(SatBlock::new(SatBlockKind::Layering { over_horizontal }, vec![next]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perm::Perm4;

    /// Two faces of `t0` (faces 1 and 3) both glued to the same fresh
    /// tetrahedron `t1`: a genuine single-tetrahedron layering.
    #[test]
    fn a_single_tetrahedron_layered_across_both_faces_is_recognised() {
        let mut tri = Triangulation::new();
        let t = tri.add_tetrahedra(2);
        tri.glue(t[0], 1, t[1], Perm4::IDENTITY);
        tri.glue(t[0], 3, t[1], Perm4::new(2, 1, 0, 3));
        let annulus = SatAnnulus::new(t[0], Perm4::new(0, 2, 3, 1), t[0], Perm4::IDENTITY);
        let mut avoid = TetSet::new();
        let block = try_identify(&annulus, &tri, &mut avoid).expect("a genuine single-tetrahedron layering should be recognised");
        assert!(avoid.contains(t[1]));
        assert_eq!(block.n_annuli(), 1);
    }

    /// The same two faces glued to two distinct tetrahedra: not a
    /// single-tetrahedron layering.
    #[test]
    fn two_distinct_tetrahedra_on_either_side_are_not_a_layering() {
        let mut tri = Triangulation::new();
        let t = tri.add_tetrahedra(3);
        tri.glue(t[0], 1, t[1], Perm4::IDENTITY);
        tri.glue(t[0], 3, t[2], Perm4::IDENTITY);
        let annulus = SatAnnulus::new(t[0], Perm4::new(0, 2, 3, 1), t[0], Perm4::IDENTITY);
        let mut avoid = TetSet::new();
        assert!(try_identify(&annulus, &tri, &mut avoid).is_none());
    }
}
