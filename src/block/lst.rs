//! Layered solid torus blocks.
//!
//! A layered solid torus (LST) is built by repeatedly layering a single
//! tetrahedron onto the two exposed faces of a previous stage, in
//! lockstep with the continued-fraction recursion `(p,q) -> (p+q,q)`
//! that the [layering walker](crate::layering_walk) already implements:
//! given an annulus of a single tetrahedron, identify the unique LST
//! that terminates there, by running that same walker until it closes
//! up on itself.

use super::{SatBlock, SatBlockKind};
use crate::annulus::SatAnnulus;
use crate::layering_walk::Layering;
use crate::perm::Perm4;
use crate::triangulation::{TetIdx, TetSet, Triangulation};

const MAX_LAYERS: usize = 256;

/// Walks layerings from a single-tetrahedron top annulus until the two
/// boundary tetrahedra coincide again (the base case of the LST
/// recursion), returning the meridinal-cut triple and the tetrahedra
/// claimed along the way.
fn recognise(tri: &Triangulation, tet: TetIdx, r0: Perm4, r1: Perm4) -> Option<(i64, i64, i64, TetSet)> {
    let mut claimed = TetSet::new();
    claimed.insert(tet);

    let mut walker = Layering::new(tet, r0, tet, r1);
    for _ in 0..MAX_LAYERS {
        if !walker.extend_one(tri) {
            return None;
        }
        let t0 = walker.new_boundary_tet(0);
        let t1 = walker.new_boundary_tet(1);
        claimed.insert(t0);
        claimed.insert(t1);

        if t0 == t1 {
            let m = walker.boundary_reln();
            let p = m.a.unsigned_abs() as i64;
            let q = m.c.unsigned_abs() as i64;
            return if p > 0 && q > 0 { Some((p, q, p + q, claimed)) } else { None };
        }
    }
    None
}

/// The tetrahedron's other two faces, the ones not exposed by the
/// annulus. Their shared edge is the axis the LST's internal layering
/// chain winds around; walking the layering from here (never from the
/// annulus's own exposed faces) is what actually descends into the
/// block's interior.
fn central_faces(face_a: u8, face_b: u8) -> (u8, u8) {
    let mut rest = (0..4u8).filter(|&f| f != face_a && f != face_b);
    let first = rest.next().expect("two faces remain once face_a, face_b are excluded");
    let second = rest.next().expect("two faces remain once face_a, face_b are excluded");
    (first, second)
}

pub fn try_identify(annulus: &SatAnnulus, tri: &Triangulation, avoid: &mut TetSet) -> Option<SatBlock> {
    if avoid.contains(annulus.tet[0]) || avoid.contains(annulus.tet[1]) {
        return None;
    }
    // The LST's exposed top is always two faces of a single tetrahedron.
    if annulus.tet[0] != annulus.tet[1] {
        return None;
    }
    let tet = annulus.tet[0];

    let face_a = annulus.roles[0].apply(3);
    let face_b = annulus.roles[1].apply(3);
    if face_a == face_b {
        return None;
    }
    let (central_upper, central_lower) = central_faces(face_a, face_b);

    let expected_roles1 = Perm4::transposition(face_a, face_b)
        .compose(&Perm4::transposition(central_upper, central_lower))
        .compose(&annulus.roles[0]);
    if annulus.roles[1] != expected_roles1 {
        return None;
    }

    let r0 = Perm4::transposition(face_a, central_upper).compose(&annulus.roles[0]);
    let r1 = Perm4::transposition(face_b, central_lower).compose(&annulus.roles[1]);

    let (cuts_vert, cuts_horiz, cuts_diag, claimed) = recognise(tri, tet, r0, r1)?;

    if claimed.iter().any(|&t| avoid.contains(t)) {
        return None;
    }
    for &t in claimed.iter() {
        avoid.insert(t);
    }

    Some(SatBlock::new(
        SatBlockKind::Lst {
            cuts_vert,
            cuts_horiz,
            cuts_diag,
        },
        vec![*annulus],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triangulation::Triangulation;

    /// A single tetrahedron whose central edge (faces 2 and 3, the faces
    /// *not* exposed by the annulus at faces 0 and 1) is glued to itself
    /// via `(1,0,3,2)`, leaving faces 0 and 1 exposed as the LST's top
    /// annulus. Hand-traced: the central-edge walker crosses once via
    /// `LAYER_DIAG_B`, the two new boundary tetrahedra coincide (both
    /// are the same lone tetrahedron), giving `boundary_reln = [1,0|1,1]`
    /// and cuts `(1,1,2)`.
    #[test]
    fn a_single_tetrahedron_lst_is_recognised() {
        let mut tri = Triangulation::new();
        let t = tri.add_tetrahedra(1);
        tri.glue(t[0], 2, t[0], Perm4::new(1, 0, 3, 2));

        let roles0 = Perm4::new(1, 2, 3, 0);
        let roles1 = Perm4::new(0, 3, 2, 1);
        let annulus = SatAnnulus::new(t[0], roles0, t[0], roles1);

        let mut avoid = TetSet::new();
        let block = try_identify(&annulus, &tri, &mut avoid).expect("a genuine single-tetrahedron LST should be recognised");
        assert!(avoid.contains(t[0]));
        match &block.kind {
            SatBlockKind::Lst { cuts_vert, cuts_horiz, cuts_diag } => {
                assert_eq!((*cuts_vert, *cuts_horiz, *cuts_diag), (1, 1, 2));
            }
            other => panic!("expected Lst, got {other:?}"),
        }
    }

    /// Same central-edge self-gluing, but `roles1` doesn't actually
    /// match `roles0` across the complementary faces: not a coherent
    /// LST top annulus at all.
    #[test]
    fn an_annulus_whose_roles_are_inconsistent_is_rejected() {
        let mut tri = Triangulation::new();
        let t = tri.add_tetrahedra(1);
        tri.glue(t[0], 2, t[0], Perm4::new(1, 0, 3, 2));

        let roles0 = Perm4::new(1, 2, 3, 0);
        let roles1 = Perm4::new(3, 0, 2, 1);
        let annulus = SatAnnulus::new(t[0], roles0, t[0], roles1);

        let mut avoid = TetSet::new();
        assert!(try_identify(&annulus, &tri, &mut avoid).is_none());
    }
}
