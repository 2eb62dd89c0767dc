//! Saturated annuli: a pair of tetrahedron faces forming an annulus that
//! is itself a union of Seifert fibres.

use crate::matrix2::Matrix2;
use crate::perm::Perm4;
use crate::triangulation::{TetIdx, Triangulation};

/// A saturated annulus: `(tet[i], roles[i])` for `i in 0,1` names a face of
/// `tet[i]`, namely the face opposite `roles[i].apply(3)`, whose other
/// three vertices `roles[i].apply(0..3)` carry the vertical/horizontal/
/// diagonal convention described on [`SatAnnulus`]'s associated functions.
///
/// `roles[i](0),roles[i](1)` is the vertical (fibre) edge, `roles[i](0),
/// roles[i](2)` is horizontal, `roles[i](1),roles[i](2)` is diagonal.
/// Annuli are views: they borrow no tetrahedra and own nothing.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SatAnnulus {
    pub tet: [TetIdx; 2],
    pub roles: [Perm4; 2],
}

impl SatAnnulus {
    pub fn new(tet0: TetIdx, roles0: Perm4, tet1: TetIdx, roles1: Perm4) -> SatAnnulus {
        SatAnnulus {
            tet: [tet0, tet1],
            roles: [roles0, roles1],
        }
    }

    fn face_of(&self, side: usize) -> u8 {
        self.roles[side].apply(3)
    }

    /// Counts faces of this annulus with no gluing: 0, 1, or 2.
    pub fn meets_boundary(&self, tri: &Triangulation) -> u8 {
        (0..2)
            .filter(|&i| tri.adjacent(self.tet[i], self.face_of(i)).is_none())
            .count() as u8
    }

    /// Crosses through both faces to the tetrahedra on the far side.
    ///
    /// Returns `None` if either face is a triangulation boundary face;
    /// callers are expected to have checked [`meets_boundary`] is `0`
    /// first, exactly as the region-expansion algorithm does.
    pub fn switch_sides(&self, tri: &Triangulation) -> Option<SatAnnulus> {
        let mut tet = self.tet;
        let mut roles = self.roles;
        for i in 0..2 {
            let (other, gluing) = tri.adjacent(tet[i], self.face_of(i))?;
            tet[i] = other;
            roles[i] = gluing.compose(&roles[i]);
        }
        Some(SatAnnulus { tet, roles })
    }

    /// Swaps the vertical edge endpoints on both faces: `roles[i][0] <->
    /// roles[i][1]`. Negates the fibre direction.
    pub fn reflect_vertical(&self) -> SatAnnulus {
        let flip = Perm4::transposition(0, 1);
        SatAnnulus {
            tet: self.tet,
            roles: [self.roles[0].compose(&flip), self.roles[1].compose(&flip)],
        }
    }

    /// Swaps the two sides of the annulus and reverses the vertical
    /// direction on each, reversing the cyclic orientation of the
    /// boundary curve.
    pub fn reflect_horizontal(&self) -> SatAnnulus {
        let flip = Perm4::transposition(0, 1);
        SatAnnulus {
            tet: [self.tet[1], self.tet[0]],
            roles: [self.roles[1].compose(&flip), self.roles[0].compose(&flip)],
        }
    }

    fn reflect(&self, ref_vert: bool, ref_horiz: bool) -> SatAnnulus {
        let mut a = *self;
        if ref_vert {
            a = a.reflect_vertical();
        }
        if ref_horiz {
            a = a.reflect_horizontal();
        }
        a
    }

    /// Tests whether `other`, viewed up to the four vertical/horizontal
    /// reflections, is the exact same pair of tetrahedron faces as `self`.
    /// Returns the reflection flags that make them coincide.
    pub fn is_adjacent(&self, other: &SatAnnulus) -> Option<(bool, bool)> {
        for ref_vert in [false, true] {
            for ref_horiz in [false, true] {
                let candidate = other.reflect(ref_vert, ref_horiz);
                if candidate == *self {
                    return Some((ref_vert, ref_horiz));
                }
            }
        }
        None
    }

    /// Tests whether `other` occupies the same two tetrahedra and faces as
    /// `self` up to an arbitrary vertex relabelling, and if so reports how
    /// `other`'s (fibre, base-curve) basis maps onto `self`'s.
    pub fn is_joined(&self, other: &SatAnnulus) -> Option<Matrix2> {
        if self.tet[0] == other.tet[0] && self.tet[1] == other.tet[1] {
            let rel = other.roles[0].compose(&self.roles[0].inverse());
            if rel.apply(3) == 3 {
                return Some(perm3_to_matrix(rel));
            }
        }
        if self.tet[0] == other.tet[1] && self.tet[1] == other.tet[0] {
            let rel = other.roles[1].compose(&self.roles[0].inverse());
            if rel.apply(3) == 3 {
                return Some(perm3_to_matrix(rel));
            }
        }
        None
    }

    /// True when the boundary torus this annulus sits on is two-sided,
    /// i.e. not pinched into a Klein bottle by an edge identification
    /// that reverses orientation as it crosses the annulus. Detected by
    /// crossing both faces: a two-sided torus annulus always has
    /// tetrahedra glued on its far side (it borders more triangulation,
    /// just not more of the current region).
    pub fn is_two_sided_torus(&self, tri: &Triangulation) -> bool {
        self.switch_sides(tri).is_some()
    }
}

/// Maps the change-of-basis permutation on the triangle vertices
/// `{0,1,2}` (vertical edge `01`, horizontal edge `02`, diagonal edge
/// `12`) to the corresponding `Matrix2` acting on the `(vertical,
/// horizontal)` basis. Since `diag = horizontal - vertical` as directed
/// edges around the triangle sum to zero, the six permutations of the
/// triangle correspond to exactly the six matrices of the classical
/// anharmonic-group action.
fn perm3_to_matrix(rel: Perm4) -> Matrix2 {
    match (rel.apply(0), rel.apply(1), rel.apply(2)) {
        (0, 1, 2) => Matrix2::new(1, 0, 0, 1),
        (1, 0, 2) => Matrix2::new(-1, -1, 0, 1),
        (0, 2, 1) => Matrix2::new(1, 0, -1, -1),
        (2, 1, 0) => Matrix2::new(0, 1, 1, 0),
        (1, 2, 0) => Matrix2::new(-1, -1, 1, 0),
        (2, 0, 1) => Matrix2::new(0, 1, -1, -1),
        _ => unreachable!("rel does not permute {{0,1,2}}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glued_pair() -> (Triangulation, SatAnnulus) {
        let mut tri = Triangulation::new();
        let t = tri.add_tetrahedra(2);
        // Glue face 3 of t0 to face 3 of t1 via the identity.
        tri.glue(t[0], 3, t[1], Perm4::IDENTITY);
        let annulus = SatAnnulus::new(t[0], Perm4::IDENTITY, t[1], Perm4::IDENTITY);
        (tri, annulus)
    }

    #[test]
    fn meets_boundary_zero_when_both_faces_glued() {
        let (tri, a) = glued_pair();
        assert_eq!(a.meets_boundary(&tri), 0);
    }

    #[test]
    fn reflect_vertical_is_an_involution() {
        let (_, a) = glued_pair();
        assert_eq!(a.reflect_vertical().reflect_vertical(), a);
    }

    #[test]
    fn reflect_horizontal_is_an_involution() {
        let (_, a) = glued_pair();
        assert_eq!(a.reflect_horizontal().reflect_horizontal(), a);
    }

    #[test]
    fn annulus_is_adjacent_to_its_own_reflection() {
        let (_, a) = glued_pair();
        let reflected = a.reflect_vertical();
        assert_eq!(a.is_adjacent(&reflected), Some((true, false)));
    }

    #[test]
    fn is_joined_identity_gives_identity_matrix() {
        let (_, a) = glued_pair();
        assert_eq!(a.is_joined(&a), Some(Matrix2::IDENTITY));
    }
}
