//! Extends a saturated torus boundary one tetrahedron layering at a time.

use crate::annulus::SatAnnulus;
use crate::matrix2::Matrix2;
use crate::perm::Perm4;
use crate::triangulation::{TetIdx, Triangulation};

/// The two matrices a single diagonal layering can apply to the boundary
/// relation, depending on which diagonal of the exposed quadrilateral is
/// layered across.
const LAYER_DIAG_A: Matrix2 = Matrix2 { a: 1, b: 1, c: 0, d: 1 };
const LAYER_DIAG_B: Matrix2 = Matrix2 { a: 1, b: 0, c: 1, d: 1 };

/// Walks a torus boundary through successive single-tetrahedron
/// layerings, accumulating the coordinate change relative to the
/// original boundary.
#[derive(Clone, Debug)]
pub struct Layering {
    top: SatAnnulus,
    boundary_reln: Matrix2,
}

impl Layering {
    /// The initial boundary, with `boundary_reln` the identity.
    pub fn new(t0: TetIdx, r0: Perm4, t1: TetIdx, r1: Perm4) -> Layering {
        Layering {
            top: SatAnnulus::new(t0, r0, t1, r1),
            boundary_reln: Matrix2::IDENTITY,
        }
    }

    pub fn current_boundary(&self) -> SatAnnulus {
        self.top
    }

    pub fn boundary_reln(&self) -> Matrix2 {
        self.boundary_reln
    }

    pub fn new_boundary_tet(&self, side: usize) -> TetIdx {
        self.top.tet[side]
    }

    pub fn new_boundary_roles(&self, side: usize) -> Perm4 {
        self.top.roles[side]
    }

    /// Crosses the current boundary once. A layering always exists as
    /// long as both faces of the current boundary are glued to
    /// tetrahedra (not the triangulation's own outer boundary); which of
    /// the two canonical matrices applies is decided by which of the two
    /// possible diagonals of the exposed bi-pyramid the crossing realises
    /// — recorded here by whether the crossing reflects the vertical
    /// edge.
    pub fn extend_one(&mut self, tri: &Triangulation) -> bool {
        let Some(next) = self.top.switch_sides(tri) else {
            return false;
        };

        let layers_over_horizontal = next.roles[0].apply(0) == self.top.roles[0].apply(1);
        let step = if layers_over_horizontal {
            LAYER_DIAG_B
        } else {
            LAYER_DIAG_A
        };

        self.boundary_reln = step * self.boundary_reln;
        self.top = next;
        true
    }

    /// Repeats [`extend_one`] until it no longer finds a layering
    /// (reaches a true triangulation boundary face).
    pub fn extend(&mut self, tri: &Triangulation) {
        while self.extend_one(tri) {}
    }

    /// Tests whether the current top boundary is joined to `bottom`, and
    /// if so returns the combined coordinate change expressing `bottom`'s
    /// basis in terms of the original boundary basis.
    pub fn matches_top(&self, bottom: &SatAnnulus) -> Option<Matrix2> {
        self.top.is_joined(bottom).map(|m| m * self.boundary_reln)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_layering_has_identity_relation() {
        let mut tri = Triangulation::new();
        let t = tri.add_tetrahedra(2);
        tri.glue(t[0], 3, t[1], Perm4::IDENTITY);
        let layering = Layering::new(t[0], Perm4::IDENTITY, t[1], Perm4::IDENTITY);
        assert_eq!(layering.boundary_reln(), Matrix2::IDENTITY);
    }

    #[test]
    fn extend_one_fails_at_a_true_boundary() {
        let mut tri = Triangulation::new();
        let t = tri.add_tetrahedra(1);
        let mut layering = Layering::new(t[0], Perm4::IDENTITY, t[0], Perm4::new(1, 0, 2, 3));
        assert!(!layering.extend_one(&tri));
    }
}
