//! `BlockedSFSLoop`: a single saturated region with exactly two leftover
//! boundary annuli, self-identified by a layering.

use rayon::prelude::*;

use crate::block::starter;
use crate::graph::GraphLoop;
use crate::layering_walk::Layering;
use crate::matrix2::Matrix2;
use crate::region::SatRegion;
use crate::triangulation::Triangulation;

/// Recognises a closed triangulation as a single saturated region whose
/// own two remaining boundary tori are identified with each other via a
/// layering, producing a self-glued graph manifold.
pub fn recognise_blocked_sfs_loop(tri: &Triangulation) -> Option<GraphLoop> {
    if !super::basic_checks(tri) {
        return None;
    }

    let catalogue = starter::catalogue();
    catalogue.par_iter().find_map_any(|s| {
        let embeddings = starter::embeddings(tri, s);
        embeddings.par_iter().find_map_any(|iso| try_starter(tri, s, iso))
    })
}

fn try_starter(tri: &Triangulation, s: &starter::Starter, iso: &crate::triangulation::Isomorphism) -> Option<GraphLoop> {
    let (block, mut avoid) = starter::block_from_iso(s, iso);
    let mut region = SatRegion::new(block);
    if !region.expand(&mut avoid, tri, false) || region.n_bdry_annuli != 2 {
        return None;
    }

    let bdry = region.boundary_annuli_with_ref();
    let (a0, rv0, rh0) = bdry[0];
    let (a1, rv1, rh1) = bdry[1];

    if !(a0.is_two_sided_torus(tri) && a1.is_two_sided_torus(tri)) {
        return None;
    }

    let mut layering = Layering::new(a0.tet[0], a0.roles[0], a0.tet[1], a0.roles[1]);
    let cap = tri.n_tetrahedra() + 1;
    let mut layer_to_bdry1 = None;
    for _ in 0..cap {
        let top = layering.current_boundary();
        if let Some(m) = top.is_joined(&a1) {
            layer_to_bdry1 = Some(m);
            break;
        }
        if !layering.extend_one(tri) {
            break;
        }
    }
    let layer_to_bdry1 = layer_to_bdry1?;

    let curves0_to_annulus0 = Matrix2::new(if rv0 { 1 } else { -1 }, 0, 0, if rh0 { -1 } else { 1 });
    let curves1_to_annulus1 = Matrix2::new(if rv1 { 1 } else { -1 }, 0, 0, if rh1 { -1 } else { 1 });
    let matching_reln = curves1_to_annulus1 * layer_to_bdry1 * layering.boundary_reln() * curves0_to_annulus0;

    let sfs = region.create_sfs(2, 0)?.reduce(false);
    let mut gl = GraphLoop::new(sfs, matching_reln);
    gl.reduce();
    Some(gl)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triangulation::Triangulation;

    #[test]
    fn a_lone_open_starter_is_never_a_loop() {
        let starters = starter::catalogue();
        assert!(recognise_blocked_sfs_loop(&starters[0].template).is_none());
    }

    #[test]
    fn disconnected_triangulations_are_rejected_up_front() {
        let mut tri = Triangulation::new();
        tri.add_tetrahedra(4);
        assert!(recognise_blocked_sfs_loop(&tri).is_none());
    }
}
