//! `BlockedSFSTriple`: a central saturated region with two boundary tori,
//! each plugged across its own layering to a distinct end region.

use rayon::prelude::*;

use crate::block::starter;
use crate::graph::GraphTriple;
use crate::region::SatRegion;

use super::find_plugged_region;

/// Recognises a closed triangulation as a central region with two
/// saturated end pieces hanging off it, each across a layered torus.
pub fn recognise_blocked_sfs_triple(tri: &crate::triangulation::Triangulation) -> Option<GraphTriple> {
    if !super::basic_checks(tri) {
        return None;
    }

    let catalogue = starter::catalogue();
    catalogue.par_iter().find_map_any(|s| {
        let embeddings = starter::embeddings(tri, s);
        embeddings.par_iter().find_map_any(|iso| try_starter(tri, s, iso))
    })
}

fn try_starter(
    tri: &crate::triangulation::Triangulation,
    s: &starter::Starter,
    iso: &crate::triangulation::Isomorphism,
) -> Option<GraphTriple> {
    let (block, mut avoid) = starter::block_from_iso(s, iso);
    let mut centre = SatRegion::new(block);
    if !centre.expand(&mut avoid, tri, false) || centre.n_bdry_annuli != 2 {
        return None;
    }

    let bdry = centre.boundary_annuli_with_ref();
    let (a0, rv0, rh0) = bdry[0];
    let (a1, rv1, rh1) = bdry[1];
    if !(a0.is_two_sided_torus(tri) && a1.is_two_sided_torus(tri)) {
        return None;
    }

    let (end0, m01) = find_plugged_region(tri, &mut avoid, a0, rv0 ^ rh0)?;
    let (end1, m21) = find_plugged_region(tri, &mut avoid, a1, rv1 ^ rh1)?;

    let sfs0 = end0.create_sfs(1, 0)?.reduce(false);
    let sfs1 = end1.create_sfs(1, 0)?.reduce(false);
    let sfs_hub = centre.create_sfs(2, 0)?.reduce(false);

    let mut gt = GraphTriple::new(sfs0, sfs_hub, sfs1, m01, m21);
    gt.reduce();
    Some(gt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triangulation::Triangulation;

    #[test]
    fn disconnected_triangulations_are_rejected_up_front() {
        let mut tri = Triangulation::new();
        tri.add_tetrahedra(4);
        assert!(recognise_blocked_sfs_triple(&tri).is_none());
    }
}
