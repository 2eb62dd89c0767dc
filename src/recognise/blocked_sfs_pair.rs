//! `BlockedSFSPair`: two saturated regions, each with a single boundary
//! annulus, joined to each other across a layering.

use rayon::prelude::*;

use crate::block::starter;
use crate::graph::GraphPair;
use crate::region::SatRegion;

use super::find_plugged_region;

/// Recognises a closed triangulation as two saturated regions plugged
/// together across a layered torus boundary.
pub fn recognise_blocked_sfs_pair(tri: &crate::triangulation::Triangulation) -> Option<GraphPair> {
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
) -> Option<GraphPair> {
    let (block, mut avoid) = starter::block_from_iso(s, iso);
    let mut region0 = SatRegion::new(block);
    if !region0.expand(&mut avoid, tri, false) || region0.n_bdry_annuli != 1 {
        return None;
    }

    let (a0, rv0, rh0) = region0.boundary_annuli_with_ref()[0];
    let first_region_reflected = rv0 ^ rh0;

    let (region1, matching_reln) = find_plugged_region(tri, &mut avoid, a0, first_region_reflected)?;

    let sfs0 = region0.create_sfs(1, 0)?.reduce(false);
    let sfs1 = region1.create_sfs(1, 0)?.reduce(false);

    let mut gp = if sfs1.less_than(&sfs0) {
        GraphPair::new(sfs1, sfs0, matching_reln.inverse())
    } else {
        GraphPair::new(sfs0, sfs1, matching_reln)
    };
    gp.reduce();
    Some(gp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triangulation::Triangulation;

    #[test]
    fn disconnected_triangulations_are_rejected_up_front() {
        let mut tri = Triangulation::new();
        tri.add_tetrahedra(4);
        assert!(recognise_blocked_sfs_pair(&tri).is_none());
    }
}
