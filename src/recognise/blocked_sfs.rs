//! `BlockedSFS`: the whole triangulation is a single saturated region with
//! no leftover boundary, i.e. a closed Seifert fibred space.

use rayon::prelude::*;

use crate::block::starter;
use crate::region::SatRegion;
use crate::sfs::SFSpace;
use crate::triangulation::Triangulation;

/// Recognises a closed triangulation as a single blocked Seifert fibred
/// space: every tetrahedron lies in some saturated block, and every
/// annulus is matched to another within the same region.
pub fn recognise_blocked_sfs(tri: &Triangulation) -> Option<SFSpace> {
    if !super::basic_checks(tri) {
        return None;
    }

    let catalogue = starter::catalogue();
    catalogue.par_iter().find_map_any(|s| {
        let embeddings = starter::embeddings(tri, s);
        embeddings.par_iter().find_map_any(|iso| try_starter(tri, s, iso))
    })
}

fn try_starter(tri: &Triangulation, s: &starter::Starter, iso: &crate::triangulation::Isomorphism) -> Option<SFSpace> {
    let (block, mut avoid) = starter::block_from_iso(s, iso);
    let mut region = SatRegion::new(block);
    if !region.expand(&mut avoid, tri, false) {
        return None;
    }
    if region.n_bdry_annuli != 0 {
        return None;
    }
    if avoid.len() != tri.n_tetrahedra() {
        return None;
    }
    let sfs = region.create_sfs(0, 0)?;
    Some(sfs.reduce(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_triangulation_with_open_boundary_is_never_recognised() {
        let starters = starter::catalogue();
        // The bare starter template itself always has open boundary
        // annuli, so it is never a closed manifold on its own.
        assert!(recognise_blocked_sfs(&starters[0].template).is_none());
    }

    #[test]
    fn disconnected_triangulations_are_rejected_up_front() {
        let mut tri = Triangulation::new();
        tri.add_tetrahedra(4);
        assert!(recognise_blocked_sfs(&tri).is_none());
    }
}
