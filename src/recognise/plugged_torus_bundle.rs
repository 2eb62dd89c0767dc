//! `PluggedTorusBundle`: a thin I-bundle over the torus (`T x I`), layered
//! out from both sides, with one side plugged by a saturated region and
//! the other side glued straight back to the plug's second boundary.

use crate::annulus::SatAnnulus;
use crate::block::SatBlock;
use crate::graph::GraphLoop;
use crate::layering_walk::Layering;
use crate::matrix2::Matrix2;
use crate::perm::Perm4;
use crate::region::SatRegion;
use crate::triangulation::{find_all_subcomplexes, TetSet, Triangulation};
use crate::txicore;

/// Recognises a closed triangulation as a `T x I` core, layered out on
/// both boundaries, one end plugged by a saturated region whose second
/// boundary torus glues straight to the other end of the bundle.
///
/// The avoided-tetrahedra set is narrowed to just the four boundary
/// tetrahedra of each layering, not every tetrahedron inside the core or
/// the layerings, since the internals don't need protecting once the
/// boundary is accounted for.
pub fn recognise_plugged_torus_bundle(tri: &Triangulation) -> Option<GraphLoop> {
    if !super::basic_checks(tri) || tri.n_tetrahedra() < 9 {
        return None;
    }

    for core in txicore::catalogue() {
        let embeddings = find_all_subcomplexes(tri, &core.core);
        for iso in &embeddings {
            if let Some(gl) = try_embedding(tri, &core, iso) {
                return Some(gl);
            }
        }
    }
    None
}

fn try_embedding(tri: &Triangulation, core: &txicore::TxICore, iso: &crate::triangulation::Isomorphism) -> Option<GraphLoop> {
    let mut layer_upper = Layering::new(
        iso.apply_tet(core.upper.tet[0]),
        iso.apply_perm(core.upper.tet[0], &core.upper.roles[0]),
        iso.apply_tet(core.upper.tet[1]),
        iso.apply_perm(core.upper.tet[1], &core.upper.roles[1]),
    );
    layer_upper.extend(tri);

    let mut layer_lower = Layering::new(
        iso.apply_tet(core.lower.tet[0]),
        iso.apply_perm(core.lower.tet[0], &core.lower.roles[0]),
        iso.apply_tet(core.lower.tet[1]),
        iso.apply_perm(core.lower.tet[1], &core.lower.roles[1]),
    );
    layer_lower.extend(tri);

    for region_pos in 0..3u8 {
        let annulus_to_upper_layer = Perm4::new(region_pos, (region_pos + 1) % 3, (region_pos + 2) % 3, 3);
        let upper_top = layer_upper.current_boundary();
        let upper_annulus_shell = SatAnnulus::new(
            upper_top.tet[0],
            upper_top.roles[0].compose(&annulus_to_upper_layer),
            upper_top.tet[1],
            upper_top.roles[1].compose(&annulus_to_upper_layer),
        );
        if upper_annulus_shell.meets_boundary(tri) != 0 {
            continue;
        }
        let Some(upper_annulus) = upper_annulus_shell.switch_sides(tri) else {
            continue;
        };

        let mut avoid = TetSet::new();
        avoid.insert(upper_top.tet[0]);
        avoid.insert(upper_top.tet[1]);
        let lower_top = layer_lower.current_boundary();
        avoid.insert(lower_top.tet[0]);
        avoid.insert(lower_top.tet[1]);

        let Some(block) = SatBlock::try_identify(&upper_annulus, tri, &mut avoid) else {
            continue;
        };
        let mut region = SatRegion::new(block);
        if !region.expand(&mut avoid, tri, false) || region.n_bdry_annuli != 2 {
            continue;
        }

        let bdry = region.boundary_annuli_with_ref();
        let (bdry_annulus, bdry_rv, bdry_rh) = bdry[1];

        let Some(upper_roles_to_lower) = lower_top.is_joined(&bdry_annulus) else {
            continue;
        };

        let curves_to_upper_annulus = Matrix2::new(-1, 0, 0, 1);
        let upper_annulus_to_upper_layer = match region_pos {
            0 => Matrix2::IDENTITY,
            1 => Matrix2::new(0, -1, 1, -1),
            _ => Matrix2::new(-1, 1, -1, 0),
        };
        let curves_to_lower_annulus = layer_lower.boundary_reln()
            * core.lower.bdry_reln.inverse()
            * core.parallel_reln
            * core.upper.bdry_reln
            * layer_upper.boundary_reln().inverse()
            * upper_annulus_to_upper_layer
            * curves_to_upper_annulus;
        let curves_to_bdry_annulus = Matrix2::new(if bdry_rv { 1 } else { -1 }, 0, 0, if bdry_rh { -1 } else { 1 });
        let matching_reln = curves_to_bdry_annulus * upper_roles_to_lower.inverse() * curves_to_lower_annulus;

        let sfs = region.create_sfs(2, 0)?.reduce(false);
        let mut gl = GraphLoop::new(sfs, matching_reln);
        gl.reduce();
        return Some(gl);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangulations_below_nine_tetrahedra_are_rejected_up_front() {
        let mut tri = Triangulation::new();
        tri.add_tetrahedra(4);
        assert!(recognise_plugged_torus_bundle(&tri).is_none());
    }
}
