//! The top-level recognisers: each takes a closed, connected triangulation
//! and either returns the graph-manifold structure it found or `None`.
//!
//! Every recogniser here follows the same shape: hunt for a starter
//! block, flesh it out to a maximal saturated region, then check the
//! leftover boundary annuli match the pattern the recogniser is looking
//! for. `rayon` parallelises the independent starter-candidate search
//! (one candidate embedding can't affect another's outcome).

pub mod blocked_sfs;
pub mod blocked_sfs_loop;
pub mod blocked_sfs_pair;
pub mod blocked_sfs_triple;
pub mod plugged_torus_bundle;

pub use blocked_sfs::recognise_blocked_sfs;
pub use blocked_sfs_loop::recognise_blocked_sfs_loop;
pub use blocked_sfs_pair::recognise_blocked_sfs_pair;
pub use blocked_sfs_triple::recognise_blocked_sfs_triple;
pub use plugged_torus_bundle::recognise_plugged_torus_bundle;

use crate::annulus::SatAnnulus;
use crate::block::SatBlock;
use crate::layering_walk::Layering;
use crate::matrix2::Matrix2;
use crate::perm::Perm4;
use crate::region::SatRegion;
use crate::triangulation::{TetSet, Triangulation};

/// The three ways a layering's far boundary can be handed to the next
/// saturated block: the identity, and the two nontrivial cyclic
/// relabellings of the triangle `{0,1,2}` that fix vertex 3.
fn plug_perms() -> [Perm4; 3] {
    [Perm4::IDENTITY, Perm4::new(1, 2, 0, 3), Perm4::new(2, 0, 1, 3)]
}

fn plug_matrix(pos: usize) -> Matrix2 {
    match pos {
        0 => Matrix2::IDENTITY,
        1 => Matrix2::new(-1, 1, -1, 0),
        _ => Matrix2::new(0, -1, 1, -1),
    }
}

/// Walks a layering out from `bdry`, trying at each step to plug the far
/// end with a fresh saturated region via each of the three `PLUG_PERMS`
/// orientations. Returns the found region together with the matrix
/// carrying `bdry`'s fibre/base curves (under the `bdry_ref` convention)
/// through to the far region's own single boundary annulus.
///
/// This crate's [`Layering`] walker doesn't distinguish "this gluing is a
/// genuine single-tetrahedron layering" from "this is the start of the
/// next block" (see its own doc comment) — it simply refuses non-layering
/// gluings outright. So every step here tries the plug match first and
/// only advances the layering when no plug fits, reaching the same
/// endpoint by construction rather than by an up-front layering-failure
/// signal.
fn find_plugged_region(
    tri: &Triangulation,
    avoid: &mut TetSet,
    bdry: SatAnnulus,
    bdry_ref: bool,
) -> Option<(SatRegion, Matrix2)> {
    let mut layering = Layering::new(bdry.tet[0], bdry.roles[0], bdry.tet[1], bdry.roles[1]);
    let curves_to_layering_base = Matrix2::new(-1, 0, 0, if bdry_ref { -1 } else { 1 });
    let cap = tri.n_tetrahedra() + 1;

    for _ in 0..cap {
        for (plug_idx, plug) in plug_perms().iter().enumerate() {
            let t0 = layering.new_boundary_tet(0);
            let t1 = layering.new_boundary_tet(1);
            let r0 = layering.new_boundary_roles(0).compose(plug);
            let r1 = layering.new_boundary_roles(1).compose(plug);
            let shell = SatAnnulus::new(t0, r0, t1, r1);
            if shell.meets_boundary(tri) != 0 {
                continue;
            }
            let Some(other_side) = shell.switch_sides(tri) else {
                continue;
            };

            let mut trial_avoid = avoid.clone();
            if let Some(block) = SatBlock::try_identify(&other_side, tri, &mut trial_avoid) {
                let mut region = SatRegion::new(block);
                if region.expand(&mut trial_avoid, tri, false) && region.n_bdry_annuli == 1 {
                    let curves_to_layering = layering.boundary_reln() * curves_to_layering_base;
                    let matching = Matrix2::new(-1, 0, 0, 1) * plug_matrix(plug_idx) * curves_to_layering;
                    *avoid = trial_avoid;
                    return Some((region, matching));
                }
            }
        }

        if !layering.extend_one(tri) {
            return None;
        }
        avoid.insert(layering.new_boundary_tet(0));
        avoid.insert(layering.new_boundary_tet(1));
    }
    None
}

fn basic_checks(tri: &Triangulation) -> bool {
    tri.is_closed() && tri.is_valid() && tri.is_connected()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plug_perms_fix_vertex_three() {
        for p in plug_perms() {
            assert_eq!(p.apply(3), 3);
        }
    }
}
