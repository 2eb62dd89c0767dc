//! Mobius-strip blocks: a single tetrahedron whose two non-annulus faces
//! are glued directly to each other, producing the twisted boundary and
//! multiplicity-2 exceptional fibre characteristic of a Mobius band base
//! piece. `position` distinguishes the three combinatorially distinct
//! ways that self-gluing can occur.

use super::{SatBlock, SatBlockKind};
use crate::annulus::SatAnnulus;
use crate::perm::Perm4;
use crate::triangulation::{TetSet, Triangulation};

fn exposed_roles_0() -> Perm4 {
    Perm4::new(0, 2, 3, 1)
}

fn exposed_roles_1() -> Perm4 {
    Perm4::IDENTITY
}

/// The three combinatorially distinct self-gluings of the fold faces
/// (0 and 2), each sending face 0 to face 2.
fn fold_gluing(position: u8) -> Perm4 {
    match position {
        0 => Perm4::new(2, 1, 0, 3),
        1 => Perm4::new(2, 3, 0, 1),
        _ => Perm4::new(2, 0, 1, 3),
    }
}

fn template(position: u8) -> Triangulation {
    let mut tri = Triangulation::new();
    let t = tri.add_tetrahedra(1);
    tri.glue(t[0], 0, t[0], fold_gluing(position));
    tri
}

pub fn try_identify(annulus: &SatAnnulus, tri: &Triangulation, avoid: &mut TetSet) -> Option<SatBlock> {
    if annulus.tet[0] != annulus.tet[1] || avoid.contains(annulus.tet[0]) {
        return None;
    }
    let tet = annulus.tet[0];

    for position in 0..3u8 {
        let seed = annulus.roles[0].compose(&exposed_roles_0().inverse());

        let Some((fold_target, real_fold)) = tri.adjacent(tet, seed.apply(0)) else {
            continue;
        };
        let expected_fold = seed.compose(&fold_gluing(position)).compose(&seed.inverse());
        if fold_target != tet || real_fold != expected_fold {
            continue;
        }

        let derived_1 = seed.compose(&exposed_roles_1());
        if derived_1 != annulus.roles[1] {
            continue;
        }

        avoid.insert(tet);
        return Some(SatBlock::new(SatBlockKind::Mobius { position }, vec![*annulus]));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_self_glues_a_single_tetrahedron() {
        let templ = template(0);
        assert_eq!(templ.n_tetrahedra(), 1);
        assert_eq!(templ.boundary_faces().len(), 2);
    }
}
