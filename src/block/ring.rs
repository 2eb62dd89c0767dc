//! Shared machinery for block types built as a cyclic ring of tetrahedra
//! with internal gluings tying consecutive tetrahedra together and
//! boundary annuli exposed at a chosen subset of the ring's gaps.
//!
//! [`tri_prism`](super::tri_prism) is a 3-ring with every gap open;
//! [`cube`](super::cube) is a 6-ring with 4 of its 6 gaps open.

use crate::annulus::SatAnnulus;
use crate::perm::Perm4;
use crate::triangulation::{self, TetIdx, TetSet, Triangulation};

pub fn internal_gluing() -> Perm4 {
    Perm4::new(2, 0, 1, 3)
}

pub fn exposed_roles_early() -> Perm4 {
    Perm4::new(0, 2, 3, 1)
}

pub fn exposed_roles_late() -> Perm4 {
    Perm4::IDENTITY
}

/// The closing gluing used for a non-open gap: identifies the two
/// exposed-style faces directly, optionally composed with an extra
/// vertical flip when `twisted` is set, giving the ring's "fold" a
/// reflection a plain closure doesn't have.
fn closing_gluing(twisted: bool) -> Perm4 {
    let base = exposed_roles_late().compose(&exposed_roles_early().inverse());
    if twisted {
        Perm4::transposition(0, 1).compose(&base)
    } else {
        base
    }
}

/// Builds a ring of `n` tetrahedra. Every gap `i -> i+1 mod n` gets the
/// primary internal gluing (face 0 of `i` to face 2 of `i+1`). Gaps *not*
/// listed in `open_gaps` additionally get their exposed faces (1 and 3)
/// glued together too, closing that gap off entirely so it contributes no
/// boundary annulus; `twisted` chooses which of the two ways to close a
/// gap is used.
pub fn template(n: usize, open_gaps: &[usize], twisted: bool) -> Triangulation {
    let mut tri = Triangulation::new();
    let t = tri.add_tetrahedra(n);
    for i in 0..n {
        tri.glue(t[i], 0, t[(i + 1) % n], internal_gluing());
        if !open_gaps.contains(&i) {
            tri.glue(t[i], 1, t[(i + 1) % n], closing_gluing(twisted));
        }
    }
    tri
}

/// Attempts to identify a ring-shaped block of `n` tetrahedra with
/// boundary annuli at `open_gaps`, anchored so that `open_gaps[0]`
/// corresponds to the given input `annulus`.
pub fn try_identify_ring(
    annulus: &SatAnnulus,
    tri: &Triangulation,
    avoid: &mut TetSet,
    n: usize,
    open_gaps: &[usize],
    twisted: bool,
) -> Option<(Vec<TetIdx>, Vec<Perm4>)> {
    if avoid.contains(annulus.tet[0]) || avoid.contains(annulus.tet[1]) {
        return None;
    }

    let templ = template(n, open_gaps, twisted);
    let anchor = open_gaps[0];
    let seed_vertex_image = annulus.roles[0].compose(&exposed_roles_early().inverse());

    let tet_image = triangulation::match_template(tri, &templ, anchor, seed_vertex_image, annulus.tet[0], avoid)?;
    let vertex_image = rebuild_vertex_images(tri, &templ, &tet_image, anchor, seed_vertex_image)?;

    let other = (anchor + 1) % n;
    let derived_other = vertex_image[other].compose(&exposed_roles_late());
    if tet_image[other] != annulus.tet[1] || derived_other != annulus.roles[1] {
        return None;
    }

    if tet_image.iter().any(|&t| avoid.contains(t)) {
        return None;
    }

    Some((tet_image, vertex_image))
}

fn rebuild_vertex_images(
    tri: &Triangulation,
    templ: &Triangulation,
    tet_image: &[TetIdx],
    anchor: usize,
    seed: Perm4,
) -> Option<Vec<Perm4>> {
    let n = templ.n_tetrahedra();
    let mut vertex_image = vec![None; n];
    vertex_image[anchor] = Some(seed);
    for _ in 0..n {
        for i in 0..n {
            let Some(p_i) = vertex_image[i] else { continue };
            let t_tet = templ.tetrahedron(i).ok()?;
            for f in 0..4u8 {
                let Some((j, t_gluing)) = t_tet.adjacent(f) else { continue };
                if vertex_image[j].is_some() {
                    continue;
                }
                let hay_f = p_i.apply(f);
                let (_, hay_gluing) = tri.adjacent(tet_image[i], hay_f)?;
                vertex_image[j] = Some(hay_gluing.compose(&p_i).compose(&t_gluing.inverse()));
            }
        }
    }
    vertex_image.into_iter().collect()
}

/// Builds the exposed annulus sitting at gap `g` (between ring positions
/// `g` and `g+1`) from the resolved tetrahedron/vertex images.
pub fn annulus_at(n: usize, g: usize, tet_image: &[TetIdx], vertex_image: &[Perm4]) -> SatAnnulus {
    let j = (g + 1) % n;
    SatAnnulus::new(
        tet_image[g],
        vertex_image[g].compose(&exposed_roles_early()),
        tet_image[j],
        vertex_image[j].compose(&exposed_roles_late()),
    )
}
