//! Abstract simplicial triangulations built from tetrahedra and gluings.
//!
//! This is the "external collaborator" the rest of the crate is written
//! against: owned tetrahedron storage, face gluings, skeleton queries, and
//! a brute-force subcomplex-isomorphism search: owned `Vec` storage
//! addressed by small integer indices, with `anyhow::Result` accessors at
//! the fallible boundary.

use std::collections::HashSet;

use anyhow::{anyhow, Result};

use crate::perm::Perm4;

/// Index of a tetrahedron within its owning [`Triangulation`].
pub type TetIdx = usize;

/// A single tetrahedron's four face gluings.
///
/// `gluing[f]` is `Some((other, p))` when face `f` (the face opposite
/// vertex `f`) is glued to tetrahedron `other`, with `p` mapping this
/// tetrahedron's vertex labels to the other's. `None` means the face lies
/// on the triangulation boundary.
#[derive(Clone, Debug, Default)]
pub struct Tetrahedron {
    gluing: [Option<(TetIdx, Perm4)>; 4],
}

impl Tetrahedron {
    pub fn adjacent(&self, face: u8) -> Option<(TetIdx, Perm4)> {
        self.gluing[face as usize]
    }

    pub fn is_boundary_face(&self, face: u8) -> bool {
        self.gluing[face as usize].is_none()
    }
}

/// An owned collection of tetrahedra and their mutual gluings.
///
/// Tetrahedra are owned exclusively by their triangulation; nothing else
/// in this crate stores a tetrahedron by value, only by `TetIdx` into a
/// `&Triangulation`.
#[derive(Clone, Debug, Default)]
pub struct Triangulation {
    tets: Vec<Tetrahedron>,
}

impl Triangulation {
    pub fn new() -> Triangulation {
        Triangulation { tets: Vec::new() }
    }

    /// Adds `n` fresh tetrahedra with no gluings and returns their indices.
    pub fn add_tetrahedra(&mut self, n: usize) -> Vec<TetIdx> {
        let start = self.tets.len();
        self.tets.resize(start + n, Tetrahedron::default());
        (start..start + n).collect()
    }

    pub fn n_tetrahedra(&self) -> usize {
        self.tets.len()
    }

    pub fn tetrahedron(&self, idx: TetIdx) -> Result<&Tetrahedron> {
        self.tets
            .get(idx)
            .ok_or_else(|| anyhow!("tetrahedron index {idx} out of range"))
    }

    /// Glues face `f` of tetrahedron `t0` to face `g` of `t1`, where `p`
    /// maps `t0`'s vertex labels to `t1`'s. Also installs the reciprocal
    /// gluing `p.inverse()` on `t1`'s side, so gluings are always
    /// symmetric by construction.
    pub fn glue(&mut self, t0: TetIdx, f: u8, t1: TetIdx, p: Perm4) {
        let g = p.apply(f);
        let inv = p.inverse();
        self.tets[t0].gluing[f as usize] = Some((t1, p));
        self.tets[t1].gluing[g as usize] = Some((t0, inv));
    }

    pub fn adjacent(&self, t: TetIdx, face: u8) -> Option<(TetIdx, Perm4)> {
        self.tets.get(t).and_then(|tet| tet.adjacent(face))
    }

    /// Every face across every tetrahedron with no gluing.
    pub fn boundary_faces(&self) -> Vec<(TetIdx, u8)> {
        let mut out = Vec::new();
        for (idx, tet) in self.tets.iter().enumerate() {
            for f in 0..4u8 {
                if tet.is_boundary_face(f) {
                    out.push((idx, f));
                }
            }
        }
        out
    }

    pub fn is_closed(&self) -> bool {
        self.boundary_faces().is_empty()
    }

    /// A triangulation is valid here when every recorded gluing is
    /// reciprocated consistently (no half-open gluings, no edge identified
    /// with itself in reverse via a degenerate permutation).
    pub fn is_valid(&self) -> bool {
        for (t0, tet) in self.tets.iter().enumerate() {
            for f in 0..4u8 {
                if let Some((t1, p)) = tet.adjacent(f) {
                    let Some(back) = self.tets.get(t1).and_then(|o| o.adjacent(p.apply(f))) else {
                        return false;
                    };
                    let (bt, bp) = back;
                    if bt != t0 || bp != p.inverse() {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Connected components of the tetrahedron adjacency graph.
    pub fn n_components(&self) -> usize {
        let mut seen = vec![false; self.tets.len()];
        let mut n = 0;
        for start in 0..self.tets.len() {
            if seen[start] {
                continue;
            }
            n += 1;
            let mut stack = vec![start];
            seen[start] = true;
            while let Some(t) = stack.pop() {
                for f in 0..4u8 {
                    if let Some((other, _)) = self.tets[t].adjacent(f) {
                        if !seen[other] {
                            seen[other] = true;
                            stack.push(other);
                        }
                    }
                }
            }
        }
        n
    }

    pub fn is_connected(&self) -> bool {
        self.tets.is_empty() || self.n_components() == 1
    }
}

/// A bit-vector of claimed tetrahedron indices, threaded through block
/// identification and region expansion.
///
/// Spec's design notes recommend either a `HashSet<TetIndex>` or a
/// bit-vector indexed by tetrahedron index; triangulations in this domain
/// are always small (a few hundred tetrahedra at most), so a plain
/// bit-vector is used.
#[derive(Clone, Debug, Default)]
pub struct TetSet {
    claimed: HashSet<TetIdx>,
}

impl TetSet {
    pub fn new() -> TetSet {
        TetSet::default()
    }

    pub fn contains(&self, t: TetIdx) -> bool {
        self.claimed.contains(&t)
    }

    pub fn insert(&mut self, t: TetIdx) -> bool {
        self.claimed.insert(t)
    }

    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TetIdx> {
        self.claimed.iter()
    }
}

/// An embedding of a "needle" triangulation's tetrahedra into a "haystack"
/// triangulation: a tetrahedron index map plus, per needle tetrahedron, a
/// `Perm4` relabelling its vertices into the haystack's local labelling.
#[derive(Clone, Debug)]
pub struct Isomorphism {
    /// `tet_image[i]` is the haystack tetrahedron that needle tetrahedron
    /// `i` maps to.
    pub tet_image: Vec<TetIdx>,
    /// `vertex_image[i]` relabels needle tetrahedron `i`'s vertices into
    /// the haystack tetrahedron's labelling.
    pub vertex_image: Vec<Perm4>,
}

impl Isomorphism {
    pub fn apply_tet(&self, needle_tet: usize) -> TetIdx {
        self.tet_image[needle_tet]
    }

    pub fn apply_perm(&self, needle_tet: usize, p: &Perm4) -> Perm4 {
        self.vertex_image[needle_tet].compose(p)
    }
}

/// Finds every embedding of `needle` into `haystack` as a subcomplex: an
/// injective map on tetrahedra respecting every gluing `needle` records
/// (gluings `needle` leaves as boundary are unconstrained in `haystack`).
///
/// A brute-force backtracking search, adequate for the small, hand-built
/// catalogue triangulations (a handful of tetrahedra) this crate matches
/// against.
pub fn find_all_subcomplexes(haystack: &Triangulation, needle: &Triangulation) -> Vec<Isomorphism> {
    let n = needle.n_tetrahedra();
    let m = haystack.n_tetrahedra();
    if n == 0 || n > m {
        return Vec::new();
    }

    let mut results = Vec::new();
    let mut tet_image = vec![usize::MAX; n];
    let mut used = vec![false; m];

    for start in 0..m {
        tet_image[0] = start;
        used[start] = true;
        search(haystack, needle, 1, &mut tet_image, &mut used, &mut results);
        used[start] = false;
        tet_image[0] = usize::MAX;
    }
    results
}

fn search(
    haystack: &Triangulation,
    needle: &Triangulation,
    depth: usize,
    tet_image: &mut Vec<TetIdx>,
    used: &mut Vec<bool>,
    results: &mut Vec<Isomorphism>,
) {
    let n = needle.n_tetrahedra();
    if depth == n {
        if let Some(vertex_image) = consistent_vertex_maps(haystack, needle, tet_image) {
            results.push(Isomorphism {
                tet_image: tet_image.clone(),
                vertex_image,
            });
        }
        return;
    }

    let m = haystack.n_tetrahedra();
    for candidate in 0..m {
        if used[candidate] {
            continue;
        }
        tet_image[depth] = candidate;
        used[candidate] = true;
        search(haystack, needle, depth + 1, tet_image, used, results);
        used[candidate] = false;
        tet_image[depth] = usize::MAX;
    }
}

/// Given a fixed tetrahedron assignment, checks whether a consistent
/// per-tetrahedron vertex relabelling exists making every needle gluing
/// hold in the haystack, and returns it if so.
fn consistent_vertex_maps(
    haystack: &Triangulation,
    needle: &Triangulation,
    tet_image: &[TetIdx],
) -> Option<Vec<Perm4>> {
    let n = needle.n_tetrahedra();
    let mut vertex_image: Vec<Option<Perm4>> = vec![None; n];
    vertex_image[0] = Some(Perm4::IDENTITY);

    let mut stack = vec![0usize];
    let mut on_stack = vec![false; n];
    on_stack[0] = true;

    while let Some(i) = stack.pop() {
        on_stack[i] = false;
        let p_i = vertex_image[i]?;
        let needle_tet = needle.tetrahedron(i).ok()?;
        let hay_i = tet_image[i];

        for f in 0..4u8 {
            let Some((needle_j, needle_gluing)) = needle_tet.adjacent(f) else {
                continue;
            };
            let hay_f = p_i.apply(f);
            let hay_tet = haystack.tetrahedron(hay_i).ok()?;
            let (hay_j, hay_gluing) = hay_tet.adjacent(hay_f)?;

            let j = needle.tetrahedron(needle_j).ok().map(|_| needle_j)?;
            if tet_image[j] != hay_j {
                return None;
            }

            // Required image permutation for tetrahedron j: p_j such
            // that p_j . needle_gluing == hay_gluing . p_i, i.e.
            // p_j = hay_gluing . p_i . needle_gluing^{-1}.
            let p_j = hay_gluing.compose(&p_i).compose(&needle_gluing.inverse());

            match vertex_image[j] {
                Some(existing) if existing != p_j => return None,
                Some(_) => {}
                None => {
                    vertex_image[j] = Some(p_j);
                    if !on_stack[j] {
                        stack.push(j);
                        on_stack[j] = true;
                    }
                }
            }
        }
    }

    vertex_image.into_iter().collect()
}

/// Propagates a single fixed tetrahedron+vertex correspondence outward
/// through `template`'s gluings, checking that `haystack` has a matching
/// gluing at every step and that no claimed tetrahedron (per `avoid`) or
/// tetrahedron already used earlier in this same match is revisited.
///
/// Unlike [`find_all_subcomplexes`], which searches over every possible
/// correspondence, this is a single deterministic walk: block
/// identification already knows which two real tetrahedra must match the
/// template's designated boundary tetrahedron, via the annulus it is
/// trying to extend, so no search is needed — only verification.
pub(crate) fn match_template(
    haystack: &Triangulation,
    template: &Triangulation,
    seed_template_tet: usize,
    seed_vertex_image: Perm4,
    seed_haystack_tet: TetIdx,
    avoid: &TetSet,
) -> Option<Vec<TetIdx>> {
    let n = template.n_tetrahedra();
    let mut tet_image = vec![usize::MAX; n];
    let mut vertex_image: Vec<Option<Perm4>> = vec![None; n];
    tet_image[seed_template_tet] = seed_haystack_tet;
    vertex_image[seed_template_tet] = Some(seed_vertex_image);

    let mut used = HashSet::new();
    used.insert(seed_haystack_tet);

    let mut stack = vec![seed_template_tet];
    while let Some(i) = stack.pop() {
        let p_i = vertex_image[i]?;
        let hay_i = tet_image[i];
        if avoid.contains(hay_i) {
            return None;
        }
        let t_tet = template.tetrahedron(i).ok()?;
        for f in 0..4u8 {
            let Some((j, t_gluing)) = t_tet.adjacent(f) else {
                continue;
            };
            let hay_f = p_i.apply(f);
            let hay_tet = haystack.tetrahedron(hay_i).ok()?;
            let Some((hay_j, hay_gluing)) = hay_tet.adjacent(hay_f) else {
                return None;
            };
            let p_j = hay_gluing.compose(&p_i).compose(&t_gluing.inverse());

            if tet_image[j] == usize::MAX {
                if used.contains(&hay_j) {
                    return None;
                }
                tet_image[j] = hay_j;
                vertex_image[j] = Some(p_j);
                used.insert(hay_j);
                stack.push(j);
            } else if tet_image[j] != hay_j || vertex_image[j] != Some(p_j) {
                return None;
            }
        }
    }

    if tet_image.iter().any(|&x| x == usize::MAX) {
        None
    } else {
        Some(tet_image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_tet_ball() -> Triangulation {
        let mut tri = Triangulation::new();
        let t = tri.add_tetrahedra(2);
        tri.glue(t[0], 0, t[1], Perm4::IDENTITY);
        tri
    }

    #[test]
    fn single_gluing_is_reciprocated() {
        let tri = two_tet_ball();
        assert!(tri.is_valid());
        assert_eq!(tri.adjacent(1, 0), Some((0, Perm4::IDENTITY)));
    }

    #[test]
    fn two_glued_tetrahedra_form_one_component() {
        let tri = two_tet_ball();
        assert_eq!(tri.n_components(), 1);
        assert!(!tri.is_closed());
    }

    #[test]
    fn disjoint_tetrahedra_are_disconnected() {
        let mut tri = Triangulation::new();
        tri.add_tetrahedra(2);
        assert_eq!(tri.n_components(), 2);
        assert!(!tri.is_connected());
    }

    #[test]
    fn needle_embeds_in_itself() {
        let tri = two_tet_ball();
        let isos = find_all_subcomplexes(&tri, &tri);
        assert!(!isos.is_empty());
    }
}
