//! Top-level entry point: tries every recogniser against a closed
//! triangulation and reports whichever graph-manifold structure matches.

use crate::graph::{GraphLoop, GraphPair, GraphTriple};
use crate::recognise::{
    recognise_blocked_sfs, recognise_blocked_sfs_loop, recognise_blocked_sfs_pair, recognise_blocked_sfs_triple,
    recognise_plugged_torus_bundle,
};
use crate::sfs::SFSpace;
use crate::triangulation::Triangulation;

/// The graph-manifold structure found for a triangulation, tagged by
/// which combinatorial shape its saturated regions assemble into.
///
/// `PluggedTorusBundle` recognitions are reported as [`Manifold::Loop`]
/// too: it reaches a self-glued-torus combinator from a different search
/// route than `BlockedSFSLoop`, but the resulting combinator is the same
/// type.
#[derive(Clone, Debug, PartialEq)]
pub enum Manifold {
    Sfs(SFSpace),
    Loop(GraphLoop),
    Pair(GraphPair),
    Triple(GraphTriple),
}

impl Manifold {
    pub fn write_name(&self) -> String {
        match self {
            Manifold::Sfs(s) => s.write_name(),
            Manifold::Loop(g) => g.write_name(),
            Manifold::Pair(g) => g.write_name(),
            Manifold::Triple(g) => g.write_name(),
        }
    }

    pub fn write_tex_name(&self) -> String {
        match self {
            Manifold::Sfs(s) => s.write_tex_name(),
            Manifold::Loop(g) => g.write_tex_name(),
            Manifold::Pair(g) => g.write_tex_name(),
            Manifold::Triple(g) => g.write_tex_name(),
        }
    }
}

/// Tries each recogniser in turn against a closed triangulation and
/// returns the first graph-manifold structure found.
pub fn recognise_closed_3manifold(tri: &Triangulation) -> Option<Manifold> {
    if let Some(sfs) = recognise_blocked_sfs(tri) {
        return Some(Manifold::Sfs(sfs));
    }
    if let Some(gl) = recognise_blocked_sfs_loop(tri) {
        return Some(Manifold::Loop(gl));
    }
    if let Some(gp) = recognise_blocked_sfs_pair(tri) {
        return Some(Manifold::Pair(gp));
    }
    if let Some(gt) = recognise_blocked_sfs_triple(tri) {
        return Some(Manifold::Triple(gt));
    }
    if let Some(gl) = recognise_plugged_torus_bundle(tri) {
        return Some(Manifold::Loop(gl));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disconnected_triangulations_are_never_recognised() {
        let mut tri = Triangulation::new();
        tri.add_tetrahedra(4);
        assert!(recognise_closed_3manifold(&tri).is_none());
    }
}
