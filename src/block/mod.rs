//! The library of saturated blocks.
//!
//! `SatBlock` is a tagged sum type: one enum of concrete variants, matched
//! explicitly for each operation that varies by block kind.

pub mod cube;
pub mod layering;
pub mod lst;
pub mod mobius;
pub mod reflector;
mod ring;
pub mod starter;
pub mod tri_prism;

use crate::annulus::SatAnnulus;
use crate::sfs::SFSpace;
use crate::triangulation::{TetSet, Triangulation};

/// A recorded adjacency from one block's annulus to another's.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Adjacency {
    pub neighbour_block: usize,
    pub neighbour_annulus: usize,
    pub reversed: bool,
    pub reflected: bool,
}

/// The per-variant state of a saturated block. Field names follow
/// spec's data model directly.
#[derive(Clone, Debug)]
pub enum SatBlockKind {
    Lst {
        cuts_vert: i64,
        cuts_horiz: i64,
        cuts_diag: i64,
    },
    TriPrism {
        major: bool,
    },
    Cube,
    Mobius {
        position: u8,
    },
    ReflectorStrip {
        length: u32,
        twisted: bool,
    },
    Layering {
        over_horizontal: bool,
    },
}

/// A saturated block: a subcomplex that is a union of fibres whose
/// boundary is a ring of saturated annuli.
///
/// Blocks own no tetrahedra (those belong to the triangulation); a block
/// is destroyed along with the region that owns it.
#[derive(Clone, Debug)]
pub struct SatBlock {
    pub kind: SatBlockKind,
    annuli: Vec<SatAnnulus>,
    adjacency: Vec<Option<Adjacency>>,
}

impl SatBlock {
    pub(crate) fn new(kind: SatBlockKind, annuli: Vec<SatAnnulus>) -> SatBlock {
        let n = annuli.len();
        SatBlock {
            kind,
            annuli,
            adjacency: vec![None; n],
        }
    }

    pub fn n_annuli(&self) -> usize {
        self.annuli.len()
    }

    pub fn annulus(&self, i: usize) -> SatAnnulus {
        self.annuli[i]
    }

    pub fn adjacency(&self, i: usize) -> Option<Adjacency> {
        self.adjacency[i]
    }

    pub fn set_adjacency(&mut self, i: usize, adj: Adjacency) {
        self.adjacency[i] = Some(adj);
    }

    pub fn unmatched_annuli(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.n_annuli()).filter(move |&i| self.adjacency[i].is_none())
    }

    /// True for block types whose boundary carries a twist (a Klein-bottle
    /// style self-identification rather than a plain torus identification):
    /// a twisted `ReflectorStrip`, or a `Mobius`.
    pub fn has_twisted_boundary(&self) -> bool {
        matches!(
            self.kind,
            SatBlockKind::Mobius { .. } | SatBlockKind::ReflectorStrip { twisted: true, .. }
        )
    }

    /// Dispatches to each concrete block type's identifier in the fixed
    /// order spec mandates (LST, TriPrism, Cube, Mobius, ReflectorStrip,
    /// Layering); the first success wins and claims tetrahedra into
    /// `avoid`. Returns the new block with `annulus(0)` equal to the
    /// input `annulus`.
    pub fn try_identify(
        annulus: &SatAnnulus,
        tri: &Triangulation,
        avoid: &mut TetSet,
    ) -> Option<SatBlock> {
        lst::try_identify(annulus, tri, avoid)
            .or_else(|| tri_prism::try_identify(annulus, tri, avoid))
            .or_else(|| cube::try_identify(annulus, tri, avoid))
            .or_else(|| mobius::try_identify(annulus, tri, avoid))
            .or_else(|| reflector::try_identify(annulus, tri, avoid))
            .or_else(|| layering::try_identify(annulus, tri, avoid))
    }

    /// Adds this block's exceptional-fibre contribution(s) to `space`,
    /// negating the beta component of every contributed fibre when
    /// `reflect` is set.
    pub fn adjust_sfs(&self, space: &mut SFSpace, reflect: bool) {
        match &self.kind {
            SatBlockKind::Lst {
                cuts_vert,
                cuts_horiz,
                ..
            } => {
                let beta = if reflect { -*cuts_horiz } else { *cuts_horiz };
                space.insert_fibre(*cuts_vert, beta);
            }
            SatBlockKind::TriPrism { major } => {
                let beta = if *major { 1 } else { 2 };
                let beta = if reflect { -beta } else { beta };
                space.insert_fibre(1, beta);
            }
            SatBlockKind::Cube => {}
            SatBlockKind::Mobius { position } => {
                let beta = match position {
                    0 => 1,
                    1 => 3,
                    _ => 5,
                };
                let beta = if reflect { -beta } else { beta };
                space.insert_fibre(2, beta);
            }
            SatBlockKind::ReflectorStrip { .. } => {
                space.add_reflector(1);
            }
            SatBlockKind::Layering { .. } => {}
        }
    }
}
