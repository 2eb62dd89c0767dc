//! # satrecognise
//!
//! Recognition of closed graph 3-manifolds from their triangulations.
//!
//! A graph manifold decomposes along tori into Seifert fibred pieces. This
//! crate searches a triangulation for a combinatorial witness of such a
//! decomposition: maximal regions of "saturated blocks" (tetrahedra
//! respecting a local Seifert fibration) glued along "saturated annuli"
//! (torus-boundary building blocks), then assembles the pieces it finds
//! into one of a fixed set of recognised combinatorial shapes — a single
//! closed Seifert fibred space, a self-glued loop, a pair, a chain of
//! three, or a thin I-bundle plugged by a saturated region.
//!
//! [`recognise_closed_3manifold`] is the single entry point most callers
//! want; the `recognise` module's individual functions are exposed for
//! callers who already know which shape they're looking for.

pub mod annulus;
pub mod block;
pub mod graph;
pub mod layering_walk;
pub mod manifold;
pub mod matrix2;
pub mod perm;
pub mod recognise;
pub mod region;
pub mod sfs;
mod smith;
pub mod triangulation;
pub mod txicore;

pub use manifold::{recognise_closed_3manifold, Manifold};
pub use matrix2::Matrix2;
pub use perm::Perm4;
pub use sfs::SFSpace;
pub use triangulation::Triangulation;
