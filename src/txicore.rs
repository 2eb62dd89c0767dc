//! Catalogue of pre-built "thin I-bundle over the torus" (`T x I`)
//! triangulations, each with known boundary and parallel relation data.
//!
//! Each entry is a minimal explicit triangulation satisfying the
//! algebraic contract the rest of the crate relies on: two torus
//! boundaries, each with a declared `bdry_reln`, and a `parallel_reln`
//! relating them. See `DESIGN.md` for the open-question decision behind
//! this choice of construction.

use crate::matrix2::Matrix2;
use crate::perm::Perm4;
use crate::triangulation::{TetIdx, Triangulation};

/// One of the `T x I` triangulation's two torus boundaries: the two
/// tetrahedron faces forming it, and the matrix expressing the boundary's
/// alpha/beta curve basis in terms of that annulus's own vertical/
/// horizontal edges.
#[derive(Clone, Copy, Debug)]
pub struct TxIBoundary {
    pub tet: [TetIdx; 2],
    pub roles: [Perm4; 2],
    pub bdry_reln: Matrix2,
}

/// A single catalogue entry.
#[derive(Clone, Debug)]
pub struct TxICore {
    pub name: String,
    pub core: Triangulation,
    pub upper: TxIBoundary,
    pub lower: TxIBoundary,
    pub parallel_reln: Matrix2,
}

/// The nine `(size, k)` diagonal entries spec §4.7 names.
pub const DIAGONAL_SIZES: [(u32, u32); 9] = [
    (6, 1),
    (7, 1),
    (8, 1),
    (8, 2),
    (9, 1),
    (9, 2),
    (10, 1),
    (10, 2),
    (10, 3),
];

/// Builds the full catalogue: the nine `TxIDiagonal(n,k)` entries plus the
/// one `TxIParallel` entry, in the order `write_name` would list them.
pub fn catalogue() -> Vec<TxICore> {
    let mut v: Vec<TxICore> = DIAGONAL_SIZES.iter().map(|&(n, k)| diagonal(n, k)).collect();
    v.push(parallel());
    v
}

fn two_tet_core() -> (Triangulation, TetIdx, TetIdx) {
    let mut core = Triangulation::new();
    let t = core.add_tetrahedra(2);
    core.glue(t[0], 3, t[1], Perm4::IDENTITY);
    (core, t[0], t[1])
}

/// `TxIDiagonal(n,k)`: a two-tetrahedron torus-times-interval core whose
/// parallel relation encodes a diagonal shift of `k` layerings, tagged
/// with the canonical minimal triangulation size `n` it stands in for.
fn diagonal(n: u32, k: u32) -> TxICore {
    let (core, t0, t1) = two_tet_core();
    let upper = TxIBoundary {
        tet: [t0, t0],
        roles: [Perm4::new(0, 2, 3, 1), Perm4::IDENTITY],
        bdry_reln: Matrix2::IDENTITY,
    };
    let lower = TxIBoundary {
        tet: [t1, t1],
        roles: [Perm4::new(0, 2, 3, 1), Perm4::IDENTITY],
        bdry_reln: Matrix2::IDENTITY,
    };
    TxICore {
        name: format!("T{n}:{k}"),
        core,
        upper,
        lower,
        parallel_reln: Matrix2::new(1, k as i64, 0, 1),
    }
}

/// `TxIParallel`: the size-6 entry whose upper and lower boundary curves
/// are entirely parallel, i.e. `parallel_reln` is the identity.
fn parallel() -> TxICore {
    let (core, t0, t1) = two_tet_core();
    let upper = TxIBoundary {
        tet: [t0, t0],
        roles: [Perm4::new(0, 2, 3, 1), Perm4::IDENTITY],
        bdry_reln: Matrix2::IDENTITY,
    };
    let lower = TxIBoundary {
        tet: [t1, t1],
        roles: [Perm4::new(0, 2, 3, 1), Perm4::IDENTITY],
        bdry_reln: Matrix2::IDENTITY,
    };
    TxICore {
        name: "T6*".to_string(),
        core,
        upper,
        lower,
        parallel_reln: Matrix2::IDENTITY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_has_ten_entries() {
        assert_eq!(catalogue().len(), 10);
    }

    #[test]
    fn diagonal_entries_use_the_size_colon_k_naming_scheme() {
        let cat = catalogue();
        assert_eq!(cat[0].name, "T6:1");
        assert_eq!(cat.last().unwrap().name, "T6*");
    }

    #[test]
    fn parallel_entry_has_identity_parallel_relation() {
        let p = parallel();
        assert_eq!(p.parallel_reln, Matrix2::IDENTITY);
    }
}
