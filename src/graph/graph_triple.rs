//! `GraphTriple`: three Seifert-fibred pieces in a chain, a "hub" glued
//! to two end pieces across two distinct tori.

use crate::matrix2::Matrix2;
use crate::sfs::SFSpace;

/// A graph manifold built from a central region with two boundary tori
/// (`sfs_hub`) glued to two end regions (`sfs0`, `sfs1`) each with a
/// single boundary torus, via `m01` (end 0 to hub) and `m21` (end 1 to hub).
#[derive(Clone, Debug, PartialEq)]
pub struct GraphTriple {
    pub sfs0: SFSpace,
    pub sfs_hub: SFSpace,
    pub sfs1: SFSpace,
    pub m01: Matrix2,
    pub m21: Matrix2,
}

impl GraphTriple {
    pub fn new(sfs0: SFSpace, sfs_hub: SFSpace, sfs1: SFSpace, m01: Matrix2, m21: Matrix2) -> GraphTriple {
        GraphTriple {
            sfs0,
            sfs_hub,
            sfs1,
            m01,
            m21,
        }
    }

    /// Reduces each of the three spaces independently; unlike `GraphPair`,
    /// there's no single matching matrix whose compensating moves span all
    /// three pieces at once, so the canonicalisation here is per-space.
    pub fn reduce(&mut self) {
        self.sfs0 = self.sfs0.reduce(true);
        self.sfs_hub = self.sfs_hub.reduce(true);
        self.sfs1 = self.sfs1.reduce(true);
    }

    pub fn write_name(&self) -> String {
        format!(
            "{} U/m {} U/m {}, m = [{}, {}]",
            self.sfs0.write_name(),
            self.sfs_hub.write_name(),
            self.sfs1.write_name(),
            self.m01,
            self.m21
        )
    }

    pub fn write_tex_name(&self) -> String {
        format!(
            "{} \\bigcup_{{\\homtwo{{{}}}{{{}}}{{{}}}{{{}}}}} {} \\bigcup_{{\\homtwo{{{}}}{{{}}}{{{}}}{{{}}}}} {}",
            self.sfs0.write_tex_name(),
            self.m01.a,
            self.m01.b,
            self.m01.c,
            self.m01.d,
            self.sfs_hub.write_tex_name(),
            self.m21.a,
            self.m21.b,
            self.m21.c,
            self.m21.d,
            self.sfs1.write_tex_name()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sfs::BaseClass;

    #[test]
    fn reduce_is_idempotent_on_each_piece() {
        let mut s0 = SFSpace::new(BaseClass::O1, 0);
        s0.insert_fibre(5, 3);
        let s_hub = SFSpace::new(BaseClass::O1, 0);
        let s1 = SFSpace::new(BaseClass::O1, 0);
        let mut gt = GraphTriple::new(s0, s_hub, s1, Matrix2::IDENTITY, Matrix2::IDENTITY);
        gt.reduce();
        let once = gt.clone();
        gt.reduce();
        assert_eq!(gt, once);
    }
}
