//! `GraphLoop`: a single Seifert-fibred piece glued to itself across a
//! torus boundary by a matching matrix.

use crate::matrix2::Matrix2;
use crate::sfs::SFSpace;

/// A graph manifold obtained by self-identifying the two boundary tori of
/// a single saturated region via `matching_reln`.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphLoop {
    pub sfs: SFSpace,
    pub matching_reln: Matrix2,
}

impl GraphLoop {
    pub fn new(sfs: SFSpace, matching_reln: Matrix2) -> GraphLoop {
        GraphLoop { sfs, matching_reln }
    }

    /// Canonicalises in place: fix the sign of the matrix's `(0,1)` entry
    /// when possible, push the obstruction constant to zero, then zero out
    /// the matrix's `(0,0)` entry modulo `(0,1)` via repeated
    /// `(1,1)`/`(1,-1)` twists.
    pub fn reduce(&mut self) {
        if self.matching_reln.determinant() == 1 && self.matching_reln.b < 0 {
            self.matching_reln = self.matching_reln.inverse();
        }

        let b = self.sfs.b;
        if b != 0 {
            self.sfs.insert_fibre(1, -b);
            let m = self.matching_reln;
            self.matching_reln = Matrix2::new(m.a + b * m.b, m.b, m.c + b * m.d, m.d);
        }

        if self.matching_reln.b != 0 {
            let n_ops = self.matching_reln.a / self.matching_reln.b;
            let sign: i64 = if n_ops > 0 { -1 } else { 1 };
            for _ in 0..n_ops.unsigned_abs() {
                let m = self.matching_reln;
                let a = m.a + sign * m.b;
                let c = m.c + sign * m.d + sign * a;
                let d = m.d + sign * m.b;
                self.matching_reln = Matrix2::new(a, m.b, c, d);
            }
        }

        self.sfs = self.sfs.reduce(true);
    }

    /// A single-line human-readable name, e.g. `SFS [o1: (3,1)] / [ 0,1 | 1,0 ]`.
    pub fn write_name(&self) -> String {
        format!("{} / {}", self.sfs.write_name(), self.matching_reln)
    }

    pub fn write_tex_name(&self) -> String {
        format!(
            "{}_{{\\homtwo{{{}}}{{{}}}{{{}}}{{{}}}}}",
            self.sfs.write_tex_name(),
            self.matching_reln.a,
            self.matching_reln.b,
            self.matching_reln.c,
            self.matching_reln.d
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sfs::BaseClass;

    #[test]
    fn reduce_zeros_the_obstruction() {
        let mut s = SFSpace::new(BaseClass::O1, 0);
        s.insert_fibre(3, 1);
        s.b = 2;
        let mut gl = GraphLoop::new(s, Matrix2::new(0, 1, 1, 0));
        gl.reduce();
        assert_eq!(gl.sfs.b, 0);
    }

    #[test]
    fn reduce_flips_a_negative_b_entry_when_determinant_is_one() {
        let s = SFSpace::new(BaseClass::O1, 0);
        let mut gl = GraphLoop::new(s, Matrix2::new(1, -1, 0, 1));
        gl.reduce();
        assert!(gl.matching_reln.b >= 0);
    }
}
