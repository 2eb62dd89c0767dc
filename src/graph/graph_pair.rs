//! `GraphPair`: two distinct Seifert-fibred pieces glued across a single
//! torus by a matching matrix.

use super::{reduce_sign, simpler};
use crate::matrix2::Matrix2;
use crate::sfs::{BaseClass, SFSpace};

/// A graph manifold built from two saturated regions, each with one
/// boundary torus, joined via `matching_reln`.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphPair {
    pub sfs: [SFSpace; 2],
    pub matching_reln: Matrix2,
}

impl GraphPair {
    pub fn new(sfs0: SFSpace, sfs1: SFSpace, matching_reln: Matrix2) -> GraphPair {
        GraphPair {
            sfs: [sfs0, sfs1],
            matching_reln,
        }
    }

    /// Canonicalises in place: zero each side's obstruction (compensating
    /// the matrix), apply the `bn2`-genus-1 substitution, then search the
    /// (up to 2x2) reflection/swap candidates for the `simpler`-minimal
    /// presentation.
    ///
    /// A further refinement — fibre-negating candidates for bases with an
    /// odd exceptional-fibre count, via an extra `(1,1)` insertion — is
    /// not reproduced here and is recorded as a scope decision in
    /// `DESIGN.md`.
    pub fn reduce(&mut self) {
        self.sfs[0] = self.sfs[0].reduce(false);
        self.sfs[1] = self.sfs[1].reduce(false);

        self.absorb_obstruction(0);
        self.absorb_obstruction(1);

        for i in 0..2 {
            if is_genus1_closed_bn2(&self.sfs[i]) {
                self.sfs[i] = mobius_double_cone();
                self.matching_reln = if i == 0 {
                    self.matching_reln * Matrix2::new(-1, 1, -1, 0)
                } else {
                    Matrix2::new(0, -1, 1, -1) * self.matching_reln
                };
            }
        }

        let mut candidates0 = vec![(self.sfs[0].clone(), Matrix2::IDENTITY)];
        let mut candidates1 = vec![(self.sfs[1].clone(), Matrix2::IDENTITY)];
        push_reflected_candidate(&mut candidates0, &self.sfs[0]);
        push_reflected_candidate(&mut candidates1, &self.sfs[1]);

        let mut best: Option<(SFSpace, SFSpace, Matrix2)> = None;
        let consider = |left: &SFSpace, right: &SFSpace, reln: Matrix2, best: &mut Option<(SFSpace, SFSpace, Matrix2)>| match best
        {
            None => *best = Some((left.clone(), right.clone(), reln)),
            Some((u0, u1, u_reln)) => {
                if simpler(&reln, u_reln) {
                    *best = Some((left.clone(), right.clone(), reln));
                } else if !simpler(u_reln, &reln) && (left.less_than(u0) || (*left == *u0 && right.less_than(u1))) {
                    *best = Some((left.clone(), right.clone(), reln));
                }
            }
        };

        for (s0, m0) in &candidates0 {
            for (s1, m1) in &candidates1 {
                let try_reln = reduce_sign(*m1 * self.matching_reln * m0.inverse());

                if !s1.less_than(s0) {
                    consider(s0, s1, try_reln, &mut best);
                }
                if !s0.less_than(s1) {
                    consider(s1, s0, reduce_sign(try_reln.inverse()), &mut best);
                }
            }
        }

        if let Some((u0, u1, reln)) = best {
            self.sfs = [u0, u1];
            self.matching_reln = reln;
        }
    }

    fn absorb_obstruction(&mut self, i: usize) {
        let b = self.sfs[i].b;
        if b == 0 {
            return;
        }
        self.sfs[i].insert_fibre(1, -b);
        let m = self.matching_reln;
        self.matching_reln = if i == 0 {
            Matrix2::new(m.a + b * m.b, m.b, m.c + b * m.d, m.d)
        } else {
            Matrix2::new(m.a, m.b, m.c - b * m.a, m.d - b * m.b)
        };
    }

    pub fn write_name(&self) -> String {
        format!("{} U/m {}, m = {}", self.sfs[0].write_name(), self.sfs[1].write_name(), self.matching_reln)
    }

    pub fn write_tex_name(&self) -> String {
        format!(
            "{} \\bigcup_{{\\homtwo{{{}}}{{{}}}{{{}}}{{{}}}}} {}",
            self.sfs[0].write_tex_name(),
            self.matching_reln.a,
            self.matching_reln.b,
            self.matching_reln.c,
            self.matching_reln.d,
            self.sfs[1].write_tex_name()
        )
    }
}

fn push_reflected_candidate(candidates: &mut Vec<(SFSpace, Matrix2)>, original: &SFSpace) {
    let mut reflected = original.clone();
    reflected.reflect();
    let mut reflected = reflected.reduce(false);
    let b = reflected.b;
    reflected.insert_fibre(1, -b);
    candidates.push((reflected, Matrix2::new(1, 0, -b, -1)));
}

/// `M/n2` with genus 1, a single untwisted puncture, and nothing else:
/// the Mobius-band-with-one-boundary base orbifold, which admits the
/// `D:(2,1)(2,1)` substitution [`GraphPair::reduce`] performs.
fn is_genus1_closed_bn2(s: &SFSpace) -> bool {
    s.base_class == BaseClass::Bn2
        && s.base_genus == 1
        && s.punctures_untwisted == 1
        && s.punctures_twisted == 0
        && s.reflectors_untwisted == 0
        && s.reflectors_twisted == 0
        && s.fibres.is_empty()
        && s.b == 0
}

fn mobius_double_cone() -> SFSpace {
    let mut s = SFSpace::new(BaseClass::Bo1, 0);
    s.punctures_untwisted = 1;
    s.insert_fibre(2, 1);
    s.insert_fibre(2, 1);
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduce_zeros_both_obstructions() {
        let mut s0 = SFSpace::new(BaseClass::O1, 0);
        s0.insert_fibre(3, 1);
        s0.b = 2;
        let mut s1 = SFSpace::new(BaseClass::O1, 0);
        s1.insert_fibre(5, 1);
        s1.b = -1;
        let mut gp = GraphPair::new(s0, s1, Matrix2::new(0, 1, 1, 0));
        gp.reduce();
        assert_eq!(gp.sfs[0].b, 0);
        assert_eq!(gp.sfs[1].b, 0);
    }

    #[test]
    fn reduce_keeps_determinant_magnitude_at_one() {
        let s0 = SFSpace::new(BaseClass::O1, 0);
        let s1 = SFSpace::new(BaseClass::O1, 0);
        let mut gp = GraphPair::new(s0, s1, Matrix2::new(0, 1, 1, 0));
        gp.reduce();
        assert_eq!(gp.matching_reln.determinant().abs(), 1);
    }
}
