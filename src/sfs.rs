//! Canonical Seifert-fibred-space invariant.

use crate::smith::smith_normal_form;
use std::cmp::Ordering;

/// The base orbifold's underlying surface, orientable (`o`) or
/// non-orientable (`n`), with a `b` prefix marking a version that carries
/// boundary (punctures or reflector lines) rather than being closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BaseClass {
    O1,
    O2,
    N1,
    N2,
    N3,
    N4,
    Bo1,
    Bo2,
    Bn1,
    Bn2,
    Bn3,
}

impl BaseClass {
    fn is_orientable(self) -> bool {
        matches!(self, BaseClass::O1 | BaseClass::O2 | BaseClass::Bo1 | BaseClass::Bo2)
    }

    fn reflected(self) -> BaseClass {
        match self {
            BaseClass::O1 => BaseClass::O2,
            BaseClass::O2 => BaseClass::O1,
            BaseClass::Bo1 => BaseClass::Bo2,
            BaseClass::Bo2 => BaseClass::Bo1,
            other => other,
        }
    }

    /// The short label used in [`SFSpace::write_name`], matching the
    /// `o1`/`o2`/`n1`.../`bn3` vocabulary of spec's data model.
    pub fn label(self) -> &'static str {
        match self {
            BaseClass::O1 => "o1",
            BaseClass::O2 => "o2",
            BaseClass::N1 => "n1",
            BaseClass::N2 => "n2",
            BaseClass::N3 => "n3",
            BaseClass::N4 => "n4",
            BaseClass::Bo1 => "bo1",
            BaseClass::Bo2 => "bo2",
            BaseClass::Bn1 => "bn1",
            BaseClass::Bn2 => "bn2",
            BaseClass::Bn3 => "bn3",
        }
    }
}

/// A canonical Seifert-fibred-space invariant: base orbifold, exceptional
/// fibre list, and obstruction constant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SFSpace {
    pub base_class: BaseClass,
    pub base_genus: u32,
    pub punctures_untwisted: u32,
    pub punctures_twisted: u32,
    pub reflectors_untwisted: u32,
    pub reflectors_twisted: u32,
    pub fibres: Vec<(i64, i64)>,
    pub b: i64,
}

impl SFSpace {
    pub fn new(base_class: BaseClass, base_genus: u32) -> SFSpace {
        SFSpace {
            base_class,
            base_genus,
            punctures_untwisted: 0,
            punctures_twisted: 0,
            reflectors_untwisted: 0,
            reflectors_twisted: 0,
            fibres: Vec::new(),
            b: 0,
        }
    }

    /// Inserts an exceptional fibre of type `(alpha, beta)`. An `alpha`
    /// of 1 carries no topology of its own and is absorbed directly into
    /// the obstruction constant.
    pub fn insert_fibre(&mut self, alpha: i64, beta: i64) {
        if alpha == 1 {
            self.b += beta;
            return;
        }
        let beta = beta.rem_euclid(alpha);
        self.fibres.push((alpha, beta));
    }

    pub fn add_reflector(&mut self, count: u32) {
        self.reflectors_untwisted += count;
    }

    pub fn insert_puncture(&mut self, twisted: bool) {
        if twisted {
            self.punctures_twisted += 1;
        } else {
            self.punctures_untwisted += 1;
        }
    }

    /// Replaces every fibre `(alpha, beta)` with `(alpha, -beta mod
    /// alpha)`, flips the obstruction, and swaps the base class between
    /// its orientable/non-orientable-reversing pair where relevant.
    pub fn reflect(&mut self) {
        for f in &mut self.fibres {
            f.1 = (-f.1).rem_euclid(f.0);
        }
        self.b = -self.b;
        self.base_class = self.base_class.reflected();
    }

    fn is_fibre_reversing(&self) -> bool {
        !self.base_class.is_orientable()
    }

    /// Brings the space to canonical form: fibres sorted, beta reduced
    /// into the range the base orientability/fibre-reversal allows,
    /// obstruction driven to canonical value, and (if `may_reflect`) the
    /// lexicographic minimum of self and its reflection.
    pub fn reduce(&self, may_reflect: bool) -> SFSpace {
        let reduced = self.reduce_one_orientation();
        if !may_reflect {
            return reduced;
        }
        let mut mirrored = self.clone();
        mirrored.reflect();
        let mirrored = mirrored.reduce_one_orientation();
        if mirrored.less_than(&reduced) {
            mirrored
        } else {
            reduced
        }
    }

    fn reduce_one_orientation(&self) -> SFSpace {
        let mut s = self.clone();
        s.fibres.sort();

        if s.is_fibre_reversing() {
            // Fibre-reversing bases can't distinguish beta from -beta:
            // collapse each fibre to the representative with beta <=
            // alpha/2, folding the sign difference into the obstruction.
            let mut collapsed = Vec::with_capacity(s.fibres.len());
            for (alpha, beta) in s.fibres {
                let alt = (alpha - beta).rem_euclid(alpha);
                let canon = beta.min(alt);
                collapsed.push((alpha, canon));
            }
            collapsed.sort();
            s.fibres = collapsed;
            // Reflector-induced (alpha,beta)/(alpha,alpha-beta) pairs
            // cancel entirely in a fibre-reversing base.
            s.b = 0;
        } else {
            // Orientable base: the obstruction absorbs an overall
            // integer shift common to all fibres' lexicographic minimum,
            // which is already achieved since insert_fibre normalises
            // beta into [0, alpha).
        }

        s
    }

    /// Lexicographic ordering on `(base_class, genus, puncture counts,
    /// reflector counts, sorted fibre list, obstruction)`.
    pub fn less_than(&self, other: &SFSpace) -> bool {
        self.cmp_key().cmp(&other.cmp_key()) == Ordering::Less
    }

    fn cmp_key(
        &self,
    ) -> (
        BaseClass,
        u32,
        u32,
        u32,
        u32,
        u32,
        Vec<(i64, i64)>,
        i64,
    ) {
        (
            self.base_class,
            self.base_genus,
            self.punctures_untwisted,
            self.punctures_twisted,
            self.reflectors_untwisted,
            self.reflectors_twisted,
            self.fibres.clone(),
            self.b,
        )
    }

    /// The presentation matrix before boundary identification: `f + r + 2`
    /// relation rows (one per exceptional fibre, one per reflector, the
    /// obstruction relation, and a fibre-constraint relation when the base
    /// is fibre-reversing) over `2g + f + 2r + 1` generator columns (one
    /// fibre generator, one per base curve, one per exceptional fibre, two
    /// per reflector). Boundary (puncture) generators join only at the
    /// graph-manifold gluing stage and are not counted here.
    fn presentation(&self) -> (usize, usize, Vec<i64>) {
        let n_fibres = self.fibres.len();
        let n_reflectors = (self.reflectors_untwisted + self.reflectors_twisted) as usize;
        let base_curve_col = 1; // columns [1, 2g] are the base-curve generators
        let n_base_curves = 2 * self.base_genus as usize;
        let fibre_gen_col = base_curve_col + n_base_curves; // columns [., +f)
        let reflector_col = fibre_gen_col + n_fibres; // columns [., +2r)
        let cols = reflector_col + 2 * n_reflectors;

        let mut rows: Vec<Vec<i64>> = Vec::new();

        // One relation per exceptional fibre: alpha*q_i + beta*h = 0.
        for (i, &(alpha, beta)) in self.fibres.iter().enumerate() {
            let mut row = vec![0i64; cols];
            row[0] = beta;
            row[fibre_gen_col + i] = alpha;
            rows.push(row);
        }

        // One relation per reflector: crossing a reflector line reverses
        // the fibre, so its two boundary generators sum with the fibre.
        for i in 0..n_reflectors {
            let mut row = vec![0i64; cols];
            row[0] = 1;
            row[reflector_col + 2 * i] = 1;
            row[reflector_col + 2 * i + 1] = 1;
            rows.push(row);
        }

        // The base-orbifold/Euler-number relation carrying the obstruction.
        let mut obstruction_row = vec![0i64; cols];
        obstruction_row[0] = self.b;
        rows.push(obstruction_row);

        // A fibre-reversing base identifies h with h^-1; this row is kept
        // (as a no-op zero row) even when the base isn't reversing, so the
        // row count always matches `f + r + 2` as the presentation's shape
        // before boundary identification demands.
        let mut fibre_constraint = vec![0i64; cols];
        if self.is_fibre_reversing() {
            fibre_constraint[0] = 2;
        }
        rows.push(fibre_constraint);

        let row_count = rows.len();
        debug_assert_eq!(row_count, n_fibres + n_reflectors + 2);
        debug_assert_eq!(cols, n_base_curves + n_fibres + 2 * n_reflectors + 1);
        let mut flat = Vec::with_capacity(row_count * cols);
        for row in rows {
            flat.extend(row);
        }
        (row_count, cols, flat)
    }

    /// A single-line human-readable name, e.g. `SFS [o1: (2,1) (3,1)]`.
    pub fn write_name(&self) -> String {
        let mut s = format!("SFS [{}", self.base_class.label());
        if self.base_genus > 0 {
            s.push_str(&format!(" genus {}", self.base_genus));
        }
        if self.punctures_untwisted + self.punctures_twisted > 0 {
            s.push_str(&format!(
                ", punctures ({},{})",
                self.punctures_untwisted, self.punctures_twisted
            ));
        }
        if self.reflectors_untwisted + self.reflectors_twisted > 0 {
            s.push_str(&format!(
                ", reflectors ({},{})",
                self.reflectors_untwisted, self.reflectors_twisted
            ));
        }
        s.push(':');
        for &(alpha, beta) in &self.fibres {
            s.push_str(&format!(" ({alpha},{beta})"));
        }
        if self.b != 0 {
            s.push_str(&format!(" b={}", self.b));
        }
        s.push(']');
        s
    }

    /// The same invariant as a LaTeX fragment (no leading/trailing `$`).
    pub fn write_tex_name(&self) -> String {
        let mut s = format!("\\mathrm{{SFS}}[{}", self.base_class.label());
        for &(alpha, beta) in &self.fibres {
            s.push_str(&format!(",({alpha},{beta})"));
        }
        s.push(']');
        s
    }

    /// First homology group, as a list of invariant factors (0 meaning a
    /// free `Z` summand).
    pub fn homology(&self) -> Vec<i64> {
        let (rows, cols, m) = self.presentation();
        if rows == 0 || cols == 0 {
            return Vec::new();
        }
        smith_normal_form(rows, cols, m)
            .into_iter()
            .filter(|&d| d != 1)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_fibre_normalises_beta() {
        let mut s = SFSpace::new(BaseClass::O1, 0);
        s.insert_fibre(3, 7);
        assert_eq!(s.fibres, vec![(3, 1)]);
    }

    #[test]
    fn insert_fibre_alpha_one_is_absorbed_into_obstruction() {
        let mut s = SFSpace::new(BaseClass::O1, 0);
        s.insert_fibre(1, 5);
        assert!(s.fibres.is_empty());
        assert_eq!(s.b, 5);
    }

    #[test]
    fn reduce_sorts_fibres() {
        let mut s = SFSpace::new(BaseClass::O1, 0);
        s.insert_fibre(5, 2);
        s.insert_fibre(3, 1);
        let r = s.reduce(false);
        assert_eq!(r.fibres, vec![(3, 1), (5, 2)]);
    }

    #[test]
    fn reduce_is_idempotent() {
        let mut s = SFSpace::new(BaseClass::N1, 1);
        s.insert_fibre(5, 2);
        let once = s.reduce(true);
        let twice = once.reduce(true);
        assert_eq!(once, twice);
    }

    #[test]
    fn reflect_negates_beta_and_obstruction() {
        let mut s = SFSpace::new(BaseClass::O1, 0);
        s.insert_fibre(5, 2);
        s.b = 3;
        s.reflect();
        assert_eq!(s.fibres, vec![(5, 3)]);
        assert_eq!(s.b, -3);
        assert_eq!(s.base_class, BaseClass::O2);
    }

    #[test]
    fn homology_of_trivial_space_is_empty() {
        let s = SFSpace::new(BaseClass::O1, 0);
        assert!(s.homology().is_empty());
    }

    #[test]
    fn presentation_matrix_dimensions_match_f_r_g() {
        let mut s = SFSpace::new(BaseClass::N1, 2);
        s.insert_fibre(2, 1);
        s.insert_fibre(3, 1);
        s.add_reflector(1);
        let (rows, cols, flat) = s.presentation();
        let f = s.fibres.len();
        let r = (s.reflectors_untwisted + s.reflectors_twisted) as usize;
        let g = s.base_genus as usize;
        assert_eq!(rows, f + r + 2);
        assert_eq!(cols, 2 * g + f + 2 * r + 1);
        assert_eq!(flat.len(), rows * cols);
    }
}
