//! The small catalogue of "seed" blocks whose triangulations are found
//! inside the input by subcomplex isomorphism search: a minimal pair
//! (TriPrism major, Cube) plus an explicit ReflectorStrip family.

use super::{ring, reflector, SatBlock, SatBlockKind};
use crate::annulus::SatAnnulus;
use crate::perm::Perm4;
use crate::triangulation::{find_all_subcomplexes, Isomorphism, TetSet, Triangulation};

/// One catalogue entry: a template triangulation together with enough
/// information to rebuild the matching [`SatBlock`] once an embedding of
/// the template into a haystack triangulation is found.
pub struct Starter {
    pub name: &'static str,
    pub template: Triangulation,
    kind: SatBlockKind,
    n: usize,
    open_gaps: Vec<usize>,
}

/// A minimal pair (TriPrism major, Cube), plus ReflectorStrip lengths
/// 1..4, each tried both untwisted and twisted.
pub fn catalogue() -> Vec<Starter> {
    let mut v = vec![
        Starter {
            name: "tri-prism",
            template: ring::template(3, &[0, 1, 2], false),
            kind: SatBlockKind::TriPrism { major: true },
            n: 3,
            open_gaps: vec![0, 1, 2],
        },
        Starter {
            name: "cube",
            template: ring::template(6, &[0, 1, 2, 3], false),
            kind: SatBlockKind::Cube,
            n: 6,
            open_gaps: vec![0, 1, 2, 3],
        },
    ];
    for length in reflector::STARTER_LENGTHS {
        for twisted in [false, true] {
            v.push(Starter {
                name: "reflector-strip",
                template: reflector::template(length, twisted),
                kind: SatBlockKind::ReflectorStrip { length, twisted },
                n: length as usize,
                open_gaps: vec![0],
            });
        }
    }
    v
}

/// Every embedding of `starter`'s template into `haystack` as a subcomplex.
pub fn embeddings(haystack: &Triangulation, starter: &Starter) -> Vec<Isomorphism> {
    find_all_subcomplexes(haystack, &starter.template)
}

/// Builds the transported [`SatBlock`] and the initial `avoid` set (the
/// isomorphic image of the starter's own tetrahedra) from one embedding.
pub fn block_from_iso(starter: &Starter, iso: &Isomorphism) -> (SatBlock, TetSet) {
    let tet_image: Vec<_> = (0..starter.n).map(|i| iso.apply_tet(i)).collect();
    let vertex_image: Vec<_> = (0..starter.n).map(|i| iso.apply_perm(i, &Perm4::IDENTITY)).collect();

    let annuli: Vec<SatAnnulus> = starter
        .open_gaps
        .iter()
        .map(|&g| ring::annulus_at(starter.n, g, &tet_image, &vertex_image))
        .collect();

    let mut avoid = TetSet::new();
    for &t in &tet_image {
        avoid.insert(t);
    }

    (SatBlock::new(starter.kind.clone(), annuli), avoid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_has_the_minimal_pair_plus_reflector_family() {
        let cat = catalogue();
        // tri-prism, cube, then 4 lengths x 2 twist states.
        assert_eq!(cat.len(), 2 + 4 * 2);
    }

    #[test]
    fn tri_prism_template_embeds_in_itself() {
        let cat = catalogue();
        let tri_prism = &cat[0];
        let isos = embeddings(&tri_prism.template, tri_prism);
        assert!(!isos.is_empty());
    }
}
