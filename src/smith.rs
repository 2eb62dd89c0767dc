//! Integer Smith normal form, used by [`SFSpace`](crate::sfs::SFSpace) to
//! compute its first homology from a presentation matrix.

/// Reduces `m` (row-major, `rows` by `cols`) to Smith normal form in place
/// and returns the diagonal entries, padded with zeros to `min(rows,
/// cols)` elements. The zero entries among them correspond to free
/// summands; the rest are the torsion coefficients.
pub fn smith_normal_form(rows: usize, cols: usize, mut m: Vec<i64>) -> Vec<i64> {
    debug_assert_eq!(m.len(), rows * cols);
    let mut diag = Vec::new();
    let mut t = 0;
    while t < rows && t < cols {
        if !reduce_from(&mut m, rows, cols, t) {
            break;
        }
        diag.push(m[t * cols + t]);
        t += 1;
    }
    // Divisibility chain: each diagonal entry must divide the next.
    for i in 0..diag.len() {
        for j in (i + 1)..diag.len() {
            if diag[i] == 0 {
                continue;
            }
            if diag[j] % diag[i] != 0 {
                let g = gcd(diag[i], diag[j]);
                let l = if g == 0 { 0 } else { diag[i] / g * diag[j] };
                diag[i] = g;
                diag[j] = l;
            }
        }
    }
    diag
}

fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Clears row and column `t` below/right of the pivot by repeated
/// row/column reduction, leaving `m[t][t]` as the gcd of that submatrix's
/// entries (or returns `false` if the remaining submatrix is all zero).
fn reduce_from(m: &mut [i64], rows: usize, cols: usize, t: usize) -> bool {
    loop {
        let Some((pr, pc)) = smallest_nonzero(m, rows, cols, t) else {
            return false;
        };
        swap_rows(m, cols, t, pr);
        swap_cols(m, rows, cols, t, pc);

        let mut done = true;
        for r in (t + 1)..rows {
            if m[r * cols + t] != 0 {
                reduce_row_against_pivot(m, cols, t, r);
                done = false;
            }
        }
        for c in (t + 1)..cols {
            if m[t * cols + c] != 0 {
                reduce_col_against_pivot(m, rows, cols, t, c);
                done = false;
            }
        }
        if done {
            return true;
        }
    }
}

fn smallest_nonzero(m: &[i64], rows: usize, cols: usize, t: usize) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize, i64)> = None;
    for r in t..rows {
        for c in t..cols {
            let v = m[r * cols + c];
            if v == 0 {
                continue;
            }
            if best.map_or(true, |(_, _, b)| v.abs() < b.abs()) {
                best = Some((r, c, v));
            }
        }
    }
    best.map(|(r, c, _)| (r, c))
}

fn swap_rows(m: &mut [i64], cols: usize, r0: usize, r1: usize) {
    if r0 == r1 {
        return;
    }
    for c in 0..cols {
        m.swap(r0 * cols + c, r1 * cols + c);
    }
}

fn swap_cols(m: &mut [i64], rows: usize, cols: usize, c0: usize, c1: usize) {
    if c0 == c1 {
        return;
    }
    for r in 0..rows {
        m.swap(r * cols + c0, r * cols + c1);
    }
}

fn reduce_row_against_pivot(m: &mut [i64], cols: usize, t: usize, r: usize) {
    let pivot = m[t * cols + t];
    let q = m[r * cols + t] / pivot;
    for c in 0..cols {
        let sub = q * m[t * cols + c];
        m[r * cols + c] -= sub;
    }
}

fn reduce_col_against_pivot(m: &mut [i64], rows: usize, cols: usize, t: usize, c: usize) {
    let pivot = m[t * cols + t];
    let q = m[t * cols + c] / pivot;
    for r in 0..rows {
        let sub = q * m[r * cols + t];
        m[r * cols + c] -= sub;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_matrix_has_all_unit_invariant_factors() {
        let m = vec![1, 0, 0, 1];
        assert_eq!(smith_normal_form(2, 2, m), vec![1, 1]);
    }

    #[test]
    fn diagonal_2_0_splits_into_torsion_and_free() {
        // [[2,0],[0,0]] -> invariant factors (2, 0): a Z/2 summand and a
        // free summand.
        let m = vec![2, 0, 0, 0];
        assert_eq!(smith_normal_form(2, 2, m), vec![2, 0]);
    }

    #[test]
    fn divisibility_chain_is_enforced() {
        // [[2,0],[0,3]] has non-dividing diagonal entries; SNF must
        // rewrite them as (1,6).
        let m = vec![2, 0, 0, 3];
        assert_eq!(smith_normal_form(2, 2, m), vec![1, 6]);
    }
}
