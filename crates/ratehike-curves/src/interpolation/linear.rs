//! Piecewise-linear slopes.

use super::PillarTable;

/// Recomputes the chord slopes touched by `updated`, or all of them.
///
/// The last populated pillar always carries a zero slope.
pub(super) fn recompute(table: &mut PillarTable, updated: Option<usize>) {
    let n = table.n_set;
    match updated {
        Some(p) => {
            if p >= 1 {
                table.slopes[p - 1] = table.secant(p - 1);
            }
            table.slopes[p] = if p + 1 < n { table.secant(p) } else { 0.0 };
        }
        None => {
            for i in 0..n {
                table.slopes[i] = if i + 1 < n { table.secant(i) } else { 0.0 };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(values: &[f64]) -> PillarTable {
        let n = values.len();
        PillarTable {
            times: (0..n).map(|i| i as f64 * 0.5).collect(),
            values: values.to_vec(),
            slopes: vec![0.0; n],
            n_set: n,
            ..PillarTable::default()
        }
    }

    #[test]
    fn test_full_recompute() {
        let mut t = table(&[0.0, -0.01, -0.03]);
        recompute(&mut t, None);
        assert_eq!(t.slopes, vec![-0.02, -0.04, 0.0]);
    }

    #[test]
    fn test_growing_last_pillar() {
        let mut t = table(&[0.0, -0.01, -0.03]);
        t.n_set = 2;
        recompute(&mut t, None);
        assert_eq!(t.slopes[1], 0.0);

        t.n_set = 3;
        recompute(&mut t, Some(2));
        assert_eq!(t.slopes, vec![-0.02, -0.04, 0.0]);
    }
}
