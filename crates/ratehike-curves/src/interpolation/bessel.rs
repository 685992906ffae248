//! Hermite cubic with Bessel tangents.

use super::{PillarTable, SplineCorrection};

/// Bessel tangent at pillar `i` of the populated prefix (`n >= 3`).
///
/// Interior pillars weight the neighbouring secants by the opposite
/// interval length; the two ends use the three-point one-sided estimate.
fn tangent(table: &PillarTable, i: usize) -> f64 {
    let n = table.n_set;
    let (t, a) = (&table.times, &table.values);

    if i == 0 {
        let (t0, t1, t2) = (t[0], t[1], t[2]);
        ((t2 + t1 - 2.0 * t0) * (a[1] - a[0]) / (t1 - t0)
            - (t1 - t0) * (a[2] - a[1]) / (t2 - t1))
            / (t2 - t0)
    } else if i == n - 1 {
        let (t0, t1, t2) = (t[n - 3], t[n - 2], t[n - 1]);
        let (a0, a1, a2) = (a[n - 3], a[n - 2], a[n - 1]);
        ((t2 - t1) * (a1 - a0) / (t1 - t0) - (2.0 * t2 - t1 - t0) * (a2 - a1) / (t2 - t1))
            / (t2 - t0)
    } else {
        let (tm, t0, tp) = (t[i - 1], t[i], t[i + 1]);
        let (am, a0, ap) = (a[i - 1], a[i], a[i + 1]);
        ((tp - t0) * (a0 - am) / (t0 - tm) + (t0 - tm) * (ap - a0) / (tp - t0)) / (tp - tm)
    }
}

/// Solves the quadratic and cubic terms of interval `[i, i + 1]` from its
/// endpoint values and tangents.
fn hermite(table: &mut PillarTable, i: usize) {
    let dt = table.times[i + 1] - table.times[i];
    let m = table.secant(i);
    let (b0, b1) = (table.slopes[i], table.slopes[i + 1]);
    table.quadratic[i] = (3.0 * m - b1 - 2.0 * b0) / dt;
    table.cubic[i] = (-2.0 * m + b1 + b0) / (dt * dt);
}

fn close_terminal(table: &mut PillarTable) {
    let last = table.n_set - 1;
    table.quadratic[last] = 0.0;
    table.cubic[last] = 0.0;
}

/// Recomputes the tangents and interval terms that depend on `updated`,
/// or the whole populated prefix.
pub(super) fn recompute(
    table: &mut PillarTable,
    updated: Option<usize>,
    correction: SplineCorrection,
) {
    let n = table.n_set;
    if n == 0 {
        return;
    }

    // Too few pillars for three-point tangents: take the linear slopes,
    // flat at the last pillar, and fit the cubic between them.
    if n < 3 {
        super::linear::recompute(table, None);
        for i in 0..n - 1 {
            hermite(table, i);
        }
        close_terminal(table);
        correction.apply(table);
        return;
    }

    // Tangent i reads values i-1..=i+1; the end tangents read three
    // values from their own end.
    let tail = updated.map_or(true, |p| p + 4 >= n);
    let mut lo = match updated {
        Some(p) if p > 2 => p - 1,
        _ => 0,
    };
    let hi = match updated {
        Some(p) if !tail => p + 1,
        _ => n - 1,
    };
    if tail {
        lo = lo.min(n - 3);
    }

    for i in lo..=hi {
        table.slopes[i] = tangent(table, i);
    }
    for i in lo.saturating_sub(1)..=hi.min(n - 2) {
        hermite(table, i);
    }
    close_terminal(table);

    if tail {
        correction.apply(table);
    }
}
