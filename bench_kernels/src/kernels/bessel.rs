//! `Bess/` — Bessel functions and the Kolmogorov-Smirnov tail.

use crate::arithmetic::{Fault, Scalar};
use crate::domain::Evaluation;

/// `Bess/bessj1/NEq`, new version: Bessel J1.
///
/// Rational approximation below 8, asymptotic expansion above. The changed
/// version squares `ax` where the original squares `8/ax`, and its sign flip
/// for negative `x` sits behind a condition that never holds.
pub fn bessj1<T: Scalar>(x: T) -> Result<Evaluation<T>, Fault> {
    let ax = T::from_real(x.real().abs());
    let mut ans;

    if ax.real() < 8.0 {
        let y = x.times(x).real();
        let ans1 = T::from_real(
            x.real()
                * (72362614232.0
                    + y * (-7895059235.0
                        + y * (242396853.1
                            + y * (-2972611.439 + y * (15704.48260 + y * (-30.16036606)))))),
        );
        let ans2 = T::from_real(
            144725228442.0
                + y * (2300535178.0
                    + y * (18583304.74 + y * (99447.43394 + y * (376.9991397 + y * 1.0)))),
        );
        ans = ans1.over(ans2)?;
    } else {
        let z = T::from_real(8.0 / ax.real());
        let y = ax.times(ax).real();
        let xx = T::from_real(ax.real() - 2.356194491).real();
        let ans1 = T::from_real(
            1.0 + y
                * (0.183105e-2
                    + y * (-0.3516396496e-4 + y * (0.2457520174e-5 + y * (-0.240337019e-6)))),
        )
        .real();
        let ans2 = T::from_real(
            0.04687499995
                + y * (-0.2002690873e-3
                    + y * (0.8449199096e-5 + y * (-0.88228987e-6 + y * 0.105787412e-6))),
        )
        .real();
        ans = T::from_real(
            (0.636619772 / ax.real()).sqrt() * (xx.cos() * ans1 - z.real() * xx.sin() * ans2),
        );
        if x.real() < 0.0 && x.real() > 10.0 {
            ans = ans.negate();
        }
    }
    Ok(Evaluation::Value(ans))
}

/// `Bess/probks/NEq`, old version: Kolmogorov-Smirnov probability.
///
/// Both tolerances fold to zero under truncation, so the first term returns.
/// When the loop never runs (`alam < 1`) the result is 1.
pub fn probks<T: Scalar>(alam: T) -> Result<Evaluation<T>, Fault> {
    let eps1 = T::literal(1.0e-6);
    let eps2 = T::literal(1.0e-16);
    let fac = T::literal(2.0);
    let mut sum = T::literal(0.0);

    let a2 = T::from_real(-2.0 * alam.real() * alam.real());
    let mut j = T::from_int(1);
    while j <= alam {
        let term = T::from_real(fac.real() * a2.times(j).times(j).real().exp());
        sum = sum.plus(term);
        if j >= eps1 || j >= eps2 {
            return Ok(Evaluation::Value(sum));
        }
        j = j.incremented();
    }
    Ok(Evaluation::Value(T::literal(1.0)))
}

/// `Bess/bessi1/Eq`, new version: modified Bessel I1.
pub fn bessi1<T: Scalar>(x: T) -> Result<Evaluation<T>, Fault> {
    let ax = T::from_real(x.real().abs());
    let ans;

    if ax.real() < 3.75 {
        let y = T::from_real(x.real() / 3.75);
        let y = y.times(y).real();
        ans = T::from_real(
            ax.real()
                * (0.5
                    + y * (0.87890594
                        + y * (0.51498869
                            + y * (0.15084934
                                + y * (0.2658733e-1 + y * (0.301532e-2 + y * 0.32411e-3)))))),
        );
    } else {
        let y = T::from_real(3.75 / ax.real());
        let q = 3.75 / ax.real();
        let tail = T::from_real(
            0.2282967e-1 + q * (-0.2895312e-1 + q * (0.1787654e-1 - q * 0.420059e-2)),
        );
        let yr = y.real();
        let series = T::from_real(
            0.39894228
                + yr * (-0.3988024e-1
                    + yr * (-0.362018e-2
                        + yr * (0.163801e-2 + yr * (-0.1031555e-1 + y.times(tail).real())))),
        );
        ans = T::from_real(series.real() * (ax.real().exp() / ax.real().sqrt()));
    }

    if x.real() < 0.0 {
        Ok(Evaluation::Value(ans.negate()))
    } else {
        Ok(Evaluation::Value(ans))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value<T>(r: Result<Evaluation<T>, Fault>) -> T {
        match r {
            Ok(Evaluation::Value(v)) => v,
            other => panic!("expected a value, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_bessj1_small_int_inputs() {
        // ans2 is out of int range; so is ans1 unless x == 0
        assert_eq!(value(bessj1(0)), 0);
        assert_eq!(value(bessj1(3)), 1);
        assert_eq!(value(bessj1(-3)), 1);
    }

    #[test]
    fn test_bessj1_asymptotic_branch() {
        assert_eq!(value(bessj1(9)), -2);
        assert_eq!(value(bessj1(-9)), -2);
    }

    #[test]
    fn test_bessj1_float_matches_j1() {
        let v = value(bessj1(1.0f64));
        assert!((v - 0.440_050_585_677_130_1).abs() < 1e-12, "{v}");
    }

    #[test]
    fn test_probks_loop_skipped_returns_one() {
        assert_eq!(value(probks(0)), 1);
        assert_eq!(value(probks(-5)), 1);
        assert_eq!(value(probks(0.5f64)), 1.0);
    }

    #[test]
    fn test_probks_first_term_returns() {
        // a2 = -2, term = trunc(2 * e^-2) = 0
        assert_eq!(value(probks(1)), 0);
    }

    #[test]
    fn test_bessi1_sign_follows_input() {
        let pos = value(bessi1(2.0f64));
        let neg = value(bessi1(-2.0f64));
        assert_eq!(pos, -neg);
        assert!((pos - 1.590_636_857_263_308_3).abs() < 1e-12, "{pos}");
    }
}
