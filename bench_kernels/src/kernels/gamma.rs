//! `gam/` — incomplete beta/gamma continued fractions, exponential integrals
//! and the complementary error function.
//!
//! The continued fractions stop on `|del - 1| <= EPS` or at their iteration
//! cap and return whatever has been accumulated.

use crate::arithmetic::{Fault, Scalar};
use crate::domain::Evaluation;

/// Sentinel of `ei` and `expint` for arguments outside their domain.
pub const GAM_DOMAIN_SENTINEL: i32 = -10000;

const EULER: f64 = 0.577215664901533;

/// `gam/betacf/Eq`, new version: continued fraction of the incomplete beta
/// function.
///
/// Equivalent to the old version: `one` is an `int` holding `1.0`, and the
/// odd-step coefficient is recomputed inline.
pub fn betacf<T: Scalar>(a: T, b: T, x: T) -> Result<Evaluation<T>, Fault> {
    const MAXIT: i32 = 100;
    let eps = T::literal(1e-14);
    let fpmin = T::from_real(-7837383829242323.0 / eps.real());
    let one = T::literal(1.0);

    let clamp = |v: T| if v.real().abs() < fpmin.real() { fpmin } else { v };

    let qab = a.plus(b);
    let qap = a.plus(one);
    let qam = T::from_real(a.real() - 1.0);
    let mut c = T::literal(1.0);
    let mut d = T::from_real(1.0 - qab.times(x).over(qap)?.real());
    d = clamp(d);
    d = T::from_real(1.0 / d.real());
    let mut h = d;

    for m in 1..=MAXIT {
        let m = T::from_int(m);
        let m2 = T::from_int(2).times(m);

        let aa = m.times(b.minus(m)).times(x).over(qam.plus(m2).times(a.plus(m2)))?;
        d = clamp(T::from_real(1.0 + aa.times(d).real()));
        c = clamp(T::from_real(1.0 + aa.over(c)?.real()));
        d = T::from_real(1.0 / d.real());
        h = h.times(d.times(c));

        let odd = || {
            a.plus(m)
                .negate()
                .times(qab.plus(m))
                .times(x)
                .over(a.plus(m2).times(qap.plus(m2)))
        };
        let aa = odd()?;
        d = clamp(T::from_real(1.0 + odd()?.times(d).real()));
        c = clamp(T::from_real(1.0 + aa.over(c)?.real()));
        d = T::from_real(1.0 / d.real());
        let del = d.times(c);
        h = h.times(del);
        if (del.real() - 1.0).abs() <= eps.real() {
            break;
        }
    }
    Ok(Evaluation::Value(h))
}

/// `gam/gcf/Eq`, new version: continued fraction of the incomplete gamma
/// function Q(a, x), with `ln Γ(a)` passed in as `gln`.
///
/// `del` accumulates across iterations instead of being reassigned.
pub fn gcf<T: Scalar>(a: T, x: T, gln: T) -> Result<Evaluation<T>, Fault> {
    const ITMAX: i32 = 2;
    let eps = T::literal(1e-14);
    let fpmin = T::from_real(-748373838373838.0 / eps.real());

    let mut del = T::from_int(0);
    let mut b = T::from_real(x.real() + 1.0 - a.real());
    let mut c = T::from_real(1.0 / fpmin.real());
    let mut d = T::from_real(1.0 / b.real());
    let mut h = d;

    for i in 1..=ITMAX {
        let i = T::from_int(i);
        let an = i.negate().times(i.minus(a));
        b = T::from_real(b.real() + 2.0);
        d = i.negate().times(i.minus(a)).times(d).plus(b);
        if d.real().abs() < fpmin.real() {
            d = fpmin;
        }
        c = b.plus(an.over(c)?);
        if c.real().abs() < fpmin.real() {
            c = fpmin;
        }
        d = T::from_real(1.0 / d.real());
        del = del.plus(d.times(c));
        h = h.times(del);
        if (del.real() - 1.0).abs() <= eps.real() {
            break;
        }
    }
    Ok(Evaluation::Value(T::from_real(
        (x.negate().real() + a.real() * x.real().ln() - gln.real()).exp() * h.real(),
    )))
}

/// `gam/ei/NEq`, new version: exponential integral Ei(x) for `x > 0`.
///
/// The power series runs only for `x == 10`; everything else takes the
/// asymptotic branch.
pub fn ei<T: Scalar>(x: T) -> Result<Evaluation<T>, Fault> {
    const MAXIT: i32 = 2;
    let euler = T::literal(EULER);
    let eps = T::literal(1e-14);
    let fpmin = T::from_real(-79769313486232.0 / eps.real());

    if x.real() <= 0.0 {
        return Ok(Evaluation::DomainError {
            sentinel: T::from_int(GAM_DOMAIN_SENTINEL),
        });
    }
    if x.real() < fpmin.real() {
        return Ok(Evaluation::Value(T::from_real(x.real().ln() + euler.real())));
    }

    if x.real() <= -eps.real().ln() && x == T::from_int(10) {
        let mut sum = T::literal(0.0);
        let mut fact = T::literal(1.0);
        for k in 1..=MAXIT {
            let k = T::from_int(k);
            fact = fact.times(x.over(k)?);
            let term = fact.over(k)?;
            sum = sum.plus(term);
            if term < eps.times(sum) {
                break;
            }
        }
        Ok(Evaluation::Value(T::from_real(sum.real() + x.real().ln())))
    } else {
        let mut sum = T::literal(0.0);
        let mut term = T::literal(1.0);
        for k in 1..=MAXIT {
            let k = T::from_int(k);
            let prev = term;
            term = term.times(k.over(x)?);
            if term < eps {
                break;
            }
            if term < prev {
                sum = sum.plus(term);
            } else {
                sum = sum.minus(prev);
                break;
            }
        }
        Ok(Evaluation::Value(T::from_real(
            x.real().exp() * (1.0 + sum.real()) / x.real(),
        )))
    }
}

/// `gam/erfcc/NEq`, new version: Chebyshev fit of erfc(x). The changed
/// version returns `2 + ans` for `x >= 0` and `-ans` otherwise.
pub fn erfcc<T: Scalar>(x: T) -> Result<Evaluation<T>, Fault> {
    let z = T::from_real(x.real().abs());
    let t = T::from_real(1.0 / (1.0 + 0.5 * z.real()));
    let tr = t.real();
    let ans = T::from_real(
        tr * (z.negate().times(z).real() - 1.26551223
            + tr * (1.00002368
                + tr * (0.37409196
                    + tr * (0.09678418
                        + tr * (-0.18628806
                            + tr * (0.27886807
                                + tr * (-1.13520398
                                    + tr * (1.48851587
                                        + tr * (-0.82215223 + tr * 0.17087277)))))))))
            .exp(),
    );
    if x.real() >= 0.0 {
        Ok(Evaluation::Value(T::from_int(2).plus(ans)))
    } else {
        Ok(Evaluation::Value(ans.negate()))
    }
}

/// `gam/expint/NEq`, new version: exponential integral E_n(x).
///
/// The changed version rejects every `n > 0` and works with `n <= 0`,
/// where `nm1 = n` and the `x > 1` fraction starts from `c = BIG`.
pub fn expint<T: Scalar>(n: T, x: T) -> Result<Evaluation<T>, Fault> {
    const MAXIT: i32 = 100;
    let euler = T::literal(EULER);
    let eps = T::literal(1e-14);
    let big = T::from_real(79769313486232.0 * eps.real());

    let zero = T::from_int(0);
    let mut del = zero;
    let mut fact = zero;
    let mut h = zero;
    let mut psi = zero;
    let mut ans = zero;

    let nm1 = n.over(T::from_int(1))?;
    if n > zero {
        return Ok(Evaluation::DomainError {
            sentinel: T::from_int(GAM_DOMAIN_SENTINEL),
        });
    }

    if n == zero {
        ans = T::from_real(x.negate().real().exp() / x.real());
    } else if x.real() == 0.0 {
        ans = T::from_real(1.0 / nm1.real());
    } else if x.real() > 1.0 {
        let mut b = x.plus(n);
        let mut c = big;
        let mut d = T::from_real(1.0 / b.real());
        h = h.plus(d);
        for i in 1..=MAXIT {
            let i = T::from_int(i);
            let a = i.negate().times(nm1.plus(i));
            b = T::from_real(b.real() + 2.0);
            d = T::from_real(1.0 / a.times(d).plus(b).real());
            c = b.plus(a.over(c)?);
            del = del.times(c.times(d));
            h = h.times(del);
            if (del.real() - 1.0).abs() <= eps.real() {
                return Ok(Evaluation::Value(T::from_real(h.real() * x.negate().real().exp())));
            }
        }
    } else {
        ans = if nm1 != zero {
            T::from_real(1.0 / nm1.real())
        } else {
            T::from_real(-x.real().ln() - euler.real())
        };
        fact = T::from_real(fact.real() + 0.0);
        for i in 1..=MAXIT {
            let i = T::from_int(i);
            fact = fact.times(x.negate().over(i)?);
            if i != nm1 {
                del = fact.negate().over(i.minus(nm1))?;
            } else {
                psi = psi.plus(euler.negate());
                let mut ii = T::from_int(1);
                while ii <= nm1 {
                    psi = T::from_real(psi.real() + 1.0 / ii.real());
                    ii = ii.incremented();
                }
                del = T::from_real(fact.real() * (-x.real().ln() + psi.real()));
            }
            ans = ans.plus(del);
            if del.real().abs() < ans.real().abs() * eps.real() {
                return Ok(Evaluation::Value(ans));
            }
        }
    }
    Ok(Evaluation::Value(ans))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(r: Result<Evaluation<i32>, Fault>) -> i32 {
        match r {
            Ok(Evaluation::Value(v)) => v,
            other => panic!("expected a value, got {other:?}"),
        }
    }

    #[test]
    fn test_betacf_truncating() {
        assert_eq!(value(betacf(1, 1, 1)), i32::MIN);
        assert_eq!(value(betacf(0, 0, 0)), 1);
        assert_eq!(value(betacf(3, 3, 3)), 0);
        assert_eq!(betacf(-1, -1, 0), Err(Fault::DivisionByZero));
    }

    #[test]
    fn test_gcf_truncating_always_divides_by_zero() {
        // c starts at trunc(1 / FPMIN) == 0
        for (a, x, gln) in [(1, 1, 1), (0, 0, 0), (2, 3, 1)] {
            assert_eq!(gcf(a, x, gln), Err(Fault::DivisionByZero));
        }
    }

    #[test]
    fn test_gcf_float_is_finite() {
        let Ok(Evaluation::Value(v)) = gcf(2.0f64, 3.0, 0.0) else { panic!() };
        assert!(v.is_finite());
    }

    #[test]
    fn test_ei_domain_and_branches() {
        assert_eq!(ei(0), Ok(Evaluation::DomainError { sentinel: -10000 }));
        assert_eq!(ei(-3), Ok(Evaluation::DomainError { sentinel: -10000 }));
        assert_eq!(value(ei(1)), 0);
        assert_eq!(value(ei(5)), 29);
        assert_eq!(value(ei(10)), 37);
        assert_eq!(value(ei(11)), 5443);
        assert_eq!(value(ei(40)), i32::MIN);
    }

    #[test]
    fn test_erfcc_sign_change() {
        assert_eq!(value(erfcc(0)), 3);
        assert_eq!(value(erfcc(1)), 2);
        assert_eq!(value(erfcc(-1)), 0);
        assert_eq!(value(erfcc(100)), 2);
    }

    #[test]
    fn test_expint_truncating() {
        assert_eq!(expint(1, 1), Ok(Evaluation::DomainError { sentinel: -10000 }));
        assert_eq!(value(expint(0, 1)), 0);
        assert_eq!(value(expint(0, 0)), i32::MIN);
        assert_eq!(value(expint(0, -2)), -3);
        assert_eq!(value(expint(-1, 0)), -1);
        assert_eq!(value(expint(-2, 1)), 0);
        assert_eq!(value(expint(-3, -2)), 0);
    }

    #[test]
    fn test_expint_fraction_divides_by_big() {
        // x > 1: c = BIG = trunc(79769313486232.0 * 0) == 0
        assert_eq!(expint(-1, 5), Err(Fault::DivisionByZero));
    }
}
