//! `Ell/` — Carlson's degenerate elliptic integral and associated Legendre
//! polynomials.

use crate::arithmetic::{Fault, Scalar};
use crate::domain::{Evaluation, Semantics};

/// Sweeps allowed for the duplication loop of [`rc`] before giving up.
pub const RC_MAX_SWEEPS: u32 = 1 << 20;

/// Terms each [`plgndr`] loop may run under `f64` before giving up. Past
/// 2^53 the loop counter stops moving, so huge `l` or `m` never finish.
pub const PLGNDR_MAX_TERMS: u32 = 1 << 20;

/// Sentinel returned by [`rc`] for arguments outside its domain.
pub const RC_DOMAIN_SENTINEL: i32 = -10000;

/// `Ell/rc/NEq`, old version: Carlson's R_C(x, y).
///
/// The duplication loop has no cap of its own. Under truncation every
/// tolerance folds to zero and the loop divides by a zero average on its
/// first sweep; under `f64` it is bounded by [`RC_MAX_SWEEPS`].
pub fn rc<T: Scalar>(x: T, y: T) -> Result<Evaluation<T>, Fault> {
    let errtol = T::literal(0.0012);
    let tiny = T::literal(1.69e-38);
    let big = T::literal(3.0e37);
    let third = T::literal(1.0 / 3.0);
    let c1 = T::literal(0.32);
    let c2 = T::literal(1.0 / 7.0);
    let c3 = T::literal(0.375);
    let c4 = T::literal(9.0 / 22.0);

    let zero = T::from_int(0);
    let (mut alamb, mut ave, mut w, mut xt, mut yt) = (zero, zero, zero, zero, zero);
    let mut s;

    let reach = x.real() + y.real().abs();
    if x.real() < 0.0 || y.real() == 0.0 || reach < tiny.real() || reach > big.real() {
        return Ok(Evaluation::DomainError {
            sentinel: T::from_int(RC_DOMAIN_SENTINEL),
        });
    }

    if y.real() > 0.0 {
        xt = xt.plus(x);
        yt = yt.plus(y);
        w = T::from_real(w.real() + 1.0);
    } else {
        xt = xt.plus(x.minus(y));
        yt = yt.plus(y.negate());
        w = T::from_real(w.real() + x.real().sqrt() / xt.real().sqrt());
    }

    let mut sweeps = 0u32;
    loop {
        if sweeps == RC_MAX_SWEEPS {
            return Err(Fault::NoConvergence { iterations: sweeps });
        }
        sweeps += 1;

        alamb = T::from_real(alamb.real() * (2.0 * xt.real().sqrt() * yt.real().sqrt() + yt.real()));
        xt = T::from_real(0.25 * xt.plus(alamb).real());
        yt = T::from_real(0.25 * yt.plus(alamb).real());
        ave = ave.plus(third.times(xt.times(yt).times(yt)));
        s = yt.minus(ave).over(ave)?;
        // NaN leaves the loop, like the C `while (fabs(s) > ERRTOL)`.
        if s.real().abs() > errtol.real() {
            continue;
        }
        break;
    }

    let poly = s
        .times(s)
        .times(c1.plus(s.times(c2.plus(s.times(c3.plus(s.times(c4)))))));
    Ok(Evaluation::Value(T::from_real(w.real() * (1.0 + poly.real()))))
}

/// `Ell/plgndr/NEq`, new version: associated Legendre polynomial P_l^m(x).
///
/// Invalid `(l, m, x)` returns 0. The changed version adds `|fact|` to the
/// diagonal case and `2 * fact` to the recurrence result.
///
/// Under truncation both loops run exactly as compiled. Under `f64` each is
/// bounded by [`PLGNDR_MAX_TERMS`].
pub fn plgndr<T: Scalar>(l: T, m: T, x: T) -> Result<Evaluation<T>, Fault> {
    let budget = match T::SEMANTICS {
        Semantics::Truncating => None,
        Semantics::Float => Some(PLGNDR_MAX_TERMS),
    };
    let zero = T::from_int(0);
    let one = T::from_int(1);
    let two = T::from_int(2);
    let mut fact = one;
    let mut pll = zero;

    if m < zero || m > l || x.real().abs() > 1.0 {
        return Ok(Evaluation::DomainError { sentinel: zero });
    }

    let mut pmm = T::literal(1.0);
    if m > zero {
        let somx2 = T::from_real(((1.0 - x.real()) * (1.0 + x.real())).sqrt());
        fact = T::literal(1.0);
        let mut i = one;
        let mut terms = 0u32;
        while i <= m {
            spend_term(&mut terms, budget)?;
            pmm = pmm.times(fact.negate().times(somx2));
            fact = T::from_real(fact.real() + 2.0);
            i = i.incremented();
        }
    }

    if l == m {
        return Ok(Evaluation::Value(T::from_real(pmm.real() + fact.real().abs())));
    }

    let mut pmmp1 = x.times(two.times(m).plus(one)).times(pmm);
    let mut ll = m.plus(two);
    let mut terms = 0u32;
    while ll <= l {
        spend_term(&mut terms, budget)?;
        pll = x
            .times(two.times(ll).minus(one))
            .times(pmmp1)
            .minus(ll.plus(m).minus(one).times(pmm))
            .over(ll.minus(m))?;
        pmm = pmmp1;
        pmmp1 = pll;
        ll = ll.incremented();
    }
    Ok(Evaluation::Value(pll.plus(two.times(fact))))
}

fn spend_term(terms: &mut u32, budget: Option<u32>) -> Result<(), Fault> {
    if Some(*terms) == budget {
        return Err(Fault::NoConvergence { iterations: *terms });
    }
    *terms = terms.saturating_add(1);
    Ok(())
}
