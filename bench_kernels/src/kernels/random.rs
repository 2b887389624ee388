//! `Ran/` — Park-Miller minimal standard generators and log-gamma.
//!
//! The benchmark programs keep generator state in function-local statics.
//! Here it lives in an explicit [`RanGenerator`] value owned by the caller.

use crate::arithmetic::{Fault, Scalar};
use crate::domain::Evaluation;

/// Multiplier of the minimal standard LCG.
pub const IA: i32 = 16807;
/// Modulus, 2^31 - 1.
pub const IM: i32 = 2_147_483_647;
/// Schrage decomposition of `IM`: `IM = IA * IQ + IR`.
pub const IQ: i32 = 127_773;
pub const IR: i32 = 2836;
/// XOR mask of `ran0`, applied here as a multiplier.
pub const MASK: i32 = 123_459_876;
/// Shuffle table length of `ran1`.
pub const NTAB: i32 = 32;

/// One Schrage step: `IA * (idum - k * IQ) - IR * k`.
fn schrage_step<T: Scalar>(idum: T, k: T) -> T {
    T::from_int(IA)
        .times(idum.minus(k.times(T::from_int(IQ))))
        .minus(T::from_int(IR).times(k))
}

/// State of the `ran` generator between draws.
///
/// A fresh generator has `iy == 0` and runs the shuffle warm-up on its
/// first draw, which is what every one-shot benchmark run does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RanGenerator<T> {
    idum: T,
    iy: T,
}

impl<T: Scalar> RanGenerator<T> {
    pub fn seeded(idum: T) -> Self {
        Self {
            idum,
            iy: T::from_int(0),
        }
    }

    pub fn idum(&self) -> T {
        self.idum
    }

    pub fn iy(&self) -> T {
        self.iy
    }

    /// `Ran/ran/NEq`, new version. State is only committed when the draw
    /// completes without a fault.
    pub fn draw(&mut self) -> Result<T, Fault> {
        let zero = T::from_int(0);
        let im = T::from_int(IM);
        let iq = T::from_int(IQ);
        let ntab = T::from_int(NTAB);
        let ndiv = T::from_int(1).plus(im.minus(T::from_int(1)).over(ntab)?);
        let eps = T::literal(3.0e-16);
        let am = T::from_real(1.0 / im.real());
        let rnmx = T::from_real(1.0 - eps.real());

        let mut idum = self.idum;
        let mut iy = self.iy;

        if idum <= zero || iy == zero {
            let flipped = idum.negate();
            idum = if flipped < T::from_int(1) { T::from_int(1) } else { flipped };
            let mut iv0 = zero;
            let mut j = ntab.plus(T::from_int(7));
            while j >= zero {
                let k = idum.over(iq)?;
                idum = schrage_step(idum, k);
                if idum < zero {
                    idum = idum.plus(im);
                }
                if j < ntab {
                    iv0 = idum;
                }
                j = j.decremented();
            }
            iy = iv0;
        }

        let k = idum.over(iq)?;
        idum = schrage_step(idum, k);
        if idum < zero && idum > T::from_int(100) {
            idum = idum.plus(im);
        }
        iy = iy.over(idum)?;

        self.idum = idum;
        self.iy = iy;

        let temp = am.times(iy);
        Ok(if temp > ndiv { temp } else { rnmx })
    }
}

/// One-shot `ran`: a fresh generator, one draw.
pub fn ran<T: Scalar>(idum: T) -> Result<Evaluation<T>, Fault> {
    RanGenerator::seeded(idum).draw().map(Evaluation::Value)
}

/// `Ran/ranzero/Eq`, new version: one masked LCG step, scaled by `1/IM`.
///
/// Equivalent to the old version: the quotient is recomputed inline instead
/// of reusing `k`.
pub fn ranzero_eq<T: Scalar>(idum: T) -> Result<Evaluation<T>, Fault> {
    let iq = T::from_int(IQ);
    let am = T::from_real(1.0 / f64::from(IM));

    let idum = idum.times(T::from_int(MASK));
    let k = idum.over(iq)?;
    let inline = idum.over(iq)?;
    let mut idum = T::from_int(IA)
        .times(idum.minus(inline.times(iq)))
        .minus(T::from_int(IR).times(k));
    if idum < T::from_int(0) {
        idum = idum.plus(T::from_int(IM));
    }
    Ok(Evaluation::Value(am.times(idum)))
}

/// `Ran/ranzero/NEq`, new version: as [`ranzero_eq`] with `IA` added to the
/// result.
pub fn ranzero_neq<T: Scalar>(idum: T) -> Result<Evaluation<T>, Fault> {
    let am = T::from_real(1.0 / f64::from(IM));

    let idum = idum.times(T::from_int(MASK));
    let k = idum.over(T::from_int(IQ))?;
    let mut idum = schrage_step(idum, k);
    if idum < T::from_int(0) {
        idum = idum.plus(T::from_int(IM));
    }
    Ok(Evaluation::Value(am.times(idum).plus(T::from_int(IA))))
}

const GAMMLN_COF: [f64; 6] = [
    76.18009172947146,
    -86.50532032941677,
    24.01409824083091,
    -1.231739572450155,
    0.1208650973866179e-2,
    -0.5395239384953e-5,
];

/// `Ran/gammln/NEq`, old version: Lanczos log-gamma with `sqrt` in place
/// of `log` on the final term.
pub fn gammln<T: Scalar>(xx: T) -> Result<Evaluation<T>, Fault> {
    let x = xx;
    let mut y = x;
    let mut tmp = T::from_real(x.real() + 5.5);
    tmp = T::from_real(tmp.real() - ((x.real() + 0.5) + tmp.real().sqrt()));

    let mut ser = T::literal(1.000000000190015);
    for cof in GAMMLN_COF {
        y = y.incremented();
        ser = ser.plus(T::literal(cof).over(y)?);
    }
    Ok(Evaluation::Value(T::from_real(
        tmp.negate().real() + (2.5066282746310005 * ser.real() / x.real()).sqrt(),
    )))
}
