//! `power/` — a toy path-classification kernel.

use crate::arithmetic::{Fault, Scalar};
use crate::domain::Evaluation;

/// `power/test/Eq`, new version.
///
/// For `x > 0` the result encodes two decisions: whether `y == x * x`
/// (3/4 when it does, 13/14 when it does not) and whether `-y < -8`
/// (3/13 when it is, 4/14 when it is not). Non-positive `x` gives 0.
///
/// The compiled program tests `-y < -8` as `y > 8`, so `y == i32::MIN`
/// (whose negation wraps) lands in the 4/14 branch.
pub fn power<T: Scalar>(x: T, y: T) -> Result<Evaluation<T>, Fault> {
    let zero = T::from_int(0);
    if x <= zero {
        return Ok(Evaluation::Value(zero));
    }

    let square = y == x.times(x);
    let result = if y > T::from_int(8) {
        if square { 3 } else { 13 }
    } else if square {
        4
    } else {
        14
    };
    Ok(Evaluation::Value(T::from_int(result)))
}
