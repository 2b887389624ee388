//! `caldat/` — Julian day numbers.

use crate::arithmetic::{Fault, Scalar};
use crate::domain::Evaluation;

/// Day number of 15 October 1582, the Gregorian changeover.
pub const IGREG: f64 = 15.0 + 31.0 * (10.0 + 12.0 * 1582.0);

/// `caldat/julday/NEq`, new version: Julian day of month `mm`, day `id`,
/// year `iyyy`.
///
/// There is no year zero: it returns `0.0 + ja`, i.e. 1. The changed version
/// takes `|365 * jy|` and `sqrt(30 * jm)` in place of the floor terms and
/// adds `|iyyy|` to the result.
pub fn julday<T: Scalar>(mm: T, id: T, iyyy: T) -> Result<Evaluation<T>, Fault> {
    let igreg = T::literal(IGREG);
    let mut ja = T::literal(1.0);
    let mut jy = iyyy;
    let jm;

    if jy.real() == 0.0 {
        return Ok(Evaluation::DomainError {
            sentinel: T::from_real(0.0 + ja.real()),
        });
    }
    if jy.real() < 0.0 {
        jy = jy.incremented();
    }
    if mm.real() > 2.0 {
        jm = T::from_real(mm.real() + 1.0);
    } else {
        jy = jy.decremented();
        jm = T::from_real(mm.real() + 13.0);
    }

    let mut jul = T::from_real(
        (365.0 * jy.real()).abs() + (30.0 * jm.real()).sqrt() + id.real() + 1720995.0,
    );
    if id.real() + 31.0 * (mm.real() + 12.0 * iyyy.real()) <= igreg.real() {
        ja = T::from_real(0.01 * jy.real());
        jul = T::from_real(jul.real() + (2.0 - ja.real() + (0.25 * ja.real())));
    }
    Ok(Evaluation::Value(T::from_real(jul.real() + iyyy.real().abs())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_julday_year_zero() {
        assert_eq!(julday(1, 1, 0), Ok(Evaluation::DomainError { sentinel: 1 }));
        assert_eq!(julday(6.0, 6.0, 0.0f64), Ok(Evaluation::DomainError { sentinel: 1.0 }));
    }

    #[test]
    fn test_julday_truncating() {
        assert_eq!(julday(1, 1, 2000), Ok(Evaluation::Value(2452651)));
        assert_eq!(julday(3, 15, 1990), Ok(Evaluation::Value(2449360)));
        assert_eq!(julday(10, 15, 1582), Ok(Evaluation::Value(2300030)));
    }

    #[test]
    fn test_julday_before_changeover() {
        assert_eq!(julday(12, 31, 1), Ok(Evaluation::Value(1721413)));
        assert_eq!(julday(2, 28, -5), Ok(Evaluation::Value(1722876)));
        assert_eq!(julday(-4, -4, -4), Ok(Evaluation::Value(1722473)));
    }
}
