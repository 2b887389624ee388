//! `simple_branch_test` — the standalone argv program.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    AboveTen,
    AboveFive,
    AtMostFive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchOutcome {
    pub band: Band,
    pub result: i32,
}

impl fmt::Display for BranchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.band {
            Band::AboveTen => "greater than 10",
            Band::AboveFive => "greater than 5",
            Band::AtMostFive => "less than or equal to 5",
        };
        write!(f, "{label}: {}", self.result)
    }
}

/// `2x` above 10, `x + 10` above 5, `x - 1` otherwise. `int` arithmetic.
pub fn simple_branch(x: i32) -> BranchOutcome {
    if x > 10 {
        BranchOutcome {
            band: Band::AboveTen,
            result: x.wrapping_mul(2),
        }
    } else if x > 5 {
        BranchOutcome {
            band: Band::AboveFive,
            result: x.wrapping_add(10),
        }
    } else {
        BranchOutcome {
            band: Band::AtMostFive,
            result: x.wrapping_sub(1),
        }
    }
}

/// `atoi` as glibc implements it: optional leading whitespace and sign,
/// then decimal digits up to the first non-digit. No digits gives 0. The
/// value saturates to 64 bits and keeps its low 32 bits.
pub fn atoi(arg: &str) -> i32 {
    let s = arg.trim_start_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r'));
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut acc: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        let d = i64::from(b - b'0');
        acc = if negative {
            acc.saturating_mul(10).saturating_sub(d)
        } else {
            acc.saturating_mul(10).saturating_add(d)
        };
    }
    acc as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands() {
        assert_eq!(simple_branch(15).to_string(), "greater than 10: 30");
        assert_eq!(simple_branch(7).to_string(), "greater than 5: 17");
        assert_eq!(simple_branch(3).to_string(), "less than or equal to 5: 2");
        assert_eq!(simple_branch(15).result, 30);
        assert_eq!(simple_branch(7).result, 17);
        assert_eq!(simple_branch(3).result, 2);
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(simple_branch(11).band, Band::AboveTen);
        assert_eq!(simple_branch(10).band, Band::AboveFive);
        assert_eq!(simple_branch(6).band, Band::AboveFive);
        assert_eq!(simple_branch(5).band, Band::AtMostFive);
    }

    #[test]
    fn test_wrapping() {
        assert_eq!(simple_branch(1_073_741_824).result, i32::MIN);
        assert_eq!(simple_branch(i32::MAX).result, -2);
        assert_eq!(simple_branch(i32::MIN).result, i32::MAX);
    }

    #[test]
    fn test_atoi() {
        assert_eq!(atoi("15"), 15);
        assert_eq!(atoi("  -3"), -3);
        assert_eq!(atoi("+8"), 8);
        assert_eq!(atoi("12abc"), 12);
        assert_eq!(atoi("abc"), 0);
        assert_eq!(atoi(""), 0);
        assert_eq!(atoi("-"), 0);
        assert_eq!(atoi("4294967297"), 1);
        assert_eq!(atoi("99999999999999999999"), -1);
    }
}
