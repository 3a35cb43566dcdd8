// src/version/compare.rs

//! Debian fragment comparison
//!
//! Upstream versions and revisions are compared by alternately consuming a
//! run of non-digits and a run of digits from both strings:
//!
//! - Non-digit runs compare character by character. `~` sorts before
//!   anything, even the end of the string, and letters sort before all
//!   other characters.
//! - Digit runs compare numerically. An empty run counts as zero.
//!
//! This makes `1.0~rc1 < 1.0 < 1.0a < 1.0+b1 < 1.0.1`.

use std::cmp::Ordering;

/// Sort weight of a single non-digit position (`None` is end of run)
fn weight(c: Option<u8>) -> i32 {
    match c {
        None => 0,
        Some(b'~') => -1,
        Some(c) if c.is_ascii_alphabetic() => i32::from(c),
        Some(c) => i32::from(c) + 256,
    }
}

fn split_digits(s: &[u8]) -> (&[u8], &[u8]) {
    let end = s.iter().position(|c| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

/// Compare two digit runs without parsing them, so arbitrarily long runs
/// cannot overflow.
fn compare_numeric(a: &[u8], b: &[u8]) -> Ordering {
    let trim = |s: &[u8]| -> usize { s.iter().position(|&c| c != b'0').unwrap_or(s.len()) };
    let a = &a[trim(a)..];
    let b = &b[trim(b)..];
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Compare two upstream or revision fragments using Debian ordering
pub(crate) fn compare_fragment(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    let mut a = a.as_bytes();
    let mut b = b.as_bytes();

    while !a.is_empty() || !b.is_empty() {
        loop {
            let ca = a.first().copied().filter(|c| !c.is_ascii_digit());
            let cb = b.first().copied().filter(|c| !c.is_ascii_digit());
            if ca.is_none() && cb.is_none() {
                break;
            }

            match weight(ca).cmp(&weight(cb)) {
                Ordering::Equal => {
                    a = &a[1..];
                    b = &b[1..];
                }
                other => return other,
            }
        }

        let (na, rest_a) = split_digits(a);
        let (nb, rest_b) = split_digits(b);
        match compare_numeric(na, nb) {
            Ordering::Equal => {
                a = rest_a;
                b = rest_b;
            }
            other => return other,
        }
    }

    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_runs() {
        assert_eq!(compare_fragment("1.0.0", "1.0.0"), Ordering::Equal);
        assert_eq!(compare_fragment("2.0.0", "10.0.0"), Ordering::Less);
        assert_eq!(compare_fragment("1.00", "1.0"), Ordering::Equal);
        assert_eq!(compare_fragment("1.0.1", "1.0"), Ordering::Greater);
        assert_eq!(
            compare_fragment("1.99999999999999999999999", "1.100000000000000000000000"),
            Ordering::Less
        );
    }

    #[test]
    fn test_tilde_sorts_first() {
        assert_eq!(compare_fragment("1.0~rc1", "1.0"), Ordering::Less);
        assert_eq!(compare_fragment("1.0~~", "1.0~"), Ordering::Less);
        assert_eq!(compare_fragment("1.0~rc1", "1.0~rc2"), Ordering::Less);
    }

    #[test]
    fn test_letters_before_symbols() {
        assert_eq!(compare_fragment("1.0a", "1.0+"), Ordering::Less);
        assert_eq!(compare_fragment("1.0a", "1.0"), Ordering::Greater);
        assert_eq!(compare_fragment("1ubuntu1", "1"), Ordering::Greater);
        assert_eq!(compare_fragment("1ubuntu1", "2"), Ordering::Less);
    }

    #[test]
    fn test_empty_fragments() {
        assert_eq!(compare_fragment("", ""), Ordering::Equal);
        assert_eq!(compare_fragment("", "0"), Ordering::Equal);
        assert_eq!(compare_fragment("", "1"), Ordering::Less);
        assert_eq!(compare_fragment("~", ""), Ordering::Less);
    }
}
