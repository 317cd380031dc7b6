//! Melting-temperature estimate for short oligos.
//!
//! Two empirical formulas, chosen by length:
//! - fewer than 14 bases: Wallace rule with a fixed −7 °C correction,
//!   `2·(A+T) + 4·(G+C) − 7`;
//! - 14 bases and up: salt-adjusted GC formula at 0.05 M Na⁺,
//!   `100.5 + 41·(G+C)/N − 820/N + 16.6·log10(0.05)`, with the log term fixed
//!   at −1.3.
//!
//! Dangling ends and mismatches are ignored. Letters other than A/C/G/T/U
//! count towards the length only.

/// Length at which the salt-adjusted formula takes over.
pub const LONG_FORMULA_MIN_LEN: usize = 14;

/// `log10` of the assumed monovalent cation concentration (0.05 M).
pub const LOG10_SALT: f64 = -1.3;

fn base_counts(seq: &[u8]) -> (usize, usize) {
    let mut weak = 0usize;
    let mut strong = 0usize;
    for b in seq {
        match b.to_ascii_uppercase() {
            b'A' | b'T' | b'U' => weak += 1,
            b'G' | b'C' => strong += 1,
            _ => {}
        }
    }
    (weak, strong)
}

/// Estimated duplex melting temperature in °C.
///
/// # Examples
/// ```
/// assert_eq!(cleavetag::tm::melting_temp("AAAAAAAAAAAAA"), 19.0);
/// ```
pub fn melting_temp(seq: &str) -> f64 {
    let bytes = seq.as_bytes();
    let (weak, strong) = base_counts(bytes);
    let n = bytes.len();
    if n < LONG_FORMULA_MIN_LEN {
        (2 * weak + 4 * strong) as f64 - 7.0
    } else {
        let n = n as f64;
        100.5 + 41.0 * strong as f64 / n - 820.0 / n + 16.6 * LOG10_SALT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn short_branch_hand_computed() {
        assert_eq!(melting_temp("AAAAAAAAAAAAA"), 19.0);
        // ACGT: 2 weak, 2 strong → 4 + 8 − 7
        assert_eq!(melting_temp("ACGT"), 5.0);
        assert_eq!(melting_temp("acgu"), 5.0);
        assert_eq!(melting_temp(""), -7.0);
    }

    #[test]
    fn long_branch_hand_computed() {
        // 14 A's: 100.5 + 0 − 820/14 − 21.58
        let expected = 100.5 - 820.0 / 14.0 - 21.58;
        assert!(close(melting_temp("AAAAAAAAAAAAAA"), expected));
        // 20-mer, 10 GC: 100.5 + 20.5 − 41 − 21.58 = 58.42
        assert!(close(melting_temp("ACGTACGTACGTACGTACGT"), 58.42));
    }

    #[test]
    fn thirteen_and_fourteen_use_different_branches() {
        // Both all-GC. Wallace would give 45 and 49; the 14-mer switches formula.
        let t13 = melting_temp("GCGCGCGCGCGCG");
        let t14 = melting_temp("GCGCGCGCGCGCGC");
        assert_eq!(t13, 45.0);
        let expected14 = 100.5 + 41.0 - 820.0 / 14.0 - 21.58;
        assert!(close(t14, expected14));
        assert!(!close(t14, 49.0));
    }

    #[test]
    fn ambiguous_letters_only_count_towards_length() {
        assert_eq!(melting_temp("NNNN"), -7.0);
    }
}
