//! In-silico digestion of a transcript by one enzyme.
//!
//! The recognition pattern is compiled once into a case-insensitive regex in
//! which every IUPAC degenerate letter becomes a character class. Matches are
//! leftmost and non-overlapping. The sequence is cut `cut_offset` bases into
//! each match: the first `k` bases of the motif stay with the upstream
//! fragment, the rest start the downstream one.
//!
//! # Examples
//! ```
//! use cleavetag::{catalog::Catalog, digest::Digester};
//! let cat = Catalog::builtin();
//! let d = Digester::new(cat.get("HaeIII").unwrap()).unwrap();
//! let frags = d.digest("AAAAGGCCTTTT");
//! assert_eq!(frags.len(), 2);
//! assert_eq!(frags[0].sequence, "AAAAGG");
//! assert_eq!(frags[1].sequence, "CCTTTT");
//! ```
use regex::Regex;

use crate::enzyme::Enzyme;
use crate::error::DesignError;

/// A contiguous piece of a transcript produced by digestion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fragment<'a> {
    /// Ordinal position, 5'→3'.
    pub index: usize,
    /// Offset of the first base in the source sequence.
    pub start: usize,
    pub sequence: &'a str,
}

impl<'a> Fragment<'a> {
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Offset one past the last base in the source sequence.
    pub fn end(&self) -> usize {
        self.start + self.sequence.len()
    }
}

/// Translate one IUPAC letter into a regex fragment.
fn iupac_class(c: char) -> Option<&'static str> {
    Some(match c.to_ascii_uppercase() {
        'A' => "A",
        'C' => "C",
        'G' => "G",
        'T' | 'U' => "[TU]",
        'R' => "[AG]",
        'Y' => "[CTU]",
        'S' => "[CG]",
        'W' => "[ATU]",
        'K' => "[GTU]",
        'M' => "[AC]",
        'B' => "[CGTU]",
        'D' => "[AGTU]",
        'H' => "[ACTU]",
        'V' => "[ACG]",
        'N' => "[ACGTU]",
        _ => return None,
    })
}

/// Build the case-insensitive regex source for an IUPAC pattern.
pub fn pattern_to_regex(pattern: &str) -> Option<String> {
    let mut re = String::from("(?i)");
    for c in pattern.chars() {
        re.push_str(iupac_class(c)?);
    }
    Some(re)
}

/// A compiled digestion rule for one enzyme.
#[derive(Clone, Debug)]
pub struct Digester<'e> {
    enzyme: &'e Enzyme,
    regex: Regex,
}

impl<'e> Digester<'e> {
    pub fn new(enzyme: &'e Enzyme) -> Result<Self, DesignError> {
        let invalid = |reason: String| DesignError::InvalidEnzyme {
            name: enzyme.name.clone(),
            reason,
        };
        if enzyme.pattern.is_empty() {
            return Err(invalid("empty recognition pattern".into()));
        }
        if enzyme.cut_offset > enzyme.pattern.len() {
            return Err(invalid("cut offset beyond pattern".into()));
        }
        let source = pattern_to_regex(&enzyme.pattern)
            .ok_or_else(|| invalid(format!("non-IUPAC pattern '{}'", enzyme.pattern)))?;
        let regex = Regex::new(&source).map_err(|e| invalid(e.to_string()))?;
        Ok(Digester { enzyme, regex })
    }

    /// 0-based positions at which the sequence is cut, in ascending order.
    ///
    /// Cuts that fall on either end of the sequence are dropped; they do not
    /// separate anything.
    pub fn cut_positions(&self, seq: &str) -> Vec<usize> {
        let k = self.enzyme.cut_offset;
        self.regex
            .find_iter(seq)
            .map(|m| m.start() + k)
            .filter(|&cut| cut > 0 && cut < seq.len())
            .collect()
    }

    /// Split `seq` into ordered fragments. A sequence with no site comes back
    /// as a single fragment; an empty sequence yields none.
    pub fn digest<'a>(&self, seq: &'a str) -> Vec<Fragment<'a>> {
        let mut fragments = Vec::new();
        let mut start = 0usize;
        for cut in self.cut_positions(seq).into_iter().chain(std::iter::once(seq.len())) {
            if cut > start {
                fragments.push(Fragment {
                    index: fragments.len(),
                    start,
                    sequence: &seq[start..cut],
                });
                start = cut;
            }
        }
        fragments
    }
}

/// Concatenate fragments back into the digested sequence.
pub fn reassemble(fragments: &[Fragment<'_>]) -> String {
    let mut out = String::with_capacity(fragments.iter().map(|f| f.len()).sum());
    for f in fragments {
        out.push_str(f.sequence);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enzyme(pattern: &str, k: usize) -> Enzyme {
        let mut display = pattern.to_string();
        display.insert(k, '^');
        Enzyme {
            name: format!("Test{pattern}"),
            pattern: pattern.into(),
            cut_offset: k,
            incubation_temp: 37.0,
            inactivation_temp: None,
            min_flank: None,
            display_motif: display,
            isoschizomers: vec![],
            source: None,
        }
    }

    #[test]
    fn single_site_gives_two_fragments() {
        let e = enzyme("GGCC", 2);
        let d = Digester::new(&e).unwrap();
        let seq = "AAAAGGCCTTTTTTTTTTTTTTTTTTTTTTTTTT";
        let frags = d.digest(seq);
        assert_eq!(frags.len(), 2);
        assert_eq!(frags[0].sequence, "AAAAGG");
        assert_eq!(frags[1].start, 6);
        assert_eq!(frags[1].index, 1);
        assert!(frags[1].sequence.starts_with("CCTT"));
    }

    #[test]
    fn no_site_gives_one_fragment() {
        let e = enzyme("GGCC", 2);
        let d = Digester::new(&e).unwrap();
        let frags = d.digest("AAAATTTTAAAA");
        assert_eq!(frags.len(), 1);
        assert_eq!(frags[0].sequence, "AAAATTTTAAAA");
    }

    #[test]
    fn matching_is_case_insensitive_and_degenerate() {
        let e = enzyme("GGWCC", 1);
        let d = Digester::new(&e).unwrap();
        // GGACC and ggtcc both match; GGCCC does not.
        let seq = "AAAGGACCAAAggtccAAAGGCCCAAA";
        assert_eq!(d.cut_positions(seq), vec![4, 12]);
        let frags = d.digest(seq);
        assert_eq!(frags.len(), 3);
        assert_eq!(frags[0].sequence, "AAAG");
        assert_eq!(frags[1].sequence, "GACCAAAg");
    }

    #[test]
    fn adjacent_sites_do_not_overlap() {
        let e = enzyme("GCGC", 3);
        let d = Digester::new(&e).unwrap();
        // GCGCGC holds a single non-overlapping match at 2.
        assert_eq!(d.cut_positions("AAGCGCGCAA"), vec![5]);
        // Back-to-back sites cut twice.
        assert_eq!(d.cut_positions("AAGCGCGCGCAA"), vec![5, 9]);
    }

    #[test]
    fn cuts_at_sequence_ends_are_collapsed() {
        let e = enzyme("GGCC", 0);
        let d = Digester::new(&e).unwrap();
        let frags = d.digest("GGCCAAAA");
        assert_eq!(frags.len(), 1);
        let e = enzyme("GGCC", 4);
        let d = Digester::new(&e).unwrap();
        assert_eq!(d.digest("AAAAGGCC").len(), 1);
    }

    #[test]
    fn round_trip_preserves_every_base() {
        let seqs = [
            "",
            "GGCC",
            "GGCCGGCCGGCC",
            "ACGTGGCCATATGGCCTTTTGGCCA",
            "ggccAAAGgCcTTTgg",
            "TTTTTTTTTTTTTTTTTTTT",
        ];
        for (pattern, k) in [("GGCC", 2), ("GGCC", 0), ("GGCC", 4), ("GGWCC", 1), ("NN", 1)] {
            let e = enzyme(pattern, k);
            let d = Digester::new(&e).unwrap();
            for s in seqs {
                let frags = d.digest(s);
                assert_eq!(reassemble(&frags), s, "{pattern}/{k} on {s}");
                assert_eq!(frags.iter().map(|f| f.len()).sum::<usize>(), s.len());
                assert!(frags.iter().all(|f| !f.is_empty()));
                for w in frags.windows(2) {
                    assert_eq!(w[0].end(), w[1].start);
                }
            }
        }
    }

    #[test]
    fn rejects_non_iupac_pattern() {
        let mut e = enzyme("GGCC", 2);
        e.pattern = "GG!C".into();
        assert!(Digester::new(&e).is_err());
    }
}
