//! Protocol-constant sequences used to **decorate** designed oligos.
//!
//! Source: Chemistry Technical Document (CHTD_500_v1_revAR_25Nov2024) →
//! Appendix 15: *Adapter sequences*.
//!
//! - The B-probe carries the Ligation Adapter (LA) bottom strand at its 5' end,
//!   so that once annealed next to the cut it splints the LA top strand onto
//!   the 3' end of the cleaved transcript.
//! - The RE-probe carries a short poly-T spacer at its 5' end and no 3' tail.
//!
//! Notes:
//! - Sequences are uppercase DNA as published.
//! - Decorations are applied after Tm estimation; reported Tm values refer to
//!   the hybridizing core only.

/// Ligation Adapter (LA) bottom strand. 5'-GCAATACGTAACTGAACGAAGTACAGG-3'
pub const LA_BOTTOM: &str = "GCAATACGTAACTGAACGAAGTACAGG";

/// Ligation Adapter (LA) top strand. 5'-TTTTTTTTCCTGTACTTCGTTCAGTTACGTATTGCT-3'
pub const LA_TOP: &str = "TTTTTTTTCCTGTACTTCGTTCAGTTACGTATTGCT";

/// 5' decoration of every B-probe.
pub const B_PROBE_PREFIX: &str = LA_BOTTOM;
/// 3' decoration of every B-probe.
pub const B_PROBE_SUFFIX: &str = "";

/// 5' decoration of every RE-probe.
pub const RE_PROBE_PREFIX: &str = "TTTTT";
/// 3' decoration of every RE-probe.
pub const RE_PROBE_SUFFIX: &str = "";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn la_bottom_pairs_with_la_top_duplex_region() {
        // Top strand: 8 nt poly-T, 27 nt duplex region, single 3' T overhang.
        let rc = bio::alphabets::dna::revcomp(LA_BOTTOM.as_bytes());
        assert_eq!(&LA_TOP.as_bytes()[8..35], rc.as_slice());
    }
}
