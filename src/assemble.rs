//! Construction of the two oligos that flank a cut.
//!
//! - The **B-probe** is the reverse complement of the transcript just upstream
//!   of the cut. It starts at [`DesignConfig::b_probe_base_len`] bases and
//!   grows 5'-ward, one base at a time, until its Tm reaches the ligation
//!   temperature plus [`TM_MARGIN`] or the upstream fragment runs out.
//! - The **RE-probe** is the reverse complement of the upstream tail
//!   (`cut_offset + flank` bases) joined to the downstream head
//!   (`bases_after_cut + flank` bases). It grows into the downstream fragment
//!   until its Tm reaches the incubation temperature plus [`TM_MARGIN`] or
//!   that fragment runs out.
//!
//! Both loops are bounded by fragment length and always terminate. The
//! returned oligos carry their configured adapter decorations; `tm` refers to
//! the hybridizing core.
use core::fmt;

use serde::Serialize;

use crate::config::{DesignConfig, TM_MARGIN};
use crate::digest::Fragment;
use crate::enzyme::Enzyme;
use crate::tm::melting_temp;

/// Which side of the cut an oligo belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Role {
    /// Spans the cut; forms the duplex the enzyme cleaves.
    ReProbe,
    /// Sits upstream of the cut; splints the adapter ligation.
    BProbe,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::ReProbe => write!(f, "RE"),
            Role::BProbe => write!(f, "B"),
        }
    }
}

/// One assembled oligo.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Oligo {
    pub role: Role,
    /// Hybridizing part only.
    pub core: String,
    /// Core with adapter decorations; this is what gets ordered.
    pub sequence: String,
    /// Estimated Tm of the core, °C.
    pub tm: f64,
}

/// The RE/B pair for one cut.
#[derive(Clone, Debug, PartialEq)]
pub struct OligoPair {
    pub re_probe: Oligo,
    pub b_probe: Oligo,
}

/// Minimum extents an enzyme/config combination needs around a cut.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    /// Upstream bases taken into the RE-probe.
    pub re_upstream: usize,
    /// Downstream bases the RE-probe starts with.
    pub re_downstream: usize,
    /// Upstream bases the B-probe starts with.
    pub b_upstream: usize,
}

impl Geometry {
    pub fn new(enzyme: &Enzyme, config: &DesignConfig) -> Self {
        let flank = enzyme.required_flank(config.default_flank);
        Geometry {
            re_upstream: enzyme.cut_offset + flank,
            re_downstream: enzyme.bases_after_cut() + flank,
            b_upstream: config.b_probe_base_len,
        }
    }

    /// Shortest upstream fragment that can host both probes.
    pub fn min_upstream(&self) -> usize {
        self.re_upstream.max(self.b_upstream)
    }

    /// `true` if both fragments are long enough to build both oligos.
    pub fn fits(&self, upstream: &Fragment<'_>, downstream: &Fragment<'_>) -> bool {
        upstream.len() >= self.min_upstream() && downstream.len() >= self.re_downstream
    }
}

fn revcomp(seq: &str) -> String {
    String::from_utf8_lossy(&bio::alphabets::dna::revcomp(seq.as_bytes())).into_owned()
}

/// Grow the B-probe window from `base_len` until `target_tm` or exhaustion.
/// Returns the core and its Tm, or `None` if the fragment is too short.
pub fn grow_b_probe(upstream: &str, base_len: usize, target_tm: f64) -> Option<(String, f64)> {
    if base_len == 0 || upstream.len() < base_len {
        return None;
    }
    let mut len = base_len;
    loop {
        let core = revcomp(&upstream[upstream.len() - len..]);
        let tm = melting_temp(&core);
        if tm >= target_tm || len == upstream.len() {
            return Some((core, tm));
        }
        len += 1;
    }
}

/// Grow the RE-probe from `up_len` upstream and `down_len` downstream bases,
/// extending downstream until `target_tm` or exhaustion.
pub fn grow_re_probe(
    upstream: &str,
    downstream: &str,
    up_len: usize,
    down_len: usize,
    target_tm: f64,
) -> Option<(String, f64)> {
    if upstream.len() < up_len || downstream.len() < down_len || up_len + down_len == 0 {
        return None;
    }
    let head = &upstream[upstream.len() - up_len..];
    let mut len = down_len;
    loop {
        let mut window = String::with_capacity(up_len + len);
        window.push_str(head);
        window.push_str(&downstream[..len]);
        let core = revcomp(&window);
        let tm = melting_temp(&core);
        if tm >= target_tm || len == downstream.len() {
            return Some((core, tm));
        }
        len += 1;
    }
}

/// Build both oligos for the cut between `upstream` and `downstream`.
pub fn assemble(
    enzyme: &Enzyme,
    config: &DesignConfig,
    upstream: &Fragment<'_>,
    downstream: &Fragment<'_>,
) -> Option<OligoPair> {
    let geometry = Geometry::new(enzyme, config);
    if !geometry.fits(upstream, downstream) {
        return None;
    }
    let (re_core, re_tm) = grow_re_probe(
        upstream.sequence,
        downstream.sequence,
        geometry.re_upstream,
        geometry.re_downstream,
        enzyme.incubation_temp + TM_MARGIN,
    )?;
    let (b_core, b_tm) =
        grow_b_probe(upstream.sequence, geometry.b_upstream, config.ligation_temp + TM_MARGIN)?;
    Some(OligoPair {
        re_probe: Oligo {
            role: Role::ReProbe,
            sequence: config.re_probe_decoration.apply(&re_core),
            core: re_core,
            tm: re_tm,
        },
        b_probe: Oligo {
            role: Role::BProbe,
            sequence: config.b_probe_decoration.apply(&b_core),
            core: b_core,
            tm: b_tm,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frag(index: usize, start: usize, s: &str) -> Fragment<'_> {
        Fragment { index, start, sequence: s }
    }

    fn enzyme_k1() -> Enzyme {
        Enzyme {
            name: "AvaII".into(),
            pattern: "GGWCC".into(),
            cut_offset: 1,
            incubation_temp: 37.0,
            inactivation_temp: Some(80.0),
            min_flank: None,
            display_motif: "G^GWCC".into(),
            isoschizomers: vec![],
            source: None,
        }
    }

    #[test]
    fn b_probe_stops_at_target() {
        // 16 GC bases already clear 42 °C.
        let up = "AAAAAAAAAAGCGCGCGCGCGCGCGC";
        let (core, tm) = grow_b_probe(up, 16, 42.0).unwrap();
        assert_eq!(core.len(), 16);
        assert_eq!(core, "GCGCGCGCGCGCGCGC");
        assert!(tm >= 42.0);
    }

    #[test]
    fn b_probe_extension_terminates_when_fragment_exhausted() {
        // Poly-A can never reach 90 °C; growth must stop at the fragment.
        let up = "A".repeat(40);
        let (core, tm) = grow_b_probe(&up, 16, 90.0).unwrap();
        assert_eq!(core.len(), 40);
        assert_eq!(core, "T".repeat(40));
        assert!(tm < 90.0);
        assert_eq!(tm, melting_temp(&core));
    }

    #[test]
    fn b_probe_needs_base_length() {
        assert!(grow_b_probe("ACGTACGT", 16, 40.0).is_none());
    }

    #[test]
    fn re_probe_spans_the_cut() {
        // Upstream ends with the one motif base before the cut.
        let up = "TTTTTTTTTTTTTTTTTTTTCAGTCAG";
        let down = "GACCAAAAAAAAAAAAAAAAAAAAAA";
        let (core, _) = grow_re_probe(up, down, 7, 10, 0.0).unwrap();
        // 7 upstream + 10 downstream, reverse complemented.
        assert_eq!(core.len(), 17);
        let window = "CAGTCAGGACCAAAAAA";
        assert_eq!(core, revcomp(window));
    }

    #[test]
    fn re_probe_extension_terminates_when_fragment_exhausted() {
        let up = "AAAAAAAAAAG";
        let down = "GACCAAAAAAAAAAAA";
        let (core, tm) = grow_re_probe(up, down, 7, 10, 200.0).unwrap();
        assert_eq!(core.len(), 7 + down.len());
        assert!(tm < 200.0);
    }

    #[test]
    fn geometry_from_enzyme_and_config() {
        let g = Geometry::new(&enzyme_k1(), &DesignConfig::default());
        assert_eq!(g.re_upstream, 1 + 6);
        assert_eq!(g.re_downstream, 4 + 6);
        assert_eq!(g.b_upstream, 16);
        assert_eq!(g.min_upstream(), 16);
    }

    #[test]
    fn assemble_decorates_both_oligos() {
        let e = enzyme_k1();
        let cfg = DesignConfig::default();
        let up_s = format!("{}G", "ACTG".repeat(6));
        let down_s = format!("GACC{}", "ACTG".repeat(6));
        let up = frag(0, 0, &up_s);
        let down = frag(1, up_s.len(), &down_s);
        let pair = assemble(&e, &cfg, &up, &down).unwrap();
        assert_eq!(pair.re_probe.role, Role::ReProbe);
        assert_eq!(pair.b_probe.role, Role::BProbe);
        assert!(pair.b_probe.sequence.starts_with(&cfg.b_probe_decoration.prefix));
        assert!(pair.b_probe.sequence.ends_with(&pair.b_probe.core));
        assert_eq!(pair.re_probe.sequence, cfg.re_probe_decoration.apply(&pair.re_probe.core));
        assert!(
            pair.re_probe.tm >= e.incubation_temp + TM_MARGIN
                || pair.re_probe.core.len() == 7 + down_s.len()
        );
    }

    #[test]
    fn assemble_rejects_short_fragments() {
        let e = enzyme_k1();
        let cfg = DesignConfig::default();
        let up = frag(0, 0, "ACGTG");
        let down = frag(1, 5, "GACCAAAAAAAAAAAAAAA");
        assert!(assemble(&e, &cfg, &up, &down).is_none());
    }
}
