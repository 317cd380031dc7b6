//! Built-in enzymes known to cleave **RNA:DNA hybrid** duplexes.
//!
//! Recognition sites, cut positions and temperatures as listed by the vendor.
//! Hybrid cleavage evidence: Molloy & Symons (1980), *Nucleic Acids Res.*
//! 8:2939, which reports AvaII, HhaI, HincII, HaeIII, TaqI and AluI activity
//! on RNA:DNA heteroduplexes.
//!
//! Notes:
//! - Patterns use the IUPAC alphabet (W = A/T, Y = C/T, R = A/G).
//! - `min_flank` is only set where the vendor publishes a close-to-end
//!   cleavage requirement; otherwise the design default applies.

use crate::enzyme::{EnzymeRecord, Provenance};

const NEB: Provenance = Provenance {
    source: "New England Biolabs product pages",
    url: "https://www.neb.com/en-us/products/restriction-endonucleases",
    notes: "Vendor reaction and heat-inactivation conditions.",
};

pub const HAEIII: EnzymeRecord = EnzymeRecord {
    name: "HaeIII",
    pattern: "GGCC",
    cut_offset: 2,
    incubation_temp: 37.0,
    inactivation_temp: Some(80.0),
    min_flank: Some(6),
    display_motif: "GG^CC",
    isoschizomers: &["BsuRI", "PhoI"],
    provenance: NEB,
};

pub const ALUI: EnzymeRecord = EnzymeRecord {
    name: "AluI",
    pattern: "AGCT",
    cut_offset: 2,
    incubation_temp: 37.0,
    inactivation_temp: Some(80.0),
    min_flank: None,
    display_motif: "AG^CT",
    isoschizomers: &["AluBI"],
    provenance: NEB,
};

/// TaqI-v2 cannot be heat-killed.
pub const TAQI: EnzymeRecord = EnzymeRecord {
    name: "TaqI",
    pattern: "TCGA",
    cut_offset: 1,
    incubation_temp: 65.0,
    inactivation_temp: None,
    min_flank: None,
    display_motif: "T^CGA",
    isoschizomers: &["TthHB8I"],
    provenance: Provenance { notes: "TaqI-v2; no heat inactivation.", ..NEB },
};

pub const HHAI: EnzymeRecord = EnzymeRecord {
    name: "HhaI",
    pattern: "GCGC",
    cut_offset: 3,
    incubation_temp: 37.0,
    inactivation_temp: Some(65.0),
    min_flank: None,
    display_motif: "GCG^C",
    isoschizomers: &["CfoI", "AspLEI"],
    provenance: NEB,
};

pub const AVAII: EnzymeRecord = EnzymeRecord {
    name: "AvaII",
    pattern: "GGWCC",
    cut_offset: 1,
    incubation_temp: 37.0,
    inactivation_temp: Some(80.0),
    min_flank: None,
    display_motif: "G^GWCC",
    isoschizomers: &["Eco47I", "SinI", "VpaK11BI"],
    provenance: NEB,
};

pub const HINCII: EnzymeRecord = EnzymeRecord {
    name: "HincII",
    pattern: "GTYRAC",
    cut_offset: 3,
    incubation_temp: 37.0,
    inactivation_temp: Some(65.0),
    min_flank: None,
    display_motif: "GTY^RAC",
    isoschizomers: &["HindII"],
    provenance: NEB,
};

/// Every built-in enzyme, in catalog display order.
pub const BUILTIN_ENZYMES: &[EnzymeRecord] = &[HAEIII, ALUI, TAQI, HHAI, AVAII, HINCII];
