#![forbid(unsafe_code)]
//! # cleavetag
//!
//! Design of **RE-probe / B-probe** oligo pairs that tag RNA transcripts at a
//! single enzymatic cut site, for targeted nanopore RNA sequencing.
//!
//! For each enzyme of a [`catalog::Catalog`] and each transcript of a gene the
//! engine simulates digestion, picks the cut closest to the 3' end whose
//! flanking oligos reach the enzyme's working temperature and pass a
//! nearest-neighbor stability screen, and deduplicates the resulting oligos
//! across transcripts into a numbered registry.
//!
//! ## Highlights
//! - 🧬 **IUPAC-aware digestion** with `regex`, cut offset taken from the motif.
//! - 🌡️ **Tm growth** (Wallace / salt-corrected) and **ΔG screening**
//!   (SantaLucia 1998 stacks + single mismatches) for dimers and hairpins.
//! - 🧭 **Deterministic output**: parallel per-transcript work on `rayon`,
//!   single-writer registration in transcript order.
//!
//! ## Examples
//! ```rust
//! use cleavetag::{design::Designer, transcript::Transcript};
//!
//! let avaii = cleavetag::get_enzyme("AvaII").unwrap();
//! let block = "TTGTGTTGTTTGTGTTGTTG";
//! let tx = vec![Transcript::new("tx1", &format!("{block}{block}{block}GGACC{block}")).unwrap()];
//! let design = Designer::default().design_enzyme(&avaii, &tx).unwrap();
//! assert_eq!(design.designed(), 1);
//! ```
//!
//! ## Version
//! See [`VERSION`].

pub mod assemble;
pub mod catalog;
pub mod config;
pub mod design;
pub mod digest;
pub mod enzyme;
pub mod error;
pub mod reference;
pub mod registry;
pub mod report;
pub mod select;
pub mod stability;
pub mod tm;
pub mod transcript;
pub mod data {
    pub mod adapters;
    pub mod enzymes;
    pub mod nearest_neighbor;
}

use catalog::Catalog;
use design::{Designer, EnzymeDesign};
use enzyme::Enzyme;
use error::DesignError;
use reference::{gene_transcripts, GeneTable, Reference};
use transcript::Transcript;

/// Crate version string (from `CARGO_PKG_VERSION`).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Return the built-in enzymes in catalog order.
pub fn list_enzymes() -> Vec<Enzyme> {
    Catalog::builtin().enzymes().to_vec()
}

/// Look up a built-in enzyme by name or isoschizomer (case-insensitive).
///
/// # Examples
/// ```
/// let e = cleavetag::get_enzyme("haeiii").unwrap();
/// assert_eq!(e.display_motif, "GG^CC");
/// ```
pub fn get_enzyme(name: &str) -> Option<Enzyme> {
    Catalog::builtin().get(name).cloned()
}

/// All designs produced for one gene.
#[derive(Clone, Debug)]
pub struct GeneDesign {
    pub gene: String,
    pub transcripts: Vec<Transcript>,
    /// Only enzymes with at least one designed transcript, in request order.
    pub designs: Vec<EnzymeDesign>,
}

impl GeneDesign {
    pub fn transcript_ids(&self) -> Vec<&str> {
        self.transcripts.iter().map(|t| t.id.as_str()).collect()
    }
}

/// Resolve `gene` to its transcripts and run every enzyme over them.
///
/// Fails with [`DesignError::UnknownGene`],
/// [`DesignError::MissingReferenceData`] or [`DesignError::InvalidSequence`]
/// before any design work starts.
pub fn design_gene(
    gene: &str,
    genes: &GeneTable,
    reference: &Reference,
    enzymes: &[&Enzyme],
    designer: &Designer,
) -> Result<GeneDesign, DesignError> {
    let transcripts = gene_transcripts(gene, genes, reference)?;
    log::info!("{gene}: {} transcripts, {} enzymes", transcripts.len(), enzymes.len());
    let designs = designer.design_all(enzymes, &transcripts)?;
    Ok(GeneDesign { gene: gene.to_string(), transcripts, designs })
}


#[cfg(test)]
mod gene_tests {
    use super::*;

    const BLOCK: &str = "TTGTGTTGTTTGTGTTGTTG";

    #[test]
    fn design_gene_reports_only_productive_enzymes() {
        let genes = GeneTable::from_pairs([("G1", "tx1"), ("G1", "tx2")]);
        let reference = Reference::from_records([
            ("tx1", format!("{BLOCK}{BLOCK}{BLOCK}GGACC{BLOCK}")),
            ("tx2", format!("TTTTTTTTTT{BLOCK}{BLOCK}{BLOCK}GGACC{BLOCK}TTTTT")),
        ]);
        let cat = Catalog::builtin();
        let enzymes = cat.select(&["AvaII".to_string(), "TaqI".to_string()]).unwrap();
        let out = design_gene("G1", &genes, &reference, &enzymes, &Designer::default()).unwrap();
        assert_eq!(out.transcript_ids(), ["tx1", "tx2"]);
        assert_eq!(out.designs.len(), 1);
        assert_eq!(out.designs[0].enzyme.name, "AvaII");
        assert_eq!(out.designs[0].designed(), 2);
    }

    #[test]
    fn unknown_gene_is_fatal() {
        let genes = GeneTable::from_pairs([("G1", "tx1")]);
        let reference = Reference::from_records([("tx1", BLOCK)]);
        let enzymes: Vec<&Enzyme> = Vec::new();
        let err = design_gene("G2", &genes, &reference, &enzymes, &Designer::default())
            .unwrap_err();
        assert!(matches!(err, DesignError::UnknownGene(_)));
    }

    #[test]
    fn non_nucleotide_transcript_stops_the_run() {
        let genes = GeneTable::from_pairs([("G1", "tx1")]);
        let reference = Reference::from_records([("tx1", format!("é{BLOCK}GGACC{BLOCK}{BLOCK}"))]);
        let cat = Catalog::builtin();
        let enzymes = cat.select(&["AvaII".to_string()]).unwrap();
        let err = design_gene("G1", &genes, &reference, &enzymes, &Designer::default())
            .unwrap_err();
        assert!(matches!(err, DesignError::InvalidSequence { id, .. } if id == "tx1"));
    }
}
