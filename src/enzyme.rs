//! Core types for **enzymes** and their **provenance**.
//!
//! Built-in catalog entries are embedded as [`EnzymeRecord`] constants with
//! `&'static str` fields (see [`crate::data::enzymes`]); at runtime the design
//! engine works on owned [`Enzyme`] values so that catalogs can also be loaded
//! from JSON without code changes.
//!
//! # Provenance
//! Every built-in record carries a [`Provenance`] entry naming the vendor page
//! or paper the recognition site, cut position and temperatures came from.
use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DesignError;

/// Marker separating the two halves of a cut-marked display motif (`GG^CC`).
pub const CUT_MARKER: char = '^';

/// Where a catalog entry came from.
#[derive(Clone, Debug)]
pub struct Provenance {
    /// Human-readable source (e.g. vendor or paper).
    pub source: &'static str,
    /// Public URL for the source.
    pub url: &'static str,
    /// Any helpful notes (hybrid cleavage evidence, caveats).
    pub notes: &'static str,
}

/// A built-in catalog entry, stored as constants in the binary.
#[derive(Clone, Debug)]
pub struct EnzymeRecord {
    /// Enzyme name as sold (e.g. `"HaeIII"`).
    pub name: &'static str,
    /// Recognition site, IUPAC alphabet, top strand 5'→3'.
    pub pattern: &'static str,
    /// 0-based position inside the pattern where the top strand is cut.
    pub cut_offset: usize,
    /// Recommended incubation temperature in °C.
    pub incubation_temp: f64,
    /// Heat-inactivation temperature in °C, if the enzyme can be heat-killed.
    pub inactivation_temp: Option<f64>,
    /// Minimum number of bases the enzyme needs on each side of its site.
    pub min_flank: Option<usize>,
    /// Pattern with [`CUT_MARKER`] at the cut position.
    pub display_motif: &'static str,
    /// Other enzymes recognizing the same site with the same cut.
    pub isoschizomers: &'static [&'static str],
    /// Source information for auditability.
    pub provenance: Provenance,
}

/// Owned provenance carried by an [`Enzyme`], shown in reports.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub reference: String,
    pub url: String,
    #[serde(default)]
    pub notes: String,
}

impl From<&Provenance> for Source {
    fn from(p: &Provenance) -> Self {
        Source {
            reference: p.source.to_string(),
            url: p.url.to_string(),
            notes: p.notes.to_string(),
        }
    }
}

/// An enzyme as consumed by the design engine.
///
/// Immutable once the catalog is built; passed by reference through the
/// pipeline so that enzyme-specific behavior is data, not branching.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Enzyme {
    pub name: String,
    pub pattern: String,
    pub cut_offset: usize,
    pub incubation_temp: f64,
    #[serde(default)]
    pub inactivation_temp: Option<f64>,
    #[serde(default)]
    pub min_flank: Option<usize>,
    pub display_motif: String,
    #[serde(default)]
    pub isoschizomers: Vec<String>,
    /// Where the parameters come from; optional for JSON catalogs.
    #[serde(default)]
    pub source: Option<Source>,
}

impl fmt::Display for Enzyme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl From<&EnzymeRecord> for Enzyme {
    fn from(r: &EnzymeRecord) -> Self {
        Enzyme {
            name: r.name.to_string(),
            pattern: r.pattern.to_string(),
            cut_offset: r.cut_offset,
            incubation_temp: r.incubation_temp,
            inactivation_temp: r.inactivation_temp,
            min_flank: r.min_flank,
            display_motif: r.display_motif.to_string(),
            isoschizomers: r.isoschizomers.iter().map(|s| s.to_string()).collect(),
            source: Some(Source::from(&r.provenance)),
        }
    }
}

impl Enzyme {
    /// Number of motif bases that end up on the downstream side of the cut,
    /// read from the display motif.
    pub fn bases_after_cut(&self) -> usize {
        match self.display_motif.split_once(CUT_MARKER) {
            Some((_, after)) => after.len(),
            None => self.pattern.len().saturating_sub(self.cut_offset),
        }
    }

    /// Flank required on each side of the site, falling back to `default`
    /// when the enzyme has no published minimum.
    pub fn required_flank(&self, default: usize) -> usize {
        self.min_flank.unwrap_or(default)
    }

    /// `true` if the recognition site equals its own reverse complement.
    pub fn is_palindromic(&self) -> bool {
        let p = self.pattern.to_ascii_uppercase();
        bio::alphabets::dna::revcomp(p.as_bytes()) == p.as_bytes()
    }

    /// Check that the record is self-consistent.
    ///
    /// The display motif with its marker removed must equal the pattern, the
    /// marker must sit at `cut_offset`, and the pattern must be IUPAC DNA.
    pub fn validate(&self) -> Result<(), DesignError> {
        let invalid = |reason: String| DesignError::InvalidEnzyme {
            name: self.name.clone(),
            reason,
        };
        if self.pattern.is_empty() {
            return Err(invalid("empty recognition pattern".into()));
        }
        if let Some(bad) = self.pattern.chars().find(|c| !is_iupac(*c)) {
            return Err(invalid(format!("pattern contains non-IUPAC letter '{bad}'")));
        }
        if self.cut_offset > self.pattern.len() {
            return Err(invalid(format!(
                "cut offset {} beyond pattern length {}",
                self.cut_offset,
                self.pattern.len()
            )));
        }
        let marker_at = self
            .display_motif
            .find(CUT_MARKER)
            .ok_or_else(|| {
                invalid(format!("display motif '{}' has no cut marker", self.display_motif))
            })?;
        let stripped: String = self.display_motif.chars().filter(|c| *c != CUT_MARKER).collect();
        if !stripped.eq_ignore_ascii_case(&self.pattern) {
            return Err(invalid(format!(
                "display motif '{}' does not spell pattern '{}'",
                self.display_motif, self.pattern
            )));
        }
        if marker_at != self.cut_offset {
            return Err(invalid(format!(
                "cut marker at {marker_at} but cut offset is {}",
                self.cut_offset
            )));
        }
        Ok(())
    }
}

/// `true` for letters of the IUPAC nucleotide alphabet (either case).
pub fn is_iupac(c: char) -> bool {
    "ACGTURYSWKMBDHVN".contains(c.to_ascii_uppercase())
}
