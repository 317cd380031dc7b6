//! The per-enzyme design pipeline.
//!
//! For every transcript: digest → select a cut (which builds and screens the
//! oligos) → register the oligos. Digestion and selection read only immutable
//! inputs and run on the rayon pool; registration then happens in a single
//! pass in transcript order, so oligo numbering never depends on which worker
//! finished first.
use log::{debug, info};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde::Serialize;

use crate::assemble::Role;
use crate::config::DesignConfig;
use crate::digest::Digester;
use crate::enzyme::Enzyme;
use crate::error::DesignError;
use crate::registry::OligoRegistry;
use crate::select::{Selection, Selector};
use crate::stability::NearestNeighbor;
use crate::transcript::Transcript;

/// Where a transcript was cut and which registered oligos it uses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Assignment {
    /// Boundary between fragment `boundary` and `boundary + 1`.
    pub boundary: usize,
    /// Bases 5' of the cut.
    pub five_prime_len: usize,
    /// Index into the registry's RE-probe table.
    pub re_probe: usize,
    /// Index into the registry's B-probe table.
    pub b_probe: usize,
}

/// Outcome for one transcript that the enzyme cuts at least once.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DesignRecord {
    pub transcript_id: String,
    pub transcript_len: usize,
    pub fragments: usize,
    /// `None` when no boundary passed selection.
    pub design: Option<Assignment>,
}

impl DesignRecord {
    /// Bases between the cut and the 3' end, if a cut was selected.
    pub fn three_prime_distance(&self) -> Option<usize> {
        self.design.as_ref().map(|a| self.transcript_len - a.five_prime_len)
    }
}

/// Everything designed for one enzyme over a set of transcripts.
#[derive(Clone, Debug)]
pub struct EnzymeDesign {
    pub enzyme: Enzyme,
    /// Transcripts with at least one site, in input order.
    pub records: Vec<DesignRecord>,
    /// Transcripts without a site (reported as N/A).
    pub uncut: Vec<String>,
    pub registry: OligoRegistry,
}

impl EnzymeDesign {
    /// Number of transcripts with a selected cut.
    pub fn designed(&self) -> usize {
        self.records.iter().filter(|r| r.design.is_some()).count()
    }

    pub fn has_design(&self) -> bool {
        self.designed() > 0
    }
}

enum Outcome {
    Uncut,
    Cut { fragments: usize, selection: Option<Selection> },
}

/// Immutable design context: configuration plus thermodynamic tables.
#[derive(Clone, Debug, Default)]
pub struct Designer {
    config: DesignConfig,
    nn: NearestNeighbor,
}

impl Designer {
    pub fn new(config: DesignConfig) -> Self {
        Designer { config, nn: NearestNeighbor::santalucia_peyret() }
    }

    /// Run the pipeline for one enzyme over `transcripts`.
    pub fn design_enzyme(
        &self,
        enzyme: &Enzyme,
        transcripts: &[Transcript],
    ) -> Result<EnzymeDesign, DesignError> {
        let digester = Digester::new(enzyme)?;
        let selector = Selector::new(enzyme, &self.config, &self.nn);

        let outcomes: Vec<Outcome> = transcripts
            .par_iter()
            .map(|t| {
                let fragments = digester.digest(t.sequence());
                if fragments.len() < 2 {
                    Outcome::Uncut
                } else {
                    Outcome::Cut {
                        fragments: fragments.len(),
                        selection: selector.select(&t.id, &fragments),
                    }
                }
            })
            .collect();

        let mut registry = OligoRegistry::new();
        let mut records = Vec::new();
        let mut uncut = Vec::new();
        for (t, outcome) in transcripts.iter().zip(outcomes) {
            match outcome {
                Outcome::Uncut => uncut.push(t.id.clone()),
                Outcome::Cut { fragments, selection } => {
                    let design = selection.map(|sel| Assignment {
                        boundary: sel.boundary,
                        five_prime_len: sel.five_prime_len,
                        re_probe: registry.register(sel.oligos.re_probe),
                        b_probe: registry.register(sel.oligos.b_probe),
                    });
                    records.push(DesignRecord {
                        transcript_id: t.id.clone(),
                        transcript_len: t.len(),
                        fragments,
                        design,
                    });
                }
            }
        }

        let design = EnzymeDesign { enzyme: enzyme.clone(), records, uncut, registry };
        info!(
            "{}: {} of {} transcripts designed ({} RE-probes, {} B-probes, {} without a site)",
            enzyme,
            design.designed(),
            transcripts.len(),
            design.registry.entries(Role::ReProbe).len(),
            design.registry.entries(Role::BProbe).len(),
            design.uncut.len()
        );
        Ok(design)
    }

    /// Run every enzyme over `transcripts`, keeping only enzymes that design
    /// at least one transcript. Output follows the order of `enzymes`.
    pub fn design_all(
        &self,
        enzymes: &[&Enzyme],
        transcripts: &[Transcript],
    ) -> Result<Vec<EnzymeDesign>, DesignError> {
        let designs: Vec<EnzymeDesign> = enzymes
            .par_iter()
            .map(|e| self.design_enzyme(e, transcripts))
            .collect::<Result<_, _>>()?;
        Ok(designs
            .into_iter()
            .filter(|d| {
                if !d.has_design() {
                    debug!("{}: no usable design, skipped", d.enzyme);
                }
                d.has_design()
            })
            .collect())
    }
}

/// Run `f` inside a dedicated rayon pool; `None` uses all logical cores.
pub fn with_threads<T, F>(threads: Option<usize>, f: F) -> anyhow::Result<T>
where
    T: Send,
    F: FnOnce() -> T + Send,
{
    let n = threads.filter(|&n| n > 0).unwrap_or_else(num_cpus::get).max(1);
    let pool = ThreadPoolBuilder::new().num_threads(n).build()?;
    Ok(pool.install(f))
}
