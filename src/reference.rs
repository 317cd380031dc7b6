//! Reference loaders: transcript sequences and gene → transcript tables.
//!
//! ### Design
//! - **FASTA/FASTA.GZ** parsed with `needletail`; the record id is the first
//!   whitespace-delimited token of the header.
//! - **Gene table**: tab-separated `gene<TAB>transcript` rows parsed with
//!   `csv`. A `gene transcript` header row is optional and `#` lines are
//!   comments. Rows for the same gene accumulate in file order.
//!
//! ### Errors
//! Parsing/IO errors are bubbled via `anyhow::Result`. Lookups performed on
//! behalf of the design engine return [`DesignError`] so that an unknown gene
//! or a missing sequence aborts the run with a specific message.
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;
use needletail::parse_fastx_file;

use crate::error::DesignError;
use crate::transcript::{check_sequence, normalize, Transcript};

/// Transcript id → sequence.
#[derive(Clone, Debug, Default)]
pub struct Reference {
    sequences: HashMap<String, String>,
}

impl Reference {
    /// Build from `(id, sequence)` pairs; sequences are normalized.
    pub fn from_records<I, S, T>(records: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: AsRef<str>,
    {
        Reference {
            sequences: records
                .into_iter()
                .map(|(id, seq)| (id.into(), normalize(seq.as_ref())))
                .collect(),
        }
    }

    /// Parse a FASTA (optionally gzip-compressed) file.
    pub fn from_fasta<P: AsRef<Path>>(path: P) -> Result<Self> {
        let p = path.as_ref();
        let mut reader = parse_fastx_file(p).with_context(|| format!("opening {}", p.display()))?;
        let mut sequences = HashMap::new();
        while let Some(record) = reader.next() {
            let rec = record.with_context(|| format!("parsing {}", p.display()))?;
            let header = String::from_utf8_lossy(rec.id()).to_string();
            let id = header.split_whitespace().next().unwrap_or_default().to_string();
            let seq = normalize(&String::from_utf8_lossy(&rec.seq()));
            check_sequence(&id, &seq).with_context(|| format!("parsing {}", p.display()))?;
            sequences.insert(id, seq);
        }
        debug!("loaded {} sequences from {}", sequences.len(), p.display());
        Ok(Reference { sequences })
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.sequences.get(id).map(String::as_str)
    }

    /// Fetch a transcript, failing with `MissingReferenceData` or
    /// `InvalidSequence`.
    pub fn transcript(&self, id: &str) -> Result<Transcript, DesignError> {
        let seq = self
            .get(id)
            .ok_or_else(|| DesignError::MissingReferenceData(id.to_string()))?;
        Transcript::new(id, seq)
    }
}

/// Gene name → transcript ids.
#[derive(Clone, Debug, Default)]
pub struct GeneTable {
    genes: HashMap<String, Vec<String>>,
}

impl GeneTable {
    pub fn from_pairs<I, S, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let mut table = GeneTable::default();
        for (g, t) in pairs {
            table.insert(g.into(), t.into());
        }
        table
    }

    fn insert(&mut self, gene: String, transcript: String) {
        let ids = self.genes.entry(gene).or_default();
        if !ids.contains(&transcript) {
            ids.push(transcript);
        }
    }

    /// Parse a tab-separated gene table from any reader.
    pub fn from_reader<R: Read>(rdr: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .comment(Some(b'#'))
            .flexible(true)
            .from_reader(rdr);
        let mut table = GeneTable::default();
        for (i, row) in reader.records().enumerate() {
            let row = row.with_context(|| format!("gene table row {}", i + 1))?;
            let gene = row.get(0).map(str::trim).unwrap_or_default();
            let transcript = row.get(1).map(str::trim).unwrap_or_default();
            let is_header = gene.eq_ignore_ascii_case("gene")
                && transcript.eq_ignore_ascii_case("transcript");
            if i == 0 && is_header {
                continue;
            }
            if gene.is_empty() || transcript.is_empty() {
                anyhow::bail!("gene table row {} needs a gene and a transcript column", i + 1);
            }
            table.insert(gene.to_string(), transcript.to_string());
        }
        Ok(table)
    }

    pub fn from_tsv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let p = path.as_ref();
        let file = std::fs::File::open(p).with_context(|| format!("opening {}", p.display()))?;
        Self::from_reader(file).with_context(|| format!("parsing {}", p.display()))
    }

    /// Transcript ids of `gene`, failing with `UnknownGene` when there are none.
    pub fn transcripts_for(&self, gene: &str) -> Result<&[String], DesignError> {
        match self.genes.get(gene) {
            Some(ids) if !ids.is_empty() => Ok(ids),
            _ => Err(DesignError::UnknownGene(gene.to_string())),
        }
    }
}

/// Resolve every transcript of `gene` against `reference`, in table order.
pub fn gene_transcripts(
    gene: &str,
    genes: &GeneTable,
    reference: &Reference,
) -> Result<Vec<Transcript>, DesignError> {
    genes.transcripts_for(gene)?.iter().map(|id| reference.transcript(id)).collect()
}
