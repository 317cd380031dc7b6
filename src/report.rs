//! Tabular and JSON rendering of design results.
//!
//! Tables are `polars` DataFrames so the CLI can either pretty-print them or
//! stream them out as CSV. Registered oligos are numbered from 1 in insertion
//! order and shown as `RE<n>` / `B<n>`.
use std::io::Write;

use polars::prelude::*;
use serde::Serialize;

use crate::assemble::Role;
use crate::design::{DesignRecord, EnzymeDesign};
use crate::enzyme::{Enzyme, Source};
use crate::registry::RegisteredOligo;

/// Display label of a registered oligo (`RE1`, `B3`, ...).
pub fn oligo_label(role: Role, index: usize) -> String {
    format!("{role}{}", index + 1)
}

/// One row per catalog enzyme.
pub fn enzymes_df(enzymes: &[Enzyme]) -> PolarsResult<DataFrame> {
    let min_flank: Vec<Option<u64>> =
        enzymes.iter().map(|e| e.min_flank.map(|f| f as u64)).collect();
    let sources: Vec<Option<&Source>> = enzymes.iter().map(|e| e.source.as_ref()).collect();
    let source: Vec<Option<&str>> =
        sources.iter().map(|s| s.map(|s| s.reference.as_str())).collect();
    let source_url: Vec<Option<&str>> = sources.iter().map(|s| s.map(|s| s.url.as_str())).collect();
    df!(
        "enzyme"        => enzymes.iter().map(|e| e.name.clone()).collect::<Vec<_>>(),
        "motif"         => enzymes.iter().map(|e| e.display_motif.clone()).collect::<Vec<_>>(),
        "incubation_c"  => enzymes.iter().map(|e| e.incubation_temp).collect::<Vec<_>>(),
        "inactivation_c"=> enzymes.iter().map(|e| e.inactivation_temp).collect::<Vec<_>>(),
        "min_flank"     => min_flank,
        "palindromic"   => enzymes.iter().map(|e| e.is_palindromic()).collect::<Vec<_>>(),
        "isoschizomers" => enzymes.iter().map(|e| e.isoschizomers.join(",")).collect::<Vec<_>>(),
        "source"        => source,
        "source_url"    => source_url,
    )
}

/// One row per transcript the enzyme cuts.
pub fn designs_df(design: &EnzymeDesign) -> PolarsResult<DataFrame> {
    let rows: &[DesignRecord] = &design.records;
    let cut_at: Vec<Option<u64>> =
        rows.iter().map(|r| r.design.as_ref().map(|a| a.five_prime_len as u64)).collect();
    let from_3p_end: Vec<Option<u64>> =
        rows.iter().map(|r| r.three_prime_distance().map(|d| d as u64)).collect();
    let label = |role: Role| -> Vec<Option<String>> {
        rows.iter()
            .map(|r| {
                r.design.as_ref().map(|a| match role {
                    Role::ReProbe => oligo_label(role, a.re_probe),
                    Role::BProbe => oligo_label(role, a.b_probe),
                })
            })
            .collect()
    };
    df!(
        "transcript"    => rows.iter().map(|r| r.transcript_id.clone()).collect::<Vec<_>>(),
        "length"        => rows.iter().map(|r| r.transcript_len as u64).collect::<Vec<_>>(),
        "fragments"     => rows.iter().map(|r| r.fragments as u64).collect::<Vec<_>>(),
        "cut_at"        => cut_at,
        "from_3p_end"   => from_3p_end,
        "re_probe"      => label(Role::ReProbe),
        "b_probe"       => label(Role::BProbe),
    )
}

/// One row per distinct oligo of `role`.
pub fn oligos_df(design: &EnzymeDesign, role: Role) -> PolarsResult<DataFrame> {
    let entries: &[RegisteredOligo] = design.registry.entries(role);
    df!(
        "oligo"    => (0..entries.len()).map(|i| oligo_label(role, i)).collect::<Vec<_>>(),
        "sequence" => entries.iter().map(|e| e.oligo.sequence.clone()).collect::<Vec<_>>(),
        "core"     => entries.iter().map(|e| e.oligo.core.clone()).collect::<Vec<_>>(),
        "tm_c"     => entries.iter().map(|e| e.oligo.tm).collect::<Vec<_>>(),
        "uses"     => entries.iter().map(|e| e.uses as u64).collect::<Vec<_>>(),
    )
}

/// Machine-readable summary of one enzyme's results.
#[derive(Debug, Serialize)]
pub struct EnzymeSummary<'a> {
    pub enzyme: &'a Enzyme,
    pub records: &'a [DesignRecord],
    pub not_applicable: &'a [String],
    pub re_probes: &'a [RegisteredOligo],
    pub b_probes: &'a [RegisteredOligo],
}

/// Machine-readable summary of a gene run.
#[derive(Debug, Serialize)]
pub struct GeneSummary<'a> {
    pub gene: &'a str,
    pub transcripts: Vec<&'a str>,
    pub enzymes: Vec<EnzymeSummary<'a>>,
    pub version: &'static str,
}

impl<'a> GeneSummary<'a> {
    pub fn new(gene: &'a str, transcripts: Vec<&'a str>, designs: &'a [EnzymeDesign]) -> Self {
        GeneSummary {
            gene,
            transcripts,
            enzymes: designs
                .iter()
                .map(|d| EnzymeSummary {
                    enzyme: &d.enzyme,
                    records: &d.records,
                    not_applicable: &d.uncut,
                    re_probes: d.registry.entries(Role::ReProbe),
                    b_probes: d.registry.entries(Role::BProbe),
                })
                .collect(),
            version: crate::VERSION,
        }
    }
}

/// Configure Polars' pretty-printer to show every row, column and full cells.
pub fn configure_table_display() {
    std::env::set_var("POLARS_FMT_TABLE_FORMATTING", "UTF8_FULL");
    std::env::set_var("POLARS_FMT_MAX_COLS", "100000");
    std::env::set_var("POLARS_FMT_MAX_ROWS", "1000000");
    std::env::set_var("POLARS_FMT_STR_LEN", "100000");
    std::env::set_var("POLARS_TABLE_WIDTH", "65535");
}

fn emit<W: Write>(out: &mut W, df: &mut DataFrame, csv: bool) -> anyhow::Result<()> {
    if csv {
        CsvWriter::new(&mut *out).include_header(true).finish(df)?;
    } else {
        writeln!(out, "{df}")?;
    }
    Ok(())
}

/// Render one enzyme's results: header, design table, oligo tables, N/A list.
pub fn write_enzyme_design<W: Write>(
    out: &mut W,
    design: &EnzymeDesign,
    csv: bool,
) -> anyhow::Result<()> {
    let e = &design.enzyme;
    let inactivation = e
        .inactivation_temp
        .map_or_else(|| "none".to_string(), |t| format!("{t} °C"));
    writeln!(
        out,
        "## {} {} (incubate {} °C, inactivate {}; isoschizomers: {})",
        e.name,
        e.display_motif,
        e.incubation_temp,
        inactivation,
        if e.isoschizomers.is_empty() { "-".to_string() } else { e.isoschizomers.join(", ") }
    )?;
    emit(out, &mut designs_df(design)?, csv)?;
    emit(out, &mut oligos_df(design, Role::ReProbe)?, csv)?;
    emit(out, &mut oligos_df(design, Role::BProbe)?, csv)?;
    if !design.uncut.is_empty() {
        writeln!(out, "N/A (no {} site): {}", e.name, design.uncut.join(", "))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::design::Designer;
    use crate::transcript::Transcript;

    const BLOCK: &str = "TTGTGTTGTTTGTGTTGTTG";

    fn sample() -> EnzymeDesign {
        let cat = Catalog::builtin();
        let avaii = cat.get("AvaII").unwrap();
        let tx = vec![
            Transcript::new("tx1", &format!("{BLOCK}{BLOCK}{BLOCK}GGACC{BLOCK}")).unwrap(),
            Transcript::new("tx2", BLOCK).unwrap(),
        ];
        Designer::default().design_enzyme(avaii, &tx).unwrap()
    }

    #[test]
    fn labels_are_one_based() {
        assert_eq!(oligo_label(Role::ReProbe, 0), "RE1");
        assert_eq!(oligo_label(Role::BProbe, 2), "B3");
    }

    #[test]
    fn enzyme_table_has_one_row_per_enzyme() {
        let cat = Catalog::builtin();
        let df = enzymes_df(cat.enzymes()).unwrap();
        assert_eq!(df.height(), cat.enzymes().len());
        assert_eq!(df.width(), 9);
    }

    #[test]
    fn enzyme_table_shows_provenance() {
        let cat = Catalog::builtin();
        let df = enzymes_df(cat.enzymes()).unwrap();
        let urls = df.column("source_url").unwrap();
        assert_eq!(urls.null_count(), 0);
        let json = r#"[{"name":"MyI","pattern":"GGCC","cut_offset":2,
                        "incubation_temp":37.0,"display_motif":"GG^CC"}]"#;
        let custom = Catalog::from_json(json).unwrap();
        let df = enzymes_df(custom.enzymes()).unwrap();
        assert_eq!(df.column("source").unwrap().null_count(), 1);
    }

    #[test]
    fn design_tables_match_registry() {
        let d = sample();
        let designs = designs_df(&d).unwrap();
        assert_eq!(designs.height(), 1);
        let re = oligos_df(&d, Role::ReProbe).unwrap();
        assert_eq!(re.height(), d.registry.entries(Role::ReProbe).len());
    }

    #[test]
    fn written_report_lists_na_transcripts() {
        let d = sample();
        let mut buf = Vec::new();
        write_enzyme_design(&mut buf, &d, true).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("AvaII"));
        assert!(text.contains("N/A"));
        assert!(text.contains("tx2"));
    }

    #[test]
    fn json_summary_serializes() {
        let d = vec![sample()];
        let s = GeneSummary::new("GENE", vec!["tx1", "tx2"], &d);
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"gene\":\"GENE\""));
        assert!(json.contains("re_probes"));
    }
}
