//! Registry of enzymes available to the design engine.
//!
//! The built-in set lives in [`crate::data::enzymes`]. A [`Catalog`] is an
//! immutable configuration object: build it once at start-up (optionally from
//! a JSON file) and pass it by reference.
use std::path::Path;

use crate::data::enzymes::BUILTIN_ENZYMES;
use crate::enzyme::Enzyme;
use crate::error::DesignError;

#[derive(Clone, Debug)]
pub struct Catalog {
    enzymes: Vec<Enzyme>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// The built-in catalog.
    pub fn builtin() -> Self {
        Catalog { enzymes: BUILTIN_ENZYMES.iter().map(Enzyme::from).collect() }
    }

    /// Build a catalog from already-parsed enzymes, validating each one.
    pub fn new(enzymes: Vec<Enzyme>) -> Result<Self, DesignError> {
        for e in &enzymes {
            e.validate()?;
        }
        Ok(Catalog { enzymes })
    }

    /// Parse a JSON array of enzyme objects.
    ///
    /// # Examples
    /// ```
    /// let json = r#"[{"name":"MyI","pattern":"GGCC","cut_offset":2,
    ///                 "incubation_temp":37.0,"display_motif":"GG^CC"}]"#;
    /// let c = cleavetag::catalog::Catalog::from_json(json).unwrap();
    /// assert_eq!(c.enzymes().len(), 1);
    /// ```
    pub fn from_json(json_text: &str) -> Result<Self, DesignError> {
        let enzymes: Vec<Enzyme> = serde_json::from_str(json_text)?;
        Self::new(enzymes)
    }

    /// Read and parse a JSON catalog file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DesignError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn enzymes(&self) -> &[Enzyme] {
        &self.enzymes
    }

    /// Look up an enzyme by name or isoschizomer name, case-insensitively.
    pub fn get(&self, name: &str) -> Option<&Enzyme> {
        self.enzymes
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
            .or_else(|| {
                self.enzymes
                    .iter()
                    .find(|e| e.isoschizomers.iter().any(|i| i.eq_ignore_ascii_case(name)))
            })
    }

    /// Resolve a list of names, failing on the first unknown one.
    /// An empty list selects the whole catalog.
    pub fn select(&self, names: &[String]) -> Result<Vec<&Enzyme>, DesignError> {
        if names.is_empty() {
            return Ok(self.enzymes.iter().collect());
        }
        names
            .iter()
            .map(|n| self.get(n).ok_or_else(|| DesignError::UnknownEnzyme(n.clone())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_entries_all_validate() {
        let c = Catalog::builtin();
        assert!(!c.enzymes().is_empty());
        for e in c.enzymes() {
            e.validate().unwrap_or_else(|err| panic!("{err}"));
        }
    }

    #[test]
    fn lookup_by_isoschizomer_and_case() {
        let c = Catalog::builtin();
        assert_eq!(c.get("haeiii").map(|e| e.name.as_str()), Some("HaeIII"));
        assert_eq!(c.get("BsuRI").map(|e| e.name.as_str()), Some("HaeIII"));
        assert!(c.get("EcoRI").is_none());
    }

    #[test]
    fn select_reports_unknown_enzyme() {
        let c = Catalog::builtin();
        let err = c.select(&["AluI".to_string(), "Nope".to_string()]).unwrap_err();
        assert!(matches!(err, DesignError::UnknownEnzyme(n) if n == "Nope"));
        assert_eq!(c.select(&[]).unwrap().len(), c.enzymes().len());
    }

    #[test]
    fn json_catalog_is_validated() {
        let bad = r#"[{"name":"BadI","pattern":"GGCC","cut_offset":1,
                       "incubation_temp":37.0,"display_motif":"GG^CC"}]"#;
        assert!(matches!(Catalog::from_json(bad), Err(DesignError::InvalidEnzyme { .. })));
        let good = r#"[{"name":"GoodI","pattern":"GGCC","cut_offset":2,"incubation_temp":37.0,
                        "inactivation_temp":80.0,"display_motif":"GG^CC","isoschizomers":["X"]}]"#;
        let c = Catalog::from_json(good).unwrap();
        assert_eq!(c.get("x").unwrap().inactivation_temp, Some(80.0));
    }
}
