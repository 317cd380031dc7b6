//! Errors surfaced at the boundary of the design engine.
//!
//! Only conditions that abort a whole run live here. A transcript without a
//! usable cut, or an enzyme that yields nothing for a gene, is an ordinary
//! outcome and is reported through [`crate::design::DesignRecord`] instead.
use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum DesignError {
    /// The gene has no associated transcripts in the annotation table.
    UnknownGene(String),
    /// A requested transcript id has no sequence in the reference.
    MissingReferenceData(String),
    /// No enzyme in the catalog carries this name (or isoschizomer name).
    UnknownEnzyme(String),
    /// A catalog entry failed validation.
    InvalidEnzyme { name: String, reason: String },
    /// A transcript sequence contains letters outside the IUPAC alphabet.
    InvalidSequence { id: String, reason: String },
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl Error for DesignError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DesignError::Io(e) => Some(e),
            DesignError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for DesignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DesignError::UnknownGene(g) => write!(f, "unknown gene: {g} has no transcripts"),
            DesignError::MissingReferenceData(t) => {
                write!(f, "missing reference data: no sequence for transcript {t}")
            }
            DesignError::UnknownEnzyme(e) => write!(f, "unknown enzyme: {e}"),
            DesignError::InvalidEnzyme { name, reason } => {
                write!(f, "invalid enzyme {name}: {reason}")
            }
            DesignError::InvalidSequence { id, reason } => {
                write!(f, "invalid sequence for transcript {id}: {reason}")
            }
            DesignError::Io(e) => write!(f, "io error: {e}"),
            DesignError::Json(e) => write!(f, "json error: {e}"),
        }
    }
}

impl From<std::io::Error> for DesignError {
    fn from(err: std::io::Error) -> Self {
        DesignError::Io(err)
    }
}

impl From<serde_json::Error> for DesignError {
    fn from(err: serde_json::Error) -> Self {
        DesignError::Json(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_item() {
        let e = DesignError::UnknownGene("GAPDH".into());
        assert!(e.to_string().contains("GAPDH"));
        let e = DesignError::MissingReferenceData("ENST0001".into());
        assert!(e.to_string().contains("ENST0001"));
    }

    #[test]
    fn io_errors_keep_their_source() {
        let e: DesignError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(e.source().is_some());
    }
}
