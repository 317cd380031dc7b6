//! Design parameters.
//!
//! [`DesignConfig`] is a plain immutable value: build it once (defaults or a
//! JSON file), then pass it by reference to every pipeline stage. Fields left
//! out of a JSON file keep their defaults.
//!
//! The thermal margin and the ΔG thresholds are constants, not fields (see
//! [`TM_MARGIN`] and [`crate::stability`]).
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::adapters::{B_PROBE_PREFIX, B_PROBE_SUFFIX, RE_PROBE_PREFIX, RE_PROBE_SUFFIX};
use crate::error::DesignError;

/// Degrees above the reaction temperature an oligo's Tm should reach.
pub const TM_MARGIN: f64 = 5.0;

/// Fixed sequences added to both ends of an assembled oligo.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoration {
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
}

impl Decoration {
    pub fn apply(&self, core: &str) -> String {
        let mut s = String::with_capacity(self.prefix.len() + core.len() + self.suffix.len());
        s.push_str(&self.prefix);
        s.push_str(core);
        s.push_str(&self.suffix);
        s
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignConfig {
    /// Starting length of the B-probe window.
    pub b_probe_base_len: usize,
    /// Temperature (°C) of the splint ligation the B-probe takes part in.
    pub ligation_temp: f64,
    /// Flank used when an enzyme has no published minimum.
    pub default_flank: usize,
    pub re_probe_decoration: Decoration,
    pub b_probe_decoration: Decoration,
}

impl Default for DesignConfig {
    fn default() -> Self {
        DesignConfig {
            b_probe_base_len: 16,
            ligation_temp: 37.0,
            default_flank: 6,
            re_probe_decoration: Decoration {
                prefix: RE_PROBE_PREFIX.to_string(),
                suffix: RE_PROBE_SUFFIX.to_string(),
            },
            b_probe_decoration: Decoration {
                prefix: B_PROBE_PREFIX.to_string(),
                suffix: B_PROBE_SUFFIX.to_string(),
            },
        }
    }
}

impl DesignConfig {
    pub fn from_json(json_text: &str) -> Result<Self, DesignError> {
        Ok(serde_json::from_str(json_text)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DesignError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}
