//! Nearest-neighbor screen for self-dimers and hairpins.
//!
//! Every estimate is built from the same primitive: lay two stretches of
//! sequence antiparallel, walk the dinucleotide steps, and add up the ΔH/ΔS of
//! each step found in the stacking table. Steps the table does not know
//! (double mismatches, ambiguous letters) add nothing. Free energy is then
//!
//! ```text
//! ΔG = ΔH − (274.15 + T°C) · ΔS / 1000
//! ```
//!
//! The `274.15` offset is what existing reports were produced with and is
//! kept as is. ΔS is tabulated in cal/(mol·K) and converted to kcal.
//!
//! For every scan the **minimum** ΔG over all alignments is kept, and the
//! fixed thresholds are applied to that minimum.
use std::collections::HashMap;

use crate::data::nearest_neighbor::{SINGLE_MISMATCH, WATSON_CRICK};

/// Reject when the self-dimer (or partner duplex) ΔG falls below this.
pub const DIMER_DG_THRESHOLD: f64 = -6.0;
/// Reject when the hairpin ΔG falls below this.
pub const HAIRPIN_DG_THRESHOLD: f64 = -3.0;
/// Celsius-to-Kelvin offset used in the free-energy term.
pub const KELVIN_OFFSET: f64 = 274.15;
/// Smallest hairpin loop considered.
pub const MIN_HAIRPIN_LOOP: usize = 3;

/// Gibbs free energy (kcal/mol) from ΔH (kcal/mol) and ΔS (cal/(mol·K)).
#[inline]
pub fn gibbs(dh: f64, ds: f64, temp_c: f64) -> f64 {
    dh - (KELVIN_OFFSET + temp_c) * ds / 1000.0
}

/// Immutable stacking table, built once and shared by reference.
#[derive(Clone, Debug)]
pub struct NearestNeighbor {
    stacks: HashMap<[u8; 4], (f64, f64)>,
}

impl Default for NearestNeighbor {
    fn default() -> Self {
        Self::santalucia_peyret()
    }
}

impl NearestNeighbor {
    /// Watson–Crick stacks plus single-mismatch stacks.
    pub fn santalucia_peyret() -> Self {
        let mut stacks = HashMap::with_capacity(WATSON_CRICK.len() + SINGLE_MISMATCH.len());
        for (key, dh, ds) in WATSON_CRICK.iter().chain(SINGLE_MISMATCH.iter()) {
            let b = key.as_bytes();
            stacks.insert([b[0], b[1], b[3], b[4]], (*dh, *ds));
        }
        NearestNeighbor { stacks }
    }

    /// ΔH/ΔS of one step: top 5'-t0 t1-3' over bottom 3'-b0 b1-5'.
    pub fn stack(&self, top: [u8; 2], bottom: [u8; 2]) -> Option<(f64, f64)> {
        let t = [top[0].to_ascii_uppercase(), top[1].to_ascii_uppercase()];
        let b = [bottom[0].to_ascii_uppercase(), bottom[1].to_ascii_uppercase()];
        self.stacks
            .get(&[t[0], t[1], b[0], b[1]])
            .or_else(|| self.stacks.get(&[b[1], b[0], t[1], t[0]]))
            .copied()
    }

    /// Summed ΔH/ΔS of two aligned stretches. `bottom` is written 3'→5' so
    /// that `top[i]` faces `bottom[i]`.
    fn duplex(&self, top: &[u8], bottom: &[u8]) -> (f64, f64) {
        let n = top.len().min(bottom.len());
        let mut dh = 0.0;
        let mut ds = 0.0;
        for i in 1..n {
            if let Some((h, s)) = self.stack([top[i - 1], top[i]], [bottom[i - 1], bottom[i]]) {
                dh += h;
                ds += s;
            }
        }
        (dh, ds)
    }

    /// ΔG of every antiparallel alignment of `a` against `b`.
    ///
    /// Alignments shift `b` along `a` and then `a` along `b`, each keeping an
    /// overlap of at least two bases. For `a == b` the first half alone covers
    /// the self-alignment offsets `0..=len-2`.
    pub fn alignment_profile(&self, a: &str, b: &str, temp_c: f64) -> Vec<f64> {
        let top = a.as_bytes();
        let bottom: Vec<u8> = b.bytes().rev().collect();
        let mut out = Vec::new();
        if top.len() < 2 || bottom.len() < 2 {
            return out;
        }
        for offset in 0..=top.len() - 2 {
            let (dh, ds) = self.duplex(&top[offset..], &bottom);
            out.push(gibbs(dh, ds, temp_c));
        }
        for offset in 1..=bottom.len() - 2 {
            let (dh, ds) = self.duplex(top, &bottom[offset..]);
            out.push(gibbs(dh, ds, temp_c));
        }
        out
    }

    /// Minimum ΔG over all antiparallel alignments of `a` against `b`.
    pub fn duplex_dg(&self, a: &str, b: &str, temp_c: f64) -> f64 {
        min_or_zero(self.alignment_profile(a, b, temp_c))
    }

    /// Minimum self-dimer ΔG of `oligo`.
    pub fn self_dimer_dg(&self, oligo: &str, temp_c: f64) -> f64 {
        self.duplex_dg(oligo, oligo, temp_c)
    }

    /// Minimum hairpin ΔG of `oligo`.
    ///
    /// Each fold point splits the oligo into a 5' arm, a loop of at least
    /// [`MIN_HAIRPIN_LOOP`] bases and a 3' arm; the arms are stacked
    /// antiparallel from the loop outwards with the same stacking sum as the
    /// duplex scan. The loop itself contributes nothing.
    pub fn hairpin_dg(&self, oligo: &str, temp_c: f64) -> f64 {
        let s = oligo.as_bytes();
        let n = s.len();
        let mut best = f64::INFINITY;
        for p in 2..n {
            let mut loop_len = MIN_HAIRPIN_LOOP;
            while p + loop_len + 2 <= n {
                let m = p.min(n - p - loop_len);
                let top = &s[p - m..p];
                let arm = &s[p + loop_len..p + loop_len + m];
                let bottom: Vec<u8> = arm.iter().rev().copied().collect();
                let (dh, ds) = self.duplex(top, &bottom);
                best = best.min(gibbs(dh, ds, temp_c));
                loop_len += 1;
            }
        }
        if best.is_finite() { best } else { 0.0 }
    }

    /// Score `oligo` at `temp_c`, optionally against the partner oligo it
    /// shares the reaction with.
    pub fn assess(&self, oligo: &str, partner: Option<&str>, temp_c: f64) -> Stability {
        Stability {
            dimer_dg: self.self_dimer_dg(oligo, temp_c),
            hairpin_dg: self.hairpin_dg(oligo, temp_c),
            partner_dg: partner.map(|p| self.duplex_dg(oligo, p, temp_c)),
        }
    }
}

fn min_or_zero(values: Vec<f64>) -> f64 {
    let m = values.into_iter().fold(f64::INFINITY, f64::min);
    if m.is_finite() { m } else { 0.0 }
}

/// Result of screening one oligo.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stability {
    pub dimer_dg: f64,
    pub hairpin_dg: f64,
    pub partner_dg: Option<f64>,
}

impl Stability {
    pub fn accepted(&self) -> bool {
        self.dimer_dg >= DIMER_DG_THRESHOLD
            && self.hairpin_dg >= HAIRPIN_DG_THRESHOLD
            && self.partner_dg.map_or(true, |dg| dg >= DIMER_DG_THRESHOLD)
    }
}
