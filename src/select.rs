//! Choice of the cut site for one transcript.
//!
//! Boundaries are visited from the 3'-most one towards the 5' end; a cut close
//! to the 3' end keeps more of the transcript in the read. The first boundary
//! whose fragments are long enough and whose RE-probe passes the stability
//! screen is taken. Running out of boundaries means "no design", which is not
//! an error.
use log::debug;

use crate::assemble::{assemble, Geometry, OligoPair};
use crate::config::DesignConfig;
use crate::digest::Fragment;
use crate::enzyme::Enzyme;
use crate::stability::{NearestNeighbor, Stability};

/// The accepted cut for a transcript, with the oligos built for it.
#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    /// Index `i` of the boundary between fragment `i` and fragment `i + 1`.
    pub boundary: usize,
    /// Bases 5' of the cut (cumulative length of fragments `0..=i`).
    pub five_prime_len: usize,
    pub oligos: OligoPair,
    pub stability: Stability,
}

/// Shared, read-only context for selecting cuts under one enzyme.
#[derive(Clone, Copy, Debug)]
pub struct Selector<'a> {
    enzyme: &'a Enzyme,
    config: &'a DesignConfig,
    nn: &'a NearestNeighbor,
    geometry: Geometry,
}

impl<'a> Selector<'a> {
    pub fn new(enzyme: &'a Enzyme, config: &'a DesignConfig, nn: &'a NearestNeighbor) -> Self {
        Selector { enzyme, config, nn, geometry: Geometry::new(enzyme, config) }
    }

    /// Walk the boundaries of `fragments` 3'→5' and return the first usable one.
    pub fn select(&self, id: &str, fragments: &[Fragment<'_>]) -> Option<Selection> {
        if fragments.len() < 2 {
            return None;
        }
        for boundary in (0..fragments.len() - 1).rev() {
            let upstream = &fragments[boundary];
            let downstream = &fragments[boundary + 1];
            if !self.geometry.fits(upstream, downstream) {
                debug!(
                    "{id}/{}: boundary {boundary} too close to a neighbor site ({} | {} bases)",
                    self.enzyme,
                    upstream.len(),
                    downstream.len()
                );
                continue;
            }
            let Some(oligos) = assemble(self.enzyme, self.config, upstream, downstream) else {
                continue;
            };
            let stability = self.nn.assess(
                &oligos.re_probe.core,
                Some(&oligos.b_probe.core),
                self.enzyme.incubation_temp,
            );
            if !stability.accepted() {
                debug!(
                    "{id}/{}: boundary {boundary} rejected \
                     (dimer {:.2}, hairpin {:.2}, partner {:?})",
                    self.enzyme, stability.dimer_dg, stability.hairpin_dg, stability.partner_dg
                );
                continue;
            }
            return Some(Selection {
                boundary,
                five_prime_len: downstream.start,
                oligos,
                stability,
            });
        }
        debug!("{id}/{}: no usable boundary among {} fragments", self.enzyme, fragments.len());
        None
    }
}
