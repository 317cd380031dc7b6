//! Per-enzyme deduplication of designed oligos.
//!
//! Each role keeps its own insertion-ordered table. Registering a sequence
//! that is already present returns the existing index and bumps its usage
//! count, so indices double as stable display numbers.
use std::collections::HashMap;

use serde::Serialize;

use crate::assemble::{Oligo, Role};

/// One distinct oligo and the number of transcripts that use it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegisteredOligo {
    pub oligo: Oligo,
    pub uses: usize,
}

#[derive(Clone, Debug, Default)]
struct RoleTable {
    entries: Vec<RegisteredOligo>,
    by_sequence: HashMap<String, usize>,
}

impl RoleTable {
    fn insert(&mut self, oligo: Oligo) -> usize {
        if let Some(&idx) = self.by_sequence.get(&oligo.sequence) {
            self.entries[idx].uses += 1;
            return idx;
        }
        let idx = self.entries.len();
        self.by_sequence.insert(oligo.sequence.clone(), idx);
        self.entries.push(RegisteredOligo { oligo, uses: 1 });
        idx
    }
}

#[derive(Clone, Debug, Default)]
pub struct OligoRegistry {
    re_probes: RoleTable,
    b_probes: RoleTable,
}

impl OligoRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `oligo` under its role and return its index.
    pub fn register(&mut self, oligo: Oligo) -> usize {
        match oligo.role {
            Role::ReProbe => self.re_probes.insert(oligo),
            Role::BProbe => self.b_probes.insert(oligo),
        }
    }

    /// Distinct oligos of `role`, in insertion order.
    pub fn entries(&self, role: Role) -> &[RegisteredOligo] {
        match role {
            Role::ReProbe => &self.re_probes.entries,
            Role::BProbe => &self.b_probes.entries,
        }
    }

    pub fn get(&self, role: Role, index: usize) -> Option<&RegisteredOligo> {
        self.entries(role).get(index)
    }

    /// Number of transcripts assigned to the RE-probe at `index`.
    pub fn re_probe_uses(&self, index: usize) -> usize {
        self.re_probes.entries.get(index).map_or(0, |e| e.uses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oligo(role: Role, seq: &str) -> Oligo {
        Oligo { role, core: seq.into(), sequence: seq.into(), tm: 50.0 }
    }

    #[test]
    fn duplicates_reuse_index_and_count() {
        let mut r = OligoRegistry::new();
        assert_eq!(r.register(oligo(Role::ReProbe, "AAAC")), 0);
        assert_eq!(r.register(oligo(Role::ReProbe, "CCCA")), 1);
        assert_eq!(r.register(oligo(Role::ReProbe, "AAAC")), 0);
        assert_eq!(r.re_probe_uses(0), 2);
        assert_eq!(r.re_probe_uses(1), 1);
        assert_eq!(r.re_probe_uses(7), 0);
    }

    #[test]
    fn roles_are_tracked_separately() {
        let mut r = OligoRegistry::new();
        assert_eq!(r.register(oligo(Role::ReProbe, "ACGT")), 0);
        assert_eq!(r.register(oligo(Role::BProbe, "ACGT")), 0);
        assert_eq!(r.register(oligo(Role::BProbe, "TTTT")), 1);
        assert_eq!(r.entries(Role::ReProbe).len(), 1);
        assert_eq!(r.entries(Role::BProbe).len(), 2);
        assert_eq!(r.get(Role::BProbe, 1).unwrap().oligo.sequence, "TTTT");
    }

    #[test]
    fn insertion_order_is_stable() {
        let seqs = ["GGG", "AAA", "GGG", "CCC", "AAA"];
        let run = || {
            let mut r = OligoRegistry::new();
            let idx: Vec<usize> =
                seqs.iter().map(|s| r.register(oligo(Role::ReProbe, s))).collect();
            (idx, r)
        };
        let (a, ra) = run();
        let (b, rb) = run();
        assert_eq!(a, vec![0, 1, 0, 2, 1]);
        assert_eq!(a, b);
        assert_eq!(ra.entries(Role::ReProbe), rb.entries(Role::ReProbe));
    }
}
