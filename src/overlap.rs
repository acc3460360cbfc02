//! Overlap Map (spec §4.3): precomputes every intersection between a
//! horizontal and a vertical slot as a pair of character positions.
//!
//! Same-direction slots never overlap, and the map is built once and
//! never mutated afterward (spec §3, "Lifecycle").

use std::collections::HashMap;

use crate::grid::{Direction, Slot};
use crate::types::SlotId;

/// The positions where two crossing slots share a cell: `my_pos` is the
/// index into the slot this entry belongs to, `their_pos` the index into
/// the other slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlap {
    pub my_pos: usize,
    pub their_pos: usize,
}

/// For each slot, the set of other slots it crosses and where.
///
/// An empty inner map means the slot has no crossings at all.
#[derive(Debug, Clone, Default)]
pub struct OverlapMap {
    by_slot: Vec<HashMap<SlotId, Overlap>>,
}

impl OverlapMap {
    /// Compute every horizontal/vertical intersection in `slots` in
    /// O(slots^2) time, using the closed-form cell test from spec §4.3
    /// rather than walking each slot's cells.
    #[must_use]
    pub fn build(slots: &[Slot]) -> OverlapMap {
        let mut by_slot = vec![HashMap::new(); slots.len()];

        for (h_id, h) in slots.iter().enumerate() {
            if h.direction != Direction::Horizontal {
                continue;
            }
            for (v_id, v) in slots.iter().enumerate() {
                if v.direction != Direction::Vertical {
                    continue;
                }
                if let Some((h_pos, v_pos)) = intersect(h, v) {
                    by_slot[h_id].insert(v_id, Overlap { my_pos: h_pos, their_pos: v_pos });
                    by_slot[v_id].insert(h_id, Overlap { my_pos: v_pos, their_pos: h_pos });
                }
            }
        }

        OverlapMap { by_slot }
    }

    /// The slots `slot_id` crosses, and where.
    #[must_use]
    pub fn neighbors(&self, slot_id: SlotId) -> &HashMap<SlotId, Overlap> {
        &self.by_slot[slot_id]
    }

    /// The overlap between two specific slots, if they cross.
    #[must_use]
    pub fn overlap(&self, slot_id: SlotId, other_id: SlotId) -> Option<Overlap> {
        self.by_slot[slot_id].get(&other_id).copied()
    }

    /// Total number of crossing entries across all slots (each crossing
    /// counted from both sides), matching the "total constraint count"
    /// milestone from spec §4.7 and `crossword_csp.py`'s
    /// `total_constraints = sum(len(o) for o in overlaps.values())`.
    #[must_use]
    pub fn constraint_count(&self) -> usize {
        self.by_slot.iter().map(HashMap::len).sum()
    }
}

/// A horizontal slot at `(r, c, len_h)` and a vertical slot at
/// `(r', c', len_v)` intersect iff `c <= c' < c + len_h` and
/// `r' <= r < r' + len_v`; the shared cell is `(r, c')` (spec §4.3).
fn intersect(h: &Slot, v: &Slot) -> Option<(usize, usize)> {
    let (r, c, len_h) = (h.row, h.col, h.length);
    let (r_prime, c_prime, len_v) = (v.row, v.col, v.length);

    if c <= c_prime && c_prime < c + len_h && r_prime <= r && r < r_prime + len_v {
        Some((c_prime - c, r - r_prime))
    } else {
        None
    }
}
