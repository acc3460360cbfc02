//! Heuristic Engine (spec §4.5): variable ordering (combined MRV +
//! degree) and value ordering (Least-Constraining-Value, with sampling
//! above a threshold for large domains).
//!
//! Both functions are pure: they only look at the current
//! `(assignment, domains)` pair and the overlap map, with no hidden
//! state, as spec §9 requires ("Heuristics as pure functions").

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::DomainStore;
use crate::grid::Slot;
use crate::overlap::OverlapMap;
use crate::types::{SlotId, WordId};
use crate::word_list::WordIndex;

pub type Assignment = std::collections::HashMap<SlotId, WordId>;

/// Above this many candidates, [`order_candidates`] only fully scores a
/// random sample rather than the whole domain (spec §4.5).
pub const DEFAULT_SAMPLING_THRESHOLD: usize = 500;
/// Size of that sample.
pub const DEFAULT_SAMPLE_SIZE: usize = 200;

/// Pick the next slot to assign: the unassigned slot with the fewest
/// remaining candidates (MRV), breaking ties by the slot with the most
/// unassigned neighbors (degree), and any further tie deterministically
/// by the lower `SlotId`.
#[must_use]
pub fn choose_slot(
    unassigned: &[SlotId],
    domains: &DomainStore,
    overlaps: &OverlapMap,
) -> Option<SlotId> {
    let min_size = unassigned.iter().map(|&slot_id| domains.len(slot_id)).min()?;
    let candidates: Vec<SlotId> = unassigned
        .iter()
        .copied()
        .filter(|&slot_id| domains.len(slot_id) == min_size)
        .collect();

    if candidates.len() == 1 {
        return Some(candidates[0]);
    }

    let unassigned_set: HashSet<SlotId> = unassigned.iter().copied().collect();
    candidates.into_iter().max_by_key(|&slot_id| {
        let degree = overlaps
            .neighbors(slot_id)
            .keys()
            .filter(|neighbor| unassigned_set.contains(neighbor))
            .count();
        (degree, std::cmp::Reverse(slot_id))
    })
}

fn char_at(word: &str, pos: usize) -> char {
    word.chars().nth(pos).expect("pos must be within word length")
}

/// How many live candidates of an unassigned neighbor `other` would be
/// eliminated by assigning `word` (at `slot`'s length) to `slot`.
fn conflicts(
    slot_id: SlotId,
    word: &str,
    domains: &DomainStore,
    assignment: &Assignment,
    overlaps: &OverlapMap,
    slots: &[Slot],
    word_index: &WordIndex,
) -> usize {
    overlaps
        .neighbors(slot_id)
        .iter()
        .filter(|(other_id, _)| !assignment.contains_key(*other_id))
        .map(|(&other_id, overlap)| {
            let other_length = slots[other_id].length;
            let required = char_at(word, overlap.my_pos);
            domains
                .words(other_id)
                .iter()
                .filter(|&&other_word_id| {
                    let other_word = word_index.word(other_length, other_word_id);
                    char_at(other_word, overlap.their_pos) != required
                })
                .count()
        })
        .sum()
}

/// Order a slot's current domain for trial, least-constraining value
/// first (spec §4.5). Domains larger than `sampling_threshold` only have
/// a random sample of `sample_size` fully scored and tried first; the
/// rest follow in their original (dictionary input) order.
#[must_use]
#[allow(clippy::too_many_arguments)]
pub fn order_candidates(
    slot_id: SlotId,
    domains: &DomainStore,
    assignment: &Assignment,
    overlaps: &OverlapMap,
    slots: &[Slot],
    word_index: &WordIndex,
    rng: &mut impl Rng,
    sampling_threshold: usize,
    sample_size: usize,
) -> Vec<WordId> {
    let domain = domains.words(slot_id);
    let slot_length = slots[slot_id].length;

    let score = |word_id: WordId| {
        let word = word_index.word(slot_length, word_id);
        conflicts(slot_id, word, domains, assignment, overlaps, slots, word_index)
    };

    if domain.len() > sampling_threshold {
        let mut sampled: Vec<WordId> = domain
            .choose_multiple(rng, sample_size.min(domain.len()))
            .copied()
            .collect();
        let sampled_set: HashSet<WordId> = sampled.iter().copied().collect();
        sampled.sort_by_key(|&word_id| score(word_id));

        let remainder = domain.iter().copied().filter(|word_id| !sampled_set.contains(word_id));
        sampled.into_iter().chain(remainder).collect()
    } else {
        let mut ordered: Vec<WordId> = domain.to_vec();
        ordered.sort_by_key(|&word_id| score(word_id));
        ordered
    }
}
