//! Search Engine (spec §4.6): recursive depth-first backtracking with
//! forward checking, guided by the [`crate::heuristics`] module.
//!
//! The search is single-threaded and synchronous (spec §5): there is
//! exactly one recursion, no background tasks, and the only
//! wall-clock read is for progress events and the optional deadline.

use std::time::{Duration, Instant};

use rand::Rng;

use crate::domain::DomainStore;
use crate::error::FillError;
use crate::event_log::EventLog;
use crate::grid::Slot;
use crate::heuristics::{self, Assignment, DEFAULT_SAMPLE_SIZE, DEFAULT_SAMPLING_THRESHOLD};
use crate::overlap::OverlapMap;
use crate::types::{SlotId, WordId};
use crate::word_list::WordIndex;

/// An optional wall-clock budget for the search, checked between
/// recursion frames (spec §5: "An optional deadline may be offered by
/// the outer driver by periodically polling a cancel flag"). This is
/// purely a time-based stand-in for that flag; a caller wanting true
/// cancellation can pass a deadline that's already elapsed.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    #[must_use]
    pub fn after(duration: Duration) -> Deadline {
        Deadline { at: Instant::now() + duration }
    }

    fn is_past(self) -> bool {
        Instant::now() >= self.at
    }
}

/// Tunable knobs for a single call to [`fill`].
#[derive(Debug, Clone, Copy)]
pub struct SearchOptions {
    pub sampling_threshold: usize,
    pub sample_size: usize,
    /// Emit a progress event every time the assignment size passes a
    /// multiple of this many slots (spec §4.7). `0` disables progress
    /// events entirely.
    pub progress_interval: usize,
    pub deadline: Option<Deadline>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            sampling_threshold: DEFAULT_SAMPLING_THRESHOLD,
            sample_size: DEFAULT_SAMPLE_SIZE,
            progress_interval: 5,
            deadline: None,
        }
    }
}

/// Counters describing how much work a search call did.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchStats {
    pub nodes_visited: usize,
    pub backtracks: usize,
}

struct Context<'a> {
    slots: &'a [Slot],
    overlaps: &'a OverlapMap,
    word_index: &'a WordIndex,
    options: SearchOptions,
    start: Instant,
    log: &'a mut EventLog,
    stats: SearchStats,
}

/// Run the backtracking search described in spec §4.6 to completion,
/// logging milestones to `log` along the way.
///
/// `rng` drives the large-domain sampling in the value-ordering
/// heuristic; pass a seeded RNG for reproducible runs (spec §9).
pub fn fill(
    slots: &[Slot],
    overlaps: &OverlapMap,
    word_index: &WordIndex,
    domains: DomainStore,
    options: SearchOptions,
    rng: &mut impl Rng,
    log: &mut EventLog,
) -> Result<(Assignment, SearchStats), FillError> {
    let mut ctx = Context {
        slots,
        overlaps,
        word_index,
        options,
        start: Instant::now(),
        log,
        stats: SearchStats::default(),
    };

    let mut assignment = Assignment::new();
    let unassigned: Vec<SlotId> = (0..slots.len()).collect();

    match backtrack(&mut ctx, &mut assignment, &unassigned, domains, rng) {
        Some(result) => {
            ctx.log.success(ctx.start.elapsed());
            Ok((result, ctx.stats))
        }
        None => {
            if ctx.options.deadline.is_some_and(Deadline::is_past) {
                ctx.log.timeout(ctx.start.elapsed());
                Err(FillError::Timeout)
            } else {
                ctx.log.failure(ctx.start.elapsed());
                Err(FillError::Unsolvable)
            }
        }
    }
}

/// Returns `Some(assignment)` on success. On failure, `assignment` is
/// restored to exactly the value it had on entry (spec §8, property 7).
fn backtrack(
    ctx: &mut Context,
    assignment: &mut Assignment,
    unassigned: &[SlotId],
    domains: DomainStore,
    rng: &mut impl Rng,
) -> Option<Assignment> {
    if let Some(deadline) = ctx.options.deadline {
        if deadline.is_past() {
            return None;
        }
    }

    if assignment.len() == ctx.slots.len() {
        return Some(assignment.clone());
    }

    ctx.stats.nodes_visited += 1;
    maybe_log_progress(ctx, assignment.len());

    let slot_id = heuristics::choose_slot(unassigned, &domains, ctx.overlaps)
        .expect("unassigned is non-empty whenever assignment.len() < slots.len()");

    let remaining: Vec<SlotId> = unassigned.iter().copied().filter(|&s| s != slot_id).collect();

    let candidates = heuristics::order_candidates(
        slot_id,
        &domains,
        assignment,
        ctx.overlaps,
        ctx.slots,
        ctx.word_index,
        rng,
        ctx.options.sampling_threshold,
        ctx.options.sample_size,
    );

    for word_id in candidates {
        if !consistent_with_assignment(ctx, slot_id, word_id, assignment) {
            continue;
        }

        assignment.insert(slot_id, word_id);

        match forward_check(ctx, slot_id, word_id, assignment, &remaining, &domains) {
            Some(reductions) => {
                let next_domains = domains.reduced(reductions);
                if let Some(result) = backtrack(ctx, assignment, &remaining, next_domains, rng) {
                    return Some(result);
                }
            }
            None => {}
        }

        assignment.remove(&slot_id);
        ctx.stats.backtracks += 1;
    }

    None
}

/// Spec §4.6 step 3a: is `word` consistent with every already-assigned
/// neighbor of `slot_id`?
fn consistent_with_assignment(
    ctx: &Context,
    slot_id: SlotId,
    word_id: WordId,
    assignment: &Assignment,
) -> bool {
    let word = ctx.word_index.word(ctx.slots[slot_id].length, word_id);
    ctx.overlaps.neighbors(slot_id).iter().all(|(&other_id, overlap)| {
        match assignment.get(&other_id) {
            None => true,
            Some(&other_word_id) => {
                let other_word = ctx.word_index.word(ctx.slots[other_id].length, other_word_id);
                nth_char(word, overlap.my_pos) == nth_char(other_word, overlap.their_pos)
            }
        }
    })
}

/// Spec §4.6 step 3c: reduce every unassigned neighbor's domain to
/// candidates consistent with the newly assigned letter. Returns `None`
/// on domain wipeout (any neighbor left with zero candidates).
fn forward_check(
    ctx: &Context,
    slot_id: SlotId,
    word_id: WordId,
    assignment: &Assignment,
    unassigned_after: &[SlotId],
    domains: &DomainStore,
) -> Option<Vec<(SlotId, Vec<WordId>)>> {
    let word = ctx.word_index.word(ctx.slots[slot_id].length, word_id);
    let mut reductions = Vec::new();

    for &other_id in unassigned_after {
        let Some(overlap) = ctx.overlaps.overlap(slot_id, other_id) else {
            continue;
        };
        debug_assert!(!assignment.contains_key(&other_id));

        let required = nth_char(word, overlap.my_pos);
        let other_length = ctx.slots[other_id].length;

        let reduced: Vec<WordId> = domains
            .words(other_id)
            .iter()
            .copied()
            .filter(|&candidate| {
                let candidate_word = ctx.word_index.word(other_length, candidate);
                nth_char(candidate_word, overlap.their_pos) == required
            })
            .collect();

        if reduced.is_empty() {
            return None;
        }

        if reduced.len() < domains.len(other_id) {
            reductions.push((other_id, reduced));
        }
    }

    #[cfg(feature = "check_invariants")]
    for &(slot_id, ref reduced) in &reductions {
        debug_assert!(reduced.len() <= domains.len(slot_id), "forward check must never grow a domain");
    }

    Some(reductions)
}

fn nth_char(word: &str, pos: usize) -> char {
    word.chars().nth(pos).expect("pos must be within word length")
}

fn maybe_log_progress(ctx: &mut Context, assignment_len: usize) {
    let interval = ctx.options.progress_interval;
    if interval > 0 && assignment_len > 0 && assignment_len % interval == 0 {
        ctx.log.progress(assignment_len, ctx.slots.len(), ctx.start.elapsed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{parse, LetterPolicy};
    use crate::word_list::WordIndex;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn build_domains(slots: &[Slot], word_index: &WordIndex) -> DomainStore {
        DomainStore::new(
            slots
                .iter()
                .map(|slot| (0..word_index.words_of_length(slot.length).len()).collect())
                .collect(),
        )
    }

    #[test]
    fn solves_simple_cross() {
        let lines = ["???", ".?.", "???"];
        let grid = parse(&lines, LetterPolicy::BlockForSlots).unwrap();
        let overlaps = OverlapMap::build(&grid.slots);
        let word_index = WordIndex::build(["CAT", "COT", "ARM", "CAM"]);
        let domains = build_domains(&grid.slots, &word_index);
        let mut rng = SmallRng::seed_from_u64(1);
        let mut log = EventLog::new();

        let (assignment, _) = fill(
            &grid.slots,
            &overlaps,
            &word_index,
            domains,
            SearchOptions::default(),
            &mut rng,
            &mut log,
        )
        .expect("grid should be solvable");

        assert_eq!(assignment.len(), grid.slots.len());
        for (&slot_id, &word_id) in &assignment {
            let slot = &grid.slots[slot_id];
            let word = word_index.word(slot.length, word_id);
            assert_eq!(word.len(), slot.length);
        }
        for (slot_id, overlap_map) in (0..grid.slots.len()).map(|id| (id, overlaps.neighbors(id))) {
            for (&other_id, overlap) in overlap_map {
                let word = word_index.word(grid.slots[slot_id].length, assignment[&slot_id]);
                let other_word = word_index.word(grid.slots[other_id].length, assignment[&other_id]);
                assert_eq!(nth_char(word, overlap.my_pos), nth_char(other_word, overlap.their_pos));
            }
        }
    }

    #[test]
    fn tie_breaking_favors_dictionary_order() {
        // A single 4-cell row; with two equally good options, the
        // earlier dictionary entry wins (spec scenario E2).
        let lines = ["????"];
        let grid = parse(&lines, LetterPolicy::BlockForSlots).unwrap();
        let overlaps = OverlapMap::build(&grid.slots);
        let word_index = WordIndex::build(["ABCD", "ABCE"]);
        let domains = build_domains(&grid.slots, &word_index);
        let mut rng = SmallRng::seed_from_u64(1);
        let mut log = EventLog::new();

        let (assignment, _) = fill(
            &grid.slots,
            &overlaps,
            &word_index,
            domains,
            SearchOptions::default(),
            &mut rng,
            &mut log,
        )
        .unwrap();

        assert_eq!(word_index.word(4, assignment[&0]), "ABCD");
    }

    #[test]
    fn unsolvable_crossing_fails_cleanly() {
        // A horizontal and vertical slot crossing at their middle cell;
        // no pair of words agrees there (spec scenario E4).
        let lines = ["???", ".?.", "???"];
        let grid = parse(&lines, LetterPolicy::BlockForSlots).unwrap();
        let overlaps = OverlapMap::build(&grid.slots);
        let word_index = WordIndex::build(["ABC", "DEF"]);
        let domains = build_domains(&grid.slots, &word_index);
        let mut rng = SmallRng::seed_from_u64(1);
        let mut log = EventLog::new();

        let result = fill(
            &grid.slots,
            &overlaps,
            &word_index,
            domains,
            SearchOptions::default(),
            &mut rng,
            &mut log,
        );

        assert_eq!(result.unwrap_err(), FillError::Unsolvable);
    }

    #[test]
    fn duplicate_words_may_fill_multiple_slots() {
        // Two non-crossing horizontal slots, one dictionary word.
        let lines = ["???", "...", "???"];
        let grid = parse(&lines, LetterPolicy::BlockForSlots).unwrap();
        let overlaps = OverlapMap::build(&grid.slots);
        let word_index = WordIndex::build(["CAT"]);
        let domains = build_domains(&grid.slots, &word_index);
        let mut rng = SmallRng::seed_from_u64(1);
        let mut log = EventLog::new();

        let (assignment, _) = fill(
            &grid.slots,
            &overlaps,
            &word_index,
            domains,
            SearchOptions::default(),
            &mut rng,
            &mut log,
        )
        .unwrap();

        assert_eq!(assignment.len(), 2);
        assert!(assignment.values().all(|&word_id| word_index.word(3, word_id) == "CAT"));
    }
}
