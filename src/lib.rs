#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! Fills a rectangular crossword grid with words from a dictionary so
//! that every maximal fillable run holds a distinct dictionary word and
//! every crossing cell agrees between the two words that share it.
//!
//! The crate performs no I/O itself (see each module's docs); [`fill_grid`]
//! is the orchestration entry point that wires the Grid Parser, Word
//! Index, Overlap Map, Domain Store, Heuristic Engine, and Search Engine
//! together into the data flow the system implements end to end.

pub mod domain;
pub mod error;
pub mod event_log;
pub mod grid;
pub mod heuristics;
pub mod overlap;
pub mod search;
pub mod types;
pub mod word_list;

use std::collections::HashMap;
use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::domain::DomainStore;
use crate::error::CrosswordError;
use crate::event_log::EventLog;
use crate::grid::{parse, render_grid, LetterPolicy, ParsedGrid, Slot};
use crate::heuristics::{Assignment, DEFAULT_SAMPLE_SIZE, DEFAULT_SAMPLING_THRESHOLD};
use crate::overlap::OverlapMap;
use crate::search::{fill, Deadline, SearchOptions, SearchStats};
use crate::types::{SlotId, WordId};
use crate::word_list::WordIndex;

/// The longest slot length this crate is expected to handle comfortably;
/// informative only, not enforced.
pub const MAX_SLOT_LENGTH: usize = 21;

/// Caller-tunable knobs for [`fill_grid`]. `Default` matches the spec's
/// own defaults (500/200 sampling, progress every 5 assignments, no
/// deadline, pre-filled letters act as blocks).
#[derive(Debug, Clone, Copy)]
pub struct SolveOptions {
    pub letter_policy: LetterPolicy,
    pub sampling_threshold: usize,
    pub sample_size: usize,
    pub progress_interval: usize,
    pub sampling_seed: u64,
    pub deadline: Option<Deadline>,
}

impl Default for SolveOptions {
    fn default() -> Self {
        SolveOptions {
            letter_policy: LetterPolicy::default(),
            sampling_threshold: DEFAULT_SAMPLING_THRESHOLD,
            sample_size: DEFAULT_SAMPLE_SIZE,
            progress_interval: 5,
            sampling_seed: 0,
            deadline: None,
        }
    }
}

/// A solved grid: the filled-in text, the raw per-slot words, the event
/// log, and how much work the search did.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub rendered_grid: String,
    pub slots: Vec<Slot>,
    pub words_by_slot: HashMap<SlotId, String>,
    pub log: EventLog,
    pub stats: SearchStats,
    pub elapsed: Duration,
}

impl SolveOutcome {
    /// Render the event log in the `*_solution_log.txt` shape from spec
    /// §6 (events, total time, per-slot assignment listing).
    #[must_use]
    pub fn render_log(&self) -> String {
        self.log.render(self.elapsed, &self.slots, &self.words_by_slot)
    }
}

/// Fill `grid_lines` using `dictionary_lines` as the word source, in one
/// call.
///
/// Neither input performs any I/O here: callers are expected to have
/// already read the grid and dictionary files (or produced their
/// contents some other way), since the core deliberately excludes file
/// I/O from its responsibilities.
pub fn fill_grid<G: AsRef<str>, W: AsRef<str>>(
    grid_lines: &[G],
    dictionary_lines: impl IntoIterator<Item = W>,
    options: SolveOptions,
) -> Result<SolveOutcome, CrosswordError> {
    let start = Instant::now();
    let mut log = EventLog::new();

    let word_index = WordIndex::build(dictionary_lines);
    log.dictionary_loaded(&word_index);

    let parsed = parse(grid_lines, options.letter_policy)?;
    log.grid_dimensions(parsed.height, parsed.width);
    log.slot_count(parsed.slots.len());

    let overlaps = OverlapMap::build(&parsed.slots);
    log.total_constraints(overlaps.constraint_count());

    let domains = initial_domains(&parsed, &word_index, &mut log);

    let mut rng = SmallRng::seed_from_u64(options.sampling_seed);
    let search_options = SearchOptions {
        sampling_threshold: options.sampling_threshold,
        sample_size: options.sample_size,
        progress_interval: options.progress_interval,
        deadline: options.deadline,
    };

    log.search_started();
    let (assignment, stats) = fill(
        &parsed.slots,
        &overlaps,
        &word_index,
        domains,
        search_options,
        &mut rng,
        &mut log,
    )?;

    let words_by_slot = resolve_words(&parsed.slots, &assignment, &word_index);
    let rendered_grid = render_grid(&parsed, &parsed.slots, &words_by_slot);

    Ok(SolveOutcome {
        rendered_grid,
        slots: parsed.slots,
        words_by_slot,
        log,
        stats,
        elapsed: start.elapsed(),
    })
}

/// Build each slot's starting domain from the word index (spec §4.4),
/// filtering down to words consistent with any pre-filled letters the
/// slot passes through, and logging a warning for any slot whose length
/// has no dictionary entries at all (spec §7, `EmptyDictionaryForLength`).
fn initial_domains(grid: &ParsedGrid, word_index: &WordIndex, log: &mut EventLog) -> DomainStore {
    let mut warned_lengths = std::collections::HashSet::new();

    let per_slot: Vec<Vec<WordId>> = grid
        .slots
        .iter()
        .map(|slot| {
            let bucket_len = word_index.words_of_length(slot.length).len();
            if bucket_len == 0 && warned_lengths.insert(slot.length) {
                log.empty_dictionary_for_length(slot.length);
            }

            (0..bucket_len)
                .filter(|&word_id| {
                    slot_matches_prefilled(grid, slot, word_index.word(slot.length, word_id))
                })
                .collect()
        })
        .collect();

    DomainStore::new(per_slot)
}

fn slot_matches_prefilled(grid: &ParsedGrid, slot: &Slot, word: &str) -> bool {
    word.chars().enumerate().all(|(i, letter)| {
        grid.required_letter(slot, i)
            .map_or(true, |required| (required as char) == letter)
    })
}

fn resolve_words(slots: &[Slot], assignment: &Assignment, word_index: &WordIndex) -> HashMap<SlotId, String> {
    assignment
        .iter()
        .map(|(&slot_id, &word_id)| {
            let word = word_index.word(slots[slot_id].length, word_id).to_string();
            (slot_id, word)
        })
        .collect()
}
