//! Event Log (spec §4.7): an append-only, in-memory record of
//! human-readable progress messages, surfaced to the caller on
//! completion. No structured logging is required by the contract (spec
//! §9), just a sequence of strings.

use std::collections::HashMap;
use std::time::Duration;

use crate::grid::Slot;
use crate::types::SlotId;
use crate::word_list::WordIndex;

/// An append-only sequence of progress messages.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<String>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> EventLog {
        EventLog::default()
    }

    /// The events recorded so far, in append order.
    #[must_use]
    pub fn events(&self) -> &[String] {
        &self.events
    }

    fn push(&mut self, message: impl Into<String>) {
        self.events.push(message.into());
    }

    /// Dictionary load summary, per length (spec §4.7).
    pub fn dictionary_loaded(&mut self, word_index: &WordIndex) {
        self.push(format!(
            "Loaded {} words grouped by length",
            word_index.total_words()
        ));
        for (length, count) in word_index.length_counts() {
            self.push(format!("  Length {length}: {count} words"));
        }
    }

    /// A slot length with no matching dictionary entries (spec §7,
    /// `EmptyDictionaryForLength`), logged as a warning rather than a
    /// hard error, per the propagation policy in spec §7.
    pub fn empty_dictionary_for_length(&mut self, length: usize) {
        self.push(format!("Warning: No words of length {length} in the dictionary"));
    }

    pub fn grid_dimensions(&mut self, height: usize, width: usize) {
        self.push(format!("Grid size: {height}x{width}"));
    }

    pub fn slot_count(&mut self, count: usize) {
        self.push(format!("Number of slots: {count}"));
    }

    pub fn total_constraints(&mut self, count: usize) {
        self.push(format!("Total constraints: {count}"));
    }

    pub fn search_started(&mut self) {
        self.push("Starting backtracking search with MRV, Degree, and LCV heuristics...");
    }

    /// Emitted whenever the assignment size passes a multiple of the
    /// configured progress interval (spec §4.7).
    pub fn progress(&mut self, assigned: usize, total: usize, elapsed: Duration) {
        self.push(format!(
            "Current assignment size: {assigned}/{total} in {:.2} seconds",
            elapsed.as_secs_f64()
        ));
    }

    pub fn success(&mut self, elapsed: Duration) {
        self.push(format!("Solution found in {:.2} seconds!", elapsed.as_secs_f64()));
    }

    pub fn failure(&mut self, elapsed: Duration) {
        self.push(format!(
            "No solution found after {:.2} seconds.",
            elapsed.as_secs_f64()
        ));
    }

    pub fn timeout(&mut self, elapsed: Duration) {
        self.push(format!(
            "Search aborted after reaching its deadline, after {:.2} seconds.",
            elapsed.as_secs_f64()
        ));
    }

    /// Render the full log in the `*_solution_log.txt` shape from spec
    /// §6: one event per line, a total-time line, then the per-slot
    /// assignment listing.
    #[must_use]
    pub fn render(
        &self,
        total_elapsed: Duration,
        slots: &[Slot],
        words_by_slot: &HashMap<SlotId, String>,
    ) -> String {
        let mut out = String::new();
        for event in &self.events {
            out.push_str(event);
            out.push('\n');
        }

        out.push_str(&format!("\nTotal time: {:.2} seconds\n", total_elapsed.as_secs_f64()));

        out.push_str("\nWord assignments:\n");
        for (slot_id, slot) in slots.iter().enumerate() {
            let Some(word) = words_by_slot.get(&slot_id) else {
                continue;
            };
            out.push_str(&format!("{slot}: {word}\n"));
        }

        out
    }
}
