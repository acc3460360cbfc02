//! Small index-based id aliases shared across the crate.
//!
//! Slots and words are both referred to by position in a backing `Vec`
//! rather than by value almost everywhere in the hot path; `SlotId` and
//! `WordId` make that indirection self-documenting at call sites.

/// Index into the slot list produced by [`crate::grid::parse`].
pub type SlotId = usize;

/// Index into a single length-bucket of a [`crate::word_list::WordIndex`].
///
/// A `WordId` is only meaningful alongside the word length it was looked
/// up for; the same numeric id in two different length buckets refers to
/// two unrelated words.
pub type WordId = usize;
