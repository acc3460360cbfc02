//! Error taxonomy for the crate (see spec §7).
//!
//! `EmptyDictionaryForLength` and `Unsolvable` are not represented here:
//! the former is surfaced as a warning [`crate::event_log::EventLog`]
//! entry rather than a hard error (an empty domain only becomes fatal if
//! the search actually reaches that slot, which it always eventually
//! does, but the failure is reported through [`FillError::Unsolvable`]
//! rather than re-derived from the warning), and the latter is one of
//! `FillError`'s variants rather than a parse-time error.

use thiserror::Error;

/// Failure produced by [`crate::grid::parse`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// A grid line contained a byte that isn't `?`, `.`, or `A`-`Z`.
    #[error(
        "malformed grid: line {line} contains invalid character {character:?} \
         at column {column} (expected '?', '.', or 'A'-'Z')"
    )]
    MalformedGrid {
        line: usize,
        column: usize,
        character: char,
    },
}

/// Failure produced by [`crate::search::fill`] (and, transitively, by
/// [`crate::fill_grid`]).
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum FillError {
    /// The backtracking search exhausted every candidate without finding
    /// a complete, consistent assignment.
    #[error("search exhausted all candidates without finding a solution")]
    Unsolvable,

    /// The caller-supplied deadline elapsed before the search completed.
    #[error("search aborted after reaching its deadline")]
    Timeout,
}

/// Top-level error from [`crate::fill_grid`], covering both stages of
/// the pipeline it orchestrates.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CrosswordError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Fill(#[from] FillError),
}
