//! Grid Parser (spec §4.1): turns a character matrix into cell codes and
//! the list of slots (maximal fillable runs) those cells participate in.
//!
//! This module performs no I/O; its input is whatever sequence of lines
//! the caller already read, and its output (`ParsedGrid`) is plain data.

use std::collections::HashMap;
use std::fmt;

use crate::error::GridError;
use crate::types::SlotId;

/// A single grid cell, as read from the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    /// `?` in the input (must receive a letter).
    Fillable,
    /// `.` in the input, or any position past the end of a short row.
    Block,
    /// `A`-`Z` in the input (a pre-filled letter).
    Letter(u8),
}

impl Cell {
    fn from_char(c: char) -> Option<Cell> {
        match c {
            '?' => Some(Cell::Fillable),
            '.' => Some(Cell::Block),
            'A'..='Z' => Some(Cell::Letter(c as u8)),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Cell::Fillable => '?',
            Cell::Block => '.',
            Cell::Letter(b) => b as char,
        }
    }
}

/// The axis a slot runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Horizontal,
    Vertical,
}

/// A maximal straight run of fillable cells, length >= 2 (spec §3).
///
/// Equality and hashing follow the spec's identity rule exactly: two
/// slots are the same iff all four fields match. Slots are created once,
/// after parsing, and never mutated afterward; most code refers to a
/// slot by its [`SlotId`] (its index in the `Vec<Slot>` the parser
/// returns) rather than by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slot {
    pub direction: Direction,
    pub row: usize,
    pub col: usize,
    pub length: usize,
}

impl Slot {
    /// The `(row, col)` of each cell this slot covers, in order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.length).map(move |i| match self.direction {
            Direction::Horizontal => (self.row, self.col + i),
            Direction::Vertical => (self.row + i, self.col),
        })
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = match self.direction {
            Direction::Horizontal => "Horizontal",
            Direction::Vertical => "Vertical",
        };
        write!(
            f,
            "{} at ({},{}), length {}",
            dir, self.row, self.col, self.length
        )
    }
}

/// How pre-filled letter cells are treated when discovering slots. This
/// resolves the open question in spec §9: the source program only ever
/// extends a run through `?` cells, effectively treating a pre-filled
/// letter as a block; we keep that as the default but make the choice
/// explicit and overridable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LetterPolicy {
    /// A pre-filled letter terminates a run, exactly like a block. This
    /// matches the behavior of the program this spec was distilled from.
    #[default]
    BlockForSlots,
    /// A pre-filled letter extends a run like a fillable cell; any slot
    /// passing through it constrains its domain to words agreeing with
    /// that letter at the corresponding position.
    FillableForSlots,
}

/// Output of [`parse`]: grid dimensions, the cell matrix, and every slot
/// discovered in it.
#[derive(Debug, Clone)]
pub struct ParsedGrid {
    pub height: usize,
    pub width: usize,
    /// Row-major; `cells[r]` may be shorter than `width` for ragged
    /// input (spec §6), so use [`ParsedGrid::cell_at`] rather than
    /// indexing directly so short rows read as `Block` past their end.
    pub cells: Vec<Vec<Cell>>,
    pub slots: Vec<Slot>,
}

impl ParsedGrid {
    /// The cell at `(row, col)`, treating anything out of range (either
    /// past the grid's height, or past an individual short row's width)
    /// as `Block`.
    #[must_use]
    pub fn cell_at(&self, row: usize, col: usize) -> Cell {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(Cell::Block)
    }

    /// The letter a slot's cell is pre-filled with, if any, under the
    /// given [`LetterPolicy`]. Used to seed a slot's domain down to
    /// candidates consistent with any pre-filled letters it passes
    /// through when `policy` is [`LetterPolicy::FillableForSlots`].
    #[must_use]
    pub fn required_letter(&self, slot: &Slot, index: usize) -> Option<u8> {
        let (row, col) = slot
            .cells()
            .nth(index)
            .expect("index must be within slot length");
        match self.cell_at(row, col) {
            Cell::Letter(b) => Some(b),
            _ => None,
        }
    }
}

fn extends_run(cell: Cell, policy: LetterPolicy) -> bool {
    match cell {
        Cell::Fillable => true,
        Cell::Letter(_) => policy == LetterPolicy::FillableForSlots,
        Cell::Block => false,
    }
}

/// Parse grid lines into cells and slots (spec §4.1).
///
/// `lines` should already have trailing newlines stripped. Width is the
/// length of the first line; shorter subsequent lines are accepted (spec
/// §9: ragged rows are accepted by default) and read as `Block` past
/// their end.
pub fn parse<S: AsRef<str>>(lines: &[S], policy: LetterPolicy) -> Result<ParsedGrid, GridError> {
    let height = lines.len();
    let width = lines.first().map_or(0, |line| line.as_ref().chars().count());

    let mut cells: Vec<Vec<Cell>> = Vec::with_capacity(height);
    for (line_idx, line) in lines.iter().enumerate() {
        let mut row = Vec::with_capacity(width);
        for (col_idx, c) in line.as_ref().chars().enumerate() {
            let cell = Cell::from_char(c).ok_or(GridError::MalformedGrid {
                line: line_idx,
                column: col_idx,
                character: c,
            })?;
            row.push(cell);
        }
        cells.push(row);
    }

    let grid = ParsedGrid {
        height,
        width,
        cells,
        slots: Vec::new(),
    };

    let mut slots = Vec::new();

    // Horizontal slots: left-to-right, then top-to-bottom.
    for row in 0..height {
        let mut col = 0;
        while col < width {
            if extends_run(grid.cell_at(row, col), policy) {
                let start = col;
                while col < width && extends_run(grid.cell_at(row, col), policy) {
                    col += 1;
                }
                let length = col - start;
                if length >= 2 {
                    slots.push(Slot {
                        direction: Direction::Horizontal,
                        row,
                        col: start,
                        length,
                    });
                }
            } else {
                col += 1;
            }
        }
    }

    // Vertical slots: top-to-bottom, then left-to-right.
    for col in 0..width {
        let mut row = 0;
        while row < height {
            if extends_run(grid.cell_at(row, col), policy) {
                let start = row;
                while row < height && extends_run(grid.cell_at(row, col), policy) {
                    row += 1;
                }
                let length = row - start;
                if length >= 2 {
                    slots.push(Slot {
                        direction: Direction::Vertical,
                        row: start,
                        col,
                        length,
                    });
                }
            } else {
                row += 1;
            }
        }
    }

    Ok(ParsedGrid {
        slots,
        ..grid
    })
}

/// Render a finished assignment back into grid-shaped text (spec §6,
/// "Solution output"). Cells not covered by any slot keep their original
/// code; rows are newline-terminated.
///
/// This is the non-I/O half of the "solution output" external interface:
/// it produces a `String`, leaving writing it to a file to the caller.
#[must_use]
pub fn render_grid(
    grid: &ParsedGrid,
    slots: &[Slot],
    words_by_slot: &HashMap<SlotId, String>,
) -> String {
    let mut rendered: Vec<Vec<char>> = grid
        .cells
        .iter()
        .map(|row| row.iter().map(|c| c.as_char()).collect())
        .collect();

    for (slot_id, slot) in slots.iter().enumerate() {
        let Some(word) = words_by_slot.get(&slot_id) else {
            continue;
        };
        for ((row, col), letter) in slot.cells().zip(word.chars()) {
            rendered[row][col] = letter;
        }
    }

    let mut out = String::with_capacity((grid.width + 1) * grid.height);
    for row in rendered {
        let line: String = row.into_iter().collect();
        out.push_str(&line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_cross_has_three_slots() {
        let lines = ["???", ".?.", "???"];
        let grid = parse(&lines, LetterPolicy::BlockForSlots).unwrap();
        assert_eq!(grid.height, 3);
        assert_eq!(grid.width, 3);
        assert_eq!(grid.slots.len(), 3);
        assert!(grid.slots.contains(&Slot {
            direction: Direction::Horizontal,
            row: 0,
            col: 0,
            length: 3
        }));
        assert!(grid.slots.contains(&Slot {
            direction: Direction::Horizontal,
            row: 2,
            col: 0,
            length: 3
        }));
        assert!(grid.slots.contains(&Slot {
            direction: Direction::Vertical,
            row: 0,
            col: 1,
            length: 3
        }));
    }

    #[test]
    fn single_cell_runs_are_not_slots() {
        let lines = ["?.?", "...", "?.?"];
        let grid = parse(&lines, LetterPolicy::BlockForSlots).unwrap();
        assert!(grid.slots.is_empty());
    }

    #[test]
    fn ragged_rows_are_accepted() {
        let lines = ["????", "??"];
        let grid = parse(&lines, LetterPolicy::BlockForSlots).unwrap();
        assert_eq!(grid.width, 4);
        // Row 1 is short, so columns 2 and 3 read as Block in it.
        assert_eq!(grid.cell_at(1, 2), Cell::Block);
        assert_eq!(grid.cell_at(1, 3), Cell::Block);
    }

    #[test]
    fn malformed_character_is_rejected() {
        let lines = ["??x"];
        let err = parse(&lines, LetterPolicy::BlockForSlots).unwrap_err();
        assert_eq!(
            err,
            GridError::MalformedGrid {
                line: 0,
                column: 2,
                character: 'x'
            }
        );
    }

    #[test]
    fn prefilled_letters_block_by_default() {
        // Under the default policy, the 'A' splits the row into two
        // single-cell runs, neither of which qualifies as a slot.
        let lines = ["?A?"];
        let grid = parse(&lines, LetterPolicy::BlockForSlots).unwrap();
        assert!(grid.slots.is_empty());
    }

    #[test]
    fn prefilled_letters_extend_runs_when_configured() {
        let lines = ["?A?"];
        let grid = parse(&lines, LetterPolicy::FillableForSlots).unwrap();
        assert_eq!(grid.slots.len(), 1);
        assert_eq!(grid.required_letter(&grid.slots[0], 1), Some(b'A'));
    }

    #[test]
    fn render_grid_fills_assigned_cells() {
        let lines = ["???", ".?.", "???"];
        let grid = parse(&lines, LetterPolicy::BlockForSlots).unwrap();
        let mut words_by_slot = HashMap::new();
        for (slot_id, slot) in grid.slots.iter().enumerate() {
            let word = match (slot.direction, slot.row, slot.col) {
                (Direction::Horizontal, 0, 0) => "CAT",
                (Direction::Horizontal, 2, 0) => "AMY",
                (Direction::Vertical, 0, 1) => "ARM",
                _ => unreachable!(),
            };
            words_by_slot.insert(slot_id, word.to_string());
        }
        let rendered = render_grid(&grid, &grid.slots, &words_by_slot);
        assert_eq!(rendered, "CAT\n.R.\nAMY\n");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn slot_round_trips_through_json() {
        let slot = Slot { direction: Direction::Vertical, row: 0, col: 1, length: 3 };
        let json = serde_json::to_string(&slot).unwrap();
        let back: Slot = serde_json::from_str(&json).unwrap();
        assert_eq!(slot, back);
    }
}
