//! End-to-end tests driving the public `fill_grid` API against grid and
//! dictionary text read from real files on disk, the way a caller who
//! isn't a unit test would use the crate.

use std::fs;

use indoc::indoc;
use tempfile::tempdir;

use crossword_fill::{fill_grid, SolveOptions};

fn read_lines(path: &std::path::Path) -> Vec<String> {
    fs::read_to_string(path).unwrap().lines().map(str::to_string).collect()
}

#[test]
fn fills_a_small_grid_from_files() {
    let dir = tempdir().unwrap();

    let grid_path = dir.path().join("grid.txt");
    fs::write(
        &grid_path,
        indoc! {"
            ???
            .?.
            ???
        "},
    )
    .unwrap();

    let dictionary_path = dir.path().join("words.txt");
    fs::write(&dictionary_path, "CAT\nCOT\nARM\nCAM\n").unwrap();

    let grid_lines = read_lines(&grid_path);
    let dictionary_lines = read_lines(&dictionary_path);

    let outcome = fill_grid(&grid_lines, dictionary_lines, SolveOptions::default()).unwrap();

    assert_eq!(outcome.words_by_slot.len(), 3);
    assert_eq!(outcome.rendered_grid.lines().count(), 3);
    for line in outcome.rendered_grid.lines() {
        assert!(!line.contains('?'), "every fillable cell should be assigned: {line}");
    }
}

#[test]
fn reports_unsolvable_grid_in_the_log() {
    let grid_lines = vec!["???".to_string(), ".?.".to_string(), "???".to_string()];
    let dictionary_lines = vec!["ABC".to_string(), "DEF".to_string()];

    let err = fill_grid(&grid_lines, dictionary_lines, SolveOptions::default()).unwrap_err();
    assert_eq!(err.to_string(), "search exhausted all candidates without finding a solution");
}

#[test]
fn rejects_malformed_grid_files() {
    let grid_lines = vec!["?a?".to_string()];
    let dictionary_lines: Vec<String> = vec![];

    let err = fill_grid(&grid_lines, dictionary_lines, SolveOptions::default()).unwrap_err();
    assert!(err.to_string().contains("malformed grid"));
}

#[test]
fn render_log_lists_every_solved_slot() {
    let grid_lines = vec!["????".to_string()];
    let dictionary_lines = vec!["ABCD".to_string()];

    let outcome = fill_grid(&grid_lines, dictionary_lines, SolveOptions::default()).unwrap();
    let rendered_log = outcome.render_log();

    assert!(rendered_log.contains("Solution found"));
    assert!(rendered_log.contains("Horizontal at (0,0), length 4: ABCD"));
}
