//! CLI driver (spec §6, "Driver surface"): the I/O, argument parsing, and
//! filesystem layout the core deliberately excludes (spec §1). Everything
//! below this line is a thin shell around [`crossword_fill::fill_grid`].

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

use crossword_fill::grid::LetterPolicy;
use crossword_fill::search::Deadline;
use crossword_fill::{fill_grid, SolveOptions};

/// Solve a crossword grid with words from a dictionary.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Path to the grid file (`?` fillable, `.` block, `A`-`Z` pre-filled).
    grid_file: PathBuf,

    /// Path to the dictionary file, one word per line.
    dictionary_file: PathBuf,

    /// Directory solution grids are written under, as `<name>_solution.txt`.
    #[arg(long, default_value = "solutions")]
    solutions_dir: PathBuf,

    /// Directory logs are written under, as `<name>_solution_log.txt`.
    #[arg(long, default_value = "logs")]
    logs_dir: PathBuf,

    /// Seed for the large-domain sampling PRNG (spec §4.5/§9); fixed by
    /// default so runs are reproducible.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Abort the search after this many seconds, reporting a timeout
    /// instead of running forever on an unsolvable instance.
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Treat pre-filled letters as extending slots instead of blocking
    /// them (spec §9's open question on letter policy).
    #[arg(long)]
    letters_extend_slots: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            log::error!("{message}");
            eprintln!("Error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    log::info!("Loading grid from {}", cli.grid_file.display());
    let grid_text = fs::read_to_string(&cli.grid_file)
        .map_err(|e| format!("reading grid file '{}': {e}", cli.grid_file.display()))?;
    let grid_lines: Vec<&str> = grid_text.lines().collect();

    log::info!("Loading words from {}", cli.dictionary_file.display());
    let dictionary_text = fs::read_to_string(&cli.dictionary_file)
        .map_err(|e| format!("reading dictionary file '{}': {e}", cli.dictionary_file.display()))?;
    let dictionary_lines: Vec<&str> = dictionary_text.lines().collect();

    let options = SolveOptions {
        letter_policy: if cli.letters_extend_slots {
            LetterPolicy::FillableForSlots
        } else {
            LetterPolicy::BlockForSlots
        },
        sampling_seed: cli.seed,
        deadline: cli.timeout_secs.map(|secs| Deadline::after(Duration::from_secs(secs))),
        ..SolveOptions::default()
    };

    log::info!("Starting CSP solver...");
    let outcome = match fill_grid(&grid_lines, dictionary_lines, options) {
        Ok(outcome) => outcome,
        Err(err) => {
            log::warn!("solver finished without a solution: {err}");
            return Err(err.to_string());
        }
    };

    let grid_stem = file_stem(&cli.grid_file);

    fs::create_dir_all(&cli.solutions_dir)
        .map_err(|e| format!("creating solutions directory '{}': {e}", cli.solutions_dir.display()))?;
    fs::create_dir_all(&cli.logs_dir)
        .map_err(|e| format!("creating logs directory '{}': {e}", cli.logs_dir.display()))?;

    let solution_path = cli.solutions_dir.join(format!("{grid_stem}_solution.txt"));
    let log_path = cli.logs_dir.join(format!("{grid_stem}_solution_log.txt"));

    log::info!("Writing solution to files...");
    fs::write(&solution_path, &outcome.rendered_grid)
        .map_err(|e| format!("writing solution file '{}': {e}", solution_path.display()))?;

    fs::write(&log_path, outcome.render_log())
        .map_err(|e| format!("writing log file '{}': {e}", log_path.display()))?;

    println!("Solution found!");
    println!("Solution written to {}", solution_path.display());
    println!("Solution log written to {}", log_path.display());
    Ok(())
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "grid".to_string())
}
