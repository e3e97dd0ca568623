//! Edge-Matching Puzzle Ambiguity Finder
//!
//! Generates jigsaw-style edge-matching puzzles, either by random sampling
//! or by enumerating every canonically labelled grid, and reports the ones
//! whose pieces fit together in more than one distinct way. Runs until
//! Ctrl+C or a line on stdin, then prints how many puzzles were checked.

use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use edgematch::grid::format_grid;
use edgematch::{run_exhaustive, run_random, Config, Finding};

/// Searches for edge-matching puzzles with more than one solution.
#[derive(Parser)]
#[command(name = "edgematch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Sample random puzzles until stopped.
    Random {
        #[command(flatten)]
        run: RunArgs,
        /// Seed for reproducible runs.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Enumerate every canonically labelled puzzle.
    Exhaustive {
        #[command(flatten)]
        run: RunArgs,
    },
}

/// Settings shared by both search modes.
#[derive(Args)]
struct RunArgs {
    /// Grid width in pieces (at least 2; width × height at most 128 cells).
    #[arg(long, default_value_t = 5)]
    width: usize,
    /// Grid height in pieces (at least 2; width × height at most 128 cells).
    #[arg(long, default_value_t = 5)]
    height: usize,
    /// Number of edge shape classes.
    #[arg(long, default_value_t = 20)]
    classes: usize,
    /// Uses allowed per edge class in one grid.
    #[arg(long, default_value_t = 2)]
    supply: u32,
    /// Log progress every N puzzles.
    #[arg(long, default_value_t = 100_000)]
    report_every: u64,
    /// Stop after generating N puzzles.
    #[arg(long)]
    limit: Option<u64>,
    /// Also report ambiguous puzzles whose two solutions barely differ.
    #[arg(long)]
    keep_boring: bool,
}

impl RunArgs {
    fn into_config(self, seed: Option<u64>) -> Config {
        Config {
            width: self.width,
            height: self.height,
            classes: self.classes,
            supply_per_class: self.supply,
            report_interval: self.report_every,
            max_puzzles: self.limit,
            seed,
            keep_boring: self.keep_boring,
        }
    }
}

impl Default for RunArgs {
    fn default() -> Self {
        let config = Config::default();
        Self {
            width: config.width,
            height: config.height,
            classes: config.classes,
            supply: config.supply_per_class,
            report_every: config.report_interval,
            limit: config.max_puzzles,
            keep_boring: config.keep_boring,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let stop = install_stop_handlers()?;

    let stats = match cli.command {
        Some(Command::Exhaustive { run }) => {
            let config = run.into_config(None);
            run_exhaustive(&config, &stop, print_finding).context("exhaustive search failed")?
        }
        Some(Command::Random { run, seed }) => run_random_mode(run.into_config(seed), &stop)?,
        None => run_random_mode(RunArgs::default().into_config(None), &stop)?,
    };

    println!("checked {} puzzles", stats.attempts);
    Ok(())
}

/// Runs the random search with a seeded or entropy-backed generator.
fn run_random_mode(config: Config, stop: &AtomicBool) -> anyhow::Result<edgematch::SearchStats> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    run_random(&config, &mut rng, stop, print_finding).context("random search failed")
}

/// Sets the stop flag on Ctrl+C or on any line typed on stdin.
fn install_stop_handlers() -> anyhow::Result<Arc<AtomicBool>> {
    let stop = Arc::new(AtomicBool::new(false));

    ctrlc::set_handler({
        let stop = Arc::clone(&stop);
        move || stop.store(true, Ordering::Relaxed)
    })
    .context("failed to install Ctrl+C handler")?;

    thread::Builder::new()
        .name("stdin listener".to_owned())
        .spawn({
            let stop = Arc::clone(&stop);
            move || {
                let mut line = String::new();
                if std::io::stdin().lock().read_line(&mut line).is_ok_and(|read| read > 0) {
                    stop.store(true, Ordering::Relaxed);
                }
            }
        })
        .context("failed to spawn stdin listener")?;

    Ok(stop)
}

/// Prints an ambiguous puzzle and each of its assemblies.
fn print_finding(finding: &Finding<'_>) {
    println!(
        "Double solution found on puzzle {} ({} assemblies)!",
        finding.attempt,
        finding.solutions.len()
    );
    println!("Puzzle:");
    print!("{}", format_grid(&finding.board, finding.pieces));
    for (i, solution) in finding.solutions.iter().enumerate() {
        println!("Solution {}:", i + 1);
        print!("{}", format_grid(&finding.board, solution));
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_random_options() {
        let cli = Cli::parse_from([
            "edgematch", "random", "--width", "4", "--height", "3", "--classes", "6", "--supply",
            "3", "--limit", "10", "--seed", "42",
        ]);
        let Some(Command::Random { run, seed }) = cli.command else {
            panic!("expected the random subcommand");
        };
        let config = run.into_config(seed);
        assert_eq!(config.width, 4);
        assert_eq!(config.height, 3);
        assert_eq!(config.classes, 6);
        assert_eq!(config.supply_per_class, 3);
        assert_eq!(config.max_puzzles, Some(10));
        assert_eq!(config.seed, Some(42));
        assert!(!config.keep_boring);
    }

    #[test]
    fn test_default_run_args_match_default_config() {
        assert_eq!(RunArgs::default().into_config(None), Config::default());
    }

    #[test]
    fn test_help_names_the_cell_limit() {
        use clap::CommandFactory;
        let limit = format!("at most {} cells", edgematch::grid::MAX_CELLS);
        for mode in ["random", "exhaustive"] {
            let mut cli = Cli::command();
            let help = cli
                .find_subcommand_mut(mode)
                .unwrap()
                .render_help()
                .to_string()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ");
            assert!(help.contains(&limit), "{mode} help should mention {limit:?}");
        }
    }

    #[test]
    fn test_oversized_grid_is_rejected_before_searching() {
        let cli = Cli::parse_from(["edgematch", "random", "--width", "12", "--height", "11"]);
        let Some(Command::Random { run, seed }) = cli.command else {
            panic!("expected the random subcommand");
        };
        let stop = AtomicBool::new(false);
        let error = run_random_mode(run.into_config(seed), &stop).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<edgematch::PuzzleError>(),
            Some(edgematch::PuzzleError::InvalidDimensions { width: 12, height: 11 })
        ));
    }

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
