use std::path::PathBuf;

use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use sweep_optimizer::config::SolverConfig;
use sweep_optimizer::puzzle::Puzzle;
use sweep_optimizer::render;
use sweep_optimizer::search::Solver;

/// Find step-exact routes that leave a puzzle board fully cleaned.
#[derive(Debug, Parser)]
#[command(name = "sweep", version)]
struct Cli {
    /// Puzzle file to solve.
    puzzle: PathBuf,

    /// Maximum threads working at once. Values below 1 run serially.
    #[arg(default_value_t = 1, allow_negative_numbers = true)]
    threads: i64,

    /// Do not fall back to the relaxed combo pass.
    #[arg(long)]
    strict_only: bool,

    /// Print the result as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Do not print the board before solving.
    #[arg(long)]
    quiet_board: bool,

    /// Log search progress (-v for info, -vv for debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .init();

    let puzzle = match Puzzle::from_file(&cli.puzzle) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Failed to load puzzle {}: {e}", cli.puzzle.display());
            std::process::exit(1);
        }
    };

    let threads = usize::try_from(cli.threads.max(1)).unwrap_or(1);
    let config = SolverConfig::default()
        .with_max_threads(threads)
        .with_combo_fallback(!cli.strict_only);

    if !cli.json && !cli.quiet_board {
        print!("{}", render::board(puzzle.board(), puzzle.agents()));
        println!();
    }

    let solver = Solver::new(&puzzle, config);
    let report = solver.solve();

    if cli.json {
        let passes: Vec<_> = report
            .passes
            .iter()
            .map(|p| {
                serde_json::json!({
                    "pass": p.pass,
                    "elapsed_ms": p.elapsed.as_millis() as u64,
                    "solved": p.solution.is_some(),
                    "stats": p.stats,
                })
            })
            .collect();
        let out = serde_json::json!({
            "threads": solver.shared().max_threads(),
            "passes": passes,
            "solution": report.solution(),
        });
        match serde_json::to_string_pretty(&out) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Failed to encode result: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    for p in &report.passes {
        println!("{} pass: {} ms", p.pass.label(), p.elapsed.as_millis());
    }
    match report.solution() {
        Some(solution) => {
            println!();
            print!("{}", render::solution(solution));
        }
        None => info!(passes = report.passes.len(), "search exhausted without a solution"),
    }
}
