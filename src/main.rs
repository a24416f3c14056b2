use clap::Parser;
use spool_planner::input::{check_bounds, parse_items};
use spool_planner::render;
use spool_planner::solver::Solver;
use spool_planner::subset::DEFAULT_MAX_POOL;
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "spool_planner",
    about = "Group cable runs onto fixed-length spools with minimal offcut"
)]
struct Cli {
    /// Cable lengths as LENGTH or LABEL=LENGTH (e.g. 80 95 Riser=120)
    #[arg(long = "lengths", num_args = 1..)]
    lengths: Vec<String>,

    /// Spool capacity
    #[arg(long, default_value_t = 305)]
    capacity: u32,

    /// Reject the input if any single length exceeds this bound
    #[arg(long)]
    max_length: Option<u32>,

    /// Largest number of unplaced lengths searched exhaustively
    #[arg(long, default_value_t = DEFAULT_MAX_POOL)]
    max_pool: usize,

    /// Show a fill bar for each spool
    #[arg(long)]
    bars: bool,

    /// Print the plan as JSON
    #[arg(long)]
    json: bool,

    /// Log planning steps to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", e);
    std::process::exit(1);
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::ERROR })
        .init();

    let items = parse_items(&cli.lengths).unwrap_or_else(|e| fail(e));

    if let Some(max) = cli.max_length {
        check_bounds(&items, max).unwrap_or_else(|e| fail(e));
    }

    let plan = Solver::new(cli.capacity, items)
        .with_max_pool(cli.max_pool)
        .solve()
        .unwrap_or_else(|e| fail(e));

    if cli.json {
        match serde_json::to_string_pretty(&plan) {
            Ok(json) => println!("{json}"),
            Err(e) => fail(e),
        }
    } else {
        print!("{}", render::render_plan(&plan, cli.bars));
    }
}
