/*!
 * trace-report
 *
 * Aggregates ARRIVE/START/END records from a directory of benchmark traces
 * and prints average makespan, turnaround and response time.
 */

use clap::Parser;
use rtos_trace::{init_tracing, report, ParseMode, ReportConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "trace-report", version, about = "Average schedule metrics over benchmark traces")]
struct Cli {
    /// Directory containing one trace file per benchmark run
    dir: PathBuf,

    /// Expected number of tasks per set (default: largest task id + 1)
    #[arg(long)]
    tasks: Option<usize>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Fail on malformed lines inside output regions
    #[arg(long)]
    strict: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing("warn");

    let config = ReportConfig {
        dir: cli.dir,
        tasks: cli.tasks,
        json: cli.json,
        mode: if cli.strict {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        },
    };

    let summary = match report::run(&config) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            return ExitCode::FAILURE;
        }
    };

    info!(sets = summary.sets, tasks = summary.tasks, "Report complete");

    if config.json {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to encode summary: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{}", summary);
    }

    ExitCode::SUCCESS
}
