/*!
 * trace-gantt
 *
 * Renders which task held a core over time from a context-switch trace.
 * Settings come from an optional JSON config file, overridden by flags.
 */

use clap::Parser;
use miette::Diagnostic;
use rtos_trace::trace::GrammarKind;
use rtos_trace::{gantt, init_tracing, GrammarSpec, ParseMode, Tick, VisualizerSettings};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "trace-gantt", version, about = "Gantt chart of core occupancy from a trace log")]
struct Cli {
    /// JSON file with visualizer settings
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Trace log to read
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// Trace end time in ms; closes the last interval
    #[arg(long)]
    end: Option<Tick>,

    /// Line format: core_first, tick_first or custom
    #[arg(long, value_parser = GrammarKind::from_str)]
    grammar: Option<GrammarKind>,

    /// Core whose occupancy is charted
    #[arg(long)]
    core: Option<u32>,

    /// Task name prefix before the task id
    #[arg(long)]
    prefix: Option<String>,

    /// Regex with named groups `tick` and `task` (implies --grammar custom)
    #[arg(long)]
    pattern: Option<String>,

    /// Chart title
    #[arg(long)]
    title: Option<String>,

    /// PNG path, overwritten if present
    #[arg(long, short)]
    output: Option<PathBuf>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Fail on trace lines that do not match the grammar
    #[arg(long)]
    strict: bool,
}

impl Cli {
    /// Grammar flags layered over `base`, or `None` when no grammar flag is set
    fn grammar_override(
        &self,
        base: Option<&GrammarSpec>,
    ) -> Result<Option<GrammarSpec>, rtos_trace::ParseError> {
        if self.grammar.is_none()
            && self.core.is_none()
            && self.prefix.is_none()
            && self.pattern.is_none()
        {
            return Ok(None);
        }

        base.cloned()
            .unwrap_or_default()
            .layered(
                self.grammar,
                self.core,
                self.prefix.as_deref(),
                self.pattern.as_deref(),
            )
            .map(Some)
    }
}

fn fail<E: Diagnostic + Send + Sync + 'static>(e: E) -> ExitCode {
    eprintln!("{:?}", miette::Report::new(e));
    ExitCode::FAILURE
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

    let base = match &cli.config {
        Some(path) => match VisualizerSettings::from_file(path) {
            Ok(settings) => settings,
            Err(e) => return fail(e),
        },
        None => VisualizerSettings::default(),
    };

    let grammar = match cli.grammar_override(base.grammar.as_ref()) {
        Ok(grammar) => grammar,
        Err(e) => return fail(e),
    };

    let overrides = VisualizerSettings {
        input: cli.input,
        grammar,
        end_ms: cli.end,
        title: cli.title,
        output: cli.output,
        width: cli.width,
        height: cli.height,
        mode: cli.strict.then_some(ParseMode::Strict),
    };

    let config = match base.merge(overrides).resolve() {
        Ok(config) => config,
        Err(e) => return fail(e),
    };

    match gantt::run(&config) {
        Ok(layout) => {
            info!(
                output = %config.output.display(),
                bars = layout.bars.len(),
                tasks = layout.legend.len(),
                "Gantt chart rendered"
            );
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}
