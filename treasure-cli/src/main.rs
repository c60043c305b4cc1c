mod logic;
mod play;
mod source;
mod util;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdin, stdout};
use std::path::PathBuf;
use std::time::Instant;

use logic::{
    DEFAULT_MAX_TURNS, GameplayStrategy, RunRecord, SimulationConfig, aggregate_runs, clock_seed,
    resolve_seed_inputs, run_simulation,
};
use play::Console;
use source::FileConfig;
use treasure_game::{ConfigSource, Difficulty, GameEngine};
use util::split_csv;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Mode {
    /// Play interactively on the console
    Play,
    /// Run automated strategies and report the results
    Simulate,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DifficultyArg {
    Easy,
    Normal,
    Hard,
    Cheat,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Self::Easy,
            DifficultyArg::Normal => Self::Normal,
            DifficultyArg::Hard => Self::Hard,
            DifficultyArg::Cheat => Self::Cheat,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "treasure-hunter", version)]
#[command(about = "Hunt for buried treasure town by town, or let the bots do it")]
struct Args {
    /// Play interactively or run the simulator
    #[arg(long, value_enum, default_value_t = Mode::Play)]
    mode: Mode,

    /// Hunter name (skips the name prompt)
    #[arg(long)]
    name: Option<String>,

    /// Difficulty (skips the difficulty prompt)
    #[arg(long, value_enum)]
    difficulty: Option<DifficultyArg>,

    /// Seed for an interactive hunt; taken from the clock when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file overriding the difficulty profiles
    #[arg(long)]
    config: Option<PathBuf>,

    /// Strategies to simulate (comma-separated, or "all")
    #[arg(long, default_value = "all")]
    strategies: String,

    /// Seeds to simulate (comma-separated)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Difficulties to simulate (comma-separated, or "all")
    #[arg(long, default_value = "normal")]
    difficulties: String,

    /// Runs per seed; later iterations offset the seed
    #[arg(long, default_value_t = 1)]
    iterations: u64,

    /// Turns before a simulated hunt counts as stalled
    #[arg(long, default_value_t = DEFAULT_MAX_TURNS)]
    max_turns: u32,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let source = FileConfig::new(args.config.clone());

    match args.mode {
        Mode::Play => play(&args, source),
        Mode::Simulate => simulate(&args, &source),
    }
}

fn play(args: &Args, source: FileConfig) -> Result<()> {
    let engine = GameEngine::new(source);
    let mut console = Console::new(stdin().lock(), stdout().lock());
    let Some((name, difficulty)) =
        console.setup(args.name.clone(), args.difficulty.map(Difficulty::from))?
    else {
        return Ok(());
    };
    let seed = args.seed.unwrap_or_else(clock_seed);
    log::info!("starting {difficulty} hunt for {name} with seed {seed}");

    let mut session = engine
        .create_session(&name, difficulty, seed)
        .context("failed to start the hunt")?;
    let outcome = console.run(&mut session)?;
    log::info!(
        "hunt finished: {outcome} after {} towns",
        session.towns_visited()
    );
    Ok(())
}

fn simulate(args: &Args, source: &FileConfig) -> Result<()> {
    announce_banner();
    let config = source
        .load_config()
        .context("failed to load game configuration")?;
    let strategies = expand_strategies(&args.strategies)?;
    let difficulties = expand_difficulties(&args.difficulties)?;
    let seeds = resolve_seed_inputs(&split_csv(&args.seeds))?;
    let start_time = Instant::now();

    let mut records: Vec<RunRecord> = Vec::new();
    for &strategy in &strategies {
        for &difficulty in &difficulties {
            for &seed in &seeds {
                for iteration in 0..args.iterations.max(1) {
                    let sim = SimulationConfig::new(difficulty, strategy, seed.wrapping_add(iteration))
                        .with_max_turns(args.max_turns);
                    let record = run_simulation(&config, sim)?;
                    if args.verbose {
                        println!(
                            "🎲 [{} {} seed {}] {} in {} turns",
                            strategy.label().green(),
                            difficulty,
                            record.seed,
                            record.outcome,
                            record.turns
                        );
                    }
                    records.push(record);
                }
            }
        }
    }

    write_reports(args, &records, start_time)
}

fn announce_banner() {
    println!("{}", "🏴‍☠️ Treasure Hunter Simulator".bright_cyan().bold());
    println!("{}", "=============================".cyan());
}

fn expand_strategies(raw: &str) -> Result<Vec<GameplayStrategy>> {
    let tokens = split_csv(raw);
    if tokens.iter().any(|token| token.eq_ignore_ascii_case("all")) {
        return Ok(GameplayStrategy::ALL.to_vec());
    }
    let mut strategies = Vec::new();
    for token in &tokens {
        let Some(strategy) = GameplayStrategy::parse(token) else {
            bail!("Unknown strategy: {token}");
        };
        if !strategies.contains(&strategy) {
            strategies.push(strategy);
        }
    }
    if strategies.is_empty() {
        bail!("No strategies selected");
    }
    Ok(strategies)
}

fn expand_difficulties(raw: &str) -> Result<Vec<Difficulty>> {
    let tokens = split_csv(raw);
    if tokens.iter().any(|token| token.eq_ignore_ascii_case("all")) {
        return Ok(Difficulty::ALL.to_vec());
    }
    let mut difficulties = Vec::new();
    for token in &tokens {
        let Some(&difficulty) = Difficulty::ALL
            .iter()
            .find(|tier| tier.label().eq_ignore_ascii_case(token))
        else {
            bail!("Unknown difficulty: {token}");
        };
        if !difficulties.contains(&difficulty) {
            difficulties.push(difficulty);
        }
    }
    if difficulties.is_empty() {
        bail!("No difficulties selected");
    }
    Ok(difficulties)
}

fn write_reports(args: &Args, records: &[RunRecord], start_time: Instant) -> Result<()> {
    let aggregates = aggregate_runs(records);
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => logic::reports::generate_json_report(&mut output_target, records, &aggregates)?,
        "markdown" => {
            logic::reports::generate_markdown_report(&mut output_target, records, &aggregates)?;
        }
        _ => logic::reports::generate_console_report(
            &mut output_target,
            records,
            &aggregates,
            start_time.elapsed(),
            args.verbose,
        )?,
    }

    output_target.flush()?;
    if let Some(path) = &args.output {
        println!("📝 Report written to {}", path.display());
    }
    Ok(())
}

/// Report sink: stdout unless `--output` names a file.
enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::Stdout(BufWriter::new(stdout())));
        };
        let file =
            File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
        Ok(Self::File(BufWriter::new(file)))
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            Self::Stdout(out) => out.write(buf),
            Self::File(out) => out.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(out) => out.flush(),
            Self::File(out) => out.flush(),
        }
    }
}
