// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lotto_coverage::codec::Format;
use lotto_coverage::combo::NumberSet;
use lotto_coverage::draws::{DrawLoader, DrawsDocument, LineFormat, LoadReport};
use lotto_coverage::engine::{CancelToken, CoverageEngine, EliminationEngine, LogProgress};
use lotto_coverage::report::{
    self, filter_records, CombinationWriter, RecordSource, RunSummary, TextHeader,
};
use lotto_coverage::{Combination, Game, ScanConfig};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(
    name = "lotto",
    version,
    about = "Combinatorial elimination and coverage over lottery draw histories"
)]
struct Cli {
    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Also accept comma-everywhere draw lines without the `/` delimiter
    #[arg(long, global = true)]
    permissive: bool,

    /// Write the run summary as JSON to this file
    #[arg(long, global = true)]
    stats_json: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Eliminate every combination at a given distance from historical draws
    Eliminate {
        /// Historical draw file
        draws: PathBuf,

        /// Numbers per play (6 or 7)
        #[arg(allow_negative_numbers = true)]
        max_play: i64,

        /// Write the remaining combinations here
        output: Option<PathBuf>,

        /// k minus the number of shared numbers (3 or 4 in practice)
        #[arg(long, default_value_t = 3)]
        distance: usize,

        /// Only use the last N draws (0 = all)
        #[arg(long, default_value_t = 0)]
        recent: usize,

        /// Output format of the remaining combinations
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Print the first N remaining combinations
        #[arg(long, default_value_t = 10)]
        sample: usize,

        /// Worker threads (default: all cores)
        #[arg(long)]
        threads: Option<usize>,

        /// Ranks collected per worker before merging
        #[arg(long, default_value_t = lotto_coverage::config::DEFAULT_BATCH_SIZE)]
        batch_size: usize,
    },

    /// Count the sub-combinations covered by historical draws
    Coverage {
        /// Historical draw file
        draws: PathBuf,

        /// Numbers per play (6 or 7)
        #[arg(allow_negative_numbers = true)]
        max_play: i64,

        /// Write the undrawn sub-combinations here
        output: Option<PathBuf>,

        /// Sub-combination size
        #[arg(long, default_value_t = 4)]
        sub_size: usize,

        /// Output format of the undrawn sub-combinations
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Print the first N undrawn sub-combinations
        #[arg(long, default_value_t = 10)]
        sample: usize,

        /// Print up to N plays with many undrawn sub-combinations
        #[arg(long, default_value_t = 5)]
        good: usize,

        /// Undrawn sub-combinations a play needs to be listed
        #[arg(long, default_value_t = 10)]
        min_undrawn: usize,
    },

    /// List a binary combination file as text
    List {
        /// Binary combination file
        input: PathBuf,

        /// Numbers per play (6 or 7)
        #[arg(allow_negative_numbers = true)]
        max_play: i64,

        /// Text output (default: standard output)
        output: Option<PathBuf>,

        /// Omit the `#` header
        #[arg(long)]
        no_header: bool,
    },

    /// Pack a text combination file into binary records
    Pack {
        /// Text combination file
        input: PathBuf,

        /// Numbers per play (6 or 7)
        #[arg(allow_negative_numbers = true)]
        max_play: i64,

        /// Binary output
        output: PathBuf,
    },

    /// Remove every record containing any of the given numbers
    Trim {
        /// Combination file
        input: PathBuf,

        /// Numbers per play (6 or 7)
        #[arg(allow_negative_numbers = true)]
        max_play: i64,

        /// Trimmed output, in the input's format
        output: PathBuf,

        /// Format of input and output
        #[arg(long, value_enum)]
        format: Format,

        /// Numbers to remove
        #[arg(long, num_args = 1.., required = true)]
        exclude: Vec<u8>,
    },

    /// Export the draw history as JSON for the viewer
    ToJson {
        /// Historical draw file
        draws: PathBuf,

        /// Numbers per play (6 or 7)
        #[arg(allow_negative_numbers = true)]
        max_play: i64,

        /// JSON output (default: the input with a .json extension)
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;
            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                e.exit();
            }
            // Argument errors exit 1 like any other validation failure.
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    let mut logger_builder = env_logger::Builder::new();
    logger_builder.filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Info));
    logger_builder.parse_default_env();
    logger_builder.init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let line_format = if cli.permissive {
        LineFormat::Permissive
    } else {
        LineFormat::Strict
    };
    let stats_json = cli.stats_json;
    match cli.cmd {
        Command::Eliminate {
            draws,
            max_play,
            output,
            distance,
            recent,
            format,
            sample,
            threads,
            batch_size,
        } => {
            let game = Game::from_max_play(max_play)?;
            let config = ScanConfig {
                batch_size,
                threads,
                ..ScanConfig::default()
            };
            let options = EliminateOptions {
                distance,
                recent,
                format,
                sample,
            };
            let summary = run_eliminate(
                &draws,
                game,
                line_format,
                config,
                &options,
                output.as_deref(),
            )?;
            write_stats_json(stats_json.as_deref(), &summary)
        }
        Command::Coverage {
            draws,
            max_play,
            output,
            sub_size,
            format,
            sample,
            good,
            min_undrawn,
        } => {
            let game = Game::from_max_play(max_play)?;
            let options = CoverageOptions {
                sub_size,
                format,
                sample,
                good,
                min_undrawn,
            };
            let summary = run_coverage(&draws, game, line_format, &options, output.as_deref())?;
            write_stats_json(stats_json.as_deref(), &summary)
        }
        Command::List {
            input,
            max_play,
            output,
            no_header,
        } => {
            let game = Game::from_max_play(max_play)?;
            run_list(&input, game, output.as_deref(), !no_header)
        }
        Command::Pack {
            input,
            max_play,
            output,
        } => {
            let game = Game::from_max_play(max_play)?;
            let stats = report::filter_file(
                &input,
                Format::Text,
                &output,
                Format::Binary,
                game,
                &NumberSet::empty(),
                None,
            )
            .with_context(|| format!("packing {} into {}", input.display(), output.display()))?;
            println!("Packed {} records ({} malformed)", stats.kept, stats.malformed);
            Ok(())
        }
        Command::Trim {
            input,
            max_play,
            output,
            format,
            exclude,
        } => {
            let game = Game::from_max_play(max_play)?;
            let stats = report::trim_file(&input, &output, format, game, &exclude)
                .with_context(|| format!("trimming {}", input.display()))?;
            println!(
                "Read {} | Kept {} | Removed {} | Malformed {}",
                stats.read, stats.kept, stats.removed, stats.malformed
            );
            Ok(())
        }
        Command::ToJson {
            draws,
            max_play,
            output,
        } => {
            let game = Game::from_max_play(max_play)?;
            let output = output.unwrap_or_else(|| draws.with_extension("json"));
            run_to_json(&draws, game, line_format, &output)
        }
    }
}

struct EliminateOptions {
    distance: usize,
    recent: usize,
    format: Format,
    sample: usize,
}

struct CoverageOptions {
    sub_size: usize,
    format: Format,
    sample: usize,
    good: usize,
    min_undrawn: usize,
}

fn load_draws(path: &Path, game: Game, line_format: LineFormat) -> Result<LoadReport> {
    DrawLoader::new(game, line_format)
        .load_path(path)
        .with_context(|| format!("loading draws from {}", path.display()))
}

fn run_eliminate(
    path: &Path,
    game: Game,
    line_format: LineFormat,
    config: ScanConfig,
    options: &EliminateOptions,
    output: Option<&Path>,
) -> Result<RunSummary> {
    let progress_every = config.progress_every;
    let mut engine = EliminationEngine::new(game.universe()?, config)?;
    engine.check_distance(options.distance)?;

    let load = load_draws(path, game, line_format)?;
    let skip = if options.recent == 0 {
        0
    } else {
        load.draws.len().saturating_sub(options.recent)
    };
    let draws: Vec<Combination> = load.draws[skip..]
        .iter()
        .map(|draw| draw.numbers.clone())
        .collect();

    log::info!(
        "Eliminating distance {} for {} draws over {} combinations",
        options.distance,
        draws.len(),
        engine.universe().size()
    );
    let started = Instant::now();
    engine.eliminate_draws(
        &draws,
        options.distance,
        &mut LogProgress::new(progress_every),
        &CancelToken::new(),
    )?;
    log::info!("Time elapsed: {:.1?}", started.elapsed());
    let finalized = engine.finalize();

    let mut summary = RunSummary::new(finalized.statistics(), &load);
    if let Some(output) = output {
        let written = report::export_remaining(&finalized, output, options.format)
            .with_context(|| format!("writing {}", output.display()))?;
        summary = summary.with_exported(written);
    }
    println!("{}", summary);
    print_sample(
        "remaining combinations",
        &report::sample(&finalized, options.sample),
    )?;
    Ok(summary)
}

fn run_coverage(
    path: &Path,
    game: Game,
    line_format: LineFormat,
    options: &CoverageOptions,
    output: Option<&Path>,
) -> Result<RunSummary> {
    let load = load_draws(path, game, line_format)?;
    let draws: Vec<Combination> = load.draws.iter().map(|d| d.numbers.clone()).collect();
    let mut engine = CoverageEngine::new(game, options.sub_size)?;
    log::info!(
        "Each draw contains C({}, {}) sub-combinations",
        game.play,
        options.sub_size
    );
    engine.cover_draws(
        &draws,
        &mut LogProgress::periodic(100),
        &CancelToken::new(),
    )?;
    let finalized = engine.finalize();

    let mut summary = RunSummary::new(finalized.statistics(), &load);
    if let Some(output) = output {
        let written = report::export_remaining(&finalized, output, options.format)
            .with_context(|| format!("writing {}", output.display()))?;
        summary = summary.with_exported(written);
    }
    println!("{}", summary);
    print_sample(
        "undrawn sub-combinations",
        &report::sample(&finalized, options.sample),
    )?;

    if options.good > 0 {
        let plays = game.universe()?;
        let good = report::candidates_with_undrawn(
            &finalized,
            &plays,
            options.min_undrawn,
            options.good,
        )?;
        let total = lotto_coverage::combo::choose(game.play as u64, options.sub_size as u64);
        let stdout = io::stdout();
        let mut out = stdout.lock();
        writeln!(
            out,
            "Plays with at least {} undrawn sub-combinations (first {}):",
            options.min_undrawn, options.good
        )?;
        for (combo, undrawn) in &good {
            writeln!(out, "{} | Undrawn: {}/{}", combo, undrawn, total)?;
        }
    }
    Ok(summary)
}

fn print_sample(what: &str, sample: &[Combination]) -> Result<()> {
    if sample.is_empty() {
        return Ok(());
    }
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "Sample of {} (first {}):", what, sample.len())?;
    for combo in sample {
        writeln!(out, "{}", combo)?;
    }
    Ok(())
}

fn run_list(input: &Path, game: Game, output: Option<&Path>, with_header: bool) -> Result<()> {
    let header = TextHeader::new()
        .line(format!("Source: {}", input.display()))
        .line(format!("Max play: {}", game.play))
        .line(format!(
            "Format: {}",
            lotto_coverage::codec::text::render(&(1..=game.play as u8).collect::<Vec<_>>())
        ));
    let header = with_header.then_some(&header);
    let exclude = NumberSet::empty();
    let stats = match output {
        Some(output) => report::filter_file(
            input,
            Format::Binary,
            output,
            Format::Text,
            game,
            &exclude,
            header,
        ),
        None => {
            let file = File::open(input)
                .map_err(|e| lotto_coverage::Error::io(input, e))?;
            let mut source = RecordSource::new(BufReader::new(file), Format::Binary, game.play);
            let stdout = io::stdout();
            let mut writer = CombinationWriter::text(stdout.lock(), header)?;
            let stats = filter_records(&mut source, &mut writer, game, &exclude)?;
            writer.finish()?;
            Ok(stats)
        }
    }
    .with_context(|| format!("listing {}", input.display()))?;
    log::info!("Listed {} records ({} malformed)", stats.kept, stats.malformed);
    Ok(())
}

fn run_to_json(path: &Path, game: Game, line_format: LineFormat, output: &Path) -> Result<()> {
    let load = load_draws(path, game, line_format)?;
    let document = DrawsDocument::from_draws(&load.draws);
    if let (Some(first), Some(last)) = (document.draws.first(), document.draws.last()) {
        log::info!("First: {} {:?}", first.date, first.numbers);
        log::info!("Last:  {} {:?}", last.date, last.numbers);
    }
    document
        .write_path(output)
        .with_context(|| format!("writing {}", output.display()))?;
    println!(
        "Converted {} draws to {} ({} lines skipped)",
        document.draws.len(),
        output.display(),
        load.counts.total()
    );
    Ok(())
}

fn write_stats_json(path: Option<&Path>, summary: &RunSummary) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(file, summary)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
