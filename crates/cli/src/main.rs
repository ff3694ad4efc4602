//! hashprobe CLI
//!
//! Measure how often short-message hash functions collide

mod config;
mod progress;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use hashprobe_core::generate::{hash_line, random_seed, Message, RandomMessages};
use hashprobe_core::{report, CollisionCounter, HashAlgorithm};
use hashprobe_formats::{open_messages, open_pairs, InputProgress};
use rayon::prelude::*;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use config::{CompareConfig, RandomConfig};
use progress::ProgressReporter;

/// Messages hashed per parallel batch
const BATCH_SIZE: usize = 4096;

/// Records between two progress refreshes
const PROGRESS_INTERVAL: usize = 10_000;

#[derive(Parser)]
#[command(name = "hashprobe")]
#[command(version, about = "Measure collision behaviour of short-message hash functions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    debug: bool,

    /// Output statistics in JSON format
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Count hash collisions in a `<data> <hash>` file
    Collisions {
        /// Pair file, one `<data> <hash>` record per line (optionally .gz)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// List every colliding hash with its data values
        #[arg(short, long)]
        verbose: bool,
    },

    /// Hash messages (one per line) and print `<message> <HASH>` lines
    Hash {
        /// Message file; reads stdin when omitted
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Hash algorithm
        #[arg(short, long, default_value = "lch32")]
        algorithm: HashAlgorithm,
    },

    /// Hash random fixed-length messages and print `<message> <HASH>` lines
    Random {
        /// Hash algorithm
        #[arg(short, long, default_value = "lch32")]
        algorithm: HashAlgorithm,

        /// Number of messages
        #[arg(short = 'n', long, default_value = "10000")]
        count: usize,

        /// Message length in bytes
        #[arg(short, long, default_value = "32")]
        length: usize,

        /// RNG seed (random when omitted)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Compare collision rates of several algorithms on the same messages
    Compare {
        /// Config file (YAML or TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Message file, overrides the config input
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Algorithms to compare, comma separated (overrides the config)
        #[arg(short, long, value_delimiter = ',')]
        algorithms: Vec<HashAlgorithm>,

        /// Write the effective configuration to this file (YAML or TOML)
        #[arg(long, value_name = "FILE")]
        save_config: Option<PathBuf>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(!cli.json) // Disable colors if JSON output
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Collisions { input, verbose } => {
            count_collisions(input, verbose, cli.json)?;
        }
        Commands::Hash { input, algorithm } => {
            hash_messages(input, algorithm)?;
        }
        Commands::Random {
            algorithm,
            count,
            length,
            seed,
        } => {
            hash_random(algorithm, count, length, seed)?;
        }
        Commands::Compare {
            config,
            input,
            algorithms,
            save_config,
        } => {
            compare(config, input, algorithms, save_config, cli.json)?;
        }
        Commands::Completions { shell } => {
            generate_completions(shell);
        }
    }

    Ok(())
}

fn count_collisions(input: PathBuf, verbose: bool, json_output: bool) -> Result<()> {
    info!("Counting collisions");
    info!("  Input: {:?}", input);
    info!("  Verbose: {}", verbose);

    let mut reader = open_pairs(&input)?;
    let progress = ProgressReporter::new(reader.total_bytes());
    let mut counter = CollisionCounter::new();

    while let Some(result) = reader.next() {
        let record = result.with_context(|| format!("Failed while reading {}", input.display()))?;
        counter.insert_record(&record);

        if counter.records_seen() % PROGRESS_INTERVAL == 0 {
            progress.update(reader.bytes_processed(), counter.records_seen(), counter.colliding_hashes());
        }
    }

    progress.finish();
    let malformed = reader.malformed_lines();
    let lines = reader.lines_processed();
    // closes the input file
    drop(reader);

    if malformed > 0 {
        warn!("Skipped {} malformed lines out of {}", malformed, lines);
    }

    let collision_report = counter.finish();
    info!(
        "Processed {} records, {} unique hashes",
        collision_report.stats.records_seen, collision_report.stats.unique_hashes
    );

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if json_output {
        let mut value = report::to_json(&collision_report, verbose)?;
        value["input"] = serde_json::Value::String(input.to_string_lossy().to_string());
        value["malformed_lines"] = serde_json::Value::from(malformed);
        writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
    } else if verbose {
        report::write_verbose(&mut out, &collision_report)?;
    } else {
        report::write_summary(&mut out, &collision_report)?;
    }

    out.flush()?;
    Ok(())
}

fn hash_messages(input: Option<PathBuf>, algorithm: HashAlgorithm) -> Result<()> {
    info!("Hashing messages with {}", algorithm);
    info!("  Input: {:?}", input.as_deref().unwrap_or_else(|| Path::new("<stdin>")));

    let mut reader = open_messages(input.as_deref())?;
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    // Hash a batch in parallel (rayon), then write it out in input order.
    loop {
        let mut batch = Vec::with_capacity(BATCH_SIZE);
        for _ in 0..BATCH_SIZE {
            match reader.next() {
                Some(Ok(message)) => batch.push(message),
                Some(Err(e)) => return Err(e.into()),
                None => break,
            }
        }
        if batch.is_empty() {
            break;
        }

        let lines: Vec<Vec<u8>> = batch
            .par_iter()
            .map(|message| hash_line(algorithm, message))
            .collect();
        for line in lines {
            out.write_all(&line)?;
            out.write_all(b"\n")?;
        }
    }

    out.flush()?;

    if reader.rejected_lines() > 0 {
        warn!(
            "Skipped {} messages containing whitespace",
            reader.rejected_lines()
        );
    }
    info!("Processed {} lines", reader.lines_processed());

    Ok(())
}

fn hash_random(algorithm: HashAlgorithm, count: usize, length: usize, seed: Option<u64>) -> Result<()> {
    if length == 0 {
        anyhow::bail!("Message length must be at least 1 byte");
    }
    let seed = seed.unwrap_or_else(random_seed);

    info!("Hashing random messages with {}", algorithm);
    info!("  Messages: {} x {} bytes", count, length);
    info!("  Seed: {}", seed);

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for message in RandomMessages::new(count, length, seed) {
        writeln!(out, "{}", message.line(algorithm))?;
    }

    out.flush()?;
    Ok(())
}

/// Collect the messages a compare run works on
fn load_messages(config: &CompareConfig) -> Result<Vec<Message>> {
    if let Some(ref path) = config.input {
        let mut reader = open_messages(Some(path.as_path()))?;
        let messages = reader
            .by_ref()
            .map(|result| result.map(Message::from_bytes))
            .collect::<hashprobe_formats::Result<Vec<_>>>()
            .with_context(|| format!("Failed while reading {}", path.display()))?;
        if reader.rejected_lines() > 0 {
            warn!(
                "Skipped {} messages containing whitespace",
                reader.rejected_lines()
            );
        }
        return Ok(messages);
    }

    let random = config.random.clone().unwrap_or_default();
    let seed = random.seed.unwrap_or_else(random_seed);
    info!("  Random: {} x {} bytes, seed {}", random.count, random.length, seed);
    Ok(RandomMessages::new(random.count, random.length, seed).collect())
}

fn compare(
    config_path: Option<PathBuf>,
    input: Option<PathBuf>,
    algorithms: Vec<HashAlgorithm>,
    save_path: Option<PathBuf>,
    json_output: bool,
) -> Result<()> {
    use hashprobe_core::compare::compare_algorithms;

    let mut config = match config_path {
        Some(ref path) => CompareConfig::load(path)?,
        None => CompareConfig {
            random: Some(RandomConfig::default()),
            ..CompareConfig::default()
        },
    };
    if let Some(input) = input {
        config.input = Some(input);
        config.random = None;
    }
    if !algorithms.is_empty() {
        config.algorithms = algorithms;
    }
    config.validate()?;

    info!("Comparing {} algorithms", config.algorithms.len());
    info!("  Config: {:?}", config_path);

    if let Some(ref path) = save_path {
        config.save(path)?;
        info!("  Saved config to {:?}", path);
    }

    let messages = load_messages(&config)?;
    let results = compare_algorithms(&messages, &config.algorithms);

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if json_output {
        let rows: Vec<serde_json::Value> = results
            .iter()
            .map(|(algorithm, stats)| {
                serde_json::json!({
                    "algorithm": algorithm.name(),
                    "bits": algorithm.bits(),
                    "stats": stats,
                    "collision_rate": stats.collision_rate(),
                    "colliding_hash_rate": stats.colliding_hash_rate(),
                    "average_collision_size": stats.average_collision_size(),
                })
            })
            .collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&rows)?)?;
    } else {
        let rows: Vec<_> = results
            .into_iter()
            .map(|(algorithm, stats)| (algorithm.name().to_string(), stats))
            .collect();
        report::write_table(&mut out, &rows)?;
    }

    out.flush()?;
    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
}
