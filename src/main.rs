//! post-stats CLI
//!
//! Computes statistics over a JSON-lines stream of social media posts.

use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use crossbeam_channel::RecvTimeoutError;
use post_stats::{
    audit::IngestLog,
    config::{Config, OutputFormat},
    post::{Input, PostReader, SourceEvent},
    stats::{
        accumulator_for, parse_date_bound, ReportingPeriod, StatAccumulator, StatName, StatParams,
        StatResult,
    },
    VERSION,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "post-stats")]
#[command(version = VERSION)]
#[command(about = "Streaming statistics over social media posts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute statistics over a JSON-lines post file
    Compute {
        /// Input file, or "-" for stdin
        #[arg(default_value = "-")]
        input: String,

        /// Statistic to compute (repeatable)
        #[arg(long = "stat", short = 's')]
        stats: Vec<String>,

        /// Compute every known statistic
        #[arg(long, conflicts_with = "stats")]
        all: bool,

        /// Earliest post date (RFC 3339 or YYYY-MM-DD, inclusive)
        #[arg(long)]
        start: Option<String>,

        /// Latest post date (RFC 3339 or YYYY-MM-DD, inclusive)
        #[arg(long)]
        end: Option<String>,

        /// Restrict to a calendar month (YYYY-MM)
        #[arg(long, conflicts_with_all = ["start", "end"])]
        month: Option<String>,

        /// Only count posts of this type
        #[arg(long)]
        post_type: Option<String>,

        /// Timezone for plain dates and months (defaults to config)
        #[arg(long)]
        timezone: Option<String>,

        /// Output format (text or json, defaults to config)
        #[arg(long)]
        format: Option<String>,
    },

    /// List available statistics
    List,

    /// Show cumulative ingest statistics
    Status,

    /// Show configuration
    Config,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compute {
            input,
            stats,
            all,
            start,
            end,
            month,
            post_type,
            timezone,
            format,
        } => {
            let options = ComputeOptions {
                input: Input::from_arg(&input),
                stats,
                all,
                start,
                end,
                month,
                post_type,
                timezone,
                format,
            };
            cmd_compute(options);
        }
        Commands::List => {
            cmd_list();
        }
        Commands::Status => {
            cmd_status();
        }
        Commands::Config => {
            cmd_config();
        }
    }
}

struct ComputeOptions {
    input: Input,
    stats: Vec<String>,
    all: bool,
    start: Option<String>,
    end: Option<String>,
    month: Option<String>,
    post_type: Option<String>,
    timezone: Option<String>,
    format: Option<String>,
}

fn cmd_compute(options: ComputeOptions) {
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config, using defaults: {e}");
        Config::default()
    });

    let tz = match options.timezone {
        Some(ref name) => name.parse::<Tz>().unwrap_or_else(|_| {
            eprintln!("Error: Unknown timezone: {name}");
            std::process::exit(1);
        }),
        None => config.tz().unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }),
    };

    let names = resolve_stat_names(&options.stats, options.all);

    // Shared filter parameters; the statistic name is filled in per accumulator.
    let mut base = StatParams::new(StatName::AveragePostsPerUser);
    if let Some(ref month) = options.month {
        let period = ReportingPeriod::parse_month(month, tz).unwrap_or_else(|e| exit_with(e));
        base = base.with_period(&period);
    }
    if let Some(ref start) = options.start {
        let start = parse_date_bound(start, tz, false).unwrap_or_else(|e| exit_with(e));
        base = base.with_start_date(start);
    }
    if let Some(ref end) = options.end {
        let end = parse_date_bound(end, tz, true).unwrap_or_else(|e| exit_with(e));
        base = base.with_end_date(end);
    }
    if let Some(post_type) = options.post_type {
        base = base.with_post_type(post_type);
    }
    tracing::debug!("Filter parameters: {:?}", base);

    let mut accumulators: Vec<Box<dyn StatAccumulator>> = names
        .iter()
        .map(|&stat_name| {
            accumulator_for(StatParams {
                stat_name,
                ..base.clone()
            })
        })
        .collect();

    let ingest_log = IngestLog::with_persistence(config.ingest_log_path());

    let reader = PostReader::open(&options.input, config.channel_capacity).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    // Ctrl+C stops reading; whatever was accumulated is still reported.
    let running = Arc::new(AtomicBool::new(true));
    ctrlc_handler(running.clone());

    let mut finished = false;
    while running.load(Ordering::SeqCst) {
        match reader.receiver().recv_timeout(Duration::from_millis(100)) {
            Ok(SourceEvent::Post(post)) => {
                ingest_log.record_post();
                for acc in accumulators.iter_mut() {
                    acc.accumulate_data(&post);
                }
            }
            Ok(SourceEvent::Malformed { .. }) => {
                ingest_log.record_malformed();
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                finished = true;
                break;
            }
        }
    }

    if finished {
        reader.join();
    } else {
        eprintln!("Interrupted; reporting partial results.");
    }

    let mut results: Vec<StatResult> = Vec::with_capacity(accumulators.len());
    for acc in &accumulators {
        match acc.calculate() {
            Ok(result) => results.push(result),
            Err(e) => eprintln!("Error: {e}"),
        }
    }
    ingest_log.record_results(results.len() as u64);

    let format = options
        .format
        .as_deref()
        .map(OutputFormat::from_name)
        .unwrap_or(config.output_format);
    print_results(&results, format);

    if let Err(e) = ingest_log.save() {
        eprintln!("Warning: Could not save ingest log: {e}");
    }
    tracing::info!("{}", ingest_log.summary());
}

fn resolve_stat_names(requested: &[String], all: bool) -> Vec<StatName> {
    if all {
        return StatName::ALL.to_vec();
    }
    if requested.is_empty() {
        return vec![StatName::AveragePostsPerUser];
    }

    let mut names = Vec::with_capacity(requested.len());
    for raw in requested {
        match raw.parse::<StatName>() {
            Ok(name) if !names.contains(&name) => names.push(name),
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error: {e}");
                eprintln!("Run 'post-stats list' to see available statistics.");
                std::process::exit(1);
            }
        }
    }
    names
}

fn print_results(results: &[StatResult], format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            for result in results {
                println!("{result}");
            }
        }
        OutputFormat::Json => match serde_json::to_string_pretty(results) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing results: {e}");
                std::process::exit(1);
            }
        },
    }
}

fn cmd_list() {
    println!("Available statistics:");
    for name in StatName::ALL {
        println!("  {:<24} {}", name.as_str(), name.description());
    }
}

fn cmd_status() {
    let config = Config::load().unwrap_or_default();

    println!("post-stats Status");
    println!("=================");
    println!();

    let stats_path = config.ingest_log_path();
    if stats_path.exists() {
        if let Ok(content) = std::fs::read_to_string(&stats_path) {
            if let Ok(stats) = serde_json::from_str::<serde_json::Value>(&content) {
                println!("Cumulative Statistics:");
                if let Some(posts) = stats.get("posts_read") {
                    println!("  Posts read: {posts}");
                }
                if let Some(malformed) = stats.get("malformed_lines") {
                    println!("  Malformed lines skipped: {malformed}");
                }
                if let Some(results) = stats.get("results_computed") {
                    println!("  Results computed: {results}");
                }
                if let Some(updated) = stats.get("last_updated") {
                    println!("  Last updated: {updated}");
                }
            }
        }
    } else {
        println!("No previous run data found.");
    }
}

fn cmd_config() {
    let config = Config::load().unwrap_or_default();

    println!("Configuration");
    println!("=============");
    println!();
    println!("Config file: {:?}", Config::config_path());
    println!();
    println!(
        "{}",
        serde_json::to_string_pretty(&config).unwrap_or_else(|_| "Error".to_string())
    );
}

fn exit_with(e: impl std::fmt::Display) -> ! {
    eprintln!("Error: {e}");
    std::process::exit(1);
}

/// Set up Ctrl+C handler.
fn ctrlc_handler(running: Arc<AtomicBool>) {
    if let Err(e) = ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    }) {
        tracing::warn!("Could not install Ctrl+C handler: {}", e);
    }
}
