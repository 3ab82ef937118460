//! toptrend CLI
//!
//! Terminal front end for the trend engine: browse the latest leaderboard,
//! past snapshots, keyword trends and the item library of each source.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use toptrend::{
    TrendEngine,
    error::{AppError, Result},
    models::{Config, IndexDocument, source_display_name},
    pipeline::{
        AnnotatedItem, Freshness, LibraryFilter, SortKey, StatusFilter, annotate_items,
        summarize,
    },
};

/// toptrend - Hot topic trend explorer
#[derive(Parser, Debug)]
#[command(name = "toptrend", version, about = "Hot topic leaderboard trend explorer")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "toptrend.toml")]
    config: PathBuf,

    /// Local data directory (overrides the configured store)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Base URL of the published data directory (overrides the configured store)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Source to inspect (defaults to the first indexed source)
    #[arg(short, long, global = true)]
    source: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List indexed sources and their collected days
    Sources,

    /// Show the latest leaderboard with rank changes
    Latest,

    /// Show one snapshot of a given day
    History {
        /// Day to show (YYYY-MM-DD, default: most recent)
        #[arg(long)]
        date: Option<String>,

        /// Snapshot position within the day (default: last)
        #[arg(long)]
        snapshot: Option<usize>,
    },

    /// Trace a keyword's rank across every collected day
    Trend {
        /// Keyword or title to trace
        keyword: String,
    },

    /// Browse the item library
    Library {
        /// all, on_list, off_list or comeback
        #[arg(long, default_value = "all")]
        status: StatusFilter,

        /// Case-insensitive title filter
        #[arg(long, default_value = "")]
        text: String,

        /// peakRankAsc, durationDesc, comebackDesc or lastSeenDesc
        #[arg(long, default_value = "lastSeenDesc")]
        sort: SortKey,

        /// Maximum rows to print
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Check whether the collection job is running on schedule
    Status,

    /// Validate configuration
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool, level: &str) {
    let level = if verbose { "debug" } else { level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_or_default(&cli.config);
    init_logging(cli.verbose, &config.logging.level);

    if let Some(dir) = &cli.data {
        config.store.root = dir.display().to_string();
        config.store.base_url = None;
    }
    if let Some(url) = &cli.base_url {
        config.store.base_url = Some(url.clone());
    }

    if let Command::Validate = cli.command {
        log::info!("Validating configuration...");
        if let Err(e) = config.validate() {
            log::error!("Config validation failed: {}", e);
            return Err(e);
        }
        log::info!("✓ Config OK");
        return Ok(());
    }

    let engine = TrendEngine::from_config(&config)?;

    match cli.command {
        Command::Sources => {
            let index = engine.get_index().await?;
            println!("Last updated: {}", or_dash(&index.last_updated));
            for source in &index.sources {
                println!(
                    "{:<10} {:<10} {:>4} days  latest {}",
                    source,
                    source_display_name(source),
                    index.days_for(source).len(),
                    index.latest_day(source).unwrap_or("-")
                );
            }
        }

        Command::Latest => {
            let index = engine.get_index().await?;
            let source = index.resolve_source(cli.source.as_deref());
            match engine.latest(source).await? {
                Some(board) => {
                    println!("{} @ {}", source_display_name(source), board.timestamp);
                    print_board(&board.rows);
                }
                None => println!("{} has no data yet.", source_display_name(source)),
            }
        }

        Command::History { date, snapshot } => {
            let index = engine.get_index().await?;
            let source = index.resolve_source(cli.source.as_deref());
            let day = pick_day(&index, source, date)?;

            let doc = engine.get_day(source, &day).await?;
            if doc.snapshots.is_empty() {
                println!("No snapshots on {}.", day);
                return Ok(());
            }

            let last = doc.snapshots.len() - 1;
            let position = snapshot.unwrap_or(last);
            let Some(current) = doc.snapshots.get(position) else {
                return Err(AppError::validation(format!(
                    "Snapshot {} out of range (0..={})",
                    position, last
                )));
            };
            let previous = position.checked_sub(1).and_then(|i| doc.snapshots.get(i));

            println!(
                "{} {} snapshot {}/{} @ {}",
                source_display_name(source),
                day,
                position,
                last,
                current.timestamp
            );
            print_board(&annotate_items(current, previous));
        }

        Command::Trend { keyword } => {
            let index = engine.get_index().await?;
            let source = index.resolve_source(cli.source.as_deref());
            let points = engine.trend(source, &keyword).await?;

            let Some(summary) = summarize(&points) else {
                println!("No rank data found for \"{}\".", keyword.trim());
                return Ok(());
            };

            println!("Trend for \"{}\" on {}", keyword.trim(), source_display_name(source));
            println!("  First seen:   {}", summary.first_seen);
            println!("  Current rank: {}", summary.current_rank);
            println!("  Best rank:    {}", summary.best_rank);
            println!("  On list:      {} minutes", summary.duration_minutes);
            println!();
            for point in &points {
                println!("  {}  #{:<3} {}", point.timestamp, point.rank, point.hot_value);
            }
        }

        Command::Library {
            status,
            text,
            sort,
            limit,
        } => {
            let index = engine.get_index().await?;
            let source = index.resolve_source(cli.source.as_deref());
            let library = engine.get_library(source).await;
            let items = engine
                .library_view(source, &LibraryFilter::new(text, status), sort)
                .await;

            println!(
                "{} library: {} of {} items (generated {})",
                source_display_name(source),
                items.len(),
                library.items.len(),
                or_dash(&library.generated_at)
            );
            for item in items.iter().take(limit.unwrap_or(usize::MAX)) {
                println!(
                    "  {:<8} peak {:>4}  {:>5} min  {} comebacks  last {}  {}",
                    match item.current_rank {
                        Some(rank) => format!("#{}", rank),
                        None => "off".to_string(),
                    },
                    item.peak_rank.map_or("-".to_string(), |r| r.to_string()),
                    item.on_list_duration_minutes.unwrap_or(0),
                    item.comeback_count,
                    or_dash(&item.last_seen_at),
                    item.title
                );
            }
        }

        Command::Status => {
            let status = engine.get_status().await;
            let freshness = engine.evaluator().evaluate(status.as_ref());
            let interval = engine.evaluator().config().expected_interval_minutes;

            match &freshness {
                Freshness::Unknown => {
                    log::warn!("No status.json found; cannot tell whether collection is running.")
                }
                Freshness::Failed(message) => log::warn!(
                    "Last collection run failed. {} Last run: {}",
                    message,
                    status
                        .as_ref()
                        .and_then(|s| s.last_run_at.as_deref())
                        .unwrap_or("-")
                ),
                Freshness::Stale(minutes) => log::warn!(
                    "Collection may be stalled: last run {} minutes ago (expected every {} minutes).",
                    minutes.map_or("∞".to_string(), |m| m.to_string()),
                    interval
                ),
                Freshness::Healthy => log::info!("Collection is on schedule."),
            }

            println!("Collection job: {}", freshness);
            if let Some(status) = &status {
                for result in &status.source_results {
                    println!(
                        "  {:<10} {:<4} {:>4} items  {}",
                        result.source,
                        if result.ok { "ok" } else { "FAIL" },
                        result.count,
                        result.error
                    );
                }
            }
        }

        // Handled before the engine is built
        Command::Validate => {}
    }

    Ok(())
}

/// Choose the requested day, or the most recent one collected.
fn pick_day(index: &IndexDocument, source: &str, requested: Option<String>) -> Result<String> {
    match requested {
        Some(day) => Ok(day),
        None => index
            .latest_day(source)
            .map(str::to_string)
            .ok_or_else(|| AppError::validation(format!("{} has no collected days", source))),
    }
}

fn print_board(rows: &[AnnotatedItem]) {
    for row in rows {
        println!(
            "  {:>3}  {:<6} {:>12}  {}",
            row.item.rank,
            row.change.to_string(),
            row.item
                .hot_value
                .map_or("-".to_string(), |v| format!("{}", v)),
            row.item.title
        );
    }
}

fn or_dash(text: &str) -> &str {
    if text.is_empty() { "-" } else { text }
}
