// Command line front end: loads player statistics into both trees and queries them.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use ordtree::analysis::{self, AnalysisConfig, Report};
use ordtree::harness::{self, Metrics};
use ordtree::ingest::{self, Ingest};
use ordtree::record::{sample_games, Game};
use ordtree::{avl, unbalanced, Order, SearchTree};

/// Listing commands print at most this many records.
const SHOWN: usize = 20;

#[derive(Parser)]
#[command(name = "ordtree")]
#[command(about = "Index Steam player statistics in an unbalanced BST and an AVL tree", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// CSV file to load; the built-in sample is used when omitted
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show headline numbers for the dataset
    Summary,

    /// Build both trees and report their shape
    Build,

    /// Look up a record by its average player count, to within 0.01
    Search {
        /// Average players to look for
        avg: f64,
    },

    /// Insert a new record into both trees and report what it cost
    Insert {
        /// Month label, such as Sep-25
        #[arg(long)]
        month: String,
        /// Average concurrent players
        #[arg(long)]
        avg: f64,
        /// Change against the previous month
        #[arg(long, default_value = "0")]
        gain: f64,
        /// Change as a fraction of the previous month
        #[arg(long, default_value = "0")]
        gain_percent: f64,
        /// Peak concurrent players
        #[arg(long, default_value = "0")]
        peak: u64,
        /// Game title
        #[arg(long)]
        name: String,
        /// Steam application id
        #[arg(long, default_value = "0")]
        appid: u32,
    },

    /// List records with an average between two bounds, inclusive
    Range {
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },

    /// List records whose name contains a pattern, ignoring case
    Name {
        /// Text to look for
        pattern: String,
    },

    /// Delete a record by its average player count, to within 0.01, from both trees
    Delete {
        /// Average players of the record to delete
        avg: f64,
    },

    /// Walk a tree in a given order
    Traverse {
        /// Which tree to walk
        #[arg(short, long, value_enum, default_value = "bot")]
        tree: TreeKind,

        /// in-order, pre-order, post-order or level-order
        #[arg(short, long, default_value = "in-order")]
        order: Order,

        /// Stop after this many records
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Answer the exploratory questions about the dataset
    Analyze {
        /// Average players a record must exceed to count as a high performer
        #[arg(long, default_value = "5000")]
        avg_threshold: f64,

        /// Peak players a record must exceed to count as an exceptional peak
        #[arg(long, default_value = "10000")]
        peak_threshold: u64,
    },

    /// Measure insertion, search and removal on both trees
    Compare {
        /// Number of records searched for and deleted
        #[arg(short, long, default_value = "100")]
        sample: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TreeKind {
    /// The unbalanced binary search tree
    #[value(alias = "unbalanced")]
    Uot,
    /// The AVL tree
    #[value(alias = "avl")]
    Bot,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let games = load(cli.data.as_ref())?;

    match cli.command {
        Commands::Summary => summary(&games),
        Commands::Build => build(&games)?,
        Commands::Search { avg } => search(&games, avg),
        Commands::Insert {
            month,
            avg,
            gain,
            gain_percent,
            peak,
            name,
            appid,
        } => insert(
            &games,
            Game::new(month, avg, gain, gain_percent, peak, name, appid),
        ),
        Commands::Range { min, max } => range(&games, min, max)?,
        Commands::Name { pattern } => name(&games, &pattern),
        Commands::Delete { avg } => delete(&games, avg),
        Commands::Traverse { tree, order, limit } => traverse(&games, tree, order, limit),
        Commands::Analyze {
            avg_threshold,
            peak_threshold,
        } => analyze(
            &games,
            &AnalysisConfig {
                avg_threshold,
                peak_threshold,
                ..AnalysisConfig::default()
            },
        ),
        Commands::Compare { sample } => compare(&games, sample),
    }

    Ok(())
}

fn load(path: Option<&PathBuf>) -> anyhow::Result<Vec<Game>> {
    let Ingest { games, skipped } = match path {
        Some(path) => ingest::read_games_from_path(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => {
            warn!("no data file given, using the built-in sample");
            Ingest {
                games: sample_games(),
                skipped: 0,
            }
        }
    };

    if skipped > 0 {
        warn!(skipped, "some rows were malformed and skipped");
    }
    if games.is_empty() {
        warn!("dataset is empty");
    }
    Ok(games)
}

fn trees(games: &[Game]) -> (unbalanced::Tree<Game>, avl::Tree<Game>) {
    let bst: unbalanced::Tree<Game> = games.iter().cloned().collect();
    let avl: avl::Tree<Game> = games.iter().cloned().collect();
    debug!(
        records = games.len(),
        unbalanced_height = ?bst.height(),
        avl_height = ?avl.height(),
        "built trees"
    );
    (bst, avl)
}

fn summary(games: &[Game]) {
    match analysis::summarize(games) {
        Some(s) => {
            println!("records:            {}", s.records);
            println!("mean avg players:   {:.2}", s.mean_avg_players);
            println!("highest peak:       {}", s.max_peak);
            println!("most popular:       {} ({:.2})", s.most_popular, s.highest_avg);
        }
        None => println!("no records"),
    }
}

fn build(games: &[Game]) -> anyhow::Result<()> {
    let (bst, avl) = trees(games);
    shape(&bst)?;
    shape(&avl)?;
    Ok(())
}

fn shape<S: SearchTree<Game>>(tree: &S) -> anyhow::Result<()> {
    tree.validate()
        .with_context(|| format!("{} tree is malformed", S::KIND))?;
    let counts = tree.counts();
    println!(
        "{:<10} records: {:<6} height: {:<6} comparisons: {:<8} rotations: {}",
        S::KIND,
        tree.len(),
        tree.height().map_or_else(|| "-".to_string(), |h| h.to_string()),
        counts.comparisons,
        counts.rotations,
    );
    Ok(())
}

/// A search key for `avg`, snapped to the stored average it was probably meant to be.
fn search_key(games: &[Game], avg: f64) -> Game {
    match analysis::nearest(games, avg, analysis::AVG_TOLERANCE) {
        Some(game) => {
            debug!(requested = avg, stored = game.avg_players, "resolved average");
            Game::probe(game.avg_players)
        }
        None => Game::probe(avg),
    }
}

fn search(games: &[Game], avg: f64) {
    let (bst, avl) = trees(games);
    let probe = search_key(games, avg);
    lookup(&bst, &probe);
    lookup(&avl, &probe);
}

fn lookup<S: SearchTree<Game>>(tree: &S, probe: &Game) {
    tree.reset_counts();
    let found = tree.search(probe);
    let comparisons = tree.counts().comparisons;
    match found {
        Some(game) => println!("{:<10} found {} in {} comparisons", S::KIND, game, comparisons),
        None => println!(
            "{:<10} nothing at {:.2} ({} comparisons)",
            S::KIND,
            probe.avg_players,
            comparisons
        ),
    }
}

fn range(games: &[Game], min: f64, max: f64) -> anyhow::Result<()> {
    if min > max {
        bail!("empty range: {} is above {}", min, max);
    }
    let (bst, _) = trees(games);
    list(&analysis::in_range(bst.in_order(), min, max));
    Ok(())
}

fn name(games: &[Game], pattern: &str) {
    let (_, avl) = trees(games);
    list(&analysis::by_name(avl.in_order(), pattern));
}

fn list(found: &[&Game]) {
    println!("{} record(s) found", found.len());
    for game in found.iter().take(SHOWN) {
        println!("  {}", game);
    }
    if found.len() > SHOWN {
        println!("  ... and {} more", found.len() - SHOWN);
    }
}

fn insert(games: &[Game], game: Game) {
    let (mut bst, mut avl) = trees(games);
    info!(%game, "inserting");
    add(&mut bst, game.clone());
    add(&mut avl, game);
}

fn add<S: SearchTree<Game>>(tree: &mut S, game: Game) {
    let metrics = harness::measure_insert(tree, game);
    println!("{:<10} {}", S::KIND, metrics);
    println!(
        "{:<10} records: {:<6} height: {:?}",
        S::KIND,
        tree.len(),
        tree.height()
    );
}

fn delete(games: &[Game], avg: f64) {
    let (mut bst, mut avl) = trees(games);
    let probe = search_key(games, avg);
    remove(&mut bst, &probe);
    remove(&mut avl, &probe);
}

fn remove<S: SearchTree<Game>>(tree: &mut S, probe: &Game) {
    match tree.delete(probe) {
        Some(game) => {
            info!(kind = S::KIND, %game, "deleted");
            println!("{:<10} deleted {}", S::KIND, game);
        }
        None => println!("{:<10} nothing at {:.2}", S::KIND, probe.avg_players),
    }
    println!(
        "{:<10} records: {:<6} height: {:?}",
        S::KIND,
        tree.len(),
        tree.height()
    );
}

fn traverse(games: &[Game], tree: TreeKind, order: Order, limit: Option<usize>) {
    let (bst, avl) = trees(games);
    let limit = limit.unwrap_or(usize::MAX);

    println!("{} traversal:", order);
    let walk: Box<dyn Iterator<Item = &Game>> = match tree {
        TreeKind::Uot => Box::new(bst.traverse(order)),
        TreeKind::Bot => Box::new(avl.traverse(order)),
    };
    for (i, game) in walk.take(limit).enumerate() {
        println!("{:>5}. {}", i + 1, game);
    }
}

fn analyze(games: &[Game], config: &AnalysisConfig) {
    let (bst, avl) = trees(games);
    let report = Report::build(&bst, &avl, config);

    println!("== High performers (avg > {}) ==", config.avg_threshold);
    let high = &report.high_performers;
    println!(
        "{} record(s), {:.1}% of the dataset, {:.0} players in total",
        high.matching,
        high.share * 100.0,
        high.total_avg_players
    );
    for game in &high.top {
        println!("  {}", game);
    }

    println!("\n== Growth ==");
    match &report.growth {
        Some(g) => {
            println!("mean growth: {:.2}%", g.mean_gain_percent * 100.0);
            println!("growing: {}, declining: {}", g.growing, g.declining);
            println!(
                "fastest growing: {} ({}) {:+.2}%",
                g.fastest_growing.name,
                g.fastest_growing.month,
                g.fastest_growing.gain_percent * 100.0
            );
            println!(
                "fastest declining: {} ({}) {:+.2}%",
                g.fastest_declining.name,
                g.fastest_declining.month,
                g.fastest_declining.gain_percent * 100.0
            );
        }
        None => println!("no records"),
    }

    println!("\n== Peaks (peak > {}) ==", config.peak_threshold);
    println!("{} record(s)", report.peaks.matching);
    for game in &report.peaks.top {
        let ratio = game
            .peak_ratio()
            .map_or_else(|| "-".to_string(), |r| format!("{:.2}x", r));
        println!("  {} peak/avg {}", game, ratio);
    }

    println!("\n== Market distribution ==");
    match &report.market {
        Some(m) => {
            println!("total players: {:.0}", m.total_players);
            println!("top 10%: {:.1}%", m.top_10_share * 100.0);
            println!("top 25%: {:.1}%", m.top_25_share * 100.0);
            println!("top 50%: {:.1}%", m.top_50_share * 100.0);
            let verdict = if m.is_concentrated() {
                "concentrated"
            } else {
                "spread out"
            };
            println!("the market is {}", verdict);
        }
        None => println!("no players"),
    }

    println!("\n== Stability ==");
    for (title, rows) in [
        ("most stable", &report.most_stable),
        ("most volatile", &report.most_volatile),
    ] {
        println!("{}:", title);
        for s in rows {
            println!(
                "  {:<30} {} months, mean {:.2}, max variation {:.2}%",
                s.name,
                s.months,
                s.mean_avg_players,
                s.max_variation * 100.0
            );
        }
    }
}

fn compare(games: &[Game], sample: usize) {
    let probes = &games[..sample.min(games.len())];
    let cmp = harness::compare(games, probes);

    for (phase, uot, bot) in [
        ("insertion", cmp.unbalanced.insertion, cmp.avl.insertion),
        ("search", cmp.unbalanced.search, cmp.avl.search),
        ("removal", cmp.unbalanced.removal, cmp.avl.removal),
    ] {
        println!("== {} ({} operations) ==", phase, uot.operations);
        println!("  {:<10} {}", cmp.unbalanced.kind, uot);
        println!("  {:<10} {}", cmp.avl.kind, bot);
        if let Some(saved) = saved(&uot, &bot) {
            println!("  avl makes {:.1}% fewer comparisons", saved);
        }
    }

    println!(
        "heights after insertion: {} {:?}, {} {:?}",
        cmp.unbalanced.kind, cmp.unbalanced.height, cmp.avl.kind, cmp.avl.height
    );
}

/// How many fewer comparisons `bot` made than `uot`, in percent.
fn saved(uot: &Metrics, bot: &Metrics) -> Option<f64> {
    (uot.comparisons > 0)
        .then(|| (1.0 - bot.comparisons as f64 / uot.comparisons as f64) * 100.0)
}
