//! Exploratory questions about a set of [`Game`] records.
//!
//! Every function takes any sequence of `&Game`, normally one of the trees' traversals, and
//! returns plain data; formatting is left to the caller. [`Report::build`] answers all of them,
//! reading the popularity and stability questions off the unbalanced tree and the growth and
//! market questions off the AVL tree.

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::record::Game;
use crate::{avl, unbalanced};

/// Thresholds and list sizes for the questions.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Average players a record must exceed to count as a high performer.
    pub avg_threshold: f64,
    /// Peak players a record must exceed to count as an exceptional peak.
    pub peak_threshold: u64,
    /// How many high performers to list.
    pub top_performers: usize,
    /// How many exceptional peaks to list.
    pub top_peaks: usize,
    /// How many of the most stable and most volatile games to list.
    pub top_stability: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            avg_threshold: 5000.0,
            peak_threshold: 10_000,
            top_performers: 5,
            top_peaks: 10,
            top_stability: 10,
        }
    }
}

/// Headline numbers for a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    /// Number of records.
    pub records: usize,
    /// Mean of `avg_players` over all records.
    pub mean_avg_players: f64,
    /// Highest `peak_players`.
    pub max_peak: u64,
    /// Name of the record with the highest average.
    pub most_popular: String,
    /// That record's average.
    pub highest_avg: f64,
}

/// Summarizes `games`. `None` when there are none.
pub fn summarize<'a>(games: impl IntoIterator<Item = &'a Game>) -> Option<DatasetSummary> {
    let mut records = 0;
    let mut total = 0.0;
    let mut max_peak = 0;
    let mut most_popular: Option<&Game> = None;

    for game in games {
        records += 1;
        total += game.avg_players;
        max_peak = max_peak.max(game.peak_players);
        if most_popular.map_or(true, |best| game.avg_players > best.avg_players) {
            most_popular = Some(game);
        }
    }

    let most_popular = most_popular?;
    Some(DatasetSummary {
        records,
        mean_avg_players: total / records as f64,
        max_peak,
        most_popular: most_popular.name.clone(),
        highest_avg: most_popular.avg_players,
    })
}

/// Records above an average player threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct HighPerformers<'a> {
    /// How many records are above the threshold.
    pub matching: usize,
    /// `matching` as a fraction of all records, `0.0` for an empty dataset.
    pub share: f64,
    /// Sum of `avg_players` over the matching records.
    pub total_avg_players: f64,
    /// The most popular matching records, one per game name, best first.
    pub top: Vec<&'a Game>,
}

/// Finds records with `avg_players` strictly above `threshold`.
pub fn high_performers<'a>(
    games: impl IntoIterator<Item = &'a Game>,
    threshold: f64,
    top: usize,
) -> HighPerformers<'a> {
    let mut records = 0;
    let mut matching = Vec::new();
    for game in games {
        records += 1;
        if game.avg_players > threshold {
            matching.push(game);
        }
    }

    let total_avg_players = matching.iter().map(|g| g.avg_players).sum();
    matching.sort_by(|a, b| b.avg_players.total_cmp(&a.avg_players));

    HighPerformers {
        matching: matching.len(),
        share: fraction(matching.len(), records),
        total_avg_players,
        top: unique_names(&matching, top),
    }
}

/// How player counts moved month over month.
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthTrends<'a> {
    /// Number of records.
    pub records: usize,
    /// Mean `gain_percent`, as a fraction.
    pub mean_gain_percent: f64,
    /// Records with a positive `gain_percent`.
    pub growing: usize,
    /// Records with a negative `gain_percent`.
    pub declining: usize,
    /// The record with the highest `gain_percent`.
    pub fastest_growing: &'a Game,
    /// The record with the lowest `gain_percent`.
    pub fastest_declining: &'a Game,
}

/// Looks at `gain_percent` across `games`. `None` when there are none.
pub fn growth_trends<'a>(games: impl IntoIterator<Item = &'a Game>) -> Option<GrowthTrends<'a>> {
    let mut games = games.into_iter();
    let first = games.next()?;

    let mut trends = GrowthTrends {
        records: 0,
        mean_gain_percent: 0.0,
        growing: 0,
        declining: 0,
        fastest_growing: first,
        fastest_declining: first,
    };
    let mut total = 0.0;

    for game in std::iter::once(first).chain(games) {
        let growth = game.gain_percent;
        trends.records += 1;
        total += growth;
        if growth > 0.0 {
            trends.growing += 1;
        } else if growth < 0.0 {
            trends.declining += 1;
        }
        if growth > trends.fastest_growing.gain_percent {
            trends.fastest_growing = game;
        }
        if growth < trends.fastest_declining.gain_percent {
            trends.fastest_declining = game;
        }
    }

    trends.mean_gain_percent = total / trends.records as f64;
    Some(trends)
}

/// Records whose peak went above a threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct PeakPerformance<'a> {
    /// How many records are above the threshold.
    pub matching: usize,
    /// The highest matching peaks, one per game name, highest first.
    pub top: Vec<&'a Game>,
}

/// Finds records with `peak_players` strictly above `threshold`.
pub fn peak_performance<'a>(
    games: impl IntoIterator<Item = &'a Game>,
    threshold: u64,
    top: usize,
) -> PeakPerformance<'a> {
    let mut matching: Vec<&Game> = games
        .into_iter()
        .filter(|g| g.peak_players > threshold)
        .collect();
    matching.sort_by(|a, b| b.peak_players.cmp(&a.peak_players));

    PeakPerformance {
        matching: matching.len(),
        top: unique_names(&matching, top),
    }
}

/// How concentrated players are among records.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketDistribution {
    /// Sum of `avg_players` over all records.
    pub total_players: f64,
    /// Fraction of `total_players` held by the most popular 10 % of records.
    pub top_10_share: f64,
    /// Same for the top 25 %.
    pub top_25_share: f64,
    /// Same for the top 50 %.
    pub top_50_share: f64,
}

impl MarketDistribution {
    /// More than half of all players sit in the top 10 % of records.
    pub fn is_concentrated(&self) -> bool {
        self.top_10_share > 0.5
    }
}

/// Measures concentration. Each tier is the first `len * p` records by popularity, rounded down.
/// `None` when there are no players at all.
pub fn market_distribution<'a>(
    games: impl IntoIterator<Item = &'a Game>,
) -> Option<MarketDistribution> {
    let mut players: Vec<f64> = games.into_iter().map(|g| g.avg_players).collect();
    players.sort_by(|a, b| b.total_cmp(a));

    let total_players: f64 = players.iter().sum();
    if total_players == 0.0 {
        return None;
    }

    let share = |p: f64| {
        let cut = (players.len() as f64 * p) as usize;
        players[..cut].iter().sum::<f64>() / total_players
    };

    Some(MarketDistribution {
        total_players,
        top_10_share: share(0.10),
        top_25_share: share(0.25),
        top_50_share: share(0.50),
    })
}

/// How steady one game's player base is across months.
#[derive(Debug, Clone, PartialEq)]
pub struct Stability {
    /// Game title.
    pub name: String,
    /// Number of monthly records seen.
    pub months: usize,
    /// Mean of `avg_players` over those records.
    pub mean_avg_players: f64,
    /// Largest relative deviation of a month from that mean.
    pub max_variation: f64,
}

/// Groups records by name and measures each game's largest relative deviation from its own
/// mean. Games with fewer than two records are left out. Most stable first.
pub fn player_stability<'a>(games: impl IntoIterator<Item = &'a Game>) -> Vec<Stability> {
    let mut by_name: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for game in games {
        by_name
            .entry(game.name.as_str())
            .or_default()
            .push(game.avg_players);
    }

    let mut stability: Vec<Stability> = by_name
        .into_iter()
        .filter(|(_, months)| months.len() > 1)
        .map(|(name, months)| {
            let mean = months.iter().sum::<f64>() / months.len() as f64;
            let max_variation = if mean == 0.0 {
                0.0
            } else {
                months
                    .iter()
                    .map(|x| ((x - mean) / mean).abs())
                    .fold(0.0, f64::max)
            };
            Stability {
                name: name.to_string(),
                months: months.len(),
                mean_avg_players: mean,
                max_variation,
            }
        })
        .collect();

    stability.sort_by(|a, b| a.max_variation.total_cmp(&b.max_variation));
    stability
}

/// Records with `min <= avg_players <= max`, in the order given.
pub fn in_range<'a>(
    games: impl IntoIterator<Item = &'a Game>,
    min: f64,
    max: f64,
) -> Vec<&'a Game> {
    games
        .into_iter()
        .filter(|g| g.avg_players >= min && g.avg_players <= max)
        .collect()
}

/// How far apart two averages may be and still name the same record.
pub const AVG_TOLERANCE: f64 = 0.01;

/// The record whose average is closest to `avg`, provided it is less than `tolerance` away.
/// Lets a typed-in average like `7805.249` find the record stored as `7805.25`.
pub fn nearest<'a>(
    games: impl IntoIterator<Item = &'a Game>,
    avg: f64,
    tolerance: f64,
) -> Option<&'a Game> {
    let distance = |g: &Game| (g.avg_players - avg).abs();
    games
        .into_iter()
        .filter(|g| distance(g) < tolerance)
        .min_by(|a, b| distance(a).total_cmp(&distance(b)))
}

/// Records whose name contains `pattern`, ignoring case, in the order given.
pub fn by_name<'a>(games: impl IntoIterator<Item = &'a Game>, pattern: &str) -> Vec<&'a Game> {
    let pattern = pattern.to_lowercase();
    games
        .into_iter()
        .filter(|g| g.name.to_lowercase().contains(&pattern))
        .collect()
}

/// Answers to every question, for one pair of trees built from the same records.
#[derive(Debug, Clone, PartialEq)]
pub struct Report<'a> {
    /// See [`summarize`].
    pub summary: Option<DatasetSummary>,
    /// See [`high_performers`].
    pub high_performers: HighPerformers<'a>,
    /// See [`growth_trends`].
    pub growth: Option<GrowthTrends<'a>>,
    /// See [`peak_performance`].
    pub peaks: PeakPerformance<'a>,
    /// See [`market_distribution`].
    pub market: Option<MarketDistribution>,
    /// Most stable games, see [`player_stability`].
    pub most_stable: Vec<Stability>,
    /// Most volatile games, most volatile first.
    pub most_volatile: Vec<Stability>,
}

impl<'a> Report<'a> {
    /// Runs every question against the trees.
    pub fn build(
        bst: &'a unbalanced::Tree<Game>,
        avl: &'a avl::Tree<Game>,
        config: &AnalysisConfig,
    ) -> Self {
        debug!(records = bst.len(), ?config, "running analyses");

        let stability = player_stability(bst.in_order());
        let most_stable = stability.iter().take(config.top_stability).cloned().collect();
        let most_volatile = stability
            .iter()
            .rev()
            .take(config.top_stability)
            .cloned()
            .collect();

        Self {
            summary: summarize(avl.in_order()),
            high_performers: high_performers(
                bst.in_order(),
                config.avg_threshold,
                config.top_performers,
            ),
            growth: growth_trends(avl.in_order()),
            peaks: peak_performance(bst.in_order(), config.peak_threshold, config.top_peaks),
            market: market_distribution(avl.in_order()),
            most_stable,
            most_volatile,
        }
    }
}

fn fraction(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// The first `limit` games of `games` with a name not seen before.
fn unique_names<'a>(games: &[&'a Game], limit: usize) -> Vec<&'a Game> {
    let mut seen = HashSet::new();
    games
        .iter()
        .copied()
        .filter(|g| seen.insert(g.name.as_str()))
        .take(limit)
        .collect()
}
