//! The record stored in the trees: one month of player statistics for one Steam game.

use std::cmp::Ordering;
use std::fmt;

/// Monthly player statistics for a game.
///
/// Games are ordered by [`avg_players`][Game::avg_players] alone, using the IEEE 754 total order
/// so the order is total even with `NaN`s around. Equality follows the same rule: two records
/// with the same average compare equal even if every other field differs, which is what lets a
/// tree keep several of them and [`Game::probe`] search for them.
///
/// # Examples
///
/// ```
/// use ordtree::record::Game;
///
/// let cs = Game::new("Sep-25", 7805.25, 883.12, 0.1276, 13254, "Counter-Strike", 10);
///
/// assert_eq!(cs.year(), Some(2025));
/// assert_eq!(cs.month_name(), "Sep");
/// assert_eq!(cs, Game::probe(7805.25));
/// assert!(cs < Game::probe(8000.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Game {
    /// Month label such as `Sep-25`.
    pub month: String,
    /// Average concurrent players over the month. This is the sort key.
    pub avg_players: f64,
    /// Change of `avg_players` against the previous month.
    pub gain: f64,
    /// `gain` as a fraction of the previous month (`0.1` is ten percent).
    pub gain_percent: f64,
    /// Highest concurrent player count seen in the month.
    pub peak_players: u64,
    /// Game title.
    pub name: String,
    /// Steam application id.
    pub steam_appid: u32,
}

impl Game {
    /// Builds a record from its fields.
    pub fn new(
        month: impl Into<String>,
        avg_players: f64,
        gain: f64,
        gain_percent: f64,
        peak_players: u64,
        name: impl Into<String>,
        steam_appid: u32,
    ) -> Self {
        Self {
            month: month.into(),
            avg_players,
            gain,
            gain_percent,
            peak_players,
            name: name.into(),
            steam_appid,
        }
    }

    /// A record carrying nothing but a sort key, for searching and deleting.
    pub fn probe(avg_players: f64) -> Self {
        Self {
            avg_players,
            ..Self::default()
        }
    }

    /// The year from a `Mon-YY` month label, read as `20YY`.
    pub fn year(&self) -> Option<i32> {
        let (_, yy) = self.month.split_once('-')?;
        yy.trim().parse::<i32>().ok().map(|yy| 2000 + yy)
    }

    /// The month part of the label, `Sep` for `Sep-25`.
    pub fn month_name(&self) -> &str {
        self.month.split('-').next().unwrap_or_default()
    }

    /// Peak players as a multiple of the average. `None` when the average is zero.
    pub fn peak_ratio(&self) -> Option<f64> {
        (self.avg_players != 0.0).then(|| self.peak_players as f64 / self.avg_players)
    }
}

impl PartialEq for Game {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Game {}

impl PartialOrd for Game {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Game {
    fn cmp(&self, other: &Self) -> Ordering {
        self.avg_players.total_cmp(&other.avg_players)
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): avg {:.2}, peak {}, appid {}",
            self.name, self.month, self.avg_players, self.peak_players, self.steam_appid
        )
    }
}

/// A small built-in dataset, used when no CSV is available.
pub fn sample_games() -> Vec<Game> {
    vec![
        Game::new("Sep-25", 7805.25, 883.12, 0.1276, 13254, "Counter-Strike", 10),
        Game::new("Aug-25", 6922.13, -449.35, -0.061, 12168, "Counter-Strike", 10),
        Game::new("Jul-25", 7371.48, -833.5, -0.1016, 13951, "Counter-Strike", 10),
        Game::new("Sep-25", 25000.0, 2000.0, 0.087, 45000, "Dota 2", 570),
        Game::new("Aug-25", 23000.0, -1500.0, -0.061, 42000, "Dota 2", 570),
        Game::new("Sep-25", 15000.0, 500.0, 0.034, 28000, "PUBG", 578080),
        Game::new("Aug-25", 14500.0, -200.0, -0.014, 27500, "PUBG", 578080),
        Game::new("Sep-25", 8500.0, 300.0, 0.037, 16000, "Team Fortress 2", 440),
        Game::new("Aug-25", 8200.0, -100.0, -0.012, 15800, "Team Fortress 2", 440),
        Game::new("Sep-25", 5000.0, 200.0, 0.042, 9500, "Rust", 252490),
    ]
}
