//! Loading [`Game`] records from comma separated text.
//!
//! The expected layout is a header line followed by rows of
//! `month,avg_players,gain,gain_percent,peak_players,name,steam_appid`. Extra trailing fields
//! are ignored. A row that can't be read is logged and skipped; only I/O failures abort a load.
//!
//! # Examples
//!
//! ```
//! use ordtree::ingest::read_games;
//!
//! let csv = "\
//! month,avg_players,gain,gain_percent,peak_players,name,steam_appid
//! Sep-25,7805.25,883.12,0.1276,13254,Counter-Strike,10
//! Aug-25,not-a-number,,,12168,Counter-Strike,10
//! Jul-25,7371.48,,,13951,Counter-Strike,10
//! ";
//!
//! let ingest = read_games(csv.as_bytes()).unwrap();
//! assert_eq!(ingest.games.len(), 2);
//! assert_eq!(ingest.skipped, 1);
//! assert_eq!(ingest.games[1].gain, 0.0);
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use tracing::{debug, info, warn};

use crate::error::Error;
use crate::record::Game;

/// Number of fields a row needs.
const FIELDS: usize = 7;

/// The outcome of a load.
#[derive(Debug, Clone, Default)]
pub struct Ingest {
    /// Records read, in source order.
    pub games: Vec<Game>,
    /// Rows that were malformed and skipped.
    pub skipped: usize,
}

impl Ingest {
    /// Keeps only the first `n` records.
    pub fn sample(mut self, n: usize) -> Self {
        self.games.truncate(n);
        self
    }
}

/// Reads records from `reader`. The first line is a header and is skipped, as are blank lines.
/// A row that isn't valid UTF-8 is malformed like any other bad row.
pub fn read_games<R: BufRead>(reader: R) -> Result<Ingest, Error> {
    let mut ingest = Ingest::default();

    for (index, line) in reader.split(b'\n').enumerate() {
        let line = line?;
        if index == 0 {
            continue;
        }

        let parsed = String::from_utf8(line)
            .map_err(|_| Error::MalformedRecord {
                line: index + 1,
                reason: "row is not valid UTF-8".to_string(),
            })
            .and_then(|row| {
                let row = row.trim_end_matches('\r');
                if row.trim().is_empty() {
                    Ok(None)
                } else {
                    parse_row(row, index + 1).map(Some)
                }
            });

        match parsed {
            Ok(None) => {}
            Ok(Some(game)) => ingest.games.push(game),
            Err(err) => {
                warn!(%err, "skipping row");
                ingest.skipped += 1;
            }
        }
    }

    debug!(
        loaded = ingest.games.len(),
        skipped = ingest.skipped,
        "finished reading records"
    );
    Ok(ingest)
}

/// Opens `path` and reads records from it.
pub fn read_games_from_path(path: impl AsRef<Path>) -> Result<Ingest, Error> {
    let path = path.as_ref();
    let ingest = read_games(BufReader::new(File::open(path)?))?;
    info!(path = %path.display(), records = ingest.games.len(), "loaded records");
    Ok(ingest)
}

/// Parses one data row. `line` is its 1-based line number, used in the error.
pub fn parse_row(row: &str, line: usize) -> Result<Game, Error> {
    let fields: Vec<&str> = row.split(',').map(str::trim).collect();
    if fields.len() < FIELDS {
        return Err(Error::MalformedRecord {
            line,
            reason: format!("expected {} fields, found {}", FIELDS, fields.len()),
        });
    }

    Ok(Game {
        month: fields[0].to_string(),
        avg_players: number(fields[1], "avg_players", line)?,
        gain: number(fields[2], "gain", line)?,
        gain_percent: number(fields[3], "gain_percent", line)?,
        peak_players: number(fields[4], "peak_players", line)?,
        name: fields[5].to_string(),
        steam_appid: number(fields[6], "steam_appid", line)?,
    })
}

/// Parses a numeric field, reading an empty one as zero.
fn number<N: FromStr + Default>(field: &str, name: &str, line: usize) -> Result<N, Error> {
    if field.is_empty() {
        return Ok(N::default());
    }
    field.parse().map_err(|_| Error::MalformedRecord {
        line,
        reason: format!("{} is not a number: `{}`", name, field),
    })
}
