//! Decoding the player account into typed tiles.
//!
//! The account arrives as JSON produced by the wallet client. Planting
//! timestamps are on-chain `i64` values that the client may render as a
//! plain integer, a decimal string, or a `0x`-prefixed hex string. All of
//! that is resolved here, so the computation core only ever sees `i64`
//! seconds and decoded [`CropType`] values.
//!
//! Hex must carry the `0x` prefix. A big-number `toJSON` emits bare hex,
//! and bare hex made only of digits would read as the wrong decimal, so
//! the client has to prefix it before writing the account. Unprefixed text
//! is accepted only as at most [`MAX_DECIMAL_DIGITS`] ASCII digits;
//! anything else is rejected rather than guessed.
//!
//! [`AccountSource`] abstracts where the account comes from. The poller
//! calls it once per frame.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use farmstead_types::{CropType, Tile};
use farmstead_world::{FarmError, decode_crop};

/// Fertility assumed for plots whose record omits it.
pub const DEFAULT_FERTILITY: u8 = 100;

/// Longest unprefixed timestamp string read as decimal seconds. Thirteen
/// digits is a millisecond timestamp.
pub const MAX_DECIMAL_DIGITS: usize = 12;

/// Errors raised while reading or decoding an account.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The account file could not be read.
    #[error("failed to read account file {}: {source}", path.display())]
    Io {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The account JSON is malformed or has the wrong shape.
    #[error("failed to parse account JSON: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// A planting timestamp that is negative or not a number.
    #[error("tile {tile}: invalid planted_at value {value:?}")]
    InvalidTimestamp {
        /// Index of the offending tile.
        tile: usize,
        /// The raw value as received.
        value: String,
    },

    /// A fertility value above 100.
    #[error("tile {tile}: fertility {value} exceeds 100")]
    InvalidFertility {
        /// Index of the offending tile.
        tile: usize,
        /// The raw value as received.
        value: u8,
    },

    /// A crop value with no entry in the crop table.
    #[error("tile {tile}: {source}")]
    Crop {
        /// Index of the offending tile.
        tile: usize,
        /// The underlying decode error.
        source: FarmError,
    },

    /// The source had no account to give.
    #[error("account unavailable: {reason}")]
    Unavailable {
        /// Why the account could not be produced.
        reason: String,
    },
}

/// A planting timestamp as it appears in account JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    /// A JSON integer.
    Int(i64),
    /// A decimal string of up to [`MAX_DECIMAL_DIGITS`] digits, or a
    /// `0x`-prefixed hex string.
    Text(String),
}

impl RawTimestamp {
    /// The timestamp in Unix seconds, or `None` if it is negative or does
    /// not parse.
    pub fn to_unix(&self) -> Option<i64> {
        let value = match self {
            Self::Int(value) => *value,
            Self::Text(text) => parse_timestamp_text(text.trim())?,
        };
        (value >= 0).then_some(value)
    }
}

impl Default for RawTimestamp {
    fn default() -> Self {
        Self::Int(0)
    }
}

impl std::fmt::Display for RawTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

fn parse_timestamp_text(text: &str) -> Option<i64> {
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        return i64::from_str_radix(hex, 16).ok();
    }
    let decimal = !text.is_empty()
        && text.len() <= MAX_DECIMAL_DIGITS
        && text.bytes().all(|b| b.is_ascii_digit());
    if decimal { text.parse().ok() } else { None }
}

/// One plot as stored in the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileRecord {
    /// Raw crop value; `0` is empty.
    pub crop_type: u8,
    /// Planting time.
    #[serde(default)]
    pub planted_at: RawTimestamp,
    /// Soil fertility in percent; absent on accounts created before
    /// fertility existed.
    #[serde(default)]
    pub fertility: Option<u8>,
    /// Raw value of the previously harvested crop.
    #[serde(default)]
    pub last_crop_type: Option<u8>,
}

/// The decoded player account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    /// The farm plots in row-major order.
    pub tiles: Vec<TileRecord>,
}

/// Parse account JSON.
///
/// # Errors
///
/// Returns [`IngestError::Json`] if the JSON is malformed or misshapen.
pub fn parse_account_json(json: &str) -> Result<AccountRecord, IngestError> {
    Ok(serde_json::from_str(json)?)
}

/// Decode every tile record in the account.
///
/// The tile count is not checked here; building the grid does that.
///
/// # Errors
///
/// Returns the first decoding error encountered, tagged with its tile
/// index.
pub fn decode_tiles(account: &AccountRecord) -> Result<Vec<Tile>, IngestError> {
    let tiles = account
        .tiles
        .iter()
        .enumerate()
        .map(|(index, record)| decode_tile(index, record))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(tiles = tiles.len(), "account decoded");
    Ok(tiles)
}

fn decode_tile(index: usize, record: &TileRecord) -> Result<Tile, IngestError> {
    let crop = decode_raw_crop(index, record.crop_type)?;
    let last_crop = match record.last_crop_type {
        Some(raw) => decode_raw_crop(index, raw)?,
        None => None,
    };

    let fertility = record.fertility.unwrap_or(DEFAULT_FERTILITY);
    if fertility > 100 {
        return Err(IngestError::InvalidFertility {
            tile: index,
            value: fertility,
        });
    }

    let tile = match crop {
        Some(crop) => {
            let planted_at =
                record
                    .planted_at
                    .to_unix()
                    .ok_or_else(|| IngestError::InvalidTimestamp {
                        tile: index,
                        value: record.planted_at.to_string(),
                    })?;
            Tile::planted(crop, planted_at, fertility)
        }
        None => Tile::empty(fertility),
    };
    Ok(tile.with_last_crop(last_crop))
}

fn decode_raw_crop(index: usize, raw: u8) -> Result<Option<CropType>, IngestError> {
    decode_crop(raw).map_err(|source| IngestError::Crop {
        tile: index,
        source,
    })
}

// ---------------------------------------------------------------------------
// Account sources
// ---------------------------------------------------------------------------

/// A source of player accounts.
///
/// `fetch` may block; the poller runs it on tokio's blocking pool.
pub trait AccountSource: Send {
    /// Fetch the current account.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError`] if the account cannot be read or parsed.
    fn fetch(&mut self) -> Result<AccountRecord, IngestError>;
}

/// Reads the account from a JSON file on every fetch.
#[derive(Debug, Clone)]
pub struct FileAccountSource {
    path: PathBuf,
}

impl FileAccountSource {
    /// A source reading `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AccountSource for FileAccountSource {
    fn fetch(&mut self) -> Result<AccountRecord, IngestError> {
        let json = std::fs::read_to_string(&self.path).map_err(|source| IngestError::Io {
            path: self.path.clone(),
            source,
        })?;
        parse_account_json(&json)
    }
}

/// Serves accounts from memory.
///
/// Frames are handed out in order; once the queue is exhausted the last
/// frame repeats. A `None` frame fails with [`IngestError::Unavailable`].
#[derive(Debug, Clone, Default)]
pub struct StaticAccountSource {
    frames: VecDeque<Option<AccountRecord>>,
    last: Option<AccountRecord>,
}

impl StaticAccountSource {
    /// A source that always returns `account`.
    pub fn new(account: AccountRecord) -> Self {
        Self {
            frames: VecDeque::new(),
            last: Some(account),
        }
    }

    /// A source that plays `frames` in order, then repeats the last one.
    pub fn sequence(frames: Vec<Option<AccountRecord>>) -> Self {
        Self {
            frames: frames.into(),
            last: None,
        }
    }
}

impl AccountSource for StaticAccountSource {
    fn fetch(&mut self) -> Result<AccountRecord, IngestError> {
        if let Some(frame) = self.frames.pop_front() {
            self.last = frame;
        }
        self.last.clone().ok_or_else(|| IngestError::Unavailable {
            reason: "no account frame".to_owned(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_forms() {
        assert_eq!(RawTimestamp::Int(1_700_000_000).to_unix(), Some(1_700_000_000));
        assert_eq!(RawTimestamp::Text("1700000000".into()).to_unix(), Some(1_700_000_000));
        assert_eq!(RawTimestamp::Text("0x6553f100".into()).to_unix(), Some(1_700_000_000));
        assert_eq!(RawTimestamp::Text(" 42 ".into()).to_unix(), Some(42));
        assert_eq!(RawTimestamp::Int(-1).to_unix(), None);
        assert_eq!(RawTimestamp::Text("-5".into()).to_unix(), None);
        assert_eq!(RawTimestamp::Text("soon".into()).to_unix(), None);
    }

    #[test]
    fn unprefixed_text_must_be_short_decimal() {
        // Bare hex from a big-number toJSON.
        assert_eq!(RawTimestamp::Text("6553f100".into()).to_unix(), None);
        // Milliseconds, not seconds.
        assert_eq!(RawTimestamp::Text("1700000000000".into()).to_unix(), None);
        assert_eq!(RawTimestamp::Text("+42".into()).to_unix(), None);
        assert_eq!(RawTimestamp::Text(String::new()).to_unix(), None);
        assert_eq!(RawTimestamp::Text("999999999999".into()).to_unix(), Some(999_999_999_999));

        let account = parse_account_json(r#"{"tiles":[{"cropType":1,"plantedAt":"6553f100"}]}"#).unwrap();
        assert!(matches!(
            decode_tiles(&account),
            Err(IngestError::InvalidTimestamp { tile: 0, .. })
        ));
    }

    #[test]
    fn parses_camel_case_account() {
        let json = r#"{
            "tiles": [
                { "cropType": 1, "plantedAt": 100, "fertility": 80, "lastCropType": 4 },
                { "cropType": 0, "plantedAt": "0x0" },
                { "cropType": 3, "plantedAt": "0x64" }
            ]
        }"#;
        let account = parse_account_json(json).unwrap();
        let tiles = decode_tiles(&account).unwrap();

        assert_eq!(
            tiles,
            vec![
                Tile::planted(CropType::Wheat, 100, 80).with_last_crop(Some(CropType::Carrot)),
                Tile::empty(DEFAULT_FERTILITY),
                Tile::planted(CropType::Corn, 100, DEFAULT_FERTILITY),
            ]
        );
    }

    #[test]
    fn empty_plot_ignores_bad_timestamp() {
        let account = AccountRecord {
            tiles: vec![TileRecord {
                crop_type: 0,
                planted_at: RawTimestamp::Text("garbage".into()),
                fertility: Some(50),
                last_crop_type: Some(0),
            }],
        };
        assert_eq!(decode_tiles(&account).unwrap(), vec![Tile::empty(50)]);
    }

    #[test]
    fn rejects_bad_values() {
        let record = |crop_type, planted_at, fertility| TileRecord {
            crop_type,
            planted_at,
            fertility,
            last_crop_type: None,
        };

        let account = AccountRecord {
            tiles: vec![record(1, RawTimestamp::Int(0), None), record(1, RawTimestamp::Int(-3), None)],
        };
        assert!(matches!(
            decode_tiles(&account),
            Err(IngestError::InvalidTimestamp { tile: 1, .. })
        ));

        let account = AccountRecord {
            tiles: vec![record(2, RawTimestamp::Int(0), Some(101))],
        };
        assert!(matches!(
            decode_tiles(&account),
            Err(IngestError::InvalidFertility { tile: 0, value: 101 })
        ));

        let account = AccountRecord {
            tiles: vec![record(9, RawTimestamp::Int(0), None)],
        };
        assert!(matches!(
            decode_tiles(&account),
            Err(IngestError::Crop {
                tile: 0,
                source: FarmError::UnknownCropType(9)
            })
        ));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            parse_account_json("{\"tiles\": 3}"),
            Err(IngestError::Json { .. })
        ));
    }

    #[test]
    fn static_source_plays_frames_then_repeats() {
        let one = AccountRecord { tiles: Vec::new() };
        let mut source = StaticAccountSource::sequence(vec![None, Some(one.clone())]);

        assert!(matches!(source.fetch(), Err(IngestError::Unavailable { .. })));
        assert_eq!(source.fetch().unwrap(), one);
        assert_eq!(source.fetch().unwrap(), one);
    }

    #[test]
    fn file_source_reports_path_on_missing_file() {
        let mut source = FileAccountSource::new("/nonexistent/farmstead/account.json");
        let err = source.fetch().unwrap_err();
        assert!(matches!(err, IngestError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/farmstead/account.json"));
    }
}
