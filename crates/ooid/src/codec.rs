//! Encoding and decoding of opaque object identifiers.
//!
//! This module contains the token format implementation: generation of fresh
//! OOIDs, derivation from caller-supplied UUIDs, and the total (never-failing)
//! extraction of the encoded date and storage depth.

use crate::{OoidError, OoidResult};
use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Storage depth encoded when the caller does not supply one.
pub const DEFAULT_DEPTH: u32 = 2;

/// Depth implied by a `0` depth digit in older stored tokens.
///
/// Early tokens were always filed at a fixed nesting depth and encoded a `0`
/// in the depth position; decoding maps that digit to this value.
pub const OLD_HARD_DEPTH: u32 = 4;

/// Smallest storage depth the encoder accepts.
pub const MIN_DEPTH: u32 = 1;

/// Largest storage depth the encoder accepts.
pub const MAX_DEPTH: u32 = 4;

/// Total length of a canonical OOID in characters.
pub const OOID_LENGTH: usize = 32;

/// Length of the trailing `depth + yy + mm + dd` digit suffix.
const SUFFIX_LENGTH: usize = 7;

/// An opaque object identifier.
///
/// An `Ooid` wraps the 32-character token produced by the encoder: a
/// 25-character random prefix followed by a digit suffix carrying the storage
/// depth and creation date (see the crate-level documentation for the exact
/// layout). The token is the identifier's only representation; there is no
/// richer internal form to convert to or from.
///
/// # Construction
/// - [`Ooid::new`] generates a fresh token from a v4 UUID.
/// - [`Ooid::from_uuid_str`] derives a token from an identifier the caller
///   already holds, with **no validation** of the input's shape.
/// - [`Ooid::parse`] validates an externally supplied token string and is the
///   only constructor that can fail.
///
/// # Display format
/// When displayed or converted to a string, an `Ooid` always reproduces its
/// token exactly as encoded.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ooid(String);

impl Default for Ooid {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl Ooid {
    /// Generates a fresh OOID for the given date, to be stored at the given
    /// depth.
    ///
    /// # Arguments
    ///
    /// * `date` - The calendar date to encode. Defaults to the current UTC
    ///   date when `None`.
    /// * `depth` - The storage depth to encode. Defaults to
    ///   [`DEFAULT_DEPTH`] when `None`.
    ///
    /// # Returns
    ///
    /// Returns a new token holding 25 random hex characters plus the encoded
    /// date and depth.
    ///
    /// # Panics
    ///
    /// Panics if `depth` is outside `1..=4` after defaulting. An
    /// out-of-range depth is a bug in the caller, so it is rejected with an
    /// assertion rather than an error value.
    pub fn new(date: Option<NaiveDate>, depth: Option<u32>) -> Self {
        Self(encode(&Uuid::new_v4().to_string(), date, depth))
    }

    /// Derives an OOID from a UUID string the caller already holds.
    ///
    /// `uuid` is expected to be in canonical hyphenated form
    /// (`xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`); its separators are removed
    /// and the last 7 characters of the remainder are discarded to make room
    /// for the date-and-depth suffix.
    ///
    /// The input's shape is **not** validated, and the truncation is purely
    /// positional: a malformed `uuid` silently produces a malformed token.
    /// Upholding the expected shape is the caller's responsibility. Use
    /// [`Ooid::parse`] on the result if you need the canonical form
    /// guaranteed.
    ///
    /// # Arguments
    ///
    /// * `uuid` - Identifier text supplying the random prefix.
    /// * `date` - The calendar date to encode. Defaults to the current UTC
    ///   date when `None`.
    /// * `depth` - The storage depth to encode. Defaults to
    ///   [`DEFAULT_DEPTH`] when `None`.
    ///
    /// # Panics
    ///
    /// Panics if `depth` is outside `1..=4` after defaulting, exactly as
    /// [`Ooid::new`] does.
    pub fn from_uuid_str(uuid: &str, date: Option<NaiveDate>, depth: Option<u32>) -> Self {
        Self(encode(uuid, date, depth))
    }

    /// Validates and wraps a token string that must already be in canonical
    /// form.
    ///
    /// This is the strict counterpart to the permissive constructors: the
    /// input must be 32 lowercase hex characters whose trailing digits
    /// encode a real calendar date. Tokens from the older hyphenated format
    /// are rejected here even though the decode functions accept them.
    ///
    /// # Errors
    ///
    /// Returns [`OoidError::InvalidInput`] if `input` is not canonical or
    /// its suffix does not decode.
    pub fn parse(input: &str) -> OoidResult<Self> {
        if !Self::is_canonical(input) {
            return Err(OoidError::InvalidInput(format!(
                "OOID must be {} lowercase hex characters ending in {} digits, got: '{}'",
                OOID_LENGTH, SUFFIX_LENGTH, input
            )));
        }
        if date_and_depth_from_ooid(input).is_none() {
            return Err(OoidError::InvalidInput(format!(
                "OOID suffix does not encode a valid calendar date: '{}'",
                input
            )));
        }
        Ok(Self(input.to_owned()))
    }

    /// Returns true if `input` has the canonical OOID shape.
    ///
    /// This is a purely syntactic check that validates:
    /// - Exactly 32 bytes long
    /// - Contains only lowercase hex characters (`0-9` and `a-f`)
    /// - Ends in 7 ASCII digits (the depth-and-date suffix)
    ///
    /// It does not check that the suffix encodes a real calendar date; that
    /// is [`Ooid::parse`]'s job.
    pub fn is_canonical(input: &str) -> bool {
        input.len() == OOID_LENGTH
            && input.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
            && input
                .bytes()
                .skip(OOID_LENGTH - SUFFIX_LENGTH)
                .all(|b| b.is_ascii_digit())
    }

    /// Returns the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extracts the encoded date and storage depth from this token.
    pub fn date_and_depth(&self) -> Option<(DateTime<Utc>, u32)> {
        date_and_depth_from_ooid(&self.0)
    }

    /// Extracts the encoded storage depth from this token.
    pub fn depth(&self) -> Option<u32> {
        depth_from_ooid(&self.0)
    }

    /// Extracts the encoded date from this token.
    pub fn date(&self) -> Option<DateTime<Utc>> {
        date_from_ooid(&self.0)
    }
}

impl fmt::Display for Ooid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Ooid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Ooid {
    type Err = OoidError;

    /// Parses a string into an `Ooid`, requiring canonical form.
    ///
    /// This is equivalent to calling [`Ooid::parse`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ooid::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Ooid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Ooid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ooid::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Extracts the encoded date and storage depth from an OOID string.
///
/// The suffix is read from the *end* of the token, character by character:
/// the last 2 characters as the day, the 2 before as the month, the 2 before
/// those as the year (reconstructed as `2000 + value`), and the character
/// before those as the depth digit. A `0` depth digit decodes as
/// [`OLD_HARD_DEPTH`]. The date is returned at midnight UTC.
///
/// Because only trailing positions matter, tokens from the older encoder
/// that kept the UUID separators (36 characters) decode exactly like
/// canonical 32-character tokens.
///
/// Decoding is all-or-nothing and total: any input that fails any step
/// (non-digit characters, an impossible calendar date such as month 13 or
/// day 32, or a string shorter than 7 characters) yields `None` for *both*
/// components. No input panics, including empty and non-ASCII strings.
///
/// Note that the depth is not range-checked on the way out: only the `0`
/// digit is special-cased, so a stored token with a rogue depth of, say, 9
/// decodes to 9. The `1..=4` bound is an encoder-side contract.
pub fn date_and_depth_from_ooid(ooid: &str) -> Option<(DateTime<Utc>, u32)> {
    // Character positions, not byte offsets, so multi-byte junk cannot
    // cause an out-of-bounds slice.
    let chars: Vec<char> = ooid.chars().collect();
    let len = chars.len();
    if len < SUFFIX_LENGTH {
        return None;
    }
    let day = parse_two(&chars[len - 2..])?;
    let month = parse_two(&chars[len - 4..len - 2])?;
    let year = 2000 + parse_two(&chars[len - 6..len - 4])? as i32;
    let depth = match chars[len - SUFFIX_LENGTH].to_digit(10)? {
        0 => OLD_HARD_DEPTH,
        depth => depth,
    };
    let date = Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).single()?;
    Some((date, depth))
}

/// Extracts the encoded storage depth from an OOID string.
///
/// Returns `None` whenever [`date_and_depth_from_ooid`] would: the depth is
/// never reported for a token whose date portion is unreadable.
pub fn depth_from_ooid(ooid: &str) -> Option<u32> {
    date_and_depth_from_ooid(ooid).map(|(_, depth)| depth)
}

/// Extracts the encoded date from an OOID string.
///
/// Returns `None` whenever [`date_and_depth_from_ooid`] would.
pub fn date_from_ooid(ooid: &str) -> Option<DateTime<Utc>> {
    date_and_depth_from_ooid(ooid).map(|(date, _)| date)
}

/// Two-character zero-padded integer field.
fn parse_two(chars: &[char]) -> Option<u32> {
    chars.iter().collect::<String>().parse().ok()
}

fn encode(random_id: &str, date: Option<NaiveDate>, depth: Option<u32>) -> String {
    let date = date.unwrap_or_else(|| Utc::now().date_naive());
    let depth = depth.unwrap_or(DEFAULT_DEPTH);
    assert!(
        (MIN_DEPTH..=MAX_DEPTH).contains(&depth),
        "storage depth must be between {} and {}, got {}",
        MIN_DEPTH,
        MAX_DEPTH,
        depth
    );
    // Purely positional: strip the separators, then drop the trailing 7
    // characters of whatever remains.
    let stripped: Vec<char> = random_id.chars().filter(|&c| c != '-').collect();
    let prefix: String = stripped[..stripped.len().saturating_sub(SUFFIX_LENGTH)]
        .iter()
        .collect();
    format!(
        "{}{}{:02}{:02}{:02}",
        prefix,
        depth,
        date.year().rem_euclid(100),
        date.month(),
        date.day()
    )
}
