//! Opaque object identifier (OOID) utilities.
//!
//! An OOID is a short textual token used to name a stored object and to tell
//! the storage layer where to put it. Alongside an opaque random component,
//! every OOID embeds the object's creation date and a storage *depth*: a hint
//! for how many nested directory levels the object should be filed under in a
//! date-bucketed layout.
//!
//! ## Token layout
//!
//! An OOID is **32 characters** long: a 25-character random prefix followed by
//! a 7-digit suffix.
//!
//! ```text
//! abcdef1234567890abcdef123 2 12 05 04
//! └───────────┬───────────┘ │ └┬┘ └┬┘ └┬┘
//!   random prefix (25)      │  │   │   day, zero-padded (2)
//!                           │  │   month, zero-padded (2)
//!                           │  year % 100, zero-padded (2)
//!                           depth, 1-4 (1)
//! ```
//!
//! The prefix is taken from a v4 UUID in canonical hyphenated form: the `-`
//! separators are removed first, then the last 7 characters of the remaining
//! 32 are dropped. For a well-formed UUID this equals the first 25 characters
//! of its `simple` (separator-free) form.
//!
//! Notes:
//! - The random prefix has no meaning beyond uniqueness; the codec never
//!   interprets it.
//! - A depth digit of `0` is never produced by the encoder. In older stored
//!   tokens it stands for the historical fixed depth, and decodes as
//!   [`OLD_HARD_DEPTH`] (4).
//! - Only the last two digits of the year are stored; decoding reconstructs
//!   the year as `2000 + value`. Tokens for dates outside 2000-2099 do not
//!   round-trip. Accepted limitation.
//! - Decoding works from the *end* of the token, so 36-character tokens
//!   produced by an older encoder that kept the UUID separators decode
//!   exactly like canonical ones.
//!
//! ## Encoding and decoding
//!
//! [`Ooid::new`] generates a fresh token; [`Ooid::from_uuid_str`] derives one
//! from an identifier the caller already holds. Both default the date to
//! today (UTC) and the depth to [`DEFAULT_DEPTH`], and panic if an explicit
//! depth falls outside 1-4: an out-of-range depth is caller error, not data.
//!
//! Decoding never fails: [`date_and_depth_from_ooid`] and its projections
//! [`date_from_ooid`] and [`depth_from_ooid`] accept any string and return
//! `None` for anything that does not carry a well-formed suffix. There is no
//! error to handle and no panic to fear, whatever the input.
//!
//! ```
//! use chrono::NaiveDate;
//! use ooid::{date_and_depth_from_ooid, Ooid};
//!
//! let date = NaiveDate::from_ymd_opt(2012, 5, 4).unwrap();
//! let id = Ooid::from_uuid_str("abcdef12-3456-7890-abcd-ef1234567890", Some(date), Some(2));
//! assert_eq!(id.as_str(), "abcdef1234567890abcdef1232120504");
//!
//! let (decoded, depth) = date_and_depth_from_ooid(id.as_str()).unwrap();
//! assert_eq!(decoded.date_naive(), date);
//! assert_eq!(depth, 2);
//!
//! assert_eq!(date_and_depth_from_ooid("not-an-ooid-at-all"), None);
//! ```
//!
//! ## Validation
//!
//! Construction is deliberately permissive: [`Ooid::from_uuid_str`] performs
//! no shape check on its input, so a malformed identifier silently yields a
//! malformed token (see its documentation). When an OOID string comes back
//! from storage or user input and you want the canonical form enforced, use
//! [`Ooid::parse`], which rejects anything that is not 32 lowercase hex
//! characters ending in a decodable date suffix.

mod codec;

// Re-export public types
pub use codec::{
    date_and_depth_from_ooid, date_from_ooid, depth_from_ooid, Ooid, DEFAULT_DEPTH, MAX_DEPTH,
    MIN_DEPTH, OLD_HARD_DEPTH, OOID_LENGTH,
};

/// Error type for OOID operations.
#[derive(Debug, thiserror::Error)]
pub enum OoidError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for OOID operations.
pub type OoidResult<T> = Result<T, OoidError>;
