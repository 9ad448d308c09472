//! Typed identifiers for surveys, pages, blocks, questions, and options.
//!
//! Every ID is a short human-readable string: a kind prefix plus the first
//! 8 hex characters of a UUIDv4 (`survey_1f3a9c02`, `q_7be01d44`). They're
//! `#[serde(transparent)]`, so the wire form is the bare string.
//!
//! Collisions are treated as negligible; nothing checks a freshly minted ID
//! against existing ones. Option IDs are the exception: they're positional
//! (`opt_0`, `opt_1`, ...) and only unique within their question.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of hex characters kept from the UUID.
pub const ID_SUFFIX_LEN: usize = 8;

/// Mint `<prefix>_<8 hex>` from a fresh UUIDv4.
pub fn new_id(prefix: &str) -> String {
    let hex = uuid::Uuid::new_v4().simple().to_string();
    format!("{prefix}_{}", &hex[..ID_SUFFIX_LEN])
}

/// A survey identifier.
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurveyId(String);

/// A page identifier, unique within its survey.
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

/// A block identifier, unique within its survey.
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

/// A question identifier, unique within its survey.
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

/// An option identifier, unique within its question.
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionId(String);

// ── Shared behavior ─────────────────────────────────────────────────────────

macro_rules! impl_typed_id {
    ($T:ident, $name:literal) => {
        impl $T {
            /// Wrap an existing string without validation.
            ///
            /// Callers hand us arbitrary strings to look up; a malformed one
            /// simply won't match anything.
            pub fn from_raw(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// The ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl From<&str> for $T {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $T {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<$T> for String {
            fn from(id: $T) -> String {
                id.0
            }
        }

        impl AsRef<str> for $T {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $T {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $T {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl fmt::Display for $T {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl fmt::Debug for $T {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", $name, self.0)
            }
        }
    };
}

macro_rules! impl_minted_id {
    ($T:ident, $prefix:literal) => {
        impl $T {
            /// Prefix used when minting.
            pub const PREFIX: &'static str = $prefix;

            /// Mint a fresh random ID.
            pub fn new() -> Self {
                Self(new_id(Self::PREFIX))
            }
        }

        impl Default for $T {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

impl_typed_id!(SurveyId, "SurveyId");
impl_typed_id!(PageId, "PageId");
impl_typed_id!(BlockId, "BlockId");
impl_typed_id!(QuestionId, "QuestionId");
impl_typed_id!(OptionId, "OptionId");

impl_minted_id!(SurveyId, "survey");
impl_minted_id!(PageId, "page");
impl_minted_id!(BlockId, "block");
impl_minted_id!(QuestionId, "q");

impl OptionId {
    /// Prefix for positional option IDs.
    pub const PREFIX: &'static str = "opt";

    /// The ID of the option at `index` (zero-based) in its question.
    pub fn positional(index: usize) -> Self {
        Self(format!("{}_{index}", Self::PREFIX))
    }
}

// ============================================================================
// Tests
// ============================================================================
