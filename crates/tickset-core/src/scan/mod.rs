//! Byte-pattern matching over module memory.
//!
//! Signatures are fixed bytes plus wildcard positions for operands that vary
//! by engine build. The mask is authoritative: `b'x'` positions must match,
//! `b'?'` positions are ignored, and only `mask.len()` bytes of the window
//! are ever compared.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const MASK_MATCH: u8 = b'x';
pub const MASK_WILDCARD: u8 = b'?';

/// Compare one window against a pattern under a mask.
///
/// Pure and allocation-free; short-circuits on the first mismatch. Returns
/// false if either buffer is shorter than the mask.
pub fn data_compare(window: &[u8], pattern: &[u8], mask: &[u8]) -> bool {
    if window.len() < mask.len() || pattern.len() < mask.len() {
        return false;
    }

    mask.iter()
        .zip(window)
        .zip(pattern)
        .all(|((&m, &w), &p)| m != MASK_MATCH || w == p)
}

/// Find the lowest offset in `region` where the masked pattern matches.
///
/// Scans left to right with byte stride 1. Returns `None` when the mask is
/// empty or longer than the region; the length check runs before any
/// subtraction so an oversized mask can never underflow or read out of
/// bounds.
pub fn find_pattern(region: &[u8], pattern: &[u8], mask: &[u8]) -> Option<usize> {
    if mask.is_empty() || mask.len() > region.len() {
        return None;
    }

    region
        .windows(mask.len())
        .position(|window| data_compare(window, pattern, mask))
}

/// A byte signature with wildcard positions, parsed from the textual form
/// used throughout the signature files (`"8B 0D ?? ?? FF"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Signature {
    pattern: Vec<u8>,
    mask: Vec<u8>,
}

impl Signature {
    /// Parse from hex text with `??` (or `?`) wildcard tokens.
    pub fn parse(text: &str) -> Result<Self> {
        let mut pattern = Vec::new();
        let mut mask = Vec::new();

        for token in text.split_whitespace() {
            if token == "??" || token == "?" {
                pattern.push(0);
                mask.push(MASK_WILDCARD);
                continue;
            }

            let value = u8::from_str_radix(token, 16).map_err(|e| {
                Error::InvalidPattern(format!("bad token '{}': {}", token, e))
            })?;
            pattern.push(value);
            mask.push(MASK_MATCH);
        }

        if pattern.is_empty() {
            return Err(Error::InvalidPattern("empty pattern".to_string()));
        }

        Ok(Self { pattern, mask })
    }

    pub fn len(&self) -> usize {
        self.mask.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mask.is_empty()
    }

    pub fn pattern(&self) -> &[u8] {
        &self.pattern
    }

    pub fn mask(&self) -> &[u8] {
        &self.mask
    }

    /// First match offset in `region`, if any.
    pub fn find_in(&self, region: &[u8]) -> Option<usize> {
        find_pattern(region, &self.pattern, &self.mask)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (&b, &m)) in self.pattern.iter().zip(&self.mask).enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            if m == MASK_MATCH {
                write!(f, "{:02X}", b)?;
            } else {
                f.write_str("??")?;
            }
        }
        Ok(())
    }
}

impl TryFrom<String> for Signature {
    type Error = Error;

    fn try_from(text: String) -> Result<Self> {
        Self::parse(&text)
    }
}

impl From<Signature> for String {
    fn from(sig: Signature) -> Self {
        sig.to_string()
    }
}
