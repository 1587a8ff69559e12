use std::collections::BTreeSet;
use std::path::Path;

use log::debug;

use crate::error::{EsrganError, Result};
use crate::filename::{NUMBER_MAX, three_digits};
use crate::library::Library;

/// One `--sets` expression. Parsing is pure and fully validated before
/// any filesystem access; expansion happens against the sets found on disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetToken {
    /// `*`: every set present under the model directory.
    All,
    /// `NNN`
    One(u16),
    /// `NNN-MMM`, inclusive, `NNN <= MMM`.
    Range(u16, u16),
    /// `NNN-`: from NNN to 999.
    From(u16),
}

pub fn parse_token(token: &str) -> Result<SetToken> {
    if token == "*" {
        return Ok(SetToken::All);
    }
    if let Some((lo, hi)) = token.split_once('-') {
        let lo = three_digits(lo).ok_or_else(|| malformed(token))?;
        if hi.is_empty() {
            return Ok(SetToken::From(lo));
        }
        let hi = three_digits(hi).ok_or_else(|| malformed(token))?;
        if lo > hi {
            return Err(EsrganError::InvalidRange(format!(
                "{token:?}: start exceeds end"
            )));
        }
        return Ok(SetToken::Range(lo, hi));
    }
    three_digits(token)
        .map(SetToken::One)
        .ok_or_else(|| malformed(token))
}

pub fn parse_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<SetToken>> {
    if tokens.is_empty() {
        return Err(EsrganError::Validation(
            "at least one set token is required".into(),
        ));
    }
    tokens.iter().map(|t| parse_token(t.as_ref())).collect()
}

fn malformed(token: &str) -> EsrganError {
    EsrganError::InvalidRange(format!(
        "{token:?}: expected '*', NNN, NNN-MMM or NNN- with three-digit groups"
    ))
}

/// Expand a token sequence into the ordered, deduplicated selection.
/// Every form is intersected with the sets present on disk; set numbers
/// absent from `existing` are silently excluded.
pub fn expand(tokens: &[SetToken], existing: &BTreeSet<u16>) -> BTreeSet<u16> {
    let mut selected = BTreeSet::new();
    for token in tokens {
        match *token {
            SetToken::All => selected.extend(existing.iter().copied()),
            SetToken::One(n) => {
                if existing.contains(&n) {
                    selected.insert(n);
                }
            }
            SetToken::Range(lo, hi) => selected.extend(existing.range(lo..=hi).copied()),
            SetToken::From(lo) => selected.extend(existing.range(lo..=NUMBER_MAX).copied()),
        }
    }
    selected
}

/// Sets present on disk: direct subdirectories of the model directory
/// whose names are exactly three digits.
pub fn discover(lib: &dyn Library, model_dir: &Path) -> Result<BTreeSet<u16>> {
    let mut found = BTreeSet::new();
    for name in lib.subdirs(model_dir)? {
        if let Some(n) = three_digits(&name) {
            found.insert(n);
        }
    }
    debug!("{}: {} sets on disk", model_dir.display(), found.len());
    Ok(found)
}
