//! Free-text route queries such as `a to c`, `A-C` or `a,c`.

use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;

/// One letter, a separator (`-`, `,` or `to`) with optional surrounding
/// whitespace, then another letter.
const QUERY_PATTERN: &str = r"([a-zA-Z])\s?(-|,|to)\s?([a-zA-Z])";

static QUERY_RE: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| Regex::new(QUERY_PATTERN));

/// A parsed `(start, end)` pair, upper-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub start: String,
    pub end: String,
}

/// No `X to Y` style pair could be found in the input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("could not read a route from {input:?}; try \"A to C\", \"A-C\" or \"A,C\"")]
pub struct UnreadableQuery {
    pub input: String,
}

impl UnreadableQuery {
    /// Hint shown next to the error.
    #[must_use]
    pub const fn suggestion(&self) -> &'static str {
        "quote queries that contain spaces: pf path \"a to c\""
    }
}

/// Parse the first `X to Y` style pair found in `input`.
///
/// # Errors
///
/// Returns [`UnreadableQuery`] when no pair is found.
pub fn parse_query(input: &str) -> Result<Query> {
    let pattern = QUERY_RE
        .as_ref()
        .map_err(Clone::clone)
        .context("compiling route query pattern")?;
    let caps = pattern.captures(input).ok_or_else(|| UnreadableQuery {
        input: input.to_string(),
    })?;
    Ok(Query {
        start: caps[1].to_uppercase(),
        end: caps[3].to_uppercase(),
    })
}
