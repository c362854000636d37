//! PostgreSQL `tstzrange` literal: `empty`, `[b,e)`, `[b,)`, `(,e)` and `(,)`.
//!
//! That is how the collaborating storage natively encodes the interval column.

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use crate::{
    endpoint::{Instant, parse_instant},
    interval::Interval,
    prelude::*,
};

const EMPTY: &str = "empty";

/// Matches what PostgreSQL prints for `timestamptz` with UTC session time zone.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f%:::z";

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => f.write_str(EMPTY),
            Self::Range { begin, end } => {
                match begin {
                    Some(begin) => write!(f, "[\"{}\",", begin.format(TIMESTAMP_FORMAT))?,
                    None => f.write_str("(,")?,
                }
                if let Some(end) = end {
                    write!(f, "\"{}\"", end.format(TIMESTAMP_FORMAT))?;
                }
                f.write_str(")")
            }
        }
    }
}

impl FromStr for Interval {
    type Err = Error;

    /// Parse the range literal.
    ///
    /// Any bound brackets are accepted, but the result is always half-open.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let literal = input.trim();
        if literal.eq_ignore_ascii_case(EMPTY) {
            return Ok(Self::Empty);
        }
        let inner = literal
            .strip_prefix(['[', '('])
            .and_then(|literal| literal.strip_suffix([']', ')']))
            .ok_or_else(|| Error::literal(input, "expected enclosing brackets"))?;
        let (begin, end) =
            split_bounds(inner).ok_or_else(|| Error::literal(input, "expected two bounds"))?;
        Ok(Self::Range { begin: parse_bound(begin)?, end: parse_bound(end)? })
    }
}

/// Split the bounds on the only comma outside quotes.
fn split_bounds(inner: &str) -> Option<(&str, &str)> {
    let mut is_quoted = false;
    let mut separator = None;
    for (index, char_) in inner.char_indices() {
        match char_ {
            '"' => is_quoted = !is_quoted,
            ',' if !is_quoted => {
                if separator.replace(index).is_some() {
                    return None;
                }
            }
            _ => {}
        }
    }
    let index = separator?;
    Some((&inner[..index], &inner[index + 1..]))
}

fn parse_bound(bound: &str) -> Result<Option<Instant>> {
    let bound = bound.trim();
    let bound = bound.strip_prefix('"').and_then(|bound| bound.strip_suffix('"')).unwrap_or(bound);
    if bound.is_empty()
        || bound.eq_ignore_ascii_case("infinity")
        || bound.eq_ignore_ascii_case("-infinity")
    {
        Ok(None)
    } else {
        parse_instant(bound).map(Some)
    }
}
