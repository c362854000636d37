use std::fmt::{Debug, Formatter};

use serde_with::{DeserializeFromStr, SerializeDisplay};

use crate::{
    endpoint::{Endpoint, Instant, to_instant},
    prelude::*,
};

/// Canonical half-open timestamp interval.
///
/// Serializes as the PostgreSQL `tstzrange` literal, see [`crate::literal`].
#[must_use]
#[derive(Copy, Clone, Eq, PartialEq, Hash, SerializeDisplay, DeserializeFromStr)]
pub enum Interval {
    /// Covers no time at all.
    Empty,

    /// `[begin, end)`, where a missing endpoint is unbounded on that side.
    Range {
        /// Inclusive.
        begin: Option<Instant>,

        /// Exclusive.
        end: Option<Instant>,
    },
}

impl Debug for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Range { begin, end } => {
                if let Some(begin) = begin {
                    write!(f, "{begin:?}")?;
                }
                write!(f, "..")?;
                if let Some(end) = end {
                    write!(f, "{end:?}")?;
                }
                Ok(())
            }
        }
    }
}

impl Interval {
    /// Unbounded on both sides.
    pub const INFINITE: Self = Self::Range { begin: None, end: None };

    /// Build the interval from already converted endpoints.
    ///
    /// Two missing endpoints make an empty interval, not an infinite one.
    pub const fn from_instants(begin: Option<Instant>, end: Option<Instant>) -> Self {
        if begin.is_none() && end.is_none() { Self::Empty } else { Self::Range { begin, end } }
    }

    /// Convert loosely-typed endpoints and build the interval.
    ///
    /// The endpoint order is not checked.
    pub fn normalize(
        begin: Option<impl Into<Endpoint>>,
        end: Option<impl Into<Endpoint>>,
    ) -> Result<Self> {
        Ok(Self::from_instants(to_instant(begin)?, to_instant(end)?))
    }

    /// Split into the begin and end endpoints, [`Interval::Empty`] has neither.
    #[must_use]
    pub const fn decompose(self) -> (Option<Instant>, Option<Instant>) {
        match self {
            Self::Empty => (None, None),
            Self::Range { begin, end } => (begin, end),
        }
    }

    #[must_use]
    pub const fn begin(self) -> Option<Instant> {
        self.decompose().0
    }

    #[must_use]
    pub const fn end(self) -> Option<Instant> {
        self.decompose().1
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    #[must_use]
    pub const fn is_lower_unbounded(self) -> bool {
        matches!(self, Self::Range { begin: None, .. })
    }

    #[must_use]
    pub const fn is_upper_unbounded(self) -> bool {
        matches!(self, Self::Range { end: None, .. })
    }

    /// Check whether the instant falls into the interval.
    #[must_use]
    pub fn contains(self, instant: Instant) -> bool {
        match self {
            Self::Empty => false,
            Self::Range { begin, end } => {
                begin.is_none_or(|begin| begin <= instant) && end.is_none_or(|end| instant < end)
            }
        }
    }
}
